//! Command-line front end for webform.
//!
//! Usage:
//!   webform render form.json -o form.html
//!   webform submit form.json --answer question-0=Alice --webhook http://localhost:8080/collect
//!   webform example feedback > feedback.json

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use webform::{
    Document, FormConfig, FormEvent, FormRenderer, MemoryDocument, NodeId, PAGE_CONTAINER_ID,
    render_page,
};

#[derive(Parser, Debug)]
#[command(name = "webform")]
#[command(about = "Render survey forms and simulate submissions")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a form config to a standalone HTML page
    Render {
        /// Path to the form config (JSON)
        config: PathBuf,

        /// Write the page here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Page title
        #[arg(long)]
        title: Option<String>,
    },

    /// Fill in a form and submit it, delivering to the webhook if one is set
    Submit {
        /// Path to the form config (JSON)
        config: PathBuf,

        /// An answer as `question-<i>=value`; repeat for several values
        #[arg(short, long = "answer", value_parser = parse_answer)]
        answers: Vec<(String, String)>,

        /// Override the webhook URL from the config
        #[arg(long)]
        webhook: Option<String>,
    },

    /// Print one of the bundled example forms as a config file
    Example {
        #[arg(value_enum)]
        name: ExampleForm,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ExampleForm {
    Feedback,
    Registration,
    Sandwich,
}

fn parse_answer(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{s}'"))?;
    if name.is_empty() {
        return Err(format!("missing field name in '{s}'"));
    }
    Ok((name.to_string(), value.to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match args.command {
        Command::Render {
            config,
            output,
            title,
        } => render(config, output, title),
        Command::Submit {
            config,
            answers,
            webhook,
        } => submit(config, answers, webhook).await,
        Command::Example { name } => example(name),
    }
}

fn load(path: &Path) -> Result<FormConfig> {
    FormConfig::load(path).with_context(|| format!("Failed to load form config {}", path.display()))
}

fn render(config: PathBuf, output: Option<PathBuf>, title: Option<String>) -> Result<()> {
    let form = load(&config)?;
    debug!(questions = form.questions.len(), "config loaded");

    let html = render_page(title.as_deref(), form.questions, form.options)
        .context("Failed to render form")?;

    match output {
        Some(path) => {
            std::fs::write(&path, html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => print!("{html}"),
    }
    Ok(())
}

async fn submit(
    config: PathBuf,
    answers: Vec<(String, String)>,
    webhook: Option<String>,
) -> Result<()> {
    let mut form = load(&config)?;
    if let Some(url) = webhook {
        form.options.webhook_url = Some(url);
    }

    let mut renderer = FormRenderer::try_new(
        MemoryDocument::with_container(PAGE_CONTAINER_ID),
        PAGE_CONTAINER_ID,
        form.questions,
        form.options,
    )
    .context("Failed to mount form")?;

    // One value at a time, re-evaluating conditions so answers to revealed
    // questions can be filled in.
    for (name, value) in &answers {
        fill(&mut renderer, name, value)?;
        renderer.handle(FormEvent::Input);
    }

    let Some(submission) = renderer.handle(FormEvent::Submit) else {
        bail!("Form was not rendered");
    };

    match submission.delivery {
        Some(delivery) => {
            let response = delivery.outcome().await.context("Webhook delivery failed")?;
            println!("{response:#}");
        }
        None => println!("{}", submission.answers),
    }
    Ok(())
}

/// Set a control named `name` to `value` the way a user would.
fn fill(renderer: &mut FormRenderer<MemoryDocument>, name: &str, value: &str) -> Result<()> {
    let Some(form) = renderer.rendered().map(|r| r.form) else {
        bail!("Form was not rendered");
    };
    let controls = renderer.document().elements_by_name(form, name);
    if controls.is_empty() {
        bail!("No field named '{name}'");
    }

    let document = renderer.document_mut();
    for control in controls {
        if document.is_disabled(control) {
            warn!(field = name, "field is hidden, answer ignored");
            return Ok(());
        }
        let tag = document.tag(control).to_string();
        let kind = document.attribute(&control, "type");
        match (tag.as_str(), kind.as_deref()) {
            ("input", Some("radio" | "checkbox")) => {
                if document.attribute(&control, "value").as_deref() == Some(value) {
                    document.set_checked(control, true);
                    return Ok(());
                }
            }
            ("select", _) => {
                if let Some(option) = find_option(document, control, value) {
                    document.set_selected(option, true);
                    return Ok(());
                }
            }
            _ => {
                document.set_value(control, value);
                return Ok(());
            }
        }
    }
    bail!("'{value}' is not a choice of '{name}'")
}

fn find_option(document: &MemoryDocument, select: NodeId, value: &str) -> Option<NodeId> {
    document.elements_by_tag(select, "option").into_iter().find(|option| {
        document.attribute(option, "value").as_deref() == Some(value)
            || document.text(*option) == Some(value)
    })
}

fn example(name: ExampleForm) -> Result<()> {
    let questions = match name {
        ExampleForm::Feedback => example_webforms::customer_feedback(),
        ExampleForm::Registration => example_webforms::event_registration(),
        ExampleForm::Sandwich => example_webforms::sandwich_order(),
    };
    let config = FormConfig::new(questions, Default::default());
    println!("{}", config.to_json().context("Failed to serialize example")?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mounted() -> FormRenderer<MemoryDocument> {
        FormRenderer::try_new(
            MemoryDocument::with_container(PAGE_CONTAINER_ID),
            PAGE_CONTAINER_ID,
            example_webforms::customer_feedback(),
            Default::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_parse_answer() {
        assert_eq!(
            parse_answer("question-0=a=b").unwrap(),
            ("question-0".to_string(), "a=b".to_string())
        );
        assert!(parse_answer("question-0").is_err());
        assert!(parse_answer("=x").is_err());
    }

    #[test]
    fn test_fill_choices_and_text() {
        let mut renderer = mounted();
        fill(&mut renderer, "question-0", "Alice").unwrap();
        fill(&mut renderer, "question-2", "Unsatisfied").unwrap();
        renderer.handle(FormEvent::Input);
        fill(&mut renderer, "question-3", "Broken on arrival").unwrap();
        fill(&mut renderer, "question-5", "Email").unwrap();
        fill(&mut renderer, "question-5", "Post").unwrap();

        let answers = renderer.answers().unwrap();
        assert_eq!(answers.for_question(0).unwrap(), ["Alice"]);
        assert_eq!(answers.for_question(2).unwrap(), ["Unsatisfied"]);
        assert_eq!(answers.for_question(3).unwrap(), ["Broken on arrival"]);
        assert_eq!(answers.for_question(5).unwrap(), ["Email", "Post"]);
    }

    #[test]
    fn test_fill_rejects_unknown_choice() {
        let mut renderer = mounted();
        assert!(fill(&mut renderer, "question-2", "Delighted").is_err());
        assert!(fill(&mut renderer, "question-9", "x").is_err());
    }
}
