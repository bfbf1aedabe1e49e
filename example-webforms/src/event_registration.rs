use webform_types::{
    FormConfig, NumberQuestion, Question, QuestionKind, RenderOptions, SelectOption,
    SelectQuestion,
};

/// Workshops attendees can sign up for.
pub const WORKSHOPS: &[(&str, &str)] = &[
    ("Intro to Rust", "rust-intro"),
    ("Async in practice", "async"),
    ("Embedded Rust", "embedded"),
];

/// Conference registration with every native input type.
pub fn event_registration() -> Vec<Question> {
    let workshops = WORKSHOPS
        .iter()
        .map(|(label, value)| SelectOption::new(*label, *value))
        .collect();

    vec![
        Question::new("Full name", QuestionKind::Text)
            .required()
            .with_max_characters(80),
        Question::new("Email", QuestionKind::Email).required(),
        Question::new("Phone", QuestionKind::Tel)
            .with_placeholder("+49 30 1234567")
            .with_validation(r"\+?[0-9 ]{6,20}"),
        Question::new("Arrival date", QuestionKind::Date).required(),
        Question::new("Arrival time", QuestionKind::Time),
        Question::new("Departure", QuestionKind::DateTimeLocal),
        Question::new(
            "Ticket type",
            QuestionKind::select(vec![
                SelectOption::new("Standard", "standard"),
                SelectOption::new("Student", "student"),
                SelectOption::new("Speaker", "speaker"),
            ]),
        )
        .required(),
        Question::new(
            "Workshops",
            QuestionKind::Select(SelectQuestion::new(workshops).multiple()),
        ),
        Question::new(
            "Guests",
            QuestionKind::Number(NumberQuestion::with_bounds(None, Some(3.0)).with_step(1.0)),
        ),
        Question::new("Dietary requirements", QuestionKind::TextArea)
            .with_placeholder("Vegetarian, allergies, ..."),
    ]
}

/// The registration form posting to a collector endpoint.
pub fn event_registration_config(webhook_url: &str) -> FormConfig {
    FormConfig::new(
        event_registration(),
        RenderOptions::new()
            .with_style("default")
            .with_webhook(webhook_url),
    )
}
