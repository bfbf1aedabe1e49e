use webform_types::{NumberQuestion, Question, QuestionKind};

/// Post-purchase feedback. The follow-up asking what went wrong is only shown
/// to unhappy customers.
pub fn customer_feedback() -> Vec<Question> {
    vec![
        Question::new("What is your name?", QuestionKind::Text).with_placeholder("Jane Doe"),
        Question::new("Your email address", QuestionKind::Email).required(),
        Question::new(
            "How satisfied are you with your purchase?",
            QuestionKind::radio(["Very satisfied", "Satisfied", "Unsatisfied"]),
        )
        .required(),
        Question::new("What went wrong?", QuestionKind::TextArea)
            .with_max_characters(1000)
            .shown_when("question-2", "Unsatisfied"),
        Question::new(
            "How likely are you to recommend us?",
            QuestionKind::Number(NumberQuestion::with_bounds(Some(1.0), Some(10.0))),
        ),
        Question::new(
            "Which channels may we contact you on?",
            QuestionKind::checkbox(["Email", "Phone", "Post"]),
        ),
    ]
}
