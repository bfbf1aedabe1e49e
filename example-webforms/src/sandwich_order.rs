use serde_json::json;
use webform_types::{CustomQuestion, Question, QuestionKind};

/// Name of the custom rating component used by [`sandwich_order`].
pub const RATING_COMPONENT: &str = "star-rating";

/// Sandwich order with a custom star rating widget.
///
/// The last question needs a widget registered under [`RATING_COMPONENT`].
pub fn sandwich_order() -> Vec<Question> {
    vec![
        Question::new(
            "Bread",
            QuestionKind::radio(["Italian", "Wheat", "Honey Oat", "Flatbread", "Wrap"]),
        )
        .required(),
        Question::new(
            "Toppings",
            QuestionKind::checkbox(["Lettuce", "Tomato", "Onion", "Pickles", "Olives"]),
        ),
        Question::new("Toast it?", QuestionKind::radio(["Yes", "No"])),
        Question::new("How dark?", QuestionKind::radio(["Light", "Medium", "Dark"]))
            .shown_when("question-2", "Yes"),
        Question::new(
            "Rate your last sandwich",
            QuestionKind::Custom(
                CustomQuestion::new(RATING_COMPONENT).with_props(json!({ "max": 5 })),
            ),
        ),
    ]
}
