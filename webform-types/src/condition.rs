use serde::{Deserialize, Serialize};

use crate::{AnswerRecord, FieldName, FormError, Question};

/// A display condition: the question is shown only while the answers to
/// `question_id` contain `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// The field whose answers are inspected, e.g. `"question-0"`.
    pub question_id: FieldName,

    /// The value that must be among that field's answers.
    pub value: String,
}

impl Condition {
    pub fn new(question_id: impl Into<FieldName>, value: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            value: value.into(),
        }
    }

    /// Check if the condition holds for the given answers.
    pub fn is_met(&self, answers: &AnswerRecord) -> bool {
        answers.contains_value(&self.question_id, &self.value)
    }
}

/// Evaluate which questions are visible for the current answers.
///
/// Returns one flag per question, in question order. A question without
/// conditions is always visible; otherwise every condition must hold.
///
/// This is a single pass over the answers as given. Chained conditions only
/// settle once the caller drops the answers of hidden questions and evaluates
/// again.
///
/// ```
/// use webform_types::{AnswerRecord, Question, QuestionKind, visible_questions};
///
/// let questions = vec![
///     Question::new("Did you enjoy it?", QuestionKind::radio(["Yes", "No"])),
///     Question::new("What went wrong?", QuestionKind::TextArea).shown_when("question-0", "No"),
/// ];
///
/// let mut answers = AnswerRecord::new();
/// assert_eq!(visible_questions(&questions, &answers), vec![true, false]);
///
/// answers.push("question-0", "No");
/// assert_eq!(visible_questions(&questions, &answers), vec![true, true]);
/// ```
pub fn visible_questions(questions: &[Question], answers: &AnswerRecord) -> Vec<bool> {
    questions
        .iter()
        .map(|question| question.conditions().iter().all(|c| c.is_met(answers)))
        .collect()
}

/// Check that every condition refers to another question of the list.
pub fn validate_conditions(questions: &[Question]) -> Result<(), FormError> {
    for (index, question) in questions.iter().enumerate() {
        let own_name = FieldName::for_index(index);
        for condition in question.conditions() {
            match condition.question_id.index() {
                Some(target) if target == index => {
                    return Err(FormError::SelfReferencingCondition(own_name));
                }
                Some(target) if target < questions.len() => {}
                _ => {
                    return Err(FormError::UnknownConditionTarget {
                        question: own_name,
                        target: condition.question_id.to_string(),
                    });
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QuestionKind;

    fn questions() -> Vec<Question> {
        vec![
            Question::new("Contact me by", QuestionKind::checkbox(["Email", "Phone"])),
            Question::new("Email address", QuestionKind::Email).shown_when("question-0", "Email"),
            Question::new("Phone number", QuestionKind::Tel).shown_when("question-0", "Phone"),
            Question::new("Best time to call", QuestionKind::Time)
                .shown_when("question-0", "Email")
                .shown_when("question-0", "Phone"),
        ]
    }

    #[test]
    fn nothing_answered() {
        let visible = visible_questions(&questions(), &AnswerRecord::new());
        assert_eq!(visible, vec![true, false, false, false]);
    }

    #[test]
    fn single_choice_answered() {
        let mut answers = AnswerRecord::new();
        answers.push("question-0", "Phone");

        let visible = visible_questions(&questions(), &answers);
        assert_eq!(visible, vec![true, false, true, false]);
    }

    #[test]
    fn all_conditions_must_hold() {
        let mut answers = AnswerRecord::new();
        answers.push("question-0", "Email");
        answers.push("question-0", "Phone");

        let visible = visible_questions(&questions(), &answers);
        assert_eq!(visible, vec![true, true, true, true]);
    }

    #[test]
    fn valid_conditions_pass() {
        assert!(validate_conditions(&questions()).is_ok());
    }

    #[test]
    fn unknown_target_is_rejected() {
        let questions = vec![
            Question::new("A", QuestionKind::Text),
            Question::new("B", QuestionKind::Text).shown_when("question-5", "x"),
        ];

        let err = validate_conditions(&questions).unwrap_err();
        assert!(matches!(
            err,
            FormError::UnknownConditionTarget { ref target, .. } if target == "question-5"
        ));
    }

    #[test]
    fn foreign_target_is_rejected() {
        let questions =
            vec![Question::new("A", QuestionKind::Text).shown_when("favourite-colour", "red")];

        assert!(matches!(
            validate_conditions(&questions),
            Err(FormError::UnknownConditionTarget { .. })
        ));
    }

    #[test]
    fn zero_padded_target_is_rejected() {
        let questions = vec![
            Question::new("A", QuestionKind::Text),
            Question::new("B", QuestionKind::Text).shown_when("question-00", "x"),
        ];

        let err = validate_conditions(&questions).unwrap_err();
        assert!(matches!(
            err,
            FormError::UnknownConditionTarget { ref target, .. } if target == "question-00"
        ));
    }

    #[test]
    fn self_reference_is_rejected() {
        let questions = vec![Question::new("A", QuestionKind::Text).shown_when("question-0", "x")];

        assert!(matches!(
            validate_conditions(&questions),
            Err(FormError::SelfReferencingCondition(_))
        ));
    }
}
