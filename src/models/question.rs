// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Raw question row as fetched from the store.
///
/// Question type is 'MCQ' (multiple choice) or 'TF' (true/false). The row
/// carries the correct-answer column because the grading side of the store
/// owns it; it must never be copied into anything a client sees.
#[derive(Debug, Clone, FromRow)]
pub struct QuestionRow {
    pub id: i64,
    pub question_type: String,
    pub body: String,
    pub weight: f64,
    #[sqlx(rename = "question_order")]
    pub order: i32,
    pub correct_answer: Option<String>,
}

/// A choice row belonging to an MCQ question.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ChoiceRow {
    pub question_id: i64,
    pub label: String,
    pub body: String,
}

/// Question as presented to the student: public fields only, with choices
/// nested. True/false questions carry an empty choice list.
#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: i64,
    #[serde(rename = "type")]
    pub question_type: String,
    pub body: String,
    pub weight: f64,
    pub order: i32,
    pub choices: Vec<ChoiceRow>,
}

impl Question {
    /// Joins flat question and choice rows into the nested presentation
    /// shape.
    ///
    /// Question order is whatever the store returned (its declared `order`
    /// column); each question receives exactly the choices whose
    /// `question_id` matches, in the order they were returned. Deterministic
    /// across repeated calls for unchanged rows.
    pub fn assemble(questions: Vec<QuestionRow>, choices: Vec<ChoiceRow>) -> Vec<Question> {
        questions
            .into_iter()
            .map(|q| {
                let matching = choices
                    .iter()
                    .filter(|c| c.question_id == q.id)
                    .cloned()
                    .collect();
                Question {
                    id: q.id,
                    question_type: q.question_type,
                    body: q.body,
                    weight: q.weight,
                    order: q.order,
                    choices: matching,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: i64, question_type: &str, order: i32) -> QuestionRow {
        QuestionRow {
            id,
            question_type: question_type.to_string(),
            body: format!("Question {id}"),
            weight: 10.0,
            order,
            correct_answer: Some("A".to_string()),
        }
    }

    fn choice(question_id: i64, label: &str) -> ChoiceRow {
        ChoiceRow {
            question_id,
            label: label.to_string(),
            body: format!("Choice {label} of {question_id}"),
        }
    }

    #[test]
    fn assemble_joins_choices_to_their_questions_in_order() {
        let questions = vec![question(1, "MCQ", 1), question(2, "MCQ", 2)];
        let choices = vec![
            choice(1, "A"),
            choice(2, "A"),
            choice(1, "B"),
            choice(2, "B"),
        ];

        let assembled = Question::assemble(questions, choices);

        assert_eq!(assembled.len(), 2);
        assert_eq!(assembled[0].id, 1);
        assert_eq!(assembled[1].id, 2);

        let labels: Vec<&str> = assembled[0].choices.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["A", "B"]);
        assert!(assembled[0].choices.iter().all(|c| c.question_id == 1));
        assert!(assembled[1].choices.iter().all(|c| c.question_id == 2));
    }

    #[test]
    fn assemble_preserves_question_row_order() {
        let questions = vec![question(5, "TF", 1), question(3, "MCQ", 2), question(9, "TF", 3)];
        let assembled = Question::assemble(questions, vec![]);

        let ids: Vec<i64> = assembled.iter().map(|q| q.id).collect();
        assert_eq!(ids, [5, 3, 9]);
    }

    #[test]
    fn question_without_matching_choices_gets_empty_vec() {
        let questions = vec![question(1, "MCQ", 1), question(2, "TF", 2)];
        let choices = vec![choice(1, "A")];

        let assembled = Question::assemble(questions, choices);

        assert_eq!(assembled[0].choices.len(), 1);
        assert!(assembled[1].choices.is_empty());
    }

    #[test]
    fn serialized_question_never_carries_the_correct_answer() {
        let assembled = Question::assemble(vec![question(1, "MCQ", 1)], vec![choice(1, "A")]);
        let value = serde_json::to_value(&assembled[0]).unwrap();

        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert!(!keys.iter().any(|k| k.contains("answer")));
        assert_eq!(value["type"], "MCQ");
    }
}
