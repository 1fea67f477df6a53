// src/models/submission.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::question::QuestionRow;

/// One answered question as transmitted by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentAnswer {
    pub question_id: i64,
    pub answer: String,
}

/// DTO for submitting an exam attempt.
#[derive(Debug, Deserialize)]
pub struct SubmitExamRequest {
    #[serde(default)]
    pub answers: Vec<StudentAnswer>,
}

/// Normalizes a client answer list against the exam's full question set.
///
/// The client may omit unanswered questions; the grading collaborator is
/// handed one entry per question, in the exam's question order, with an empty
/// string where the student left a question blank. Answers for unknown
/// question ids are dropped.
pub fn normalize_answers(
    questions: &[QuestionRow],
    answers: &[StudentAnswer],
) -> Vec<StudentAnswer> {
    let by_id: HashMap<i64, &str> = answers
        .iter()
        .map(|a| (a.question_id, a.answer.as_str()))
        .collect();

    questions
        .iter()
        .map(|q| StudentAnswer {
            question_id: q.id,
            answer: by_id.get(&q.id).copied().unwrap_or("").to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: i64) -> QuestionRow {
        QuestionRow {
            id,
            question_type: "MCQ".to_string(),
            body: format!("Question {id}"),
            weight: 10.0,
            order: id as i32,
            correct_answer: Some("A".to_string()),
        }
    }

    #[test]
    fn normalization_fills_unanswered_questions_with_empty_strings() {
        let questions = vec![question(1), question(2), question(3)];
        let answers = vec![StudentAnswer {
            question_id: 1,
            answer: "A".to_string(),
        }];

        let normalized = normalize_answers(&questions, &answers);

        assert_eq!(normalized.len(), 3);
        assert_eq!(normalized[0].question_id, 1);
        assert_eq!(normalized[0].answer, "A");
        assert_eq!(normalized[1].question_id, 2);
        assert_eq!(normalized[1].answer, "");
        assert_eq!(normalized[2].question_id, 3);
        assert_eq!(normalized[2].answer, "");
    }

    #[test]
    fn normalization_follows_exam_question_order_not_client_order() {
        let questions = vec![question(3), question(1), question(2)];
        let answers = vec![
            StudentAnswer {
                question_id: 1,
                answer: "B".to_string(),
            },
            StudentAnswer {
                question_id: 3,
                answer: "C".to_string(),
            },
        ];

        let normalized = normalize_answers(&questions, &answers);

        let ids: Vec<i64> = normalized.iter().map(|a| a.question_id).collect();
        assert_eq!(ids, [3, 1, 2]);
        assert_eq!(normalized[0].answer, "C");
        assert_eq!(normalized[1].answer, "B");
        assert_eq!(normalized[2].answer, "");
    }

    #[test]
    fn answers_for_unknown_questions_are_dropped() {
        let questions = vec![question(1)];
        let answers = vec![
            StudentAnswer {
                question_id: 99,
                answer: "X".to_string(),
            },
            StudentAnswer {
                question_id: 1,
                answer: "A".to_string(),
            },
        ];

        let normalized = normalize_answers(&questions, &answers);

        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized[0].question_id, 1);
        assert_eq!(normalized[0].answer, "A");
    }
}
