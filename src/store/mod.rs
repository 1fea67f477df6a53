// src/store/mod.rs

pub mod postgres;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{
        exam::{ExamAccess, ExamSummary},
        question::{ChoiceRow, QuestionRow},
        student::StudentProfile,
        submission::StudentAnswer,
    },
};

pub use postgres::PgExamStore;

/// The data-store collaborator boundary.
///
/// All persistent state (students, exams, assignments, questions, grades)
/// lives behind this trait. The production implementation talks to Postgres;
/// tests substitute an in-memory implementation. Every method corresponds to
/// one stored-procedure-style call of the external store.
#[async_trait]
pub trait ExamStore: Send + Sync {
    /// Matches an email/password pair against the student table.
    /// `Ok(None)` means the credentials did not match any student.
    async fn authenticate_student(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<StudentProfile>, AppError>;

    /// All exams assigned to the student, with completion state.
    async fn student_exams(&self, student_id: i64) -> Result<Vec<ExamSummary>, AppError>;

    /// The assignment row binding `(student_id, exam_id)`, or `None` when the
    /// exam does not exist or is not assigned to this student. The two cases
    /// are indistinguishable on purpose.
    async fn check_exam_access(
        &self,
        student_id: i64,
        exam_id: i64,
    ) -> Result<Option<ExamAccess>, AppError>;

    /// One logical fetch of the exam content: question rows in declared
    /// order, and all their choice rows.
    async fn exam_questions_with_choices(
        &self,
        exam_id: i64,
    ) -> Result<(Vec<QuestionRow>, Vec<ChoiceRow>), AppError>;

    /// Hands a normalized answer set to the grading collaborator and returns
    /// the achieved grade.
    ///
    /// The collaborator grades, records the submission time, and enforces the
    /// at-most-once completion transition atomically; a repeated call for an
    /// already-completed assignment must be rejected or answered with the
    /// stored grade, never re-graded.
    async fn submit_exam_answers(
        &self,
        student_id: i64,
        exam_id: i64,
        answers: &[StudentAnswer],
    ) -> Result<f64, AppError>;
}
