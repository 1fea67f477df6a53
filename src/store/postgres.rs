// src/store/postgres.rs

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::{
    error::AppError,
    models::{
        exam::{ExamAccess, ExamSummary},
        question::{ChoiceRow, QuestionRow},
        student::StudentProfile,
        submission::StudentAnswer,
    },
    store::ExamStore,
};

/// Postgres-backed store client.
///
/// Owns the connection pool for its whole lifetime; constructed once at
/// startup and injected into the router state. Row shapes are validated at
/// this boundary through `FromRow` decoding, so a store returning unexpected
/// columns fails here instead of leaking untyped data upward.
#[derive(Clone)]
pub struct PgExamStore {
    pool: PgPool,
}

impl PgExamStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Credential row, private to the authentication call. Never serialized.
#[derive(FromRow)]
struct StudentCredentialRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    password: String,
    track_id: Option<String>,
}

/// Checks a login password against the argon2 hash stored on the student
/// record. A hash that does not parse means the student row is corrupt, not
/// that the credentials were wrong.
fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    let parsed_hash =
        PasswordHash::new(password_hash).map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[async_trait]
impl ExamStore for PgExamStore {
    async fn authenticate_student(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<StudentProfile>, AppError> {
        let row = sqlx::query_as::<_, StudentCredentialRow>(
            r#"
            SELECT id, first_name, last_name, email, password, track_id
            FROM students
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("authenticate_student query failed: {:?}", e);
            AppError::from(e)
        })?;

        let Some(row) = row else {
            return Ok(None);
        };

        if !verify_password(password, &row.password)? {
            return Ok(None);
        }

        Ok(Some(StudentProfile {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            track_id: row.track_id,
        }))
    }

    async fn student_exams(&self, student_id: i64) -> Result<Vec<ExamSummary>, AppError> {
        let exams = sqlx::query_as::<_, ExamSummary>(
            r#"
            SELECT
                e.id AS exam_id,
                e.total_grade,
                e.course_id,
                c.name AS course_name,
                e.start_time,
                e.end_time,
                se.achieved_grade,
                se.submission_time
            FROM student_exams se
            JOIN exams e ON e.id = se.exam_id
            JOIN courses c ON c.id = e.course_id
            WHERE se.student_id = $1
            ORDER BY e.start_time, e.id
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("student_exams query failed for student {}: {:?}", student_id, e);
            AppError::from(e)
        })?;

        Ok(exams)
    }

    async fn check_exam_access(
        &self,
        student_id: i64,
        exam_id: i64,
    ) -> Result<Option<ExamAccess>, AppError> {
        // A missing exam and an exam not assigned to this student produce the
        // same empty result.
        let access = sqlx::query_as::<_, ExamAccess>(
            r#"
            SELECT
                e.id AS exam_id,
                e.start_time,
                e.end_time,
                se.submission_time
            FROM student_exams se
            JOIN exams e ON e.id = se.exam_id
            WHERE se.student_id = $1 AND se.exam_id = $2
            "#,
        )
        .bind(student_id)
        .bind(exam_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                "check_exam_access query failed for student {} exam {}: {:?}",
                student_id,
                exam_id,
                e
            );
            AppError::from(e)
        })?;

        Ok(access)
    }

    async fn exam_questions_with_choices(
        &self,
        exam_id: i64,
    ) -> Result<(Vec<QuestionRow>, Vec<ChoiceRow>), AppError> {
        let questions = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT id, question_type, body, weight, question_order, correct_answer
            FROM questions
            WHERE exam_id = $1
            ORDER BY question_order, id
            "#,
        )
        .bind(exam_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("question fetch failed for exam {}: {:?}", exam_id, e);
            AppError::from(e)
        })?;

        let choices = sqlx::query_as::<_, ChoiceRow>(
            r#"
            SELECT ch.question_id, ch.label, ch.body
            FROM choices ch
            JOIN questions q ON q.id = ch.question_id
            WHERE q.exam_id = $1
            ORDER BY ch.question_id, ch.id
            "#,
        )
        .bind(exam_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("choice fetch failed for exam {}: {:?}", exam_id, e);
            AppError::from(e)
        })?;

        Ok((questions, choices))
    }

    async fn submit_exam_answers(
        &self,
        student_id: i64,
        exam_id: i64,
        answers: &[StudentAnswer],
    ) -> Result<f64, AppError> {
        let answers_json = serde_json::to_string(answers)
            .map_err(|e| AppError::Internal(format!("answer payload encoding failed: {e}")))?;

        // submit_exam_answers grades the payload, writes achieved_grade and
        // submission_time, and enforces the single completion transition in
        // one atomic statement. Re-submission returns the stored grade.
        let grade = sqlx::query_scalar::<_, f64>(
            "SELECT submit_exam_answers($1, $2, $3::jsonb) AS grade",
        )
        .bind(student_id)
        .bind(exam_id)
        .bind(answers_json)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                "submit_exam_answers failed for student {} exam {}: {:?}",
                student_id,
                exam_id,
                e
            );
            AppError::from(e)
        })?;

        Ok(grade)
    }
}
