// src/handlers/exams.rs

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

use crate::{
    error::AppError,
    models::{
        exam::{ExamAccess, ExamPhase, ExamSummary},
        question::Question,
        submission::{SubmitExamRequest, normalize_answers},
    },
    store::ExamStore,
    utils::jwt::Claims,
};

/// Exam summary plus its current lifecycle phase.
///
/// The phase is computed server-side with the same function the access guard
/// uses, so the dashboard can never disagree with the enforcement path.
#[derive(Debug, Serialize)]
struct ExamWithStatus {
    #[serde(flatten)]
    exam: ExamSummary,
    status: ExamPhase,
}

/// Lists the exams assigned to the authenticated student.
pub async fn list_exams(
    State(store): State<Arc<dyn ExamStore>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let student_id = claims.student_id()?;

    let now = Utc::now();
    let exams: Vec<ExamWithStatus> = store
        .student_exams(student_id)
        .await?
        .into_iter()
        .map(|exam| {
            let status =
                ExamPhase::compute(now, exam.start_time, exam.end_time, exam.submission_time);
            ExamWithStatus { exam, status }
        })
        .collect();

    Ok(Json(json!({ "exams": exams })))
}

/// Exam Access Guard.
///
/// Decides whether the student may interact with the exam right now. Only an
/// assigned exam in its `Open` phase passes; every other state maps to the
/// most specific error available. "Exam does not exist" and "not assigned to
/// this student" are indistinguishable so unauthorized students cannot probe
/// which exams exist.
pub(crate) async fn check_access(
    store: &dyn ExamStore,
    student_id: i64,
    exam_id: i64,
) -> Result<ExamAccess, AppError> {
    if exam_id <= 0 {
        return Err(AppError::BadRequest("Invalid exam id".to_string()));
    }

    let access = store
        .check_exam_access(student_id, exam_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Exam not found".to_string()))?;

    match access.phase(Utc::now()) {
        ExamPhase::Completed => Err(AppError::InvalidState(
            "Exam already completed".to_string(),
        )),
        ExamPhase::NotStarted => Err(AppError::InvalidState(
            "Exam has not started yet".to_string(),
        )),
        ExamPhase::Expired => Err(AppError::InvalidState("Exam time has expired".to_string())),
        ExamPhase::Open => Ok(access),
    }
}

/// Returns the questions of an open exam, choices nested, plus the end time
/// the client needs to render its countdown.
///
/// The exam id arrives already parsed by the routing layer (`Path<i64>`); a
/// non-numeric id is rejected there before any store call is made.
pub async fn get_exam_questions(
    State(store): State<Arc<dyn ExamStore>>,
    Extension(claims): Extension<Claims>,
    Path(exam_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let student_id = claims.student_id()?;

    let access = check_access(store.as_ref(), student_id, exam_id).await?;

    let (questions, choices) = store.exam_questions_with_choices(exam_id).await?;
    let questions = Question::assemble(questions, choices);

    Ok(Json(json!({
        "questions": questions,
        "exam_end_time": access.end_time,
    })))
}

/// Submission Aggregator.
///
/// Re-derives the phase through the access guard, so a submission for a
/// completed assignment or one arriving outside the window is rejected here
/// the same way a question fetch would be. The answer list is normalized to
/// one entry per exam question before it reaches the grading collaborator,
/// which grades, persists the completion transition atomically, and remains
/// the single arbiter of double-submission races.
pub async fn submit_exam(
    State(store): State<Arc<dyn ExamStore>>,
    Extension(claims): Extension<Claims>,
    Path(exam_id): Path<i64>,
    Json(req): Json<SubmitExamRequest>,
) -> Result<impl IntoResponse, AppError> {
    let student_id = claims.student_id()?;

    check_access(store.as_ref(), student_id, exam_id).await?;

    let (questions, _choices) = store.exam_questions_with_choices(exam_id).await?;
    let normalized = normalize_answers(&questions, &req.answers);

    let grade = store
        .submit_exam_answers(student_id, exam_id, &normalized)
        .await?;

    tracing::info!(
        "student {} submitted exam {} for a grade of {}",
        student_id,
        exam_id,
        grade
    );

    Ok(Json(json!({
        "success": true,
        "grade": grade,
    })))
}
