// src/models/exam.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One exam assigned to a student, as listed on the dashboard.
/// Joined from the exam, course and assignment tables; read-only here.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ExamSummary {
    pub exam_id: i64,
    pub total_grade: f64,
    pub course_id: i64,
    pub course_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub achieved_grade: Option<f64>,
    pub submission_time: Option<DateTime<Utc>>,
}

/// The assignment row consulted before an exam may be entered.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ExamAccess {
    pub exam_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub submission_time: Option<DateTime<Utc>>,
}

impl ExamAccess {
    pub fn phase(&self, now: DateTime<Utc>) -> ExamPhase {
        ExamPhase::compute(now, self.start_time, self.end_time, self.submission_time)
    }
}

/// Lifecycle phase of an exam for a given student at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamPhase {
    NotStarted,
    Open,
    Expired,
    Completed,
}

impl ExamPhase {
    /// Pure phase computation shared by the access guard and the exam-list
    /// status display. Completion wins over the time window; the window is
    /// inclusive at both ends.
    pub fn compute(
        now: DateTime<Utc>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        submission_time: Option<DateTime<Utc>>,
    ) -> Self {
        if submission_time.is_some() {
            return ExamPhase::Completed;
        }
        if now < start {
            ExamPhase::NotStarted
        } else if now > end {
            ExamPhase::Expired
        } else {
            ExamPhase::Open
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn phase_table_over_window_boundaries() {
        let start = at(1_000);
        let end = at(2_000);

        let cases = [
            (at(999), None, ExamPhase::NotStarted),
            (at(1_000), None, ExamPhase::Open), // now == start
            (at(1_500), None, ExamPhase::Open),
            (at(2_000), None, ExamPhase::Open), // now == end
            (at(2_001), None, ExamPhase::Expired),
        ];

        for (now, submitted, expected) in cases {
            assert_eq!(
                ExamPhase::compute(now, start, end, submitted),
                expected,
                "now = {now}"
            );
        }
    }

    #[test]
    fn completed_takes_precedence_over_every_window_position() {
        let start = at(1_000);
        let end = at(2_000);
        let submitted = Some(at(1_500));

        for now in [at(999), at(1_000), at(1_500), at(2_000), at(2_001)] {
            assert_eq!(
                ExamPhase::compute(now, start, end, submitted),
                ExamPhase::Completed,
                "now = {now}"
            );
        }
    }

    #[test]
    fn access_row_phase_matches_pure_computation() {
        let access = ExamAccess {
            exam_id: 7,
            start_time: at(1_000),
            end_time: at(2_000),
            submission_time: None,
        };

        assert_eq!(access.phase(at(1_500)), ExamPhase::Open);
        assert_eq!(
            access.phase(at(1_500)),
            ExamPhase::compute(at(1_500), at(1_000), at(2_000), None)
        );
    }
}
