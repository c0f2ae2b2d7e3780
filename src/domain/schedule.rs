use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Respondents may answer the questionnaire once per calendar day.
pub const CADENCE_DAYS: i64 = 1;

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionWindow {
    pub due: bool,
    pub next_due_date: NaiveDate,
    pub last_date: Option<NaiveDate>,
}

impl SubmissionWindow {
    pub fn already_submitted(&self) -> bool {
        !self.due
    }
}

pub fn submission_window(last_date: Option<NaiveDate>, today: NaiveDate) -> SubmissionWindow {
    let due = last_date
        .map(|last| (today - last).num_days() >= CADENCE_DAYS)
        .unwrap_or(true);

    let next_due_date = match last_date {
        Some(last) if !due => last + Duration::days(CADENCE_DAYS),
        _ => today,
    };

    SubmissionWindow {
        due,
        next_due_date,
        last_date,
    }
}
