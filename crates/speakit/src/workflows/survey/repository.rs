use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::answers::AnswerSummary;
use super::domain::AssessmentStep;
use super::engine::SurveyEngine;
use super::views::SurveyView;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Submitted,
}

impl SessionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::InProgress => "In Progress",
            Self::Submitted => "Submitted",
        }
    }
}

/// Repository record pairing a survey engine with session metadata.
#[derive(Debug, Clone)]
pub struct SurveySessionRecord {
    pub session_id: SessionId,
    pub engine: SurveyEngine,
    pub status: SessionStatus,
    pub started_at: DateTime<Utc>,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl SurveySessionRecord {
    pub fn session_view(&self) -> SurveySessionView {
        SurveySessionView {
            session_id: self.session_id.clone(),
            status: self.status,
            status_label: self.status.label(),
            started_at: self.started_at,
            submitted_at: self.submitted_at,
            view: self.engine.view(),
        }
    }
}

/// Public payload describing a session and its current section.
#[derive(Debug, Clone, Serialize)]
pub struct SurveySessionView {
    pub session_id: SessionId,
    pub status: SessionStatus,
    pub status_label: &'static str,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    pub view: SurveyView,
}

/// Storage abstraction so the service can be exercised without a database.
pub trait SurveySessionRepository: Send + Sync {
    fn insert(&self, record: SurveySessionRecord) -> Result<SurveySessionRecord, RepositoryError>;
    fn update(&self, record: SurveySessionRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<SurveySessionRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Finished survey as delivered to the next workflow stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveySubmission {
    pub session_id: SessionId,
    pub answers: AnswerSummary,
    pub next_step: AssessmentStep,
    pub submitted_at: DateTime<Utc>,
}

/// Downstream workflow handler that receives finished surveys.
pub trait SubmissionSink: Send + Sync {
    fn submit(&self, submission: SurveySubmission) -> Result<(), SubmissionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("submission transport unavailable: {0}")]
    Transport(String),
}
