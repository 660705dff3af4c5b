use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::answers::{MutationOutcome, SurveyInput};
use super::engine::{BackOutcome, NextOutcome, SurveyEngine};
use super::repository::{
    RepositoryError, SessionId, SessionStatus, SubmissionError, SubmissionSink,
    SurveySessionRecord, SurveySessionRepository, SurveySessionView, SurveySubmission,
};

/// Service hosting survey sessions and forwarding finished surveys downstream.
///
/// Mutations on one session run one at a time: each holds that session's lock from fetch
/// through update.
pub struct SurveySessionService<R, S> {
    sessions: Arc<R>,
    sink: Arc<S>,
    locks: SessionLocks,
}

#[derive(Default)]
struct SessionLocks {
    held: Mutex<HashMap<SessionId, Arc<Mutex<()>>>>,
}

impl SessionLocks {
    fn handle(&self, session_id: &SessionId) -> Arc<Mutex<()>> {
        let mut held = self.held.lock().unwrap_or_else(PoisonError::into_inner);
        held.entry(session_id.clone()).or_default().clone()
    }

    /// Drops the lock entry of a closed session; late callers still find it closed in storage.
    fn release(&self, session_id: &SessionId) {
        let mut held = self.held.lock().unwrap_or_else(PoisonError::into_inner);
        held.remove(session_id);
    }
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("survey-{id:06}"))
}

/// Response to an answer mutation.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerReceipt {
    pub outcome: MutationOutcome,
    pub session: SurveySessionView,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Transition {
    Back(BackOutcome),
    Next(NextOutcome),
}

/// Response to a back/next request.
#[derive(Debug, Clone, Serialize)]
pub struct NavigationReceipt {
    pub transition: Transition,
    pub session: SurveySessionView,
}

impl<R, S> SurveySessionService<R, S>
where
    R: SurveySessionRepository + 'static,
    S: SubmissionSink + 'static,
{
    pub fn new(sessions: Arc<R>, sink: Arc<S>) -> Self {
        Self {
            sessions,
            sink,
            locks: SessionLocks::default(),
        }
    }

    /// Open a fresh survey on its first section.
    pub fn start(&self) -> Result<SurveySessionRecord, SurveyServiceError> {
        let record = SurveySessionRecord {
            session_id: next_session_id(),
            engine: SurveyEngine::new(),
            status: SessionStatus::InProgress,
            started_at: Utc::now(),
            submitted_at: None,
        };

        let stored = self.sessions.insert(record)?;
        info!(session_id = %stored.session_id, "survey session started");
        Ok(stored)
    }

    pub fn get(&self, session_id: &SessionId) -> Result<SurveySessionRecord, SurveyServiceError> {
        self.sessions
            .fetch(session_id)?
            .ok_or_else(|| SurveyServiceError::NotFound(session_id.clone()))
    }

    pub fn view(&self, session_id: &SessionId) -> Result<SurveySessionView, SurveyServiceError> {
        Ok(self.get(session_id)?.session_view())
    }

    pub fn answer(
        &self,
        session_id: &SessionId,
        input: SurveyInput,
    ) -> Result<AnswerReceipt, SurveyServiceError> {
        let lock = self.locks.handle(session_id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut record = self.open_session(session_id)?;

        let outcome = record.engine.apply(input);
        if outcome.is_applied() {
            self.sessions.update(record.clone())?;
        }

        Ok(AnswerReceipt {
            outcome,
            session: record.session_view(),
        })
    }

    pub fn back(&self, session_id: &SessionId) -> Result<NavigationReceipt, SurveyServiceError> {
        let lock = self.locks.handle(session_id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut record = self.open_session(session_id)?;

        let outcome = record.engine.back();
        match outcome {
            BackOutcome::Retreated(_) => self.sessions.update(record.clone())?,
            BackOutcome::Exit => debug!(session_id = %session_id, "survey exit requested"),
        }

        Ok(NavigationReceipt {
            transition: Transition::Back(outcome),
            session: record.session_view(),
        })
    }

    /// Advance the session. Completing the final section marks the session submitted, then
    /// hands the survey to the sink; a sink failure reopens the session so the respondent
    /// can retry.
    pub fn next(&self, session_id: &SessionId) -> Result<NavigationReceipt, SurveyServiceError> {
        let lock = self.locks.handle(session_id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut record = self.open_session(session_id)?;

        let outcome = record.engine.next();
        match &outcome {
            NextOutcome::Advanced { .. } => self.sessions.update(record.clone())?,
            NextOutcome::Blocked { .. } => {}
            NextOutcome::Proceed { survey } => {
                let submitted_at = Utc::now();
                record.status = SessionStatus::Submitted;
                record.submitted_at = Some(submitted_at);
                self.sessions.update(record.clone())?;

                let submission = SurveySubmission {
                    session_id: record.session_id.clone(),
                    answers: survey.answers.summary(),
                    next_step: survey.next_step,
                    submitted_at,
                };
                if let Err(error) = self.sink.submit(submission) {
                    self.reopen(record);
                    return Err(error.into());
                }

                self.locks.release(session_id);
                info!(
                    session_id = %record.session_id,
                    next_step = survey.next_step.label(),
                    "background survey submitted"
                );
            }
        }

        Ok(NavigationReceipt {
            transition: Transition::Next(outcome),
            session: record.session_view(),
        })
    }

    fn reopen(&self, mut record: SurveySessionRecord) {
        record.status = SessionStatus::InProgress;
        record.submitted_at = None;
        if let Err(error) = self.sessions.update(record.clone()) {
            warn!(
                session_id = %record.session_id,
                %error,
                "failed to reopen session after rejected submission"
            );
        }
    }

    fn open_session(
        &self,
        session_id: &SessionId,
    ) -> Result<SurveySessionRecord, SurveyServiceError> {
        let record = self.get(session_id)?;
        if record.status == SessionStatus::Submitted {
            return Err(SurveyServiceError::SessionClosed(session_id.clone()));
        }
        Ok(record)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SurveyServiceError {
    #[error("survey session {0} not found")]
    NotFound(SessionId),
    #[error("survey session {0} was already submitted")]
    SessionClosed(SessionId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}
