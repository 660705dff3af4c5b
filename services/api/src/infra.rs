use metrics_exporter_prometheus::PrometheusHandle;
use speakit::workflows::survey::{
    RepositoryError, SessionId, SubmissionError, SubmissionSink, SurveySessionRecord,
    SurveySessionRepository, SurveySubmission,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySurveySessions {
    records: Arc<Mutex<HashMap<SessionId, SurveySessionRecord>>>,
}

impl SurveySessionRepository for InMemorySurveySessions {
    fn insert(&self, record: SurveySessionRecord) -> Result<SurveySessionRecord, RepositoryError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        if guard.contains_key(&record.session_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.session_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: SurveySessionRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        if guard.contains_key(&record.session_id) {
            guard.insert(record.session_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SurveySessionRecord>, RepositoryError> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard.get(id).cloned())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> RepositoryError {
    RepositoryError::Unavailable("session store lock poisoned".to_string())
}

/// Stands in for the self-assessment stage: logs each finished survey and keeps it in memory.
#[derive(Default, Clone)]
pub(crate) struct InMemorySubmissionSink {
    submissions: Arc<Mutex<Vec<SurveySubmission>>>,
}

impl SubmissionSink for InMemorySubmissionSink {
    fn submit(&self, submission: SurveySubmission) -> Result<(), SubmissionError> {
        info!(
            session_id = %submission.session_id,
            next_step = submission.next_step.label(),
            "finished survey forwarded"
        );
        let mut guard = self
            .submissions
            .lock()
            .map_err(|_| SubmissionError::Transport("submission buffer poisoned".to_string()))?;
        guard.push(submission);
        Ok(())
    }
}

impl InMemorySubmissionSink {
    pub(crate) fn submissions(&self) -> Vec<SurveySubmission> {
        self.submissions
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}
