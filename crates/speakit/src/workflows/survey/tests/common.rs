use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::survey::answers::{MutationOutcome, SurveyAnswers, SurveyInput};
use crate::workflows::survey::domain::{
    Activity, Hobby, Industry, Leisure, QuestionId, Residence, Sport, SurveySection, Travel,
};
use crate::workflows::survey::engine::{NextOutcome, SurveyEngine};
use crate::workflows::survey::repository::{
    RepositoryError, SessionId, SessionStatus, SubmissionError, SubmissionSink, SurveySessionRecord,
    SurveySessionRepository, SurveySubmission,
};
use crate::workflows::survey::service::SurveySessionService;

pub(super) fn answers_with(inputs: &[SurveyInput]) -> SurveyAnswers {
    let mut answers = SurveyAnswers::new();
    for input in inputs {
        let outcome = answers.apply(*input);
        assert!(
            !outcome.is_rejected(),
            "fixture input {input:?} rejected: {outcome:?}"
        );
    }
    answers
}

pub(super) fn applied(outcome: MutationOutcome) -> Vec<QuestionId> {
    match outcome {
        MutationOutcome::Applied { cleared } => cleared,
        other => panic!("expected applied mutation, got {other:?}"),
    }
}

/// Activity toggles selecting the first `n` labels of each group.
pub(super) fn activity_inputs(
    leisure: usize,
    hobbies: usize,
    sports: usize,
    travel: usize,
) -> Vec<SurveyInput> {
    let leisure = Leisure::ALL.iter().take(leisure).map(|v| Activity::Leisure(*v));
    let hobbies = Hobby::ALL.iter().take(hobbies).map(|v| Activity::Hobby(*v));
    let sports = Sport::ALL.iter().take(sports).map(|v| Activity::Sport(*v));
    let travel = Travel::ALL.iter().take(travel).map(|v| Activity::Travel(*v));
    leisure
        .chain(hobbies)
        .chain(sports)
        .chain(travel)
        .map(SurveyInput::ToggleActivity)
        .collect()
}

/// Inputs that complete each section with the shortest valid path.
pub(super) fn section_inputs(section: SurveySection) -> Vec<SurveyInput> {
    match section {
        SurveySection::Occupation => vec![SurveyInput::Industry(Industry::Military)],
        SurveySection::Education => vec![SurveyInput::IsStudent(false)],
        SurveySection::Residence => vec![SurveyInput::Residence(Residence::WithFamily)],
        SurveySection::Activities => activity_inputs(5, 3, 2, 2),
    }
}

/// Engine advanced to `target` with every earlier section completed.
pub(super) fn engine_at(target: SurveySection) -> SurveyEngine {
    let mut engine = SurveyEngine::new();
    while engine.section() != target {
        for input in section_inputs(engine.section()) {
            engine.apply(input);
        }
        match engine.next() {
            NextOutcome::Advanced { .. } => {}
            other => panic!("fixture failed to advance: {other:?}"),
        }
    }
    engine
}

#[derive(Default, Clone)]
pub(super) struct MemorySessions {
    pub(super) records: Arc<Mutex<HashMap<SessionId, SurveySessionRecord>>>,
}

impl SurveySessionRepository for MemorySessions {
    fn insert(&self, record: SurveySessionRecord) -> Result<SurveySessionRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("session mutex poisoned");
        if guard.contains_key(&record.session_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.session_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: SurveySessionRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("session mutex poisoned");
        match guard.get_mut(&record.session_id) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SurveySessionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("session mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemorySink {
    pub(super) submissions: Arc<Mutex<Vec<SurveySubmission>>>,
}

impl MemorySink {
    pub(super) fn submissions(&self) -> Vec<SurveySubmission> {
        self.submissions
            .lock()
            .expect("sink mutex poisoned")
            .clone()
    }
}

impl SubmissionSink for MemorySink {
    fn submit(&self, submission: SurveySubmission) -> Result<(), SubmissionError> {
        self.submissions
            .lock()
            .expect("sink mutex poisoned")
            .push(submission);
        Ok(())
    }
}

pub(super) struct OfflineSink;

impl SubmissionSink for OfflineSink {
    fn submit(&self, _submission: SurveySubmission) -> Result<(), SubmissionError> {
        Err(SubmissionError::Transport("assessment service offline".to_string()))
    }
}

pub(super) struct UnavailableSessions;

impl SurveySessionRepository for UnavailableSessions {
    fn insert(&self, _record: SurveySessionRecord) -> Result<SurveySessionRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: SurveySessionRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<SurveySessionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Memory store that pauses inside `fetch`, widening the window between read and write.
#[derive(Default, Clone)]
pub(super) struct SlowSessions {
    pub(super) inner: MemorySessions,
}

impl SurveySessionRepository for SlowSessions {
    fn insert(&self, record: SurveySessionRecord) -> Result<SurveySessionRecord, RepositoryError> {
        self.inner.insert(record)
    }

    fn update(&self, record: SurveySessionRecord) -> Result<(), RepositoryError> {
        self.inner.update(record)
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SurveySessionRecord>, RepositoryError> {
        let record = self.inner.fetch(id);
        thread::sleep(Duration::from_millis(20));
        record
    }
}

/// Memory store that refuses to persist submitted sessions while `reject_submitted` is set.
#[derive(Default, Clone)]
pub(super) struct ClosingOutageSessions {
    pub(super) inner: MemorySessions,
    pub(super) reject_submitted: Arc<AtomicBool>,
}

impl SurveySessionRepository for ClosingOutageSessions {
    fn insert(&self, record: SurveySessionRecord) -> Result<SurveySessionRecord, RepositoryError> {
        self.inner.insert(record)
    }

    fn update(&self, record: SurveySessionRecord) -> Result<(), RepositoryError> {
        if record.status == SessionStatus::Submitted && self.reject_submitted.load(Ordering::SeqCst)
        {
            return Err(RepositoryError::Unavailable("write timeout".to_string()));
        }
        self.inner.update(record)
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SurveySessionRecord>, RepositoryError> {
        self.inner.fetch(id)
    }
}

pub(super) fn memory_service() -> (
    SurveySessionService<MemorySessions, MemorySink>,
    MemorySessions,
    MemorySink,
) {
    let sessions = MemorySessions::default();
    let sink = MemorySink::default();
    let service = SurveySessionService::new(Arc::new(sessions.clone()), Arc::new(sink.clone()));
    (service, sessions, sink)
}

/// Drives a stored session through every section without the final proceed.
pub(super) fn complete_all_sections<R, S>(
    service: &SurveySessionService<R, S>,
    session_id: &SessionId,
) where
    R: SurveySessionRepository + 'static,
    S: SubmissionSink + 'static,
{
    for section in SurveySection::ordered() {
        for input in section_inputs(section) {
            service.answer(session_id, input).expect("answer accepted");
        }
        if !section.is_last() {
            service.next(session_id).expect("advance");
        }
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
