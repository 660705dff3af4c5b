//! Background survey: four sections of questions with branch-dependent follow-ups, a
//! completion gate per section, and a cursor that only moves forward past complete sections.
//!
//! The engine is pure and synchronous. The session service and router wrap it for HTTP use
//! and hand finished surveys to a [`SubmissionSink`].

pub mod answers;
pub mod completion;
pub mod domain;
mod engine;
pub mod repository;
pub mod resolver;
pub mod router;
pub mod service;
mod views;

#[cfg(test)]
mod tests;

pub use answers::{AnswerSummary, MutationOutcome, Rejection, SurveyAnswers, SurveyInput};
pub use completion::{is_section_complete, ActivityTally, ACTIVITY_AGGREGATE_MINIMUM};
pub use domain::{
    Activity, AssessmentStep, BusinessWorkPeriod, Hobby, Industry, Leisure, ManagementRole,
    QuestionId, RecentCourse, Residence, Sport, SurveySection, TeacherWorkPeriod, TeachingPlace,
    Travel, WorkPeriod,
};
pub use engine::{BackOutcome, CompletedSurvey, NextOutcome, SurveyEngine};
pub use repository::{
    RepositoryError, SessionId, SessionStatus, SubmissionError, SubmissionSink,
    SurveySessionRecord, SurveySessionRepository, SurveySessionView, SurveySubmission,
};
pub use resolver::visible_questions;
pub use router::survey_router;
pub use service::{
    AnswerReceipt, NavigationReceipt, SurveyServiceError, SurveySessionService, Transition,
};
pub use views::{OptionView, QuestionView, StepView, SurveyView};
