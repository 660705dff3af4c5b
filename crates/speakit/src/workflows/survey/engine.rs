use serde::Serialize;
use tracing::debug;

use super::answers::{MutationOutcome, Rejection, SurveyAnswers, SurveyInput};
use super::completion::is_section_complete;
use super::domain::{AssessmentStep, QuestionId, SurveySection};
use super::resolver::visible_questions;
use super::views::{build_view, SurveyView};

/// Result of a `back` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "transition", content = "section", rename_all = "snake_case")]
pub enum BackOutcome {
    Retreated(SurveySection),
    /// Already on the first section; whoever owns page history decides where to go.
    Exit,
}

/// Result of a `next` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "transition", rename_all = "snake_case")]
pub enum NextOutcome {
    Advanced { section: SurveySection },
    /// The active section is incomplete; the cursor did not move.
    Blocked { section: SurveySection },
    /// The final section is complete; the finished answers leave the engine.
    Proceed { survey: CompletedSurvey },
}

/// Finished answer set handed to the next assessment stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedSurvey {
    pub answers: SurveyAnswers,
    pub next_step: AssessmentStep,
}

/// Background survey state machine: a section cursor over one answer set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyEngine {
    section: SurveySection,
    answers: SurveyAnswers,
}

impl Default for SurveyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SurveyEngine {
    pub fn new() -> Self {
        Self {
            section: SurveySection::Occupation,
            answers: SurveyAnswers::new(),
        }
    }

    pub fn section(&self) -> SurveySection {
        self.section
    }

    pub fn answers(&self) -> &SurveyAnswers {
        &self.answers
    }

    pub fn visible_questions(&self) -> Vec<QuestionId> {
        visible_questions(self.section, &self.answers)
    }

    pub fn can_advance(&self) -> bool {
        is_section_complete(self.section, &self.answers)
    }

    /// Applies an answer for a question on the active section.
    pub fn apply(&mut self, input: SurveyInput) -> MutationOutcome {
        let question = input.question();
        if question.section() != self.section {
            let reason = Rejection::InactiveSection {
                question,
                active: self.section,
            };
            debug!(?question, active = ?self.section, "input targets inactive section");
            return MutationOutcome::Rejected { reason };
        }

        let outcome = self.answers.apply(input);
        if let MutationOutcome::Rejected { reason } = &outcome {
            debug!(?question, ?reason, "survey input rejected");
        }
        outcome
    }

    pub fn back(&mut self) -> BackOutcome {
        match self.section.previous() {
            Some(previous) => {
                self.section = previous;
                BackOutcome::Retreated(previous)
            }
            None => BackOutcome::Exit,
        }
    }

    /// Moves forward when the active section is complete. On the last section this yields
    /// the finished survey and the cursor stays put.
    pub fn next(&mut self) -> NextOutcome {
        if !self.can_advance() {
            debug!(section = ?self.section, "advance blocked by incomplete section");
            return NextOutcome::Blocked {
                section: self.section,
            };
        }

        match self.section.next() {
            Some(next) => {
                self.section = next;
                NextOutcome::Advanced { section: next }
            }
            None => NextOutcome::Proceed {
                survey: CompletedSurvey {
                    answers: self.answers.clone(),
                    next_step: AssessmentStep::SelfAssessment,
                },
            },
        }
    }

    pub fn view(&self) -> SurveyView {
        build_view(self.section, &self.answers)
    }
}
