use serde::Serialize;

use super::answers::{Employment, Occupation, StudentStatus, SurveyAnswers};
use super::domain::{PeriodVocabulary, QuestionId, SurveySection};

/// Selections required across all four activity groups before the survey can proceed.
pub const ACTIVITY_AGGREGATE_MINIMUM: usize = 12;

/// Per-group minimum for a multi-select question; `None` for single-choice questions.
pub const fn minimum_selections(question: QuestionId) -> Option<usize> {
    match question {
        QuestionId::Leisure => Some(2),
        QuestionId::Hobbies | QuestionId::Sports | QuestionId::Travel => Some(1),
        _ => None,
    }
}

/// Completion gate for forward navigation out of `section`.
pub fn is_section_complete(section: SurveySection, answers: &SurveyAnswers) -> bool {
    match section {
        SurveySection::Occupation => occupation_complete(answers.occupation()),
        SurveySection::Education => match answers.student() {
            Some(StudentStatus::NotStudent) => true,
            Some(StudentStatus::Student { recent_course }) => recent_course.is_some(),
            None => false,
        },
        SurveySection::Residence => answers.residence().is_some(),
        SurveySection::Activities => ActivityTally::from_answers(answers).is_satisfied(),
    }
}

fn occupation_complete(occupation: Option<&Occupation>) -> bool {
    match occupation {
        None => false,
        Some(Occupation::NoFollowUp(_)) => true,
        Some(Occupation::Business { employment, .. }) => employment_complete(employment.as_ref()),
        Some(Occupation::Teacher(None)) => false,
        Some(Occupation::Teacher(Some(track))) => employment_complete(track.employment.as_ref()),
    }
}

fn employment_complete<P: PeriodVocabulary>(employment: Option<&Employment<P>>) -> bool {
    match employment {
        None => false,
        Some(Employment::Unemployed) => true,
        Some(Employment::Employed(None)) => false,
        Some(Employment::Employed(Some(tenure))) => {
            !tenure.period.exposes_management() || tenure.management.is_some()
        }
    }
}

/// Selection counts for the activity section against its minimums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivityTally {
    pub leisure: usize,
    pub hobbies: usize,
    pub sports: usize,
    pub travel: usize,
    pub total: usize,
    pub required_total: usize,
}

impl ActivityTally {
    pub fn from_answers(answers: &SurveyAnswers) -> Self {
        let activities = answers.activities();
        Self {
            leisure: activities.leisure().len(),
            hobbies: activities.hobbies().len(),
            sports: activities.sports().len(),
            travel: activities.travel().len(),
            total: activities.total(),
            required_total: ACTIVITY_AGGREGATE_MINIMUM,
        }
    }

    pub fn count(&self, question: QuestionId) -> Option<usize> {
        match question {
            QuestionId::Leisure => Some(self.leisure),
            QuestionId::Hobbies => Some(self.hobbies),
            QuestionId::Sports => Some(self.sports),
            QuestionId::Travel => Some(self.travel),
            _ => None,
        }
    }

    /// Groups still below their own minimum.
    pub fn groups_below_minimum(&self) -> Vec<QuestionId> {
        [
            QuestionId::Leisure,
            QuestionId::Hobbies,
            QuestionId::Sports,
            QuestionId::Travel,
        ]
        .into_iter()
        .filter(|question| {
            matches!(
                (self.count(*question), minimum_selections(*question)),
                (Some(count), Some(minimum)) if count < minimum
            )
        })
        .collect()
    }

    /// Selections still missing from the aggregate threshold.
    pub fn remaining(&self) -> usize {
        self.required_total.saturating_sub(self.total)
    }

    /// Both the per-group minimums and the aggregate threshold must hold.
    pub fn is_satisfied(&self) -> bool {
        self.groups_below_minimum().is_empty() && self.total >= self.required_total
    }
}
