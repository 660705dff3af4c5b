use serde::Serialize;

use super::answers::SurveyAnswers;
use super::completion::{is_section_complete, minimum_selections, ActivityTally};
use super::domain::{AssessmentStep, QuestionId, QuestionKind, SurveySection};
use super::resolver::{options_for, visible_questions};

#[derive(Debug, Clone, Serialize)]
pub struct OptionView {
    pub key: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub id: QuestionId,
    pub prompt: &'static str,
    pub kind: QuestionKind,
    pub options: Vec<OptionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_selections: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_count: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepView {
    pub step: AssessmentStep,
    pub number: u8,
    pub label: &'static str,
    pub current: bool,
}

/// Read-only projection of the active section for a rendering layer.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyView {
    pub section: SurveySection,
    pub section_number: u8,
    pub part_label: String,
    pub title: &'static str,
    pub questions: Vec<QuestionView>,
    pub can_advance: bool,
    pub advance_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_tally: Option<ActivityTally>,
    pub steps: Vec<StepView>,
}

impl SurveyView {
    pub fn question(&self, id: QuestionId) -> Option<&QuestionView> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn question_ids(&self) -> Vec<QuestionId> {
        self.questions.iter().map(|question| question.id).collect()
    }
}

pub(crate) fn build_view(section: SurveySection, answers: &SurveyAnswers) -> SurveyView {
    let tally = ActivityTally::from_answers(answers);

    let questions = visible_questions(section, answers)
        .into_iter()
        .map(|id| {
            let selected = selected_keys(id, answers);
            QuestionView {
                id,
                prompt: id.prompt(),
                kind: id.kind(),
                options: options_for(id, answers)
                    .into_iter()
                    .map(|option| OptionView {
                        key: option.key,
                        label: option.label,
                        selected: selected.contains(&option.key),
                    })
                    .collect(),
                minimum_selections: minimum_selections(id),
                selected_count: tally.count(id),
            }
        })
        .collect();

    let steps = AssessmentStep::ordered()
        .into_iter()
        .map(|step| StepView {
            step,
            number: step.number(),
            label: step.label(),
            current: step == AssessmentStep::BackgroundSurvey,
        })
        .collect();

    SurveyView {
        section,
        section_number: section.number(),
        part_label: section.part_label(),
        title: section.title(),
        questions,
        can_advance: is_section_complete(section, answers),
        advance_label: if section.is_last() { "Proceed" } else { "Next" },
        activity_tally: (section == SurveySection::Activities).then_some(tally),
        steps,
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn selected_keys(question: QuestionId, answers: &SurveyAnswers) -> Vec<&'static str> {
    let activities = answers.activities();
    match question {
        QuestionId::Industry => answers.industry().map(|v| v.key()).into_iter().collect(),
        QuestionId::TeachingPlace => answers.teaching_place().map(|v| v.key()).into_iter().collect(),
        QuestionId::HasJob => answers.has_job().map(yes_no).into_iter().collect(),
        QuestionId::WorkPeriod => answers.work_period().map(|v| v.key()).into_iter().collect(),
        QuestionId::ManagementRole => answers
            .management_role()
            .map(|v| v.key())
            .into_iter()
            .collect(),
        QuestionId::IsStudent => answers.is_student().map(yes_no).into_iter().collect(),
        QuestionId::RecentCourse => answers.recent_course().map(|v| v.key()).into_iter().collect(),
        QuestionId::Residence => answers.residence().map(|v| v.key()).into_iter().collect(),
        QuestionId::Leisure => activities.leisure().iter().map(|v| v.key()).collect(),
        QuestionId::Hobbies => activities.hobbies().iter().map(|v| v.key()).collect(),
        QuestionId::Sports => activities.sports().iter().map(|v| v.key()).collect(),
        QuestionId::Travel => activities.travel().iter().map(|v| v.key()).collect(),
    }
}
