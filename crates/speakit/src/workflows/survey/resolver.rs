//! Question visibility for each survey section.

use super::answers::{Occupation, StudentStatus, SurveyAnswers};
use super::domain::{
    BusinessWorkPeriod, Hobby, Industry, IndustryBranch, Leisure, ManagementRole, QuestionId, RecentCourse,
    Residence, Sport, SurveySection, TeacherWorkPeriod, TeachingPlace, Travel,
};

/// Ordered list of questions currently shown on `section`.
pub fn visible_questions(section: SurveySection, answers: &SurveyAnswers) -> Vec<QuestionId> {
    match section {
        SurveySection::Occupation => occupation_questions(answers),
        SurveySection::Education => {
            let mut questions = vec![QuestionId::IsStudent];
            if matches!(answers.student(), Some(StudentStatus::Student { .. })) {
                questions.push(QuestionId::RecentCourse);
            }
            questions
        }
        SurveySection::Residence => vec![QuestionId::Residence],
        SurveySection::Activities => vec![
            QuestionId::Leisure,
            QuestionId::Hobbies,
            QuestionId::Sports,
            QuestionId::Travel,
        ],
    }
}

fn occupation_questions(answers: &SurveyAnswers) -> Vec<QuestionId> {
    let mut questions = vec![QuestionId::Industry];

    match answers.occupation() {
        None | Some(Occupation::NoFollowUp(_)) => return questions,
        Some(Occupation::Business { .. }) => questions.push(QuestionId::HasJob),
        Some(Occupation::Teacher(track)) => {
            questions.push(QuestionId::TeachingPlace);
            if track.is_some() {
                questions.push(QuestionId::HasJob);
            }
        }
    }

    if answers.has_job() == Some(true) {
        questions.push(QuestionId::WorkPeriod);
        if answers.management_applicable() {
            questions.push(QuestionId::ManagementRole);
        }
    }

    questions
}

/// Whether `question` is currently reachable anywhere in the survey.
pub fn is_visible(question: QuestionId, answers: &SurveyAnswers) -> bool {
    visible_questions(question.section(), answers).contains(&question)
}

/// A selectable option rendered as its wire key plus display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionOption {
    pub key: &'static str,
    pub label: &'static str,
}

/// Options offered for `question`. The work period vocabulary follows the industry branch,
/// so it is empty until an industry with a job track is chosen.
pub fn options_for(question: QuestionId, answers: &SurveyAnswers) -> Vec<QuestionOption> {
    match question {
        QuestionId::Industry => collect(Industry::ALL, |v| (v.key(), v.label())),
        QuestionId::TeachingPlace => collect(TeachingPlace::ALL, |v| (v.key(), v.label())),
        QuestionId::HasJob | QuestionId::IsStudent => vec![
            QuestionOption {
                key: "yes",
                label: "Yes",
            },
            QuestionOption {
                key: "no",
                label: "No",
            },
        ],
        QuestionId::WorkPeriod => match answers.industry().map(Industry::branch) {
            Some(IndustryBranch::Business) => {
                collect(BusinessWorkPeriod::ALL, |v| (v.key(), v.label()))
            }
            Some(IndustryBranch::Teacher) => {
                collect(TeacherWorkPeriod::ALL, |v| (v.key(), v.label()))
            }
            Some(IndustryBranch::NoFollowUp) | None => Vec::new(),
        },
        QuestionId::ManagementRole => collect(ManagementRole::ALL, |v| (v.key(), v.label())),
        QuestionId::RecentCourse => collect(RecentCourse::ALL, |v| (v.key(), v.label())),
        QuestionId::Residence => collect(Residence::ALL, |v| (v.key(), v.label())),
        QuestionId::Leisure => collect(Leisure::ALL, |v| (v.key(), v.label())),
        QuestionId::Hobbies => collect(Hobby::ALL, |v| (v.key(), v.label())),
        QuestionId::Sports => collect(Sport::ALL, |v| (v.key(), v.label())),
        QuestionId::Travel => collect(Travel::ALL, |v| (v.key(), v.label())),
    }
}

fn collect<T: Copy>(
    values: &[T],
    describe: impl Fn(T) -> (&'static str, &'static str),
) -> Vec<QuestionOption> {
    values
        .iter()
        .map(|value| {
            let (key, label) = describe(*value);
            QuestionOption { key, label }
        })
        .collect()
}
