use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::{
    Activity, BusinessWorkPeriod, Hobby, Industry, Leisure, ManagementRole, PeriodVocabulary,
    QuestionId, RecentCourse, Residence, Sport, SurveySection, TeacherWorkPeriod, TeachingPlace,
    Travel, WorkPeriod,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessSetting {
    Company,
    HomeBusiness,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoFollowUpIndustry {
    Military,
    NoWorkExperience,
}

/// Section 1 answer. Each industry branch only carries the follow-ups it can reach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupation {
    Business {
        setting: BusinessSetting,
        employment: Option<Employment<BusinessWorkPeriod>>,
    },
    /// `None` until a teaching place is chosen; the job question waits on it.
    Teacher(Option<TeacherTrack>),
    NoFollowUp(NoFollowUpIndustry),
}

impl Occupation {
    fn for_industry(industry: Industry) -> Self {
        match industry {
            Industry::Business => Self::Business {
                setting: BusinessSetting::Company,
                employment: None,
            },
            Industry::HomeBusiness => Self::Business {
                setting: BusinessSetting::HomeBusiness,
                employment: None,
            },
            Industry::Teacher => Self::Teacher(None),
            Industry::Military => Self::NoFollowUp(NoFollowUpIndustry::Military),
            Industry::NoWorkExperience => Self::NoFollowUp(NoFollowUpIndustry::NoWorkExperience),
        }
    }

    pub fn industry(&self) -> Industry {
        match self {
            Self::Business {
                setting: BusinessSetting::Company,
                ..
            } => Industry::Business,
            Self::Business {
                setting: BusinessSetting::HomeBusiness,
                ..
            } => Industry::HomeBusiness,
            Self::Teacher(_) => Industry::Teacher,
            Self::NoFollowUp(NoFollowUpIndustry::Military) => Industry::Military,
            Self::NoFollowUp(NoFollowUpIndustry::NoWorkExperience) => Industry::NoWorkExperience,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeacherTrack {
    pub place: TeachingPlace,
    pub employment: Option<Employment<TeacherWorkPeriod>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Employment<P> {
    Unemployed,
    /// `None` until the work period is answered.
    Employed(Option<Tenure<P>>),
}

impl<P> Employment<P> {
    pub fn has_job(&self) -> bool {
        matches!(self, Self::Employed(_))
    }

    pub fn tenure(&self) -> Option<&Tenure<P>> {
        match self {
            Self::Employed(tenure) => tenure.as_ref(),
            Self::Unemployed => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tenure<P> {
    pub period: P,
    /// Only answerable when `period` exposes the management question.
    pub management: Option<ManagementRole>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentStatus {
    NotStudent,
    Student { recent_course: Option<RecentCourse> },
}

/// Section 4 multi-select groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivitySelections {
    leisure: BTreeSet<Leisure>,
    hobbies: BTreeSet<Hobby>,
    sports: BTreeSet<Sport>,
    travel: BTreeSet<Travel>,
}

impl ActivitySelections {
    pub fn leisure(&self) -> &BTreeSet<Leisure> {
        &self.leisure
    }

    pub fn hobbies(&self) -> &BTreeSet<Hobby> {
        &self.hobbies
    }

    pub fn sports(&self) -> &BTreeSet<Sport> {
        &self.sports
    }

    pub fn travel(&self) -> &BTreeSet<Travel> {
        &self.travel
    }

    pub fn contains(&self, activity: Activity) -> bool {
        match activity {
            Activity::Leisure(label) => self.leisure.contains(&label),
            Activity::Hobby(label) => self.hobbies.contains(&label),
            Activity::Sport(label) => self.sports.contains(&label),
            Activity::Travel(label) => self.travel.contains(&label),
        }
    }

    /// Flips membership of one label and returns whether it is now selected.
    pub fn toggle(&mut self, activity: Activity) -> bool {
        match activity {
            Activity::Leisure(label) => toggle_member(&mut self.leisure, label),
            Activity::Hobby(label) => toggle_member(&mut self.hobbies, label),
            Activity::Sport(label) => toggle_member(&mut self.sports, label),
            Activity::Travel(label) => toggle_member(&mut self.travel, label),
        }
    }

    pub fn total(&self) -> usize {
        self.leisure.len() + self.hobbies.len() + self.sports.len() + self.travel.len()
    }
}

fn toggle_member<T: Ord>(set: &mut BTreeSet<T>, value: T) -> bool {
    if set.remove(&value) {
        false
    } else {
        set.insert(value)
    }
}

/// One per-field setter, as triggered by a single user interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "question", content = "value", rename_all = "snake_case")]
pub enum SurveyInput {
    Industry(Industry),
    TeachingPlace(TeachingPlace),
    HasJob(bool),
    WorkPeriod(WorkPeriod),
    ManagementRole(ManagementRole),
    IsStudent(bool),
    RecentCourse(RecentCourse),
    Residence(Residence),
    ToggleActivity(Activity),
}

impl SurveyInput {
    pub const fn question(self) -> QuestionId {
        match self {
            Self::Industry(_) => QuestionId::Industry,
            Self::TeachingPlace(_) => QuestionId::TeachingPlace,
            Self::HasJob(_) => QuestionId::HasJob,
            Self::WorkPeriod(_) => QuestionId::WorkPeriod,
            Self::ManagementRole(_) => QuestionId::ManagementRole,
            Self::IsStudent(_) => QuestionId::IsStudent,
            Self::RecentCourse(_) => QuestionId::RecentCourse,
            Self::Residence(_) => QuestionId::Residence,
            Self::ToggleActivity(activity) => activity.question(),
        }
    }
}

/// Result of applying a [`SurveyInput`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MutationOutcome {
    /// The answer changed; `cleared` lists downstream answers invalidated by the change.
    Applied { cleared: Vec<QuestionId> },
    /// The input re-selected the current value.
    Unchanged,
    Rejected { reason: Rejection },
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rejection {
    /// The question is not reachable under the current answers.
    NotVisible { question: QuestionId },
    /// The work period belongs to the other industry branch.
    WrongVocabulary { period: WorkPeriod },
    /// The question lives on a section other than the active one.
    InactiveSection {
        question: QuestionId,
        active: SurveySection,
    },
}

enum EmploymentSlot<'a> {
    Business(&'a mut Option<Employment<BusinessWorkPeriod>>),
    Teacher(&'a mut Option<Employment<TeacherWorkPeriod>>),
}

/// Complete answer record for the four survey sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SurveyAnswers {
    occupation: Option<Occupation>,
    student: Option<StudentStatus>,
    residence: Option<Residence>,
    activities: ActivitySelections,
}

impl SurveyAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn occupation(&self) -> Option<&Occupation> {
        self.occupation.as_ref()
    }

    pub fn student(&self) -> Option<&StudentStatus> {
        self.student.as_ref()
    }

    pub fn activities(&self) -> &ActivitySelections {
        &self.activities
    }

    pub fn industry(&self) -> Option<Industry> {
        self.occupation.as_ref().map(Occupation::industry)
    }

    pub fn teaching_place(&self) -> Option<TeachingPlace> {
        match &self.occupation {
            Some(Occupation::Teacher(Some(track))) => Some(track.place),
            _ => None,
        }
    }

    pub fn has_job(&self) -> Option<bool> {
        match &self.occupation {
            Some(Occupation::Business {
                employment: Some(employment),
                ..
            }) => Some(employment.has_job()),
            Some(Occupation::Teacher(Some(TeacherTrack {
                employment: Some(employment),
                ..
            }))) => Some(employment.has_job()),
            _ => None,
        }
    }

    pub fn work_period(&self) -> Option<WorkPeriod> {
        self.tenure_summary().map(|(period, _)| period)
    }

    pub fn management_role(&self) -> Option<ManagementRole> {
        self.tenure_summary().and_then(|(_, management)| management)
    }

    /// Whether the current tenure answer opens the management question.
    pub fn management_applicable(&self) -> bool {
        match &self.occupation {
            Some(Occupation::Business {
                employment: Some(employment),
                ..
            }) => employment
                .tenure()
                .is_some_and(|tenure| tenure.period.exposes_management()),
            Some(Occupation::Teacher(Some(TeacherTrack {
                employment: Some(employment),
                ..
            }))) => employment
                .tenure()
                .is_some_and(|tenure| tenure.period.exposes_management()),
            _ => false,
        }
    }

    pub fn is_student(&self) -> Option<bool> {
        self.student
            .as_ref()
            .map(|status| matches!(status, StudentStatus::Student { .. }))
    }

    pub fn recent_course(&self) -> Option<RecentCourse> {
        match &self.student {
            Some(StudentStatus::Student { recent_course }) => *recent_course,
            _ => None,
        }
    }

    pub fn residence(&self) -> Option<Residence> {
        self.residence
    }

    /// Questions that currently hold an answer, in survey order.
    pub fn answered_questions(&self) -> BTreeSet<QuestionId> {
        let mut answered = BTreeSet::new();
        let presence = [
            (QuestionId::Industry, self.industry().is_some()),
            (QuestionId::TeachingPlace, self.teaching_place().is_some()),
            (QuestionId::HasJob, self.has_job().is_some()),
            (QuestionId::WorkPeriod, self.work_period().is_some()),
            (QuestionId::ManagementRole, self.management_role().is_some()),
            (QuestionId::IsStudent, self.is_student().is_some()),
            (QuestionId::RecentCourse, self.recent_course().is_some()),
            (QuestionId::Residence, self.residence.is_some()),
            (QuestionId::Leisure, !self.activities.leisure.is_empty()),
            (QuestionId::Hobbies, !self.activities.hobbies.is_empty()),
            (QuestionId::Sports, !self.activities.sports.is_empty()),
            (QuestionId::Travel, !self.activities.travel.is_empty()),
        ];
        for (question, present) in presence {
            if present {
                answered.insert(question);
            }
        }
        answered
    }

    /// Applies one setter. Changing an upstream answer clears everything that depended on
    /// its previous value; rejected inputs leave the answers untouched.
    pub fn apply(&mut self, input: SurveyInput) -> MutationOutcome {
        let before = self.answered_questions();

        let changed = match input {
            SurveyInput::Industry(industry) => Ok(self.set_industry(industry)),
            SurveyInput::TeachingPlace(place) => self.set_teaching_place(place),
            SurveyInput::HasJob(has_job) => self.set_has_job(has_job),
            SurveyInput::WorkPeriod(period) => self.set_work_period(period),
            SurveyInput::ManagementRole(role) => self.set_management_role(role),
            SurveyInput::IsStudent(is_student) => Ok(self.set_is_student(is_student)),
            SurveyInput::RecentCourse(course) => self.set_recent_course(course),
            SurveyInput::Residence(residence) => Ok(self.set_residence(residence)),
            SurveyInput::ToggleActivity(activity) => {
                self.activities.toggle(activity);
                Ok(true)
            }
        };

        match changed {
            Err(reason) => MutationOutcome::Rejected { reason },
            Ok(false) => MutationOutcome::Unchanged,
            Ok(true) => {
                let after = self.answered_questions();
                let target = input.question();
                let cleared = before
                    .into_iter()
                    .filter(|question| *question != target && !after.contains(question))
                    .collect();
                MutationOutcome::Applied { cleared }
            }
        }
    }

    fn set_industry(&mut self, industry: Industry) -> bool {
        if self.industry() == Some(industry) {
            return false;
        }
        self.occupation = Some(Occupation::for_industry(industry));
        true
    }

    fn set_teaching_place(&mut self, place: TeachingPlace) -> Result<bool, Rejection> {
        let Some(Occupation::Teacher(track)) = &mut self.occupation else {
            return Err(Rejection::NotVisible {
                question: QuestionId::TeachingPlace,
            });
        };

        if track.as_ref().map(|current| current.place) == Some(place) {
            return Ok(false);
        }
        *track = Some(TeacherTrack {
            place,
            employment: None,
        });
        Ok(true)
    }

    fn set_has_job(&mut self, has_job: bool) -> Result<bool, Rejection> {
        match self.employment_slot() {
            Some(EmploymentSlot::Business(slot)) => Ok(replace_employment(slot, has_job)),
            Some(EmploymentSlot::Teacher(slot)) => Ok(replace_employment(slot, has_job)),
            None => Err(Rejection::NotVisible {
                question: QuestionId::HasJob,
            }),
        }
    }

    fn set_work_period(&mut self, period: WorkPeriod) -> Result<bool, Rejection> {
        if self.has_job() != Some(true) {
            return Err(Rejection::NotVisible {
                question: QuestionId::WorkPeriod,
            });
        }

        match (self.employment_slot(), period) {
            (Some(EmploymentSlot::Business(slot)), WorkPeriod::Business(period)) => {
                Ok(replace_tenure(slot, period))
            }
            (Some(EmploymentSlot::Teacher(slot)), WorkPeriod::Teacher(period)) => {
                Ok(replace_tenure(slot, period))
            }
            _ => Err(Rejection::WrongVocabulary { period }),
        }
    }

    fn set_management_role(&mut self, role: ManagementRole) -> Result<bool, Rejection> {
        let changed = match self.employment_slot() {
            Some(EmploymentSlot::Business(slot)) => record_management(slot, role),
            Some(EmploymentSlot::Teacher(slot)) => record_management(slot, role),
            None => None,
        };
        changed.ok_or(Rejection::NotVisible {
            question: QuestionId::ManagementRole,
        })
    }

    fn set_is_student(&mut self, is_student: bool) -> bool {
        if self.is_student() == Some(is_student) {
            return false;
        }
        self.student = Some(if is_student {
            StudentStatus::Student {
                recent_course: None,
            }
        } else {
            StudentStatus::NotStudent
        });
        true
    }

    fn set_recent_course(&mut self, course: RecentCourse) -> Result<bool, Rejection> {
        let Some(StudentStatus::Student { recent_course }) = &mut self.student else {
            return Err(Rejection::NotVisible {
                question: QuestionId::RecentCourse,
            });
        };
        if *recent_course == Some(course) {
            return Ok(false);
        }
        *recent_course = Some(course);
        Ok(true)
    }

    fn set_residence(&mut self, residence: Residence) -> bool {
        if self.residence == Some(residence) {
            return false;
        }
        self.residence = Some(residence);
        true
    }

    fn employment_slot(&mut self) -> Option<EmploymentSlot<'_>> {
        match self.occupation.as_mut()? {
            Occupation::Business { employment, .. } => Some(EmploymentSlot::Business(employment)),
            Occupation::Teacher(Some(track)) => {
                Some(EmploymentSlot::Teacher(&mut track.employment))
            }
            Occupation::Teacher(None) | Occupation::NoFollowUp(_) => None,
        }
    }

    fn tenure_summary(&self) -> Option<(WorkPeriod, Option<ManagementRole>)> {
        match &self.occupation {
            Some(Occupation::Business {
                employment: Some(employment),
                ..
            }) => employment
                .tenure()
                .map(|tenure| (tenure.period.into_work_period(), tenure.management)),
            Some(Occupation::Teacher(Some(TeacherTrack {
                employment: Some(employment),
                ..
            }))) => employment
                .tenure()
                .map(|tenure| (tenure.period.into_work_period(), tenure.management)),
            _ => None,
        }
    }

    /// Flat projection of the answers for downstream consumers.
    pub fn summary(&self) -> AnswerSummary {
        AnswerSummary {
            industry: self.industry(),
            teaching_place: self.teaching_place(),
            has_job: self.has_job(),
            work_period: self.work_period(),
            management_role: self.management_role(),
            is_student: self.is_student(),
            recent_course: self.recent_course(),
            residence: self.residence,
            leisure: self.activities.leisure.iter().copied().collect(),
            hobbies: self.activities.hobbies.iter().copied().collect(),
            sports: self.activities.sports.iter().copied().collect(),
            travel: self.activities.travel.iter().copied().collect(),
        }
    }
}

fn replace_employment<P>(slot: &mut Option<Employment<P>>, has_job: bool) -> bool {
    if slot.as_ref().map(Employment::has_job) == Some(has_job) {
        return false;
    }
    *slot = Some(if has_job {
        Employment::Employed(None)
    } else {
        Employment::Unemployed
    });
    true
}

fn replace_tenure<P: PeriodVocabulary>(slot: &mut Option<Employment<P>>, period: P) -> bool {
    let Some(Employment::Employed(tenure)) = slot else {
        return false;
    };
    if tenure.as_ref().map(|current| current.period) == Some(period) {
        return false;
    }
    *tenure = Some(Tenure {
        period,
        management: None,
    });
    true
}

fn record_management<P: PeriodVocabulary>(
    slot: &mut Option<Employment<P>>,
    role: ManagementRole,
) -> Option<bool> {
    match slot {
        Some(Employment::Employed(Some(tenure))) if tenure.period.exposes_management() => {
            let changed = tenure.management != Some(role);
            tenure.management = Some(role);
            Some(changed)
        }
        _ => None,
    }
}

/// Flat, serializable view of every answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSummary {
    pub industry: Option<Industry>,
    pub teaching_place: Option<TeachingPlace>,
    pub has_job: Option<bool>,
    pub work_period: Option<WorkPeriod>,
    pub management_role: Option<ManagementRole>,
    pub is_student: Option<bool>,
    pub recent_course: Option<RecentCourse>,
    pub residence: Option<Residence>,
    pub leisure: Vec<Leisure>,
    pub hobbies: Vec<Hobby>,
    pub sports: Vec<Sport>,
    pub travel: Vec<Travel>,
}
