use serde::{Deserialize, Serialize};

/// Declares a closed answer vocabulary with stable wire keys and display labels.
macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => ($key:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $key)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub const fn key(self) -> &'static str {
                match self {
                    $(Self::$variant => $key,)+
                }
            }

            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }
    };
}

vocabulary! {
    /// Field the respondent currently works in.
    Industry {
        Business => ("business", "Business / company"),
        HomeBusiness => ("home_business", "Work from home / home business"),
        Teacher => ("teacher", "Teacher / educator"),
        Military => ("military", "Military service"),
        NoWorkExperience => ("no_work_experience", "No work experience"),
    }
}

/// Follow-up track opened by an industry answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndustryBranch {
    Business,
    Teacher,
    NoFollowUp,
}

impl Industry {
    pub const fn branch(self) -> IndustryBranch {
        match self {
            Self::Business | Self::HomeBusiness => IndustryBranch::Business,
            Self::Teacher => IndustryBranch::Teacher,
            Self::Military | Self::NoWorkExperience => IndustryBranch::NoFollowUp,
        }
    }
}

vocabulary! {
    TeachingPlace {
        UniversityOrAbove => ("university_or_above", "College or university and above"),
        School => ("primary_or_secondary_school", "Elementary, middle or high school"),
        LifelongEducation => ("lifelong_education", "Lifelong education"),
    }
}

vocabulary! {
    /// Tenure options offered on the business track.
    BusinessWorkPeriod {
        FirstJobUnderTwoMonths => ("first_job_under_two_months", "First job, less than 2 months"),
        FirstJobTwoMonthsOrMore => ("first_job_two_months_or_more", "First job, 2 months or more"),
        Experienced => ("experienced", "Not my first job, experienced"),
    }
}

vocabulary! {
    /// Tenure options offered on the teacher track.
    TeacherWorkPeriod {
        UnderTwoMonthsFirstJob => (
            "teaching_under_two_months_first_job",
            "Less than 2 months, first job"
        ),
        UnderTwoMonthsPriorCareer => (
            "teaching_under_two_months_prior_career",
            "Less than 2 months, first teaching role after another career"
        ),
        TwoMonthsOrMore => ("teaching_two_months_or_more", "2 months or more"),
    }
}

/// Tenure vocabulary tied to one industry branch.
pub trait PeriodVocabulary: Copy + Eq {
    /// Whether this tenure opens the management question.
    fn exposes_management(self) -> bool;

    fn into_work_period(self) -> WorkPeriod;
}

impl PeriodVocabulary for BusinessWorkPeriod {
    fn exposes_management(self) -> bool {
        matches!(self, Self::FirstJobTwoMonthsOrMore | Self::Experienced)
    }

    fn into_work_period(self) -> WorkPeriod {
        WorkPeriod::Business(self)
    }
}

impl PeriodVocabulary for TeacherWorkPeriod {
    fn exposes_management(self) -> bool {
        matches!(self, Self::TwoMonthsOrMore)
    }

    fn into_work_period(self) -> WorkPeriod {
        WorkPeriod::Teacher(self)
    }
}

/// A tenure answer from either branch vocabulary. Wire keys are disjoint, so the key alone
/// identifies the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WorkPeriod {
    Business(BusinessWorkPeriod),
    Teacher(TeacherWorkPeriod),
}

impl WorkPeriod {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Business(period) => period.key(),
            Self::Teacher(period) => period.key(),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Business(period) => period.label(),
            Self::Teacher(period) => period.label(),
        }
    }
}

vocabulary! {
    ManagementRole {
        Yes => ("yes", "Yes"),
        No => ("no", "No"),
    }
}

vocabulary! {
    RecentCourse {
        DegreeProgram => ("degree_program", "Degree program courses"),
        ProfessionalDevelopment => (
            "professional_development",
            "Continuing education for professional skills"
        ),
        LanguageClass => ("language_class", "Language classes"),
        OverFiveYearsAgo => ("over_five_years_ago", "More than 5 years since my last course"),
    }
}

vocabulary! {
    Residence {
        Alone => ("alone", "Living alone in a house or apartment"),
        WithRoommates => ("with_roommates", "Living with friends or roommates"),
        WithFamily => ("with_family", "Living with family in a house or apartment"),
        Dormitory => ("dormitory", "School dormitory"),
        MilitaryBarracks => ("military_barracks", "Military barracks"),
    }
}

vocabulary! {
    Leisure {
        Movies => ("movies", "Going to the movies"),
        Clubbing => ("clubbing", "Going to clubs or nightclubs"),
        Performances => ("performances", "Watching performances"),
        Concerts => ("concerts", "Going to concerts"),
        Museums => ("museums", "Visiting museums"),
        Parks => ("parks", "Going to the park"),
        Camping => ("camping", "Camping"),
        Beach => ("beach", "Going to the beach"),
        SportsSpectating => ("sports_spectating", "Watching sports"),
        HomeImprovement => ("home_improvement", "Home improvement"),
    }
}

vocabulary! {
    Hobby {
        ReadingToChildren => ("reading_to_children", "Reading to children"),
        ListeningToMusic => ("listening_to_music", "Listening to music"),
        PlayingInstrument => ("playing_instrument", "Playing an instrument"),
        Singing => ("singing", "Singing alone or in a choir"),
        Dancing => ("dancing", "Dancing"),
        Writing => ("writing", "Writing (letters, short pieces, poems)"),
        Drawing => ("drawing", "Drawing"),
        Cooking => ("cooking", "Cooking"),
        Pets => ("pets", "Raising pets"),
    }
}

vocabulary! {
    Sport {
        Basketball => ("basketball", "Basketball"),
        Baseball => ("baseball", "Baseball / softball"),
        Soccer => ("soccer", "Soccer"),
        AmericanFootball => ("american_football", "American football"),
        Hockey => ("hockey", "Hockey"),
        Cricket => ("cricket", "Cricket"),
        Golf => ("golf", "Golf"),
        Volleyball => ("volleyball", "Volleyball"),
        Tennis => ("tennis", "Tennis"),
        Badminton => ("badminton", "Badminton"),
        TableTennis => ("table_tennis", "Table tennis"),
        Swimming => ("swimming", "Swimming"),
        Cycling => ("cycling", "Cycling"),
        Skiing => ("skiing", "Skiing / snowboarding"),
        IceSkating => ("ice_skating", "Ice skating"),
        Jogging => ("jogging", "Jogging"),
        Walking => ("walking", "Walking"),
        Yoga => ("yoga", "Yoga"),
        Hiking => ("hiking", "Hiking / trekking"),
        Fishing => ("fishing", "Fishing"),
        Fitness => ("fitness", "Working out at the gym"),
        NoExercise => ("no_exercise", "I do not exercise at all"),
    }
}

vocabulary! {
    Travel {
        DomesticBusinessTrip => ("domestic_business_trip", "Domestic business trips"),
        OverseasBusinessTrip => ("overseas_business_trip", "Overseas business trips"),
        Staycation => ("staycation", "Vacation at home"),
        DomesticTravel => ("domestic_travel", "Domestic travel"),
        OverseasTravel => ("overseas_travel", "Overseas travel"),
    }
}

/// A single multi-select label tagged with the group it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "group", content = "label", rename_all = "snake_case")]
pub enum Activity {
    Leisure(Leisure),
    Hobby(Hobby),
    Sport(Sport),
    Travel(Travel),
}

impl Activity {
    pub const fn question(self) -> QuestionId {
        match self {
            Self::Leisure(_) => QuestionId::Leisure,
            Self::Hobby(_) => QuestionId::Hobbies,
            Self::Sport(_) => QuestionId::Sports,
            Self::Travel(_) => QuestionId::Travel,
        }
    }
}

/// One page of the background survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveySection {
    Occupation,
    Education,
    Residence,
    Activities,
}

impl SurveySection {
    pub const COUNT: u8 = 4;

    pub const fn ordered() -> [Self; 4] {
        [
            Self::Occupation,
            Self::Education,
            Self::Residence,
            Self::Activities,
        ]
    }

    pub const fn number(self) -> u8 {
        match self {
            Self::Occupation => 1,
            Self::Education => 2,
            Self::Residence => 3,
            Self::Activities => 4,
        }
    }

    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::Occupation),
            2 => Some(Self::Education),
            3 => Some(Self::Residence),
            4 => Some(Self::Activities),
            _ => None,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Occupation => "Work",
            Self::Education => "Education",
            Self::Residence => "Residence",
            Self::Activities => "Leisure & Activities",
        }
    }

    pub fn part_label(self) -> String {
        format!("Part {} of {}", self.number(), Self::COUNT)
    }

    pub const fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub const fn previous(self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }

    pub const fn is_last(self) -> bool {
        matches!(self, Self::Activities)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    SingleChoice,
    MultipleChoice,
}

/// Identifier for every question the survey can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionId {
    Industry,
    TeachingPlace,
    HasJob,
    WorkPeriod,
    ManagementRole,
    IsStudent,
    RecentCourse,
    Residence,
    Leisure,
    Hobbies,
    Sports,
    Travel,
}

impl QuestionId {
    pub const fn section(self) -> SurveySection {
        match self {
            Self::Industry
            | Self::TeachingPlace
            | Self::HasJob
            | Self::WorkPeriod
            | Self::ManagementRole => SurveySection::Occupation,
            Self::IsStudent | Self::RecentCourse => SurveySection::Education,
            Self::Residence => SurveySection::Residence,
            Self::Leisure | Self::Hobbies | Self::Sports | Self::Travel => {
                SurveySection::Activities
            }
        }
    }

    pub const fn kind(self) -> QuestionKind {
        match self {
            Self::Leisure | Self::Hobbies | Self::Sports | Self::Travel => {
                QuestionKind::MultipleChoice
            }
            _ => QuestionKind::SingleChoice,
        }
    }

    pub const fn prompt(self) -> &'static str {
        match self {
            Self::Industry => "Which field do you currently work in?",
            Self::TeachingPlace => "Where do you currently teach?",
            Self::HasJob => "Do you currently have a job?",
            Self::WorkPeriod => "How long have you been working?",
            Self::ManagementRole => "Do you hold a management role supervising staff?",
            Self::IsStudent => "Are you currently a student?",
            Self::RecentCourse => "Which course did you take most recently?",
            Self::Residence => "Where do you currently live?",
            Self::Leisure => "Leisure activities (choose at least 2)",
            Self::Hobbies => "Hobbies and interests (choose at least 1)",
            Self::Sports => "Sports (choose at least 1)",
            Self::Travel => "Vacations and business trips (choose at least 1)",
        }
    }
}

/// Stages of the speaking assessment; the survey is the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStep {
    BackgroundSurvey,
    SelfAssessment,
    Setup,
    SampleQuestion,
    BeginTest,
}

impl AssessmentStep {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::BackgroundSurvey,
            Self::SelfAssessment,
            Self::Setup,
            Self::SampleQuestion,
            Self::BeginTest,
        ]
    }

    pub const fn number(self) -> u8 {
        match self {
            Self::BackgroundSurvey => 1,
            Self::SelfAssessment => 2,
            Self::Setup => 3,
            Self::SampleQuestion => 4,
            Self::BeginTest => 5,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::BackgroundSurvey => "Background Survey",
            Self::SelfAssessment => "Self Assessment",
            Self::Setup => "Setup",
            Self::SampleQuestion => "Sample Question",
            Self::BeginTest => "Begin Test",
        }
    }
}
