use super::common::*;
use crate::workflows::survey::answers::{MutationOutcome, Rejection, SurveyInput};
use crate::workflows::survey::domain::{
    AssessmentStep, Industry, QuestionId, Residence, SurveySection, TeacherWorkPeriod,
    TeachingPlace,
};
use crate::workflows::survey::engine::{BackOutcome, NextOutcome, SurveyEngine};

#[test]
fn back_from_first_section_signals_exit() {
    let mut engine = SurveyEngine::new();

    assert_eq!(engine.back(), BackOutcome::Exit);
    assert_eq!(engine.section(), SurveySection::Occupation);
}

#[test]
fn next_on_incomplete_section_keeps_cursor() {
    let mut engine = SurveyEngine::new();
    engine.apply(SurveyInput::Industry(Industry::Teacher));

    assert!(!engine.can_advance());
    assert_eq!(
        engine.next(),
        NextOutcome::Blocked {
            section: SurveySection::Occupation
        }
    );
    assert_eq!(engine.section(), SurveySection::Occupation);
}

#[test]
fn full_walkthrough_proceeds_with_finished_answers() {
    let mut engine = SurveyEngine::new();

    for section in SurveySection::ordered() {
        assert_eq!(engine.section(), section);
        for input in section_inputs(section) {
            assert!(engine.apply(input).is_applied());
        }
        assert!(engine.can_advance());

        match engine.next() {
            NextOutcome::Advanced { section: next } => {
                assert_eq!(Some(next), section.next());
            }
            NextOutcome::Proceed { survey } => {
                assert!(section.is_last());
                assert_eq!(survey.next_step, AssessmentStep::SelfAssessment);
                assert_eq!(&survey.answers, engine.answers());
                assert_eq!(survey.answers.residence(), Some(Residence::WithFamily));
            }
            NextOutcome::Blocked { section } => panic!("blocked on {section:?}"),
        }
    }

    assert_eq!(engine.section(), SurveySection::Activities);
}

#[test]
fn back_retreats_without_validation_and_keeps_answers() {
    let mut engine = engine_at(SurveySection::Residence);
    assert!(!engine.can_advance());

    assert_eq!(
        engine.back(),
        BackOutcome::Retreated(SurveySection::Education)
    );
    assert_eq!(engine.answers().is_student(), Some(false));
    assert!(engine.can_advance());
}

#[test]
fn inputs_for_other_sections_are_rejected() {
    let mut engine = SurveyEngine::new();

    let outcome = engine.apply(SurveyInput::Residence(Residence::Alone));

    assert_eq!(
        outcome,
        MutationOutcome::Rejected {
            reason: Rejection::InactiveSection {
                question: QuestionId::Residence,
                active: SurveySection::Occupation,
            }
        }
    );
    assert_eq!(engine.answers().residence(), None);
}

#[test]
fn view_projects_active_section_state() {
    let mut engine = SurveyEngine::new();
    engine.apply(SurveyInput::Industry(Industry::Teacher));
    engine.apply(SurveyInput::TeachingPlace(TeachingPlace::School));
    engine.apply(SurveyInput::HasJob(true));

    let view = engine.view();
    assert_eq!(view.part_label, "Part 1 of 4");
    assert_eq!(view.advance_label, "Next");
    assert!(!view.can_advance);
    assert!(view.activity_tally.is_none());
    assert_eq!(
        view.question_ids(),
        vec![
            QuestionId::Industry,
            QuestionId::TeachingPlace,
            QuestionId::HasJob,
            QuestionId::WorkPeriod,
        ]
    );

    let industry = view.question(QuestionId::Industry).expect("industry shown");
    let selected: Vec<&str> = industry
        .options
        .iter()
        .filter(|option| option.selected)
        .map(|option| option.key)
        .collect();
    assert_eq!(selected, vec![Industry::Teacher.key()]);

    let period = view.question(QuestionId::WorkPeriod).expect("period shown");
    assert_eq!(period.options.len(), TeacherWorkPeriod::ALL.len());
    assert!(period.options.iter().all(|option| !option.selected));

    let current: Vec<AssessmentStep> = view
        .steps
        .iter()
        .filter(|step| step.current)
        .map(|step| step.step)
        .collect();
    assert_eq!(current, vec![AssessmentStep::BackgroundSurvey]);
}

#[test]
fn activities_view_reports_counts_and_proceed_label() {
    let mut engine = engine_at(SurveySection::Activities);
    for input in activity_inputs(2, 1, 1, 1) {
        engine.apply(input);
    }

    let view = engine.view();
    assert_eq!(view.advance_label, "Proceed");
    assert!(!view.can_advance);
    let tally = view.activity_tally.expect("tally shown on activities");
    assert_eq!(tally.total, 5);

    let leisure = view.question(QuestionId::Leisure).expect("leisure shown");
    assert_eq!(leisure.selected_count, Some(2));
    assert_eq!(leisure.minimum_selections, Some(2));
}
