use crate::infra::{InMemorySubmissionSink, InMemorySurveySessions};
use clap::Args;
use serde::Serialize;
use speakit::error::AppError;
use speakit::workflows::survey::{
    Activity, BusinessWorkPeriod, Hobby, Industry, Leisure, ManagementRole, MutationOutcome,
    NextOutcome, RecentCourse, Residence, SessionId, Sport, SurveyInput, SurveySessionService,
    SurveyView, TeacherWorkPeriod, TeachingPlace, Transition, Travel, WorkPeriod,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print each section view as JSON instead of a text rendering
    #[arg(long)]
    pub(crate) json: bool,
}

type DemoService = SurveySessionService<InMemorySurveySessions, InMemorySubmissionSink>;

/// Scripted answers for one section. The first section changes industry midway to show the
/// dependent answers being cleared.
fn section_script() -> [Vec<SurveyInput>; 4] {
    let mut activities: Vec<SurveyInput> = [
        Activity::Leisure(Leisure::Movies),
        Activity::Leisure(Leisure::Parks),
        Activity::Hobby(Hobby::ListeningToMusic),
        Activity::Sport(Sport::Jogging),
        Activity::Travel(Travel::DomesticTravel),
    ]
    .into_iter()
    .map(SurveyInput::ToggleActivity)
    .collect();
    activities.extend(
        [
            Activity::Leisure(Leisure::Concerts),
            Activity::Leisure(Leisure::Camping),
            Activity::Hobby(Hobby::Cooking),
            Activity::Sport(Sport::Hiking),
            Activity::Sport(Sport::Swimming),
            Activity::Travel(Travel::OverseasTravel),
            Activity::Travel(Travel::Staycation),
        ]
        .into_iter()
        .map(SurveyInput::ToggleActivity),
    );

    [
        vec![
            SurveyInput::Industry(Industry::Business),
            SurveyInput::HasJob(true),
            SurveyInput::WorkPeriod(WorkPeriod::Business(BusinessWorkPeriod::Experienced)),
            SurveyInput::ManagementRole(ManagementRole::Yes),
            SurveyInput::Industry(Industry::Teacher),
            SurveyInput::TeachingPlace(TeachingPlace::School),
            SurveyInput::HasJob(true),
            SurveyInput::WorkPeriod(WorkPeriod::Teacher(TeacherWorkPeriod::TwoMonthsOrMore)),
            SurveyInput::ManagementRole(ManagementRole::No),
        ],
        vec![
            SurveyInput::IsStudent(true),
            SurveyInput::RecentCourse(RecentCourse::LanguageClass),
        ],
        vec![SurveyInput::Residence(Residence::WithRoommates)],
        activities,
    ]
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let sink = Arc::new(InMemorySubmissionSink::default());
    let service: DemoService =
        SurveySessionService::new(Arc::new(InMemorySurveySessions::default()), sink.clone());

    let record = service.start()?;
    let session_id = record.session_id;
    println!("Background survey demo (session {session_id})");

    for inputs in section_script() {
        let activity_section = inputs
            .iter()
            .any(|input| matches!(input, SurveyInput::ToggleActivity(_)));
        for (index, input) in inputs.into_iter().enumerate() {
            let receipt = service.answer(&session_id, input)?;
            report_outcome(input, &receipt.outcome);

            // Show the aggregate gate holding once every group minimum is met.
            if activity_section && index == 4 {
                attempt_next(&service, &session_id, args.json)?;
            }
        }
        print_view(&service.view(&session_id)?.view, args.json)?;
        attempt_next(&service, &session_id, args.json)?;
    }

    let submissions = sink.submissions();
    println!("\nSubmissions forwarded: {}", submissions.len());
    for submission in &submissions {
        print_json(submission)?;
    }

    Ok(())
}

fn attempt_next(service: &DemoService, session_id: &SessionId, json: bool) -> Result<(), AppError> {
    let receipt = service.next(session_id)?;
    match receipt.transition {
        Transition::Next(NextOutcome::Advanced { section }) => {
            println!("\n-> advanced to {}", section.part_label());
        }
        Transition::Next(NextOutcome::Blocked { section }) => {
            println!("\n-> next blocked: {} is incomplete", section.title());
            if let Some(tally) = receipt.session.view.activity_tally {
                println!(
                    "   {} of {} activities selected, {} more needed",
                    tally.total,
                    tally.required_total,
                    tally.remaining()
                );
            }
        }
        Transition::Next(NextOutcome::Proceed { survey }) => {
            println!(
                "\n-> proceed to {} with {} activities selected",
                survey.next_step.label(),
                survey.answers.activities().total()
            );
            if json {
                print_json(&survey.answers.summary())?;
            }
        }
        Transition::Back(_) => {}
    }
    Ok(())
}

fn report_outcome(input: SurveyInput, outcome: &MutationOutcome) {
    match outcome {
        MutationOutcome::Applied { cleared } if cleared.is_empty() => {
            println!("  set {}", input.question().prompt());
        }
        MutationOutcome::Applied { cleared } => {
            let cleared: Vec<&str> = cleared.iter().map(|question| question.prompt()).collect();
            println!(
                "  set {} (cleared: {})",
                input.question().prompt(),
                cleared.join("; ")
            );
        }
        MutationOutcome::Unchanged => println!("  unchanged {}", input.question().prompt()),
        MutationOutcome::Rejected { reason } => println!("  rejected: {reason:?}"),
    }
}

fn print_view(view: &SurveyView, json: bool) -> Result<(), AppError> {
    if json {
        return print_json(view);
    }

    println!("\n{} | {}", view.part_label, view.title);
    for question in &view.questions {
        match (question.selected_count, question.minimum_selections) {
            (Some(count), Some(minimum)) => {
                println!("  {} ({count} selected, min {minimum})", question.prompt)
            }
            _ => println!("  {}", question.prompt),
        }
        for option in question.options.iter().filter(|option| option.selected) {
            println!("    [x] {}", option.label);
        }
    }
    let state = if view.can_advance { "enabled" } else { "disabled" };
    println!("  [{}] {state}", view.advance_label);
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => println!("  payload unavailable: {err}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_walkthrough_forwards_one_submission() {
        let sink = Arc::new(InMemorySubmissionSink::default());
        let service: DemoService =
            SurveySessionService::new(Arc::new(InMemorySurveySessions::default()), sink.clone());
        let session_id = service.start().expect("start").session_id;

        for inputs in section_script() {
            for input in inputs {
                let receipt = service.answer(&session_id, input).expect("answer");
                assert!(!receipt.outcome.is_rejected(), "{input:?} rejected");
            }
            service.next(&session_id).expect("next");
        }

        let submissions = sink.submissions();
        assert_eq!(submissions.len(), 1);
        let answers = &submissions[0].answers;
        assert_eq!(answers.industry, Some(Industry::Teacher));
        assert_eq!(answers.management_role, Some(ManagementRole::No));
        assert_eq!(answers.recent_course, Some(RecentCourse::LanguageClass));
    }

    #[test]
    fn activity_script_meets_aggregate_exactly() {
        let script = section_script();
        assert_eq!(script[3].len(), 12);
    }
}
