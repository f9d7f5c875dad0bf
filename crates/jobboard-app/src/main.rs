//! Job board demo entry point.
//!
//! Runs one employer and one applicant through the whole flow against the
//! in-memory store and prints the resulting read models.

use std::error::Error;
use std::sync::Arc;

use chrono::NaiveDate;
use jobboard_app::{AppConfig, JobBoard, MarkdownRenderer, telemetry};
use jobboard_applications::application::query_handlers::{
    get_vacancy_application_summary, list_vacancy_applications,
};
use jobboard_applications::domain::commands::SubmitApplication;
use jobboard_core::clock::SystemClock;
use jobboard_core::directory::{Role, UserProfile};
use jobboard_core::value_objects::{ContactInput, LocationInput, SalaryInput};
use jobboard_resume::application::query_handlers::list_resume_listings;
use jobboard_resume::domain::commands::{
    AddWorkExperience, CreateResume, PublishResume, WorkExperienceInput,
};
use jobboard_store::MemoryUserDirectory;
use jobboard_vacancy::application::query_handlers::list_vacancy_listings;
use jobboard_vacancy::domain::commands::{
    CreateVacancy, PublishVacancy, RegisterVacancy, SetVacancyCategory,
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_env()?;
    telemetry::init(config.log_format)?;
    tracing::info!(?config, "starting job board demo");

    let employer = Uuid::new_v4();
    let applicant = Uuid::new_v4();
    let directory = MemoryUserDirectory::new();
    directory.register(UserProfile {
        user_id: employer,
        role: Role::Employer,
        company_id: Some(Uuid::new_v4()),
    });
    directory.register(UserProfile {
        user_id: applicant,
        role: Role::Applicant,
        company_id: None,
    });

    let board = JobBoard::new(
        &config,
        Arc::new(directory),
        Arc::new(SystemClock),
        Arc::new(MarkdownRenderer),
    )?;

    let vacancy_id = Uuid::new_v4();
    board
        .create_vacancy(&CreateVacancy {
            correlation_id: Uuid::new_v4(),
            acting_user_id: employer,
            vacancy_id,
            title: "Senior Rust Engineer".into(),
            description: "## About the role\n\nOwn the **matching engine** end to end.".into(),
            salary: Some(SalaryInput {
                min: Some(80_000),
                max: Some(110_000),
                currency: "EUR".into(),
            }),
            location: LocationInput {
                country: "Spain".into(),
                city: "Barcelona".into(),
                latitude: Some(41.39),
                longitude: Some(2.17),
                ..LocationInput::default()
            },
            recruiter: ContactInput {
                name: "Rita Recruiter".into(),
                email: "rita@example.com".into(),
                phone: None,
            },
            employment_types: vec!["full_time".into(), "contract".into()],
        })
        .await?;
    board
        .register_vacancy(&RegisterVacancy {
            correlation_id: Uuid::new_v4(),
            acting_user_id: employer,
            vacancy_id,
        })
        .await?;
    board
        .set_vacancy_category(&SetVacancyCategory {
            correlation_id: Uuid::new_v4(),
            acting_user_id: employer,
            vacancy_id,
            category_id: Uuid::new_v4(),
        })
        .await?;
    board
        .publish_vacancy(&PublishVacancy {
            correlation_id: Uuid::new_v4(),
            acting_user_id: employer,
            vacancy_id,
        })
        .await?;

    let resume_id = Uuid::new_v4();
    board
        .create_resume(&CreateResume {
            correlation_id: Uuid::new_v4(),
            acting_user_id: applicant,
            resume_id,
            title: "Systems Programmer".into(),
            about: "Ten years of *low-latency* services.".into(),
            desired_salary: None,
            location: LocationInput {
                country: "Spain".into(),
                city: "Madrid".into(),
                ..LocationInput::default()
            },
            contact: ContactInput {
                name: "Alex Applicant".into(),
                email: "alex@example.com".into(),
                phone: Some("+34 600 000 000".into()),
            },
            employment_types: vec!["full_time".into()],
        })
        .await?;
    board
        .add_work_experience(&AddWorkExperience {
            correlation_id: Uuid::new_v4(),
            acting_user_id: applicant,
            resume_id,
            entry_id: Uuid::new_v4(),
            entry: WorkExperienceInput {
                company: "Acme Networks".into(),
                position: "Staff Engineer".into(),
                start: NaiveDate::from_ymd_opt(2019, 4, 1).ok_or("invalid start date")?,
                end: None,
                description: Some("Packet processing in Rust.".into()),
            },
        })
        .await?;
    board
        .publish_resume(&PublishResume {
            correlation_id: Uuid::new_v4(),
            acting_user_id: applicant,
            resume_id,
        })
        .await?;

    let receipt = board
        .submit_application(&SubmitApplication {
            correlation_id: Uuid::new_v4(),
            acting_user_id: applicant,
            application_id: Uuid::new_v4(),
            vacancy_id,
            resume_id,
            cover_letter: Some("I have shipped **exactly** this before.".into()),
        })
        .await?;
    tracing::info!(
        application_id = %receipt.aggregate_id,
        delivered = receipt.dispatch.delivered,
        "application submitted"
    );

    let read_models = board.read_models();
    let vacancies = list_vacancy_listings(&read_models.vacancy_listings).await?;
    let resumes = list_resume_listings(&read_models.resume_listings).await?;
    let applications =
        list_vacancy_applications(vacancy_id, &read_models.application_views).await?;
    let summary =
        get_vacancy_application_summary(vacancy_id, &read_models.application_summaries).await?;

    println!("{}", serde_json::to_string_pretty(&vacancies)?);
    println!("{}", serde_json::to_string_pretty(&resumes)?);
    println!("{}", serde_json::to_string_pretty(&applications)?);
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
