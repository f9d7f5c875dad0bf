//! Shared setup for the pipeline tests.
#![allow(dead_code)]

use std::sync::Arc;

use jobboard_app::{AppConfig, CommandReceipt, JobBoard, MarkdownRenderer, ReadModels};
use jobboard_applications::application::read_models::{ApplicationView, VacancyApplicationSummary};
use jobboard_applications::domain::commands::{SubmitApplication, WithdrawApplication};
use jobboard_core::directory::UserDirectory;
use jobboard_core::error::DomainError;
use jobboard_core::repository::{ReadModel, ReadModelRepository};
use jobboard_core::value_objects::{ContactInput, LocationInput};
use jobboard_resume::application::read_models::{ResumeListing, UserResume};
use jobboard_resume::domain::commands::{CreateResume, PublishResume};
use jobboard_store::MemoryReadModelStore;
use jobboard_test_support::{FixedClock, StubUserDirectory};
use jobboard_vacancy::application::read_models::{CompanyVacancy, VacancyListing};
use jobboard_vacancy::domain::commands::{
    CreateVacancy, PublishVacancy, RegisterVacancy, SetVacancyCategory,
};
use uuid::Uuid;

pub struct Harness {
    pub board: JobBoard,
    pub directory: Arc<StubUserDirectory>,
    pub company_id: Uuid,
    pub employer: Uuid,
    pub applicant: Uuid,
}

impl Harness {
    pub fn new() -> Self {
        let directory = Arc::new(StubUserDirectory::new());
        let company_id = Uuid::new_v4();
        let employer = directory.add_employer(company_id);
        let applicant = directory.add_applicant();
        let board = JobBoard::new(
            &AppConfig::default(),
            Arc::clone(&directory) as Arc<dyn UserDirectory>,
            Arc::new(FixedClock::default()),
            Arc::new(MarkdownRenderer),
        )
        .unwrap();
        Self {
            board,
            directory,
            company_id,
            employer,
            applicant,
        }
    }

    pub fn create_vacancy_command(&self, vacancy_id: Uuid) -> CreateVacancy {
        CreateVacancy {
            correlation_id: Uuid::new_v4(),
            acting_user_id: self.employer,
            vacancy_id,
            title: "Platform Engineer".into(),
            description: "Run the **deploy** pipeline.\n\nOn-call one week in six.".into(),
            salary: None,
            location: LocationInput {
                country: "Portugal".into(),
                city: "Lisbon".into(),
                ..LocationInput::default()
            },
            recruiter: ContactInput {
                name: "Rita Recruiter".into(),
                email: "rita@example.com".into(),
                phone: None,
            },
            employment_types: vec!["full_time".into()],
        }
    }

    pub async fn draft_vacancy(&self) -> Uuid {
        let vacancy_id = Uuid::new_v4();
        self.board
            .create_vacancy(&self.create_vacancy_command(vacancy_id))
            .await
            .unwrap();
        vacancy_id
    }

    pub async fn registered_vacancy(&self) -> Uuid {
        let vacancy_id = self.draft_vacancy().await;
        self.board
            .register_vacancy(&RegisterVacancy {
                correlation_id: Uuid::new_v4(),
                acting_user_id: self.employer,
                vacancy_id,
            })
            .await
            .unwrap();
        vacancy_id
    }

    pub async fn published_vacancy(&self) -> Uuid {
        let vacancy_id = self.registered_vacancy().await;
        self.board
            .set_vacancy_category(&SetVacancyCategory {
                correlation_id: Uuid::new_v4(),
                acting_user_id: self.employer,
                vacancy_id,
                category_id: Uuid::new_v4(),
            })
            .await
            .unwrap();
        self.board
            .publish_vacancy(&PublishVacancy {
                correlation_id: Uuid::new_v4(),
                acting_user_id: self.employer,
                vacancy_id,
            })
            .await
            .unwrap();
        vacancy_id
    }

    pub fn create_resume_command(&self, resume_id: Uuid) -> CreateResume {
        CreateResume {
            correlation_id: Uuid::new_v4(),
            acting_user_id: self.applicant,
            resume_id,
            title: "Site Reliability Engineer".into(),
            about: "I keep *things* running.".into(),
            desired_salary: None,
            location: LocationInput {
                country: "Portugal".into(),
                city: "Porto".into(),
                ..LocationInput::default()
            },
            contact: ContactInput {
                name: "Alex Applicant".into(),
                email: "Alex@Example.com".into(),
                phone: None,
            },
            employment_types: vec!["full_time".into(), "contract".into()],
        }
    }

    pub async fn draft_resume(&self) -> Uuid {
        let resume_id = Uuid::new_v4();
        self.board
            .create_resume(&self.create_resume_command(resume_id))
            .await
            .unwrap();
        resume_id
    }

    pub async fn published_resume(&self) -> Uuid {
        let resume_id = self.draft_resume().await;
        self.board
            .publish_resume(&PublishResume {
                correlation_id: Uuid::new_v4(),
                acting_user_id: self.applicant,
                resume_id,
            })
            .await
            .unwrap();
        resume_id
    }

    pub async fn submit(
        &self,
        vacancy_id: Uuid,
        resume_id: Uuid,
    ) -> Result<CommandReceipt, DomainError> {
        self.board
            .submit_application(&SubmitApplication {
                correlation_id: Uuid::new_v4(),
                acting_user_id: self.applicant,
                application_id: Uuid::new_v4(),
                vacancy_id,
                resume_id,
                cover_letter: Some("Happy to **relocate**.".into()),
            })
            .await
    }

    pub async fn withdraw(&self, application_id: Uuid) -> Result<CommandReceipt, DomainError> {
        self.board
            .withdraw_application(&WithdrawApplication {
                correlation_id: Uuid::new_v4(),
                acting_user_id: self.applicant,
                application_id,
            })
            .await
    }
}

/// Every row of `store`, ordered by key.
pub async fn rows<R>(store: &MemoryReadModelStore<R>) -> Vec<R>
where
    R: ReadModel,
    R::Key: Ord,
{
    let mut rows = store.all().await.unwrap();
    rows.sort_by_key(|row| row.key());
    rows
}

/// The full content of every read model.
#[derive(Debug, PartialEq)]
pub struct Snapshot {
    pub vacancy_listings: Vec<VacancyListing>,
    pub company_vacancies: Vec<CompanyVacancy>,
    pub resume_listings: Vec<ResumeListing>,
    pub user_resumes: Vec<UserResume>,
    pub application_views: Vec<ApplicationView>,
    pub application_summaries: Vec<VacancyApplicationSummary>,
}

pub async fn snapshot(read_models: &ReadModels) -> Snapshot {
    Snapshot {
        vacancy_listings: rows(&read_models.vacancy_listings).await,
        company_vacancies: rows(&read_models.company_vacancies).await,
        resume_listings: rows(&read_models.resume_listings).await,
        user_resumes: rows(&read_models.user_resumes).await,
        application_views: rows(&read_models.application_views).await,
        application_summaries: rows(&read_models.application_summaries).await,
    }
}
