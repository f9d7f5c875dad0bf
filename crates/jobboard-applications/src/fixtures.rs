//! Published vacancies and resumes for application tests.

use jobboard_core::aggregate::AggregateRoot;
use jobboard_core::repository::{AggregateRepository, UnitOfWork};
use jobboard_core::value_objects::{
    ContactInfo, Description, EmploymentType, EmploymentTypeSet, Location, Title,
};
use jobboard_resume::domain::aggregates::{Resume, ResumeContent};
use jobboard_store::MemoryDatabase;
use jobboard_test_support::FixedClock;
use jobboard_vacancy::domain::aggregates::{Vacancy, VacancyContent};
use uuid::Uuid;

fn location() -> Location {
    Location::new("Netherlands", None, "Utrecht", None, None, None, None).unwrap()
}

fn full_time() -> EmploymentTypeSet {
    EmploymentTypeSet::new([EmploymentType::FullTime]).unwrap()
}

pub(crate) fn published_vacancy(clock: &FixedClock) -> Vacancy {
    let content = VacancyContent {
        title: Title::new("Site Reliability Engineer").unwrap(),
        description: Description::new("Keep *everything* up.").unwrap(),
        salary: None,
        location: location(),
        recruiter: ContactInfo::new("Dana Recruiter", "dana@example.com", None).unwrap(),
        employment_types: full_time(),
    };
    let mut vacancy = Vacancy::create(
        Uuid::new_v4(),
        Uuid::new_v4(),
        Uuid::new_v4(),
        content,
        Uuid::new_v4(),
        clock,
    );
    vacancy.register(Uuid::new_v4(), Uuid::new_v4(), clock).unwrap();
    vacancy.set_category(Uuid::new_v4(), clock).unwrap();
    vacancy.publish(Uuid::new_v4(), clock).unwrap();
    vacancy.clear_uncommitted_events();
    vacancy
}

pub(crate) fn published_resume(owner_id: Uuid, clock: &FixedClock) -> Resume {
    let content = ResumeContent {
        title: Title::new("SRE").unwrap(),
        about: Description::new("Pager veteran.").unwrap(),
        desired_salary: None,
        location: location(),
        contact: ContactInfo::new("Jo Applicant", "jo@example.com", None).unwrap(),
        employment_types: full_time(),
    };
    let mut resume = Resume::create(Uuid::new_v4(), owner_id, content, Uuid::new_v4(), clock);
    resume.publish(Uuid::new_v4(), clock).unwrap();
    resume.clear_uncommitted_events();
    resume
}

/// Commits `aggregate`, inserting it when it has never been stored, and
/// returns the stored copy.
pub(crate) async fn saved<A: AggregateRoot>(database: &MemoryDatabase, aggregate: A) -> A {
    let uow = database.begin();
    let repo = uow.repository::<A>().unwrap();
    if aggregate.version() == 0 {
        repo.add(&aggregate).await.unwrap();
    } else {
        repo.mark_updated(&aggregate).await.unwrap();
    }
    uow.commit().await.unwrap();
    database
        .table::<A>()
        .unwrap()
        .get(aggregate.aggregate_id())
        .unwrap()
        .unwrap()
}
