//! Query handlers for the Resume context.

use jobboard_core::error::DomainError;
use jobboard_core::repository::ReadModelRepository;
use uuid::Uuid;

use super::read_models::{ResumeListing, UserResume};

/// Retrieves the public listing of a published resume.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if no listing exists.
pub async fn get_resume_listing(
    resume_id: Uuid,
    repo: &dyn ReadModelRepository<ResumeListing>,
) -> Result<ResumeListing, DomainError> {
    repo.find_by_key(&resume_id)
        .await?
        .ok_or(DomainError::not_found("resume_listing", resume_id))
}

/// Lists published resumes, most recently published first.
///
/// # Errors
///
/// Returns repository errors.
pub async fn list_resume_listings(
    repo: &dyn ReadModelRepository<ResumeListing>,
) -> Result<Vec<ResumeListing>, DomainError> {
    let mut rows = repo.all().await?;
    rows.sort_by(|a, b| {
        b.published_at
            .cmp(&a.published_at)
            .then(a.resume_id.cmp(&b.resume_id))
    });
    Ok(rows)
}

/// Lists an applicant's resumes in any status, oldest first.
///
/// # Errors
///
/// Returns repository errors.
pub async fn list_user_resumes(
    owner_id: Uuid,
    repo: &dyn ReadModelRepository<UserResume>,
) -> Result<Vec<UserResume>, DomainError> {
    let mut rows = repo
        .find_where(&|row: &UserResume| row.owner_id == owner_id)
        .await?;
    rows.sort_by_key(|row| (row.created_at, row.resume_id));
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;
    use jobboard_core::error::ErrorKind;
    use jobboard_core::render::ExcerptRenderer;
    use jobboard_store::MemoryReadModelStore;
    use jobboard_test_support::{FixedClock, PassthroughRenderer, fixed_time};

    use super::*;
    use crate::domain::aggregates::tests::resume_in;
    use crate::domain::status::ResumeStatus;

    #[tokio::test]
    async fn test_get_resume_listing_returns_not_found_when_unlisted() {
        let repo = MemoryReadModelStore::<ResumeListing>::new();

        let err = get_resume_listing(Uuid::new_v4(), &repo).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_list_resume_listings_orders_newest_first() {
        // Arrange
        let repo = MemoryReadModelStore::new();
        let clock = FixedClock::default();
        let text = ExcerptRenderer::new(Arc::new(PassthroughRenderer), 50);
        let older = ResumeListing::from_resume(&resume_in(ResumeStatus::Published, &clock), &text);
        let mut newer =
            ResumeListing::from_resume(&resume_in(ResumeStatus::Published, &clock), &text);
        newer.published_at = Some(fixed_time() + Duration::hours(3));
        repo.upsert(older.clone()).await.unwrap();
        repo.upsert(newer.clone()).await.unwrap();

        // Act
        let rows = list_resume_listings(&repo).await.unwrap();

        // Assert
        assert_eq!(rows, vec![newer, older]);
    }

    #[tokio::test]
    async fn test_list_user_resumes_filters_by_owner() {
        // Arrange
        let repo = MemoryReadModelStore::new();
        let clock = FixedClock::default();
        let mine = UserResume::from_resume(&resume_in(ResumeStatus::Draft, &clock));
        let theirs = UserResume::from_resume(&resume_in(ResumeStatus::Published, &clock));
        repo.upsert(mine.clone()).await.unwrap();
        repo.upsert(theirs).await.unwrap();

        // Act
        let rows = list_user_resumes(mine.owner_id, &repo).await.unwrap();

        // Assert
        assert_eq!(rows, vec![mine]);
    }
}
