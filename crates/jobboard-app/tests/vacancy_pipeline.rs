//! Vacancy commands through the full pipeline.

mod common;

use std::sync::Arc;

use common::{Harness, rows};
use jobboard_app::MarkdownRenderer;
use jobboard_core::error::ErrorKind;
use jobboard_core::render::ExcerptRenderer;
use jobboard_core::repository::AggregateReader;
use jobboard_core::value_objects::LocationInput;
use jobboard_vacancy::application::query_handlers::{
    get_vacancy_listing, list_company_vacancies,
};
use jobboard_vacancy::application::read_models::VacancyListing;
use jobboard_vacancy::domain::aggregates::Vacancy;
use jobboard_vacancy::domain::commands::{
    ArchiveVacancy, DeleteVacancy, PublishVacancy, RegisterVacancy, UpdateVacancy,
};
use uuid::Uuid;

#[tokio::test]
async fn test_registering_twice_is_a_conflict() {
    // Arrange
    let harness = Harness::new();
    let vacancy_id = harness.registered_vacancy().await;

    // Act
    let err = harness
        .board
        .register_vacancy(&RegisterVacancy {
            correlation_id: Uuid::new_v4(),
            acting_user_id: harness.employer,
            vacancy_id,
        })
        .await
        .unwrap_err();

    // Assert
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(err.code(), "vacancy.invalid_transition");
}

#[tokio::test]
async fn test_publishing_without_category_is_a_problem() {
    // Arrange
    let harness = Harness::new();
    let vacancy_id = harness.registered_vacancy().await;

    // Act
    let err = harness
        .board
        .publish_vacancy(&PublishVacancy {
            correlation_id: Uuid::new_v4(),
            acting_user_id: harness.employer,
            vacancy_id,
        })
        .await
        .unwrap_err();

    // Assert
    assert_eq!(err.kind(), ErrorKind::Problem);
    assert_eq!(err.code(), "vacancy.category_required");
    assert!(rows(&harness.board.read_models().vacancy_listings).await.is_empty());
}

#[tokio::test]
async fn test_published_vacancy_gets_listing_matching_aggregate() {
    // Arrange
    let harness = Harness::new();

    // Act
    let vacancy_id = harness.published_vacancy().await;

    // Assert
    let stored = harness
        .board
        .database()
        .table::<Vacancy>()
        .unwrap()
        .find_by_id(vacancy_id)
        .await
        .unwrap()
        .unwrap();
    let text = ExcerptRenderer::new(Arc::new(MarkdownRenderer), 280);
    let listing = get_vacancy_listing(vacancy_id, &harness.board.read_models().vacancy_listings)
        .await
        .unwrap();
    assert_eq!(listing, VacancyListing::from_vacancy(&stored, &text));
    assert_eq!(
        listing.description_excerpt,
        "Run the deploy pipeline. On-call one week in six."
    );
    assert!(listing.published_at.is_some());
}

#[tokio::test]
async fn test_latitude_boundary_through_create() {
    // Arrange
    let harness = Harness::new();
    let mut out_of_range = harness.create_vacancy_command(Uuid::new_v4());
    out_of_range.location = LocationInput {
        latitude: Some(91.0),
        longitude: Some(0.0),
        ..out_of_range.location
    };
    let mut at_pole = harness.create_vacancy_command(Uuid::new_v4());
    at_pole.location = LocationInput {
        latitude: Some(90.0),
        longitude: Some(0.0),
        ..at_pole.location
    };

    // Act
    let rejected = harness.board.create_vacancy(&out_of_range).await;
    let accepted = harness.board.create_vacancy(&at_pole).await;

    // Assert
    let err = rejected.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.code(), "location.latitude_out_of_range");
    assert_eq!(accepted.unwrap().aggregate_id, at_pole.vacancy_id);
    let company_rows = list_company_vacancies(
        harness.company_id,
        &harness.board.read_models().company_vacancies,
    )
    .await
    .unwrap();
    assert_eq!(company_rows.len(), 1);
    assert_eq!(company_rows[0].vacancy_id, at_pole.vacancy_id);
}

#[tokio::test]
async fn test_editing_published_vacancy_refreshes_listing() {
    // Arrange
    let harness = Harness::new();
    let vacancy_id = harness.published_vacancy().await;

    // Act
    let receipt = harness
        .board
        .update_vacancy(&UpdateVacancy {
            correlation_id: Uuid::new_v4(),
            acting_user_id: harness.employer,
            vacancy_id,
            title: Some("Senior Platform Engineer".into()),
            add_employment_types: vec!["contract".into()],
            ..UpdateVacancy::default()
        })
        .await
        .unwrap();

    // Assert
    assert_eq!(receipt.event_ids.len(), 1);
    let listing = get_vacancy_listing(vacancy_id, &harness.board.read_models().vacancy_listings)
        .await
        .unwrap();
    assert_eq!(listing.title, "Senior Platform Engineer");
    assert_eq!(listing.employment_types, vec!["full_time", "contract"]);
}

#[tokio::test]
async fn test_unchanged_update_emits_nothing() {
    // Arrange
    let harness = Harness::new();
    let vacancy_id = harness.draft_vacancy().await;

    // Act
    let receipt = harness
        .board
        .update_vacancy(&UpdateVacancy {
            correlation_id: Uuid::new_v4(),
            acting_user_id: harness.employer,
            vacancy_id,
            title: Some("Platform Engineer".into()),
            ..UpdateVacancy::default()
        })
        .await
        .unwrap();

    // Assert
    assert!(receipt.event_ids.is_empty());
    assert_eq!(receipt.dispatch.delivered, 0);
}

#[tokio::test]
async fn test_archive_then_delete_clears_vacancy_rows() {
    // Arrange
    let harness = Harness::new();
    let vacancy_id = harness.published_vacancy().await;

    // Act
    harness
        .board
        .archive_vacancy(&ArchiveVacancy {
            correlation_id: Uuid::new_v4(),
            acting_user_id: harness.employer,
            vacancy_id,
        })
        .await
        .unwrap();
    let after_archive = rows(&harness.board.read_models().company_vacancies).await;
    harness
        .board
        .delete_vacancy(&DeleteVacancy {
            correlation_id: Uuid::new_v4(),
            acting_user_id: harness.employer,
            vacancy_id,
        })
        .await
        .unwrap();

    // Assert
    assert_eq!(after_archive.len(), 1);
    assert_eq!(after_archive[0].status, "archived");
    assert!(rows(&harness.board.read_models().vacancy_listings).await.is_empty());
    assert!(rows(&harness.board.read_models().company_vacancies).await.is_empty());
}

#[tokio::test]
async fn test_published_vacancy_cannot_be_deleted() {
    // Arrange
    let harness = Harness::new();
    let vacancy_id = harness.published_vacancy().await;

    // Act
    let err = harness
        .board
        .delete_vacancy(&DeleteVacancy {
            correlation_id: Uuid::new_v4(),
            acting_user_id: harness.employer,
            vacancy_id,
        })
        .await
        .unwrap_err();

    // Assert
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(rows(&harness.board.read_models().vacancy_listings).await.len(), 1);
}

#[tokio::test]
async fn test_creating_with_taken_id_is_not_retried() {
    // Arrange
    let harness = Harness::new();
    let vacancy_id = harness.draft_vacancy().await;

    // Act
    let err = harness
        .board
        .create_vacancy(&harness.create_vacancy_command(vacancy_id))
        .await
        .unwrap_err();

    // Assert
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(err.code(), "vacancy.already_exists");
    let company_rows = list_company_vacancies(
        harness.company_id,
        &harness.board.read_models().company_vacancies,
    )
    .await
    .unwrap();
    assert_eq!(company_rows.len(), 1);
}
