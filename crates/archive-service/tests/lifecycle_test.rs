//! Integration tests for the document lifecycle over the in-memory backend.

mod helpers;

use archive_core::error::ErrorKind;
use archive_entity::{DocumentKind, LocationTier, Retention};
use archive_service::document::HandOutRequest;
use archive_service::{DraftError, RequiredField};

use helpers::{CONFIDENTIAL, TestApp, date, destructible};

#[tokio::test]
async fn test_create_tags_sensitivity() {
    let app = TestApp::new();
    let draft = app.draft(DocumentKind::Customer).await;

    let outcome = app.documents.create(&draft).await.unwrap();
    assert!(outcome.sensitivity_tagged);

    let doc = app.documents.get(outcome.id).await.unwrap();
    assert_eq!(doc.kind, DocumentKind::Customer);
    assert_eq!(doc.customer_name(), "ACME GmbH");
    assert_eq!(doc.document_type.title, "Invoice");
    assert_eq!(doc.destruction_date(), Some(date(2025, 12, 31)));
    assert_eq!(doc.placement.title(LocationTier::Room), "R1");
    assert_eq!(doc.sensitivity.unwrap().id, CONFIDENTIAL);
}

#[tokio::test]
async fn test_tagging_failure_keeps_document() {
    let app = TestApp::new();
    app.backend.set_tagging_available(false);
    let draft = app.draft(DocumentKind::Institute).await;

    let outcome = app.documents.create(&draft).await.unwrap();
    assert!(!outcome.sensitivity_tagged);

    let doc = app.documents.get(outcome.id).await.unwrap();
    assert!(doc.sensitivity.is_none());
    assert_eq!(app.backend.document_count(), 1);
}

#[tokio::test]
async fn test_unknown_term_is_reported_untagged() {
    let app = TestApp::new();
    let mut draft = app.draft(DocumentKind::Institute).await;
    draft.sensitivity = Some(uuid::Uuid::nil());

    let outcome = app.documents.create(&draft).await.unwrap();
    assert!(!outcome.sensitivity_tagged);
}

#[tokio::test]
async fn test_create_rejects_incomplete_draft() {
    let app = TestApp::new();
    let mut draft = app.draft(DocumentKind::Customer).await;
    draft.customer = None;
    draft.docket.clear();

    assert_eq!(
        draft.validate().unwrap_err(),
        DraftError::MissingFields(vec![RequiredField::Docket, RequiredField::Customer])
    );
    let err = app.documents.create(&draft).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(app.backend.document_count(), 0);
}

#[tokio::test]
async fn test_update_roundtrip() {
    let app = TestApp::new();
    let created = app
        .documents
        .create(&app.draft(DocumentKind::Institute).await)
        .await
        .unwrap();

    let mut draft = app.documents.edit_draft(created.id).await.unwrap();
    assert_eq!(draft.destruction_date(), Some(date(2025, 12, 31)));
    draft.description = "Invoice 2020, corrected".into();
    draft.set_indestructible(true);
    draft.location.clear(LocationTier::Room);

    let outcome = app.documents.update(created.id, &draft).await.unwrap();
    assert_eq!(outcome.id, created.id);

    let doc = app.documents.get(created.id).await.unwrap();
    assert_eq!(doc.description, "Invoice 2020, corrected");
    assert_eq!(doc.retention, Retention::Indestructible);
    assert_eq!(doc.placement.title(LocationTier::Building), "Main");
    assert!(doc.placement.get(LocationTier::Room).is_none());
}

#[tokio::test]
async fn test_hand_out_and_check_in() {
    let app = TestApp::new();
    let doc = app.insert(1, DocumentKind::Institute, "Lease", Retention::Indestructible);
    let request = HandOutRequest {
        recipient: 2.into(),
        date: app.today(),
        reason: "Audit".into(),
    };

    app.documents.hand_out(doc.id, request.clone()).await.unwrap();
    let handed = app.documents.get(doc.id).await.unwrap();
    let details = handed.hand_out.details().unwrap();
    assert_eq!(details.recipient.name, "Eli Martin");
    assert_eq!(details.date, app.today());
    assert_eq!(details.reason, "Audit");

    let err = app.documents.hand_out(doc.id, request).await.unwrap_err();
    assert!(err.is_validation());

    app.documents.check_in(doc.id).await.unwrap();
    let returned = app.documents.get(doc.id).await.unwrap();
    assert!(!returned.hand_out.is_handed_out());
    assert!(returned.hand_out.details().is_none());

    let err = app.documents.check_in(doc.id).await.unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn test_hand_out_requires_reason_and_known_recipient() {
    let app = TestApp::new();
    let doc = app.insert(1, DocumentKind::Institute, "Lease", Retention::Indestructible);

    let blank = HandOutRequest {
        recipient: 2.into(),
        date: app.today(),
        reason: "  ".into(),
    };
    assert!(app.documents.hand_out(doc.id, blank).await.unwrap_err().is_validation());

    let stranger = HandOutRequest {
        recipient: 99.into(),
        date: app.today(),
        reason: "Audit".into(),
    };
    assert!(app.documents.hand_out(doc.id, stranger).await.unwrap_err().is_validation());
    assert!(!app.documents.get(doc.id).await.unwrap().hand_out.is_handed_out());
}

#[tokio::test]
async fn test_destroy_after_destruction_date() {
    let app = TestApp::new();
    let yesterday = app.today().pred_opt().unwrap();
    let doc = app.insert(1, DocumentKind::Institute, "Old", destructible(yesterday));

    app.documents.destroy(doc.id).await.unwrap();
    let err = app.documents.get(doc.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_destroy_rejected_before_date() {
    let app = TestApp::new();
    let tomorrow = app.today().succ_opt().unwrap();
    let due_tomorrow = app.insert(1, DocumentKind::Institute, "Soon", destructible(tomorrow));
    let due_today = app.insert(2, DocumentKind::Institute, "Today", destructible(app.today()));
    let kept = app.insert(3, DocumentKind::Institute, "Forever", Retention::Indestructible);

    for doc in [&due_tomorrow, &due_today, &kept] {
        let err = app.documents.destroy(doc.id).await.unwrap_err();
        assert!(err.is_validation(), "{err}");
        assert_eq!(app.documents.get(doc.id).await.unwrap(), *doc);
    }
    assert_eq!(app.backend.document_count(), 3);
}

#[tokio::test]
async fn test_destroy_missing_document() {
    let app = TestApp::new();
    let err = app.documents.destroy(42.into()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}
