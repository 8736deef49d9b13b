//! Integration tests for collection views and the dashboard.

mod helpers;

use archive_core::types::SortDirection;
use archive_entity::{DocumentCollection, DocumentKind, Retention};
use archive_service::document::HandOutRequest;
use archive_service::{ColumnSort, FilterCriteria, SortColumn};

use helpers::{TestApp, date, destructible};

fn ids(docs: &[archive_entity::Document]) -> Vec<i64> {
    docs.iter().map(|d| d.id.get()).collect()
}

async fn seeded() -> TestApp {
    let app = TestApp::new();
    let past = date(2023, 12, 31);
    let future = date(2030, 12, 31);
    app.insert(1, DocumentKind::Institute, "Lease agreement", destructible(future));
    app.insert(2, DocumentKind::Institute, "Invoice 2023", Retention::Indestructible);
    app.insert(3, DocumentKind::Institute, "Minutes", destructible(past));
    app.insert(4, DocumentKind::Customer, "Invoice 2019", destructible(future));
    app.insert(5, DocumentKind::Customer, "Order", destructible(past));
    app.documents
        .hand_out(
            4.into(),
            HandOutRequest {
                recipient: 3.into(),
                date: app.today(),
                reason: "Review".into(),
            },
        )
        .await
        .unwrap();
    app
}

#[tokio::test]
async fn test_collections_partition_by_retention() {
    let app = seeded().await;

    let institute = app.views.load(DocumentCollection::Institute).await.unwrap();
    assert_eq!(ids(institute.documents()), vec![1, 2]);

    let customer = app.views.load(DocumentCollection::Customer).await.unwrap();
    assert_eq!(ids(customer.documents()), vec![4]);

    let destructible = app.views.load(DocumentCollection::Destructible).await.unwrap();
    assert_eq!(ids(destructible.documents()), vec![3, 5]);

    let retrieved = app.views.load(DocumentCollection::Retrieved).await.unwrap();
    assert_eq!(ids(retrieved.documents()), vec![4]);
}

#[tokio::test]
async fn test_empty_collection_is_informational() {
    let app = TestApp::new();
    let view = app.views.load(DocumentCollection::Retrieved).await.unwrap();
    assert!(view.visible().is_empty());
    assert_eq!(view.message(), Some("There are no retrieved documents"));
}

#[tokio::test]
async fn test_dashboard_counts() {
    let app = seeded().await;
    let dashboard = app.views.dashboard().await.unwrap();
    assert_eq!(dashboard.destructible, 2);
    assert_eq!(dashboard.handed_out, 1);
}

#[tokio::test]
async fn test_filter_by_content() {
    let app = seeded().await;
    let mut view = app.views.load(DocumentCollection::Institute).await.unwrap();
    view.set_criteria(FilterCriteria::new().with_content("Invoice"));
    assert_eq!(ids(view.visible()), vec![2]);

    view.set_criteria(FilterCriteria::default());
    assert_eq!(ids(view.visible()), vec![1, 2]);
}

#[tokio::test]
async fn test_destructible_date_filter_and_sort() {
    let app = seeded().await;
    let mut view = app.views.load(DocumentCollection::Destructible).await.unwrap();

    view.set_criteria(FilterCriteria::new().with_date(date(2023, 12, 31)));
    assert_eq!(ids(view.visible()), vec![3, 5]);

    view.set_sort(ColumnSort::new(SortColumn::Content, SortDirection::Desc));
    assert_eq!(ids(view.visible()), vec![5, 3]);

    view.set_criteria(FilterCriteria::new().with_date(date(2020, 1, 1)));
    assert!(view.visible().is_empty());
}

#[tokio::test]
async fn test_customer_filter_and_suggestions() {
    let app = seeded().await;
    let mut view = app.views.load(DocumentCollection::Customer).await.unwrap();
    assert_eq!(view.customer_suggestions("acme"), ["ACME GmbH"]);

    view.set_criteria(FilterCriteria::new().with_customer("initech"));
    assert!(view.visible().is_empty());
    view.set_criteria(FilterCriteria::new().with_customer("gmbh"));
    assert_eq!(ids(view.visible()), vec![4]);
}
