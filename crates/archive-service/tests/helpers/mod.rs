//! Shared setup for service integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use archive_cache::CacheManager;
use archive_client::{Backend, MemoryBackend};
use archive_core::clock::FixedClock;
use archive_core::config::cache::CacheConfig;
use archive_core::config::taxonomy::TaxonomyConfig;
use archive_entity::{
    Document, DocumentKind, DocumentType, HandOutStatus, LocationTier, Placement, Retention,
    SensitivityTerm, StorageLocation, User,
};
use archive_service::{DocumentDraft, DocumentService, ReferenceService, ServiceContext, ViewService};

pub const CONFIDENTIAL: Uuid = Uuid::from_u128(0x3f2504e0_4f89_11d3_9a0c_0305e82c3301);
pub const PUBLIC: Uuid = Uuid::from_u128(0x7c9e6679_7425_40de_944b_e07fc1f90ae7);

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Services over a seeded in-memory backend on a fixed date.
pub struct TestApp {
    pub backend: Arc<MemoryBackend>,
    pub ctx: ServiceContext,
    pub documents: DocumentService,
    pub views: ViewService,
    pub reference: ReferenceService,
}

impl TestApp {
    pub const TODAY: (i32, u32, u32) = (2024, 6, 15);

    pub fn new() -> Self {
        let backend = Arc::new(
            MemoryBackend::new()
                .with_document_types([
                    DocumentType::new(1, "Contract", 10),
                    DocumentType::new(2, "Invoice", 5),
                    DocumentType::new(3, "Protocol", 2),
                ])
                .with_users([
                    User::new(1, "Dana Scully"),
                    User::new(2, "Eli Martin"),
                    User::new(3, "Fran Dana"),
                ])
                .with_locations([
                    StorageLocation::new(1, "Main", None, LocationTier::Building),
                    StorageLocation::new(2, "R1", Some(1.into()), LocationTier::Room),
                    StorageLocation::new(3, "Rack A", Some(2.into()), LocationTier::Rack),
                    StorageLocation::new(4, "Annex", None, LocationTier::Building),
                ])
                .with_terms([
                    SensitivityTerm::new(CONFIDENTIAL, "Confidential"),
                    SensitivityTerm::new(PUBLIC, "Public"),
                ]),
        );
        let (y, m, d) = Self::TODAY;
        let ctx = ServiceContext::new(
            Backend::from_shared(backend.clone()),
            CacheManager::new(&CacheConfig::default()),
            Arc::new(FixedClock(date(y, m, d))),
            TaxonomyConfig::default(),
        );
        Self {
            backend,
            documents: DocumentService::new(ctx.clone()),
            views: ViewService::new(ctx.clone()),
            reference: ReferenceService::new(ctx.clone()),
            ctx,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.ctx.today()
    }

    /// A complete draft: an invoice entered 2020-06-01, filed in Main/R1.
    pub async fn draft(&self, kind: DocumentKind) -> DocumentDraft {
        let mut draft = DocumentDraft::new(kind);
        draft.docket = "AZ-100".into();
        draft.description = "Invoice 2020".into();
        draft.sensitivity = Some(CONFIDENTIAL);
        draft.data_controller = Some(1.into());
        if kind == DocumentKind::Customer {
            draft.customer = Some("ACME GmbH".into());
        }
        let invoice = self.reference.document_type(2.into()).await.unwrap();
        draft.set_document_type(Some(invoice));
        draft.set_entry_date(Some(date(2020, 6, 1)));

        let resolver = self.reference.location_resolver().await.unwrap();
        draft.location.select_id(&resolver, 1.into()).unwrap();
        draft.location.select_id(&resolver, 2.into()).unwrap();
        draft
    }

    /// Store a document directly, bypassing validation.
    pub fn insert(&self, id: i64, kind: DocumentKind, description: &str, retention: Retention) -> Document {
        let created = Utc.with_ymd_and_hms(2020, 1, 1, 9, 0, 0).unwrap();
        let document = Document {
            id: id.into(),
            title: String::new(),
            kind,
            customer: (kind == DocumentKind::Customer).then(|| "ACME GmbH".to_string()),
            docket: format!("AZ-{id}"),
            document_type: DocumentType::new(1, "Contract", 10),
            description: description.to_string(),
            data_controller: User::new(1, "Dana Scully"),
            sensitivity: Some(SensitivityTerm::new(PUBLIC, "Public")),
            entry_date: date(2020, 1, 1),
            retention,
            placement: Placement::new(),
            hand_out: HandOutStatus::Available,
            created_at: created,
            modified_at: created,
        };
        self.backend.insert_document(document.clone());
        document
    }
}

pub fn destructible(destruction_date: NaiveDate) -> Retention {
    Retention::Destructible { destruction_date }
}
