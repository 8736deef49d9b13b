//! Document fixtures shared by unit tests.

use chrono::{NaiveDate, TimeZone, Utc};

use archive_entity::{
    Document, DocumentKind, DocumentType, HandOutStatus, LocationRef, LocationTier, Placement,
    Retention, User,
};

pub(crate) fn document(id: i64, description: &str, type_title: &str) -> Document {
    let created = Utc.with_ymd_and_hms(2020, 1, 1, 9, 0, 0).unwrap();
    Document {
        id: id.into(),
        title: String::new(),
        kind: DocumentKind::Institute,
        customer: None,
        docket: format!("AZ-{id}"),
        document_type: DocumentType::new(1, type_title, 10),
        description: description.to_string(),
        data_controller: User::new(1, "Dana"),
        sensitivity: None,
        entry_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        retention: Retention::Indestructible,
        placement: Placement::new(),
        hand_out: HandOutStatus::Available,
        created_at: created,
        modified_at: created,
    }
}

/// `n` documents with ascending ids, cycling through descriptions, types
/// and rooms.
pub(crate) fn documents(n: usize) -> Vec<Document> {
    const DESCRIPTIONS: [&str; 3] = ["Lease 2021", "Invoice 2023", "Minutes"];
    const TYPES: [&str; 3] = ["Contract", "Invoice", "Protocol"];
    const ROOMS: [&str; 2] = ["R1", "R2"];

    (0..n)
        .map(|i| {
            let mut doc = document(i as i64 + 1, DESCRIPTIONS[i % 3], TYPES[(i / 2) % 3]);
            doc.placement = Placement::new()
                .with(
                    LocationTier::Building,
                    LocationRef { id: 1.into(), title: "Main".into() },
                )
                .with(
                    LocationTier::Room,
                    LocationRef {
                        id: (i as i64 % 2 + 2).into(),
                        title: ROOMS[i % 2].into(),
                    },
                );
            doc.entry_date = NaiveDate::from_ymd_opt(2020, 1, 1 + (i % 28) as u32).unwrap();
            doc
        })
        .collect()
}
