//! JSON shapes of the list API and their mapping onto entities.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use archive_core::config::backend::{ContentTypeIds, TierLabels};
use archive_entity::{
    Document, DocumentFields, DocumentKind, DocumentType, HandOut, HandOutStatus, LocationRef,
    LocationTier, Placement, Retention, SensitivityTerm, StorageLocation, User,
};

/// A page of results.
#[derive(Debug, Deserialize)]
pub(crate) struct ODataPage<T> {
    pub value: Vec<T>,
    #[serde(default, rename = "odata.nextLink", alias = "@odata.nextLink")]
    pub next_link: Option<String>,
}

/// An expanded lookup column (`Field/Id`, `Field/Title`).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct Lookup {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
}

impl Lookup {
    fn into_user(self) -> Option<User> {
        Some(User::new(self.id?, self.title.unwrap_or_default()))
    }

    fn into_location(self) -> Option<LocationRef> {
        Some(LocationRef {
            id: self.id?.into(),
            title: self.title.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct DocumentTypeLookup {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub storage_time: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct TaxCatchAllEntry {
    #[serde(default)]
    pub term: Option<String>,
}

/// Value of a managed metadata column.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct TaxonomyValue {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub term_guid: Option<String>,
}

/// An item of the documents list with its lookups expanded.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct DocumentItem {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content_type_id: String,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub docket: Option<String>,
    #[serde(default)]
    pub document_type_id: Option<i64>,
    #[serde(default)]
    pub document_type: Option<DocumentTypeLookup>,
    #[serde(default)]
    pub document_description: Option<String>,
    #[serde(default)]
    pub data_controller: Option<Lookup>,
    #[serde(default)]
    pub entry_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub destruction_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub indestructible: Option<bool>,
    #[serde(default)]
    pub storage_building: Option<Lookup>,
    #[serde(default)]
    pub storage_room: Option<Lookup>,
    #[serde(default)]
    pub storage_rack: Option<Lookup>,
    #[serde(default)]
    pub storage_shelf: Option<Lookup>,
    #[serde(default)]
    pub storage_folder: Option<Lookup>,
    #[serde(default)]
    pub handed_out: Option<bool>,
    #[serde(default)]
    pub handed_out_to: Option<Lookup>,
    #[serde(default)]
    pub handed_out_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub handed_out_reason: Option<String>,
    #[serde(default)]
    pub tax_catch_all: Option<Vec<TaxCatchAllEntry>>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    /// Remaining columns, including the managed metadata column whose
    /// name is configurable.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Site-specific names needed to interpret a document item.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DocumentMapping<'a> {
    pub content_types: &'a ContentTypeIds,
    pub sensitivity_field: &'a str,
}

impl DocumentItem {
    /// Map the item onto a [`Document`], or explain why it is malformed.
    pub fn into_document(self, mapping: DocumentMapping<'_>) -> Result<Document, String> {
        let kind = kind_of(&self.content_type_id, mapping.content_types)
            .ok_or_else(|| format!("unknown content type '{}'", self.content_type_id))?;

        let lookup = self.document_type.unwrap_or_default();
        let type_id = lookup
            .id
            .or(self.document_type_id)
            .ok_or("missing document type")?;
        let document_type = DocumentType::new(
            type_id,
            lookup.title.unwrap_or_default(),
            storage_years(lookup.storage_time),
        );

        let data_controller = self
            .data_controller
            .and_then(Lookup::into_user)
            .ok_or("missing data controller")?;

        let entry_date = self
            .entry_date
            .map(to_local_date)
            .ok_or("missing entry date")?;

        let retention = Retention::from_parts(
            self.destruction_date.map(to_local_date),
            self.indestructible.unwrap_or(false),
        )
        .ok_or("neither a destruction date nor indestructible")?;

        let mut placement = Placement::new();
        let slots = [
            (LocationTier::Building, self.storage_building),
            (LocationTier::Room, self.storage_room),
            (LocationTier::Rack, self.storage_rack),
            (LocationTier::Shelf, self.storage_shelf),
            (LocationTier::Folder, self.storage_folder),
        ];
        for (tier, lookup) in slots {
            placement.set(tier, lookup.and_then(Lookup::into_location));
        }

        let hand_out = if self.handed_out.unwrap_or(false) {
            let recipient = self
                .handed_out_to
                .and_then(Lookup::into_user)
                .ok_or("handed out without a recipient")?;
            HandOutStatus::HandedOut(HandOut {
                recipient,
                date: self
                    .handed_out_at
                    .map(to_local_date)
                    .unwrap_or_else(|| to_local_date(self.modified)),
                reason: self.handed_out_reason.unwrap_or_default(),
            })
        } else {
            HandOutStatus::Available
        };

        let label = self
            .tax_catch_all
            .as_ref()
            .and_then(|entries| entries.iter().find_map(|e| e.term.clone()));
        let sensitivity = self
            .extra
            .get(mapping.sensitivity_field)
            .and_then(|value| serde_json::from_value::<TaxonomyValue>(value.clone()).ok())
            .and_then(|value| {
                let id = Uuid::parse_str(value.term_guid.as_deref()?).ok()?;
                Some(SensitivityTerm::new(id, label.or(value.label)?))
            });

        Ok(Document {
            id: self.id.into(),
            title: self.title.unwrap_or_default(),
            kind,
            customer: match kind {
                DocumentKind::Customer => self.customer,
                DocumentKind::Institute => None,
            },
            docket: self.docket.unwrap_or_default(),
            document_type,
            description: self.document_description.unwrap_or_default(),
            data_controller,
            sensitivity,
            entry_date,
            retention,
            placement,
            hand_out,
            created_at: self.created,
            modified_at: self.modified,
        })
    }
}

/// Response of an item creation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct CreatedItem {
    pub id: i64,
}

/// Body written on create and update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct DocumentPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type_id: Option<String>,
    pub customer: Option<String>,
    pub docket: String,
    pub document_type_id: i64,
    pub document_description: String,
    pub data_controller_id: i64,
    pub entry_date: DateTime<Utc>,
    pub destruction_date: Option<DateTime<Utc>>,
    pub indestructible: bool,
    pub storage_building_id: Option<i64>,
    pub storage_room_id: Option<i64>,
    pub storage_rack_id: Option<i64>,
    pub storage_shelf_id: Option<i64>,
    pub storage_folder_id: Option<i64>,
}

impl DocumentPayload {
    /// Build the body; `content_type_id` is only sent when adding.
    pub fn new(fields: &DocumentFields, content_type_id: Option<String>) -> Self {
        let [building, room, rack, shelf, folder] = fields.placement.map(|id| id.map(|id| id.get()));
        Self {
            content_type_id,
            customer: match fields.kind {
                DocumentKind::Customer => fields.customer.clone(),
                DocumentKind::Institute => None,
            },
            docket: fields.docket.clone(),
            document_type_id: fields.document_type_id.get(),
            document_description: fields.description.clone(),
            data_controller_id: fields.data_controller_id.get(),
            entry_date: local_midnight_utc(fields.entry_date),
            destruction_date: fields.retention.destruction_date().map(local_midnight_utc),
            indestructible: fields.retention.is_indestructible(),
            storage_building_id: building,
            storage_room_id: room,
            storage_rack_id: rack,
            storage_shelf_id: shelf,
            storage_folder_id: folder,
        }
    }
}

/// Body written by hand-out and check-in. Check-in clears every column.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct HandOutPayload {
    pub handed_out: bool,
    pub handed_out_at: Option<DateTime<Utc>>,
    pub handed_out_to_id: Option<i64>,
    pub handed_out_reason: Option<String>,
}

impl From<&HandOutStatus> for HandOutPayload {
    fn from(status: &HandOutStatus) -> Self {
        match status {
            HandOutStatus::Available => Self {
                handed_out: false,
                handed_out_at: None,
                handed_out_to_id: None,
                handed_out_reason: None,
            },
            HandOutStatus::HandedOut(h) => Self {
                handed_out: true,
                handed_out_at: Some(local_midnight_utc(h.date)),
                handed_out_to_id: Some(h.recipient.id.get()),
                handed_out_reason: Some(h.reason.clone()),
            },
        }
    }
}

/// Body attaching a term to a managed metadata column.
pub(crate) fn sensitivity_payload(field: &str, term: &SensitivityTerm) -> Value {
    let mut body = Map::new();
    body.insert(
        field.to_string(),
        serde_json::json!({
            "Label": term.label,
            "TermGuid": term.id.to_string(),
            "WssId": -1,
        }),
    );
    Value::Object(body)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct DocumentTypeItem {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub storage_time: Option<f64>,
}

impl From<DocumentTypeItem> for DocumentType {
    fn from(item: DocumentTypeItem) -> Self {
        DocumentType::new(
            item.id,
            item.title.unwrap_or_default(),
            storage_years(item.storage_time),
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct LocationItem {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub storage_group: Option<String>,
    #[serde(default)]
    pub storage_parent_id: Option<i64>,
}

impl LocationItem {
    pub fn into_location(self, labels: &TierLabels) -> Result<StorageLocation, String> {
        let group = self.storage_group.unwrap_or_default();
        let tier = tier_of(&group, labels).ok_or_else(|| format!("unknown storage group '{group}'"))?;
        Ok(StorageLocation::new(
            self.id,
            self.title.unwrap_or_default(),
            self.storage_parent_id.map(Into::into),
            tier,
        ))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct UserItem {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
}

impl From<UserItem> for User {
    fn from(item: UserItem) -> Self {
        User::new(item.id, item.title.unwrap_or_default())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TermGroupItem {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LocalizedName {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TermSetItem {
    pub id: String,
    #[serde(default)]
    pub localized_names: Vec<LocalizedName>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TermLabel {
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TermItem {
    pub id: String,
    #[serde(default)]
    pub labels: Vec<TermLabel>,
}

impl TermItem {
    pub fn into_term(self) -> Result<SensitivityTerm, String> {
        let id = Uuid::parse_str(&self.id).map_err(|e| format!("invalid term id '{}': {e}", self.id))?;
        let label = self
            .labels
            .iter()
            .find(|l| l.is_default)
            .or_else(|| self.labels.first())
            .map(|l| l.name.clone())
            .ok_or("term has no label")?;
        Ok(SensitivityTerm::new(id, label))
    }
}

fn kind_of(content_type_id: &str, ids: &ContentTypeIds) -> Option<DocumentKind> {
    if content_type_id.starts_with(&ids.customer) {
        Some(DocumentKind::Customer)
    } else if content_type_id.starts_with(&ids.institute) {
        Some(DocumentKind::Institute)
    } else {
        None
    }
}

fn tier_of(group: &str, labels: &TierLabels) -> Option<LocationTier> {
    [
        (&labels.building, LocationTier::Building),
        (&labels.room, LocationTier::Room),
        (&labels.rack, LocationTier::Rack),
        (&labels.shelf, LocationTier::Shelf),
        (&labels.folder, LocationTier::Folder),
    ]
    .into_iter()
    .find(|(label, _)| label.as_str() == group)
    .map(|(_, tier)| tier)
}

fn storage_years(raw: Option<f64>) -> u32 {
    raw.filter(|y| y.is_finite() && *y > 0.0)
        .map(|y| y.round() as u32)
        .unwrap_or(0)
}

/// Date columns hold local midnight expressed in UTC.
pub(crate) fn to_local_date(value: DateTime<Utc>) -> NaiveDate {
    value.with_timezone(&Local).date_naive()
}

/// Inverse of [`to_local_date`].
pub(crate) fn local_midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}
