//! `$select`, `$expand` and `$filter` clauses for the documents list.

use chrono::NaiveDate;

use archive_core::config::backend::ContentTypeIds;
use archive_core::types::{FilterExpr, FilterField, FilterOp, FilterValue};
use archive_entity::DocumentCollection;

use super::wire::local_midnight_utc;

/// Columns fetched for every document.
pub(crate) const DOCUMENT_SELECT: &str = "*,\
DocumentType/Id,DocumentType/Title,DocumentType/StorageTime,\
DataController/Id,DataController/Title,\
StorageBuilding/Id,StorageBuilding/Title,\
StorageRoom/Id,StorageRoom/Title,\
StorageRack/Id,StorageRack/Title,\
StorageShelf/Id,StorageShelf/Title,\
StorageFolder/Id,StorageFolder/Title,\
HandedOutTo/Id,HandedOutTo/Title,\
TaxCatchAll/ID,TaxCatchAll/Term";

/// Lookup columns joined onto every document.
pub(crate) const DOCUMENT_EXPAND: &str = "DocumentType,DataController,\
StorageBuilding,StorageRoom,StorageRack,StorageShelf,StorageFolder,\
HandedOutTo,TaxCatchAll";

/// Server-side filter selecting the documents of `collection`.
pub(crate) fn collection_filter(
    collection: DocumentCollection,
    today: NaiveDate,
    content_types: &ContentTypeIds,
) -> FilterExpr {
    let today = FilterValue::DateTime(local_midnight_utc(today));
    match collection {
        DocumentCollection::Institute | DocumentCollection::Customer => {
            let content_type = match collection {
                DocumentCollection::Customer => &content_types.customer,
                _ => &content_types.institute,
            };
            FilterExpr::And(vec![
                FilterField::starts_with("ContentTypeId", content_type.as_str()).into(),
                FilterExpr::Or(vec![
                    FilterField::new("DestructionDate", FilterOp::Ge, today).into(),
                    FilterField::eq("Indestructible", FilterValue::Boolean(true)).into(),
                ]),
            ])
        }
        DocumentCollection::Destructible => {
            FilterField::new("DestructionDate", FilterOp::Lt, today).into()
        }
        DocumentCollection::Retrieved => {
            FilterField::eq("HandedOut", FilterValue::Boolean(true)).into()
        }
    }
}
