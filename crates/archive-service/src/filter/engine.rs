//! Predicate application over a loaded document set.

use archive_entity::{Document, DocumentCollection};

use super::criteria::{FilterCriteria, Predicate};

/// Documents of `documents` passing every active criterion, in input order.
pub fn filter_documents(
    documents: &[Document],
    criteria: &FilterCriteria,
    collection: DocumentCollection,
) -> Vec<Document> {
    apply_predicates(documents, &criteria.predicates(collection), collection)
}

/// Documents passing all of `predicates`, in input order. With no
/// predicates the input is returned unchanged.
pub fn apply_predicates(
    documents: &[Document],
    predicates: &[Predicate],
    collection: DocumentCollection,
) -> Vec<Document> {
    documents
        .iter()
        .filter(|d| predicates.iter().all(|p| p.matches(d, collection)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::LocationFilter;
    use crate::test_support::{document, documents};
    use archive_entity::{LocationTier, Retention};
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn ids(docs: &[Document]) -> Vec<i64> {
        docs.iter().map(|d| d.id.get()).collect()
    }

    #[test]
    fn test_content_example() {
        let docs = vec![
            document(1, "Lease agreement", "Contract"),
            document(2, "Invoice 2023", "Invoice"),
            document(3, "Minutes", "Protocol"),
        ];
        let criteria = FilterCriteria::new().with_content("Invoice");
        assert_eq!(
            ids(&filter_documents(&docs, &criteria, DocumentCollection::Institute)),
            vec![2]
        );
    }

    #[test]
    fn test_content_is_case_sensitive() {
        let docs = vec![document(1, "Invoice 2023", "Invoice")];
        let criteria = FilterCriteria::new().with_content("invoice");
        assert!(filter_documents(&docs, &criteria, DocumentCollection::Institute).is_empty());
    }

    #[test]
    fn test_customer_is_case_insensitive() {
        let mut doc = document(1, "Lease", "Contract");
        doc.customer = Some("ACME GmbH".into());
        let criteria = FilterCriteria::new().with_customer("acme");
        assert_eq!(
            filter_documents(&[doc], &criteria, DocumentCollection::Customer).len(),
            1
        );
    }

    #[test]
    fn test_date_column_depends_on_collection() {
        let mut doc = document(1, "Lease", "Contract");
        doc.entry_date = NaiveDate::from_ymd_opt(2020, 1, 10).unwrap();
        doc.retention = Retention::Destructible {
            destruction_date: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
        };
        let docs = [doc];

        let by_entry = FilterCriteria::new().with_date(NaiveDate::from_ymd_opt(2020, 1, 10).unwrap());
        assert_eq!(filter_documents(&docs, &by_entry, DocumentCollection::Institute).len(), 1);
        assert!(filter_documents(&docs, &by_entry, DocumentCollection::Destructible).is_empty());

        let by_destruction =
            FilterCriteria::new().with_date(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        assert_eq!(
            filter_documents(&docs, &by_destruction, DocumentCollection::Destructible).len(),
            1
        );
    }

    #[test]
    fn test_location_filter_uses_tier() {
        let docs = documents(6);
        let criteria =
            FilterCriteria::new().with_location(LocationFilter::new(LocationTier::Room, "R1"));
        let filtered = filter_documents(&docs, &criteria, DocumentCollection::Institute);
        assert!(!filtered.is_empty());
        assert!(filtered.iter().all(|d| d.placement.title(LocationTier::Room) == "R1"));

        let wrong_tier =
            FilterCriteria::new().with_location(LocationFilter::new(LocationTier::Rack, "R1"));
        assert!(filter_documents(&docs, &wrong_tier, DocumentCollection::Institute).is_empty());
    }

    fn arb_predicate() -> impl Strategy<Value = Predicate> {
        prop_oneof![
            prop::sample::select(vec!["Lease", "Invoice", "202", "x"])
                .prop_map(|s| Predicate::Content(s.to_string())),
            prop::collection::btree_set(
                prop::sample::select(vec!["Contract", "Invoice", "Protocol"])
                    .prop_map(str::to_string),
                1..3
            )
            .prop_map(Predicate::Types),
            prop::sample::select(vec!["R1", "R2"]).prop_map(|t| Predicate::Location(
                LocationFilter::new(LocationTier::Room, t)
            )),
        ]
    }

    proptest! {
        #[test]
        fn prop_no_predicates_is_identity(n in 0usize..12) {
            let docs = documents(n);
            let out = apply_predicates(&docs, &[], DocumentCollection::Institute);
            prop_assert_eq!(out, docs);
        }

        #[test]
        fn prop_predicate_order_is_irrelevant(
            n in 0usize..12,
            a in arb_predicate(),
            b in arb_predicate(),
        ) {
            let docs = documents(n);
            let c = DocumentCollection::Institute;
            let ab = apply_predicates(&apply_predicates(&docs, &[a.clone()], c), &[b.clone()], c);
            let ba = apply_predicates(&apply_predicates(&docs, &[b.clone()], c), &[a.clone()], c);
            let both = apply_predicates(&docs, &[a, b], c);
            prop_assert_eq!(&ab, &ba);
            prop_assert_eq!(ab, both);
        }

        #[test]
        fn prop_filter_preserves_order(n in 0usize..12, p in arb_predicate()) {
            let docs = documents(n);
            let out = ids(&apply_predicates(&docs, &[p], DocumentCollection::Institute));
            let mut sorted = out.clone();
            sorted.sort();
            prop_assert_eq!(out, sorted);
        }
    }
}
