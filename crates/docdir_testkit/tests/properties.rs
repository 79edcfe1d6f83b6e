//! Property tests for the store contract.

use docdir_core::ErrorKind;
use docdir_testkit::prelude::*;
use proptest::prelude::*;
use serde_json::Value;
use std::collections::BTreeMap;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn write_then_read_returns_document(
        collection in collection_name_strategy(),
        resource in resource_name_strategy(),
        doc in document_strategy(),
    ) {
        let store = TestStore::fast();
        store.write(&collection, &resource, &doc).unwrap();

        let read: Value = store.read(&collection, &resource).unwrap();
        prop_assert_eq!(read, doc);
    }

    #[test]
    fn last_write_wins(
        resource in resource_name_strategy(),
        first in document_strategy(),
        second in document_strategy(),
    ) {
        let store = TestStore::fast();
        store.write("docs", &resource, &first).unwrap();
        store.write("docs", &resource, &second).unwrap();

        let read: Value = store.read("docs", &resource).unwrap();
        prop_assert_eq!(read, second);
        prop_assert_eq!(store.read_all("docs").unwrap().len(), 1);
    }

    #[test]
    fn read_all_returns_every_document(
        docs in prop::collection::btree_map(resource_name_strategy(), document_strategy(), 1..12),
    ) {
        let store = TestStore::fast();
        for (name, doc) in &docs {
            store.write("docs", name, doc).unwrap();
        }

        let raw = store.read_all("docs").unwrap();
        prop_assert_eq!(raw.len(), docs.len());

        let decoded: BTreeMap<String, Value> = raw
            .iter()
            .map(|r| (r.resource().to_string(), store.decode(r).unwrap()))
            .collect();
        prop_assert_eq!(decoded, docs);
    }

    #[test]
    fn delete_makes_resource_unreadable(
        resource in resource_name_strategy(),
        doc in document_strategy(),
    ) {
        let store = TestStore::fast();
        store.write("docs", &resource, &doc).unwrap();
        store.delete("docs", &resource).unwrap();

        let err = store.read::<Value>("docs", &resource).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn invalid_names_touch_nothing(name in invalid_name_strategy()) {
        let store = TestStore::fast();

        prop_assert_eq!(store.write(&name, "r", &1).unwrap_err().kind(), ErrorKind::Validation);
        prop_assert_eq!(store.write("c", &name, &1).unwrap_err().kind(), ErrorKind::Validation);
        prop_assert_eq!(store.read::<Value>(&name, "r").unwrap_err().kind(), ErrorKind::Validation);
        prop_assert_eq!(store.read_all(&name).unwrap_err().kind(), ErrorKind::Validation);
        prop_assert_eq!(store.delete(&name, "r").unwrap_err().kind(), ErrorKind::Validation);
        prop_assert!(store.collections().unwrap().is_empty());
    }
}
