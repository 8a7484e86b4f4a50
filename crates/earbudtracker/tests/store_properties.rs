//! End-to-end checks of the record store and recency view through the
//! public API.

use std::collections::HashSet;

use earbudtracker::{Record, RecordId, RecordStore, SearchFilter, Status};

fn ids<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<RecordId> {
    records.into_iter().map(Record::id).collect()
}

#[test]
fn test_every_created_id_is_unique() {
    let mut store = RecordStore::new();
    let created: Vec<_> = (0..500)
        .map(|i| store.create(format!("Brand {i}"), "Black", "Desk").id())
        .collect();

    let unique: HashSet<_> = created.iter().copied().collect();
    assert_eq!(unique.len(), created.len());
    assert_eq!(store.len(), created.len());
}

#[test]
fn test_create_then_get_round_trips_fields() {
    let mut store = RecordStore::new();
    let id = store.create("Samsung Buds", "Graphite", "Platform 4").id();

    let record = store.get(id).unwrap();
    assert_eq!(record.status(), Status::Lost);
    assert_eq!(record.brand(), "Samsung Buds");
    assert_eq!(record.color(), "Graphite");
    assert_eq!(record.location(), "Platform 4");
}

#[test]
fn test_mark_found_lifecycle() {
    let mut store = RecordStore::new();
    let id = store.create("Apple", "White", "Bus").id();
    let reported_at = store.get(id).unwrap().reported_at();

    store.mark_found(id).unwrap();
    store.mark_found(id).unwrap();

    let record = store.get(id).unwrap();
    assert_eq!(record.status(), Status::Found);
    assert_eq!(record.reported_at(), reported_at);
}

#[test]
fn test_mark_found_unknown_id() {
    let mut store = RecordStore::new();
    store.create("Apple", "White", "Bus");

    let err = store.mark_found(RecordId::new()).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.stats().lost, 1);
}

#[test]
fn test_unfiltered_search_tracks_lost_set() {
    let mut store = RecordStore::new();
    let a = store.create("Apple", "White", "Bus").id();
    let b = store.create("Sony", "Black", "Library").id();
    store.create_with_status("Bose", "Silver", "Gym", Status::Found);

    let everything = SearchFilter::new("", "");
    assert_eq!(ids(store.search(&everything)), vec![a, b]);

    store.mark_found(a).unwrap();
    assert_eq!(ids(store.search(&everything)), vec![b]);
}

#[test]
fn test_brand_search_is_case_insensitive_substring() {
    let mut store = RecordStore::new();
    let id = store.create("SONY WF-1000", "Black", "Library").id();

    assert_eq!(ids(store.search(&SearchFilter::brand("sony"))), vec![id]);
    assert_eq!(ids(store.search(&SearchFilter::brand("wf-1"))), vec![id]);
    assert!(store.search(&SearchFilter::brand("bose")).is_empty());
}

#[test]
fn test_most_recent_after_six_reports() {
    let mut store = RecordStore::new();
    let r: Vec<_> = (1..=6)
        .map(|i| store.create(format!("R{i}"), "Black", "Desk").id())
        .collect();

    assert_eq!(ids(store.most_recent(5)), vec![r[5], r[4], r[3], r[2], r[1]]);

    store.mark_found(r[5]).unwrap();
    assert_eq!(ids(store.most_recent(5)), vec![r[4], r[3], r[2], r[1], r[0]]);
}

#[test]
fn test_apple_white_scenario() {
    let mut store = RecordStore::new();
    let white1 = store.create("Apple", "White", "Bus").id();
    store.create("Apple", "Black", "Bus");
    let white2 = store.create("Apple", "White", "Bus").id();

    let found: HashSet<_> = ids(store.search(&SearchFilter::new("apple", "white")))
        .into_iter()
        .collect();
    assert_eq!(found, HashSet::from([white1, white2]));
}
