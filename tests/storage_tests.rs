mod common;

use common::{closed, date, fixture, open};
use sponsor_ledger::errors::StorageError;
use sponsor_ledger::ledger::RefundEvidence;
use sponsor_ledger::storage::{
    load_document_from_path, save_document_to_path, JsonFileSource, SponsorshipDocument,
    SponsorshipSource,
};
use tempfile::tempdir;

#[test]
fn saved_document_loads_back_as_the_same_history() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("records.json");
    let document = SponsorshipDocument {
        records: vec![
            closed("alice", 500, "2021-01-05", "2021-04-01"),
            open("bob", 1200, "2021-02-11"),
        ],
        refunds: vec![RefundEvidence {
            sponsee_id: "bob".into(),
            refunded_on: date(2021, 3, 2),
            amount_cents: 1200,
        }],
        ..SponsorshipDocument::default()
    };

    save_document_to_path(&document, &path).unwrap();
    assert!(!path.with_extension("json.tmp").exists());
    assert_eq!(load_document_from_path(&path).unwrap(), document);

    let history = JsonFileSource::new(&path).load_history().unwrap();
    assert_eq!(history.records, document.records);
    assert_eq!(history.refunds, document.refunds);
}

#[test]
fn open_sponsorships_omit_the_end_date() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("records.json");
    let document = SponsorshipDocument {
        records: vec![open("bob", 1200, "2021-02-11")],
        ..SponsorshipDocument::default()
    };
    save_document_to_path(&document, &path).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"started_on\": \"2021-02-11\""));
    assert!(!raw.contains("ended_on"));
    assert!(!raw.contains("activities"));
}

#[test]
fn records_and_activities_combine() {
    let (_dir, path) = fixture(
        "mixed.json",
        r#"{
            "records": [
                { "sponsee_id": "legacy", "monthly_amount_cents": 300, "started_on": "2020-05-01", "ended_on": "2020-09-01" }
            ],
            "activities": [
                {
                    "action": "NEW_SPONSORSHIP",
                    "timestamp": "2021-01-07T00:00:00Z",
                    "sponsorable": { "login": "octo" },
                    "sponsorsTier": { "monthlyPriceInCents": 400 }
                }
            ]
        }"#,
    );
    let history = JsonFileSource::new(&path).load_history().unwrap();
    assert_eq!(
        history.records,
        vec![
            open("octo", 400, "2021-01-07"),
            closed("legacy", 300, "2020-05-01", "2020-09-01"),
        ]
    );
}

#[test]
fn describe_names_the_file() {
    let source = JsonFileSource::new("/tmp/sponsorships.json");
    assert_eq!(source.describe(), "/tmp/sponsorships.json");
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let source = JsonFileSource::new(dir.path().join("absent.json"));
    assert!(matches!(source.load_history(), Err(StorageError::Io(_))));
}

#[test]
fn malformed_json_is_a_serde_error() {
    let (_dir, path) = fixture("broken.json", "{ \"records\": [");
    assert!(matches!(
        JsonFileSource::new(&path).load_history(),
        Err(StorageError::Serde(_))
    ));
}

#[test]
fn inconsistent_activity_log_is_reported() {
    let (_dir, path) = fixture(
        "cancel.json",
        r#"{ "nodes": [
            {
                "action": "CANCELLED_SPONSORSHIP",
                "timestamp": "2021-01-07T00:00:00Z",
                "sponsorable": { "login": "octo" }
            }
        ] }"#,
    );
    assert!(matches!(
        JsonFileSource::new(&path).load_history(),
        Err(StorageError::Activity(_))
    ));
}
