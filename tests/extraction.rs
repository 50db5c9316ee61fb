use redsent::{ascii_only, data_rows, extract_record, record_identifier, EntryFilter, Error, ObjectKind, OutputSink};
use regex::Regex;
use serde_json::json;

#[test]
fn comment_extraction_reads_score_and_body() {
    let raw = json!({ "score": 12, "body": "hello", "permalink": "/r/x/comments/1/t/c1/", "created_utc": 5 });
    let e = extract_record(ObjectKind::Comment, &raw).unwrap();
    assert_eq!(e.score, 12);
    assert_eq!(e.text, "hello");
    assert_eq!(e.identifier, "/r/x/comments/1/t/c1/");
}

/// Fields that are not required never sink a record: a float timestamp, a
/// numeric permalink or url, and a non-string selftext are all tolerated.
#[test]
fn optional_fields_of_any_type_are_tolerated() {
    let float_ts = json!({ "score": 5, "body": "fine text", "permalink": "/p/", "created_utc": 1672531300.0 });
    let e = extract_record(ObjectKind::Comment, &float_ts).unwrap();
    assert_eq!((e.score, e.text.as_str(), e.identifier.as_str()), (5, "fine text", "/p/"));

    let numeric_permalink = json!({ "score": 5, "body": "fine text", "permalink": 123 });
    let e = extract_record(ObjectKind::Comment, &numeric_permalink).unwrap();
    assert_eq!(e.text, "fine text");
    assert_eq!(e.identifier, "123");

    let odd_submission = json!({ "score": 2, "title": "t", "url": 7, "selftext": false, "created_utc": "yesterday" });
    let e = extract_record(ObjectKind::Submission, &odd_submission).unwrap();
    assert_eq!((e.text.as_str(), e.identifier.as_str()), ("t", "7"));
}

/// Missing or mistyped fields are per-record errors carrying an identifier.
#[test]
fn extraction_failures_name_the_record() {
    let no_score = json!({ "body": "hi", "permalink": "/p1/" });
    match extract_record(ObjectKind::Comment, &no_score) {
        Err(Error::RecordExtraction { identifier, reason }) => {
            assert_eq!(identifier, "/p1/");
            assert!(reason.contains("score"));
        }
        other => panic!("unexpected {other:?}"),
    }

    let null_body = json!({ "score": 1, "body": null, "id": "abc" });
    match extract_record(ObjectKind::Comment, &null_body) {
        Err(Error::RecordExtraction { identifier, .. }) => assert_eq!(identifier, "abc"),
        other => panic!("unexpected {other:?}"),
    }

    let wrong_type = json!({ "score": "lots", "title": "t", "url": "https://x/y" });
    match extract_record(ObjectKind::Submission, &wrong_type) {
        Err(Error::RecordExtraction { identifier, .. }) => assert_eq!(identifier, "https://x/y"),
        other => panic!("unexpected {other:?}"),
    }

    let not_an_object = json!(42);
    assert!(matches!(
        extract_record(ObjectKind::Submission, &not_an_object),
        Err(Error::RecordExtraction { .. })
    ));
}

#[test]
fn identifier_falls_back_to_id_then_placeholder() {
    assert_eq!(record_identifier(ObjectKind::Submission, &json!({ "url": "u", "id": "i" })), "u");
    assert_eq!(record_identifier(ObjectKind::Submission, &json!({ "permalink": "p", "id": "i" })), "i");
    assert_eq!(record_identifier(ObjectKind::Comment, &json!({})), "<unidentified>");
}

#[test]
fn data_rows_requires_a_data_list() {
    assert_eq!(data_rows(json!({ "data": [1, 2] }), "2023-01-01").unwrap().len(), 2);
    assert!(data_rows(json!({ "data": [] }), "2023-01-01").unwrap().is_empty());
    for bad in [json!({}), json!({ "data": {} }), json!([1, 2]), json!(null)] {
        assert!(matches!(data_rows(bad, "2023-01-01"), Err(Error::UpstreamFormat { .. })));
    }
}

#[test]
fn ascii_only_drops_non_ascii_in_order() {
    assert_eq!(ascii_only("naïve résumé"), "nave rsum");
    assert_eq!(ascii_only("📈 up\tonly"), " up\tonly");
    assert_eq!(ascii_only("plain ascii 123"), "plain ascii 123");
    assert_eq!(ascii_only("日本語"), "");
}

#[test]
fn sink_layout() {
    let mut sink = OutputSink::from_writer(Vec::new());
    sink.write_day_header("2023-01-01").unwrap();
    sink.write_entry(5, "a").unwrap();
    sink.write_entry(-2, "b\nc").unwrap();
    sink.write_day_trailer().unwrap();
    assert_eq!(sink.entries_written(), 2);
    assert!(sink.path().is_none());
    let out = String::from_utf8(sink.finish().unwrap()).unwrap();
    assert_eq!(out, "DATE: 2023-01-01\n5\na\n----------\n-2\nb\nc\n----------\n\n\n");
}

/// Appending never truncates what is already on disk.
#[test]
fn file_sink_appends() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("log.txt");
    for day in ["2023-01-01", "2023-01-02"] {
        let mut sink = OutputSink::append(&path, 8 * 1024).unwrap();
        sink.write_day_header(day).unwrap();
        sink.write_entry(1, day).unwrap();
        sink.finish().unwrap();
    }
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text, "DATE: 2023-01-01\n1\n2023-01-01\n----------\nDATE: 2023-01-02\n1\n2023-01-02\n----------\n");
}

#[test]
fn entry_filter_predicates() {
    let all = EntryFilter::default();
    assert!(all.is_pass_all());
    assert!(all.matches(-100, "anything"));

    let kw = EntryFilter::default().keywords_any(["  Moon ", "", "moon"]);
    assert_eq!(kw.keywords_any.as_deref(), Some(&["moon".to_string()][..]));
    assert!(kw.matches(0, "To The MOON"));
    assert!(!kw.matches(0, "to mars"));

    let scored = EntryFilter::default().min_score(0).max_score(10);
    assert!(scored.matches(0, ""));
    assert!(scored.matches(10, ""));
    assert!(!scored.matches(-1, ""));
    assert!(!scored.matches(11, ""));

    let re = EntryFilter::default().text_regex(Regex::new(r"\$[A-Z]{2,5}\b").unwrap());
    assert!(re.matches(1, "buying $GME today"));
    assert!(!re.matches(1, "buying gme today"));
}
