use chrono::{NaiveDate, TimeZone, Utc};
use rtimesheet::core::multipart::{MultipartPayload, Part};
use rtimesheet::core::payload::{PayloadBuilder, PayloadKind, format_hours};
use rtimesheet::core::store::DayRecordStore;
use rtimesheet::models::attachment::ImageAttachment;
use rtimesheet::models::field::DayField;
use rtimesheet::models::lunch::LunchBreak;
use rtimesheet::models::time_slot::TimeSlot;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn slot(s: &str) -> TimeSlot {
    TimeSlot::parse(s).unwrap()
}

fn builder() -> PayloadBuilder {
    PayloadBuilder::new(Utc.timestamp_millis_opt(1_715_342_400_000).unwrap())
}

fn full_day(store: &mut DayRecordStore, date: NaiveDate, hours: f64) {
    store.set_field(date, DayField::TimeIn(slot("9:00 AM")));
    store.set_field(date, DayField::TimeOut(slot("5:00 PM")));
    store.set_field(date, DayField::Lunch(LunchBreak::Half));
    store.set_field(date, DayField::TotalHours(hours));
}

fn text_parts(payload: &MultipartPayload) -> Vec<(String, String)> {
    payload
        .parts()
        .iter()
        .filter_map(|p| match p {
            Part::Text { name, value } => Some((name.clone(), value.clone())),
            Part::File { .. } => None,
        })
        .collect()
}

#[test]
fn test_draft_payload_fields_in_wire_order() {
    let mut store = DayRecordStore::new();
    full_day(&mut store, d("2024-05-03"), 7.5);

    let payload = builder().draft(&store.get(d("2024-05-03")), None);

    let expected: Vec<(String, String)> = [
        ("[2024-05-03][time_in]", "9:00 AM"),
        ("[2024-05-03][time_out]", "5:00 PM"),
        ("[2024-05-03][lunch_timeout]", "30"),
        ("[2024-05-03][total_hours]", "7.5"),
        ("date", "2024-05-03"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    assert_eq!(text_parts(&payload), expected);
    assert!(payload.file_part().is_none());
}

#[test]
fn test_draft_lunch_defaults_to_zero() {
    let mut store = DayRecordStore::new();
    let day = d("2024-05-03");
    store.set_field(day, DayField::TimeIn(slot("8:00 AM")));
    store.set_field(day, DayField::TimeOut(slot("4:00 PM")));
    store.set_field(day, DayField::TotalHours(8.0));

    let payload = builder().draft(&store.get(day), None);

    assert_eq!(payload.text_value("[2024-05-03][lunch_timeout]"), Some("0"));
    assert_eq!(payload.text_value("[2024-05-03][total_hours]"), Some("8"));
}

#[test]
fn test_image_fallback_name_and_type() {
    let mut store = DayRecordStore::new();
    full_day(&mut store, d("2024-05-03"), 7.5);
    let image = ImageAttachment::new("file:///tmp/photo");

    let draft = builder().draft(&store.get(d("2024-05-03")), Some(&image));
    match draft.file_part() {
        Some(Part::File {
            name,
            file_name,
            content_type,
            uri,
        }) => {
            assert_eq!(name, "image_file");
            assert_eq!(file_name, "draft_1715342400000.jpg");
            assert_eq!(content_type, "image/jpeg");
            assert_eq!(uri, "file:///tmp/photo");
        }
        other => panic!("expected a file part, got {:?}", other),
    }

    let submit = builder().submit(&store, d("2024-05-03"), Some(&image));
    match submit.file_part() {
        Some(Part::File { file_name, .. }) => assert_eq!(file_name, "upload_1715342400000.jpg"),
        other => panic!("expected a file part, got {:?}", other),
    }
}

#[test]
fn test_image_metadata_is_kept_when_present() {
    let mut store = DayRecordStore::new();
    full_day(&mut store, d("2024-05-03"), 7.5);
    let image = ImageAttachment::new("content://media/42")
        .with_file_name("sheet.png")
        .with_mime_type("image/png");

    let payload = builder().submit(&store, d("2024-05-03"), Some(&image));

    match payload.file_part() {
        Some(Part::File {
            file_name,
            content_type,
            ..
        }) => {
            assert_eq!(file_name, "sheet.png");
            assert_eq!(content_type, "image/png");
        }
        other => panic!("expected a file part, got {:?}", other),
    }
}

#[test]
fn test_submit_payload_has_one_field_set_per_date_and_one_date_literal() {
    let mut store = DayRecordStore::new();
    full_day(&mut store, d("2024-05-01"), 7.5);
    full_day(&mut store, d("2024-05-02"), 8.0);

    let payload = builder().submit(&store, d("2024-05-03"), None);

    for day in ["2024-05-01", "2024-05-02"] {
        assert_eq!(
            payload.text_value(&format!("[{}][time_in]", day)),
            Some("9:00 AM")
        );
        assert_eq!(
            payload.text_value(&format!("[{}][time_out]", day)),
            Some("5:00 PM")
        );
        assert_eq!(
            payload.text_value(&format!("[{}][lunch_timeout]", day)),
            Some("30")
        );
    }
    assert_eq!(payload.text_value("[2024-05-01][total_hours]"), Some("7.5"));
    assert_eq!(payload.text_value("[2024-05-02][total_hours]"), Some("8"));

    assert_eq!(payload.text_values("date"), vec!["2024-05-03"]);
    assert_eq!(payload.parts().len(), 9);
}

#[test]
fn test_submit_rows_leave_out_unset_fields() {
    let mut store = DayRecordStore::new();
    store.set_field(d("2024-05-01"), DayField::TotalHours(4.0));

    let payload = builder().submit(&store, d("2024-05-01"), None);

    assert_eq!(
        text_parts(&payload),
        vec![
            ("[2024-05-01][lunch_timeout]".to_string(), "0".to_string()),
            ("[2024-05-01][total_hours]".to_string(), "4".to_string()),
            ("date".to_string(), "2024-05-01".to_string()),
        ]
    );
}

#[test]
fn test_submit_with_only_image() {
    let store = DayRecordStore::new();
    let image = ImageAttachment::new("file:///tmp/a.jpg");

    let payload = builder().submit(&store, d("2024-05-03"), Some(&image));

    assert_eq!(payload.text_values("date"), vec!["2024-05-03"]);
    assert!(payload.file_part().is_some());
    assert_eq!(payload.parts().len(), 2);
}

#[test]
fn test_fallback_file_name_prefix() {
    let b = builder();
    assert_eq!(
        b.fallback_file_name(PayloadKind::Draft),
        "draft_1715342400000.jpg"
    );
    assert_eq!(
        b.fallback_file_name(PayloadKind::Submit),
        "upload_1715342400000.jpg"
    );
}

#[test]
fn test_hours_formatting() {
    assert_eq!(format_hours(8.0), "8");
    assert_eq!(format_hours(7.5), "7.5");
    assert_eq!(format_hours(7.25), "7.25");
    assert_eq!(format_hours(0.0), "0");
}

#[test]
fn test_encoded_body_is_bit_exact() {
    let mut payload = MultipartPayload::new();
    payload
        .text("[2024-05-03][time_in]", "9:00 AM")
        .text("date", "2024-05-03")
        .file("image_file", "a.jpg", "image/jpeg", "mem://a");

    let body = payload
        .encode("XyZ", |uri| {
            assert_eq!(uri, "mem://a");
            Ok(b"JPEG".to_vec())
        })
        .unwrap();

    let expected = concat!(
        "--XyZ\r\n",
        "Content-Disposition: form-data; name=\"[2024-05-03][time_in]\"\r\n",
        "\r\n",
        "9:00 AM\r\n",
        "--XyZ\r\n",
        "Content-Disposition: form-data; name=\"date\"\r\n",
        "\r\n",
        "2024-05-03\r\n",
        "--XyZ\r\n",
        "Content-Disposition: form-data; name=\"image_file\"; filename=\"a.jpg\"\r\n",
        "Content-Type: image/jpeg\r\n",
        "\r\n",
        "JPEG\r\n",
        "--XyZ--\r\n",
    );
    assert_eq!(&body[..], expected.as_bytes());
    assert_eq!(
        MultipartPayload::content_type("XyZ"),
        "multipart/form-data; boundary=XyZ"
    );
}

#[test]
fn test_fresh_boundaries_differ() {
    let mut payload = MultipartPayload::new();
    payload.text("date", "2024-05-03");

    let (ct1, _) = payload.encode_fresh(|_| Ok(Vec::new())).unwrap();
    let (ct2, _) = payload.encode_fresh(|_| Ok(Vec::new())).unwrap();
    assert_ne!(ct1, ct2);
    assert!(ct1.starts_with("multipart/form-data; boundary="));
}
