use super::multipart::MultipartPayload;
use super::store::DayRecordStore;
use crate::models::attachment::ImageAttachment;
use crate::models::day_entry::DayEntry;
use chrono::{DateTime, NaiveDate, Utc};

pub const IMAGE_FIELD: &str = "image_file";
pub const DEFAULT_IMAGE_TYPE: &str = "image/jpeg";

/// Which call the payload is meant for. Only affects the fallback image name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Draft,
    Submit,
}

impl PayloadKind {
    fn file_prefix(&self) -> &'static str {
        match self {
            PayloadKind::Draft => "draft",
            PayloadKind::Submit => "upload",
        }
    }
}

/// Turns staged day entries into the multipart body the backend expects.
///
/// Field names use the bracket notation `[YYYY-MM-DD][field]`. `now` only
/// feeds the fallback image name (`draft_<millis>.jpg` / `upload_<millis>.jpg`).
pub struct PayloadBuilder {
    now: DateTime<Utc>,
}

impl PayloadBuilder {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Single-day payload for a draft save. All four fields are always sent,
    /// the lunch break defaulting to 0.
    pub fn draft(&self, entry: &DayEntry, image: Option<&ImageAttachment>) -> MultipartPayload {
        let mut payload = MultipartPayload::new();
        let key = entry.date_str();

        payload
            .text(
                field_name(&key, "time_in"),
                entry.time_in.map(|t| t.label()).unwrap_or_default(),
            )
            .text(
                field_name(&key, "time_out"),
                entry.time_out.map(|t| t.label()).unwrap_or_default(),
            )
            .text(
                field_name(&key, "lunch_timeout"),
                entry.lunch.minutes().to_string(),
            )
            .text(
                field_name(&key, "total_hours"),
                entry.total_hours.map(format_hours).unwrap_or_default(),
            )
            .text("date", key);

        self.attach(&mut payload, image, PayloadKind::Draft);
        payload
    }

    /// Batch payload for a submit: one field set per staged date and a single
    /// `date` value set to the cursor date.
    ///
    /// Fields that were never set are left out of the row instead of being
    /// sent empty.
    pub fn submit(
        &self,
        days: &DayRecordStore,
        cursor: NaiveDate,
        image: Option<&ImageAttachment>,
    ) -> MultipartPayload {
        let mut payload = MultipartPayload::new();

        for entry in days.entries() {
            let key = entry.date_str();
            if let Some(t) = entry.time_in {
                payload.text(field_name(&key, "time_in"), t.label());
            }
            if let Some(t) = entry.time_out {
                payload.text(field_name(&key, "time_out"), t.label());
            }
            payload.text(
                field_name(&key, "lunch_timeout"),
                entry.lunch.minutes().to_string(),
            );
            if let Some(h) = entry.total_hours {
                payload.text(field_name(&key, "total_hours"), format_hours(h));
            }
        }

        payload.text("date", cursor.format("%Y-%m-%d").to_string());

        self.attach(&mut payload, image, PayloadKind::Submit);
        payload
    }

    fn attach(
        &self,
        payload: &mut MultipartPayload,
        image: Option<&ImageAttachment>,
        kind: PayloadKind,
    ) {
        if let Some(img) = image {
            let file_name = img
                .file_name
                .clone()
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| self.fallback_file_name(kind));
            let content_type = img
                .mime_type
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_IMAGE_TYPE.to_string());
            payload.file(IMAGE_FIELD, file_name, content_type, img.uri.clone());
        }
    }

    pub fn fallback_file_name(&self, kind: PayloadKind) -> String {
        format!("{}_{}.jpg", kind.file_prefix(), self.now.timestamp_millis())
    }
}

pub fn field_name(date_key: &str, field: &str) -> String {
    format!("[{}][{}]", date_key, field)
}

/// Hours as a plain decimal: `8`, `7.5`, `7.25`.
pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 && hours.abs() < 1e15 {
        format!("{}", hours as i64)
    } else {
        format!("{}", hours)
    }
}
