//! `preview`: drive the real draft/submit flow against an in-process
//! transport that records the payload instead of sending it.

use crate::cli::parser::{Commands, PreviewKind};
use crate::config::Config;
use crate::core::clock::SystemClock;
use crate::core::coordinator::SubmissionCoordinator;
use crate::core::multipart::MultipartPayload;
use crate::core::session::{MemorySessionStore, Role, SessionContext};
use crate::core::slots::TimeSlotCatalog;
use crate::core::transport::{
    ImageSelection, ImageSource, Transport, TransportError, TransportResponse,
};
use crate::errors::{AppError, AppResult};
use crate::models::attachment::ImageAttachment;
use crate::models::field::DayField;
use crate::utils::date;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::fs;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing::info;

const PREVIEW_TOKEN: &str = "preview";

/// Accepts every call and keeps the last payload.
#[derive(Default)]
struct RecordingTransport {
    last: Mutex<Option<MultipartPayload>>,
}

impl RecordingTransport {
    fn record(&self, payload: &MultipartPayload) -> Result<TransportResponse, TransportError> {
        let mut guard = self.last.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Some(payload.clone());
        Ok(TransportResponse::ok(None))
    }

    fn take(&self) -> Option<MultipartPayload> {
        self.last.lock().unwrap_or_else(|e| e.into_inner()).take()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn save_draft(
        &self,
        payload: &MultipartPayload,
        _token: Option<&str>,
    ) -> Result<TransportResponse, TransportError> {
        self.record(payload)
    }

    async fn submit(
        &self,
        payload: &MultipartPayload,
        _token: Option<&str>,
    ) -> Result<TransportResponse, TransportError> {
        self.record(payload)
    }

    async fn list_uploaded_dates(
        &self,
        _token: Option<&str>,
    ) -> Result<TransportResponse, TransportError> {
        Ok(TransportResponse::ok(Some(serde_json::json!([]))))
    }

    async fn list_drafts(&self, _token: Option<&str>) -> Result<TransportResponse, TransportError> {
        Ok(TransportResponse::ok(Some(serde_json::json!([]))))
    }
}

/// Image "picked" from a path given on the command line.
struct FileImageSource(ImageAttachment);

#[async_trait]
impl ImageSource for FileImageSource {
    async fn pick(&self) -> ImageSelection {
        ImageSelection::Picked(self.0.clone())
    }
}

/// Parse `DATE,TIME_IN,TIME_OUT,LUNCH,HOURS`; every segment but the date may be empty.
/// Times must be slots of `catalog`.
pub fn parse_entry(
    catalog: &TimeSlotCatalog,
    raw: &str,
) -> AppResult<(NaiveDate, Vec<DayField>)> {
    const NAMES: [&str; 4] = ["time_in", "time_out", "lunch_timeout", "total_hours"];

    let mut segments = raw.split(',').map(str::trim);
    let d = segments.next().unwrap_or_default();
    let date = date::require_date(d)?;

    let values: Vec<&str> = segments.collect();
    if values.len() > NAMES.len() {
        return Err(AppError::Validation(format!(
            "Too many values in entry '{}'",
            raw
        )));
    }

    let fields = NAMES
        .iter()
        .zip(values)
        .filter(|(_, v)| !v.is_empty())
        .map(|(name, v)| DayField::parse_with(catalog, name, v))
        .collect::<AppResult<Vec<_>>>()?;

    Ok((date, fields))
}

fn read_local_file(uri: &str) -> AppResult<Vec<u8>> {
    let path = uri.strip_prefix("file://").unwrap_or(uri);
    Ok(fs::read(path)?)
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Preview {
        kind,
        cursor,
        entries,
        image,
        image_name,
        image_type,
        boundary,
    } = cmd
    {
        let catalog = TimeSlotCatalog::new(cfg.slot_step_minutes)?;
        let runtime = tokio::runtime::Builder::new_current_thread().build()?;

        let transport = Arc::new(RecordingTransport::default());
        let session = Arc::new(SessionContext::new(Arc::new(
            MemorySessionStore::with_token(PREVIEW_TOKEN, Role::Employee),
        )));
        let coordinator =
            SubmissionCoordinator::new(transport.clone(), session, Arc::new(SystemClock));

        if let Some(c) = cursor {
            coordinator.select_date(date::require_date(c)?)?;
        }

        for raw in entries {
            let (d, fields) = parse_entry(&catalog, raw)?;
            for field in fields {
                coordinator.set_field(d, field);
            }
        }

        if let Some(path) = image {
            let mut attachment = ImageAttachment::new(path.clone());
            attachment.file_name = image_name.clone();
            attachment.mime_type = image_type.clone();
            runtime.block_on(coordinator.pick_image(&FileImageSource(attachment)));
        }

        match kind {
            PreviewKind::Draft => {
                let saved = runtime.block_on(coordinator.save_draft())?;
                info!(date = %saved.date, cursor = %saved.cursor, "draft preview built");
            }
            PreviewKind::Submit => {
                let submitted = runtime.block_on(coordinator.submit())?;
                info!(dates = submitted.dates.len(), "submit preview built");
            }
        }

        let payload = transport
            .take()
            .ok_or_else(|| AppError::Other("no payload was recorded".to_string()))?;

        let (content_type, body) = match boundary {
            Some(b) => (
                MultipartPayload::content_type(b),
                payload.encode(b, read_local_file)?,
            ),
            None => payload.encode_fresh(read_local_file)?,
        };

        let mut out = std::io::stdout().lock();
        writeln!(out, "Content-Type: {}", content_type)?;
        writeln!(out)?;
        out.write_all(&body)?;
        out.flush()?;
    }

    Ok(())
}
