//! Draft-save and submit flows.
//!
//! Every flow follows the same steps: validate locally, build the payload,
//! make one transport call, then apply the result. Local state is only
//! touched after the transport call resolved with a reported success.

use super::availability::DateAvailabilityPolicy;
use super::clock::Clock;
use super::payload::PayloadBuilder;
use super::session::SessionContext;
use super::store::DayRecordStore;
use super::transport::{ImageSelection, ImageSource, Transport, TransportError, TransportResponse};
use crate::errors::{AppError, AppResult};
use crate::models::attachment::ImageAttachment;
use crate::models::day_entry::DayEntry;
use crate::models::draft_row::DraftRow;
use crate::models::field::DayField;
use crate::utils::date;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

const DRAFT_TRANSPORT_FAILURE: &str = "There was an error saving the draft.";
const SUBMIT_TRANSPORT_FAILURE: &str = "There was an error uploading the timesheet.";
const DRAFT_BACKEND_FAILURE: &str = "Save failed";
const SUBMIT_BACKEND_FAILURE: &str = "Upload failed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftSaved {
    pub date: NaiveDate,
    /// Cursor after the save (next day unless the saved date was today).
    pub cursor: NaiveDate,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted {
    pub dates: Vec<NaiveDate>,
    pub with_image: bool,
    pub message: Option<String>,
}

#[derive(Debug)]
struct EngineState {
    days: DayRecordStore,
    image: Option<ImageAttachment>,
    cursor: NaiveDate,
    availability: DateAvailabilityPolicy,
    server_drafts: Vec<DraftRow>,
    /// Ticket of the newest refresh whose results were applied.
    refresh_applied: u64,
}

/// Resets the busy flag when the flow ends, including when its future is dropped.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct SubmissionCoordinator {
    transport: Arc<dyn Transport>,
    session: Arc<SessionContext>,
    clock: Arc<dyn Clock>,
    state: Mutex<EngineState>,
    busy: AtomicBool,
    refresh_seq: AtomicU64,
}

impl SubmissionCoordinator {
    /// New coordinator with the cursor on today and nothing staged.
    pub fn new(
        transport: Arc<dyn Transport>,
        session: Arc<SessionContext>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let today = clock.today();
        Self {
            transport,
            session,
            clock,
            state: Mutex::new(EngineState {
                days: DayRecordStore::new(),
                image: None,
                cursor: today,
                availability: DateAvailabilityPolicy::default(),
                server_drafts: Vec::new(),
                refresh_applied: 0,
            }),
            busy: AtomicBool::new(false),
            refresh_seq: AtomicU64::new(0),
        }
    }

    fn state(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn acquire(&self) -> AppResult<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AppError::Busy)?;
        Ok(BusyGuard(&self.busy))
    }

    // ---------------------------
    // Snapshots
    // ---------------------------

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn cursor(&self) -> NaiveDate {
        self.state().cursor
    }

    pub fn entry(&self, date: NaiveDate) -> DayEntry {
        self.state().days.get(date)
    }

    pub fn drafts(&self) -> DayRecordStore {
        self.state().days.clone()
    }

    pub fn image(&self) -> Option<ImageAttachment> {
        self.state().image.clone()
    }

    pub fn uploaded_dates(&self) -> BTreeSet<NaiveDate> {
        self.state().availability.uploaded_dates().clone()
    }

    pub fn server_drafts(&self) -> Vec<DraftRow> {
        self.state().server_drafts.clone()
    }

    pub fn is_disabled(&self, date: NaiveDate) -> bool {
        self.state().availability.is_disabled(date, self.clock.today())
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    // ---------------------------
    // Mutations requested by the UI
    // ---------------------------

    pub fn set_field(&self, date: NaiveDate, field: DayField) {
        self.state().days.set_field(date, field);
    }

    /// Move the cursor to `date` unless the date is disabled.
    pub fn select_date(&self, date: NaiveDate) -> AppResult<()> {
        let today = self.clock.today();
        let mut state = self.state();
        if state.availability.is_disabled(date, today) {
            return Err(AppError::Validation(format!(
                "Date {} cannot be edited",
                date::format_date(date)
            )));
        }
        state.cursor = date;
        Ok(())
    }

    /// Await the image picker; a cancelled pick changes nothing.
    pub async fn pick_image(&self, source: &dyn ImageSource) -> Option<ImageAttachment> {
        match source.pick().await {
            ImageSelection::Picked(img) => {
                debug!(uri = %img.uri, "image attached");
                self.state().image = Some(img.clone());
                Some(img)
            }
            ImageSelection::Cancelled => None,
        }
    }

    pub fn clear_image(&self) {
        self.state().image = None;
    }

    // ---------------------------
    // Flows
    // ---------------------------

    /// Save the cursor date's entry as a draft.
    pub async fn save_draft(&self) -> AppResult<DraftSaved> {
        let _busy = self.acquire()?;
        let today = self.clock.today();

        let (payload, date) = {
            let state = self.state();
            let date = state.cursor;
            let entry = state.days.get(date);
            if !entry.is_complete() {
                warn!(%date, "draft rejected: incomplete entry");
                return Err(AppError::Validation(
                    "All fields are required for the current date!".to_string(),
                ));
            }
            if state.availability.is_disabled(date, today) {
                warn!(%date, "draft rejected: date disabled");
                return Err(AppError::Validation(format!(
                    "Date {} cannot be edited",
                    date::format_date(date)
                )));
            }
            let builder = PayloadBuilder::new(self.clock.now());
            (builder.draft(&entry, state.image.as_ref()), date)
        };

        debug!(%date, parts = payload.parts().len(), "sending draft");
        let token = self.session.token();
        let result = self.transport.save_draft(&payload, token.as_deref()).await;
        let response = self.interpret(result, DRAFT_TRANSPORT_FAILURE, DRAFT_BACKEND_FAILURE)?;

        // today stays editable for same-day corrections
        let next = if date != today {
            Some(date::next_day(date)?)
        } else {
            None
        };

        let cursor = {
            let mut state = self.state();
            state.days.clear();
            state.image = None;
            if let Some(next) = next {
                state.cursor = next;
            }
            state.cursor
        };
        info!(%date, %cursor, "draft saved");

        self.refresh_after_success().await;

        Ok(DraftSaved {
            date,
            cursor,
            message: response.message,
        })
    }

    /// Submit every staged entry as one batch.
    pub async fn submit(&self) -> AppResult<Submitted> {
        let _busy = self.acquire()?;
        let today = self.clock.today();

        let (payload, dates, with_image) = {
            let state = self.state();
            let cursor_entry = state.days.get(state.cursor);
            // looser than the draft check on purpose: any one field or a photo
            if !cursor_entry.has_any_time_field() && state.image.is_none() {
                warn!(cursor = %state.cursor, "submit rejected: nothing to send");
                return Err(AppError::Validation("min one field is required".to_string()));
            }
            if let Some(date) = state
                .days
                .dates()
                .find(|d| state.availability.is_disabled(*d, today))
            {
                warn!(%date, "submit rejected: date disabled");
                return Err(AppError::Validation(format!(
                    "Date {} cannot be submitted",
                    date::format_date(date)
                )));
            }
            let builder = PayloadBuilder::new(self.clock.now());
            (
                builder.submit(&state.days, state.cursor, state.image.as_ref()),
                state.days.dates().collect::<Vec<_>>(),
                state.image.is_some(),
            )
        };

        debug!(dates = dates.len(), with_image, "sending submission");
        let token = self.session.token();
        let result = self.transport.submit(&payload, token.as_deref()).await;
        let response = self.interpret(result, SUBMIT_TRANSPORT_FAILURE, SUBMIT_BACKEND_FAILURE)?;

        {
            let mut state = self.state();
            state.days.clear();
            state.image = None;
        }
        info!(dates = dates.len(), "timesheet submitted");

        self.refresh_after_success().await;

        Ok(Submitted {
            dates,
            with_image,
            message: response.message,
        })
    }

    /// Reload uploaded dates and the backend draft listing.
    ///
    /// A 401 purges the session; other failures keep the previous snapshot.
    /// Overlapping refreshes are allowed: results older than the last applied
    /// snapshot are dropped.
    pub async fn refresh(&self) -> AppResult<()> {
        let ticket = self.refresh_seq.fetch_add(1, Ordering::AcqRel) + 1;
        let token = self.session.token();

        let dates = self.transport.list_uploaded_dates(token.as_deref()).await;
        let uploaded = self
            .interpret(dates, "Could not load uploaded dates", "Could not load uploaded dates")
            .map(|resp| parse_uploaded_dates(resp.data.as_ref()));

        if let Err(AppError::Unauthorized) = uploaded {
            return Err(AppError::Unauthorized);
        }

        let drafts = self.transport.list_drafts(token.as_deref()).await;
        let drafts = self
            .interpret(drafts, "Could not load drafts", "Could not load drafts")
            .map(|resp| parse_draft_rows(resp.data.as_ref()));

        if let Err(AppError::Unauthorized) = drafts {
            return Err(AppError::Unauthorized);
        }

        let mut first_error = None;
        {
            let mut state = self.state();
            if ticket < state.refresh_applied {
                debug!(ticket, applied = state.refresh_applied, "dropping stale refresh");
                return Ok(());
            }
            state.refresh_applied = ticket;
            match uploaded {
                Ok(dates) => state.availability.replace_uploaded(dates),
                Err(e) => first_error = Some(e),
            }
            match drafts {
                Ok(rows) => state.server_drafts = rows,
                Err(e) => {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn refresh_after_success(&self) {
        if let Err(e) = self.refresh().await {
            warn!(error = %e, "refresh after success failed");
        }
    }

    /// Map a transport result onto the error taxonomy. A 401 purges the session.
    fn interpret(
        &self,
        result: Result<TransportResponse, TransportError>,
        transport_failure: &str,
        backend_failure: &str,
    ) -> AppResult<TransportResponse> {
        let response = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "transport failure");
                return Err(AppError::Transport(transport_failure.to_string()));
            }
        };

        if response.success {
            return Ok(response);
        }

        if response.is_unauthorized() {
            warn!("backend answered 401");
            self.session.purge();
            return Err(AppError::Unauthorized);
        }

        let message = response
            .message
            .unwrap_or_else(|| backend_failure.to_string());
        warn!(status = ?response.status, %message, "backend rejected the call");
        Err(AppError::Backend(message))
    }
}

fn parse_uploaded_dates(data: Option<&serde_json::Value>) -> Vec<NaiveDate> {
    let Some(serde_json::Value::Array(items)) = data else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|v| v.as_str())
        .filter_map(|s| {
            let parsed = date::parse_date_prefix(s);
            if parsed.is_none() {
                warn!(value = s, "ignoring unparseable uploaded date");
            }
            parsed
        })
        .collect()
}

fn parse_draft_rows(data: Option<&serde_json::Value>) -> Vec<DraftRow> {
    match data {
        Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|e| {
            warn!(error = %e, "ignoring malformed draft listing");
            Vec::new()
        }),
        None => Vec::new(),
    }
}
