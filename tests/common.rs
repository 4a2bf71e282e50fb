#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use async_trait::async_trait;
use chrono::NaiveDate;
use rtimesheet::core::clock::FixedClock;
use rtimesheet::core::coordinator::SubmissionCoordinator;
use rtimesheet::core::multipart::MultipartPayload;
use rtimesheet::core::session::{MemorySessionStore, Role, SessionContext, SessionStore};
use rtimesheet::core::transport::{
    ImageSelection, ImageSource, Transport, TransportError, TransportResponse,
};
use rtimesheet::models::attachment::ImageAttachment;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub const TOKEN: &str = "secret-token";

pub fn rts() -> Command {
    cargo_bin_cmd!("rtimesheet")
}

/// CLI command with HOME/APPDATA pointing at an isolated directory
pub fn rts_in(home: &Path) -> Command {
    let mut cmd = rts();
    cmd.env("HOME", home).env("APPDATA", home).env_remove("RUST_LOG");
    cmd
}

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    SaveDraft,
    Submit,
    ListUploaded,
    ListDrafts,
}

/// Transport answering from per-call scripts; unscripted calls succeed.
#[derive(Default)]
pub struct ScriptedTransport {
    save_draft: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
    submit: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
    uploaded: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
    drafts: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
    calls: Mutex<Vec<Call>>,
    payloads: Mutex<Vec<MultipartPayload>>,
    tokens: Mutex<Vec<Option<String>>>,
    gate: Option<Arc<Notify>>,
    uploaded_gate: Mutex<Option<Arc<Notify>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save/submit calls wait for the gate before answering.
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    /// The first uploaded-dates call takes its scripted answer, then waits for the gate.
    pub fn hold_first_uploaded(self, gate: Arc<Notify>) -> Self {
        *self.uploaded_gate.lock().unwrap() = Some(gate);
        self
    }

    pub fn on_save_draft(self, r: Result<TransportResponse, TransportError>) -> Self {
        self.save_draft.lock().unwrap().push_back(r);
        self
    }

    pub fn on_submit(self, r: Result<TransportResponse, TransportError>) -> Self {
        self.submit.lock().unwrap().push_back(r);
        self
    }

    pub fn on_uploaded(self, r: Result<TransportResponse, TransportError>) -> Self {
        self.uploaded.lock().unwrap().push_back(r);
        self
    }

    pub fn on_drafts(self, r: Result<TransportResponse, TransportError>) -> Self {
        self.drafts.lock().unwrap().push_back(r);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: Call) -> usize {
        self.calls().into_iter().filter(|c| *c == call).count()
    }

    pub fn payloads(&self) -> Vec<MultipartPayload> {
        self.payloads.lock().unwrap().clone()
    }

    pub fn tokens(&self) -> Vec<Option<String>> {
        self.tokens.lock().unwrap().clone()
    }

    fn next(
        queue: &Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
        default: TransportResponse,
    ) -> Result<TransportResponse, TransportError> {
        queue.lock().unwrap().pop_front().unwrap_or(Ok(default))
    }

    fn log(&self, call: Call, token: Option<&str>) {
        self.calls.lock().unwrap().push(call);
        self.tokens.lock().unwrap().push(token.map(str::to_string));
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn save_draft(
        &self,
        payload: &MultipartPayload,
        token: Option<&str>,
    ) -> Result<TransportResponse, TransportError> {
        self.log(Call::SaveDraft, token);
        self.payloads.lock().unwrap().push(payload.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        Self::next(&self.save_draft, TransportResponse::ok(None))
    }

    async fn submit(
        &self,
        payload: &MultipartPayload,
        token: Option<&str>,
    ) -> Result<TransportResponse, TransportError> {
        self.log(Call::Submit, token);
        self.payloads.lock().unwrap().push(payload.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        Self::next(&self.submit, TransportResponse::ok(None))
    }

    async fn list_uploaded_dates(
        &self,
        token: Option<&str>,
    ) -> Result<TransportResponse, TransportError> {
        self.log(Call::ListUploaded, token);
        let response = Self::next(
            &self.uploaded,
            TransportResponse::ok(Some(serde_json::json!([]))),
        );
        let gate = self.uploaded_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        response
    }

    async fn list_drafts(&self, token: Option<&str>) -> Result<TransportResponse, TransportError> {
        self.log(Call::ListDrafts, token);
        Self::next(
            &self.drafts,
            TransportResponse::ok(Some(serde_json::json!([]))),
        )
    }
}

pub struct PickedImage(pub ImageAttachment);

#[async_trait]
impl ImageSource for PickedImage {
    async fn pick(&self) -> ImageSelection {
        ImageSelection::Picked(self.0.clone())
    }
}

pub struct CancelledPick;

#[async_trait]
impl ImageSource for CancelledPick {
    async fn pick(&self) -> ImageSelection {
        ImageSelection::Cancelled
    }
}

pub struct Harness {
    pub coordinator: SubmissionCoordinator,
    pub transport: Arc<ScriptedTransport>,
    pub store: Arc<MemorySessionStore>,
    pub session: Arc<SessionContext>,
}

/// Logged-in coordinator whose clock says `today`.
pub fn harness(today: &str, transport: ScriptedTransport) -> Harness {
    let transport = Arc::new(transport);
    let store = Arc::new(MemorySessionStore::with_token(TOKEN, Role::Employee));
    let session = Arc::new(SessionContext::new(store.clone() as Arc<dyn SessionStore>));
    let coordinator = SubmissionCoordinator::new(
        transport.clone(),
        session.clone(),
        Arc::new(FixedClock::on(d(today))),
    );
    Harness {
        coordinator,
        transport,
        store,
        session,
    }
}
