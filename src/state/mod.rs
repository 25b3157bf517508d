// src/state/mod.rs
use std::path::PathBuf;
use anyhow::Result;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calc::CalculationKind;
use crate::config::{CalculationRecord, Settings};
use crate::file::{DirStorage, MemoryStorage, SessionStorage};
use crate::file::export;

pub mod calculator_state;
pub mod history;

pub use calculator_state::CalculatorState;
pub use history::HistoryStore;

// Core dialog tracking
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DialogState {
    None,
    ConfirmClear,
}

/// Whether the session's storage outlives this process.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionScope {
    /// Generated for this run and discarded on exit.
    Ephemeral(String),
    /// Configured by the user; kept so a later run can rehydrate it.
    Named(String),
}

impl SessionScope {
    pub fn from_settings(settings: &Settings) -> Self {
        match &settings.session_id {
            Some(id) => SessionScope::Named(id.clone()),
            None => SessionScope::Ephemeral(Uuid::new_v4().to_string()),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            SessionScope::Ephemeral(id) | SessionScope::Named(id) => id,
        }
    }
}

// Core application state
#[derive(Debug)]
pub struct AppState {
    pub settings: Settings,
    pub session: SessionScope,
    pub calculators: Vec<CalculatorState>,
    pub history: HistoryStore<Box<dyn SessionStorage>>,

    // Minimal UI state
    pub current_dialog: DialogState,
    pub error_message: Option<String>,
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let session = SessionScope::from_settings(&settings);
        let storage = open_storage(&settings, &session);
        Self::with_storage(settings, session, storage)
    }

    pub fn with_storage(settings: Settings, session: SessionScope, storage: Box<dyn SessionStorage>) -> Self {
        let calculators = CalculationKind::ALL.iter()
            .map(|&kind| match kind {
                CalculationKind::Cvss => {
                    CalculatorState::with_default(kind, settings.default_percentage_text())
                }
                _ => CalculatorState::new(kind),
            })
            .collect();

        let history = HistoryStore::load(storage);
        info!(session = session.id(), records = history.len(), "session started");

        Self {
            settings,
            session,
            calculators,
            history,
            current_dialog: DialogState::None,
            error_message: None,
            status_message: None,
        }
    }

    #[cfg(test)]
    pub fn calculator_mut(&mut self, kind: CalculationKind) -> Option<&mut CalculatorState> {
        self.calculators.iter_mut().find(|calculator| calculator.kind == kind)
    }

    /// Saves the calculator's current result. None while it is undefined.
    pub fn save_result(&mut self, kind: CalculationKind) -> Option<CalculationRecord> {
        let request = self.calculators.iter()
            .find(|calculator| calculator.kind == kind)?
            .save_request()?;

        self.history.append(
            request.kind,
            request.title,
            request.inputs,
            request.result,
            request.note,
        )
    }

    pub fn delete_record(&mut self, id: &str) {
        self.history.delete(id);
    }

    pub fn request_clear(&mut self) {
        if !self.history.is_empty() {
            self.current_dialog = DialogState::ConfirmClear;
        }
    }

    pub fn confirm_clear(&mut self) {
        self.history.clear();
        self.current_dialog = DialogState::None;
    }

    pub fn cancel_dialog(&mut self) {
        self.current_dialog = DialogState::None;
    }

    pub fn export_history(&self) -> Result<PathBuf> {
        export::export_to_dir(self.history.records(), &self.settings.export_dir)
    }

    /// Ends the session. Ephemeral sessions drop their stored history.
    pub fn end_session(&mut self) {
        if let SessionScope::Ephemeral(id) = &self.session {
            info!(session = %id, "discarding session");
            if let Err(e) = self.history.storage_mut().discard() {
                warn!("Failed to discard session storage: {:#}", e);
            }
        }
    }
}

fn open_storage(settings: &Settings, session: &SessionScope) -> Box<dyn SessionStorage> {
    match DirStorage::open(&settings.storage_dir, session.id()) {
        Ok(storage) => {
            info!(dir = %storage.session_dir().display(), "using session storage");
            Box::new(storage)
        }
        Err(e) => {
            warn!("Falling back to in-memory session storage: {:#}", e);
            Box::new(MemoryStorage::new())
        }
    }
}
