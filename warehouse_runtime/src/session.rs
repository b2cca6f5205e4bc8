//! Session — one interactive warehouse run.
//!
//! Owns the engine (and through it the snapshot slot). Each input line is
//! parsed, applied once, and its output or error handed back for printing.
//! After `close` the session refuses further input.

use std::io;
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use warehouse_core::actions::Action;
use warehouse_core::engine::WarehouseEngine;
use warehouse_core::error::ActionError;
use warehouse_core::report::ActionOutput;
use warehouse_core::state::WarehouseState;

use crate::command::{parse_command, CommandError};
use crate::config::{load_config_file, parse_config, ConfigError, ParsedConfig};
use crate::drift::compare_states;

#[derive(Debug, Error)]
pub enum SessionError {
    /// The line did not parse; nothing was applied or logged.
    #[error("Invalid command")]
    InvalidCommand(#[source] CommandError),

    /// The action ran and was logged with this failure.
    #[error("Error: {0}")]
    Action(#[from] ActionError),

    #[error("session is closed")]
    Closed,
}

pub struct Session {
    engine: WarehouseEngine,
    config_errors: Vec<ConfigError>,
}

impl Session {
    /// Build a session from an already-parsed configuration.
    pub fn from_config(config: &ParsedConfig) -> Self {
        let mut engine = WarehouseEngine::new();
        config.apply_to(&mut engine);
        info!(
            customers = engine.state().customers.len(),
            volunteers = engine.state().volunteers.len(),
            skipped_lines = config.errors.len(),
            "warehouse initialised"
        );
        Self {
            engine,
            config_errors: config.errors.clone(),
        }
    }

    pub fn from_config_str(text: &str) -> Self {
        Self::from_config(&parse_config(text))
    }

    pub fn from_config_file(path: &Path) -> io::Result<Self> {
        Ok(Self::from_config(&load_config_file(path)?))
    }

    /// Parse and apply one input line.
    pub fn handle_line(&mut self, line: &str) -> Result<ActionOutput, SessionError> {
        if !self.engine.is_open() {
            return Err(SessionError::Closed);
        }
        let action = parse_command(line).map_err(|e| {
            warn!(line, error = %e, "rejected command");
            SessionError::InvalidCommand(e)
        })?;
        self.apply(action)
    }

    /// Apply an already-parsed action.
    pub fn apply(&mut self, action: Action) -> Result<ActionOutput, SessionError> {
        if !self.engine.is_open() {
            return Err(SessionError::Closed);
        }

        let before: Option<WarehouseState> = match action {
            Action::RestoreWarehouse => Some(self.engine.state().clone()),
            _ => None,
        };

        let result = self.engine.apply_action(action);

        if let (Some(before), Ok(_)) = (&before, &result) {
            let drift = compare_states(before, self.engine.state());
            info!(
                orders_changed = drift.status_changes.len(),
                pending = drift.after.pending,
                in_process = drift.after.in_process,
                completed = drift.after.completed,
                log_len = drift.after.log_len,
                "restore drift"
            );
        }

        result.map_err(SessionError::from)
    }

    pub fn is_open(&self) -> bool {
        self.engine.is_open()
    }

    pub fn engine(&self) -> &WarehouseEngine {
        &self.engine
    }

    /// Configuration lines skipped while building this session.
    pub fn config_errors(&self) -> &[ConfigError] {
        &self.config_errors
    }
}
