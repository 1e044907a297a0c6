//! Scripted input source for replaying recorded raw events.
//!
//! A script is a TOML file with one `[[events]]` table per raw event:
//!
//! ```toml
//! [[events]]
//! type = "key_down"
//! code = "ControlLeft"
//!
//! [[events]]
//! type = "pointer_move"
//! position = { x = 10.0, y = 20.0 }
//! ```

use crate::input::{Disposition, InputSource, InputState, RawEvent};
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading or replaying a script.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to read script {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid script: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Script contains no events")]
    Empty,

    #[error("Could not start input: {0:#}")]
    Start(anyhow::Error),
}

#[derive(Debug, Deserialize)]
struct Script {
    #[serde(default)]
    events: Vec<RawEvent>,
}

/// An [`InputSource`] backed by a fixed list of raw events.
#[derive(Debug)]
pub struct ScriptSource {
    name: String,
    events: Vec<RawEvent>,
    attached: bool,
}

/// What a replay did, captured before the session was torn down.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub events: usize,
    pub prevented_defaults: usize,
    pub stopped_propagations: usize,
    /// Keys still held when the script ended
    pub held_keys: Vec<String>,
}

impl ScriptSource {
    pub fn new(name: impl Into<String>, events: Vec<RawEvent>) -> Self {
        Self {
            name: name.into(),
            events,
            attached: false,
        }
    }

    /// Parses a script from TOML text.
    pub fn parse(name: impl Into<String>, script: &str) -> Result<Self, ReplayError> {
        let script: Script = toml::from_str(script)?;
        if script.events.is_empty() {
            return Err(ReplayError::Empty);
        }
        Ok(Self::new(name, script.events))
    }

    /// Reads and parses a script file.
    pub fn from_path(path: &Path) -> Result<Self, ReplayError> {
        let text = fs::read_to_string(path).map_err(|source| ReplayError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path.display().to_string(), &text)
    }

    pub fn events(&self) -> &[RawEvent] {
        &self.events
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Feeds every event into `state` inside a listening session.
    pub fn replay(&mut self, state: &mut InputState) -> Result<ReplaySummary, ReplayError> {
        let events = self.events.clone();
        let mut session = state.session(self).map_err(ReplayError::Start)?;

        let mut summary = ReplaySummary::default();
        for event in &events {
            let Disposition {
                prevent_default,
                stop_propagation,
            } = session.handle(event);
            summary.events += 1;
            summary.prevented_defaults += usize::from(prevent_default);
            summary.stopped_propagations += usize::from(stop_propagation);
        }
        summary.held_keys = session.held_keys().into_iter().map(str::to_string).collect();

        Ok(summary)
    }
}

impl InputSource for ScriptSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn attach(&mut self) -> anyhow::Result<()> {
        debug!("Attaching script source {} ({} events)", self.name, self.events.len());
        self.attached = true;
        Ok(())
    }

    fn detach(&mut self) {
        self.attached = false;
    }
}
