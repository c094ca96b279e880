//! Choosing a source at run time.
//!
//! Test harnesses read `ENTROPY_SOURCE` so a randomized test can be replayed
//! with a fixed seed or script without recompiling:
//!
//! ```text
//! ENTROPY_SOURCE=1234 cargo test
//! ENTROPY_SOURCE='{"kind":"scripted","hex":"d5a58c5f"}' cargo test
//! ENTROPY_SOURCE='{"kind":"os","chunk":16}' cargo test
//! ```
use crate::entropy::{
    OsEntropy, RandomByteSource, ScriptError, ScriptedEntropy, SeededEntropy, ThreadEntropy,
};
use log::info;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

pub const SOURCE_VAR: &str = "ENTROPY_SOURCE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not valid: {source}")]
    Json {
        var: &'static str,
        source: serde_json::Error,
    },
    #[error("{var} is not valid unicode")]
    NotUnicode { var: &'static str },
    #[error(transparent)]
    Script(#[from] ScriptError),
}

/// Where the bytes come from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceKind {
    Thread,
    Os,
    Seeded { seed: u64 },
    Scripted { hex: String },
}

/// A source plus the optional adapters applied on top of it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    #[serde(flatten)]
    pub kind: SourceKind,
    /// Total number of bytes the source may produce.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    /// Maximum number of bytes per call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk: Option<usize>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::new(SourceKind::Thread)
    }
}

impl SourceConfig {
    pub fn new(kind: SourceKind) -> Self {
        SourceConfig {
            kind,
            limit: None,
            chunk: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Json {
            var: SOURCE_VAR,
            source,
        })
    }

    /// Parses a raw `ENTROPY_SOURCE` value.
    ///
    /// Empty means the thread source, a bare integer means a seeded source,
    /// anything else is read as JSON.
    pub fn from_var(value: &str) -> Result<Self, ConfigError> {
        let value = value.trim();

        if value.is_empty() {
            return Ok(SourceConfig::default());
        }
        if let Ok(seed) = value.parse::<u64>() {
            return Ok(SourceConfig::new(SourceKind::Seeded { seed }));
        }

        Self::from_json(value)
    }

    /// Reads `ENTROPY_SOURCE`, falling back to the thread source when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env::var(SOURCE_VAR))
    }

    fn from_lookup(lookup: Result<String, env::VarError>) -> Result<Self, ConfigError> {
        match lookup {
            Ok(value) => Self::from_var(&value),
            Err(env::VarError::NotPresent) => Ok(SourceConfig::default()),
            Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode { var: SOURCE_VAR }),
        }
    }

    pub fn build(&self) -> Result<Box<dyn RandomByteSource + Send>, ConfigError> {
        let mut source: Box<dyn RandomByteSource + Send> = match &self.kind {
            SourceKind::Thread => Box::new(ThreadEntropy),
            SourceKind::Os => Box::new(OsEntropy),
            SourceKind::Seeded { seed } => Box::new(SeededEntropy::new(*seed)),
            SourceKind::Scripted { hex } => Box::new(ScriptedEntropy::from_hex(hex)?),
        };

        if let Some(chunk) = self.chunk {
            source = Box::new(source.chunked(chunk));
        }
        if let Some(limit) = self.limit {
            source = Box::new(source.take(limit));
        }

        info!("Using entropy source {:?}", self);

        Ok(source)
    }
}
