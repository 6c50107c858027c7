//! Configuration file handling for the command-line adapter.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use orb_maze_core::{LoadPolicy, SessionConfig};
use serde::Deserialize;

/// Location of the question source when none is configured.
pub(crate) const DEFAULT_QUESTIONS_PATH: &str = "assets/questions.json";

/// Everything the adapter needs to start a session.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    /// Tuning forwarded to the session.
    pub(crate) session: SessionConfig,
    /// Where questions come from and how strictly they are validated.
    pub(crate) questions: QuestionSettings,
}

/// Question source settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct QuestionSettings {
    /// JSON file holding the question records.
    pub(crate) path: PathBuf,
    /// Policy applied to malformed records.
    pub(crate) policy: LoadPolicy,
}

impl Default for QuestionSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_QUESTIONS_PATH),
            policy: LoadPolicy::default(),
        }
    }
}

impl Settings {
    /// Reads settings from the TOML file at `path`, or returns defaults when
    /// no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to parse settings file {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse settings toml contents")
    }
}
