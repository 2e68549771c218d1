// crates/clean_and_split/src/config.rs

//! Runtime configuration of the `clean_and_split` binary, composed from
//! CLI arguments and the environment.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use newline_utils::unescape_newlines;
use settings_source::{JsonSettingsFile, NoSettings, SettingsSource};

use crate::{CleanConfig, PromptInput};

/// Environment variable naming a JSON settings file.
pub const SETTINGS_ENV: &str = "CLEAN_AND_SPLIT_SETTINGS";

/// What the binary prints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Cleaned,
    MarkerFree,
    Regions,
    Impact,
    Fingerprint,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "cleaned" => Ok(Self::Cleaned),
            "marker-free" => Ok(Self::MarkerFree),
            "regions" => Ok(Self::Regions),
            "impact" => Ok(Self::Impact),
            "fingerprint" => Ok(Self::Fingerprint),
            "json" => Ok(Self::Json),
            other => Err(anyhow!("Unknown output format '{}'", other)),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    pub text_file: Option<PathBuf>,     // None == stdin
    pub bundle_file: Option<PathBuf>,   // JSON PromptInput, replaces text_file
    pub before_text: Option<String>,
    pub after_text: Option<String>,
    pub comment_prefix: Option<String>, // wins over any settings file
    pub settings_path: Option<PathBuf>,
    pub output: OutputFormat,
    pub verbose: bool,
}

impl AppConfig {
    pub fn settings_source(&self) -> Box<dyn SettingsSource> {
        match &self.settings_path {
            Some(path) => Box::new(JsonSettingsFile::new(path)),
            None => Box::new(NoSettings),
        }
    }

    pub fn clean_config(&self) -> CleanConfig {
        match &self.comment_prefix {
            Some(prefix) => CleanConfig::new(prefix.clone()),
            None => CleanConfig::from_settings(self.settings_source().as_ref()),
        }
    }

    /// Builds the input bundle. `--before`/`--after` override the values of
    /// a bundle file.
    pub fn load_input(&self) -> Result<PromptInput> {
        let mut input = match &self.bundle_file {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("Error opening bundle {}", path.display()))?;
                serde_json::from_str::<PromptInput>(&raw)
                    .with_context(|| format!("Error parsing bundle {}", path.display()))?
            }
            None => PromptInput::new(self.read_text()?),
        };
        if let Some(before) = &self.before_text {
            input.before_text = Some(unescape_newlines(before));
        }
        if let Some(after) = &self.after_text {
            input.after_text = Some(unescape_newlines(after));
        }
        Ok(input)
    }

    fn read_text(&self) -> Result<String> {
        match &self.text_file {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("Error opening {}", path.display())),
            None => {
                let mut text = String::new();
                io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read text from stdin")?;
                Ok(text)
            }
        }
    }
}
