//! Dashboard configuration.
//!
//! Settings come from a single JSON file handed to the CLI. The file names
//! the input and output directories, the per-location departure cap, and
//! the bus stops and train stations to show.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::Crs;

/// Error loading the settings file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings file: {0}")]
    Json(#[from] serde_json::Error),
}

/// A bus stop to show on the dashboard.
#[derive(Debug, Clone, Deserialize)]
pub struct StopConfig {
    /// Opaque stop identifier, used to locate the stop's data file.
    pub stop_id: String,
    /// Display name for the stop's card.
    pub stop_name: String,
}

/// A train station to show on the dashboard.
///
/// The `crs` value comes straight from the settings file and may be a
/// disable sentinel; use [`TrainStationConfig::enabled_crs`] rather than
/// reading the field directly.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainStationConfig {
    pub crs: String,
    /// Display name for the station's card.
    pub name: String,
}

impl TrainStationConfig {
    /// The station's CRS code, if the station is enabled.
    ///
    /// The raw value is trimmed and uppercased first. An empty value or the
    /// sentinel `"NO"` disables the station; so does anything that is not a
    /// valid CRS code. Disabled stations are never fetched and never get a
    /// card.
    pub fn enabled_crs(&self) -> Option<Crs> {
        let normalized = self.crs.trim().to_ascii_uppercase();
        if normalized.is_empty() || normalized == "NO" {
            return None;
        }
        Crs::parse(&normalized).ok()
    }
}

/// Top-level settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Directory holding the scraped input files.
    pub data: PathBuf,
    /// Directory the rendered page is written into.
    pub html: PathBuf,
    /// Output filename within `html`.
    pub output_html_file: String,
    /// Page title (also used as the heading).
    pub output_html_title: String,
    /// Cap on departures shown per stop or station.
    pub num_departures: usize,
    pub stops: Vec<StopConfig>,
    #[serde(default)]
    pub train_stations: Vec<TrainStationConfig>,
}

impl Settings {
    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Path of a stop's latest bus XML file.
    pub fn stop_xml_path(&self, stop: &StopConfig) -> PathBuf {
        self.data.join(format!("{}.latest.xml", stop.stop_id))
    }

    /// Path of a station's latest train HTML file.
    pub fn train_html_path(&self, crs: &Crs) -> PathBuf {
        self.data.join(train_html_filename(crs))
    }

    /// Path the rendered page is written to.
    pub fn output_path(&self) -> PathBuf {
        self.html.join(&self.output_html_file)
    }
}

/// Filename a station's raw board HTML is stored under.
///
/// Shared between the fetcher (which writes it) and the generator (which
/// reads it).
pub fn train_html_filename(crs: &Crs) -> String {
    format!("train_{crs}.latest.html")
}
