//! The generate pipeline.
//!
//! Reads the scraped data files named by the settings, normalizes them
//! into departure records, and writes the rendered dashboard. Every
//! per-location problem (missing file, malformed data) downgrades to
//! "no departures for that location" with a warning; the page is always
//! written.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use chrono_tz::Europe::London;
use tracing::{info, warn};

use crate::bus;
use crate::config::{Settings, SettingsError};
use crate::domain::{BusDeparture, TrainDeparture};
use crate::render;
use crate::train;

/// Format of the page's "last updated" stamp.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Error from the generate pipeline.
///
/// Only settings, rendering, and the final write can fail; data problems
/// degrade per location instead.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("failed to render page: {0}")]
    Render(#[from] askama::Error),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Generate the dashboard described by the settings file.
///
/// Times are anchored to the current day in Europe/London, which also
/// stamps the page footer. Returns the path written.
pub fn run(config_path: &Path) -> Result<PathBuf, GenerateError> {
    let settings = Settings::load(config_path)?;

    let now = Utc::now().with_timezone(&London);
    let last_updated = now.format(TIMESTAMP_FORMAT).to_string();

    let html = build_page(&settings, now.date_naive(), &last_updated)?;

    let output = settings.output_path();
    fs::write(&output, html)?;
    info!(output = %output.display(), "generated dashboard");

    Ok(output)
}

/// Build the page HTML for a fixed date and timestamp.
pub fn build_page(
    settings: &Settings,
    today: NaiveDate,
    last_updated: &str,
) -> Result<String, GenerateError> {
    let bus_departures = load_bus_departures(settings, today);
    let train_boards = load_train_boards(settings, today);

    Ok(render::render_page(
        &settings.output_html_title,
        &bus_departures,
        &train_boards,
        last_updated,
    )?)
}

/// Read and normalize every configured stop's XML, capped per stop.
fn load_bus_departures(settings: &Settings, today: NaiveDate) -> Vec<BusDeparture> {
    let mut all = Vec::new();

    for stop in &settings.stops {
        let path = settings.stop_xml_path(stop);

        let xml = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                warn!(stop = %stop.stop_name, path = %path.display(), error = %e,
                    "skipping stop: unreadable data file");
                continue;
            }
        };

        let mut departures = match bus::extract_departures(&xml, &stop.stop_name, today) {
            Ok(deps) => deps,
            Err(e) => {
                warn!(stop = %stop.stop_name, path = %path.display(), error = %e,
                    "skipping stop: malformed data file");
                continue;
            }
        };

        departures.truncate(settings.num_departures);
        all.extend(departures);
    }

    all
}

/// Read and normalize every enabled station's HTML, capped per station.
///
/// Returns one entry per station with at least one departure, in
/// configured order.
fn load_train_boards(settings: &Settings, today: NaiveDate) -> Vec<(String, Vec<TrainDeparture>)> {
    let mut boards = Vec::new();

    for station in &settings.train_stations {
        let Some(crs) = station.enabled_crs() else {
            continue;
        };

        let path = settings.train_html_path(&crs);

        let html = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                warn!(station = %station.name, path = %path.display(), error = %e,
                    "skipping station: unreadable board file");
                continue;
            }
        };

        let mut departures = train::extract_departures(&html, &station.name, today);
        departures.truncate(settings.num_departures);

        if !departures.is_empty() {
            boards.push((station.name.clone(), departures));
        }
    }

    boards
}
