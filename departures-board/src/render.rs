//! Grouping and page rendering.
//!
//! Bus and train records are kept apart all the way into the template:
//! their table shapes differ and so do their status taxonomies. Bus
//! departures are regrouped by stop here, preserving first-seen order;
//! train boards arrive already grouped and keep their configured order.

use askama::Template;

use crate::domain::{BusDeparture, TrainDeparture};

/// The rendered dashboard page.
#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate {
    pub title: String,
    pub heading: String,
    pub bus_cards: Vec<BusCard>,
    pub train_cards: Vec<TrainCard>,
    pub last_updated: String,
}

/// One bus stop's card.
pub struct BusCard {
    pub stop_name: String,
    pub rows: Vec<BusRow>,
}

/// One bus table row.
pub struct BusRow {
    pub line: String,
    pub direction: String,
    pub scheduled: String,
    pub expected: String,
    pub status_class: &'static str,
}

impl BusRow {
    fn from_departure(dep: &BusDeparture) -> Self {
        Self {
            line: dep.line.clone(),
            direction: dep.direction.clone(),
            scheduled: dep.scheduled.to_string(),
            expected: dep.expected.to_string(),
            status_class: dep.status().css_class(),
        }
    }
}

/// One train station's card.
pub struct TrainCard {
    pub station_name: String,
    pub rows: Vec<TrainRow>,
}

/// One train table row.
pub struct TrainRow {
    pub destination: String,
    pub scheduled: String,
    pub expected: String,
    pub platform: String,
    pub status_class: &'static str,
}

impl TrainRow {
    fn from_departure(dep: &TrainDeparture) -> Self {
        Self {
            destination: dep.destination.clone(),
            scheduled: dep.scheduled.to_string(),
            expected: dep.expected.to_string(),
            platform: dep.platform.clone().unwrap_or_default(),
            status_class: dep.status().css_class(),
        }
    }
}

/// Group bus departures into cards by stop name.
///
/// Card order is the order stops are first seen in the input; row order
/// within a card is source order.
pub fn group_by_stop(departures: &[BusDeparture]) -> Vec<BusCard> {
    let mut cards: Vec<BusCard> = Vec::new();

    for dep in departures {
        let row = BusRow::from_departure(dep);
        match cards.iter_mut().find(|c| c.stop_name == dep.stop_name) {
            Some(card) => card.rows.push(row),
            None => cards.push(BusCard {
                stop_name: dep.stop_name.clone(),
                rows: vec![row],
            }),
        }
    }

    cards
}

/// Render the full dashboard page.
///
/// `train_boards` is one entry per station, in configured order; stations
/// with no departures contribute no card. The `last_updated` stamp is
/// rendered regardless of how much data made it through.
pub fn render_page(
    title: &str,
    bus_departures: &[BusDeparture],
    train_boards: &[(String, Vec<TrainDeparture>)],
    last_updated: &str,
) -> Result<String, askama::Error> {
    let train_cards = train_boards
        .iter()
        .filter(|(_, deps)| !deps.is_empty())
        .map(|(name, deps)| TrainCard {
            station_name: name.clone(),
            rows: deps.iter().map(TrainRow::from_departure).collect(),
        })
        .collect();

    PageTemplate {
        title: title.to_string(),
        heading: title.to_string(),
        bus_cards: group_by_stop(bus_departures),
        train_cards,
        last_updated: last_updated.to_string(),
    }
    .render()
}
