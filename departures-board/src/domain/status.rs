//! Delay status classification.
//!
//! Presentation-layer classification of the gap between expected and
//! scheduled departure. Buses get a binary on-time/delayed split; trains
//! get a three-tier one with a "due soon" band for small slips. The
//! asymmetry mirrors the upstream sites and is intentional.

use super::time::BoardTime;

/// Bus row status: on time iff the expected time equals the scheduled one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusStatus {
    OnTime,
    Delayed,
}

impl BusStatus {
    /// Classify a bus departure.
    pub fn classify(scheduled: BoardTime, expected: BoardTime) -> Self {
        if expected == scheduled {
            BusStatus::OnTime
        } else {
            BusStatus::Delayed
        }
    }

    /// The CSS class rendered on the expected-time cell.
    pub fn css_class(&self) -> &'static str {
        match self {
            BusStatus::OnTime => "on-time",
            BusStatus::Delayed => "delayed",
        }
    }
}

/// Train row status, from the minute delta `expected - scheduled`:
/// zero or negative is on time, up to 5 minutes is due soon, more is
/// delayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainStatus {
    OnTime,
    DueSoon,
    Delayed,
}

impl TrainStatus {
    /// Classify a train departure.
    pub fn classify(scheduled: BoardTime, expected: BoardTime) -> Self {
        let minutes = expected.signed_duration_since(scheduled).num_minutes();

        if minutes <= 0 {
            TrainStatus::OnTime
        } else if minutes <= 5 {
            TrainStatus::DueSoon
        } else {
            TrainStatus::Delayed
        }
    }

    /// The CSS class rendered on the expected-time cell.
    pub fn css_class(&self) -> &'static str {
        match self {
            TrainStatus::OnTime => "train-on-time",
            TrainStatus::DueSoon => "train-due-soon",
            TrainStatus::Delayed => "train-delayed",
        }
    }
}
