//! Normalized departure records.

use super::status::{BusStatus, TrainStatus};
use super::time::BoardTime;

/// One departure from a bus stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusDeparture {
    /// Display name of the stop this departure belongs to.
    pub stop_name: String,
    /// Line identifier, e.g. "42".
    pub line: String,
    /// Direction of travel.
    pub direction: String,
    pub scheduled: BoardTime,
    pub expected: BoardTime,
}

impl BusDeparture {
    /// Delay status for rendering.
    pub fn status(&self) -> BusStatus {
        BusStatus::classify(self.scheduled, self.expected)
    }
}

/// One departure from a train station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainDeparture {
    /// Display name of the station this departure belongs to.
    pub station_name: String,
    /// Destination of the service.
    pub destination: String,
    pub scheduled: BoardTime,
    pub expected: BoardTime,
    /// Platform label, when the board shows one.
    pub platform: Option<String>,
}

impl TrainDeparture {
    /// Delay status for rendering.
    pub fn status(&self) -> TrainStatus {
        TrainStatus::classify(self.scheduled, self.expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(raw: &str) -> BoardTime {
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        BoardTime::parse_compact(raw, date).unwrap()
    }

    #[test]
    fn bus_status_follows_times() {
        let dep = BusDeparture {
            stop_name: "High Street".into(),
            line: "42".into(),
            direction: "City Centre".into(),
            scheduled: at("1430"),
            expected: at("1437"),
        };
        assert_eq!(dep.status(), BusStatus::Delayed);
    }

    #[test]
    fn train_status_follows_delta() {
        let dep = TrainDeparture {
            station_name: "Hereford".into(),
            destination: "Birmingham New Street".into(),
            scheduled: at("1430"),
            expected: at("1437"),
            platform: Some("2".into()),
        };
        assert_eq!(dep.status(), TrainStatus::Delayed);
    }
}
