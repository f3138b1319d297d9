//! Bus record extraction.
//!
//! Each stop's scraped data lands on disk as one XML file of `departure`
//! entries. An entry carries the line, the direction of travel, the aimed
//! departure time, and optionally a real-time estimate:
//!
//! ```xml
//! <departures>
//!   <departure>
//!     <line>42</line>
//!     <direction>City Centre</direction>
//!     <aimed>1430</aimed>
//!     <expected>14:37</expected>
//!   </departure>
//! </departures>
//! ```
//!
//! Element matching ignores XML namespaces, so namespaced feeds parse the
//! same way. Entries missing a line, direction, or readable aimed time are
//! skipped; an unreadable estimate degrades to "on time".

use chrono::NaiveDate;
use roxmltree::{Document, Node};

use crate::domain::{BusDeparture, parse_expected, parse_scheduled};

/// Error parsing a stop's XML document.
#[derive(Debug, thiserror::Error)]
pub enum BusExtractError {
    #[error("malformed stop XML: {0}")]
    Xml(#[from] roxmltree::Error),
}

/// Extract departures from one stop's XML, in source order.
///
/// `date` anchors every parsed time; the caller passes the current day.
/// The caller is also responsible for truncating to the configured
/// per-location cap.
pub fn extract_departures(
    xml: &str,
    stop_name: &str,
    date: NaiveDate,
) -> Result<Vec<BusDeparture>, BusExtractError> {
    let doc = Document::parse(xml)?;

    let mut departures = Vec::new();

    for entry in doc
        .descendants()
        .filter(|n| n.has_tag_name("departure"))
    {
        let Some(line) = child_text(entry, "line") else {
            continue;
        };
        let Some(direction) = child_text(entry, "direction") else {
            continue;
        };
        let Some(aimed) = child_text(entry, "aimed") else {
            continue;
        };
        let Ok(scheduled) = parse_scheduled(&aimed, date) else {
            continue;
        };

        let expected = match child_text(entry, "expected") {
            Some(raw) => parse_expected(&raw, scheduled),
            None => scheduled,
        };

        departures.push(BusDeparture {
            stop_name: stop_name.to_string(),
            line,
            direction,
            scheduled,
            expected,
        });
    }

    Ok(departures)
}

/// Trimmed text of the first child element with the given local name.
///
/// Empty text counts as missing.
fn child_text(entry: Node<'_, '_>, name: &str) -> Option<String> {
    let text = entry
        .children()
        .find(|n| n.has_tag_name(name))?
        .text()?
        .trim();

    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BusStatus;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    const STOP_XML: &str = r#"
        <departures>
          <departure>
            <line>42</line>
            <direction>City Centre</direction>
            <aimed>1430</aimed>
            <expected>14:37</expected>
          </departure>
          <departure>
            <line>42A</line>
            <direction>Railway Station</direction>
            <aimed>14:45</aimed>
          </departure>
        </departures>
    "#;

    #[test]
    fn extracts_in_source_order() {
        let deps = extract_departures(STOP_XML, "High Street", date()).unwrap();

        assert_eq!(deps.len(), 2);
        assert_eq!(deps[0].line, "42");
        assert_eq!(deps[0].direction, "City Centre");
        assert_eq!(deps[0].scheduled.to_string(), "14:30");
        assert_eq!(deps[0].expected.to_string(), "14:37");
        assert_eq!(deps[0].status(), BusStatus::Delayed);

        assert_eq!(deps[1].line, "42A");
        assert_eq!(deps[1].stop_name, "High Street");
    }

    #[test]
    fn missing_estimate_reads_as_on_time() {
        let deps = extract_departures(STOP_XML, "High Street", date()).unwrap();

        assert_eq!(deps[1].expected, deps[1].scheduled);
        assert_eq!(deps[1].status(), BusStatus::OnTime);
    }

    #[test]
    fn unreadable_estimate_degrades_to_scheduled() {
        let xml = r#"
            <departures>
              <departure>
                <line>42</line>
                <direction>City Centre</direction>
                <aimed>1430</aimed>
                <expected>soon</expected>
              </departure>
            </departures>
        "#;

        let deps = extract_departures(xml, "High Street", date()).unwrap();
        assert_eq!(deps[0].expected.to_string(), "14:30");
    }

    #[test]
    fn entries_with_missing_fields_are_skipped() {
        let xml = r#"
            <departures>
              <departure>
                <direction>City Centre</direction>
                <aimed>1430</aimed>
              </departure>
              <departure>
                <line>42</line>
                <aimed>1430</aimed>
              </departure>
              <departure>
                <line>42</line>
                <direction>City Centre</direction>
              </departure>
              <departure>
                <line>7</line>
                <direction>Hospital</direction>
                <aimed>1500</aimed>
              </departure>
            </departures>
        "#;

        let deps = extract_departures(xml, "High Street", date()).unwrap();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].line, "7");
    }

    #[test]
    fn unreadable_aimed_time_drops_the_entry() {
        let xml = r#"
            <departures>
              <departure>
                <line>42</line>
                <direction>City Centre</direction>
                <aimed>9999</aimed>
              </departure>
            </departures>
        "#;

        let deps = extract_departures(xml, "High Street", date()).unwrap();
        assert!(deps.is_empty());
    }

    #[test]
    fn namespaced_feed_parses_the_same() {
        let xml = r#"
            <b:departures xmlns:b="urn:example:bus">
              <b:departure>
                <b:line>42</b:line>
                <b:direction>City Centre</b:direction>
                <b:aimed>1430</b:aimed>
              </b:departure>
            </b:departures>
        "#;

        let deps = extract_departures(xml, "High Street", date()).unwrap();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].line, "42");
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(extract_departures("<departures>", "High Street", date()).is_err());
        assert!(extract_departures("", "High Street", date()).is_err());
        assert!(extract_departures("not xml at all", "High Street", date()).is_err());
    }
}
