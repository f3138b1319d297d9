//! Train record extraction.
//!
//! Station boards arrive as scraped HTML pages. Each service row is an
//! `a.service` element: the scheduled time lives in `.time`, the
//! destination in `.location span`, the platform in `.platformbox`, and
//! the real-time annotation ("Expected at 1437", "On time", ...) in
//! `.addl`. Rows missing a scheduled time or a destination are skipped;
//! an unreadable annotation reads as on time.

use std::sync::LazyLock;

use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};

use crate::domain::{TrainDeparture, parse_expected, parse_scheduled};

struct Selectors {
    service: Selector,
    time: Selector,
    destination: Selector,
    platform: Selector,
    addl: Selector,
}

static SELECTORS: LazyLock<Selectors> = LazyLock::new(|| Selectors {
    service: Selector::parse("a.service").expect("valid selector"),
    time: Selector::parse(".time").expect("valid selector"),
    destination: Selector::parse(".location span").expect("valid selector"),
    platform: Selector::parse(".platformbox").expect("valid selector"),
    addl: Selector::parse(".addl").expect("valid selector"),
});

/// Extract departures from one station's board HTML, in source order.
///
/// `date` anchors every parsed time; the caller passes the current day.
/// Empty input is a valid board with no services, not an error, and the
/// parser itself never fails: whatever rows can be read are returned.
pub fn extract_departures(html: &str, station_name: &str, date: NaiveDate) -> Vec<TrainDeparture> {
    if html.trim().is_empty() {
        return Vec::new();
    }

    let doc = Html::parse_document(html);
    let mut departures = Vec::new();

    for service in doc.select(&SELECTORS.service) {
        let Some(time_el) = service.select(&SELECTORS.time).next() else {
            continue;
        };
        let Ok(scheduled) = parse_scheduled(&element_text(time_el), date) else {
            continue;
        };

        let Some(dest_el) = service.select(&SELECTORS.destination).next() else {
            continue;
        };
        let destination = element_text(dest_el);

        let platform = service
            .select(&SELECTORS.platform)
            .next()
            .map(element_text)
            .filter(|s| !s.is_empty());

        let addl = service
            .select(&SELECTORS.addl)
            .next()
            .map(joined_text)
            .unwrap_or_default();
        let expected = parse_expected(&addl, scheduled);

        departures.push(TrainDeparture {
            station_name: station_name.to_string(),
            destination,
            scheduled,
            expected,
            platform,
        });
    }

    departures
}

/// All text under an element, concatenated and trimmed.
fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// All text under an element, each piece trimmed, joined with spaces.
///
/// The `.addl` annotation often spans several inline elements; joining
/// keeps "Expected at" and its time token whitespace-separated.
fn joined_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TrainStatus;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    const BOARD_HTML: &str = r#"
        <html><body>
          <a class="service" href="/service/1">
            <div class="time">1430</div>
            <div class="location"><span>Birmingham New Street</span></div>
            <div class="platformbox">2</div>
            <div class="addl"><span>Expected at</span> <span>1437</span></div>
          </a>
          <a class="service" href="/service/2">
            <div class="time">1502</div>
            <div class="location"><span>Manchester Piccadilly</span></div>
            <div class="addl">On time</div>
          </a>
        </body></html>
    "#;

    #[test]
    fn extracts_full_rows() {
        let deps = extract_departures(BOARD_HTML, "Hereford", date());

        assert_eq!(deps.len(), 2);

        assert_eq!(deps[0].station_name, "Hereford");
        assert_eq!(deps[0].destination, "Birmingham New Street");
        assert_eq!(deps[0].scheduled.to_string(), "14:30");
        assert_eq!(deps[0].expected.to_string(), "14:37");
        assert_eq!(deps[0].platform.as_deref(), Some("2"));
        assert_eq!(deps[0].status(), TrainStatus::Delayed);
    }

    #[test]
    fn status_annotation_reads_as_on_time() {
        let deps = extract_departures(BOARD_HTML, "Hereford", date());

        assert_eq!(deps[1].expected, deps[1].scheduled);
        assert_eq!(deps[1].platform, None);
        assert_eq!(deps[1].status(), TrainStatus::OnTime);
    }

    #[test]
    fn empty_board_is_not_an_error() {
        assert!(extract_departures("", "Hereford", date()).is_empty());
        assert!(extract_departures("   \n  ", "Hereford", date()).is_empty());
    }

    #[test]
    fn page_without_services_yields_nothing() {
        let html = "<html><body><p>No services today.</p></body></html>";
        assert!(extract_departures(html, "Hereford", date()).is_empty());
    }

    #[test]
    fn row_without_time_is_skipped() {
        let html = r#"
            <a class="service">
              <div class="location"><span>Cardiff Central</span></div>
            </a>
        "#;
        assert!(extract_departures(html, "Hereford", date()).is_empty());
    }

    #[test]
    fn row_with_unreadable_time_is_skipped() {
        for raw in ["Delayed", "9999", "14.30"] {
            let html = format!(
                r#"
                <a class="service">
                  <div class="time">{raw}</div>
                  <div class="location"><span>Cardiff Central</span></div>
                </a>
            "#
            );
            assert!(
                extract_departures(&html, "Hereford", date()).is_empty(),
                "time {raw:?} should drop the row"
            );
        }
    }

    #[test]
    fn row_without_destination_is_skipped() {
        let html = r#"
            <a class="service">
              <div class="time">1430</div>
              <div class="platformbox">1</div>
            </a>
        "#;
        assert!(extract_departures(html, "Hereford", date()).is_empty());
    }

    #[test]
    fn colon_form_annotation_is_used_directly() {
        let html = r#"
            <a class="service">
              <div class="time">1430</div>
              <div class="location"><span>Cardiff Central</span></div>
              <div class="addl">14:33</div>
            </a>
        "#;

        let deps = extract_departures(html, "Hereford", date());
        assert_eq!(deps[0].expected.to_string(), "14:33");
        assert_eq!(deps[0].status(), TrainStatus::DueSoon);
    }

    #[test]
    fn empty_platform_box_is_none() {
        let html = r#"
            <a class="service">
              <div class="time">1430</div>
              <div class="location"><span>Cardiff Central</span></div>
              <div class="platformbox"> </div>
            </a>
        "#;

        let deps = extract_departures(html, "Hereford", date());
        assert_eq!(deps[0].platform, None);
    }
}
