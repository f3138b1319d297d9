//! Static departures dashboard generator.
//!
//! Turns scraped transit data (XML per bus stop, HTML per train station)
//! into a single static HTML page of upcoming departures, plus a fetch
//! utility that retrieves the raw train board pages.

pub mod bus;
pub mod config;
pub mod domain;
pub mod fetch;
pub mod generate;
pub mod render;
pub mod train;
