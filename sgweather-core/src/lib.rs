//! Core library for the Singapore weather service.
//!
//! This crate defines:
//! - The retrying HTTP client and multi-source fetch coordinator
//! - Station alias/name/id resolution and the merged station directory
//! - Reading extraction, summary statistics and textual classification
//! - Environment-based configuration
//!
//! It is used by `sgweather-bot`, but can also be reused by other
//! binaries or services.

pub mod classify;
pub mod client;
pub mod config;
pub mod format;
pub mod model;
pub mod readings;
pub mod stations;

pub use client::{ClientConfig, FetchError, WeatherClient};
pub use config::Settings;
pub use model::{Metric, SourceData, Station, SummaryStats, WeatherSnapshot};
