//! Chart builders for the per-child reports
//!
//! Builders take rows already loaded for one child and return a [`Chart`]
//! wrapping a Vega-Lite document. They never fail and never look at the
//! clock: "today" and the local-day boundary come from [`ChartContext`], so
//! the same rows always produce the same chart.

mod daily;
mod diaper;
mod feeding;
mod growth;
mod session;
mod sleep;
pub mod spec;

pub use daily::{local_date, split_by_day, DaySegment};
pub use diaper::{diaperchange_amounts, diaperchange_lifetimes, diaperchange_types};
pub use feeding::{feeding_amounts, feeding_duration, feeding_trend};
pub use growth::measurement_change;
pub use session::{pumping_amounts, tummytime_duration};
pub use sleep::{sleep_pattern, sleep_totals};

use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use self::spec::Spec;

pub const DEFAULT_CHART_WIDTH: u32 = 1000;

/// Everything a builder needs besides the rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartContext {
    /// Offset used to decide which calendar day an instant falls on
    pub offset: FixedOffset,
    /// Local calendar day treated as "today"
    pub today: NaiveDate,
    pub width: u32,
}

impl ChartContext {
    pub fn new(offset: FixedOffset, today: NaiveDate) -> Self {
        Self {
            offset,
            today,
            width: DEFAULT_CHART_WIDTH,
        }
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// `at` as an RFC 3339 timestamp in the local offset
    pub fn timestamp(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&self.offset)
            .to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// A drawable chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    /// DOM id of the container the chart is embedded into
    pub id: String,
    pub title: String,
    pub spec: Spec,
}

impl Chart {
    pub fn new(spec: Spec) -> Self {
        Self {
            id: "chart".to_string(),
            title: String::new(),
            spec,
        }
    }

    pub fn titled(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self.spec.title = Some(title.to_string());
        self
    }

    /// Derives the container id from a report slug
    pub fn with_id(mut self, slug: &str) -> Self {
        let cleaned: String = slug
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect();
        self.id = format!("chart-{}", cleaned);
        self
    }

    /// Container markup the script renders into
    pub fn html(&self) -> String {
        format!(r#"<div id="{}" class="chart"></div>"#, self.id)
    }

    /// Script body embedding the chart into its container
    pub fn js(&self) -> Result<String, serde_json::Error> {
        let spec = serde_json::to_string(&self.spec)?;
        Ok(format!(
            r##"vegaEmbed("#{}", {}, {{"actions": false}});"##,
            self.id,
            // A literal `</` would end the surrounding script element.
            spec.replace("</", "<\\/")
        ))
    }
}

/// Decimal column value as a plot coordinate
pub(crate) fn number(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// Rounds to two decimal places so repeated renders compare equal
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
