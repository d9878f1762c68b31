//! Per-child reports
//!
//! Each report reads one event type for one child and, when there is enough
//! data, turns it into a chart. [`report_query`] builds the statement the
//! backend runs; [`ReportData`] holds what came back and decides whether a
//! chart can be drawn.

use sea_query::{Alias, Expr, Order, Query, SelectStatement};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::charts::{self, Chart, ChartContext};
use crate::models::{
    Bmi, DiaperChange, Feeding, FeedingTotal, HeadCircumference, Height, Pumping, Sleep,
    Temperature, TummyTime, Weight,
};
use crate::schema::{EventColumn, EventKind};
use crate::types::TimeWindow;

/// Every chart report available for a child
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    BmiChange,
    DiaperChangeAmounts,
    DiaperChangeLifetimes,
    DiaperChangeTypes,
    FeedingAmounts,
    FeedingDuration,
    FeedingTrend,
    HeadCircumferenceChange,
    HeightChange,
    PumpingAmounts,
    SleepPattern,
    SleepTotals,
    TemperatureChange,
    TummyTimeDuration,
    WeightChange,
}

impl ReportKind {
    pub const ALL: [ReportKind; 15] = [
        ReportKind::BmiChange,
        ReportKind::DiaperChangeAmounts,
        ReportKind::DiaperChangeLifetimes,
        ReportKind::DiaperChangeTypes,
        ReportKind::FeedingAmounts,
        ReportKind::FeedingDuration,
        ReportKind::FeedingTrend,
        ReportKind::HeadCircumferenceChange,
        ReportKind::HeightChange,
        ReportKind::PumpingAmounts,
        ReportKind::SleepPattern,
        ReportKind::SleepTotals,
        ReportKind::TemperatureChange,
        ReportKind::TummyTimeDuration,
        ReportKind::WeightChange,
    ];

    /// Path segment under `/children/:slug/reports/`
    pub fn slug(&self) -> &'static str {
        match self {
            ReportKind::BmiChange => "bmi/bmi",
            ReportKind::DiaperChangeAmounts => "changes/amounts",
            ReportKind::DiaperChangeLifetimes => "changes/lifetimes",
            ReportKind::DiaperChangeTypes => "changes/types",
            ReportKind::FeedingAmounts => "feeding/amounts",
            ReportKind::FeedingDuration => "feeding/duration",
            ReportKind::FeedingTrend => "feeding/trend",
            ReportKind::HeadCircumferenceChange => "head-circumference/head-circumference",
            ReportKind::HeightChange => "height/height",
            ReportKind::PumpingAmounts => "pumping/amounts",
            ReportKind::SleepPattern => "sleep/pattern",
            ReportKind::SleepTotals => "sleep/totals",
            ReportKind::TemperatureChange => "temperature/temperature",
            ReportKind::TummyTimeDuration => "tummy-time/duration",
            ReportKind::WeightChange => "weight/weight",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        let slug = slug.trim_matches('/');
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::BmiChange => "Body Mass Index (BMI)",
            ReportKind::DiaperChangeAmounts => "Diaper Amounts",
            ReportKind::DiaperChangeLifetimes => "Diaper Lifetimes",
            ReportKind::DiaperChangeTypes => "Diaper Change Types",
            ReportKind::FeedingAmounts => "Feeding Amounts",
            ReportKind::FeedingDuration => "Feeding Durations (Average)",
            ReportKind::FeedingTrend => "Feeding Trend (Today)",
            ReportKind::HeadCircumferenceChange => "Head Circumference",
            ReportKind::HeightChange => "Height",
            ReportKind::PumpingAmounts => "Pumping Amounts",
            ReportKind::SleepPattern => "Sleep Pattern",
            ReportKind::SleepTotals => "Sleep Totals",
            ReportKind::TemperatureChange => "Temperature",
            ReportKind::TummyTimeDuration => "Tummy Time Durations (Sum)",
            ReportKind::WeightChange => "Weight",
        }
    }

    /// Entity the report reads
    pub fn event_kind(&self) -> EventKind {
        match self {
            ReportKind::BmiChange => EventKind::Bmi,
            ReportKind::DiaperChangeAmounts
            | ReportKind::DiaperChangeLifetimes
            | ReportKind::DiaperChangeTypes => EventKind::DiaperChange,
            ReportKind::FeedingAmounts | ReportKind::FeedingDuration | ReportKind::FeedingTrend => {
                EventKind::Feeding
            }
            ReportKind::HeadCircumferenceChange => EventKind::HeadCircumference,
            ReportKind::HeightChange => EventKind::Height,
            ReportKind::PumpingAmounts => EventKind::Pumping,
            ReportKind::SleepPattern | ReportKind::SleepTotals => EventKind::Sleep,
            ReportKind::TemperatureChange => EventKind::Temperature,
            ReportKind::TummyTimeDuration => EventKind::TummyTime,
            ReportKind::WeightChange => EventKind::Weight,
        }
    }

    /// Fewest rows that still make a meaningful chart
    pub fn min_records(&self) -> usize {
        match self {
            // A lifetime is the gap between two changes.
            ReportKind::DiaperChangeLifetimes => 2,
            _ => 1,
        }
    }
}

/// Statement loading the rows a report needs for `child_id`, oldest first.
///
/// `today` bounds the feeding trend; other reports read the child's full history.
pub fn report_query(kind: ReportKind, child_id: Uuid, today: TimeWindow) -> SelectStatement {
    let table = kind.event_kind();
    let time = Alias::new(table.time_column());

    let mut query = Query::select();
    query
        .columns(table.columns().iter().map(|column| (table, Alias::new(*column))))
        .from(table)
        .and_where(Expr::col((table, EventColumn::ChildId)).eq(child_id));

    match kind {
        ReportKind::DiaperChangeAmounts => {
            query.and_where(Expr::col((table, Alias::new("amount"))).gt(0));
        }
        ReportKind::FeedingTrend => {
            query
                .and_where(Expr::col((table, time.clone())).gte(today.start))
                .and_where(Expr::col((table, time.clone())).lt(today.end))
                .expr_as(
                    Expr::cust(r#"SUM("feedings"."amount") OVER (ORDER BY "feedings"."start")"#),
                    Alias::new("served_amount"),
                );
        }
        _ => {}
    }

    query
        .order_by((table, time), Order::Asc)
        .order_by((table, EventColumn::Id), Order::Asc);
    query
}

/// Rows loaded for one report
#[derive(Debug, Clone, PartialEq)]
pub enum ReportData {
    BmiChange(Vec<Bmi>),
    DiaperChangeAmounts(Vec<DiaperChange>),
    DiaperChangeLifetimes(Vec<DiaperChange>),
    DiaperChangeTypes(Vec<DiaperChange>),
    FeedingAmounts(Vec<Feeding>),
    FeedingDuration(Vec<Feeding>),
    FeedingTrend {
        feedings: Vec<FeedingTotal>,
        target: Option<rust_decimal::Decimal>,
    },
    HeadCircumferenceChange(Vec<HeadCircumference>),
    HeightChange(Vec<Height>),
    PumpingAmounts(Vec<Pumping>),
    SleepPattern(Vec<Sleep>),
    SleepTotals(Vec<Sleep>),
    TemperatureChange(Vec<Temperature>),
    TummyTimeDuration(Vec<TummyTime>),
    WeightChange(Vec<Weight>),
}

impl ReportData {
    pub fn kind(&self) -> ReportKind {
        match self {
            ReportData::BmiChange(_) => ReportKind::BmiChange,
            ReportData::DiaperChangeAmounts(_) => ReportKind::DiaperChangeAmounts,
            ReportData::DiaperChangeLifetimes(_) => ReportKind::DiaperChangeLifetimes,
            ReportData::DiaperChangeTypes(_) => ReportKind::DiaperChangeTypes,
            ReportData::FeedingAmounts(_) => ReportKind::FeedingAmounts,
            ReportData::FeedingDuration(_) => ReportKind::FeedingDuration,
            ReportData::FeedingTrend { .. } => ReportKind::FeedingTrend,
            ReportData::HeadCircumferenceChange(_) => ReportKind::HeadCircumferenceChange,
            ReportData::HeightChange(_) => ReportKind::HeightChange,
            ReportData::PumpingAmounts(_) => ReportKind::PumpingAmounts,
            ReportData::SleepPattern(_) => ReportKind::SleepPattern,
            ReportData::SleepTotals(_) => ReportKind::SleepTotals,
            ReportData::TemperatureChange(_) => ReportKind::TemperatureChange,
            ReportData::TummyTimeDuration(_) => ReportKind::TummyTimeDuration,
            ReportData::WeightChange(_) => ReportKind::WeightChange,
        }
    }

    /// Number of rows loaded
    pub fn len(&self) -> usize {
        match self {
            ReportData::BmiChange(rows) => rows.len(),
            ReportData::DiaperChangeAmounts(rows)
            | ReportData::DiaperChangeLifetimes(rows)
            | ReportData::DiaperChangeTypes(rows) => rows.len(),
            ReportData::FeedingAmounts(rows) | ReportData::FeedingDuration(rows) => rows.len(),
            ReportData::FeedingTrend { feedings, .. } => feedings.len(),
            ReportData::HeadCircumferenceChange(rows) => rows.len(),
            ReportData::HeightChange(rows) => rows.len(),
            ReportData::PumpingAmounts(rows) => rows.len(),
            ReportData::SleepPattern(rows) | ReportData::SleepTotals(rows) => rows.len(),
            ReportData::TemperatureChange(rows) => rows.len(),
            ReportData::TummyTimeDuration(rows) => rows.len(),
            ReportData::WeightChange(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Chart for the loaded rows, or `None` when there are too few to draw one
    pub fn chart(&self, ctx: &ChartContext) -> Option<Chart> {
        if self.len() < self.kind().min_records() {
            return None;
        }

        let chart = match self {
            ReportData::BmiChange(rows) => charts::measurement_change(rows, ctx),
            ReportData::DiaperChangeAmounts(rows) => charts::diaperchange_amounts(rows, ctx),
            ReportData::DiaperChangeLifetimes(rows) => charts::diaperchange_lifetimes(rows, ctx),
            ReportData::DiaperChangeTypes(rows) => charts::diaperchange_types(rows, ctx),
            ReportData::FeedingAmounts(rows) => charts::feeding_amounts(rows, ctx),
            ReportData::FeedingDuration(rows) => charts::feeding_duration(rows, ctx),
            ReportData::FeedingTrend { feedings, target } => {
                charts::feeding_trend(feedings, *target, ctx)
            }
            ReportData::HeadCircumferenceChange(rows) => charts::measurement_change(rows, ctx),
            ReportData::HeightChange(rows) => charts::measurement_change(rows, ctx),
            ReportData::PumpingAmounts(rows) => charts::pumping_amounts(rows, ctx),
            ReportData::SleepPattern(rows) => charts::sleep_pattern(rows, ctx),
            ReportData::SleepTotals(rows) => charts::sleep_totals(rows, ctx),
            ReportData::TemperatureChange(rows) => charts::measurement_change(rows, ctx),
            ReportData::TummyTimeDuration(rows) => charts::tummytime_duration(rows, ctx),
            ReportData::WeightChange(rows) => charts::measurement_change(rows, ctx),
        };

        Some(chart.titled(self.kind().title()).with_id(self.kind().slug()))
    }
}

/// Entry in a child's report list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLink {
    pub kind: ReportKind,
    pub title: &'static str,
    pub slug: &'static str,
    pub url: String,
}

/// Links to every report for the child with `child_slug`, under `prefix`
pub fn report_links(prefix: &str, child_slug: &str) -> Vec<ReportLink> {
    ReportKind::ALL
        .into_iter()
        .map(|kind| ReportLink {
            kind,
            title: kind.title(),
            slug: kind.slug(),
            url: format!("{}/children/{}/reports/{}", prefix, child_slug, kind.slug()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate};
    use sea_query::PostgresQueryBuilder;

    fn today() -> TimeWindow {
        TimeWindow::local_day(
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            FixedOffset::east_opt(0).unwrap(),
        )
    }

    #[test]
    fn test_slugs_resolve() {
        for kind in ReportKind::ALL {
            assert_eq!(ReportKind::from_slug(kind.slug()), Some(kind));
        }
        assert_eq!(ReportKind::from_slug("/sleep/totals/"), Some(ReportKind::SleepTotals));
        assert_eq!(ReportKind::from_slug("sleep"), None);
    }

    #[test]
    fn test_query_is_scoped_to_child_and_ordered() {
        let child = Uuid::new_v4();
        let sql = report_query(ReportKind::SleepTotals, child, today()).to_string(PostgresQueryBuilder);
        assert!(sql.contains(r#""sleeps"."child_id" ="#), "{}", sql);
        assert!(sql.contains(&child.to_string()));
        assert!(sql.ends_with(r#"ORDER BY "sleeps"."start" ASC, "sleeps"."id" ASC"#), "{}", sql);
    }

    #[test]
    fn test_diaper_amounts_skip_zero_amounts() {
        let sql = report_query(ReportKind::DiaperChangeAmounts, Uuid::new_v4(), today())
            .to_string(PostgresQueryBuilder);
        assert!(sql.contains(r#""diaper_changes"."amount" > 0"#), "{}", sql);

        let types = report_query(ReportKind::DiaperChangeTypes, Uuid::new_v4(), today())
            .to_string(PostgresQueryBuilder);
        assert!(!types.contains("amount\" >"));
    }

    #[test]
    fn test_feeding_trend_is_today_with_running_total() {
        let sql = report_query(ReportKind::FeedingTrend, Uuid::new_v4(), today())
            .to_string(PostgresQueryBuilder);
        assert!(sql.contains(r#""feedings"."start" >="#), "{}", sql);
        assert!(sql.contains(r#""feedings"."start" <"#));
        assert!(sql.contains("2024-05-01 00:00:00"));
        assert!(sql.contains("2024-05-02 00:00:00"));
        assert!(sql.contains(r#"OVER (ORDER BY "feedings"."start") AS "served_amount""#));
    }

    #[test]
    fn test_report_links_cover_every_report() {
        let links = report_links("/api/v1", "ada-lovelace");
        assert_eq!(links.len(), ReportKind::ALL.len());
        assert_eq!(links[0].url, "/api/v1/children/ada-lovelace/reports/bmi/bmi");
    }
}
