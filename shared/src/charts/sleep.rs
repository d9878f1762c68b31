//! Sleep charts

use serde_json::json;

use super::daily::{hours, split_by_day, DailyTotals};
use super::spec::{Channel, Layer, Mark, Spec};
use super::{round2, Chart, ChartContext};
use crate::models::Sleep;

fn sleep_label(sleep: &Sleep) -> &'static str {
    if sleep.nap {
        "Nap"
    } else {
        "Sleep"
    }
}

/// Each sleep drawn as a vertical range over the hours of the day it covers.
///
/// Sleeps crossing midnight appear on both days.
pub fn sleep_pattern(rows: &[Sleep], ctx: &ChartContext) -> Chart {
    let values = rows
        .iter()
        .flat_map(|sleep| {
            split_by_day(sleep, ctx.offset)
                .into_iter()
                .map(move |segment| {
                    json!({
                        "date": segment.date.to_string(),
                        "start": round2(segment.start_hour),
                        "end": round2(segment.end_hour),
                        "hours": round2(hours(segment.duration)),
                        "type": sleep_label(sleep),
                    })
                })
        })
        .collect();

    let spec = Spec::new(ctx.width).layer(
        Layer::new(Mark::bar(), values)
            .x(Channel::ordinal("date").title("Date"))
            .y(Channel::quantitative("start").domain(0.0, 24.0).title("Time of day (hours)"))
            .y2(Channel::secondary("end"))
            .color(Channel::nominal("type").title("Type")),
    );

    Chart::new(spec)
}

/// Hours slept per local day
pub fn sleep_totals(rows: &[Sleep], ctx: &ChartContext) -> Chart {
    let mut totals: DailyTotals<f64> = DailyTotals::new();
    for sleep in rows {
        for segment in split_by_day(sleep, ctx.offset) {
            totals.add(segment.date, hours(segment.duration));
        }
    }

    let values = totals
        .iter()
        .map(|(date, total, _)| json!({ "date": date.to_string(), "hours": round2(total) }))
        .collect();

    let spec = Spec::new(ctx.width)
        .layer(
            Layer::new(Mark::bar(), values)
                .x(Channel::temporal("date").by_day().title("Date"))
                .y(Channel::quantitative("hours").title("Hours of sleep")),
        )
        .interactive();

    Chart::new(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    fn ctx() -> ChartContext {
        ChartContext::new(
            FixedOffset::east_opt(0).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
        )
    }

    fn sleep(start: DateTime<Utc>, end: DateTime<Utc>, nap: bool) -> Sleep {
        Sleep {
            id: Uuid::new_v4(),
            child_id: Uuid::nil(),
            start,
            end,
            nap,
            notes: None,
        }
    }

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_pattern_splits_overnight_sleep() {
        let rows = vec![sleep(at(1, 20), at(2, 6), false), sleep(at(2, 13), at(2, 14), true)];
        let chart = sleep_pattern(&rows, &ctx());
        let values = &chart.spec.layer[0].data.values;
        assert_eq!(values.len(), 3);
        assert_eq!(values[0]["date"], "2024-02-01");
        assert_eq!(values[0]["start"], 20.0);
        assert_eq!(values[0]["end"], 24.0);
        assert_eq!(values[1]["date"], "2024-02-02");
        assert_eq!(values[1]["end"], 6.0);
        assert_eq!(values[2]["type"], "Nap");
    }

    #[test]
    fn test_totals_credit_each_day_its_share() {
        let rows = vec![sleep(at(1, 20), at(2, 6), false), sleep(at(2, 13), at(2, 14), true)];
        let chart = sleep_totals(&rows, &ctx());
        let values = &chart.spec.layer[0].data.values;
        assert_eq!(values[0], json!({ "date": "2024-02-01", "hours": 4.0 }));
        assert_eq!(values[1], json!({ "date": "2024-02-02", "hours": 7.0 }));
    }
}
