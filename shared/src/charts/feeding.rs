//! Feeding charts

use chrono::Duration;
use rust_decimal::Decimal;
use serde_json::json;

use super::daily::{local_date, minutes, DailyTotals};
use super::spec::{Channel, Layer, Mark, Spec};
use super::{number, round2, Chart, ChartContext};
use crate::models::{Feeding, FeedingTotal, Interval};
use crate::types::local_midnight;

/// Amount of every feeding at its start time, coloured by method
pub fn feeding_amounts(rows: &[Feeding], ctx: &ChartContext) -> Chart {
    let values = rows
        .iter()
        .map(|feeding| {
            json!({
                "start": ctx.timestamp(feeding.start),
                "amount": feeding.amount.map(number),
                "method": feeding.method.label(),
            })
        })
        .collect();

    let spec = Spec::new(ctx.width)
        .layer(
            Layer::new(Mark::bar(), values)
                .x(Channel::temporal("start").title("Date"))
                .y(Channel::quantitative("amount").title("Feeding amount"))
                .color(Channel::nominal("method").title("Method")),
        )
        .interactive();

    Chart::new(spec)
}

/// Average feeding length per day, with the number of feedings on a second axis
pub fn feeding_duration(rows: &[Feeding], ctx: &ChartContext) -> Chart {
    let mut totals: DailyTotals<f64> = DailyTotals::new();
    for feeding in rows {
        totals.add(local_date(feeding.start, ctx.offset), minutes(feeding.duration()));
    }

    let values: Vec<_> = totals
        .iter()
        .map(|(date, total, count)| {
            json!({
                "date": date.to_string(),
                "average": round2(total / count as f64),
                "feedings": count,
            })
        })
        .collect();

    let spec = Spec::new(ctx.width)
        .layer(
            Layer::new(Mark::bar(), values.clone())
                .x(Channel::temporal("date").by_day().title("Date"))
                .y(Channel::quantitative("average").title("Average duration (minutes)")),
        )
        .layer(
            Layer::new(Mark::line_with_points().color("orange"), values)
                .x(Channel::temporal("date").by_day().title("Date"))
                .y(Channel::quantitative("feedings").title("Number of feedings")),
        )
        .independent_y()
        .interactive();

    Chart::new(spec)
}

/// Today's feedings against the running amount served and the child's daily target.
///
/// The goal line rises from zero at local midnight to `target` at the last
/// second of the day and is left out when the child has no target.
pub fn feeding_trend(
    feedings: &[FeedingTotal],
    target: Option<Decimal>,
    ctx: &ChartContext,
) -> Chart {
    let amounts: Vec<_> = feedings
        .iter()
        .map(|row| {
            json!({
                "start": ctx.timestamp(row.feeding.start),
                "amount": row.feeding.amount.map(number),
                "type": row.feeding.feeding_type.label(),
            })
        })
        .collect();
    let served: Vec<_> = feedings
        .iter()
        .map(|row| {
            json!({
                "start": ctx.timestamp(row.feeding.start),
                "served": row.served_amount.map(number),
            })
        })
        .collect();

    let mut spec = Spec::new(ctx.width)
        .layer(
            Layer::new(Mark::bar(), amounts.clone())
                .x(Channel::temporal("start").title("Feeding Time"))
                .y(Channel::quantitative("amount").title("Amount"))
                .color(Channel::nominal("type").title("Type")),
        )
        .layer(
            Layer::new(Mark::text(-5), amounts)
                .x(Channel::temporal("start"))
                .y(Channel::quantitative("amount"))
                .text(Channel::quantitative("amount")),
        )
        .layer(
            Layer::new(Mark::line_with_points().color("green"), served.clone())
                .x(Channel::temporal("start"))
                .y(Channel::quantitative("served")),
        )
        .layer(
            Layer::new(Mark::text(-5).color("green"), served)
                .x(Channel::temporal("start"))
                .y(Channel::quantitative("served"))
                .text(Channel::quantitative("served")),
        );

    if let Some(target) = target {
        let midnight = local_midnight(ctx.today, ctx.offset);
        let last_second = midnight + Duration::days(1) - Duration::seconds(1);
        let goal = vec![
            json!({ "start": ctx.timestamp(midnight), "goal": 0.0 }),
            json!({ "start": ctx.timestamp(last_second), "goal": number(target) }),
        ];
        spec = spec.layer(
            Layer::new(Mark::line().color("salmon").clipped(), goal)
                .x(Channel::temporal("start"))
                .y(Channel::quantitative("goal")),
        );
    }

    Chart::new(spec.interactive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FeedingMethod, FeedingType};
    use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    fn ctx() -> ChartContext {
        ChartContext::new(
            FixedOffset::east_opt(2 * 3600).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        )
    }

    fn feeding(start: DateTime<Utc>, minutes: i64, amount: Option<i64>) -> Feeding {
        Feeding {
            id: Uuid::new_v4(),
            child_id: Uuid::nil(),
            start,
            end: start + Duration::minutes(minutes),
            feeding_type: FeedingType::Formula,
            method: FeedingMethod::Bottle,
            amount: amount.map(Decimal::from),
            notes: None,
        }
    }

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_amounts_use_method_labels() {
        let chart = feeding_amounts(&[feeding(at(1, 8), 10, Some(90))], &ctx());
        let row = &chart.spec.layer[0].data.values[0];
        assert_eq!(row["method"], "Bottle");
        assert_eq!(row["amount"], 90.0);
        assert_eq!(row["start"], "2024-02-01T10:00:00+02:00");
    }

    #[test]
    fn test_duration_averages_per_day() {
        let rows = vec![
            feeding(at(1, 8), 10, None),
            feeding(at(1, 12), 20, None),
            feeding(at(2, 8), 30, None),
        ];
        let chart = feeding_duration(&rows, &ctx());
        let values = &chart.spec.layer[0].data.values;
        assert_eq!(values[0]["average"], 15.0);
        assert_eq!(values[0]["feedings"], 2);
        assert_eq!(values[1]["average"], 30.0);
    }

    #[test]
    fn test_trend_goal_line_spans_today() {
        let rows = vec![
            FeedingTotal {
                feeding: feeding(at(1, 6), 15, Some(60)),
                served_amount: Some(Decimal::from(60)),
            },
            FeedingTotal {
                feeding: feeding(at(1, 9), 15, Some(80)),
                served_amount: Some(Decimal::from(140)),
            },
        ];
        let chart = feeding_trend(&rows, Some(Decimal::from(600)), &ctx());
        assert_eq!(chart.spec.layer.len(), 5);

        let goal = &chart.spec.layer[4];
        assert_eq!(goal.mark.color, Some("salmon"));
        assert_eq!(goal.mark.clip, Some(true));
        assert_eq!(goal.data.values[0]["start"], "2024-02-01T00:00:00+02:00");
        assert_eq!(goal.data.values[0]["goal"], 0.0);
        assert_eq!(goal.data.values[1]["start"], "2024-02-01T23:59:59+02:00");
        assert_eq!(goal.data.values[1]["goal"], 600.0);

        let served = &chart.spec.layer[2];
        assert_eq!(served.data.values[1]["served"], 140.0);
    }

    #[test]
    fn test_trend_without_target_has_no_goal_line() {
        let rows = vec![FeedingTotal {
            feeding: feeding(at(1, 6), 15, Some(60)),
            served_amount: Some(Decimal::from(60)),
        }];
        let chart = feeding_trend(&rows, None, &ctx());
        assert_eq!(chart.spec.layer.len(), 4);
        assert!(chart.spec.layer.iter().all(|layer| layer.mark.color != Some("salmon")));
    }
}
