//! Pumping and tummy time charts

use rust_decimal::Decimal;
use serde_json::json;

use super::daily::{local_date, minutes, DailyTotals};
use super::spec::{Channel, Layer, Mark, Spec};
use super::{number, round2, Chart, ChartContext};
use crate::models::{Interval, Pumping, TummyTime};

/// Total milk pumped per day
pub fn pumping_amounts(rows: &[Pumping], ctx: &ChartContext) -> Chart {
    let mut totals: DailyTotals<Decimal> = DailyTotals::new();
    for pumping in rows {
        totals.add(local_date(pumping.time, ctx.offset), pumping.amount);
    }

    let values = totals
        .iter()
        .map(|(date, amount, count)| {
            json!({ "date": date.to_string(), "amount": number(amount), "sessions": count })
        })
        .collect();

    let spec = Spec::new(ctx.width)
        .layer(
            Layer::new(Mark::bar(), values)
                .x(Channel::temporal("date").by_day().title("Date"))
                .y(Channel::quantitative("amount").title("Pumping Amount")),
        )
        .interactive();

    Chart::new(spec)
}

/// Total tummy time per day, with the number of sessions on a second axis
pub fn tummytime_duration(rows: &[TummyTime], ctx: &ChartContext) -> Chart {
    let mut totals: DailyTotals<f64> = DailyTotals::new();
    for session in rows {
        totals.add(local_date(session.start, ctx.offset), minutes(session.duration()));
    }

    let values: Vec<_> = totals
        .iter()
        .map(|(date, total, count)| {
            json!({ "date": date.to_string(), "minutes": round2(total), "sessions": count })
        })
        .collect();

    let spec = Spec::new(ctx.width)
        .layer(
            Layer::new(Mark::bar(), values.clone())
                .x(Channel::temporal("date").by_day().title("Date"))
                .y(Channel::quantitative("minutes").title("Total duration (minutes)")),
        )
        .layer(
            Layer::new(Mark::line_with_points().color("orange"), values)
                .x(Channel::temporal("date").by_day().title("Date"))
                .y(Channel::quantitative("sessions").title("Number of sessions")),
        )
        .independent_y()
        .interactive();

    Chart::new(spec)
}
