//! Diaper change charts

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;

use super::daily::{hours, local_date, DailyTotals};
use super::spec::{Channel, Layer, Mark, Spec};
use super::{number, round2, Chart, ChartContext};
use crate::models::DiaperChange;

/// Total diaper change amount per day
pub fn diaperchange_amounts(rows: &[DiaperChange], ctx: &ChartContext) -> Chart {
    let mut totals: DailyTotals<Decimal> = DailyTotals::new();
    for change in rows {
        totals.add(
            local_date(change.time, ctx.offset),
            change.amount.unwrap_or_default(),
        );
    }

    let values = totals
        .iter()
        .map(|(date, amount, count)| {
            json!({ "date": date.to_string(), "amount": number(amount), "changes": count })
        })
        .collect();

    let spec = Spec::new(ctx.width)
        .layer(
            Layer::new(Mark::bar(), values)
                .x(Channel::temporal("date").by_day().title("Date"))
                .y(Channel::quantitative("amount").title("Change amount")),
        )
        .interactive();

    Chart::new(spec)
}

/// Distribution of the time a diaper stayed on between two changes.
///
/// Rows are sorted by time first, so `n` changes give `n - 1` gaps.
pub fn diaperchange_lifetimes(rows: &[DiaperChange], ctx: &ChartContext) -> Chart {
    let mut times: Vec<_> = rows.iter().map(|change| change.time).collect();
    times.sort();

    let values = times
        .windows(2)
        .map(|pair| json!({ "lifetime": round2(hours(pair[1] - pair[0])) }))
        .collect();

    let spec = Spec::new(ctx.width).layer(
        Layer::new(Mark::boxplot(), values)
            .y(Channel::quantitative("lifetime").title("Time between changes (hours)")),
    );

    Chart::new(spec)
}

/// Wet and solid changes per day, stacked, with the day's total on top
pub fn diaperchange_types(rows: &[DiaperChange], ctx: &ChartContext) -> Chart {
    // (wet, solid, changes)
    let mut days: BTreeMap<NaiveDate, (u32, u32, u32)> = BTreeMap::new();
    for change in rows {
        let day = days.entry(local_date(change.time, ctx.offset)).or_default();
        if change.wet {
            day.0 += 1;
        }
        if change.solid {
            day.1 += 1;
        }
        day.2 += 1;
    }

    let mut counts = Vec::new();
    let mut totals = Vec::new();
    for (date, (wet, solid, changes)) in &days {
        let date = date.to_string();
        counts.push(json!({ "date": date, "type": "Wet", "count": wet }));
        counts.push(json!({ "date": date, "type": "Solid", "count": solid }));
        totals.push(json!({ "date": date, "total": wet + solid, "changes": changes }));
    }

    let spec = Spec::new(ctx.width)
        .layer(
            Layer::new(Mark::bar(), counts)
                .x(Channel::temporal("date").by_day().title("Date"))
                .y(Channel::quantitative("count").title("Number of changes"))
                .color(Channel::nominal("type").title("Type")),
        )
        .layer(
            Layer::new(Mark::text(-5), totals)
                .x(Channel::temporal("date").by_day())
                .y(Channel::quantitative("total"))
                .text(Channel::quantitative("total")),
        )
        .interactive();

    Chart::new(spec)
}
