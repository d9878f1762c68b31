//! Line charts of a single measurement over time

use serde_json::json;

use super::spec::{Channel, Layer, Mark, Spec};
use super::{number, Chart, ChartContext};
use crate::models::{Measurement, TakenAt};

/// Measured value against the day (or moment) it was taken
pub fn measurement_change<M: Measurement>(rows: &[M], ctx: &ChartContext) -> Chart {
    let values = rows
        .iter()
        .map(|row| {
            let date = match row.taken_at() {
                TakenAt::Day(day) => day.to_string(),
                TakenAt::Moment(at) => ctx.timestamp(at),
            };
            json!({ "date": date, "value": number(row.value()) })
        })
        .collect();

    let spec = Spec::new(ctx.width)
        .layer(
            Layer::new(Mark::line_with_points(), values)
                .x(Channel::temporal("date").title("Date"))
                .y(Channel::quantitative("value").title(M::LABEL)),
        )
        .interactive();

    Chart::new(spec)
}
