//! Typed subset of the Vega-Lite grammar
//!
//! Only the pieces the reports use are modelled. Every layer carries its own
//! inline data so layers with different row shapes can be combined.

use serde::Serialize;
use serde_json::Value;

pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

/// A complete, layered Vega-Lite document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spec {
    #[serde(rename = "$schema")]
    pub schema: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub layer: Vec<Layer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolve: Option<Resolve>,
}

impl Spec {
    pub fn new(width: u32) -> Self {
        Self {
            schema: VEGA_LITE_SCHEMA,
            title: None,
            width,
            height: None,
            layer: Vec::new(),
            resolve: None,
        }
    }

    pub fn layer(mut self, layer: Layer) -> Self {
        self.layer.push(layer);
        self
    }

    /// Give every layer its own y scale
    pub fn independent_y(mut self) -> Self {
        self.resolve = Some(Resolve {
            scale: ResolveScale { y: "independent" },
        });
        self
    }

    /// Pan and zoom on both axes, as an interval selection bound to the scales
    pub fn interactive(mut self) -> Self {
        if let Some(first) = self.layer.first_mut() {
            if !first.params.iter().any(|param| param.name == "grid") {
                first.params.push(Param {
                    name: "grid",
                    select: "interval",
                    bind: "scales",
                });
            }
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolve {
    pub scale: ResolveScale,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolveScale {
    pub y: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub name: &'static str,
    pub select: &'static str,
    pub bind: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Data {
    pub values: Vec<Value>,
}

/// One mark drawn over one data set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    pub data: Data,
    pub mark: Mark,
    pub encoding: Encoding,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,
}

impl Layer {
    pub fn new(mark: Mark, values: Vec<Value>) -> Self {
        Self {
            data: Data { values },
            mark,
            encoding: Encoding::default(),
            params: Vec::new(),
        }
    }

    pub fn x(mut self, channel: Channel) -> Self {
        self.encoding.x = Some(channel);
        self
    }

    pub fn y(mut self, channel: Channel) -> Self {
        self.encoding.y = Some(channel);
        self
    }

    pub fn y2(mut self, channel: Channel) -> Self {
        self.encoding.y2 = Some(channel);
        self
    }

    pub fn color(mut self, channel: Channel) -> Self {
        self.encoding.color = Some(channel);
        self
    }

    pub fn text(mut self, channel: Channel) -> Self {
        self.encoding.text = Some(channel);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkType {
    Bar,
    Line,
    Text,
    Boxplot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub kind: MarkType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dy: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<bool>,
}

impl Mark {
    fn of(kind: MarkType) -> Self {
        Self {
            kind,
            color: None,
            dy: None,
            clip: None,
            point: None,
            tooltip: Some(true),
        }
    }

    pub fn bar() -> Self {
        Self::of(MarkType::Bar)
    }

    pub fn line() -> Self {
        Self::of(MarkType::Line)
    }

    /// Line with a dot at each data point
    pub fn line_with_points() -> Self {
        Self {
            point: Some(true),
            ..Self::of(MarkType::Line)
        }
    }

    /// Label text nudged `dy` pixels vertically
    pub fn text(dy: i32) -> Self {
        Self {
            dy: Some(dy),
            tooltip: None,
            ..Self::of(MarkType::Text)
        }
    }

    pub fn boxplot() -> Self {
        Self {
            tooltip: None,
            ..Self::of(MarkType::Boxplot)
        }
    }

    pub fn color(mut self, color: &'static str) -> Self {
        self.color = Some(color);
        self
    }

    pub fn clipped(mut self) -> Self {
        self.clip = Some(true);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Encoding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y2: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Channel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Temporal,
    Quantitative,
    Nominal,
    Ordinal,
}

/// Maps one data field onto a visual channel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Channel {
    pub field: &'static str,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<FieldType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "timeUnit", skip_serializing_if = "Option::is_none")]
    pub time_unit: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<Value>,
}

impl Channel {
    fn of(field: &'static str, kind: Option<FieldType>) -> Self {
        Self {
            field,
            kind,
            title: None,
            time_unit: None,
            scale: None,
        }
    }

    pub fn temporal(field: &'static str) -> Self {
        Self::of(field, Some(FieldType::Temporal))
    }

    pub fn quantitative(field: &'static str) -> Self {
        Self::of(field, Some(FieldType::Quantitative))
    }

    pub fn nominal(field: &'static str) -> Self {
        Self::of(field, Some(FieldType::Nominal))
    }

    pub fn ordinal(field: &'static str) -> Self {
        Self::of(field, Some(FieldType::Ordinal))
    }

    /// Second coordinate of a ranged mark; shares the primary channel's type
    pub fn secondary(field: &'static str) -> Self {
        Self::of(field, None)
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Bucket temporal values by calendar day
    pub fn by_day(mut self) -> Self {
        self.time_unit = Some("yearmonthdate");
        self
    }

    pub fn domain(mut self, min: f64, max: f64) -> Self {
        self.scale = Some(serde_json::json!({ "domain": [min, max] }));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_layer_serializes_to_vega_lite() {
        let spec = Spec::new(600)
            .layer(
                Layer::new(Mark::bar(), vec![json!({ "day": "2024-01-01", "n": 2 })])
                    .x(Channel::temporal("day").by_day().title("Date"))
                    .y(Channel::quantitative("n")),
            )
            .interactive();

        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["$schema"], VEGA_LITE_SCHEMA);
        assert_eq!(value["width"], 600);
        assert_eq!(value["layer"][0]["mark"]["type"], "bar");
        assert_eq!(value["layer"][0]["encoding"]["x"]["timeUnit"], "yearmonthdate");
        assert_eq!(value["layer"][0]["encoding"]["y"]["type"], "quantitative");
        assert_eq!(value["layer"][0]["params"][0]["bind"], "scales");
        assert!(value.get("resolve").is_none());
        assert!(value["layer"][0]["encoding"].get("color").is_none());
    }

    #[test]
    fn test_interactive_is_added_once() {
        let spec = Spec::new(100)
            .layer(Layer::new(Mark::line(), Vec::new()))
            .layer(Layer::new(Mark::text(-5), Vec::new()))
            .interactive()
            .interactive();
        assert_eq!(spec.layer[0].params.len(), 1);
        assert!(spec.layer[1].params.is_empty());
    }
}
