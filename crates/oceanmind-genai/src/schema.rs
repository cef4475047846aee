//! Declarative response-shape contracts for schema-constrained generation.
//!
//! A `SchemaDescriptor` is pure data: it describes the field set, nesting,
//! and primitive types a generated response must satisfy, in the shape the
//! generateContent `responseSchema` field expects. Supplying a schema improves
//! but does not guarantee conformance, so callers validate independently.

use serde_json::{json, Value};

/// The expected shape of a generated value.
#[derive(Clone, Debug, PartialEq)]
pub enum SchemaDescriptor {
    String,
    Number,
    Object(Vec<(String, SchemaDescriptor)>),
    Array(Box<SchemaDescriptor>),
}

impl SchemaDescriptor {
    fn object(fields: &[(&str, SchemaDescriptor)]) -> Self {
        SchemaDescriptor::Object(
            fields
                .iter()
                .map(|(name, schema)| (name.to_string(), schema.clone()))
                .collect(),
        )
    }

    fn array(items: SchemaDescriptor) -> Self {
        SchemaDescriptor::Array(Box::new(items))
    }

    /// Render the descriptor as the JSON value sent on the wire.
    pub fn to_value(&self) -> Value {
        match self {
            SchemaDescriptor::String => json!({ "type": "STRING" }),
            SchemaDescriptor::Number => json!({ "type": "NUMBER" }),
            SchemaDescriptor::Object(fields) => {
                let properties: serde_json::Map<String, Value> = fields
                    .iter()
                    .map(|(name, schema)| (name.clone(), schema.to_value()))
                    .collect();
                json!({ "type": "OBJECT", "properties": properties })
            }
            SchemaDescriptor::Array(items) => {
                json!({ "type": "ARRAY", "items": items.to_value() })
            }
        }
    }
}

fn metric_reading_schema() -> SchemaDescriptor {
    SchemaDescriptor::object(&[
        ("value", SchemaDescriptor::Number),
        ("unit", SchemaDescriptor::String),
        ("trend", SchemaDescriptor::String),
        ("status", SchemaDescriptor::String),
    ])
}

fn alert_schema() -> SchemaDescriptor {
    SchemaDescriptor::object(&[
        ("id", SchemaDescriptor::String),
        ("type", SchemaDescriptor::String),
        ("severity", SchemaDescriptor::String),
        ("location", SchemaDescriptor::String),
        ("timestamp", SchemaDescriptor::String),
        ("status", SchemaDescriptor::String),
    ])
}

/// Schema for a dashboard snapshot: six named metric readings, an alert
/// array, and a summary string.
pub fn dashboard_schema() -> SchemaDescriptor {
    SchemaDescriptor::object(&[
        (
            "metrics",
            SchemaDescriptor::object(&[
                ("temperature", metric_reading_schema()),
                ("phLevel", metric_reading_schema()),
                ("dissolvedOxygen", metric_reading_schema()),
                ("salinity", metric_reading_schema()),
                ("turbidity", metric_reading_schema()),
                ("plasticIndex", metric_reading_schema()),
            ]),
        ),
        ("alerts", SchemaDescriptor::array(alert_schema())),
        ("summary", SchemaDescriptor::String),
    ])
}

/// Schema for an analysis time series: an array of hourly points.
pub fn time_series_schema() -> SchemaDescriptor {
    SchemaDescriptor::array(SchemaDescriptor::object(&[
        ("time", SchemaDescriptor::String),
        ("value", SchemaDescriptor::Number),
        ("secondaryValue", SchemaDescriptor::Number),
    ]))
}
