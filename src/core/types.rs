use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ChartError, ChartResult};

/// Pixel size of a drawing surface or plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Space reserved around the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Margin {
    #[must_use]
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    #[must_use]
    pub fn horizontal(self) -> f64 {
        self.left + self.right
    }

    #[must_use]
    pub fn vertical(self) -> f64 {
        self.top + self.bottom
    }
}

/// One record of the chart data table.
///
/// Fields keep insertion order. The pipeline never interprets a record beyond
/// reading numbers at the configured x/y keys, so any extra fields (series
/// names, tooltips, ids) ride along untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataPoint {
    fields: IndexMap<String, Value>,
}

impl DataPoint {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for the common `{x, y}` record.
    #[must_use]
    pub fn xy(x: f64, y: f64) -> Self {
        Self::new().with_number("x", x).with_number("y", y)
    }

    #[must_use]
    pub fn with_number(mut self, key: impl Into<String>, value: f64) -> Self {
        // Non-finite numbers have no JSON representation and are stored as null.
        let value = serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number);
        self.fields.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn with_text(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), Value::String(value.into()));
        self
    }

    /// Stores a timestamp as fractional unix seconds.
    #[must_use]
    pub fn with_time(self, key: impl Into<String>, time: DateTime<Utc>) -> Self {
        self.with_number(key, time.timestamp_millis() as f64 / 1000.0)
    }

    pub fn with_decimal(self, key: impl Into<String>, value: Decimal) -> ChartResult<Self> {
        let key = key.into();
        let number = value.to_f64().ok_or_else(|| {
            ChartError::InvalidData(format!("field `{key}` cannot be represented as f64"))
        })?;
        Ok(self.with_number(key, number))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Numeric value stored at `key`, if any.
    #[must_use]
    pub fn number(&self, key: &str) -> Option<f64> {
        self.fields
            .get(key)
            .and_then(Value::as_f64)
            .filter(|value| value.is_finite())
    }

    #[must_use]
    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }
}

impl FromIterator<(String, Value)> for DataPoint {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
