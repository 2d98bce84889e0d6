use std::fmt;
use std::sync::Arc;

use serde::de::{self, Deserializer, Visitor};
use serde::ser::{self, Serializer};
use serde::{Deserialize, Serialize};

use crate::core::Curve;

/// Visibility switch that is either fixed or decided per element.
///
/// Serializes as a plain boolean; predicates exist only in code.
pub enum Gate<F: ?Sized> {
    Always,
    Never,
    Predicate(Arc<F>),
}

/// Decides per `(series_index, point_index)` whether a point marker is drawn.
pub type PointGate = Gate<dyn Fn(usize, usize) -> bool + Send + Sync>;

/// Decides per `(curve, series_index)` whether a filled area is drawn.
pub type AreaGate = Gate<dyn Fn(&Curve, usize) -> bool + Send + Sync>;

impl<F: ?Sized> Gate<F> {
    #[must_use]
    pub fn from_bool(enabled: bool) -> Self {
        if enabled { Self::Always } else { Self::Never }
    }

    /// `true` for `Never`, where a caller can skip the whole layer.
    #[must_use]
    pub fn is_never(&self) -> bool {
        matches!(self, Self::Never)
    }
}

impl PointGate {
    #[must_use]
    pub fn predicate(f: impl Fn(usize, usize) -> bool + Send + Sync + 'static) -> Self {
        Self::Predicate(Arc::new(f))
    }

    #[must_use]
    pub fn allows(&self, series_index: usize, point_index: usize) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Predicate(f) => f(series_index, point_index),
        }
    }
}

impl AreaGate {
    #[must_use]
    pub fn predicate(f: impl Fn(&Curve, usize) -> bool + Send + Sync + 'static) -> Self {
        Self::Predicate(Arc::new(f))
    }

    #[must_use]
    pub fn allows(&self, curve: &Curve, series_index: usize) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Predicate(f) => f(curve, series_index),
        }
    }
}

impl<F: ?Sized> Clone for Gate<F> {
    fn clone(&self) -> Self {
        match self {
            Self::Always => Self::Always,
            Self::Never => Self::Never,
            Self::Predicate(f) => Self::Predicate(Arc::clone(f)),
        }
    }
}

impl<F: ?Sized> PartialEq for Gate<F> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Always, Self::Always) | (Self::Never, Self::Never) => true,
            (Self::Predicate(left), Self::Predicate(right)) => Arc::ptr_eq(left, right),
            _ => false,
        }
    }
}

impl<F: ?Sized> fmt::Debug for Gate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => f.write_str("Always"),
            Self::Never => f.write_str("Never"),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl<F: ?Sized> Serialize for Gate<F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Always => serializer.serialize_bool(true),
            Self::Never => serializer.serialize_bool(false),
            Self::Predicate(_) => Err(ser::Error::custom(
                "predicate gates cannot be serialized",
            )),
        }
    }
}

impl<'de, F: ?Sized> Deserialize<'de> for Gate<F> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BoolVisitor;

        impl Visitor<'_> for BoolVisitor {
            type Value = bool;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a boolean gate")
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> Result<bool, E> {
                Ok(value)
            }
        }

        deserializer
            .deserialize_bool(BoolVisitor)
            .map(Self::from_bool)
    }
}
