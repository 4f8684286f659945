//! `integer` and `number` payloads: the same five range keywords, over `i64`
//! and finite `f64` respectively.
use std::fmt;

use ordered_float::OrderedFloat;
use serde_json::{Map, Value};

use crate::codec::{ObjectView, put, put_number};
use crate::error::{NonFinite, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegerSchema {
    pub minimum: Option<i64>,
    pub maximum: Option<i64>,
    pub exclusive_minimum: Option<i64>,
    pub exclusive_maximum: Option<i64>,
    pub multiple_of: Option<i64>,
}

impl IntegerSchema {
    pub(crate) fn read(view: &ObjectView<'_>) -> Result<Self> {
        Ok(Self {
            minimum: view.integer("minimum")?,
            maximum: view.integer("maximum")?,
            exclusive_minimum: view.integer("exclusiveMinimum")?,
            exclusive_maximum: view.integer("exclusiveMaximum")?,
            multiple_of: view.integer("multipleOf")?,
        })
    }

    pub(crate) fn write(&self, out: &mut Map<String, Value>) {
        put(out, "minimum", self.minimum);
        put(out, "maximum", self.maximum);
        put(out, "exclusiveMinimum", self.exclusive_minimum);
        put(out, "exclusiveMaximum", self.exclusive_maximum);
        put(out, "multipleOf", self.multiple_of);
    }
}

/// An `f64` that is neither NaN nor infinite, so it always has a JSON spelling.
///
/// Ordered and hashable through `OrderedFloat`, which keeps nodes `Eq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FiniteF64(OrderedFloat<f64>);

impl FiniteF64 {
    pub fn new(value: f64) -> Option<Self> {
        value.is_finite().then_some(Self(OrderedFloat(value)))
    }

    pub fn get(self) -> f64 {
        self.0.0
    }
}

impl TryFrom<f64> for FiniteF64 {
    type Error = NonFinite;

    fn try_from(value: f64) -> std::result::Result<Self, NonFinite> {
        Self::new(value).ok_or(NonFinite(value))
    }
}

impl From<FiniteF64> for f64 {
    fn from(value: FiniteF64) -> f64 {
        value.get()
    }
}

impl fmt::Display for FiniteF64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberSchema {
    pub minimum: Option<FiniteF64>,
    pub maximum: Option<FiniteF64>,
    pub exclusive_minimum: Option<FiniteF64>,
    pub exclusive_maximum: Option<FiniteF64>,
    pub multiple_of: Option<FiniteF64>,
}

impl NumberSchema {
    pub(crate) fn read(view: &ObjectView<'_>) -> Result<Self> {
        Ok(Self {
            minimum: view.number("minimum")?,
            maximum: view.number("maximum")?,
            exclusive_minimum: view.number("exclusiveMinimum")?,
            exclusive_maximum: view.number("exclusiveMaximum")?,
            multiple_of: view.number("multipleOf")?,
        })
    }

    pub(crate) fn write(&self, out: &mut Map<String, Value>) {
        put_number(out, "minimum", self.minimum);
        put_number(out, "maximum", self.maximum);
        put_number(out, "exclusiveMinimum", self.exclusive_minimum);
        put_number(out, "exclusiveMaximum", self.exclusive_maximum);
        put_number(out, "multipleOf", self.multiple_of);
    }
}
