//! Scales: the train / transform / inverse / breaks contract and its
//! implementations.
//!
//! A render pass trains every scale once on the full mapped column, then
//! calls [`Scale::transform`] per value. Per-value failures never error; they
//! map to [`Mapped::Missing`] or to the scale's NA value.

use fastnum::decimal::D128;
use serde::Deserialize;

use crate::aesthetic::Aesthetic;
use crate::error::{Result, ScaleError};
use crate::label;
use crate::value::{Mapped, Value};

pub mod any;
pub mod binned;
pub mod continuous;
pub mod discrete;
pub mod gradient;
pub mod log;
pub mod manual;
pub mod nice;
pub mod palette;
pub mod temporal;
mod tick_iter;
pub mod transformation;
pub mod util;

pub use any::AnyScale;
pub use binned::{BinnedConfig, BinnedScale};
pub use continuous::{ContinuousConfig, ContinuousScale, Oob};
pub use discrete::{DiscreteConfig, DiscreteScale, Levels};
pub use gradient::{GradientConfig, GradientKind, GradientScale};
pub use manual::{IdentityScale, ManualConfig, ManualScale, ManualValues};
pub use palette::{PaletteConfig, PaletteKind, PaletteScale};
pub use temporal::{Interval, TemporalConfig, TemporalKind, TemporalScale, TimeUnit};
pub use tick_iter::TickIter;
pub use transformation::Transformation;

/// A tick mark position.
///
/// `level` 0 is a major tick, 1 a minor tick. Ticks produced by
/// [`Scale::ticks`] carry range-space positions; the break helpers in
/// [`nice`] and [`log`] produce data-space values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub value: D128,
    pub level: u8,
}

/// The trained extent of a scale.
#[derive(Debug, Clone, PartialEq)]
pub enum Domain {
    /// Not trained yet, or trained on nothing usable.
    Empty,
    /// Numeric extent in data space, expansion included. Temporal scales
    /// report epoch days (dates) or seconds (date-times, times of day).
    Continuous { min: D128, max: D128 },
    /// Ordered levels.
    Discrete(Vec<Value>),
}

impl Domain {
    pub fn is_empty(&self) -> bool {
        match self {
            Domain::Empty => true,
            Domain::Continuous { .. } => false,
            Domain::Discrete(levels) => levels.is_empty(),
        }
    }
}

/// The shared scale contract.
///
/// Object safe, so a coordinate system can hold `&dyn Scale` for each axis.
pub trait Scale {
    fn aesthetic(&self) -> Aesthetic;

    /// Axis or legend title.
    fn name(&self) -> Option<&str>;

    /// True once `train` has seen at least one usable value.
    fn is_trained(&self) -> bool;

    /// Computes the domain from a full column. Input with no usable values
    /// leaves the scale unchanged.
    fn train(&mut self, values: &[Value]);

    /// Returns to the untrained state and drops cached palettes.
    fn reset(&mut self);

    /// Maps one data value into range space.
    fn transform(&self, value: &Value) -> Mapped;

    /// Maps a range-space position back to a data value.
    fn inverse(&self, position: &D128) -> Option<Value>;

    fn domain(&self) -> Domain;

    /// Numeric output range, for scales that have one.
    fn range(&self) -> Option<(D128, D128)> {
        None
    }

    /// Break values in data space, ordered.
    fn computed_breaks(&self) -> Vec<Value>;

    fn computed_minor_breaks(&self) -> Vec<Value> {
        Vec::new()
    }

    /// One display string per break.
    fn computed_labels(&self) -> Vec<String>;

    /// Band width in range units, for discrete positional scales.
    fn bandwidth(&self) -> Option<D128> {
        None
    }

    /// Maps a whole column.
    fn transform_all(&self, values: &[Value]) -> Vec<Mapped> {
        values.iter().map(|value| self.transform(value)).collect()
    }

    /// Range-space positions of the major and minor breaks.
    fn ticks(&self) -> TickIter {
        let majors = self.computed_breaks().into_iter().map(|value| (value, 0u8));
        let minors = self.computed_minor_breaks().into_iter().map(|value| (value, 1u8));
        let mut ticks: Vec<Tick> = majors
            .chain(minors)
            .filter_map(|(value, level)| {
                self.transform(&value)
                    .as_number()
                    .map(|position| Tick { value: position, level })
            })
            .collect();
        ticks.sort_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(std::cmp::Ordering::Equal));
        TickIter::from_vec(ticks)
    }
}

fn default_n_breaks() -> usize {
    5
}

/// Options every scale accepts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommonConfig {
    pub name: Option<String>,
    /// `[min, max]` for continuous scales (either end may be null), or the
    /// allowed levels for discrete ones.
    pub limits: Option<Vec<Value>>,
    /// `[mult, add]` padding.
    pub expand: Option<(f64, f64)>,
    /// Explicit breaks. An empty list means no breaks.
    pub breaks: Option<Vec<Value>>,
    pub labels: Option<Vec<String>>,
    #[serde(default = "default_n_breaks")]
    pub n_breaks: usize,
    pub na_value: Option<Value>,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            name: None,
            limits: None,
            expand: None,
            breaks: None,
            labels: None,
            n_breaks: default_n_breaks(),
            na_value: None,
        }
    }
}

impl CommonConfig {
    /// Option keys owned by this struct.
    pub const KEYS: &'static [&'static str] = &[
        "name", "limits", "expand", "breaks", "labels", "n_breaks", "na_value",
    ];

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub(crate) fn validate(&self, scale: &'static str) -> Result<()> {
        if let Some((mult, add)) = self.expand {
            if !mult.is_finite() || !add.is_finite() {
                return Err(ScaleError::invalid(scale, "expand", "values must be finite"));
            }
        }
        if self.n_breaks == 0 {
            return Err(ScaleError::invalid(scale, "n_breaks", "must be at least 1"));
        }
        if let (Some(breaks), Some(labels)) = (&self.breaks, &self.labels) {
            if breaks.len() != labels.len() {
                return Err(ScaleError::LabelCountMismatch {
                    breaks: breaks.len(),
                    labels: labels.len(),
                });
            }
        }
        Ok(())
    }

    /// Explicit `[mult, add]` or the given default, as decimals.
    pub(crate) fn expand_or(&self, default: (f64, f64)) -> (D128, D128) {
        let (mult, add) = self.expand.unwrap_or(default);
        (
            util::dec(mult).unwrap_or(D128::from(0)),
            util::dec(add).unwrap_or(D128::from(0)),
        )
    }

    /// Labels for `breaks`: configured labels when they line up one to one,
    /// formatted values otherwise.
    pub(crate) fn labels_for<F>(&self, breaks: &[Value], format: F) -> Vec<String>
    where
        F: Fn(&Value) -> String,
    {
        match &self.labels {
            Some(labels) if labels.len() == breaks.len() => labels.clone(),
            Some(labels) => {
                ::log::warn!(
                    "{} labels for {} breaks, falling back to formatted values",
                    labels.len(),
                    breaks.len()
                );
                breaks.iter().map(format).collect()
            }
            None => breaks.iter().map(format).collect(),
        }
    }

    /// The configured NA value as a mapped result, if any.
    pub(crate) fn na_mapped(&self) -> Option<Mapped> {
        self.na_value.as_ref().map(|na| match na {
            Value::Null => Mapped::Missing,
            Value::Text(text) => Mapped::Color(text.clone()),
            other => match other.as_decimal() {
                Some(number) => Mapped::Number(number),
                None => Mapped::Literal(other.clone()),
            },
        })
    }
}

/// Numeric `[min, max]` limits; either end may be null.
pub(crate) fn numeric_limits(
    scale: &'static str,
    limits: Option<&[Value]>,
) -> Result<(Option<D128>, Option<D128>)> {
    let Some(limits) = limits else {
        return Ok((None, None));
    };
    if limits.len() != 2 {
        return Err(ScaleError::invalid(
            scale,
            "limits",
            format!("expected [min, max], got {} values", limits.len()),
        ));
    }
    let endpoint = |value: &Value| -> Result<Option<D128>> {
        if value.is_null() {
            return Ok(None);
        }
        value
            .as_decimal()
            .map(Some)
            .ok_or_else(|| ScaleError::invalid(scale, "limits", format!("`{value}` is not a number")))
    };
    Ok((endpoint(&limits[0])?, endpoint(&limits[1])?))
}

/// Explicit numeric breaks.
pub(crate) fn numeric_breaks(scale: &'static str, breaks: Option<&[Value]>) -> Result<Option<Vec<D128>>> {
    breaks
        .map(|breaks| {
            breaks
                .iter()
                .map(|value| {
                    value.as_decimal().ok_or_else(|| {
                        ScaleError::invalid(scale, "breaks", format!("`{value}` is not a number"))
                    })
                })
                .collect::<Result<Vec<_>>>()
        })
        .transpose()
}

pub(crate) fn format_value(value: &Value) -> String {
    match value {
        Value::Decimal(number) => label::format_decimal(number),
        other => other.to_string(),
    }
}

pub(crate) fn decimals_to_values(values: Vec<D128>) -> Vec<Value> {
    values.into_iter().map(Value::Decimal).collect()
}
