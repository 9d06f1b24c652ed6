use fastnum::decimal::D128;
use log::debug;
use serde::Deserialize;

use super::{format_value, util, CommonConfig, Domain, Scale};
use crate::aesthetic::Aesthetic;
use crate::error::{Result, ScaleError};
use crate::value::{Mapped, Value, ValueKind};

/// Ordered, deduplicated category values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Levels {
    values: Vec<Value>,
}

impl Levels {
    /// Collects the levels of a column.
    ///
    /// Unique non-null values are taken in first-occurrence order. With an
    /// explicit `order`, the present values it names come first and the rest
    /// follow. Without one, values of a single naturally ordered kind are
    /// sorted. `limits` finally restricts the result to the listed values, in
    /// the listed order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ggscale::scale::Levels;
    /// use ggscale::value::Value;
    ///
    /// let column: Vec<Value> = ["b", "a", "b", "c"].into_iter().map(Value::from).collect();
    /// let levels = Levels::train(&column, None, None);
    /// assert_eq!(levels.as_slice(), &[Value::from("a"), Value::from("b"), Value::from("c")]);
    /// ```
    pub fn train(values: &[Value], order: Option<&[Value]>, limits: Option<&[Value]>) -> Self {
        let mut unique: Vec<Value> = Vec::new();
        for value in values {
            if !value.is_null() && !unique.contains(value) {
                unique.push(value.clone());
            }
        }

        let mut levels = match order {
            Some(order) => {
                let mut ordered: Vec<Value> = Vec::with_capacity(unique.len());
                for level in order {
                    if unique.contains(level) && !ordered.contains(level) {
                        ordered.push(level.clone());
                    }
                }
                let leftovers: Vec<Value> = unique
                    .iter()
                    .filter(|value| !ordered.contains(value))
                    .cloned()
                    .collect();
                ordered.extend(leftovers);
                ordered
            }
            None => {
                if Self::naturally_ordered(&unique) {
                    unique.sort_by(|a, b| a.natural_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                }
                unique
            }
        };

        if let Some(limits) = limits {
            levels = limits
                .iter()
                .filter(|limit| levels.contains(limit))
                .cloned()
                .collect();
        }

        Self { values: levels }
    }

    fn naturally_ordered(values: &[Value]) -> bool {
        let Some(first) = values.first() else {
            return false;
        };
        let kind = first.kind();
        kind != ValueKind::Null
            && values.iter().all(|value| {
                value.kind() == kind && first.natural_cmp(value).is_some()
            })
    }

    pub fn from_values(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn index_of(&self, value: &Value) -> Option<usize> {
        if value.is_null() {
            return None;
        }
        self.values.iter().position(|level| level == value)
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    /// Levels selected by explicit breaks, in break order, or all levels.
    pub(crate) fn breaks(&self, explicit: Option<&[Value]>) -> Vec<Value> {
        match explicit {
            Some(breaks) => breaks
                .iter()
                .filter(|b| self.values.contains(b))
                .cloned()
                .collect(),
            None => self.values.clone(),
        }
    }

    /// Labels for [`Levels::breaks`]. Explicit labels stay paired with their
    /// explicit breaks, so dropping an unknown break drops its label too.
    pub(crate) fn labels(&self, common: &CommonConfig) -> Vec<String> {
        match (&common.breaks, &common.labels) {
            (Some(breaks), Some(labels)) if breaks.len() == labels.len() => breaks
                .iter()
                .zip(labels)
                .filter(|(b, _)| self.values.contains(b))
                .map(|(_, label)| label.clone())
                .collect(),
            _ => common.labels_for(&self.breaks(common.breaks.as_deref()), format_value),
        }
    }
}

/// Options specific to discrete positional scales.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiscreteConfig {
    /// Preferred level order; unlisted levels follow in data order.
    pub order_levels: Option<Vec<Value>>,
    /// Output range, `[0, 1]` unless set.
    pub range: Option<(f64, f64)>,
}

impl DiscreteConfig {
    pub const KEYS: &'static [&'static str] = &["order_levels", "range"];
}

/// Band positions for categorical data.
///
/// Each level owns an equal band of the range and maps to the band centre.
/// Padding `expand = [mult, add]` is taken off the range first: `mult` as a
/// fraction of the range on each side, `add` in band units on each side.
///
/// # Examples
///
/// ```
/// use fastnum::decimal::D128;
/// use ggscale::aesthetic::Aesthetic;
/// use ggscale::scale::{CommonConfig, DiscreteConfig, DiscreteScale, Scale};
/// use ggscale::value::{Mapped, Value};
///
/// let common = CommonConfig { expand: Some((0.0, 0.0)), ..CommonConfig::default() };
/// let mut scale = DiscreteScale::new(Aesthetic::X, common, DiscreteConfig::default())
///     .unwrap()
///     .with_range(0.0, 300.0);
/// scale.train(&[Value::from("a"), Value::from("b"), Value::from("c")]);
///
/// assert_eq!(scale.transform(&Value::from("b")), Mapped::Number(D128::from(150)));
/// assert_eq!(scale.bandwidth(), Some(D128::from(100)));
/// ```
#[derive(Debug, Clone)]
pub struct DiscreteScale {
    aesthetic: Aesthetic,
    common: CommonConfig,
    order_levels: Option<Vec<Value>>,
    range: (D128, D128),
    expand: (D128, D128),
    levels: Levels,
}

impl DiscreteScale {
    pub fn new(aesthetic: Aesthetic, common: CommonConfig, config: DiscreteConfig) -> Result<Self> {
        common.validate("discrete")?;
        let (lo, hi) = config.range.unwrap_or((0.0, 1.0));
        let range = match (util::dec(lo), util::dec(hi)) {
            (Some(lo), Some(hi)) => (lo, hi),
            _ => return Err(ScaleError::invalid("discrete", "range", "values must be finite")),
        };
        let default_expand = if aesthetic.is_positional() { (0.0, 0.6) } else { (0.0, 0.0) };
        let expand = common.expand_or(default_expand);
        if expand.0 * D128::from(2) >= D128::from(1) {
            return Err(ScaleError::invalid(
                "discrete",
                "expand",
                "multiplicative padding must leave part of the range",
            ));
        }
        Ok(Self {
            aesthetic,
            common,
            order_levels: config.order_levels,
            range,
            expand,
            levels: Levels::default(),
        })
    }

    pub fn for_aesthetic(aesthetic: Aesthetic) -> Self {
        let default_expand = if aesthetic.is_positional() { (0.0, 0.6) } else { (0.0, 0.0) };
        Self {
            aesthetic,
            common: CommonConfig::default(),
            order_levels: None,
            range: (D128::from(0), D128::from(1)),
            expand: CommonConfig::default().expand_or(default_expand),
            levels: Levels::default(),
        }
    }

    pub fn with_range(mut self, lo: f64, hi: f64) -> Self {
        self.set_range(lo, hi);
        self
    }

    pub fn set_range(&mut self, lo: f64, hi: f64) {
        if let (Some(lo), Some(hi)) = (util::dec(lo), util::dec(hi)) {
            self.range = (lo, hi);
        }
    }

    pub fn levels(&self) -> &Levels {
        &self.levels
    }

    /// Signed band width and the position where band 0 starts.
    fn bands(&self) -> Option<(D128, D128)> {
        let n = self.levels.len();
        if n == 0 {
            return None;
        }
        let (mult, add) = self.expand;
        let one = D128::from(1);
        let two = D128::from(2);
        let span = self.range.1 - self.range.0;
        let slots = util::dec_int(n as i64) + two * add;
        if slots == D128::from(0) {
            return None;
        }
        let unit = span * (one - two * mult) / slots;
        let start = self.range.0 + span * mult + unit * add;
        Some((unit, start))
    }

    fn position(&self, index: usize) -> Option<D128> {
        let (unit, start) = self.bands()?;
        let half = D128::from(0.5);
        Some(start + unit * (util::dec_int(index as i64) + half))
    }

    fn missing(&self) -> Mapped {
        self.common.na_mapped().unwrap_or(Mapped::Missing)
    }
}

impl Scale for DiscreteScale {
    fn aesthetic(&self) -> Aesthetic {
        self.aesthetic
    }

    fn name(&self) -> Option<&str> {
        self.common.name.as_deref()
    }

    fn is_trained(&self) -> bool {
        !self.levels.is_empty()
    }

    fn train(&mut self, values: &[Value]) {
        let levels = Levels::train(
            values,
            self.order_levels.as_deref(),
            self.common.limits.as_deref(),
        );
        if levels.is_empty() {
            debug!("{} scale: no levels, training skipped", self.aesthetic);
            return;
        }
        debug!("trained discrete {} scale with {} levels", self.aesthetic, levels.len());
        self.levels = levels;
    }

    fn reset(&mut self) {
        self.levels = Levels::default();
    }

    fn transform(&self, value: &Value) -> Mapped {
        self.levels
            .index_of(value)
            .and_then(|index| self.position(index))
            .map(Mapped::Number)
            .unwrap_or_else(|| self.missing())
    }

    fn inverse(&self, position: &D128) -> Option<Value> {
        let (unit, start) = self.bands()?;
        let last = self.levels.len() - 1;
        if unit == D128::from(0) {
            return self.levels.get(0).cloned();
        }
        let slot = util::floor((*position - start) / unit);
        let index = if slot < D128::from(0) {
            0
        } else {
            num_traits::ToPrimitive::to_usize(&slot).unwrap_or(last).min(last)
        };
        self.levels.get(index).cloned()
    }

    fn domain(&self) -> Domain {
        if self.levels.is_empty() {
            Domain::Empty
        } else {
            Domain::Discrete(self.levels.as_slice().to_vec())
        }
    }

    fn range(&self) -> Option<(D128, D128)> {
        Some(self.range)
    }

    fn computed_breaks(&self) -> Vec<Value> {
        self.levels.breaks(self.common.breaks.as_deref())
    }

    fn computed_labels(&self) -> Vec<String> {
        self.levels.labels(&self.common)
    }

    fn bandwidth(&self) -> Option<D128> {
        self.bands().map(|(unit, _)| util::abs(unit))
    }
}
