use std::str::FromStr;

use fastnum::decimal::D128;
use log::{debug, trace};
use serde::Deserialize;

use super::{
    decimals_to_values, format_value, numeric_breaks, numeric_limits, util, CommonConfig, Domain,
    Scale, Transformation,
};
use crate::aesthetic::Aesthetic;
use crate::error::{Result, ScaleError};
use crate::value::{Mapped, Value};

/// What to do with values outside the trained limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Oob {
    /// Map linearly beyond the range.
    #[default]
    Keep,
    /// Treat as missing.
    Censor,
    /// Clamp to the nearest limit.
    Squish,
}

impl FromStr for Oob {
    type Err = ScaleError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "keep" => Ok(Oob::Keep),
            "censor" => Ok(Oob::Censor),
            "squish" => Ok(Oob::Squish),
            other => Err(ScaleError::invalid(
                "continuous",
                "oob",
                format!("`{other}` is not one of keep, censor, squish"),
            )),
        }
    }
}

impl TryFrom<String> for Oob {
    type Error = ScaleError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Options specific to continuous scales.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContinuousConfig {
    pub trans: Transformation,
    pub oob: Oob,
    /// Output range. Defaults depend on the aesthetic.
    pub range: Option<(f64, f64)>,
    /// Explicit minor breaks. An empty list means none.
    pub minor_breaks: Option<Vec<Value>>,
}

impl ContinuousConfig {
    pub const KEYS: &'static [&'static str] = &["trans", "oob", "range", "minor_breaks"];

    pub fn with_trans(trans: Transformation) -> Self {
        Self {
            trans,
            ..Self::default()
        }
    }
}

/// Output range used when none is configured.
pub(crate) fn default_range(aesthetic: Aesthetic) -> (f64, f64) {
    match aesthetic {
        Aesthetic::Size => (1.0, 6.0),
        Aesthetic::Alpha => (0.1, 1.0),
        _ => (0.0, 1.0),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum ContinuousState {
    Untrained,
    Trained {
        /// Transformed extent before expansion.
        limits: (D128, D128),
        /// Transformed extent after expansion; the linear map's input.
        domain: (D128, D128),
    },
}

/// Linear domain → range scale with an optional log10, sqrt or reverse
/// transformation.
///
/// # Examples
///
/// ```
/// use fastnum::decimal::D128;
/// use ggscale::aesthetic::Aesthetic;
/// use ggscale::scale::{CommonConfig, ContinuousConfig, ContinuousScale, Scale};
/// use ggscale::value::{Mapped, Value};
///
/// let common = CommonConfig { expand: Some((0.0, 0.0)), ..CommonConfig::default() };
/// let mut scale = ContinuousScale::new(Aesthetic::X, common, ContinuousConfig::default())
///     .unwrap()
///     .with_range(0.0, 400.0);
///
/// scale.train(&[Value::from(0), Value::from(100), Value::from("NA")]);
/// assert_eq!(scale.transform(&Value::from(25)), Mapped::Number(D128::from(100)));
/// assert_eq!(scale.transform(&Value::Null), Mapped::Missing);
/// ```
#[derive(Debug, Clone)]
pub struct ContinuousScale {
    aesthetic: Aesthetic,
    common: CommonConfig,
    trans: Transformation,
    oob: Oob,
    range: (D128, D128),
    limits: (Option<D128>, Option<D128>),
    expand: (D128, D128),
    breaks: Option<Vec<D128>>,
    minor_breaks: Option<Vec<D128>>,
    state: ContinuousState,
}

impl ContinuousScale {
    pub fn new(aesthetic: Aesthetic, common: CommonConfig, config: ContinuousConfig) -> Result<Self> {
        common.validate("continuous")?;
        let trans = config.trans;

        let limits = numeric_limits("continuous", common.limits.as_deref())?;
        for limit in [limits.0, limits.1].into_iter().flatten() {
            if !trans.is_valid(&limit) {
                return Err(ScaleError::invalid(
                    "continuous",
                    "limits",
                    format!("{} is outside the {} domain", limit, trans.name()),
                ));
            }
        }

        let (lo, hi) = config.range.unwrap_or_else(|| default_range(aesthetic));
        let range = match (util::dec(lo), util::dec(hi)) {
            (Some(lo), Some(hi)) => (lo, hi),
            _ => return Err(ScaleError::invalid("continuous", "range", "values must be finite")),
        };

        let breaks = numeric_breaks("continuous", common.breaks.as_deref())?;
        let minor_breaks = numeric_breaks("continuous", config.minor_breaks.as_deref())?;
        let expand = common.expand_or(aesthetic.default_continuous_expand());

        Ok(Self {
            aesthetic,
            common,
            trans,
            oob: config.oob,
            range,
            limits,
            expand,
            breaks,
            minor_breaks,
            state: ContinuousState::Untrained,
        })
    }

    /// A default continuous scale for `aesthetic`.
    pub fn for_aesthetic(aesthetic: Aesthetic) -> Self {
        Self {
            aesthetic,
            common: CommonConfig::default(),
            trans: Transformation::Identity,
            oob: Oob::Keep,
            range: {
                let (lo, hi) = default_range(aesthetic);
                (
                    util::dec(lo).unwrap_or(D128::from(0)),
                    util::dec(hi).unwrap_or(D128::from(1)),
                )
            },
            limits: (None, None),
            expand: CommonConfig::default().expand_or(aesthetic.default_continuous_expand()),
            breaks: None,
            minor_breaks: None,
            state: ContinuousState::Untrained,
        }
    }

    /// Sets the output range, typically pixel bounds.
    pub fn with_range(mut self, lo: f64, hi: f64) -> Self {
        self.set_range(lo, hi);
        self
    }

    pub fn set_range(&mut self, lo: f64, hi: f64) {
        if let (Some(lo), Some(hi)) = (util::dec(lo), util::dec(hi)) {
            self.range = (lo, hi);
        }
    }

    pub fn transformation(&self) -> Transformation {
        self.trans
    }

    pub fn common(&self) -> &CommonConfig {
        &self.common
    }

    /// Trains on already-coerced numbers in data space.
    pub fn train_numbers(&mut self, values: &[D128]) {
        let mut extent: Option<(D128, D128)> = None;
        let mut dropped = 0usize;
        for value in values {
            let Some(t) = self.trans.forward(*value) else {
                dropped += 1;
                continue;
            };
            extent = Some(match extent {
                None => (t, t),
                Some((lo, hi)) => (if t < lo { t } else { lo }, if t > hi { t } else { hi }),
            });
        }
        if dropped > 0 {
            trace!("{} scale dropped {dropped} values outside the {} domain", self.aesthetic, self.trans.name());
        }

        let Some((mut lo, mut hi)) = extent else {
            debug!("{} scale: no usable values, training skipped", self.aesthetic);
            return;
        };

        // Limits are data-space; a decreasing transformation swaps their roles.
        let (limit_lo, limit_hi) = if self.trans.is_decreasing() {
            (self.limits.1, self.limits.0)
        } else {
            (self.limits.0, self.limits.1)
        };
        if let Some(t) = limit_lo.and_then(|v| self.trans.forward(v)) {
            lo = t;
        }
        if let Some(t) = limit_hi.and_then(|v| self.trans.forward(v)) {
            hi = t;
        }
        let (lo, hi) = util::sorted_pair(lo, hi);

        let (mult, add) = self.expand;
        let pad = (hi - lo) * mult + add;
        let domain = (lo - pad, hi + pad);
        debug!(
            "trained {} scale: limits [{}, {}], domain [{}, {}]",
            self.aesthetic, lo, hi, domain.0, domain.1
        );
        self.state = ContinuousState::Trained {
            limits: (lo, hi),
            domain,
        };
    }

    /// Maps a data-space number to range space, honouring the oob policy.
    pub fn transform_number(&self, value: D128) -> Option<D128> {
        let ContinuousState::Trained { limits, domain } = &self.state else {
            return None;
        };
        let t = self.trans.forward(value)?;
        let t = match self.oob {
            Oob::Keep => t,
            Oob::Censor if t < limits.0 || t > limits.1 => return None,
            Oob::Censor => t,
            Oob::Squish if t < limits.0 => limits.0,
            Oob::Squish if t > limits.1 => limits.1,
            Oob::Squish => t,
        };
        Some(util::rescale(t, *domain, self.range))
    }

    /// Maps a range-space position back to a data-space number.
    pub fn inverse_number(&self, position: D128) -> Option<D128> {
        let ContinuousState::Trained { domain, .. } = &self.state else {
            return None;
        };
        if domain.0 == domain.1 {
            return self.trans.inverse(domain.0);
        }
        if self.range.0 == self.range.1 {
            return self.trans.inverse(util::midpoint(domain.0, domain.1));
        }
        self.trans.inverse(util::rescale(position, self.range, *domain))
    }

    /// Transformed-space domain after expansion.
    pub fn transformed_domain(&self) -> Option<(D128, D128)> {
        match &self.state {
            ContinuousState::Trained { domain, .. } => Some(*domain),
            ContinuousState::Untrained => None,
        }
    }

    /// Data-space domain after expansion, ordered.
    pub fn continuous_domain(&self) -> Option<(D128, D128)> {
        let (lo, hi) = self.transformed_domain()?;
        let a = self.trans.inverse(lo)?;
        let b = self.trans.inverse(hi)?;
        Some(util::sorted_pair(a, b))
    }

    /// Data-space extent before expansion, ordered.
    pub fn continuous_limits(&self) -> Option<(D128, D128)> {
        let ContinuousState::Trained { limits, .. } = &self.state else {
            return None;
        };
        let a = self.trans.inverse(limits.0)?;
        let b = self.trans.inverse(limits.1)?;
        Some(util::sorted_pair(a, b))
    }

    fn within_domain(&self, value: &D128) -> bool {
        match self.continuous_domain() {
            Some((lo, hi)) => *value >= lo && *value <= hi,
            None => false,
        }
    }

    /// Break values in data space.
    pub fn break_numbers(&self) -> Vec<D128> {
        let Some((lo, hi)) = self.continuous_domain() else {
            return Vec::new();
        };
        match &self.breaks {
            Some(explicit) => explicit.iter().copied().filter(|b| self.within_domain(b)).collect(),
            None => self.trans.breaks(lo, hi, self.common.n_breaks),
        }
    }

    pub fn minor_break_numbers(&self) -> Vec<D128> {
        let Some((lo, hi)) = self.continuous_domain() else {
            return Vec::new();
        };
        match &self.minor_breaks {
            Some(explicit) => explicit.iter().copied().filter(|b| self.within_domain(b)).collect(),
            None => {
                let majors = self.break_numbers();
                self.trans
                    .minor_breaks(lo, hi, self.common.n_breaks)
                    .into_iter()
                    .filter(|minor| !majors.contains(minor))
                    .collect()
            }
        }
    }

    /// Labels paired with [`Self::break_numbers`].
    pub fn label_strings(&self, format: impl Fn(&D128) -> String) -> Vec<String> {
        match (&self.breaks, &self.common.labels) {
            // Explicit breaks carry their labels through the domain filter.
            (Some(explicit), Some(labels)) => explicit
                .iter()
                .zip(labels)
                .filter(|(b, _)| self.within_domain(b))
                .map(|(_, label)| label.clone())
                .collect(),
            _ => {
                let breaks = decimals_to_values(self.break_numbers());
                self.common.labels_for(&breaks, |value| match value {
                    Value::Decimal(number) => format(number),
                    other => format_value(other),
                })
            }
        }
    }

    fn missing(&self) -> Mapped {
        self.common.na_mapped().unwrap_or(Mapped::Missing)
    }
}

impl Scale for ContinuousScale {
    fn aesthetic(&self) -> Aesthetic {
        self.aesthetic
    }

    fn name(&self) -> Option<&str> {
        self.common.name.as_deref()
    }

    fn is_trained(&self) -> bool {
        matches!(self.state, ContinuousState::Trained { .. })
    }

    fn train(&mut self, values: &[Value]) {
        let numbers: Vec<D128> = values.iter().filter_map(Value::as_decimal).collect();
        self.train_numbers(&numbers);
    }

    fn reset(&mut self) {
        self.state = ContinuousState::Untrained;
    }

    fn transform(&self, value: &Value) -> Mapped {
        value
            .as_decimal()
            .and_then(|number| self.transform_number(number))
            .map(Mapped::Number)
            .unwrap_or_else(|| self.missing())
    }

    fn inverse(&self, position: &D128) -> Option<Value> {
        self.inverse_number(*position).map(Value::Decimal)
    }

    fn domain(&self) -> Domain {
        match self.continuous_domain() {
            Some((min, max)) => Domain::Continuous { min, max },
            None => Domain::Empty,
        }
    }

    fn range(&self) -> Option<(D128, D128)> {
        Some(self.range)
    }

    fn computed_breaks(&self) -> Vec<Value> {
        decimals_to_values(self.break_numbers())
    }

    fn computed_minor_breaks(&self) -> Vec<Value> {
        decimals_to_values(self.minor_break_numbers())
    }

    fn computed_labels(&self) -> Vec<String> {
        self.label_strings(crate::label::format_decimal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    fn no_expand() -> CommonConfig {
        CommonConfig {
            expand: Some((0.0, 0.0)),
            ..CommonConfig::default()
        }
    }

    fn numbers(values: &[f64]) -> Vec<Value> {
        values.iter().map(|v| Value::Float(*v)).collect()
    }

    fn position(scale: &ContinuousScale, value: f64) -> f64 {
        scale.transform(&Value::Float(value)).as_f64().unwrap()
    }

    #[test]
    fn test_default_expansion_is_five_percent() {
        let mut scale = ContinuousScale::for_aesthetic(Aesthetic::X);
        scale.train(&numbers(&[0.0, 100.0]));
        assert_eq!(
            scale.domain(),
            Domain::Continuous {
                min: D128::from(-5),
                max: D128::from(105)
            }
        );
    }

    #[test]
    fn test_untrained_transform_is_missing() {
        let scale = ContinuousScale::for_aesthetic(Aesthetic::Y);
        assert!(!scale.is_trained());
        assert_eq!(scale.transform(&Value::Float(3.0)), Mapped::Missing);
        assert_eq!(scale.inverse(&D128::from(0)), None);
        assert!(scale.computed_breaks().is_empty());
    }

    #[test]
    fn test_train_drops_unparseable_values() {
        let mut scale = ContinuousScale::new(Aesthetic::X, no_expand(), ContinuousConfig::default()).unwrap();
        scale.train(&[
            Value::from("NA"),
            Value::from(""),
            Value::from("abc"),
            Value::from("4"),
            Value::Null,
            Value::Int(8),
        ]);
        assert_eq!(
            scale.domain(),
            Domain::Continuous {
                min: D128::from(4),
                max: D128::from(8)
            }
        );
    }

    #[test]
    fn test_empty_training_keeps_previous_domain() {
        let mut scale = ContinuousScale::new(Aesthetic::X, no_expand(), ContinuousConfig::default()).unwrap();
        scale.train(&numbers(&[1.0, 2.0]));
        let before = scale.domain();
        scale.train(&[Value::Null, Value::from("NA")]);
        assert!(scale.is_trained());
        assert_eq!(scale.domain(), before);
    }

    #[test]
    fn test_constant_domain_maps_to_range_midpoint() {
        let mut scale = ContinuousScale::new(Aesthetic::X, CommonConfig::default(), ContinuousConfig::default())
            .unwrap()
            .with_range(0.0, 500.0);
        scale.train(&numbers(&[5.0, 5.0, 5.0]));
        assert_eq!(scale.transform(&Value::Int(5)), Mapped::Number(D128::from(250)));
        assert_eq!(scale.inverse(&D128::from(10)), Some(Value::Int(5)));
    }

    #[test]
    fn test_round_trip_is_exact() {
        let mut scale = ContinuousScale::new(Aesthetic::X, CommonConfig::default(), ContinuousConfig::default())
            .unwrap()
            .with_range(37.0, 811.0);
        scale.train(&numbers(&[-3.7, 12.9]));
        for x in [-3.7, 0.0, 0.1, 4.25, 12.9] {
            let pixel = scale.transform_number(util::dec(x).unwrap()).unwrap();
            let back = scale.inverse_number(pixel).unwrap();
            assert_approx_eq!(f64, util::to_f64(&back), x, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_limits_override_each_endpoint() {
        let common = CommonConfig {
            limits: Some(vec![Value::Null, Value::Int(50)]),
            ..no_expand()
        };
        let mut scale = ContinuousScale::new(Aesthetic::Y, common, ContinuousConfig::default()).unwrap();
        scale.train(&numbers(&[10.0, 20.0]));
        assert_eq!(
            scale.domain(),
            Domain::Continuous {
                min: D128::from(10),
                max: D128::from(50)
            }
        );
    }

    #[test]
    fn test_log10_filters_invalid_values() {
        let config = ContinuousConfig::with_trans(Transformation::Log10);
        let mut scale = ContinuousScale::new(Aesthetic::X, no_expand(), config)
            .unwrap()
            .with_range(0.0, 300.0);
        scale.train(&numbers(&[-1.0, 0.0, 1.0, 1000.0]));
        assert_eq!(position(&scale, 10.0), 100.0);
        assert_eq!(position(&scale, 100.0), 200.0);
        assert_eq!(scale.transform(&Value::Float(0.0)), Mapped::Missing);
        let breaks: Vec<f64> = scale.computed_breaks().iter().filter_map(Value::as_f64).collect();
        assert_eq!(breaks, vec![1.0, 10.0, 100.0, 1000.0]);
    }

    #[test]
    fn test_log10_limits_must_be_positive() {
        let common = CommonConfig {
            limits: Some(vec![Value::Int(0), Value::Int(10)]),
            ..CommonConfig::default()
        };
        let result = ContinuousScale::new(Aesthetic::X, common, ContinuousConfig::with_trans(Transformation::Log10));
        assert!(result.is_err());
    }

    #[test]
    fn test_sqrt_scale() {
        let config = ContinuousConfig::with_trans(Transformation::Sqrt);
        let mut scale = ContinuousScale::new(Aesthetic::X, no_expand(), config)
            .unwrap()
            .with_range(0.0, 10.0);
        scale.train(&numbers(&[0.0, 100.0]));
        assert_eq!(position(&scale, 25.0), 5.0);
        assert_eq!(scale.transform(&Value::Float(-4.0)), Mapped::Missing);
        assert_eq!(scale.inverse(&D128::from(5)), Some(Value::Int(25)));
    }

    #[test]
    fn test_reverse_scale_flips_direction() {
        let config = ContinuousConfig::with_trans(Transformation::Reverse);
        let mut scale = ContinuousScale::new(Aesthetic::X, no_expand(), config)
            .unwrap()
            .with_range(0.0, 100.0);
        scale.train(&numbers(&[0.0, 10.0]));
        assert_eq!(position(&scale, 0.0), 100.0);
        assert_eq!(position(&scale, 10.0), 0.0);
        assert_eq!(
            scale.domain(),
            Domain::Continuous {
                min: D128::from(0),
                max: D128::from(10)
            }
        );
        assert_eq!(scale.computed_labels(), ["0", "2", "4", "6", "8", "10"]);
    }

    #[test]
    fn test_oob_policies() {
        let common = CommonConfig {
            limits: Some(vec![Value::Int(0), Value::Int(10)]),
            ..no_expand()
        };
        let censor = ContinuousConfig {
            oob: Oob::Censor,
            ..ContinuousConfig::default()
        };
        let mut scale = ContinuousScale::new(Aesthetic::X, common.clone(), censor)
            .unwrap()
            .with_range(0.0, 100.0);
        scale.train(&numbers(&[2.0, 8.0]));
        assert_eq!(scale.transform(&Value::Int(12)), Mapped::Missing);

        let squish = ContinuousConfig {
            oob: Oob::Squish,
            ..ContinuousConfig::default()
        };
        let mut scale = ContinuousScale::new(Aesthetic::X, common, squish)
            .unwrap()
            .with_range(0.0, 100.0);
        scale.train(&numbers(&[2.0, 8.0]));
        assert_eq!(scale.transform(&Value::Int(12)), Mapped::Number(D128::from(100)));
        assert_eq!(scale.transform(&Value::Int(-3)), Mapped::Number(D128::from(0)));
    }

    #[test]
    fn test_breaks_and_labels() {
        let mut scale = ContinuousScale::new(Aesthetic::X, CommonConfig::default(), ContinuousConfig::default()).unwrap();
        scale.train(&numbers(&[0.0, 100.0]));
        // Expanded to [-5, 105].
        assert_eq!(scale.computed_labels(), ["0", "20", "40", "60", "80", "100"]);
        let minors: Vec<f64> = scale.computed_minor_breaks().iter().filter_map(Value::as_f64).collect();
        assert_eq!(minors, vec![10.0, 30.0, 50.0, 70.0, 90.0]);
    }

    #[test]
    fn test_explicit_breaks_keep_their_labels() {
        let common = CommonConfig {
            breaks: Some(vec![Value::Int(0), Value::Int(5), Value::Int(50)]),
            labels: Some(vec!["zero".into(), "five".into(), "fifty".into()]),
            ..no_expand()
        };
        let mut scale = ContinuousScale::new(Aesthetic::X, common, ContinuousConfig::default()).unwrap();
        scale.train(&numbers(&[0.0, 10.0]));
        assert_eq!(scale.computed_breaks(), vec![Value::Int(0), Value::Int(5)]);
        assert_eq!(scale.computed_labels(), ["zero", "five"]);
    }

    #[test]
    fn test_size_default_range() {
        let mut scale = ContinuousScale::for_aesthetic(Aesthetic::Size);
        scale.train(&numbers(&[0.0, 10.0]));
        assert_eq!(scale.transform(&Value::Int(0)), Mapped::Number(D128::from(1)));
        assert_eq!(scale.transform(&Value::Int(10)), Mapped::Number(D128::from(6)));
    }

    #[test]
    fn test_retrain_is_idempotent() {
        let mut scale = ContinuousScale::for_aesthetic(Aesthetic::X);
        let data = numbers(&[3.2, 9.1, -4.0]);
        scale.train(&data);
        let first = (scale.domain(), scale.computed_breaks(), scale.computed_labels());
        scale.train(&data);
        assert_eq!(first, (scale.domain(), scale.computed_breaks(), scale.computed_labels()));
    }

    #[test]
    fn test_reset_returns_to_untrained() {
        let mut scale = ContinuousScale::for_aesthetic(Aesthetic::X);
        scale.train(&numbers(&[1.0, 2.0]));
        scale.reset();
        assert!(!scale.is_trained());
        assert_eq!(scale.domain(), Domain::Empty);
    }
}
