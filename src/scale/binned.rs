use fastnum::decimal::D128;
use log::debug;
use serde::Deserialize;

use super::{
    decimals_to_values, format_value, util, CommonConfig, ContinuousConfig, ContinuousScale,
    Domain, Scale,
};
use crate::aesthetic::Aesthetic;
use crate::error::{Result, ScaleError};
use crate::value::{Mapped, Value};

fn default_bins() -> usize {
    10
}

fn default_right() -> bool {
    true
}

/// Options specific to binned scales.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BinnedConfig {
    #[serde(default = "default_bins")]
    pub bins: usize,
    /// Right-closed `(lower, upper]` bins when true, left-closed otherwise.
    #[serde(default = "default_right")]
    pub right: bool,
    /// Report the outer boundaries as breaks too.
    pub show_limits: bool,
    pub range: Option<(f64, f64)>,
}

impl Default for BinnedConfig {
    fn default() -> Self {
        Self {
            bins: default_bins(),
            right: default_right(),
            show_limits: false,
            range: None,
        }
    }
}

impl BinnedConfig {
    pub const KEYS: &'static [&'static str] = &["bins", "right", "show_limits", "range"];
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Bins {
    boundaries: Vec<D128>,
    centers: Vec<D128>,
}

impl Bins {
    /// Equal-width bins over `[lo, hi]`, or the given interior edges.
    fn compute(lo: D128, hi: D128, bins: usize, interior: Option<&[D128]>) -> Self {
        let mut boundaries = Vec::with_capacity(bins + 1);
        if lo == hi {
            boundaries.extend([lo, hi]);
        } else if let Some(edges) = interior {
            let mut edges: Vec<D128> = edges.iter().copied().filter(|e| *e > lo && *e < hi).collect();
            edges.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            edges.dedup();
            boundaries.push(lo);
            boundaries.extend(edges);
            boundaries.push(hi);
        } else {
            let width = (hi - lo) / util::dec_int(bins as i64);
            boundaries.extend((0..bins).map(|i| lo + width * util::dec_int(i as i64)));
            // Exact upper edge, free of accumulated rounding.
            boundaries.push(hi);
        }
        let centers = boundaries
            .windows(2)
            .map(|pair| util::midpoint(pair[0], pair[1]))
            .collect();
        Self { boundaries, centers }
    }

    /// Index of the bin holding `value`, or `None` outside the boundaries.
    ///
    /// Right-closed bins also accept the very first boundary; left-closed bins
    /// also accept the very last one.
    fn locate(&self, value: D128, right: bool) -> Option<usize> {
        let first = *self.boundaries.first()?;
        let last = *self.boundaries.last()?;
        if value < first || value > last {
            return None;
        }
        let bins = self.centers.len();
        if right && value == first {
            return Some(0);
        }
        if !right && value == last {
            return Some(bins - 1);
        }
        self.boundaries.windows(2).position(|pair| {
            if right {
                value > pair[0] && value <= pair[1]
            } else {
                value >= pair[0] && value < pair[1]
            }
        })
    }
}

/// Equal-width binning of a continuous domain. Values map to the range
/// position of their bin centre.
///
/// # Examples
///
/// ```
/// use fastnum::decimal::D128;
/// use ggscale::aesthetic::Aesthetic;
/// use ggscale::scale::{BinnedConfig, BinnedScale, CommonConfig, Scale};
/// use ggscale::value::{Mapped, Value};
///
/// let common = CommonConfig { expand: Some((0.0, 0.0)), ..CommonConfig::default() };
/// let config = BinnedConfig { bins: 4, range: Some((0.0, 100.0)), ..BinnedConfig::default() };
/// let mut scale = BinnedScale::new(Aesthetic::X, common, config).unwrap();
/// scale.train(&[Value::from(0), Value::from(10)]);
///
/// assert_eq!(scale.transform(&Value::from(6)), Mapped::Number(D128::from(62.5)));
/// ```
#[derive(Debug, Clone)]
pub struct BinnedScale {
    inner: ContinuousScale,
    bins: usize,
    right: bool,
    show_limits: bool,
    edges: Option<Vec<D128>>,
    state: Option<Bins>,
}

impl BinnedScale {
    pub fn new(aesthetic: Aesthetic, common: CommonConfig, config: BinnedConfig) -> Result<Self> {
        if config.bins == 0 {
            return Err(ScaleError::invalid("binned", "bins", "must be at least 1"));
        }
        let continuous = ContinuousConfig {
            range: config.range,
            ..ContinuousConfig::default()
        };
        let inner = ContinuousScale::new(aesthetic, common, continuous)?;
        let edges = super::numeric_breaks("binned", inner.common().breaks.as_deref())?;
        Ok(Self {
            inner,
            bins: config.bins,
            right: config.right,
            show_limits: config.show_limits,
            edges,
            state: None,
        })
    }

    pub fn with_range(mut self, lo: f64, hi: f64) -> Self {
        self.inner.set_range(lo, hi);
        self
    }

    pub fn set_range(&mut self, lo: f64, hi: f64) {
        self.inner.set_range(lo, hi);
    }

    /// `bins + 1` boundaries, empty until trained.
    pub fn boundaries(&self) -> &[D128] {
        self.state.as_ref().map(|b| b.boundaries.as_slice()).unwrap_or(&[])
    }

    /// Bin midpoints, empty until trained.
    pub fn centers(&self) -> &[D128] {
        self.state.as_ref().map(|b| b.centers.as_slice()).unwrap_or(&[])
    }

    fn bin_center(&self, value: D128) -> Option<D128> {
        let bins = self.state.as_ref()?;
        let index = bins.locate(value, self.right)?;
        bins.centers.get(index).copied()
    }

    fn missing(&self) -> Mapped {
        self.inner.common().na_mapped().unwrap_or(Mapped::Missing)
    }
}

impl Scale for BinnedScale {
    fn aesthetic(&self) -> Aesthetic {
        self.inner.aesthetic()
    }

    fn name(&self) -> Option<&str> {
        self.inner.name()
    }

    fn is_trained(&self) -> bool {
        self.state.is_some()
    }

    fn train(&mut self, values: &[Value]) {
        self.inner.train(values);
        let Some((lo, hi)) = self.inner.continuous_domain() else {
            return;
        };
        let bins = Bins::compute(lo, hi, self.bins, self.edges.as_deref());
        debug!(
            "trained binned {} scale: {} bins over [{}, {}]",
            self.inner.aesthetic(),
            bins.centers.len(),
            lo,
            hi
        );
        self.state = Some(bins);
    }

    fn reset(&mut self) {
        self.inner.reset();
        self.state = None;
    }

    fn transform(&self, value: &Value) -> Mapped {
        value
            .as_decimal()
            .and_then(|number| self.bin_center(number))
            .and_then(|center| self.inner.transform_number(center))
            .map(Mapped::Number)
            .unwrap_or_else(|| self.missing())
    }

    fn inverse(&self, position: &D128) -> Option<Value> {
        let (lo, hi) = self.inner.continuous_domain()?;
        let value = self.inner.inverse_number(*position)?;
        let clamped = if value < lo {
            lo
        } else if value > hi {
            hi
        } else {
            value
        };
        self.bin_center(clamped).map(Value::Decimal)
    }

    fn domain(&self) -> Domain {
        self.inner.domain()
    }

    fn range(&self) -> Option<(D128, D128)> {
        self.inner.range()
    }

    fn computed_breaks(&self) -> Vec<Value> {
        let boundaries = self.boundaries();
        let breaks = if self.show_limits {
            boundaries.to_vec()
        } else if boundaries.len() > 2 {
            boundaries[1..boundaries.len() - 1].to_vec()
        } else {
            Vec::new()
        };
        decimals_to_values(breaks)
    }

    fn computed_labels(&self) -> Vec<String> {
        let breaks = self.computed_breaks();
        self.inner.common().labels_for(&breaks, format_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: f64) -> D128 {
        util::dec(value).unwrap()
    }

    fn four_bins(right: bool) -> BinnedScale {
        let common = CommonConfig {
            expand: Some((0.0, 0.0)),
            ..CommonConfig::default()
        };
        let config = BinnedConfig {
            bins: 4,
            right,
            range: Some((0.0, 100.0)),
            ..BinnedConfig::default()
        };
        let mut scale = BinnedScale::new(Aesthetic::X, common, config).unwrap();
        scale.train(&[Value::Int(0), Value::Int(10), Value::Int(3)]);
        scale
    }

    #[test]
    fn test_boundaries_and_centers() {
        let scale = four_bins(true);
        assert_eq!(
            scale.boundaries(),
            &[dec(0.0), dec(2.5), dec(5.0), dec(7.5), dec(10.0)]
        );
        assert_eq!(scale.centers(), &[dec(1.25), dec(3.75), dec(6.25), dec(8.75)]);
    }

    #[test]
    fn test_transform_maps_to_bin_centre() {
        let scale = four_bins(true);
        assert_eq!(scale.transform(&Value::Int(6)), Mapped::Number(dec(62.5)));
        assert_eq!(scale.transform(&Value::Float(7.5)), Mapped::Number(dec(62.5)));
        assert_eq!(scale.transform(&Value::Int(11)), Mapped::Missing);
        assert_eq!(scale.transform(&Value::Int(-1)), Mapped::Missing);
    }

    #[test]
    fn test_right_closed_bins_include_first_boundary() {
        let scale = four_bins(true);
        assert_eq!(scale.transform(&Value::Int(0)), Mapped::Number(dec(12.5)));
        assert_eq!(scale.transform(&Value::Int(10)), Mapped::Number(dec(87.5)));
        assert_eq!(scale.transform(&Value::Float(2.5)), Mapped::Number(dec(12.5)));
    }

    #[test]
    fn test_left_closed_bins_include_last_boundary() {
        let scale = four_bins(false);
        assert_eq!(scale.transform(&Value::Float(2.5)), Mapped::Number(dec(37.5)));
        assert_eq!(scale.transform(&Value::Int(0)), Mapped::Number(dec(12.5)));
        assert_eq!(scale.transform(&Value::Int(10)), Mapped::Number(dec(87.5)));
    }

    #[test]
    fn test_breaks_exclude_limits_by_default() {
        let scale = four_bins(true);
        assert_eq!(
            scale.computed_breaks(),
            vec![Value::Float(2.5), Value::Int(5), Value::Float(7.5)]
        );
        assert_eq!(scale.computed_labels(), ["2.5", "5", "7.5"]);
    }

    #[test]
    fn test_show_limits() {
        let common = CommonConfig {
            expand: Some((0.0, 0.0)),
            ..CommonConfig::default()
        };
        let config = BinnedConfig {
            bins: 2,
            show_limits: true,
            ..BinnedConfig::default()
        };
        let mut scale = BinnedScale::new(Aesthetic::X, common, config).unwrap();
        scale.train(&[Value::Int(0), Value::Int(10)]);
        assert_eq!(
            scale.computed_breaks(),
            vec![Value::Int(0), Value::Int(5), Value::Int(10)]
        );
    }

    #[test]
    fn test_constant_domain_is_one_bin() {
        let mut scale = BinnedScale::new(Aesthetic::X, CommonConfig::default(), BinnedConfig::default())
            .unwrap()
            .with_range(0.0, 10.0);
        scale.train(&[Value::Int(4), Value::Int(4)]);
        assert_eq!(scale.centers(), &[D128::from(4)]);
        assert_eq!(scale.transform(&Value::Int(4)), Mapped::Number(D128::from(5)));
        assert!(scale.computed_breaks().is_empty());
    }

    #[test]
    fn test_explicit_breaks_become_edges() {
        let common = CommonConfig {
            expand: Some((0.0, 0.0)),
            breaks: Some(vec![Value::Int(1), Value::Int(9), Value::Int(50)]),
            ..CommonConfig::default()
        };
        let mut scale = BinnedScale::new(Aesthetic::X, common, BinnedConfig::default()).unwrap();
        scale.train(&[Value::Int(0), Value::Int(10)]);
        assert_eq!(
            scale.boundaries(),
            &[D128::from(0), D128::from(1), D128::from(9), D128::from(10)]
        );
        assert_eq!(scale.centers()[1], D128::from(5));
    }

    #[test]
    fn test_inverse_returns_bin_centre() {
        let scale = four_bins(true);
        assert_eq!(scale.inverse(&D128::from(70)), Some(Value::Float(6.25)));
        assert_eq!(scale.inverse(&D128::from(500)), Some(Value::Float(8.75)));
    }

    #[test]
    fn test_zero_bins_rejected() {
        let config = BinnedConfig {
            bins: 0,
            ..BinnedConfig::default()
        };
        assert!(BinnedScale::new(Aesthetic::X, CommonConfig::default(), config).is_err());
    }
}
