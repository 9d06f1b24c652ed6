use fastnum::decimal::D128;
use log::debug;
use serde::Deserialize;

use super::{
    decimals_to_values, util, CommonConfig, ContinuousConfig, ContinuousScale, Domain, Scale,
    Transformation,
};
use crate::aesthetic::Aesthetic;
use crate::color::palette::{sample_ramp, BrewerPalette, BrewerType, ViridisOption, ViridisPalette};
use crate::color::space::{interpolate_color, parse_color, with_alpha};
use crate::error::{Result, ScaleError};
use crate::label;
use crate::value::{Mapped, Value};

const DEFAULT_LOW: &str = "#132B43";
const DEFAULT_HIGH: &str = "#56B1F7";
const DEFAULT_DIVERGING_LOW: &str = "#832424";
const DEFAULT_DIVERGING_MID: &str = "white";
const DEFAULT_DIVERGING_HIGH: &str = "#3A3A98";
pub(crate) const DEFAULT_NA_COLOR: &str = "grey50";

/// Colours a distiller or fermenter draws from its brewer scheme.
const DISTILLER_COLORS: usize = 7;
/// Colours a continuous viridis ramp is built from.
const VIRIDIS_COLORS: usize = 6;

/// Which colour ramp a gradient scale builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradientKind {
    /// `low` → `high`.
    #[default]
    Gradient,
    /// `low` → `mid` → `high`, centred on `midpoint`.
    Gradient2,
    /// Any number of `colors`, optionally placed at `values`.
    GradientN,
    /// A ColorBrewer scheme interpolated as a ramp.
    Distiller,
    /// A ColorBrewer scheme, one colour per bin.
    Fermenter,
    /// A viridis-family colour map.
    Viridis,
}

/// Options specific to gradient scales.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GradientConfig {
    pub low: Option<String>,
    pub mid: Option<String>,
    pub high: Option<String>,
    /// Data value mapped to `mid`. Defaults to 0.
    pub midpoint: Option<f64>,
    pub colors: Option<Vec<String>>,
    /// Positions of `colors` in `[0, 1]`, ascending.
    pub values: Option<Vec<f64>>,
    /// Brewer scheme name, or its 1-based index within `type`.
    pub palette: Option<Value>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub direction: Option<i32>,
    /// Viridis option letter or name.
    pub option: Option<String>,
    pub begin: Option<f64>,
    pub end: Option<f64>,
    pub alpha: Option<f64>,
    /// Number of equal-width colour steps. Unset means a smooth ramp.
    pub bins: Option<usize>,
    pub trans: Transformation,
}

impl GradientConfig {
    pub const KEYS: &'static [&'static str] = &[
        "low", "mid", "high", "midpoint", "colors", "values", "palette", "type", "direction",
        "option", "begin", "end", "alpha", "bins", "trans",
    ];
}

#[derive(Debug, Clone, PartialEq)]
enum Ramp {
    Stops(Vec<String>),
    Positioned { colors: Vec<String>, values: Vec<f64> },
    Diverging { low: String, mid: String, high: String, midpoint: D128 },
    /// One colour per bin, no interpolation.
    Classes(Vec<String>),
}

impl Ramp {
    fn sample(&self, t: f64) -> Option<String> {
        match self {
            Ramp::Stops(colors) | Ramp::Classes(colors) => sample_ramp(colors, t),
            Ramp::Diverging { low, mid, high, .. } => sample_ramp(&[low, mid, high], t),
            Ramp::Positioned { colors, values } => {
                let first = values.first()?;
                let last = values.last()?;
                if t <= *first {
                    return colors.first().cloned();
                }
                if t >= *last {
                    return colors.last().cloned();
                }
                let i = values.windows(2).position(|pair| t >= pair[0] && t <= pair[1])?;
                let (lo, hi) = (values[i], values[i + 1]);
                let local = if hi > lo { (t - lo) / (hi - lo) } else { 0.0 };
                Some(interpolate_color(&colors[i], &colors[i + 1], local))
            }
        }
    }
}

fn check_color(param: &'static str, color: &str) -> Result<String> {
    if parse_color(color).is_none() {
        return Err(ScaleError::invalid("gradient", param, format!("`{color}` is not a colour")));
    }
    Ok(color.to_string())
}

fn brewer_palette(config: &GradientConfig) -> Result<&'static BrewerPalette> {
    let kind = match &config.kind {
        Some(kind) => kind.parse::<BrewerType>()?,
        None => BrewerType::Seq,
    };
    match &config.palette {
        None | Some(Value::Null) => BrewerPalette::by_index(kind, 1),
        Some(Value::Text(name)) => BrewerPalette::by_name(name),
        Some(other) => match other.as_f64() {
            Some(index) if index >= 1.0 && index.fract() == 0.0 => BrewerPalette::by_index(kind, index as usize),
            _ => Err(ScaleError::UnknownPalette(other.to_string())),
        },
    }
}

fn build_ramp(kind: GradientKind, config: &GradientConfig) -> Result<Ramp> {
    let color_or = |param: &'static str, value: &Option<String>, default: &str| -> Result<String> {
        check_color(param, value.as_deref().unwrap_or(default))
    };
    let ramp = match kind {
        GradientKind::Gradient => Ramp::Stops(vec![
            color_or("low", &config.low, DEFAULT_LOW)?,
            color_or("high", &config.high, DEFAULT_HIGH)?,
        ]),
        GradientKind::Gradient2 => {
            let midpoint = config.midpoint.unwrap_or(0.0);
            Ramp::Diverging {
                low: color_or("low", &config.low, DEFAULT_DIVERGING_LOW)?,
                mid: color_or("mid", &config.mid, DEFAULT_DIVERGING_MID)?,
                high: color_or("high", &config.high, DEFAULT_DIVERGING_HIGH)?,
                midpoint: util::dec(midpoint)
                    .ok_or_else(|| ScaleError::invalid("gradient", "midpoint", "must be finite"))?,
            }
        }
        GradientKind::GradientN => {
            let colors = config
                .colors
                .as_deref()
                .filter(|colors| colors.len() >= 2)
                .ok_or_else(|| ScaleError::invalid("gradient", "colors", "at least two colours are required"))?
                .iter()
                .map(|color| check_color("colors", color))
                .collect::<Result<Vec<_>>>()?;
            match &config.values {
                None => Ramp::Stops(colors),
                Some(values) => {
                    if values.len() != colors.len() {
                        return Err(ScaleError::invalid(
                            "gradient",
                            "values",
                            format!("{} values for {} colours", values.len(), colors.len()),
                        ));
                    }
                    let ascending = values.windows(2).all(|pair| pair[0] <= pair[1]);
                    if !ascending || values.iter().any(|v| !(0.0..=1.0).contains(v)) {
                        return Err(ScaleError::invalid(
                            "gradient",
                            "values",
                            "must be ascending positions in [0, 1]",
                        ));
                    }
                    Ramp::Positioned {
                        colors,
                        values: values.clone(),
                    }
                }
            }
        }
        GradientKind::Distiller => {
            let direction = config.direction.unwrap_or(-1);
            Ramp::Stops(brewer_palette(config)?.colors(DISTILLER_COLORS, direction))
        }
        GradientKind::Fermenter => {
            let direction = config.direction.unwrap_or(-1);
            let bins = config.bins.unwrap_or(DISTILLER_COLORS);
            Ramp::Classes(brewer_palette(config)?.colors(bins, direction))
        }
        GradientKind::Viridis => {
            let palette = ViridisPalette {
                option: match &config.option {
                    Some(option) => option.parse::<ViridisOption>()?,
                    None => ViridisOption::Viridis,
                },
                begin: config.begin.unwrap_or(0.0),
                end: config.end.unwrap_or(1.0),
                direction: config.direction.unwrap_or(1),
                alpha: 1.0,
            };
            palette.validate()?;
            Ramp::Stops(palette.colors(VIRIDIS_COLORS))
        }
    };
    Ok(ramp)
}

/// Continuous data mapped onto a colour ramp, smooth or in equal-width steps.
///
/// The underlying linear map runs onto `[0, 1]` without expansion; that
/// position is looked up on the ramp. Values outside the trained limits,
/// missing values and an untrained scale all give the NA colour.
///
/// # Examples
///
/// ```
/// use ggscale::aesthetic::Aesthetic;
/// use ggscale::scale::{CommonConfig, GradientConfig, GradientKind, GradientScale, Scale};
/// use ggscale::value::{Mapped, Value};
///
/// let config = GradientConfig {
///     low: Some("#000000".into()),
///     high: Some("#FFFFFF".into()),
///     ..GradientConfig::default()
/// };
/// let mut scale =
///     GradientScale::new(GradientKind::Gradient, Aesthetic::Fill, CommonConfig::default(), config).unwrap();
/// scale.train(&[Value::from(0), Value::from(10)]);
///
/// assert_eq!(scale.transform(&Value::from(5)), Mapped::Color("#808080".into()));
/// assert_eq!(scale.transform(&Value::Null), Mapped::Color("grey50".into()));
/// ```
#[derive(Debug, Clone)]
pub struct GradientScale {
    kind: GradientKind,
    inner: ContinuousScale,
    ramp: Ramp,
    bins: Option<usize>,
    alpha: f64,
    na_value: String,
}

impl GradientScale {
    pub fn new(
        kind: GradientKind,
        aesthetic: Aesthetic,
        common: CommonConfig,
        config: GradientConfig,
    ) -> Result<Self> {
        if !aesthetic.is_color() {
            return Err(ScaleError::UnsupportedAesthetic {
                scale: "gradient",
                aesthetic: aesthetic.to_string(),
            });
        }
        if config.bins == Some(0) {
            return Err(ScaleError::invalid("gradient", "bins", "must be at least 1"));
        }
        let alpha = config.alpha.unwrap_or(1.0);
        if !(0.0..=1.0).contains(&alpha) {
            return Err(ScaleError::invalid("gradient", "alpha", format!("{alpha} is outside [0, 1]")));
        }
        let ramp = build_ramp(kind, &config)?;
        let bins = match kind {
            GradientKind::Fermenter => Some(config.bins.unwrap_or(DISTILLER_COLORS)),
            _ => config.bins,
        };

        let na_value = match &common.na_value {
            None => DEFAULT_NA_COLOR.to_string(),
            Some(Value::Text(color)) => check_color("na_value", color)?,
            Some(other) => {
                return Err(ScaleError::invalid(
                    "gradient",
                    "na_value",
                    format!("`{other}` is not a colour"),
                ))
            }
        };
        let common = CommonConfig {
            expand: Some((0.0, 0.0)),
            ..common
        };
        let continuous = ContinuousConfig {
            trans: config.trans,
            range: Some((0.0, 1.0)),
            ..ContinuousConfig::default()
        };
        let inner = ContinuousScale::new(aesthetic, common, continuous)?;

        Ok(Self {
            kind,
            inner,
            ramp,
            bins,
            alpha,
            na_value,
        })
    }

    pub fn kind(&self) -> GradientKind {
        self.kind
    }

    /// Ramp position in `[0, 1]` of a data value, `None` outside the limits.
    fn position(&self, number: D128) -> Option<f64> {
        let (lo, hi) = self.inner.transformed_domain()?;
        let trans = self.inner.transformation();
        let x = trans.forward(number)?;
        if x < lo || x > hi {
            return None;
        }
        let t = match &self.ramp {
            Ramp::Diverging { midpoint, .. } => {
                // low → mid fills [0, 0.5] of the ramp, mid → high fills [0.5, 1],
                // each side stretched over its own share of the domain.
                let mid = trans.forward(*midpoint)?;
                let half = D128::from(0.5);
                if x <= mid {
                    if mid == lo {
                        return Some(0.5);
                    }
                    util::to_f64(&((x - lo) / (mid - lo) * half))
                } else {
                    util::to_f64(&(half + (x - mid) / (hi - mid) * half))
                }
            }
            _ => util::to_f64(&self.inner.transform_number(number)?),
        };
        t.is_finite().then_some(t)
    }

    fn color_at(&self, t: f64) -> Option<String> {
        let color = match (self.bins, &self.ramp) {
            (Some(bins), Ramp::Classes(colors)) => {
                let index = ((t * bins as f64).floor() as usize).min(bins - 1);
                colors.get(index).or_else(|| colors.last()).cloned()
            }
            (Some(bins), ramp) => {
                let index = ((t * bins as f64).floor() as usize).min(bins - 1);
                ramp.sample((index as f64 + 0.5) / bins as f64)
            }
            (None, ramp) => ramp.sample(t),
        }?;
        Some(with_alpha(&color, self.alpha))
    }

    /// Colour for a constant domain: `mid` of a diverging ramp, the ramp's
    /// middle otherwise.
    fn constant_color(&self) -> Option<String> {
        let color = match &self.ramp {
            Ramp::Diverging { mid, .. } => Some(mid.clone()),
            ramp => ramp.sample(0.5),
        }?;
        Some(with_alpha(&color, self.alpha))
    }

    fn is_constant(&self) -> bool {
        matches!(self.inner.transformed_domain(), Some((lo, hi)) if lo == hi)
    }

    /// Interior step boundaries in data space.
    fn step_boundaries(&self) -> Vec<D128> {
        let (Some(bins), Some((lo, hi))) = (self.bins, self.inner.transformed_domain()) else {
            return Vec::new();
        };
        if lo == hi {
            return Vec::new();
        }
        let trans = self.inner.transformation();
        let width = (hi - lo) / util::dec_int(bins as i64);
        let mut edges: Vec<D128> = (1..bins)
            .filter_map(|i| trans.inverse(lo + width * util::dec_int(i as i64)))
            .collect();
        edges.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        edges
    }

    /// `n` colours evenly spaced along the ramp, for legend keys.
    pub fn legend_colors(&self, n: usize) -> Vec<String> {
        match n {
            0 => Vec::new(),
            1 => self.color_at(0.5).into_iter().collect(),
            _ => (0..n)
                .filter_map(|i| self.color_at(i as f64 / (n - 1) as f64))
                .collect(),
        }
    }

    fn na(&self) -> Mapped {
        Mapped::Color(self.na_value.clone())
    }
}

impl Scale for GradientScale {
    fn aesthetic(&self) -> Aesthetic {
        self.inner.aesthetic()
    }

    fn name(&self) -> Option<&str> {
        self.inner.name()
    }

    fn is_trained(&self) -> bool {
        self.inner.is_trained()
    }

    fn train(&mut self, values: &[Value]) {
        self.inner.train(values);
        if let Some((lo, hi)) = self.inner.continuous_domain() {
            debug!("trained {:?} {} scale over [{}, {}]", self.kind, self.inner.aesthetic(), lo, hi);
        }
    }

    fn reset(&mut self) {
        self.inner.reset();
    }

    fn transform(&self, value: &Value) -> Mapped {
        let Some(number) = value.as_decimal() else {
            return self.na();
        };
        let color = if self.is_constant() {
            match self.inner.transformation().forward(number) {
                Some(x) if Some(x) == self.inner.transformed_domain().map(|(lo, _)| lo) => {
                    self.constant_color()
                }
                _ => None,
            }
        } else {
            self.position(number).and_then(|t| self.color_at(t))
        };
        color.map(Mapped::Color).unwrap_or_else(|| self.na())
    }

    fn inverse(&self, position: &D128) -> Option<Value> {
        self.inner.inverse(position)
    }

    fn domain(&self) -> Domain {
        self.inner.domain()
    }

    fn computed_breaks(&self) -> Vec<Value> {
        if self.bins.is_some() {
            return decimals_to_values(self.step_boundaries());
        }
        self.inner.computed_breaks()
    }

    fn computed_minor_breaks(&self) -> Vec<Value> {
        Vec::new()
    }

    fn computed_labels(&self) -> Vec<String> {
        if self.bins.is_some() {
            let breaks = self.computed_breaks();
            return self.inner.common().labels_for(&breaks, |value| match value {
                Value::Decimal(number) => label::format_decimal(number),
                other => other.to_string(),
            });
        }
        self.inner.computed_labels()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(values: &[f64]) -> Vec<Value> {
        values.iter().map(|v| Value::Float(*v)).collect()
    }

    fn color(scale: &GradientScale, value: f64) -> String {
        match scale.transform(&Value::Float(value)) {
            Mapped::Color(color) => color,
            other => panic!("expected a colour, got {other:?}"),
        }
    }

    fn black_to_white(bins: Option<usize>) -> GradientScale {
        let config = GradientConfig {
            low: Some("black".into()),
            high: Some("white".into()),
            bins,
            ..GradientConfig::default()
        };
        GradientScale::new(GradientKind::Gradient, Aesthetic::Color, CommonConfig::default(), config).unwrap()
    }

    #[test]
    fn test_default_gradient_endpoints() {
        let mut scale = GradientScale::new(
            GradientKind::Gradient,
            Aesthetic::Color,
            CommonConfig::default(),
            GradientConfig::default(),
        )
        .unwrap();
        scale.train(&numbers(&[1.0, 9.0]));
        assert_eq!(color(&scale, 1.0), "#132B43");
        assert_eq!(color(&scale, 9.0), "#56B1F7");
    }

    #[test]
    fn test_midpoint_is_half_grey() {
        let mut scale = black_to_white(None);
        scale.train(&numbers(&[0.0, 10.0]));
        assert_eq!(color(&scale, 5.0), "#808080");
    }

    #[test]
    fn test_na_and_out_of_range() {
        let common = CommonConfig {
            limits: Some(vec![Value::Int(0), Value::Int(10)]),
            ..CommonConfig::default()
        };
        let config = GradientConfig::default();
        let mut scale = GradientScale::new(GradientKind::Gradient, Aesthetic::Fill, common, config).unwrap();
        assert_eq!(color(&scale, 5.0), DEFAULT_NA_COLOR);
        scale.train(&numbers(&[2.0, 8.0]));
        assert_eq!(color(&scale, 20.0), DEFAULT_NA_COLOR);
        assert_eq!(scale.transform(&Value::from("NA")), Mapped::Color("grey50".into()));
    }

    #[test]
    fn test_custom_na_value() {
        let common = CommonConfig {
            na_value: Some(Value::from("red")),
            ..CommonConfig::default()
        };
        let scale =
            GradientScale::new(GradientKind::Gradient, Aesthetic::Fill, common, GradientConfig::default()).unwrap();
        assert_eq!(scale.transform(&Value::Null), Mapped::Color("red".into()));
    }

    #[test]
    fn test_diverging_centres_on_midpoint() {
        let mut scale = GradientScale::new(
            GradientKind::Gradient2,
            Aesthetic::Fill,
            CommonConfig::default(),
            GradientConfig::default(),
        )
        .unwrap();
        scale.train(&numbers(&[-10.0, 5.0]));
        assert_eq!(color(&scale, 0.0), "#FFFFFF");
        assert_eq!(color(&scale, -10.0), "#832424");
    }

    #[test]
    fn test_diverging_sides_span_their_own_extent() {
        let mut scale = GradientScale::new(
            GradientKind::Gradient2,
            Aesthetic::Color,
            CommonConfig::default(),
            GradientConfig::default(),
        )
        .unwrap();
        scale.train(&numbers(&[-10.0, 5.0]));
        assert_eq!(color(&scale, 5.0), "#3A3A98");
        assert_eq!(color(&scale, -10.0), "#832424");
        assert_eq!(color(&scale, 2.5), interpolate_color("white", "#3A3A98", 0.5));
        assert_eq!(color(&scale, -5.0), interpolate_color("#832424", "white", 0.5));
    }

    #[test]
    fn test_diverging_midpoint_outside_domain() {
        let config = GradientConfig {
            midpoint: Some(-5.0),
            ..GradientConfig::default()
        };
        let mut scale =
            GradientScale::new(GradientKind::Gradient2, Aesthetic::Fill, CommonConfig::default(), config).unwrap();
        scale.train(&numbers(&[0.0, 10.0]));
        assert_eq!(color(&scale, 10.0), "#3A3A98");
        assert_ne!(color(&scale, 0.0), "#832424");
    }

    #[test]
    fn test_constant_domain_uses_middle_colour() {
        let mut scale = black_to_white(None);
        scale.train(&numbers(&[3.0, 3.0]));
        assert_eq!(color(&scale, 3.0), "#808080");

        let mut diverging = GradientScale::new(
            GradientKind::Gradient2,
            Aesthetic::Fill,
            CommonConfig::default(),
            GradientConfig {
                mid: Some("yellow".into()),
                ..GradientConfig::default()
            },
        )
        .unwrap();
        diverging.train(&numbers(&[7.0]));
        assert_eq!(color(&diverging, 7.0), "#FFFF00");
    }

    #[test]
    fn test_positioned_stops() {
        let config = GradientConfig {
            colors: Some(vec!["red".into(), "blue".into(), "green".into()]),
            values: Some(vec![0.0, 0.8, 1.0]),
            ..GradientConfig::default()
        };
        let mut scale =
            GradientScale::new(GradientKind::GradientN, Aesthetic::Color, CommonConfig::default(), config).unwrap();
        scale.train(&numbers(&[0.0, 1.0]));
        assert_eq!(color(&scale, 0.4), "#800080");
        assert_eq!(color(&scale, 1.0), "#00FF00");
    }

    #[test]
    fn test_gradient_n_validation() {
        let one = GradientConfig {
            colors: Some(vec!["red".into()]),
            ..GradientConfig::default()
        };
        assert!(GradientScale::new(GradientKind::GradientN, Aesthetic::Color, CommonConfig::default(), one).is_err());

        let unsorted = GradientConfig {
            colors: Some(vec!["red".into(), "blue".into()]),
            values: Some(vec![1.0, 0.0]),
            ..GradientConfig::default()
        };
        assert!(
            GradientScale::new(GradientKind::GradientN, Aesthetic::Color, CommonConfig::default(), unsorted).is_err()
        );

        let bad_color = GradientConfig {
            low: Some("notacolour".into()),
            ..GradientConfig::default()
        };
        assert!(
            GradientScale::new(GradientKind::Gradient, Aesthetic::Color, CommonConfig::default(), bad_color).is_err()
        );
    }

    #[test]
    fn test_steps_use_bin_centres() {
        let mut scale = black_to_white(Some(2));
        scale.train(&numbers(&[0.0, 10.0]));
        assert_eq!(color(&scale, 2.0), "#404040");
        assert_eq!(color(&scale, 8.0), "#BFBFBF");
        assert_eq!(scale.computed_breaks(), vec![Value::Int(5)]);
        assert_eq!(scale.computed_labels(), ["5"]);
    }

    #[test]
    fn test_fermenter_classes() {
        let config = GradientConfig {
            palette: Some(Value::from("Greens")),
            bins: Some(3),
            ..GradientConfig::default()
        };
        let mut scale =
            GradientScale::new(GradientKind::Fermenter, Aesthetic::Fill, CommonConfig::default(), config).unwrap();
        scale.train(&numbers(&[0.0, 9.0]));
        assert_eq!(color(&scale, 0.0), "#00441B");
        assert_eq!(color(&scale, 4.5), "#74C476");
        assert_eq!(color(&scale, 9.0), "#F7FCF5");
    }

    #[test]
    fn test_distiller_and_viridis() {
        let mut distiller = GradientScale::new(
            GradientKind::Distiller,
            Aesthetic::Fill,
            CommonConfig::default(),
            GradientConfig {
                palette: Some(Value::from("Blues")),
                direction: Some(1),
                ..GradientConfig::default()
            },
        )
        .unwrap();
        distiller.train(&numbers(&[0.0, 1.0]));
        assert_eq!(color(&distiller, 0.0), "#F7FBFF");
        assert_eq!(color(&distiller, 1.0), "#08306B");

        let mut viridis = GradientScale::new(
            GradientKind::Viridis,
            Aesthetic::Color,
            CommonConfig::default(),
            GradientConfig::default(),
        )
        .unwrap();
        viridis.train(&numbers(&[0.0, 1.0]));
        assert_eq!(color(&viridis, 0.0), "#440154");
        assert_eq!(color(&viridis, 1.0), "#FDE725");

        let unknown = GradientConfig {
            palette: Some(Value::from("Nope")),
            ..GradientConfig::default()
        };
        assert!(matches!(
            GradientScale::new(GradientKind::Distiller, Aesthetic::Fill, CommonConfig::default(), unknown),
            Err(ScaleError::UnknownPalette(_))
        ));
    }

    #[test]
    fn test_log_gradient() {
        let config = GradientConfig {
            low: Some("black".into()),
            high: Some("white".into()),
            trans: Transformation::Log10,
            ..GradientConfig::default()
        };
        let mut scale =
            GradientScale::new(GradientKind::Gradient, Aesthetic::Color, CommonConfig::default(), config).unwrap();
        scale.train(&numbers(&[1.0, 100.0]));
        assert_eq!(color(&scale, 10.0), "#808080");
        assert_eq!(color(&scale, -1.0), DEFAULT_NA_COLOR);
    }

    #[test]
    fn test_rejects_non_colour_aesthetic() {
        let result = GradientScale::new(
            GradientKind::Gradient,
            Aesthetic::Size,
            CommonConfig::default(),
            GradientConfig::default(),
        );
        assert!(matches!(result, Err(ScaleError::UnsupportedAesthetic { .. })));
    }

    #[test]
    fn test_breaks_follow_the_data_without_expansion() {
        let mut scale = black_to_white(None);
        scale.train(&numbers(&[0.0, 100.0]));
        assert_eq!(scale.computed_labels(), ["0", "20", "40", "60", "80", "100"]);
        assert_eq!(scale.legend_colors(3), ["#000000", "#808080", "#FFFFFF"]);
    }
}
