use std::collections::BTreeMap;

use fastnum::decimal::D128;
use log::{debug, warn};
use serde::Deserialize;

use super::gradient::DEFAULT_NA_COLOR;
use super::palette::PaletteConfig;
use super::{format_value, CommonConfig, Domain, Levels, PaletteKind, PaletteScale, Scale};
use crate::aesthetic::Aesthetic;
use crate::color::space::parse_color;
use crate::error::{Result, ScaleError};
use crate::value::{Mapped, Value};

/// User-supplied outputs: one per level in level order, or keyed by the
/// level's label.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ManualValues {
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

/// Options specific to manual scales.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManualConfig {
    pub values: Option<ManualValues>,
    pub order_levels: Option<Vec<Value>>,
}

impl ManualConfig {
    pub const KEYS: &'static [&'static str] = &["values", "order_levels"];
}

/// Turns a raw output value into the mapped form the aesthetic expects.
fn to_mapped(aesthetic: Aesthetic, value: &Value) -> Option<Mapped> {
    if value.is_null() {
        return None;
    }
    if aesthetic.is_color() {
        return match value {
            Value::Text(color) if parse_color(color).is_some() => Some(Mapped::Color(color.clone())),
            _ => None,
        };
    }
    match aesthetic {
        Aesthetic::Shape | Aesthetic::Linetype => Some(Mapped::Literal(value.clone())),
        _ => value.as_decimal().map(Mapped::Number),
    }
}

fn default_na(aesthetic: Aesthetic) -> Mapped {
    if aesthetic.is_color() {
        Mapped::Color(DEFAULT_NA_COLOR.to_string())
    } else {
        Mapped::Missing
    }
}

/// Discrete scale whose outputs are given explicitly.
///
/// # Examples
///
/// ```
/// use ggscale::aesthetic::Aesthetic;
/// use ggscale::scale::manual::ManualValues;
/// use ggscale::scale::{CommonConfig, ManualConfig, ManualScale, Scale};
/// use ggscale::value::{Mapped, Value};
///
/// let config = ManualConfig {
///     values: Some(ManualValues::List(vec![Value::from("red"), Value::from("blue")])),
///     ..ManualConfig::default()
/// };
/// let mut scale = ManualScale::new(Aesthetic::Fill, CommonConfig::default(), config).unwrap();
/// scale.train(&[Value::from("yes"), Value::from("no")]);
///
/// // Levels sort to ["no", "yes"].
/// assert_eq!(scale.transform(&Value::from("yes")), Mapped::Color("blue".into()));
/// ```
#[derive(Debug, Clone)]
pub struct ManualScale {
    aesthetic: Aesthetic,
    common: CommonConfig,
    order_levels: Option<Vec<Value>>,
    values: Option<ManualValues>,
    /// Used when no values are given.
    fallback: Option<PaletteScale>,
    na: Mapped,
    levels: Levels,
    cache: Vec<Mapped>,
}

impl ManualScale {
    pub fn new(aesthetic: Aesthetic, common: CommonConfig, config: ManualConfig) -> Result<Self> {
        common.validate("manual")?;
        let outputs: Vec<&Value> = match &config.values {
            Some(ManualValues::List(values)) => values.iter().collect(),
            Some(ManualValues::Map(values)) => values.values().collect(),
            None => Vec::new(),
        };
        if let Some(bad) = outputs.iter().find(|value| !value.is_null() && to_mapped(aesthetic, value).is_none()) {
            return Err(ScaleError::invalid(
                "manual",
                "values",
                format!("`{bad}` is not a valid {aesthetic} value"),
            ));
        }

        let fallback = match (&config.values, aesthetic) {
            (Some(_), _) => None,
            (None, Aesthetic::Shape) => Some(PaletteKind::Shape),
            (None, Aesthetic::Linetype) => Some(PaletteKind::Linetype),
            (None, aesthetic) if aesthetic.is_color() => Some(PaletteKind::Hue),
            (None, aesthetic) => {
                return Err(ScaleError::invalid(
                    "manual",
                    "values",
                    format!("required for the {aesthetic} aesthetic"),
                ))
            }
        }
        .map(|kind| {
            let fallback_common = CommonConfig {
                na_value: common.na_value.clone(),
                limits: common.limits.clone(),
                ..CommonConfig::default()
            };
            let palette = PaletteConfig {
                order_levels: config.order_levels.clone(),
                ..PaletteConfig::default()
            };
            PaletteScale::new(kind, aesthetic, fallback_common, palette)
        })
        .transpose()?;

        let na = common.na_mapped().unwrap_or_else(|| default_na(aesthetic));
        Ok(Self {
            aesthetic,
            common,
            order_levels: config.order_levels,
            values: config.values,
            fallback,
            na,
            levels: Levels::default(),
            cache: Vec::new(),
        })
    }

    pub fn levels(&self) -> &Levels {
        &self.levels
    }

    fn output_for(&self, index: usize, level: &Value) -> Option<Mapped> {
        let raw = match self.values.as_ref()? {
            ManualValues::List(values) => values.get(index)?,
            ManualValues::Map(values) => values.get(&format_value(level))?,
        };
        to_mapped(self.aesthetic, raw)
    }
}

impl Scale for ManualScale {
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
            debug!("manual {} scale: no levels, training skipped", self.aesthetic);
            return;
        }
        if let Some(fallback) = self.fallback.as_mut() {
            fallback.train(levels.as_slice());
            self.cache = fallback.palette_values().to_vec();
        } else {
            if let Some(ManualValues::List(outputs)) = &self.values {
                if outputs.len() < levels.len() {
                    warn!(
                        "manual {} scale: {} values for {} levels",
                        self.aesthetic,
                        outputs.len(),
                        levels.len()
                    );
                }
            }
            self.cache = levels
                .as_slice()
                .iter()
                .enumerate()
                .map(|(index, level)| self.output_for(index, level).unwrap_or_else(|| self.na.clone()))
                .collect();
        }
        debug!("trained manual {} scale with {} levels", self.aesthetic, levels.len());
        self.levels = levels;
    }

    fn reset(&mut self) {
        self.levels = Levels::default();
        self.cache.clear();
        if let Some(fallback) = self.fallback.as_mut() {
            fallback.reset();
        }
    }

    fn transform(&self, value: &Value) -> Mapped {
        self.levels
            .index_of(value)
            .and_then(|index| self.cache.get(index))
            .cloned()
            .unwrap_or_else(|| self.na.clone())
    }

    fn inverse(&self, _position: &D128) -> Option<Value> {
        None
    }

    fn domain(&self) -> Domain {
        if self.levels.is_empty() {
            Domain::Empty
        } else {
            Domain::Discrete(self.levels.as_slice().to_vec())
        }
    }

    fn computed_breaks(&self) -> Vec<Value> {
        self.levels.breaks(self.common.breaks.as_deref())
    }

    fn computed_labels(&self) -> Vec<String> {
        self.levels.labels(&self.common)
    }
}

/// Passes data values straight through as outputs: colour strings for
/// colour aesthetics, numbers for sizes and positions, names for shapes and
/// line types. Produces no breaks unless they are given explicitly.
#[derive(Debug, Clone)]
pub struct IdentityScale {
    aesthetic: Aesthetic,
    common: CommonConfig,
    na: Mapped,
    domain: Domain,
}

impl IdentityScale {
    pub fn new(aesthetic: Aesthetic, common: CommonConfig) -> Result<Self> {
        common.validate("identity")?;
        let na = common.na_mapped().unwrap_or_else(|| default_na(aesthetic));
        Ok(Self {
            aesthetic,
            common,
            na,
            domain: Domain::Empty,
        })
    }
}

impl Scale for IdentityScale {
    fn aesthetic(&self) -> Aesthetic {
        self.aesthetic
    }

    fn name(&self) -> Option<&str> {
        self.common.name.as_deref()
    }

    fn is_trained(&self) -> bool {
        !self.domain.is_empty()
    }

    /// Records the extent of numeric columns, or the distinct values of any
    /// other column.
    fn train(&mut self, values: &[Value]) {
        let present: Vec<&Value> = values.iter().filter(|value| !value.is_null()).collect();
        if present.is_empty() {
            return;
        }
        let numbers: Vec<D128> = present.iter().filter_map(|value| value.as_decimal()).collect();
        self.domain = if numbers.len() == present.len() {
            let mut min = numbers[0];
            let mut max = numbers[0];
            for number in &numbers[1..] {
                if *number < min {
                    min = *number;
                }
                if *number > max {
                    max = *number;
                }
            }
            Domain::Continuous { min, max }
        } else {
            let owned: Vec<Value> = present.into_iter().cloned().collect();
            Domain::Discrete(Levels::train(&owned, None, None).as_slice().to_vec())
        };
    }

    fn reset(&mut self) {
        self.domain = Domain::Empty;
    }

    fn transform(&self, value: &Value) -> Mapped {
        to_mapped(self.aesthetic, value).unwrap_or_else(|| self.na.clone())
    }

    fn inverse(&self, position: &D128) -> Option<Value> {
        Some(Value::Decimal(*position))
    }

    fn domain(&self) -> Domain {
        self.domain.clone()
    }

    fn computed_breaks(&self) -> Vec<Value> {
        self.common.breaks.clone().unwrap_or_default()
    }

    fn computed_labels(&self) -> Vec<String> {
        let breaks = self.computed_breaks();
        self.common.labels_for(&breaks, format_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(values: &[&str]) -> Vec<Value> {
        values.iter().map(|v| Value::from(*v)).collect()
    }

    fn manual(aesthetic: Aesthetic, values: Option<ManualValues>) -> Result<ManualScale> {
        let config = ManualConfig {
            values,
            ..ManualConfig::default()
        };
        ManualScale::new(aesthetic, CommonConfig::default(), config)
    }

    #[test]
    fn test_list_values_follow_level_order() {
        let values = ManualValues::List(column(&["red", "blue"]));
        let mut scale = manual(Aesthetic::Color, Some(values)).unwrap();
        scale.train(&column(&["b", "a", "c"]));
        assert_eq!(scale.transform(&Value::from("a")), Mapped::Color("red".into()));
        assert_eq!(scale.transform(&Value::from("b")), Mapped::Color("blue".into()));
        assert_eq!(scale.transform(&Value::from("c")), Mapped::Color("grey50".into()));
    }

    #[test]
    fn test_labels_drop_with_unknown_breaks() {
        let common = CommonConfig {
            breaks: Some(column(&["a", "z"])),
            labels: Some(vec!["A".into(), "Z".into()]),
            ..CommonConfig::default()
        };
        let config = ManualConfig {
            values: Some(ManualValues::List(column(&["red", "blue"]))),
            ..ManualConfig::default()
        };
        let mut scale = ManualScale::new(Aesthetic::Color, common, config).unwrap();
        scale.train(&column(&["a", "b"]));
        assert_eq!(scale.computed_breaks(), column(&["a"]));
        assert_eq!(scale.computed_labels(), ["A"]);
    }

    #[test]
    fn test_map_values_by_label() {
        let values: ManualValues = serde_json::from_str(r##"{"b": "#00FF00", "1": "#0000FF"}"##).unwrap();
        let mut scale = manual(Aesthetic::Fill, Some(values)).unwrap();
        scale.train(&[Value::from("a"), Value::from("b")]);
        assert_eq!(scale.transform(&Value::from("b")), Mapped::Color("#00FF00".into()));
        assert_eq!(scale.transform(&Value::from("a")), Mapped::Color("grey50".into()));

        let mut numeric = manual(Aesthetic::Fill, Some(serde_json::from_str(r##"{"1": "#0000FF"}"##).unwrap())).unwrap();
        numeric.train(&[Value::Int(1), Value::Int(2)]);
        assert_eq!(numeric.transform(&Value::Float(1.0)), Mapped::Color("#0000FF".into()));
    }

    #[test]
    fn test_numeric_outputs_for_size() {
        let values = ManualValues::List(vec![Value::Int(2), Value::Float(4.5)]);
        let mut scale = manual(Aesthetic::Size, Some(values)).unwrap();
        scale.train(&column(&["small", "large"]));
        assert_eq!(scale.transform(&Value::from("large")), Mapped::Number(D128::from(2)));
        assert_eq!(scale.transform(&Value::from("unknown")), Mapped::Missing);
    }

    #[test]
    fn test_fallback_palettes() {
        let mut colors = manual(Aesthetic::Color, None).unwrap();
        colors.train(&column(&["a", "b", "c"]));
        assert_eq!(colors.transform(&Value::from("b")), Mapped::Color("#00BA38".into()));

        let mut shapes = manual(Aesthetic::Shape, None).unwrap();
        shapes.train(&column(&["a"]));
        assert_eq!(shapes.transform(&Value::from("a")), Mapped::Literal(Value::from("circle")));

        assert!(manual(Aesthetic::Size, None).is_err());
    }

    #[test]
    fn test_rejects_invalid_outputs() {
        let values = ManualValues::List(column(&["red", "not a colour"]));
        assert!(manual(Aesthetic::Color, Some(values)).is_err());
        let values = ManualValues::List(column(&["big"]));
        assert!(manual(Aesthetic::Size, Some(values)).is_err());
    }

    #[test]
    fn test_reset_clears_cache() {
        let mut scale = manual(Aesthetic::Color, Some(ManualValues::List(column(&["red"])))).unwrap();
        scale.train(&column(&["a"]));
        scale.reset();
        assert!(!scale.is_trained());
        assert_eq!(scale.transform(&Value::from("a")), Mapped::Color("grey50".into()));
    }

    #[test]
    fn test_identity_passes_values_through() {
        let mut colors = IdentityScale::new(Aesthetic::Color, CommonConfig::default()).unwrap();
        colors.train(&column(&["red", "#123456"]));
        assert_eq!(colors.transform(&Value::from("red")), Mapped::Color("red".into()));
        assert_eq!(colors.transform(&Value::from("nope")), Mapped::Color("grey50".into()));
        assert!(colors.computed_breaks().is_empty());
        assert!(matches!(colors.domain(), Domain::Discrete(levels) if levels.len() == 2));

        let mut sizes = IdentityScale::new(Aesthetic::Size, CommonConfig::default()).unwrap();
        sizes.train(&[Value::Int(3), Value::Float(1.5), Value::Null]);
        assert_eq!(sizes.transform(&Value::Int(3)), Mapped::Number(D128::from(3)));
        assert_eq!(sizes.transform(&Value::Null), Mapped::Missing);
        assert_eq!(
            sizes.domain(),
            Domain::Continuous {
                min: util_dec(1.5),
                max: D128::from(3)
            }
        );
    }

    fn util_dec(value: f64) -> D128 {
        crate::scale::util::dec(value).unwrap()
    }
}
