//! Building scales from ggplot-style names and loosely-typed JSON options.
//!
//! A scale name is `[scale_]<aesthetic>_<kind>`, e.g. `scale_x_log10`,
//! `colour_gradient2` or `fill_viridis_d`. Option keys are matched after
//! normalisation: `na.value`, `naValue` and `na_value` are the same key.
//! Keys no scale of that kind understands are rejected.
//!
//! # Examples
//!
//! ```
//! use ggscale::scale::Scale;
//! use ggscale::spec::ScaleSpec;
//! use ggscale::value::Value;
//! use serde_json::json;
//!
//! let spec = ScaleSpec::new("scale_y_continuous", json!({"expand": [0, 0], "n.breaks": 3})).unwrap();
//! let mut scale = spec.build().unwrap();
//! scale.train(&[Value::from(0), Value::from(10)]);
//! assert_eq!(scale.computed_labels(), ["0", "5", "10"]);
//!
//! let typo = ScaleSpec::new("scale_y_continuous", json!({"lables": ["a"]}));
//! assert!(typo.is_err());
//! ```

use std::fmt;

use log::debug;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value as Json};

use crate::aesthetic::Aesthetic;
use crate::error::{Result, ScaleError};
use crate::scale::{
    AnyScale, BinnedConfig, BinnedScale, CommonConfig, ContinuousConfig, ContinuousScale,
    DiscreteConfig, DiscreteScale, GradientConfig, GradientKind, GradientScale, IdentityScale,
    ManualConfig, ManualScale, PaletteConfig, PaletteKind, PaletteScale, TemporalConfig,
    TemporalKind, TemporalScale, Transformation,
};
use crate::value::{Value, ValueKind};

/// Bins used by stepped colour scales when none are configured.
const DEFAULT_STEPS: usize = 5;

/// Alternative spellings, applied after normalisation.
const ALIASES: &[(&str, &str)] = &[
    ("colours", "colors"),
    ("transform", "trans"),
    ("nbreaks", "n_breaks"),
    ("n_bins", "bins"),
    ("nbins", "bins"),
    ("levels", "order_levels"),
    ("hstart", "h_start"),
];

/// What a scale name asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleKind {
    Continuous(Transformation),
    Discrete,
    Binned,
    Temporal(TemporalKind),
    Gradient { kind: GradientKind, stepped: bool },
    Palette(PaletteKind),
    Manual,
    Identity,
}

impl ScaleKind {
    /// Resolves the `<kind>` part of a name for an aesthetic.
    fn resolve(aesthetic: Aesthetic, kind: &str) -> Option<ScaleKind> {
        let color = aesthetic.is_color();
        let resolved = match kind {
            "continuous" if color => ScaleKind::Gradient {
                kind: GradientKind::Gradient,
                stepped: false,
            },
            "continuous" | "linear" => ScaleKind::Continuous(Transformation::Identity),
            "log10" => ScaleKind::Continuous(Transformation::Log10),
            "sqrt" => ScaleKind::Continuous(Transformation::Sqrt),
            "reverse" => ScaleKind::Continuous(Transformation::Reverse),
            "discrete" => match aesthetic {
                Aesthetic::Shape => ScaleKind::Palette(PaletteKind::Shape),
                Aesthetic::Linetype => ScaleKind::Palette(PaletteKind::Linetype),
                _ if color => ScaleKind::Palette(PaletteKind::Hue),
                _ => ScaleKind::Discrete,
            },
            "binned" if color => ScaleKind::Gradient {
                kind: GradientKind::Gradient,
                stepped: true,
            },
            "binned" => ScaleKind::Binned,
            "date" => ScaleKind::Temporal(TemporalKind::Date),
            "datetime" => ScaleKind::Temporal(TemporalKind::DateTime),
            "time" => ScaleKind::Temporal(TemporalKind::Time),
            "gradient" => gradient(GradientKind::Gradient, false),
            "gradient2" => gradient(GradientKind::Gradient2, false),
            "gradientn" => gradient(GradientKind::GradientN, false),
            "steps" => gradient(GradientKind::Gradient, true),
            "steps2" => gradient(GradientKind::Gradient2, true),
            "stepsn" => gradient(GradientKind::GradientN, true),
            "distiller" => gradient(GradientKind::Distiller, false),
            "fermenter" => gradient(GradientKind::Fermenter, true),
            "viridis_c" => gradient(GradientKind::Viridis, false),
            "viridis_b" => gradient(GradientKind::Viridis, true),
            "viridis_d" => ScaleKind::Palette(PaletteKind::Viridis),
            "hue" => ScaleKind::Palette(PaletteKind::Hue),
            "brewer" => ScaleKind::Palette(PaletteKind::Brewer),
            "grey" | "gray" => ScaleKind::Palette(PaletteKind::Grey),
            "shape" => ScaleKind::Palette(PaletteKind::Shape),
            "linetype" => ScaleKind::Palette(PaletteKind::Linetype),
            "manual" => ScaleKind::Manual,
            "identity" => ScaleKind::Identity,
            _ => return None,
        };
        Some(resolved)
    }

    /// Kind used when a name is just an aesthetic, e.g. `scale_shape`.
    fn default_for(aesthetic: Aesthetic) -> Option<ScaleKind> {
        match aesthetic {
            Aesthetic::Shape => Some(ScaleKind::Palette(PaletteKind::Shape)),
            Aesthetic::Linetype => Some(ScaleKind::Palette(PaletteKind::Linetype)),
            Aesthetic::Size | Aesthetic::Alpha => Some(ScaleKind::Continuous(Transformation::Identity)),
            _ => None,
        }
    }

    /// Option keys beyond [`CommonConfig::KEYS`].
    fn keys(self) -> &'static [&'static str] {
        match self {
            ScaleKind::Continuous(_) => ContinuousConfig::KEYS,
            ScaleKind::Discrete => DiscreteConfig::KEYS,
            ScaleKind::Binned => BinnedConfig::KEYS,
            ScaleKind::Temporal(_) => TemporalConfig::KEYS,
            ScaleKind::Gradient { .. } => GradientConfig::KEYS,
            ScaleKind::Palette(_) => PaletteConfig::KEYS,
            ScaleKind::Manual => ManualConfig::KEYS,
            ScaleKind::Identity => &[],
        }
    }
}

fn gradient(kind: GradientKind, stepped: bool) -> ScaleKind {
    ScaleKind::Gradient { kind, stepped }
}

/// `na.value`, `naValue` and `na-value` all become `na_value`.
fn normalize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        match ch {
            '.' | '-' | ' ' => out.push('_'),
            upper if upper.is_ascii_uppercase() => {
                if i > 0 && !out.ends_with('_') {
                    out.push('_');
                }
                out.push(upper.to_ascii_lowercase());
            }
            other => out.push(other),
        }
    }
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == out)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(out)
}

/// A validated scale request: name resolved, option keys checked.
#[derive(Debug, Clone)]
pub struct ScaleSpec {
    name: String,
    aesthetic: Aesthetic,
    kind: ScaleKind,
    common: Map<String, Json>,
    specific: Map<String, Json>,
}

impl ScaleSpec {
    /// Parses `name` and sorts `options` into common and kind-specific keys.
    /// `options` must be an object or null.
    pub fn new(name: &str, options: Json) -> Result<Self> {
        let (aesthetic, kind) = Self::parse_name(name)?;
        let options = match options {
            Json::Null => Map::new(),
            Json::Object(map) => map,
            other => {
                return Err(ScaleError::invalid(
                    "spec",
                    "options",
                    format!("expected an object, got {other}"),
                ))
            }
        };

        let mut common = Map::new();
        let mut specific = Map::new();
        for (key, value) in options {
            let canonical = normalize_key(&key);
            if CommonConfig::KEYS.contains(&canonical.as_str()) {
                common.insert(canonical, value);
            } else if kind.keys().contains(&canonical.as_str()) {
                specific.insert(canonical, value);
            } else {
                return Err(ScaleError::UnknownOption {
                    scale: name.to_string(),
                    key,
                });
            }
        }

        if let ScaleKind::Continuous(trans) = kind {
            if trans != Transformation::Identity && specific.contains_key("trans") {
                return Err(ScaleError::invalid(
                    "continuous",
                    "trans",
                    format!("already fixed to {} by the scale name", trans.name()),
                ));
            }
        }

        Ok(Self {
            name: name.to_string(),
            aesthetic,
            kind,
            common,
            specific,
        })
    }

    /// Reads `{"scale": "<name>", ...options}`.
    pub fn from_json(text: &str) -> Result<Self> {
        let mut object: Map<String, Json> = serde_json::from_str(text)?;
        let name = match object.remove("scale") {
            Some(Json::String(name)) => name,
            _ => return Err(ScaleError::invalid("spec", "scale", "a scale name string is required")),
        };
        Self::new(&name, Json::Object(object))
    }

    /// Splits a scale name into its aesthetic and kind.
    pub fn parse_name(name: &str) -> Result<(Aesthetic, ScaleKind)> {
        let unknown = || ScaleError::UnknownScale(name.to_string());
        let bare = name.trim().strip_prefix("scale_").unwrap_or(name.trim());
        let (aesthetic, kind) = match bare.split_once('_') {
            Some((aesthetic, kind)) => (aesthetic, Some(kind)),
            None => (bare, None),
        };
        let aesthetic: Aesthetic = aesthetic.parse()?;
        let kind = match kind {
            Some(kind) => ScaleKind::resolve(aesthetic, kind),
            None => ScaleKind::default_for(aesthetic),
        }
        .ok_or_else(unknown)?;
        Ok((aesthetic, kind))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aesthetic(&self) -> Aesthetic {
        self.aesthetic
    }

    pub fn kind(&self) -> ScaleKind {
        self.kind
    }

    fn config<T: DeserializeOwned>(map: &Map<String, Json>) -> Result<T> {
        Ok(serde_json::from_value(Json::Object(map.clone()))?)
    }

    fn unsupported(&self) -> ScaleError {
        ScaleError::UnsupportedAesthetic {
            scale: match self.kind {
                ScaleKind::Continuous(_) => "continuous",
                ScaleKind::Discrete => "discrete",
                ScaleKind::Binned => "binned",
                ScaleKind::Temporal(_) => "temporal",
                ScaleKind::Gradient { .. } => "gradient",
                ScaleKind::Palette(_) => "palette",
                ScaleKind::Manual => "manual",
                ScaleKind::Identity => "identity",
            },
            aesthetic: self.aesthetic.to_string(),
        }
    }

    /// Constructs the scale. Option values are validated here.
    pub fn build(&self) -> Result<AnyScale> {
        let aesthetic = self.aesthetic;
        let common: CommonConfig = Self::config(&self.common)?;
        let scale: AnyScale = match self.kind {
            ScaleKind::Continuous(trans) => {
                if matches!(aesthetic, Aesthetic::Shape | Aesthetic::Linetype) || aesthetic.is_color() {
                    return Err(self.unsupported());
                }
                let mut config: ContinuousConfig = Self::config(&self.specific)?;
                if trans != Transformation::Identity {
                    config.trans = trans;
                }
                ContinuousScale::new(aesthetic, common, config)?.into()
            }
            ScaleKind::Discrete => {
                if !aesthetic.is_positional() {
                    return Err(self.unsupported());
                }
                DiscreteScale::new(aesthetic, common, Self::config(&self.specific)?)?.into()
            }
            ScaleKind::Binned => {
                if !matches!(aesthetic, Aesthetic::X | Aesthetic::Y | Aesthetic::Size | Aesthetic::Alpha) {
                    return Err(self.unsupported());
                }
                BinnedScale::new(aesthetic, common, Self::config(&self.specific)?)?.into()
            }
            ScaleKind::Temporal(kind) => {
                if !aesthetic.is_positional() {
                    return Err(self.unsupported());
                }
                TemporalScale::new(kind, aesthetic, common, Self::config(&self.specific)?)?.into()
            }
            ScaleKind::Gradient { kind, stepped } => {
                let mut config: GradientConfig = Self::config(&self.specific)?;
                if stepped && config.bins.is_none() && kind != GradientKind::Fermenter {
                    config.bins = Some(DEFAULT_STEPS);
                }
                GradientScale::new(kind, aesthetic, common, config)?.into()
            }
            ScaleKind::Palette(kind) => {
                PaletteScale::new(kind, aesthetic, common, Self::config(&self.specific)?)?.into()
            }
            ScaleKind::Manual => ManualScale::new(aesthetic, common, Self::config(&self.specific)?)?.into(),
            ScaleKind::Identity => IdentityScale::new(aesthetic, common)?.into(),
        };
        debug!("built {} scale for {}", self.name, aesthetic);
        Ok(scale)
    }

    /// The scale an aesthetic gets when none is configured, chosen from the
    /// type of its data. Sizes and alphas have no discrete default.
    pub fn default_for(aesthetic: Aesthetic, values: &[Value]) -> Result<AnyScale> {
        let present: Vec<&Value> = values.iter().filter(|value| !value.is_null()).collect();
        let all = |kind: ValueKind| !present.is_empty() && present.iter().all(|value| value.kind() == kind);
        let numeric = !present.is_empty() && present.iter().all(|value| value.as_decimal().is_some());

        let kind = if numeric && !matches!(aesthetic, Aesthetic::Shape | Aesthetic::Linetype) {
            "continuous"
        } else if aesthetic.is_positional() && all(ValueKind::Date) {
            "date"
        } else if aesthetic.is_positional() && all(ValueKind::DateTime) {
            "datetime"
        } else if aesthetic.is_positional() && all(ValueKind::Time) {
            "time"
        } else {
            "discrete"
        };
        let resolved = ScaleKind::resolve(aesthetic, kind)
            .ok_or_else(|| ScaleError::UnknownScale(format!("{aesthetic}_{kind}")))?;
        let spec = ScaleSpec {
            name: format!("scale_{aesthetic}_{kind}"),
            aesthetic,
            kind: resolved,
            common: Map::new(),
            specific: Map::new(),
        };
        spec.build()
    }
}

impl fmt::Display for ScaleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Shorthand for [`ScaleSpec::new`] followed by [`ScaleSpec::build`].
pub fn build_scale(name: &str, options: Json) -> Result<AnyScale> {
    ScaleSpec::new(name, options)?.build()
}
