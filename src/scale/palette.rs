use fastnum::decimal::D128;
use log::debug;
use serde::Deserialize;

use super::gradient::DEFAULT_NA_COLOR;
use super::{CommonConfig, Domain, Levels, Scale};
use crate::aesthetic::Aesthetic;
use crate::color::palette::{
    grey_colors, linetype_names, shape_names, BrewerPalette, BrewerType, HuePalette, ViridisOption,
    ViridisPalette,
};
use crate::error::{Result, ScaleError};
use crate::value::{Mapped, Value};

/// Palette family of a discrete palette scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteKind {
    #[default]
    Hue,
    Brewer,
    Viridis,
    Grey,
    Shape,
    Linetype,
}

impl PaletteKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PaletteKind::Hue => "hue",
            PaletteKind::Brewer => "brewer",
            PaletteKind::Viridis => "viridis",
            PaletteKind::Grey => "grey",
            PaletteKind::Shape => "shape",
            PaletteKind::Linetype => "linetype",
        }
    }

    fn supports(self, aesthetic: Aesthetic) -> bool {
        match self {
            PaletteKind::Shape => aesthetic == Aesthetic::Shape,
            PaletteKind::Linetype => aesthetic == Aesthetic::Linetype,
            _ => aesthetic.is_color(),
        }
    }
}

/// Options of the discrete palette scales. Each family reads its own keys.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaletteConfig {
    pub h: Option<(f64, f64)>,
    pub c: Option<f64>,
    pub l: Option<f64>,
    pub h_start: Option<f64>,
    pub direction: Option<i32>,
    /// Brewer scheme name or 1-based index.
    pub palette: Option<Value>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub option: Option<String>,
    pub begin: Option<f64>,
    pub end: Option<f64>,
    pub alpha: Option<f64>,
    /// First grey level in `[0, 1]`.
    pub start: Option<f64>,
    /// Filled shapes when true, outlines otherwise.
    pub solid: Option<bool>,
    pub order_levels: Option<Vec<Value>>,
}

impl PaletteConfig {
    pub const KEYS: &'static [&'static str] = &[
        "h", "c", "l", "h_start", "direction", "palette", "type", "option", "begin", "end", "alpha",
        "start", "solid", "order_levels",
    ];
}

#[derive(Debug, Clone)]
enum Palette {
    Hue(HuePalette),
    Brewer {
        scheme: &'static BrewerPalette,
        direction: i32,
    },
    Viridis(ViridisPalette),
    Grey {
        start: f64,
        end: f64,
    },
    Shape {
        solid: bool,
    },
    Linetype,
}

impl Palette {
    fn build(kind: PaletteKind, config: &PaletteConfig) -> Result<Self> {
        let palette = match kind {
            PaletteKind::Hue => {
                let defaults = HuePalette::default();
                Palette::Hue(HuePalette {
                    h: config.h.unwrap_or(defaults.h),
                    c: config.c.unwrap_or(defaults.c),
                    l: config.l.unwrap_or(defaults.l),
                    h_start: config.h_start.unwrap_or(defaults.h_start),
                    direction: config.direction.unwrap_or(defaults.direction),
                })
            }
            PaletteKind::Brewer => {
                let family = match &config.kind {
                    Some(kind) => kind.parse::<BrewerType>()?,
                    None => BrewerType::Seq,
                };
                let scheme = match &config.palette {
                    None | Some(Value::Null) => BrewerPalette::by_index(family, 1)?,
                    Some(Value::Text(name)) => BrewerPalette::by_name(name)?,
                    Some(other) => match other.as_f64() {
                        Some(index) if index >= 1.0 && index.fract() == 0.0 => {
                            BrewerPalette::by_index(family, index as usize)?
                        }
                        _ => return Err(ScaleError::UnknownPalette(other.to_string())),
                    },
                };
                Palette::Brewer {
                    scheme,
                    direction: config.direction.unwrap_or(1),
                }
            }
            PaletteKind::Viridis => {
                let palette = ViridisPalette {
                    option: match &config.option {
                        Some(option) => option.parse::<ViridisOption>()?,
                        None => ViridisOption::Viridis,
                    },
                    begin: config.begin.unwrap_or(0.0),
                    end: config.end.unwrap_or(1.0),
                    direction: config.direction.unwrap_or(1),
                    alpha: config.alpha.unwrap_or(1.0),
                };
                palette.validate()?;
                Palette::Viridis(palette)
            }
            PaletteKind::Grey => {
                let start = config.start.unwrap_or(0.2);
                let end = config.end.unwrap_or(0.8);
                for (param, value) in [("start", start), ("end", end)] {
                    if !(0.0..=1.0).contains(&value) {
                        return Err(ScaleError::invalid("grey", param, format!("{value} is outside [0, 1]")));
                    }
                }
                Palette::Grey { start, end }
            }
            PaletteKind::Shape => Palette::Shape {
                solid: config.solid.unwrap_or(true),
            },
            PaletteKind::Linetype => Palette::Linetype,
        };
        Ok(palette)
    }

    /// One output per level; `None` where the palette runs out.
    fn generate(&self, n: usize) -> Vec<Option<Mapped>> {
        let colors = |colors: Vec<String>| -> Vec<Option<Mapped>> {
            colors.into_iter().map(|color| Some(Mapped::Color(color))).collect()
        };
        let names = |names: Vec<Option<&'static str>>| -> Vec<Option<Mapped>> {
            names
                .into_iter()
                .map(|name| name.map(|name| Mapped::Literal(Value::from(name))))
                .collect()
        };
        match self {
            Palette::Hue(hue) => colors(hue.colors(n)),
            Palette::Brewer { scheme, direction } => colors(scheme.colors(n, *direction)),
            Palette::Viridis(viridis) => colors(viridis.colors(n)),
            Palette::Grey { start, end } => colors(grey_colors(n, *start, *end)),
            Palette::Shape { solid } => names(shape_names(n, *solid)),
            Palette::Linetype => names(linetype_names(n)),
        }
    }
}

/// Discrete data mapped onto colours, shapes or line types.
///
/// The palette is evaluated once per training pass for the number of levels
/// and cached by level index; `reset` drops the cache.
///
/// # Examples
///
/// ```
/// use ggscale::aesthetic::Aesthetic;
/// use ggscale::scale::{CommonConfig, PaletteKind, PaletteScale, Scale};
/// use ggscale::scale::palette::PaletteConfig;
/// use ggscale::value::{Mapped, Value};
///
/// let mut scale = PaletteScale::new(
///     PaletteKind::Hue,
///     Aesthetic::Color,
///     CommonConfig::default(),
///     PaletteConfig::default(),
/// )
/// .unwrap();
/// scale.train(&[Value::from("a"), Value::from("b"), Value::from("c")]);
///
/// assert_eq!(scale.transform(&Value::from("b")), Mapped::Color("#00BA38".into()));
/// assert_eq!(scale.transform(&Value::from("z")), Mapped::Color("grey50".into()));
/// ```
#[derive(Debug, Clone)]
pub struct PaletteScale {
    kind: PaletteKind,
    aesthetic: Aesthetic,
    common: CommonConfig,
    order_levels: Option<Vec<Value>>,
    palette: Palette,
    na: Mapped,
    levels: Levels,
    cache: Vec<Mapped>,
}

impl PaletteScale {
    pub fn new(
        kind: PaletteKind,
        aesthetic: Aesthetic,
        common: CommonConfig,
        config: PaletteConfig,
    ) -> Result<Self> {
        common.validate(kind.as_str())?;
        if !kind.supports(aesthetic) {
            return Err(ScaleError::UnsupportedAesthetic {
                scale: kind.as_str(),
                aesthetic: aesthetic.to_string(),
            });
        }
        let palette = Palette::build(kind, &config)?;
        let na = common.na_mapped().unwrap_or_else(|| {
            if aesthetic.is_color() {
                Mapped::Color(DEFAULT_NA_COLOR.to_string())
            } else {
                Mapped::Missing
            }
        });
        Ok(Self {
            kind,
            aesthetic,
            common,
            order_levels: config.order_levels,
            palette,
            na,
            levels: Levels::default(),
            cache: Vec::new(),
        })
    }

    /// The default palette scale for a non-positional aesthetic: hue for
    /// colours, shapes and line types for the others.
    pub fn for_aesthetic(aesthetic: Aesthetic) -> Result<Self> {
        let kind = match aesthetic {
            Aesthetic::Shape => PaletteKind::Shape,
            Aesthetic::Linetype => PaletteKind::Linetype,
            _ => PaletteKind::Hue,
        };
        Self::new(kind, aesthetic, CommonConfig::default(), PaletteConfig::default())
    }

    pub fn kind(&self) -> PaletteKind {
        self.kind
    }

    pub fn levels(&self) -> &Levels {
        &self.levels
    }

    /// The cached output per level, in level order.
    pub fn palette_values(&self) -> &[Mapped] {
        &self.cache
    }
}

impl Scale for PaletteScale {
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
            debug!("{} {} scale: no levels, training skipped", self.kind.as_str(), self.aesthetic);
            return;
        }
        self.cache = self
            .palette
            .generate(levels.len())
            .into_iter()
            .map(|mapped| mapped.unwrap_or_else(|| self.na.clone()))
            .collect();
        debug!(
            "trained {} {} scale with {} levels",
            self.kind.as_str(),
            self.aesthetic,
            levels.len()
        );
        self.levels = levels;
    }

    fn reset(&mut self) {
        self.levels = Levels::default();
        self.cache.clear();
    }

    fn transform(&self, value: &Value) -> Mapped {
        self.levels
            .index_of(value)
            .and_then(|index| self.cache.get(index))
            .cloned()
            .unwrap_or_else(|| self.na.clone())
    }

    /// Palette scales have no positional inverse.
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
