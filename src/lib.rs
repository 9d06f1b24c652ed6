//! # ggscale
//!
//! Grammar-of-graphics scales: the layer between a data column and its visual
//! encoding. A scale is trained on a whole column, maps each value into range
//! space (a position, a colour, a size, a shape), and provides the breaks and
//! labels for the matching axis or legend.
//!
//! # Features
//!
//! - Continuous scales with identity, `log10`, `sqrt` and reverse
//!   transformations, expansion, limits and out-of-bounds handling
//! - Discrete band scales and equal-width binned scales
//! - Date, date-time and time-of-day scales with calendar-aware breaks
//! - Colour gradients (two-colour, diverging, n-colour, ColorBrewer, viridis),
//!   continuous or stepped
//! - Discrete palettes: HCL hues, ColorBrewer, viridis, greys, shapes and line
//!   types, plus manual and identity mappings
//! - Construction from ggplot-style names and JSON options
//! - A Cartesian coordinate system that places two scales on a screen
//!   rectangle
//!
//! Domain, range and break arithmetic runs on 128-bit decimals
//! ([`fastnum::decimal::D128`]), so breaks such as `0.1, 0.2, 0.3` print
//! exactly.
//!
//! # Quick Start
//!
//! ```
//! use ggscale::scale::Scale;
//! use ggscale::spec::build_scale;
//! use ggscale::value::{Mapped, Value};
//! use serde_json::json;
//!
//! let column = [Value::from(3.5), Value::from(12), Value::Null, Value::from(20)];
//!
//! let mut x = build_scale("scale_x_continuous", json!({"expand": [0, 0]})).unwrap();
//! x.set_range(0.0, 640.0);
//! x.train(&column);
//! assert_eq!(x.computed_labels(), ["5", "10", "15", "20"]);
//! assert_eq!(x.transform(&Value::Null), Mapped::Missing);
//!
//! let mut fill = build_scale("scale_fill_gradient", json!({"low": "#000000", "high": "#FFFFFF"})).unwrap();
//! fill.train(&[Value::from(0), Value::from(10)]);
//! assert_eq!(fill.transform(&Value::from(5)), Mapped::Color("#808080".into()));
//! ```
//!
//! # Working with typed configuration
//!
//! ```
//! use ggscale::aesthetic::Aesthetic;
//! use ggscale::scale::{CommonConfig, DiscreteConfig, DiscreteScale, Scale};
//! use ggscale::value::{Mapped, Value};
//! use fastnum::decimal::D128;
//!
//! let common = CommonConfig { expand: Some((0.0, 0.0)), ..CommonConfig::default() };
//! let config = DiscreteConfig { range: Some((0.0, 300.0)), ..DiscreteConfig::default() };
//! let mut scale = DiscreteScale::new(Aesthetic::X, common, config).unwrap();
//! scale.train(&[Value::from("a"), Value::from("b"), Value::from("c")]);
//!
//! assert_eq!(scale.transform(&Value::from("b")), Mapped::Number(D128::from(150)));
//! ```
//!
//! # Modules
//!
//! - [`scale`] - The [`Scale`] trait and every scale kind
//! - [`spec`] - Building scales by name from JSON options
//! - [`transform`] - Screen placement of an x/y scale pair
//! - [`color`] - HCL conversion, interpolation and palettes
//! - [`value`] - Data cells in, mapped values out

pub mod aesthetic;
pub mod color;
pub mod error;
pub mod label;
pub mod scale;
pub mod spec;
pub mod transform;
pub mod value;

pub use aesthetic::Aesthetic;
pub use error::{Result, ScaleError};
pub use scale::{AnyScale, Domain, Scale, Tick, TickIter};
pub use spec::{build_scale, ScaleSpec};
pub use transform::{ScreenPoint, ScreenRect, Transform};
pub use value::{Mapped, Value};
