//! Colour-space conversion and discrete palettes used by colour and fill scales.

pub mod palette;
pub mod space;

pub use palette::{BrewerPalette, BrewerType, HuePalette, ViridisOption, ViridisPalette};
pub use space::{hcl_to_hex, interpolate_color, parse_color, Rgb};
