use std::fmt;
use std::str::FromStr;

use crate::error::ScaleError;

/// A visual channel that data can be mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aesthetic {
    X,
    Y,
    Color,
    Fill,
    Size,
    Alpha,
    Shape,
    Linetype,
}

impl Aesthetic {
    /// `x` and `y`, whose range is set by the coordinate system.
    pub fn is_positional(self) -> bool {
        matches!(self, Aesthetic::X | Aesthetic::Y)
    }

    pub fn is_color(self) -> bool {
        matches!(self, Aesthetic::Color | Aesthetic::Fill)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Aesthetic::X => "x",
            Aesthetic::Y => "y",
            Aesthetic::Color => "colour",
            Aesthetic::Fill => "fill",
            Aesthetic::Size => "size",
            Aesthetic::Alpha => "alpha",
            Aesthetic::Shape => "shape",
            Aesthetic::Linetype => "linetype",
        }
    }

    /// Continuous expansion `(mult, add)` applied when none is configured.
    pub fn default_continuous_expand(self) -> (f64, f64) {
        if self.is_positional() {
            (0.05, 0.0)
        } else {
            (0.0, 0.0)
        }
    }
}

impl FromStr for Aesthetic {
    type Err = ScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let aesthetic = match s.to_ascii_lowercase().as_str() {
            "x" | "xmin" | "xmax" | "xend" | "xintercept" => Aesthetic::X,
            "y" | "ymin" | "ymax" | "yend" | "yintercept" => Aesthetic::Y,
            "colour" | "color" | "col" => Aesthetic::Color,
            "fill" => Aesthetic::Fill,
            "size" | "linewidth" => Aesthetic::Size,
            "alpha" => Aesthetic::Alpha,
            "shape" => Aesthetic::Shape,
            "linetype" | "lty" => Aesthetic::Linetype,
            _ => return Err(ScaleError::UnknownAesthetic(s.to_string())),
        };
        Ok(aesthetic)
    }
}

impl fmt::Display for Aesthetic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
