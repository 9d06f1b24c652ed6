use std::str::FromStr;

use fastnum::decimal::D128;
use serde::Deserialize;

use super::{log, nice, util};
use crate::error::ScaleError;

/// Monotone data transformation applied before the linear domain → range map.
///
/// Training, expansion and the linear map happen in transformed space;
/// breaks are chosen in data space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Transformation {
    #[default]
    Identity,
    Log10,
    Sqrt,
    Reverse,
}

impl FromStr for Transformation {
    type Err = ScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "identity" | "linear" => Ok(Transformation::Identity),
            "log10" | "log" => Ok(Transformation::Log10),
            "sqrt" => Ok(Transformation::Sqrt),
            "reverse" => Ok(Transformation::Reverse),
            other => Err(ScaleError::invalid(
                "continuous",
                "trans",
                format!("unknown transformation `{other}`"),
            )),
        }
    }
}

impl TryFrom<String> for Transformation {
    type Error = ScaleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Snaps a float that is within rounding noise of an integer.
fn snap(value: f64) -> f64 {
    let rounded = value.round();
    if (value - rounded).abs() < 1e-12 {
        rounded
    } else {
        value
    }
}

impl Transformation {
    pub fn name(self) -> &'static str {
        match self {
            Transformation::Identity => "identity",
            Transformation::Log10 => "log10",
            Transformation::Sqrt => "sqrt",
            Transformation::Reverse => "reverse",
        }
    }

    /// Whether `value` lies in the transformation's domain.
    pub fn is_valid(self, value: &D128) -> bool {
        match self {
            Transformation::Log10 => *value > D128::from(0),
            Transformation::Sqrt => *value >= D128::from(0),
            Transformation::Identity | Transformation::Reverse => true,
        }
    }

    /// True when larger data values map to smaller transformed values.
    pub fn is_decreasing(self) -> bool {
        self == Transformation::Reverse
    }

    pub fn forward(self, value: D128) -> Option<D128> {
        if !self.is_valid(&value) {
            return None;
        }
        match self {
            Transformation::Identity => Some(value),
            Transformation::Reverse => Some(-value),
            Transformation::Log10 => util::dec(snap(util::to_f64(&value).log10())),
            Transformation::Sqrt => util::dec(util::to_f64(&value).sqrt()),
        }
    }

    pub fn inverse(self, value: D128) -> Option<D128> {
        match self {
            Transformation::Identity => Some(value),
            Transformation::Reverse => Some(-value),
            Transformation::Log10 => {
                let exponent = util::to_f64(&value);
                if exponent.fract() == 0.0 && exponent.abs() <= 300.0 {
                    Some(util::pow10(exponent as i32))
                } else {
                    util::dec(10f64.powf(exponent))
                }
            }
            Transformation::Sqrt => {
                let root = if value < D128::from(0) { D128::from(0) } else { value };
                Some(root * root)
            }
        }
    }

    /// Major breaks for a data-space extent.
    pub fn breaks(self, min: D128, max: D128, count: usize) -> Vec<D128> {
        match self {
            Transformation::Log10 => log::log_breaks(min, max, count),
            _ => nice::nice_breaks(min, max, count),
        }
    }

    /// Minor breaks for a data-space extent.
    pub fn minor_breaks(self, min: D128, max: D128, count: usize) -> Vec<D128> {
        match self {
            Transformation::Log10 => log::log_minor_breaks(min, max),
            _ => nice::nice_minor_breaks(min, max, count),
        }
    }
}
