//! Cartesian coordinate system: places an x/y scale pair on a screen
//! rectangle.
//!
//! Scales map data into their own range space; the [`Transform`] rescales
//! that range onto pixels. Screen y grows downward, so the vertical axis is
//! inverted. With [`Transform::flipped`] the x scale drives the vertical
//! axis and the y scale the horizontal one.
//!
//! # Examples
//!
//! ```
//! use ggscale::scale::{CommonConfig, ContinuousConfig, ContinuousScale, Scale};
//! use ggscale::aesthetic::Aesthetic;
//! use ggscale::transform::{ScreenPoint, ScreenRect, Transform};
//! use ggscale::value::Value;
//!
//! let common = CommonConfig { expand: Some((0.0, 0.0)), ..CommonConfig::default() };
//! let mut x = ContinuousScale::new(Aesthetic::X, common.clone(), ContinuousConfig::default()).unwrap();
//! let mut y = ContinuousScale::new(Aesthetic::Y, common, ContinuousConfig::default()).unwrap();
//! x.train(&[Value::from(0), Value::from(10)]);
//! y.train(&[Value::from(0), Value::from(100)]);
//!
//! let screen = ScreenRect { x: 0.0, y: 0.0, width: 200.0, height: 100.0 };
//! let transform = Transform::new(&screen, &x, &y);
//!
//! let point = transform.data_to_screen(&Value::from(5), &Value::from(25)).unwrap();
//! assert_eq!((point.x, point.y), (100.0, 75.0));
//!
//! let (dx, dy) = transform.screen_to_data(&ScreenPoint::new(100.0, 75.0)).unwrap();
//! assert_eq!((dx, dy), (Value::from(5), Value::from(25)));
//! ```

use fastnum::decimal::D128;
use num_traits::Float;

use crate::scale::{util, Scale};
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect<S = f32> {
    pub x: S,
    pub y: S,
    pub width: S,
    pub height: S,
}

impl<S: Float> ScreenRect<S> {
    pub fn contains(&self, point: &ScreenPoint<S>) -> bool {
        let (min_x, max_x) = util::sorted_pair(self.x, self.x + self.width);
        let (min_y, max_y) = util::sorted_pair(self.y, self.y + self.height);
        point.x >= min_x && point.x <= max_x && point.y >= min_y && point.y <= max_y
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint<S = f32> {
    pub x: S,
    pub y: S,
}

impl<S> ScreenPoint<S> {
    pub const fn new(x: S, y: S) -> Self {
        Self { x, y }
    }
}

/// Which data scale a query is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// A grid line or tick along one axis, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gridline<S = f32> {
    /// Horizontal pixel for a vertical-running line, vertical pixel otherwise.
    pub pixel: S,
    pub major: bool,
}

/// Maps data pairs onto a screen rectangle through an x and a y scale.
#[derive(Clone, Copy)]
pub struct Transform<'a, S = f32> {
    screen_rect: &'a ScreenRect<S>,
    x_scale: &'a dyn Scale,
    y_scale: &'a dyn Scale,
    flipped: bool,
}

impl<'a, S> Transform<'a, S> {
    pub const fn new(screen_rect: &'a ScreenRect<S>, x_scale: &'a dyn Scale, y_scale: &'a dyn Scale) -> Self {
        Self {
            screen_rect,
            x_scale,
            y_scale,
            flipped: false,
        }
    }

    /// Swaps the screen axes: x data runs vertically, y data horizontally.
    pub fn flipped(mut self) -> Self {
        self.flipped = !self.flipped;
        self
    }

    pub const fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub const fn screen_bounds(&self) -> &ScreenRect<S> {
        self.screen_rect
    }

    fn scale(&self, axis: Axis) -> &'a dyn Scale {
        match axis {
            Axis::X => self.x_scale,
            Axis::Y => self.y_scale,
        }
    }

    /// True when the scale for `axis` runs along the screen's horizontal.
    fn is_horizontal(&self, axis: Axis) -> bool {
        (axis == Axis::X) != self.flipped
    }
}

/// Fraction of the scale's range that `position` sits at.
fn range_fraction(scale: &dyn Scale, position: D128) -> Option<f64> {
    let (lo, hi) = scale.range()?;
    if lo == hi {
        return Some(0.5);
    }
    Some(util::to_f64(&((position - lo) / (hi - lo))))
}

/// Range-space position at `fraction` of the scale's range.
fn range_position(scale: &dyn Scale, fraction: f64) -> Option<D128> {
    let (lo, hi) = scale.range()?;
    Some(lo + (hi - lo) * util::dec(fraction)?)
}

impl<'a, S: Float> Transform<'a, S> {
    /// Pixel for a range-space position of the scale on `axis`.
    fn position_to_pixel(&self, axis: Axis, position: D128) -> Option<S> {
        let fraction = S::from(range_fraction(self.scale(axis), position)?)?;
        let rect = self.screen_rect;
        if self.is_horizontal(axis) {
            Some(rect.x + fraction * rect.width)
        } else {
            Some(rect.y + (S::one() - fraction) * rect.height)
        }
    }

    fn pixel_to_position(&self, axis: Axis, pixel: S) -> Option<D128> {
        let rect = self.screen_rect;
        let fraction = if self.is_horizontal(axis) {
            (pixel - rect.x) / rect.width
        } else {
            S::one() - (pixel - rect.y) / rect.height
        };
        if !fraction.is_finite() {
            return None;
        }
        range_position(self.scale(axis), fraction.to_f64()?)
    }

    /// Pixel coordinate of one data value along the axis its scale occupies.
    /// `None` for values the scale maps to no position.
    pub fn value_to_pixel(&self, axis: Axis, value: &Value) -> Option<S> {
        let position = self.scale(axis).transform(value).as_number()?;
        self.position_to_pixel(axis, position)
    }

    pub fn data_to_screen(&self, x: &Value, y: &Value) -> Option<ScreenPoint<S>> {
        let px = self.value_to_pixel(Axis::X, x)?;
        let py = self.value_to_pixel(Axis::Y, y)?;
        Some(if self.flipped {
            ScreenPoint::new(py, px)
        } else {
            ScreenPoint::new(px, py)
        })
    }

    /// Data values under a screen point, through each scale's inverse.
    pub fn screen_to_data(&self, point: &ScreenPoint<S>) -> Option<(Value, Value)> {
        let (x_pixel, y_pixel) = if self.flipped {
            (point.y, point.x)
        } else {
            (point.x, point.y)
        };
        let x = self.x_scale.inverse(&self.pixel_to_position(Axis::X, x_pixel)?)?;
        let y = self.y_scale.inverse(&self.pixel_to_position(Axis::Y, y_pixel)?)?;
        Some((x, y))
    }

    /// Major and minor grid line positions for `axis`, ordered by range
    /// position.
    pub fn gridlines(&self, axis: Axis) -> Vec<Gridline<S>> {
        self.scale(axis)
            .ticks()
            .filter_map(|tick| {
                self.position_to_pixel(axis, tick.value).map(|pixel| Gridline {
                    pixel,
                    major: tick.level == 0,
                })
            })
            .collect()
    }

    /// Labelled major breaks for `axis`. Breaks the scale cannot place are
    /// skipped.
    pub fn axis_labels(&self, axis: Axis) -> Vec<(S, String)> {
        let scale = self.scale(axis);
        scale
            .computed_breaks()
            .iter()
            .zip(scale.computed_labels())
            .filter_map(|(value, label)| self.value_to_pixel(axis, value).map(|pixel| (pixel, label)))
            .collect()
    }
}
