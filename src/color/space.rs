//! HCL (polar CIELUV) to sRGB conversion and RGB-space interpolation.
//!
//! The conversion chain is `Hcl → Luv → Xyz → LinearRgb → Rgb`, each step a
//! `From` impl, using the D65 reference white.

use std::fmt;

/// D65 reference white, 2° observer.
const WHITE_X: f64 = 95.047;
const WHITE_Y: f64 = 100.0;
const WHITE_Z: f64 = 108.883;

/// Hue in degrees, chroma, luminance in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hcl {
    pub h: f64,
    pub c: f64,
    pub l: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Luv {
    l: f64,
    u: f64,
    v: f64,
}

/// CIE XYZ, `None` when the inverse is numerically degenerate.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Xyz(Option<(f64, f64, f64)>);

#[derive(Debug, Clone, Copy, PartialEq)]
struct LinearRgb {
    r: f64,
    g: f64,
    b: f64,
}

/// An 8-bit sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl From<Hcl> for Luv {
    fn from(Hcl { h, c, l }: Hcl) -> Self {
        let radians = h.to_radians();
        Luv {
            l,
            u: c * radians.cos(),
            v: c * radians.sin(),
        }
    }
}

impl From<Luv> for Xyz {
    fn from(Luv { l, u, v }: Luv) -> Self {
        if l.is_nan() || l <= 0.0 {
            return Xyz(None);
        }

        let denom = WHITE_X + 15.0 * WHITE_Y + 3.0 * WHITE_Z;
        let u_white = 4.0 * WHITE_X / denom;
        let v_white = 9.0 * WHITE_Y / denom;

        let y = if l > 7.999592 {
            WHITE_Y * ((l + 16.0) / 116.0).powi(3)
        } else {
            WHITE_Y * l / 903.3
        };

        let u_prime = u / (13.0 * l) + u_white;
        let v_prime = v / (13.0 * l) + v_white;
        if v_prime.abs() < 1e-9 || (4.0 * v_prime).abs() < 1e-9 {
            return Xyz(None);
        }

        let x = 9.0 * y * u_prime / (4.0 * v_prime);
        if !x.is_finite() || x.abs() > 1e6 {
            return Xyz(None);
        }
        let z = -x / 3.0 - 5.0 * y + 3.0 * y / v_prime;
        Xyz(Some((x, y, z)))
    }
}

impl From<Xyz> for LinearRgb {
    fn from(xyz: Xyz) -> Self {
        let Some((x, y, z)) = xyz.0 else {
            return LinearRgb { r: 0.0, g: 0.0, b: 0.0 };
        };
        LinearRgb {
            r: (3.240479 * x - 1.537150 * y - 0.498535 * z) / WHITE_Y,
            g: (-0.969256 * x + 1.875992 * y + 0.041556 * z) / WHITE_Y,
            b: (0.055648 * x - 0.204043 * y + 1.057311 * z) / WHITE_Y,
        }
    }
}

fn gamma(channel: f64) -> f64 {
    if channel <= 0.0031308 {
        12.92 * channel
    } else {
        1.055 * channel.powf(1.0 / 2.4) - 0.055
    }
}

fn to_byte(value: f64) -> u8 {
    if value.is_finite() {
        value.round().clamp(0.0, 255.0) as u8
    } else {
        0
    }
}

impl From<LinearRgb> for Rgb {
    fn from(LinearRgb { r, g, b }: LinearRgb) -> Self {
        Rgb {
            r: to_byte(255.0 * gamma(r)),
            g: to_byte(255.0 * gamma(g)),
            b: to_byte(255.0 * gamma(b)),
        }
    }
}

impl From<Hcl> for Rgb {
    fn from(hcl: Hcl) -> Self {
        Rgb::from(LinearRgb::from(Xyz::from(Luv::from(hcl))))
    }
}

impl Rgb {
    pub const GRAY: Rgb = Rgb { r: 128, g: 128, b: 128 };

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Converts an HCL triple to `#RRGGBB`.
///
/// Zero luminance and numerically degenerate inverses give `#000000`.
///
/// # Examples
///
/// ```
/// use ggscale::color::space::hcl_to_hex;
///
/// assert_eq!(hcl_to_hex(15.0, 100.0, 65.0), "#F8766D");
/// assert_eq!(hcl_to_hex(240.0, 0.0, 0.0), "#000000");
/// ```
pub fn hcl_to_hex(h: f64, c: f64, l: f64) -> String {
    Rgb::from(Hcl { h, c, l }).to_hex()
}

const NAMED_COLORS: &[(&str, Rgb)] = &[
    ("white", Rgb { r: 255, g: 255, b: 255 }),
    ("black", Rgb { r: 0, g: 0, b: 0 }),
    ("red", Rgb { r: 255, g: 0, b: 0 }),
    ("green", Rgb { r: 0, g: 255, b: 0 }),
    ("blue", Rgb { r: 0, g: 0, b: 255 }),
    ("yellow", Rgb { r: 255, g: 255, b: 0 }),
    ("cyan", Rgb { r: 0, g: 255, b: 255 }),
    ("magenta", Rgb { r: 255, g: 0, b: 255 }),
    ("orange", Rgb { r: 255, g: 165, b: 0 }),
    ("purple", Rgb { r: 160, g: 32, b: 240 }),
    ("pink", Rgb { r: 255, g: 192, b: 203 }),
    ("brown", Rgb { r: 165, g: 42, b: 42 }),
    ("gray", Rgb { r: 190, g: 190, b: 190 }),
    ("grey", Rgb { r: 190, g: 190, b: 190 }),
    ("darkgray", Rgb { r: 169, g: 169, b: 169 }),
    ("darkgrey", Rgb { r: 169, g: 169, b: 169 }),
    ("lightgray", Rgb { r: 211, g: 211, b: 211 }),
    ("lightgrey", Rgb { r: 211, g: 211, b: 211 }),
    ("navy", Rgb { r: 0, g: 0, b: 128 }),
    ("steelblue", Rgb { r: 70, g: 130, b: 180 }),
    ("darkblue", Rgb { r: 0, g: 0, b: 139 }),
    ("darkred", Rgb { r: 139, g: 0, b: 0 }),
    ("darkgreen", Rgb { r: 0, g: 100, b: 0 }),
    ("gold", Rgb { r: 255, g: 215, b: 0 }),
    ("skyblue", Rgb { r: 135, g: 206, b: 235 }),
    ("tomato", Rgb { r: 255, g: 99, b: 71 }),
];

fn hex_digit_pair(text: &str) -> Option<u8> {
    u8::from_str_radix(text, 16).ok()
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => {
            let mut channels = hex.chars().map(|ch| u8::from_str_radix(&format!("{ch}{ch}"), 16));
            Some(Rgb {
                r: channels.next()?.ok()?,
                g: channels.next()?.ok()?,
                b: channels.next()?.ok()?,
            })
        }
        // Alpha of an 8-digit hex is not part of the RGB triple.
        6 | 8 => Some(Rgb {
            r: hex_digit_pair(&hex[0..2])?,
            g: hex_digit_pair(&hex[2..4])?,
            b: hex_digit_pair(&hex[4..6])?,
        }),
        _ => None,
    }
}

/// `grey0`..`grey100` / `gray0`..`gray100`.
fn parse_grey_level(name: &str) -> Option<Rgb> {
    let digits = name.strip_prefix("grey").or_else(|| name.strip_prefix("gray"))?;
    let level: u32 = digits.parse().ok()?;
    if level > 100 {
        return None;
    }
    let byte = (level as f64 * 2.55 + 0.5).floor() as u8;
    Some(Rgb { r: byte, g: byte, b: byte })
}

/// Parses `#RRGGBB`, `#RGB`, `#RRGGBBAA`, a named colour or `greyN`.
pub fn parse_color(text: &str) -> Option<Rgb> {
    let text = text.trim();
    if let Some(hex) = text.strip_prefix('#') {
        return parse_hex(hex);
    }
    let name = text.to_ascii_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, rgb)| *rgb)
        .or_else(|| parse_grey_level(&name))
}

/// Normalizes any recognized colour to `#RRGGBB`, keeping unknown text as is.
pub fn to_hex(text: &str) -> String {
    parse_color(text).map(Rgb::to_hex).unwrap_or_else(|| text.to_string())
}

/// Interpolates two colours channel by channel in sRGB space.
///
/// Unrecognized colours are treated as mid gray. `t` is not clamped.
///
/// # Examples
///
/// ```
/// use ggscale::color::space::interpolate_color;
///
/// assert_eq!(interpolate_color("#000000", "#FFFFFF", 0.5), "#808080");
/// assert_eq!(interpolate_color("red", "blue", 0.0), "#FF0000");
/// ```
pub fn interpolate_color(from: &str, to: &str, t: f64) -> String {
    let a = parse_color(from).unwrap_or(Rgb::GRAY);
    let b = parse_color(to).unwrap_or(Rgb::GRAY);
    let mix = |x: u8, y: u8| to_byte(x as f64 + (y as f64 - x as f64) * t);
    Rgb {
        r: mix(a.r, b.r),
        g: mix(a.g, b.g),
        b: mix(a.b, b.b),
    }
    .to_hex()
}

/// Appends an alpha channel to a colour, giving `#RRGGBBAA`. Full opacity
/// leaves the colour as `#RRGGBB`.
pub fn with_alpha(color: &str, alpha: f64) -> String {
    let hex = to_hex(color);
    if alpha >= 1.0 || !hex.starts_with('#') {
        return hex;
    }
    format!("{hex}{:02X}", to_byte(alpha.max(0.0) * 255.0))
}
