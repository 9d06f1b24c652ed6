//! Discrete palettes: evenly spaced HCL hues, ColorBrewer, viridis-family,
//! grey ramps, point shapes and line types.

use std::str::FromStr;

use log::warn;

use super::space::{hcl_to_hex, interpolate_color, with_alpha};
use crate::error::{Result, ScaleError};

/// Samples a piecewise-linear colour ramp at `t ∈ [0, 1]`.
///
/// Returns `None` for an empty ramp or a non-finite position. Positions
/// outside the unit interval are clamped.
pub fn sample_ramp<S: AsRef<str>>(stops: &[S], t: f64) -> Option<String> {
    if stops.is_empty() || !t.is_finite() {
        return None;
    }
    if stops.len() == 1 {
        return Some(stops[0].as_ref().to_string());
    }
    let position = t.clamp(0.0, 1.0) * (stops.len() - 1) as f64;
    let index = (position.floor() as usize).min(stops.len() - 2);
    let frac = position - index as f64;
    Some(interpolate_color(
        stops[index].as_ref(),
        stops[index + 1].as_ref(),
        frac,
    ))
}

/// `n` evenly spaced positions between `begin` and `end`, inclusive.
fn spaced(n: usize, begin: f64, end: f64) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![begin],
        _ => (0..n)
            .map(|i| begin + (end - begin) * i as f64 / (n - 1) as f64)
            .collect(),
    }
}

/// Parameters of the evenly spaced hue palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HuePalette {
    pub h: (f64, f64),
    pub c: f64,
    pub l: f64,
    pub h_start: f64,
    pub direction: i32,
}

impl Default for HuePalette {
    fn default() -> Self {
        Self {
            h: (15.0, 375.0),
            c: 100.0,
            l: 65.0,
            h_start: 0.0,
            direction: 1,
        }
    }
}

impl HuePalette {
    /// `n` hues spread over `h`. A full turn drops its end point so the first
    /// and last colours differ.
    ///
    /// # Examples
    ///
    /// ```
    /// use ggscale::color::palette::HuePalette;
    ///
    /// let colors = HuePalette::default().colors(3);
    /// assert_eq!(colors, ["#F8766D", "#00BA38", "#619CFF"]);
    /// ```
    pub fn colors(&self, n: usize) -> Vec<String> {
        if n == 0 {
            return Vec::new();
        }
        let (start, mut end) = self.h;
        if (end - start).rem_euclid(360.0) < 1.0 {
            end -= 360.0 / n as f64;
        }
        let mut colors: Vec<String> = spaced(n, start, end)
            .into_iter()
            .map(|hue| hcl_to_hex((hue + self.h_start).rem_euclid(360.0), self.c, self.l))
            .collect();
        if self.direction < 0 {
            colors.reverse();
        }
        colors
    }
}

/// ColorBrewer scheme family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrewerType {
    /// Ordered data progressing from low to high.
    Seq,
    /// Emphasis on a critical mid-range value and both extremes.
    Div,
    /// Nominal data with no implied magnitude.
    Qual,
}

impl FromStr for BrewerType {
    type Err = ScaleError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "seq" | "sequential" => Ok(BrewerType::Seq),
            "div" | "diverging" => Ok(BrewerType::Div),
            "qual" | "qualitative" => Ok(BrewerType::Qual),
            other => Err(ScaleError::invalid(
                "brewer",
                "type",
                format!("`{other}` is not one of seq, div, qual"),
            )),
        }
    }
}

/// A ColorBrewer scheme at its largest class count.
#[derive(Debug)]
pub struct BrewerPalette {
    pub name: &'static str,
    pub kind: BrewerType,
    pub colors: &'static [&'static str],
}

macro_rules! brewer {
    ($name:literal, $kind:ident, [$($color:literal),+ $(,)?]) => {
        BrewerPalette {
            name: $name,
            kind: BrewerType::$kind,
            colors: &[$($color),+],
        }
    };
}

static BREWER: &[BrewerPalette] = &[
    brewer!("Blues", Seq, ["#F7FBFF", "#DEEBF7", "#C6DBEF", "#9ECAE1", "#6BAED6", "#4292C6", "#2171B5", "#08519C", "#08306B"]),
    brewer!("BuGn", Seq, ["#F7FCFD", "#E5F5F9", "#CCECE6", "#99D8C9", "#66C2A4", "#41AE76", "#238B45", "#006D2C", "#00441B"]),
    brewer!("BuPu", Seq, ["#F7FCFD", "#E0ECF4", "#BFD3E6", "#9EBCDA", "#8C96C6", "#8C6BB1", "#88419D", "#810F7C", "#4D004B"]),
    brewer!("GnBu", Seq, ["#F7FCF0", "#E0F3DB", "#CCEBC5", "#A8DDB5", "#7BCCC4", "#4EB3D3", "#2B8CBE", "#0868AC", "#084081"]),
    brewer!("Greens", Seq, ["#F7FCF5", "#E5F5E0", "#C7E9C0", "#A1D99B", "#74C476", "#41AB5D", "#238B45", "#006D2C", "#00441B"]),
    brewer!("Greys", Seq, ["#FFFFFF", "#F0F0F0", "#D9D9D9", "#BDBDBD", "#969696", "#737373", "#525252", "#252525", "#000000"]),
    brewer!("Oranges", Seq, ["#FFF5EB", "#FEE6CE", "#FDD0A2", "#FDAE6B", "#FD8D3C", "#F16913", "#D94801", "#A63603", "#7F2704"]),
    brewer!("OrRd", Seq, ["#FFF7EC", "#FEE8C8", "#FDD49E", "#FDBB84", "#FC8D59", "#EF6548", "#D7301F", "#B30000", "#7F0000"]),
    brewer!("PuBu", Seq, ["#FFF7FB", "#ECE7F2", "#D0D1E6", "#A6BDDB", "#74A9CF", "#3690C0", "#0570B0", "#045A8D", "#023858"]),
    brewer!("PuBuGn", Seq, ["#FFF7FB", "#ECE2F0", "#D0D1E6", "#A6BDDB", "#67A9CF", "#3690C0", "#02818A", "#016C59", "#014636"]),
    brewer!("PuRd", Seq, ["#F7F4F9", "#E7E1EF", "#D4B9DA", "#C994C7", "#DF65B0", "#E7298A", "#CE1256", "#980043", "#67001F"]),
    brewer!("Purples", Seq, ["#FCFBFD", "#EFEDF5", "#DADAEB", "#BCBDDC", "#9E9AC8", "#807DBA", "#6A51A3", "#54278F", "#3F007D"]),
    brewer!("RdPu", Seq, ["#FFF7F3", "#FDE0DD", "#FCC5C0", "#FA9FB5", "#F768A1", "#DD3497", "#AE017E", "#7A0177", "#49006A"]),
    brewer!("Reds", Seq, ["#FFF5F0", "#FEE0D2", "#FCBBA1", "#FC9272", "#FB6A4A", "#EF3B2C", "#CB181D", "#A50F15", "#67000D"]),
    brewer!("YlGn", Seq, ["#FFFFE5", "#F7FCB9", "#D9F0A3", "#ADDD8E", "#78C679", "#41AB5D", "#238443", "#006837", "#004529"]),
    brewer!("YlGnBu", Seq, ["#FFFFD9", "#EDF8B1", "#C7E9B4", "#7FCDBB", "#41B6C4", "#1D91C0", "#225EA8", "#253494", "#081D58"]),
    brewer!("YlOrBr", Seq, ["#FFFFE5", "#FFF7BC", "#FEE391", "#FEC44F", "#FE9929", "#EC7014", "#CC4C02", "#993404", "#662506"]),
    brewer!("YlOrRd", Seq, ["#FFFFCC", "#FFEDA0", "#FED976", "#FEB24C", "#FD8D3C", "#FC4E2A", "#E31A1C", "#BD0026", "#800026"]),
    brewer!("BrBG", Div, ["#543005", "#8C510A", "#BF812D", "#DFC27D", "#F6E8C3", "#F5F5F5", "#C7EAE5", "#80CDC1", "#35978F", "#01665E", "#003C30"]),
    brewer!("PiYG", Div, ["#8E0152", "#C51B7D", "#DE77AE", "#F1B6DA", "#FDE0EF", "#F7F7F7", "#E6F5D0", "#B8E186", "#7FBC41", "#4D9221", "#276419"]),
    brewer!("PRGn", Div, ["#40004B", "#762A83", "#9970AB", "#C2A5CF", "#E7D4E8", "#F7F7F7", "#D9F0D3", "#A6DBA0", "#5AAE61", "#1B7837", "#00441B"]),
    brewer!("PuOr", Div, ["#7F3B08", "#B35806", "#E08214", "#FDB863", "#FEE0B6", "#F7F7F7", "#D8DAEB", "#B2ABD2", "#8073AC", "#542788", "#2D004B"]),
    brewer!("RdBu", Div, ["#67001F", "#B2182B", "#D6604D", "#F4A582", "#FDDBC7", "#F7F7F7", "#D1E5F0", "#92C5DE", "#4393C3", "#2166AC", "#053061"]),
    brewer!("RdGy", Div, ["#67001F", "#B2182B", "#D6604D", "#F4A582", "#FDDBC7", "#FFFFFF", "#E0E0E0", "#BABABA", "#878787", "#4D4D4D", "#1A1A1A"]),
    brewer!("RdYlBu", Div, ["#A50026", "#D73027", "#F46D43", "#FDAE61", "#FEE090", "#FFFFBF", "#E0F3F8", "#ABD9E9", "#74ADD1", "#4575B4", "#313695"]),
    brewer!("RdYlGn", Div, ["#A50026", "#D73027", "#F46D43", "#FDAE61", "#FEE08B", "#FFFFBF", "#D9EF8B", "#A6D96A", "#66BD63", "#1A9850", "#006837"]),
    brewer!("Spectral", Div, ["#9E0142", "#D53E4F", "#F46D43", "#FDAE61", "#FEE08B", "#FFFFBF", "#E6F598", "#ABDDA4", "#66C2A5", "#3288BD", "#5E4FA2"]),
    brewer!("Accent", Qual, ["#7FC97F", "#BEAED4", "#FDC086", "#FFFF99", "#386CB0", "#F0027F", "#BF5B17", "#666666"]),
    brewer!("Dark2", Qual, ["#1B9E77", "#D95F02", "#7570B3", "#E7298A", "#66A61E", "#E6AB02", "#A6761D", "#666666"]),
    brewer!("Paired", Qual, ["#A6CEE3", "#1F78B4", "#B2DF8A", "#33A02C", "#FB9A99", "#E31A1C", "#FDBF6F", "#FF7F00", "#CAB2D6", "#6A3D9A", "#FFFF99", "#B15928"]),
    brewer!("Pastel1", Qual, ["#FBB4AE", "#B3CDE3", "#CCEBC5", "#DECBE4", "#FED9A6", "#FFFFCC", "#E5D8BD", "#FDDAEC", "#F2F2F2"]),
    brewer!("Pastel2", Qual, ["#B3E2CD", "#FDCDAC", "#CBD5E8", "#F4CAE4", "#E6F5C9", "#FFF2AE", "#F1E2CC", "#CCCCCC"]),
    brewer!("Set1", Qual, ["#E41A1C", "#377EB8", "#4DAF4A", "#984EA3", "#FF7F00", "#FFFF33", "#A65628", "#F781BF", "#999999"]),
    brewer!("Set2", Qual, ["#66C2A5", "#FC8D62", "#8DA0CB", "#E78AC3", "#A6D854", "#FFD92F", "#E5C494", "#B3B3B3"]),
    brewer!("Set3", Qual, ["#8DD3C7", "#FFFFB3", "#BEBADA", "#FB8072", "#80B1D3", "#FDB462", "#B3DE69", "#FCCDE5", "#D9D9D9", "#BC80BD", "#CCEBC5", "#FFED6F"]),
];

impl BrewerPalette {
    /// Looks a scheme up by name, case-insensitively.
    pub fn by_name(name: &str) -> Result<&'static BrewerPalette> {
        BREWER
            .iter()
            .find(|palette| palette.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| ScaleError::UnknownPalette(name.to_string()))
    }

    /// The `index`-th (1-based) scheme of a family, in alphabetical order.
    pub fn by_index(kind: BrewerType, index: usize) -> Result<&'static BrewerPalette> {
        let mut family = BREWER.iter().filter(|palette| palette.kind == kind);
        index
            .checked_sub(1)
            .and_then(|i| family.nth(i))
            .ok_or_else(|| ScaleError::UnknownPalette(format!("{kind:?} #{index}")))
    }

    /// `n` colours from the scheme.
    ///
    /// Qualitative schemes hand out their colours in order and stop at the
    /// scheme size. Sequential and diverging schemes are subsampled evenly
    /// from their full ramp; fewer than three colours come from the
    /// three-class subsample so the lightest end is kept.
    pub fn colors(&self, n: usize, direction: i32) -> Vec<String> {
        let available = self.colors.len();
        if n > available {
            warn!(
                "brewer palette {} has {} colours, {} requested",
                self.name, available, n
            );
        }

        let mut colors: Vec<String> = match self.kind {
            BrewerType::Qual => self
                .colors
                .iter()
                .take(n)
                .map(|color| color.to_string())
                .collect(),
            BrewerType::Seq | BrewerType::Div => {
                let classes = n.clamp(3, available);
                (0..classes)
                    .map(|i| {
                        let index = (i as f64 * (available - 1) as f64 / (classes - 1) as f64)
                            .round() as usize;
                        self.colors[index].to_string()
                    })
                    .take(n)
                    .collect()
            }
        };
        if direction < 0 {
            colors.reverse();
        }
        colors
    }
}

/// The viridis colour map family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViridisOption {
    Magma,
    Inferno,
    Plasma,
    Viridis,
    Cividis,
    Rocket,
    Mako,
    Turbo,
}

impl FromStr for ViridisOption {
    type Err = ScaleError;

    fn from_str(s: &str) -> Result<Self> {
        let option = match s.to_ascii_lowercase().as_str() {
            "a" | "magma" => ViridisOption::Magma,
            "b" | "inferno" => ViridisOption::Inferno,
            "c" | "plasma" => ViridisOption::Plasma,
            "d" | "viridis" => ViridisOption::Viridis,
            "e" | "cividis" => ViridisOption::Cividis,
            "f" | "rocket" => ViridisOption::Rocket,
            "g" | "mako" => ViridisOption::Mako,
            "h" | "turbo" => ViridisOption::Turbo,
            _ => return Err(ScaleError::UnknownPalette(s.to_string())),
        };
        Ok(option)
    }
}

impl ViridisOption {
    fn stops(self) -> &'static [&'static str] {
        match self {
            ViridisOption::Magma => &[
                "#000004", "#140E36", "#3B0F70", "#641A80", "#8C2981", "#B73779", "#DE4968",
                "#F7705C", "#FE9F6D", "#FECF92", "#FCFDBF",
            ],
            ViridisOption::Inferno => &[
                "#000004", "#160B39", "#420A68", "#6A176E", "#932667", "#BC3754", "#DD513A",
                "#F37819", "#FCA50A", "#F6D746", "#FCFFA4",
            ],
            ViridisOption::Plasma => &[
                "#0D0887", "#41049D", "#6A00A8", "#8F0DA4", "#B12A90", "#CC4778", "#E16462",
                "#F2844B", "#FCA636", "#FCCE25", "#F0F921",
            ],
            ViridisOption::Viridis => &[
                "#440154", "#482475", "#414487", "#355F8D", "#2A788E", "#21918C", "#22A884",
                "#44BF70", "#7AD151", "#BDDF26", "#FDE725",
            ],
            ViridisOption::Cividis => &[
                "#00204D", "#00336F", "#39486B", "#575C6D", "#707173", "#8A8779", "#A69D75",
                "#C4B56C", "#E4CF5B", "#FFEA46",
            ],
            ViridisOption::Rocket => &[
                "#03051A", "#221331", "#451C47", "#691F55", "#921C5B", "#B91657", "#D93047",
                "#EA5A3A", "#F38A5F", "#F5B58E", "#FAEBDD",
            ],
            ViridisOption::Mako => &[
                "#0B0405", "#231526", "#35264C", "#403A75", "#3D5296", "#366DA0", "#3487A6",
                "#35A1AB", "#49BDAD", "#8CD5B0", "#DEF5E5",
            ],
            ViridisOption::Turbo => &[
                "#30123B", "#4454C4", "#4490FE", "#1FC8DE", "#29EFA2", "#7DFF56", "#C1F334",
                "#F1CA3A", "#FE922A", "#EA4F0D", "#BE2102", "#7A0403",
            ],
        }
    }
}

/// Parameters of a viridis-family palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViridisPalette {
    pub option: ViridisOption,
    pub begin: f64,
    pub end: f64,
    pub direction: i32,
    pub alpha: f64,
}

impl Default for ViridisPalette {
    fn default() -> Self {
        Self {
            option: ViridisOption::Viridis,
            begin: 0.0,
            end: 1.0,
            direction: 1,
            alpha: 1.0,
        }
    }
}

impl ViridisPalette {
    /// Rejects `begin`/`end` outside `[0, 1]`, `begin > end` and `alpha`
    /// outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        for (param, value) in [("begin", self.begin), ("end", self.end), ("alpha", self.alpha)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ScaleError::invalid(
                    "viridis",
                    param,
                    format!("{value} is outside [0, 1]"),
                ));
            }
        }
        if self.begin > self.end {
            return Err(ScaleError::invalid(
                "viridis",
                "begin",
                format!("begin {} is greater than end {}", self.begin, self.end),
            ));
        }
        Ok(())
    }

    pub fn colors(&self, n: usize) -> Vec<String> {
        let (begin, end) = if self.direction < 0 {
            (self.end, self.begin)
        } else {
            (self.begin, self.end)
        };
        let stops = self.option.stops();
        spaced(n, begin, end)
            .into_iter()
            .filter_map(|t| sample_ramp(stops, t))
            .map(|color| with_alpha(&color, self.alpha))
            .collect()
    }
}

/// Grey ramp evenly spaced in gamma-2.2 space.
pub fn grey_colors(n: usize, start: f64, end: f64) -> Vec<String> {
    const GAMMA: f64 = 2.2;
    spaced(n, start.powf(GAMMA), end.powf(GAMMA))
        .into_iter()
        .map(|level| {
            let byte = (255.0 * level.powf(1.0 / GAMMA) + 0.5).floor().clamp(0.0, 255.0) as u8;
            format!("#{byte:02X}{byte:02X}{byte:02X}")
        })
        .collect()
}

const SOLID_SHAPES: &[&str] = &[
    "circle",
    "triangle",
    "square",
    "plus",
    "square cross",
    "asterisk",
];

const OPEN_SHAPES: &[&str] = &[
    "circle open",
    "triangle open",
    "square open",
    "plus",
    "square cross",
    "asterisk",
];

/// Point shape names for `n` levels. Levels past the sixth get no shape.
pub fn shape_names(n: usize, solid: bool) -> Vec<Option<&'static str>> {
    let shapes = if solid { SOLID_SHAPES } else { OPEN_SHAPES };
    if n > shapes.len() {
        warn!(
            "shape palette can deal with a maximum of {} discrete values, {} requested",
            shapes.len(),
            n
        );
    }
    (0..n).map(|i| shapes.get(i).copied()).collect()
}

const LINETYPES: &[&str] = &[
    "solid", "22", "42", "44", "13", "1343", "73", "2262", "12223242", "F282", "F4448444",
    "224282F2", "F1",
];

/// Dash patterns for `n` levels, as hex on/off run lengths.
pub fn linetype_names(n: usize) -> Vec<Option<&'static str>> {
    if n > LINETYPES.len() {
        warn!(
            "linetype palette can deal with a maximum of {} discrete values, {} requested",
            LINETYPES.len(),
            n
        );
    }
    (0..n).map(|i| LINETYPES.get(i).copied()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hue_palette_defaults() {
        let palette = HuePalette::default();
        assert_eq!(palette.colors(1), ["#F8766D"]);
        assert_eq!(palette.colors(2), ["#F8766D", "#00BFC4"]);
        assert_eq!(
            palette.colors(4),
            ["#F8766D", "#7CAE00", "#00BFC4", "#C77CFF"]
        );
        assert!(palette.colors(0).is_empty());
    }

    #[test]
    fn test_hue_palette_direction() {
        let palette = HuePalette {
            direction: -1,
            ..HuePalette::default()
        };
        assert_eq!(palette.colors(3), ["#619CFF", "#00BA38", "#F8766D"]);
    }

    #[test]
    fn test_brewer_lookup() {
        assert_eq!(BrewerPalette::by_name("set1").unwrap().name, "Set1");
        assert_eq!(BrewerPalette::by_index(BrewerType::Seq, 1).unwrap().name, "Blues");
        assert_eq!(BrewerPalette::by_index(BrewerType::Div, 9).unwrap().name, "Spectral");
        assert_eq!(BrewerPalette::by_index(BrewerType::Qual, 2).unwrap().name, "Dark2");
        assert!(BrewerPalette::by_index(BrewerType::Qual, 0).is_err());
        assert!(BrewerPalette::by_name("Rainbow").is_err());
    }

    #[test]
    fn test_brewer_qualitative_takes_leading_colors() {
        let set1 = BrewerPalette::by_name("Set1").unwrap();
        assert_eq!(set1.colors(3, 1), ["#E41A1C", "#377EB8", "#4DAF4A"]);
        assert_eq!(set1.colors(20, 1).len(), 9);
    }

    #[test]
    fn test_brewer_sequential_subsamples_full_ramp() {
        let blues = BrewerPalette::by_name("Blues").unwrap();
        assert_eq!(blues.colors(3, 1), ["#F7FBFF", "#6BAED6", "#08306B"]);
        assert_eq!(blues.colors(9, 1), blues.colors.to_vec());
        assert_eq!(blues.colors(1, 1), ["#F7FBFF"]);
        assert_eq!(blues.colors(3, -1), ["#08306B", "#6BAED6", "#F7FBFF"]);
    }

    #[test]
    fn test_viridis_endpoints() {
        let palette = ViridisPalette::default();
        let colors = palette.colors(2);
        assert_eq!(colors, ["#440154", "#FDE725"]);

        let reversed = ViridisPalette {
            direction: -1,
            ..palette
        };
        assert_eq!(reversed.colors(2), ["#FDE725", "#440154"]);
    }

    #[test]
    fn test_viridis_alpha_suffix() {
        let palette = ViridisPalette {
            alpha: 0.5,
            ..ViridisPalette::default()
        };
        assert_eq!(palette.colors(1), ["#44015480"]);
    }

    #[test]
    fn test_viridis_validation() {
        let bad_begin = ViridisPalette {
            begin: -0.1,
            ..ViridisPalette::default()
        };
        assert!(bad_begin.validate().is_err());
        let crossed = ViridisPalette {
            begin: 0.8,
            end: 0.2,
            ..ViridisPalette::default()
        };
        assert!(crossed.validate().is_err());
        assert!(ViridisPalette::default().validate().is_ok());
        assert_eq!("E".parse::<ViridisOption>().unwrap(), ViridisOption::Cividis);
    }

    #[test]
    fn test_grey_colors() {
        assert_eq!(grey_colors(3, 0.2, 0.8), ["#333333", "#989898", "#CCCCCC"]);
    }

    #[test]
    fn test_sample_ramp() {
        let stops = ["#000000", "#FFFFFF"];
        assert_eq!(sample_ramp(&stops, 0.5).as_deref(), Some("#808080"));
        assert_eq!(sample_ramp(&stops, 1.0).as_deref(), Some("#FFFFFF"));
        assert_eq!(sample_ramp(&stops, 7.0).as_deref(), Some("#FFFFFF"));
        assert_eq!(sample_ramp::<&str>(&[], 0.5), None);
    }

    #[test]
    fn test_shapes_and_linetypes_run_out() {
        let shapes = shape_names(7, true);
        assert_eq!(shapes[0], Some("circle"));
        assert_eq!(shapes[6], None);
        let linetypes = linetype_names(2);
        assert_eq!(linetypes, [Some("solid"), Some("22")]);
    }
}
