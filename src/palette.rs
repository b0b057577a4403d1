//! Palettes for mapping normalized values and categories to display colors.
//!
//! Two kinds exist: a [`Gradient`] interpolates linearly between evenly spaced color stops, and a
//! [`Listed`] palette is a discrete list of swatches (qualitative palettes like `tab20`). Both are
//! used through the [`Palette`] trait. Named palettes follow the matplotlib names, and a `_r`
//! suffix reverses any of them.

use std::sync::Arc;

use crate::color::Rgba;
use crate::error::{GgsegError, Result};
use crate::traits::Palette;


const VIRIDIS: [[f64; 3]; 11] = [
    [0.267, 0.004, 0.329],
    [0.282, 0.140, 0.457],
    [0.253, 0.265, 0.529],
    [0.206, 0.371, 0.553],
    [0.163, 0.471, 0.558],
    [0.127, 0.566, 0.550],
    [0.134, 0.658, 0.517],
    [0.266, 0.749, 0.440],
    [0.477, 0.821, 0.318],
    [0.741, 0.873, 0.150],
    [0.993, 0.906, 0.144],
];

const PLASMA: [[f64; 3]; 11] = [
    [0.050, 0.030, 0.528],
    [0.254, 0.014, 0.615],
    [0.417, 0.001, 0.658],
    [0.562, 0.052, 0.642],
    [0.692, 0.165, 0.565],
    [0.798, 0.280, 0.470],
    [0.881, 0.392, 0.383],
    [0.949, 0.517, 0.295],
    [0.988, 0.652, 0.211],
    [0.988, 0.809, 0.145],
    [0.940, 0.975, 0.131],
];

const COOLWARM: [[f64; 3]; 5] = [
    [0.230, 0.299, 0.754],
    [0.552, 0.690, 0.996],
    [0.865, 0.865, 0.865],
    [0.958, 0.604, 0.482],
    [0.706, 0.016, 0.150],
];

// ColorBrewer RdBu, red at the low end.
const RDBU: [u32; 11] = [
    0x67001f, 0xb2182b, 0xd6604d, 0xf4a582, 0xfddbc7, 0xf7f7f7, 0xd1e5f0, 0x92c5de, 0x4393c3, 0x2166ac, 0x053061,
];

const TAB10: [u32; 10] = [
    0x1f77b4, 0xff7f0e, 0x2ca02c, 0xd62728, 0x9467bd, 0x8c564b, 0xe377c2, 0x7f7f7f, 0xbcbd22, 0x17becf,
];

const TAB20: [u32; 20] = [
    0x1f77b4, 0xaec7e8, 0xff7f0e, 0xffbb78, 0x2ca02c, 0x98df8a, 0xd62728, 0xff9896, 0x9467bd, 0xc5b0d5,
    0x8c564b, 0xc49c94, 0xe377c2, 0xf7b6d2, 0x7f7f7f, 0xc7c7c7, 0xbcbd22, 0xdbdb8d, 0x17becf, 0x9edae5,
];

/// The names accepted by [`named`], without the `_r` variants.
pub const PALETTE_NAMES: [&str; 7] = ["viridis", "plasma", "gray", "coolwarm", "RdBu", "tab10", "tab20"];


fn from_hex24(v: u32) -> Rgba {
    Rgba::rgb((v >> 16 & 0xff) as u8, (v >> 8 & 0xff) as u8, (v & 0xff) as u8)
}

fn from_unit_rgb(v: &[f64; 3]) -> Rgba {
    Rgba::from_f64(v[0], v[1], v[2], 1.0)
}


/// A continuous palette: evenly spaced color stops with linear interpolation in between.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    pub name: String,
    pub stops: Vec<Rgba>,
}

impl Gradient {
    pub fn new<S: Into<String>>(name: S, stops: Vec<Rgba>) -> Gradient {
        Gradient { name: name.into(), stops }
    }

    /// The same gradient running in the opposite direction, named with a `_r` suffix.
    pub fn reversed(&self) -> Gradient {
        let mut stops = self.stops.clone();
        stops.reverse();
        Gradient::new(format!("{}_r", self.name), stops)
    }
}

impl Palette for Gradient {
    fn name(&self) -> &str {
        &self.name
    }

    fn sample(&self, fraction: f64) -> Rgba {
        let t = if fraction.is_nan() { 0.0 } else { fraction.max(0.0).min(1.0) };
        match self.stops.len() {
            0 => crate::color::NONE,
            1 => self.stops[0],
            len => {
                let n = len - 1;
                let pos = t * n as f64;
                let idx = (pos.floor() as usize).min(n - 1);
                self.stops[idx].lerp(&self.stops[idx + 1], pos - idx as f64)
            }
        }
    }
}


/// A discrete palette of swatches. The unit interval is split into as many equal bins as there
/// are swatches, and a fraction picks the swatch of its bin.
#[derive(Debug, Clone, PartialEq)]
pub struct Listed {
    pub name: String,
    pub swatches: Vec<Rgba>,
}

impl Listed {
    pub fn new<S: Into<String>>(name: S, swatches: Vec<Rgba>) -> Listed {
        Listed { name: name.into(), swatches }
    }

    pub fn reversed(&self) -> Listed {
        let mut swatches = self.swatches.clone();
        swatches.reverse();
        Listed::new(format!("{}_r", self.name), swatches)
    }
}

impl Palette for Listed {
    fn name(&self) -> &str {
        &self.name
    }

    fn sample(&self, fraction: f64) -> Rgba {
        if self.swatches.is_empty() {
            return crate::color::NONE;
        }
        let t = if fraction.is_nan() { 0.0 } else { fraction.max(0.0).min(1.0) };
        let n = self.swatches.len();
        let idx = ((t * n as f64) as usize).min(n - 1);
        self.swatches[idx]
    }
}


fn builtin_gradient(name: &str) -> Option<Gradient> {
    let stops: Vec<Rgba> = match name {
        "viridis" => VIRIDIS.iter().map(from_unit_rgb).collect(),
        "plasma" => PLASMA.iter().map(from_unit_rgb).collect(),
        "coolwarm" => COOLWARM.iter().map(from_unit_rgb).collect(),
        "RdBu" => RDBU.iter().map(|v| from_hex24(*v)).collect(),
        "gray" | "grey" => vec![crate::color::BLACK, crate::color::WHITE],
        _ => return None,
    };
    Some(Gradient::new(name, stops))
}

fn builtin_listed(name: &str) -> Option<Listed> {
    let swatches: Vec<Rgba> = match name {
        "tab10" => TAB10.iter().map(|v| from_hex24(*v)).collect(),
        "tab20" => TAB20.iter().map(|v| from_hex24(*v)).collect(),
        _ => return None,
    };
    Some(Listed::new(name, swatches))
}


/// Look up a palette by name.
///
/// # Examples
///
/// ```
/// let viridis = ggseg::palette::named("viridis").unwrap();
/// let reversed = ggseg::palette::named("viridis_r").unwrap();
/// assert_eq!(viridis.sample(0.0), reversed.sample(1.0));
/// ```
pub fn named(name: &str) -> Result<Arc<dyn Palette>> {
    let (base, reverse) = match name.strip_suffix("_r") {
        Some(base) => (base, true),
        None => (name, false),
    };

    if let Some(g) = builtin_gradient(base) {
        let g = if reverse { g.reversed() } else { g };
        return Ok(Arc::new(g));
    }
    if let Some(l) = builtin_listed(base) {
        let l = if reverse { l.reversed() } else { l };
        return Ok(Arc::new(l));
    }
    Err(GgsegError::UnknownPalette(name.to_string()))
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn all_palette_names_resolve() {
        for name in PALETTE_NAMES.iter() {
            let p = named(name).unwrap();
            assert_eq!(*name, p.name());
            let r = named(&format!("{}_r", name)).unwrap();
            assert_eq!(format!("{}_r", name), r.name());
        }
        assert!(named("jet_but_better").is_err());
    }

    #[test]
    fn gradient_sampling_hits_stops_and_clamps() {
        let g = builtin_gradient("gray").unwrap();
        assert_eq!(crate::color::BLACK, g.sample(0.0));
        assert_eq!(crate::color::WHITE, g.sample(1.0));
        assert_eq!(crate::color::BLACK, g.sample(-3.0));
        assert_eq!(crate::color::WHITE, g.sample(7.5));
        assert_eq!(Rgba::rgb(128, 128, 128), g.sample(0.5));
    }

    #[test]
    fn listed_sampling_picks_bins() {
        let tab20 = builtin_listed("tab20").unwrap();
        assert_eq!(from_hex24(0x1f77b4), tab20.sample(0.0));
        assert_eq!(from_hex24(0x9edae5), tab20.sample(1.0));
        assert_eq!(from_hex24(0xaec7e8), tab20.sample(1.0 / 19.0));
        assert_eq!(from_hex24(0xc7c7c7), tab20.sample(15.0 / 19.0));
    }

    #[test]
    fn rdbu_midpoint_is_neutral() {
        let rdbu = named("RdBu").unwrap();
        assert_eq!(from_hex24(0xf7f7f7), rdbu.sample(0.5));
        assert_eq!(from_hex24(0x67001f), rdbu.sample(0.0));
        assert_eq!(from_hex24(0x053061), rdbu.sample(1.0));
    }
}
