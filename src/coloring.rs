//! Resolution of a data column into a color mapping shared by all panels of a figure.
//!
//! A column whose present values are all numbers is colored through a [`Normalization`] into a
//! palette. Any other column is treated as categorical, and each distinct category gets its own
//! color. The resolution is computed once from the full column, so the same value always gets
//! the same color, no matter which panel it ends up in.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use log::{debug, warn};
use ndarray::Array1;
use ndarray_stats::QuantileExt;

use crate::atlas::Value;
use crate::color::Rgba;
use crate::traits::Palette;


/// Maps data values into the unit interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Normalization {
    /// Plain min-max scaling. If `vmin == vmax`, every value maps to `0.5`.
    Linear { vmin: f64, vmax: f64 },
    /// Symmetric scaling centered at zero: `-limit` maps to `0`, `0` to `0.5`, `limit` to `1`.
    Diverging { limit: f64 },
}

impl Normalization {
    /// Choose the normalization for the given bounds. Bounds straddling zero give a diverging
    /// normalization with limit `max(|lower|, |upper|)`, everything else a linear one.
    pub fn from_bounds(lower: f64, upper: f64) -> Normalization {
        if lower < 0.0 && 0.0 < upper {
            Normalization::Diverging { limit: lower.abs().max(upper.abs()) }
        } else {
            Normalization::Linear { vmin: lower, vmax: upper }
        }
    }

    /// Normalize a value into `[0, 1]`. Values outside the range are clamped, non-finite values
    /// give `None`.
    pub fn normalize(&self, v: f64) -> Option<f64> {
        if !v.is_finite() {
            return None;
        }
        let t = match *self {
            Normalization::Linear { vmin, vmax } => {
                if self.is_degenerate() {
                    0.5
                } else {
                    (v - vmin) / (vmax - vmin)
                }
            }
            Normalization::Diverging { limit } => 0.5 + 0.5 * v / limit,
        };
        if t.is_nan() {
            return None;
        }
        Some(t.max(0.0).min(1.0))
    }

    /// Whether the range has zero width. Only exactly equal bounds count, however tiny the range.
    pub fn is_degenerate(&self) -> bool {
        match *self {
            Normalization::Linear { vmin, vmax } => vmin == vmax,
            Normalization::Diverging { .. } => false,
        }
    }

    /// The data range covered, as `(low, high)`.
    pub fn range(&self) -> (f64, f64) {
        match *self {
            Normalization::Linear { vmin, vmax } => (vmin, vmax),
            Normalization::Diverging { limit } => (-limit, limit),
        }
    }
}

impl fmt::Display for Normalization {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Normalization::Linear { vmin, vmax } => write!(f, "linear [{}, {}]", vmin, vmax),
            Normalization::Diverging { limit } => write!(f, "diverging [-{}, 0, {}]", limit, limit),
        }
    }
}


/// The color mapping of a figure.
#[derive(Debug, Clone)]
pub enum ColorResolution {
    Numeric {
        norm: Normalization,
        palette: Arc<dyn Palette>,
    },
    /// Category colors, iterated in sorted category order.
    Categorical {
        colors: BTreeMap<String, Rgba>,
        palette: Arc<dyn Palette>,
    },
}

impl ColorResolution {
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColorResolution::Numeric { .. })
    }

    pub fn palette(&self) -> &Arc<dyn Palette> {
        match self {
            ColorResolution::Numeric { palette, .. } => palette,
            ColorResolution::Categorical { palette, .. } => palette,
        }
    }

    /// The fill color for a value. `None` means the shape is left unfilled: the value is missing,
    /// or it is a category that was not part of the resolved column.
    pub fn color_for(&self, value: &Value) -> Option<Rgba> {
        match self {
            ColorResolution::Numeric { norm, palette } => {
                let t = norm.normalize(value.as_number()?)?;
                Some(palette.sample(t))
            }
            ColorResolution::Categorical { colors, .. } => {
                let cat = value.category()?;
                colors.get(&cat).copied()
            }
        }
    }
}


fn finite_bound(bound: Option<f64>, which: &str) -> Option<f64> {
    match bound {
        Some(b) if !b.is_finite() => {
            warn!("Ignoring non-finite {} color bound {}.", which, b);
            None
        }
        other => other,
    }
}


/// Resolve a column into a color mapping.
///
/// Missing values (including non-finite numbers) are dropped first. Non-finite explicit bounds
/// are ignored. If all remaining values are numbers (including the case of
/// no remaining values at all) the result is numeric: the bounds are `explicit_min` and
/// `explicit_max` where given, the observed extremes otherwise, see [`Normalization::from_bounds`].
/// Otherwise the distinct categories are sorted and category `i` of `n` gets the palette color at
/// `i / (n - 1)`.
///
/// Never fails. A column without any usable value yields a degenerate linear normalization.
///
/// # Examples
///
/// ```
/// use ggseg::{resolve, Value};
///
/// let palette = ggseg::palette::named("RdBu").unwrap();
/// let column = vec![Value::Number(-2.0), Value::Number(1.0), Value::Missing];
/// match resolve(&column, palette, None, None) {
///     ggseg::ColorResolution::Numeric { norm, .. } => assert_eq!(Some(0.5), norm.normalize(0.0)),
///     _ => unreachable!(),
/// }
/// ```
pub fn resolve(values: &[Value], palette: Arc<dyn Palette>, explicit_min: Option<f64>, explicit_max: Option<f64>) -> ColorResolution {
    let present: Vec<&Value> = values.iter().filter(|v| !v.is_missing()).collect();
    let numbers: Vec<f64> = present.iter().filter_map(|v| v.as_number()).collect();

    if numbers.len() == present.len() {
        let (obs_min, obs_max) = if numbers.is_empty() {
            (None, None)
        } else {
            let arr = Array1::from(numbers);
            (Some(*arr.min_skipnan()), Some(*arr.max_skipnan()))
        };

        let lower = finite_bound(explicit_min, "lower").or(obs_min);
        let upper = finite_bound(explicit_max, "upper").or(obs_max);
        let (lower, upper) = match (lower, upper) {
            (Some(l), Some(u)) if l > u => {
                warn!("Lower color bound {} exceeds upper bound {}, swapping them.", l, u);
                (u, l)
            }
            (Some(l), Some(u)) => (l, u),
            (Some(x), None) | (None, Some(x)) => (x, x),
            (None, None) => (0.0, 0.0),
        };

        let norm = Normalization::from_bounds(lower, upper);
        debug!("Resolved {} present of {} values as numeric, normalization {}.", present.len(), values.len(), norm);
        ColorResolution::Numeric { norm, palette }
    } else {
        let categories: BTreeSet<String> = present.iter().filter_map(|v| v.category()).collect();
        let denom = categories.len().saturating_sub(1).max(1) as f64;
        let colors: BTreeMap<String, Rgba> = categories
            .into_iter()
            .enumerate()
            .map(|(i, cat)| {
                let color = palette.sample(i as f64 / denom);
                (cat, color)
            })
            .collect();
        debug!("Resolved {} present of {} values as {} categories.", present.len(), values.len(), colors.len());
        ColorResolution::Categorical { colors, palette }
    }
}
