use std::fmt::Debug;

use crate::color::Rgba;

/// A color source that can be sampled at any fraction in `[0, 1]`.
///
/// Implemented by continuous gradients and by discrete swatch lists alike. Numeric data is
/// colored by sampling at the normalized value, categorical data by sampling at `i / (n - 1)`.
pub trait Palette: Debug + Send + Sync {
    fn name(&self) -> &str;

    /// Sample the palette. Fractions outside `[0, 1]` are clamped.
    fn sample(&self, fraction: f64) -> Rgba;
}
