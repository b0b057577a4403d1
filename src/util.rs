//! Utility functions used in other ggseg modules.

use std::path::Path;

/// Resolution used to convert figure sizes in inches and line widths in points to pixels.
pub const DPI: f64 = 100.0;

/// Check whether the file extension calls for gzip compression, i.e., it ends with ".gz" or ".svgz".
pub fn is_gz_file<P>(path: P) -> bool
where
    P: AsRef<Path>,
{
    path.as_ref()
        .file_name()
        .map(|a| {
            let name = a.to_string_lossy();
            name.ends_with(".gz") || name.ends_with(".svgz")
        })
        .unwrap_or(false)
}

/// Convert a length in inches to whole pixels. Never less than one pixel.
pub fn inches_to_pixels(inches: f64) -> u32 {
    (inches * DPI).round().max(1.0) as u32
}

/// Convert a line width in points to whole pixels. Zero stays zero, everything else is at least one pixel.
pub fn points_to_pixels(points: f64) -> u32 {
    if points <= 0.0 {
        return 0;
    }
    (points * DPI / 72.0).round().max(1.0) as u32
}

/// Short tick label for a colorbar value.
pub fn format_tick(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e9 {
        format!("{}", v as i64)
    } else {
        let s = format!("{:.3}", v);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
