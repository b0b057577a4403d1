//! Drawing of region subsets into panels, and attachment of the shared colorbar or legend.

use log::{debug, trace, warn};

use crate::atlas::RegionRecord;
use crate::coloring::ColorResolution;
use crate::color::{Rgba, BLACK, MASK_GRAY};
use crate::figure::{EdgeStyle, FilledShape, Figure, Guide, Layer, LegendEntry, Panel};

/// Number of palette samples stored in a colorbar.
pub const COLORBAR_STEPS: usize = 64;


/// Draw the records of one view into a panel.
///
/// Every record in `subset` is filled with the color its `column` value resolves to, or left
/// unfilled if the value is missing or unknown to the resolution. The `mask` records are drawn
/// afterwards, on top, in [`MASK_GRAY`]. Finally the axis decoration is removed.
pub fn render_panel(
    panel: &mut Panel,
    subset: &[&RegionRecord],
    mask: &[&RegionRecord],
    column: &str,
    coloring: &ColorResolution,
    edge: EdgeStyle,
    aspect: f64,
) {
    let mut unfilled = 0usize;
    for rec in subset {
        let value = rec.value(column);
        let fill = coloring.color_for(&value);
        if fill.is_none() {
            unfilled += 1;
            if !coloring.is_numeric() && !value.is_missing() {
                warn!("Value {:?} of region '{}' is not in the resolved categories, leaving it unfilled.", value, rec.region);
            }
        }
        trace!("Filling region '{}' ({} {}) with {:?}.", rec.region, rec.side, rec.hemi, fill);
        panel.fill(FilledShape { region: rec.region.clone(), geometry: rec.geometry.clone(), fill, edge, layer: Layer::Data });
    }

    for rec in mask {
        panel.fill(FilledShape { region: rec.region.clone(), geometry: rec.geometry.clone(), fill: Some(MASK_GRAY), edge, layer: Layer::Mask });
    }

    panel.aspect = aspect;
    panel.set_axis_off();
    debug!("Rendered panel {:?}: {} shapes ({} unfilled), {} mask shapes.", panel.handle, subset.len(), unfilled, mask.len());
}


/// Build the guide matching a color resolution: a colorbar for numeric data, a legend with one
/// swatch per category (in sorted order) for categorical data.
pub fn guide_for(coloring: &ColorResolution, title: &str) -> Guide {
    match coloring {
        ColorResolution::Numeric { norm, palette } => {
            let (low, high) = norm.range();
            let colors: Vec<Rgba> = (0..COLORBAR_STEPS)
                .map(|k| {
                    let v = low + (high - low) * k as f64 / (COLORBAR_STEPS - 1) as f64;
                    palette.sample(norm.normalize(v).unwrap_or(0.5))
                })
                .collect();
            Guide::Colorbar { title: title.to_string(), low, high, colors }
        }
        ColorResolution::Categorical { colors, .. } => {
            let entries = colors.iter().map(|(cat, color)| LegendEntry { label: cat.clone(), color: *color }).collect();
            Guide::Legend { title: title.to_string(), entries, swatch_edge: BLACK }
        }
    }
}

/// Attach the shared colorbar or legend to the figure. Does nothing if `show` is false.
pub fn attach_guide(figure: &mut Figure, coloring: &ColorResolution, title: &str, show: bool) {
    if !show {
        return;
    }
    let guide = guide_for(coloring, title);
    debug!("Attaching {} titled '{}'.", if coloring.is_numeric() { "colorbar" } else { "legend" }, title);
    figure.set_guide(guide);
}
