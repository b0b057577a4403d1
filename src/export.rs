//! Export of figures to SVG images.
//!
//! The panel grid takes the figure's full size, minus a strip on the right that holds the
//! colorbar or legend if there is one. Region geometries are scaled to fit their panel, keeping
//! the panel's aspect ratio, with the y axis pointing up.

use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;
use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::atlas::BBox;
use crate::color::Rgba;
use crate::error::{GgsegError, Result};
use crate::figure::{Figure, Guide, Panel};
use crate::util::{format_tick, inches_to_pixels, is_gz_file, points_to_pixels};

/// Width in pixels of the strip reserved for the guide.
pub const GUIDE_WIDTH: u32 = 160;

/// Distance in pixels kept between geometries and the panel border.
const PANEL_MARGIN: f64 = 8.0;

const FONT_FAMILY: &str = "sans-serif";

type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;


fn render_err<E: Display>(e: E) -> GgsegError {
    GgsegError::Render(e.to_string())
}

fn to_plotters(c: &Rgba) -> RGBAColor {
    RGBAColor(c.r, c.g, c.b, c.opacity())
}


/// Maps data coordinates of one panel to pixel coordinates inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PanelTransform {
    scale: f64,
    aspect: f64,
    x0: f64,
    y1: f64,
    offset: (f64, f64),
}

impl PanelTransform {
    fn fit(bb: BBox, aspect: f64, size: (u32, u32)) -> PanelTransform {
        let aspect = if aspect > 0.0 && aspect.is_finite() { aspect } else { 1.0 };
        let avail_w = (size.0 as f64 - 2.0 * PANEL_MARGIN).max(1.0);
        let avail_h = (size.1 as f64 - 2.0 * PANEL_MARGIN).max(1.0);
        let data_w = bb[2] - bb[0];
        let data_h = (bb[3] - bb[1]) * aspect;

        let scale = match (data_w > 0.0, data_h > 0.0) {
            (true, true) => (avail_w / data_w).min(avail_h / data_h),
            (true, false) => avail_w / data_w,
            (false, true) => avail_h / data_h,
            (false, false) => 1.0,
        };
        let offset = (
            PANEL_MARGIN + (avail_w - data_w * scale) / 2.0,
            PANEL_MARGIN + (avail_h - data_h * scale) / 2.0,
        );
        PanelTransform { scale, aspect, x0: bb[0], y1: bb[3], offset }
    }

    fn apply(&self, p: &[f64; 2]) -> (i32, i32) {
        let x = self.offset.0 + (p[0] - self.x0) * self.scale;
        let y = self.offset.1 + (self.y1 - p[1]) * self.aspect * self.scale;
        (x.round() as i32, y.round() as i32)
    }
}


fn draw_panel(area: &Area, panel: &Panel) -> Result<()> {
    let size = area.dim_in_pixel();
    if panel.axis_visible {
        let frame = [(0, 0), (size.0 as i32 - 1, size.1 as i32 - 1)];
        area.draw(&Rectangle::new(frame, BLACK.stroke_width(1))).map_err(render_err)?;
    }

    let bb = match panel.bbox() {
        Some(bb) => bb,
        None => return Ok(()),
    };
    let tf = PanelTransform::fit(bb, panel.aspect, size);

    for shape in panel.shapes.iter() {
        let edge_px = points_to_pixels(shape.edge.width);
        for poly in shape.geometry.polygons.iter() {
            if poly.exterior.is_empty() {
                continue;
            }
            let pts: Vec<(i32, i32)> = poly.exterior.iter().map(|p| tf.apply(p)).collect();
            if let Some(fill) = shape.fill {
                area.draw(&Polygon::new(pts, to_plotters(&fill).filled())).map_err(render_err)?;
            }
            if edge_px == 0 || shape.edge.color.is_transparent() {
                continue;
            }
            let stroke = to_plotters(&shape.edge.color).stroke_width(edge_px);
            for ring in poly.rings() {
                let mut outline: Vec<(i32, i32)> = ring.iter().map(|p| tf.apply(p)).collect();
                if let Some(first) = outline.first().copied() {
                    outline.push(first);
                }
                area.draw(&PathElement::new(outline, stroke.clone())).map_err(render_err)?;
            }
        }
    }
    Ok(())
}


fn draw_guide(area: &Area, guide: &Guide) -> Result<()> {
    let (_, height) = area.dim_in_pixel();
    let height = height as i32;
    let font = (FONT_FAMILY, 14).into_font();
    let small = (FONT_FAMILY, 12).into_font();

    match guide {
        Guide::Colorbar { title, low, high, colors } => {
            let top = height / 8 + 20;
            let bottom = height - height / 8;
            let (x0, x1) = (16, 40);
            area.draw(&Text::new(title.clone(), (x0, top - 24), font)).map_err(render_err)?;

            let n = colors.len().max(1) as f64;
            let span = (bottom - top) as f64;
            for (k, color) in colors.iter().enumerate() {
                // colors run from low to high, drawn bottom-up
                let y_lo = bottom as f64 - span * k as f64 / n;
                let y_hi = bottom as f64 - span * (k + 1) as f64 / n;
                let rect = [(x0, y_hi.floor() as i32), (x1, y_lo.ceil() as i32)];
                area.draw(&Rectangle::new(rect, to_plotters(color).filled())).map_err(render_err)?;
            }
            area.draw(&Rectangle::new([(x0, top), (x1, bottom)], BLACK.stroke_width(1))).map_err(render_err)?;

            let mid = (low + high) / 2.0;
            let ticks = [(*low, bottom), (mid, (top + bottom) / 2), (*high, top)];
            for (v, y) in ticks.iter() {
                area.draw(&PathElement::new(vec![(x1, *y), (x1 + 4, *y)], BLACK.stroke_width(1))).map_err(render_err)?;
                area.draw(&Text::new(format_tick(*v), (x1 + 8, *y - 6), small.clone())).map_err(render_err)?;
            }
        }
        Guide::Legend { title, entries, swatch_edge } => {
            let row_h = 20;
            let block = row_h * (entries.len() as i32 + 1);
            let mut y = ((height - block) / 2).max(4);
            area.draw(&Text::new(title.clone(), (8, y), font)).map_err(render_err)?;
            for entry in entries.iter() {
                y += row_h;
                let rect = [(8, y), (24, y + 12)];
                area.draw(&Rectangle::new(rect, to_plotters(&entry.color).filled())).map_err(render_err)?;
                area.draw(&Rectangle::new(rect, to_plotters(swatch_edge).stroke_width(1))).map_err(render_err)?;
                area.draw(&Text::new(entry.label.clone(), (30, y), small.clone())).map_err(render_err)?;
            }
        }
    }
    Ok(())
}


/// Render a figure to an SVG document.
pub fn render_svg(figure: &Figure) -> Result<String> {
    let width = inches_to_pixels(figure.size.0);
    let height = inches_to_pixels(figure.size.1);
    let guide_w = if figure.guide().is_some() { GUIDE_WIDTH.min(width / 2) } else { 0 };

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let (grid, guide_area) = root.split_horizontally((width - guide_w) as i32);
        if figure.rows > 0 && figure.cols > 0 {
            let cells = grid.split_evenly((figure.rows, figure.cols));
            for (panel, cell) in figure.panels().iter().zip(cells.iter()) {
                draw_panel(cell, panel)?;
            }
        }
        if let Some(guide) = figure.guide() {
            draw_guide(&guide_area, guide)?;
        }
        root.present().map_err(render_err)?;
    }
    debug!("Rendered {}x{} px SVG, {} bytes.", width, height, svg.len());
    Ok(svg)
}

/// Write a figure to an SVG file. If the file name ends with ".gz" or ".svgz", the output is
/// gzip compressed.
///
/// # Examples
///
/// ```no_run
/// use ggseg::{plot_surface, AtlasTable, PlotOptions};
///
/// let table = AtlasTable::default();
/// let (fig, _) = plot_surface(&table, "label", &PlotOptions::surface()).unwrap();
/// ggseg::save_svg(&fig, "dk_surface.svgz").unwrap();
/// ```
pub fn save_svg<P: AsRef<Path>>(figure: &Figure, path: P) -> Result<()> {
    let svg = render_svg(figure)?;
    let file = BufWriter::new(File::create(&path)?);
    if is_gz_file(&path) {
        let mut enc = GzEncoder::new(file, Compression::default());
        enc.write_all(svg.as_bytes())?;
        enc.finish()?.flush()?;
    } else {
        let mut file = file;
        file.write_all(svg.as_bytes())?;
        file.flush()?;
    }
    Ok(())
}
