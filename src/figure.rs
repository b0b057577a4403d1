//! Retained-mode figures: a grid of panels holding filled region shapes, plus one shared guide.
//!
//! A [`Figure`] is an explicit value owned by the caller. Nothing is drawn to a global context;
//! the plotting functions fill the panels and the [`crate::export`] module turns the result into
//! an image.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::atlas::{union_bbox, BBox, MultiPolygon};
use crate::color::Rgba;
use crate::view::ViewDescriptor;

/// Identifies a panel in its figure's grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PanelHandle {
    pub row: usize,
    pub col: usize,
}

/// Outline style of drawn shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeStyle {
    pub color: Rgba,
    pub width: f64,
}

impl Default for EdgeStyle {
    fn default() -> EdgeStyle {
        EdgeStyle { color: crate::color::BLACK, width: 1.5 }
    }
}

/// Whether a shape was drawn from the data column or as part of the mask overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Data,
    Mask,
}

/// One region geometry as drawn into a panel. A `fill` of `None` leaves the shape unfilled, only
/// its outline is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct FilledShape {
    pub region: String,
    pub geometry: MultiPolygon,
    pub fill: Option<Rgba>,
    pub edge: EdgeStyle,
    pub layer: Layer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub handle: PanelHandle,
    pub view: Option<ViewDescriptor>,
    /// Shapes in drawing order, later ones on top.
    pub shapes: Vec<FilledShape>,
    /// Ratio of y to x unit length.
    pub aspect: f64,
    pub axis_visible: bool,
}

impl Panel {
    fn new(handle: PanelHandle) -> Panel {
        Panel { handle, view: None, shapes: Vec::new(), aspect: 1.0, axis_visible: true }
    }

    pub fn fill(&mut self, shape: FilledShape) {
        self.shapes.push(shape);
    }

    /// Hide ticks, tick labels and frame.
    pub fn set_axis_off(&mut self) {
        self.axis_visible = false;
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// The fill visible on top for the given region, i.e. that of the last shape drawn for it.
    /// `None` if the region is not in this panel; `Some(None)` if its top shape is unfilled.
    pub fn visible_fill(&self, region: &str) -> Option<Option<Rgba>> {
        self.shapes.iter().rev().find(|s| s.region == region).map(|s| s.fill)
    }

    /// Data extent of all shapes in this panel.
    pub fn bbox(&self) -> Option<BBox> {
        union_bbox(self.shapes.iter().map(|s| &s.geometry))
    }
}


#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Rgba,
}

/// The single colorbar or legend of a figure, placed to the right of the panel grid.
#[derive(Debug, Clone, PartialEq)]
pub enum Guide {
    Colorbar {
        title: String,
        low: f64,
        high: f64,
        /// Palette samples from `low` to `high`, evenly spaced.
        colors: Vec<Rgba>,
    },
    Legend {
        title: String,
        entries: Vec<LegendEntry>,
        swatch_edge: Rgba,
    },
}

impl Guide {
    pub fn title(&self) -> &str {
        match self {
            Guide::Colorbar { title, .. } => title,
            Guide::Legend { title, .. } => title,
        }
    }
}


/// A figure with a `rows` x `cols` grid of panels, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// Width and height in inches.
    pub size: (f64, f64),
    pub rows: usize,
    pub cols: usize,
    panels: Vec<Panel>,
    guide: Option<Guide>,
}

impl Figure {
    pub fn new(rows: usize, cols: usize, size: (f64, f64)) -> Figure {
        let mut panels = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                panels.push(Panel::new(PanelHandle { row, col }));
            }
        }
        Figure { size, rows, cols, panels, guide: None }
    }

    /// Handles of all panels, row-major.
    pub fn handles(&self) -> Vec<PanelHandle> {
        self.panels.iter().map(|p| p.handle).collect()
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn panel(&self, handle: PanelHandle) -> Option<&Panel> {
        if handle.row >= self.rows || handle.col >= self.cols {
            return None;
        }
        self.panels.get(handle.row * self.cols + handle.col)
    }

    pub fn panel_mut(&mut self, handle: PanelHandle) -> Option<&mut Panel> {
        if handle.row >= self.rows || handle.col >= self.cols {
            return None;
        }
        self.panels.get_mut(handle.row * self.cols + handle.col)
    }

    /// Replace the figure's guide. There is at most one.
    pub fn set_guide(&mut self, guide: Guide) {
        self.guide = Some(guide);
    }

    pub fn guide(&self) -> Option<&Guide> {
        self.guide.as_ref()
    }
}

/// # Panics
///
/// If the handle lies outside the figure's grid.
impl Index<PanelHandle> for Figure {
    type Output = Panel;

    fn index(&self, handle: PanelHandle) -> &Panel {
        self.panel(handle).expect("No such panel in figure.")
    }
}

impl IndexMut<PanelHandle> for Figure {
    fn index_mut(&mut self, handle: PanelHandle) -> &mut Panel {
        self.panel_mut(handle).expect("No such panel in figure.")
    }
}

impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let shapes: usize = self.panels.iter().map(|p| p.shapes.len()).sum();
        write!(f, "Figure with {}x{} panels showing {} shapes.", self.rows, self.cols, shapes)
    }
}
