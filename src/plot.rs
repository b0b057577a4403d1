//! The plotting entry points: single views, subcortical (aseg) and cortical surface layouts.
//!
//! All layouts share one pipeline. The data column is resolved into colors exactly once, then
//! each view's records are selected and drawn into their panel, and finally a single colorbar or
//! legend is attached to the whole figure. Because the colors are resolved from the full column,
//! a value has the same color in every panel.

use std::sync::Arc;

use log::debug;

use crate::atlas::{AtlasTable, Side, UNKNOWN_REGION};
use crate::color::Rgba;
use crate::coloring::resolve;
use crate::error::{GgsegError, Result};
use crate::figure::{EdgeStyle, Figure, PanelHandle};
use crate::palette;
use crate::render::{attach_guide, render_panel};
use crate::traits::Palette;
use crate::view::{select, select_mask, HemiFilter, ViewDescriptor};

/// The column plotted when none is given explicitly.
pub const DEFAULT_COLUMN: &str = "label";


/// A palette given by name, or a palette object.
#[derive(Debug, Clone)]
pub enum PaletteChoice {
    Named(String),
    Custom(Arc<dyn Palette>),
}

impl PaletteChoice {
    /// Get the palette object, looking it up if given by name.
    pub fn resolve(&self) -> Result<Arc<dyn Palette>> {
        match self {
            PaletteChoice::Named(name) => palette::named(name),
            PaletteChoice::Custom(p) => Ok(Arc::clone(p)),
        }
    }
}

impl From<&str> for PaletteChoice {
    fn from(name: &str) -> PaletteChoice {
        PaletteChoice::Named(name.to_string())
    }
}

impl From<Arc<dyn Palette>> for PaletteChoice {
    fn from(p: Arc<dyn Palette>) -> PaletteChoice {
        PaletteChoice::Custom(p)
    }
}


/// Styling of a plot. The constructors [`PlotOptions::view`], [`PlotOptions::aseg`] and
/// [`PlotOptions::surface`] give the defaults of the respective layout, the setters adjust them.
#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub palette: PaletteChoice,
    /// Edge color as hex code or color name, see [`Rgba`]'s `FromStr` implementation.
    pub edge_color: String,
    pub edge_width: f64,
    pub aspect: f64,
    /// Figure width and height in inches.
    pub figsize: (f64, f64),
    pub vmin: Option<f64>,
    pub vmax: Option<f64>,
    /// Whether to attach the colorbar or legend.
    pub show_guide: bool,
    /// Region drawn in gray on top of the data.
    pub mask_region: Option<String>,
    /// Title of the colorbar or legend. Defaults to the column name.
    pub legend_title: Option<String>,
}

impl Default for PlotOptions {
    fn default() -> PlotOptions {
        PlotOptions::view()
    }
}

impl PlotOptions {
    /// Defaults for single views.
    pub fn view() -> PlotOptions {
        PlotOptions {
            palette: PaletteChoice::from("viridis"),
            edge_color: String::from("black"),
            edge_width: 1.5,
            aspect: 1.0,
            figsize: (5.0, 5.0),
            vmin: None,
            vmax: None,
            show_guide: false,
            mask_region: None,
            legend_title: None,
        }
    }

    /// Defaults for subcortical atlases: the unknown region is masked and a guide is shown.
    pub fn aseg() -> PlotOptions {
        PlotOptions {
            edge_width: 1.0,
            figsize: (10.0, 5.0),
            show_guide: true,
            mask_region: Some(String::from(UNKNOWN_REGION)),
            ..PlotOptions::view()
        }
    }

    /// Defaults for cortical surface atlases.
    pub fn surface() -> PlotOptions {
        PlotOptions { palette: PaletteChoice::from("tab20"), figsize: (7.0, 5.0), ..PlotOptions::view() }
    }

    pub fn palette<P: Into<PaletteChoice>>(mut self, palette: P) -> PlotOptions {
        self.palette = palette.into();
        self
    }

    pub fn edge_color(mut self, color: &str) -> PlotOptions {
        self.edge_color = color.to_string();
        self
    }

    pub fn edge_width(mut self, width: f64) -> PlotOptions {
        self.edge_width = width;
        self
    }

    pub fn aspect(mut self, aspect: f64) -> PlotOptions {
        self.aspect = aspect;
        self
    }

    pub fn figsize(mut self, width: f64, height: f64) -> PlotOptions {
        self.figsize = (width, height);
        self
    }

    /// Fix the numeric color range. `None` uses the observed minimum or maximum.
    pub fn bounds(mut self, vmin: Option<f64>, vmax: Option<f64>) -> PlotOptions {
        self.vmin = vmin;
        self.vmax = vmax;
        self
    }

    pub fn show_guide(mut self, show: bool) -> PlotOptions {
        self.show_guide = show;
        self
    }

    pub fn mask_region(mut self, region: Option<&str>) -> PlotOptions {
        self.mask_region = region.map(String::from);
        self
    }

    pub fn legend_title(mut self, title: &str) -> PlotOptions {
        self.legend_title = Some(title.to_string());
        self
    }
}


/// Plot any list of views into a `rows` x `cols` grid, filled row-major.
///
/// Returns the figure and the handles of the panels the views were drawn into, in view order.
///
/// # Errors
///
/// Fails before anything is drawn if `column` is not in the table, the palette name or edge
/// color is unknown, or the views do not fit into the grid.
pub fn plot_views(table: &AtlasTable, views: &[ViewDescriptor], layout: (usize, usize), column: &str, options: &PlotOptions) -> Result<(Figure, Vec<PanelHandle>)> {
    let (rows, cols) = layout;
    match rows.checked_mul(cols) {
        Some(cells) if views.len() <= cells => {}
        _ => return Err(GgsegError::InvalidLayout(views.len(), rows, cols)),
    }

    let values = table.column(column)?;
    let palette = options.palette.resolve()?;
    let edge = EdgeStyle { color: options.edge_color.parse::<Rgba>()?, width: options.edge_width };

    let coloring = resolve(&values, palette, options.vmin, options.vmax);

    let mut figure = Figure::new(rows, cols, options.figsize);
    let handles: Vec<PanelHandle> = figure.handles().into_iter().take(views.len()).collect();

    for (handle, view) in handles.iter().zip(views.iter()) {
        let subset = select(&table.records, view);
        let mask = match &options.mask_region {
            Some(region) => select_mask(&table.records, view, region),
            None => Vec::new(),
        };
        debug!("View {}: {} records, {} mask records.", view, subset.len(), mask.len());

        let panel = &mut figure[*handle];
        panel.view = Some(view.clone());
        render_panel(panel, &subset, &mask, column, &coloring, edge, options.aspect);
    }

    let title = options.legend_title.as_deref().unwrap_or(column);
    attach_guide(&mut figure, &coloring, title, options.show_guide);

    debug!("{}", figure);
    Ok((figure, handles))
}


/// Plot a single view of an atlas, e.g. the medial side of the right hemisphere.
///
/// A view that matches no records gives an empty panel, not an error.
///
/// # Examples
///
/// ```
/// use ggseg::{plot_view, AtlasTable, Hemi, PlotOptions, Side};
///
/// let table = AtlasTable::default();
/// let (fig, panel) = plot_view(&table, Side::Medial, Hemi::Right, "label", &PlotOptions::view()).unwrap();
/// assert!(fig[panel].is_empty());
/// ```
pub fn plot_view<H: Into<HemiFilter>>(table: &AtlasTable, side: Side, hemi: H, column: &str, options: &PlotOptions) -> Result<(Figure, PanelHandle)> {
    let views = [ViewDescriptor::new(side, hemi)];
    let (figure, handles) = plot_views(table, &views, (1, 1), column, options)?;
    Ok((figure, handles[0]))
}

/// Plot a subcortical segmentation: a coronal slice showing both hemispheres next to a sagittal
/// midline slice. Use [`PlotOptions::aseg`] for the usual defaults, which mask the unknown region.
pub fn plot_aseg(table: &AtlasTable, column: &str, options: &PlotOptions) -> Result<(Figure, [PanelHandle; 2])> {
    let (figure, handles) = plot_views(table, &ViewDescriptor::subcortical(), (1, 2), column, options)?;
    Ok((figure, [handles[0], handles[1]]))
}

/// Plot a cortical surface atlas in a 2x2 grid: lateral left, lateral right, medial left,
/// medial right. Use [`PlotOptions::surface`] for the usual defaults.
pub fn plot_surface(table: &AtlasTable, column: &str, options: &PlotOptions) -> Result<(Figure, [PanelHandle; 4])> {
    let (figure, handles) = plot_views(table, &ViewDescriptor::cortical(), (2, 2), column, options)?;
    Ok((figure, [handles[0], handles[1], handles[2], handles[3]]))
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::atlas::{Hemi, MultiPolygon, Polygon, RegionRecord};

    fn table() -> AtlasTable {
        let tri = MultiPolygon::new(vec![Polygon::new(vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]], vec![])]);
        AtlasTable::new(vec![
            RegionRecord::new(tri.clone(), Side::Lateral, Hemi::Left, Some("a"), Some("lh_a")).with_value("score", 1.0),
            RegionRecord::new(tri, Side::Lateral, Hemi::Right, Some("a"), Some("rh_a")).with_value("score", 2.0),
        ])
    }

    #[test]
    fn preset_defaults_differ_where_the_layouts_do() {
        let aseg = PlotOptions::aseg();
        assert_eq!(Some(UNKNOWN_REGION.to_string()), aseg.mask_region);
        assert!(aseg.show_guide);
        assert_eq!((10.0, 5.0), aseg.figsize);
        let surf = PlotOptions::surface();
        assert!(surf.mask_region.is_none());
        assert_eq!("tab20", surf.palette.resolve().unwrap().name());
        assert_eq!("viridis", PlotOptions::default().palette.resolve().unwrap().name());
    }

    #[test]
    fn views_must_fit_the_grid() {
        let res = plot_views(&table(), &ViewDescriptor::cortical(), (1, 2), "score", &PlotOptions::view());
        assert!(matches!(res, Err(GgsegError::InvalidLayout(4, 1, 2))));

        let huge = (usize::MAX / 2, 3);
        let res = plot_views(&table(), &ViewDescriptor::cortical(), huge, "score", &PlotOptions::view());
        assert!(matches!(res, Err(GgsegError::InvalidLayout(4, _, 3))));
    }

    #[test]
    fn bad_styling_fails_before_drawing() {
        let res = plot_view(&table(), Side::Lateral, Hemi::Left, "score", &PlotOptions::view().palette("nope"));
        assert!(matches!(res, Err(GgsegError::UnknownPalette(_))));
        let res = plot_view(&table(), Side::Lateral, Hemi::Left, "score", &PlotOptions::view().edge_color("#12"));
        assert!(matches!(res, Err(GgsegError::InvalidColor(_))));
    }

    #[test]
    fn legend_title_overrides_the_column_name() {
        let opts = PlotOptions::view().show_guide(true).legend_title("Thickness [mm]");
        let (fig, _) = plot_view(&table(), Side::Lateral, Hemi::Left, "score", &opts).unwrap();
        assert_eq!("Thickness [mm]", fig.guide().unwrap().title());
    }
}
