//! Rendering of brain atlas segmentations as colored 2D panels.
//!
//! Subcortical atlases are shown in coronal and sagittal slices, cortical surface atlases from the
//! lateral and medial side of each hemisphere. A data column of the atlas table (a measurement or a
//! label) is mapped to colors once per figure, so all panels share one colorbar or legend.

pub mod atlas;
pub mod color;
pub mod coloring;
pub mod error;
pub mod export;
pub mod figure;
pub mod palette;
pub mod plot;
pub mod render;
pub mod traits;
pub mod util;
pub mod view;

pub use atlas::{AtlasTable, Hemi, MultiPolygon, Polygon, RegionRecord, Side, Value, UNKNOWN_REGION};
pub use color::{Rgba, MASK_GRAY};
pub use coloring::{resolve, ColorResolution, Normalization};
pub use error::{GgsegError, Result};
pub use export::{render_svg, save_svg};
pub use figure::{EdgeStyle, Figure, FilledShape, Guide, Layer, LegendEntry, Panel, PanelHandle};
pub use plot::{plot_aseg, plot_surface, plot_view, plot_views, PaletteChoice, PlotOptions, DEFAULT_COLUMN};
pub use traits::Palette;
pub use view::{HemiFilter, ViewDescriptor};
