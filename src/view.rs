//! View descriptors, and selection of the atlas records that make up one panel.

use std::fmt;

use crate::atlas::{Hemi, RegionRecord, Side};


/// Which hemispheres a view shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HemiFilter {
    One(Hemi),
    /// Any of the listed hemispheres, e.g. left and right together in one coronal slice.
    AnyOf(Vec<Hemi>),
}

impl HemiFilter {
    pub fn matches(&self, hemi: Hemi) -> bool {
        match self {
            HemiFilter::One(h) => *h == hemi,
            HemiFilter::AnyOf(hs) => hs.contains(&hemi),
        }
    }
}

impl From<Hemi> for HemiFilter {
    fn from(h: Hemi) -> HemiFilter {
        HemiFilter::One(h)
    }
}

impl From<Vec<Hemi>> for HemiFilter {
    fn from(hs: Vec<Hemi>) -> HemiFilter {
        HemiFilter::AnyOf(hs)
    }
}


/// Declares the content of one panel: the records of one side, restricted to some hemispheres.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewDescriptor {
    pub side: Side,
    pub hemi: HemiFilter,
}

impl ViewDescriptor {
    pub fn new<H: Into<HemiFilter>>(side: Side, hemi: H) -> ViewDescriptor {
        ViewDescriptor { side, hemi: hemi.into() }
    }

    pub fn matches(&self, rec: &RegionRecord) -> bool {
        rec.side == self.side && self.hemi.matches(rec.hemi)
    }

    /// The coronal and sagittal views of a subcortical atlas.
    pub fn subcortical() -> Vec<ViewDescriptor> {
        vec![
            ViewDescriptor::new(Side::Coronal, vec![Hemi::Left, Hemi::Right]),
            ViewDescriptor::new(Side::Sagittal, Hemi::Midline),
        ]
    }

    /// The four views of a cortical surface atlas, in row-major 2x2 order: lateral left, lateral
    /// right, medial left, medial right.
    pub fn cortical() -> Vec<ViewDescriptor> {
        vec![
            ViewDescriptor::new(Side::Lateral, Hemi::Left),
            ViewDescriptor::new(Side::Lateral, Hemi::Right),
            ViewDescriptor::new(Side::Medial, Hemi::Left),
            ViewDescriptor::new(Side::Medial, Hemi::Right),
        ]
    }
}

impl fmt::Display for ViewDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.hemi {
            HemiFilter::One(h) => write!(f, "{} {}", self.side, h),
            HemiFilter::AnyOf(hs) => {
                let names: Vec<&str> = hs.iter().map(|h| h.as_str()).collect();
                write!(f, "{} {}", self.side, names.join("+"))
            }
        }
    }
}


/// Select the records shown in the given view. An empty result is fine, it gives an empty panel.
pub fn select<'a>(records: &'a [RegionRecord], view: &ViewDescriptor) -> Vec<&'a RegionRecord> {
    records.iter().filter(|r| view.matches(r)).collect()
}

/// Select the records of the view's side whose region is `mask_region`, in any hemisphere.
pub fn select_mask<'a>(records: &'a [RegionRecord], view: &ViewDescriptor, mask_region: &str) -> Vec<&'a RegionRecord> {
    records.iter().filter(|r| r.side == view.side && r.region == mask_region).collect()
}
