//! The atlas table: region geometries tagged with the view they belong to, plus data columns.
//!
//! Every [`RegionRecord`] holds one (multi-)polygon drawn in a 2D view of the brain. The `side`
//! says which view (coronal or sagittal for subcortical atlases, lateral or medial for cortical
//! surface atlases), the `hemi` which hemisphere. Arbitrary measurement columns are stored per
//! record in an open map keyed by column name.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::error::{GgsegError, Result};

/// Sentinel used for records without a region or label name, typically background shapes.
pub const UNKNOWN_REGION: &str = "???";

/// Names of the record attributes that can be read like data columns.
pub const BUILTIN_COLUMNS: [&str; 5] = ["side", "hemi", "region", "label", "roi"];


/// The orientation a region geometry is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    Coronal,
    Sagittal,
    Lateral,
    Medial,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Coronal => "coronal",
            Side::Sagittal => "sagittal",
            Side::Lateral => "lateral",
            Side::Medial => "medial",
        }
    }
}

impl FromStr for Side {
    type Err = GgsegError;

    fn from_str(s: &str) -> Result<Side> {
        match s {
            "coronal" => Ok(Side::Coronal),
            "sagittal" => Ok(Side::Sagittal),
            "lateral" => Ok(Side::Lateral),
            "medial" => Ok(Side::Medial),
            _ => Err(GgsegError::UnknownSide(s.to_string())),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Hemi {
    Left,
    Right,
    Midline,
}

impl Hemi {
    pub fn as_str(&self) -> &'static str {
        match self {
            Hemi::Left => "left",
            Hemi::Right => "right",
            Hemi::Midline => "midline",
        }
    }
}

impl FromStr for Hemi {
    type Err = GgsegError;

    fn from_str(s: &str) -> Result<Hemi> {
        match s {
            "left" => Ok(Hemi::Left),
            "right" => Ok(Hemi::Right),
            "midline" => Ok(Hemi::Midline),
            _ => Err(GgsegError::UnknownHemi(s.to_string())),
        }
    }
}

impl fmt::Display for Hemi {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


/// A single data cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Missing,
}

impl Value {
    /// Whether this cell counts as missing. `NaN` and infinite numbers are missing.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Missing => true,
            Value::Number(v) => !v.is_finite(),
            Value::Text(_) => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }

    /// The category key of this cell, `None` if missing. Numbers use their display form, so in a
    /// mixed column they sort as text: `"10"` comes before `"2"`.
    pub fn category(&self) -> Option<String> {
        match self {
            Value::Text(s) => Some(s.clone()),
            Value::Number(v) if v.is_finite() => Some(v.to_string()),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Value {
        Value::Number(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::Text(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Value {
        v.map(Into::into).unwrap_or(Value::Missing)
    }
}


/// A simple polygon: one exterior ring and zero or more holes. Rings are lists of `[x, y]` points.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub exterior: Vec<[f64; 2]>,
    pub interiors: Vec<Vec<[f64; 2]>>,
}

impl Polygon {
    pub fn new(exterior: Vec<[f64; 2]>, interiors: Vec<Vec<[f64; 2]>>) -> Polygon {
        Polygon { exterior, interiors }
    }

    /// All rings, the exterior first.
    pub fn rings(&self) -> impl Iterator<Item = &Vec<[f64; 2]>> {
        std::iter::once(&self.exterior).chain(self.interiors.iter())
    }
}


/// The geometry of one region record. May contain no polygons at all.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiPolygon {
    pub polygons: Vec<Polygon>,
}

/// Axis-aligned bounding box, `[xmin, ymin, xmax, ymax]`.
pub type BBox = [f64; 4];

impl MultiPolygon {
    pub fn new(polygons: Vec<Polygon>) -> MultiPolygon {
        MultiPolygon { polygons }
    }

    /// Build from nested point lists as delivered by atlas archives: a list of polygons, each a list
    /// of rings, each a list of points. The first ring of a polygon is its exterior, the others are
    /// holes. Polygons without any ring are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// let square = vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]];
    /// let geom = ggseg::MultiPolygon::from_rings(vec![square, vec![]]);
    /// assert_eq!(1, geom.polygons.len());
    /// ```
    pub fn from_rings(coords: Vec<Vec<Vec<[f64; 2]>>>) -> MultiPolygon {
        let mut polygons = Vec::with_capacity(coords.len());
        for mut rings in coords {
            if rings.is_empty() {
                continue;
            }
            let exterior = rings.remove(0);
            polygons.push(Polygon::new(exterior, rings));
        }
        MultiPolygon { polygons }
    }

    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.polygons.iter().all(|p| p.exterior.is_empty())
    }

    /// The bounding box of all exterior rings, `None` for empty geometries.
    pub fn bbox(&self) -> Option<BBox> {
        let mut pts = self.polygons.iter().flat_map(|p| p.exterior.iter());
        let first = pts.next()?;
        let mut bb = [first[0], first[1], first[0], first[1]];
        for p in pts {
            bb[0] = bb[0].min(p[0]);
            bb[1] = bb[1].min(p[1]);
            bb[2] = bb[2].max(p[0]);
            bb[3] = bb[3].max(p[1]);
        }
        Some(bb)
    }
}

/// Union of bounding boxes, `None` if none of the geometries has any points.
pub fn union_bbox<'a, I>(geoms: I) -> Option<BBox>
where
    I: IntoIterator<Item = &'a MultiPolygon>,
{
    geoms.into_iter().filter_map(|g| g.bbox()).fold(None, |acc, bb| match acc {
        None => Some(bb),
        Some(a) => Some([a[0].min(bb[0]), a[1].min(bb[1]), a[2].max(bb[2]), a[3].max(bb[3])]),
    })
}


/// One row of an atlas table.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionRecord {
    pub geometry: MultiPolygon,
    pub side: Side,
    pub hemi: Hemi,
    pub region: String,
    pub label: String,
    pub roi: Option<String>,
    pub data: BTreeMap<String, Value>,
}

impl RegionRecord {
    /// Create a record. A missing `region` or `label` is replaced by [`UNKNOWN_REGION`].
    pub fn new(geometry: MultiPolygon, side: Side, hemi: Hemi, region: Option<&str>, label: Option<&str>) -> RegionRecord {
        RegionRecord {
            geometry,
            side,
            hemi,
            region: region.unwrap_or(UNKNOWN_REGION).to_string(),
            label: label.unwrap_or(UNKNOWN_REGION).to_string(),
            roi: None,
            data: BTreeMap::new(),
        }
    }

    /// Builder-style setter for a data column.
    pub fn with_value<K: Into<String>, V: Into<Value>>(mut self, column: K, value: V) -> RegionRecord {
        self.data.insert(column.into(), value.into());
        self
    }

    /// Read a column by name. Built-in attributes are returned as text, data columns the record
    /// does not carry as [`Value::Missing`].
    pub fn value(&self, column: &str) -> Value {
        match column {
            "side" => Value::Text(self.side.as_str().to_string()),
            "hemi" => Value::Text(self.hemi.as_str().to_string()),
            "region" => Value::Text(self.region.clone()),
            "label" => Value::Text(self.label.clone()),
            "roi" => self.roi.clone().into(),
            _ => self.data.get(column).cloned().unwrap_or(Value::Missing),
        }
    }
}


/// An ordered collection of region records with a known set of data columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AtlasTable {
    pub records: Vec<RegionRecord>,
    columns: BTreeSet<String>,
}

impl AtlasTable {
    /// Create a table. The declared data columns are the union of the columns the records carry.
    pub fn new(records: Vec<RegionRecord>) -> AtlasTable {
        let columns = records.iter().flat_map(|r| r.data.keys().cloned()).collect();
        AtlasTable { records, columns }
    }

    /// Declare an extra data column, e.g. one with no values in any record yet.
    pub fn declare_column<S: Into<String>>(&mut self, column: S) {
        self.columns.insert(column.into());
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The declared data columns, without the built-in attributes.
    pub fn data_columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.as_str())
    }

    pub fn has_column(&self, column: &str) -> bool {
        BUILTIN_COLUMNS.contains(&column) || self.columns.contains(column)
    }

    /// Read a whole column, in record order.
    ///
    /// # Errors
    ///
    /// [`GgsegError::MissingColumn`] if the column is neither built-in nor declared.
    pub fn column(&self, column: &str) -> Result<Vec<Value>> {
        if !self.has_column(column) {
            return Err(GgsegError::MissingColumn(column.to_string()));
        }
        Ok(self.records.iter().map(|r| r.value(column)).collect())
    }

    /// Set a data column from values given in record order. Surplus values are ignored, records
    /// beyond the end of `values` get [`Value::Missing`].
    pub fn set_column<S, I>(&mut self, column: S, values: I)
    where
        S: Into<String>,
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let column = column.into();
        let mut values = values.into_iter();
        for rec in self.records.iter_mut() {
            let v = values.next().map(Into::into).unwrap_or(Value::Missing);
            rec.data.insert(column.clone(), v);
        }
        self.columns.insert(column);
    }

    /// Set the `roi` of every record to `<hemi>_<label>`, the key used for subcortical atlases.
    pub fn derive_roi(&mut self) {
        for rec in self.records.iter_mut() {
            rec.roi = Some(format!("{}_{}", rec.hemi, rec.label));
        }
    }
}

impl fmt::Display for AtlasTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Atlas table with {} region records and {} data columns.", self.records.len(), self.columns.len())
    }
}
