use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use cityutil::Tags;
use geom::LonLat;

/// An Overpass API response, requested with `out geom` so every way carries its own vertices.
/// Only the fields the converter needs are read; everything else is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub elements: Vec<Element>,
}

#[derive(Debug, Deserialize)]
pub struct Element {
    /// "node", "way", or "relation"
    #[serde(rename = "type")]
    pub element_type: String,
    pub id: i64,
    /// Only present for ways
    #[serde(default)]
    pub geometry: Option<Vec<GeometryPoint>>,
    #[serde(default)]
    pub tags: Tags,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct GeometryPoint {
    pub lat: f64,
    pub lon: f64,
}

impl From<GeometryPoint> for LonLat {
    fn from(pt: GeometryPoint) -> LonLat {
        LonLat::new(pt.lon, pt.lat)
    }
}

/// A way with inline geometry, the only kind of element that becomes part of a city.
pub struct Way<'a> {
    pub id: i64,
    pub tags: &'a Tags,
    pub geometry: &'a [GeometryPoint],
}

impl<'a> Way<'a> {
    pub fn points(&self) -> impl Iterator<Item = LonLat> + 'a {
        self.geometry.iter().map(|pt| LonLat::from(*pt))
    }
}

impl Document {
    pub fn load(path: &Path) -> Result<Document> {
        let raw = fs_err::read_to_string(path)?;
        Document::parse(&raw).with_context(|| format!("parsing OSM input {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Document> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Every way carrying geometry, in input order. Nodes, relations, and ways without inline
    /// geometry are skipped.
    pub fn ways_with_geometry(&self) -> Vec<Way> {
        self.elements
            .iter()
            .filter(|el| el.element_type == "way")
            .filter_map(|el| {
                el.geometry.as_ref().map(|geometry| Way {
                    id: el.id,
                    tags: &el.tags,
                    geometry,
                })
            })
            .collect()
    }
}
