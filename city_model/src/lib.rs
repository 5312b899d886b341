//! The renderer-ready city model: simplified road centerlines and extruded building footprints
//! in a local planar frame. `convert_osm` produces a `CityDataset` once, offline; everything at
//! render time loads it read-only.

#[macro_use]
extern crate log;

mod building;
mod road;

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use geom::{GeoBounds, LonLat, ProjectedPoint};

pub use crate::building::BuildingRecord;
pub use crate::road::{RoadRecord, RoadType, DEFAULT_HALF_WIDTH};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CityDataset {
    pub meta: Meta,
    pub bounds: GeoBounds,
    /// The full bounds span this many scene units, along both axes
    pub size: f64,
    pub center: Center,
    pub roads: Vec<RoadRecord>,
    pub buildings: Vec<BuildingRecord>,
}

/// Provenance of a dataset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub source: String,
    /// ISO-8601
    pub generated_at: String,
    pub note: String,
}

/// The geographic point projected to the scene origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

impl From<LonLat> for Center {
    fn from(pt: LonLat) -> Center {
        Center {
            lat: pt.y(),
            lon: pt.x(),
        }
    }
}

impl CityDataset {
    /// Reads a dataset written by `save`. Missing files and malformed JSON are errors.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<CityDataset> {
        let path = path.as_ref();
        let dataset: CityDataset = cityutil::read_json(path)
            .with_context(|| format!("couldn't load city dataset from {}", path.display()))?;
        info!(
            "Loaded {} with {} roads and {} buildings",
            path.display(),
            dataset.roads.len(),
            dataset.buildings.len()
        );
        Ok(dataset)
    }

    /// Writes pretty-printed JSON, atomically.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        cityutil::write_json(path, self)
    }

    /// Projects a GPS point into this dataset's scene frame.
    pub fn project(&self, pt: LonLat) -> ProjectedPoint {
        self.bounds.project(pt, self.size)
    }

    pub fn road(&self, id: i64) -> Option<&RoadRecord> {
        self.roads.iter().find(|r| r.id == id)
    }

    pub fn building(&self, id: i64) -> Option<&BuildingRecord> {
        self.buildings.iter().find(|b| b.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tiny_dataset() -> CityDataset {
        let bounds =
            GeoBounds::from_points(vec![LonLat::new(126.97, 37.56), LonLat::new(126.99, 37.58)])
                .unwrap();
        CityDataset {
            meta: Meta {
                source: "OpenStreetMap contributors".to_string(),
                generated_at: "2024-01-01T00:00:00.000Z".to_string(),
                note: "Geometry projected to local scene coordinates.".to_string(),
            },
            center: bounds.center().into(),
            bounds,
            size: 30.0,
            roads: vec![RoadRecord {
                id: 1,
                name: Some("Sejong-daero".to_string()),
                road_type: RoadType::Primary,
                width: 0.25,
                points: vec![ProjectedPoint::new(-1.0, 0.0), ProjectedPoint::new(1.0, 0.0)],
            }],
            buildings: vec![BuildingRecord {
                id: 2,
                height: 4.0,
                min_height: 0.0,
                color: "#cdd5e0".to_string(),
                footprint: vec![
                    ProjectedPoint::new(0.0, 0.0),
                    ProjectedPoint::new(1.0, 0.0),
                    ProjectedPoint::new(1.0, 1.0),
                ],
            }],
        }
    }

    #[test]
    fn json_keys() {
        let json = serde_json::to_value(&tiny_dataset()).unwrap();
        assert!(json["meta"]["generatedAt"].is_string());
        assert_eq!(json["buildings"][0]["minHeight"], 0.0);
        assert_eq!(json["center"]["lat"], 37.57);
        for key in ["north", "south", "east", "west"] {
            assert!(json["bounds"][key].is_number(), "{}", key);
        }
    }

    #[test]
    fn save_and_load() {
        let dir = std::env::temp_dir().join(format!("city_model_test_{}", std::process::id()));
        let path = dir.join("city.json");
        let dataset = tiny_dataset();
        dataset.save(&path).unwrap();
        let loaded = CityDataset::load(&path).unwrap();
        assert_eq!(dataset, loaded);
        assert_eq!(loaded.road(1).unwrap().road_type, RoadType::Primary);
        assert!(loaded.building(1).is_none());
        assert_eq!(loaded.building(2).unwrap().area(), 0.5);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = CityDataset::load("/definitely/not/here/city.json").unwrap_err();
        assert!(format!("{:#}", err).contains("/definitely/not/here/city.json"));
    }

    #[test]
    fn center_projects_to_origin() {
        let dataset = tiny_dataset();
        let origin = dataset.project(LonLat::new(dataset.center.lon, dataset.center.lat));
        assert!(origin.x.abs() < 1e-9 && origin.z.abs() < 1e-9);
    }
}
