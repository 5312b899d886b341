use serde::{Deserialize, Serialize};

use geom::{polygon_area, ProjectedPoint};

/// An extruded building footprint. Heights are already in scene units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingRecord {
    pub id: i64,
    /// Top of the building
    pub height: f64,
    /// Bottom of the building, above the ground. 0 unless the building floats, like a skybridge.
    pub min_height: f64,
    /// Hex color, like "#cdd5e0"
    pub color: String,
    /// An open ring of at least 3 points
    pub footprint: Vec<ProjectedPoint>,
}

impl BuildingRecord {
    pub fn area(&self) -> f64 {
        polygon_area(&self.footprint)
    }
}
