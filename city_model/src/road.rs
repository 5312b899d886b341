use std::fmt;

use serde::{Deserialize, Serialize};

use geom::ProjectedPoint;

/// Half-width for a road whose class isn't known.
pub const DEFAULT_HALF_WIDTH: f64 = 0.12;

/// The OSM `highway` classes that become drivable roads in the city model. Everything else
/// (footways, cycleways, tracks, ...) is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadType {
    Motorway,
    Trunk,
    Primary,
    Secondary,
    Tertiary,
    Unclassified,
    Residential,
    LivingStreet,
    Service,
}

impl RoadType {
    pub fn all() -> Vec<RoadType> {
        vec![
            RoadType::Motorway,
            RoadType::Trunk,
            RoadType::Primary,
            RoadType::Secondary,
            RoadType::Tertiary,
            RoadType::Unclassified,
            RoadType::Residential,
            RoadType::LivingStreet,
            RoadType::Service,
        ]
    }

    /// Parses the value of a `highway` tag. Anything outside the 9 road classes is None.
    pub fn from_tag(value: &str) -> Option<RoadType> {
        match value {
            "motorway" => Some(RoadType::Motorway),
            "trunk" => Some(RoadType::Trunk),
            "primary" => Some(RoadType::Primary),
            "secondary" => Some(RoadType::Secondary),
            "tertiary" => Some(RoadType::Tertiary),
            "unclassified" => Some(RoadType::Unclassified),
            "residential" => Some(RoadType::Residential),
            "living_street" => Some(RoadType::LivingStreet),
            "service" => Some(RoadType::Service),
            _ => None,
        }
    }

    pub fn as_tag(self) -> &'static str {
        match self {
            RoadType::Motorway => "motorway",
            RoadType::Trunk => "trunk",
            RoadType::Primary => "primary",
            RoadType::Secondary => "secondary",
            RoadType::Tertiary => "tertiary",
            RoadType::Unclassified => "unclassified",
            RoadType::Residential => "residential",
            RoadType::LivingStreet => "living_street",
            RoadType::Service => "service",
        }
    }

    /// Half of the rendered width, in scene units.
    pub fn half_width(self) -> f64 {
        match self {
            RoadType::Motorway => 0.35,
            RoadType::Trunk => 0.3,
            RoadType::Primary => 0.25,
            RoadType::Secondary => 0.22,
            RoadType::Tertiary => 0.18,
            RoadType::Unclassified => 0.15,
            RoadType::Residential => 0.14,
            RoadType::LivingStreet => 0.12,
            RoadType::Service => 0.1,
        }
    }

    /// Like `half_width`, but for a raw `highway` value that might not be a road class at all.
    pub fn half_width_for_tag(value: Option<&str>) -> f64 {
        value
            .and_then(RoadType::from_tag)
            .map(|rt| rt.half_width())
            .unwrap_or(DEFAULT_HALF_WIDTH)
    }

    /// Major roads that carry animated traffic.
    pub fn is_arterial(self) -> bool {
        matches!(
            self,
            RoadType::Motorway
                | RoadType::Trunk
                | RoadType::Primary
                | RoadType::Secondary
                | RoadType::Tertiary
        )
    }
}

impl fmt::Display for RoadType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

/// A simplified road centerline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoadRecord {
    pub id: i64,
    /// The OSM `name`, or null
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub road_type: RoadType,
    /// Half-width
    pub width: f64,
    /// At least 2 points
    pub points: Vec<ProjectedPoint>,
}

impl RoadRecord {
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| pair[0].dist_to(pair[1]))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for rt in RoadType::all() {
            assert_eq!(RoadType::from_tag(rt.as_tag()), Some(rt));
            // serde and the tag agree
            assert_eq!(
                serde_json::to_string(&rt).unwrap(),
                format!("\"{}\"", rt.as_tag())
            );
        }
        assert_eq!(RoadType::from_tag("footway"), None);
        assert_eq!(RoadType::from_tag("Primary"), None);
    }

    #[test]
    fn widths() {
        assert_eq!(RoadType::Motorway.half_width(), 0.35);
        assert_eq!(RoadType::Service.half_width(), 0.1);
        assert_eq!(RoadType::half_width_for_tag(Some("primary")), 0.25);
        assert_eq!(RoadType::half_width_for_tag(Some("busway")), DEFAULT_HALF_WIDTH);
        assert_eq!(RoadType::half_width_for_tag(None), DEFAULT_HALF_WIDTH);

        // Wider roads rank higher
        let widths: Vec<f64> = RoadType::all().into_iter().map(|rt| rt.half_width()).collect();
        assert!(widths[0..5].windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn arterials() {
        let arterial: Vec<RoadType> = RoadType::all()
            .into_iter()
            .filter(|rt| rt.is_arterial())
            .collect();
        assert_eq!(
            arterial,
            vec![
                RoadType::Motorway,
                RoadType::Trunk,
                RoadType::Primary,
                RoadType::Secondary,
                RoadType::Tertiary
            ]
        );
    }

    #[test]
    fn record_json_shape() {
        let road = RoadRecord {
            id: 7,
            name: None,
            road_type: RoadType::LivingStreet,
            width: 0.12,
            points: vec![ProjectedPoint::new(0.0, 0.0), ProjectedPoint::new(3.0, 4.0)],
        };
        let json = serde_json::to_value(&road).unwrap();
        assert_eq!(json["type"], "living_street");
        assert!(json["name"].is_null());
        assert_eq!(json["points"][1][1], 4.0);
        assert_eq!(road.length(), 5.0);
    }
}
