//! Converts an Overpass JSON extract of OpenStreetMap into a `CityDataset`: building footprints
//! with heights and colors, and simplified road centerlines with widths, all projected into a
//! small local frame.

#[macro_use]
extern crate log;

mod buildings;
mod classify;
mod reader;
mod roads;

use std::path::Path;

use anyhow::{bail, Result};

use city_model::{CityDataset, Meta};
use cityutil::{prettyprint_usize, Timer};
use geom::{GeoBounds, ProjectedPoint};

pub use self::buildings::{extrude_building, PALETTE};
pub use self::classify::{classify, Feature};
pub use self::reader::{Document, Element, GeometryPoint, Way};
pub use self::roads::{simplify, simplify_road};

pub const DEFAULT_INPUT: &str = "data/seoul_osm.json";
pub const DEFAULT_OUTPUT: &str = "data/seoul_city.json";

/// Knobs for the conversion.
#[derive(Clone, Debug)]
pub struct Options {
    /// The full extent of the input maps to this many scene units, along both axes.
    pub target_size: f64,
}

impl Default for Options {
    fn default() -> Options {
        Options { target_size: 30.0 }
    }
}

/// Reads the OSM extract at `input`, converts it, and atomically writes the dataset to `output`.
/// Nothing is written if conversion fails.
pub fn convert_file(
    input: &Path,
    output: &Path,
    opts: &Options,
    timer: &mut Timer,
) -> Result<CityDataset> {
    let label = format!("read {}", input.display());
    timer.start(&label);
    let doc = Document::load(input)?;
    timer.stop(&label);
    let dataset = convert(&doc, opts, timer)?;

    timer.start("write dataset");
    dataset.save(output)?;
    timer.stop("write dataset");

    info!(
        "Generated {} with {} roads and {} buildings.",
        output.display(),
        prettyprint_usize(dataset.roads.len()),
        prettyprint_usize(dataset.buildings.len())
    );
    Ok(dataset)
}

/// Two passes over the ways carrying geometry: the first finds the bounds that define the
/// projection, the second projects, classifies, and builds a record for each. Fails if no way has
/// geometry, or if the geometry doesn't span a real area.
pub fn convert(doc: &Document, opts: &Options, timer: &mut Timer) -> Result<CityDataset> {
    let ways = doc.ways_with_geometry();
    if ways.is_empty() {
        bail!("the input has no ways with geometry");
    }

    timer.start("compute bounds");
    let bounds = GeoBounds::from_points(ways.iter().flat_map(|w| w.points()));
    timer.stop("compute bounds");
    let bounds = bounds?;

    let mut roads = Vec::new();
    let mut buildings = Vec::new();
    let mut skipped_roads = 0;
    let mut skipped_buildings = 0;
    let mut unclassified = 0;

    timer.start_iter("classify ways", ways.len());
    for way in &ways {
        timer.next();
        let pts: Vec<ProjectedPoint> = way
            .points()
            .map(|pt| bounds.project(pt, opts.target_size))
            .collect();
        match classify(way.tags) {
            Some(Feature::Road(rt)) => match simplify_road(way.id, rt, &pts, way.tags) {
                Some(road) => roads.push(road),
                None => {
                    debug!("Skipping road {}, too few points", way.id);
                    skipped_roads += 1;
                }
            },
            Some(Feature::Building) => match extrude_building(way.id, pts, way.tags) {
                Some(b) => buildings.push(b),
                None => {
                    debug!("Skipping building {}, degenerate footprint", way.id);
                    skipped_buildings += 1;
                }
            },
            None => {
                unclassified += 1;
            }
        }
    }
    info!(
        "Skipped {} roads and {} buildings with bad geometry, and {} other ways",
        prettyprint_usize(skipped_roads),
        prettyprint_usize(skipped_buildings),
        prettyprint_usize(unclassified)
    );

    Ok(CityDataset {
        meta: Meta {
            source: "OpenStreetMap contributors".to_string(),
            generated_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            note: "Geometry projected to local scene coordinates.".to_string(),
        },
        center: bounds.center().into(),
        bounds,
        size: opts.target_size,
        roads,
        buildings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use city_model::RoadType;
    use pretty_assertions::assert_eq;

    fn convert_str(raw: &str) -> Result<CityDataset> {
        let doc = Document::parse(raw)?;
        convert(&doc, &Options::default(), &mut Timer::throwaway())
    }

    #[test]
    fn building_spanning_the_bounds() {
        let dataset = convert_str(
            r#"{"elements": [{
                "type": "way", "id": 1,
                "tags": {"building": "yes", "height": "20"},
                "geometry": [
                    {"lat": 37.50, "lon": 127.00},
                    {"lat": 37.50, "lon": 127.001},
                    {"lat": 37.501, "lon": 127.001},
                    {"lat": 37.501, "lon": 127.00}
                ]
            }]}"#,
        )
        .unwrap();
        assert!(dataset.roads.is_empty());
        assert_eq!(dataset.buildings.len(), 1);
        let b = &dataset.buildings[0];
        assert_eq!(b.height, 4.0);
        assert_eq!(b.min_height, 0.0);
        assert_eq!(
            b.footprint,
            vec![
                ProjectedPoint::new(-15.0, 15.0),
                ProjectedPoint::new(15.0, 15.0),
                ProjectedPoint::new(15.0, -15.0),
                ProjectedPoint::new(-15.0, -15.0),
            ]
        );
        assert_eq!(dataset.size, 30.0);
        assert!((dataset.center.lat - 37.5005).abs() < 1e-9);
        assert!((dataset.center.lon - 127.0005).abs() < 1e-9);
        assert_eq!(dataset.meta.source, "OpenStreetMap contributors");
    }

    #[test]
    fn roads_and_buildings_together() {
        let dataset = convert_str(
            r#"{"elements": [
                {"type": "node", "id": 100, "lat": 37.5, "lon": 127.0},
                {"type": "way", "id": 2, "tags": {"highway": "secondary"},
                 "geometry": [{"lat": 37.50, "lon": 127.00}, {"lat": 37.51, "lon": 127.01}]},
                {"type": "way", "id": 3, "tags": {"highway": "primary", "building": "yes"},
                 "geometry": [{"lat": 37.50, "lon": 127.01}, {"lat": 37.51, "lon": 127.00}]},
                {"type": "way", "id": 4, "tags": {"leisure": "park"},
                 "geometry": [{"lat": 37.49, "lon": 126.99}, {"lat": 37.495, "lon": 126.995}]},
                {"type": "way", "id": 5, "tags": {"building": "yes"},
                 "geometry": [{"lat": 37.505, "lon": 127.005}, {"lat": 37.505, "lon": 127.005}]}
            ]}"#,
        )
        .unwrap();
        // The park contributes to the bounds, even though it's dropped
        assert_eq!(dataset.bounds.south, 37.49);
        assert_eq!(dataset.bounds.west, 126.99);

        let types: Vec<(i64, RoadType)> =
            dataset.roads.iter().map(|r| (r.id, r.road_type)).collect();
        assert_eq!(types, vec![(2, RoadType::Secondary), (3, RoadType::Primary)]);
        assert_eq!(dataset.roads[0].width, 0.22);
        // Building 5 is degenerate
        assert!(dataset.buildings.is_empty());
    }

    #[test]
    fn no_geometry_is_fatal() {
        assert!(convert_str(r#"{"elements": []}"#).is_err());
        assert!(convert_str(
            r#"{"elements": [{"type": "way", "id": 1, "tags": {"building": "yes"}}]}"#
        )
        .is_err());
        // A single point has no span
        assert!(convert_str(
            r#"{"elements": [{"type": "way", "id": 1, "geometry": [{"lat": 1.0, "lon": 2.0}]}]}"#
        )
        .is_err());
    }

    #[test]
    fn custom_target_size() {
        let doc = Document::parse(
            r#"{"elements": [{"type": "way", "id": 8, "tags": {"highway": "motorway"},
                "geometry": [{"lat": 37.50, "lon": 127.00}, {"lat": 37.51, "lon": 127.01}]}]}"#,
        )
        .unwrap();
        let dataset = convert(
            &doc,
            &Options { target_size: 100.0 },
            &mut Timer::throwaway(),
        )
        .unwrap();
        assert_eq!(dataset.size, 100.0);
        assert_eq!(
            dataset.roads[0].points,
            vec![ProjectedPoint::new(-50.0, 50.0), ProjectedPoint::new(50.0, -50.0)]
        );
    }
}
