use city_model::BuildingRecord;
use cityutil::{pseudo_random_from_id, Tags};
use geom::{polygon_area, trim_f64, ProjectedPoint};

/// Roofs and walls get one of these, picked per building.
pub const PALETTE: [&str; 6] = [
    "#cdd5e0", "#b8c1cc", "#d4cdbf", "#f0e3c2", "#d0d8db", "#e2d6c5",
];

/// Footprints smaller than this are slivers, not buildings.
const MIN_AREA: f64 = 0.02;
/// A ring whose ends are this close is explicitly closed.
const CLOSED_RING_THRESHOLD: f64 = 0.001;
const METERS_PER_LEVEL: f64 = 3.5;
const MIN_HEIGHT_ABOVE_BASE_METERS: f64 = 4.0;
const MAX_HEIGHT_METERS: f64 = 120.0;
/// Meters per scene unit, vertically
const HEIGHT_SCALE: f64 = 5.0;

/// Turns a projected building outline into a record, or None if the outline is degenerate.
pub fn extrude_building(
    id: i64,
    mut footprint: Vec<ProjectedPoint>,
    tags: &Tags,
) -> Option<BuildingRecord> {
    if footprint.len() > 2
        && footprint[0].dist_to(footprint[footprint.len() - 1]) < CLOSED_RING_THRESHOLD
    {
        footprint.pop();
    }
    if footprint.len() < 3 {
        return None;
    }
    if polygon_area(&footprint) < MIN_AREA {
        return None;
    }

    let rand = pseudo_random_from_id(id);
    let base = base_meters(tags);
    let height = height_meters(tags)
        .unwrap_or_else(|| 10.0 + rand * 20.0)
        .max(base + MIN_HEIGHT_ABOVE_BASE_METERS)
        .min(MAX_HEIGHT_METERS);

    Some(BuildingRecord {
        id,
        height: trim_f64(height / HEIGHT_SCALE, 2),
        min_height: trim_f64(base / HEIGHT_SCALE, 2),
        color: pick_color(rand).to_string(),
        footprint: footprint.into_iter().map(|pt| pt.trimmed(4)).collect(),
    })
}

/// Explicit height first, then levels. A height of zero is as good as missing.
fn height_meters(tags: &Tags) -> Option<f64> {
    if let Some(h) = tags.get_number("height").filter(|h| *h != 0.0) {
        return Some(h);
    }
    tags.get_number("building:levels")
        .map(|levels| levels * METERS_PER_LEVEL)
        .filter(|h| *h != 0.0)
}

/// How high the bottom of the building floats above the ground. Never below it.
fn base_meters(tags: &Tags) -> f64 {
    tags.get_number("building:min_level")
        .map(|levels| levels * METERS_PER_LEVEL)
        .unwrap_or(0.0)
        .max(0.0)
}

fn pick_color(rand: f64) -> &'static str {
    let idx = (rand * PALETTE.len() as f64).floor() as usize;
    PALETTE[idx % PALETTE.len()]
}
