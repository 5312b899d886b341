use city_model::{RoadRecord, RoadType};
use cityutil::Tags;
use geom::ProjectedPoint;

/// Interior points closer than this to the last kept point are dropped.
const MIN_SPACING: f64 = 0.02;

/// Thins out a centerline: the first and last points always survive, and an interior point is
/// kept only if it's far enough from the point kept before it. The result never has more points
/// than the input.
pub fn simplify(pts: &[ProjectedPoint]) -> Vec<ProjectedPoint> {
    let mut kept: Vec<ProjectedPoint> = Vec::with_capacity(pts.len());
    for (idx, pt) in pts.iter().enumerate() {
        let keep = match kept.last() {
            None => true,
            Some(last) => idx == pts.len() - 1 || last.dist_to(*pt) > MIN_SPACING,
        };
        if keep {
            kept.push(*pt);
        }
    }
    kept
}

/// Builds a road record from a projected centerline, or None if there aren't 2 points to draw.
pub fn simplify_road(
    id: i64,
    road_type: RoadType,
    pts: &[ProjectedPoint],
    tags: &Tags,
) -> Option<RoadRecord> {
    let simplified = simplify(pts);
    if simplified.len() < 2 {
        return None;
    }
    Some(RoadRecord {
        id,
        name: tags.get("name").filter(|n| !n.is_empty()).cloned(),
        road_type,
        width: road_type.half_width(),
        points: simplified.into_iter().map(|pt| pt.trimmed(4)).collect(),
    })
}
