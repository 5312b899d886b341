use geo::{Area, LineString, Polygon};

use crate::ProjectedPoint;

/// Shoelace area of a footprint, positive when the points wind counter-clockwise in (x, z). The
/// ring doesn't need to be explicitly closed. Fewer than 3 points have no area.
pub fn signed_area(pts: &[ProjectedPoint]) -> f64 {
    if pts.len() < 3 {
        return 0.0;
    }
    to_geo(pts).signed_area()
}

/// The absolute area of a footprint. Degenerate (collinear or too short) rings yield 0.
pub fn polygon_area(pts: &[ProjectedPoint]) -> f64 {
    signed_area(pts).abs()
}

fn to_geo(pts: &[ProjectedPoint]) -> Polygon<f64> {
    let exterior: LineString<f64> = pts.iter().map(|pt| (pt.x, pt.z)).collect::<Vec<_>>().into();
    // geo closes the exterior ring itself
    Polygon::new(exterior, Vec::new())
}
