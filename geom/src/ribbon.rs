use crate::{Mesh, ProjectedPoint, Pt3D, EPSILON_DIST};

/// How many times a lane-marking texture repeats per unit of road length.
pub const RIBBON_V_SCALE: f64 = 0.35;

/// Builds a flat strip of constant width following a road's centerline, at a fixed elevation.
///
/// Every point contributes a left and right vertex, offset by `half_width` along the normal of
/// the local direction. The direction at an interior point spans its two neighbors; endpoints use
/// a one-sided difference. Neighbors coinciding with the point are skipped. U is 0 on the left
/// edge and 1 on the right; V is the distance along the centerline times `v_scale`, so textures
/// tile along the road.
///
/// This is not a true offset curve; sharp turns can make the strip fold over itself. Returns None
/// for fewer than 2 points.
pub fn ribbon_mesh(
    pts: &[ProjectedPoint],
    half_width: f64,
    elevation: f64,
    v_scale: f64,
) -> Option<Mesh> {
    if pts.len() < 2 {
        return None;
    }

    let mut mesh = Mesh::new();
    let mut dist_along = 0.0;
    for (idx, pt) in pts.iter().enumerate() {
        if idx > 0 {
            dist_along += pts[idx - 1].dist_to(*pt);
        }

        let dir = direction_at(pts, idx);
        // Rotate 90 degrees in the ground plane. Heading +x, this points to +z, the left side.
        let normal = Pt3D::new(-dir.z, 0.0, dir.x);

        let center = pt.at_height(elevation);
        let v = dist_along * v_scale;
        mesh.push_vertex(center + normal * half_width, [0.0, v]);
        mesh.push_vertex(center - normal * half_width, [1.0, v]);
    }

    for idx in 0..(pts.len() as u32 - 1) {
        let left1 = 2 * idx;
        let right1 = left1 + 1;
        let left2 = left1 + 2;
        let right2 = left1 + 3;
        // Both triangles wind so their normals face up
        mesh.push_triangle(left1, left2, right1);
        mesh.push_triangle(right1, left2, right2);
    }

    Some(mesh)
}

/// The direction spanning the nearest neighbors on each side that don't sit on top of this point.
fn direction_at(pts: &[ProjectedPoint], idx: usize) -> Pt3D {
    let pt = pts[idx];
    let distinct = |other: &&ProjectedPoint| other.dist_to(pt) > EPSILON_DIST;
    let prev = pts[..idx].iter().rev().find(distinct).copied().unwrap_or(pt);
    let next = pts[idx + 1..].iter().find(distinct).copied().unwrap_or(pt);
    Pt3D::new(next.x - prev.x, 0.0, next.z - prev.z).normalized()
}
