use crate::{signed_area, Mesh, ProjectedPoint};

/// Extrudes a building footprint into a closed prism between `base` and `top`: a flat roof
/// triangulated with earcut, plus one quad of wall per footprint edge. There's no floor, since
/// nothing looks at buildings from below. Every face winds outward.
///
/// Roof UVs are the planar (x, z) coordinates; wall UVs are (distance around the perimeter,
/// height above the base). Returns None if the footprint can't be triangulated or the prism has
/// no height.
pub fn extrude_footprint(footprint: &[ProjectedPoint], base: f64, top: f64) -> Option<Mesh> {
    if footprint.len() < 3 || top <= base {
        return None;
    }

    // Work with clockwise rings in the (x, z) plane; then edge x up points outward.
    let mut ring = footprint.to_vec();
    if ring.first() == ring.last() {
        ring.pop();
    }
    if signed_area(&ring) > 0.0 {
        ring.reverse();
    }

    let mut coords = Vec::with_capacity(ring.len() * 2);
    for pt in &ring {
        coords.push(pt.x);
        coords.push(pt.z);
    }
    let roof_triangles = earcutr::earcut(&coords, &[], 2).ok()?;
    if roof_triangles.is_empty() {
        return None;
    }

    let mut mesh = Mesh::new();

    let roof: Vec<u32> = ring
        .iter()
        .map(|pt| mesh.push_vertex(pt.at_height(top), [pt.x, pt.z]))
        .collect();
    for tri in roof_triangles.chunks_exact(3) {
        let (a, b, c) = (roof[tri[0]], roof[tri[1]], roof[tri[2]]);
        // earcut doesn't promise a winding, so fix each triangle up
        let normal = (mesh.positions[b as usize] - mesh.positions[a as usize])
            .cross(mesh.positions[c as usize] - mesh.positions[a as usize]);
        if normal.y >= 0.0 {
            mesh.push_triangle(a, b, c);
        } else {
            mesh.push_triangle(a, c, b);
        }
    }

    let height = top - base;
    let mut perimeter = 0.0;
    for idx in 0..ring.len() {
        let pt1 = ring[idx];
        let pt2 = ring[(idx + 1) % ring.len()];
        let len = pt1.dist_to(pt2);

        let bottom1 = mesh.push_vertex(pt1.at_height(base), [perimeter, 0.0]);
        let bottom2 = mesh.push_vertex(pt2.at_height(base), [perimeter + len, 0.0]);
        let top2 = mesh.push_vertex(pt2.at_height(top), [perimeter + len, height]);
        let top1 = mesh.push_vertex(pt1.at_height(top), [perimeter, height]);
        mesh.push_triangle(bottom1, bottom2, top2);
        mesh.push_triangle(bottom1, top2, top1);

        perimeter += len;
    }

    Some(mesh)
}
