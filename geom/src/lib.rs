//! Planar and 3D geometry for the city pipeline: projecting GPS coordinates into a local frame,
//! polygon areas, ribbon and prism meshes, and smooth curves for traffic.

mod curve;
mod gps;
mod mesh;
mod polygon;
mod pt;
mod ribbon;
mod tessellation;

pub use crate::curve::CatmullRomCurve;
pub use crate::gps::{GeoBounds, LonLat};
pub use crate::mesh::Mesh;
pub use crate::polygon::{polygon_area, signed_area};
pub use crate::pt::{ProjectedPoint, Pt3D};
pub use crate::ribbon::{ribbon_mesh, RIBBON_V_SCALE};
pub use crate::tessellation::extrude_footprint;

/// Two points closer than this are considered the same.
pub const EPSILON_DIST: f64 = 1e-9;

/// Rounds to a fixed number of decimal places. Used to keep persisted coordinates short.
pub fn trim_f64(x: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    let rounded = (x * factor).round() / factor;
    // Avoid serializing -0.0
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::trim_f64;

    #[test]
    fn trimming() {
        assert_eq!(trim_f64(1.234_56, 4), 1.2346);
        assert_eq!(trim_f64(-0.000_01, 4), 0.0);
        assert!(trim_f64(-0.000_01, 4).is_sign_positive());
        assert_eq!(trim_f64(3.999, 2), 4.0);
    }
}
