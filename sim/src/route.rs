use city_model::{RoadRecord, RoadType};
use geom::{CatmullRomCurve, Pt3D, EPSILON_DIST};

/// A smooth path for vehicles to follow, built from one road's centerline. Routes are shared by
/// every vehicle on them and never change.
#[derive(Clone, Debug)]
pub struct TrafficRoute {
    pub road_id: i64,
    pub road_type: RoadType,
    /// Half-width of the source road
    pub width: f64,
    curve: CatmullRomCurve,
}

impl TrafficRoute {
    /// Only arterials with at least 3 points carry traffic. Returns None for any other road, or
    /// one whose curve has no length to drive along.
    pub fn new(road: &RoadRecord, elevation: f64) -> Option<TrafficRoute> {
        if !road.road_type.is_arterial() || road.points.len() < 3 {
            return None;
        }
        let curve =
            CatmullRomCurve::new(road.points.iter().map(|pt| pt.at_height(elevation)).collect())?;
        if curve.length() <= EPSILON_DIST {
            return None;
        }
        Some(TrafficRoute {
            road_id: road.id,
            road_type: road.road_type,
            width: road.width,
            curve,
        })
    }

    pub fn length(&self) -> f64 {
        self.curve.length()
    }

    /// Position and unit tangent at some distance along the route.
    pub fn sample(&self, dist_along: f64) -> (Pt3D, Pt3D) {
        let u = dist_along / self.length();
        (self.curve.point_at(u), self.curve.tangent_at(u))
    }
}
