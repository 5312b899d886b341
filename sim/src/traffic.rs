use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use serde::{Deserialize, Serialize};

use city_model::CityDataset;
use cityutil::prettyprint_usize;
use geom::Pt3D;

use crate::TrafficRoute;

/// Controls how traffic is spawned.
#[derive(Clone, Debug)]
pub struct TrafficConfig {
    /// Total cap on vehicles across all routes
    pub max_vehicles: usize,
    pub max_vehicles_per_route: usize,
    /// Speeds are uniformly distributed in this range, in scene units per second
    pub min_speed: f64,
    pub max_speed: f64,
    /// Each vehicle's lane is offset from the centerline by half the road's half-width, plus up
    /// to this much
    pub lane_jitter: f64,
    /// Height of the routes above the ground
    pub elevation: f64,
    pub rng_seed: u64,
}

impl Default for TrafficConfig {
    fn default() -> TrafficConfig {
        TrafficConfig {
            max_vehicles: 40,
            max_vehicles_per_route: 2,
            min_speed: 1.5,
            max_speed: 2.5,
            lane_jitter: 0.03,
            elevation: 0.02,
            rng_seed: 42,
        }
    }
}

/// One vehicle, driving along a route forever.
#[derive(Clone, Debug, PartialEq)]
pub struct TrafficVehicle {
    /// Index into the routes of the owning `Traffic`
    pub route: usize,
    /// How far along the route, always in [0, route length)
    pub distance: f64,
    pub speed: f64,
    /// Sideways displacement from the centerline. The sign picks the side of the road.
    pub lane_offset: f64,
}

impl TrafficVehicle {
    /// Moves forward, wrapping back to the start of the route after reaching its end. Returns
    /// the distance covered.
    pub fn advance(&mut self, dt: f64, route_length: f64) -> f64 {
        let step = self.speed * dt;
        self.distance = (self.distance + step).rem_euclid(route_length);
        step
    }
}

/// Where a vehicle is right now, and which way it's facing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehiclePose {
    pub position: Pt3D,
    /// The world up vector crossed with `forward`
    pub right: Pt3D,
    pub up: Pt3D,
    /// Unit tangent of the route
    pub forward: Pt3D,
}

/// Kinematic traffic: vehicles follow smooth routes along the major roads at constant speeds,
/// ignoring each other.
pub struct Traffic {
    routes: Vec<TrafficRoute>,
    vehicles: Vec<TrafficVehicle>,
    /// Summed over all vehicles and ticks, ignoring wraparound
    distance_traveled: f64,
}

impl Traffic {
    pub fn new(dataset: &CityDataset, config: &TrafficConfig) -> Traffic {
        let routes: Vec<TrafficRoute> = dataset
            .roads
            .iter()
            .filter_map(|r| TrafficRoute::new(r, config.elevation))
            .collect();
        Traffic::from_routes(routes, config)
    }

    /// Spawns vehicles route by route, in order, until reaching the cap.
    pub fn from_routes(routes: Vec<TrafficRoute>, config: &TrafficConfig) -> Traffic {
        let mut rng = XorShiftRng::seed_from_u64(config.rng_seed);
        let mut vehicles = Vec::new();
        'routes: for (idx, route) in routes.iter().enumerate() {
            for _ in 0..config.max_vehicles_per_route {
                if vehicles.len() >= config.max_vehicles {
                    break 'routes;
                }
                // Alternate sides of the road
                let side = if vehicles.len() % 2 == 0 { 1.0 } else { -1.0 };
                let lane_offset =
                    side * (route.width * 0.5 + sample_range(&mut rng, 0.0, config.lane_jitter));
                vehicles.push(TrafficVehicle {
                    route: idx,
                    distance: sample_range(&mut rng, 0.0, route.length()),
                    speed: sample_range(&mut rng, config.min_speed, config.max_speed),
                    lane_offset,
                });
            }
        }
        info!(
            "Spawned {} vehicles on {} routes",
            prettyprint_usize(vehicles.len()),
            prettyprint_usize(routes.len())
        );
        Traffic {
            routes,
            vehicles,
            distance_traveled: 0.0,
        }
    }

    pub fn routes(&self) -> &Vec<TrafficRoute> {
        &self.routes
    }

    pub fn vehicles(&self) -> &Vec<TrafficVehicle> {
        &self.vehicles
    }

    /// Advances every vehicle by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        for vehicle in &mut self.vehicles {
            self.distance_traveled += vehicle.advance(dt, self.routes[vehicle.route].length());
        }
    }

    /// How far all vehicles have driven since spawning.
    pub fn distance_traveled(&self) -> f64 {
        self.distance_traveled
    }

    pub fn pose(&self, vehicle: &TrafficVehicle) -> VehiclePose {
        let (center, forward) = self.routes[vehicle.route].sample(vehicle.distance);
        let right = Pt3D::UP.cross(forward);
        VehiclePose {
            position: center + right * vehicle.lane_offset,
            right,
            up: Pt3D::UP,
            forward,
        }
    }

    pub fn poses(&self) -> Vec<VehiclePose> {
        self.vehicles.iter().map(|v| self.pose(v)).collect()
    }
}

/// Uniform in [low, high), or just `low` for an empty range.
fn sample_range(rng: &mut XorShiftRng, low: f64, high: f64) -> f64 {
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}
