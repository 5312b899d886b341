//! Animated traffic for a city: vehicles loop along smooth curves fit through the major roads.
//! Purely kinematic; there's no collision avoidance, lane changing, or speed variation.

#[macro_use]
extern crate log;

mod route;
mod traffic;

use std::path::Path;

use anyhow::Result;

use city_model::CityDataset;
use cityutil::Timer;

pub use crate::route::TrafficRoute;
pub use crate::traffic::{Traffic, TrafficConfig, TrafficVehicle, VehiclePose};

/// Summary of a headless run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunStats {
    pub num_routes: usize,
    pub num_vehicles: usize,
    pub ticks: usize,
    /// Total distance covered by all vehicles
    pub total_distance: f64,
}

/// Loads a dataset, spawns traffic, and steps it forward `ticks` times without rendering anything.
/// Returns the traffic in its final state.
pub fn run_headless(
    dataset_path: impl AsRef<Path>,
    config: &TrafficConfig,
    ticks: usize,
    dt: f64,
    timer: &mut Timer,
) -> Result<(Traffic, RunStats)> {
    timer.start("load dataset");
    let dataset = CityDataset::load(dataset_path)?;
    timer.stop("load dataset");

    timer.start("build routes");
    let mut traffic = Traffic::new(&dataset, config);
    timer.stop("build routes");

    timer.start_iter("simulate", ticks);
    for _ in 0..ticks {
        timer.next();
        traffic.tick(dt);
    }

    let stats = RunStats {
        num_routes: traffic.routes().len(),
        num_vehicles: traffic.vehicles().len(),
        ticks,
        total_distance: traffic.distance_traveled(),
    };
    Ok((traffic, stats))
}
