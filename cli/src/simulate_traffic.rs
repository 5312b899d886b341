use std::path::PathBuf;

use anyhow::Result;

use cityutil::Timer;
use sim::TrafficConfig;

pub fn run(
    dataset: PathBuf,
    seed: u64,
    ticks: usize,
    dt: f64,
    max_vehicles: usize,
    poses_output: Option<PathBuf>,
) -> Result<()> {
    let config = TrafficConfig {
        rng_seed: seed,
        max_vehicles,
        ..Default::default()
    };
    let mut timer = Timer::new("simulate traffic");
    let (traffic, stats) = sim::run_headless(dataset, &config, ticks, dt, &mut timer)?;
    timer.done();

    let poses = traffic.poses();
    for (vehicle, pose) in traffic.vehicles().iter().zip(&poses) {
        let route = &traffic.routes()[vehicle.route];
        info!(
            "Vehicle on {} road {}: {:.2} of {:.2} along, at {}, facing {}",
            route.road_type,
            route.road_id,
            vehicle.distance,
            route.length(),
            pose.position,
            pose.forward
        );
    }
    info!(
        "{} vehicles on {} routes covered {:.1} units over {} ticks",
        stats.num_vehicles, stats.num_routes, stats.total_distance, stats.ticks
    );

    if let Some(path) = poses_output {
        cityutil::write_json(&path, &poses)?;
        info!("Wrote poses to {}", path.display());
    }
    Ok(())
}
