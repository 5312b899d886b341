use std::path::PathBuf;

use pretty_assertions::assert_eq;

use cityutil::Timer;
use sim::{Traffic, TrafficConfig};

/// Converts the sample OSM extract and saves it somewhere temporary.
fn sample_dataset(label: &str) -> PathBuf {
    let input = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../data/input/sample_osm.json");
    let output = std::env::temp_dir()
        .join(format!("sim_{}_{}", label, std::process::id()))
        .join("city.json");
    convert_osm::convert_file(
        &input,
        &output,
        &convert_osm::Options::default(),
        &mut Timer::throwaway(),
    )
    .unwrap();
    output
}

#[test]
fn headless_run() {
    let path = sample_dataset("headless");
    let config = TrafficConfig::default();
    let (traffic, stats) =
        sim::run_headless(&path, &config, 600, 0.016, &mut Timer::throwaway()).unwrap();

    // Motorway, primary, secondary, and tertiary have at least 3 points
    assert_eq!(stats.num_routes, 4);
    assert_eq!(stats.num_vehicles, 8);
    assert_eq!(stats.ticks, 600);
    assert!(stats.total_distance > 8.0 * 1.5 * 9.0);

    let half = 15.0 + 1.0;
    for (v, pose) in traffic.vehicles().iter().zip(traffic.poses()) {
        let route = &traffic.routes()[v.route];
        assert!(v.distance >= 0.0 && v.distance < route.length());
        assert!((pose.forward.length() - 1.0).abs() < 1e-6);
        assert!(pose.forward.dot(pose.right).abs() < 1e-6);
        assert!(pose.position.x.abs() < half && pose.position.z.abs() < half);
    }
}

#[test]
fn runs_are_reproducible() {
    let path = sample_dataset("repro");
    let dataset = city_model::CityDataset::load(&path).unwrap();
    let config = TrafficConfig::default();

    let mut t1 = Traffic::new(&dataset, &config);
    let mut t2 = Traffic::new(&dataset, &config);
    for _ in 0..100 {
        t1.tick(0.016);
        t2.tick(0.016);
    }
    assert_eq!(t1.vehicles(), t2.vehicles());
    assert_eq!(t1.poses(), t2.poses());
}

#[test]
fn missing_dataset() {
    assert!(sim::run_headless(
        "/no/such/city.json",
        &TrafficConfig::default(),
        10,
        0.016,
        &mut Timer::throwaway()
    )
    .is_err());
}
