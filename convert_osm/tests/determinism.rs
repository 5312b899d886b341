use std::path::PathBuf;

use city_model::CityDataset;
use cityutil::Timer;

fn sample_input() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../data/input/sample_osm.json")
}

fn scratch_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("convert_osm_{}_{}", label, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn convert_twice() {
    let opts = convert_osm::Options::default();
    let doc = convert_osm::Document::load(&sample_input()).unwrap();
    let mut map1 = convert_osm::convert(&doc, &opts, &mut Timer::new("convert city")).unwrap();
    let mut map2 = convert_osm::convert(&doc, &opts, &mut Timer::new("convert city")).unwrap();

    // Only the timestamp may differ
    map1.meta.generated_at = String::new();
    map2.meta.generated_at = String::new();
    if map1 != map2 {
        let dir = scratch_dir("determinism");
        map1.save(dir.join("map1.json")).unwrap();
        map2.save(dir.join("map2.json")).unwrap();
        panic!("map1.json and map2.json in {} differ", dir.display());
    }
}

#[test]
fn sample_contents() {
    let doc = convert_osm::Document::load(&sample_input()).unwrap();
    let dataset = convert_osm::convert(
        &doc,
        &convert_osm::Options::default(),
        &mut Timer::throwaway(),
    )
    .unwrap();

    // The footway isn't a road; the shed is a sliver
    assert_eq!(dataset.roads.len(), 6);
    assert_eq!(dataset.buildings.len(), 7);

    let half = dataset.size / 2.0;
    for road in &dataset.roads {
        assert!(road.points.len() >= 2);
        assert_eq!(road.width, road.road_type.half_width());
        for pt in &road.points {
            assert!(pt.x.abs() <= half && pt.z.abs() <= half);
        }
    }
    for b in &dataset.buildings {
        assert!(b.footprint.len() >= 3);
        assert_ne!(b.footprint[0], b.footprint[b.footprint.len() - 1]);
        assert!(b.area() >= 0.02);
        assert!(b.min_height >= 0.0);
        assert!(b.height >= b.min_height + 0.8 - 1e-9);
        assert!(b.height <= 24.0);
        assert!(convert_osm::PALETTE.contains(&b.color.as_str()));
    }
}

#[test]
fn written_atomically_and_loadable() {
    let dir = scratch_dir("roundtrip");
    let output = dir.join("city.json");
    let written = convert_osm::convert_file(
        &sample_input(),
        &output,
        &convert_osm::Options::default(),
        &mut Timer::throwaway(),
    )
    .unwrap();
    assert!(!dir.join("city.json.tmp").exists());

    let loaded = CityDataset::load(&output).unwrap();
    assert_eq!(written, loaded);

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert!(raw["meta"]["generatedAt"].as_str().unwrap().ends_with('Z'));
    assert!(raw["buildings"][0].get("minHeight").is_some());
}

#[test]
fn missing_input_writes_nothing() {
    let dir = scratch_dir("missing");
    let output = dir.join("city.json");
    let err = convert_osm::convert_file(
        &dir.join("nope.json"),
        &output,
        &convert_osm::Options::default(),
        &mut Timer::throwaway(),
    )
    .unwrap_err();
    assert!(format!("{:#}", err).contains("nope.json"));
    assert!(!output.exists());
}
