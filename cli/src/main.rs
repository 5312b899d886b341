//! The Citiverse multi-tool: builds city datasets from OpenStreetMap and exercises the render-time
//! pieces without a renderer.

#[macro_use]
extern crate log;

mod simulate_traffic;

use std::path::PathBuf;

use anyhow::Result;
use structopt::StructOpt;

use cityutil::Timer;

#[derive(StructOpt)]
#[structopt(name = "citiverse", about = "Tools for the Citiverse city-data pipeline")]
enum Command {
    /// Converts an Overpass JSON extract into a city dataset
    ConvertOsm {
        /// The path to Overpass JSON, requested with `out geom`
        #[structopt(long, default_value = convert_osm::DEFAULT_INPUT)]
        input: PathBuf,
        /// The path to write the dataset
        #[structopt(long, default_value = convert_osm::DEFAULT_OUTPUT)]
        output: PathBuf,
        /// The width and depth of the scene the bounds are projected into
        #[structopt(long, default_value = "30")]
        target_size: f64,
    },
    /// Spawns traffic on a dataset's major roads and runs it without rendering
    SimulateTraffic {
        /// The path to a city dataset
        #[structopt(long)]
        dataset: PathBuf,
        /// A seed for generating random numbers
        #[structopt(long, default_value = "42")]
        seed: u64,
        /// How many steps to simulate
        #[structopt(long, default_value = "600")]
        ticks: usize,
        /// Seconds per step
        #[structopt(long, default_value = "0.016")]
        dt: f64,
        /// Spawn at most this many vehicles
        #[structopt(long, default_value = "40")]
        max_vehicles: usize,
        /// Write the final vehicle poses as JSON here
        #[structopt(long)]
        poses_output: Option<PathBuf>,
    },
    /// Builds road and building meshes for a dataset and writes them as a Wavefront OBJ file
    ExportObj {
        /// The path to a city dataset
        #[structopt(long)]
        dataset: PathBuf,
        /// The .obj file to write
        #[structopt(long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    cityutil::logger::setup();

    match Command::from_args() {
        Command::ConvertOsm {
            input,
            output,
            target_size,
        } => convert(input, output, target_size)?,
        Command::SimulateTraffic {
            dataset,
            seed,
            ticks,
            dt,
            max_vehicles,
            poses_output,
        } => simulate_traffic::run(dataset, seed, ticks, dt, max_vehicles, poses_output)?,
        Command::ExportObj { dataset, output } => export_obj(dataset, output)?,
    }
    Ok(())
}

fn convert(input: PathBuf, output: PathBuf, target_size: f64) -> Result<()> {
    if !input.exists() {
        error!("Input file not found: {}", input.display());
        std::process::exit(1);
    }
    let mut timer = Timer::new("convert OSM");
    convert_osm::convert_file(
        &input,
        &output,
        &convert_osm::Options { target_size },
        &mut timer,
    )?;
    timer.done();
    Ok(())
}

fn export_obj(dataset: PathBuf, output: PathBuf) -> Result<()> {
    let mut timer = Timer::new("export OBJ");
    timer.start("load dataset");
    let dataset = city_model::CityDataset::load(dataset)?;
    timer.stop("load dataset");

    let scene = map_render::CityScene::new(
        &dataset,
        &map_render::RenderOptions::default(),
        &mut timer,
    );
    let stats = scene.stats();
    info!(
        "{} roads and {} buildings meshed; skipped {} roads and {} buildings",
        stats.roads, stats.buildings, stats.skipped_roads, stats.skipped_buildings
    );

    timer.start("write OBJ");
    map_render::write_obj(&scene, &output)?;
    timer.stop("write OBJ");
    timer.done();
    Ok(())
}
