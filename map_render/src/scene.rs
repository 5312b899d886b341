use std::fmt;

use city_model::{CityDataset, RoadType};
use cityutil::{prettyprint_usize, Timer};
use geom::{extrude_footprint, ribbon_mesh, Mesh, RIBBON_V_SCALE};

use crate::ResourceCache;

/// Knobs for turning a dataset into meshes.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Roads float slightly above the ground plane to avoid z-fighting
    pub road_elevation: f64,
    /// Texture repeats per unit of road length
    pub road_v_scale: f64,
}

impl Default for RenderOptions {
    fn default() -> RenderOptions {
        RenderOptions {
            road_elevation: 0.02,
            road_v_scale: RIBBON_V_SCALE,
        }
    }
}

/// Everything sharing one material is merged into one mesh.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum BatchKey {
    Road(RoadType),
    /// By hex color
    Building(String),
}

impl fmt::Display for BatchKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BatchKey::Road(rt) => write!(f, "road_{}", rt),
            BatchKey::Building(color) => write!(f, "building_{}", color.trim_start_matches('#')),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneStats {
    pub batches: usize,
    pub vertices: usize,
    pub triangles: usize,
    pub roads: usize,
    pub buildings: usize,
    pub skipped_roads: usize,
    pub skipped_buildings: usize,
}

/// Static geometry of a city: a flat ribbon for every road and a prism for every building,
/// grouped into batches.
pub struct CityScene {
    batches: ResourceCache<BatchKey, Mesh>,
    stats: SceneStats,
}

impl CityScene {
    pub fn new(dataset: &CityDataset, opts: &RenderOptions, timer: &mut Timer) -> CityScene {
        let mut batches = ResourceCache::new();
        let mut stats = SceneStats::default();

        timer.start_iter("build road ribbons", dataset.roads.len());
        for road in &dataset.roads {
            timer.next();
            match ribbon_mesh(
                &road.points,
                road.width,
                opts.road_elevation,
                opts.road_v_scale,
            ) {
                Some(mesh) => {
                    batches
                        .get_or_insert_with(BatchKey::Road(road.road_type), Mesh::new)
                        .append(mesh);
                    stats.roads += 1;
                }
                None => {
                    warn!("Road {} has too few points for a ribbon", road.id);
                    stats.skipped_roads += 1;
                }
            }
        }

        timer.start_iter("extrude buildings", dataset.buildings.len());
        for b in &dataset.buildings {
            timer.next();
            match extrude_footprint(&b.footprint, b.min_height, b.height) {
                Some(mesh) => {
                    batches
                        .get_or_insert_with(BatchKey::Building(b.color.clone()), Mesh::new)
                        .append(mesh);
                    stats.buildings += 1;
                }
                None => {
                    warn!("Couldn't extrude building {}", b.id);
                    stats.skipped_buildings += 1;
                }
            }
        }

        stats.batches = batches.len();
        for (_, mesh) in batches.iter() {
            stats.vertices += mesh.num_vertices();
            stats.triangles += mesh.num_triangles();
        }
        info!(
            "Scene has {} batches, {} vertices, {} triangles",
            prettyprint_usize(stats.batches),
            prettyprint_usize(stats.vertices),
            prettyprint_usize(stats.triangles)
        );

        CityScene { batches, stats }
    }

    pub fn batches(&self) -> impl Iterator<Item = (&BatchKey, &Mesh)> {
        self.batches.iter()
    }

    pub fn batch(&self, key: &BatchKey) -> Option<&Mesh> {
        self.batches.get(key)
    }

    pub fn stats(&self) -> &SceneStats {
        &self.stats
    }
}
