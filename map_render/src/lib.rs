//! Turns a `CityDataset` into static meshes ready for a renderer: road ribbons and building
//! prisms, batched by material. The scene can also be exported as a Wavefront OBJ file.

#[macro_use]
extern crate log;

mod cache;
mod obj;
mod scene;

pub use crate::cache::ResourceCache;
pub use crate::obj::{write_obj, write_obj_to};
pub use crate::scene::{BatchKey, CityScene, RenderOptions, SceneStats};
