use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Result;

use crate::CityScene;

/// Writes the scene as a Wavefront OBJ file, with one object per batch. Only positions, UVs, and
/// faces are written; there's no material library.
pub fn write_obj<P: AsRef<Path>>(scene: &CityScene, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs_err::create_dir_all(parent)?;
        }
    }
    let mut out = BufWriter::new(fs_err::File::create(path)?);
    write_obj_to(scene, &mut out)?;
    out.flush()?;
    info!("Wrote {}", path.display());
    Ok(())
}

pub fn write_obj_to<W: Write>(scene: &CityScene, out: &mut W) -> Result<()> {
    writeln!(out, "# citiverse scene")?;
    // OBJ indices are 1-based and global across objects
    let mut offset = 1;
    for (key, mesh) in scene.batches() {
        writeln!(out, "o {}", key)?;
        for pt in &mesh.positions {
            writeln!(out, "v {} {} {}", pt.x, pt.y, pt.z)?;
        }
        for uv in &mesh.uvs {
            writeln!(out, "vt {} {}", uv[0], uv[1])?;
        }
        for tri in mesh.indices.chunks_exact(3) {
            let (a, b, c) = (
                tri[0] as usize + offset,
                tri[1] as usize + offset,
                tri[2] as usize + offset,
            );
            writeln!(out, "f {}/{} {}/{} {}/{}", a, a, b, b, c, c)?;
        }
        offset += mesh.num_vertices();
    }
    Ok(())
}
