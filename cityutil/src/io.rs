use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub fn to_json<T: Serialize>(obj: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(obj)?)
}

/// Writes the object as pretty JSON. The file is first written next to the destination and then
/// renamed over it, so readers never observe a partially written document.
pub fn write_json<T: Serialize>(path: impl AsRef<Path>, obj: &T) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs_err::create_dir_all(parent)?;
        }
    }

    let contents = to_json(obj)?;
    let tmp = tmp_path(path);
    fs_err::write(&tmp, contents)?;
    if let Err(err) = fs_err::rename(&tmp, path) {
        // Don't leave the half-finished sibling around
        let _ = fs_err::remove_file(&tmp);
        return Err(err.into());
    }
    debug!("Wrote {}", path.display());
    Ok(())
}

pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let contents = fs_err::read_to_string(path)?;
    serde_json::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Thing {
        name: String,
        values: Vec<f64>,
    }

    fn temp_dir(label: &str) -> PathBuf {
        let mut dir = std::env::temp_dir();
        dir.push(format!("cityutil_io_{}_{}", label, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn write_then_read() {
        let dir = temp_dir("write");
        let path = dir.join("nested").join("thing.json");
        let thing = Thing {
            name: "road".to_string(),
            values: vec![1.5, -2.0],
        };
        write_json(&path, &thing).unwrap();
        assert!(!tmp_path(&path).exists());

        let back: Thing = read_json(&path).unwrap();
        assert_eq!(back, thing);
    }

    #[test]
    fn floats_survive_exactly() {
        let dir = temp_dir("floats");
        let path = dir.join("floats.json");
        let thing = Thing {
            name: "center".to_string(),
            values: vec![126.98, 37.57, 0.1 + 0.2, 1e-7, 12345.6789],
        };
        write_json(&path, &thing).unwrap();
        let back: Thing = read_json(&path).unwrap();
        for (a, b) in thing.values.iter().zip(&back.values) {
            assert_eq!(a.to_bits(), b.to_bits(), "{} came back as {}", a, b);
        }
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn read_errors_mention_path() {
        let dir = temp_dir("missing");
        let path = dir.join("nope.json");
        let err = read_json::<Thing>(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("nope.json"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let dir = temp_dir("malformed");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(read_json::<Thing>(&path).is_err());
    }
}
