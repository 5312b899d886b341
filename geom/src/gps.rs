use std::fmt;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::ProjectedPoint;

// longitude is x, latitude is y
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct LonLat {
    pub longitude: f64,
    pub latitude: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> LonLat {
        LonLat {
            longitude: lon,
            latitude: lat,
        }
    }

    pub fn x(&self) -> f64 {
        self.longitude
    }

    pub fn y(&self) -> f64 {
        self.latitude
    }
}

impl fmt::Display for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LonLat({0}, {1})", self.longitude, self.latitude)
    }
}

/// The geographic extent of a dataset, in degrees. Also defines the local projection: the center
/// of these bounds maps to the origin, and the full span maps to `target_size` units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl GeoBounds {
    /// Computes the bounds covering every point. Fails if there are no points, or if they don't
    /// span a nonzero range of both latitude and longitude -- the projection would divide by
    /// zero.
    pub fn from_points<I: IntoIterator<Item = LonLat>>(pts: I) -> Result<GeoBounds> {
        let mut b = GeoBounds {
            north: f64::MIN,
            south: f64::MAX,
            east: f64::MIN,
            west: f64::MAX,
        };
        let mut count = 0;
        for pt in pts {
            b.update(pt);
            count += 1;
        }
        if count == 0 {
            bail!("can't compute bounds of zero points");
        }
        if !(b.north > b.south) || !(b.east > b.west) {
            bail!(
                "degenerate bounds from {} points: lat [{}, {}], lon [{}, {}]",
                count,
                b.south,
                b.north,
                b.west,
                b.east
            );
        }
        Ok(b)
    }

    fn update(&mut self, pt: LonLat) {
        self.west = self.west.min(pt.longitude);
        self.east = self.east.max(pt.longitude);
        self.south = self.south.min(pt.latitude);
        self.north = self.north.max(pt.latitude);
    }

    pub fn contains(&self, pt: LonLat) -> bool {
        pt.longitude >= self.west
            && pt.longitude <= self.east
            && pt.latitude >= self.south
            && pt.latitude <= self.north
    }

    pub fn center(&self) -> LonLat {
        LonLat::new(
            (self.east + self.west) / 2.0,
            (self.north + self.south) / 2.0,
        )
    }

    pub fn span_lat(&self) -> f64 {
        self.north - self.south
    }

    pub fn span_lon(&self) -> f64 {
        self.east - self.west
    }

    pub fn get_corners(&self) -> Vec<LonLat> {
        vec![
            LonLat::new(self.west, self.south),
            LonLat::new(self.east, self.south),
            LonLat::new(self.east, self.north),
            LonLat::new(self.west, self.north),
        ]
    }

    /// Maps a GPS point into the local frame. Increasing latitude decreases Z, so north is up on
    /// screen. Points outside the bounds are projected anyway, past +/- `target_size / 2`.
    pub fn project(&self, pt: LonLat, target_size: f64) -> ProjectedPoint {
        let center = self.center();
        let x = ((pt.longitude - center.longitude) / self.span_lon()) * target_size;
        let z = ((pt.latitude - center.latitude) / self.span_lat()) * -target_size;
        ProjectedPoint::new(x, z)
    }

    pub fn project_all(&self, pts: &[LonLat], target_size: f64) -> Vec<ProjectedPoint> {
        pts.iter().map(|pt| self.project(*pt, target_size)).collect()
    }
}
