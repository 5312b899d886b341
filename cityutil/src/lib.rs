//! Small helpers shared by every crate in the workspace: logging setup, JSON I/O, OSM tags,
//! deterministic per-feature randomness, and a phase timer.

#[macro_use]
extern crate log;

mod io;
pub mod logger;
mod random;
mod tags;
mod time;

pub use crate::io::{read_json, to_json, write_json};
pub use crate::random::pseudo_random_from_id;
pub use crate::tags::{parse_leading_f64, Tags};
pub use crate::time::{prettyprint_usize, Timer};
