use std::fmt::Display;

const ACC_MODULUS: u64 = 1_000_000_000;

/// Derives a repeatable value in [0, 1) from a feature's stable identifier. Used to fill in
/// missing attributes (height, color) without making regenerated datasets differ. This is not a
/// hash in any collision-resistant sense.
///
/// The identifier is rendered as a string and its UTF-16 code units are folded into an
/// accumulator, which is then pushed through `sin`. Results rely on the platform's `f64::sin`,
/// so the last bits may drift between libm implementations.
pub fn pseudo_random_from_id<I: Display>(id: I) -> f64 {
    let mut acc: u64 = 0;
    for (idx, code) in id.to_string().encode_utf16().enumerate() {
        acc = (acc + u64::from(code) * (idx as u64 + 1)) % ACC_MODULUS;
    }
    let x = (acc as f64).sin() * 10000.0;
    let frac = x - x.floor();
    // x - floor(x) can round up to exactly 1.0 for tiny negative x
    if frac >= 1.0 {
        0.0
    } else {
        frac
    }
}
