//! Default procedural materials.
//!
//! Nodes with no material function still need plausible shading, so leaves
//! synthesize a "base sample" from their name: the name hashes to a seed, the
//! seed drives a deterministic generator, and the drawn values become the
//! node's color and surface attributes. The seed is a function of the name
//! only, so the same name yields the same material in every process and run.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::SdfSample;

/// Stable seed for a node name.
pub fn name_seed(name: &str) -> u64 {
    crc32fast::hash(name.as_bytes()) as u64
}

/// Deterministic base sample for a node name.
///
/// Color channels land in [0.5, 1.0] so leaves stay readable against dark
/// backgrounds; metallic is halved because fully metallic defaults render
/// too dark. The distance field is left at zero for the caller to fill in.
pub fn base_sample(name: &str) -> SdfSample {
    let mut rng = StdRng::seed_from_u64(name_seed(name));
    SdfSample {
        distance: 0.0,
        color: Vec3::new(
            rng.gen::<f32>() * 0.5 + 0.5,
            rng.gen::<f32>() * 0.5 + 0.5,
            rng.gen::<f32>() * 0.5 + 0.5,
        ),
        roughness: rng.gen::<f32>(),
        metallic: rng.gen::<f32>() * 0.5,
        occlusion: rng.gen::<f32>(),
    }
}
