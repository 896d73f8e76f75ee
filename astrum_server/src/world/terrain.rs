//! Noise-backed surface heights for the dimensions this server hosts
//!
//! Real terrain lives with the host's chunk pipeline; this oracle gives every
//! dimension a deterministic surface so spawn validation has something to
//! stand on.

use astrum_core::{id::NamespacedId, world::SurfaceOracle};
use noise::{NoiseFn, Perlin};

const HORIZONTAL_SCALE: f64 = 1.0 / 128.0;

/// A surface whose height at each column comes from seeded Perlin noise
pub struct NoiseSurface {
    noise: Perlin,
    base_height: i32,
    amplitude: f64,
}

impl NoiseSurface {
    /// A surface around `base_height`, varying by up to +/- `amplitude`
    pub fn new(seed: u32, base_height: i32, amplitude: f64) -> Self {
        Self {
            noise: Perlin::new(seed),
            base_height,
            amplitude,
        }
    }

    /// A surface seeded deterministically from a terrain reference, so the
    /// same noise-settings id always produces the same heights.
    pub fn seeded_from(terrain: &NamespacedId, base_height: i32, amplitude: f64) -> Self {
        Self::new(fnv1a(&terrain.to_string()), base_height, amplitude)
    }
}

impl SurfaceOracle for NoiseSurface {
    fn ensure_loaded(&self, _x: i32, _z: i32) {
        // Heights are a pure function of position; nothing to load
    }

    fn top_solid_y(&self, x: i32, z: i32) -> i32 {
        let sample = self
            .noise
            .get([x as f64 * HORIZONTAL_SCALE, z as f64 * HORIZONTAL_SCALE]);

        self.base_height + (sample * self.amplitude) as i32
    }
}

fn fnv1a(s: &str) -> u32 {
    let mut hash: u32 = 0x811c9dc5;
    for byte in s.bytes() {
        hash ^= byte as u32;
        hash = hash.wrapping_mul(0x01000193);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_terrain_reference_gives_same_heights() {
        let a = NoiseSurface::seeded_from(&NamespacedId::astrum("mars"), 64, 24.0);
        let b = NoiseSurface::seeded_from(&NamespacedId::astrum("mars"), 64, 24.0);

        for (x, z) in [(0, 0), (100, -250), (-8192, 4096)] {
            assert_eq!(a.top_solid_y(x, z), b.top_solid_y(x, z));
        }
    }

    #[test]
    fn heights_stay_within_amplitude() {
        let surface = NoiseSurface::seeded_from(&NamespacedId::astrum("moon"), 64, 24.0);

        for x in -64..64 {
            let y = surface.top_solid_y(x * 37, x * -13);
            assert!(y >= 64 - 24 && y <= 64 + 24, "height {y} out of range");
        }
    }
}
