use crate::config::{
    BASE_AMPLITUDE, BASE_FREQUENCY, OCTAVE_AMPLITUDE_DIVISORS, OCTAVE_FREQUENCIES,
    VALLEY_FLATTENING,
};
use crate::noise_field::NoiseField;

/// Elevation as a pure function of world `(x, z)`.
///
/// Chunk meshing, flora placement and flock probing all call the same
/// instance, so the ground birds avoid is exactly the ground that is drawn.
#[derive(Debug, Clone)]
pub struct TerrainHeightmap {
    noise: NoiseField,
}

impl TerrainHeightmap {
    pub fn new(seed: f64) -> Self {
        Self {
            noise: NoiseField::new(seed),
        }
    }

    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    /// Four octaves at `F, 2.5F, 6F, 15F` with amplitudes `A, A/4, A/10, A/30`.
    /// Negative sums are scaled by 0.6 so basins are shallower than peaks are tall.
    #[inline]
    pub fn height(&self, x: f64, z: f64) -> f64 {
        let mut h = 0.0;
        for (freq_mul, amp_div) in OCTAVE_FREQUENCIES.iter().zip(OCTAVE_AMPLITUDE_DIVISORS) {
            let f = BASE_FREQUENCY * freq_mul;
            h += self.noise.sample2d(x * f, z * f) * (BASE_AMPLITUDE / amp_div);
        }
        if h < 0.0 {
            h *= VALLEY_FLATTENING;
        }
        h
    }
}
