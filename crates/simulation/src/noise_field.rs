//! Seeded 2D gradient noise.
//!
//! The permutation table is not a shuffled Perlin table: each of the 256 base
//! entries is `floor(|sin(seed + i)| * 256)`, and the table is duplicated to
//! 512 entries so lattice lookups never need to wrap. Keeping this exact
//! construction makes terrain bit-compatible for a given seed.
//!
//! Sampling is classic improved gradient noise with the third coordinate
//! pinned to zero. The z lattice hash and z gradient term are still evaluated
//! (they collapse to constants), which is what makes the output match the
//! three-dimensional formulation at `z = 0`.

const TABLE_SIZE: usize = 256;

#[derive(Clone)]
pub struct NoiseField {
    seed: f64,
    perm: [u8; TABLE_SIZE * 2],
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField")
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

impl NoiseField {
    pub fn new(seed: f64) -> Self {
        let mut perm = [0u8; TABLE_SIZE * 2];
        for i in 0..TABLE_SIZE {
            let v = ((seed + i as f64).sin().abs() * 256.0).floor();
            // |sin| < 1 for every finite argument, so v is in 0..=255;
            // the clamp only matters for a non-finite seed.
            let v = if v.is_finite() { v.clamp(0.0, 255.0) } else { 0.0 } as u8;
            perm[i] = v;
            perm[i + TABLE_SIZE] = v;
        }
        Self { seed, perm }
    }

    pub fn seed(&self) -> f64 {
        self.seed
    }

    /// Sample the field. Output is roughly in `[-1, 1]` and exactly zero on
    /// integer lattice points.
    #[inline]
    pub fn sample2d(&self, x: f64, z: f64) -> f64 {
        let fx = x.floor();
        let fz = z.floor();
        // `as i64` saturates for huge or non-finite input, so the mask keeps
        // every index in range.
        let xi = (fx as i64 & 255) as usize;
        let zi = (fz as i64 & 255) as usize;
        let x = x - fx;
        let z = z - fz;
        let u = fade(x);
        let v = fade(z);

        let p = &self.perm;
        let a = p[xi] as usize + zi;
        let aa = p[a] as usize;
        let ab = p[a + 1] as usize;
        let b = p[xi + 1] as usize + zi;
        let ba = p[b] as usize;
        let bb = p[b + 1] as usize;

        lerp(
            v,
            lerp(u, grad(p[aa], x, z, 0.0), grad(p[ba], x - 1.0, z, 0.0)),
            lerp(
                u,
                grad(p[ab], x, z - 1.0, 0.0),
                grad(p[bb], x - 1.0, z - 1.0, 0.0),
            ),
        )
    }
}

/// Quintic fade `6t^5 - 15t^4 + 10t^3`.
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

#[inline]
fn grad(hash: u8, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    let u = if h & 1 == 0 { u } else { -u };
    let v = if h & 2 == 0 { v } else { -v };
    u + v
}
