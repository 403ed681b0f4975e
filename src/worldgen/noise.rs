//! # Noise Field
//!
//! Seeded 2-D gradient noise, the building block under the terrain height
//! field. The construction is the classic one: a 256-entry permutation table
//! shuffled by the seed and duplicated to 512 entries so lattice hashing
//! never needs a bounds check, a quintic ease curve for interpolation, and
//! hashed pseudo-gradients at each lattice corner.
//!
//! A `NoiseField` holds no mutable state after construction, so chunk
//! generation tasks on every worker thread sample the same field through a
//! shared reference without any locking.

/// Deterministic, seeded 2-D coherent noise.
///
/// Values are continuous in both arguments and stay in approximately
/// `[-1, 1]`. Two fields built from the same seed return bit-identical
/// results for identical inputs.
pub struct NoiseField {
    /// Seed-shuffled permutation of `0..=255`, duplicated to 512 entries.
    perm: [u8; 512],
}

impl NoiseField {
    /// Builds the permutation table for the given seed.
    ///
    /// # Arguments
    /// * `seed` - Seed for the table shuffle; equal seeds produce equal
    ///   fields.
    pub fn new(seed: u64) -> Self {
        let mut table = [0u8; 256];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = i as u8;
        }

        let mut rng = fastrand::Rng::with_seed(seed);
        rng.shuffle(&mut table);

        let mut perm = [0u8; 512];
        perm[..256].copy_from_slice(&table);
        perm[256..].copy_from_slice(&table);

        NoiseField { perm }
    }

    /// Samples the field at a 2-D point.
    ///
    /// # Arguments
    /// * `x`, `y` - Sample position; any finite values, including negative.
    ///
    /// # Returns
    /// A smoothly varying value in approximately `[-1, 1]`.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let x_floor = x.floor();
        let y_floor = y.floor();

        // Lattice cell and position within it. The i64 mask keeps negative
        // coordinates inside the table.
        let xi = (x_floor as i64 & 255) as usize;
        let yi = (y_floor as i64 & 255) as usize;
        let dx = x - x_floor;
        let dy = y - y_floor;

        let u = fade(dx);
        let v = fade(dy);

        let row0 = self.perm[xi] as usize + yi;
        let row1 = self.perm[xi + 1] as usize + yi;

        let n00 = grad(self.perm[row0], dx, dy);
        let n10 = grad(self.perm[row1], dx - 1.0, dy);
        let n01 = grad(self.perm[row0 + 1], dx, dy - 1.0);
        let n11 = grad(self.perm[row1 + 1], dx - 1.0, dy - 1.0);

        lerp(v, lerp(u, n00, n10), lerp(u, n01, n11))
    }
}

/// Quintic ease curve `6t⁵ - 15t⁴ + 10t³`, zero first and second derivative
/// at both ends of the cell.
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Dot product of the displacement with one of eight hashed gradient
/// directions.
fn grad(hash: u8, x: f64, y: f64) -> f64 {
    match hash & 7 {
        0 => x + y,
        1 => -x + y,
        2 => x - y,
        3 => -x - y,
        4 => x,
        5 => -x,
        6 => y,
        _ => -y,
    }
}
