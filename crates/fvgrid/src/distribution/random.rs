//! Randomized cell widths with bounded ratios.
//!
//! Widths are expressed as factors of the uniform width `dx0 = (B - A) / N`.
//! Raw factors are drawn uniformly from `[width_low, width_high]` and then
//! projected onto the bounded simplex
//!
//! ```text
//! { x : width_low <= x_i <= width_high, sum(x) = N }
//! ```
//!
//! so that every width stays inside its bounds and the widths sum exactly to
//! the domain length.
//!
//! Raw factors come from ChaCha8 seeded with [`SeedableRng::seed_from_u64`].
//! That stream is fixed by `rand_chacha` across platforms and releases, so a
//! seed keeps producing the same mesh.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{trace, warn};

use super::{Distribution, check_inputs};
use crate::{error::Result, options::DistOptions};

/// Seed used when [`RandomOptions::seed`] is `None`.
pub const DEFAULT_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// Relative tolerance for the sum constraint.
const RESIDUAL_TOLERANCE: f64 = 1e-14;

/// Options for [`Random`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomOptions {
    /// Smallest permitted width as a multiple of `dx0`.
    pub width_low: f64,
    /// Largest permitted width as a multiple of `dx0`.
    pub width_high: f64,
    /// RNG seed. `None` uses [`DEFAULT_SEED`], so output is reproducible.
    pub seed: Option<u64>,
}

impl Default for RandomOptions {
    fn default() -> Self {
        Self {
            width_low: 0.5,
            width_high: 1.5,
            seed: None,
        }
    }
}

impl RandomOptions {
    /// Clamp the bounds into a feasible range.
    ///
    /// Negative lower bounds become zero, the upper bound is raised to the
    /// lower, and the pair is widened to contain 1 so that `N` factors can
    /// always sum to `N`.
    pub fn sanitized(self) -> Self {
        let mut low = self.width_low.max(0.0);
        let mut high = self.width_high.max(low);
        low = low.min(1.0);
        high = high.max(1.0);
        Self {
            width_low: low,
            width_high: high,
            seed: self.seed,
        }
    }

    /// Seed that will actually drive the generator.
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }
}

/// Randomized widths between `width_low * dx0` and `width_high * dx0`.
///
/// Reads a [`RandomOptions`] payload. A missing payload or one of another
/// type falls back to [`RandomOptions::default`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Random;

impl Random {
    /// Recover options from a type-erased payload.
    fn options(options: Option<&DistOptions>) -> RandomOptions {
        match options {
            None => RandomOptions::default(),
            Some(payload) => payload.get::<RandomOptions>().copied().unwrap_or_else(|| {
                warn!("random distribution ignored an options payload of another type");
                RandomOptions::default()
            }),
        }
    }

    /// The N cell widths for `[a, b]`.
    pub fn widths(n: usize, a: f64, b: f64, options: &RandomOptions) -> Result<Vec<f64>> {
        check_inputs(n, a, b)?;
        let opts = options.sanitized();
        let (low, high) = (opts.width_low, opts.width_high);
        let dx0 = (b - a) / n as f64;

        let weights = raw_weights(n, low, high, opts.effective_seed());
        let factors = project_bounded_simplex(&weights, low, high, n as f64);
        Ok(factors.into_iter().map(|x| dx0 * x).collect())
    }
}

/// `n` factors drawn uniformly from `[low, high)` by ChaCha8 seeded with
/// `seed`.
fn raw_weights(n: usize, low: f64, high: f64, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| low + (high - low) * rng.random::<f64>())
        .collect()
}

impl Distribution for Random {
    fn faces(&self, n: usize, a: f64, b: f64, options: Option<&DistOptions>) -> Result<Vec<f64>> {
        let widths = Self::widths(n, a, b, &Self::options(options))?;
        let mut faces = Vec::with_capacity(n + 1);
        let mut x = a;
        faces.push(x);
        for w in &widths {
            x += w;
            faces.push(x);
        }
        faces[n] = b;
        Ok(faces)
    }
}

/// Project `weights` onto `{ x : low <= x_i <= high, sum(x) = target }`.
///
/// Free entries are scaled proportionally to hit the remaining target; any
/// entry that leaves `[low, high]` is pinned to the violated bound and the
/// scale is recomputed for the rest. At most `weights.len()` passes are made.
/// A final residual correction absorbs rounding and any shortfall left by
/// pinning. When no weight is positive every entry becomes
/// `clamp(target / n, low, high)` before correction.
///
/// Requires `low <= target / n <= high` for the sum to be reachable.
pub fn project_bounded_simplex(weights: &[f64], low: f64, high: f64, target: f64) -> Vec<f64> {
    let n = weights.len();
    if n == 0 {
        return Vec::new();
    }

    let positive_sum: f64 = weights.iter().filter(|w| **w > 0.0).sum();
    if !(positive_sum > 0.0) {
        let mut x = vec![(target / n as f64).clamp(low, high); n];
        correct_residual(&mut x, target, low, high);
        return x;
    }

    // Non-positive weights would never scale into range.
    let mut current: Vec<f64> = weights
        .iter()
        .map(|&w| if w > 0.0 { w } else { f64::MIN_POSITIVE })
        .collect();
    let mut x = vec![0.0; n];
    let mut pinned = vec![false; n];
    let mut pinned_sum = 0.0;
    let mut free = n;

    for pass in 0..n {
        let free_sum: f64 = current
            .iter()
            .zip(&pinned)
            .filter(|(_, p)| !**p)
            .map(|(w, _)| *w)
            .sum();
        if free == 0 || !(free_sum > 0.0) {
            break;
        }

        let scale = (target - pinned_sum) / free_sum;
        let mut newly_pinned = 0;
        for i in 0..n {
            if pinned[i] {
                continue;
            }
            let v = current[i] * scale;
            if v < low {
                x[i] = low;
            } else if v > high {
                x[i] = high;
            } else {
                x[i] = v;
                continue;
            }
            pinned[i] = true;
            pinned_sum += x[i];
            free -= 1;
            newly_pinned += 1;
        }
        trace!(pass, newly_pinned, free, "bounded simplex projection pass");

        if newly_pinned == 0 {
            break;
        }
        for i in 0..n {
            if !pinned[i] {
                current[i] = x[i];
            }
        }
    }

    correct_residual(&mut x, target, low, high);
    x
}

/// Push `sum(x)` to `target` by moving entries toward their bounds.
///
/// A surplus is removed greedily from entries above `low`, a deficit is
/// added greedily to entries below `high`. Whatever rounding leaves behind is
/// applied to the single entry with the most slack.
fn correct_residual(x: &mut [f64], target: f64, low: f64, high: f64) {
    let tolerance = RESIDUAL_TOLERANCE * target.abs().max(1.0);
    let residual = target - x.iter().sum::<f64>();
    if residual.abs() <= tolerance {
        return;
    }

    let mut remaining = residual.abs();
    for v in x.iter_mut() {
        if remaining <= 0.0 {
            break;
        }
        let room = if residual > 0.0 { high - *v } else { *v - low };
        if room > 0.0 {
            let delta = room.min(remaining);
            *v += delta.copysign(residual);
            remaining -= delta;
        }
    }

    let residual = target - x.iter().sum::<f64>();
    if residual.abs() <= tolerance {
        return;
    }
    let slack = |v: f64| if residual > 0.0 { high - v } else { v - low };
    let best = x
        .iter()
        .enumerate()
        .max_by(|(_, p), (_, q)| slack(**p).total_cmp(&slack(**q)))
        .map(|(i, _)| i);
    if let Some(i) = best {
        let room = slack(x[i]);
        if room > 0.0 {
            x[i] += room.min(residual.abs()).copysign(residual);
        }
    }
}
