//! Evenly spaced cells.

use super::{Distribution, check_inputs};
use crate::{error::Result, options::DistOptions};

/// Cells of identical width `(B - A) / N`. Options are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uniform;

impl Distribution for Uniform {
    fn faces(&self, n: usize, a: f64, b: f64, _options: Option<&DistOptions>) -> Result<Vec<f64>> {
        check_inputs(n, a, b)?;
        let dx = (b - a) / n as f64;
        let mut faces: Vec<f64> = (0..=n).map(|i| a + i as f64 * dx).collect();
        // Pin the last face so rounding in `i * dx` never moves the boundary.
        faces[n] = b;
        Ok(faces)
    }

    fn centers(
        &self,
        n: usize,
        a: f64,
        b: f64,
        _options: Option<&DistOptions>,
    ) -> Result<Vec<f64>> {
        check_inputs(n, a, b)?;
        let dx = (b - a) / n as f64;
        Ok((0..n).map(|i| a + (i as f64 + 0.5) * dx).collect())
    }
}
