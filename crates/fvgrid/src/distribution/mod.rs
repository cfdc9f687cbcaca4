//! Spacing distributions and the generator-pair abstraction the registry
//! stores.
//!
//! A distribution is anything that can produce either the N+1 faces or the N
//! centers of a grid over `[A, B]`. Implement [`Distribution`] for a type and
//! wrap it with [`DistributionEntry::from_distribution`], or pair two closures
//! with [`DistributionEntry::new`].

use std::{fmt, sync::Arc};

use crate::{
    error::{GridError, Result},
    options::DistOptions,
    registry::DistributionRegistry,
    tags::{BUILTIN_DISTRIBUTIONS, DistributionTag},
};

/// Randomized widths with bounded ratios.
pub mod random;
/// Evenly spaced cells.
pub mod uniform;

pub use random::{Random, RandomOptions};
pub use uniform::Uniform;

/// Signature shared by face and center generators: `(N, A, B, options)`.
pub type GenFn =
    Arc<dyn Fn(usize, f64, f64, Option<&DistOptions>) -> Result<Vec<f64>> + Send + Sync>;

/// A strategy for placing the cells of a 1D grid.
pub trait Distribution: Send + Sync {
    /// Produce the `n + 1` face coordinates spanning `[a, b]`.
    fn faces(&self, n: usize, a: f64, b: f64, options: Option<&DistOptions>) -> Result<Vec<f64>>;

    /// Produce the `n` cell-center coordinates inside `[a, b]`.
    ///
    /// Defaults to the midpoints of [`Distribution::faces`].
    fn centers(
        &self,
        n: usize,
        a: f64,
        b: f64,
        options: Option<&DistOptions>,
    ) -> Result<Vec<f64>> {
        let faces = self.faces(n, a, b, options)?;
        Ok(faces.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect())
    }
}

/// A registered pair of generators.
#[derive(Clone)]
pub struct DistributionEntry {
    /// Face generator.
    faces: GenFn,
    /// Center generator.
    centers: GenFn,
}

impl DistributionEntry {
    /// Pair a face generator with a center generator.
    pub fn new<F, C>(faces: F, centers: C) -> Self
    where
        F: Fn(usize, f64, f64, Option<&DistOptions>) -> Result<Vec<f64>> + Send + Sync + 'static,
        C: Fn(usize, f64, f64, Option<&DistOptions>) -> Result<Vec<f64>> + Send + Sync + 'static,
    {
        Self {
            faces: Arc::new(faces),
            centers: Arc::new(centers),
        }
    }

    /// Build an entry whose generators delegate to `dist`.
    pub fn from_distribution<D: Distribution + 'static>(dist: D) -> Self {
        let dist = Arc::new(dist);
        let for_centers = Arc::clone(&dist);
        Self::new(
            move |n, a, b, options| dist.faces(n, a, b, options),
            move |n, a, b, options| for_centers.centers(n, a, b, options),
        )
    }

    /// Run the face generator.
    pub fn faces(
        &self,
        n: usize,
        a: f64,
        b: f64,
        options: Option<&DistOptions>,
    ) -> Result<Vec<f64>> {
        (self.faces)(n, a, b, options)
    }

    /// Run the center generator.
    pub fn centers(
        &self,
        n: usize,
        a: f64,
        b: f64,
        options: Option<&DistOptions>,
    ) -> Result<Vec<f64>> {
        (self.centers)(n, a, b, options)
    }
}

impl fmt::Debug for DistributionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DistributionEntry").finish_non_exhaustive()
    }
}

/// Reject an empty grid or a domain whose upper bound does not exceed the
/// lower bound. NaN bounds fail the domain check.
pub fn check_inputs(n: usize, a: f64, b: f64) -> Result<()> {
    if n == 0 {
        return Err(GridError::InvalidCellCount { count: n });
    }
    if !(b > a) {
        return Err(GridError::InvalidDomain { lower: a, upper: b });
    }
    Ok(())
}

/// The entry implementing a built-in tag, or `None` for other tags.
fn builtin_entry(tag: DistributionTag) -> Option<DistributionEntry> {
    match tag {
        DistributionTag::UNIFORM => Some(DistributionEntry::from_distribution(Uniform)),
        DistributionTag::RANDOM => Some(DistributionEntry::from_distribution(Random)),
        _ => None,
    }
}

/// Register every built-in distribution under its canonical name and tag.
///
/// Registration is explicit: nothing is installed until the host calls this
/// (or uses [`DistributionRegistry::with_builtins`]). Calling it again
/// overwrites the built-in entries.
pub fn install_builtins(registry: &DistributionRegistry) {
    for row in BUILTIN_DISTRIBUTIONS {
        if let Some(entry) = builtin_entry(row.tag) {
            registry.register_with_tag(row.name, entry, row.tag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Faces at the squares of `0..=n`, scaled into `[a, b]`.
    struct Quadratic;

    impl Distribution for Quadratic {
        fn faces(&self, n: usize, a: f64, b: f64, _: Option<&DistOptions>) -> Result<Vec<f64>> {
            check_inputs(n, a, b)?;
            let last = (n * n) as f64;
            Ok((0..=n).map(|i| a + (b - a) * (i * i) as f64 / last).collect())
        }
    }

    #[test]
    fn default_centers_are_face_midpoints() -> Result<()> {
        let centers = Quadratic.centers(2, 0.0, 4.0, None)?;
        assert_eq!(centers, vec![0.5, 2.5]);
        Ok(())
    }

    #[test]
    fn entry_delegates_to_distribution() -> Result<()> {
        let entry = DistributionEntry::from_distribution(Quadratic);
        assert_eq!(entry.faces(2, 0.0, 4.0, None)?, vec![0.0, 1.0, 4.0]);
        assert_eq!(entry.centers(2, 0.0, 4.0, None)?, vec![0.5, 2.5]);
        Ok(())
    }

    #[test]
    fn check_inputs_orders_cell_count_before_domain() {
        assert!(matches!(
            check_inputs(0, 1.0, 0.0),
            Err(GridError::InvalidCellCount { count: 0 })
        ));
        assert!(matches!(
            check_inputs(3, 1.0, 1.0),
            Err(GridError::InvalidDomain { .. })
        ));
        assert!(matches!(
            check_inputs(3, f64::NAN, 1.0),
            Err(GridError::InvalidDomain { .. })
        ));
        assert!(check_inputs(1, 0.0, 1e-12).is_ok());
    }

    #[test]
    fn install_builtins_registers_every_table_row() {
        let registry = DistributionRegistry::new();
        install_builtins(&registry);
        for row in BUILTIN_DISTRIBUTIONS {
            assert_eq!(registry.name_for_tag(row.tag).as_deref(), Some(row.name));
            assert!(registry.find(row.name).is_some());
        }
    }
}
