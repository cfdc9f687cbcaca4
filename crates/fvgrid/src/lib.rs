//! One-dimensional finite-volume mesh construction.
//!
//! A [`Grid1D`] holds the faces, cell centers, face widths and center gaps of
//! a mesh over `[A, B]`. Grids are produced by a [`GridBuilder`], which looks
//! up a spacing distribution in a [`DistributionRegistry`] and derives the
//! complementary arrays according to the chosen [`CenteringTag`].
//!
//! # Built-in distributions
//!
//! - `uniform`: identical widths.
//! - `random`: seeded random widths bounded to a multiple range of the
//!   uniform width, summing exactly to the domain length.
//!
//! User code can register further distributions by name and tag, and further
//! centering conventions by [`CenteringTag::Custom`] tag; see [`registry`].
//!
//! ```
//! use fvgrid::{DistConfig, DistributionRegistry, GridBuilder};
//!
//! let registry = DistributionRegistry::with_builtins();
//! let grid = GridBuilder::new(&registry)
//!     .cells(100)
//!     .domain(0.0, 2.0)
//!     .configure(DistConfig::random_fixed(0.6, 1.4, 7))
//!     .build()?;
//! assert_eq!(grid.face_count(), 101);
//! # Ok::<(), fvgrid::GridError>(())
//! ```

/// Fluent grid construction.
pub mod builder;
/// Face and center conversions, and user centering conventions.
pub mod centering;
/// Spacing strategies and the generator-pair abstraction.
pub mod distribution;
/// Error types used across the crate.
pub mod error;
/// The immutable grid value.
pub mod grid;
/// Distribution option payloads.
pub mod options;
/// Name- and tag-keyed store of distributions and centerings.
pub mod registry;
/// Mesh quality metrics.
pub mod stats;
/// Distribution and centering identifiers.
pub mod tags;
/// Runtime invariant checks.
pub mod validation;

pub use crate::{
    builder::{CheckPolicy, GridBuilder},
    centering::CenteringEntry,
    distribution::{Distribution, DistributionEntry, install_builtins},
    error::{GridError, Result},
    grid::Grid1D,
    options::{DistConfig, DistOptions},
    registry::DistributionRegistry,
    tags::{CenteringTag, DistributionTag},
};

/// Build a grid with the named distribution from the built-in set.
///
/// Convenience for one-off grids; create a [`DistributionRegistry`] and a
/// [`GridBuilder`] to use custom distributions or options.
pub fn grid_from_name(
    name: &str,
    cells: usize,
    lower: f64,
    upper: f64,
    centering: CenteringTag,
) -> error::Result<Grid1D> {
    let registry = DistributionRegistry::with_builtins();
    let tag = registry
        .tag_for_name(name)
        .ok_or_else(|| GridError::UnknownName {
            name: name.to_string(),
        })?;
    GridBuilder::new(&registry)
        .cells(cells)
        .domain(lower, upper)
        .distribution(tag)
        .centering(centering)
        .build()
}
