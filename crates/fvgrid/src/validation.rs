//! Runtime checks of grid invariants.
//!
//! Each check returns the first offending index. For ordering checks the
//! index is the left element of the first pair `(v[i], v[i+1])` with
//! `v[i+1] <= v[i]`. NaN compares as a violation everywhere.
//!
//! [`check_mesh`] covers the whole data model of a built grid, including the
//! domain bounds; [`check_arrays`] covers what can be judged from the
//! coordinates alone.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    error::{GridError, Result},
    grid::Grid1D,
};

/// Arrays at least this long are scanned in parallel when the `parallel`
/// feature is enabled.
pub const PARALLEL_THRESHOLD: usize = 50_000;

/// Boundary faces within this many ulps of the domain scale count as lying on
/// the bounds.
pub const ENDPOINT_TOLERANCE: f64 = 4.0 * f64::EPSILON;

/// Index of the first adjacent pair failing `ok`.
#[cfg(feature = "parallel")]
fn first_bad_pair<F>(values: &[f64], ok: F) -> Option<usize>
where
    F: Fn(f64, f64) -> bool + Sync + Send,
{
    if values.len() >= PARALLEL_THRESHOLD {
        values.par_windows(2).position_first(|w| !ok(w[0], w[1]))
    } else {
        values.windows(2).position(|w| !ok(w[0], w[1]))
    }
}

/// Index of the first adjacent pair failing `ok`.
#[cfg(not(feature = "parallel"))]
fn first_bad_pair<F>(values: &[f64], ok: F) -> Option<usize>
where
    F: Fn(f64, f64) -> bool,
{
    values.windows(2).position(|w| !ok(w[0], w[1]))
}

/// Index of the first value failing `ok`.
#[cfg(feature = "parallel")]
fn first_bad<F>(values: &[f64], ok: F) -> Option<usize>
where
    F: Fn(f64) -> bool + Sync + Send,
{
    if values.len() >= PARALLEL_THRESHOLD {
        values.par_iter().position_first(|v| !ok(*v))
    } else {
        values.iter().position(|v| !ok(*v))
    }
}

/// Index of the first value failing `ok`.
#[cfg(not(feature = "parallel"))]
fn first_bad<F>(values: &[f64], ok: F) -> Option<usize>
where
    F: Fn(f64) -> bool,
{
    values.iter().position(|v| !ok(*v))
}

/// Index of the first cell whose center is not strictly inside its faces.
#[cfg(feature = "parallel")]
fn first_bad_cell(faces: &[f64], centers: &[f64]) -> Option<usize> {
    let inside = |c: f64, w: &[f64]| w[0] < c && c < w[1];
    if centers.len() >= PARALLEL_THRESHOLD {
        centers
            .par_iter()
            .zip(faces.par_windows(2))
            .position_first(|(c, w)| !inside(*c, w))
    } else {
        centers
            .iter()
            .zip(faces.windows(2))
            .position(|(c, w)| !inside(*c, w))
    }
}

/// Index of the first cell whose center is not strictly inside its faces.
#[cfg(not(feature = "parallel"))]
fn first_bad_cell(faces: &[f64], centers: &[f64]) -> Option<usize> {
    centers
        .iter()
        .zip(faces.windows(2))
        .position(|(c, w)| !(w[0] < *c && *c < w[1]))
}

/// Faces must be strictly increasing.
pub fn strictly_increasing_faces(faces: &[f64]) -> Result<()> {
    match first_bad_pair(faces, |a, b| b > a) {
        Some(index) => Err(GridError::NonIncreasingFaces { index }),
        None => Ok(()),
    }
}

/// Centers must be strictly increasing.
pub fn strictly_increasing_centers(centers: &[f64]) -> Result<()> {
    match first_bad_pair(centers, |a, b| b > a) {
        Some(index) => Err(GridError::NonIncreasingCenters { index }),
        None => Ok(()),
    }
}

/// Every face width must be strictly positive.
pub fn positive_face_widths(widths: &[f64]) -> Result<()> {
    match first_bad(widths, |w| w > 0.0) {
        Some(index) => Err(GridError::NonPositiveWidth {
            index,
            width: widths[index],
        }),
        None => Ok(()),
    }
}

/// Every center must lie strictly between the two faces of its cell.
pub fn centers_inside_cells(faces: &[f64], centers: &[f64]) -> Result<()> {
    match first_bad_cell(faces, centers) {
        Some(index) => Err(GridError::CenterOutsideCell {
            index,
            center: centers[index],
            left: faces[index],
            right: faces[index + 1],
        }),
        None => Ok(()),
    }
}

/// Every center gap, including the two boundary half gaps, must be strictly
/// positive.
pub fn positive_center_gaps(gaps: &[f64]) -> Result<()> {
    match first_bad(gaps, |g| g > 0.0) {
        Some(index) => Err(GridError::NonPositiveCenterGap {
            index,
            gap: gaps[index],
        }),
        None => Ok(()),
    }
}

/// The first and last faces must sit on `a` and `b`.
///
/// Differences up to [`ENDPOINT_TOLERANCE`] times the domain scale are
/// accepted, so generators that compute the last face as `a + n * h` pass.
pub fn faces_span_domain(faces: &[f64], a: f64, b: f64) -> Result<()> {
    let (Some(&first), Some(&last)) = (faces.first(), faces.last()) else {
        return Ok(());
    };
    let tol = ENDPOINT_TOLERANCE * a.abs().max(b.abs()).max(b - a);
    if (first - a).abs() > tol {
        return Err(GridError::DomainMismatch {
            which: "first",
            expected: a,
            got: first,
        });
    }
    if (last - b).abs() > tol {
        return Err(GridError::DomainMismatch {
            which: "last",
            expected: b,
            got: last,
        });
    }
    Ok(())
}

/// Every coordinate must be finite.
pub fn finite_coordinates(values: &[f64]) -> Result<()> {
    match first_bad(values, f64::is_finite) {
        Some(index) => Err(GridError::NonFiniteCoordinate {
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}

/// Run every check over raw arrays, stopping at the first failure.
///
/// Finiteness is checked first so that a NaN is reported as such rather than
/// as an ordering violation.
pub fn check_arrays(faces: &[f64], centers: &[f64], face_widths: &[f64]) -> Result<()> {
    finite_coordinates(faces)?;
    finite_coordinates(centers)?;
    strictly_increasing_faces(faces)?;
    strictly_increasing_centers(centers)?;
    positive_face_widths(face_widths)?;
    centers_inside_cells(faces, centers)
}

/// Run every check over a complete set of grid arrays for the domain
/// `[a, b]`.
pub fn check_mesh(
    faces: &[f64],
    centers: &[f64],
    face_widths: &[f64],
    center_gaps: &[f64],
    (a, b): (f64, f64),
) -> Result<()> {
    check_arrays(faces, centers, face_widths)?;
    positive_center_gaps(center_gaps)?;
    faces_span_domain(faces, a, b)
}

/// Run every check over a built grid.
pub fn check_grid(grid: &Grid1D) -> Result<()> {
    check_mesh(
        grid.faces(),
        grid.centers(),
        grid.face_widths(),
        grid.center_gaps(),
        grid.domain(),
    )
}
