//! Conversions between face and cell-center coordinates.
//!
//! Every function writes into caller-provided buffers. Buffer sizes are a
//! precondition: for `N` cells, `faces` and `center_gaps` hold `N+1` values,
//! `centers` and `face_widths` hold `N`. Sizes are checked with
//! `debug_assert!` only.
//!
//! User conventions beyond face and cell centering are described by a
//! [`CenteringEntry`] and registered with the
//! [`DistributionRegistry`](crate::DistributionRegistry).

use std::{fmt, sync::Arc};

use crate::error::Result;

/// Derive centers and both delta arrays from `faces`.
///
/// `centers[i]` is the midpoint of `faces[i]` and `faces[i+1]`.
pub fn faces_to_centers(
    faces: &[f64],
    centers: &mut [f64],
    face_widths: &mut [f64],
    center_gaps: &mut [f64],
) {
    let n = centers.len();
    debug_assert_eq!(faces.len(), n + 1, "faces must hold N+1 values");
    if n == 0 {
        return;
    }
    for (c, w) in centers.iter_mut().zip(faces.windows(2)) {
        *c = 0.5 * (w[0] + w[1]);
    }
    fill_deltas(faces, centers, face_widths, center_gaps);
}

/// Derive faces and both delta arrays from `centers` alone.
///
/// Interior faces are midpoints of adjacent centers. The two boundary faces
/// are extrapolated outward by half of the nearest center gap. With a single
/// center there is no gap to extrapolate from, so both faces collapse onto it
/// and the resulting cell has zero width. Use [`centers_to_faces_in_domain`]
/// when the domain bounds are known.
pub fn centers_to_faces(
    centers: &[f64],
    faces: &mut [f64],
    face_widths: &mut [f64],
    center_gaps: &mut [f64],
) {
    let n = centers.len();
    debug_assert_eq!(faces.len(), n + 1, "faces must hold N+1 values");
    match n {
        0 => return,
        1 => {
            faces[0] = centers[0];
            faces[1] = centers[0];
        }
        _ => {
            interior_faces(centers, faces);
            faces[0] = centers[0] - 0.5 * (centers[1] - centers[0]);
            faces[n] = centers[n - 1] + 0.5 * (centers[n - 1] - centers[n - 2]);
        }
    }
    fill_deltas(faces, centers, face_widths, center_gaps);
}

/// Derive faces and both delta arrays from `centers`, pinning the boundary
/// faces to the domain bounds `a` and `b`.
///
/// This is the convention used by the builder for cell-centered grids. A
/// single center yields the cell `[a, b]`.
pub fn centers_to_faces_in_domain(
    centers: &[f64],
    a: f64,
    b: f64,
    faces: &mut [f64],
    face_widths: &mut [f64],
    center_gaps: &mut [f64],
) {
    let n = centers.len();
    debug_assert_eq!(faces.len(), n + 1, "faces must hold N+1 values");
    if n == 0 {
        return;
    }
    interior_faces(centers, faces);
    faces[0] = a;
    faces[n] = b;
    fill_deltas(faces, centers, face_widths, center_gaps);
}

/// Write `faces[1..N]` as midpoints of adjacent centers.
fn interior_faces(centers: &[f64], faces: &mut [f64]) {
    for (f, w) in faces[1..].iter_mut().zip(centers.windows(2)) {
        *f = 0.5 * (w[0] + w[1]);
    }
}

/// Fill the width and gap arrays from consistent faces and centers.
///
/// `face_widths[i] = faces[i+1] - faces[i]`; `center_gaps` holds the left half
/// gap, the N-1 center differences, then the right half gap.
pub fn fill_deltas(
    faces: &[f64],
    centers: &[f64],
    face_widths: &mut [f64],
    center_gaps: &mut [f64],
) {
    let n = centers.len();
    debug_assert_eq!(faces.len(), n + 1, "faces must hold N+1 values");
    debug_assert_eq!(face_widths.len(), n, "face widths must hold N values");
    debug_assert_eq!(center_gaps.len(), n + 1, "center gaps must hold N+1 values");
    if n == 0 {
        return;
    }
    for (d, w) in face_widths.iter_mut().zip(faces.windows(2)) {
        *d = w[1] - w[0];
    }
    center_gaps[0] = centers[0] - faces[0];
    for (d, w) in center_gaps[1..n].iter_mut().zip(centers.windows(2)) {
        *d = w[1] - w[0];
    }
    center_gaps[n] = faces[n] - centers[n - 1];
}

/// Which generator of a distribution a user centering consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CenteringInput {
    /// The `N+1` faces.
    Faces,
    /// The `N` centers.
    Centers,
}

/// Converter signature: `(raw coordinates, A, B) -> (faces, centers)`.
pub type ConvertFn =
    Arc<dyn Fn(&[f64], f64, f64) -> Result<(Vec<f64>, Vec<f64>)> + Send + Sync>;

/// A user-defined centering convention.
///
/// The builder runs the distribution generator named by
/// [`CenteringEntry::input`], passes its output and the domain to the
/// converter, and derives widths and gaps from the faces and centers it
/// returns. The result goes through the same checks as the built-in
/// conventions.
#[derive(Clone)]
pub struct CenteringEntry {
    /// Generator whose output feeds the converter.
    input: CenteringInput,
    /// Raw coordinates to faces and centers.
    convert: ConvertFn,
}

impl CenteringEntry {
    /// A convention that starts from generated faces.
    pub fn from_faces<F>(convert: F) -> Self
    where
        F: Fn(&[f64], f64, f64) -> Result<(Vec<f64>, Vec<f64>)> + Send + Sync + 'static,
    {
        Self {
            input: CenteringInput::Faces,
            convert: Arc::new(convert),
        }
    }

    /// A convention that starts from generated centers.
    pub fn from_centers<F>(convert: F) -> Self
    where
        F: Fn(&[f64], f64, f64) -> Result<(Vec<f64>, Vec<f64>)> + Send + Sync + 'static,
    {
        Self {
            input: CenteringInput::Centers,
            convert: Arc::new(convert),
        }
    }

    /// The generator this convention consumes.
    pub fn input(&self) -> CenteringInput {
        self.input
    }

    /// Run the converter.
    pub fn convert(&self, raw: &[f64], a: f64, b: f64) -> Result<(Vec<f64>, Vec<f64>)> {
        (self.convert)(raw, a, b)
    }
}

impl fmt::Debug for CenteringEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CenteringEntry")
            .field("input", &self.input)
            .finish_non_exhaustive()
    }
}
