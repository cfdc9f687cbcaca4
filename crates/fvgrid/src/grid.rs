//! The immutable one-dimensional grid value.

/// A materialized 1D finite-volume mesh over `[A, B]` with `N` cells.
///
/// Holds four arrays:
///
/// - `faces` (N+1 values): cell boundaries, `faces[0] = A`, `faces[N] = B`.
/// - `centers` (N values): one point strictly inside each cell.
/// - `face_widths` (N values): `faces[i+1] - faces[i]`.
/// - `center_gaps` (N+1 values): `centers[0] - A`, the gaps between
///   consecutive centers, then `B - centers[N-1]`.
///
/// Grids are produced by [`GridBuilder`](crate::GridBuilder) and never change
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid1D {
    /// Face coordinates.
    faces: Vec<f64>,
    /// Cell-center coordinates.
    centers: Vec<f64>,
    /// Face-to-face widths (dF).
    face_widths: Vec<f64>,
    /// Center-to-center gaps with boundary half cells (dC).
    center_gaps: Vec<f64>,
}

impl Grid1D {
    /// Assemble a grid from already consistent arrays.
    pub(crate) fn from_parts(
        faces: Vec<f64>,
        centers: Vec<f64>,
        face_widths: Vec<f64>,
        center_gaps: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(faces.len(), centers.len() + 1);
        debug_assert_eq!(face_widths.len(), centers.len());
        debug_assert_eq!(center_gaps.len(), faces.len());
        Self {
            faces,
            centers,
            face_widths,
            center_gaps,
        }
    }

    /// Number of cells (N).
    pub fn cell_count(&self) -> usize {
        self.centers.len()
    }

    /// Number of faces (N+1).
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// All face coordinates.
    pub fn faces(&self) -> &[f64] {
        &self.faces
    }

    /// All cell-center coordinates.
    pub fn centers(&self) -> &[f64] {
        &self.centers
    }

    /// All face-to-face widths.
    pub fn face_widths(&self) -> &[f64] {
        &self.face_widths
    }

    /// All center-to-center gaps, including the two boundary half gaps.
    pub fn center_gaps(&self) -> &[f64] {
        &self.center_gaps
    }

    /// Face `i`, or `None` when out of range.
    pub fn face(&self, i: usize) -> Option<f64> {
        self.faces.get(i).copied()
    }

    /// Center of cell `i`, or `None` when out of range.
    pub fn center(&self, i: usize) -> Option<f64> {
        self.centers.get(i).copied()
    }

    /// Width of cell `i`, or `None` when out of range.
    pub fn face_width(&self, i: usize) -> Option<f64> {
        self.face_widths.get(i).copied()
    }

    /// Center gap `i`, or `None` when out of range.
    pub fn center_gap(&self, i: usize) -> Option<f64> {
        self.center_gaps.get(i).copied()
    }

    /// The `(A, B)` bounds of the grid.
    pub fn domain(&self) -> (f64, f64) {
        // from_parts guarantees at least one cell, hence two faces.
        (self.faces[0], self.faces[self.faces.len() - 1])
    }

    /// Domain length `B - A`.
    pub fn length(&self) -> f64 {
        let (a, b) = self.domain();
        b - a
    }

    /// Iterate over `(left_face, center, right_face)` for each cell.
    pub fn cells(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.faces
            .windows(2)
            .zip(&self.centers)
            .map(|(w, &c)| (w[0], c, w[1]))
    }
}
