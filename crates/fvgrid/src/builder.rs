//! Fluent construction of [`Grid1D`] values.

use tracing::{debug, warn};

use crate::{
    centering::{self, CenteringInput},
    distribution::{DistributionEntry, RandomOptions, check_inputs},
    error::{GridError, Result},
    grid::Grid1D,
    options::{DistConfig, DistOptions},
    registry::DistributionRegistry,
    tags::{CenteringTag, DistributionTag},
    validation,
};

/// What `build` does with invariant violations in the produced mesh.
///
/// Configuration, registry and generator-contract errors are always returned;
/// the policy only governs the structural checks in [`validation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckPolicy {
    /// Fail the build on the first violation.
    #[default]
    Enforce,
    /// Log the violation and return the grid anyway.
    Warn,
    /// Do not run the checks.
    Skip,
}

/// Accumulates grid parameters and builds a [`Grid1D`].
///
/// Setters never validate; all validation happens in [`GridBuilder::build`].
/// Defaults: no cells, domain `[0, 1]`, uniform distribution, face
/// centering, no options, enforced checks.
///
/// ```
/// use fvgrid::{CenteringTag, DistributionRegistry, GridBuilder};
///
/// let registry = DistributionRegistry::with_builtins();
/// let grid = GridBuilder::new(&registry)
///     .cells(4)
///     .domain(0.0, 2.0)
///     .centering(CenteringTag::CellCentered)
///     .build()?;
/// assert_eq!(grid.faces(), &[0.0, 0.5, 1.0, 1.5, 2.0]);
/// # Ok::<(), fvgrid::GridError>(())
/// ```
#[derive(Clone)]
pub struct GridBuilder<'r> {
    /// Source of distribution generators.
    registry: &'r DistributionRegistry,
    /// Number of cells.
    cells: usize,
    /// Lower domain bound.
    lower: f64,
    /// Upper domain bound.
    upper: f64,
    /// Distribution to resolve from the registry.
    distribution: DistributionTag,
    /// Which array the distribution generates.
    centering: CenteringTag,
    /// Payload forwarded to the generators.
    options: Option<DistOptions>,
    /// Treatment of invariant violations.
    checks: CheckPolicy,
}

impl<'r> GridBuilder<'r> {
    /// A builder drawing distributions from `registry`.
    pub fn new(registry: &'r DistributionRegistry) -> Self {
        Self {
            registry,
            cells: 0,
            lower: 0.0,
            upper: 1.0,
            distribution: DistributionTag::UNIFORM,
            centering: CenteringTag::FaceCentered,
            options: None,
            checks: CheckPolicy::Enforce,
        }
    }

    /// Set the number of cells N.
    pub fn cells(mut self, n: usize) -> Self {
        self.cells = n;
        self
    }

    /// Set the domain `[a, b]`.
    pub fn domain(mut self, a: f64, b: f64) -> Self {
        self.lower = a;
        self.upper = b;
        self
    }

    /// Choose the distribution by tag.
    pub fn distribution(mut self, tag: DistributionTag) -> Self {
        self.distribution = tag;
        self
    }

    /// Choose the centering convention.
    pub fn centering(mut self, centering: CenteringTag) -> Self {
        self.centering = centering;
        self
    }

    /// Set the payload passed to the distribution's generators.
    pub fn options(mut self, options: DistOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Shorthand for a [`RandomOptions`] payload.
    pub fn random_options(self, options: RandomOptions) -> Self {
        self.options(DistOptions::new(options))
    }

    /// Apply a distribution tag and its payload in one step.
    ///
    /// A config without a payload leaves any previously set options alone.
    pub fn configure(mut self, config: DistConfig) -> Self {
        self.distribution = config.tag;
        if let Some(options) = config.options {
            self.options = Some(options);
        }
        self
    }

    /// Set the invariant check policy.
    pub fn checks(mut self, policy: CheckPolicy) -> Self {
        self.checks = policy;
        self
    }

    /// Validate the configuration, run the distribution, and assemble a grid.
    ///
    /// Fails, in this order, on: zero cells, `!(b > a)`, an unregistered
    /// distribution tag or missing entry, an unregistered custom centering, a
    /// generator or converter error, output of the wrong length, and (under
    /// [`CheckPolicy::Enforce`]) any violation of the mesh invariants,
    /// including boundary faces that miss the domain bounds.
    pub fn build(&self) -> Result<Grid1D> {
        let (n, a, b) = (self.cells, self.lower, self.upper);
        check_inputs(n, a, b)?;
        let (name, entry) = self.registry.resolve(self.distribution)?;
        debug!(
            distribution = %name,
            centering = %self.centering,
            cells = n,
            lower = a,
            upper = b,
            "building grid"
        );

        let grid = match self.centering {
            CenteringTag::FaceCentered => {
                let faces = self.generate_faces(&name, &entry)?;
                let mut centers = vec![0.0; n];
                let (mut face_widths, mut center_gaps) = delta_buffers(n);
                centering::faces_to_centers(
                    &faces,
                    &mut centers,
                    &mut face_widths,
                    &mut center_gaps,
                );
                Grid1D::from_parts(faces, centers, face_widths, center_gaps)
            }
            CenteringTag::CellCentered => {
                let centers = self.generate_centers(&name, &entry)?;
                let mut faces = vec![0.0; n + 1];
                let (mut face_widths, mut center_gaps) = delta_buffers(n);
                centering::centers_to_faces_in_domain(
                    &centers,
                    a,
                    b,
                    &mut faces,
                    &mut face_widths,
                    &mut center_gaps,
                );
                Grid1D::from_parts(faces, centers, face_widths, center_gaps)
            }
            CenteringTag::Custom(_) => self.custom_centered(&name, &entry)?,
        };

        self.run_checks(&grid)?;
        Ok(grid)
    }

    /// Run the face generator and check its length.
    fn generate_faces(&self, name: &str, entry: &DistributionEntry) -> Result<Vec<f64>> {
        let n = self.cells;
        let faces = entry.faces(n, self.lower, self.upper, self.options.as_ref())?;
        expect_len(name, "faces", n + 1, faces.len())?;
        Ok(faces)
    }

    /// Run the center generator and check its length.
    fn generate_centers(&self, name: &str, entry: &DistributionEntry) -> Result<Vec<f64>> {
        let n = self.cells;
        let centers = entry.centers(n, self.lower, self.upper, self.options.as_ref())?;
        expect_len(name, "centers", n, centers.len())?;
        Ok(centers)
    }

    /// Assemble a grid through a registered user centering.
    fn custom_centered(&self, name: &str, entry: &DistributionEntry) -> Result<Grid1D> {
        let n = self.cells;
        let (centering_name, converter) = self.registry.resolve_centering(self.centering)?;
        let raw = match converter.input() {
            CenteringInput::Faces => self.generate_faces(name, entry)?,
            CenteringInput::Centers => self.generate_centers(name, entry)?,
        };
        let (faces, centers) = converter.convert(&raw, self.lower, self.upper)?;
        expect_len(&centering_name, "faces", n + 1, faces.len())?;
        expect_len(&centering_name, "centers", n, centers.len())?;

        let (mut face_widths, mut center_gaps) = delta_buffers(n);
        centering::fill_deltas(&faces, &centers, &mut face_widths, &mut center_gaps);
        Ok(Grid1D::from_parts(faces, centers, face_widths, center_gaps))
    }

    /// Apply the check policy to a freshly assembled grid.
    fn run_checks(&self, grid: &Grid1D) -> Result<()> {
        let check = || {
            validation::check_mesh(
                grid.faces(),
                grid.centers(),
                grid.face_widths(),
                grid.center_gaps(),
                (self.lower, self.upper),
            )
        };
        match self.checks {
            CheckPolicy::Skip => Ok(()),
            CheckPolicy::Enforce => check(),
            CheckPolicy::Warn => {
                if let Err(err) = check() {
                    warn!(
                        key = err.key(),
                        code = err.code(),
                        domain = err.domain().id(),
                        "{err}"
                    );
                }
                Ok(())
            }
        }
    }
}

/// Zeroed `(face_widths, center_gaps)` buffers for `n` cells.
fn delta_buffers(n: usize) -> (Vec<f64>, Vec<f64>) {
    (vec![0.0; n], vec![0.0; n + 1])
}

/// Fail unless a generator produced exactly `expected` values.
fn expect_len(name: &str, what: &'static str, expected: usize, got: usize) -> Result<()> {
    if got == expected {
        Ok(())
    } else {
        Err(GridError::GeneratorLength {
            name: name.to_string(),
            what,
            expected,
            got,
        })
    }
}
