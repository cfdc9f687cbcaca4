//! Error types returned by grid construction and the distribution registry.
//!
//! Every variant carries a stable key and a numeric code within its
//! [`ErrorDomain`], so callers can match on identity without parsing the
//! display text.

use std::fmt;

use thiserror::Error;

use crate::tags::{CenteringTag, DistributionTag};

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

/// Subsystem an error code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorDomain {
    /// Generic argument and contract failures.
    Core = 0x0001,
    /// Mesh parameters and mesh consistency.
    Grid = 0x0003,
    /// Distribution registration and lookup.
    Registry = 0x0004,
}

impl ErrorDomain {
    /// Numeric domain identifier.
    pub const fn id(self) -> u16 {
        self as u16
    }
}

/// How serious an error is for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Diagnostic only.
    Trace,
    /// Recoverable; the operation may continue.
    Warning,
    /// The operation failed.
    Error,
    /// The process state can no longer be trusted.
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Trace => "trace",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Fatal => "fatal",
        })
    }
}

/// Broad category of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller supplied invalid configuration (cell count, domain, names).
    Configuration,
    /// The registry has no usable entry for the requested distribution.
    Registry,
    /// A generator broke its output contract.
    Contract,
    /// A produced mesh violates a structural invariant.
    Invariant,
}

/// Errors produced while configuring or building a grid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// The requested number of cells was zero.
    #[error("invalid number of volumes N: {count} (must be > 0)")]
    InvalidCellCount {
        /// Requested cell count.
        count: usize,
    },

    /// The domain upper bound does not exceed the lower bound.
    #[error("invalid domain: B <= A (A={lower}, B={upper})")]
    InvalidDomain {
        /// Lower bound A.
        lower: f64,
        /// Upper bound B.
        upper: f64,
    },

    /// A centering name could not be parsed.
    #[error("unsupported or unknown centering: {name}")]
    UnknownCentering {
        /// The name that failed to parse.
        name: String,
    },

    /// No distribution name is bound to the tag.
    #[error("no distribution registered for tag {tag}")]
    UnregisteredTag {
        /// The tag that was looked up.
        tag: DistributionTag,
    },

    /// No converter is registered for a custom centering tag.
    #[error("no centering registered for tag {tag}")]
    UnregisteredCentering {
        /// The tag that was looked up.
        tag: CenteringTag,
    },

    /// A tag resolves to a name with no generator entry.
    #[error("distribution '{name}' has no generator entry in the registry")]
    MissingEntry {
        /// The name the tag resolved to.
        name: String,
    },

    /// No distribution is registered under the name.
    #[error("unknown distribution '{name}'")]
    UnknownName {
        /// The name that was looked up.
        name: String,
    },

    /// A generator returned the wrong number of coordinates.
    #[error("distribution '{name}' produced {got} {what}, expected {expected}")]
    GeneratorLength {
        /// Distribution that produced the output.
        name: String,
        /// Which array was produced ("faces" or "centers").
        what: &'static str,
        /// Required length.
        expected: usize,
        /// Length actually returned.
        got: usize,
    },

    /// At least one face width is zero or negative.
    #[error("degenerate mesh: face width at index {index} is non-positive ({width})")]
    NonPositiveWidth {
        /// First offending cell.
        index: usize,
        /// The offending width.
        width: f64,
    },

    /// Faces are not strictly increasing.
    #[error("faces must be strictly increasing; violation at index {index}")]
    NonIncreasingFaces {
        /// Index of the first face not greater than its predecessor.
        index: usize,
    },

    /// Centers are not strictly increasing.
    #[error("centers must be strictly increasing; violation at index {index}")]
    NonIncreasingCenters {
        /// Index of the first center not greater than its predecessor.
        index: usize,
    },

    /// A boundary face does not sit on the domain bound.
    #[error("{which} face is {got}, expected the domain bound {expected}")]
    DomainMismatch {
        /// Which boundary ("first" or "last").
        which: &'static str,
        /// The domain bound.
        expected: f64,
        /// The generated face.
        got: f64,
    },

    /// A center does not lie strictly inside its cell.
    #[error("center {index} ({center}) is outside its cell ({left}, {right})")]
    CenterOutsideCell {
        /// Index of the first offending cell.
        index: usize,
        /// The offending center.
        center: f64,
        /// Left face of the cell.
        left: f64,
        /// Right face of the cell.
        right: f64,
    },

    /// At least one center gap is zero or negative.
    #[error("center gap at index {index} is non-positive ({gap})")]
    NonPositiveCenterGap {
        /// First offending gap.
        index: usize,
        /// The offending gap.
        gap: f64,
    },

    /// A coordinate is NaN or infinite.
    #[error("coordinate at index {index} is not finite ({value})")]
    NonFiniteCoordinate {
        /// Index of the first non-finite value.
        index: usize,
        /// The offending value.
        value: f64,
    },
}

impl GridError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCellCount { .. }
            | Self::InvalidDomain { .. }
            | Self::UnknownCentering { .. } => ErrorKind::Configuration,
            Self::UnregisteredTag { .. }
            | Self::UnregisteredCentering { .. }
            | Self::MissingEntry { .. }
            | Self::UnknownName { .. } => ErrorKind::Registry,
            Self::GeneratorLength { .. } => ErrorKind::Contract,
            Self::DomainMismatch { .. }
            | Self::CenterOutsideCell { .. }
            | Self::NonPositiveCenterGap { .. }
            | Self::NonPositiveWidth { .. }
            | Self::NonIncreasingFaces { .. }
            | Self::NonIncreasingCenters { .. }
            | Self::NonFiniteCoordinate { .. } => ErrorKind::Invariant,
        }
    }

    /// Domain the numeric code belongs to.
    pub fn domain(&self) -> ErrorDomain {
        match self {
            Self::UnregisteredTag { .. }
            | Self::UnregisteredCentering { .. }
            | Self::MissingEntry { .. }
            | Self::UnknownName { .. } => ErrorDomain::Registry,
            Self::GeneratorLength { .. } => ErrorDomain::Core,
            _ => ErrorDomain::Grid,
        }
    }

    /// Numeric code, unique within [`Self::domain`].
    pub fn code(&self) -> u16 {
        match self {
            Self::InvalidCellCount { .. } => 1,
            Self::InvalidDomain { .. } => 2,
            Self::UnknownCentering { .. } => 3,
            Self::NonPositiveWidth { .. } => 7,
            Self::NonIncreasingFaces { .. } => 8,
            Self::NonIncreasingCenters { .. } => 9,
            Self::NonFiniteCoordinate { value, .. } if value.is_nan() => 10,
            Self::NonFiniteCoordinate { .. } => 11,
            Self::DomainMismatch { .. } => 12,
            Self::CenterOutsideCell { .. } => 13,
            Self::NonPositiveCenterGap { .. } => 14,
            Self::UnregisteredTag { .. } => 1,
            Self::MissingEntry { .. } => 2,
            Self::UnknownName { .. } => 3,
            Self::UnregisteredCentering { .. } => 4,
            // Inconsistent geometry.
            Self::GeneratorLength { .. } => 5,
        }
    }

    /// Stable identifier suitable for logs and message catalogues.
    pub fn key(&self) -> &'static str {
        match self {
            Self::InvalidCellCount { .. } => "GRID_INVALID_N",
            Self::InvalidDomain { .. } => "GRID_INVALID_DOMAIN",
            Self::UnknownCentering { .. } => "GRID_INVALID_CENTERING",
            Self::NonPositiveWidth { .. } => "GRID_DEGENERATE_MESH",
            Self::NonIncreasingFaces { .. } => "GRID_NON_INCREASING_FACES",
            Self::NonIncreasingCenters { .. } => "GRID_NON_INCREASING_CENTERS",
            Self::NonFiniteCoordinate { value, .. } if value.is_nan() => "GRID_NAN_COORDINATE",
            Self::NonFiniteCoordinate { .. } => "GRID_INF_COORDINATE",
            Self::DomainMismatch { .. } => "GRID_DOMAIN_MISMATCH",
            Self::CenterOutsideCell { .. } => "GRID_CENTER_OUTSIDE_CELL",
            Self::NonPositiveCenterGap { .. } => "GRID_NON_POSITIVE_CENTER_GAP",
            Self::UnregisteredTag { .. } => "REGISTRY_UNREGISTERED_TAG",
            Self::MissingEntry { .. } => "REGISTRY_MISSING_ENTRY",
            Self::UnknownName { .. } => "REGISTRY_UNKNOWN_NAME",
            Self::UnregisteredCentering { .. } => "REGISTRY_UNREGISTERED_CENTERING",
            Self::GeneratorLength { .. } => "CORE_INCONSISTENT_GEOMETRY",
        }
    }

    /// Severity of this error. All current variants abort the operation.
    pub fn severity(&self) -> Severity {
        Severity::Error
    }

    /// Whether the error reports an invalid caller-supplied argument.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidCellCount { .. } | Self::InvalidDomain { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_and_codes_identify_variants() {
        let err = GridError::InvalidCellCount { count: 0 };
        assert_eq!(err.key(), "GRID_INVALID_N");
        assert_eq!(err.code(), 1);
        assert_eq!(err.domain().id(), 0x0003);
        assert!(err.is_invalid_argument());
        assert_eq!(err.kind(), ErrorKind::Configuration);

        let err = GridError::UnregisteredTag {
            tag: DistributionTag::RANDOM,
        };
        assert_eq!(err.kind(), ErrorKind::Registry);
        assert_eq!(err.domain(), ErrorDomain::Registry);
        assert!(!err.is_invalid_argument());

        let err = GridError::UnregisteredCentering {
            tag: CenteringTag::Custom(3),
        };
        assert_eq!(err.key(), "REGISTRY_UNREGISTERED_CENTERING");
        assert_eq!(err.to_string(), "no centering registered for tag custom#3");
    }

    #[test]
    fn mesh_consistency_errors_are_invariants() {
        let errors = [
            GridError::DomainMismatch {
                which: "first",
                expected: 0.0,
                got: 0.5,
            },
            GridError::CenterOutsideCell {
                index: 0,
                center: 0.0,
                left: 0.0,
                right: 0.25,
            },
            GridError::NonPositiveCenterGap { index: 0, gap: 0.0 },
        ];
        for err in &errors {
            assert_eq!(err.kind(), ErrorKind::Invariant);
            assert_eq!(err.domain(), ErrorDomain::Grid);
        }
        assert_eq!(errors[0].key(), "GRID_DOMAIN_MISMATCH");
        assert_eq!(errors[1].key(), "GRID_CENTER_OUTSIDE_CELL");
        assert_eq!(errors[2].key(), "GRID_NON_POSITIVE_CENTER_GAP");
    }

    #[test]
    fn non_finite_coordinates_split_nan_and_inf() {
        let nan = GridError::NonFiniteCoordinate {
            index: 3,
            value: f64::NAN,
        };
        let inf = GridError::NonFiniteCoordinate {
            index: 3,
            value: f64::NEG_INFINITY,
        };
        assert_eq!(nan.key(), "GRID_NAN_COORDINATE");
        assert_eq!(inf.key(), "GRID_INF_COORDINATE");
        assert_ne!(nan.code(), inf.code());
    }

    #[test]
    fn display_includes_parameters() {
        let err = GridError::InvalidDomain {
            lower: 2.0,
            upper: 1.0,
        };
        assert_eq!(err.to_string(), "invalid domain: B <= A (A=2, B=1)");
        assert_eq!(err.severity(), Severity::Error);
    }
}
