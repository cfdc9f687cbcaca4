//! Identifiers for distributions and centering conventions.
//!
//! Both tag spaces are open. The built-in distributions are listed in
//! [`BUILTIN_DISTRIBUTIONS`] and third-party code mints its own tags with
//! [`DistributionTag::custom`]. The built-in centerings are listed in
//! [`CENTERINGS`]; user centerings use [`CenteringTag::Custom`] and are
//! resolved through the registry.

use std::{fmt, str::FromStr};

use crate::error::GridError;

/// Identifier of a spacing distribution.
///
/// The value space is split in two: ids below [`DistributionTag::CUSTOM_BASE`]
/// are reserved for distributions shipped with this crate, ids at or above it
/// belong to user code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DistributionTag(u16);

impl DistributionTag {
    /// First id available to user-defined distributions.
    pub const CUSTOM_BASE: u16 = 0x8000;

    /// Evenly spaced cells.
    pub const UNIFORM: Self = Self(0);
    /// Randomized cell widths with bounded ratios.
    pub const RANDOM: Self = Self(1);

    /// A tag for a user-defined distribution.
    ///
    /// `id` is offset into the user range, so `custom(0)` never collides with a
    /// built-in tag. Returns `None` when `id` does not fit in the user range
    /// (`id > 0x7FFF`).
    pub const fn custom(id: u16) -> Option<Self> {
        match Self::CUSTOM_BASE.checked_add(id) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }

    /// Raw numeric value of the tag.
    pub const fn id(self) -> u16 {
        self.0
    }

    /// Whether this tag belongs to the user range.
    pub const fn is_custom(self) -> bool {
        self.0 >= Self::CUSTOM_BASE
    }

    /// Canonical name for built-in tags; `None` for custom tags.
    pub fn builtin_name(self) -> Option<&'static str> {
        BUILTIN_DISTRIBUTIONS
            .iter()
            .find(|entry| entry.tag == self)
            .map(|entry| entry.name)
    }
}

impl fmt::Display for DistributionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.builtin_name() {
            Some(name) => f.write_str(name),
            None if self.is_custom() => write!(f, "{CUSTOM_PREFIX}{}", self.0 - Self::CUSTOM_BASE),
            None => write!(f, "#{}", self.0),
        }
    }
}

/// One row of a tag/name table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagName {
    /// Distribution tag.
    pub tag: DistributionTag,
    /// Canonical registry name.
    pub name: &'static str,
}

/// Built-in distributions and the names they are registered under.
pub const BUILTIN_DISTRIBUTIONS: &[TagName] = &[
    TagName {
        tag: DistributionTag::UNIFORM,
        name: "uniform",
    },
    TagName {
        tag: DistributionTag::RANDOM,
        name: "random",
    },
];

/// How the coordinate arrays of a grid are derived from a distribution.
///
/// The two built-in conventions are handled by the builder directly.
/// [`CenteringTag::Custom`] names a user convention registered with
/// [`DistributionRegistry::register_centering`](crate::DistributionRegistry::register_centering).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum CenteringTag {
    /// The distribution yields faces; centers are face midpoints.
    #[default]
    FaceCentered,
    /// The distribution yields centers; interior faces are center midpoints.
    CellCentered,
    /// A user-defined convention, looked up in the registry by id.
    Custom(u16),
}

/// Built-in centerings paired with their names.
pub const CENTERINGS: &[(CenteringTag, &str)] = &[
    (CenteringTag::FaceCentered, "face"),
    (CenteringTag::CellCentered, "cell"),
];

/// Prefix of the textual form of custom tags.
const CUSTOM_PREFIX: &str = "custom#";

impl CenteringTag {
    /// Short name of a built-in centering; `None` for custom tags.
    pub fn builtin_name(self) -> Option<&'static str> {
        match self {
            Self::FaceCentered => Some("face"),
            Self::CellCentered => Some("cell"),
            Self::Custom(_) => None,
        }
    }

    /// Whether this tag names a user convention.
    pub const fn is_custom(self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl fmt::Display for CenteringTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(id) => write!(f, "{CUSTOM_PREFIX}{id}"),
            builtin => f.write_str(builtin.builtin_name().unwrap_or_default()),
        }
    }
}

impl FromStr for CenteringTag {
    type Err = GridError;

    /// Parse a built-in name (case-insensitive) or `custom#<id>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if let Some(id) = wanted.strip_prefix(CUSTOM_PREFIX) {
            return id.parse().map(Self::Custom).map_err(|_| GridError::UnknownCentering {
                name: s.to_string(),
            });
        }
        CENTERINGS
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(wanted))
            .map(|(tag, _)| *tag)
            .ok_or_else(|| GridError::UnknownCentering {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn builtin_table_is_complete_and_unique() {
        let builtins = [DistributionTag::UNIFORM, DistributionTag::RANDOM];
        assert_eq!(BUILTIN_DISTRIBUTIONS.len(), builtins.len());
        for tag in builtins {
            assert!(tag.builtin_name().is_some(), "{tag:?} has no name");
            assert!(!tag.is_custom());
        }

        let names: HashSet<_> = BUILTIN_DISTRIBUTIONS.iter().map(|e| e.name).collect();
        let tags: HashSet<_> = BUILTIN_DISTRIBUTIONS.iter().map(|e| e.tag).collect();
        assert_eq!(names.len(), BUILTIN_DISTRIBUTIONS.len());
        assert_eq!(tags.len(), BUILTIN_DISTRIBUTIONS.len());
    }

    #[test]
    fn custom_tags_do_not_collide_with_builtins() {
        let first = DistributionTag::custom(0);
        assert!(first.is_some_and(DistributionTag::is_custom));
        assert_ne!(first, Some(DistributionTag::UNIFORM));
        assert_ne!(DistributionTag::custom(1), Some(DistributionTag::RANDOM));
        assert_eq!(first.and_then(DistributionTag::builtin_name), None);
    }

    #[test]
    fn custom_tags_past_the_user_range_are_rejected() {
        let last = DistributionTag::custom(0x7FFF).map(DistributionTag::id);
        assert_eq!(last, Some(u16::MAX));
        assert_eq!(DistributionTag::custom(0x8000), None);
        assert_eq!(DistributionTag::custom(u16::MAX), None);
        // Distinct ids always map to distinct tags.
        assert_ne!(DistributionTag::custom(0x7FFE), DistributionTag::custom(0x7FFF));
    }

    #[test]
    fn tag_display() {
        assert_eq!(DistributionTag::UNIFORM.to_string(), "uniform");
        let custom = DistributionTag::custom(5).map(|t| t.to_string());
        assert_eq!(custom.as_deref(), Some("custom#5"));
    }

    #[test]
    fn centering_names_round_trip() -> crate::error::Result<()> {
        for (tag, name) in CENTERINGS {
            assert_eq!(tag.builtin_name(), Some(*name));
            assert_eq!(name.parse::<CenteringTag>()?, *tag);
        }
        assert_eq!("CELL".parse::<CenteringTag>()?, CenteringTag::CellCentered);
        assert!(matches!(
            "vertex".parse::<CenteringTag>(),
            Err(GridError::UnknownCentering { .. })
        ));
        Ok(())
    }

    #[test]
    fn custom_centerings_parse_and_display() -> crate::error::Result<()> {
        let tag = "custom#12".parse::<CenteringTag>()?;
        assert_eq!(tag, CenteringTag::Custom(12));
        assert!(tag.is_custom());
        assert_eq!(tag.builtin_name(), None);
        assert_eq!(tag.to_string(), "custom#12");
        assert!("custom#x".parse::<CenteringTag>().is_err());
        Ok(())
    }
}
