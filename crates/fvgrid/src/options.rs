//! Distribution option payloads and the tag-plus-payload configuration
//! envelope.

use std::{
    any::Any,
    fmt,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use crate::{distribution::random::RandomOptions, tags::DistributionTag};

/// A type-erased, cheaply clonable option payload.
///
/// The builder stores this without looking inside. Only the generator the
/// builder resolves knows the concrete type and recovers it with
/// [`DistOptions::get`].
#[derive(Clone)]
pub struct DistOptions(Arc<dyn Any + Send + Sync>);

impl DistOptions {
    /// Wrap a concrete options value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Borrow the payload as `T`, or `None` when it holds another type.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Whether the payload holds a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }
}

impl fmt::Debug for DistOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DistOptions").finish_non_exhaustive()
    }
}

/// A distribution choice together with its optional payload.
///
/// Apply it to a builder with
/// [`GridBuilder::configure`](crate::GridBuilder::configure).
#[derive(Debug, Clone)]
pub struct DistConfig {
    /// Distribution to use.
    pub tag: DistributionTag,
    /// Options forwarded to the distribution's generators.
    pub options: Option<DistOptions>,
}

impl DistConfig {
    /// A configuration for `tag` with no payload.
    pub fn new(tag: DistributionTag) -> Self {
        Self { tag, options: None }
    }

    /// Attach a payload.
    pub fn with_options<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.options = Some(DistOptions::new(value));
        self
    }

    /// Evenly spaced cells.
    pub fn uniform() -> Self {
        Self::new(DistributionTag::UNIFORM)
    }

    /// Random widths within `[low, high]` multiples of the uniform width,
    /// drawn from a fixed seed.
    pub fn random_fixed(low: f64, high: f64, seed: u64) -> Self {
        Self::new(DistributionTag::RANDOM).with_options(RandomOptions {
            width_low: low,
            width_high: high,
            seed: Some(seed),
        })
    }

    /// Random widths within `[low, high]` multiples of the uniform width,
    /// seeded from the system clock so successive runs differ.
    pub fn random_clock(low: f64, high: f64) -> Self {
        Self::random_fixed(low, high, clock_seed())
    }
}

/// A seed derived from the current time.
///
/// Falls back to zero if the clock reads before the Unix epoch.
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() ^ u64::from(d.subsec_nanos()).rotate_left(32))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_downcasts_to_stored_type() {
        let opts = DistOptions::new(RandomOptions::default());
        assert!(opts.is::<RandomOptions>());
        assert_eq!(opts.get::<RandomOptions>(), Some(&RandomOptions::default()));
        assert!(opts.get::<u32>().is_none());
    }

    #[test]
    fn random_fixed_carries_seed() {
        let cfg = DistConfig::random_fixed(0.6, 1.4, 42);
        assert_eq!(cfg.tag, DistributionTag::RANDOM);
        let opts = cfg
            .options
            .as_ref()
            .and_then(|o| o.get::<RandomOptions>())
            .copied();
        assert_eq!(
            opts,
            Some(RandomOptions {
                width_low: 0.6,
                width_high: 1.4,
                seed: Some(42),
            })
        );
    }

    #[test]
    fn random_clock_sets_a_seed() {
        let cfg = DistConfig::random_clock(0.5, 1.5);
        let seed = cfg
            .options
            .as_ref()
            .and_then(|o| o.get::<RandomOptions>())
            .and_then(|o| o.seed);
        assert!(seed.is_some());
    }

    #[test]
    fn uniform_has_no_payload() {
        let cfg = DistConfig::uniform();
        assert_eq!(cfg.tag, DistributionTag::UNIFORM);
        assert!(cfg.options.is_none());
    }
}
