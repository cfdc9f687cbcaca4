//! Mesh quality metrics.
//!
//! Functions take a slice of lengths (usually [`Grid1D::face_widths`]) so they
//! can be applied to any array. The `*_of` helpers apply them to a grid's
//! face widths. Empty input yields the documented neutral value of each
//! metric rather than an error.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::grid::Grid1D;

/// Smallest ratio fed to the logarithm in [`geometric_progression`].
const MIN_LOG_RATIO: f64 = 1e-300;

/// Minimum, maximum and mean of a set of values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
}

/// [`Summary`] of `values`; all zero when empty.
#[cfg(not(feature = "parallel"))]
pub fn summary(values: &[f64]) -> Summary {
    if values.is_empty() {
        return Summary::default();
    }
    let (min, max, sum) = values.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, 0.0),
        |(lo, hi, sum), &v| (lo.min(v), hi.max(v), sum + v),
    );
    Summary {
        min,
        max,
        mean: sum / values.len() as f64,
    }
}

/// [`Summary`] of `values`; all zero when empty.
#[cfg(feature = "parallel")]
pub fn summary(values: &[f64]) -> Summary {
    if values.is_empty() {
        return Summary::default();
    }
    let (min, max, sum) = values
        .par_iter()
        .map(|&v| (v, v, v))
        .reduce(
            || (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |a, b| (a.0.min(b.0), a.1.max(b.1), a.2 + b.2),
        );
    Summary {
        min,
        max,
        mean: sum / values.len() as f64,
    }
}

/// Spread statistics of a set of lengths.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Basic {
    /// Smallest length.
    pub min: f64,
    /// Largest length.
    pub max: f64,
    /// Mean length.
    pub mean: f64,
    /// Population standard deviation.
    pub stddev: f64,
    /// `max / min`; infinite when the minimum is not positive.
    pub aspect: f64,
    /// Coefficient of variation `stddev / mean`; zero when the mean is not
    /// positive.
    pub cv: f64,
}

/// [`Basic`] statistics of `lengths`; all zero when empty.
pub fn basic(lengths: &[f64]) -> Basic {
    if lengths.is_empty() {
        return Basic::default();
    }
    let Summary { min, max, mean } = summary(lengths);
    let variance = lengths.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / lengths.len() as f64;
    let stddev = variance.sqrt();
    Basic {
        min,
        max,
        mean,
        stddev,
        aspect: if min > 0.0 { max / min } else { f64::INFINITY },
        cv: if mean > 0.0 { stddev / mean } else { 0.0 },
    }
}

/// Relative uniformity `1 - mean(|L - mean|) / mean`, clamped to `[0, 1]`.
///
/// 1 means every length is identical. Empty input or a zero mean gives 0.
pub fn uniformity(lengths: &[f64]) -> f64 {
    if lengths.is_empty() {
        return 0.0;
    }
    let n = lengths.len() as f64;
    let mean = lengths.iter().sum::<f64>() / n;
    if mean == 0.0 {
        return 0.0;
    }
    let deviation: f64 = lengths.iter().map(|x| (x - mean).abs()).sum();
    (1.0 - deviation / (n * mean)).clamp(0.0, 1.0)
}

/// Equal-width histogram.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Histogram {
    /// Lower edge of the first bin.
    pub bin_min: f64,
    /// Upper edge of the last bin.
    pub bin_max: f64,
    /// Width of each bin.
    pub bin_width: f64,
    /// Count per bin.
    pub counts: Vec<usize>,
}

/// Bin `values` into `bins` equal bins over `range`, or over the data range
/// when `range` is `None`.
///
/// Values at or below the lower edge land in the first bin, values at or
/// above the upper edge in the last. A degenerate range `hi <= lo` is widened
/// to `[lo, lo + 1]`. Empty input or zero bins yield an empty histogram.
pub fn histogram(values: &[f64], bins: usize, range: Option<(f64, f64)>) -> Histogram {
    if values.is_empty() || bins == 0 {
        return Histogram::default();
    }
    let (lo, mut hi) = range.unwrap_or_else(|| {
        let s = summary(values);
        (s.min, s.max)
    });
    if !(hi > lo) {
        hi = lo + 1.0;
    }
    let mut counts = vec![0; bins];
    for &x in values {
        let k = if x <= lo {
            0
        } else if x >= hi {
            bins - 1
        } else {
            (((x - lo) / (hi - lo) * bins as f64) as usize).min(bins - 1)
        };
        counts[k] += 1;
    }
    Histogram {
        bin_min: lo,
        bin_max: hi,
        bin_width: (hi - lo) / bins as f64,
        counts,
    }
}

/// Ratios between neighbouring lengths.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacentRatios {
    /// `L[i+1] / L[i]`; infinite where `L[i]` is zero.
    pub ratios: Vec<f64>,
    /// Largest ratio, at least 1.
    pub max_ratio: f64,
    /// Largest of `max(r, 1/r)`, at least 1.
    pub worst_symmetric_ratio: f64,
}

impl Default for AdjacentRatios {
    fn default() -> Self {
        Self {
            ratios: Vec::new(),
            max_ratio: 1.0,
            worst_symmetric_ratio: 1.0,
        }
    }
}

/// Growth ratios between consecutive lengths.
pub fn adjacent_ratios(lengths: &[f64]) -> AdjacentRatios {
    let mut out = AdjacentRatios::default();
    for w in lengths.windows(2) {
        let r = if w[0] != 0.0 { w[1] / w[0] } else { f64::INFINITY };
        let symmetric = if r > 0.0 { r.max(1.0 / r) } else { f64::INFINITY };
        out.ratios.push(r);
        out.max_ratio = out.max_ratio.max(r);
        out.worst_symmetric_ratio = out.worst_symmetric_ratio.max(symmetric);
    }
    out
}

/// Relative jumps between neighbouring lengths.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Smoothness {
    /// Mean of `|L[i+1] - L[i]| / min(L[i], L[i+1])`.
    pub mean_grad: f64,
    /// Maximum of the same quantity.
    pub max_grad: f64,
}

/// Relative gradient of the length sequence; pairs with a non-positive
/// minimum contribute zero.
pub fn smoothness(lengths: &[f64]) -> Smoothness {
    if lengths.len() < 2 {
        return Smoothness::default();
    }
    let grads: Vec<f64> = lengths
        .windows(2)
        .map(|w| {
            let denom = w[0].min(w[1]);
            if denom > 0.0 {
                (w[1] - w[0]).abs() / denom
            } else {
                0.0
            }
        })
        .collect();
    Smoothness {
        mean_grad: grads.iter().sum::<f64>() / grads.len() as f64,
        max_grad: grads.iter().copied().fold(0.0, f64::max),
    }
}

/// Boundary cells compared to the interior.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeBalance {
    /// Mean of the lengths excluding the first and last.
    pub mean_interior: f64,
    /// `L[0] / mean_interior`.
    pub left_over_interior: f64,
    /// `L[N-1] / mean_interior`.
    pub right_over_interior: f64,
}

/// Boundary lengths relative to the interior mean; all zero with fewer than
/// three lengths.
pub fn edges_vs_interior(lengths: &[f64]) -> EdgeBalance {
    let n = lengths.len();
    if n <= 2 {
        return EdgeBalance::default();
    }
    let mean_interior = lengths[1..n - 1].iter().sum::<f64>() / (n - 2) as f64;
    if mean_interior > 0.0 {
        EdgeBalance {
            mean_interior,
            left_over_interior: lengths[0] / mean_interior,
            right_over_interior: lengths[n - 1] / mean_interior,
        }
    } else {
        EdgeBalance {
            mean_interior,
            ..EdgeBalance::default()
        }
    }
}

/// Mirror symmetry of a length sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Symmetry {
    /// `1 - sum|L[i] - L[n-1-i]| / sum max(...)` over the first half, in
    /// `[0, 1]`; 1 is perfectly symmetric.
    pub score: f64,
    /// Largest `|L[i] - L[n-1-i]| / max(L[i], L[n-1-i])`.
    pub max_rel_diff: f64,
}

impl Default for Symmetry {
    fn default() -> Self {
        Self {
            score: 1.0,
            max_rel_diff: 0.0,
        }
    }
}

/// Compare each length with its mirror image.
pub fn symmetry(lengths: &[f64]) -> Symmetry {
    let n = lengths.len();
    let (mut num, mut den, mut max_rel) = (0.0, 0.0, 0.0_f64);
    for i in 0..n / 2 {
        let (a, b) = (lengths[i], lengths[n - 1 - i]);
        let diff = (a - b).abs();
        let larger = a.max(b);
        num += diff;
        den += larger;
        if larger > 0.0 {
            max_rel = max_rel.max(diff / larger);
        }
    }
    Symmetry {
        score: if den > 0.0 {
            (1.0 - num / den).clamp(0.0, 1.0)
        } else {
            1.0
        },
        max_rel_diff: max_rel,
    }
}

/// Fit of a length sequence to a geometric progression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometricFit {
    /// Estimated common ratio, `exp(mean(log r))`.
    pub ratio: f64,
    /// Standard deviation of `log r`.
    pub std_log_ratio: f64,
    /// Largest `|r_i - ratio|`.
    pub max_deviation: f64,
    /// Whether `max_deviation <= tolerance`.
    pub within_tolerance: bool,
}

impl Default for GeometricFit {
    fn default() -> Self {
        Self {
            ratio: 1.0,
            std_log_ratio: 0.0,
            max_deviation: 0.0,
            within_tolerance: true,
        }
    }
}

/// Estimate how closely `lengths` follow `L[i+1] = r * L[i]`.
///
/// Pairs with a non-positive left length count as ratio 1.
pub fn geometric_progression(lengths: &[f64], tolerance: f64) -> GeometricFit {
    if lengths.len() < 2 {
        return GeometricFit::default();
    }
    let ratios: Vec<f64> = lengths
        .windows(2)
        .map(|w| if w[0] > 0.0 { w[1] / w[0] } else { 1.0 })
        .collect();
    let logs: Vec<f64> = ratios.iter().map(|r| r.max(MIN_LOG_RATIO).ln()).collect();
    let m = logs.len() as f64;
    let mean_log = logs.iter().sum::<f64>() / m;
    let std_log_ratio = (logs.iter().map(|t| (t - mean_log).powi(2)).sum::<f64>() / m).sqrt();
    let ratio = mean_log.exp();
    let max_deviation = ratios.iter().map(|r| (r - ratio).abs()).fold(0.0, f64::max);
    GeometricFit {
        ratio,
        std_log_ratio,
        max_deviation,
        within_tolerance: max_deviation <= tolerance,
    }
}

/// Aggregate over the cells selected by a region query.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RegionStats {
    /// Number of selected cells.
    pub count: usize,
    /// Sum of their lengths.
    pub sum: f64,
    /// Mean of their lengths; zero when nothing is selected.
    pub mean: f64,
}

/// Aggregate `lengths[i]` over cells whose center satisfies `pred`.
///
/// Returns the empty aggregate when the slices differ in length.
pub fn region_where<P>(centers: &[f64], lengths: &[f64], pred: P) -> RegionStats
where
    P: Fn(f64) -> bool,
{
    if centers.len() != lengths.len() {
        return RegionStats::default();
    }
    let (count, sum) = centers
        .iter()
        .zip(lengths)
        .filter(|(c, _)| pred(**c))
        .fold((0, 0.0), |(count, sum), (_, l)| (count + 1, sum + l));
    RegionStats {
        count,
        sum,
        mean: if count > 0 { sum / count as f64 } else { 0.0 },
    }
}

/// Aggregate over cells whose center lies in the closed interval between
/// `x0` and `x1`, in either order.
pub fn region_interval(centers: &[f64], lengths: &[f64], x0: f64, x1: f64) -> RegionStats {
    let (lo, hi) = if x1 < x0 { (x1, x0) } else { (x0, x1) };
    region_where(centers, lengths, |x| x >= lo && x <= hi)
}

/// [`summary`] of a grid's face widths.
pub fn face_summary_of(grid: &Grid1D) -> Summary {
    summary(grid.face_widths())
}

/// [`summary`] of a grid's center gaps.
pub fn center_summary_of(grid: &Grid1D) -> Summary {
    summary(grid.center_gaps())
}

/// [`region_interval`] over a grid's centers and face widths.
pub fn region_of(grid: &Grid1D, x0: f64, x1: f64) -> RegionStats {
    region_interval(grid.centers(), grid.face_widths(), x0, x1)
}

/// Every face-width metric for one grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Spread statistics.
    pub basic: Basic,
    /// Relative uniformity.
    pub uniformity: f64,
    /// Neighbour ratios.
    pub ratios: AdjacentRatios,
    /// Relative gradients.
    pub smoothness: Smoothness,
    /// Boundary balance.
    pub edges: EdgeBalance,
    /// Mirror symmetry.
    pub symmetry: Symmetry,
    /// Geometric progression fit.
    pub geometric: GeometricFit,
    /// Width histogram.
    pub histogram: Histogram,
}

impl Report {
    /// Tolerance used for the geometric progression fit.
    pub const GEOMETRIC_TOLERANCE: f64 = 1e-6;

    /// Compute every metric over `grid`'s face widths, with a `bins`-bin
    /// histogram.
    pub fn of(grid: &Grid1D, bins: usize) -> Self {
        let widths = grid.face_widths();
        Self {
            basic: basic(widths),
            uniformity: uniformity(widths),
            ratios: adjacent_ratios(widths),
            smoothness: smoothness(widths),
            edges: edges_vs_interior(widths),
            symmetry: symmetry(widths),
            geometric: geometric_progression(widths, Self::GEOMETRIC_TOLERANCE),
            histogram: histogram(widths, bins, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn summary_and_basic() {
        let s = summary(&[2.0, 4.0, 6.0]);
        assert_eq!(s, Summary { min: 2.0, max: 6.0, mean: 4.0 });

        let b = basic(&[1.0, 3.0]);
        assert_relative_eq!(b.stddev, 1.0);
        assert_relative_eq!(b.aspect, 3.0);
        assert_relative_eq!(b.cv, 0.5);

        assert_eq!(basic(&[0.0, 1.0]).aspect, f64::INFINITY);
        assert_eq!(basic(&[]), Basic::default());
    }

    #[test]
    fn uniformity_bounds() {
        assert_eq!(uniformity(&[0.5; 8]), 1.0);
        assert_relative_eq!(uniformity(&[1.0, 3.0]), 0.5);
        assert_eq!(uniformity(&[]), 0.0);
        assert_eq!(uniformity(&[0.0, 0.0]), 0.0);
    }

    #[test]
    fn histogram_edges_absorb_out_of_range() {
        let h = histogram(&[-1.0, 0.0, 0.25, 0.5, 0.99, 1.0, 2.0], 4, Some((0.0, 1.0)));
        assert_eq!(h.counts, vec![2, 1, 1, 3]);
        assert_relative_eq!(h.bin_width, 0.25);

        let flat = histogram(&[3.0, 3.0], 2, None);
        assert_eq!((flat.bin_min, flat.bin_max), (3.0, 4.0));
        assert_eq!(flat.counts, vec![2, 0]);

        assert!(histogram(&[1.0], 0, None).counts.is_empty());
    }

    #[test]
    fn adjacent_ratio_extremes() {
        let r = adjacent_ratios(&[1.0, 2.0, 0.5]);
        assert_eq!(r.ratios, vec![2.0, 0.25]);
        assert_eq!(r.max_ratio, 2.0);
        assert_eq!(r.worst_symmetric_ratio, 4.0);

        let single = adjacent_ratios(&[1.0]);
        assert_eq!(single, AdjacentRatios::default());
    }

    #[test]
    fn smoothness_of_steps() {
        let s = smoothness(&[1.0, 2.0, 2.0]);
        assert_relative_eq!(s.mean_grad, 0.5);
        assert_relative_eq!(s.max_grad, 1.0);
    }

    #[test]
    fn edges_need_an_interior() {
        assert_eq!(edges_vs_interior(&[1.0, 2.0]), EdgeBalance::default());
        let e = edges_vs_interior(&[0.5, 1.0, 1.0, 2.0]);
        assert_relative_eq!(e.mean_interior, 1.0);
        assert_relative_eq!(e.left_over_interior, 0.5);
        assert_relative_eq!(e.right_over_interior, 2.0);
    }

    #[test]
    fn symmetry_scores() {
        assert_eq!(symmetry(&[1.0, 2.0, 1.0]).score, 1.0);
        let s = symmetry(&[1.0, 3.0]);
        assert_relative_eq!(s.score, 1.0 - 2.0 / 3.0);
        assert_relative_eq!(s.max_rel_diff, 2.0 / 3.0);
    }

    #[test]
    fn geometric_progression_detects_constant_ratio() {
        let g = geometric_progression(&[1.0, 2.0, 4.0, 8.0], 1e-9);
        assert_relative_eq!(g.ratio, 2.0, epsilon = 1e-12);
        assert!(g.std_log_ratio < 1e-12);
        assert!(g.within_tolerance);

        let g = geometric_progression(&[1.0, 2.0, 2.0], 1e-6);
        assert!(!g.within_tolerance);
    }

    #[test]
    fn region_interval_accepts_reversed_bounds() {
        let centers = [0.1, 0.3, 0.5, 0.7];
        let lengths = [0.2, 0.2, 0.2, 0.4];
        let r = region_interval(&centers, &lengths, 0.8, 0.5);
        assert_eq!(r.count, 2);
        assert_relative_eq!(r.sum, 0.6);
        assert_relative_eq!(r.mean, 0.3);
        assert_eq!(region_interval(&centers, &lengths[..2], 0.0, 1.0).count, 0);
    }
}
