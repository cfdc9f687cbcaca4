//! Command handlers for the `fvg` CLI.
//!
//! These functions build grids from parsed arguments and write tables and
//! reports to any writer, so they can be exercised without a terminal.

use std::io::Write;

use anyhow::{Result, anyhow};
use fvgrid::{
    DistributionRegistry, DistributionTag, Grid1D, GridBuilder,
    distribution::RandomOptions,
    options::clock_seed,
    stats::{self, Report},
};

use crate::GridArgs;

/// Build the grid described by `args` using `registry`.
pub fn build_grid(registry: &DistributionRegistry, args: &GridArgs) -> Result<Grid1D> {
    let tag = registry
        .tag_for_name(&args.distribution)
        .ok_or_else(|| anyhow!("distribution '{}' is not registered", args.distribution))?;

    let mut builder = GridBuilder::new(registry)
        .cells(args.cells)
        .domain(args.domain.lower, args.domain.upper)
        .distribution(tag)
        .centering(args.centering)
        .checks(args.checks.into());

    if tag == DistributionTag::RANDOM {
        let seed = if args.clock_seed {
            Some(clock_seed())
        } else {
            args.seed
        };
        tracing::debug!(low = args.low, high = args.high, ?seed, "random options");
        builder = builder.random_options(RandomOptions {
            width_low: args.low,
            width_high: args.high,
            seed,
        });
    }

    Ok(builder.build()?)
}

/// Write one CSV row per face: index, face, and the cell to its right.
///
/// The last row has no cell, so its center and width columns are empty.
pub fn write_csv(grid: &Grid1D, out: &mut impl Write) -> Result<()> {
    writeln!(out, "index,face,center,face_width,center_gap")?;
    for i in 0..grid.face_count() {
        let face = grid.face(i).unwrap_or_default();
        let gap = grid.center_gap(i).unwrap_or_default();
        match (grid.center(i), grid.face_width(i)) {
            (Some(center), Some(width)) => {
                writeln!(out, "{i},{face:.15e},{center:.15e},{width:.15e},{gap:.15e}")?;
            }
            _ => writeln!(out, "{i},{face:.15e},,,{gap:.15e}")?,
        }
    }
    out.flush()?;
    Ok(())
}

/// Write the face-width quality report for `grid`.
pub fn write_report(grid: &Grid1D, bins: usize, out: &mut impl Write) -> Result<()> {
    let report = Report::of(grid, bins);
    let (a, b) = grid.domain();
    let basic = &report.basic;

    writeln!(out, "cells:            {}", grid.cell_count())?;
    writeln!(out, "domain:           [{a}, {b}]")?;
    writeln!(out, "width min:        {:.6e}", basic.min)?;
    writeln!(out, "width max:        {:.6e}", basic.max)?;
    writeln!(out, "width mean:       {:.6e}", basic.mean)?;
    writeln!(out, "width stddev:     {:.6e}", basic.stddev)?;
    writeln!(out, "aspect (max/min): {:.6}", basic.aspect)?;
    writeln!(out, "cv:               {:.6}", basic.cv)?;
    writeln!(out, "uniformity:       {:.6}", report.uniformity)?;
    writeln!(out, "max ratio:        {:.6}", report.ratios.max_ratio)?;
    writeln!(
        out,
        "worst sym ratio:  {:.6}",
        report.ratios.worst_symmetric_ratio
    )?;
    writeln!(out, "mean gradient:    {:.6}", report.smoothness.mean_grad)?;
    writeln!(out, "max gradient:     {:.6}", report.smoothness.max_grad)?;
    writeln!(
        out,
        "edges/interior:   {:.6} / {:.6}",
        report.edges.left_over_interior, report.edges.right_over_interior
    )?;
    writeln!(out, "symmetry:         {:.6}", report.symmetry.score)?;
    writeln!(
        out,
        "geometric ratio:  {:.6} (std log {:.3e}, {})",
        report.geometric.ratio,
        report.geometric.std_log_ratio,
        if report.geometric.within_tolerance {
            "geometric"
        } else {
            "not geometric"
        }
    )?;

    let hist = &report.histogram;
    if !hist.counts.is_empty() {
        writeln!(out, "histogram:")?;
        for (k, count) in hist.counts.iter().enumerate() {
            let lo = hist.bin_min + k as f64 * hist.bin_width;
            writeln!(
                out,
                "  [{lo:.6e}, {:.6e}) {count}",
                lo + hist.bin_width
            )?;
        }
    }
    Ok(())
}

/// Write aggregate widths for cells whose centers lie between `x0` and `x1`.
pub fn write_region(grid: &Grid1D, x0: f64, x1: f64, out: &mut impl Write) -> Result<()> {
    let region = stats::region_of(grid, x0, x1);
    writeln!(
        out,
        "region [{}, {}]: {} cells, total width {:.6e}, mean width {:.6e}",
        x0.min(x1),
        x0.max(x1),
        region.count,
        region.sum,
        region.mean
    )?;
    Ok(())
}

/// List registered distributions with their tags.
pub fn list_distributions(registry: &DistributionRegistry, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Registered distributions (name — tag):")?;
    let tags = registry.tags();
    for name in registry.names() {
        let tag = tags
            .iter()
            .find(|(_, n)| *n == name)
            .map_or_else(|| "-".to_string(), |(t, _)| t.id().to_string());
        writeln!(out, "- {name} — {tag}")?;
    }
    Ok(())
}
