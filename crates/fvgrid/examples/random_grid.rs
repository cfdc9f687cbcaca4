//! Build a seeded random grid and print its cells and quality metrics.

use std::error::Error;

use fvgrid::{CenteringTag, DistConfig, DistributionRegistry, GridBuilder, stats};

fn main() -> Result<(), Box<dyn Error>> {
    // snips-start: example
    let registry = DistributionRegistry::with_builtins();
    let grid = GridBuilder::new(&registry)
        .cells(8)
        .domain(0.0, 2.0)
        .centering(CenteringTag::FaceCentered)
        .configure(DistConfig::random_fixed(0.6, 1.4, 42))
        .build()?;

    for (i, (left, center, right)) in grid.cells().enumerate() {
        println!("cell {i}: [{left:.6}, {right:.6}] center {center:.6}");
    }

    let basic = stats::basic(grid.face_widths());
    println!(
        "min {:.6} max {:.6} aspect {:.3} uniformity {:.3}",
        basic.min,
        basic.max,
        basic.aspect,
        stats::uniformity(grid.face_widths())
    );
    // snips-end: example

    Ok(())
}
