#![allow(missing_docs, clippy::tests_outside_test_module)]

use fvgrid::{
    CenteringTag, DistConfig, DistributionRegistry, GridBuilder,
    distribution::random::project_bounded_simplex,
};
use proptest::prelude::*;

/// Domain bounds with `b > a` and a length well away from zero.
fn domain() -> impl Strategy<Value = (f64, f64)> {
    (-10.0f64..10.0, 1e-3f64..50.0).prop_map(|(a, len)| (a, a + len))
}

fn centering() -> impl Strategy<Value = CenteringTag> {
    prop_oneof![
        Just(CenteringTag::FaceCentered),
        Just(CenteringTag::CellCentered)
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn random_grids_hold_invariants(
        n in 1usize..400,
        (a, b) in domain(),
        low in 0.05f64..1.0,
        high in 1.0f64..3.0,
        seed in any::<u64>(),
        centering in centering(),
    ) {
        let registry = DistributionRegistry::with_builtins();
        let grid = GridBuilder::new(&registry)
            .cells(n)
            .domain(a, b)
            .centering(centering)
            .configure(DistConfig::random_fixed(low, high, seed))
            .build()
            .expect("valid configuration builds");

        let len = b - a;
        let dx0 = len / n as f64;
        let widths = grid.face_widths();
        prop_assert!(grid.faces().windows(2).all(|w| w[1] > w[0]));
        prop_assert!(grid.centers().windows(2).all(|w| w[1] > w[0]));
        for d in widths {
            prop_assert!(*d >= low * dx0 * (1.0 - 1e-6) - 1e-10);
            prop_assert!(*d <= high * dx0 * (1.0 + 1e-6) + 1e-10);
        }
        let tol = 1e-9 * len.max(1.0);
        prop_assert!((widths.iter().sum::<f64>() - len).abs() <= tol);
        prop_assert!((grid.center_gaps().iter().sum::<f64>() - len).abs() <= tol);
    }

    #[test]
    fn random_grids_are_reproducible(
        n in 1usize..200,
        seed in any::<u64>(),
    ) {
        let registry = DistributionRegistry::with_builtins();
        let build = || {
            GridBuilder::new(&registry)
                .cells(n)
                .domain(0.0, 1.0)
                .configure(DistConfig::random_fixed(0.5, 1.5, seed))
                .build()
                .expect("valid configuration builds")
        };
        let (first, second) = (build(), build());
        prop_assert_eq!(first.faces(), second.faces());
        prop_assert_eq!(first.centers(), second.centers());
    }

    #[test]
    fn cell_centered_faces_are_center_midpoints(
        n in 2usize..300,
        seed in any::<u64>(),
    ) {
        let registry = DistributionRegistry::with_builtins();
        let grid = GridBuilder::new(&registry)
            .cells(n)
            .domain(0.0, 1.0)
            .centering(CenteringTag::CellCentered)
            .configure(DistConfig::random_fixed(0.5, 1.5, seed))
            .build()
            .expect("valid configuration builds");
        let (faces, centers) = (grid.faces(), grid.centers());
        for i in 1..n {
            prop_assert!((faces[i] - 0.5 * (centers[i - 1] + centers[i])).abs() <= 1e-12);
        }
    }

    #[test]
    fn projection_is_feasible(
        weights in prop::collection::vec(-1.0f64..10.0, 1..200),
        low in 0.0f64..1.0,
        high in 1.0f64..4.0,
    ) {
        let n = weights.len() as f64;
        let x = project_bounded_simplex(&weights, low, high, n);
        prop_assert_eq!(x.len(), weights.len());
        for v in &x {
            prop_assert!(*v >= low && *v <= high, "{} outside [{}, {}]", v, low, high);
        }
        prop_assert!((x.iter().sum::<f64>() - n).abs() <= 1e-9 * n.max(1.0));
    }
}
