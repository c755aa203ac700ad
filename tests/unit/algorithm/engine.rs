//! Tests for single-pass cluster generation

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use percolate::PercolationError;
    use percolate::algorithm::diagonal::{DiagonalBond, DiagonalBonds};
    use percolate::algorithm::engine::ClusterEngine;
    use percolate::math::random::Xorshift64Star;
    use percolate::spatial::lattice::Color;

    fn checkerboard(rows: usize, cols: usize) -> Array2<Color> {
        Array2::from_shape_fn((rows, cols), |(row, col)| Color::from((row + col) % 2 == 0))
    }

    fn per_color(white: f64, black: f64) -> DiagonalBonds {
        DiagonalBonds::PerColor { white, black }
    }

    #[test]
    fn test_new_rejects_invalid_setup() {
        assert!(matches!(
            ClusterEngine::new(0, 3, 0.5, DiagonalBonds::default()),
            Err(PercolationError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            ClusterEngine::new(3, 3, 1.5, DiagonalBonds::default()),
            Err(PercolationError::InvalidParameter {
                parameter: "black",
                ..
            })
        ));
        assert!(ClusterEngine::new(3, 3, 0.5, per_color(0.0, 2.0)).is_err());
    }

    // Tests that a uniform grid collapses into one cluster rooted at label zero
    // Verified by skipping the up-neighbour union
    #[test]
    fn test_uniform_grid_is_single_cluster() {
        let mut rng = Xorshift64Star::new(1);
        for p in [0.0, 1.0] {
            let mut engine = ClusterEngine::new(4, 5, p, DiagonalBonds::default()).unwrap();
            engine.generate(&mut rng);
            for row in 0..4 {
                for col in 0..5 {
                    assert_eq!(engine.cluster_of(row, col), Some(0));
                }
            }
        }
    }

    // Tests that a checkerboard without diagonals leaves every cell alone
    // Verified by joining diagonals unconditionally
    #[test]
    fn test_checkerboard_without_diagonals_is_all_singletons() {
        let mut rng = Xorshift64Star::new(1);
        let mut engine = ClusterEngine::new(3, 4, 0.5, DiagonalBonds::default()).unwrap();
        engine.generate_from(&checkerboard(3, 4), &mut rng).unwrap();

        for row in 0..3 {
            for col in 0..4 {
                let label = engine.lattice().label(row, col);
                assert_eq!(engine.cluster_of(row, col), Some(label));
            }
        }
        assert_eq!(engine.diagonal_joins().opportunities(), 0);
    }

    // Tests that the white diagonal of a crossed block joins through L and U
    // Verified by joining X with UL for every successful bond
    #[test]
    fn test_white_diagonal_joins_anti_diagonal() {
        let mut rng = Xorshift64Star::new(1);
        let mut engine = ClusterEngine::new(2, 2, 0.5, per_color(1.0, 0.0)).unwrap();
        engine.generate_from(&checkerboard(2, 2), &mut rng).unwrap();

        assert_eq!(engine.cluster_of(0, 1), Some(1));
        assert_eq!(engine.cluster_of(1, 0), Some(1));
        assert_eq!(engine.cluster_of(0, 0), Some(0));
        assert_eq!(engine.cluster_of(1, 1), Some(3));
        assert_eq!(engine.diagonal_joins().white, 1);
    }

    // Tests that black diagonals chain across a checkerboard
    // Verified by resolving only blocks whose bottom-right cell is black
    #[test]
    fn test_black_diagonals_chain_across_checkerboard() {
        let mut rng = Xorshift64Star::new(1);
        let mut engine = ClusterEngine::new(3, 3, 0.5, per_color(0.0, 1.0)).unwrap();
        engine.generate_from(&checkerboard(3, 3), &mut rng).unwrap();

        for (row, col) in [(0, 0), (0, 2), (1, 1), (2, 0), (2, 2)] {
            assert_eq!(engine.cluster_of(row, col), Some(0));
        }
        for (row, col) in [(0, 1), (1, 0), (1, 2), (2, 1)] {
            let label = engine.lattice().label(row, col);
            assert_eq!(engine.cluster_of(row, col), Some(label));
        }
        assert_eq!(engine.diagonal_joins().black, 4);
    }

    // Tests that a crossed block never gets both diagonals
    // Verified by resolving each color with its own trial and no tie-break
    #[test]
    fn test_crossed_block_joins_one_diagonal() {
        for seed in 1..50 {
            let mut rng = Xorshift64Star::new(seed);
            let mut engine = ClusterEngine::new(2, 2, 0.5, per_color(1.0, 1.0)).unwrap();
            engine.generate_from(&checkerboard(2, 2), &mut rng).unwrap();

            let black_joined = engine.cluster_of(0, 0) == engine.cluster_of(1, 1);
            let white_joined = engine.cluster_of(0, 1) == engine.cluster_of(1, 0);
            assert!(black_joined != white_joined, "seed {seed}");
            assert_eq!(engine.diagonal_joins().opportunities(), 1);
        }
    }

    // A black ring around the bottom-right crossed block already connects its
    // anti-diagonal, so the white diagonal faces no competition
    fn ring() -> Array2<Color> {
        Array2::from_shape_fn((3, 3), |(row, col)| {
            Color::from(!matches!((row, col), (1, 1) | (2, 2)))
        })
    }

    // Tests an uncontested diagonal joins on its own bond probability
    // Verified by always running the two-color tie-break
    #[test]
    fn test_uncontested_diagonal_uses_own_bond() {
        for seed in 1..=500 {
            let mut rng = Xorshift64Star::new(seed);
            let mut engine = ClusterEngine::new(3, 3, 0.5, per_color(1.0, 1.0)).unwrap();
            engine.generate_from(&ring(), &mut rng).unwrap();

            assert_eq!(engine.cluster_of(2, 2), Some(4), "seed {seed}");
            assert_eq!(engine.diagonal_joins().white, 1);
            assert_eq!(engine.diagonal_joins().black, 0);
            assert_eq!(
                engine.diagonal_bonds(),
                [DiagonalBond {
                    block: 8,
                    color: Color::White,
                }]
            );
        }
    }

    // Tests an uncontested diagonal with a zero bond is skipped, not credited
    // to the already connected color
    // Verified by recording the tie-break winner for connected anti-diagonals
    #[test]
    fn test_uncontested_diagonal_without_bond_is_skipped() {
        let mut rng = Xorshift64Star::new(3);
        let mut engine = ClusterEngine::new(3, 3, 0.5, per_color(0.0, 1.0)).unwrap();
        engine.generate_from(&ring(), &mut rng).unwrap();

        assert_eq!(engine.cluster_of(2, 2), Some(8));
        assert_eq!(engine.diagonal_joins().black, 0);
        assert_eq!(engine.diagonal_joins().skipped, 1);
        assert!(engine.diagonal_bonds().is_empty());
    }

    #[test]
    fn test_generate_from_rejects_wrong_shape() {
        let mut rng = Xorshift64Star::new(1);
        let mut engine = ClusterEngine::new(2, 3, 0.5, DiagonalBonds::default()).unwrap();
        let result = engine.generate_from(&checkerboard(3, 2), &mut rng);
        assert!(matches!(
            result,
            Err(PercolationError::InvalidParameter {
                parameter: "pattern",
                ..
            })
        ));
    }

    #[test]
    fn test_cluster_of_outside_grid() {
        let engine = ClusterEngine::new(2, 2, 0.5, DiagonalBonds::default()).unwrap();
        assert_eq!(engine.cluster_of(2, 0), None);
        assert_eq!(engine.cluster_of(0, 2), None);
    }

    // Tests that the same seed yields the same grid and partition
    // Verified by seeding each generation from the clock
    #[test]
    fn test_generation_is_deterministic() {
        let bonds = per_color(0.3, 0.6);
        let mut first = ClusterEngine::new(20, 30, 0.45, bonds).unwrap();
        let mut second = ClusterEngine::new(20, 30, 0.45, bonds).unwrap();

        first.generate(&mut Xorshift64Star::new(77));
        second.generate(&mut Xorshift64Star::new(77));

        assert_eq!(first.lattice().view(), second.lattice().view());
        assert_eq!(first.diagonal_joins(), second.diagonal_joins());
        for row in 0..20 {
            for col in 0..30 {
                assert_eq!(first.cluster_of(row, col), second.cluster_of(row, col));
            }
        }
    }

    // Tests that disabled diagonals draw exactly one value per cell
    // Verified by resolving crossed blocks through the policy when disabled
    #[test]
    fn test_disabled_diagonals_draw_once_per_cell() {
        let mut rng = Xorshift64Star::new(11);
        let mut reference = Xorshift64Star::new(11);
        let mut engine = ClusterEngine::new(6, 7, 0.5, DiagonalBonds::default()).unwrap();

        engine.generate(&mut rng);
        for _ in 0..42 {
            reference.next_raw();
        }

        assert_eq!(rng, reference);
        assert_eq!(engine.diagonal_joins().opportunities(), 0);
    }
}
