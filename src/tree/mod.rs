pub mod packed;
pub mod predict;
pub mod tree;

// Unit-testing
#[cfg(test)]
mod tests {
    use crate::config::GeneratorConfig;
    use crate::errors::ForestError;
    use crate::generate::{depth2_forest, depth2_tree, feature_vector};
    use crate::lanes::{LANE_FALSE, LANE_TRUE};
    use crate::node::{Node, RawNode};
    use crate::tree::packed::{PackedForest, PackedTree};
    use crate::tree::predict::{paired_mask, rf_eval_paired, tree_eval_paired};
    use crate::tree::tree::{rf_eval, tree_eval, Forest, Tree};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn example_tree() -> Tree {
        Tree::depth2((0, 0.0), (1, 0.0), (1, 0.0), [10.0, 20.0, 30.0, 40.0])
    }

    const ROUTES: [([f32; 2], f32); 4] = [([-1.0, -1.0], 10.0), ([-1.0, 1.0], 20.0), ([1.0, -1.0], 30.0), ([1.0, 1.0], 40.0)];

    fn assert_one_lane_per_tree(mask: &[u32; 8]) {
        for half in mask.chunks_exact(4) {
            assert!(half.iter().all(|l| *l == LANE_TRUE || *l == LANE_FALSE));
            assert_eq!(half.iter().filter(|l| **l == LANE_TRUE).count(), 1);
        }
    }

    #[test]
    fn test_tree_eval_routes() {
        let tree = example_tree();
        for (features, expected) in ROUTES {
            assert_eq!(tree_eval(&tree, &features), expected);
        }
        // ties go left
        assert_eq!(tree_eval(&tree, &[0.0, 0.0]), 10.0);
        // NaN goes right
        assert_eq!(tree_eval(&tree, &[f32::NAN, f32::NAN]), 40.0);
    }

    #[test]
    fn test_packed_tree_routes() {
        let packed = PackedTree::from_tree(&example_tree()).unwrap();
        assert_eq!(packed.features, [0, 1, 1]);
        assert_eq!(packed.leaves, [10.0, 20.0, 30.0, 40.0]);
        for (features, expected) in ROUTES {
            assert_eq!(packed.eval(&features), expected);
        }
    }

    #[test]
    fn test_paired_routes_and_mask() {
        let packed = PackedTree::from_tree(&example_tree()).unwrap();
        for (i, (fa, ea)) in ROUTES.iter().enumerate() {
            assert_eq!(tree_eval_paired(&packed, &packed, fa), 2.0 * ea);
            let mask = paired_mask(&packed, &packed, fa);
            assert_one_lane_per_tree(&mask);
            assert_eq!(mask[i], LANE_TRUE);
            assert_eq!(mask[4 + i], LANE_TRUE);
        }
    }

    #[test]
    fn test_paired_on_different_trees() {
        let a = PackedTree::from_tree(&example_tree()).unwrap();
        let b = PackedTree::from_tree(&Tree::depth2((1, 0.0), (0, 0.0), (0, 0.5), [1.0, 2.0, 3.0, 4.0])).unwrap();
        // a goes right-left (30), b goes left-right (2)
        let features = [1.0, -1.0];
        assert_eq!(tree_eval_paired(&a, &b, &features), 32.0);
        assert_eq!(
            paired_mask(&a, &b, &features),
            [LANE_FALSE, LANE_FALSE, LANE_TRUE, LANE_FALSE, LANE_FALSE, LANE_TRUE, LANE_FALSE, LANE_FALSE]
        );
    }

    #[test]
    fn test_mask_has_one_lane_per_tree_on_ties_and_nan() {
        let tree = example_tree();
        let packed = PackedTree::from_tree(&tree).unwrap();
        let cases = [[0.0, 0.0], [0.0, f32::NAN], [f32::NAN, 0.0], [f32::NAN, f32::NAN], [-0.0, 1.0]];
        for features in cases {
            assert_one_lane_per_tree(&paired_mask(&packed, &packed, &features));
            assert_eq!(
                tree_eval_paired(&packed, &packed, &features),
                2.0 * tree_eval(&tree, &features)
            );
        }
    }

    #[test]
    fn test_random_pairs_match_scalar() {
        let config = GeneratorConfig::default().set_n_features(8);
        let mut rng = StdRng::seed_from_u64(1234);
        for _ in 0..500 {
            let ta = depth2_tree(&mut rng, &config);
            let tb = depth2_tree(&mut rng, &config);
            let pa = PackedTree::from_tree(&ta).unwrap();
            let pb = PackedTree::from_tree(&tb).unwrap();
            let mut features = feature_vector(&mut rng, &config);
            // force some exact ties on split thresholds
            if rng.gen_bool(0.3) {
                features[pa.features[0] as usize] = pa.thresholds[0];
            }
            assert_one_lane_per_tree(&paired_mask(&pa, &pb, &features));
            let scalar = f64::from(tree_eval(&ta, &features)) + f64::from(tree_eval(&tb, &features));
            let vectorized = f64::from(tree_eval_paired(&pa, &pb, &features));
            assert!((scalar - vectorized).abs() <= 1e-7);
            assert_eq!(pa.eval(&features), tree_eval(&ta, &features));
        }
    }

    #[test]
    fn test_forest_averages_agree() {
        let config = GeneratorConfig::default().set_n_features(64).set_n_trees(2000);
        let mut rng = StdRng::seed_from_u64(99);
        let forest = depth2_forest(&mut rng, &config);
        let features = feature_vector(&mut rng, &config);
        let packed = PackedForest::from_forest(&forest).unwrap();
        let scalar = rf_eval(&forest, &features);
        let paired = rf_eval_paired(&packed, &features);
        assert!((scalar - paired).abs() <= 1e-7 * forest.len() as f64);
        // no hidden state between calls
        assert_eq!(rf_eval(&forest, &features).to_bits(), scalar.to_bits());
        assert_eq!(rf_eval_paired(&packed, &features).to_bits(), paired.to_bits());
    }

    #[test]
    fn test_forest_average_by_hand() {
        let forest = Forest::new(vec![example_tree(), example_tree()]);
        let packed = PackedForest::from_forest(&forest).unwrap();
        assert_eq!(rf_eval(&forest, &[1.0, -1.0]), 30.0);
        assert_eq!(rf_eval_paired(&packed, &[1.0, -1.0]), 30.0);
    }

    #[test]
    fn test_empty_forest() {
        let forest = Forest::default();
        let packed = PackedForest::from_forest(&forest).unwrap();
        assert!(packed.is_empty());
        assert!(rf_eval(&forest, &[]).is_nan());
        assert!(rf_eval_paired(&packed, &[]).is_nan());
    }

    #[test]
    fn test_odd_forest_is_rejected() {
        let forest: Forest = std::iter::repeat_with(example_tree).take(3).collect();
        assert_eq!(PackedForest::from_forest(&forest), Err(ForestError::OddTreeCount(3)));
    }

    #[test]
    fn test_from_raw_sentinel_nodes() {
        let raw: Vec<RawNode> = [(1, 2, 0, 0.0), (3, 4, 1, 0.0), (5, 6, 1, 0.0)]
            .iter()
            .map(|&(l, r, f, v)| RawNode {
                left_child: l,
                right_child: r,
                split_feature: f,
                split_value: v,
            })
            .chain([10.0, 20.0, 30.0, 40.0].iter().map(|&v| RawNode {
                left_child: 0,
                right_child: 0,
                split_feature: 0,
                split_value: v,
            }))
            .collect();
        let tree = Tree::from_raw(&raw).unwrap();
        assert_eq!(tree, example_tree());
        assert_eq!(tree.to_raw(), raw);
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.n_leaves(), 4);
    }

    #[test]
    fn test_malformed_trees_are_rejected() {
        assert!(matches!(Tree::new(vec![]), Err(ForestError::MalformedTree(_))));
        // child out of range
        let nodes = vec![Node::split(1, 5, 0, 0.0), Node::leaf(1.0)];
        assert!(matches!(Tree::new(nodes), Err(ForestError::MalformedTree(_))));
        // cycle back into an internal node
        let nodes = vec![Node::split(1, 2, 0, 0.0), Node::split(1, 2, 0, 0.0), Node::leaf(1.0)];
        assert!(matches!(Tree::new(nodes), Err(ForestError::MalformedTree(_))));
        // root used as a child
        let nodes = vec![Node::split(1, 0, 0, 0.0), Node::leaf(1.0)];
        assert!(matches!(Tree::new(nodes), Err(ForestError::MalformedTree(_))));
    }

    #[test]
    fn test_shallow_trees_are_padded() {
        let leaf_root = Tree::new(vec![Node::leaf(5.0)]).unwrap();
        let packed = PackedTree::from_tree(&leaf_root).unwrap();
        assert_eq!(packed, PackedTree::constant(5.0));

        // right child is a leaf at depth 1
        let lopsided = Tree::new(vec![
            Node::split(1, 2, 0, 0.0),
            Node::split(3, 4, 1, 0.0),
            Node::leaf(7.0),
            Node::leaf(1.0),
            Node::leaf(2.0),
        ])
        .unwrap();
        assert_eq!(lopsided.depth(), 2);
        let packed = PackedTree::from_tree(&lopsided).unwrap();
        assert_eq!(packed.leaves, [1.0, 2.0, 7.0, 7.0]);
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let features = [rng.gen_range(-1.0_f32..1.0), rng.gen_range(-1.0_f32..1.0)];
            let expected = tree_eval(&lopsided, &features) + tree_eval(&leaf_root, &features);
            assert_eq!(tree_eval_paired(&packed, &PackedTree::constant(5.0), &features), expected);
            assert_one_lane_per_tree(&paired_mask(&packed, &PackedTree::constant(5.0), &features));
        }
    }

    #[test]
    fn test_deep_tree_is_rejected() {
        let deep = Tree::new(vec![
            Node::split(1, 2, 0, 0.0),
            Node::split(3, 4, 0, 0.0),
            Node::leaf(0.0),
            Node::split(5, 6, 0, 0.0),
            Node::leaf(0.0),
            Node::leaf(0.0),
            Node::leaf(0.0),
        ])
        .unwrap();
        assert_eq!(deep.depth(), 3);
        assert_eq!(PackedTree::from_tree(&deep), Err(ForestError::TreeTooDeep(3)));
    }
}
