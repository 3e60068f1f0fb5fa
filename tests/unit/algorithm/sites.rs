//! Tests for flip-site classification and the bulk site finder

#[cfg(test)]
mod tests {
    use lozenge::algorithm::sites::{
        FLIP_NEIGHBOURHOOD, FlipDirection, FlipSites, classify, count_sites_near,
        find_flip_sites, find_flip_sites_scalar,
    };
    use lozenge::lattice::tiling::TilingState;

    #[test]
    fn test_classify_raise_pattern() {
        assert_eq!(classify(&[1, 1, 2, 2, 3, 3]), Some(FlipDirection::Raise));
        assert_eq!(classify(&[3, 3, 1, 1, 2, 2]), Some(FlipDirection::Raise));
    }

    #[test]
    fn test_classify_lower_pattern() {
        assert_eq!(classify(&[2, 3, 3, 1, 1, 2]), Some(FlipDirection::Lower));
        assert_eq!(classify(&[1, 2, 2, 3, 3, 1]), Some(FlipDirection::Lower));
    }

    #[test]
    fn test_classify_rejects_partial_patterns() {
        assert_eq!(classify(&[1, 1, 2, 2, 3, 1]), None);
        assert_eq!(classify(&[1, 2, 3, 1, 2, 3]), None);
        // All equal pairs in both directions
        assert_eq!(classify(&[1, 1, 1, 1, 1, 1]), None);
    }

    // Empty triangles never form a pair
    #[test]
    fn test_classify_ignores_unlabelled_triangles() {
        assert_eq!(classify(&[0, 0, 0, 0, 0, 0]), None);
        assert_eq!(classify(&[0, 0, 2, 2, 3, 3]), None);
        assert_eq!(classify(&[0, 2, 2, 0, 0, 0]), None);
    }

    /// `t0 = t1 != t2, t2 = t3 != t4, t4 = t5 != t0`, all labels set
    fn is_pattern_a(t: [u8; 6]) -> bool {
        let [t0, t1, t2, t3, t4, t5] = t;
        !t.contains(&0) && t0 == t1 && t1 != t2 && t2 == t3 && t3 != t4 && t4 == t5 && t5 != t0
    }

    /// `t1 = t2 != t3, t3 = t4 != t5, t5 = t0 != t1`, all labels set
    fn is_pattern_b(t: [u8; 6]) -> bool {
        let [t0, t1, t2, t3, t4, t5] = t;
        !t.contains(&0) && t1 == t2 && t2 != t3 && t3 == t4 && t4 != t5 && t5 == t0 && t0 != t1
    }

    // Every ring over labels 0..=3 against the two pattern definitions
    #[test]
    fn test_classify_matches_patterns_exhaustively() {
        let mut raises = 0;
        let mut lowers = 0;
        for code in 0..4_u32.pow(6) {
            let mut ring = [0_u8; 6];
            let mut rest = code;
            for slot in &mut ring {
                *slot = (rest % 4) as u8;
                rest /= 4;
            }

            let a = is_pattern_a(ring);
            let b = is_pattern_b(ring);
            assert!(!(a && b), "{ring:?} matches both patterns");

            let direction = classify(&ring);
            assert_eq!(direction == Some(FlipDirection::Raise), a, "{ring:?}");
            assert_eq!(direction == Some(FlipDirection::Lower), b, "{ring:?}");
            if ring.contains(&0) {
                assert_eq!(direction, None, "{ring:?} has an empty triangle");
            }
            raises += usize::from(a);
            lowers += usize::from(b);
        }
        // Three distinct labels for three pairs: 3! rings per pattern
        assert_eq!(raises, 6);
        assert_eq!(lowers, 6);
    }

    #[test]
    fn test_flipped_ring_swaps_direction() {
        let ring = [1, 1, 2, 2, 3, 3];
        let flipped = [ring[3], ring[4], ring[5], ring[0], ring[1], ring[2]];
        let direction = classify(&ring).expect("raise pattern");
        assert_eq!(classify(&flipped), Some(direction.reversed()));
    }

    #[test]
    fn test_direction_helpers() {
        assert_eq!(FlipDirection::Raise.reversed(), FlipDirection::Lower);
        assert_eq!(FlipDirection::Lower.reversed(), FlipDirection::Raise);
        assert_eq!(FlipDirection::Raise.volume_change(), 1);
        assert_eq!(FlipDirection::Lower.volume_change(), -1);
    }

    // The minimal tiling admits a single move: adding the corner cube
    #[test]
    fn test_minimal_tiling_has_single_raise_site() {
        for size in 1..=6 {
            let state = TilingState::new(size).expect("valid size");
            let sites = find_flip_sites(&state);
            assert_eq!(sites.len(), 1, "size {size}");
            assert_eq!(sites.lower_count(), 0);
            assert_eq!(sites.direction_of(size, size), Some(FlipDirection::Raise));
        }
    }

    #[test]
    fn test_sites_after_first_raise() {
        let mut state = TilingState::new(3).expect("valid size");
        state.apply_flip(3, 3).expect("flippable");
        let sites = find_flip_sites(&state);

        assert_eq!(sites.raise_sites().to_vec(), vec![(2, 4), (3, 2), (4, 3)]);
        assert_eq!(sites.lower_sites().to_vec(), vec![(3, 3)]);
        assert_eq!(sites.raise_count(), 3);
        assert_eq!(sites.lower_count(), 1);
        assert!(sites.contains(2, 4));
        assert!(!sites.contains(2, 2));
    }

    #[test]
    fn test_get_lists_raise_sites_first() {
        let mut state = TilingState::new(2).expect("valid size");
        state.apply_flip(2, 2).expect("flippable");
        let sites = find_flip_sites(&state);

        assert_eq!(sites.get(0), Some(((1, 3), FlipDirection::Raise)));
        assert_eq!(sites.get(3), Some(((2, 2), FlipDirection::Lower)));
        assert_eq!(sites.get(4), None);
        assert_eq!(sites.iter().count(), sites.len());
        assert_eq!(sites.positions(), vec![(1, 3), (2, 1), (3, 2), (2, 2)]);
    }

    #[test]
    fn test_empty_collection() {
        let sites = FlipSites::new(4);
        assert!(sites.is_empty());
        assert_eq!(sites.len(), 0);
        assert_eq!(sites.get(0), None);
        assert_eq!(sites.direction_of(1, 1), None);
    }

    // Bulk comparison must agree with vertex-by-vertex classification
    #[test]
    fn test_bulk_finder_matches_scalar() {
        let mut state = TilingState::new(4).expect("valid size");
        for step in 0..40 {
            let bulk = find_flip_sites(&state);
            assert_eq!(bulk, find_flip_sites_scalar(&state), "step {step}");
            let (site, _) = bulk.get(step % bulk.len()).expect("site exists");
            state.apply_flip(site.0, site.1).expect("flippable");
        }
    }

    #[test]
    fn test_every_site_is_flippable() {
        let mut state = TilingState::new(3).expect("valid size");
        state.apply_flip(3, 3).expect("flippable");
        for ((x, y), direction) in find_flip_sites(&state).iter() {
            let mut copy = state.clone();
            assert_eq!(copy.apply_flip(x, y).ok(), Some(direction));
            assert!(copy.check_invariants().is_ok());
        }
    }

    #[test]
    fn test_bulk_finder_on_smallest_domains() {
        for size in 1..=3 {
            let mut state = TilingState::new(size).expect("valid size");
            assert_eq!(find_flip_sites(&state), find_flip_sites_scalar(&state));
            state
                .apply_flip(size, size)
                .expect("centre is flippable");
            assert_eq!(find_flip_sites(&state), find_flip_sites_scalar(&state));
        }
    }

    #[test]
    fn test_neighbourhood_is_centre_and_six_neighbours() {
        assert_eq!(FLIP_NEIGHBOURHOOD.len(), 7);
        assert_eq!(FLIP_NEIGHBOURHOOD.first(), Some(&(0, 0)));
        for &(dx, dy) in &FLIP_NEIGHBOURHOOD[1..] {
            assert!(dx.abs() + dy.abs() <= 2 && (dx, dy) != (0, 0));
            assert!(FLIP_NEIGHBOURHOOD.contains(&(-dx, -dy)));
        }
    }

    #[test]
    fn test_count_sites_near_first_raise() {
        let mut state = TilingState::new(3).expect("valid size");
        assert_eq!(count_sites_near(&state, 3, 3), 1);
        state.apply_flip(3, 3).expect("flippable");
        assert_eq!(count_sites_near(&state, 3, 3), 4);
        // Border vertices have no ring of their own
        assert_eq!(count_sites_near(&state, 0, 0), 0);
    }

    // Local recount around a flip agrees with a full search
    #[test]
    fn test_local_count_tracks_total() {
        let mut state = TilingState::new(4).expect("valid size");
        for step in 0..60 {
            let sites = find_flip_sites(&state);
            let (site, _) = sites.get((step * 7) % sites.len()).expect("site exists");
            let before = count_sites_near(&state, site.0, site.1);
            state.apply_flip(site.0, site.1).expect("flippable");
            let after = count_sites_near(&state, site.0, site.1);

            assert_eq!(
                sites.len() - before + after,
                find_flip_sites(&state).len(),
                "step {step} at {site:?}"
            );
        }
    }
}
