#[cfg(test)]
mod tests {
    use crate::chunks::*;
    use crate::config::{CHUNK_SIZE, FLORA_PER_CHUNK, LCG_MODULUS};
    use crate::terrain::Terrain;

    #[test]
    fn test_lcg_matches_recurrence() {
        let mut rng = FloraRng::new(0);
        // 0 * 9301 + 49297 = 49297
        assert!((rng.next_f64() - 49297.0 / 233280.0).abs() < 1e-12);
        // (49297 * 9301 + 49297) % 233280 = 165494
        assert!((rng.next_f64() - 165494.0 / 233280.0).abs() < 1e-12);
    }

    #[test]
    fn test_lcg_stays_in_unit_interval() {
        let mut rng = FloraRng::for_chunk(ChunkCoord::new(-17, 42));
        for _ in 0..10_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_flora_seed_handles_negative_coords() {
        for (x, z) in [(0, 0), (-1, 0), (0, -1), (-300, -7), (i32::MAX, i32::MIN)] {
            let seed = ChunkCoord::new(x, z).flora_seed(LCG_MODULUS);
            assert!(seed < LCG_MODULUS);
        }
        assert_ne!(
            ChunkCoord::new(1, 0).flora_seed(LCG_MODULUS),
            ChunkCoord::new(0, 1).flora_seed(LCG_MODULUS)
        );
    }

    #[test]
    fn test_cluster_gate() {
        // sin(0) * cos(0) = 0 >= -0.2
        assert!(in_tree_cluster(0.0, 0.0));
        // sin(-pi/2) * cos(0) = -1: a clearing
        let x = -std::f64::consts::FRAC_PI_2 / 0.05;
        assert!(!in_tree_cluster(x, 0.0));
    }

    #[test]
    fn test_flora_band_is_exclusive() {
        assert!(!in_flora_band(2.29));
        assert!(in_flora_band(2.31));
        assert!(in_flora_band(17.99));
        assert!(!in_flora_band(18.0));
    }

    #[test]
    fn test_flora_layout_is_deterministic() {
        let terrain = Terrain::new(123.0);
        for coord in [ChunkCoord::new(0, 0), ChunkCoord::new(-3, 2)] {
            let a = place_flora(&terrain, coord, CHUNK_SIZE);
            let b = place_flora(&terrain, coord, CHUNK_SIZE);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_flora_respects_placement_rules() {
        let terrain = Terrain::new(123.0);
        let mut total = 0;
        for x in -2..=2 {
            for z in -2..=2 {
                let coord = ChunkCoord::new(x, z);
                let center = coord.center(CHUNK_SIZE);
                let flora = place_flora(&terrain, coord, CHUNK_SIZE);
                assert!(flora.len() <= FLORA_PER_CHUNK);
                for tree in &flora {
                    let (fx, fz) = (tree.position.x as f64, tree.position.z as f64);
                    assert!((tree.position.x - center.x).abs() <= CHUNK_SIZE * 0.5 + 1e-3);
                    assert!((tree.position.z - center.z).abs() <= CHUNK_SIZE * 0.5 + 1e-3);
                    let h = terrain.height(fx, fz);
                    assert!(
                        (tree.position.y as f64 - h).abs() < 1e-2,
                        "tree not on the ground"
                    );
                    assert!(tree.scale.min_element() > 0.0);
                }
                total += flora.len();
            }
        }
        assert!(total > 0, "expected at least some trees in 25 chunks");
    }

    #[test]
    fn test_chunk_flora_is_world_space_and_surface_is_local() {
        let terrain = Terrain::new(123.0);
        let half = CHUNK_SIZE * 0.5 + 1e-3;
        let mut trees = 0;
        for x in -2..=2 {
            for z in -2..=2 {
                let coord = ChunkCoord::new(x, z);
                let center = coord.center(CHUNK_SIZE);
                let chunk = Chunk::generate(&terrain, coord, CHUNK_SIZE, 2);
                for p in &chunk.surface().positions {
                    assert!(p[0].abs() <= half && p[2].abs() <= half);
                }
                for tree in chunk.flora() {
                    assert!((tree.position.x - center.x).abs() <= half);
                    assert!((tree.position.z - center.z).abs() <= half);
                }
                assert_eq!(chunk.flora(), place_flora(&terrain, coord, CHUNK_SIZE).as_slice());
                trees += chunk.flora().len();
            }
        }
        assert!(trees > 0, "expected at least some trees in 25 chunks");
    }

    #[test]
    fn test_sway_scales_with_wind() {
        let tree = Flora {
            position: bevy::prelude::Vec3::ZERO,
            scale: bevy::prelude::Vec3::ONE,
            yaw: 0.0,
            tilt_x: 0.0,
            tilt_z: 0.0,
            phase: std::f32::consts::FRAC_PI_2,
        };
        let calm = tree.sway(0.0, 0.0);
        let windy = tree.sway(0.0, 2.5);
        assert!((calm - 0.02).abs() < 1e-6);
        assert!(windy > calm);
        for i in 0..100 {
            assert!(tree.sway(i as f64 * 0.37, 2.5).abs() <= 0.02 * 3.5 + 1e-6);
        }
    }

    #[test]
    fn test_flora_template_merges_parts() {
        let template = flora_template().expect("template parts are valid");
        assert!(template.validate().is_ok());
        // prism (24 vertices, 36 indices) + pyramid (16 vertices, 18 indices)
        assert_eq!(template.vertex_count(), 40);
        assert_eq!(template.indices.len(), 54);
    }
}
