#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use fastnoise_lite::FastNoiseLite;

    use crate::config::{
        FLAP_AMPLITUDE, FLOCK_SIZE, MAX_BANK_ANGLE, MAX_SPEED, MIN_SPEED, WANDER_MAX_HOVER,
        WANDER_MIN_HOVER,
    };
    use crate::flock::orientation::{bank_angle, flap, look_rotation};
    use crate::flock::wander::hover_height;
    use crate::flock::*;
    use crate::noise_field::NoiseField;
    use crate::terrain::{Terrain, TerrainQuery};
    use crate::weather::WeatherMode;

    struct Flat(f32);

    impl TerrainQuery for Flat {
        fn height_at(&self, _x: f32, _z: f32) -> f32 {
            self.0
        }
    }

    const FAR_EYE: Vec3 = Vec3::new(10_000.0, 10_000.0, 10_000.0);
    const SPEED_TOLERANCE: f32 = 1e-4;

    fn assert_speeds(flock: &Flock, tick: usize) {
        for (i, a) in flock.agents().iter().enumerate() {
            let s = a.speed();
            assert!(
                s >= MIN_SPEED - SPEED_TOLERANCE && s <= MAX_SPEED + SPEED_TOLERANCE,
                "tick {tick}: agent {i} speed {s}"
            );
        }
    }

    #[test]
    fn test_spawn_is_deterministic_and_in_range() {
        let terrain = Terrain::new(123.0);
        let a = Flock::spawn(FLOCK_SIZE, 42, &terrain);
        let b = Flock::spawn(FLOCK_SIZE, 42, &terrain);
        assert_eq!(a.len(), 100);
        assert_eq!(a.agents(), b.agents());
        assert_speeds(&a, 0);
        for agent in a.agents() {
            let ground = terrain.height_at(agent.position.x, agent.position.z);
            assert!(agent.position.y > ground + 5.0);
        }
        let c = Flock::spawn(FLOCK_SIZE, 43, &terrain);
        assert_ne!(a.agents()[0].position, c.agents()[0].position);
    }

    #[test]
    fn test_ground_avoidance_scenario() {
        // One agent at the origin with the ground 3 units below.
        let mut flock = Flock::from_agents(vec![Agent::new(Vec3::ZERO, Vec3::Z * 0.5)], 1);
        flock.step(&Flat(-3.0), &WeatherMode::Clear.preset(), FAR_EYE, 0.0);
        let a = flock.agents()[0];
        assert!(a.acceleration.y > 0.0, "acceleration {:?}", a.acceleration);
        assert!(a.velocity.y > 0.0);
    }

    #[test]
    fn test_speed_invariant_on_real_terrain_in_storm() {
        let terrain = Terrain::new(123.0);
        let mut flock = Flock::spawn(FLOCK_SIZE, 42, &terrain);
        let storm = WeatherMode::Storm.preset();
        for tick in 0..300 {
            let eye = flock.aggregate().centroid + Vec3::new(0.0, 5.0, -10.0);
            flock.step(&terrain, &storm, eye, tick as f64 / 60.0);
            assert_speeds(&flock, tick);
        }
    }

    #[test]
    fn test_step_is_order_independent() {
        let agents = vec![
            Agent::new(Vec3::new(0.0, 10.0, 0.0), Vec3::Z * 0.5),
            Agent::new(Vec3::new(2.0, 10.0, 1.0), Vec3::X * 0.6),
            Agent::new(Vec3::new(-3.0, 11.0, 2.0), Vec3::new(0.3, 0.0, 0.4)),
        ];
        let mut reversed = agents.clone();
        reversed.reverse();
        let mut forward = Flock::from_agents(agents, 7);
        let mut backward = Flock::from_agents(reversed, 7);
        let calm = WeatherMode::Clear.preset();
        // Ground far below: canopy weaving (index-dependent) stays off.
        forward.step(&Flat(-40.0), &calm, FAR_EYE, 1.0);
        backward.step(&Flat(-40.0), &calm, FAR_EYE, 1.0);
        for i in 0..3 {
            let a = forward.agents()[i];
            let b = backward.agents()[2 - i];
            assert!((a.position - b.position).length() < 1e-5);
            assert!((a.velocity - b.velocity).length() < 1e-5);
        }
    }

    #[test]
    fn test_aggregate_matches_agents() {
        let terrain = Terrain::new(123.0);
        let mut flock = Flock::spawn(20, 5, &terrain);
        let agg = flock.step(&terrain, &WeatherMode::Clear.preset(), FAR_EYE, 0.5);
        let n = flock.len() as f32;
        let centroid = flock.agents().iter().map(|a| a.position).sum::<Vec3>() / n;
        let mean_v = flock.agents().iter().map(|a| a.velocity).sum::<Vec3>() / n;
        assert!((agg.centroid - centroid).length() < 1e-4);
        assert!((agg.mean_velocity - mean_v).length() < 1e-5);
        assert_eq!(agg, flock.aggregate());
    }

    #[test]
    fn test_non_finite_agents_are_reset() {
        let bad = Agent::new(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::new(f32::NAN, 0.0, 0.0));
        let mut flock = Flock::from_agents(vec![bad], 3);
        assert!((flock.agents()[0].speed() - MIN_SPEED).abs() < 1e-6);
        flock.step(&Flat(0.0), &WeatherMode::Clear.preset(), FAR_EYE, 0.0);
        let a = flock.agents()[0];
        assert!(a.is_finite());
        assert!(a.rotation.is_finite());
        assert!(flock.aggregate().centroid.is_finite());
    }

    #[test]
    fn test_zero_velocity_gets_default_heading() {
        let v = clamp_speed(Vec3::ZERO);
        assert_eq!(v, Vec3::Z * MIN_SPEED);
        let fast = clamp_speed(Vec3::X * 100.0);
        assert!((fast.length() - MAX_SPEED).abs() < 1e-6);
    }

    #[test]
    fn test_transforms_face_velocity() {
        let terrain = Terrain::new(123.0);
        let mut flock = Flock::spawn(10, 9, &terrain);
        flock.step(&terrain, &WeatherMode::Clear.preset(), FAR_EYE, 0.0);
        assert_eq!(flock.transforms().count(), 10);
        for (t, a) in flock.transforms().zip(flock.agents()) {
            assert!(t.rotation.is_normalized());
            let forward = t.rotation * Vec3::NEG_Z;
            assert!(forward.dot(a.velocity.normalize()) > 0.999);
            assert!(a.bank.abs() <= MAX_BANK_ANGLE);
        }
    }

    #[test]
    fn test_look_rotation_degenerate_inputs() {
        for dir in [Vec3::ZERO, Vec3::Y, Vec3::NEG_Y, Vec3::NAN] {
            let q = look_rotation(dir);
            assert!(q.is_finite() && q.is_normalized(), "{dir:?} -> {q:?}");
        }
    }

    #[test]
    fn test_look_rotation_faces_forward() {
        for dir in [Vec3::Z, Vec3::new(1.0, 0.5, -2.0), Vec3::Y, Vec3::NEG_Y] {
            let q = look_rotation(dir);
            let forward = q * Vec3::NEG_Z;
            assert!((forward - dir.normalize()).length() < 1e-5, "{dir:?} -> {forward:?}");
        }
        // Level headings keep world up on the upper side.
        let level = look_rotation(Vec3::new(3.0, 0.0, 4.0));
        assert!((level * Vec3::Y - Vec3::Y).length() < 1e-5);
        assert!((look_rotation(Vec3::ZERO) * Vec3::NEG_Z - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_bank_is_clamped() {
        let heading = look_rotation(Vec3::Z);
        // Local left of a +z heading is +x.
        let hard_left = bank_angle(heading, Vec3::X * 10.0);
        let hard_right = bank_angle(heading, Vec3::NEG_X * 10.0);
        assert!((hard_left - MAX_BANK_ANGLE).abs() < 1e-6);
        assert!((hard_right + MAX_BANK_ANGLE).abs() < 1e-6);
        assert!(bank_angle(heading, Vec3::Y).abs() < 1e-5);
    }

    #[test]
    fn test_wing_jitter_only_in_high_wind() {
        let turbulence = FastNoiseLite::with_seed(42);
        let mut jittered = false;
        for i in 0..20 {
            let (_, calm) = flap(0.3, 0.6, 0.5, &turbulence, i, 1.25);
            let (_, storm) = flap(0.3, 0.6, 2.5, &turbulence, i, 1.25);
            assert!(calm.abs() <= FLAP_AMPLITUDE + 1e-6);
            if (calm - storm).abs() > 1e-4 {
                jittered = true;
            }
        }
        assert!(jittered);
    }

    #[test]
    fn test_flap_frequency_scales_with_speed() {
        let turbulence = FastNoiseLite::with_seed(1);
        let (slow, _) = flap(0.0, MIN_SPEED, 0.0, &turbulence, 0, 0.0);
        let (fast, _) = flap(0.0, MAX_SPEED, 0.0, &turbulence, 0, 0.0);
        assert!(fast > slow);
    }

    #[test]
    fn test_hover_height_band() {
        for i in 0..200 {
            let t = i as f64 * 0.5;
            let calm = hover_height(t, 0.5);
            let storm = hover_height(t, 2.5);
            assert!((WANDER_MIN_HOVER..=WANDER_MAX_HOVER + 1e-4).contains(&calm));
            assert!(storm >= WANDER_MIN_HOVER);
            assert!(storm <= calm + 1e-6);
        }
    }

    #[test]
    fn test_wander_target_hovers_ahead_of_centroid() {
        let mut wander = Wander::default();
        let noise = NoiseField::new(42.0);
        let centroid = Vec3::new(100.0, 20.0, -50.0);
        let target = wander.update(&noise, 3.0, centroid, &Flat(3.0), 0.5);
        let horizontal = Vec2::new(target.x - centroid.x, target.z - centroid.z).length();
        assert!((horizontal - 80.0).abs() < 1e-3);
        let hover = target.y - 3.0;
        assert!((WANDER_MIN_HOVER..=WANDER_MAX_HOVER + 1e-4).contains(&hover));
    }
}
