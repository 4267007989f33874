#[cfg(test)]
mod tests {
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use onslaught_core::config::{EnemyTuning, OrbitDiveParams, SteeringParams};
    use onslaught_core::constants::*;
    use onslaught_core::enums::{DivePhase, EnemyKind};

    use crate::behavior::Behavior;
    use crate::motion::{face_velocity, MotionContext};
    use crate::orbit_dive::OrbitDiveController;
    use crate::profiles::build_profile;
    use crate::steering::{smoothing_factor, SteeringController};

    fn ctx(position: Vec2, velocity: Vec2, target: Option<Vec2>, dt: f32) -> MotionContext {
        MotionContext {
            position,
            velocity,
            target,
            dt,
        }
    }

    fn assert_vec_close(actual: Vec2, expected: Vec2, tol: f32) {
        assert!(
            actual.distance(expected) <= tol,
            "expected {expected:?}, got {actual:?}"
        );
    }

    // ---- Steering ----

    #[test]
    fn test_steering_without_target_halts() {
        let chaser = SteeringController::new(SteeringParams::default());
        let update = chaser.tick(&ctx(Vec2::ZERO, Vec2::new(2.0, 1.0), None, DT));
        assert_eq!(update.new_velocity, Vec2::ZERO);
        assert!(update.new_heading.is_none(), "facing must not change");
    }

    #[test]
    fn test_steering_desired_velocity() {
        let chaser = SteeringController::new(SteeringParams::default());
        let far = chaser.desired_velocity(Vec2::ZERO, Vec2::new(0.0, 10.0));
        assert_vec_close(far, Vec2::new(0.0, CHASER_MOVE_SPEED), 1e-6);

        let near = chaser.desired_velocity(Vec2::ZERO, Vec2::new(CHASER_STOP_RANGE, 0.0));
        assert_eq!(near, Vec2::ZERO, "at stop range the chaser stands still");
    }

    #[test]
    fn test_steering_converges_exponentially() {
        let params = SteeringParams::default();
        let chaser = SteeringController::new(params);
        let target = Some(Vec2::new(100.0, 0.0));

        for dt in [0.005_f32, DT, 0.1] {
            let desired = chaser.desired_velocity(Vec2::ZERO, Vec2::new(100.0, 0.0));
            let mut velocity = Vec2::new(0.0, 5.0);
            let initial_error = velocity.distance(desired);

            for n in 1..=100 {
                velocity = chaser.tick(&ctx(Vec2::ZERO, velocity, target, dt)).new_velocity;
                let bound = initial_error * (-params.steering_rate * n as f32 * dt).exp();
                let error = velocity.distance(desired);
                assert!(
                    error <= bound + 1e-4,
                    "dt={dt} n={n}: error {error} exceeds bound {bound}"
                );
            }
        }
    }

    #[test]
    fn test_steering_is_frame_rate_independent() {
        let chaser = SteeringController::new(SteeringParams::default());
        let target = Some(Vec2::new(0.0, -50.0));
        let run = |dt: f32, ticks: usize| {
            let mut velocity = Vec2::new(4.0, 0.0);
            for _ in 0..ticks {
                velocity = chaser.tick(&ctx(Vec2::ZERO, velocity, target, dt)).new_velocity;
            }
            velocity
        };
        // 0.6 s either way
        assert_vec_close(run(0.02, 30), run(0.01, 60), 1e-4);
    }

    #[test]
    fn test_smoothing_factor_bounds() {
        assert_eq!(smoothing_factor(12.0, 0.0), 0.0);
        let alpha = smoothing_factor(12.0, DT);
        assert!(alpha > 0.0 && alpha < 1.0);
        assert!((alpha - (1.0 - (-12.0_f32 * DT).exp())).abs() < 1e-7);
    }

    #[test]
    fn test_steering_faces_velocity() {
        let chaser = SteeringController::new(SteeringParams::default());
        let update = chaser.tick(&ctx(Vec2::ZERO, Vec2::new(0.0, 3.0), Some(Vec2::new(0.0, 20.0)), DT));
        let heading = update.new_heading.expect("moving agent should face its velocity");
        assert!((heading - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_steering_keeps_facing_when_stationary() {
        let chaser = SteeringController::new(SteeringParams::default());
        // Inside stop range, already still.
        let update = chaser.tick(&ctx(Vec2::ZERO, Vec2::ZERO, Some(Vec2::new(0.1, 0.0)), DT));
        assert_eq!(update.new_velocity, Vec2::ZERO);
        assert!(update.new_heading.is_none());
    }

    #[test]
    fn test_face_velocity_threshold() {
        assert!(face_velocity(Vec2::new(0.09, 0.0)).is_none());
        assert!(face_velocity(Vec2::new(0.11, 0.0)).is_some());
        let heading = face_velocity(Vec2::new(-1.0, 0.0)).unwrap();
        assert!((heading.abs() - std::f32::consts::PI).abs() < 1e-6);
    }

    // ---- Orbit and dive ----

    /// Cooldown long enough that no dive happens during a test.
    const NO_DIVE: f32 = 1.0e6;

    #[test]
    fn test_orbit_holds_cruise_radius() {
        let params = OrbitDiveParams::default();
        let mut diver = OrbitDiveController::new(params, NO_DIVE);
        let target = Vec2::ZERO;
        let mut position = Vec2::new(params.cruise_radius, 0.0);
        // Direction to target is -x; its counter-clockwise rotation is -y.
        let mut velocity = Vec2::new(0.0, -params.tangential_speed);

        for _ in 0..5_000 {
            let update = diver.tick(&ctx(position, velocity, Some(target), DT));
            velocity = update.motion.new_velocity;
            position += velocity * DT;
            let radius = position.distance(target);
            assert!(
                (radius - params.cruise_radius).abs() < 0.1,
                "drifted off the cruise circle: radius {radius}"
            );
            assert_eq!(diver.phase(), DivePhase::Cruise);
        }
    }

    #[test]
    fn test_orbit_pulls_back_onto_circle() {
        let params = OrbitDiveParams::default();
        let mut diver = OrbitDiveController::new(params, NO_DIVE);
        let mut position = Vec2::new(12.0, 0.0);
        let mut velocity = Vec2::ZERO;
        for _ in 0..1_000 {
            velocity = diver.tick(&ctx(position, velocity, Some(Vec2::ZERO), DT)).motion.new_velocity;
            position += velocity * DT;
        }
        assert!((position.length() - params.cruise_radius).abs() < 0.1);
    }

    #[test]
    fn test_cruise_velocity_clamped_to_max_speed() {
        let params = OrbitDiveParams::default();
        let diver = OrbitDiveController::new(params, NO_DIVE);
        let desired = diver.cruise_velocity(100.0, Vec2::X);
        assert!((desired.length() - params.max_speed).abs() < 1e-4);
        // Far outside the circle the correction points at the target.
        assert!(desired.x > 0.0);
    }

    #[test]
    fn test_cruise_blends_by_fixed_ratio() {
        let params = OrbitDiveParams::default();
        let mut diver = OrbitDiveController::new(params, NO_DIVE);
        let position = Vec2::new(5.0, 0.0);
        let velocity = Vec2::new(1.0, 1.0);
        let desired = diver.cruise_velocity(5.0, Vec2::new(-1.0, 0.0));

        // Same blend regardless of tick length.
        for dt in [0.01, 0.05] {
            let mut trial = diver.clone();
            let update = trial.tick(&ctx(position, velocity, Some(Vec2::ZERO), dt));
            assert_vec_close(
                update.motion.new_velocity,
                velocity.lerp(desired, params.cruise_blend),
                1e-5,
            );
        }
        let update = diver.tick(&ctx(position, velocity, Some(Vec2::ZERO), DT));
        assert!(!update.phase_changed);
    }

    #[test]
    fn test_dive_requires_cooldown_and_range() {
        let params = OrbitDiveParams::default();
        let target = Some(Vec2::ZERO);
        let at_range = Vec2::new(params.dive_range, 0.0);
        let beyond_range = Vec2::new(params.dive_range + 0.5, 0.0);

        // Cooldown elapsed but out of range.
        let mut diver = OrbitDiveController::new(params, 0.0);
        let update = diver.tick(&ctx(beyond_range, Vec2::ZERO, target, DT));
        assert!(!update.phase_changed);
        assert_eq!(diver.phase(), DivePhase::Cruise);

        // In range but still cooling down.
        let mut diver = OrbitDiveController::new(params, 1.0);
        let update = diver.tick(&ctx(at_range, Vec2::ZERO, target, DT));
        assert!(!update.phase_changed);
        assert!((diver.dive_cooldown() - (1.0 - DT)).abs() < 1e-6);

        // Cooldown hits exactly zero this tick, exactly at dive range.
        let mut diver = OrbitDiveController::new(params, DT);
        let update = diver.tick(&ctx(at_range, Vec2::ZERO, target, DT));
        assert!(update.phase_changed);
        assert_eq!(update.new_phase, DivePhase::Dive);
        assert_eq!(diver.dive_cooldown(), params.dive_cooldown);
    }

    #[test]
    fn test_cooldown_runs_negative_while_out_of_range() {
        let params = OrbitDiveParams::default();
        let mut diver = OrbitDiveController::new(params, 0.0);
        for _ in 0..10 {
            diver.tick(&ctx(Vec2::new(20.0, 0.0), Vec2::ZERO, Some(Vec2::ZERO), DT));
        }
        assert!(diver.dive_cooldown() < -0.19);
        assert_eq!(diver.phase(), DivePhase::Cruise);
    }

    #[test]
    fn test_dive_dashes_straight_at_target() {
        let params = OrbitDiveParams::default();
        let mut diver = OrbitDiveController::new(params, 0.0);
        let target = Some(Vec2::ZERO);
        diver.tick(&ctx(Vec2::new(3.0, 4.0), Vec2::ZERO, target, DT));
        assert_eq!(diver.phase(), DivePhase::Dive);

        let update = diver.tick(&ctx(Vec2::new(3.0, 4.0), Vec2::new(0.3, 0.3), target, DT));
        assert!(!update.phase_changed);
        assert_vec_close(
            update.motion.new_velocity,
            Vec2::new(-0.6, -0.8) * params.dive_speed,
            1e-5,
        );
    }

    #[test]
    fn test_dive_returns_to_cruise_without_forcing_velocity() {
        let params = OrbitDiveParams::default();
        let mut diver = OrbitDiveController::new(params, 0.0);
        let target = Some(Vec2::ZERO);
        diver.tick(&ctx(Vec2::new(2.0, 0.0), Vec2::ZERO, target, DT));
        assert_eq!(diver.phase(), DivePhase::Dive);

        let carried = Vec2::new(-7.5, 1.25);
        let update = diver.tick(&ctx(Vec2::new(0.5, 0.0), carried, target, DT));
        assert!(update.phase_changed);
        assert_eq!(update.new_phase, DivePhase::Cruise);
        assert_eq!(update.motion.new_velocity, carried);
    }

    #[test]
    fn test_diver_without_target_halts_and_freezes_cooldown() {
        let params = OrbitDiveParams::default();
        let mut diver = OrbitDiveController::new(params, 0.5);
        let update = diver.tick(&ctx(Vec2::new(1.0, 1.0), Vec2::new(3.0, 0.0), None, DT));
        assert_eq!(update.motion.new_velocity, Vec2::ZERO);
        assert!(update.motion.new_heading.is_none());
        assert!(!update.phase_changed);
        assert_eq!(diver.dive_cooldown(), 0.5);
    }

    #[test]
    fn test_diver_on_top_of_target_uses_fallback_direction() {
        let params = OrbitDiveParams::default();
        let mut diver = OrbitDiveController::new(params, NO_DIVE);
        let update = diver.tick(&ctx(Vec2::ZERO, Vec2::ZERO, Some(Vec2::ZERO), DT));
        let velocity = update.motion.new_velocity;
        assert!(velocity.is_finite());
        // Fallback direction +x: tangent +y, radial error -3.5 pushes toward -x.
        let desired = Vec2::new(
            -params.cruise_radius * params.radial_gain,
            params.tangential_speed,
        );
        assert_vec_close(velocity, desired * params.cruise_blend, 1e-5);
    }

    #[test]
    fn test_diver_enters_dive_on_exact_tick() {
        let params = OrbitDiveParams {
            cruise_radius: 3.5,
            tangential_speed: 2.8,
            radial_gain: 2.0,
            dive_range: 6.0,
            dive_cooldown: 2.2,
            ..Default::default()
        };
        let target = Vec2::ZERO;
        let mut diver = OrbitDiveController::new(params, 0.5);
        let mut position = Vec2::new(10.0, 0.0);
        let mut velocity = Vec2::ZERO;
        let mut dived_at = None;

        for tick in 0..500 {
            let dist = (target - position).length();
            let cooldown_after = diver.dive_cooldown() - DT;
            let should_dive = cooldown_after <= 0.0 && dist <= params.dive_range;

            let update = diver.tick(&ctx(position, velocity, Some(target), DT));
            assert_eq!(update.phase_changed, should_dive, "tick {tick}, dist {dist}");

            if should_dive {
                assert_eq!(diver.phase(), DivePhase::Dive);
                assert_eq!(diver.dive_cooldown(), params.dive_cooldown);
                dived_at = Some(tick);
                break;
            }
            assert_eq!(diver.phase(), DivePhase::Cruise);

            velocity = update.motion.new_velocity;
            position += velocity * DT;
        }

        let tick = dived_at.expect("diver should have dived");
        // The 0.5 s initial cooldown alone holds it in cruise for 24 ticks.
        assert!(tick >= 24);
    }

    #[test]
    fn test_desync_cooldown_in_range() {
        let params = OrbitDiveParams::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let cooldowns: Vec<f32> = (0..50)
            .map(|_| OrbitDiveController::spawn(params, &mut rng).dive_cooldown())
            .collect();
        for c in &cooldowns {
            assert!(*c >= DIVER_DESYNC_MIN && *c < DIVER_DESYNC_MAX);
        }
        assert!(
            cooldowns.windows(2).any(|w| w[0] != w[1]),
            "spawned divers should not share one cooldown"
        );
    }

    // ---- Behavior variant and profiles ----

    #[test]
    fn test_behavior_reports_dive_transitions() {
        let mut behavior = Behavior::OrbitDive(OrbitDiveController::new(
            OrbitDiveParams::default(),
            0.0,
        ));
        assert_eq!(behavior.dive_phase(), Some(DivePhase::Cruise));
        let update = behavior.tick(&ctx(Vec2::new(2.0, 0.0), Vec2::ZERO, Some(Vec2::ZERO), DT));
        assert_eq!(update.dive_transition, Some(DivePhase::Dive));
        assert_eq!(behavior.dive_phase(), Some(DivePhase::Dive));

        let circle = behavior.cruise_circle(Some(Vec2::ONE)).unwrap();
        assert_eq!(circle.center, Vec2::ONE);
        assert_eq!(circle.radius, DIVER_CRUISE_RADIUS);
        assert!(behavior.cruise_circle(None).is_none());
    }

    #[test]
    fn test_steering_behavior_has_no_dive_state() {
        let mut behavior = Behavior::Steering(SteeringController::new(SteeringParams::default()));
        assert!(behavior.dive_phase().is_none());
        let update = behavior.tick(&ctx(Vec2::ZERO, Vec2::ZERO, Some(Vec2::new(5.0, 0.0)), DT));
        assert!(update.dive_transition.is_none());
        assert!(update.motion.new_velocity.x > 0.0);
    }

    #[test]
    fn test_profiles_select_controller_by_kind() {
        let tuning = EnemyTuning::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let chaser = build_profile(EnemyKind::Chaser, &tuning, &mut rng);
        assert!(matches!(chaser.behavior, Behavior::Steering(_)));
        assert_eq!(chaser.max_hp, ENEMY_MAX_HP);

        let diver = build_profile(EnemyKind::Diver, &tuning, &mut rng);
        match diver.behavior {
            Behavior::OrbitDive(controller) => {
                assert_eq!(controller.phase(), DivePhase::Cruise);
                assert!(controller.dive_cooldown() >= DIVER_DESYNC_MIN);
            }
            other => panic!("diver got {other:?}"),
        }
    }
}
