// ─────────────────────────────────────────────────────────────────────
// SCPN Servo Core — Property-Based Tests (proptest) for servo-control
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for the PID controller and the bench driver.
//!
//! Covers: output saturation bounds, anti-windup accumulator
//! invariance, pure-proportional exactness, deterministic replay.

use proptest::prelude::*;
use servo_control::pid::PidController;
use servo_control::sim::run_motor_simulation;

// ── PID Saturation ───────────────────────────────────────────────────

proptest! {
    /// For any finite single step with ordered limits, the returned
    /// output lies within [min, max].
    #[test]
    fn output_stays_within_ordered_limits(
        kp in -50.0f64..50.0,
        ki in -5.0f64..5.0,
        kd in -5.0f64..5.0,
        setpoint in -100.0f64..100.0,
        measured in -100.0f64..100.0,
        dt in 1.0e-4f64..1.0e-1,
        min in -20.0f64..0.0,
        span in 0.0f64..40.0,
    ) {
        let max = min + span;
        let mut pid = PidController::new(kp, ki, kd, setpoint);
        pid.set_output_limits(min, max);

        let out = pid.compute(measured, dt);
        prop_assert!(out >= min && out <= max,
            "output {} escaped [{}, {}]", out, min, max);
    }

    /// A saturating first step leaves the integral accumulator exactly
    /// where it started (the retraction cancels the addition).
    #[test]
    fn anti_windup_first_step_exact(
        kp in 50.0f64..500.0,
        ki in 0.0f64..5.0,
        setpoint in 1.0f64..100.0,
        dt in 1.0e-4f64..1.0e-1,
    ) {
        let mut pid = PidController::new(kp, ki, 0.0, setpoint);
        let out = pid.compute(0.0, dt);

        // Kp ≥ 50 against error ≥ 1 always pins the +12 V rail.
        prop_assert_eq!(out, 12.0);
        prop_assert_eq!(pid.error_sum(), 0.0,
            "saturating step must not wind up the accumulator");
    }

    /// Across a saturating step later in a run, the accumulator change
    /// attributable to that step is zero up to rounding.
    #[test]
    fn anti_windup_mid_run_cancels(
        ki in 0.1f64..2.0,
        setpoint in 1.0f64..50.0,
        dt in 1.0e-3f64..1.0e-1,
        warmup in 1usize..50,
    ) {
        let mut pid = PidController::new(0.1, ki, 0.0, setpoint);
        // Warm up without saturating: small error, small output.
        for _ in 0..warmup {
            pid.compute(setpoint - 1.0e-3, dt);
        }

        let before = pid.error_sum();
        let out = pid.compute(setpoint - 1.0e6, dt);
        prop_assert_eq!(out, 12.0, "huge error must saturate");
        let drift = (pid.error_sum() - before).abs();
        prop_assert!(drift <= 1.0e-9 * (1.0 + before.abs() + 1.0e6 * dt),
            "accumulator drifted by {} across a saturating step", drift);
    }

    /// Ki = Kd = 0: the controller is memoryless in its output,
    /// returning exactly Kp·error for any dt.
    #[test]
    fn pure_proportional_is_exact(
        kp in -10.0f64..10.0,
        setpoint in -10.0f64..10.0,
        measured in -10.0f64..10.0,
        dt in 1.0e-4f64..1.0,
        calls in 1usize..20,
    ) {
        let mut pid = PidController::new(kp, 0.0, 0.0, setpoint);
        pid.set_output_limits(-1.0e6, 1.0e6);
        for _ in 0..calls {
            let out = pid.compute(measured, dt);
            prop_assert_eq!(out, kp * (setpoint - measured));
        }
    }

    /// All-zero gains always return zero, with symmetric limits of any
    /// magnitude.
    #[test]
    fn zero_gains_zero_output(
        setpoint in -100.0f64..100.0,
        measured in -100.0f64..100.0,
        dt in 1.0e-4f64..1.0,
        rail in 0.1f64..100.0,
    ) {
        let mut pid = PidController::new(0.0, 0.0, 0.0, setpoint);
        pid.set_output_limits(-rail, rail);
        for _ in 0..5 {
            prop_assert_eq!(pid.compute(measured, dt), 0.0);
        }
    }
}

// ── Driver Determinism ───────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Identical inputs replay to identical traces, row for row.
    #[test]
    fn runs_replay_deterministically(
        kp in 0.0f64..10.0,
        ki in 0.0f64..1.0,
        kd in 0.0f64..0.2,
        setpoint in -5.0f64..5.0,
        position_control in any::<bool>(),
        inject_disturbance in any::<bool>(),
    ) {
        let run = || run_motor_simulation(
            kp, ki, kd, setpoint, 0.05, 1.0e-4,
            2.0, 0.001, 0.01, 0.01, 0.0001, 0.0001,
            position_control, inject_disturbance,
        );
        let a = run();
        let b = run();
        prop_assert_eq!(a.len(), b.len());
        prop_assert_eq!(a, b);
    }

    /// The voltage column never escapes the supply rail.
    #[test]
    fn trace_voltage_bounded_by_rail(
        kp in 0.0f64..100.0,
        ki in 0.0f64..10.0,
        kd in 0.0f64..1.0,
        setpoint in -10.0f64..10.0,
    ) {
        let trace = run_motor_simulation(
            kp, ki, kd, setpoint, 0.02, 1.0e-4,
            2.0, 0.001, 0.01, 0.01, 0.0001, 0.0001,
            true, false,
        );
        for row in trace.rows() {
            prop_assert!(row.voltage_v >= -12.0 && row.voltage_v <= 12.0,
                "voltage {} at t={} escaped the rail", row.voltage_v, row.time_s);
        }
    }
}
