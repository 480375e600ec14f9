// ─────────────────────────────────────────────────────────────────────
// SCPN Servo Core — PID
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Discrete PID controller with saturating output and retroactive
//! integral anti-windup.
//!
//! The derivative acts on consecutive error samples. When the summed
//! output exceeds the configured limits, the output is clamped to the
//! violated bound and the step's integral contribution is subtracted
//! back out of the accumulator, so the integral cannot wind up while
//! the actuator is pinned at the rail.

use servo_types::constants::SUPPLY_RAIL_V;

/// Generic PID controller over one measured quantity.
///
/// Gains are public and may be retuned between steps; the accumulated
/// state is private and advances only through [`PidController::compute`].
/// Nothing here validates the configuration: a zero `dt` yields a
/// non-finite derivative term and inverted limits yield a nonsensical
/// clamp. The caller owns the preconditions.
#[derive(Debug, Clone)]
pub struct PidController {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    setpoint: f64,
    error_sum: f64,
    last_error: f64,
    output: f64,
    output_min: f64,
    output_max: f64,
}

impl PidController {
    /// Create a controller with the given gains and target. Output
    /// limits default to the supply rail, ±12 V.
    pub fn new(kp: f64, ki: f64, kd: f64, setpoint: f64) -> Self {
        PidController {
            kp,
            ki,
            kd,
            setpoint,
            error_sum: 0.0,
            last_error: 0.0,
            output: 0.0,
            output_min: -SUPPLY_RAIL_V,
            output_max: SUPPLY_RAIL_V,
        }
    }

    pub fn set_gains(&mut self, kp: f64, ki: f64, kd: f64) {
        self.kp = kp;
        self.ki = ki;
        self.kd = kd;
    }

    pub fn set_setpoint(&mut self, setpoint: f64) {
        self.setpoint = setpoint;
    }

    /// Set the saturation bounds. `min <= max` is the caller's
    /// responsibility and is not enforced.
    pub fn set_output_limits(&mut self, min: f64, max: f64) {
        self.output_min = min;
        self.output_max = max;
    }

    /// Clear the accumulated state. Gains, setpoint and limits persist.
    pub fn reset(&mut self) {
        self.error_sum = 0.0;
        self.last_error = 0.0;
        self.output = 0.0;
    }

    pub fn setpoint(&self) -> f64 {
        self.setpoint
    }

    pub fn error_sum(&self) -> f64 {
        self.error_sum
    }

    pub fn last_error(&self) -> f64 {
        self.last_error
    }

    /// The most recently returned (possibly clamped) output.
    pub fn output(&self) -> f64 {
        self.output
    }

    pub fn output_limits(&self) -> (f64, f64) {
        (self.output_min, self.output_max)
    }

    /// One PID step against the measured `current_value`. Returns the
    /// clamped output and advances the error history.
    pub fn compute(&mut self, current_value: f64, dt: f64) -> f64 {
        let error = self.setpoint - current_value;

        let p_term = self.kp * error;

        self.error_sum += error * dt;
        let i_term = self.ki * self.error_sum;

        let derivative = (error - self.last_error) / dt;
        let d_term = self.kd * derivative;

        self.output = p_term + i_term + d_term;

        // Anti-windup: clamp to the violated bound and retract this
        // step's integral contribution, exactly once per saturating step.
        if self.output > self.output_max {
            self.output = self.output_max;
            self.error_sum -= error * dt;
        } else if self.output < self.output_min {
            self.output = self.output_min;
            self.error_sum -= error * dt;
        }

        self.last_error = error;

        self.output
    }
}
