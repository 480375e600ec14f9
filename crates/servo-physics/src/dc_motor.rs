// ─────────────────────────────────────────────────────────────────────
// SCPN Servo Core — DC Motor Plant
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! First-order electrical + mechanical DC motor model.
//!
//! Armature circuit: di/dt = (v − R·i − kE·ω) / L
//! Mechanics:        J·dω/dt = kT·i − τ_load − F·ω,  dθ/dt = ω
//!
//! Both equations advance by explicit Euler. Accuracy and stability are
//! timestep-dependent: the caller must keep dt well below the electrical
//! time constant L/R. Zero L or J is an unchecked precondition: the
//! update then divides by zero and the state goes non-finite, which the
//! driver passes through rather than reporting.

use servo_types::config::MotorParams;

/// DC motor state advanced by explicit Euler integration.
///
/// Owned exclusively by one simulation instance; parameters are fixed
/// per run except through [`DcMotor::set_motor_parameters`], state
/// advances only through [`DcMotor::update`].
#[derive(Debug, Clone)]
pub struct DcMotor {
    params: MotorParams,
    /// External load torque [N·m], mutable per step.
    load_torque: f64,
    /// Armature current [A].
    current: f64,
    /// Applied armature voltage [V].
    voltage: f64,
    /// Angular speed ω [rad/s].
    speed: f64,
    /// Angular position θ [rad].
    position: f64,
}

impl DcMotor {
    /// Create a motor at rest with the given parameters and zero load.
    pub fn new(params: MotorParams) -> Self {
        DcMotor {
            params,
            load_torque: 0.0,
            current: 0.0,
            voltage: 0.0,
            speed: 0.0,
            position: 0.0,
        }
    }

    /// Apply an armature voltage, consumed by the next `update`.
    pub fn set_voltage(&mut self, voltage: f64) {
        self.voltage = voltage;
    }

    /// Set the external load torque, consumed by the next `update`.
    pub fn set_load_torque(&mut self, load_torque: f64) {
        self.load_torque = load_torque;
    }

    /// Replace all electromechanical parameters at once.
    pub fn set_motor_parameters(&mut self, params: MotorParams) {
        self.params = params;
    }

    pub fn params(&self) -> &MotorParams {
        &self.params
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn voltage(&self) -> f64 {
        self.voltage
    }

    pub fn load_torque(&self) -> f64 {
        self.load_torque
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// Reinitialize the state variables and zero the applied voltage.
    /// Parameters and the configured load torque persist.
    pub fn reset(&mut self, position: f64, speed: f64, current: f64) {
        self.position = position;
        self.speed = speed;
        self.current = current;
        self.voltage = 0.0;
    }

    /// Advance the plant by one explicit-Euler step of length `dt`.
    pub fn update(&mut self, dt: f64) {
        let p = &self.params;

        let back_emf = p.emf_constant * self.speed;
        let di_dt = (self.voltage - p.resistance * self.current - back_emf) / p.inductance;
        self.current += di_dt * dt;

        let motor_torque = p.torque_constant * self.current;
        let net_torque = motor_torque - self.load_torque - p.friction * self.speed;
        let angular_acceleration = net_torque / p.inertia;

        self.speed += angular_acceleration * dt;
        self.position += self.speed * dt;
    }
}

/// Closed-form steady-state speed for a constant armature voltage with
/// no external load: ω_ss = kT·V / (R·F + kT·kE).
pub fn steady_state_speed(params: &MotorParams, voltage: f64) -> f64 {
    params.torque_constant * voltage
        / (params.resistance * params.friction + params.torque_constant * params.emf_constant)
}

/// Closed-form steady-state current matching [`steady_state_speed`]:
/// the torque balance kT·i = F·ω with zero load.
pub fn steady_state_current(params: &MotorParams, voltage: f64) -> f64 {
    params.friction * steady_state_speed(params, voltage) / params.torque_constant
}
