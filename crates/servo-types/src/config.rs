// ─────────────────────────────────────────────────────────────────────
// SCPN Servo Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{ServoError, ServoResult};

/// Top-level bench configuration for one simulation run.
///
/// The default instance reproduces the reference scenario: position
/// control of the small-motor parameter set, 2 s horizon, 0.1 ms step,
/// disturbance injection enabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    pub bench_name: String,
    pub gains: PidGains,
    pub setpoint: f64,
    pub sim: SimParams,
    pub motor: MotorParams,
}

/// PID gain triple. Values are taken as-is; zero or negative gains are
/// the caller's choice and are not validated on the default path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PidGains {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
}

/// Electromechanical parameters of the DC motor plant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MotorParams {
    /// Armature resistance [Ω].
    pub resistance: f64,
    /// Armature inductance [H]. Must be nonzero for a meaningful run.
    pub inductance: f64,
    /// Torque constant kT [N·m/A].
    pub torque_constant: f64,
    /// Back-EMF constant kE [V·s/rad].
    pub emf_constant: f64,
    /// Rotor inertia [kg·m²]. Must be nonzero for a meaningful run.
    pub inertia: f64,
    /// Viscous friction coefficient [N·m·s/rad].
    pub friction: f64,
}

/// Timestep, horizon and mode flags for the simulation driver.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimParams {
    /// Simulated duration [s]. The loop bound is inclusive.
    pub simulation_time_s: f64,
    /// Integration timestep [s].
    pub dt_s: f64,
    /// true: control the position θ; false: control the speed ω.
    #[serde(default = "default_position_control")]
    pub position_control: bool,
    /// Overwrite the load torque with the disturbance magnitude inside
    /// the disturbance window (otherwise the load is forced to zero).
    #[serde(default = "default_inject_disturbance")]
    pub inject_disturbance: bool,
}

fn default_position_control() -> bool {
    true
}

fn default_inject_disturbance() -> bool {
    true
}

impl Default for PidGains {
    fn default() -> Self {
        PidGains {
            kp: 1.0,
            ki: 0.1,
            kd: 0.05,
        }
    }
}

impl Default for MotorParams {
    fn default() -> Self {
        MotorParams {
            resistance: DEFAULT_RESISTANCE_OHM,
            inductance: DEFAULT_INDUCTANCE_H,
            torque_constant: DEFAULT_TORQUE_CONSTANT,
            emf_constant: DEFAULT_EMF_CONSTANT,
            inertia: DEFAULT_INERTIA,
            friction: DEFAULT_FRICTION,
        }
    }
}

impl Default for SimParams {
    fn default() -> Self {
        SimParams {
            simulation_time_s: DEFAULT_SIM_TIME_S,
            dt_s: DEFAULT_TIMESTEP_S,
            position_control: true,
            inject_disturbance: true,
        }
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            bench_name: "Small-DC-Servo".to_string(),
            gains: PidGains::default(),
            setpoint: DEFAULT_SETPOINT,
            sim: SimParams::default(),
            motor: MotorParams::default(),
        }
    }
}

impl BenchConfig {
    /// Load from a JSON file.
    pub fn from_file(path: &str) -> ServoResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Opt-in strictness layer. The default run path does NOT call this:
    /// degenerate numerics (zero dt, zero L or J) then propagate as
    /// NaN/∞ rows, matching the reference traces. Callers wanting a
    /// hard failure instead validate up front.
    pub fn validate(&self) -> ServoResult<()> {
        for (name, value) in [
            ("kp", self.gains.kp),
            ("ki", self.gains.ki),
            ("kd", self.gains.kd),
            ("setpoint", self.setpoint),
            ("resistance", self.motor.resistance),
            ("torque_constant", self.motor.torque_constant),
            ("emf_constant", self.motor.emf_constant),
            ("friction", self.motor.friction),
        ] {
            if !value.is_finite() {
                return Err(ServoError::ConfigError(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if !self.sim.dt_s.is_finite() || self.sim.dt_s <= 0.0 {
            return Err(ServoError::ConfigError(format!(
                "dt_s must be finite and > 0, got {}",
                self.sim.dt_s
            )));
        }
        if !self.sim.simulation_time_s.is_finite() || self.sim.simulation_time_s < 0.0 {
            return Err(ServoError::ConfigError(format!(
                "simulation_time_s must be finite and >= 0, got {}",
                self.sim.simulation_time_s
            )));
        }
        if !self.motor.inductance.is_finite() || self.motor.inductance == 0.0 {
            return Err(ServoError::ConfigError(
                "inductance must be finite and nonzero".to_string(),
            ));
        }
        if !self.motor.inertia.is_finite() || self.motor.inertia == 0.0 {
            return Err(ServoError::ConfigError(
                "inertia must be finite and nonzero".to_string(),
            ));
        }
        Ok(())
    }
}
