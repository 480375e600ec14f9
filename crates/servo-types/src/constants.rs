// ─────────────────────────────────────────────────────────────────────
// SCPN Servo Core — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Supply-voltage rail magnitude [V].
/// The controller output (armature voltage) saturates at ± this value,
/// modeling a typical small DC motor supply.
pub const SUPPLY_RAIL_V: f64 = 12.0;

/// Load-torque disturbance magnitude [N·m] injected by the driver.
pub const DISTURBANCE_TORQUE_NM: f64 = 0.05;

/// Disturbance window start, as a fraction of total simulated time.
pub const DISTURBANCE_WINDOW_START: f64 = 0.5;

/// Disturbance window end, as a fraction of total simulated time.
/// Both bounds are inclusive.
pub const DISTURBANCE_WINDOW_END: f64 = 0.6;

/// Default armature resistance [Ω].
pub const DEFAULT_RESISTANCE_OHM: f64 = 2.0;

/// Default armature inductance [H].
/// Electrical time constant L/R = 0.5 ms; the default timestep below
/// resolves it with five samples. Shrinking L without shrinking dt makes
/// the explicit integration unstable.
pub const DEFAULT_INDUCTANCE_H: f64 = 0.001;

/// Default torque constant [N·m/A].
pub const DEFAULT_TORQUE_CONSTANT: f64 = 0.01;

/// Default back-EMF constant [V·s/rad].
pub const DEFAULT_EMF_CONSTANT: f64 = 0.01;

/// Default rotor inertia [kg·m²].
pub const DEFAULT_INERTIA: f64 = 1.0e-4;

/// Default viscous friction coefficient [N·m·s/rad].
pub const DEFAULT_FRICTION: f64 = 1.0e-4;

/// Default integration timestep [s].
pub const DEFAULT_TIMESTEP_S: f64 = 1.0e-4;

/// Default simulated duration [s].
pub const DEFAULT_SIM_TIME_S: f64 = 2.0;

/// Default target value (position [rad] or speed [rad/s] per mode).
pub const DEFAULT_SETPOINT: f64 = 1.0;
