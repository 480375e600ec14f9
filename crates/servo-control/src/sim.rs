// ─────────────────────────────────────────────────────────────────────
// SCPN Servo Core — Servo Bench Driver
// © 1998–2026 Miroslav Šotek. All rights reserved.
// ─────────────────────────────────────────────────────────────────────
//! Fixed-timestep closed-loop simulation driver.
//!
//! One deterministic pass: read the plant, step the controller, apply
//! the disturbance policy, step the plant, record a row. No IO inside
//! the loop; the trace is accumulated in memory and handed to the CSV
//! sink afterwards.

use std::time::Instant;

use servo_physics::dc_motor::DcMotor;
use servo_types::config::{BenchConfig, MotorParams, PidGains, SimParams};
use servo_types::constants::{
    DISTURBANCE_TORQUE_NM, DISTURBANCE_WINDOW_END, DISTURBANCE_WINDOW_START,
};
use servo_types::error::ServoResult;
use servo_types::trace::{SimTrace, StepRecord};

use crate::pid::PidController;

/// Per-run summary metrics for offline analysis.
#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub steps: usize,
    pub duration_s: f64,
    pub wall_time_ms: f64,
    pub max_step_time_us: f64,
    /// Mean |setpoint − actual| over all recorded steps.
    pub mean_abs_error: f64,
    /// Steps on which the controller output sat at either rail.
    pub saturated_steps: usize,
    /// Steps stepped with the disturbance torque applied.
    pub disturbed_steps: usize,
}

/// Closed-loop bench: one controller driving one motor plant.
///
/// Each instance owns its controller and plant exclusively; concurrent
/// runs construct independent benches and share nothing.
pub struct ServoBench {
    pub pid: PidController,
    pub motor: DcMotor,
    setpoint: f64,
    simulation_time_s: f64,
    dt: f64,
    position_control: bool,
    inject_disturbance: bool,
    time: f64,
    // Rounding residue of the time accumulator: carried so the terminal
    // sample lands on the inclusive bound whenever the ideal sum of dt
    // steps is representable.
    time_residue: f64,
}

impl ServoBench {
    /// Build a bench from a configuration. Nothing is validated here:
    /// degenerate numerics propagate through the rows as NaN/∞ exactly
    /// as configured (see [`BenchConfig::validate`] for the strict path).
    pub fn new(config: &BenchConfig) -> Self {
        let pid = PidController::new(
            config.gains.kp,
            config.gains.ki,
            config.gains.kd,
            config.setpoint,
        );
        ServoBench {
            pid,
            motor: DcMotor::new(config.motor),
            setpoint: config.setpoint,
            simulation_time_s: config.sim.simulation_time_s,
            dt: config.sim.dt_s,
            position_control: config.sim.position_control,
            inject_disturbance: config.sim.inject_disturbance,
            time: 0.0,
            time_residue: 0.0,
        }
    }

    /// Build a bench after validating the configuration.
    pub fn validated(config: &BenchConfig) -> ServoResult<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Simulated time of the next step.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn finished(&self) -> bool {
        !(self.time <= self.simulation_time_s)
    }

    fn read_actual(&self) -> f64 {
        if self.position_control {
            self.motor.position()
        } else {
            self.motor.speed()
        }
    }

    /// Execute one loop iteration at the current simulated time and
    /// return its record.
    pub fn step_once(&mut self) -> StepRecord {
        let time = self.time;
        let actual = self.read_actual();

        // Diagnostic P term, recomputed outside the controller.
        let error = self.setpoint - actual;
        let p_term = self.pid.kp * error;

        // Authoritative controller update.
        let voltage = self.pid.compute(actual, self.dt);

        // Diagnostic I/D split. The previous error is re-read from the
        // not-yet-advanced plant, so this reconstructs an approximation
        // of the internal terms, not their ground truth; on saturating
        // steps the three columns do not sum to the clamped output.
        let prev_error = self.read_actual() - self.setpoint;
        let d_term = self.pid.kd * (error - prev_error) / self.dt;
        let i_term = voltage - p_term - d_term;

        // Disturbance policy: overwrite, never add. Outside the window
        // the load is forced back to zero every step.
        let in_window = time >= DISTURBANCE_WINDOW_START * self.simulation_time_s
            && time <= DISTURBANCE_WINDOW_END * self.simulation_time_s;
        if self.inject_disturbance && in_window {
            self.motor.set_load_torque(DISTURBANCE_TORQUE_NM);
        } else {
            self.motor.set_load_torque(0.0);
        }

        self.motor.set_voltage(voltage);
        self.motor.update(self.dt);

        let record = StepRecord {
            time_s: time,
            setpoint: self.setpoint,
            actual,
            voltage_v: voltage,
            current_a: self.motor.current(),
            speed_rad_s: self.motor.speed(),
            position_rad: self.motor.position(),
            p_term,
            i_term,
            d_term,
        };

        self.advance_time();
        record
    }

    fn advance_time(&mut self) {
        let increment = self.dt - self.time_residue;
        let advanced = self.time + increment;
        self.time_residue = (advanced - self.time) - increment;
        self.time = advanced;
    }

    /// Run the loop to completion from the current state and return the
    /// report plus the accumulated trace. The bound is inclusive: the
    /// terminal row's time may equal `simulation_time_s` exactly.
    pub fn run(&mut self) -> (SimulationReport, SimTrace) {
        let t_start = Instant::now();

        let estimated = if self.dt > 0.0 {
            (self.simulation_time_s / self.dt) as usize + 2
        } else {
            0
        };
        let mut trace = SimTrace::with_capacity(estimated);

        let (rail_min, rail_max) = self.pid.output_limits();
        let mut abs_error_sum = 0.0_f64;
        let mut max_step_us = 0.0_f64;
        let mut saturated_steps = 0_usize;
        let mut disturbed_steps = 0_usize;

        while self.time <= self.simulation_time_s {
            let t_step = Instant::now();
            let record = self.step_once();
            let step_us = t_step.elapsed().as_secs_f64() * 1_000_000.0;
            if step_us > max_step_us {
                max_step_us = step_us;
            }

            abs_error_sum += (record.setpoint - record.actual).abs();
            if record.voltage_v == rail_min || record.voltage_v == rail_max {
                saturated_steps += 1;
            }
            if self.motor.load_torque() != 0.0 {
                disturbed_steps += 1;
            }
            trace.push(record);
        }

        let steps = trace.len();
        let report = SimulationReport {
            steps,
            duration_s: self.simulation_time_s,
            wall_time_ms: t_start.elapsed().as_secs_f64() * 1000.0,
            max_step_time_us: max_step_us,
            mean_abs_error: abs_error_sum / steps.max(1) as f64,
            saturated_steps,
            disturbed_steps,
        };
        (report, trace)
    }
}

/// Flat entry point: run one closed-loop simulation and return the
/// ordered row sequence.
///
/// `position_control` selects the controlled quantity (θ or ω);
/// `inject_disturbance` enables the load-torque pulse over the middle
/// `[0.5·T, 0.6·T]` window. The output limits are fixed at the ±12 V
/// supply rail.
#[allow(clippy::too_many_arguments)]
pub fn run_motor_simulation(
    kp: f64,
    ki: f64,
    kd: f64,
    setpoint: f64,
    simulation_time: f64,
    dt: f64,
    resistance: f64,
    inductance: f64,
    torque_constant: f64,
    emf_constant: f64,
    inertia: f64,
    friction: f64,
    position_control: bool,
    inject_disturbance: bool,
) -> SimTrace {
    let config = BenchConfig {
        bench_name: "adhoc".to_string(),
        gains: PidGains { kp, ki, kd },
        setpoint,
        sim: SimParams {
            simulation_time_s: simulation_time,
            dt_s: dt,
            position_control,
            inject_disturbance,
        },
        motor: MotorParams {
            resistance,
            inductance,
            torque_constant,
            emf_constant,
            inertia,
            friction,
        },
    };
    let (_, trace) = ServoBench::new(&config).run();
    trace
}
