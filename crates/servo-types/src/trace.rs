// ─────────────────────────────────────────────────────────────────────
// SCPN Servo Core — Simulation Trace
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Per-step simulation records and the CSV sink.
//!
//! The trace is the sole output artifact of the engine: one fixed-width
//! row per timestep, ordered by increasing time, accumulated in memory
//! and written to storage only after the run completes.

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ServoResult;

/// Column header of the CSV sink. Field order matches [`StepRecord`].
pub const CSV_HEADER: &str =
    "Time,Setpoint,ActualValue,Voltage,Current,Speed,Position,P_Term,I_Term,D_Term";

/// One simulation step.
///
/// `p_term`/`i_term`/`d_term` are the diagnostic reconstruction of the
/// controller's split, recomputed outside the controller. They are an
/// approximation and do not sum to the pre-clamp output on saturating
/// steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub time_s: f64,
    pub setpoint: f64,
    pub actual: f64,
    pub voltage_v: f64,
    pub current_a: f64,
    pub speed_rad_s: f64,
    pub position_rad: f64,
    pub p_term: f64,
    pub i_term: f64,
    pub d_term: f64,
}

impl StepRecord {
    /// Fixed-point CSV line, six decimals per field, no trailing newline.
    pub fn csv_line(&self) -> String {
        format!(
            "{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6}",
            self.time_s,
            self.setpoint,
            self.actual,
            self.voltage_v,
            self.current_a,
            self.speed_rad_s,
            self.position_rad,
            self.p_term,
            self.i_term,
            self.d_term
        )
    }
}

/// Ordered sequence of step records from one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTrace {
    rows: Vec<StepRecord>,
}

impl SimTrace {
    pub fn new() -> Self {
        SimTrace { rows: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        SimTrace {
            rows: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, record: StepRecord) {
        self.rows.push(record);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[StepRecord] {
        &self.rows
    }

    pub fn last(&self) -> Option<&StepRecord> {
        self.rows.last()
    }

    /// Chronological view of one channel.
    fn column<F: Fn(&StepRecord) -> f64>(&self, f: F) -> Array1<f64> {
        Array1::from_iter(self.rows.iter().map(f))
    }

    pub fn times(&self) -> Array1<f64> {
        self.column(|r| r.time_s)
    }

    pub fn actuals(&self) -> Array1<f64> {
        self.column(|r| r.actual)
    }

    pub fn voltages(&self) -> Array1<f64> {
        self.column(|r| r.voltage_v)
    }

    pub fn currents(&self) -> Array1<f64> {
        self.column(|r| r.current_a)
    }

    pub fn speeds(&self) -> Array1<f64> {
        self.column(|r| r.speed_rad_s)
    }

    pub fn positions(&self) -> Array1<f64> {
        self.column(|r| r.position_rad)
    }

    /// Render the full CSV document: header plus one line per row.
    pub fn to_csv_string(&self) -> String {
        let mut out = String::with_capacity((self.rows.len() + 1) * 96);
        out.push_str(CSV_HEADER);
        out.push('\n');
        for row in &self.rows {
            out.push_str(&row.csv_line());
            out.push('\n');
        }
        out
    }

    /// Write the CSV document to `path`.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> ServoResult<()> {
        std::fs::write(path, self.to_csv_string())?;
        Ok(())
    }
}
