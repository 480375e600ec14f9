// ─────────────────────────────────────────────────────────────────────
// SCPN Servo Core — Servo Control
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Closed-loop control of the DC motor plant: PID algorithm and the
//! fixed-timestep simulation driver.

pub mod pid;
pub mod sim;
