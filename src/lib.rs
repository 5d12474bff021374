//! Midnight Duel: a fixed-tick 2D fighting-game simulation.
//!
//! The simulation core (combat, projectiles, hazard, cinematics, match flow)
//! mutates the world once per `FixedUpdate` tick in a contractually ordered
//! system chain; presentation and device input live in thin collaborator
//! plugins (`input`, `ui`) that only read projections and fill the per-tick
//! input snapshot.

pub mod cinematics;
pub mod combat;
pub mod content;
pub mod core;
#[cfg(feature = "dev-tools")]
pub mod debug;
pub mod fx;
pub mod hazard;
pub mod input;
pub mod physics;
pub mod projectiles;
pub mod ui;
