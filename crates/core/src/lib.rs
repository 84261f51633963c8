#![warn(clippy::all, missing_docs)]

//! Core domain logic for the Orbitron time-travel simulator.
//!
//! This crate hosts the data models, the static era/planet/discovery
//! catalogs, cosmic-energy accounting, the simulation state with its
//! pure update operations, and configuration handling used by the
//! terminal UI and any future frontends.

pub mod catalog;
pub mod config;
pub mod energy;
pub mod models;
pub mod sim;

pub use config::AppConfig;
pub use energy::CosmicEnergy;
pub use models::{Discovery, EraId, Planet, TimePeriod, Wish};
pub use sim::{SimState, WishOutcome, WishRejection};
