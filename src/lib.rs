//! # archipelago
//!
//! A distributed evolutionary optimizer for fixed-depot tours. Many island
//! populations evolve independently and synchronize periodically through
//! broadcast/gather barriers, so progress discovered on any island propagates
//! to all of them.
//!
//! The building blocks, leaves first: [`matrix::DistanceMatrix`] (immutable
//! cost table), [`route::Route`] and [`population::Population`] (unique
//! candidate tours), [`fitness`] (pure batch scoring with a rayon fan-out),
//! [`operators`] (tournament selection, order crossover, swap mutation,
//! worst-member replacement), [`stagnation`] (regeneration trigger),
//! [`island::IslandWorker`] (the local generation loop), and
//! [`coordinator::Coordinator`] (the segment/barrier state machine on top of
//! the [`sync`] collectives).

pub mod config;
pub mod coordinator;
pub mod error;
pub mod fitness;
pub mod island;
pub mod matrix;
pub mod operators;
pub mod population;
pub mod rng;
pub mod route;
pub mod stagnation;
pub mod sync;

// Re-export commonly used types for convenience
pub use config::GaConfig;
pub use coordinator::{Coordinator, CoordinatorState, GlobalBest};
pub use error::{GaError, Result};
pub use matrix::DistanceMatrix;
pub use route::Route;
