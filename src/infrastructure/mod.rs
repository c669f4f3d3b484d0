//! Infrastructure layer - Port implementations
//!
//! This module contains concrete implementations of the domain ports: a
//! configuration store on NOR flash, a model of the LEDC peripheral, and a
//! serialized handle for sharing an actor between contexts.

pub mod drivers;
pub mod services;
