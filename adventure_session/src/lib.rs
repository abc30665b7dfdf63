//! # Adventure Session
//!
//! Connects the adventure rules core to the collaborators around it. A
//! [`Session`] takes a line of player input, hands it to a
//! [`CommandParser`], performs the resulting command on the world, runs the
//! per-turn digest and asks a [`Narrator`] to describe what happened.
//!
//! ## Core Components
//!
//! - **collaborators**: parser and narrator traits, with plain implementations
//! - **session**: the turn loop
//! - **config**: TOML session settings and logging setup

pub mod collaborators;
pub mod config;
pub mod error;
pub mod session;

pub use collaborators::*;
pub use config::*;
pub use error::*;
pub use session::*;
