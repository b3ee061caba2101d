#![cfg_attr(not(test), no_std)]

//! Crank and cam wheel signal generation.
//!
//! Angles are carried as integer deci-degrees: a crank revolution is
//! [DECI_DEG_PER_REV] ticks and a cam cycle spans two revolutions.

pub mod cam;
pub mod configs;
pub mod crank;
pub mod error;
pub mod event;
pub mod generator;
pub mod speed;
pub mod timer;

pub use error::{Error, Result};
pub use event::*;
