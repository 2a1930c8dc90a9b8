//! Foundation module - Core utilities and types
//!
//! Math types shared by every part of the simulation core.

pub mod math;
