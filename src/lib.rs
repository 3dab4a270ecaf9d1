//! ckit: Circuit Kit
//!
//! Typed electronic components, quantity-tagged kits built from them, and
//! per-kit-type rules deciding whether a kit is complete and sellable.

pub mod cli;
pub mod core;
pub mod entities;
pub mod rules;
