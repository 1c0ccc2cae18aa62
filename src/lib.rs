//! Single-screen arcade shooter.
//!
//! The library holds the whole simulation, pure and display-free:
//! `compute` advances a `GameState` one tick at a time, `render` turns a
//! state into a `Frame`, and `Director` ties the two together. The binary
//! is a thin crossterm front-end around it.

pub mod assets;
pub mod compute;
pub mod config;
pub mod consts;
pub mod director;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod input;
pub mod render;

pub use director::Director;
pub use error::GameError;
