// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod core;
pub mod csv;
pub mod file;
pub mod params;

pub mod bracket;
pub mod identity;
pub mod merge;
pub mod registry;
pub mod runner;
pub mod store;
