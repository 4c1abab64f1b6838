// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod core;
pub mod error;

pub mod brain;
pub mod dom;
pub mod hole;
pub mod mine;
pub mod strip;
pub mod template;
