// src/lib.rs
//! Debug tooling and a demo scene on top of the slotframe crates.

pub mod report;
pub mod viewer;
