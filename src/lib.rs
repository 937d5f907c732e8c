//! Settlement Planner - tick-based settlement growth simulation

pub mod city;
pub mod command;
pub mod core;
pub mod planning;
pub mod simulation;
