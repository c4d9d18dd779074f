//! CPG Plot - stacked voltage traces for neuron circuit simulations
//!
//! Loads whitespace-delimited simulation output and draws one subplot per
//! recorded trace over a shared time axis.

pub mod charts;
pub mod cli;
pub mod data;
pub mod gui;
