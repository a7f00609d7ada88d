pub mod actions;
pub mod ai;
pub mod calculators;
pub mod effects;
pub mod engine;
pub mod observation;
pub mod rng;
pub mod runner;
pub mod state;
pub mod stats;

#[cfg(test)]
mod tests;
