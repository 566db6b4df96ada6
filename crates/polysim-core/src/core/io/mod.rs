//! Recording of simulation output.
//!
//! The only persisted format is the frame recording: a JSON-compatible array of
//! frames, each frame an array of chains, each chain an array of `[x,y,z]`
//! monomer locations.

pub mod frames;
