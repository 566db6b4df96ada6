//! # Core Models Module
//!
//! Data structures describing the simulated polymers.
//!
//! ## Key Components
//!
//! - [`vector`] - The `Vec3` value type used for locations and rates
//! - [`chain`] - A single bead-chain polymer (locations and rates per monomer)
//! - [`system`] - The ordered collection of chains being simulated
//!
//! ## Usage
//!
//! ```ignore
//! use polysim::core::models::{chain::Chain, system::System, vector::Vec3};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let mut rng = StdRng::seed_from_u64(3141);
//! let mut system = System::new();
//! let mut chain = Chain::new(12);
//! chain.random_walk_from(Vec3::new(0.0, 1.0, 0.0), &mut rng);
//! system.add_chain(chain);
//! ```

pub mod chain;
pub mod system;
pub mod vector;
