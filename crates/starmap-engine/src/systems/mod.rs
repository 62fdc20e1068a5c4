pub mod filter;
pub mod rng;
pub mod starfield;
