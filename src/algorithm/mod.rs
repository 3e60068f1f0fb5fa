/// Bitset over lattice vertices for flip-site membership
pub mod bitset;
/// Sampler driver and run statistics
pub mod executor;
/// Bias policies and random site selection
pub mod selection;
/// Flip-site classification and search
pub mod sites;
