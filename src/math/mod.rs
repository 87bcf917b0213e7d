//! Numerical building blocks: polynomial regression, dense sampling, interpolation.

pub mod interp;
pub mod poly;
pub mod sampler;

pub use interp::*;
pub use poly::*;
pub use sampler::*;
