//! Encoders that turn logical and non-linear relationships into auxiliary
//! variables with linear constraints.
//!
//! - `factory`  : unique auxiliary naming and creation
//! - `logic`    : and / or / xor over binaries
//! - `abs`      : absolute value
//! - `piecewise`: piecewise-linear function approximation

mod abs;
mod error;
mod factory;
mod logic;
mod piecewise;

pub use error::EncodeError;
pub use factory::AuxiliaryFactory;
pub use piecewise::PiecewiseLinear;
