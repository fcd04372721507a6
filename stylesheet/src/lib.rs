//! Compiles stylesheet `@keyframes` rules into animations.
//!
//! The stylesheet itself is parsed elsewhere, this crate starts at already tokenized rules and
//! declarations.

mod compiler;
mod rules;
mod transform_function;
mod units;

pub use compiler::*;
pub use rules::*;
pub use transform_function::*;
pub use units::*;
