//! Stack and function providers.
//!
//! Providers turn a template file into the flat lists the graph builder works
//! on: [`StackProvider`] walks the nested-stack tree and [`FunctionProvider`]
//! enumerates the compute functions each stack declares.

mod function;
mod stack;

pub use function::{Architecture, Function, FunctionProvider, PackageType};
pub use stack::{Stack, StackProvider};
