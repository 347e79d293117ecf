/*!
## Rust Machine Module

Compiles syntax trees into stack machine actions and runs them
against a session environment.

*/

/// Longest source line accepted by `Runtime::enter`.
pub const MAX_LINE_LEN: usize = 1024;

mod compile;
mod io;
mod opcode;
mod operation;
mod program;
mod runtime;
mod stack;
mod val;
mod var;

pub use compile::compile;
pub use io::{Console, Repository};
pub use opcode::{Action, Opcode};
pub use operation::Operation;
pub use program::Program;
pub use runtime::{Flow, Outcome, Runtime, State};
pub use stack::Stack;
pub use val::Val;
pub use var::Var;

#[cfg(test)]
mod tests;
