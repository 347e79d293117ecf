//! # Numbered BASIC
//!
//! An interpreter for a small line-numbered BASIC.
//!
//! Source text goes through [`lang::lex`] and [`lang::parse`] into a
//! syntax tree, [`mach::compile`] turns each statement into an
//! [`mach::Action`], and a [`mach::Runtime`] stores numbered lines
//! and runs them.
//!
//! ```text
//! 10 INPUT "HOW MANY"; N
//! 20 PRINT N * 2
//! 30 GOTO 10
//! RUN
//! ```
//!
//! Programs are kept as plain text, one `"<line number> <statement>"`
//! per line, and moved in and out with `SAVE "name"` and `LOAD "name"`.

pub mod lang;
pub mod mach;
pub mod term;
