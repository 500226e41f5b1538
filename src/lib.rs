//! A small Forth interpreter built on the classic threaded-word model: one shared data stack, a
//! dictionary of named words, and a compiler that turns `: name ... ;` into new words.
//!
//! ```no_run
//! use rforth::runtime::{
//!     built_ins::register_builtin_words,
//!     interpreter::{InterpreterStack, SourceManagement, forth_interpreter::ForthInterpreter},
//! };
//!
//! let mut interpreter = ForthInterpreter::from_stdio();
//! register_builtin_words(&mut interpreter)?;
//!
//! interpreter.process_source("<doc>", ": square dup * ; 5 square")?;
//! assert_eq!(interpreter.stack().len(), 1);
//! # Ok::<(), rforth::runtime::error::ScriptError>(())
//! ```

/// Module for reading source text and compiling it into words.
#[macro_use]
pub mod lang;

/// Module for the runtime and the data structures used by the interpreter.  As well as the
/// interpreter itself.
pub mod runtime;
