/// The core data structures used by the interpreter: values and the word dictionary.
pub mod data_structures;

/// Module for defining the built-in native words.
pub mod built_ins;

/// Module for defining the error reporting of the interpreter.
pub mod error;

/// Module for defining the core functionality of the interpreter.  This includes tools for
/// managing and examining the interpreter's state.
pub mod interpreter;
