/// Module contains the Value enumeration, the numbers the data stack holds.
pub mod value;

/// The dictionary module provides the word dictionary used by the interpreter.
pub mod dictionary;
