use crate::{
    location_here,
    runtime::{
        built_ins::{PrimitiveWord, register_primitives, require_depth},
        data_structures::dictionary::WordRuntime,
        error,
        interpreter::Interpreter,
    },
};

/// Pop the top value and print it.
///
/// Signature: `value -- `
fn word_dot(interpreter: &mut dyn Interpreter, name: &str) -> error::Result<()> {
    if !require_depth(interpreter, name, 1)? {
        return Ok(());
    }

    let value = interpreter.pop()?;
    interpreter.print(&value.to_string())
}

/// Print a new line.
///
/// Signature: ` -- `
fn word_cr(interpreter: &mut dyn Interpreter, _name: &str) -> error::Result<()> {
    interpreter.print("\n")
}

const IO_WORDS: &[PrimitiveWord] = &[
    PrimitiveWord {
        name: "dot",
        alias: Some("."),
        handler: word_dot,
        runtime: WordRuntime::Normal,
        description: "Pop and print the top value.",
        signature: "a --",
    },
    PrimitiveWord {
        name: "cr",
        alias: None,
        handler: word_cr,
        runtime: WordRuntime::Normal,
        description: "Print a new line.",
        signature: "--",
    },
];

/// Register the words that write to the output channel.
pub fn register_io_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    register_primitives(interpreter, location_here!(), IO_WORDS)
}
