use crate::{
    location_here,
    runtime::{
        built_ins::{PrimitiveWord, register_primitives},
        data_structures::dictionary::WordRuntime,
        error,
        interpreter::{Interpreter, format_stack},
    },
};

/// Print the stack without changing it.
///
/// Signature: ` -- `
fn word_dot_s(interpreter: &mut dyn Interpreter, _name: &str) -> error::Result<()> {
    let dump = format_stack(interpreter.stack());
    interpreter.print(&format!("{}\n", dump))
}

/// Print the dictionary listing.
///
/// Signature: ` -- `
fn word_dot_d(interpreter: &mut dyn Interpreter, _name: &str) -> error::Result<()> {
    let listing = interpreter.dictionary().to_string();
    interpreter.print(&listing)
}

/// End the session once the current word returns.
///
/// Signature: ` -- `
fn word_bye(interpreter: &mut dyn Interpreter, _name: &str) -> error::Result<()> {
    interpreter.request_exit();
    Ok(())
}

/// Line comment.  Drops the rest of the current input line, even in the middle of a definition.
///
/// Signature: ` -- `
fn word_line_comment(interpreter: &mut dyn Interpreter, _name: &str) -> error::Result<()> {
    let _ = interpreter.rest_of_line()?;
    Ok(())
}

const INTERPRETER_WORDS: &[PrimitiveWord] = &[
    PrimitiveWord {
        name: "dot_s",
        alias: Some(".S"),
        handler: word_dot_s,
        runtime: WordRuntime::Normal,
        description: "Print the stack depth and contents.",
        signature: "--",
    },
    PrimitiveWord {
        name: "dot_d",
        alias: Some(".D"),
        handler: word_dot_d,
        runtime: WordRuntime::Normal,
        description: "Print the dictionary.",
        signature: "--",
    },
    PrimitiveWord {
        name: "bye",
        alias: None,
        handler: word_bye,
        runtime: WordRuntime::Normal,
        description: "End the session.",
        signature: "--",
    },
    PrimitiveWord {
        name: "\\",
        alias: None,
        handler: word_line_comment,
        runtime: WordRuntime::Immediate,
        description: "Ignore the rest of the line.",
        signature: "--",
    },
];

pub fn register_interpreter_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    register_primitives(interpreter, location_here!(), INTERPRETER_WORDS)
}
