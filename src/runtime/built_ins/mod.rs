/// The core words of the language.
pub mod base_words;

/// Words that perform I/O operations.
pub mod io_words;

use crate::{
    lang::source_buffer::SourceLocation,
    runtime::{
        data_structures::dictionary::{WordInfo, WordRuntime, WordType},
        error,
        interpreter::{Interpreter, format_stack},
    },
};
use std::rc::Rc;
use tracing::debug;

/// The signature every native word is written with.  The second argument is the name the word
/// was invoked under.
pub type NativeHandler = fn(&mut dyn Interpreter, &str) -> error::Result<()>;

/// One row of a primitive registration table.
pub struct PrimitiveWord {
    /// The internal name of the word.
    pub name: &'static str,

    /// A symbolic name also bound to the word, `+` for `plus` for example.
    pub alias: Option<&'static str>,

    pub handler: NativeHandler,

    pub runtime: WordRuntime,

    /// A simple description of the word, shown by `.D`.
    pub description: &'static str,

    /// The word's stack signature.
    pub signature: &'static str,
}

/// Register every row of a table, defining the internal name first and then its alias.  An alias
/// that points nowhere aborts the registration.
pub fn register_primitives(
    interpreter: &mut dyn Interpreter,
    location: SourceLocation,
    table: &[PrimitiveWord],
) -> error::Result<()> {
    for primitive in table {
        let info = WordInfo::new(
            primitive.name.to_string(),
            location.clone(),
            primitive.runtime,
            WordType::Native,
            Rc::new(primitive.handler),
        )
        .with_description(primitive.description, primitive.signature);

        interpreter.define_word(info);

        if let Some(alias) = primitive.alias {
            interpreter.alias_word(alias, primitive.name)?;
        }
    }

    debug!(count = table.len(), "registered primitive words");
    Ok(())
}

/// The underflow guard shared by the stack and arithmetic words.  If fewer than `needed` values
/// are on the stack the underflow is reported, the whole stack is cleared and false is returned.
/// Nothing is popped otherwise.
pub fn require_depth(
    interpreter: &mut dyn Interpreter,
    name: &str,
    needed: usize,
) -> error::Result<bool> {
    if interpreter.stack().len() >= needed {
        return Ok(true);
    }

    let message = if needed > 1 {
        format!("{} stack underflow: {}\n", name, format_stack(interpreter.stack()))
    } else {
        format!("{} stack underflow\n", name)
    };

    debug!(word = %name, needed, "stack underflow");

    interpreter.print(&message)?;
    interpreter.clear_stack();

    Ok(false)
}

/// Called to register every built-in word.  This must happen before any user input is processed.
pub fn register_builtin_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    base_words::register_base_words(interpreter)?;
    io_words::register_io_words(interpreter)?;

    Ok(())
}
