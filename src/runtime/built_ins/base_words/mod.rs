/// The four arithmetic words.
mod simple_arithmetic_words;

/// Words that manipulate the data stack.
mod stack_words;

/// Words that change or read the state of the interpreter.
mod interpreter_words;

/// Words that create new words.
mod word_creation_words;

use crate::runtime::{
    built_ins::base_words::{
        interpreter_words::register_interpreter_words,
        simple_arithmetic_words::register_simple_arithmetic_words,
        stack_words::register_stack_words, word_creation_words::register_word_creation_words,
    },
    error,
    interpreter::Interpreter,
};

/// Called to register all of the core words of the language.
pub fn register_base_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    register_simple_arithmetic_words(interpreter)?;
    register_stack_words(interpreter)?;
    register_interpreter_words(interpreter)?;
    register_word_creation_words(interpreter)?;

    Ok(())
}
