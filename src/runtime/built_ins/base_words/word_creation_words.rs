use crate::{
    lang::{
        compilation::{WordConstruction, install_script_word},
        tokenizing::Token,
    },
    location_here,
    runtime::{
        built_ins::{PrimitiveWord, register_primitives},
        data_structures::dictionary::WordRuntime,
        error::{self, ErrorKind, ScriptError},
        interpreter::Interpreter,
    },
};

/// The token that ends a definition.
const END_OF_DEFINITION: &str = ";";

/// Read a word definition from the input and define the word.  The definition looks like
/// `: new-word w1 w2 w3 ;`.
///
/// The body is compiled as it is read, so immediate words act on the input where they appear.
/// If a body token can not be resolved the rest of the body is skipped up to the `;` and nothing
/// is defined.  Immediate words keep running while the body is skipped.  Running out of input
/// before the `;` is fatal.
fn word_start_definition(interpreter: &mut dyn Interpreter, _name: &str) -> error::Result<()> {
    // Immediate words in the body move the current location, errors about the definition as a
    // whole point at the `:`.
    let start = interpreter.current_location().clone();

    let Some(name_token) = interpreter.next_token()? else {
        return ScriptError::new_as_result(start, ErrorKind::TruncatedDefinition);
    };

    let mut construction = WordConstruction::new();
    let mut failure = None;

    loop {
        let Some(token) = interpreter.next_token()? else {
            return ScriptError::new_as_result(start, ErrorKind::TruncatedDefinition);
        };

        if token.text() == END_OF_DEFINITION {
            break;
        }

        if failure.is_some() {
            skip_token(interpreter, &token)?;
            continue;
        }

        if let Err(error) = construction.compile_token(interpreter, &token) {
            if error.is_fatal() {
                return Err(error);
            }

            failure = Some(error);
        }
    }

    if let Some(error) = failure {
        return Err(error);
    }

    install_script_word(
        interpreter,
        name_token.location().clone(),
        name_token.text(),
        construction.finish(),
    );

    Ok(())
}

/// A token of a body that is being thrown away.  Nothing is compiled, but immediate words still
/// run so the body splits into tokens the same way it would have if it were being compiled.
fn skip_token(interpreter: &mut dyn Interpreter, token: &Token) -> error::Result<()> {
    let Some(word) = interpreter.resolve_word(token) else {
        return Ok(());
    };

    if !word.is_immediate() {
        return Ok(());
    }

    match interpreter.execute_word(token.location(), &word) {
        Err(error) if error.is_fatal() => Err(error),
        _ => Ok(()),
    }
}

const WORD_CREATION_WORDS: &[PrimitiveWord] = &[PrimitiveWord {
    name: ":",
    alias: None,
    handler: word_start_definition,
    runtime: WordRuntime::Normal,
    description: "Define a new word, up to the next ;.",
    signature: "--",
}];

pub fn register_word_creation_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    register_primitives(interpreter, location_here!(), WORD_CREATION_WORDS)
}
