use crate::{
    lang::{
        source_buffer::SourceLocation,
        tokenizing::{Token, to_numeric},
    },
    runtime::{
        data_structures::{
            dictionary::{Dictionary, WordInfo, WordRuntime, WordType},
            value::{ToValue, Value},
        },
        error::{self, ErrorKind, ScriptError},
        interpreter::{Interpreter, WordHandler},
    },
};
use std::rc::Rc;
use tracing::debug;

/// The behavior of a number token: push the number.
struct PushLiteral {
    value: Value,
}

impl WordHandler for PushLiteral {
    fn invoke(&self, interpreter: &mut dyn Interpreter, _name: &str) -> error::Result<()> {
        interpreter.push(self.value);
        Ok(())
    }
}

/// Find the word a token refers to.  Dictionary words always win, so a word named `1` would
/// shadow the number.  Otherwise the token is tried as an integer, then as a float, and on success
/// a one-off literal word is returned.  It is never added to the dictionary.
pub fn resolve_word(dictionary: &Dictionary, token: &Token) -> Option<WordInfo> {
    if let Some(found) = dictionary.lookup(token.text()) {
        return Some(found.clone());
    }

    let number = to_numeric(token.text())?;

    Some(WordInfo::new(
        token.text().clone(),
        token.location().clone(),
        WordRuntime::Normal,
        WordType::Literal,
        Rc::new(PushLiteral {
            value: number.to_value(),
        }),
    ))
}

/// One recorded step of a compiled word: the behavior and the name to invoke it with.
type Step = (Rc<dyn WordHandler>, String);

/// A word defined in Forth.  Invoking it replays the recorded steps in order against whatever
/// the stack holds at that time.
pub struct ScriptFunction {
    steps: Vec<Step>,
}

impl ScriptFunction {
    /// How many steps are replayed per invocation.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl WordHandler for ScriptFunction {
    fn invoke(&self, interpreter: &mut dyn Interpreter, _name: &str) -> error::Result<()> {
        for (handler, name) in &self.steps {
            if interpreter.exit_requested() {
                break;
            }

            handler.invoke(interpreter, name)?;
        }

        Ok(())
    }
}

/// A word body under construction.  Tokens are fed in one at a time so immediate words get to
/// act on the input at the point they appear.
#[derive(Default)]
pub struct WordConstruction {
    steps: Vec<Step>,
}

impl WordConstruction {
    pub fn new() -> WordConstruction {
        WordConstruction { steps: Vec::new() }
    }

    /// Resolve a token of the body.  Immediate words run right now and leave no step behind,
    /// everything else is recorded for later.
    pub fn compile_token(
        &mut self,
        interpreter: &mut dyn Interpreter,
        token: &Token,
    ) -> error::Result<()> {
        let Some(word) = interpreter.resolve_word(token) else {
            return ScriptError::new_as_result(
                Some(token.location().clone()),
                ErrorKind::UnknownWord(token.text().clone()),
            );
        };

        match word.runtime() {
            WordRuntime::Immediate => interpreter.execute_word(token.location(), &word),

            WordRuntime::Normal => {
                self.steps.push((word.handler(), word.name().clone()));
                Ok(())
            }
        }
    }

    pub fn finish(self) -> ScriptFunction {
        ScriptFunction { steps: self.steps }
    }
}

/// Compile a list of tokens into a new behavior.  The first token that can not be resolved fails
/// the whole compilation.
pub fn compile_words(
    interpreter: &mut dyn Interpreter,
    tokens: &[Token],
) -> error::Result<ScriptFunction> {
    let mut construction = WordConstruction::new();

    for token in tokens {
        construction.compile_token(interpreter, token)?;
    }

    Ok(construction.finish())
}

/// Install a compiled word under the given name.
pub fn install_script_word(
    interpreter: &mut dyn Interpreter,
    location: SourceLocation,
    name: &str,
    function: ScriptFunction,
) {
    debug!(word = %name, steps = function.len(), "compiled word");

    let info = WordInfo::new(
        name.to_string(),
        location,
        WordRuntime::Normal,
        WordType::Scripted,
        Rc::new(function),
    )
    .with_description("User defined word.", "");

    interpreter.define_word(info);
}

/// Compile the tokens and define the result as a new normal word.  Nothing is defined if the
/// compilation fails.
pub fn define_word_from_tokens(
    interpreter: &mut dyn Interpreter,
    location: SourceLocation,
    name: &str,
    tokens: &[Token],
) -> error::Result<()> {
    let function = compile_words(interpreter, tokens)?;

    install_script_word(interpreter, location, name, function);
    Ok(())
}
