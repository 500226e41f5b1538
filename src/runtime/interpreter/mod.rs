use crate::{
    lang::{source_buffer::SourceLocation, tokenizing::Token},
    runtime::{
        data_structures::{
            dictionary::{Dictionary, WordInfo},
            value::Value,
        },
        error,
    },
};
use std::rc::Rc;

pub mod forth_interpreter;

/// The data stack of values managed by the interpreter.
pub type ValueStack = Vec<Value>;

/// Render the stack the way `.S` shows it: `<depth> [bottom, ..., top]`.
pub fn format_stack(stack: &ValueStack) -> String {
    let values: Vec<String> = stack.iter().map(|value| value.to_string()).collect();

    format!("<{}> [{}]", stack.len(), values.join(", "))
}

/// How a session came to an end.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SessionEnd {
    /// The token source ran dry.
    EndOfInput,

    /// A word asked for the session to end, see `bye`.
    Terminated,
}

/// The behavior of a word.  It is invoked with the name the word was found under, so aliases
/// report errors with the name the user actually typed.
pub trait WordHandler {
    fn invoke(&self, interpreter: &mut dyn Interpreter, name: &str) -> error::Result<()>;
}

/// Plain functions and closures with the right signature are word handlers.
impl<F> WordHandler for F
where
    F: Fn(&mut dyn Interpreter, &str) -> error::Result<()>,
{
    fn invoke(&self, interpreter: &mut dyn Interpreter, name: &str) -> error::Result<()> {
        self(interpreter, name)
    }
}

/// Wrap a function or closure as a shareable word handler.
pub fn native_handler<F>(function: F) -> Rc<dyn WordHandler>
where
    F: Fn(&mut dyn Interpreter, &str) -> error::Result<()> + 'static,
{
    Rc::new(function)
}

/// Trait for managing the interpreter's data stack.  Intended to be called by words, both native
/// and scripted.
pub trait InterpreterStack {
    /// Examine the full data stack, for example for the stack dump word `.S`.
    fn stack(&self) -> &ValueStack;

    /// Push a value onto the stack.
    fn push(&mut self, value: Value);

    /// Pop a value from the stack.  If the stack is empty a stack underflow error is returned.
    fn pop(&mut self) -> error::Result<Value>;

    /// Drop every value on the stack.
    fn clear_stack(&mut self);
}

/// Trait for the character streams of a session: the token source the words are read from and the
/// output channel results and diagnostics are written to.
pub trait SourceManagement {
    /// Read the next token from the input.  `None` at the end of input.
    fn next_token(&mut self) -> error::Result<Option<Token>>;

    /// Consume the rest of the current input line.  `None` at the end of input.
    fn rest_of_line(&mut self) -> error::Result<Option<String>>;

    /// Append text to the output channel.
    fn print(&mut self, text: &str) -> error::Result<()>;

    fn flush_output(&mut self) -> error::Result<()>;

    /// Read and evaluate tokens until the input ends or a word asks to terminate.  Fatal errors are
    /// returned, everything else is reported on the output and evaluation continues.
    fn run(&mut self) -> error::Result<SessionEnd>;

    /// Run the given in memory source through the interpreter.  The path is used to tag locations
    /// in error messages.  Once done the previous input is restored and a pending `bye` is
    /// forgotten.
    fn process_source(&mut self, path: &str, source: &str) -> error::Result<SessionEnd>;

    /// Run a source file through the interpreter, streaming it line by line.
    fn process_source_file(&mut self, path: &str) -> error::Result<SessionEnd>;
}

/// Trait for defining, finding and executing words.
pub trait WordManagement {
    /// If currently set, the location of the token being evaluated.
    fn current_location(&self) -> &Option<SourceLocation>;

    /// The word dictionary.
    fn dictionary(&self) -> &Dictionary;

    /// Add a word to the dictionary, replacing any previous word of that name.
    fn define_word(&mut self, info: WordInfo);

    /// Make `name` another name for the existing word `existing`.  Fails with `NoSuchWord` if
    /// there is no such word.
    fn alias_word(&mut self, name: &str, existing: &str) -> error::Result<()>;

    /// Find a word in the dictionary by name.
    fn find_word(&self, name: &str) -> Option<&WordInfo>;

    /// Turn a token into something executable: either the word it names, or a literal word that
    /// pushes the number it spells.  `None` if it is neither.
    fn resolve_word(&self, token: &Token) -> Option<WordInfo>;

    /// Run a word's behavior with the word's own name.
    fn execute_word(&mut self, location: &SourceLocation, word: &WordInfo) -> error::Result<()>;

    /// Resolve and run a single token.  Unknown words are reported on the output and leave the
    /// stack alone.
    fn forth_eval(&mut self, token: &Token) -> error::Result<()>;

    /// Ask the session to end once the current word returns.
    fn request_exit(&mut self);

    fn exit_requested(&self) -> bool;
}

/// Core interpreter trait.  Brings together stack handling, the input and output streams, and the
/// word dictionary.
///
/// An interpreter is a single threaded object: word handlers are shared through `Rc` and the
/// interpreter must not be used from more than one thread at a time.
pub trait Interpreter: InterpreterStack + SourceManagement + WordManagement {}

impl<T> Interpreter for T where T: InterpreterStack + SourceManagement + WordManagement {}
