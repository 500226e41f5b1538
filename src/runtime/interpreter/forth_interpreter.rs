use crate::{
    lang::{
        compilation::resolve_word,
        source_buffer::{SourceBuffer, SourceLocation},
        tokenizing::{self, Token},
    },
    runtime::{
        data_structures::{
            dictionary::{Dictionary, WordInfo},
            value::Value,
        },
        error::{self, ErrorKind, ScriptError, script_error},
        interpreter::{
            InterpreterStack, SessionEnd, SourceManagement, ValueStack, WordManagement,
        },
    },
};
use std::{
    fs::File,
    io::{BufReader, Write, stdin, stdout},
    mem,
};
use tracing::{debug, trace};

/// The interpreter session: the data stack, the dictionary and the two character streams, bundled
/// together and handed to every word as `&mut dyn Interpreter`.
pub struct ForthInterpreter {
    /// The data stack shared by every word.
    stack: ValueStack,

    /// The dictionary of words known by the interpreter.
    dictionary: Dictionary,

    /// Where tokens are read from.
    input: SourceBuffer,

    /// Where results and diagnostics are written to.
    output: Box<dyn Write>,

    /// The location of the token currently being evaluated.
    current_location: Option<SourceLocation>,

    /// Set by `bye`.
    exit_requested: bool,
}

impl InterpreterStack for ForthInterpreter {
    fn stack(&self) -> &ValueStack {
        &self.stack
    }

    fn push(&mut self, value: Value) {
        self.stack.push(value);
    }

    fn pop(&mut self) -> error::Result<Value> {
        match self.stack.pop() {
            Some(value) => Ok(value),
            None => script_error(self, ErrorKind::StackUnderflow),
        }
    }

    fn clear_stack(&mut self) {
        self.stack.clear();
    }
}

impl SourceManagement for ForthInterpreter {
    fn next_token(&mut self) -> error::Result<Option<Token>> {
        tokenizing::next_token(&mut self.input)
    }

    fn rest_of_line(&mut self) -> error::Result<Option<String>> {
        self.input.rest_of_line()
    }

    fn print(&mut self, text: &str) -> error::Result<()> {
        self.output.write_all(text.as_bytes())?;
        Ok(())
    }

    fn flush_output(&mut self) -> error::Result<()> {
        self.output.flush()?;
        Ok(())
    }

    fn run(&mut self) -> error::Result<SessionEnd> {
        loop {
            // Interactive users need to see the results of the last line before we block on the
            // next one.
            self.flush_output()?;

            if self.exit_requested {
                return Ok(SessionEnd::Terminated);
            }

            let Some(token) = self.next_token()? else {
                return Ok(SessionEnd::EndOfInput);
            };

            self.forth_eval(&token)?;
        }
    }

    fn process_source(&mut self, path: &str, source: &str) -> error::Result<SessionEnd> {
        let buffer = SourceBuffer::from_source(path, source);
        self.run_with_input(buffer)
    }

    fn process_source_file(&mut self, path: &str) -> error::Result<SessionEnd> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) => {
                return ScriptError::new_as_result(
                    None,
                    ErrorKind::Io(format!("Could not read file {}: {}", path, err)),
                );
            }
        };

        self.run_with_input(SourceBuffer::new(path, Box::new(BufReader::new(file))))
    }
}

impl WordManagement for ForthInterpreter {
    fn current_location(&self) -> &Option<SourceLocation> {
        &self.current_location
    }

    fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    fn define_word(&mut self, info: WordInfo) {
        debug!(word = %info.name(), kind = ?info.word_type(), "defining word");
        let _ = self.dictionary.define(info);
    }

    fn alias_word(&mut self, name: &str, existing: &str) -> error::Result<()> {
        debug!(word = %name, target = %existing, "aliasing word");
        let _ = self.dictionary.alias(name, existing)?;
        Ok(())
    }

    fn find_word(&self, name: &str) -> Option<&WordInfo> {
        self.dictionary.lookup(name)
    }

    fn resolve_word(&self, token: &Token) -> Option<WordInfo> {
        resolve_word(&self.dictionary, token)
    }

    fn execute_word(&mut self, location: &SourceLocation, word: &WordInfo) -> error::Result<()> {
        self.current_location = Some(location.clone());
        word.handler().invoke(self, word.name())
    }

    fn forth_eval(&mut self, token: &Token) -> error::Result<()> {
        trace!(token = %token, "evaluating");

        let result = match self.resolve_word(token) {
            Some(word) => self.execute_word(token.location(), &word),
            None => ScriptError::new_as_result(
                Some(token.location().clone()),
                ErrorKind::UnknownWord(token.text().clone()),
            ),
        };

        match result {
            Err(error) if !error.is_fatal() => {
                debug!(%error, "recovered from error");
                self.print(&format!("{}\n", error.kind()))
            }

            other => other,
        }
    }

    fn request_exit(&mut self) {
        debug!("session termination requested");
        self.exit_requested = true;
    }

    fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}

impl ForthInterpreter {
    /// Create an interpreter with an empty dictionary.  Use
    /// [`register_builtin_words`](crate::runtime::built_ins::register_builtin_words) to add the
    /// primitive words before feeding it any input.
    pub fn new(input: SourceBuffer, output: Box<dyn Write>) -> ForthInterpreter {
        ForthInterpreter {
            stack: ValueStack::with_capacity(20),
            dictionary: Dictionary::new(),
            input,
            output,
            current_location: None,
            exit_requested: false,
        }
    }

    /// An interpreter reading standard input and writing to standard output.
    pub fn from_stdio() -> ForthInterpreter {
        ForthInterpreter::new(
            SourceBuffer::new("<stdin>", Box::new(stdin().lock())),
            Box::new(stdout()),
        )
    }

    /// Temporarily swap the input for another source and run it to completion.  A `bye` only ends
    /// the source it was read from, the next source starts with a clear exit flag.
    fn run_with_input(&mut self, buffer: SourceBuffer) -> error::Result<SessionEnd> {
        let previous = mem::replace(&mut self.input, buffer);
        let result = self.run();

        self.input = previous;
        self.exit_requested = false;
        result
    }
}
