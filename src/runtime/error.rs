use crate::{lang::source_buffer::SourceLocation, runtime::interpreter::Interpreter};
use std::{
    error::Error,
    fmt::{self, Debug, Display, Formatter},
    process::{ExitCode, Termination},
};

pub type Result<T> = std::result::Result<T, ScriptError>;

/// What went wrong.  Only some kinds of error are allowed to end a session, see
/// [`ErrorKind::is_fatal`].
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum ErrorKind {
    /// A token matched neither the dictionary nor the number grammar.
    #[error("unknown word: {0}")]
    UnknownWord(String),

    /// The input ended in the middle of a `: name ... ;` definition.
    #[error("EOF during word definition")]
    TruncatedDefinition,

    /// An alias was requested for a word that does not exist.
    #[error("no such word {0}")]
    NoSuchWord(String),

    /// A value was popped from an empty stack.
    #[error("stack underflow")]
    StackUnderflow,

    /// Reading the input or writing the output failed.
    #[error("I/O error: {0}")]
    Io(String),
}

impl ErrorKind {
    /// Fatal errors end the session.  The others are reported on the output channel and the
    /// session carries on with the next token.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ErrorKind::UnknownWord(_) | ErrorKind::StackUnderflow)
    }
}

/// Any error that occurs while running Forth code.
#[derive(Clone)]
pub struct ScriptError {
    /// The location in the source the error occurred, if available.
    location: Option<SourceLocation>,

    /// The description of the error.
    kind: ErrorKind,
}

impl Error for ScriptError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.kind)
    }
}

/// When returned from main, convert the error result to an operating system exit code.
impl Termination for ScriptError {
    /// Because this type represents an error, the exit code is always FAILURE.
    fn report(self) -> ExitCode {
        eprintln!("Error: {}", self);
        ExitCode::FAILURE
    }
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{}: {}", location, self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl Debug for ScriptError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl ScriptError {
    pub fn new(location: Option<SourceLocation>, kind: ErrorKind) -> ScriptError {
        ScriptError { location, kind }
    }

    /// Create a new ScriptError and wrap it in a Result::Err.
    pub fn new_as_result<T>(location: Option<SourceLocation>, kind: ErrorKind) -> Result<T> {
        Err(ScriptError::new(location, kind))
    }

    /// If available, the location in the source the error occurred.
    pub fn location(&self) -> &Option<SourceLocation> {
        &self.location
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }
}

/// Allow for the conversion of a std::io::Error into a ScriptError.
impl From<std::io::Error> for ScriptError {
    fn from(error: std::io::Error) -> ScriptError {
        ScriptError::new(None, ErrorKind::Io(error.to_string()))
    }
}

/// Create a ScriptError at the interpreter's current location and wrap it in a Result::Err.
pub fn script_error<T>(interpreter: &dyn Interpreter, kind: ErrorKind) -> Result<T> {
    ScriptError::new_as_result(interpreter.current_location().clone(), kind)
}
