use crate::runtime::error;
use std::{
    borrow::Cow,
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
    io::{BufRead, Cursor},
};
use tracing::warn;

/// The location in the source text where a token was found.  Used by the error reporting and the
/// dictionary listing to show where things came from.
///
/// This is a read-only structure.  Use the field accessor methods to get the values.
#[derive(Clone, PartialEq, PartialOrd, Eq)]
pub struct SourceLocation {
    /// Either the path to the file or a description of the source.  For example input read from
    /// the terminal is tagged "\<stdin\>".
    path: String,

    /// The 1 based line number.
    line: usize,

    /// The 1 based column number.
    column: usize,
}

impl Hash for SourceLocation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
        self.line.hash(state);
        self.column.hash(state);
    }
}

/// Used for error reporting to show where in the source an error originated.
impl Display for SourceLocation {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{} ({}, {})", self.path, self.line, self.column)
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceLocation {
    /// Create a new SourceLocation with default values.
    pub fn new() -> SourceLocation {
        SourceLocation {
            path: "unspecified".to_string(),
            line: 1,
            column: 1,
        }
    }

    /// Create a new SourceLocation at the start of the given source.
    pub fn new_from_path(path: &str) -> Self {
        SourceLocation {
            path: path.to_owned(),
            line: 1,
            column: 1,
        }
    }

    /// Create a new SourceLocation with all of the needed information.  This is useful in
    /// conjunction with the location_here! macro.
    pub fn new_from_info(path: &str, line: usize, column: usize) -> Self {
        SourceLocation {
            path: path.to_owned(),
            line,
            column,
        }
    }

    /// The path to the source or a meaningful description of it.
    pub fn path(&self) -> &String {
        &self.path
    }

    /// The 1 based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// The 1 based column number.
    pub fn column(&self) -> usize {
        self.column
    }
}

/// Helper macro to get the location of the macro invocation.  Native words record where in the
/// Rust code they were registered from.
#[macro_export]
macro_rules! location_here {
    () => {
        $crate::lang::source_buffer::SourceLocation::new_from_info(
            file!(),
            line!() as usize,
            column!() as usize,
        )
    };
}

/// A forward only character cursor over a buffered reader.  Input is pulled one line at a time so
/// an interactive session only blocks when the tokenizer actually needs more characters.
///
/// The location of the cursor is maintained as characters are consumed, letting the tokenizer
/// stamp every token with where it was found.
pub struct SourceBuffer {
    /// Where the characters come from.
    reader: Box<dyn BufRead>,

    /// The line currently being consumed, including its trailing new line if it had one.
    line: Vec<char>,

    /// Index of the next unconsumed character within `line`.
    cursor: usize,

    /// The logical location of the cursor.
    location: SourceLocation,

    /// Set once the reader reported end of input.
    exhausted: bool,
}

impl SourceBuffer {
    /// Create a new SourceBuffer reading from the given reader.  The path is only used to tag
    /// locations.
    pub fn new(path: &str, reader: Box<dyn BufRead>) -> Self {
        SourceBuffer {
            reader,
            line: Vec::new(),
            cursor: 0,
            location: SourceLocation::new_from_path(path),
            exhausted: false,
        }
    }

    /// Create a SourceBuffer over an in memory copy of the given text.
    pub fn from_source(path: &str, source: &str) -> Self {
        Self::new(path, Box::new(Cursor::new(source.to_owned().into_bytes())))
    }

    /// The location the cursor is at.
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// Take a peek at the next character without consuming it.  `None` means the end of input.
    pub fn peek_next(&mut self) -> error::Result<Option<char>> {
        if !self.fill()? {
            return Ok(None);
        }

        Ok(self.line.get(self.cursor).copied())
    }

    /// Get and consume the next character.
    pub fn next_char(&mut self) -> error::Result<Option<char>> {
        let next = self.peek_next()?;

        if let Some(next_char) = next {
            self.cursor += 1;
            self.increment_location(next_char);
        }

        Ok(next)
    }

    /// Consume everything up to and including the next new line.  Returns `None` if the input was
    /// already at its end.
    pub fn rest_of_line(&mut self) -> error::Result<Option<String>> {
        if !self.fill()? {
            return Ok(None);
        }

        let mut text = String::new();

        while let Some(next) = self.line.get(self.cursor).copied() {
            self.cursor += 1;
            self.increment_location(next);
            text.push(next);

            if next == '\n' {
                break;
            }
        }

        Ok(Some(text))
    }

    /// Make sure there is at least one unconsumed character buffered.  Returns false at the end of
    /// input.
    fn fill(&mut self) -> error::Result<bool> {
        if self.cursor < self.line.len() {
            return Ok(true);
        }

        if self.exhausted {
            return Ok(false);
        }

        let mut bytes = Vec::new();

        if self.reader.read_until(b'\n', &mut bytes)? == 0 {
            self.exhausted = true;
            return Ok(false);
        }

        // Bad bytes become U+FFFD, which then fails to resolve like any other unknown word.
        let text = String::from_utf8_lossy(&bytes);

        if let Cow::Owned(_) = text {
            warn!(location = %self.location, "input line is not valid UTF-8");
        }

        self.line = text.chars().collect();
        self.cursor = 0;

        Ok(true)
    }

    /// Advance one column for regular characters.  Reset the column to 1 and increment the line
    /// for new line characters.
    fn increment_location(&mut self, next: char) {
        if next == '\n' {
            self.location.line += 1;
            self.location.column = 1;
        } else {
            self.location.column += 1;
        }
    }
}
