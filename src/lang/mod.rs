/// Module for reading source text one character at a time and tracking where we are in it.
pub mod source_buffer;

/// Module for splitting the source text into whitespace delimited tokens, and for recognizing the
/// tokens that spell numbers.
pub mod tokenizing;

/// Module for resolving tokens to words and compiling token lists into new words.  Immediate words
/// run while a definition is being compiled, which is why this phase needs a live interpreter.
pub mod compilation;
