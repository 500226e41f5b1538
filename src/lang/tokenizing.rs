use crate::{
    lang::source_buffer::{SourceBuffer, SourceLocation},
    runtime::error,
};
use std::fmt::{self, Debug, Display, Formatter};

/// A number literal can be either an integer or a floating point value.
#[derive(Clone, Copy, PartialEq)]
pub enum NumberType {
    /// We're holding an integer value.
    Int(i64),

    /// We're holding a floating point value.
    Float(f64),
}

/// Print the value of the held number.
impl Display for NumberType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            NumberType::Int(num) => write!(f, "{}", num),
            NumberType::Float(num) => write!(f, "{}", num),
        }
    }
}

/// Print the value of the held number as well as an indicator of which variant we're holding for
/// debugging purposes.
impl Debug for NumberType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            NumberType::Int(num) => write!(f, "{} i", num),
            NumberType::Float(num) => write!(f, "{} f", num),
        }
    }
}

/// A token is a run of non-whitespace characters.  Whether it names a word or spells a number is
/// decided later by the resolver, so the token only carries its text and where it was found.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    location: SourceLocation,
    text: String,
}

/// A list of tokens found in the source.
pub type TokenList = Vec<Token>;

impl Display for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.text)
    }
}

impl Token {
    pub fn new(location: SourceLocation, text: String) -> Token {
        Token { location, text }
    }

    /// Get the token's location in the original source text.
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    pub fn text(&self) -> &String {
        &self.text
    }
}

/// Check if the given character separates tokens.
fn is_whitespace(next: &char) -> bool {
    next.is_whitespace()
}

/// Skip over whitespace, stopping at either the end of the input or the next non-whitespace
/// character.
fn skip_whitespace(buffer: &mut SourceBuffer) -> error::Result<()> {
    while let Some(next) = buffer.peek_next()? {
        if !is_whitespace(&next) {
            break;
        }

        let _ = buffer.next_char()?;
    }

    Ok(())
}

/// Pull text out of the buffer until we hit a whitespace character.  The whitespace itself is left
/// in the buffer.
fn process_until_whitespace(buffer: &mut SourceBuffer) -> error::Result<(SourceLocation, String)> {
    let location = buffer.location().clone();
    let mut text = String::new();

    while let Some(next) = buffer.peek_next()? {
        if is_whitespace(&next) {
            break;
        }

        let _ = buffer.next_char()?;
        text.push(next);
    }

    Ok((location, text))
}

/// Read the next whitespace delimited token.  Reaching the end of the input is not an error, it is
/// reported as `None`.
pub fn next_token(buffer: &mut SourceBuffer) -> error::Result<Option<Token>> {
    skip_whitespace(buffer)?;

    if buffer.peek_next()?.is_none() {
        return Ok(None);
    }

    let (location, text) = process_until_whitespace(buffer)?;

    Ok(Some(Token::new(location, text)))
}

/// Tokenize a whole in memory source.
pub fn tokenize_from_source(path: &str, source: &str) -> error::Result<TokenList> {
    let mut buffer = SourceBuffer::from_source(path, source);
    let mut token_list = TokenList::new();

    while let Some(token) = next_token(&mut buffer)? {
        token_list.push(token);
    }

    Ok(token_list)
}

/// Remove digit group separators.  A `_` is only accepted between two digits.
fn strip_separators(digits: &str) -> Option<String> {
    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') || digits.contains("__")
    {
        return None;
    }

    Some(digits.replace('_', ""))
}

fn is_decimal(digits: &str) -> bool {
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// Integer literals: an optional sign then decimal digits, or digits behind a `0x`, `0b` or `0o`
/// radix prefix.
fn to_integer(text: &str) -> Option<i64> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let (radix, digits) = if let Some(rest) = unsigned.strip_prefix("0x") {
        (16, rest)
    } else if let Some(rest) = unsigned.strip_prefix("0b") {
        (2, rest)
    } else if let Some(rest) = unsigned.strip_prefix("0o") {
        (8, rest)
    } else {
        (10, unsigned)
    };

    let digits = strip_separators(digits)?;

    // from_str_radix would accept a second sign, so check the digits ourselves.
    if !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    let signed = if negative { format!("-{}", digits) } else { digits };

    i64::from_str_radix(&signed, radix).ok()
}

/// Float literals: an optional sign, digits, an optional fraction and an optional exponent.  Words
/// like `inf` or `nan` are not numbers.
fn to_float(text: &str) -> Option<f64> {
    let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);

    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(index) => (&unsigned[..index], Some(&unsigned[index + 1..])),
        None => (unsigned, None),
    };

    let (whole, fraction) = match mantissa.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (mantissa, None),
    };

    if !is_decimal(&strip_separators(whole)?) {
        return None;
    }

    if let Some(fraction) = fraction
        && !is_decimal(&strip_separators(fraction)?)
    {
        return None;
    }

    if let Some(exponent) = exponent {
        let exponent = exponent.strip_prefix(['-', '+']).unwrap_or(exponent);

        if !is_decimal(exponent) {
            return None;
        }
    }

    text.replace('_', "").parse().ok()
}

/// Attempt to convert the text into a numeric literal.  Integers are tried first, then floating
/// point values.
pub fn to_numeric(text: &str) -> Option<NumberType> {
    if let Some(integer) = to_integer(text) {
        return Some(NumberType::Int(integer));
    }

    to_float(text).map(NumberType::Float)
}
