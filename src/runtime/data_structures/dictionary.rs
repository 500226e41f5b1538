use crate::{
    lang::source_buffer::SourceLocation,
    runtime::{
        error::{self, ErrorKind, ScriptError},
        interpreter::WordHandler,
    },
};
use std::{
    collections::HashMap,
    fmt::{self, Display, Formatter},
    rc::Rc,
};

/// The runtime of a word in the dictionary.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Hash, Debug)]
pub enum WordRuntime {
    /// The word is executed the moment it is found, even in the middle of a definition.
    Immediate,

    /// Inside a definition the word is recorded and only runs when the new word is invoked.
    Normal,
}

/// The type of a word in the dictionary.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Hash, Debug)]
pub enum WordType {
    /// The word is a native word written in Rust.
    Native,

    /// The word was defined by a script with `: name ... ;`.
    Scripted,

    /// The word was synthesized by the resolver from a number token.  Never stored.
    Literal,
}

/// The information stored in the dictionary for each word.  Entries are never modified once
/// built, redefining a word replaces the whole entry.
#[derive(Clone)]
pub struct WordInfo {
    location: SourceLocation,
    name: String,
    runtime: WordRuntime,
    word_type: WordType,
    description: String,
    signature: String,
    handler: Rc<dyn WordHandler>,
}

impl WordInfo {
    pub fn new(
        name: String,
        location: SourceLocation,
        runtime: WordRuntime,
        word_type: WordType,
        handler: Rc<dyn WordHandler>,
    ) -> WordInfo {
        WordInfo {
            location,
            name,
            runtime,
            word_type,
            description: String::new(),
            signature: String::new(),
            handler,
        }
    }

    /// Attach the help text shown in the dictionary listing.
    pub fn with_description(mut self, description: &str, signature: &str) -> WordInfo {
        self.description = description.to_string();
        self.signature = signature.to_string();
        self
    }

    /// A copy of this word under another name.  Behavior, runtime and help text are shared.
    pub fn renamed(&self, name: &str) -> WordInfo {
        WordInfo {
            name: name.to_string(),
            ..self.clone()
        }
    }

    /// Where the word was defined, in Forth or in Rust source.
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    pub fn name(&self) -> &String {
        &self.name
    }

    pub fn runtime(&self) -> WordRuntime {
        self.runtime
    }

    pub fn is_immediate(&self) -> bool {
        self.runtime == WordRuntime::Immediate
    }

    pub fn word_type(&self) -> WordType {
        self.word_type
    }

    pub fn description(&self) -> &String {
        &self.description
    }

    /// The stack signature of the word, for example `a b -- sum`.
    pub fn signature(&self) -> &String {
        &self.signature
    }

    pub fn handler(&self) -> Rc<dyn WordHandler> {
        self.handler.clone()
    }
}

/// The word dictionary used by the interpreter.  Names are unique, the last definition of a name
/// wins.  Words that were compiled against an older definition keep using it.
pub struct Dictionary {
    words: HashMap<String, WordInfo>,
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

/// Pretty print the dictionary as a sorted listing of every word.
impl Display for Dictionary {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        let max_size = self.words.keys().map(|name| name.len()).max().unwrap_or(0);

        writeln!(formatter, "{} words defined.\n", self.words.len())?;

        let mut keys: Vec<&String> = self.words.keys().collect();
        keys.sort();

        for key in keys {
            let word = &self.words[key];
            let runtime = if word.is_immediate() {
                "immediate"
            } else {
                "         "
            };

            writeln!(
                formatter,
                "{:width$}  {}  {:12}  --  {}",
                key,
                runtime,
                word.signature,
                word.description,
                width = max_size
            )?;
        }

        Ok(())
    }
}

impl Dictionary {
    pub fn new() -> Dictionary {
        Dictionary {
            words: HashMap::new(),
        }
    }

    /// Insert a word, replacing any existing word of the same name.
    pub fn define(&mut self, info: WordInfo) -> &WordInfo {
        let name = info.name.clone();

        let _ = self.words.insert(name.clone(), info);
        &self.words[&name]
    }

    /// Find the current definition of a word.
    pub fn lookup(&self, name: &str) -> Option<&WordInfo> {
        self.words.get(name)
    }

    /// Make `name` another name for the existing word `existing`.
    pub fn alias(&mut self, name: &str, existing: &str) -> error::Result<&WordInfo> {
        let Some(found) = self.words.get(existing) else {
            return ScriptError::new_as_result(None, ErrorKind::NoSuchWord(existing.to_string()));
        };

        let aliased = found.renamed(name);
        Ok(self.define(aliased))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::interpreter::native_handler;

    fn word(name: &str, runtime: WordRuntime) -> WordInfo {
        WordInfo::new(
            name.to_string(),
            SourceLocation::new(),
            runtime,
            WordType::Native,
            native_handler(|_, _| Ok(())),
        )
    }

    #[test]
    fn last_definition_wins() {
        let mut dictionary = Dictionary::new();

        dictionary.define(word("foo", WordRuntime::Normal).with_description("first", ""));
        dictionary.define(word("foo", WordRuntime::Normal).with_description("second", ""));

        assert_eq!(dictionary.len(), 1);
        assert_eq!(dictionary.lookup("foo").unwrap().description(), "second");
        assert!(dictionary.lookup("bar").is_none());
    }

    #[test]
    fn alias_copies_behavior_and_runtime() {
        let mut dictionary = Dictionary::new();
        dictionary.define(word("backslash", WordRuntime::Immediate));

        let aliased = dictionary.alias("\\", "backslash").unwrap();

        assert_eq!(aliased.name(), "\\");
        assert!(aliased.is_immediate());

        let original = dictionary.lookup("backslash").unwrap();
        let copy = dictionary.lookup("\\").unwrap();

        assert!(Rc::ptr_eq(&original.handler(), &copy.handler()));
    }

    #[test]
    fn alias_of_missing_word_fails() {
        let mut dictionary = Dictionary::new();
        let error = dictionary.alias("+", "plus").err().unwrap();

        assert_eq!(error.kind(), &ErrorKind::NoSuchWord("plus".to_string()));
        assert!(error.is_fatal());
        assert!(dictionary.is_empty());
    }

    #[test]
    fn listing_marks_immediate_words() {
        let mut dictionary = Dictionary::new();
        dictionary.define(word("\\", WordRuntime::Immediate));
        dictionary.define(word("dup", WordRuntime::Normal).with_description("Copy.", "a -- a a"));

        let listing = dictionary.to_string();

        assert!(listing.starts_with("2 words defined."));
        assert!(listing.contains("immediate"));
        assert!(listing.contains("a -- a a"));
    }
}
