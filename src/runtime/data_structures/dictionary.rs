use crate::{
    lang::{code::Node, source_buffer::SourceLocation},
    runtime::interpreter::WordHandler,
};
use std::{
    collections::HashMap,
    fmt::{self, Debug, Display, Formatter},
    rc::Rc,
};

/// The information kept for a word implemented in Rust.
#[derive(Clone)]
pub struct NativeWord {
    /// The name the word was registered under.
    pub name: String,

    /// Where in the Rust source the word was registered from.
    pub location: SourceLocation,

    /// A simple description of the word.
    pub description: String,

    /// Documentation tag for the values the word pops, for example `2f` for two numbers.
    pub inputs: String,

    /// Documentation tag for the values the word pushes.
    pub outputs: String,

    /// The function that implements the word.
    pub handler: Rc<WordHandler>,
}

impl Debug for NativeWord {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "NativeWord({}: {} -- {})", self.name, self.inputs, self.outputs)
    }
}

/// An entry in the dictionary.  A word is either a scripted definition, captured as its parsed
/// definition node, or a native word.
#[derive(Clone, Debug)]
pub enum Word {
    Scripted(Rc<Node>),
    Native(NativeWord),
}

impl Word {
    /// Where the word was defined, in the script or in the Rust code.
    pub fn location(&self) -> &SourceLocation {
        match self {
            Word::Scripted(node) => &node.location,
            Word::Native(native) => &native.location,
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Word::Native(_))
    }
}

/// The wafer dictionary used by the interpreter.  It is a single flat mapping, the newest
/// definition of a name replaces any older one, be it scripted or native.
#[derive(Clone, Default)]
pub struct Dictionary {
    words: HashMap<String, Word>,
}

/// Pretty print the dictionary, sorted by name.
impl Display for Dictionary {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        let max_size = self.words.keys().map(|name| name.len()).max().unwrap_or(0);

        writeln!(formatter, "{} words defined.\n", self.words.len())?;

        for name in self.names() {
            match &self.words[name] {
                Word::Scripted(node) => writeln!(
                    formatter,
                    "{:width$}  {:6}  --  defined at {}",
                    name,
                    "script",
                    node.location,
                    width = max_size
                )?,

                Word::Native(native) => writeln!(
                    formatter,
                    "{:width$}  {:6}  --  ( {} -- {} ) {}",
                    name,
                    "native",
                    native.inputs,
                    native.outputs,
                    native.description,
                    width = max_size
                )?,
            }
        }

        Ok(())
    }
}

impl Debug for Dictionary {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl Dictionary {
    pub fn new() -> Dictionary {
        Dictionary {
            words: HashMap::new(),
        }
    }

    /// Insert a word, replacing any word already known by that name.
    pub fn insert(&mut self, name: String, word: Word) {
        let _ = self.words.insert(name, word);
    }

    pub fn try_get(&self, name: &str) -> Option<&Word> {
        self.words.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.words.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// All of the known names, sorted.
    pub fn names(&self) -> Vec<&String> {
        let mut names: Vec<&String> = self.words.keys().collect();

        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::code::NodeKind;

    fn definition(name: &str, line: usize) -> Word {
        let location = SourceLocation::new_from_info("test", line, 0);
        Word::Scripted(Rc::new(Node::new(NodeKind::Definition(name.to_string()), location)))
    }

    #[test]
    fn last_writer_wins() {
        let mut dictionary = Dictionary::new();

        dictionary.insert("f".to_string(), definition("f", 0));
        dictionary.insert("f".to_string(), definition("f", 4));

        assert_eq!(dictionary.len(), 1);
        assert_eq!(dictionary.try_get("f").map(|word| word.location().line()), Some(4));
        assert!(dictionary.try_get("g").is_none());
    }

    #[test]
    fn names_are_sorted() {
        let mut dictionary = Dictionary::new();

        dictionary.insert("zeta".to_string(), definition("zeta", 0));
        dictionary.insert("alpha".to_string(), definition("alpha", 1));

        assert_eq!(dictionary.names(), vec!["alpha", "zeta"]);
        assert!(dictionary.to_string().starts_with("2 words defined."));
    }
}
