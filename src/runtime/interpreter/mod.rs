use crate::{
    lang::{code::Node, source_buffer::SourceLocation},
    runtime::{
        data_structures::{
            dictionary::{Dictionary, Word},
            value::{Value, ValueKind},
        },
        error::{self, ErrorKind, script_error},
    },
};
use std::{
    fmt::{self, Display, Formatter},
    rc::Rc,
};

pub mod wafer_interpreter;

/// A scope is a record of the node whose children are being executed and the index of the next
/// child to execute.  Entering a word body or one more iteration of a loop pushes a scope, running
/// off the end of the node's children pops it.
#[derive(Clone)]
pub struct Scope {
    node: Rc<Node>,
    index: usize,
}

impl Scope {
    /// Create a new scope at the start of the node's children.
    pub fn new(node: Rc<Node>) -> Scope {
        Scope { node, index: 0 }
    }

    /// The child about to be executed, if the scope isn't exhausted.
    pub fn current(&self) -> Option<&Rc<Node>> {
        self.node.children.get(self.index)
    }

    pub fn advance(&mut self) {
        self.index += 1;
    }
}

/// Show the scope as the kind of node and where it was found, for debugging.
impl Display for Scope {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}/{}]",
            self.node.location,
            self.node.kind.name(),
            self.index,
            self.node.children.len()
        )
    }
}

/// Type to represent the stack of scopes being executed.
pub type ScopeStack = Vec<Scope>;

/// The data stack of values managed by the interpreter.
pub type ValueStack = Vec<Value>;

/// Trait for managing the interpreter's data stack.  Intended to be called by native words.
///
/// The typed pop helpers consume the value even when it turns out to be of the wrong kind.
pub trait InterpreterStack {
    /// Use to examine the full data stack when required.
    fn stack(&self) -> &ValueStack;

    /// Push a value onto the stack.  This is the primary way of sending values to words.
    fn push(&mut self, value: Value);

    /// Pop a value from the stack.  This is the primary way of receiving outputs from words.  If
    /// the stack is empty an empty stack error is returned.
    fn pop(&mut self) -> error::Result<Value>;

    /// Drop every value on the stack.
    fn clear_stack(&mut self);

    /// Pop the top value, which must be a number.
    fn pop_as_number(&mut self) -> error::Result<f64> {
        let value = self.pop()?;

        match value {
            Value::Number(number) => Ok(number),
            other => expected_kind(ValueKind::Number, &other),
        }
    }

    /// Pop the top value, which must be a number, and read it as a boolean.
    fn pop_as_bool(&mut self) -> error::Result<bool> {
        Ok(self.pop_as_number()? != 0.0)
    }

    /// Pop the top value, which must be text.
    fn pop_as_text(&mut self) -> error::Result<String> {
        let value = self.pop()?;

        match value {
            Value::Text(text) => Ok(text),
            other => expected_kind(ValueKind::Text, &other),
        }
    }

    /// Pop the top two values, returned in the order they were pushed.
    fn pop2(&mut self) -> error::Result<(Value, Value)> {
        let b = self.pop()?;
        let a = self.pop()?;

        Ok((a, b))
    }

    /// Pop the top two values as numbers, returned in the order they were pushed.
    fn pop2_as_numbers(&mut self) -> error::Result<(f64, f64)> {
        let b = self.pop_as_number()?;
        let a = self.pop_as_number()?;

        Ok((a, b))
    }

    /// Pop the top two values as text, returned in the order they were pushed.
    fn pop2_as_texts(&mut self) -> error::Result<(String, String)> {
        let b = self.pop_as_text()?;
        let a = self.pop_as_text()?;

        Ok((a, b))
    }
}

fn expected_kind<T>(expected: ValueKind, found: &Value) -> error::Result<T> {
    script_error(ErrorKind::UnexpectedValueKind {
        expected: expected.name(),
        found: found.kind().name(),
    })
}

/// Trait for lexing, parsing and running wafer source code.
pub trait CodeManagement {
    /// Run a parsed tree to completion.  Scopes already on the scope stack are left alone, so a
    /// native word may use this to run code synchronously.
    fn evaluate(&mut self, root: Rc<Node>) -> error::Result<()>;

    /// Push a new scope over the node.  It will be the next thing executed.
    fn push_scope(&mut self, node: Rc<Node>);

    /// The current scope stack, innermost last.
    fn scopes(&self) -> &ScopeStack;

    /// Tokenize, parse and run an in memory script to completion.  The path parameter is used to
    /// represent the source code in error reporting.
    fn process_source(&mut self, path: &str, source: &str) -> error::Result<()>;

    /// Read, tokenize, parse and run a script file to completion.
    fn process_source_file(&mut self, path: &str) -> error::Result<()>;

    /// Tokenize and parse an in memory script, then schedule it to run as the next thing executed
    /// once the calling word returns.
    fn run_source(&mut self, path: &str, source: &str) -> error::Result<()>;

    /// Read, tokenize and parse a script file, then schedule it to run next.
    fn run_source_file(&mut self, path: &str) -> error::Result<()>;
}

/// Definition of a native word handler function.  Can be a lambda, a callable object or a Rust
/// function.  Any error returned is reported as a failure of the word.
pub type WordHandler = dyn Fn(&mut dyn Interpreter) -> error::Result<()>;

/// Simplify registering a native word with the interpreter.
///
/// Required parameters are, the interpreter instance to register with.  The name of the word to
/// register.  The word function handler to execute for the word.  A simple description of the
/// word.  As well as the tags describing the word's inputs and outputs, for example `"2f"` for two
/// numbers, `"1s"` for one string, `"1v"` for one value of either kind or `"0"` for none.
#[macro_export]
macro_rules! add_native_word {
    (
        $interpreter:expr ,
        $name:expr ,
        $function:expr ,
        $description:expr ,
        $inputs:expr ,
        $outputs:expr
    ) => {{
        use std::rc::Rc;

        // Register the word while recording where in the source code the word was registered
        // from.
        $interpreter.add_word(
            file!().to_string(), // Original source location that this
            line!() as usize,    //  word was registered from.
            column!() as usize,
            $name.to_string(),        // Name.
            Rc::new($function),       // Function handler.
            $description.to_string(), // Word description.
            $inputs.to_string(),      // Input tag.
            $outputs.to_string(),     // Output tag.
        );
    }};
}

/// Trait for managing the words known to the interpreter.
pub trait WordManagement {
    /// If currently set, this represents the location of the node being executed.
    fn current_location(&self) -> &Option<SourceLocation>;

    /// Add a new native word to the interpreter's dictionary, replacing any word of that name.
    /// The line and column are 1 based, as given by the `line!()` and `column!()` macros.
    #[allow(clippy::too_many_arguments)]
    fn add_word(
        &mut self,
        file: String,
        line: usize,
        column: usize,
        name: String,
        handler: Rc<WordHandler>,
        description: String,
        inputs: String,
        outputs: String,
    );

    /// Bind a name to a definition node, replacing any word of that name.
    fn define_word(&mut self, name: String, definition: Rc<Node>);

    /// Find a word in the interpreter's dictionary by name.
    fn find_word(&self, word: &str) -> Option<&Word>;
}

/// Core interpreter trait.
///
/// This trait brings together the traits that define the functionality of the wafer interpreter:
/// managing the data stack, running code and managing words.  Native words see the interpreter
/// through this trait.
pub trait Interpreter: InterpreterStack + CodeManagement + WordManagement {
    /// The current word dictionary of words known to the interpreter.
    fn dictionary(&self) -> &Dictionary;

    /// Write a value to the interpreter's output, keeping track of whether the last character
    /// written was a new line.
    fn print(&mut self, value: &Value) -> error::Result<()>;

    /// Was the last character printed a new line?  True if nothing was printed yet.
    fn last_printed_was_newline(&self) -> bool;
}
