/// The core words of the language.
pub mod base_words;

/// Words that perform I/O operations.
pub mod io_words;

use crate::runtime::{
    built_ins::{base_words::register_base_words, io_words::register_io_words},
    interpreter::Interpreter,
};

/// Register every native word with the interpreter.  Natives replace any existing word of the
/// same name.
pub fn register_native_words(interpreter: &mut dyn Interpreter) {
    register_base_words(interpreter);
    register_io_words(interpreter);
}
