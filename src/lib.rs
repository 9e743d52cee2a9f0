/// Module for managing source code, turning it into lexemes and parsing it into a tree of nodes.
pub mod lang;

/// Module for the runtime and the data structures used by the interpreter.  As well as the
/// interpreter itself.
#[macro_use]
pub mod runtime;

use runtime::{
    built_ins::register_native_words,
    data_structures::dictionary::Dictionary,
    error,
    interpreter::{CodeManagement, Interpreter, wafer_interpreter::WaferInterpreter},
};
use tracing::debug;

/// The name used to report errors in the embedded standard library.
pub const STD_LIBRARY_PATH: &str = "std.w";

/// The standard library's source, run before every user script.
pub const STD_LIBRARY: &str = include_str!("../std/std.w");

/// What running the standard library leaves behind.
pub struct StdLibrary {
    /// Every word defined before the library finished or stopped.
    pub dictionary: Dictionary,

    /// False when the library's output stopped partway through a line.  The caller should end
    /// that line before the user script starts printing.
    pub last_printed_was_newline: bool,
}

/// Run the standard library in a fresh interpreter with the native words registered, and keep the
/// dictionary and output state it leaves behind.
///
/// An error in the library stops it early.  The error is returned alongside the library, whose
/// dictionary still holds every word defined before the error.
pub fn build_std_dictionary(path: &str, source: &str) -> (StdLibrary, error::Result<()>) {
    let mut interpreter = WaferInterpreter::new();

    register_native_words(&mut interpreter);

    let result = interpreter.process_source(path, source);

    match &result {
        Ok(()) => debug!(path, "standard library loaded"),
        Err(error) => debug!(path, %error, "standard library stopped early"),
    }

    let last_printed_was_newline = interpreter.last_printed_was_newline();

    (
        StdLibrary {
            dictionary: interpreter.into_dictionary(),
            last_printed_was_newline,
        },
        result,
    )
}

/// Create an interpreter ready to run a user script.  It is seeded with the dictionary left by
/// the standard library, then the native words are registered again so they take precedence over
/// any same-named library words.
pub fn new_script_interpreter(std_dictionary: Dictionary) -> WaferInterpreter {
    let mut interpreter = WaferInterpreter::with_dictionary(std_dictionary);

    register_native_words(&mut interpreter);
    interpreter
}
