use crate::{
    add_native_word,
    runtime::{
        data_structures::value::ToValue,
        error::{self, ErrorKind, script_error},
        interpreter::Interpreter,
    },
};
use std::fs::read_to_string;

/// Print the top value to the interpreter's output.  Numbers print in their shortest form, text
/// prints as is.
///
/// Signature: `value -- `
fn word_print(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.pop()?;

    interpreter.print(&value)
}

/// Read the whole of a file into a string.
///
/// Signature: `path -- contents`
fn word_load_file(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let path = interpreter.pop_as_text()?;
    let contents = read_to_string(&path)?;

    interpreter.push(contents.to_value());
    Ok(())
}

/// Read and parse a script file, then run it as soon as this word returns.  Words it defines stay
/// in the dictionary.
///
/// Signature: `path -- `
fn word_run_file(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let path = interpreter.pop_as_text()?;

    interpreter.run_source_file(&path)
}

/// Parse a string as source code, then run it as soon as this word returns.  Errors in the code
/// are reported against the file holding the calling word.
///
/// Signature: `source -- `
fn word_run_string(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let source = interpreter.pop_as_text()?;

    let path = match interpreter.current_location() {
        Some(location) => location.path().to_string(),
        None => return script_error(ErrorKind::NoCurrentLocation),
    };

    interpreter.run_source(&path, &source)
}

/// Register the I/O words.
pub fn register_io_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        "print",
        word_print,
        "Print the top value.",
        "1v",
        "0"
    );

    add_native_word!(
        interpreter,
        "loadfile",
        word_load_file,
        "Read the contents of a file as a string.",
        "1s",
        "1s"
    );

    add_native_word!(
        interpreter,
        "runfile",
        word_run_file,
        "Run a script file once the current word returns.",
        "1s",
        "0"
    );

    add_native_word!(
        interpreter,
        "runstring",
        word_run_string,
        "Run a string of source code once the current word returns.",
        "1s",
        "0"
    );
}
