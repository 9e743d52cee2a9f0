use crate::{
    add_native_word,
    runtime::{data_structures::value::ToValue, error, interpreter::Interpreter},
};

/// Print out the interpreter's dictionary, sorted by name.
///
/// Signature: ` -- `
fn word_print_dictionary(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let listing = interpreter.dictionary().to_string();

    interpreter.print(&listing.to_value())
}

/// Is a word of the given name known to the interpreter?
///
/// Signature: `name -- bool`
fn word_is_defined(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let name = interpreter.pop_as_text()?;
    let found = interpreter.find_word(&name).is_some();

    interpreter.push(found.to_value());
    Ok(())
}

/// Register the words that work with the dictionary.
pub fn register_word_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        "words",
        word_print_dictionary,
        "Print out the dictionary of known words.",
        "0",
        "0"
    );

    add_native_word!(
        interpreter,
        "defined?",
        word_is_defined,
        "Is a word of the given name defined?",
        "1s",
        "1f"
    );
}
