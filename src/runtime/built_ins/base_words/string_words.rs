use crate::{
    add_native_word,
    runtime::{
        data_structures::value::{ToValue, Value},
        error::{self, ErrorKind, script_error},
        interpreter::Interpreter,
    },
};

/// Join two strings together.
///
/// Signature: `a b -- ab`
fn word_string_concat(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let (a, b) = interpreter.pop2_as_texts()?;

    interpreter.push((a + &b).to_value());
    Ok(())
}

/// Get the length of a string in logical characters.
///
/// Signature: `string -- size`
fn word_string_length(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let string = interpreter.pop_as_text()?;

    interpreter.push(string.chars().count().to_value());
    Ok(())
}

/// Convert any value to its printed form.
///
/// Signature: `value -- string`
fn word_to_string(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.pop()?;

    interpreter.push(value.to_string().to_value());
    Ok(())
}

/// Convert a string to a number.  Surrounding whitespace is ignored.
///
/// Signature: `string -- number`
fn word_to_number(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let string = interpreter.pop_as_text()?;

    match string.trim().parse::<f64>() {
        Ok(number) => interpreter.push(number.to_value()),
        Err(_) => return script_error(ErrorKind::InvalidNumber(string)),
    }

    Ok(())
}

/// Get the name of the kind of the top value.
///
/// Signature: `value -- kind-name`
fn word_value_type(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value: Value = interpreter.pop()?;

    interpreter.push(value.kind().name().to_value());
    Ok(())
}

/// Register the string and value words.
pub fn register_string_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        "concat",
        word_string_concat,
        "Join two strings together.",
        "2s",
        "1s"
    );

    add_native_word!(
        interpreter,
        "len",
        word_string_length,
        "Get the length of a string in characters.",
        "1s",
        "1f"
    );

    add_native_word!(
        interpreter,
        "tostring",
        word_to_string,
        "Convert a value to a string.",
        "1v",
        "1s"
    );

    add_native_word!(
        interpreter,
        "tonumber",
        word_to_number,
        "Convert a string to a number.",
        "1s",
        "1f"
    );

    add_native_word!(
        interpreter,
        "type",
        word_value_type,
        "Get the kind of a value, number or text.",
        "1v",
        "1s"
    );
}
