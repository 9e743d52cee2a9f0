use crate::{
    add_native_word,
    runtime::{data_structures::value::ToValue, error, interpreter::Interpreter},
};

/// Duplicate the top value on the data stack.
///
/// Signature: `value -- value value`
fn word_dup(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.pop()?;

    interpreter.push(value.clone());
    interpreter.push(value);

    Ok(())
}

/// Drop the top value on the data stack.
///
/// Signature: `value -- `
fn word_drop(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let _ = interpreter.pop()?;

    Ok(())
}

/// Swap the top 2 values on the data stack.
///
/// Signature: `a b -- b a`
fn word_swap(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let (a, b) = interpreter.pop2()?;

    interpreter.push(b);
    interpreter.push(a);

    Ok(())
}

/// Copy the second value onto the top of the stack.
///
/// Signature: `a b -- a b a`
fn word_over(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let (a, b) = interpreter.pop2()?;

    interpreter.push(a.clone());
    interpreter.push(b);
    interpreter.push(a);

    Ok(())
}

/// Rotate the third value up to the top of the stack.
///
/// Signature: `a b c -- b c a`
fn word_rot(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let c = interpreter.pop()?;
    let (a, b) = interpreter.pop2()?;

    interpreter.push(b);
    interpreter.push(c);
    interpreter.push(a);

    Ok(())
}

/// Get the depth of the data stack before calling this word.
///
/// Signature: ` -- depth`
fn word_depth(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let depth = interpreter.stack().len();

    interpreter.push(depth.to_value());
    Ok(())
}

/// Register the stack manipulation words.
pub fn register_stack_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        "dup",
        word_dup,
        "Duplicate the top value on the data stack.",
        "1v",
        "2v"
    );

    add_native_word!(
        interpreter,
        "drop",
        word_drop,
        "Discard the top value on the data stack.",
        "1v",
        "0"
    );

    add_native_word!(
        interpreter,
        "swap",
        word_swap,
        "Swap the top 2 values on the data stack.",
        "2v",
        "2v"
    );

    add_native_word!(
        interpreter,
        "over",
        word_over,
        "Copy the second value to the top of the stack.",
        "2v",
        "3v"
    );

    add_native_word!(
        interpreter,
        "rot",
        word_rot,
        "Rotate the third value to the top of the stack.",
        "3v",
        "3v"
    );

    add_native_word!(
        interpreter,
        "depth",
        word_depth,
        "Get the depth of the stack before calling this word.",
        "0",
        "1f"
    );

    add_native_word!(
        interpreter,
        "clear",
        |interpreter: &mut dyn Interpreter| {
            interpreter.clear_stack();
            Ok(())
        },
        "Discard every value on the stack.",
        "0",
        "0"
    );
}
