use crate::{
    add_native_word,
    runtime::{data_structures::value::ToValue, error, interpreter::Interpreter},
};

/// Helper function to handle math operations.  The actual operation is passed in as an argument.
/// The stack operations and value conversions are handled here.
fn math_op(interpreter: &mut dyn Interpreter, fop: fn(f64, f64) -> f64) -> error::Result<()> {
    let (a, b) = interpreter.pop2_as_numbers()?;

    interpreter.push(fop(a, b).to_value());
    Ok(())
}

/// Helper function to handle numeric comparisons.
fn compare_op(interpreter: &mut dyn Interpreter, cop: fn(f64, f64) -> bool) -> error::Result<()> {
    let (a, b) = interpreter.pop2_as_numbers()?;

    interpreter.push(cop(a, b).to_value());
    Ok(())
}

/// Helper function to handle logic operations.  Both values must be numbers, zero is false and
/// anything else is true.
fn logic_op(interpreter: &mut dyn Interpreter, bop: fn(bool, bool) -> bool) -> error::Result<()> {
    let b = interpreter.pop_as_bool()?;
    let a = interpreter.pop_as_bool()?;

    interpreter.push(bop(a, b).to_value());
    Ok(())
}

/// Add two numbers.
///
/// Signature: `a b -- result`
fn word_add(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    math_op(interpreter, |a, b| a + b)
}

/// Subtract the top number from the one below it.
///
/// Signature: `a b -- result`
fn word_subtract(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    math_op(interpreter, |a, b| a - b)
}

/// Multiply two numbers.
///
/// Signature: `a b -- result`
fn word_multiply(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    math_op(interpreter, |a, b| a * b)
}

/// Divide two numbers.  Division by zero follows floating point rules.
///
/// Signature: `a b -- result`
fn word_divide(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    math_op(interpreter, |a, b| a / b)
}

/// Remainder of dividing two numbers, taking the sign of the dividend.
///
/// Signature: `a b -- result`
fn word_mod(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    math_op(interpreter, |a, b| a % b)
}

/// Signature: `a -- floor(a)`
fn word_floor(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let a = interpreter.pop_as_number()?;

    interpreter.push(a.floor().to_value());
    Ok(())
}

/// Signature: `a -- |a|`
fn word_abs(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let a = interpreter.pop_as_number()?;

    interpreter.push(a.abs().to_value());
    Ok(())
}

/// Are the two values equal?  Values of different kinds are never equal.
///
/// Signature: `a b -- bool`
fn word_equal(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let (a, b) = interpreter.pop2()?;

    interpreter.push((a == b).to_value());
    Ok(())
}

/// Signature: `a b -- bool`
fn word_not_equal(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let (a, b) = interpreter.pop2()?;

    interpreter.push((a != b).to_value());
    Ok(())
}

/// Logically invert a number, zero becomes one and anything else becomes zero.
///
/// Signature: `a -- bool`
fn word_not(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let a = interpreter.pop_as_bool()?;

    interpreter.push((!a).to_value());
    Ok(())
}

/// Register the math, comparison and logic words.
pub fn register_math_logic_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(interpreter, "+", word_add, "Add two numbers.", "2f", "1f");

    add_native_word!(
        interpreter,
        "-",
        word_subtract,
        "Subtract the top number from the one below it.",
        "2f",
        "1f"
    );

    add_native_word!(interpreter, "*", word_multiply, "Multiply two numbers.", "2f", "1f");

    add_native_word!(interpreter, "/", word_divide, "Divide two numbers.", "2f", "1f");

    add_native_word!(
        interpreter,
        "mod",
        word_mod,
        "Remainder of dividing two numbers.",
        "2f",
        "1f"
    );

    add_native_word!(
        interpreter,
        "floor",
        word_floor,
        "Round a number down to a whole number.",
        "1f",
        "1f"
    );

    add_native_word!(
        interpreter,
        "abs",
        word_abs,
        "Get the absolute value of a number.",
        "1f",
        "1f"
    );

    add_native_word!(
        interpreter,
        "=",
        word_equal,
        "Are two values of the same kind and equal?",
        "2v",
        "1f"
    );

    add_native_word!(
        interpreter,
        "!=",
        word_not_equal,
        "Are two values different?",
        "2v",
        "1f"
    );

    add_native_word!(
        interpreter,
        "<",
        |interpreter: &mut dyn Interpreter| compare_op(interpreter, |a, b| a < b),
        "Is the lower number less than the top one?",
        "2f",
        "1f"
    );

    add_native_word!(
        interpreter,
        ">",
        |interpreter: &mut dyn Interpreter| compare_op(interpreter, |a, b| a > b),
        "Is the lower number greater than the top one?",
        "2f",
        "1f"
    );

    add_native_word!(
        interpreter,
        "<=",
        |interpreter: &mut dyn Interpreter| compare_op(interpreter, |a, b| a <= b),
        "Is the lower number less than or equal to the top one?",
        "2f",
        "1f"
    );

    add_native_word!(
        interpreter,
        ">=",
        |interpreter: &mut dyn Interpreter| compare_op(interpreter, |a, b| a >= b),
        "Is the lower number greater than or equal to the top one?",
        "2f",
        "1f"
    );

    add_native_word!(interpreter, "not", word_not, "Logically invert a number.", "1f", "1f");

    add_native_word!(
        interpreter,
        "and",
        |interpreter: &mut dyn Interpreter| logic_op(interpreter, |a, b| a && b),
        "Are both numbers true?",
        "2f",
        "1f"
    );

    add_native_word!(
        interpreter,
        "or",
        |interpreter: &mut dyn Interpreter| logic_op(interpreter, |a, b| a || b),
        "Is either number true?",
        "2f",
        "1f"
    );
}
