// Helpers shared by the integration tests.  Not every test binary uses every helper.
#![allow(dead_code)]

use std::{
    cell::RefCell,
    io::{self, Write},
    path::{Path, PathBuf},
    rc::Rc,
};
use wafer::{
    STD_LIBRARY, STD_LIBRARY_PATH, build_std_dictionary, new_script_interpreter,
    runtime::{
        built_ins::register_native_words,
        data_structures::value::Value,
        error::Result,
        interpreter::{CodeManagement, InterpreterStack, wafer_interpreter::WaferInterpreter},
    },
};

/// Captures everything the interpreter prints so tests can look at it afterwards.
#[derive(Clone, Default)]
pub struct SharedOutput {
    buffer: Rc<RefCell<Vec<u8>>>,
}

impl SharedOutput {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.buffer.borrow()).to_string()
    }
}

impl Write for SharedOutput {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buffer.borrow_mut().extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// Helper to get absolute path from manifest dir
pub fn manifest_path(rel: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(rel)
}

/// An interpreter with only the native words registered.
pub fn native_interpreter() -> (WaferInterpreter, SharedOutput) {
    let output = SharedOutput::default();
    let mut interpreter = WaferInterpreter::new().with_output(Box::new(output.clone()));

    register_native_words(&mut interpreter);
    (interpreter, output)
}

/// An interpreter set up the way the command line tool sets one up, with the standard library
/// loaded.
pub fn std_interpreter() -> (WaferInterpreter, SharedOutput) {
    let (library, result) = build_std_dictionary(STD_LIBRARY_PATH, STD_LIBRARY);
    assert!(result.is_ok(), "standard library failed: {:?}", result);

    let output = SharedOutput::default();
    let interpreter = new_script_interpreter(library.dictionary).with_output(Box::new(output.clone()));

    (interpreter, output)
}

/// Run source with only the natives and hand back the final data stack.
pub fn eval_and_stack(source: &str) -> Result<Vec<Value>> {
    let (mut interpreter, _) = native_interpreter();

    interpreter.process_source("<test>", source)?;
    Ok(interpreter.stack().clone())
}

/// Run source with the standard library loaded and hand back everything printed.
pub fn eval_and_output(source: &str) -> Result<String> {
    let (mut interpreter, output) = std_interpreter();

    interpreter.process_source("<test>", source)?;
    Ok(output.text())
}

/// Shorthand for a stack of numbers.
pub fn numbers(values: &[f64]) -> Vec<Value> {
    values.iter().map(|value| Value::Number(*value)).collect()
}
