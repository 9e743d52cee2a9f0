/// Module contains the Value enumeration and it's implementation.  The value is one of the core
/// data structures of the interpreter.  It is used to represent the numbers and text that wafer
/// scripts work with.
pub mod value;

/// The dictionary module provides the flat word dictionary used by the wafer interpreter.
pub mod dictionary;
