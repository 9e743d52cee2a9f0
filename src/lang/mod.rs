/// Module for managing the original source code and locations within it.
pub mod source_buffer;

/// Module for managing the turning of the source code into a list of lexemes for further
/// processing.
pub mod tokenizing;

/// Module defining the tree of nodes the interpreter executes.
pub mod code;

/// Module for parsing the list of lexemes into a tree of nodes, checking that every definition
/// and loop is properly closed.
pub mod parsing;
