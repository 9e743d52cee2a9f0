/// Words that manipulate the data stack.
mod stack_words;

/// Words that work with math, comparisons and logic.
mod math_logic_words;

/// Words that work with strings and value kinds.
mod string_words;

/// Words that work with words.
mod word_words;

use crate::runtime::{
    built_ins::base_words::{
        math_logic_words::register_math_logic_words, stack_words::register_stack_words,
        string_words::register_string_words, word_words::register_word_words,
    },
    interpreter::Interpreter,
};

/// Called to register all of the core words of the language.
pub fn register_base_words(interpreter: &mut dyn Interpreter) {
    register_stack_words(interpreter);
    register_math_logic_words(interpreter);
    register_string_words(interpreter);
    register_word_words(interpreter);
}
