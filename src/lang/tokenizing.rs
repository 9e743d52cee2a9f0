
use crate::{
    lang::source_buffer::{SourceBuffer, SourceLocation},
    runtime::error::{self, ErrorKind, ScriptError, script_error_at},
};
use std::{
    fmt::{self, Debug, Display, Formatter},
    fs::read_to_string,
};
use tracing::debug;

/// The kinds of lexeme found in wafer source code.  Besides the three kinds of value carrying
/// lexemes there are the four structural delimiters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LexemeKind {
    /// A decimal number literal, optionally signed and fractional.
    Number,

    /// A single line string literal.  The lexeme's text holds the unescaped contents.
    String,

    /// A word to be executed.
    Word,

    /// `:`, starts a word definition.
    DefBegin,

    /// `;`, ends a word definition.
    DefEnd,

    /// `{`, starts a loop.
    LoopBegin,

    /// `}`, ends a loop.
    LoopEnd,
}

impl Display for LexemeKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let name = match self {
            LexemeKind::Number => "number",
            LexemeKind::String => "string",
            LexemeKind::Word => "word",
            LexemeKind::DefBegin => ":",
            LexemeKind::DefEnd => ";",
            LexemeKind::LoopBegin => "{",
            LexemeKind::LoopEnd => "}",
        };

        write!(f, "{}", name)
    }
}

/// A lexeme is the smallest unit of the language's surface syntax.  It holds the location in the
/// original source code where it was found.  Once produced a lexeme is never changed.
#[derive(Clone, PartialEq)]
pub struct Lexeme {
    kind: LexemeKind,
    text: String,
    location: SourceLocation,
}

/// A list of lexemes found in the source code.
pub type LexemeList = Vec<Lexeme>;

impl Display for Lexeme {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Include the location and kind when debugging.
impl Debug for Lexeme {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {} {:?}", self.location, self.kind, self.text)
    }
}

impl Lexeme {
    pub fn new(kind: LexemeKind, text: String, location: SourceLocation) -> Lexeme {
        Lexeme {
            kind,
            text,
            location,
        }
    }

    pub fn kind(&self) -> LexemeKind {
        self.kind
    }

    /// The raw text of the lexeme, or the unescaped contents for a string literal.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Where the lexeme starts in the original source text.
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }
}

/// Space, tab and carriage return separate lexemes.  New lines are handled on their own because
/// they also advance the line count.
fn is_whitespace(next: char) -> bool {
    next == ' ' || next == '\t' || next == '\r'
}

/// Is this a character that may legally follow a number or string literal?
fn is_separator(next: Option<char>) -> bool {
    match next {
        Some(next) => is_whitespace(next) || next == '\n',
        None => true,
    }
}

/// The single character structural lexemes.
fn structural_kind(next: char) -> Option<LexemeKind> {
    match next {
        ':' => Some(LexemeKind::DefBegin),
        ';' => Some(LexemeKind::DefEnd),
        '{' => Some(LexemeKind::LoopBegin),
        '}' => Some(LexemeKind::LoopEnd),
        _ => None,
    }
}

/// Word characters are the printable ASCII range, minus the backslash and the characters that
/// start other lexemes or comments.
fn is_word_char(next: char) -> bool {
    ('!'..='~').contains(&next)
        && next != '\\'
        && next != '"'
        && next != '#'
        && structural_kind(next).is_none()
}

/// Skip a comment, up to but not including the new line that ends it.
fn skip_comment(buffer: &mut SourceBuffer) {
    while buffer.next_if(|next| next != '\n').is_some() {}
}

/// Translate the character following a backslash in a string literal.
fn process_escape(location: &SourceLocation, buffer: &mut SourceBuffer) -> error::Result<char> {
    match buffer.next_char() {
        Some('t') => Ok('\t'),
        Some('r') => Ok('\r'),
        Some('n') => Ok('\n'),
        Some('"') => Ok('"'),
        Some('\\') => Ok('\\'),
        Some(other) => script_error_at(location, ErrorKind::InvalidEscape(other)),
        None => script_error_at(location, ErrorKind::EofAfterEscape),
    }
}

/// Process a string literal.  The opening quote is expected to be the next character.  Errors are
/// reported at the opening quote, except for a missing separator after the closing quote.
fn process_string(buffer: &mut SourceBuffer) -> error::Result<Lexeme> {
    let location = buffer.location().clone();
    let mut text = String::new();

    let _ = buffer.next_char();

    loop {
        match buffer.next_char() {
            Some('"') => break,
            Some('\n') => return script_error_at(&location, ErrorKind::NewlineInString),
            Some('\\') => text.push(process_escape(&location, buffer)?),
            Some(next) => text.push(next),
            None => return script_error_at(&location, ErrorKind::UnterminatedString),
        }
    }

    if !is_separator(buffer.peek_next()) {
        return script_error_at(&location, ErrorKind::ExpectedWhitespaceAfterString);
    }

    Ok(Lexeme::new(LexemeKind::String, text, location))
}

/// Does it look like a number starts here?  A sign only starts a number when a digit follows it,
/// otherwise it's the start of a word.
fn starts_number(buffer: &SourceBuffer) -> bool {
    match buffer.peek_next() {
        Some('+') | Some('-') => buffer
            .peek_second()
            .is_some_and(|second| second.is_ascii_digit()),
        Some(next) => next.is_ascii_digit(),
        None => false,
    }
}

/// Process a number literal: an optional sign, digits, and an optional fraction.  The literal
/// must be followed by whitespace, a new line or the end of the source.
fn process_number(buffer: &mut SourceBuffer) -> error::Result<Lexeme> {
    let location = buffer.location().clone();
    let mut text = String::new();

    if let Some(sign) = buffer.next_if(|next| next == '+' || next == '-') {
        text.push(sign);
    }

    while let Some(digit) = buffer.next_if(|next| next.is_ascii_digit()) {
        text.push(digit);
    }

    if let Some(point) = buffer.next_if(|next| next == '.') {
        text.push(point);

        let mut has_fraction = false;

        while let Some(digit) = buffer.next_if(|next| next.is_ascii_digit()) {
            text.push(digit);
            has_fraction = true;
        }

        if !has_fraction {
            return script_error_at(&location, ErrorKind::MalformedNumber(text));
        }
    }

    match buffer.peek_next() {
        Some(next) if !is_separator(Some(next)) => {
            script_error_at(&location, ErrorKind::ExpectedWhitespaceAfterNumber(next))
        }
        _ => Ok(Lexeme::new(LexemeKind::Number, text, location)),
    }
}

/// Pull out the longest run of word characters.
fn process_word(buffer: &mut SourceBuffer) -> Lexeme {
    let location = buffer.location().clone();
    let mut text = String::new();

    while let Some(next) = buffer.next_if(is_word_char) {
        text.push(next);
    }

    Lexeme::new(LexemeKind::Word, text, location)
}

/// Tokenize the source code from a string.  The first error stops the whole pass.
pub fn tokenize_from_source(path: &str, source: &str) -> error::Result<LexemeList> {
    let mut buffer = SourceBuffer::new(path, source);
    let mut lexemes = LexemeList::new();

    while let Some(next) = buffer.peek_next() {
        if next == '\n' || is_whitespace(next) {
            let _ = buffer.next_char();
            continue;
        }

        if next == '#' {
            skip_comment(&mut buffer);
            continue;
        }

        let lexeme = if let Some(kind) = structural_kind(next) {
            let location = buffer.location().clone();
            let _ = buffer.next_char();

            Lexeme::new(kind, next.to_string(), location)
        } else if next == '"' {
            process_string(&mut buffer)?
        } else if starts_number(&buffer) {
            process_number(&mut buffer)?
        } else if is_word_char(next) {
            process_word(&mut buffer)
        } else {
            return script_error_at(buffer.location(), ErrorKind::UnexpectedCharacter(next));
        };

        lexemes.push(lexeme);
    }

    debug!(path, count = lexemes.len(), "tokenized source");

    Ok(lexemes)
}

/// Load the code from a file and then tokenize it.
pub fn tokenize_from_file(path: &str) -> error::Result<LexemeList> {
    let source = read_to_string(path).map_err(|error| {
        ScriptError::new(
            None,
            ErrorKind::Io(format!("could not read file {}: {}", path, error)),
        )
    })?;

    tokenize_from_source(path, &source)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<LexemeKind> {
        tokenize_from_source("test", source)
            .unwrap()
            .iter()
            .map(|lexeme| lexeme.kind())
            .collect()
    }

    fn error_kind(source: &str) -> ErrorKind {
        tokenize_from_source("test", source)
            .unwrap_err()
            .kind()
            .clone()
    }

    #[test]
    fn structural_lexemes_need_no_whitespace() {
        assert_eq!(
            kinds(":sq dup*;{x}"),
            vec![
                LexemeKind::DefBegin,
                LexemeKind::Word,
                LexemeKind::Word,
                LexemeKind::DefEnd,
                LexemeKind::LoopBegin,
                LexemeKind::Word,
                LexemeKind::LoopEnd,
            ]
        );
    }

    #[test]
    fn comments_run_to_end_of_line() {
        let lexemes = tokenize_from_source("test", "1 # 2 3\n4").unwrap();

        assert_eq!(lexemes.len(), 2);
        assert_eq!(lexemes[1].text(), "4");
        assert_eq!(lexemes[1].location().line(), 1);
        assert_eq!(lexemes[1].location().column(), 0);
    }

    #[test]
    fn string_escapes_are_translated() {
        let lexemes = tokenize_from_source("test", r#""hello\nworld" "a\t\"b\\""#).unwrap();

        assert_eq!(lexemes[0].kind(), LexemeKind::String);
        assert_eq!(lexemes[0].text(), "hello\nworld");
        assert_eq!(lexemes[1].text(), "a\t\"b\\");
    }

    #[test]
    fn string_errors() {
        assert_eq!(error_kind("\"abc\ndef\""), ErrorKind::NewlineInString);
        assert_eq!(error_kind("\"abc"), ErrorKind::UnterminatedString);
        assert_eq!(error_kind("\"abc\\"), ErrorKind::EofAfterEscape);
        assert_eq!(error_kind(r#""a\qb""#), ErrorKind::InvalidEscape('q'));
        assert_eq!(error_kind(r#""abc"def"#), ErrorKind::ExpectedWhitespaceAfterString);
    }

    #[test]
    fn string_location_is_the_opening_quote() {
        let error = tokenize_from_source("test", "1 \"oops\n\"").unwrap_err();

        assert_eq!(error.to_string(), "test:1:3: unexpected newline in string");
    }

    #[test]
    fn numbers() {
        let lexemes = tokenize_from_source("test", "1.5 -5 +3 42").unwrap();
        let texts: Vec<&str> = lexemes.iter().map(|lexeme| lexeme.text()).collect();

        assert!(lexemes.iter().all(|lexeme| lexeme.kind() == LexemeKind::Number));
        assert_eq!(texts, vec!["1.5", "-5", "+3", "42"]);
    }

    #[test]
    fn number_errors() {
        assert_eq!(error_kind("1."), ErrorKind::MalformedNumber("1.".to_string()));
        assert_eq!(error_kind("1.x"), ErrorKind::MalformedNumber("1.".to_string()));
        assert_eq!(error_kind("12abc"), ErrorKind::ExpectedWhitespaceAfterNumber('a'));
        assert_eq!(error_kind("5}"), ErrorKind::ExpectedWhitespaceAfterNumber('}'));
    }

    #[test]
    fn lone_signs_are_words() {
        let lexemes = tokenize_from_source("test", "- + -x").unwrap();

        assert!(lexemes.iter().all(|lexeme| lexeme.kind() == LexemeKind::Word));
        assert_eq!(lexemes[2].text(), "-x");
    }

    #[test]
    fn unexpected_characters() {
        assert_eq!(error_kind("dup \\ drop"), ErrorKind::UnexpectedCharacter('\\'));
        assert_eq!(error_kind("café"), ErrorKind::UnexpectedCharacter('é'));
    }

    #[test]
    fn strings_may_hold_any_utf8() {
        let lexemes = tokenize_from_source("test", "\"café ☕\"").unwrap();

        assert_eq!(lexemes[0].text(), "café ☕");
    }
}
