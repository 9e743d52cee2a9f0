
use std::{ error::Error,
           fmt::{ self, Debug, Display, Formatter } };
use thiserror::Error as ThisError;
use crate::lang::source_buffer::SourceLocation;



pub type Result<T> = std::result::Result<T, ScriptError>;



/// Everything that can go wrong while lexing, parsing or evaluating a wafer script.
#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum ErrorKind
{
    // Lexical errors.
    #[error("unexpected character `{0}`")]
    UnexpectedCharacter(char),

    #[error("malformed number `{0}`")]
    MalformedNumber(String),

    #[error("expected whitespace after number, got `{0}`")]
    ExpectedWhitespaceAfterNumber(char),

    #[error("expected whitespace after string")]
    ExpectedWhitespaceAfterString,

    #[error("unexpected newline in string")]
    NewlineInString,

    #[error("unexpected eof in string")]
    UnterminatedString,

    #[error("unexpected eof after escape character")]
    EofAfterEscape,

    #[error("invalid escape sequence `\\{0}`")]
    InvalidEscape(char),

    // Structural errors.
    #[error("expected word after ':', got {0}")]
    ExpectedDefinitionName(String),

    #[error("unexpected end of {0}")]
    UnexpectedBlockEnd(&'static str),

    #[error("expected end of {expected}, got `{found}`")]
    MismatchedBlockEnd
    {
        expected: &'static str,
        found: &'static str
    },

    #[error("unterminated definition `{0}`")]
    UnterminatedDefinition(String),

    #[error("unterminated loop")]
    UnterminatedLoop,

    // Runtime errors.
    #[error("undefined word: `{0}`")]
    UndefinedWord(String),

    #[error("builtin failed: `{word}` ({reason})")]
    BuiltinFailed
    {
        word: String,
        reason: Box<ScriptError>
    },

    #[error("empty stack")]
    EmptyStack,

    #[error("loop cond should be number, got `{0}`")]
    LoopConditionNotNumber(&'static str),

    #[error("expected {expected} value, got `{found}`")]
    UnexpectedValueKind
    {
        expected: &'static str,
        found: &'static str
    },

    #[error("cannot convert `{0}` to a number")]
    InvalidNumber(String),

    #[error("no source location to run code from")]
    NoCurrentLocation,

    #[error("I/O error: {0}")]
    Io(String)
}



/// Any error that occurs during the processing of a wafer script.  The first error of any stage
/// is fatal.
#[derive(Clone, PartialEq)]
pub struct ScriptError
{
    /// The location in the source code the error occurred, if available.
    location: Option<SourceLocation>,

    /// What went wrong.
    kind: ErrorKind
}


impl Error for ScriptError
{
    fn source(&self) -> Option<&(dyn Error + 'static)>
    {
        match &self.kind
        {
            ErrorKind::BuiltinFailed { reason, .. } => Some(reason.as_ref()),
            _                                       => None
        }
    }
}


/// Render the error as `path:line:column: message`.  Errors without a location are rendered as
/// the bare message.
impl Display for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        match &self.location
        {
            Some(location) => write!(f, "{}: {}", location, self.kind),
            None => write!(f, "{}", self.kind)
        }
    }
}


impl Debug for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "{}", self)
    }
}


impl ScriptError
{
    /// Create a new ScriptError.
    pub fn new(location: Option<SourceLocation>, kind: ErrorKind) -> ScriptError
    {
        ScriptError { location, kind }
    }

    /// Create a new Script Error and wrap it in a Result::Err.
    pub fn new_as_result<T>(location: Option<SourceLocation>, kind: ErrorKind) -> Result<T>
    {
        Err(ScriptError::new(location, kind))
    }

    /// If available, the location in the source code the error occurred.
    pub fn location(&self) -> &Option<SourceLocation>
    {
        &self.location
    }

    /// The description of the error.
    pub fn kind(&self) -> &ErrorKind
    {
        &self.kind
    }
}


/// Allow for the conversion of a std::io::Error into a ScriptError.
impl From<std::io::Error> for ScriptError
{
    fn from(error: std::io::Error) -> ScriptError
    {
        ScriptError::new(None, ErrorKind::Io(error.to_string()))
    }
}



/// A convenience function for raising an error at a known location.
pub fn script_error_at<T>(location: &SourceLocation, kind: ErrorKind) -> Result<T>
{
    ScriptError::new_as_result(Some(location.clone()), kind)
}



/// Raise an error without a location.  Used by the stack helpers and native words, the
/// interpreter reports these as a failure of the executing word.
pub fn script_error<T>(kind: ErrorKind) -> Result<T>
{
    ScriptError::new_as_result(None, kind)
}



#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn located_errors_render_with_position()
    {
        let location = SourceLocation::new_from_info("prog.w", 2, 7);
        let error = ScriptError::new(Some(location), ErrorKind::UndefinedWord("frob".to_string()));

        assert_eq!(error.to_string(), "prog.w:3:8: undefined word: `frob`");
    }

    #[test]
    fn builtin_failures_carry_their_reason()
    {
        let location = SourceLocation::new_from_info("prog.w", 0, 0);
        let reason = Box::new(ScriptError::new(None, ErrorKind::EmptyStack));
        let error = ScriptError::new(Some(location),
                                     ErrorKind::BuiltinFailed { word: "+".to_string(), reason });

        assert_eq!(error.to_string(), "prog.w:1:1: builtin failed: `+` (empty stack)");
        assert!(error.source().is_some());
    }
}
