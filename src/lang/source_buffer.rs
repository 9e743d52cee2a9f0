
use core::str::Chars;
use std::fmt::{ self,
                Display,
                Formatter };



/// The location in the source code where a lexeme was found.  This structure is used all over the
/// interpreter to keep track where important things are found in the source code, most of all in
/// the error reporting.
///
/// Lines and columns are stored 0 based, but are displayed 1 based as `path:line:column`.
///
/// This is a read-only structure.  Use the field accessor methods to get the values.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceLocation
{
    /// Either the path to the file or a description of the source code.  For example the embedded
    /// standard library is tagged "std.w".
    path: String,

    /// The 0 based line number in the source code.
    line: usize,

    /// The 0 based column number in the source code.
    column: usize
}


/// Used for error reporting to show where in the source code an error originated.
impl Display for SourceLocation
{
    fn fmt(&self, formatter: &mut Formatter<'_>) -> Result<(), fmt::Error>
    {
        write!(formatter, "{}:{}:{}", self.path, self.line + 1, self.column + 1)
    }
}


impl SourceLocation
{
    /// Create a new SourceLocation at the start of the given source.
    pub fn new_from_path(path: &str) -> Self
    {
        SourceLocation { path: path.to_owned(), line: 0, column: 0 }
    }

    /// Create a new SourceLocation with all of the needed information.  The line and column are
    /// 0 based.
    pub fn new_from_info(path: &str, line: usize, column: usize) -> Self
    {
        SourceLocation { path: path.to_owned(), line, column }
    }

    /// The path to the source code or a meaningful description of the source code.
    pub fn path(&self) -> &String
    {
        &self.path
    }

    /// The 0 based line number in the source code.
    pub fn line(&self) -> usize
    {
        self.line
    }

    /// The 0 based column number in the source code.
    pub fn column(&self) -> usize
    {
        self.column
    }
}



/// A buffer for processing source code.  The lexer uses it to walk the text one character at a
/// time.  This buffer acts as a forward only iterator over the code, keeping track of the line
/// and column of the next character to be consumed.
///
/// The SourceBuffer only holds a reference to the source code, the code is not copied.
pub struct SourceBuffer<'a>
{
    /// An iterator over the remaining source code.
    chars: Chars<'a>,

    /// The location of the next character in the source code.
    location: SourceLocation
}


impl<'a> SourceBuffer<'a>
{
    /// Create a new SourceBuffer with the path to, or meaningful tag for the source code and the
    /// source code itself.
    pub fn new(path: &str, source: &'a str) -> Self
    {
        SourceBuffer
            {
                chars: source.chars(),
                location: SourceLocation::new_from_path(path)
            }
    }

    /// The location of the next character to be consumed.
    pub fn location(&self) -> &SourceLocation
    {
        &self.location
    }

    /// Take a peek at the next character in the source code without consuming it.
    pub fn peek_next(&self) -> Option<char>
    {
        self.chars.clone().next()
    }

    /// Peek at the character after the next one.  Needed to tell a signed number from a word that
    /// starts with a sign.
    pub fn peek_second(&self) -> Option<char>
    {
        let mut ahead = self.chars.clone();

        let _ = ahead.next();
        ahead.next()
    }

    /// Get and consume the next character in the source code.
    pub fn next_char(&mut self) -> Option<char>
    {
        let next = self.chars.next();

        if let Some(next_char) = next
        {
            self.increment_location(next_char);
        }

        next
    }

    /// Consume the next character if it matches the predicate.
    pub fn next_if(&mut self, predicate: impl Fn(char) -> bool) -> Option<char>
    {
        match self.peek_next()
        {
            Some(next) if predicate(next) => self.next_char(),
            _                             => None
        }
    }

    /// Advance one column for regular characters.  Reset the column to 0 and increment the line
    /// for new line characters.
    fn increment_location(&mut self, next: char)
    {
        if next == '\n'
        {
            self.location.line += 1;
            self.location.column = 0;
        }
        else
        {
            self.location.column += 1;
        }
    }
}
