use crate::{
    lang::{
        code::{Node, NodeKind, pretty_print_tree},
        source_buffer::SourceLocation,
        tokenizing::{Lexeme, LexemeKind, tokenize_from_file, tokenize_from_source},
    },
    runtime::error::{self, ErrorKind, ScriptError, script_error_at},
};
use std::{iter::Peekable, rc::Rc, slice::Iter};
use tracing::{debug, trace};

/// A definition or loop that has been opened but not yet closed.  Children are gathered into the
/// block's own list and the finished node is only attached to its parent once the closing
/// delimiter is found.
struct OpenBlock {
    kind: NodeKind,
    location: SourceLocation,
    children: Vec<Rc<Node>>,
}

impl OpenBlock {
    fn new(kind: NodeKind, location: SourceLocation) -> OpenBlock {
        OpenBlock {
            kind,
            location,
            children: Vec::new(),
        }
    }

    fn close(self) -> Rc<Node> {
        Rc::new(Node::with_children(self.kind, self.location, self.children))
    }
}

/// The parser's state, the stack of open blocks.  The bottom of the stack is always the root.
struct Parser {
    blocks: Vec<OpenBlock>,
}

impl Parser {
    fn new(path: &str) -> Parser {
        Parser {
            blocks: vec![OpenBlock::new(NodeKind::Root, SourceLocation::new_from_path(path))],
        }
    }

    /// Append a node to the innermost open block.
    fn append(&mut self, node: Rc<Node>) {
        if let Some(block) = self.blocks.last_mut() {
            block.children.push(node);
        }
    }

    fn open(&mut self, kind: NodeKind, location: &SourceLocation) {
        self.blocks.push(OpenBlock::new(kind, location.clone()));
    }

    /// Close the innermost block, which must be of the expected kind.  The root can never be
    /// closed by a delimiter.
    fn close(&mut self, lexeme: &Lexeme, expected: &'static str) -> error::Result<()> {
        if self.blocks.len() < 2 {
            return script_error_at(lexeme.location(), ErrorKind::UnexpectedBlockEnd(expected));
        }

        let found = self.blocks.last().map(|block| block.kind.name()).unwrap_or("root");

        if found != expected {
            return script_error_at(
                lexeme.location(),
                ErrorKind::MismatchedBlockEnd { expected, found },
            );
        }

        if let Some(block) = self.blocks.pop() {
            if let NodeKind::Definition(name) = &block.kind {
                trace!(name = name.as_str(), children = block.children.len(), "parsed definition");
            }

            let node = block.close();
            self.append(node);
        }

        Ok(())
    }

    /// Finish parsing.  Any block still open at the end of the source is an error.
    fn finish(mut self) -> error::Result<Rc<Node>> {
        if self.blocks.len() > 1 {
            if let Some(block) = self.blocks.pop() {
                let kind = match block.kind {
                    NodeKind::Definition(name) => ErrorKind::UnterminatedDefinition(name),
                    _ => ErrorKind::UnterminatedLoop,
                };

                return script_error_at(&block.location, kind);
            }
        }

        match self.blocks.pop() {
            Some(root) => Ok(root.close()),
            None => Err(ScriptError::new(None, ErrorKind::UnexpectedBlockEnd("root"))),
        }
    }
}

/// Convert a number lexeme's text.  The lexer has already checked the shape of the text.
fn parse_number(lexeme: &Lexeme) -> error::Result<f64> {
    match lexeme.text().parse::<f64>() {
        Ok(number) => Ok(number),
        Err(_) => script_error_at(
            lexeme.location(),
            ErrorKind::MalformedNumber(lexeme.text().to_string()),
        ),
    }
}

/// Read the name following a `:`.
fn definition_name(
    definition: &Lexeme,
    lexemes: &mut Peekable<Iter<Lexeme>>,
) -> error::Result<String> {
    match lexemes.next() {
        Some(name) if name.kind() == LexemeKind::Word => Ok(name.text().to_string()),
        Some(other) => script_error_at(
            other.location(),
            ErrorKind::ExpectedDefinitionName(format!("`{}`", other.kind())),
        ),
        None => script_error_at(
            definition.location(),
            ErrorKind::ExpectedDefinitionName("eof".to_string()),
        ),
    }
}

/// Parse a list of lexemes into a tree rooted at a synthetic root node.  The path names the root
/// node's source.
pub fn parse(path: &str, lexemes: &[Lexeme]) -> error::Result<Rc<Node>> {
    let mut parser = Parser::new(path);
    let mut lexemes = lexemes.iter().peekable();

    while let Some(lexeme) = lexemes.next() {
        let location = lexeme.location();

        match lexeme.kind() {
            LexemeKind::Number => {
                let number = parse_number(lexeme)?;
                parser.append(Rc::new(Node::new(NodeKind::Number(number), location.clone())));
            }

            LexemeKind::String => {
                let kind = NodeKind::String(lexeme.text().to_string());
                parser.append(Rc::new(Node::new(kind, location.clone())));
            }

            LexemeKind::Word => {
                let kind = NodeKind::Word(lexeme.text().to_string());
                parser.append(Rc::new(Node::new(kind, location.clone())));
            }

            LexemeKind::DefBegin => {
                let name = definition_name(lexeme, &mut lexemes)?;
                parser.open(NodeKind::Definition(name), location);
            }

            LexemeKind::DefEnd => parser.close(lexeme, "definition")?,

            LexemeKind::LoopBegin => parser.open(NodeKind::Loop, location),

            LexemeKind::LoopEnd => parser.close(lexeme, "loop")?,
        }
    }

    let root = parser.finish()?;

    trace!(path, tree = %pretty_print_tree(&root), "parsed tree");
    Ok(root)
}

/// Tokenize and parse source code held in memory.
pub fn parse_source(path: &str, source: &str) -> error::Result<Rc<Node>> {
    let lexemes = tokenize_from_source(path, source)?;
    let root = parse(path, &lexemes)?;

    debug!(path, nodes = root.children.len(), "parsed source");
    Ok(root)
}

/// Read, tokenize and parse a source file.
pub fn parse_file(path: &str) -> error::Result<Rc<Node>> {
    let lexemes = tokenize_from_file(path)?;
    let root = parse(path, &lexemes)?;

    debug!(path, nodes = root.children.len(), "parsed file");
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_kind(source: &str) -> ErrorKind {
        parse_source("test", source).unwrap_err().kind().clone()
    }

    /// Every non-root node appears exactly once in exactly one child list.
    fn count_nodes(node: &Rc<Node>) -> usize {
        1 + node.children.iter().map(count_nodes).sum::<usize>()
    }

    #[test]
    fn leaves_become_children_of_the_root() {
        let root = parse_source("test", "1 \"two\" three").unwrap();

        assert_eq!(root.kind, NodeKind::Root);
        assert_eq!(
            root.children.iter().map(|child| child.kind.clone()).collect::<Vec<_>>(),
            vec![
                NodeKind::Number(1.0),
                NodeKind::String("two".to_string()),
                NodeKind::Word("three".to_string()),
            ]
        );
    }

    #[test]
    fn nested_blocks() {
        let root = parse_source("test", ": count { dup print 1 - dup } drop ; 3 count").unwrap();

        assert_eq!(root.children.len(), 3);

        let definition = &root.children[0];
        assert_eq!(definition.kind, NodeKind::Definition("count".to_string()));
        assert_eq!(definition.children.len(), 2);
        assert_eq!(definition.children[0].kind, NodeKind::Loop);
        assert_eq!(definition.children[0].children.len(), 5);
        assert_eq!(count_nodes(&root), 11);
    }

    #[test]
    fn nodes_record_their_opening_lexeme() {
        let root = parse_source("test", "1\n  : f { } ;").unwrap();
        let definition = &root.children[1];

        assert_eq!(definition.location.to_string(), "test:2:3");
        assert_eq!(definition.children[0].location.to_string(), "test:2:7");
    }

    #[test]
    fn definition_needs_a_name() {
        assert_eq!(error_kind(": 1 ;"), ErrorKind::ExpectedDefinitionName("`number`".to_string()));
        assert_eq!(error_kind(":"), ErrorKind::ExpectedDefinitionName("eof".to_string()));
        assert_eq!(error_kind(": ;"), ErrorKind::ExpectedDefinitionName("`;`".to_string()));
    }

    #[test]
    fn unbalanced_blocks() {
        assert_eq!(error_kind(";"), ErrorKind::UnexpectedBlockEnd("definition"));
        assert_eq!(error_kind("}"), ErrorKind::UnexpectedBlockEnd("loop"));
        assert_eq!(
            error_kind(": f { ;"),
            ErrorKind::MismatchedBlockEnd { expected: "definition", found: "loop" }
        );
        assert_eq!(
            error_kind("{ : f }"),
            ErrorKind::MismatchedBlockEnd { expected: "loop", found: "definition" }
        );
    }

    #[test]
    fn unterminated_blocks_are_errors() {
        let error = parse_source("test", "1 2 : f dup").unwrap_err();

        assert_eq!(error.kind(), &ErrorKind::UnterminatedDefinition("f".to_string()));
        assert_eq!(error.to_string(), "test:1:5: unterminated definition `f`");
        assert_eq!(error_kind("{ 1"), ErrorKind::UnterminatedLoop);
    }

    #[test]
    fn lexical_errors_pass_through() {
        assert_eq!(error_kind("1."), ErrorKind::MalformedNumber("1.".to_string()));
    }
}
