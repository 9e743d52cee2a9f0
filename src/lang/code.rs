use crate::{lang::source_buffer::SourceLocation, runtime::data_structures::value::Value};
use std::{
    fmt::{self, Display, Formatter},
    rc::Rc,
};

/// The kinds of node in a parsed wafer program, along with each kind's payload.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// The synthetic top of a parsed script.
    Root,

    /// Push a number onto the data stack.
    Number(f64),

    /// Push a string onto the data stack.
    String(String),

    /// Execute the named word.
    Word(String),

    /// Bind the name to this node's children when executed.
    Definition(String),

    /// Execute the children for as long as the popped condition is non-zero.
    Loop,
}

impl NodeKind {
    /// The name of the kind, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Number(_) => "number",
            NodeKind::String(_) => "string",
            NodeKind::Word(_) => "word",
            NodeKind::Definition(_) => "definition",
            NodeKind::Loop => "loop",
        }
    }
}

/// A parsed structural unit of a program.  Only the root, definitions and loops have children.
/// Nodes are shared between the tree, the dictionary and the interpreter's scopes, and are never
/// changed once the parser has closed the block that owns them.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub kind: NodeKind,

    /// Where the node's opening lexeme was found.
    pub location: SourceLocation,

    /// The child nodes in source order.
    pub children: Vec<Rc<Node>>,
}

impl Node {
    /// Create a leaf node.
    pub fn new(kind: NodeKind, location: SourceLocation) -> Node {
        Node {
            kind,
            location,
            children: Vec::new(),
        }
    }

    /// Create a node with its finished child list.
    pub fn with_children(kind: NodeKind, location: SourceLocation, children: Vec<Rc<Node>>) -> Node {
        Node {
            kind,
            location,
            children,
        }
    }

    /// The node's payload as a value.  Loops and the root have none.
    pub fn value(&self) -> Option<Value> {
        match &self.kind {
            NodeKind::Number(number) => Some(Value::Number(*number)),
            NodeKind::String(text) | NodeKind::Word(text) | NodeKind::Definition(text) => {
                Some(Value::Text(text.clone()))
            }
            NodeKind::Root | NodeKind::Loop => None,
        }
    }
}

/// Quote a string, escaping the characters the lexer would need escaped.
pub fn stringify(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + 2);

    result.push('"');

    for next in text.chars() {
        match next {
            '\t' => result.push_str("\\t"),
            '\r' => result.push_str("\\r"),
            '\n' => result.push_str("\\n"),
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            _ => result.push(next),
        }
    }

    result.push('"');
    result
}

/// Print the node back as wafer source.
impl Display for Node {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        fn write_children(f: &mut Formatter, children: &[Rc<Node>]) -> fmt::Result {
            for child in children {
                write!(f, " {}", child)?;
            }

            Ok(())
        }

        match &self.kind {
            NodeKind::Root => {
                let mut first = true;

                for child in &self.children {
                    if !first {
                        write!(f, " ")?;
                    }

                    write!(f, "{}", child)?;
                    first = false;
                }

                Ok(())
            }
            NodeKind::Number(number) => write!(f, "{}", number),
            NodeKind::String(text) => write!(f, "{}", stringify(text)),
            NodeKind::Word(name) => write!(f, "{}", name),
            NodeKind::Definition(name) => {
                write!(f, ": {}", name)?;
                write_children(f, &self.children)?;
                write!(f, " ;")
            }
            NodeKind::Loop => {
                write!(f, "{{")?;
                write_children(f, &self.children)?;
                write!(f, " }}")
            }
        }
    }
}

/// Pretty print a tree, one node per line with its location, for debugging purposes.
pub fn pretty_print_tree(node: &Node) -> String {
    use std::fmt::Write;

    fn print_node(result: &mut String, node: &Node, depth: usize) {
        let label = match &node.kind {
            NodeKind::Number(number) => format!("number {}", number),
            NodeKind::String(text) => format!("string {}", stringify(text)),
            NodeKind::Word(name) => format!("word {}", name),
            NodeKind::Definition(name) => format!("definition {}", name),
            NodeKind::Root | NodeKind::Loop => node.kind.name().to_string(),
        };

        let _ = writeln!(result, "{:width$}{}  ({})", "", label, node.location, width = depth * 2);

        for child in &node.children {
            print_node(result, child, depth + 1);
        }
    }

    let mut result = String::new();

    print_node(&mut result, node, 0);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(kind: NodeKind) -> Rc<Node> {
        Rc::new(Node::new(kind, SourceLocation::new_from_path("test")))
    }

    #[test]
    fn payloads() {
        assert_eq!(leaf(NodeKind::Number(2.0)).value(), Some(Value::Number(2.0)));
        assert_eq!(
            leaf(NodeKind::Definition("sq".to_string())).value(),
            Some(Value::from("sq"))
        );
        assert_eq!(leaf(NodeKind::Loop).value(), None);
    }

    #[test]
    fn display_round_trips_source_shape() {
        let location = SourceLocation::new_from_path("test");
        let body = vec![
            leaf(NodeKind::Word("dup".to_string())),
            leaf(NodeKind::String("a\nb".to_string())),
        ];
        let loop_node = Rc::new(Node::with_children(NodeKind::Loop, location.clone(), body));
        let definition = Rc::new(Node::with_children(
            NodeKind::Definition("f".to_string()),
            location.clone(),
            vec![loop_node],
        ));
        let root = Node::with_children(NodeKind::Root, location, vec![definition, leaf(NodeKind::Number(1.5))]);

        assert_eq!(root.to_string(), ": f { dup \"a\\nb\" } ; 1.5");
    }
}
