use std::{ io::{ stdout,
                 Write },
           rc::Rc };
use tracing::{ debug,
               trace };
use crate::{ lang::{ code::{ Node,
                             NodeKind },
                     parsing::{ parse_file,
                                parse_source },
                     source_buffer::SourceLocation },
             runtime::{ data_structures::{ dictionary::{ Dictionary,
                                                         NativeWord,
                                                         Word },
                                           value::Value },
                        error::{ self,
                                 script_error,
                                 script_error_at,
                                 ErrorKind },
                        interpreter::{ CodeManagement,
                                       Interpreter,
                                       InterpreterStack,
                                       Scope,
                                       ScopeStack,
                                       ValueStack,
                                       WordHandler,
                                       WordManagement } } };



/// The core interpreter implementation for the wafer language.
///
/// Execution is driven by an explicit stack of scopes rather than by recursion, so neither deeply
/// nested word calls nor long running loops grow the Rust call stack.
pub struct WaferInterpreter
{
    /// The data stack used by the interpreter.
    stack: ValueStack,

    /// The nodes currently being executed, innermost last.
    scopes: ScopeStack,

    /// The location of the node being executed.
    current_location: Option<SourceLocation>,

    /// The dictionary of words known by the interpreter.
    dictionary: Dictionary,

    /// Was the last character printed a new line?
    last_printed_was_newline: bool,

    /// Where printed values go.
    output: Box<dyn Write>
}


impl Interpreter for WaferInterpreter
{
    fn dictionary(&self) -> &Dictionary
    {
        &self.dictionary
    }

    fn print(&mut self, value: &Value) -> error::Result<()>
    {
        let text = value.to_string();

        if let Some(last) = text.chars().last()
        {
            self.last_printed_was_newline = last == '\n';
        }

        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;

        Ok(())
    }

    fn last_printed_was_newline(&self) -> bool
    {
        self.last_printed_was_newline
    }
}


impl InterpreterStack for WaferInterpreter
{
    fn stack(&self) -> &ValueStack
    {
        &self.stack
    }

    fn push(&mut self, value: Value)
    {
        self.stack.push(value);
    }

    fn pop(&mut self) -> error::Result<Value>
    {
        match self.stack.pop()
        {
            Some(value) => Ok(value),
            None        => script_error(ErrorKind::EmptyStack)
        }
    }

    fn clear_stack(&mut self)
    {
        self.stack.clear();
    }
}


// Helper methods for the interpreter's stepping.
impl WaferInterpreter
{
    /// Move the cursor of the scope at the given depth on to the next child.
    fn advance(&mut self, depth: usize)
    {
        if let Some(scope) = self.scopes.get_mut(depth)
        {
            scope.advance();
        }
    }

    /// Execute one step: either finish the innermost scope or execute its next child.
    fn step(&mut self) -> error::Result<()>
    {
        let depth = match self.scopes.len()
            {
                0     => return Ok(()),
                count => count - 1
            };

        let node = match self.scopes[depth].current()
            {
                Some(node) => node.clone(),
                None =>
                    {
                        let _ = self.scopes.pop();
                        return Ok(());
                    }
            };

        self.current_location = Some(node.location.clone());

        match &node.kind
        {
            NodeKind::Number(_) | NodeKind::String(_) =>
                {
                    if let Some(value) = node.value()
                    {
                        self.push(value);
                    }

                    self.advance(depth);
                },

            NodeKind::Word(name) => self.execute_word(depth, name, &node.location)?,

            NodeKind::Definition(name) =>
                {
                    self.define_word(name.clone(), node.clone());
                    self.advance(depth);
                },

            NodeKind::Loop => self.enter_loop(depth, &node)?,

            NodeKind::Root =>
                {
                    self.advance(depth);
                    self.push_scope(node.clone());
                }
        }

        Ok(())
    }

    /// Execute a word reference found in the scope at the given depth.
    fn execute_word(&mut self,
                    depth: usize,
                    name: &str,
                    location: &SourceLocation) -> error::Result<()>
    {
        match self.dictionary.try_get(name)
        {
            Some(Word::Scripted(definition)) =>
                {
                    let definition = definition.clone();

                    // Resume at the next sibling once the word's body is done.
                    self.advance(depth);
                    self.push_scope(definition);
                },

            Some(Word::Native(native)) =>
                {
                    let handler = native.handler.clone();

                    if let Err(reason) = (*handler)(self)
                    {
                        return script_error_at(location,
                                               ErrorKind::BuiltinFailed
                                                   {
                                                       word: name.to_string(),
                                                       reason: Box::new(reason)
                                                   });
                    }

                    // The native may have pushed scopes of its own, so advance the caller's
                    // scope by depth rather than the innermost one.
                    self.advance(depth);
                },

            None => return script_error_at(location, ErrorKind::UndefinedWord(name.to_string()))
        }

        Ok(())
    }

    /// Handle a loop node.  A zero condition skips past the loop.  Otherwise the body is entered
    /// without advancing, so the loop node is visited again once the body is done.
    fn enter_loop(&mut self, depth: usize, node: &Rc<Node>) -> error::Result<()>
    {
        let condition = match self.stack.pop()
            {
                Some(condition) => condition,
                None => return script_error_at(&node.location, ErrorKind::EmptyStack)
            };

        match condition.as_bool()
        {
            Some(false) => self.advance(depth),
            Some(true)  => self.push_scope(node.clone()),
            None =>
                {
                    return script_error_at(&node.location,
                                           ErrorKind::LoopConditionNotNumber(
                                               condition.kind().name()));
                }
        }

        Ok(())
    }
}


impl CodeManagement for WaferInterpreter
{
    fn evaluate(&mut self, root: Rc<Node>) -> error::Result<()>
    {
        let base = self.scopes.len();

        self.push_scope(root);

        while self.scopes.len() > base
        {
            if let Err(error) = self.step()
            {
                for scope in self.scopes[base..].iter().rev()
                {
                    debug!(%scope, "active scope at error");
                }

                // Drop the abandoned scopes so the interpreter can be used again.
                self.scopes.truncate(base);
                return Err(error);
            }
        }

        Ok(())
    }

    fn push_scope(&mut self, node: Rc<Node>)
    {
        self.scopes.push(Scope::new(node));
    }

    fn scopes(&self) -> &ScopeStack
    {
        &self.scopes
    }

    fn process_source(&mut self, path: &str, source: &str) -> error::Result<()>
    {
        let root = parse_source(path, source)?;
        self.evaluate(root)
    }

    fn process_source_file(&mut self, path: &str) -> error::Result<()>
    {
        let root = parse_file(path)?;
        self.evaluate(root)
    }

    fn run_source(&mut self, path: &str, source: &str) -> error::Result<()>
    {
        let root = parse_source(path, source)?;

        debug!(path, "scheduling source to run next");
        self.push_scope(root);

        Ok(())
    }

    fn run_source_file(&mut self, path: &str) -> error::Result<()>
    {
        let root = parse_file(path)?;

        debug!(path, "scheduling file to run next");
        self.push_scope(root);

        Ok(())
    }
}


impl WordManagement for WaferInterpreter
{
    fn current_location(&self) -> &Option<SourceLocation>
    {
        &self.current_location
    }

    fn add_word(&mut self,
                file: String,
                line: usize,
                column: usize,
                name: String,
                handler: Rc<WordHandler>,
                description: String,
                inputs: String,
                outputs: String)
    {
        let location = SourceLocation::new_from_info(&file,
                                                     line.saturating_sub(1),
                                                     column.saturating_sub(1));

        let native = NativeWord
            {
                name: name.clone(),
                location,
                description,
                inputs,
                outputs,
                handler
            };

        self.dictionary.insert(name, Word::Native(native));
    }

    fn define_word(&mut self, name: String, definition: Rc<Node>)
    {
        trace!(name = name.as_str(), location = %definition.location, "defining word");
        self.dictionary.insert(name, Word::Scripted(definition));
    }

    fn find_word(&self, word: &str) -> Option<&Word>
    {
        self.dictionary.try_get(word)
    }
}


impl WaferInterpreter
{
    /// Create an interpreter with an empty dictionary, printing to standard output.
    pub fn new() -> WaferInterpreter
    {
        WaferInterpreter::with_dictionary(Dictionary::new())
    }

    /// Create an interpreter seeded with an existing dictionary, for example the one left behind
    /// by running the standard library.
    pub fn with_dictionary(dictionary: Dictionary) -> WaferInterpreter
    {
        WaferInterpreter
            {
                stack: Vec::with_capacity(20),
                scopes: ScopeStack::with_capacity(40),
                current_location: None,
                dictionary,
                last_printed_was_newline: true,
                output: Box::new(stdout())
            }
    }

    /// Send printed values somewhere other than standard output.
    pub fn with_output(mut self, output: Box<dyn Write>) -> WaferInterpreter
    {
        self.output = output;
        self
    }

    /// Give up the interpreter, keeping the dictionary it built up.
    pub fn into_dictionary(self) -> Dictionary
    {
        self.dictionary
    }
}


impl Default for WaferInterpreter
{
    fn default() -> Self
    {
        Self::new()
    }
}

