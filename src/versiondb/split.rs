//! Field splitter for api declarations
//!
//! Turns the declaration part of an api line (`func Get(string) (*Response, error)`)
//! into a tree of [`Node`]s. Spaces separate fields, brackets of any kind open a
//! nested [`Node::Group`] and quoted literals are kept as a single atom. A single
//! top-level comma separates the primary fields from the secondary ones
//! (`type Reader interface, Read([]byte) (int, error)`).

use std::str::Chars;

use crate::versiondb::error::SplitError;

/// One element of a split declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Raw text, never empty unless it comes from an empty literal.
    Atom(String),
    /// Elements found between a pair of matching delimiters.
    Group(Vec<Node>),
}

impl Node {
    /// Returns the atom text (empty for a group) and the group children
    /// (empty for an atom).
    pub fn cast(&self) -> (&str, &[Node]) {
        match self {
            Node::Atom(text) => (text.as_str(), &[]),
            Node::Group(children) => ("", children.as_slice()),
        }
    }

    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Node::Atom(text) => Some(text.as_str()),
            Node::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&[Node]> {
        match self {
            Node::Atom(_) => None,
            Node::Group(children) => Some(children.as_slice()),
        }
    }
}

/// Fields on each side of the top-level comma
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    pub primary: Vec<Node>,
    /// Empty when the declaration has no top-level comma.
    pub secondary: Vec<Node>,
}

/// Splits a declaration in a single forward pass.
pub fn split(text: &str) -> Result<Fields, SplitError> {
    let mut scanner = Scanner {
        chars: text.chars(),
    };

    let (primary, has_secondary) = scanner.fields(true)?;
    let secondary = if has_secondary {
        scanner.fields(false)?.0
    } else {
        Vec::new()
    };

    Ok(Fields { primary, secondary })
}

struct Scanner<'a> {
    chars: Chars<'a>,
}

impl Scanner<'_> {
    /// Reads top-level fields until the end of input, or until a comma when
    /// `stop_at_comma` is set. The returned flag tells whether a comma stopped it.
    fn fields(&mut self, stop_at_comma: bool) -> Result<(Vec<Node>, bool), SplitError> {
        let mut nodes = Vec::new();
        let mut buffer = String::new();

        while let Some(c) = self.chars.next() {
            match c {
                ',' if stop_at_comma => {
                    flush(&mut nodes, &mut buffer);
                    return Ok((nodes, true));
                }
                ',' => return Err(SplitError::UnexpectedThirdField),
                ' ' => flush(&mut nodes, &mut buffer),
                ')' | ']' | '}' => return Err(SplitError::UnexpectedClosingDelimiter(c)),
                _ => self.push_char(c, &mut nodes, &mut buffer)?,
            }
        }

        flush(&mut nodes, &mut buffer);
        Ok((nodes, false))
    }

    fn group(&mut self, close: char) -> Result<Node, SplitError> {
        let mut nodes = Vec::new();
        let mut buffer = String::new();

        while let Some(c) = self.chars.next() {
            match c {
                c if c == close => {
                    flush(&mut nodes, &mut buffer);
                    return Ok(Node::Group(nodes));
                }
                ',' | ' ' => flush(&mut nodes, &mut buffer),
                ')' | ']' | '}' => return Err(SplitError::UnexpectedClosingDelimiter(c)),
                _ => self.push_char(c, &mut nodes, &mut buffer)?,
            }
        }

        Err(SplitError::UnterminatedGroup(close))
    }

    /// Escapes are kept verbatim, backslash included.
    fn literal(&mut self, quote: char) -> Result<Node, SplitError> {
        let mut text = String::new();

        while let Some(c) = self.chars.next() {
            match c {
                c if c == quote => return Ok(Node::Atom(text)),
                '\\' => {
                    let Some(escaped) = self.chars.next() else {
                        break;
                    };
                    text.push(c);
                    text.push(escaped);
                }
                _ => text.push(c),
            }
        }

        Err(SplitError::UnterminatedLiteral(quote))
    }

    /// Handles everything but separators and closing delimiters.
    fn push_char(
        &mut self,
        c: char,
        nodes: &mut Vec<Node>,
        buffer: &mut String,
    ) -> Result<(), SplitError> {
        let nested = match c {
            '"' | '\'' => {
                flush(nodes, buffer);
                self.literal(c)?
            }
            '(' => {
                flush(nodes, buffer);
                self.group(')')?
            }
            '[' => {
                flush(nodes, buffer);
                self.group(']')?
            }
            '{' => {
                flush(nodes, buffer);
                self.group('}')?
            }
            _ => {
                buffer.push(c);
                return Ok(());
            }
        };

        nodes.push(nested);
        Ok(())
    }
}

fn flush(nodes: &mut Vec<Node>, buffer: &mut String) {
    if !buffer.is_empty() {
        nodes.push(Node::Atom(std::mem::take(buffer)));
    }
}
