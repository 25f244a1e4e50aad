//! A small CSS selector engine for the page model.
//!
//! Supports exactly what the controllers' DOM contract needs:
//!
//! | Form | Example |
//! |------|---------|
//! | Type | `img` |
//! | Class | `.mystic-card` |
//! | Id | `#wordsContainer` |
//! | Compound | `a.button`, `.mystic-button[href*="whatsapp"]` |
//! | Attribute | `[data-src]`, `[href="#top"]`, `[href^="tel:"]`, `[href*="wa.me"]` |
//! | Descendant | `.masonry-grid-item img` |
//! | List | `.description, .testimonial` |
//!
//! Matching walks ancestors right-to-left, so descendant chains cost one
//! parent walk per element tested.

use crate::dom::{Document, Element, ElementId};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectorError {
    #[error("empty selector in \"{0}\"")]
    Empty(String),
    #[error("unexpected '{found}' at position {position} in selector \"{input}\"")]
    Unexpected {
        input: String,
        found: char,
        position: usize,
    },
    #[error("unterminated attribute filter in selector \"{0}\"")]
    Unterminated(String),
}

#[derive(Debug, Clone, PartialEq)]
enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
    Contains(String),
}

#[derive(Debug, Clone, PartialEq)]
struct AttrFilter {
    name: String,
    op: AttrOp,
}

impl AttrFilter {
    fn matches(&self, el: &Element) -> bool {
        let value = if self.name == "class" {
            if el.classes().is_empty() {
                None
            } else {
                Some(el.classes().join(" "))
            }
        } else {
            el.attr(&self.name).map(str::to_string)
        };
        match (&self.op, value) {
            (_, None) => false,
            (AttrOp::Exists, Some(_)) => true,
            (AttrOp::Equals(v), Some(actual)) => actual == *v,
            (AttrOp::Prefix(v), Some(actual)) => !v.is_empty() && actual.starts_with(v.as_str()),
            (AttrOp::Contains(v), Some(actual)) => !v.is_empty() && actual.contains(v.as_str()),
        }
    }
}

/// One compound selector: optional type, id, classes and attribute filters,
/// all of which must hold for the same element.
#[derive(Debug, Clone, Default, PartialEq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrFilter>,
}

impl Compound {
    fn matches(&self, el: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if el.tag() != tag.as_str() {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if el.id() != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|c| el.has_class(c)) && self.attrs.iter().all(|a| a.matches(el))
    }
}

/// Compounds joined by descendant combinators; the last one is the subject.
#[derive(Debug, Clone, PartialEq)]
struct Complex {
    compounds: Vec<Compound>,
}

impl Complex {
    fn matches(&self, doc: &Document, id: ElementId) -> bool {
        let Some((subject, ancestors)) = self.compounds.split_last() else {
            return false;
        };
        if !subject.matches(doc.get(id)) {
            return false;
        }
        let mut current = doc.parent(id);
        for compound in ancestors.iter().rev() {
            loop {
                match current {
                    None => return false,
                    Some(ancestor) => {
                        current = doc.parent(ancestor);
                        if compound.matches(doc.get(ancestor)) {
                            break;
                        }
                    }
                }
            }
        }
        true
    }
}

/// A parsed, comma-separated selector list.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList {
    selectors: Vec<Complex>,
}

impl SelectorList {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        Parser::new(input).list()
    }

    /// True if any selector in the list matches the element.
    pub fn matches(&self, doc: &Document, id: ElementId) -> bool {
        self.selectors.iter().any(|s| s.matches(doc, id))
    }
}

impl FromStr for SelectorList {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

struct Parser<'a> {
    input: &'a str,
    chars: Vec<char>,
    pos: usize,
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn unexpected(&self, found: char) -> SelectorError {
        SelectorError::Unexpected {
            input: self.input.to_string(),
            found,
            position: self.pos,
        }
    }

    /// Skip whitespace, returning whether any was consumed.
    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn ident(&mut self) -> String {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn required_ident(&mut self) -> Result<String, SelectorError> {
        let name = self.ident();
        if name.is_empty() {
            return Err(match self.peek() {
                Some(c) => self.unexpected(c),
                None => SelectorError::Empty(self.input.to_string()),
            });
        }
        Ok(name)
    }

    fn list(&mut self) -> Result<SelectorList, SelectorError> {
        let mut selectors = Vec::new();
        loop {
            self.skip_ws();
            selectors.push(self.complex()?);
            self.skip_ws();
            match self.peek() {
                None => break,
                Some(',') => self.pos += 1,
                Some(c) => return Err(self.unexpected(c)),
            }
        }
        Ok(SelectorList { selectors })
    }

    fn complex(&mut self) -> Result<Complex, SelectorError> {
        let mut compounds = vec![self.compound()?];
        loop {
            let had_ws = self.skip_ws();
            match self.peek() {
                None | Some(',') => break,
                Some(_) if had_ws => compounds.push(self.compound()?),
                Some(c) => return Err(self.unexpected(c)),
            }
        }
        Ok(Complex { compounds })
    }

    fn compound(&mut self) -> Result<Compound, SelectorError> {
        let start = self.pos;
        let mut compound = Compound::default();
        match self.peek() {
            Some('*') => self.pos += 1,
            Some(c) if is_ident_char(c) => {
                compound.tag = Some(self.ident().to_ascii_lowercase());
            }
            _ => {}
        }
        loop {
            match self.peek() {
                Some('.') => {
                    self.pos += 1;
                    compound.classes.push(self.required_ident()?);
                }
                Some('#') => {
                    self.pos += 1;
                    compound.id = Some(self.required_ident()?);
                }
                Some('[') => compound.attrs.push(self.attr()?),
                _ => break,
            }
        }
        if self.pos == start {
            return Err(match self.peek() {
                Some(c) => self.unexpected(c),
                None => SelectorError::Empty(self.input.to_string()),
            });
        }
        Ok(compound)
    }

    fn attr(&mut self) -> Result<AttrFilter, SelectorError> {
        let input = self.input;
        let unterminated = move || SelectorError::Unterminated(input.to_string());
        self.pos += 1;
        self.skip_ws();
        let name = self.required_ident()?.to_ascii_lowercase();
        self.skip_ws();
        let kind = match self.peek() {
            Some(']') => {
                self.pos += 1;
                return Ok(AttrFilter {
                    name,
                    op: AttrOp::Exists,
                });
            }
            Some('=') => {
                self.pos += 1;
                '='
            }
            Some(c @ ('^' | '*')) => {
                self.pos += 1;
                if self.peek() != Some('=') {
                    return Err(match self.peek() {
                        Some(other) => self.unexpected(other),
                        None => unterminated(),
                    });
                }
                self.pos += 1;
                c
            }
            Some(c) => return Err(self.unexpected(c)),
            None => return Err(unterminated()),
        };
        self.skip_ws();
        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let start = self.pos;
                while self.peek().is_some_and(|c| c != quote) {
                    self.pos += 1;
                }
                if self.peek().is_none() {
                    return Err(unterminated());
                }
                let value: String = self.chars[start..self.pos].iter().collect();
                self.pos += 1;
                value
            }
            Some(_) => self.ident(),
            None => return Err(unterminated()),
        };
        self.skip_ws();
        if self.peek() != Some(']') {
            return Err(unterminated());
        }
        self.pos += 1;
        let op = match kind {
            '^' => AttrOp::Prefix(value),
            '*' => AttrOp::Contains(value),
            _ => AttrOp::Equals(value),
        };
        Ok(AttrFilter { name, op })
    }
}
