//! Boolean tag queries
//!
//! ```text
//! expr    := or
//! or      := and ( "or" and )*
//! and     := unary ( "and" unary )*
//! unary   := "not" unary | "is" "not"? primary | "in" list | primary
//! primary := "(" expr ")" | TAG
//! list    := "[" TAG ( "," TAG )* "]"
//! ```
//!
//! Keywords are matched case-insensitively, so the upper-case forms
//! `IS smoke`, `NOT IN [a, b]` and `a AND b` parse the same as their
//! lower-case spellings. Tags themselves are case-sensitive.
//!
//! Groups and negations may nest at most [`MAX_NESTING`] levels deep.

use super::filter::{Tagged, keep};
use super::TagSet;
use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Deepest allowed nesting of groups and negations.
pub const MAX_NESTING: usize = 128;

/// Parsed form of a tag query.
///
/// `And` and `Or` hold every operand of a chain, so `a or b or c` is one
/// node with three operands. Tree depth only grows with groups and `not`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Literal(String),
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Not(Box<Expr>),
}

impl Expr {
    pub fn matches(&self, tags: &TagSet) -> bool {
        match self {
            Expr::Literal(tag) => tags.contains(tag),
            Expr::And(all) => all.iter().all(|e| e.matches(tags)),
            Expr::Or(any) => any.iter().any(|e| e.matches(tags)),
            Expr::Not(inner) => !inner.matches(tags),
        }
    }

    fn not(inner: Expr) -> Self {
        Expr::Not(Box::new(inner))
    }

    /// A chain of one operand is the operand itself.
    fn chain(mut operands: Vec<Expr>, build: fn(Vec<Expr>) -> Expr) -> Self {
        if operands.len() == 1 {
            operands.remove(0)
        } else {
            build(operands)
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, operands: &[Expr], op: &str) -> fmt::Result {
            f.write_str("(")?;
            for (i, operand) in operands.iter().enumerate() {
                if i > 0 {
                    write!(f, " {op} ")?;
                }
                write!(f, "{operand}")?;
            }
            f.write_str(")")
        }

        match self {
            Expr::Literal(tag) => f.write_str(tag),
            Expr::And(all) => join(f, all, "and"),
            Expr::Or(any) => join(f, any, "or"),
            Expr::Not(inner) => write!(f, "not {inner}"),
        }
    }
}

/// A validated tag query, ready to filter scenarios.
///
/// ```ignore
/// let query = TagExpression::parse("(smoke or regression) and not slow")?;
/// let selected = query.filter(&app.scenarios());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagExpression {
    source: String,
    root: Expr,
}

impl TagExpression {
    pub fn parse(query: &str) -> Result<Self> {
        check_balance(query)?;
        let tokens = tokenize(query)?;
        if tokens.is_empty() {
            return Err(Error::malformed(query, "empty expression"));
        }

        let mut parser = Parser {
            query,
            tokens,
            pos: 0,
            depth: 0,
        };
        let root = parser.expr()?;
        if let Some((offset, token)) = parser.peek() {
            return Err(Error::malformed(
                query,
                format!("unexpected {token} at position {offset}"),
            ));
        }

        tracing::trace!(query, parsed = %root, "Parsed tag expression");
        Ok(Self {
            source: query.to_string(),
            root,
        })
    }

    /// The query text this expression was parsed from
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn expr(&self) -> &Expr {
        &self.root
    }

    pub fn matches(&self, tags: &TagSet) -> bool {
        self.root.matches(tags)
    }

    /// Members of `items` whose tags satisfy the query, in their original
    /// order.
    pub fn filter<'a, T: Tagged>(&self, items: &[&'a T]) -> Vec<&'a T> {
        keep(items, |tags| self.matches(tags))
    }
}

impl FromStr for TagExpression {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for TagExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn check_balance(query: &str) -> Result<()> {
    let mut depth = 0usize;
    for (offset, c) in query.char_indices() {
        match c {
            '(' if depth == MAX_NESTING => {
                return Err(Error::malformed(
                    query,
                    format!("parentheses nested deeper than {MAX_NESTING} levels at position {offset}"),
                ));
            }
            '(' => depth += 1,
            ')' if depth == 0 => {
                return Err(Error::malformed(
                    query,
                    format!("unbalanced parentheses: unexpected ')' at position {offset}"),
                ));
            }
            ')' => depth -= 1,
            _ => {}
        }
    }
    if depth > 0 {
        return Err(Error::malformed(
            query,
            format!("unbalanced parentheses: {depth} unclosed '('"),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'q> {
    Open,
    Close,
    OpenList,
    CloseList,
    Comma,
    Word(&'q str),
}

impl Token<'_> {
    fn keyword(&self, keyword: &str) -> bool {
        matches!(self, Token::Word(w) if w.eq_ignore_ascii_case(keyword))
    }

    fn is_operator(&self) -> bool {
        ["and", "or", "not", "is", "in"].iter().any(|k| self.keyword(k))
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Open => f.write_str("'('"),
            Token::Close => f.write_str("')'"),
            Token::OpenList => f.write_str("'['"),
            Token::CloseList => f.write_str("']'"),
            Token::Comma => f.write_str("','"),
            Token::Word(w) => write!(f, "'{w}'"),
        }
    }
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | '[' | ']' | ',')
}

fn tokenize(query: &str) -> Result<Vec<(usize, Token<'_>)>> {
    let mut tokens = Vec::new();
    let mut chars = query.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        let token = match c {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '(' => Token::Open,
            ')' => Token::Close,
            '[' => Token::OpenList,
            ']' => Token::CloseList,
            ',' => Token::Comma,
            '"' | '\'' => {
                return Err(Error::malformed(
                    query,
                    format!("quotes are not allowed in tag names (position {start})"),
                ));
            }
            _ => {
                let mut end = start;
                while let Some(&(i, c)) = chars.peek() {
                    if is_delimiter(c) {
                        break;
                    }
                    end = i + c.len_utf8();
                    chars.next();
                }
                tokens.push((start, Token::Word(&query[start..end])));
                continue;
            }
        };
        chars.next();
        tokens.push((start, token));
    }
    Ok(tokens)
}

struct Parser<'q> {
    query: &'q str,
    tokens: Vec<(usize, Token<'q>)>,
    pos: usize,
    depth: usize,
}

impl<'q> Parser<'q> {
    fn peek(&self) -> Option<(usize, Token<'q>)> {
        self.tokens.get(self.pos).copied()
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        self.peek().is_some_and(|(_, t)| t.keyword(keyword))
    }

    fn advance(&mut self) -> Option<(usize, Token<'q>)> {
        let token = self.peek();
        self.pos += 1;
        token
    }

    fn error(&self, reason: impl Into<String>) -> Error {
        Error::malformed(self.query, reason)
    }

    /// Error for the token at the cursor, or for running out of input.
    fn unexpected(&self, expected: &str) -> Error {
        match self.peek() {
            Some((offset, token)) => {
                self.error(format!("expected {expected}, found {token} at position {offset}"))
            }
            None => self.error(format!("expected {expected}, found end of expression")),
        }
    }

    /// Run `parse` one nesting level deeper.
    fn nested(&mut self, parse: impl FnOnce(&mut Self) -> Result<Expr>) -> Result<Expr> {
        if self.depth == MAX_NESTING {
            let at = self.peek().map_or(self.query.len(), |(offset, _)| offset);
            return Err(self.error(format!(
                "expression nested deeper than {MAX_NESTING} levels at position {at}"
            )));
        }
        self.depth += 1;
        let parsed = parse(self);
        self.depth -= 1;
        parsed
    }

    fn expr(&mut self) -> Result<Expr> {
        self.or()
    }

    fn or(&mut self) -> Result<Expr> {
        let mut any = vec![self.and()?];
        while self.at_keyword("or") {
            self.advance();
            any.push(self.and()?);
        }
        Ok(Expr::chain(any, Expr::Or))
    }

    fn and(&mut self) -> Result<Expr> {
        let mut all = vec![self.unary()?];
        while self.at_keyword("and") {
            self.advance();
            all.push(self.unary()?);
        }
        Ok(Expr::chain(all, Expr::And))
    }

    fn unary(&mut self) -> Result<Expr> {
        if self.at_keyword("not") {
            self.advance();
            return self.nested(|p| p.unary().map(Expr::not));
        }
        if self.at_keyword("is") {
            self.advance();
            let negate = self.at_keyword("not");
            if negate {
                self.advance();
            }
            let inner = self.primary()?;
            return Ok(if negate { Expr::not(inner) } else { inner });
        }
        if self.at_keyword("in") {
            self.advance();
            return self.list();
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expr> {
        match self.peek() {
            Some((offset, Token::Open)) => {
                self.advance();
                if matches!(self.peek(), Some((_, Token::Close))) {
                    return Err(self.error(format!("empty group at position {offset}")));
                }
                let inner = self.nested(Self::expr)?;
                match self.advance() {
                    Some((_, Token::Close)) => Ok(inner),
                    _ => {
                        self.pos -= 1;
                        Err(self.unexpected("')'"))
                    }
                }
            }
            Some((_, token @ Token::Word(tag))) if !token.is_operator() => {
                self.advance();
                Ok(Expr::Literal(tag.to_string()))
            }
            _ => Err(self.unexpected("a tag")),
        }
    }

    /// `[a, b, c]`, read as `a or b or c`.
    fn list(&mut self) -> Result<Expr> {
        let Some((open, Token::OpenList)) = self.peek() else {
            return Err(self.unexpected("'['"));
        };
        self.advance();
        if matches!(self.peek(), Some((_, Token::CloseList))) {
            return Err(self.error(format!("empty tag list at position {open}")));
        }

        let mut any = Vec::new();
        loop {
            let tag = match self.peek() {
                Some((_, token @ Token::Word(tag))) if !token.is_operator() => tag,
                _ => return Err(self.unexpected("a tag")),
            };
            self.advance();
            any.push(Expr::Literal(tag.to_string()));

            match self.peek() {
                Some((_, Token::Comma)) => {
                    self.advance();
                }
                Some((_, Token::CloseList)) => {
                    self.advance();
                    break;
                }
                _ => return Err(self.unexpected("',' or ']'")),
            }
        }
        Ok(Expr::chain(any, Expr::Or))
    }
}
