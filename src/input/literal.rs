//! Decoder for the literal mappings CheckM writes into `bin_stats_ext.tsv`,
//! e.g. `{'marker lineage': 'k__Bacteria', '# genomes': 5449, 'GC': 0.54}`.
//!
//! Only literals are accepted: mappings, lists, tuples, quoted strings,
//! numbers, `True`/`False`/`None`. Strings end at the first unescaped
//! matching quote, so a bare apostrophe inside a single-quoted value is a
//! decode error rather than being guessed around.

use thiserror::Error;

use crate::report::format_f64_repr;

/// Deepest mapping/list nesting accepted; CheckM itself writes at most two.
pub const MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Literal>),
    Map(Vec<(Literal, Literal)>),
}

#[derive(Debug, Error, PartialEq)]
pub enum LiteralError {
    #[error("unexpected end of input at offset {0}")]
    Eof(usize),
    #[error("unexpected character '{ch}' at offset {offset}")]
    Unexpected { ch: char, offset: usize },
    #[error("invalid number '{0}'")]
    Number(String),
    #[error("unknown name '{0}'")]
    Name(String),
    #[error("trailing characters at offset {0}")]
    Trailing(usize),
    #[error("nesting too deep at offset {0}")]
    TooDeep(usize),
}

impl Literal {
    /// Mapping keys usable as column lookups; ints are stringified.
    pub fn as_key(&self) -> Option<String> {
        match self {
            Literal::Str(s) => Some(s.clone()),
            Literal::Int(v) => Some(v.to_string()),
            _ => None,
        }
    }

    pub fn to_repr(&self) -> String {
        let mut out = String::new();
        self.write_repr(&mut out);
        out
    }

    fn write_repr(&self, out: &mut String) {
        match self {
            Literal::None => out.push_str("None"),
            Literal::Bool(true) => out.push_str("True"),
            Literal::Bool(false) => out.push_str("False"),
            Literal::Int(v) => out.push_str(&v.to_string()),
            Literal::Float(v) => out.push_str(&format_f64_repr(*v)),
            Literal::Str(s) => {
                out.push('\'');
                for c in s.chars() {
                    match c {
                        '\'' => out.push_str("\\'"),
                        '\\' => out.push_str("\\\\"),
                        '\n' => out.push_str("\\n"),
                        '\t' => out.push_str("\\t"),
                        c => out.push(c),
                    }
                }
                out.push('\'');
            }
            Literal::List(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.write_repr(out);
                }
                out.push(']');
            }
            Literal::Map(entries) => {
                out.push('{');
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    k.write_repr(out);
                    out.push_str(": ");
                    v.write_repr(out);
                }
                out.push('}');
            }
        }
    }
}

pub fn parse_literal(src: &str) -> Result<Literal, LiteralError> {
    let mut parser = Parser {
        src,
        pos: 0,
        depth: 0,
    };
    let value = parser.value()?;
    parser.skip_ws();
    if parser.pos < src.len() {
        return Err(LiteralError::Trailing(parser.pos));
    }
    Ok(value)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn expect(&mut self, want: char) -> Result<(), LiteralError> {
        match self.bump() {
            Some(c) if c == want => Ok(()),
            Some(c) => Err(LiteralError::Unexpected {
                ch: c,
                offset: self.pos - c.len_utf8(),
            }),
            None => Err(LiteralError::Eof(self.pos)),
        }
    }

    fn enter(&mut self) -> Result<(), LiteralError> {
        if self.depth >= MAX_DEPTH {
            return Err(LiteralError::TooDeep(self.pos));
        }
        self.depth += 1;
        Ok(())
    }

    fn value(&mut self) -> Result<Literal, LiteralError> {
        self.skip_ws();
        match self.peek() {
            None => Err(LiteralError::Eof(self.pos)),
            Some('{') => self.nested(Self::map),
            Some('[') => self.nested(|p| p.sequence('[', ']')),
            Some('(') => self.nested(|p| p.sequence('(', ')')),
            Some(q @ ('\'' | '"')) => self.string(q).map(Literal::Str),
            Some(c) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => self.number(),
            Some(c) if c.is_alphabetic() => self.name(false),
            Some(c) => Err(LiteralError::Unexpected {
                ch: c,
                offset: self.pos,
            }),
        }
    }

    fn nested<F>(&mut self, parse: F) -> Result<Literal, LiteralError>
    where
        F: FnOnce(&mut Self) -> Result<Literal, LiteralError>,
    {
        self.enter()?;
        let value = parse(self)?;
        self.depth -= 1;
        Ok(value)
    }

    fn map(&mut self) -> Result<Literal, LiteralError> {
        self.expect('{')?;
        let mut entries = Vec::new();
        self.skip_ws();
        if self.peek() == Some('}') {
            self.bump();
            return Ok(Literal::Map(entries));
        }
        loop {
            let key = self.value()?;
            self.skip_ws();
            self.expect(':')?;
            let value = self.value()?;
            entries.push((key, value));
            self.skip_ws();
            match self.bump() {
                Some(',') => {
                    self.skip_ws();
                    if self.peek() == Some('}') {
                        self.bump();
                        break;
                    }
                }
                Some('}') => break,
                Some(c) => {
                    return Err(LiteralError::Unexpected {
                        ch: c,
                        offset: self.pos - c.len_utf8(),
                    });
                }
                None => return Err(LiteralError::Eof(self.pos)),
            }
        }
        Ok(Literal::Map(entries))
    }

    fn sequence(&mut self, open: char, close: char) -> Result<Literal, LiteralError> {
        self.expect(open)?;
        let mut items = Vec::new();
        self.skip_ws();
        if self.peek() == Some(close) {
            self.bump();
            return Ok(Literal::List(items));
        }
        loop {
            items.push(self.value()?);
            self.skip_ws();
            match self.bump() {
                Some(',') => {
                    self.skip_ws();
                    if self.peek() == Some(close) {
                        self.bump();
                        break;
                    }
                }
                Some(c) if c == close => break,
                Some(c) => {
                    return Err(LiteralError::Unexpected {
                        ch: c,
                        offset: self.pos - c.len_utf8(),
                    });
                }
                None => return Err(LiteralError::Eof(self.pos)),
            }
        }
        Ok(Literal::List(items))
    }

    fn string(&mut self, quote: char) -> Result<String, LiteralError> {
        self.expect(quote)?;
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(LiteralError::Eof(self.pos)),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => match self.bump() {
                    None => return Err(LiteralError::Eof(self.pos)),
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some('0') => out.push('\0'),
                    Some(c @ ('\\' | '\'' | '"')) => out.push(c),
                    Some(c) => {
                        out.push('\\');
                        out.push(c);
                    }
                },
                Some(c) => out.push(c),
            }
        }
    }

    fn number(&mut self) -> Result<Literal, LiteralError> {
        let start = self.pos;
        let negative = match self.peek() {
            Some('-') => {
                self.bump();
                true
            }
            Some('+') => {
                self.bump();
                false
            }
            _ => false,
        };
        if self.peek().is_some_and(char::is_alphabetic) {
            return self.name(negative);
        }
        while let Some(c) = self.peek() {
            let after_exp = matches!(
                self.src[start..self.pos].chars().last(),
                Some('e' | 'E')
            );
            let sign_ok = after_exp && matches!(c, '-' | '+');
            if c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '_') || sign_ok {
                self.bump();
            } else {
                break;
            }
        }
        let text: String = self.src[start..self.pos]
            .chars()
            .filter(|&c| c != '_')
            .collect();
        let is_float = text.contains(['.', 'e', 'E']);
        if !is_float {
            if let Ok(v) = text.parse::<i64>() {
                return Ok(Literal::Int(v));
            }
        }
        text.parse::<f64>()
            .map(Literal::Float)
            .map_err(|_| LiteralError::Number(text))
    }

    fn name(&mut self, negative: bool) -> Result<Literal, LiteralError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.bump();
        }
        let word = &self.src[start..self.pos];
        let sign = if negative { -1.0 } else { 1.0 };
        match word {
            "inf" => Ok(Literal::Float(sign * f64::INFINITY)),
            "nan" => Ok(Literal::Float(f64::NAN)),
            "True" if !negative => Ok(Literal::Bool(true)),
            "False" if !negative => Ok(Literal::Bool(false)),
            "None" if !negative => Ok(Literal::None),
            _ => Err(LiteralError::Name(word.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/literal.rs"]
mod tests;
