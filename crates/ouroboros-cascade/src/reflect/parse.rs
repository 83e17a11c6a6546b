//! Type expression parser
//!
//! Accepts declarations such as `Map<String, List<T>>`, `int[]` or
//! `List<? extends Number>`. Identifiers matching one of the supplied type
//! parameters become type variables, primitive names become primitives and
//! everything else is a class reference.

use crate::errors::{ConfigResult, ConfigurationError};

use super::class::{boxed, ClassName, GenericType, TypeParameter};

/// Parse a type expression in the scope of `type_params`
pub fn parse_type(expression: &str, type_params: &[TypeParameter]) -> ConfigResult<GenericType> {
    let mut parser = Parser {
        expression,
        chars: expression.char_indices().peekable(),
        type_params,
    };
    let ty = parser.parse()?;
    parser.skip_whitespace();
    if let Some(&(_, c)) = parser.chars.peek() {
        return Err(parser.error(format!("unexpected '{}'", c)));
    }
    Ok(ty)
}

struct Parser<'a> {
    expression: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    type_params: &'a [TypeParameter],
}

impl<'a> Parser<'a> {
    fn error(&self, reason: impl Into<String>) -> ConfigurationError {
        ConfigurationError::InvalidTypeExpression {
            expression: self.expression.to_string(),
            reason: reason.into(),
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.chars.peek(), Some((_, c)) if c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        if matches!(self.chars.peek(), Some((_, c)) if *c == expected) {
            self.chars.next();
            true
        } else {
            false
        }
    }

    fn identifier(&mut self) -> ConfigResult<&'a str> {
        self.skip_whitespace();
        let start = match self.chars.peek() {
            Some((i, c)) if c.is_alphabetic() || *c == '_' => *i,
            Some(&(_, c)) => return Err(self.error(format!("unexpected '{}'", c))),
            None => return Err(self.error("unexpected end of expression")),
        };
        let mut end = start;
        while let Some((i, c)) = self.chars.peek() {
            if c.is_alphanumeric() || matches!(c, '_' | '.' | '$') {
                end = i + c.len_utf8();
                self.chars.next();
            } else {
                break;
            }
        }
        Ok(&self.expression[start..end])
    }

    fn parse(&mut self) -> ConfigResult<GenericType> {
        let mut ty = self.parse_base()?;
        while self.eat('[') {
            if !self.eat(']') {
                return Err(self.error("expected ']'"));
            }
            ty = GenericType::Array(Box::new(ty));
        }
        Ok(ty)
    }

    fn parse_base(&mut self) -> ConfigResult<GenericType> {
        if self.eat('?') {
            self.skip_whitespace();
            let position = self.position();
            if self.expression[position..].starts_with("extends") {
                self.identifier()?;
                let bound = self.parse()?;
                return Ok(GenericType::Wildcard(Some(Box::new(bound))));
            }
            return Ok(GenericType::Wildcard(None));
        }

        let name = self.identifier()?;
        if let Some(parameter) = self.type_params.iter().find(|p| &*p.name == name) {
            return Ok(GenericType::Var(parameter.clone()));
        }
        if boxed(name).is_some() {
            return Ok(GenericType::Primitive(ClassName::new(name)));
        }

        let mut args = Vec::new();
        if self.eat('<') {
            loop {
                args.push(self.parse()?);
                if self.eat(',') {
                    continue;
                }
                if self.eat('>') {
                    break;
                }
                return Err(self.error("expected ',' or '>'"));
            }
        }
        Ok(GenericType::Class {
            name: ClassName::new(name),
            args,
        })
    }

    fn position(&mut self) -> usize {
        self.chars
            .peek()
            .map(|(i, _)| *i)
            .unwrap_or(self.expression.len())
    }
}
