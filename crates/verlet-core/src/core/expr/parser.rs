//! Hand-rolled lexer and recursive-descent parser for potential expressions.
//!
//! Grammar (usual precedence, exponentiation right-associative):
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := unary (('*' | '/') unary)*
//! unary      := ('-' | '+') unary | power
//! power      := atom (('**' | '^') unary)?
//! atom       := number | identifier | identifier '(' expression ')' | '(' expression ')'
//! ```
//!
//! Identifiers resolve, in order, to a declared variable, a known function
//! (function position only), or the named constants `pi` and `e`; anything
//! else is rejected at parse time so a stale or misspelled variable can never
//! silently evaluate to zero.

use super::{Expr, ExpressionError, Function};

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ExpressionError> {
    let chars: Vec<(usize, char)> = source.char_indices().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (pos, c) = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '+' => {
                tokens.push((Token::Plus, pos));
                i += 1;
            }
            '-' => {
                tokens.push((Token::Minus, pos));
                i += 1;
            }
            '*' => {
                if matches!(chars.get(i + 1), Some((_, '*'))) {
                    tokens.push((Token::Caret, pos));
                    i += 2;
                } else {
                    tokens.push((Token::Star, pos));
                    i += 1;
                }
            }
            '/' => {
                tokens.push((Token::Slash, pos));
                i += 1;
            }
            '^' => {
                tokens.push((Token::Caret, pos));
                i += 1;
            }
            '(' => {
                tokens.push((Token::LParen, pos));
                i += 1;
            }
            ')' => {
                tokens.push((Token::RParen, pos));
                i += 1;
            }
            '0'..='9' | '.' => {
                while i < chars.len() && (chars[i].1.is_ascii_digit() || chars[i].1 == '.') {
                    i += 1;
                }
                // Exponent suffix only when actually followed by digits, so
                // that `x*e` keeps `e` as the Euler constant.
                if i < chars.len() && matches!(chars[i].1, 'e' | 'E') {
                    let mut j = i + 1;
                    if j < chars.len() && matches!(chars[j].1, '+' | '-') {
                        j += 1;
                    }
                    if j < chars.len() && chars[j].1.is_ascii_digit() {
                        i = j;
                        while i < chars.len() && chars[i].1.is_ascii_digit() {
                            i += 1;
                        }
                    }
                }
                let end = chars.get(i).map_or(source.len(), |(p, _)| *p);
                let value: f64 = source[pos..end]
                    .parse()
                    .map_err(|_| ExpressionError::MalformedNumber { position: pos })?;
                tokens.push((Token::Number(value), pos));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                while i < chars.len()
                    && (chars[i].1.is_ascii_alphanumeric() || chars[i].1 == '_')
                {
                    i += 1;
                }
                let end = chars.get(i).map_or(source.len(), |(p, _)| *p);
                tokens.push((Token::Ident(source[pos..end].to_string()), pos));
            }
            _ => return Err(ExpressionError::UnexpectedCharacter { found: c, position: pos }),
        }
    }

    Ok(tokens)
}

struct Parser<'a> {
    tokens: Vec<(Token, usize)>,
    index: usize,
    variables: &'a [&'a str],
}

/// Parses `source` as an algebraic expression in the declared `variables`.
pub fn parse(source: &str, variables: &[&str]) -> Result<Expr, ExpressionError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        tokens,
        index: 0,
        variables,
    };
    let expr = parser.expression()?;
    if let Some(&(_, position)) = parser.current() {
        return Err(ExpressionError::TrailingInput { position });
    }
    Ok(expr)
}

impl Parser<'_> {
    fn current(&self) -> Option<&(Token, usize)> {
        self.tokens.get(self.index)
    }

    fn peek(&self) -> Option<&Token> {
        self.current().map(|(token, _)| token)
    }

    fn advance(&mut self) -> Option<(Token, usize)> {
        let entry = self.tokens.get(self.index).cloned();
        if entry.is_some() {
            self.index += 1;
        }
        entry
    }

    fn expect_rparen(&mut self) -> Result<(), ExpressionError> {
        match self.advance() {
            Some((Token::RParen, _)) => Ok(()),
            Some((_, position)) => Err(ExpressionError::UnexpectedToken { position }),
            None => Err(ExpressionError::UnexpectedEnd),
        }
    }

    fn expression(&mut self) -> Result<Expr, ExpressionError> {
        let mut lhs = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.advance();
                    let rhs = self.term()?;
                    lhs = Expr::Add(Box::new(lhs), Box::new(rhs));
                }
                Some(Token::Minus) => {
                    self.advance();
                    let rhs = self.term()?;
                    lhs = Expr::Sub(Box::new(lhs), Box::new(rhs));
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn term(&mut self) -> Result<Expr, ExpressionError> {
        let mut lhs = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.advance();
                    let rhs = self.unary()?;
                    lhs = Expr::Mul(Box::new(lhs), Box::new(rhs));
                }
                Some(Token::Slash) => {
                    self.advance();
                    let rhs = self.unary()?;
                    lhs = Expr::Div(Box::new(lhs), Box::new(rhs));
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn unary(&mut self) -> Result<Expr, ExpressionError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.advance();
                Ok(Expr::Neg(Box::new(self.unary()?)))
            }
            Some(Token::Plus) => {
                self.advance();
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Expr, ExpressionError> {
        let base = self.atom()?;
        if matches!(self.peek(), Some(Token::Caret)) {
            self.advance();
            // Recursing through `unary` makes `**` right-associative and
            // allows negative exponents without parentheses.
            let exponent = self.unary()?;
            return Ok(Expr::Pow(Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Expr, ExpressionError> {
        match self.advance() {
            Some((Token::Number(value), _)) => Ok(Expr::Constant(value)),
            Some((Token::Ident(name), _)) => {
                if matches!(self.peek(), Some(Token::LParen)) {
                    let function = Function::from_name(&name)
                        .ok_or(ExpressionError::UnknownIdentifier { name })?;
                    self.advance();
                    let argument = self.expression()?;
                    self.expect_rparen()?;
                    return Ok(Expr::Func(function, Box::new(argument)));
                }
                if let Some(index) = self.variables.iter().position(|v| *v == name) {
                    return Ok(Expr::Variable(index));
                }
                match name.as_str() {
                    "pi" => Ok(Expr::Constant(std::f64::consts::PI)),
                    "e" => Ok(Expr::Constant(std::f64::consts::E)),
                    _ => Err(ExpressionError::UnknownIdentifier { name }),
                }
            }
            Some((Token::LParen, _)) => {
                let inner = self.expression()?;
                self.expect_rparen()?;
                Ok(inner)
            }
            Some((_, position)) => Err(ExpressionError::UnexpectedToken { position }),
            None => Err(ExpressionError::UnexpectedEnd),
        }
    }
}
