//! Expression tokenizer and recursive descent parser

use crate::core::{CalcError, CalcResult, Operation};
use std::fmt;

/// Deepest nesting of parentheses, brackets, calls and signs the parser accepts
pub const MAX_DEPTH: usize = 128;

/// Token types from lexical analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Constant or function name
    Ident(String),
    /// Binary operator
    Operator(Operation),
    /// Left parenthesis
    LeftParen,
    /// Right parenthesis
    RightParen,
    /// Left bracket (matrix literal)
    LeftBracket,
    /// Right bracket
    RightBracket,
    /// Argument or column separator
    Comma,
    /// Row separator
    Semicolon,
}

impl Token {
    /// Returns true if this token is an operator
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_))
    }

    /// Returns true if this token is a number
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Returns true if this token can begin an operand
    ///
    /// An operand token directly after another operand is read as an
    /// implicit multiplication (`2pi`, `3(4)`).
    #[must_use]
    pub const fn starts_operand(&self) -> bool {
        matches!(
            self,
            Self::Number(_) | Self::Ident(_) | Self::LeftParen | Self::LeftBracket
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Ident(name) => f.write_str(name),
            Self::Operator(op) => f.write_str(op.symbol()),
            Self::LeftParen => f.write_str("("),
            Self::RightParen => f.write_str(")"),
            Self::LeftBracket => f.write_str("["),
            Self::RightBracket => f.write_str("]"),
            Self::Comma => f.write_str(","),
            Self::Semicolon => f.write_str(";"),
        }
    }
}

/// Abstract Syntax Tree node
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Numeric literal
    Number(f64),
    /// Named constant (`pi`, `e`, `i`)
    Symbol(String),
    /// Function call
    Call {
        /// Function name
        name: String,
        /// Argument expressions
        args: Vec<AstNode>,
    },
    /// Bracketed matrix literal, one inner vector per `;`-separated row
    Matrix(Vec<Vec<AstNode>>),
    /// Binary operation
    BinaryOp {
        /// Left operand
        left: Box<AstNode>,
        /// Operator
        op: Operation,
        /// Right operand
        right: Box<AstNode>,
    },
    /// Unary negation
    Negate(Box<AstNode>),
}

impl AstNode {
    /// Creates a new number node
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates a new symbol node
    #[must_use]
    pub fn symbol(name: &str) -> Self {
        Self::Symbol(name.to_string())
    }

    /// Creates a new call node
    #[must_use]
    pub fn call(name: &str, args: Vec<AstNode>) -> Self {
        Self::Call {
            name: name.to_string(),
            args,
        }
    }

    /// Creates a new binary operation node
    #[must_use]
    pub fn binary(left: AstNode, op: Operation, right: AstNode) -> Self {
        Self::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a new negation node
    #[must_use]
    pub fn negate(inner: AstNode) -> Self {
        Self::Negate(Box::new(inner))
    }
}

/// Tokenizer for converting expression strings to tokens
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer for the given input
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Returns the remaining input
    #[must_use]
    pub fn remaining(&self) -> &str {
        &self.input[self.pos..]
    }

    /// Tokenizes the entire input
    pub fn tokenize(&mut self) -> CalcResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or None if at end of input
    pub fn next_token(&mut self) -> CalcResult<Option<Token>> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        let token = match ch {
            '0'..='9' | '.' => return self.read_number().map(Some),
            c if c.is_alphabetic() || c == '_' => return Ok(Some(self.read_identifier())),
            '+' => Token::Operator(Operation::Add),
            '-' => Token::Operator(Operation::Subtract),
            '*' => Token::Operator(Operation::Multiply),
            '/' => Token::Operator(Operation::Divide),
            '%' => Token::Operator(Operation::Modulo),
            '^' => Token::Operator(Operation::Power),
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            '[' => Token::LeftBracket,
            ']' => Token::RightBracket,
            ',' => Token::Comma,
            ';' => Token::Semicolon,
            _ => {
                return Err(CalcError::parse(format!("Unexpected character: '{ch}'")));
            }
        };
        self.advance();

        Ok(Some(token))
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn char_after(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self) -> CalcResult<Token> {
        let start = self.pos;
        let mut has_dot = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                self.advance();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        // Exponent only when a digit follows: `2e3` is 2000, `2e` is 2 * e
        if matches!(self.current_char(), Some('e' | 'E')) {
            let digit_at = match self.char_after(1) {
                Some('+' | '-') => 2,
                _ => 1,
            };
            if self.char_after(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..digit_at {
                    self.advance();
                }
                while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
            }
        }

        let num_str = &self.input[start..self.pos];
        let value: f64 = num_str
            .parse()
            .map_err(|_| CalcError::parse(format!("Invalid number: '{num_str}'")))?;

        Ok(Token::Number(value))
    }

    fn read_identifier(&mut self) -> Token {
        let start = self.pos;
        while self
            .current_char()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.advance();
        }
        Token::Ident(self.input[start..self.pos].to_string())
    }
}

/// Recursive descent parser for expressions
///
/// Grammar:
/// ```text
/// expression ::= term (('+' | '-') term)*
/// term       ::= unary (('*' | '/' | '%') unary | power)*   // bare power: implicit '*'
/// unary      ::= ('-' | '+') unary | power
/// power      ::= primary ('^' unary)?                       // Right associative
/// primary    ::= NUMBER | IDENT | IDENT '(' args ')' | '(' expression ')' | '[' rows ']'
/// rows       ::= row (';' row)*
/// row        ::= expression (',' expression)*
/// ```
///
/// Every nesting level passes through `unary`, which is where
/// [`MAX_DEPTH`] is enforced.
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    /// Creates a new parser from tokens
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Parses a string expression into an AST
    pub fn parse_str(input: &str) -> CalcResult<AstNode> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        let mut tokenizer = Tokenizer::new(trimmed);
        let tokens = tokenizer.tokenize()?;

        let mut parser = Self::new(tokens);
        parser.parse()
    }

    /// Parses tokens into an AST, requiring every token to be consumed
    pub fn parse(&mut self) -> CalcResult<AstNode> {
        if self.tokens.is_empty() {
            return Err(CalcError::EmptyExpression);
        }
        let ast = self.parse_expression()?;

        if let Some(token) = self.current() {
            return Err(CalcError::parse(format!(
                "Unexpected '{token}' at position {}",
                self.pos
            )));
        }

        Ok(ast)
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: &Token, context: &str) -> CalcResult<()> {
        match self.advance() {
            Some(t) if t == expected => Ok(()),
            Some(t) => Err(CalcError::parse(format!(
                "Expected '{expected}' {context} but found '{t}'"
            ))),
            None => Err(CalcError::parse(format!("Unclosed {context}"))),
        }
    }

    fn parse_expression(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_term()?;

        while let Some(token) = self.current() {
            let op = match token {
                Token::Operator(Operation::Add) => Operation::Add,
                Token::Operator(Operation::Subtract) => Operation::Subtract,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_unary()?;

        while let Some(token) = self.current() {
            if token.starts_operand() {
                let right = self.parse_power()?;
                left = AstNode::binary(left, Operation::Multiply, right);
                continue;
            }
            let op = match token {
                Token::Operator(Operation::Multiply) => Operation::Multiply,
                Token::Operator(Operation::Divide) => Operation::Divide,
                Token::Operator(Operation::Modulo) => Operation::Modulo,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> CalcResult<AstNode> {
        if self.depth >= MAX_DEPTH {
            return Err(CalcError::parse("Expression nested too deeply"));
        }
        self.depth += 1;
        let node = self.parse_signed();
        self.depth -= 1;
        node
    }

    fn parse_signed(&mut self) -> CalcResult<AstNode> {
        match self.current() {
            Some(Token::Operator(Operation::Subtract)) => {
                self.advance();
                Ok(AstNode::negate(self.parse_unary()?))
            }
            Some(Token::Operator(Operation::Add)) => {
                self.advance();
                self.parse_unary()
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> CalcResult<AstNode> {
        let base = self.parse_primary()?;

        if matches!(self.current(), Some(Token::Operator(Operation::Power))) {
            self.advance();
            // Unary allowed in the exponent: 2^-1
            let exponent = self.parse_unary()?;
            return Ok(AstNode::binary(base, Operation::Power, exponent));
        }

        Ok(base)
    }

    fn parse_primary(&mut self) -> CalcResult<AstNode> {
        let token = self
            .advance()
            .cloned()
            .ok_or_else(|| CalcError::parse("Unexpected end of expression"))?;

        match token {
            Token::Number(n) => Ok(AstNode::number(n)),
            Token::Ident(name) => {
                if matches!(self.current(), Some(Token::LeftParen)) {
                    self.advance();
                    let args = self.parse_arguments()?;
                    return Ok(AstNode::call(&name, args));
                }
                Ok(AstNode::Symbol(name))
            }
            Token::LeftParen => {
                let expr = self.parse_expression()?;
                self.expect(&Token::RightParen, "parenthesis")?;
                Ok(expr)
            }
            Token::LeftBracket => self.parse_matrix(),
            other => Err(CalcError::parse(format!("Unexpected '{other}'"))),
        }
    }

    fn parse_arguments(&mut self) -> CalcResult<Vec<AstNode>> {
        let mut args = Vec::new();
        if matches!(self.current(), Some(Token::RightParen)) {
            self.advance();
            return Ok(args);
        }
        loop {
            args.push(self.parse_expression()?);
            match self.advance() {
                Some(Token::Comma) => {}
                Some(Token::RightParen) => return Ok(args),
                Some(t) => {
                    return Err(CalcError::parse(format!(
                        "Expected ',' or ')' in argument list but found '{t}'"
                    )))
                }
                None => return Err(CalcError::parse("Unclosed argument list")),
            }
        }
    }

    fn parse_matrix(&mut self) -> CalcResult<AstNode> {
        let mut rows = Vec::new();
        let mut row = Vec::new();
        if matches!(self.current(), Some(Token::RightBracket)) {
            return Err(CalcError::parse("Empty matrix"));
        }
        loop {
            row.push(self.parse_expression()?);
            match self.advance() {
                Some(Token::Comma) => {}
                Some(Token::Semicolon) => rows.push(std::mem::take(&mut row)),
                Some(Token::RightBracket) => {
                    rows.push(row);
                    return Ok(AstNode::Matrix(rows));
                }
                Some(t) => {
                    return Err(CalcError::parse(format!(
                        "Expected ',', ';' or ']' in matrix but found '{t}'"
                    )))
                }
                None => return Err(CalcError::parse("Unclosed bracket")),
            }
        }
    }
}
