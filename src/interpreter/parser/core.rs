use log::debug;

use crate::{
    ast::Node,
    error::{Error, FatalError, LexError, ParseError},
    interpreter::lexer::{Token, TokenKind},
    util::stack::guarded,
};

/// How deeply expressions may nest inside one another.
pub const MAX_NESTING_DEPTH: usize = 2_000;

/// Parsing can fail with a lexical, a syntax or a fatal error, so the parser
/// reports the crate-wide error type.
pub type ParseResult<T> = Result<T, Error>;

/// A recursive-descent parser over a token stream.
///
/// Pulls tokens on demand and keeps at most one token of look-ahead. A token
/// taken with [`Parser::next`] can be handed back once with
/// [`Parser::backup`].
#[derive(Debug)]
pub struct Parser<I> {
    tokens:    I,
    lookahead: Option<Token>,
    depth:     usize,
}

impl<I> Parser<I> where I: Iterator<Item = Token>
{
    /// Creates a parser reading from `tokens`.
    pub const fn new(tokens: I) -> Self {
        Self { tokens,
               lookahead: None,
               depth: 0 }
    }

    /// Pulls a token from the stream.
    ///
    /// An `Error` token becomes a [`LexError`]. A stream that ends without
    /// `EOF` means the lexer went away, which is fatal.
    fn pull(&mut self) -> ParseResult<Token> {
        match self.tokens.next() {
            Some(Token { kind: TokenKind::Error,
                         text,
                         line,
                         .. }) => Err(LexError { message: text, line }.into()),
            Some(token) => Ok(token),
            None => Err(FatalError::TokenStreamClosed.into()),
        }
    }

    /// Consumes and returns the next token.
    ///
    /// # Errors
    /// Returns an error if the lexer reported one or the stream closed early.
    pub fn next(&mut self) -> ParseResult<Token> {
        match self.lookahead.take() {
            Some(token) => Ok(token),
            None => self.pull(),
        }
    }

    /// Returns the next token without consuming it.
    ///
    /// # Errors
    /// Returns an error if the lexer reported one or the stream closed early.
    pub fn peek(&mut self) -> ParseResult<&Token> {
        let token = match self.lookahead.take() {
            Some(token) => token,
            None => self.pull()?,
        };
        Ok(self.lookahead.insert(token))
    }

    /// Hands a consumed token back to the stream. Only one token can be
    /// pending at a time.
    pub fn backup(&mut self, token: Token) {
        debug_assert!(self.lookahead.is_none(), "parser backup slot already taken");
        self.lookahead = Some(token);
    }

    /// Consumes the next token and checks its kind.
    ///
    /// # Parameters
    /// - `kind`: The token kind required here.
    /// - `context`: The construct being parsed, used in the error message.
    ///
    /// # Errors
    /// Returns `ParseError::UnexpectedToken` naming both the expected and the
    /// found token.
    pub fn expect(&mut self, kind: TokenKind, context: &'static str) -> ParseResult<Token> {
        let token = self.next()?;
        if token.kind != kind {
            return Err(unexpected(kind, context, &token));
        }
        Ok(token)
    }

    /// Parses a whole program: every expression up to `EOF`.
    ///
    /// Grammar: `program := expression* EOF`
    ///
    /// # Returns
    /// A `Node::List` holding the top-level expressions.
    ///
    /// # Errors
    /// Returns the first lexical, syntax or fatal error; nothing parsed so
    /// far is kept.
    pub fn parse_program(&mut self) -> ParseResult<Node> {
        let mut children = Vec::new();
        while self.peek()?.kind != TokenKind::Eof {
            children.push(self.parse_expression()?);
        }
        debug!("parsed {} top-level expressions", children.len());

        Ok(Node::List { children })
    }

    /// Parses one expression.
    ///
    /// Grammar: `expression := number | string | bool | var | '(' call ')'`
    ///
    /// # Errors
    /// Returns `ParseError::NotAnExpression` for tokens that cannot start an
    /// expression, such as a stray `)` or `EOF`, and `ParseError::TooDeep`
    /// past [`MAX_NESTING_DEPTH`] levels of nesting.
    pub fn parse_expression(&mut self) -> ParseResult<Node> {
        if self.depth >= MAX_NESTING_DEPTH {
            let line = self.peek()?.line;
            return Err(ParseError::TooDeep { limit: MAX_NESTING_DEPTH,
                                             line }.into());
        }

        self.depth += 1;
        let node = guarded(|| self.parse_expression_inner());
        self.depth -= 1;
        node
    }

    fn parse_expression_inner(&mut self) -> ParseResult<Node> {
        match self.peek()?.kind {
            TokenKind::LeftParen => self.parse_call(),
            TokenKind::Number => self.parse_number(),
            TokenKind::String => self.parse_string(),
            TokenKind::Bool => self.parse_bool(),
            TokenKind::Variable => self.parse_variable(),
            _ => {
                let token = self.next()?;
                Err(ParseError::NotAnExpression { found: token.to_string(),
                                                  line:  token.line, }.into())
            },
        }
    }
}

/// Builds the error for a token of the wrong kind.
pub(in crate::interpreter::parser) fn unexpected(expected: TokenKind,
                                                 context: &'static str,
                                                 found: &Token)
                                                 -> Error {
    ParseError::UnexpectedToken { expected,
                                  context,
                                  found: found.to_string(),
                                  line: found.line }.into()
}

/// Parses a token stream into a program tree.
///
/// # Errors
/// Returns the first lexical, syntax or fatal error.
pub fn parse_program<I>(tokens: I) -> ParseResult<Node>
    where I: Iterator<Item = Token>
{
    Parser::new(tokens).parse_program()
}
