use std::rc::Rc;

use crate::{
    ast::{Call, Node},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{ParseResult, Parser, unexpected},
    },
};

impl<I> Parser<I> where I: Iterator<Item = Token>
{
    /// Parses a parenthesised call, dispatching on its head.
    ///
    /// Grammar:
    /// ```text
    /// call := 'define' var expression
    ///       | 'set' var expression
    ///       | 'if' expression expression expression
    ///       | 'begin' expression+
    ///       | 'lambda' '(' name* ')' '(' call ')'
    ///       | IDENT expression*
    /// ```
    ///
    /// # Errors
    /// Returns a `ParseError` if the head is not a name or a reserved form is
    /// malformed.
    pub fn parse_call(&mut self) -> ParseResult<Node> {
        self.expect(TokenKind::LeftParen, "call")?;
        let head = self.next()?;

        match head.kind {
            TokenKind::Define => self.parse_define(),
            TokenKind::Call => match head.text.as_str() {
                "set" => self.parse_set(),
                "if" => self.parse_if(),
                "begin" => self.parse_begin(&head),
                "lambda" => self.parse_lambda(&head),
                _ => {
                    let args = self.parse_until_close("call")?;
                    Ok(Node::Call(Call { name: head.text,
                                         args }))
                },
            },
            _ => Err(unexpected(TokenKind::Call, "call", &head)),
        }
    }

    /// `(define name value)`, positioned after `define`.
    fn parse_define(&mut self) -> ParseResult<Node> {
        let name = self.expect(TokenKind::Variable, "define")?.text;
        let value = Box::new(self.parse_expression()?);
        self.expect(TokenKind::RightParen, "define")?;

        Ok(Node::Define { name, value })
    }

    /// `(set name value)`, positioned after `set`.
    fn parse_set(&mut self) -> ParseResult<Node> {
        let name = self.expect(TokenKind::Variable, "set")?.text;
        let value = Box::new(self.parse_expression()?);
        self.expect(TokenKind::RightParen, "set")?;

        Ok(Node::Set { name, value })
    }

    /// `(if test conseq alt)`, positioned after `if`. All three parts are
    /// required.
    fn parse_if(&mut self) -> ParseResult<Node> {
        let test = Box::new(self.parse_expression()?);
        let conseq = Box::new(self.parse_expression()?);
        let alt = Box::new(self.parse_expression()?);
        self.expect(TokenKind::RightParen, "if")?;

        Ok(Node::If { test, conseq, alt })
    }

    fn parse_begin(&mut self, head: &Token) -> ParseResult<Node> {
        let body = self.parse_until_close("begin")?;
        if body.is_empty() {
            return Err(ParseError::EmptyBegin { line: head.line }.into());
        }

        Ok(Node::Begin { body })
    }

    /// `(lambda (params...) (body))`, positioned after `lambda`.
    ///
    /// Inside the parameter list the lexer is in call position, so the first
    /// name arrives as a `Call` token and the rest as `Variable` tokens.
    fn parse_lambda(&mut self, head: &Token) -> ParseResult<Node> {
        self.expect(TokenKind::LeftParen, "lambda")?;

        let mut params = Vec::new();
        loop {
            let token = self.next()?;
            match token.kind {
                TokenKind::Call | TokenKind::Variable => params.push(token.text),
                TokenKind::RightParen => break,
                _ => return Err(unexpected(TokenKind::Variable, "lambda parameters", &token)),
            }
        }

        if self.peek()?.kind != TokenKind::LeftParen {
            return Err(ParseError::LambdaBody { line: head.line }.into());
        }
        let Node::Call(body) = self.parse_call()? else {
            return Err(ParseError::LambdaBody { line: head.line }.into());
        };
        self.expect(TokenKind::RightParen, "lambda")?;

        Ok(Node::Lambda { params,
                          body: Rc::new(body) })
    }

    /// Parses expressions up to and including the closing `)`.
    ///
    /// # Parameters
    /// - `context`: The construct being parsed, used if the input ends first.
    ///
    /// # Errors
    /// Returns `ParseError::UnexpectedToken` if `EOF` shows up before `)`.
    fn parse_until_close(&mut self, context: &'static str) -> ParseResult<Vec<Node>> {
        let mut nodes = Vec::new();
        loop {
            let token = self.next()?;
            match token.kind {
                TokenKind::RightParen => return Ok(nodes),
                TokenKind::Eof => return Err(unexpected(TokenKind::RightParen, context, &token)),
                _ => {
                    self.backup(token);
                    nodes.push(self.parse_expression()?);
                },
            }
        }
    }
}
