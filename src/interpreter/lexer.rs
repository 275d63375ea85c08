use std::{
    fmt,
    iter::FusedIterator,
    ops::Range,
    sync::mpsc::{self, Receiver, SyncSender},
    thread,
};

use log::debug;

/// The kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A lexical error; the token text holds the message.
    Error,
    /// End of input.
    Eof,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// The name right after `(`.
    Call,
    /// Integer literal, such as `42`, `-7` or `0x1F`.
    Number,
    /// Quoted string literal, delimiters and escapes kept as written.
    String,
    /// A bare word outside call position.
    Variable,
    /// The reserved word `define` in call position.
    Define,
    /// A bare word starting with `#`, such as `#t`.
    Bool,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Error => "ERROR",
            Self::Eof => "EOF",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::Call => "call",
            Self::Number => "number",
            Self::String => "string",
            Self::Variable => "variable",
            Self::Define => "define",
            Self::Bool => "bool",
        };
        write!(f, "{name}")
    }
}

/// A lexical token in the source input.
///
/// Tokens are produced in source order and never change afterwards. `span`
/// is the byte range the token covers and `line` is the 1-based line of its
/// first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What the token is.
    pub kind: TokenKind,
    /// The source text of the token, or the message for `Error` tokens.
    pub text: String,
    /// Byte range in the source.
    pub span: Range<usize>,
    /// Line of the first character.
    pub line: usize,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}", self.kind, self.text)
    }
}

/// One state of the scanner: does some work and returns the next state, or
/// `None` to stop.
struct StateFn(fn(&mut Lexer<'_>) -> Option<StateFn>);

/// Scanner state shared by the state functions.
struct Lexer<'a> {
    input:      &'a str,
    start:      usize,
    pos:        usize,
    width:      usize,
    line:       usize,
    start_line: usize,
    sink:       SyncSender<Token>,
    closed:     bool,
}

impl<'a> Lexer<'a> {
    const fn new(input: &'a str, sink: SyncSender<Token>) -> Self {
        Self { input,
               start: 0,
               pos: 0,
               width: 0,
               line: 1,
               start_line: 1,
               sink,
               closed: false }
    }

    /// Drives the state machine until a state returns `None` or the
    /// consumer hangs up.
    fn run(&mut self) {
        let mut state = Some(StateFn(lex_code));
        while let Some(StateFn(step)) = state {
            if self.closed {
                break;
            }
            state = step(self);
        }
    }

    /// Consumes and returns the next rune, or `None` at end of input.
    fn next(&mut self) -> Option<char> {
        let Some(c) = self.input[self.pos..].chars().next() else {
            self.width = 0;
            return None;
        };
        self.width = c.len_utf8();
        self.pos += self.width;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    /// Returns the next rune without consuming it.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Steps back over the rune returned by the last `next`. Does nothing if
    /// that call hit the end of input.
    fn backup(&mut self) {
        self.pos -= self.width;
        if self.width > 0 && self.input[self.pos..].starts_with('\n') {
            self.line -= 1;
        }
        self.width = 0;
    }

    /// Skips the pending text.
    const fn ignore(&mut self) {
        self.start = self.pos;
        self.start_line = self.line;
    }

    /// Consumes the next rune if it is in `valid`.
    fn accept(&mut self, valid: &str) -> bool {
        match self.next() {
            Some(c) if valid.contains(c) => true,
            _ => {
                self.backup();
                false
            },
        }
    }

    /// Consumes a run of runes from `valid`.
    fn accept_run(&mut self, valid: &str) {
        while self.next().is_some_and(|c| valid.contains(c)) {}
        self.backup();
    }

    /// The text scanned since the last emitted or ignored token.
    fn current(&self) -> &'a str {
        &self.input[self.start..self.pos]
    }

    fn send(&mut self, token: Token) {
        if self.sink.send(token).is_err() {
            debug!("token receiver dropped, stopping the lexer");
            self.closed = true;
        }
    }

    /// Sends the pending text as a token of the given kind.
    fn emit(&mut self, kind: TokenKind) {
        let token = Token { kind,
                            text: self.current().to_string(),
                            span: self.start..self.pos,
                            line: self.start_line };
        self.send(token);
        self.ignore();
    }

    /// Sends an error token and stops the state machine.
    fn errorf(&mut self, message: impl Into<String>) -> Option<StateFn> {
        let token = Token { kind: TokenKind::Error,
                            text: message.into(),
                            span: self.start..self.pos,
                            line: self.start_line };
        self.send(token);
        None
    }

    /// Scans an optionally signed decimal or hex integer. Returns `false` if
    /// the digits run straight into a letter, a digit of another base or `_`.
    fn scan_number(&mut self) -> bool {
        self.accept("+-");
        let mut digits = "0123456789";
        if self.accept("0") && self.accept("xX") {
            digits = "0123456789abcdefABCDEF";
        }
        self.accept_run(digits);
        if self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.next();
            return false;
        }
        true
    }
}

const fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Ends a name: whitespace or a closing parenthesis.
const fn ends_name(c: char) -> bool {
    is_space(c) || c == ')'
}

/// Top-level state: between tokens.
fn lex_code(l: &mut Lexer<'_>) -> Option<StateFn> {
    match l.next() {
        None => {
            l.emit(TokenKind::Eof);
            None
        },
        Some(c) if is_space(c) => {
            l.ignore();
            Some(StateFn(lex_code))
        },
        Some('+' | '-') => {
            let signed_number = l.peek().is_some_and(|c| c.is_ascii_digit());
            l.backup();
            if signed_number {
                Some(StateFn(lex_number))
            } else {
                Some(StateFn(lex_variable))
            }
        },
        Some(c) if c.is_ascii_digit() => {
            l.backup();
            Some(StateFn(lex_number))
        },
        Some('(') => {
            l.emit(TokenKind::LeftParen);
            Some(StateFn(lex_call))
        },
        Some(')') => {
            l.emit(TokenKind::RightParen);
            Some(StateFn(lex_code))
        },
        Some('"' | '\'') => {
            l.backup();
            Some(StateFn(lex_string))
        },
        Some(_) => {
            l.backup();
            Some(StateFn(lex_variable))
        },
    }
}

/// Call state: the name right after `(`.
fn lex_call(l: &mut Lexer<'_>) -> Option<StateFn> {
    while l.peek().is_some_and(is_space) {
        l.next();
    }
    l.ignore();

    if let Some(rest) = l.input[l.pos..].strip_prefix("define")
       && rest.chars().next().is_none_or(|c| ends_name(c) || c == '(')
    {
        for _ in 0.."define".len() {
            l.next();
        }
        l.emit(TokenKind::Define);
        return Some(StateFn(lex_code));
    }

    loop {
        match l.next() {
            None => return l.errorf("eof not expected inside a method call"),
            Some(c) if ends_name(c) => {
                l.backup();
                break;
            },
            Some(_) => {},
        }
    }

    if l.start == l.pos {
        return l.errorf("illegal function name");
    }
    l.emit(TokenKind::Call);
    Some(StateFn(lex_code))
}

fn lex_number(l: &mut Lexer<'_>) -> Option<StateFn> {
    if !l.scan_number() {
        let message = format!("bad number syntax: {}", l.current());
        return l.errorf(message);
    }
    l.emit(TokenKind::Number);
    Some(StateFn(lex_code))
}

/// A quoted string. Escapes are left for the parser, but the rune after a
/// backslash never closes the literal.
fn lex_string(l: &mut Lexer<'_>) -> Option<StateFn> {
    let delimiter = l.next();
    loop {
        match l.next() {
            None => return l.errorf("eof not expected inside a string"),
            Some('\\') => {
                if l.next().is_none() {
                    return l.errorf("eof not expected inside a string");
                }
            },
            c if c == delimiter => break,
            Some(_) => {},
        }
    }
    l.emit(TokenKind::String);
    Some(StateFn(lex_code))
}

/// A bare word outside call position. Words starting with `#` are booleans.
fn lex_variable(l: &mut Lexer<'_>) -> Option<StateFn> {
    loop {
        match l.next() {
            None => break,
            Some(c) if ends_name(c) => {
                l.backup();
                break;
            },
            Some(_) => {},
        }
    }

    if l.current().starts_with('#') {
        l.emit(TokenKind::Bool);
    } else {
        l.emit(TokenKind::Variable);
    }
    Some(StateFn(lex_code))
}

/// The consumer end of a running lexer.
///
/// Yields tokens as the lexer thread produces them and stops after the first
/// `Eof` or `Error` token. Dropping the stream early makes the lexer thread's
/// next send fail, which ends the thread.
#[derive(Debug)]
pub struct TokenStream {
    receiver: Receiver<Token>,
    done:     bool,
}

impl Iterator for TokenStream {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        let Ok(token) = self.receiver.recv() else {
            self.done = true;
            return None;
        };
        if matches!(token.kind, TokenKind::Eof | TokenKind::Error) {
            self.done = true;
        }
        Some(token)
    }
}

impl FusedIterator for TokenStream {}

/// Starts lexing `source` on a dedicated `lexer` thread.
///
/// Tokens are handed over one at a time through a rendezvous channel, so the
/// lexer never runs more than one token ahead of the consumer.
///
/// # Errors
/// Returns an error if the thread cannot be spawned.
///
/// # Example
/// ```
/// use water::interpreter::lexer::{TokenKind, lex};
///
/// let kinds: Vec<TokenKind> = lex("(+ 1 x)").unwrap().map(|token| token.kind).collect();
/// assert_eq!(kinds,
///            [TokenKind::LeftParen,
///             TokenKind::Call,
///             TokenKind::Number,
///             TokenKind::Variable,
///             TokenKind::RightParen,
///             TokenKind::Eof]);
/// ```
pub fn lex(source: impl Into<String>) -> std::io::Result<TokenStream> {
    let source = source.into();
    let (sender, receiver) = mpsc::sync_channel(0);

    thread::Builder::new().name("lexer".into())
                          .spawn(move || {
                              debug!("lexing {} bytes", source.len());
                              Lexer::new(&source, sender).run();
                              debug!("lexer finished");
                          })?;

    Ok(TokenStream { receiver, done: false })
}

/// Lexes `source` to completion and collects every token, the final `Eof` or
/// `Error` included.
///
/// # Errors
/// Returns an error if the lexer thread cannot be spawned.
pub fn tokenize(source: impl Into<String>) -> std::io::Result<Vec<Token>> {
    Ok(lex(source)?.collect())
}
