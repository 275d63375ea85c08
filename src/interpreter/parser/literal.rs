use std::str::Chars;

use crate::{
    ast::{Node, NumberLiteral},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{ParseResult, Parser},
    },
};

impl<I> Parser<I> where I: Iterator<Item = Token>
{
    /// Parses an integer literal.
    ///
    /// # Errors
    /// Returns `ParseError::IllegalNumber` if the signed and unsigned readings
    /// fail or disagree, e.g. for `18446744073709551615` or a bare `0x`.
    pub(in crate::interpreter::parser) fn parse_number(&mut self) -> ParseResult<Node> {
        let token = self.expect(TokenKind::Number, "number")?;
        let Some(literal) = NumberLiteral::parse(&token.text) else {
            return Err(ParseError::IllegalNumber { text: token.text,
                                                   line: token.line, }.into());
        };

        Ok(Node::Number(literal))
    }

    /// Parses a quoted string, resolving its escape sequences.
    ///
    /// # Errors
    /// Returns `ParseError::BadString` for unknown or truncated escapes.
    pub(in crate::interpreter::parser) fn parse_string(&mut self) -> ParseResult<Node> {
        let token = self.expect(TokenKind::String, "string")?;
        match unquote(&token.text) {
            Ok(text) => Ok(Node::Str { text }),
            Err(reason) => Err(ParseError::BadString { text: token.text,
                                                       reason,
                                                       line: token.line }.into()),
        }
    }

    /// Parses `#t` or `#f`.
    ///
    /// # Errors
    /// Returns `ParseError::BadBool` for any other `#` word.
    pub(in crate::interpreter::parser) fn parse_bool(&mut self) -> ParseResult<Node> {
        let token = self.expect(TokenKind::Bool, "bool")?;
        match token.text.as_str() {
            "#t" => Ok(Node::Bool { value: true }),
            "#f" => Ok(Node::Bool { value: false }),
            _ => Err(ParseError::BadBool { text: token.text,
                                           line: token.line, }.into()),
        }
    }

    pub(in crate::interpreter::parser) fn parse_variable(&mut self) -> ParseResult<Node> {
        let token = self.expect(TokenKind::Variable, "variable")?;

        Ok(Node::Var { name: token.text })
    }
}

/// Strips the delimiters from a string literal and resolves its escapes.
///
/// Supported escapes: `\a \b \f \n \r \t \v \\`, the escaped delimiter
/// (`\"` or `\'`), octal `\NNN`, `\xHH`, `\uHHHH`, `\UHHHHHHHH` and
/// `\u{H...}`. Octal and `\x` escapes must stay within ASCII, since a lone
/// byte above `0x7f` is not valid text.
///
/// # Parameters
/// - `literal`: The literal as lexed, delimiters included.
///
/// # Returns
/// - `Ok(String)`: The unquoted contents.
/// - `Err(String)`: Why the literal cannot be unquoted.
///
/// # Example
/// ```
/// use water::interpreter::parser::literal::unquote;
///
/// assert_eq!(unquote(r#""a\tb""#).unwrap(), "a\tb");
/// assert_eq!(unquote(r"'it\'s'").unwrap(), "it's");
/// assert_eq!(unquote(r#""\101\x42C""#).unwrap(), "ABC");
/// assert!(unquote(r#""\q""#).is_err());
/// ```
pub fn unquote(literal: &str) -> Result<String, String> {
    let mut chars = literal.chars();
    let (Some(quote), Some(close)) = (chars.next(), chars.next_back()) else {
        return Err("missing delimiters".to_string());
    };
    if quote != close || !matches!(quote, '"' | '\'') {
        return Err("mismatched delimiters".to_string());
    }

    let mut text = String::with_capacity(literal.len());
    while let Some(c) = chars.next() {
        match c {
            '\\' => text.push(unescape(&mut chars, quote)?),
            c if c == quote => return Err(format!("unescaped {quote} inside the literal")),
            c => text.push(c),
        }
    }

    Ok(text)
}

/// Resolves one escape sequence, positioned right after the backslash.
fn unescape(chars: &mut Chars<'_>, quote: char) -> Result<char, String> {
    let Some(c) = chars.next() else {
        return Err("trailing backslash".to_string());
    };
    let escaped = match c {
        'a' => '\u{7}',
        'b' => '\u{8}',
        'f' => '\u{c}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\u{b}',
        '\\' => '\\',
        '"' | '\'' if c == quote => c,
        '0'..='7' => {
            let rest = read_digits(chars, 2, 8).ok_or("octal escape needs three digits")?;
            ascii_byte(c.to_digit(8).unwrap_or_default() * 64 + rest, "octal")?
        },
        'x' => ascii_byte(read_digits(chars, 2, 16).ok_or("\\x escape needs two hex digits")?, "\\x")?,
        'u' if chars.as_str().starts_with('{') => {
            chars.next();
            let rest = chars.as_str();
            let Some(end) = rest.find('}') else {
                return Err("unterminated \\u{...} escape".to_string());
            };
            let digits = &rest[..end];
            *chars = rest[end + 1..].chars();
            code_point(u32::from_str_radix(digits, 16).ok())?
        },
        'u' => code_point(read_digits(chars, 4, 16))?,
        'U' => code_point(read_digits(chars, 8, 16))?,
        other => return Err(format!("unknown escape sequence \\{other}")),
    };

    Ok(escaped)
}

/// Consumes exactly `count` digits of the given radix.
fn read_digits(chars: &mut Chars<'_>, count: usize, radix: u32) -> Option<u32> {
    let rest = chars.as_str();
    let digits = rest.get(..count)?;
    if !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let value = u32::from_str_radix(digits, radix).ok()?;
    *chars = rest[count..].chars();
    Some(value)
}

fn ascii_byte(value: u32, escape: &str) -> Result<char, String> {
    u8::try_from(value).ok()
                       .filter(u8::is_ascii)
                       .map(char::from)
                       .ok_or_else(|| format!("{escape} escape {value:#x} is not an ASCII byte"))
}

fn code_point(value: Option<u32>) -> Result<char, String> {
    value.and_then(char::from_u32).ok_or_else(|| "invalid unicode escape".to_string())
}
