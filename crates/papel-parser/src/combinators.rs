//! Common parser combinators for papel expressions

use winnow::ascii::digit1;
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{any, literal, one_of, take_while};

/// Parser input type
pub type Input<'a> = &'a str;

/// Parser result type
pub type PResult<T> = winnow::error::ModalResult<T>;

/// Skip zero or more whitespace characters
pub fn ws<'a>(input: &mut Input<'a>) -> PResult<()> {
    take_while(0.., char::is_whitespace)
        .void()
        .parse_next(input)
}

/// Match a literal token
pub fn lit<'a>(s: &'static str) -> impl Parser<Input<'a>, &'a str, ErrMode<ContextError>> {
    literal(s)
}

/// Parse an identifier: `[A-Za-z_$][A-Za-z0-9_$]*`
pub fn identifier_parser<'a>(input: &mut Input<'a>) -> PResult<String> {
    let ident = (
        one_of(|c: char| c.is_ascii_alphabetic() || c == '_' || c == '$'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '$'),
    )
        .take()
        .parse_next(input)?;
    Ok(ident.to_string())
}

/// Parse a numeric literal with optional fraction and exponent
pub fn number_parser<'a>(input: &mut Input<'a>) -> PResult<f64> {
    let text = (
        digit1,
        winnow::combinator::opt(('.', digit1)),
        winnow::combinator::opt((one_of(['e', 'E']), winnow::combinator::opt(one_of(['+', '-'])), digit1)),
    )
        .take()
        .parse_next(input)?;
    Ok(text.parse().unwrap_or(f64::NAN))
}

/// Parse a string literal, single or double quoted, with backslash escapes
pub fn string_parser<'a>(input: &mut Input<'a>) -> PResult<String> {
    let quote: char = one_of(['\'', '"']).parse_next(input)?;
    let mut out = String::new();

    loop {
        let ch: char = any.parse_next(input)?;
        if ch == quote {
            return Ok(out);
        }
        if ch == '\\' {
            let escaped: char = any.parse_next(input)?;
            out.push(match escaped {
                'n' => '\n',
                't' => '\t',
                'r' => '\r',
                other => other,
            });
        } else {
            out.push(ch);
        }
    }
}
