//! Expression parser for papel templates
//!
//! Parses the JS-like restricted expression syntax into the `papel-ast` node
//! contract using winnow with recursive descent and precedence climbing.
//! Bracket member access and calls on arbitrary sub-expressions parse
//! successfully; the evaluator rejects them, so authoring tools can still
//! show the structure of an expression it will refuse to run.

mod combinators;
mod expression;

use combinators::{Input, ws};
use papel_ast::Expression;
use papel_diagnostics::{PapelError, Result, SourceLocation};
use winnow::combinator::eof;
use winnow::error::ContextError;
use winnow::prelude::*;

/// Parse a single expression, requiring the whole input to be consumed
pub fn parse_expression(source: &str) -> Result<Expression> {
    let mut input: Input<'_> = source;

    let expr = expression::expression_parser(&mut input).map_err(|_| {
        let offset = source.len() - input.len();
        PapelError::parse_at(
            "expected expression",
            source,
            SourceLocation::at_offset(source, offset),
        )
    })?;

    ws(&mut input).ok();
    eof::<_, ContextError>.parse_next(&mut input).map_err(|_| {
        let offset = source.len() - input.len();
        PapelError::parse_at(
            "unexpected trailing input",
            source,
            SourceLocation::at_offset(source, offset),
        )
    })?;

    Ok(expr)
}
