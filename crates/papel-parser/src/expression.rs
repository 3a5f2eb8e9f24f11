//! Expression parser using recursive descent with precedence climbing
//!
//! One function per precedence level, lowest first: conditional, logical or,
//! logical and, equality, relational, additive, multiplicative, unary,
//! postfix, primary.

use crate::combinators::{Input, PResult, identifier_parser, lit, number_parser, string_parser, ws};
use papel_ast::{
    ArrayExpr, BinaryOp, CallExpr, Expression, LogicalOp, MemberExpr, MemberProp, ObjectEntry,
    ObjectExpr, UnaryOp,
};
use winnow::combinator::fail;
use winnow::prelude::*;
use winnow::token::take_while;

/// Maximum grammar nesting depth
///
/// Recursive descent recurses once per nesting level, so unbounded input
/// would otherwise exhaust the call stack before the evaluator's own depth
/// guard ever runs. Past the cap the parse fails like any other syntax
/// error.
const MAX_NESTING_DEPTH: usize = 128;

/// Parse an expression (entry point)
pub fn expression_parser<'a>(input: &mut Input<'a>) -> PResult<Expression> {
    conditional_expression(input, 0)
}

/// Parse a conditional expression (`a ? b : c`, right-associative)
fn conditional_expression<'a>(input: &mut Input<'a>, depth: usize) -> PResult<Expression> {
    if depth >= MAX_NESTING_DEPTH {
        return fail.parse_next(input);
    }
    let condition = or_expression(input, depth)?;
    ws(input)?;

    if lit("?").parse_next(input).is_ok() {
        let then_expr = conditional_expression(input, depth + 1)?;
        ws(input)?;
        lit(":").parse_next(input)?;
        let else_expr = conditional_expression(input, depth + 1)?;
        return Ok(Expression::Conditional(papel_ast::ConditionalExpr {
            condition: Box::new(condition),
            then_expr: Box::new(then_expr),
            else_expr: Box::new(else_expr),
        }));
    }

    Ok(condition)
}

/// Parse a logical-or expression
fn or_expression<'a>(input: &mut Input<'a>, depth: usize) -> PResult<Expression> {
    let mut left = and_expression(input, depth)?;

    loop {
        ws(input)?;
        if lit("||").parse_next(input).is_ok() {
            let right = and_expression(input, depth)?;
            left = Expression::logical(left, LogicalOp::Or, right);
        } else {
            break;
        }
    }

    Ok(left)
}

/// Parse a logical-and expression
fn and_expression<'a>(input: &mut Input<'a>, depth: usize) -> PResult<Expression> {
    let mut left = equality_expression(input, depth)?;

    loop {
        ws(input)?;
        if lit("&&").parse_next(input).is_ok() {
            let right = equality_expression(input, depth)?;
            left = Expression::logical(left, LogicalOp::And, right);
        } else {
            break;
        }
    }

    Ok(left)
}

/// Parse an equality expression (`== != === !==`)
fn equality_expression<'a>(input: &mut Input<'a>, depth: usize) -> PResult<Expression> {
    let mut left = relational_expression(input, depth)?;

    loop {
        ws(input)?;
        // Longest operators first so `==` never eats the front of `===`
        let op = if lit("===").parse_next(input).is_ok() {
            Some(BinaryOp::StrictEqual)
        } else if lit("!==").parse_next(input).is_ok() {
            Some(BinaryOp::StrictNotEqual)
        } else if lit("==").parse_next(input).is_ok() {
            Some(BinaryOp::Equal)
        } else if lit("!=").parse_next(input).is_ok() {
            Some(BinaryOp::NotEqual)
        } else {
            None
        };

        match op {
            Some(op) => {
                let right = relational_expression(input, depth)?;
                left = Expression::binary(left, op, right);
            }
            None => break,
        }
    }

    Ok(left)
}

/// Parse a relational expression (`< <= > >=`)
fn relational_expression<'a>(input: &mut Input<'a>, depth: usize) -> PResult<Expression> {
    let mut left = additive_expression(input, depth)?;

    loop {
        ws(input)?;
        let op = if lit("<=").parse_next(input).is_ok() {
            Some(BinaryOp::LessOrEqual)
        } else if lit(">=").parse_next(input).is_ok() {
            Some(BinaryOp::GreaterOrEqual)
        } else if lit("<").parse_next(input).is_ok() {
            Some(BinaryOp::Less)
        } else if lit(">").parse_next(input).is_ok() {
            Some(BinaryOp::Greater)
        } else {
            None
        };

        match op {
            Some(op) => {
                let right = additive_expression(input, depth)?;
                left = Expression::binary(left, op, right);
            }
            None => break,
        }
    }

    Ok(left)
}

/// Parse an additive expression (`+ -`)
fn additive_expression<'a>(input: &mut Input<'a>, depth: usize) -> PResult<Expression> {
    let mut left = multiplicative_expression(input, depth)?;

    loop {
        ws(input)?;
        let op = if lit("+").parse_next(input).is_ok() {
            Some(BinaryOp::Add)
        } else if lit("-").parse_next(input).is_ok() {
            Some(BinaryOp::Subtract)
        } else {
            None
        };

        match op {
            Some(op) => {
                let right = multiplicative_expression(input, depth)?;
                left = Expression::binary(left, op, right);
            }
            None => break,
        }
    }

    Ok(left)
}

/// Parse a multiplicative expression (`* / %`)
fn multiplicative_expression<'a>(input: &mut Input<'a>, depth: usize) -> PResult<Expression> {
    let mut left = unary_expression(input, depth)?;

    loop {
        ws(input)?;
        let op = if lit("*").parse_next(input).is_ok() {
            Some(BinaryOp::Multiply)
        } else if lit("/").parse_next(input).is_ok() {
            Some(BinaryOp::Divide)
        } else if lit("%").parse_next(input).is_ok() {
            Some(BinaryOp::Modulo)
        } else {
            None
        };

        match op {
            Some(op) => {
                let right = unary_expression(input, depth)?;
                left = Expression::binary(left, op, right);
            }
            None => break,
        }
    }

    Ok(left)
}

/// Parse a unary expression (`! + -`, right-associative)
fn unary_expression<'a>(input: &mut Input<'a>, depth: usize) -> PResult<Expression> {
    if depth >= MAX_NESTING_DEPTH {
        return fail.parse_next(input);
    }
    ws(input)?;

    // `!` at operand position can never be the front of `!=`
    if lit("!").parse_next(input).is_ok() {
        let operand = unary_expression(input, depth + 1)?;
        return Ok(Expression::unary(UnaryOp::Not, operand));
    }
    if lit("-").parse_next(input).is_ok() {
        let operand = unary_expression(input, depth + 1)?;
        return Ok(Expression::unary(UnaryOp::Minus, operand));
    }
    if lit("+").parse_next(input).is_ok() {
        let operand = unary_expression(input, depth + 1)?;
        return Ok(Expression::unary(UnaryOp::Plus, operand));
    }

    postfix_expression(input, depth)
}

/// Parse postfix member access and calls
///
/// `a[b]` and calls on non-identifier callees are valid syntax here; the
/// evaluator rejects them.
fn postfix_expression<'a>(input: &mut Input<'a>, depth: usize) -> PResult<Expression> {
    let mut expr = primary_expression(input, depth)?;

    loop {
        ws(input)?;

        if lit(".").parse_next(input).is_ok() {
            ws(input)?;
            let name = member_name(input)?;
            expr = Expression::Member(MemberExpr {
                object: Box::new(expr),
                property: MemberProp::Name(name),
            });
        } else if lit("[").parse_next(input).is_ok() {
            let index = conditional_expression(input, depth + 1)?;
            ws(input)?;
            lit("]").parse_next(input)?;
            expr = Expression::Member(MemberExpr {
                object: Box::new(expr),
                property: MemberProp::Computed(Box::new(index)),
            });
        } else if lit("(").parse_next(input).is_ok() {
            let arguments = argument_list(input, depth)?;
            expr = Expression::Call(CallExpr {
                callee: Box::new(expr),
                arguments,
            });
        } else {
            break;
        }
    }

    Ok(expr)
}

/// Parse a member name after `.`: an identifier, or a bare non-negative
/// integer for sequence indexing
fn member_name<'a>(input: &mut Input<'a>) -> PResult<String> {
    if input.starts_with(|c: char| c.is_ascii_digit()) {
        let digits = take_while(1.., |c: char| c.is_ascii_digit()).parse_next(input)?;
        return Ok(digits.to_string());
    }
    identifier_parser(input)
}

/// Parse a call argument list up to and including the closing parenthesis
fn argument_list<'a>(input: &mut Input<'a>, depth: usize) -> PResult<Vec<Expression>> {
    ws(input)?;
    if lit(")").parse_next(input).is_ok() {
        return Ok(Vec::new());
    }

    let mut arguments = vec![conditional_expression(input, depth + 1)?];
    loop {
        ws(input)?;
        if lit(",").parse_next(input).is_ok() {
            arguments.push(conditional_expression(input, depth + 1)?);
        } else {
            break;
        }
    }
    lit(")").parse_next(input)?;

    Ok(arguments)
}

/// Parse a primary expression: literal, grouping, array, object, identifier
fn primary_expression<'a>(input: &mut Input<'a>, depth: usize) -> PResult<Expression> {
    ws(input)?;

    if input.starts_with(['\'', '"']) {
        let text = string_parser(input)?;
        return Ok(Expression::string(text));
    }
    if input.starts_with(|c: char| c.is_ascii_digit()) {
        let value = number_parser(input)?;
        return Ok(Expression::number(value));
    }
    if lit("(").parse_next(input).is_ok() {
        let inner = conditional_expression(input, depth + 1)?;
        ws(input)?;
        lit(")").parse_next(input)?;
        return Ok(inner);
    }
    if lit("[").parse_next(input).is_ok() {
        return array_literal(input, depth);
    }
    if lit("{").parse_next(input).is_ok() {
        return object_literal(input, depth);
    }
    if input.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_' || c == '$') {
        let name = identifier_parser(input)?;
        return Ok(Expression::identifier(name));
    }

    fail.parse_next(input)
}

/// Parse the remainder of an array literal after `[`
fn array_literal<'a>(input: &mut Input<'a>, depth: usize) -> PResult<Expression> {
    ws(input)?;
    if lit("]").parse_next(input).is_ok() {
        return Ok(Expression::Array(ArrayExpr { elements: vec![] }));
    }

    let mut elements = vec![conditional_expression(input, depth + 1)?];
    loop {
        ws(input)?;
        if lit(",").parse_next(input).is_ok() {
            elements.push(conditional_expression(input, depth + 1)?);
        } else {
            break;
        }
    }
    lit("]").parse_next(input)?;

    Ok(Expression::Array(ArrayExpr { elements }))
}

/// Parse the remainder of an object literal after `{`
fn object_literal<'a>(input: &mut Input<'a>, depth: usize) -> PResult<Expression> {
    ws(input)?;
    if lit("}").parse_next(input).is_ok() {
        return Ok(Expression::Object(ObjectExpr { entries: vec![] }));
    }

    let mut entries = vec![object_entry(input, depth)?];
    loop {
        ws(input)?;
        if lit(",").parse_next(input).is_ok() {
            entries.push(object_entry(input, depth)?);
        } else {
            break;
        }
    }
    lit("}").parse_next(input)?;

    Ok(Expression::Object(ObjectExpr { entries }))
}

/// Parse one `key: value` entry; keys are identifiers or literal scalars,
/// never computed
fn object_entry<'a>(input: &mut Input<'a>, depth: usize) -> PResult<ObjectEntry> {
    ws(input)?;

    let key = if input.starts_with(['\'', '"']) {
        string_parser(input)?
    } else if input.starts_with(|c: char| c.is_ascii_digit()) {
        let n = number_parser(input)?;
        n.to_string()
    } else {
        identifier_parser(input)?
    };

    ws(input)?;
    lit(":").parse_next(input)?;
    let value = conditional_expression(input, depth + 1)?;

    Ok(ObjectEntry { key, value })
}
