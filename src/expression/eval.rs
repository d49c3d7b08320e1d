//! Coordinate tokens: plain integers or arithmetic over the avatar's `width` and `height`.

use crate::expression::ast::{BinaryOp, Expr, Var};
use crate::expression::parser::parse_expr;
use crate::foundation::error::{PetpetError, PetpetResult};

/// Variable bindings for one evaluation. Built fresh for every token.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Bindings {
    pub(crate) width: f64,
    pub(crate) height: f64,
}

impl Bindings {
    fn lookup(self, var: Var) -> f64 {
        match var {
            Var::Width => self.width,
            Var::Height => self.height,
        }
    }
}

pub(crate) fn eval_expr(expr: &Expr, env: Bindings) -> f64 {
    match expr {
        Expr::Num(v) => *v,
        Expr::Var(var) => env.lookup(*var),
        Expr::Neg(e) => -eval_expr(e, env),
        Expr::Binary { op, left, right } => {
            let a = eval_expr(left, env);
            let b = eval_expr(right, env);
            match op {
                BinaryOp::Add => a + b,
                BinaryOp::Sub => a - b,
                BinaryOp::Mul => a * b,
                BinaryOp::Div => a / b,
            }
        }
    }
}

/// Resolve one positional token to integer pixels.
///
/// Literal integers are returned unchanged. Anything else is evaluated as an arithmetic
/// expression with `width` and `height` bound to the given avatar dimensions, then truncated
/// toward zero.
pub fn resolve_coord(token: &str, width: u32, height: u32) -> PetpetResult<i32> {
    let src = token.trim().trim_matches('"').trim();
    if let Ok(v) = src.parse::<i32>() {
        return Ok(v);
    }

    let expr = parse_expr(src)
        .map_err(|e| PetpetError::configuration(format!("invalid coordinate '{token}': {e}")))?;
    let env = Bindings {
        width: f64::from(width),
        height: f64::from(height),
    };
    let v = eval_expr(&expr, env);
    if !v.is_finite() {
        return Err(PetpetError::configuration(format!(
            "coordinate '{token}' evaluates to a non-finite value"
        )));
    }
    let v = v.trunc();
    if v < f64::from(i32::MIN) || v > f64::from(i32::MAX) {
        return Err(PetpetError::configuration(format!(
            "coordinate '{token}' is out of range: {v}"
        )));
    }
    Ok(v as i32)
}

#[cfg(test)]
#[path = "../../tests/unit/expression/eval.rs"]
mod tests;
