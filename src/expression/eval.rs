use crate::expression::ast::{BinaryOp, Expr, Func, UnaryOp};

/// Why a point could not be evaluated. Callers treat all of these as "omit this sample".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EvalFault {
    DivisionByZero,
    Domain,
    NonFinite,
}

pub(crate) fn eval_at(e: &Expr, x: f64) -> Result<f64, EvalFault> {
    let v = match e {
        Expr::Num(v) => *v,
        Expr::X => x,
        Expr::Unary {
            op: UnaryOp::Neg,
            expr,
        } => -eval_at(expr, x)?,
        Expr::Binary { op, left, right } => {
            let a = eval_at(left, x)?;
            let b = eval_at(right, x)?;
            match op {
                BinaryOp::Add => a + b,
                BinaryOp::Sub => a - b,
                BinaryOp::Mul => a * b,
                BinaryOp::Div => {
                    if b == 0.0 {
                        return Err(EvalFault::DivisionByZero);
                    }
                    a / b
                }
                BinaryOp::Pow => a.powf(b),
            }
        }
        Expr::Call { func, arg } => call(*func, eval_at(arg, x)?)?,
    };
    if v.is_finite() {
        Ok(v)
    } else {
        Err(EvalFault::NonFinite)
    }
}

fn call(func: Func, v: f64) -> Result<f64, EvalFault> {
    match func {
        Func::Log if v <= 0.0 => Err(EvalFault::Domain),
        Func::Sqrt if v < 0.0 => Err(EvalFault::Domain),
        Func::Log => Ok(v.ln()),
        Func::Sqrt => Ok(v.sqrt()),
        Func::Sin => Ok(v.sin()),
        Func::Cos => Ok(v.cos()),
        Func::Tan => Ok(v.tan()),
        Func::Abs => Ok(v.abs()),
        Func::Exp => Ok(v.exp()),
    }
}
