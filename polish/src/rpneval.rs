use crate::parser::RPNExpr;
use crate::token::{Operator, OperatorTable, Token, Tokenizer, STANDARD_TABLE};
use tracing::trace;

#[derive(thiserror::Error, PartialEq, Debug)]
pub enum EvalErr {
    #[error("unknown token '{token}' at position {position}")]
    UnknownToken { token: String, position: usize },
    #[error("not enough operands for '{operator}' at position {position}")]
    StackUnderflow { operator: Operator, position: usize },
    #[error("malformed expression, {depth} values left on the stack")]
    MalformedExpression { depth: usize },
    #[error("division by zero at position {position}")]
    DivisionByZero { position: usize },
}

/// What to do when `/` finds a zero on its right.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum DivisionPolicy {
    /// Fail with `EvalErr::DivisionByZero`.
    #[default]
    Reject,
    /// Let IEEE-754 produce `inf`, `-inf` or `NaN`.
    Ieee,
}

pub struct RpnEvaluator<'t> {
    table: &'t OperatorTable,
    division: DivisionPolicy,
}

impl RpnEvaluator<'static> {
    pub fn new() -> Self {
        Self::with_table(&STANDARD_TABLE)
    }
}

impl Default for RpnEvaluator<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'t> RpnEvaluator<'t> {
    pub fn with_table(table: &'t OperatorTable) -> Self {
        RpnEvaluator { table, division: DivisionPolicy::default() }
    }

    pub fn with_division(mut self, division: DivisionPolicy) -> Self {
        self.division = division;
        self
    }

    pub fn division(&self) -> DivisionPolicy {
        self.division
    }

    /// Evaluate a space delimited RPN expression, eg: `"5 3 2 * +"`.
    pub fn calculate(&self, expr: &str) -> Result<f64, EvalErr> {
        let tokens = Tokenizer::new(expr, self.table)
            .map(|(position, token)| {
                token.map_err(|word| EvalErr::UnknownToken { token: word.to_string(), position })
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.eval(&RPNExpr(tokens))
    }

    pub fn eval(&self, rpn: &RPNExpr) -> Result<f64, EvalErr> {
        let mut operands = Vec::new();

        for (position, token) in rpn.iter().enumerate() {
            match *token {
                Token::Operand(num) => operands.push(num),
                Token::Operator(op) => {
                    if self.table.info(op).is_none() {
                        return Err(EvalErr::UnknownToken { token: op.to_string(), position });
                    }
                    let underflow = || EvalErr::StackUnderflow { operator: op, position };
                    let r = operands.pop().ok_or_else(underflow)?;
                    let l = operands.pop().ok_or_else(underflow)?;
                    if op == Operator::Div && r == 0.0 && self.division == DivisionPolicy::Reject {
                        return Err(EvalErr::DivisionByZero { position });
                    }
                    let result = op.apply(l, r);
                    trace!(position, "{} {} {} = {}", l, op, r, result);
                    operands.push(result);
                }
            }
        }
        match operands[..] {
            [result] => Ok(result),
            _ => Err(EvalErr::MalformedExpression { depth: operands.len() }),
        }
    }
}
