pub use parser::{CalcError, InfixParser, ParseError, RPNExpr};
pub use rpneval::{DivisionPolicy, EvalErr, RpnEvaluator};
pub use token::{Assoc, OpInfo, Operator, OperatorTable, Token, Tokenizer, STANDARD_TABLE};

pub mod parser;

mod rpneval;
#[cfg(test)]
mod rpneval_test;

mod rpnprint;
mod token;

/// Evaluate an infix expression with the standard operator table.
pub fn calculate(expr: &str) -> Result<f64, CalcError> {
    InfixParser::new().calculate(expr)
}
