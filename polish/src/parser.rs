use crate::rpneval::{EvalErr, RpnEvaluator};
use crate::token::{Assoc, OpInfo, Operator, OperatorTable, Token, Tokenizer, STANDARD_TABLE};
use tracing::{debug, trace};

#[derive(thiserror::Error, PartialEq, Debug)]
pub enum ParseError {
    #[error("empty expression")]
    EmptyExpression,
    #[error("unknown operator '{token}' at position {position}")]
    UnknownOperator { token: String, position: usize },
    #[error("malformed expression at position {position}")]
    MalformedExpression { position: usize },
}

#[derive(thiserror::Error, PartialEq, Debug)]
pub enum CalcError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("eval error: {0}")]
    Eval(#[from] EvalErr),
}

#[derive(Clone, PartialEq, Debug)]
pub struct RPNExpr(pub Vec<Token>);

impl std::ops::Deref for RPNExpr {
    type Target = [Token];
    fn deref(&self) -> &[Token] {
        &self.0
    }
}

/// Converts space delimited infix expressions into RPN.
///
/// Instead of the usual shunting-yard operator stack this keeps a single
/// `temp` stack of pending operators plus the latest operand, and a tracked
/// operator: the pending operator the next one is compared against. An
/// operator that binds tighter than the tracked one is left pending, anything
/// else flushes the pending operators it can't outrank. Without parentheses
/// or unary operators that's all it takes.
pub struct InfixParser<'t> {
    table: &'t OperatorTable,
}

impl InfixParser<'static> {
    pub fn new() -> Self {
        InfixParser { table: &STANDARD_TABLE }
    }
}

impl Default for InfixParser<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'t> InfixParser<'t> {
    pub fn with_table(table: &'t OperatorTable) -> Self {
        InfixParser { table }
    }

    pub fn table(&self) -> &'t OperatorTable {
        self.table
    }

    pub fn tokenize(&self, expr: &str) -> Result<Vec<Token>, ParseError> {
        Tokenizer::new(expr, self.table)
            .map(|(position, token)| {
                token.map_err(|word| ParseError::UnknownOperator { token: word.to_string(), position })
            })
            .collect()
    }

    pub fn parse_str(&self, expr: &str) -> Result<RPNExpr, ParseError> {
        self.parse(&self.tokenize(expr)?)
    }

    /// Parse and evaluate with a default `RpnEvaluator` sharing this table.
    pub fn calculate(&self, expr: &str) -> Result<f64, CalcError> {
        self.calculate_with(&RpnEvaluator::with_table(self.table), expr)
    }

    pub fn calculate_with(&self, eval: &RpnEvaluator, expr: &str) -> Result<f64, CalcError> {
        let rpn = self.parse_str(expr)?;
        Ok(eval.eval(&rpn)?)
    }

    fn info(&self, op: Operator, position: usize) -> Result<&'t OpInfo, ParseError> {
        self.table.info(op).ok_or_else(|| ParseError::UnknownOperator {
            token: op.symbol().to_string(),
            position,
        })
    }

    // Does `curr` bind tighter than the tracked operator?
    fn precedes(curr: &OpInfo, tracked: &OpInfo) -> bool {
        curr.rank > tracked.rank || (curr.rank == tracked.rank && curr.assoc == Assoc::Right)
    }

    pub fn parse(&self, tokens: &[Token]) -> Result<RPNExpr, ParseError> {
        if tokens.is_empty() {
            return Err(ParseError::EmptyExpression);
        }
        let mut rpn_stack = Vec::with_capacity(tokens.len());
        let mut temp = Vec::new();
        let mut tracked_op: Option<&OpInfo> = None;

        for (position, &token) in tokens.iter().enumerate() {
            let malformed = ParseError::MalformedExpression { position };
            temp.push(token);
            let op = match token {
                Token::Operator(op) => self.info(op, position)?,
                Token::Operand(_) => {
                    // operands must be separated by an operator
                    if let [.., Token::Operand(_), _] = temp.as_slice() {
                        return Err(malformed);
                    }
                    continue;
                }
            };

            // the operator just pushed and the operand to its left
            let (stack_op, stack_val) = match (temp.pop(), temp.pop()) {
                (Some(o), Some(v @ Token::Operand(_))) => (o, v),
                _ => return Err(malformed),
            };
            rpn_stack.push(stack_val);

            match tracked_op {
                Some(tracked) if !Self::precedes(op, tracked) => {
                    trace!(position, op = %op.op, tracked = %tracked.op, "flush pending");
                    // pending operators never bind weaker than the one below
                    // them, flush until `op` outranks the top
                    while let Some(&Token::Operator(pending)) = temp.last() {
                        if Self::precedes(op, self.info(pending, position)?) {
                            break;
                        }
                        rpn_stack.extend(temp.pop());
                    }
                }
                _ => trace!(position, op = %op.op, "keep pending"),
            }
            tracked_op = Some(op);
            temp.push(stack_op);
        }

        match temp.last() {
            Some(Token::Operand(_)) => (),
            _ => return Err(ParseError::MalformedExpression { position: tokens.len() - 1 }),
        }
        // tightest binding operator is on top, flush backwards
        rpn_stack.extend(temp.drain(..).rev());

        let rpn = RPNExpr(rpn_stack);
        debug!(%rpn, "converted infix expression");
        Ok(rpn)
    }
}
