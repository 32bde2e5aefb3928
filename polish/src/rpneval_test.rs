use crate::parser::{InfixParser, RPNExpr};
use crate::rpneval::{DivisionPolicy, EvalErr, RpnEvaluator};
use crate::token::{Operator, OperatorTable, Token};

macro_rules! fuzzy_eq {
    ($lhs:expr, $rhs:expr) => { assert!(($lhs - $rhs).abs() < 1.0e-10) }
}

#[test]
fn test_eval1() {
    fuzzy_eq!(RpnEvaluator::new().calculate("1 1 -").unwrap(), 0.0);
}

#[test]
fn test_eval2() {
    fuzzy_eq!(RpnEvaluator::new().calculate("5 3 2 * +").unwrap(), 11.0);
}

#[test]
fn test_eval3() {
    // 4 - (8 * 2 + 8)
    fuzzy_eq!(RpnEvaluator::new().calculate("4 8 2 * 8 + -").unwrap(), -20.0);
}

#[test]
fn test_eval4() {
    fuzzy_eq!(RpnEvaluator::new().calculate("1 1 9 * 0 + -").unwrap(), -8.0);
}

#[test]
fn test_eval5() {
    fuzzy_eq!(RpnEvaluator::new().calculate("2 3 ^").unwrap(), 8.0);
    fuzzy_eq!(RpnEvaluator::new().calculate("4 0.5 ^").unwrap(), 2.0);
    fuzzy_eq!(RpnEvaluator::new().calculate("2 -3 ^").unwrap(), 0.125);
}

#[test]
fn test_eval6() {
    fuzzy_eq!(RpnEvaluator::new().calculate("1 2 120 * 63 / +").unwrap(), 1.0 + 240.0 / 63.0);
}

#[test]
fn test_eval7() {
    fuzzy_eq!(RpnEvaluator::new().calculate("1 5 3 * 2 + -").unwrap(), -16.0);
}

#[test]
fn operand_order() {
    // second popped value is the left operand
    fuzzy_eq!(RpnEvaluator::new().calculate("10 4 -").unwrap(), 6.0);
    fuzzy_eq!(RpnEvaluator::new().calculate("10 4 /").unwrap(), 2.5);
    fuzzy_eq!(RpnEvaluator::new().calculate("3 2 ^").unwrap(), 9.0);
}

#[test]
fn agrees_with_infix() {
    let pairs = [
        ("1 1 -", "1 - 1"),
        ("5 3 2 * +", "5 + 3 * 2"),
        ("2 3 ^", "2 ^ 3"),
        ("1 2 120 * 63 / +", "1 + 2 * 120 / 63"),
        ("4 8 2 * - 8 +", "4 - 8 * 2 + 8"),
        ("8 8 - 8 -", "8 - 8 - 8"),
    ];
    let eval = RpnEvaluator::new();
    let parser = InfixParser::new();
    for (rpn, infix) in pairs.iter() {
        fuzzy_eq!(eval.calculate(rpn).unwrap(), parser.calculate(infix).unwrap());
    }
}

#[test]
fn division_by_zero() {
    let eval = RpnEvaluator::new();
    assert_eq!(eval.division(), DivisionPolicy::Reject);
    assert_eq!(eval.calculate("1 0 /"), Err(EvalErr::DivisionByZero { position: 2 }));
    assert_eq!(eval.calculate("1 -0 /"), Err(EvalErr::DivisionByZero { position: 2 }));
    assert_eq!(eval.calculate("5 1 1 - /"), Err(EvalErr::DivisionByZero { position: 4 }));
    // only '/' cares
    fuzzy_eq!(eval.calculate("0 0 ^").unwrap(), 1.0);

    let ieee = RpnEvaluator::new().with_division(DivisionPolicy::Ieee);
    assert_eq!(ieee.calculate("1 0 /"), Ok(f64::INFINITY));
    assert_eq!(ieee.calculate("-1 0 /"), Ok(f64::NEG_INFINITY));
    assert!(ieee.calculate("0 0 /").unwrap().is_nan());
}

#[test]
fn bad_eval() {
    let eval = RpnEvaluator::new();
    assert_eq!(
        eval.calculate("1 +"),
        Err(EvalErr::StackUnderflow { operator: Operator::Add, position: 1 })
    );
    assert_eq!(
        eval.calculate("*"),
        Err(EvalErr::StackUnderflow { operator: Operator::Mul, position: 0 })
    );
    assert_eq!(eval.calculate(""), Err(EvalErr::MalformedExpression { depth: 0 }));
    assert_eq!(eval.calculate("1 2"), Err(EvalErr::MalformedExpression { depth: 2 }));
    assert_eq!(eval.calculate("1 2 3 +"), Err(EvalErr::MalformedExpression { depth: 2 }));
    assert_eq!(
        eval.calculate("1 2 %"),
        Err(EvalErr::UnknownToken { token: format!("%"), position: 2 })
    );
    assert_eq!(
        eval.calculate("1e400 1 +"),
        Err(EvalErr::UnknownToken { token: format!("1e400"), position: 0 })
    );
    assert_eq!(
        eval.calculate("pi 2 *"),
        Err(EvalErr::UnknownToken { token: format!("pi"), position: 0 })
    );
}

#[test]
fn restricted_table() {
    let table = OperatorTable::standard().without(Operator::Pow);
    let eval = RpnEvaluator::with_table(&table);
    assert_eq!(
        eval.calculate("2 3 ^"),
        Err(EvalErr::UnknownToken { token: format!("^"), position: 2 })
    );
    let rpn = RPNExpr(vec![Token::Operand(2.0), Token::Operand(3.0), Token::Operator(Operator::Pow)]);
    assert_eq!(
        eval.eval(&rpn),
        Err(EvalErr::UnknownToken { token: format!("^"), position: 2 })
    );
    fuzzy_eq!(RpnEvaluator::new().eval(&rpn).unwrap(), 8.0);
}

#[test]
fn error_messages() {
    let eval = RpnEvaluator::new();
    let msg = |expr: &str| eval.calculate(expr).unwrap_err().to_string();
    assert_eq!(msg("1 +"), "not enough operands for '+' at position 1");
    assert_eq!(msg("1 0 /"), "division by zero at position 2");
    assert_eq!(msg("1 2"), "malformed expression, 2 values left on the stack");
    assert_eq!(msg("1 x"), "unknown token 'x' at position 1");

    let err = InfixParser::new().calculate("1 / 0").unwrap_err();
    assert_eq!(err.to_string(), "eval error: division by zero at position 2");
}
