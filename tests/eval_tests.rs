use extodan::lexer::Lexer;
use extodan::parser::eval::MAX_NESTING_DEPTH;
use extodan::parser::{evaluate_expression, EvalError, Evaluator};
use extodan::token::SourcePosition;

#[test]
fn honors_precedence_and_parentheses() {
    assert_eq!(evaluate_expression("2 + 3 * (4 - 2)").unwrap(), 8);
    assert_eq!(evaluate_expression("(2 + 3) * 4").unwrap(), 20);
    assert_eq!(evaluate_expression("((7))").unwrap(), 7);
}

#[test]
fn folds_left_to_right() {
    assert_eq!(evaluate_expression("10 - 4 - 3").unwrap(), 3);
    assert_eq!(evaluate_expression("100 / 10 / 5").unwrap(), 2);
    assert_eq!(evaluate_expression("20 / 3").unwrap(), 6);
}

#[test]
fn spans_lines_and_skips_comments() {
    assert_eq!(evaluate_expression("1 +\n  2 # two\n  * 3").unwrap(), 7);
}

#[test]
fn division_by_zero_is_an_error() {
    let err = evaluate_expression("7 / 0").unwrap_err();
    assert_eq!(err, EvalError::DivisionByZero { position: SourcePosition::new(1, 3) });
}

#[test]
fn missing_operand() {
    let err = evaluate_expression("2 +").unwrap_err();
    assert!(matches!(
        err,
        EvalError::UnexpectedToken { expected: "integer literal", ref found, .. } if found.is_empty()
    ));
}

#[test]
fn unclosed_parenthesis() {
    let err = evaluate_expression("(1 + 2").unwrap_err();
    assert!(matches!(err, EvalError::UnexpectedToken { expected: "')'", .. }));
}

#[test]
fn trailing_input_is_rejected() {
    let err = evaluate_expression("1 2").unwrap_err();
    assert_eq!(
        err,
        EvalError::UnexpectedToken {
            expected: "end of input",
            found: "2".into(),
            position: SourcePosition::new(1, 3),
        }
    );
}

#[test]
fn identifiers_are_not_numbers() {
    let err = evaluate_expression("x + 1").unwrap_err();
    assert!(matches!(err, EvalError::UnexpectedToken { ref found, .. } if found == "x"));
    assert_eq!(err.position(), SourcePosition::new(1, 1));
}

#[test]
fn oversized_literal_is_invalid() {
    let err = evaluate_expression("99999999999999999999").unwrap_err();
    assert!(matches!(err, EvalError::InvalidInteger { .. }));
}

#[test]
fn overflow_is_reported() {
    let err = evaluate_expression("9223372036854775807 + 1").unwrap_err();
    assert!(matches!(err, EvalError::Overflow { ref op, .. } if op == "+"));
    assert!(err.to_string().contains("overflow"));
}

#[test]
fn rule_methods_are_usable_directly() {
    let mut eval = Evaluator::new(Lexer::new("2 * 3 (1 + 4)"));
    assert_eq!(eval.term().unwrap(), 6);
    assert_eq!(eval.factor().unwrap(), 5);
    assert!(eval.evaluate().is_err());
}

#[test]
fn nesting_limit_is_an_error_not_a_crash() {
    let deep = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
    let err = evaluate_expression(&deep).unwrap_err();
    assert_eq!(err, EvalError::TooDeep { position: SourcePosition::new(1, MAX_NESTING_DEPTH as u32 + 1) });

    let at_limit = format!("{}1{}", "(".repeat(MAX_NESTING_DEPTH), ")".repeat(MAX_NESTING_DEPTH));
    assert_eq!(evaluate_expression(&at_limit).unwrap(), 1);
}
