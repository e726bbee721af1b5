mod common;

use common::*;
use esgen::ir::{BinaryOp, Declaration, Expr, Type};
use esgen::js::{ArrowBody, JsExpr, JsStmt};
use esgen::span::Span;
use esgen::LowerError;

const FILE: &str = "src/Pos.fs";

fn parse_call() -> Expr {
    Expr::apply(Expr::ident("parse", Type::Any), vec![Expr::string("42")], Type::Number)
}

fn guarded_parse() -> Expr {
    Expr::try_catch(parse_call(), Some(("e".to_string(), Expr::int(0))), None)
}

fn lower_method(body: Expr) -> Result<Vec<JsStmt>, LowerError> {
    let program = lower_one(source_file(FILE, "Pos", vec![Declaration::Member(method("f", &[], body))]))?;
    let (_, stmts) = exported(&program);
    match const_init(stmts, "f") {
        Some(JsExpr::Function(f)) => Ok(f.body.clone()),
        other => panic!("expected function binding, got {other:?}"),
    }
}

#[test]
fn try_catch_as_function_body_is_plain_try() {
    let body = lower_method(guarded_parse()).unwrap();
    let [JsStmt::Try { block, handler: Some(handler), finalizer: None }] = body.as_slice() else {
        panic!("expected a lone try statement, got {body:?}");
    };
    assert_eq!(block, &vec![JsStmt::ret(JsExpr::call(JsExpr::ident("parse"), vec![JsExpr::string("42")]))]);
    assert_eq!(handler.param, "e");
    assert_eq!(handler.body, vec![JsStmt::ret(JsExpr::Int(0))]);
}

#[test]
fn try_catch_as_operand_is_wrapped() {
    let body = lower_method(Expr::binary(BinaryOp::Add, guarded_parse(), Expr::int(1), Type::Number)).unwrap();
    let [JsStmt::Return(Some(JsExpr::Binary { lhs, .. }))] = body.as_slice() else {
        panic!("expected returned sum, got {body:?}");
    };
    let JsExpr::Call { callee, args } = lhs.as_ref() else {
        panic!("expected self-invoking closure, got {lhs:?}");
    };
    assert!(args.is_empty());
    let JsExpr::Arrow(arrow) = callee.as_ref() else { panic!("expected arrow") };
    assert!(arrow.params.is_empty());
    let ArrowBody::Block(inner) = &arrow.body else { panic!("expected block") };
    assert!(matches!(inner.as_slice(), [JsStmt::Try { .. }]));
}

#[test]
fn statement_in_expression_position_reports_span() {
    let misplaced = Expr::var("x", Expr::int(1), true).with_span(Span::new(10, 20));
    let err = lower_method(Expr::binary(BinaryOp::Mul, misplaced, Expr::int(2), Type::Number)).unwrap_err();
    assert_eq!(err.kind(), "internal");
    assert_eq!(err.span(), Some(Span::new(10, 20)));
    assert!(err.to_string().contains("variable declaration in expression position"));
}

#[test]
fn program_span_covers_declarations() {
    let mut first = method("a", &[], Expr::int(1));
    first.span = Some(Span::new(5, 9));
    let mut second = method("b", &[], Expr::int(2));
    second.span = Some(Span::new(30, 42));
    let program = lower_one(source_file(
        FILE,
        "Pos",
        vec![Declaration::Member(first), Declaration::Member(second)],
    ))
    .unwrap();
    assert_eq!(program.span, Some(Span::new(5, 42)));
}

#[test]
fn unit_body_with_if_and_loop() {
    let body = Expr::sequential(vec![
        Expr::var("total", Expr::int(0), true),
        Expr::for_range(
            "i",
            Expr::int(1),
            Expr::int(10),
            Expr::set(
                Expr::ident("total", Type::Number),
                None,
                Expr::binary(
                    BinaryOp::Add,
                    Expr::ident("total", Type::Number),
                    Expr::ident("i", Type::Number),
                    Type::Number,
                ),
            ),
            true,
        ),
        Expr::if_then_else(
            Expr::binary(BinaryOp::Gt, Expr::ident("total", Type::Number), Expr::int(50), Type::Boolean),
            Expr::apply(Expr::ident("log", Type::Any), vec![Expr::string("big")], Type::Unit),
            Expr::null(),
        ),
    ]);
    let stmts = lower_method(body).unwrap();
    assert_eq!(stmts.len(), 3);
    assert!(matches!(stmts[0], JsStmt::Decl(_)));
    assert!(matches!(stmts[1], JsStmt::For { .. }));
    assert!(matches!(stmts[2], JsStmt::If { alternate: None, .. }));
}
