mod common;

use common::*;
use esgen::ir::{BinaryOp, Declaration, Entity, EntityDeclaration, EntityKind, Expr, Project, SourceFile, Type};
use esgen::js::{ArrowBody, JsExpr, JsStmt};
use esgen::{LowerConfig, LowerError};

const FILE: &str = "tests/MathTests.fs";

fn one_plus_one() -> Expr {
    Expr::binary(BinaryOp::Add, Expr::int(1), Expr::int(1), Type::Number)
}

/// Callee name, test name and callback of a registration call statement.
fn registration(stmt: &JsStmt) -> (&str, &str, &JsExpr) {
    let JsStmt::Expr(JsExpr::Call { callee, args }) = stmt else {
        panic!("expected registration call, got {stmt:?}");
    };
    let (JsExpr::Ident(function), [JsExpr::Str(name), callback]) = (callee.as_ref(), args.as_slice()) else {
        panic!("malformed registration call: {stmt:?}");
    };
    (function.as_str(), name.as_str(), callback)
}

#[test]
fn test_case_in_module_is_registered() {
    let case = method("addsNumbers", &[], one_plus_one()).decorated("TestCase");
    let program = lower_one(source_file(FILE, "MathTests", vec![Declaration::Member(case)])).unwrap();

    let (_, body) = exported(&program);
    let (function, name, callback) = registration(&body[0]);
    assert_eq!(function, "it");
    assert_eq!(name, "addsNumbers");
    let JsExpr::Arrow(arrow) = callback else { panic!("expected arrow callback") };
    assert!(arrow.params.is_empty());
    let expected = JsExpr::Binary { op: BinaryOp::Add, lhs: Box::new(JsExpr::Int(1)), rhs: Box::new(JsExpr::Int(1)) };
    assert_eq!(arrow.body, ArrowBody::Expr(Box::new(expected)));
    // The test case is not bound as a member.
    assert!(const_init(body, "addsNumbers").is_none());
}

#[test]
fn fixture_root_file_is_single_describe() {
    let mut file = source_file(
        FILE,
        "MathTests",
        vec![
            Declaration::Member(method("addsNumbers", &[], one_plus_one()).decorated("TestCase")),
            Declaration::Member(method("helper", &[], Expr::int(2))),
        ],
    );
    file.root = file.root.clone().decorated("TestFixture");
    let program = lower_one(file).unwrap();

    assert_eq!(program.statements.len(), 1);
    let (function, name, callback) = registration(&program.statements[0]);
    assert_eq!(function, "describe");
    assert_eq!(name, "MathTests");
    let JsExpr::Arrow(arrow) = callback else { panic!("expected arrow callback") };
    let ArrowBody::Block(body) = &arrow.body else { panic!("expected block body") };
    assert_eq!(body.len(), 2);
    assert_eq!(registration(&body[0]).0, "it");
    assert!(const_init(body, "helper").is_some());
    assert!(!body.iter().any(|s| matches!(s, JsStmt::Return(_))));
}

#[test]
fn fixture_root_may_be_a_class() {
    let root = Entity::new("MathTests", FILE, EntityKind::Class { base: None }).decorated("TestFixture");
    let case = Declaration::Member(method("addsNumbers", &[], one_plus_one()).decorated("TestCase"));
    let program = lower_one(SourceFile::new(FILE, root, vec![case])).unwrap();

    assert_eq!(program.statements.len(), 1);
    let (function, name, callback) = registration(&program.statements[0]);
    assert_eq!((function, name), ("describe", "MathTests"));
    let JsExpr::Arrow(arrow) = callback else { panic!("expected arrow callback") };
    let ArrowBody::Block(body) = &arrow.body else { panic!("expected block body") };
    assert_eq!(registration(&body[0]).1, "addsNumbers");
}

#[test]
fn class_root_without_fixture_marker_is_internal() {
    let root = Entity::new("MathTests", FILE, EntityKind::Class { base: None });
    let err = lower_one(SourceFile::new(FILE, root, vec![])).unwrap_err();
    assert!(matches!(err, LowerError::Internal { .. }));
}

#[test]
fn nested_fixtures_nest_groups() {
    let inner = EntityDeclaration::new(
        Entity::new("MathTests.Addition.Carry", FILE, EntityKind::Module).decorated("TestFixture"),
        vec![Declaration::Member(method("carries", &[], one_plus_one()).decorated("TestCase"))],
    );
    let outer = EntityDeclaration::new(
        Entity::new("MathTests.Addition", FILE, EntityKind::Module).decorated("TestFixture"),
        vec![Declaration::Entity(inner)],
    );
    let program = lower_one(source_file(FILE, "MathTests", vec![Declaration::Entity(outer)])).unwrap();

    let (_, body) = exported(&program);
    let (function, name, callback) = registration(&body[0]);
    assert_eq!((function, name), ("describe", "Addition"));
    let JsExpr::Arrow(arrow) = callback else { panic!("expected arrow") };
    let ArrowBody::Block(group) = &arrow.body else { panic!("expected block") };
    let (function, name, _) = registration(&group[0]);
    assert_eq!((function, name), ("describe", "Carry"));
}

#[test]
fn test_marker_on_class_method_is_unsupported() {
    let class = EntityDeclaration::new(
        Entity::new("MathTests.Suite", FILE, EntityKind::Class { base: None }),
        vec![Declaration::Member(method("check", &[], one_plus_one()).decorated("TestCase"))],
    );
    let err = lower_one(source_file(FILE, "MathTests", vec![Declaration::Entity(class)])).unwrap_err();
    assert!(matches!(err, LowerError::Unsupported { .. }));
}

#[test]
fn custom_markers_and_runtime() {
    let config = LowerConfig::parse(
        "[markers]\ntest-case = \"Fact\"\n\n[test-runtime]\ncase-fn = \"test\"\n",
        std::path::Path::new("esgen.toml"),
    )
    .unwrap();
    let case = method("works", &[], one_plus_one()).decorated("Fact");
    let ignored = method("plain", &[], one_plus_one()).decorated("TestCase");
    let file: SourceFile = source_file(FILE, "MathTests", vec![Declaration::Member(case), Declaration::Member(ignored)]);
    let project = Project::new(vec![file]);
    let program = esgen::lower_file(&project, &project.files[0], &config).unwrap();

    let (_, body) = exported(&program);
    assert_eq!(registration(&body[0]).0, "test");
    // The default marker name means nothing under a custom config.
    assert!(const_init(body, "plain").is_some());
}
