mod common;

use common::*;
use esgen::ir::{BinaryOp, Declaration, Expr, ExternalBinding, Type, Value};
use esgen::js::{JsExpr, JsStmt};
use esgen::naming::alias_name;
use esgen::LowerError;

const A: &str = "src/A.fs";
const B: &str = "src/B.fs";

fn file_a() -> esgen::ir::SourceFile {
    let foo = module("Lib.Core.Foo", A, vec![Declaration::Member(method("make", &[], Expr::int(1)).public())]);
    source_file(A, "Lib.Core", vec![Declaration::Entity(foo)])
}

/// `B.run() = <body>` in file B, lowered with A also in the project.
fn lower_b(body: Expr) -> Result<esgen::js::Program, LowerError> {
    let run = method("run", &[], body).public();
    let b = source_file(B, "App", vec![Declaration::Member(run)]);
    lower_first(vec![b, file_a()])
}

fn run_body(program: &esgen::js::Program) -> Vec<JsStmt> {
    let (_, body) = exported(program);
    match const_init(body, "run") {
        Some(JsExpr::Function(f)) => f.body.clone(),
        other => panic!("expected run function, got {other:?}"),
    }
}

fn foo_ref() -> Expr {
    Expr::type_ref("Lib.Core.Foo", A)
}

#[test]
fn reference_into_other_file_imports_it() {
    let program = lower_b(foo_ref()).unwrap();
    assert_eq!(imports(&program), vec![(alias_name(1), A.to_string())]);
    assert_eq!(
        run_body(&program),
        vec![JsStmt::ret(JsExpr::member(JsExpr::ident(alias_name(1)), "Foo"))]
    );
}

#[test]
fn repeated_references_share_one_import() {
    let call = |name: &str| {
        Expr::apply(
            Expr::get(foo_ref(), Expr::string(name), Type::Any),
            vec![],
            Type::Number,
        )
    };
    let body = Expr::binary(BinaryOp::Add, call("make"), call("make"), Type::Number);
    let program = lower_b(body).unwrap();
    assert_eq!(imports(&program).len(), 1);
}

#[test]
fn imports_come_first_in_first_use_order() {
    let util = Expr::value(Value::ImportRef { path: "./util.js".to_string(), member: None }, Type::Any);
    let body = Expr::sequential(vec![
        Expr::apply(util, vec![], Type::Unit),
        Expr::apply(Expr::get(foo_ref(), Expr::string("make"), Type::Any), vec![], Type::Unit),
    ]);
    let program = lower_b(body).unwrap();
    assert_eq!(
        imports(&program),
        vec![(alias_name(1), "./util.js".to_string()), (alias_name(2), A.to_string())]
    );
    assert!(matches!(program.statements[0], JsStmt::Decl(_)));
    assert!(matches!(program.statements.last(), Some(JsStmt::ExportDefault(_))));
}

#[test]
fn import_module_binding_in_declaring_file() {
    let a = file_a().with_binding(ExternalBinding::ImportModule {
        prefix: "Lib.Core".to_string(),
        path: "core-lib".to_string(),
    });
    let run = method("run", &[], foo_ref()).public();
    let b = source_file(B, "App", vec![Declaration::Member(run)]);
    let program = lower_first(vec![b, a]).unwrap();
    assert_eq!(imports(&program), vec![(alias_name(1), "core-lib".to_string())]);
    assert_eq!(
        run_body(&program),
        vec![JsStmt::ret(JsExpr::member(JsExpr::ident(alias_name(1)), "Foo"))]
    );
}

#[test]
fn global_binding_needs_no_import() {
    let a = file_a().with_binding(ExternalBinding::GlobalModule { prefix: "Lib".to_string() });
    let run = method("run", &[], foo_ref()).public();
    let b = source_file(B, "App", vec![Declaration::Member(run)]);
    let program = lower_first(vec![b, a]).unwrap();
    assert!(imports(&program).is_empty());
    assert_eq!(
        run_body(&program),
        vec![JsStmt::ret(JsExpr::member(JsExpr::ident("Core"), "Foo"))]
    );
}

#[test]
fn erased_entity_reaches_parent_namespace() {
    let mut reference = foo_ref();
    if let esgen::ir::ExprKind::Value(Value::TypeRef(entity)) = &mut reference.kind {
        entity.decorators.push(esgen::ir::Decorator::new("Erase"));
    }
    let program = lower_b(reference).unwrap();
    // `Lib.Core` is the declaring file's root, so the alias itself is the value.
    assert_eq!(run_body(&program), vec![JsStmt::ret(JsExpr::ident(alias_name(1)))]);
}

#[test]
fn missing_declaring_file_is_unresolved() {
    let ghost = Expr::type_ref("Ghost.Thing", "src/Ghost.fs");
    match lower_b(ghost) {
        Err(LowerError::Unresolved { name, .. }) => assert_eq!(name, "Ghost.Thing"),
        other => panic!("expected unresolved error, got {other:?}"),
    }
}

#[test]
fn failing_file_does_not_affect_others() {
    let bad = source_file(
        B,
        "App",
        vec![Declaration::Member(method(
            "bad",
            &[],
            Expr::binary(BinaryOp::Add, Expr::var("x", Expr::int(1), false), Expr::int(1), Type::Number),
        ))],
    );
    let good = source_file("src/C.fs", "Other", vec![Declaration::Member(method("ok", &[], Expr::int(1)))]);
    let project = esgen::ir::Project::new(vec![bad, good, file_a()]);
    let results = esgen::lower_project(&project, &esgen::LowerConfig::default());
    assert_eq!(results.len(), 3);
    assert!(results[0].1.is_err());
    assert!(results[1].1.is_ok());
    assert!(results[2].1.is_ok());
    assert_eq!(results[1].0, "src/C.fs");
}
