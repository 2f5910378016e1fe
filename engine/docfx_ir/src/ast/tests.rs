use super::*;
use pretty_assertions::assert_eq;

fn lit(arena: &mut ExprArena, value: Value) -> ExprId {
    arena.alloc(Expr::new(ExprKind::Literal(value), Span::DUMMY))
}

#[test]
fn test_sexpr_binary_and_call() {
    let mut arena = ExprArena::new();
    let one = lit(&mut arena, Value::from(1));
    let two = lit(&mut arena, Value::from(2));
    let sum = arena.alloc(Expr::new(
        ExprKind::Binary {
            op: BinaryOp::Add,
            left: one,
            right: two,
        },
        Span::new(0, 5),
    ));
    let text = lit(&mut arena, Value::from("x"));
    let call = arena.alloc(Expr::new(
        ExprKind::Call {
            name: "MAX".to_string(),
            args: vec![sum, text],
        },
        Span::new(0, 12),
    ));

    let ast = Ast::new(arena, call);
    assert_eq!(ast.to_sexpr(), r#"(MAX (+ 1 2) "x")"#);
    assert_eq!(ast.arena().len(), 5);
}

#[test]
fn test_sexpr_scope_paths() {
    let mut arena = ExprArena::new();
    let sup = arena.alloc(Expr::new(ExprKind::ScopeRef { depth: 2 }, Span::DUMMY));
    let field = arena.alloc(Expr::new(
        ExprKind::Field {
            receiver: sup,
            field: "name".to_string(),
        },
        Span::DUMMY,
    ));
    let zero = lit(&mut arena, Value::from(0));
    let index = arena.alloc(Expr::new(
        ExprKind::Index {
            receiver: field,
            index: zero,
        },
        Span::DUMMY,
    ));

    let ast = Ast::new(arena, index);
    assert_eq!(ast.to_sexpr(), "([] (. super.super name) 0)");
}

#[test]
fn test_operator_precedence_order() {
    assert!(BinaryOp::Mul.precedence() > BinaryOp::Add.precedence());
    assert!(BinaryOp::Add.precedence() > BinaryOp::Lt.precedence());
    assert!(BinaryOp::Lt.precedence() > BinaryOp::Eq.precedence());
    assert!(BinaryOp::Eq.precedence() > BinaryOp::And.precedence());
    assert!(BinaryOp::And.precedence() > BinaryOp::Or.precedence());
}
