use pretty_assertions::assert_eq;

use super::*;
use crate::expr::{BinaryOpExpr, CallExpr, ExtVariant};
use crate::stmt::{GotoStmt, IfStmt, VarDefStmt};

#[test]
fn test_clone_expression_is_distinct_and_equal() {
    let mut arena = IrArena::new();
    let i32_ty = arena.int_type(32, true);
    let five = arena.const_int(5, i32_ty);
    let three = arena.const_int(3, i32_ty);
    let and = arena.bit_and_op(five, three);

    let copy = arena.clone_value(and);
    assert_ne!(copy, and);
    assert!(arena.is_equal_to(and, copy));

    let Some((c1, c2)) = arena
        .cast::<BinaryOpExpr>(copy)
        .map(|e| (e.first_operand(), e.second_operand()))
    else {
        panic!("clone of a binary operator must be a binary operator");
    };
    assert_ne!(c1, five);
    assert_ne!(c2, three);
    assert!(arena.is_equal_to(c1, five));
    assert_eq!(arena.subjects(copy), &[c1, c2]);
    assert!(arena.observers(copy).is_empty());
}

#[test]
fn test_clone_shares_variables_and_functions() {
    let mut arena = IrArena::new();
    let i32_ty = arena.int_type(32, true);
    let x = arena.variable("x", i32_ty);
    let f = arena.function("f", i32_ty, vec![x], None, false);

    assert_eq!(arena.clone_value(x), x);
    assert_eq!(arena.clone_value(f), f);
    assert_eq!(arena.clone_value(i32_ty), i32_ty);

    let call = arena.call(f, vec![x]);
    let copy = arena.clone_value(call);
    let payload = arena.cast::<CallExpr>(copy).cloned();
    assert_eq!(payload.map(|c| (c.callee(), c.args().to_vec())), Some((f, vec![x])));
    assert!(arena.is_equal_to(call, copy));
    // Two registrations on `x`: the original call and the clone.
    assert_eq!(arena.observers(x), &[f, call, copy]);
}

#[test]
fn test_clone_copies_metadata() {
    let mut arena = IrArena::new();
    let i32_ty = arena.int_type(32, true);
    let x = arena.variable("x", i32_ty);
    let neg = arena.neg_op(x);
    arena.metadata_mut(neg).set("origin", "0x401000");

    let copy = arena.clone_value(neg);
    assert_eq!(arena.metadata(copy).get("origin"), Some("0x401000"));

    // Metadata is per node after cloning.
    arena.metadata_mut(copy).set("origin", "elsewhere");
    assert_eq!(arena.metadata(neg).get("origin"), Some("0x401000"));
}

#[test]
fn test_clone_keeps_ext_variant() {
    let mut arena = IrArena::new();
    let i8_ty = arena.int_type(8, true);
    let i32_ty = arena.int_type(32, true);
    let x = arena.variable("x", i8_ty);
    let zext = arena.ext_cast(x, i32_ty, ExtVariant::ZExt);
    let copy = arena.clone_value(zext);
    assert_eq!(
        arena.cast::<crate::expr::CastExpr>(copy).and_then(|c| c.variant()),
        Some(ExtVariant::ZExt)
    );
}

#[test]
fn test_clone_statement_drops_successor() {
    let mut arena = IrArena::new();
    let i32_ty = arena.int_type(32, true);
    let x = arena.variable("x", i32_ty);
    let one = arena.const_int(1, i32_ty);
    let def = arena.var_def_stmt(x, Some(one));
    let next = arena.return_stmt(Some(x));
    arena.set_successor(def, Some(next));

    let copy = arena.clone_value(def);
    assert_eq!(arena.successor(copy), None);
    assert_eq!(arena.predecessor(copy), None);
    let payload = arena.cast::<VarDefStmt>(copy).cloned();
    assert_eq!(payload.as_ref().map(VarDefStmt::var), Some(x));
    assert_ne!(payload.and_then(|d| d.initializer()), Some(one));
    assert!(arena.is_equal_to(def, copy));
}

#[test]
fn test_clone_compound_truncates_body_chain() {
    let mut arena = IrArena::new();
    let i32_ty = arena.int_type(32, true);
    let x = arena.variable("x", i32_ty);
    let head = arena.assign_stmt(x, x);
    let tail = arena.break_stmt();
    arena.set_successor(head, Some(tail));
    let if_stmt = arena.if_stmt(x, head);

    let copy = arena.clone_value(if_stmt);
    let body = arena.cast::<IfStmt>(copy).map(IfStmt::first_body);
    let Some(body) = body else {
        panic!("clone of an if must be an if");
    };
    assert_ne!(body, head);
    assert!(arena.is_equal_to(body, head));
    assert_eq!(arena.successor(body), None);
    assert_eq!(arena.statements(body).count(), 1);
    assert!(arena.is_equal_to(if_stmt, copy));
}

#[test]
fn test_clone_goto_keeps_target() {
    let mut arena = IrArena::new();
    let target = arena.empty_stmt();
    let goto = arena.goto_stmt(target);
    let copy = arena.clone_value(goto);
    assert_eq!(arena.cast::<GotoStmt>(copy).map(GotoStmt::target), Some(target));
    assert_eq!(arena.observers(target), &[goto, copy]);
}

#[test]
fn test_clone_statements_copies_whole_chain() {
    let mut arena = IrArena::new();
    let first = arena.empty_stmt();
    let second = arena.break_stmt();
    let third = arena.continue_stmt();
    arena.set_successor(first, Some(second));
    arena.set_successor(second, Some(third));

    let copy = arena.clone_statements(first);
    let original: Vec<_> = arena.statements(first).collect();
    let copied: Vec<_> = arena.statements(copy).collect();
    assert_eq!(copied.len(), 3);
    for (a, b) in original.iter().zip(&copied) {
        assert_ne!(a, b);
        assert!(arena.is_equal_to(*a, *b));
    }
    assert_eq!(arena.predecessor(copied[1]), Some(copied[0]));
}

#[test]
fn test_clone_of_dead_handle_fails() {
    let mut arena = IrArena::new();
    assert_eq!(
        arena.try_clone_value(ValueId::new(3)),
        Err(IrError::DeadValue { id: ValueId::new(3) })
    );
    assert!(arena.try_clone_statements(ValueId::INVALID).is_err());
}
