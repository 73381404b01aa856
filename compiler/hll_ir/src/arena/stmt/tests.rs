use pretty_assertions::assert_eq;

use super::*;
use crate::BinaryOpExpr;

fn chain(arena: &mut IrArena, len: usize) -> Vec<ValueId> {
    let stmts: Vec<ValueId> = (0..len).map(|_| arena.empty_stmt()).collect();
    for pair in stmts.windows(2) {
        arena.set_successor(pair[0], Some(pair[1]));
    }
    stmts
}

#[test]
fn test_successor_links_both_ways() {
    let mut arena = IrArena::new();
    let stmts = chain(&mut arena, 3);
    assert_eq!(arena.successor(stmts[0]), Some(stmts[1]));
    assert_eq!(arena.predecessor(stmts[1]), Some(stmts[0]));
    assert_eq!(arena.successor(stmts[2]), None);
    assert_eq!(arena.statements(stmts[0]).collect::<Vec<_>>(), stmts);
}

#[test]
fn test_statements_of_non_statement_is_empty() {
    let mut arena = IrArena::new();
    let t = arena.const_bool(true);
    assert_eq!(arena.statements(t).count(), 0);
    assert_eq!(arena.statements(ValueId::INVALID).count(), 0);
}

#[test]
fn test_replacing_successor_detaches_old_one() {
    let mut arena = IrArena::new();
    let stmts = chain(&mut arena, 2);
    let other = arena.break_stmt();
    arena.set_successor(stmts[0], Some(other));
    assert_eq!(arena.predecessor(stmts[1]), None);
    assert_eq!(arena.predecessor(other), Some(stmts[0]));

    // The detached statement can be linked again.
    arena.set_successor(other, Some(stmts[1]));
    assert_eq!(arena.statements(stmts[0]).count(), 3);
}

#[test]
fn test_clearing_successor() {
    let mut arena = IrArena::new();
    let stmts = chain(&mut arena, 2);
    arena.set_successor(stmts[0], None);
    assert_eq!(arena.successor(stmts[0]), None);
    assert_eq!(arena.predecessor(stmts[1]), None);
}

#[test]
fn test_remove_successor_returns_detached_chain() {
    let mut arena = IrArena::new();
    let stmts = chain(&mut arena, 3);
    assert_eq!(arena.remove_successor(stmts[0]), Some(stmts[1]));
    assert_eq!(arena.statements(stmts[0]).count(), 1);
    assert_eq!(arena.statements(stmts[1]).count(), 2);
    assert_eq!(arena.remove_successor(stmts[0]), None);
}

#[test]
fn test_append_walks_to_the_end() {
    let mut arena = IrArena::new();
    let stmts = chain(&mut arena, 2);
    let ret = arena.return_stmt(None);
    arena.append_statement(stmts[0], ret);
    assert_eq!(arena.successor(stmts[1]), Some(ret));
    assert_eq!(arena.statements(stmts[0]).last(), Some(ret));
}

#[test]
fn test_cycle_is_rejected() {
    let mut arena = IrArena::new();
    let stmts = chain(&mut arena, 3);
    let head = stmts[0];
    assert_eq!(
        arena.try_set_successor(head, Some(head)),
        Err(IrError::ChainCycle { id: head })
    );
    // The head has no owner, so only the cycle check can refuse it.
    assert_eq!(
        arena.try_set_successor(stmts[2], Some(head)),
        Err(IrError::ChainCycle { id: head })
    );
}

#[test]
fn test_linked_statement_cannot_be_linked_twice() {
    let mut arena = IrArena::new();
    let stmts = chain(&mut arena, 2);
    let other = arena.empty_stmt();
    assert_eq!(
        arena.try_set_successor(other, Some(stmts[1])),
        Err(IrError::AlreadyOwned {
            id: stmts[1],
            owner: stmts[0],
        })
    );
}

#[test]
fn test_body_head_cannot_become_successor() {
    let mut arena = IrArena::new();
    let t = arena.const_bool(true);
    let body = arena.empty_stmt();
    let while_stmt = arena.while_loop_stmt(t, body);
    let before = arena.empty_stmt();
    assert_eq!(
        arena.try_set_successor(before, Some(body)),
        Err(IrError::AlreadyOwned {
            id: body,
            owner: while_stmt,
        })
    );
}

#[test]
fn test_successor_must_be_a_statement() {
    let mut arena = IrArena::new();
    let stmt = arena.empty_stmt();
    let t = arena.const_bool(true);
    assert!(matches!(
        arena.try_set_successor(stmt, Some(t)),
        Err(IrError::KindMismatch {
            role: "successor",
            ..
        })
    ));
    assert!(matches!(
        arena.try_set_successor(t, None),
        Err(IrError::KindMismatch {
            role: "statement",
            ..
        })
    ));
}

#[test]
fn test_compound_statements() {
    let mut arena = IrArena::new();
    let t = arena.const_bool(true);
    let body = arena.empty_stmt();
    let if_stmt = arena.if_stmt(t, body);
    let plain = arena.break_stmt();
    assert!(arena.is_compound(if_stmt));
    assert!(!arena.is_compound(plain));
    assert!(!arena.is_compound(t));
}

#[test]
fn test_loop_cannot_follow_a_statement_of_its_body() {
    let mut arena = IrArena::new();
    let t = arena.const_bool(true);
    let body = arena.empty_stmt();
    let while_stmt = arena.while_loop_stmt(t, body);
    assert_eq!(
        arena.try_set_successor(body, Some(while_stmt)),
        Err(IrError::ChainCycle { id: while_stmt })
    );

    let tail = arena.break_stmt();
    arena.set_successor(body, Some(tail));
    assert_eq!(
        arena.try_set_successor(tail, Some(while_stmt)),
        Err(IrError::ChainCycle { id: while_stmt })
    );
    assert_eq!(arena.successor(tail), None);
}

#[test]
fn test_address_survives_clone_and_is_ignored_by_equality() {
    let mut arena = IrArena::new();
    let a = arena.break_stmt();
    let b = arena.break_stmt();
    assert_eq!(arena.statement_address(a), None);

    arena.set_statement_address(a, Some(0x0040_1000));
    assert_eq!(arena.statement_address(a), Some(0x0040_1000));
    assert!(arena.is_equal_to(a, b));

    let copy = arena.clone_value(a);
    assert_eq!(arena.statement_address(copy), Some(0x0040_1000));

    arena.set_statement_address(a, None);
    assert_eq!(arena.statement_address(a), None);
    assert_eq!(arena.statement_address(copy), Some(0x0040_1000));

    let t = arena.const_bool(true);
    assert!(matches!(
        arena.try_set_statement_address(t, Some(1)),
        Err(IrError::KindMismatch {
            role: "statement",
            ..
        })
    ));
    assert_eq!(arena.statement_address(t), None);
}

#[test]
fn test_assignment_and_definition_as_expression() {
    let mut arena = IrArena::new();
    let i32_ty = arena.int_type(32, true);
    let x = arena.variable("x", i32_ty);
    let one = arena.const_int(1, i32_ty);
    let two = arena.const_int(2, i32_ty);
    let sum = arena.add_op(one, two);

    let assign = arena.assign_stmt(x, sum);
    let expr = arena.as_expression(assign).unwrap();
    let op = arena.cast::<BinaryOpExpr>(expr).unwrap();
    assert_eq!(op.op(), BinaryOpKind::Assign);
    assert_eq!(op.first_operand(), x);
    let rhs = op.second_operand();
    assert_ne!(rhs, sum);
    assert!(arena.is_equal_to(rhs, sum));

    let def = arena.var_def_stmt(x, Some(two));
    let expr = arena.as_expression(def).unwrap();
    let op = arena.cast::<BinaryOpExpr>(expr).unwrap();
    assert_eq!(op.first_operand(), x);
    assert!(arena.is_equal_to(op.second_operand(), two));

    let y = arena.variable("y", i32_ty);
    let bare = arena.var_def_stmt(y, None);
    assert_eq!(arena.as_expression(bare), None);
}

#[test]
fn test_call_and_other_statements_as_expression() {
    let mut arena = IrArena::new();
    let void = arena.void_type();
    let f = arena.function("f", void, Vec::new(), None, true);
    let call = arena.call(f, Vec::new());
    let stmt = arena.call_stmt(call);

    let expr = arena.as_expression(stmt).unwrap();
    assert_ne!(expr, call);
    assert!(arena.is_equal_to(expr, call));

    let brk = arena.break_stmt();
    assert_eq!(arena.as_expression(brk), None);

    let t = arena.const_bool(true);
    assert!(matches!(
        arena.try_as_expression(t),
        Err(IrError::KindMismatch { .. })
    ));
}
