use pretty_assertions::assert_eq;

use super::*;
use crate::expr::{BinaryOpExpr, TernaryOpExpr};
use crate::stmt::{ReturnStmt, VarDefStmt};
use crate::{StmtKind, ValueKind};

struct Fixture {
    arena: IrArena,
    a: ValueId,
    b: ValueId,
    c: ValueId,
}

fn fixture() -> Fixture {
    let mut arena = IrArena::new();
    let ty = arena.int_type(32, true);
    let a = arena.variable("a", ty);
    let b = arena.variable("b", ty);
    let c = arena.variable("c", ty);
    Fixture { arena, a, b, c }
}

fn operands(arena: &IrArena, id: ValueId) -> Option<(ValueId, ValueId)> {
    arena
        .cast::<BinaryOpExpr>(id)
        .map(|e| (e.first_operand(), e.second_operand()))
}

#[test]
fn test_add_remove_is_symmetric() {
    let Fixture {
        mut arena, a, b, ..
    } = fixture();
    arena.add_observer(a, b);
    assert!(arena.has_observer(a, b));
    assert_eq!(arena.subjects(b), &[a]);

    arena.remove_observer(a, b);
    assert!(!arena.has_observer(a, b));
    assert!(arena.subjects(b).is_empty());

    // Removing an absent registration is a no-op.
    arena.remove_observer(a, b);
    assert!(arena.observers(a).is_empty());
}

#[test]
fn test_add_observer_rejects_dead_handles() {
    let Fixture { mut arena, a, .. } = fixture();
    assert_eq!(
        arena.try_add_observer(a, ValueId::new(500)),
        Err(IrError::DeadValue {
            id: ValueId::new(500)
        })
    );
    assert!(arena.observers(a).is_empty());
}

#[test]
fn test_setter_moves_registration() {
    let Fixture {
        mut arena, a, b, c
    } = fixture();
    let sub = arena.sub_op(a, b);

    arena.set_first_operand(sub, c);
    assert_eq!(operands(&arena, sub), Some((c, b)));
    assert!(!arena.has_observer(a, sub));
    assert!(arena.has_observer(c, sub));
    assert_eq!(arena.subjects(sub), &[b, c]);
}

#[test]
fn test_setter_on_wrong_kind_reports_missing_edge() {
    let Fixture {
        mut arena, a, b, ..
    } = fixture();
    let neg = arena.neg_op(a);
    assert_eq!(
        arena.try_set_first_operand(neg, b),
        Err(IrError::NoSuchEdge {
            role: "first operand",
            found: arena.kind(neg),
        })
    );
    assert!(arena.try_set_operand(neg, b).is_ok());
}

#[test]
fn test_update_replaces_matching_operand() {
    let Fixture {
        mut arena, a, b, c
    } = fixture();
    let add = arena.add_op(a, b);

    arena.update(add, b, Some(c));
    assert_eq!(operands(&arena, add), Some((a, c)));
    assert!(!arena.has_observer(b, add));
    assert!(arena.has_observer(c, add));
}

#[test]
fn test_update_rewrites_every_edge_holding_subject() {
    let Fixture {
        mut arena, a, c, ..
    } = fixture();
    let mul = arena.mul_op(a, a);

    arena.update(mul, a, Some(c));
    assert_eq!(operands(&arena, mul), Some((c, c)));
    assert!(arena.observers(a).is_empty());
    assert_eq!(arena.observers(c), &[mul, mul]);
}

#[test]
fn test_update_with_null_subject_is_noop() {
    let Fixture {
        mut arena, a, b, c
    } = fixture();
    let add = arena.add_op(a, b);
    arena.update(add, ValueId::INVALID, Some(c));
    assert_eq!(operands(&arena, add), Some((a, b)));
}

#[test]
fn test_update_with_unrelated_subject_is_noop() {
    let Fixture {
        mut arena, a, b, c
    } = fixture();
    let add = arena.add_op(a, b);
    arena.update(add, c, Some(a));
    assert_eq!(operands(&arena, add), Some((a, b)));
}

#[test]
fn test_update_with_none_clears_only_optional_edges() {
    let Fixture {
        mut arena, a, b, ..
    } = fixture();
    let ret = arena.return_stmt(Some(b));
    arena.update(ret, b, None);
    assert_eq!(arena.cast::<ReturnStmt>(ret).map(ReturnStmt::value), Some(None));
    assert!(!arena.has_observer(b, ret));

    let add = arena.add_op(a, b);
    arena.update(add, b, None);
    assert_eq!(operands(&arena, add), Some((a, b)));
}

#[test]
fn test_update_ignores_incompatible_replacement() {
    let Fixture {
        mut arena, a, b, ..
    } = fixture();
    let def = arena.var_def_stmt(a, Some(b));
    let i32_ty = arena.int_type(32, true);
    let one = arena.const_int(1, i32_ty);

    // The defined variable only accepts variables; the initializer accepts
    // any expression.
    arena.update(def, a, Some(one));
    arena.update(def, b, Some(one));
    let payload = arena.cast::<VarDefStmt>(def).cloned();
    assert_eq!(payload.map(|d| (d.var(), d.initializer())), Some((a, Some(one))));
}

#[test]
fn test_notify_observers_reaches_every_owner() {
    let Fixture {
        mut arena, a, b, c
    } = fixture();
    let add = arena.add_op(a, b);
    let ternary = arena.ternary_op(b, a, b);

    arena.notify_observers(b, Some(c));
    assert_eq!(operands(&arena, add), Some((a, c)));
    let t = arena.cast::<TernaryOpExpr>(ternary).cloned();
    assert_eq!(
        t.map(|t| (t.condition(), t.true_value(), t.false_value())),
        Some((c, a, c))
    );
    assert!(arena.observers(b).is_empty());
}

#[test]
fn test_replace_value_replaces_statement_body() {
    let Fixture { mut arena, a, .. } = fixture();
    let body = arena.break_stmt();
    let new_body = arena.continue_stmt();
    let w = arena.while_loop_stmt(a, body);

    arena.replace_value(body, new_body);
    assert_eq!(
        arena.cast::<crate::stmt::WhileLoopStmt>(w).map(|w| w.body()),
        Some(new_body)
    );
    assert!(arena.observers(body).is_empty());
    assert_eq!(arena.observers(new_body), &[w]);
}

#[test]
fn test_if_and_switch_clauses() {
    let Fixture {
        mut arena, a, b, c
    } = fixture();
    let then_body = arena.empty_stmt();
    let elif_body = arena.break_stmt();
    let else_body = arena.continue_stmt();
    let if_stmt = arena.if_stmt(a, then_body);
    arena.add_if_clause(if_stmt, b, elif_body);
    arena.set_else_clause(if_stmt, Some(else_body));

    let clauses = arena.cast::<IfStmt>(if_stmt).map(|s| s.clauses().to_vec());
    assert_eq!(clauses, Some(vec![(a, then_body), (b, elif_body)]));
    assert!(arena.has_observer(else_body, if_stmt));

    arena.remove_else_clause(if_stmt);
    assert!(!arena.has_observer(else_body, if_stmt));
    assert_eq!(arena.cast::<IfStmt>(if_stmt).and_then(IfStmt::else_body), None);

    let case_body = arena.empty_stmt();
    let default_body = arena.unreachable_stmt();
    let sw = arena.switch_stmt(c);
    arena.add_switch_clause(sw, Some(a), case_body);
    arena.add_switch_clause(sw, None, default_body);
    let sw_payload = arena.cast::<SwitchStmt>(sw).cloned();
    assert_eq!(sw_payload.as_ref().map(SwitchStmt::has_default_clause), Some(true));
    assert!(arena.has_observer(default_body, sw));
    assert_eq!(arena.kind(sw), ValueKind::Statement(StmtKind::Switch));

    assert!(matches!(
        arena.try_add_if_clause(sw, a, case_body),
        Err(IrError::KindMismatch { role: "owner", .. })
    ));
}

#[test]
fn test_initializer_and_rename() {
    let Fixture {
        mut arena, a, b, ..
    } = fixture();
    let def = arena.var_def_stmt(a, Some(b));
    arena.remove_initializer(def);
    assert_eq!(
        arena.cast::<VarDefStmt>(def).map(VarDefStmt::has_initializer),
        Some(false)
    );
    assert!(arena.observers(b).is_empty());

    arena.set_variable_name(a, "renamed");
    assert_eq!(arena.cast::<Variable>(a).map(Variable::name), Some("renamed"));
    assert!(arena.try_set_variable_name(def, "x").is_err());
}

#[test]
fn test_update_keeps_body_when_replacement_is_owned_elsewhere() {
    let Fixture { mut arena, a, .. } = fixture();
    let body = arena.empty_stmt();
    let if_stmt = arena.if_stmt(a, body);
    let first = arena.break_stmt();
    let second = arena.continue_stmt();
    arena.set_successor(first, Some(second));

    arena.replace_value(body, second);
    let clauses = arena.cast::<IfStmt>(if_stmt).map(|s| s.clauses().to_vec());
    assert_eq!(clauses, Some(vec![(a, body)]));
    assert!(!arena.has_observer(second, if_stmt));

    // Releasing the `if` leaves the chain `first -> second` intact.
    arena.release(if_stmt);
    assert!(arena.is_live(second));
    assert_eq!(arena.successor(first), Some(second));
}

#[test]
fn test_update_gives_an_owned_replacement_to_one_body_only() {
    let Fixture { mut arena, a, .. } = fixture();
    let body = arena.empty_stmt();
    let while_stmt = arena.while_loop_stmt(a, body);
    let new_body = arena.break_stmt();

    arena.update(while_stmt, body, Some(new_body));
    assert_eq!(
        arena.cast::<crate::stmt::WhileLoopStmt>(while_stmt).map(|w| w.body()),
        Some(new_body)
    );
    // The loop cannot take itself as its body.
    arena.update(while_stmt, new_body, Some(while_stmt));
    assert_eq!(
        arena.cast::<crate::stmt::WhileLoopStmt>(while_stmt).map(|w| w.body()),
        Some(new_body)
    );
}

#[test]
fn test_statement_cannot_become_its_own_body() {
    let Fixture { mut arena, a, .. } = fixture();
    let body = arena.empty_stmt();
    let while_stmt = arena.while_loop_stmt(a, body);
    assert_eq!(
        arena.try_set_body(while_stmt, while_stmt),
        Err(IrError::ChainCycle { id: while_stmt })
    );

    // The structure is unchanged, so traversals still terminate.
    let copy = arena.clone_value(while_stmt);
    assert!(arena.is_equal_to(while_stmt, copy));
}

#[test]
fn test_statement_cannot_become_body_of_its_descendant() {
    let Fixture {
        mut arena, a, b, ..
    } = fixture();
    let inner_body = arena.empty_stmt();
    let inner = arena.if_stmt(b, inner_body);
    let outer = arena.if_stmt(a, inner);

    assert_eq!(
        arena.try_set_else_clause(inner, Some(outer)),
        Err(IrError::ChainCycle { id: outer })
    );
    assert_eq!(
        arena.try_add_if_clause(inner, a, outer),
        Err(IrError::ChainCycle { id: outer })
    );
    assert_eq!(arena.cast::<IfStmt>(inner).and_then(IfStmt::else_body), None);
    assert!(!arena.has_observer(outer, inner));
}
