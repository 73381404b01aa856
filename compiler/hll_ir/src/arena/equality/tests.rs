use super::*;
use crate::expr::ExtVariant;

#[test]
fn test_equal_constants() {
    let mut arena = IrArena::new();
    let i32_ty = arena.int_type(32, true);
    let u32_ty = arena.int_type(32, false);
    let a = arena.const_int(5, i32_ty);
    let b = arena.const_int(5, i32_ty);
    let c = arena.const_int(6, i32_ty);
    let d = arena.const_int(5, u32_ty);

    assert!(arena.is_equal_to(a, a));
    assert!(arena.is_equal_to(a, b));
    assert!(!arena.is_equal_to(a, c));
    assert!(!arena.is_equal_to(a, d));
}

#[test]
fn test_null_and_dead_handles_equal_nothing() {
    let mut arena = IrArena::new();
    let t = arena.const_bool(true);
    assert!(!arena.is_equal_to(t, ValueId::INVALID));
    assert!(!arena.is_equal_to(ValueId::INVALID, ValueId::INVALID));
    assert!(!arena.is_equal_to(ValueId::new(77), ValueId::new(77)));
}

#[test]
fn test_operator_kind_matters() {
    let mut arena = IrArena::new();
    let i32_ty = arena.int_type(32, true);
    let x = arena.variable("x", i32_ty);
    let y = arena.variable("y", i32_ty);
    let add = arena.add_op(x, y);
    let sub = arena.sub_op(x, y);
    let add2 = arena.add_op(x, y);
    let swapped = arena.add_op(y, x);

    assert!(!arena.is_equal_to(add, sub));
    assert!(arena.is_equal_to(add, add2));
    assert!(!arena.is_equal_to(add, swapped));
}

#[test]
fn test_variables_compare_by_name_and_type() {
    let mut arena = IrArena::new();
    let i32_ty = arena.int_type(32, true);
    let i64_ty = arena.int_type(64, true);
    let x = arena.variable("x", i32_ty);
    let x_again = arena.variable("x", i32_ty);
    let x_wide = arena.variable("x", i64_ty);
    assert!(arena.is_equal_to(x, x_again));
    assert!(!arena.is_equal_to(x, x_wide));
}

#[test]
fn test_ext_variant_matters() {
    let mut arena = IrArena::new();
    let i8_ty = arena.int_type(8, true);
    let i32_ty = arena.int_type(32, true);
    let x = arena.variable("x", i8_ty);
    let sext = arena.ext_cast(x, i32_ty, ExtVariant::SExt);
    let zext = arena.ext_cast(x, i32_ty, ExtVariant::ZExt);
    let sext2 = arena.ext_cast(x, i32_ty, ExtVariant::SExt);
    let trunc = arena.trunc_cast(x, i32_ty);

    assert!(!arena.is_equal_to(sext, zext));
    assert!(arena.is_equal_to(sext, sext2));
    assert!(!arena.is_equal_to(sext, trunc));
}

#[test]
fn test_statements_ignore_successor() {
    let mut arena = IrArena::new();
    let a = arena.break_stmt();
    let b = arena.break_stmt();
    let next = arena.continue_stmt();
    arena.set_successor(a, Some(next));
    assert!(arena.is_equal_to(a, b));
}

#[test]
fn test_goto_compares_target_identity() {
    let mut arena = IrArena::new();
    let t1 = arena.empty_stmt();
    let t2 = arena.empty_stmt();
    let g1 = arena.goto_stmt(t1);
    let g2 = arena.goto_stmt(t1);
    let g3 = arena.goto_stmt(t2);
    assert!(arena.is_equal_to(t1, t2));
    assert!(arena.is_equal_to(g1, g2));
    assert!(!arena.is_equal_to(g1, g3));
}

#[test]
fn test_optional_parts_must_match() {
    let mut arena = IrArena::new();
    let i32_ty = arena.int_type(32, true);
    let x = arena.variable("x", i32_ty);
    let r1 = arena.return_stmt(Some(x));
    let r2 = arena.return_stmt(None);
    let r3 = arena.return_stmt(None);
    assert!(!arena.is_equal_to(r1, r2));
    assert!(arena.is_equal_to(r2, r3));
}

#[test]
fn test_metadata_is_ignored() {
    let mut arena = IrArena::new();
    let a = arena.const_bool(false);
    let b = arena.const_bool(false);
    arena.metadata_mut(a).set("note", "from pass");
    assert!(arena.is_equal_to(a, b));
}
