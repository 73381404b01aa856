use pretty_assertions::assert_eq;

use super::*;
use crate::{ConstKind, ExprKind, StmtKind, ValueKind};

fn int_var(arena: &mut IrArena, name: &str) -> ValueId {
    let ty = arena.int_type(32, true);
    arena.variable(name, ty)
}

#[test]
fn test_binary_op_registers_observers() {
    let mut arena = IrArena::new();
    let a = int_var(&mut arena, "a");
    let b = int_var(&mut arena, "b");
    let add = arena.add_op(a, b);

    assert_eq!(
        arena.kind(add),
        ValueKind::Expression(ExprKind::BinaryOp(BinaryOpKind::Add))
    );
    let expr = arena.cast::<BinaryOpExpr>(add).map(|e| (e.first_operand(), e.second_operand()));
    assert_eq!(expr, Some((a, b)));
    assert_eq!(arena.observers(a), &[add]);
    assert_eq!(arena.observers(b), &[add]);
    assert_eq!(arena.subjects(add), &[a, b]);
}

#[test]
fn test_same_operand_twice_registers_twice() {
    let mut arena = IrArena::new();
    let x = int_var(&mut arena, "x");
    let mul = arena.mul_op(x, x);
    assert_eq!(arena.observers(x), &[mul, mul]);
}

#[test]
fn test_binary_op_rejects_bad_operands() {
    let mut arena = IrArena::new();
    let a = int_var(&mut arena, "a");
    let stmt = arena.empty_stmt();
    let ty = arena.int_type(8, false);

    assert_eq!(
        arena.try_binary_op(BinaryOpKind::BitAnd, ValueId::INVALID, a),
        Err(IrError::NullValue {
            role: "first operand"
        })
    );
    assert!(matches!(
        arena.try_binary_op(BinaryOpKind::BitAnd, a, stmt),
        Err(IrError::KindMismatch {
            role: "second operand",
            ..
        })
    ));
    assert!(matches!(
        arena.try_binary_op(BinaryOpKind::BitAnd, ty, a),
        Err(IrError::KindMismatch { .. })
    ));
    assert_eq!(
        arena.try_binary_op(BinaryOpKind::BitAnd, a, ValueId::new(999)),
        Err(IrError::DeadValue {
            id: ValueId::new(999)
        })
    );
}

#[test]
#[should_panic(expected = "first operand must be non-null")]
fn test_bit_and_with_null_operand_panics() {
    let mut arena = IrArena::new();
    let a = int_var(&mut arena, "a");
    arena.bit_and_op(ValueId::INVALID, a);
}

#[test]
fn test_cast_factories() {
    let mut arena = IrArena::new();
    let a = int_var(&mut arena, "a");
    let i64_ty = arena.int_type(64, true);
    let sext = arena.ext_cast(a, i64_ty, ExtVariant::SExt);

    let cast = arena.cast::<CastExpr>(sext).cloned();
    assert_eq!(
        cast,
        Some(CastExpr {
            op: CastOp::Ext(ExtVariant::SExt),
            operand: a,
            dst_type: i64_ty,
        })
    );
    assert_eq!(cast.and_then(|c| c.variant()), Some(ExtVariant::SExt));

    let not_a_type = arena.try_cast(CastOp::Trunc, a, a);
    assert!(matches!(
        not_a_type,
        Err(IrError::KindMismatch {
            role: "destination type",
            ..
        })
    ));
}

#[test]
fn test_const_int_wraps_to_width() {
    let mut arena = IrArena::new();
    let u8_ty = arena.int_type(8, false);
    let i8_ty = arena.int_type(8, true);

    let c = arena.const_int(300, u8_ty);
    assert_eq!(arena.cast::<ConstInt>(c).map(ConstInt::value), Some(44));

    let c = arena.const_int(255, i8_ty);
    assert_eq!(arena.cast::<ConstInt>(c).map(ConstInt::value), Some(-1));

    let c = arena.const_int(-1, u8_ty);
    assert_eq!(arena.cast::<ConstInt>(c).map(ConstInt::value), Some(255));
}

#[test]
fn test_constant_type_checks() {
    let mut arena = IrArena::new();
    let f32_ty = arena.float_type(32);
    let i32_ty = arena.int_type(32, true);

    assert!(matches!(
        arena.try_const_int(1, f32_ty),
        Err(IrError::KindMismatch {
            role: "integer constant type",
            ..
        })
    ));
    assert!(arena.try_const_null_pointer(i32_ty).is_err());
    assert!(arena.try_const_float(1.5, f32_ty).is_ok());

    let arr_ty = arena.array_type(i32_ty, vec![2]);
    let one = arena.const_int(1, i32_ty);
    let var = arena.variable("v", i32_ty);
    assert!(matches!(
        arena.try_const_array(vec![one, var], arr_ty),
        Err(IrError::KindMismatch {
            role: "constant element",
            ..
        })
    ));
    let arr = arena.const_array(vec![], arr_ty);
    assert_eq!(
        arena.cast::<ConstArray>(arr).map(ConstArray::is_zero_initialized),
        Some(true)
    );
}

#[test]
fn test_const_bool_and_string() {
    let mut arena = IrArena::new();
    let t = arena.const_bool(true);
    assert_eq!(arena.cast::<ConstBool>(t).map(ConstBool::is_true), Some(true));
    assert_eq!(
        arena.kind(t),
        ValueKind::Expression(ExprKind::Constant(ConstKind::Bool))
    );

    let s = arena.const_string("hello", 8);
    let string_ty = arena.string_type(8);
    assert_eq!(arena.cast::<ConstString>(s).map(ConstString::ty), Some(string_ty));
}

#[test]
fn test_statement_factories() {
    let mut arena = IrArena::new();
    let x = int_var(&mut arena, "x");
    let i32_ty = arena.int_type(32, true);
    let zero = arena.const_int(0, i32_ty);

    let def = arena.var_def_stmt(x, Some(zero));
    assert_eq!(arena.kind(def), ValueKind::Statement(StmtKind::VarDef));
    assert!(arena.observers(x).contains(&def));
    assert!(arena.observers(zero).contains(&def));

    let body = arena.break_stmt();
    let cond = arena.lt_op(x, zero);
    let w = arena.while_loop_stmt(cond, body);
    assert_eq!(arena.observers(body), &[w]);

    let ret = arena.return_stmt(None);
    assert_eq!(arena.cast::<ReturnStmt>(ret).map(ReturnStmt::value), Some(None));

    let goto = arena.goto_stmt(ret);
    assert_eq!(arena.cast::<GotoStmt>(goto).map(GotoStmt::target), Some(ret));
    assert!(matches!(
        arena.try_goto_stmt(x),
        Err(IrError::KindMismatch {
            role: "goto target",
            ..
        })
    ));
}

#[test]
fn test_call_stmt_requires_call() {
    let mut arena = IrArena::new();
    let x = int_var(&mut arena, "x");
    assert!(matches!(
        arena.try_call_stmt(x),
        Err(IrError::KindMismatch { role: "call", .. })
    ));

    let void = arena.void_type();
    let f = arena.function("f", void, vec![], None, false);
    let call = arena.call(f, vec![x]);
    let stmt = arena.call_stmt(call);
    assert_eq!(arena.cast::<CallStmt>(stmt).map(CallStmt::call), Some(call));
    assert!(arena.cast::<Function>(f).is_some_and(Function::is_declaration));
}

#[test]
fn test_owned_statement_cannot_become_a_body() {
    let mut arena = IrArena::new();
    let x = int_var(&mut arena, "x");
    let first = arena.empty_stmt();
    let second = arena.break_stmt();
    arena.set_successor(first, Some(second));

    assert_eq!(
        arena.try_while_loop_stmt(x, second),
        Err(IrError::AlreadyOwned {
            id: second,
            owner: first
        })
    );

    let body = arena.continue_stmt();
    let w = arena.while_loop_stmt(x, body);
    assert_eq!(
        arena.try_if_stmt(x, body),
        Err(IrError::AlreadyOwned { id: body, owner: w })
    );
}

#[test]
fn test_fit_to_width() {
    assert_eq!(fit_to_width(0x1ff, 8, false), 0xff);
    assert_eq!(fit_to_width(0x80, 8, true), -128);
    assert_eq!(fit_to_width(5, 1, false), 1);
    assert_eq!(fit_to_width(i128::MIN, 128, true), i128::MIN);
}
