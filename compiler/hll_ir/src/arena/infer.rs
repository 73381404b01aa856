//! Best-effort result types of expressions.
//!
//! Inference never fails on ill-typed input: operands that do not fit an
//! operator produce the unknown type. Only a handle that is not a live
//! expression is an error.

use super::{contract, IrArena};
use crate::constant::Constant;
use crate::expr::Expr;
use crate::item::Function;
use crate::types::Type;
use crate::{BinaryOpKind, IrError, UnaryOpKind, ValueId};

impl IrArena {
    /// The type of expression `id`. May intern new types (for example the
    /// pointer type produced by `&x`).
    pub fn try_get_type(&mut self, id: ValueId) -> Result<ValueId, IrError> {
        let expr = self.expect_cast::<Expr>(id, "typed value", "an expression")?.clone();
        let ty = match expr {
            Expr::BinaryOp(e) => self.binary_op_type(e.op, e.op1, e.op2)?,
            Expr::UnaryOp(e) => {
                let operand = self.try_get_type(e.operand)?;
                match e.op {
                    UnaryOpKind::Address => self.pointer_type(operand),
                    UnaryOpKind::Deref => self.element_type(operand),
                    UnaryOpKind::Neg => operand,
                    UnaryOpKind::Not => self.bool_type(),
                }
            }
            Expr::Cast(e) => e.dst_type,
            Expr::Call(e) => self.call_type(e.callee)?,
            Expr::TernaryOp(e) => self.try_get_type(e.true_value)?,
            Expr::Variable(v) => v.ty,
            Expr::Constant(c) => match c {
                Constant::Array(c) => c.ty,
                Constant::Bool(_) => self.bool_type(),
                Constant::Float(c) => c.ty,
                Constant::Int(c) => c.ty,
                Constant::NullPointer(c) => c.ty,
                Constant::String(c) => c.ty,
                Constant::Struct(c) => c.ty,
                Constant::Symbol(c) => self.try_get_type(c.value)?,
            },
        };
        Ok(ty)
    }

    /// # Panics
    /// Panics if `id` is not a live expression.
    #[track_caller]
    pub fn get_type(&mut self, id: ValueId) -> ValueId {
        contract(self.try_get_type(id))
    }

    fn binary_op_type(
        &mut self,
        op: BinaryOpKind,
        op1: ValueId,
        op2: ValueId,
    ) -> Result<ValueId, IrError> {
        if op.yields_bool() {
            return Ok(self.bool_type());
        }
        let t1 = self.try_get_type(op1)?;
        let t2 = self.try_get_type(op2)?;
        let ty = match op {
            BinaryOpKind::Assign => t1,
            BinaryOpKind::Comma => t2,
            BinaryOpKind::ArrayIndex => self.element_type(t1),
            BinaryOpKind::StructIndex => self.field_type(t1, op2),
            _ => self.common_type(t1, t2),
        };
        Ok(ty)
    }

    /// Result type of an arithmetic or bitwise operator.
    ///
    /// 1. identical types: that type
    /// 2. integers of equal width: the unsigned integer of that width
    /// 3. pointer and integer, in either order: the pointer
    /// 4. anything else: unknown
    fn common_type(&mut self, t1: ValueId, t2: ValueId) -> ValueId {
        if t1 == t2 {
            return t1;
        }
        let int1 = self.int_type_info(t1);
        let int2 = self.int_type_info(t2);
        match (int1, int2) {
            (Some((b1, _)), Some((b2, _))) if b1 == b2 => self.int_type(b1, false),
            (None, Some(_)) if self.pointee(t1).is_some() => t1,
            (Some(_), None) if self.pointee(t2).is_some() => t2,
            _ => self.unknown_type(),
        }
    }

    /// Type of `base[i]` or `*base`.
    fn element_type(&mut self, base: ValueId) -> ValueId {
        match self.type_data(base).cloned() {
            Some(Type::Pointer { pointee }) => pointee,
            Some(Type::Array { elem, dims }) if dims.len() > 1 => {
                self.array_type(elem, dims[1..].to_vec())
            }
            Some(Type::Array { elem, .. }) => elem,
            _ => self.unknown_type(),
        }
    }

    /// Type of `base.index` where `index` is an integer constant.
    fn field_type(&mut self, base: ValueId, index: ValueId) -> ValueId {
        let field = match (self.type_data(base), self.cast::<Constant>(index)) {
            (Some(Type::Struct { elems, .. }), Some(Constant::Int(c))) => usize::try_from(c.value)
                .ok()
                .and_then(|i| elems.get(i).copied()),
            _ => None,
        };
        field.unwrap_or_else(|| self.unknown_type())
    }

    /// Return type of a call through `callee`: a function, or an expression
    /// of function or pointer-to-function type.
    fn call_type(&mut self, callee: ValueId) -> Result<ValueId, IrError> {
        if let Some(f) = self.cast::<Function>(callee) {
            return Ok(f.ret_type);
        }
        let mut ty = self.try_get_type(callee)?;
        if let Some(pointee) = self.pointee(ty) {
            ty = pointee;
        }
        let ret = match self.type_data(ty) {
            Some(Type::Function { ret, .. }) => Some(*ret),
            _ => None,
        };
        Ok(ret.unwrap_or_else(|| self.unknown_type()))
    }
}
