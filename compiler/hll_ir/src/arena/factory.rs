//! Factories for expressions, constants, statements and top-level items.
//!
//! Every factory validates its operands (non-null, live, of the family the
//! position accepts) and registers the new node as an observer of each
//! operand before returning it. The plain form panics on a violated
//! precondition; the `try_` form reports it as an [`IrError`].

use super::{contract, IrArena};
use crate::constant::{
    ConstArray, ConstBool, ConstFloat, ConstInt, ConstNullPointer, ConstString, ConstStruct,
    ConstSymbol, Constant,
};
use crate::expr::{
    BinaryOpExpr, CallExpr, CastExpr, CastOp, Expr, ExtVariant, TernaryOpExpr, UnaryOpExpr,
    Variable,
};
use crate::item::{Function, GlobalVarDef};
use crate::node::Node;
use crate::stmt::{
    AssignStmt, CallStmt, ForLoopStmt, GotoStmt, IfStmt, ReturnStmt, Stmt, StmtData, SwitchStmt,
    UForLoopStmt, VarDefStmt, WhileLoopStmt,
};
use crate::types::Type;
use crate::{BinaryOpKind, IrError, UnaryOpKind, ValueId};

/// Wrap `value` into the range of a `bits`-wide integer.
fn fit_to_width(value: i128, bits: u32, signed: bool) -> i128 {
    if bits == 0 || bits >= 128 {
        return value;
    }
    let shift = 128 - bits;
    if signed {
        (value << shift) >> shift
    } else {
        value & ((1_i128 << bits) - 1)
    }
}

// Expressions

impl IrArena {
    pub fn try_binary_op(
        &mut self,
        op: BinaryOpKind,
        op1: ValueId,
        op2: ValueId,
    ) -> Result<ValueId, IrError> {
        self.try_alloc(Node::Expr(Expr::BinaryOp(BinaryOpExpr { op, op1, op2 })))
    }

    /// Create a binary operator over two expressions.
    ///
    /// # Panics
    /// Panics if either operand is null, released or not an expression.
    #[track_caller]
    pub fn binary_op(&mut self, op: BinaryOpKind, op1: ValueId, op2: ValueId) -> ValueId {
        contract(self.try_binary_op(op, op1, op2))
    }

    pub fn try_unary_op(&mut self, op: UnaryOpKind, operand: ValueId) -> Result<ValueId, IrError> {
        self.try_alloc(Node::Expr(Expr::UnaryOp(UnaryOpExpr { op, operand })))
    }

    #[track_caller]
    pub fn unary_op(&mut self, op: UnaryOpKind, operand: ValueId) -> ValueId {
        contract(self.try_unary_op(op, operand))
    }

    /// Create a cast of `operand` to `dst_type`. Operand and destination type
    /// are not checked against each other.
    pub fn try_cast(
        &mut self,
        op: CastOp,
        operand: ValueId,
        dst_type: ValueId,
    ) -> Result<ValueId, IrError> {
        self.check_type("destination type", dst_type)?;
        self.try_alloc(Node::Expr(Expr::Cast(CastExpr {
            op,
            operand,
            dst_type,
        })))
    }

    #[track_caller]
    pub fn cast_expr(&mut self, op: CastOp, operand: ValueId, dst_type: ValueId) -> ValueId {
        contract(self.try_cast(op, operand, dst_type))
    }

    #[track_caller]
    pub fn bit_cast(&mut self, operand: ValueId, dst_type: ValueId) -> ValueId {
        self.cast_expr(CastOp::BitCast, operand, dst_type)
    }

    #[track_caller]
    pub fn ext_cast(&mut self, operand: ValueId, dst_type: ValueId, variant: ExtVariant) -> ValueId {
        self.cast_expr(CastOp::Ext(variant), operand, dst_type)
    }

    #[track_caller]
    pub fn fp_to_int_cast(&mut self, operand: ValueId, dst_type: ValueId) -> ValueId {
        self.cast_expr(CastOp::FpToInt, operand, dst_type)
    }

    #[track_caller]
    pub fn int_to_fp_cast(&mut self, operand: ValueId, dst_type: ValueId) -> ValueId {
        self.cast_expr(CastOp::IntToFp, operand, dst_type)
    }

    #[track_caller]
    pub fn int_to_ptr_cast(&mut self, operand: ValueId, dst_type: ValueId) -> ValueId {
        self.cast_expr(CastOp::IntToPtr, operand, dst_type)
    }

    #[track_caller]
    pub fn ptr_to_int_cast(&mut self, operand: ValueId, dst_type: ValueId) -> ValueId {
        self.cast_expr(CastOp::PtrToInt, operand, dst_type)
    }

    #[track_caller]
    pub fn trunc_cast(&mut self, operand: ValueId, dst_type: ValueId) -> ValueId {
        self.cast_expr(CastOp::Trunc, operand, dst_type)
    }

    /// Create a call. `callee` is an expression (typically a variable naming
    /// the function, or a function pointer) or a function node.
    pub fn try_call(&mut self, callee: ValueId, args: Vec<ValueId>) -> Result<ValueId, IrError> {
        self.try_alloc(Node::Expr(Expr::Call(CallExpr { callee, args })))
    }

    #[track_caller]
    pub fn call(&mut self, callee: ValueId, args: Vec<ValueId>) -> ValueId {
        contract(self.try_call(callee, args))
    }

    pub fn try_ternary_op(
        &mut self,
        cond: ValueId,
        true_value: ValueId,
        false_value: ValueId,
    ) -> Result<ValueId, IrError> {
        self.try_alloc(Node::Expr(Expr::TernaryOp(TernaryOpExpr {
            cond,
            true_value,
            false_value,
        })))
    }

    #[track_caller]
    pub fn ternary_op(&mut self, cond: ValueId, true_value: ValueId, false_value: ValueId) -> ValueId {
        contract(self.try_ternary_op(cond, true_value, false_value))
    }

    pub fn try_variable(&mut self, name: impl Into<String>, ty: ValueId) -> Result<ValueId, IrError> {
        self.try_alloc(Node::Expr(Expr::Variable(Variable {
            name: name.into(),
            ty,
        })))
    }

    #[track_caller]
    pub fn variable(&mut self, name: impl Into<String>, ty: ValueId) -> ValueId {
        contract(self.try_variable(name, ty))
    }
}

/// One panicking convenience factory per binary operator.
macro_rules! binary_op_factories {
    ($($name:ident => $kind:ident,)*) => {
        impl IrArena {
            $(
                #[track_caller]
                pub fn $name(&mut self, op1: ValueId, op2: ValueId) -> ValueId {
                    self.binary_op(BinaryOpKind::$kind, op1, op2)
                }
            )*
        }
    };
}

binary_op_factories! {
    add_op => Add,
    and_op => And,
    array_index_op => ArrayIndex,
    assign_op => Assign,
    bit_and_op => BitAnd,
    bit_or_op => BitOr,
    bit_shl_op => BitShl,
    bit_shr_op => BitShr,
    bit_xor_op => BitXor,
    comma_op => Comma,
    div_op => Div,
    eq_op => Eq,
    gt_eq_op => GtEq,
    gt_op => Gt,
    lt_eq_op => LtEq,
    lt_op => Lt,
    mod_op => Mod,
    mul_op => Mul,
    neq_op => Neq,
    or_op => Or,
    struct_index_op => StructIndex,
    sub_op => Sub,
}

impl IrArena {
    #[track_caller]
    pub fn address_op(&mut self, operand: ValueId) -> ValueId {
        self.unary_op(UnaryOpKind::Address, operand)
    }

    #[track_caller]
    pub fn deref_op(&mut self, operand: ValueId) -> ValueId {
        self.unary_op(UnaryOpKind::Deref, operand)
    }

    #[track_caller]
    pub fn neg_op(&mut self, operand: ValueId) -> ValueId {
        self.unary_op(UnaryOpKind::Neg, operand)
    }

    #[track_caller]
    pub fn not_op(&mut self, operand: ValueId) -> ValueId {
        self.unary_op(UnaryOpKind::Not, operand)
    }
}

// Constants

impl IrArena {
    /// Create an integer constant of `ty`. The value is wrapped to the
    /// type's width.
    pub fn try_const_int(&mut self, value: i128, ty: ValueId) -> Result<ValueId, IrError> {
        self.check_type_with("integer constant type", ty, "an integer type", Type::is_int)?;
        let value = match self.int_type_info(ty) {
            Some((bits, signed)) => fit_to_width(value, bits, signed),
            None => value,
        };
        self.try_alloc(constant(Constant::Int(ConstInt { value, ty })))
    }

    #[track_caller]
    pub fn const_int(&mut self, value: i128, ty: ValueId) -> ValueId {
        contract(self.try_const_int(value, ty))
    }

    pub fn const_bool(&mut self, value: bool) -> ValueId {
        contract(self.try_alloc(constant(Constant::Bool(ConstBool { value }))))
    }

    pub fn try_const_float(&mut self, value: f64, ty: ValueId) -> Result<ValueId, IrError> {
        self.check_type_with("float constant type", ty, "a float type", |t| {
            matches!(t, Type::Float { .. })
        })?;
        self.try_alloc(constant(Constant::Float(ConstFloat {
            bits: value.to_bits(),
            ty,
        })))
    }

    #[track_caller]
    pub fn const_float(&mut self, value: f64, ty: ValueId) -> ValueId {
        contract(self.try_const_float(value, ty))
    }

    pub fn try_const_null_pointer(&mut self, ty: ValueId) -> Result<ValueId, IrError> {
        self.check_type_with("null pointer type", ty, "a pointer type", Type::is_pointer)?;
        self.try_alloc(constant(Constant::NullPointer(ConstNullPointer { ty })))
    }

    #[track_caller]
    pub fn const_null_pointer(&mut self, ty: ValueId) -> ValueId {
        contract(self.try_const_null_pointer(ty))
    }

    /// Create a string literal of `char_bits`-wide characters.
    pub fn const_string(&mut self, value: impl Into<String>, char_bits: u32) -> ValueId {
        let ty = self.string_type(char_bits);
        contract(self.try_alloc(constant(Constant::String(ConstString {
            value: value.into(),
            ty,
        }))))
    }

    /// Create an array constant. An empty element list denotes a
    /// zero-initialized array.
    pub fn try_const_array(&mut self, elems: Vec<ValueId>, ty: ValueId) -> Result<ValueId, IrError> {
        self.check_type_with("array constant type", ty, "an array type", |t| {
            matches!(t, Type::Array { .. })
        })?;
        self.try_alloc(constant(Constant::Array(ConstArray { elems, ty })))
    }

    #[track_caller]
    pub fn const_array(&mut self, elems: Vec<ValueId>, ty: ValueId) -> ValueId {
        contract(self.try_const_array(elems, ty))
    }

    pub fn try_const_struct(&mut self, fields: Vec<ValueId>, ty: ValueId) -> Result<ValueId, IrError> {
        self.check_type_with("structure constant type", ty, "a structure type", |t| {
            matches!(t, Type::Struct { .. })
        })?;
        self.try_alloc(constant(Constant::Struct(ConstStruct { fields, ty })))
    }

    #[track_caller]
    pub fn const_struct(&mut self, fields: Vec<ValueId>, ty: ValueId) -> ValueId {
        contract(self.try_const_struct(fields, ty))
    }

    pub fn try_const_symbol(
        &mut self,
        name: impl Into<String>,
        value: ValueId,
    ) -> Result<ValueId, IrError> {
        self.try_alloc(constant(Constant::Symbol(ConstSymbol {
            name: name.into(),
            value,
        })))
    }

    #[track_caller]
    pub fn const_symbol(&mut self, name: impl Into<String>, value: ValueId) -> ValueId {
        contract(self.try_const_symbol(name, value))
    }
}

fn constant(c: Constant) -> Node {
    Node::Expr(Expr::Constant(c))
}

// Statements

fn stmt(data: StmtData) -> Node {
    Node::Stmt(Stmt::new(data))
}

impl IrArena {
    pub fn try_assign_stmt(&mut self, lhs: ValueId, rhs: ValueId) -> Result<ValueId, IrError> {
        self.try_alloc(stmt(StmtData::Assign(AssignStmt { lhs, rhs })))
    }

    #[track_caller]
    pub fn assign_stmt(&mut self, lhs: ValueId, rhs: ValueId) -> ValueId {
        contract(self.try_assign_stmt(lhs, rhs))
    }

    pub fn break_stmt(&mut self) -> ValueId {
        contract(self.try_alloc(stmt(StmtData::Break)))
    }

    pub fn continue_stmt(&mut self) -> ValueId {
        contract(self.try_alloc(stmt(StmtData::Continue)))
    }

    pub fn empty_stmt(&mut self) -> ValueId {
        contract(self.try_alloc(stmt(StmtData::Empty)))
    }

    pub fn unreachable_stmt(&mut self) -> ValueId {
        contract(self.try_alloc(stmt(StmtData::Unreachable)))
    }

    pub fn try_call_stmt(&mut self, call: ValueId) -> Result<ValueId, IrError> {
        self.try_alloc(stmt(StmtData::Call(CallStmt { call })))
    }

    #[track_caller]
    pub fn call_stmt(&mut self, call: ValueId) -> ValueId {
        contract(self.try_call_stmt(call))
    }

    pub fn try_for_loop_stmt(
        &mut self,
        ind_var: ValueId,
        start: ValueId,
        end: ValueId,
        step: ValueId,
        body: ValueId,
    ) -> Result<ValueId, IrError> {
        self.try_alloc(stmt(StmtData::ForLoop(ForLoopStmt {
            ind_var,
            start,
            end,
            step,
            body,
        })))
    }

    #[track_caller]
    pub fn for_loop_stmt(
        &mut self,
        ind_var: ValueId,
        start: ValueId,
        end: ValueId,
        step: ValueId,
        body: ValueId,
    ) -> ValueId {
        contract(self.try_for_loop_stmt(ind_var, start, end, step, body))
    }

    pub fn try_goto_stmt(&mut self, target: ValueId) -> Result<ValueId, IrError> {
        self.try_alloc(stmt(StmtData::Goto(GotoStmt { target })))
    }

    #[track_caller]
    pub fn goto_stmt(&mut self, target: ValueId) -> ValueId {
        contract(self.try_goto_stmt(target))
    }

    /// Create `if (cond) { body }`. Further clauses are added with
    /// [`add_if_clause`](IrArena::add_if_clause) and
    /// [`set_else_clause`](IrArena::set_else_clause).
    pub fn try_if_stmt(&mut self, cond: ValueId, body: ValueId) -> Result<ValueId, IrError> {
        self.try_alloc(stmt(StmtData::If(IfStmt {
            clauses: vec![(cond, body)],
            else_body: None,
        })))
    }

    #[track_caller]
    pub fn if_stmt(&mut self, cond: ValueId, body: ValueId) -> ValueId {
        contract(self.try_if_stmt(cond, body))
    }

    pub fn try_return_stmt(&mut self, value: Option<ValueId>) -> Result<ValueId, IrError> {
        self.try_alloc(stmt(StmtData::Return(ReturnStmt { value })))
    }

    #[track_caller]
    pub fn return_stmt(&mut self, value: Option<ValueId>) -> ValueId {
        contract(self.try_return_stmt(value))
    }

    /// Create a `switch` with no clauses; see
    /// [`add_switch_clause`](IrArena::add_switch_clause).
    pub fn try_switch_stmt(&mut self, control: ValueId) -> Result<ValueId, IrError> {
        self.try_alloc(stmt(StmtData::Switch(SwitchStmt {
            control,
            clauses: Vec::new(),
        })))
    }

    #[track_caller]
    pub fn switch_stmt(&mut self, control: ValueId) -> ValueId {
        contract(self.try_switch_stmt(control))
    }

    pub fn try_u_for_loop_stmt(
        &mut self,
        init: Option<ValueId>,
        cond: Option<ValueId>,
        step: Option<ValueId>,
        body: ValueId,
    ) -> Result<ValueId, IrError> {
        self.try_alloc(stmt(StmtData::UForLoop(UForLoopStmt {
            init,
            cond,
            step,
            body,
        })))
    }

    #[track_caller]
    pub fn u_for_loop_stmt(
        &mut self,
        init: Option<ValueId>,
        cond: Option<ValueId>,
        step: Option<ValueId>,
        body: ValueId,
    ) -> ValueId {
        contract(self.try_u_for_loop_stmt(init, cond, step, body))
    }

    pub fn try_var_def_stmt(&mut self, var: ValueId, init: Option<ValueId>) -> Result<ValueId, IrError> {
        self.try_alloc(stmt(StmtData::VarDef(VarDefStmt { var, init })))
    }

    #[track_caller]
    pub fn var_def_stmt(&mut self, var: ValueId, init: Option<ValueId>) -> ValueId {
        contract(self.try_var_def_stmt(var, init))
    }

    pub fn try_while_loop_stmt(&mut self, cond: ValueId, body: ValueId) -> Result<ValueId, IrError> {
        self.try_alloc(stmt(StmtData::WhileLoop(WhileLoopStmt { cond, body })))
    }

    #[track_caller]
    pub fn while_loop_stmt(&mut self, cond: ValueId, body: ValueId) -> ValueId {
        contract(self.try_while_loop_stmt(cond, body))
    }
}

// Items

impl IrArena {
    /// Create a function. `params` are variables; a `None` body makes it a
    /// declaration.
    pub fn try_function(
        &mut self,
        name: impl Into<String>,
        ret_type: ValueId,
        params: Vec<ValueId>,
        body: Option<ValueId>,
        vararg: bool,
    ) -> Result<ValueId, IrError> {
        self.try_alloc(Node::Function(Function {
            name: name.into(),
            ret_type,
            params,
            body,
            vararg,
        }))
    }

    #[track_caller]
    pub fn function(
        &mut self,
        name: impl Into<String>,
        ret_type: ValueId,
        params: Vec<ValueId>,
        body: Option<ValueId>,
        vararg: bool,
    ) -> ValueId {
        contract(self.try_function(name, ret_type, params, body, vararg))
    }

    pub fn try_global_var_def(&mut self, var: ValueId, init: Option<ValueId>) -> Result<ValueId, IrError> {
        self.try_alloc(Node::GlobalVarDef(GlobalVarDef { var, init }))
    }

    #[track_caller]
    pub fn global_var_def(&mut self, var: ValueId, init: Option<ValueId>) -> ValueId {
        contract(self.try_global_var_def(var, init))
    }
}

#[cfg(test)]
mod tests;
