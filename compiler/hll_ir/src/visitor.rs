//! IR visitor.
//!
//! # Design
//!
//! `Visitor` has one required method per leaf kind. There are no default
//! bodies: a new leaf breaks every implementor at compile time instead of
//! silently falling through. Leaves of one operator family receive the
//! family payload (`BinaryOpExpr`, `UnaryOpExpr`, `CastExpr`); implementors
//! that render a family uniformly forward to one helper.
//!
//! Visitors that want ordinary traversal call [`walk_children`] or
//! [`walk_chain`] from their methods.
//!
//! # Example
//!
//! ```text
//! impl Visitor for CountCalls {
//!     fn visit_call(&mut self, arena: &IrArena, id: ValueId, _: &CallExpr) {
//!         self.count += 1;
//!         walk_children(self, arena, id);
//!     }
//!     ...
//! }
//! ```

use crate::arena::contract;
use crate::constant::{
    ConstArray, ConstBool, ConstFloat, ConstInt, ConstNullPointer, ConstString, ConstStruct,
    ConstSymbol, Constant,
};
use crate::edge::Edge;
use crate::expr::{BinaryOpExpr, CallExpr, CastExpr, Expr, TernaryOpExpr, UnaryOpExpr, Variable};
use crate::item::{Function, GlobalVarDef};
use crate::node::Node;
use crate::stmt::{
    AssignStmt, CallStmt, ForLoopStmt, GotoStmt, IfStmt, ReturnStmt, StmtData, SwitchStmt,
    UForLoopStmt, VarDefStmt, WhileLoopStmt,
};
use crate::types::Type;
use crate::{BinaryOpKind, CastKind, IrArena, IrError, TypeKind, UnaryOpKind, ValueId};

/// Per-leaf callbacks invoked by [`IrArena::accept`].
pub trait Visitor {
    // Items
    fn visit_function(&mut self, arena: &IrArena, id: ValueId, func: &Function);
    fn visit_global_var_def(&mut self, arena: &IrArena, id: ValueId, def: &GlobalVarDef);

    // Statements
    fn visit_assign_stmt(&mut self, arena: &IrArena, id: ValueId, stmt: &AssignStmt);
    fn visit_break_stmt(&mut self, arena: &IrArena, id: ValueId);
    fn visit_call_stmt(&mut self, arena: &IrArena, id: ValueId, stmt: &CallStmt);
    fn visit_continue_stmt(&mut self, arena: &IrArena, id: ValueId);
    fn visit_empty_stmt(&mut self, arena: &IrArena, id: ValueId);
    fn visit_for_loop_stmt(&mut self, arena: &IrArena, id: ValueId, stmt: &ForLoopStmt);
    fn visit_goto_stmt(&mut self, arena: &IrArena, id: ValueId, stmt: &GotoStmt);
    fn visit_if_stmt(&mut self, arena: &IrArena, id: ValueId, stmt: &IfStmt);
    fn visit_return_stmt(&mut self, arena: &IrArena, id: ValueId, stmt: &ReturnStmt);
    fn visit_switch_stmt(&mut self, arena: &IrArena, id: ValueId, stmt: &SwitchStmt);
    fn visit_u_for_loop_stmt(&mut self, arena: &IrArena, id: ValueId, stmt: &UForLoopStmt);
    fn visit_unreachable_stmt(&mut self, arena: &IrArena, id: ValueId);
    fn visit_var_def_stmt(&mut self, arena: &IrArena, id: ValueId, stmt: &VarDefStmt);
    fn visit_while_loop_stmt(&mut self, arena: &IrArena, id: ValueId, stmt: &WhileLoopStmt);

    // Types
    fn visit_array_type(&mut self, arena: &IrArena, id: ValueId, ty: &Type);
    fn visit_float_type(&mut self, arena: &IrArena, id: ValueId, ty: &Type);
    fn visit_function_type(&mut self, arena: &IrArena, id: ValueId, ty: &Type);
    fn visit_int_type(&mut self, arena: &IrArena, id: ValueId, ty: &Type);
    fn visit_pointer_type(&mut self, arena: &IrArena, id: ValueId, ty: &Type);
    fn visit_string_type(&mut self, arena: &IrArena, id: ValueId, ty: &Type);
    fn visit_struct_type(&mut self, arena: &IrArena, id: ValueId, ty: &Type);
    fn visit_unknown_type(&mut self, arena: &IrArena, id: ValueId, ty: &Type);
    fn visit_void_type(&mut self, arena: &IrArena, id: ValueId, ty: &Type);

    // Binary operators
    fn visit_add_op(&mut self, arena: &IrArena, id: ValueId, expr: &BinaryOpExpr);
    fn visit_and_op(&mut self, arena: &IrArena, id: ValueId, expr: &BinaryOpExpr);
    fn visit_array_index_op(&mut self, arena: &IrArena, id: ValueId, expr: &BinaryOpExpr);
    fn visit_assign_op(&mut self, arena: &IrArena, id: ValueId, expr: &BinaryOpExpr);
    fn visit_bit_and_op(&mut self, arena: &IrArena, id: ValueId, expr: &BinaryOpExpr);
    fn visit_bit_or_op(&mut self, arena: &IrArena, id: ValueId, expr: &BinaryOpExpr);
    fn visit_bit_shl_op(&mut self, arena: &IrArena, id: ValueId, expr: &BinaryOpExpr);
    fn visit_bit_shr_op(&mut self, arena: &IrArena, id: ValueId, expr: &BinaryOpExpr);
    fn visit_bit_xor_op(&mut self, arena: &IrArena, id: ValueId, expr: &BinaryOpExpr);
    fn visit_comma_op(&mut self, arena: &IrArena, id: ValueId, expr: &BinaryOpExpr);
    fn visit_div_op(&mut self, arena: &IrArena, id: ValueId, expr: &BinaryOpExpr);
    fn visit_eq_op(&mut self, arena: &IrArena, id: ValueId, expr: &BinaryOpExpr);
    fn visit_gt_eq_op(&mut self, arena: &IrArena, id: ValueId, expr: &BinaryOpExpr);
    fn visit_gt_op(&mut self, arena: &IrArena, id: ValueId, expr: &BinaryOpExpr);
    fn visit_lt_eq_op(&mut self, arena: &IrArena, id: ValueId, expr: &BinaryOpExpr);
    fn visit_lt_op(&mut self, arena: &IrArena, id: ValueId, expr: &BinaryOpExpr);
    fn visit_mod_op(&mut self, arena: &IrArena, id: ValueId, expr: &BinaryOpExpr);
    fn visit_mul_op(&mut self, arena: &IrArena, id: ValueId, expr: &BinaryOpExpr);
    fn visit_neq_op(&mut self, arena: &IrArena, id: ValueId, expr: &BinaryOpExpr);
    fn visit_or_op(&mut self, arena: &IrArena, id: ValueId, expr: &BinaryOpExpr);
    fn visit_struct_index_op(&mut self, arena: &IrArena, id: ValueId, expr: &BinaryOpExpr);
    fn visit_sub_op(&mut self, arena: &IrArena, id: ValueId, expr: &BinaryOpExpr);

    // Unary operators
    fn visit_address_op(&mut self, arena: &IrArena, id: ValueId, expr: &UnaryOpExpr);
    fn visit_deref_op(&mut self, arena: &IrArena, id: ValueId, expr: &UnaryOpExpr);
    fn visit_neg_op(&mut self, arena: &IrArena, id: ValueId, expr: &UnaryOpExpr);
    fn visit_not_op(&mut self, arena: &IrArena, id: ValueId, expr: &UnaryOpExpr);

    // Casts
    fn visit_bit_cast(&mut self, arena: &IrArena, id: ValueId, expr: &CastExpr);
    /// The extension variant is `expr.op()`, fixed at construction.
    fn visit_ext_cast(&mut self, arena: &IrArena, id: ValueId, expr: &CastExpr);
    fn visit_fp_to_int_cast(&mut self, arena: &IrArena, id: ValueId, expr: &CastExpr);
    fn visit_int_to_fp_cast(&mut self, arena: &IrArena, id: ValueId, expr: &CastExpr);
    fn visit_int_to_ptr_cast(&mut self, arena: &IrArena, id: ValueId, expr: &CastExpr);
    fn visit_ptr_to_int_cast(&mut self, arena: &IrArena, id: ValueId, expr: &CastExpr);
    fn visit_trunc_cast(&mut self, arena: &IrArena, id: ValueId, expr: &CastExpr);

    // Other expressions
    fn visit_call(&mut self, arena: &IrArena, id: ValueId, expr: &CallExpr);
    fn visit_ternary_op(&mut self, arena: &IrArena, id: ValueId, expr: &TernaryOpExpr);
    fn visit_variable(&mut self, arena: &IrArena, id: ValueId, var: &Variable);

    // Constants
    fn visit_const_array(&mut self, arena: &IrArena, id: ValueId, c: &ConstArray);
    fn visit_const_bool(&mut self, arena: &IrArena, id: ValueId, c: &ConstBool);
    fn visit_const_float(&mut self, arena: &IrArena, id: ValueId, c: &ConstFloat);
    fn visit_const_int(&mut self, arena: &IrArena, id: ValueId, c: &ConstInt);
    fn visit_const_null_pointer(&mut self, arena: &IrArena, id: ValueId, c: &ConstNullPointer);
    fn visit_const_string(&mut self, arena: &IrArena, id: ValueId, c: &ConstString);
    fn visit_const_struct(&mut self, arena: &IrArena, id: ValueId, c: &ConstStruct);
    fn visit_const_symbol(&mut self, arena: &IrArena, id: ValueId, c: &ConstSymbol);
}

impl IrArena {
    /// Dispatch `id` to the visitor method for its leaf kind.
    pub fn try_accept<V: Visitor + ?Sized>(
        &self,
        id: ValueId,
        visitor: &mut V,
    ) -> Result<(), IrError> {
        match self.try_node(id)? {
            Node::Function(f) => visitor.visit_function(self, id, f),
            Node::GlobalVarDef(g) => visitor.visit_global_var_def(self, id, g),
            Node::Type(t) => match t.kind() {
                TypeKind::Array => visitor.visit_array_type(self, id, t),
                TypeKind::Float => visitor.visit_float_type(self, id, t),
                TypeKind::Function => visitor.visit_function_type(self, id, t),
                TypeKind::Int => visitor.visit_int_type(self, id, t),
                TypeKind::Pointer => visitor.visit_pointer_type(self, id, t),
                TypeKind::String => visitor.visit_string_type(self, id, t),
                TypeKind::Struct => visitor.visit_struct_type(self, id, t),
                TypeKind::Unknown => visitor.visit_unknown_type(self, id, t),
                TypeKind::Void => visitor.visit_void_type(self, id, t),
            },
            Node::Stmt(s) => match &s.data {
                StmtData::Assign(s) => visitor.visit_assign_stmt(self, id, s),
                StmtData::Break => visitor.visit_break_stmt(self, id),
                StmtData::Call(s) => visitor.visit_call_stmt(self, id, s),
                StmtData::Continue => visitor.visit_continue_stmt(self, id),
                StmtData::Empty => visitor.visit_empty_stmt(self, id),
                StmtData::ForLoop(s) => visitor.visit_for_loop_stmt(self, id, s),
                StmtData::Goto(s) => visitor.visit_goto_stmt(self, id, s),
                StmtData::If(s) => visitor.visit_if_stmt(self, id, s),
                StmtData::Return(s) => visitor.visit_return_stmt(self, id, s),
                StmtData::Switch(s) => visitor.visit_switch_stmt(self, id, s),
                StmtData::UForLoop(s) => visitor.visit_u_for_loop_stmt(self, id, s),
                StmtData::Unreachable => visitor.visit_unreachable_stmt(self, id),
                StmtData::VarDef(s) => visitor.visit_var_def_stmt(self, id, s),
                StmtData::WhileLoop(s) => visitor.visit_while_loop_stmt(self, id, s),
            },
            Node::Expr(e) => match e {
                Expr::BinaryOp(e) => accept_binary_op(self, id, e, visitor),
                Expr::UnaryOp(e) => match e.op() {
                    UnaryOpKind::Address => visitor.visit_address_op(self, id, e),
                    UnaryOpKind::Deref => visitor.visit_deref_op(self, id, e),
                    UnaryOpKind::Neg => visitor.visit_neg_op(self, id, e),
                    UnaryOpKind::Not => visitor.visit_not_op(self, id, e),
                },
                Expr::Cast(e) => match e.op().kind() {
                    CastKind::BitCast => visitor.visit_bit_cast(self, id, e),
                    CastKind::Ext => visitor.visit_ext_cast(self, id, e),
                    CastKind::FpToInt => visitor.visit_fp_to_int_cast(self, id, e),
                    CastKind::IntToFp => visitor.visit_int_to_fp_cast(self, id, e),
                    CastKind::IntToPtr => visitor.visit_int_to_ptr_cast(self, id, e),
                    CastKind::PtrToInt => visitor.visit_ptr_to_int_cast(self, id, e),
                    CastKind::Trunc => visitor.visit_trunc_cast(self, id, e),
                },
                Expr::Call(e) => visitor.visit_call(self, id, e),
                Expr::TernaryOp(e) => visitor.visit_ternary_op(self, id, e),
                Expr::Variable(v) => visitor.visit_variable(self, id, v),
                Expr::Constant(c) => match c {
                    Constant::Array(c) => visitor.visit_const_array(self, id, c),
                    Constant::Bool(c) => visitor.visit_const_bool(self, id, c),
                    Constant::Float(c) => visitor.visit_const_float(self, id, c),
                    Constant::Int(c) => visitor.visit_const_int(self, id, c),
                    Constant::NullPointer(c) => visitor.visit_const_null_pointer(self, id, c),
                    Constant::String(c) => visitor.visit_const_string(self, id, c),
                    Constant::Struct(c) => visitor.visit_const_struct(self, id, c),
                    Constant::Symbol(c) => visitor.visit_const_symbol(self, id, c),
                },
            },
        }
        Ok(())
    }

    /// # Panics
    /// Panics if `id` is null or released.
    #[track_caller]
    pub fn accept<V: Visitor + ?Sized>(&self, id: ValueId, visitor: &mut V) {
        contract(self.try_accept(id, visitor));
    }
}

fn accept_binary_op<V: Visitor + ?Sized>(
    arena: &IrArena,
    id: ValueId,
    e: &BinaryOpExpr,
    visitor: &mut V,
) {
    match e.op() {
        BinaryOpKind::Add => visitor.visit_add_op(arena, id, e),
        BinaryOpKind::And => visitor.visit_and_op(arena, id, e),
        BinaryOpKind::ArrayIndex => visitor.visit_array_index_op(arena, id, e),
        BinaryOpKind::Assign => visitor.visit_assign_op(arena, id, e),
        BinaryOpKind::BitAnd => visitor.visit_bit_and_op(arena, id, e),
        BinaryOpKind::BitOr => visitor.visit_bit_or_op(arena, id, e),
        BinaryOpKind::BitShl => visitor.visit_bit_shl_op(arena, id, e),
        BinaryOpKind::BitShr => visitor.visit_bit_shr_op(arena, id, e),
        BinaryOpKind::BitXor => visitor.visit_bit_xor_op(arena, id, e),
        BinaryOpKind::Comma => visitor.visit_comma_op(arena, id, e),
        BinaryOpKind::Div => visitor.visit_div_op(arena, id, e),
        BinaryOpKind::Eq => visitor.visit_eq_op(arena, id, e),
        BinaryOpKind::GtEq => visitor.visit_gt_eq_op(arena, id, e),
        BinaryOpKind::Gt => visitor.visit_gt_op(arena, id, e),
        BinaryOpKind::LtEq => visitor.visit_lt_eq_op(arena, id, e),
        BinaryOpKind::Lt => visitor.visit_lt_op(arena, id, e),
        BinaryOpKind::Mod => visitor.visit_mod_op(arena, id, e),
        BinaryOpKind::Mul => visitor.visit_mul_op(arena, id, e),
        BinaryOpKind::Neq => visitor.visit_neq_op(arena, id, e),
        BinaryOpKind::Or => visitor.visit_or_op(arena, id, e),
        BinaryOpKind::StructIndex => visitor.visit_struct_index_op(arena, id, e),
        BinaryOpKind::Sub => visitor.visit_sub_op(arena, id, e),
    }
}

/// Visit every child of `id` in edge order.
///
/// Nested bodies are walked as whole chains. Goto targets and called
/// functions are skipped: they are visited where they are defined. Type
/// references are not children.
pub fn walk_children<V: Visitor + ?Sized>(visitor: &mut V, arena: &IrArena, id: ValueId) {
    for (edge, value) in arena.edges(id) {
        let Some(value) = value else {
            continue;
        };
        if edge == Edge::Target || arena.isa::<Function>(value) {
            continue;
        }
        if edge.is_statement_edge() {
            walk_chain(visitor, arena, value);
        } else {
            arena.accept(value, visitor);
        }
    }
}

/// Visit each statement of the chain starting at `head`.
pub fn walk_chain<V: Visitor + ?Sized>(visitor: &mut V, arena: &IrArena, head: ValueId) {
    for stmt in arena.statements(head) {
        arena.accept(stmt, visitor);
    }
}
