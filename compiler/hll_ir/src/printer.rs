//! Diagnostic text form of IR nodes.
//!
//! The output is C-like and meant for logs, test failures and debugging
//! passes; nothing parses it back. A statement prints alone, without its
//! successors; nested bodies print in full.
//!
//! ```text
//! if ((x & 5) != 0) {
//!     y = sext<i64>(x);
//! } else {
//!     goto label_7;
//! }
//! ```

use std::fmt::{self, Write};

use crate::constant::{
    ConstArray, ConstBool, ConstFloat, ConstInt, ConstNullPointer, ConstString, ConstStruct,
    ConstSymbol,
};
use crate::expr::{
    BinaryOpExpr, CallExpr, CastExpr, CastOp, ExtVariant, TernaryOpExpr, UnaryOpExpr, Variable,
};
use crate::item::{Function, GlobalVarDef};
use crate::stmt::{
    AssignStmt, CallStmt, ForLoopStmt, GotoStmt, IfStmt, ReturnStmt, SwitchStmt, UForLoopStmt,
    VarDefStmt, WhileLoopStmt,
};
use crate::types::Type;
use crate::visitor::Visitor;
use crate::{BinaryOpKind, IrArena, ValueId};

const INDENT: &str = "    ";

/// Visitor that renders nodes into a string.
#[derive(Default)]
pub struct Printer {
    out: String,
    depth: usize,
}

impl Printer {
    pub fn new() -> Self {
        Printer::default()
    }

    /// Consume the printer, returning everything rendered so far.
    pub fn finish(self) -> String {
        self.out
    }

    /// Render `id`, or a placeholder for a null or released handle.
    pub fn print(&mut self, arena: &IrArena, id: ValueId) {
        if arena.try_accept(id, self).is_err() {
            self.out.push_str("<invalid>");
        }
    }

    fn print_list(&mut self, arena: &IrArena, ids: &[ValueId]) {
        for (i, &id) in ids.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.print(arena, id);
        }
    }

    /// Callees that are functions print by name rather than in full.
    fn print_callee(&mut self, arena: &IrArena, id: ValueId) {
        match arena.cast::<Function>(id) {
            Some(f) => self.out.push_str(&f.name),
            None => self.print(arena, id),
        }
    }

    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
    }

    /// ` { ... }` around the chain starting at `head`.
    fn print_body(&mut self, arena: &IrArena, head: ValueId) {
        self.out.push_str(" {");
        self.depth += 1;
        for stmt in arena.statements(head) {
            if is_goto_target(arena, stmt) {
                self.newline();
                let _ = write!(self.out, "{}:", label(arena, stmt));
            }
            self.newline();
            self.print(arena, stmt);
        }
        self.depth -= 1;
        self.newline();
        self.out.push('}');
    }

    /// `i32 x`
    fn print_declaration(&mut self, arena: &IrArena, var: ValueId) {
        match arena.cast::<Variable>(var) {
            Some(v) => {
                self.print(arena, v.ty);
                let _ = write!(self.out, " {}", v.name);
            }
            None => self.print(arena, var),
        }
    }

    fn print_optional(&mut self, arena: &IrArena, id: Option<ValueId>) {
        if let Some(id) = id {
            self.print(arena, id);
        }
    }

    fn print_type(&mut self, arena: &IrArena, ty: &Type) {
        match ty {
            Type::Array { elem, dims } => {
                self.print(arena, *elem);
                for dim in dims {
                    let _ = write!(self.out, "[{dim}]");
                }
            }
            Type::Float { bits } => {
                let _ = write!(self.out, "f{bits}");
            }
            Type::Function { ret, params, vararg } => {
                self.print(arena, *ret);
                self.out.push('(');
                self.print_list(arena, params);
                if *vararg {
                    self.out.push_str(if params.is_empty() { "..." } else { ", ..." });
                }
                self.out.push(')');
            }
            Type::Int { bits, signed } => {
                let _ = write!(self.out, "{}{bits}", if *signed { 'i' } else { 'u' });
            }
            Type::Pointer { pointee } => {
                self.print(arena, *pointee);
                self.out.push('*');
            }
            Type::String { char_bits } => {
                let _ = write!(self.out, "string{char_bits}");
            }
            Type::Struct {
                name: Some(name), ..
            } => {
                let _ = write!(self.out, "struct {name}");
            }
            Type::Struct { elems, name: None } => {
                self.out.push_str("struct {");
                self.print_list(arena, elems);
                self.out.push('}');
            }
            Type::Unknown => self.out.push_str("unknown"),
            Type::Void => self.out.push_str("void"),
        }
    }

    fn print_binary(&mut self, arena: &IrArena, expr: &BinaryOpExpr) {
        match expr.op {
            BinaryOpKind::ArrayIndex => {
                self.print(arena, expr.op1);
                self.out.push('[');
                self.print(arena, expr.op2);
                self.out.push(']');
            }
            BinaryOpKind::StructIndex => {
                self.print(arena, expr.op1);
                self.out.push('.');
                self.print(arena, expr.op2);
            }
            BinaryOpKind::Comma => {
                self.out.push('(');
                self.print(arena, expr.op1);
                self.out.push_str(", ");
                self.print(arena, expr.op2);
                self.out.push(')');
            }
            op => {
                self.out.push('(');
                self.print(arena, expr.op1);
                let _ = write!(self.out, " {} ", op.as_symbol());
                self.print(arena, expr.op2);
                self.out.push(')');
            }
        }
    }

    fn print_unary(&mut self, arena: &IrArena, expr: &UnaryOpExpr) {
        self.out.push_str(expr.op.as_symbol());
        self.print(arena, expr.operand);
    }

    fn print_cast(&mut self, arena: &IrArena, expr: &CastExpr) {
        let _ = write!(self.out, "{}<", cast_name(expr.op));
        self.print(arena, expr.dst_type);
        self.out.push_str(">(");
        self.print(arena, expr.operand);
        self.out.push(')');
    }
}

/// Label used for goto targets: the `label` metadata entry if present,
/// otherwise one derived from the handle.
fn label(arena: &IrArena, id: ValueId) -> String {
    arena
        .is_live(id)
        .then(|| arena.metadata(id).get("label").map(str::to_owned))
        .flatten()
        .unwrap_or_else(|| format!("label_{}", id.raw()))
}

fn is_goto_target(arena: &IrArena, id: ValueId) -> bool {
    arena
        .observers(id)
        .iter()
        .any(|&o| arena.cast::<GotoStmt>(o).is_some_and(|g| g.target == id))
}

fn cast_name(op: CastOp) -> &'static str {
    match op {
        CastOp::BitCast => "bitcast",
        CastOp::Ext(ExtVariant::SExt) => "sext",
        CastOp::Ext(ExtVariant::ZExt) => "zext",
        CastOp::Ext(ExtVariant::FpExt) => "fpext",
        CastOp::FpToInt => "fptoint",
        CastOp::IntToFp => "inttofp",
        CastOp::IntToPtr => "inttoptr",
        CastOp::PtrToInt => "ptrtoint",
        CastOp::Trunc => "trunc",
    }
}

/// Forwards each listed leaf method to one rendering helper.
macro_rules! forward {
    ($helper:ident($payload:ty): $($method:ident),* $(,)?) => {
        $(
            fn $method(&mut self, arena: &IrArena, _id: ValueId, payload: &$payload) {
                self.$helper(arena, payload);
            }
        )*
    };
}

impl Visitor for Printer {
    forward! {
        print_type(Type):
        visit_array_type,
        visit_float_type,
        visit_function_type,
        visit_int_type,
        visit_pointer_type,
        visit_string_type,
        visit_struct_type,
        visit_unknown_type,
        visit_void_type,
    }

    forward! {
        print_binary(BinaryOpExpr):
        visit_add_op,
        visit_and_op,
        visit_array_index_op,
        visit_assign_op,
        visit_bit_and_op,
        visit_bit_or_op,
        visit_bit_shl_op,
        visit_bit_shr_op,
        visit_bit_xor_op,
        visit_comma_op,
        visit_div_op,
        visit_eq_op,
        visit_gt_eq_op,
        visit_gt_op,
        visit_lt_eq_op,
        visit_lt_op,
        visit_mod_op,
        visit_mul_op,
        visit_neq_op,
        visit_or_op,
        visit_struct_index_op,
        visit_sub_op,
    }

    forward! {
        print_unary(UnaryOpExpr):
        visit_address_op,
        visit_deref_op,
        visit_neg_op,
        visit_not_op,
    }

    forward! {
        print_cast(CastExpr):
        visit_bit_cast,
        visit_ext_cast,
        visit_fp_to_int_cast,
        visit_int_to_fp_cast,
        visit_int_to_ptr_cast,
        visit_ptr_to_int_cast,
        visit_trunc_cast,
    }

    fn visit_function(&mut self, arena: &IrArena, _id: ValueId, func: &Function) {
        self.print(arena, func.ret_type);
        let _ = write!(self.out, " {}(", func.name);
        for (i, &param) in func.params.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.print_declaration(arena, param);
        }
        if func.vararg {
            self.out.push_str(if func.params.is_empty() { "..." } else { ", ..." });
        }
        self.out.push(')');
        match func.body {
            Some(body) => self.print_body(arena, body),
            None => self.out.push(';'),
        }
    }

    fn visit_global_var_def(&mut self, arena: &IrArena, _id: ValueId, def: &GlobalVarDef) {
        self.print_declaration(arena, def.var);
        if let Some(init) = def.init {
            self.out.push_str(" = ");
            self.print(arena, init);
        }
        self.out.push(';');
    }

    fn visit_assign_stmt(&mut self, arena: &IrArena, _id: ValueId, stmt: &AssignStmt) {
        self.print(arena, stmt.lhs);
        self.out.push_str(" = ");
        self.print(arena, stmt.rhs);
        self.out.push(';');
    }

    fn visit_break_stmt(&mut self, _arena: &IrArena, _id: ValueId) {
        self.out.push_str("break;");
    }

    fn visit_call_stmt(&mut self, arena: &IrArena, _id: ValueId, stmt: &CallStmt) {
        self.print(arena, stmt.call);
        self.out.push(';');
    }

    fn visit_continue_stmt(&mut self, _arena: &IrArena, _id: ValueId) {
        self.out.push_str("continue;");
    }

    fn visit_empty_stmt(&mut self, _arena: &IrArena, _id: ValueId) {
        self.out.push(';');
    }

    fn visit_for_loop_stmt(&mut self, arena: &IrArena, _id: ValueId, stmt: &ForLoopStmt) {
        self.out.push_str("for (");
        self.print(arena, stmt.ind_var);
        self.out.push_str(" = ");
        self.print(arena, stmt.start);
        self.out.push_str("; ");
        self.print(arena, stmt.ind_var);
        self.out.push_str(" <= ");
        self.print(arena, stmt.end);
        self.out.push_str("; ");
        self.print(arena, stmt.ind_var);
        self.out.push_str(" += ");
        self.print(arena, stmt.step);
        self.out.push(')');
        self.print_body(arena, stmt.body);
    }

    fn visit_goto_stmt(&mut self, arena: &IrArena, _id: ValueId, stmt: &GotoStmt) {
        let _ = write!(self.out, "goto {};", label(arena, stmt.target));
    }

    fn visit_if_stmt(&mut self, arena: &IrArena, _id: ValueId, stmt: &IfStmt) {
        for (i, &(cond, body)) in stmt.clauses.iter().enumerate() {
            self.out.push_str(if i == 0 { "if (" } else { " else if (" });
            self.print(arena, cond);
            self.out.push(')');
            self.print_body(arena, body);
        }
        if let Some(body) = stmt.else_body {
            self.out.push_str(" else");
            self.print_body(arena, body);
        }
    }

    fn visit_return_stmt(&mut self, arena: &IrArena, _id: ValueId, stmt: &ReturnStmt) {
        match stmt.value {
            Some(value) => {
                self.out.push_str("return ");
                self.print(arena, value);
                self.out.push(';');
            }
            None => self.out.push_str("return;"),
        }
    }

    fn visit_switch_stmt(&mut self, arena: &IrArena, _id: ValueId, stmt: &SwitchStmt) {
        self.out.push_str("switch (");
        self.print(arena, stmt.control);
        self.out.push_str(") {");
        for &(case, body) in &stmt.clauses {
            self.newline();
            match case {
                Some(case) => {
                    self.out.push_str("case ");
                    self.print(arena, case);
                    self.out.push(':');
                }
                None => self.out.push_str("default:"),
            }
            self.print_body(arena, body);
        }
        self.newline();
        self.out.push('}');
    }

    fn visit_u_for_loop_stmt(&mut self, arena: &IrArena, _id: ValueId, stmt: &UForLoopStmt) {
        self.out.push_str("for (");
        self.print_optional(arena, stmt.init);
        self.out.push_str("; ");
        self.print_optional(arena, stmt.cond);
        self.out.push_str("; ");
        self.print_optional(arena, stmt.step);
        self.out.push(')');
        self.print_body(arena, stmt.body);
    }

    fn visit_unreachable_stmt(&mut self, _arena: &IrArena, _id: ValueId) {
        self.out.push_str("unreachable;");
    }

    fn visit_var_def_stmt(&mut self, arena: &IrArena, _id: ValueId, stmt: &VarDefStmt) {
        self.print_declaration(arena, stmt.var);
        if let Some(init) = stmt.init {
            self.out.push_str(" = ");
            self.print(arena, init);
        }
        self.out.push(';');
    }

    fn visit_while_loop_stmt(&mut self, arena: &IrArena, _id: ValueId, stmt: &WhileLoopStmt) {
        self.out.push_str("while (");
        self.print(arena, stmt.cond);
        self.out.push(')');
        self.print_body(arena, stmt.body);
    }

    fn visit_call(&mut self, arena: &IrArena, _id: ValueId, expr: &CallExpr) {
        self.print_callee(arena, expr.callee);
        self.out.push('(');
        self.print_list(arena, &expr.args);
        self.out.push(')');
    }

    fn visit_ternary_op(&mut self, arena: &IrArena, _id: ValueId, expr: &TernaryOpExpr) {
        self.out.push('(');
        self.print(arena, expr.cond);
        self.out.push_str(" ? ");
        self.print(arena, expr.true_value);
        self.out.push_str(" : ");
        self.print(arena, expr.false_value);
        self.out.push(')');
    }

    fn visit_variable(&mut self, _arena: &IrArena, _id: ValueId, var: &Variable) {
        self.out.push_str(&var.name);
    }

    fn visit_const_array(&mut self, arena: &IrArena, _id: ValueId, c: &ConstArray) {
        self.out.push('[');
        self.print_list(arena, &c.elems);
        self.out.push(']');
    }

    fn visit_const_bool(&mut self, _arena: &IrArena, _id: ValueId, c: &ConstBool) {
        self.out.push_str(if c.value { "true" } else { "false" });
    }

    fn visit_const_float(&mut self, _arena: &IrArena, _id: ValueId, c: &ConstFloat) {
        let _ = write!(self.out, "{:?}", c.value());
    }

    fn visit_const_int(&mut self, _arena: &IrArena, _id: ValueId, c: &ConstInt) {
        let _ = write!(self.out, "{}", c.value);
    }

    fn visit_const_null_pointer(&mut self, _arena: &IrArena, _id: ValueId, _c: &ConstNullPointer) {
        self.out.push_str("NULL");
    }

    fn visit_const_string(&mut self, _arena: &IrArena, _id: ValueId, c: &ConstString) {
        let _ = write!(self.out, "{:?}", c.value);
    }

    fn visit_const_struct(&mut self, arena: &IrArena, _id: ValueId, c: &ConstStruct) {
        self.out.push('{');
        self.print_list(arena, &c.fields);
        self.out.push('}');
    }

    fn visit_const_symbol(&mut self, _arena: &IrArena, _id: ValueId, c: &ConstSymbol) {
        self.out.push_str(&c.name);
    }
}

/// `Display` adapter returned by [`IrArena::display`].
pub struct ValueDisplay<'a> {
    arena: &'a IrArena,
    id: ValueId,
}

impl fmt::Display for ValueDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.arena.text_repr(self.id))
    }
}

impl IrArena {
    /// Diagnostic text of `id`. Null and released handles render as
    /// `<invalid>`.
    pub fn text_repr(&self, id: ValueId) -> String {
        let mut printer = Printer::new();
        printer.print(self, id);
        printer.finish()
    }

    /// `format!("{}", arena.display(id))` renders the same text as
    /// [`IrArena::text_repr`].
    pub fn display(&self, id: ValueId) -> ValueDisplay<'_> {
        ValueDisplay { arena: self, id }
    }
}
