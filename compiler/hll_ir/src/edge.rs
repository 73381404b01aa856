//! Child references of IR nodes.
//!
//! Every reference a node holds to another node (operands, conditions,
//! bodies, jump targets, defined variables) is an [`Edge`]. The edge decides
//! what it may point at, whether it may be empty, and whether it is a
//! back-reference. Replace, observer updates, cloning, equality and release
//! all work off this single table instead of per-kind traversal code.
//!
//! Type references and statement successors are not edges: types are
//! immutable interned values, and successors form the statement chain that
//! replace and clone deliberately do not walk.

use smallvec::SmallVec;

use crate::{ExprKind, ValueId, ValueKind};

/// A named child slot of a node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Edge {
    // Expressions
    FirstOperand,
    SecondOperand,
    Operand,
    Callee,
    Arg(usize),
    Cond,
    TrueValue,
    FalseValue,
    Element(usize),
    SymbolValue,

    // Statements
    Lhs,
    Rhs,
    Call,
    Target,
    ClauseCond(usize),
    ClauseBody(usize),
    ElseBody,
    RetVal,
    ControlExpr,
    CaseExpr(usize),
    IndVar,
    Start,
    End,
    Step,
    Body,
    LoopCond,
    LoopStep,
    Var,
    Init,

    // Functions
    Param(usize),
    FuncBody,
}

/// What an edge may point at.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum Accepts {
    Expr,
    Var,
    Stmt,
    Constant,
    CallExpr,
    /// An expression or a function.
    Callable,
}

impl Accepts {
    pub(crate) const fn matches(self, kind: ValueKind) -> bool {
        match self {
            Accepts::Expr => kind.is_expression(),
            Accepts::Var => kind.is_variable(),
            Accepts::Stmt => kind.is_statement(),
            Accepts::Constant => kind.is_constant(),
            Accepts::CallExpr => matches!(kind, ValueKind::Expression(ExprKind::Call)),
            Accepts::Callable => {
                kind.is_expression() || matches!(kind, ValueKind::Function)
            }
        }
    }

    pub(crate) const fn describe(self) -> &'static str {
        match self {
            Accepts::Expr => "an expression",
            Accepts::Var => "a variable",
            Accepts::Stmt => "a statement",
            Accepts::Constant => "a constant",
            Accepts::CallExpr => "a call expression",
            Accepts::Callable => "an expression or a function",
        }
    }
}

/// Static description of an edge.
#[derive(Copy, Clone, Debug)]
pub(crate) struct EdgeRule {
    pub role: &'static str,
    pub accepts: Accepts,
    /// The edge may be empty.
    pub optional: bool,
    /// Navigation only; the holder never owns the referent.
    pub back_reference: bool,
}

const fn rule(role: &'static str, accepts: Accepts) -> EdgeRule {
    EdgeRule {
        role,
        accepts,
        optional: false,
        back_reference: false,
    }
}

const fn optional(role: &'static str, accepts: Accepts) -> EdgeRule {
    EdgeRule {
        role,
        accepts,
        optional: true,
        back_reference: false,
    }
}

const fn back_ref(role: &'static str, accepts: Accepts) -> EdgeRule {
    EdgeRule {
        role,
        accepts,
        optional: false,
        back_reference: true,
    }
}

impl Edge {
    pub(crate) const fn rule(self) -> EdgeRule {
        match self {
            Edge::FirstOperand => rule("first operand", Accepts::Expr),
            Edge::SecondOperand => rule("second operand", Accepts::Expr),
            Edge::Operand => rule("operand", Accepts::Expr),
            Edge::Callee => rule("called expression", Accepts::Callable),
            Edge::Arg(_) => rule("call argument", Accepts::Expr),
            Edge::Cond => rule("condition", Accepts::Expr),
            Edge::TrueValue => rule("true value", Accepts::Expr),
            Edge::FalseValue => rule("false value", Accepts::Expr),
            Edge::Element(_) => rule("constant element", Accepts::Constant),
            Edge::SymbolValue => rule("symbol value", Accepts::Constant),
            Edge::Lhs => rule("left-hand side", Accepts::Expr),
            Edge::Rhs => rule("right-hand side", Accepts::Expr),
            Edge::Call => rule("call", Accepts::CallExpr),
            Edge::Target => back_ref("goto target", Accepts::Stmt),
            Edge::ClauseCond(_) => rule("clause condition", Accepts::Expr),
            Edge::ClauseBody(_) => rule("clause body", Accepts::Stmt),
            Edge::ElseBody => optional("else clause", Accepts::Stmt),
            Edge::RetVal => optional("return value", Accepts::Expr),
            Edge::ControlExpr => rule("control expression", Accepts::Expr),
            Edge::CaseExpr(_) => optional("case expression", Accepts::Expr),
            Edge::IndVar => back_ref("induction variable", Accepts::Var),
            Edge::Start => rule("loop start", Accepts::Expr),
            Edge::End => rule("loop end", Accepts::Expr),
            Edge::Step => rule("loop step", Accepts::Expr),
            Edge::Body => rule("loop body", Accepts::Stmt),
            Edge::LoopCond => optional("loop condition", Accepts::Expr),
            Edge::LoopStep => optional("loop step", Accepts::Expr),
            Edge::Var => back_ref("defined variable", Accepts::Var),
            Edge::Init => optional("initializer", Accepts::Expr),
            Edge::Param(_) => back_ref("parameter", Accepts::Var),
            Edge::FuncBody => optional("function body", Accepts::Stmt),
        }
    }

    /// The edge holds a statement body or jump target rather than an
    /// expression, so expression replacement never descends into it.
    pub(crate) const fn is_statement_edge(self) -> bool {
        matches!(self.rule().accepts, Accepts::Stmt)
    }
}

/// Snapshot of a node's edges in declaration order.
pub(crate) type EdgeList = SmallVec<[(Edge, Option<ValueId>); 4]>;
