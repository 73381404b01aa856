//! Statement payloads.
//!
//! Statements form singly linked chains: each one may own its successor.
//! Compound statements (`if`, `switch`, loops) additionally own the head of
//! each nested body. A `goto` only refers to its target; the target is owned
//! by whichever chain it sits in.

use crate::edge::{Edge, EdgeList};
use crate::{StmtKind, ValueId};

/// Statement node: the statement itself plus its owned successor.
///
/// `predecessor` is the back link of the chain, kept so a statement that is
/// still linked cannot be released or linked a second time.
#[derive(Clone, Debug)]
pub struct Stmt {
    pub(crate) data: StmtData,
    pub(crate) successor: Option<ValueId>,
    pub(crate) predecessor: Option<ValueId>,
    /// Address of the machine code the statement was decompiled from.
    pub(crate) address: Option<u64>,
}

impl Stmt {
    pub(crate) fn new(data: StmtData) -> Self {
        Stmt {
            data,
            successor: None,
            predecessor: None,
            address: None,
        }
    }

    #[inline]
    pub fn data(&self) -> &StmtData {
        &self.data
    }

    #[inline]
    pub fn successor(&self) -> Option<ValueId> {
        self.successor
    }

    /// The statement whose successor this one is.
    #[inline]
    pub fn predecessor(&self) -> Option<ValueId> {
        self.predecessor
    }

    #[inline]
    pub fn address(&self) -> Option<u64> {
        self.address
    }

    #[inline]
    pub fn kind(&self) -> StmtKind {
        self.data.kind()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StmtData {
    Assign(AssignStmt),
    Break,
    Call(CallStmt),
    Continue,
    Empty,
    ForLoop(ForLoopStmt),
    Goto(GotoStmt),
    If(IfStmt),
    Return(ReturnStmt),
    Switch(SwitchStmt),
    UForLoop(UForLoopStmt),
    Unreachable,
    VarDef(VarDefStmt),
    WhileLoop(WhileLoopStmt),
}

impl StmtData {
    pub const fn kind(&self) -> StmtKind {
        match self {
            StmtData::Assign(_) => StmtKind::Assign,
            StmtData::Break => StmtKind::Break,
            StmtData::Call(_) => StmtKind::Call,
            StmtData::Continue => StmtKind::Continue,
            StmtData::Empty => StmtKind::Empty,
            StmtData::ForLoop(_) => StmtKind::ForLoop,
            StmtData::Goto(_) => StmtKind::Goto,
            StmtData::If(_) => StmtKind::If,
            StmtData::Return(_) => StmtKind::Return,
            StmtData::Switch(_) => StmtKind::Switch,
            StmtData::UForLoop(_) => StmtKind::UForLoop,
            StmtData::Unreachable => StmtKind::Unreachable,
            StmtData::VarDef(_) => StmtKind::VarDef,
            StmtData::WhileLoop(_) => StmtKind::WhileLoop,
        }
    }

    pub(crate) fn edges(&self, out: &mut EdgeList) {
        match self {
            StmtData::Assign(s) => {
                out.push((Edge::Lhs, Some(s.lhs)));
                out.push((Edge::Rhs, Some(s.rhs)));
            }
            StmtData::Call(s) => out.push((Edge::Call, Some(s.call))),
            StmtData::ForLoop(s) => {
                out.push((Edge::IndVar, Some(s.ind_var)));
                out.push((Edge::Start, Some(s.start)));
                out.push((Edge::End, Some(s.end)));
                out.push((Edge::Step, Some(s.step)));
                out.push((Edge::Body, Some(s.body)));
            }
            StmtData::Goto(s) => out.push((Edge::Target, Some(s.target))),
            StmtData::If(s) => {
                for (i, (cond, body)) in s.clauses.iter().enumerate() {
                    out.push((Edge::ClauseCond(i), Some(*cond)));
                    out.push((Edge::ClauseBody(i), Some(*body)));
                }
                out.push((Edge::ElseBody, s.else_body));
            }
            StmtData::Return(s) => out.push((Edge::RetVal, s.value)),
            StmtData::Switch(s) => {
                out.push((Edge::ControlExpr, Some(s.control)));
                for (i, (case, body)) in s.clauses.iter().enumerate() {
                    out.push((Edge::CaseExpr(i), *case));
                    out.push((Edge::ClauseBody(i), Some(*body)));
                }
            }
            StmtData::UForLoop(s) => {
                out.push((Edge::Init, s.init));
                out.push((Edge::LoopCond, s.cond));
                out.push((Edge::LoopStep, s.step));
                out.push((Edge::Body, Some(s.body)));
            }
            StmtData::VarDef(s) => {
                out.push((Edge::Var, Some(s.var)));
                out.push((Edge::Init, s.init));
            }
            StmtData::WhileLoop(s) => {
                out.push((Edge::Cond, Some(s.cond)));
                out.push((Edge::Body, Some(s.body)));
            }
            StmtData::Break | StmtData::Continue | StmtData::Empty | StmtData::Unreachable => {}
        }
    }

    pub(crate) fn put(&mut self, edge: Edge, value: Option<ValueId>) -> bool {
        match (self, edge, value) {
            (StmtData::Assign(s), Edge::Lhs, Some(v)) => s.lhs = v,
            (StmtData::Assign(s), Edge::Rhs, Some(v)) => s.rhs = v,
            (StmtData::Call(s), Edge::Call, Some(v)) => s.call = v,
            (StmtData::ForLoop(s), Edge::IndVar, Some(v)) => s.ind_var = v,
            (StmtData::ForLoop(s), Edge::Start, Some(v)) => s.start = v,
            (StmtData::ForLoop(s), Edge::End, Some(v)) => s.end = v,
            (StmtData::ForLoop(s), Edge::Step, Some(v)) => s.step = v,
            (StmtData::ForLoop(s), Edge::Body, Some(v)) => s.body = v,
            (StmtData::Goto(s), Edge::Target, Some(v)) => s.target = v,
            (StmtData::If(s), Edge::ClauseCond(i), Some(v)) if i < s.clauses.len() => {
                s.clauses[i].0 = v;
            }
            (StmtData::If(s), Edge::ClauseBody(i), Some(v)) if i < s.clauses.len() => {
                s.clauses[i].1 = v;
            }
            (StmtData::If(s), Edge::ElseBody, value) => s.else_body = value,
            (StmtData::Return(s), Edge::RetVal, value) => s.value = value,
            (StmtData::Switch(s), Edge::ControlExpr, Some(v)) => s.control = v,
            (StmtData::Switch(s), Edge::CaseExpr(i), value) if i < s.clauses.len() => {
                s.clauses[i].0 = value;
            }
            (StmtData::Switch(s), Edge::ClauseBody(i), Some(v)) if i < s.clauses.len() => {
                s.clauses[i].1 = v;
            }
            (StmtData::UForLoop(s), Edge::Init, value) => s.init = value,
            (StmtData::UForLoop(s), Edge::LoopCond, value) => s.cond = value,
            (StmtData::UForLoop(s), Edge::LoopStep, value) => s.step = value,
            (StmtData::UForLoop(s), Edge::Body, Some(v)) => s.body = v,
            (StmtData::VarDef(s), Edge::Var, Some(v)) => s.var = v,
            (StmtData::VarDef(s), Edge::Init, value) => s.init = value,
            (StmtData::WhileLoop(s), Edge::Cond, Some(v)) => s.cond = v,
            (StmtData::WhileLoop(s), Edge::Body, Some(v)) => s.body = v,
            _ => return false,
        }
        true
    }

    /// Compare clause structure; children are compared through the edges.
    pub(crate) fn same_shape(&self, other: &StmtData) -> bool {
        match (self, other) {
            (StmtData::If(a), StmtData::If(b)) => a.clauses.len() == b.clauses.len(),
            (StmtData::Switch(a), StmtData::Switch(b)) => a.clauses.len() == b.clauses.len(),
            (a, b) => a.kind() == b.kind(),
        }
    }
}

/// `lhs = rhs`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssignStmt {
    pub(crate) lhs: ValueId,
    pub(crate) rhs: ValueId,
}

impl AssignStmt {
    #[inline]
    pub fn lhs(&self) -> ValueId {
        self.lhs
    }

    #[inline]
    pub fn rhs(&self) -> ValueId {
        self.rhs
    }
}

/// A call evaluated for its side effects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallStmt {
    pub(crate) call: ValueId,
}

impl CallStmt {
    #[inline]
    pub fn call(&self) -> ValueId {
        self.call
    }
}

/// Unconditional jump. `target` is a back-reference, not an owning edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GotoStmt {
    pub(crate) target: ValueId,
}

impl GotoStmt {
    #[inline]
    pub fn target(&self) -> ValueId {
        self.target
    }
}

/// `if (c1) { b1 } else if (c2) { b2 } ... else { e }`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IfStmt {
    pub(crate) clauses: Vec<(ValueId, ValueId)>,
    pub(crate) else_body: Option<ValueId>,
}

impl IfStmt {
    /// `(condition, body)` pairs; the first one is the `if` clause.
    #[inline]
    pub fn clauses(&self) -> &[(ValueId, ValueId)] {
        &self.clauses
    }

    #[inline]
    pub fn first_condition(&self) -> ValueId {
        self.clauses[0].0
    }

    #[inline]
    pub fn first_body(&self) -> ValueId {
        self.clauses[0].1
    }

    #[inline]
    pub fn else_body(&self) -> Option<ValueId> {
        self.else_body
    }

    #[inline]
    pub fn has_else_if_clauses(&self) -> bool {
        self.clauses.len() > 1
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReturnStmt {
    pub(crate) value: Option<ValueId>,
}

impl ReturnStmt {
    #[inline]
    pub fn value(&self) -> Option<ValueId> {
        self.value
    }
}

/// `switch (control) { case e1: b1 ... default: bd }`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwitchStmt {
    pub(crate) control: ValueId,
    pub(crate) clauses: Vec<(Option<ValueId>, ValueId)>,
}

impl SwitchStmt {
    #[inline]
    pub fn control_expr(&self) -> ValueId {
        self.control
    }

    /// `(case expression, body)` pairs; `None` marks the default clause.
    #[inline]
    pub fn clauses(&self) -> &[(Option<ValueId>, ValueId)] {
        &self.clauses
    }

    pub fn has_default_clause(&self) -> bool {
        self.clauses.iter().any(|(case, _)| case.is_none())
    }
}

/// `for ind_var in start..=end by step { body }`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForLoopStmt {
    pub(crate) ind_var: ValueId,
    pub(crate) start: ValueId,
    pub(crate) end: ValueId,
    pub(crate) step: ValueId,
    pub(crate) body: ValueId,
}

impl ForLoopStmt {
    #[inline]
    pub fn ind_var(&self) -> ValueId {
        self.ind_var
    }

    #[inline]
    pub fn start(&self) -> ValueId {
        self.start
    }

    #[inline]
    pub fn end(&self) -> ValueId {
        self.end
    }

    #[inline]
    pub fn step(&self) -> ValueId {
        self.step
    }

    #[inline]
    pub fn body(&self) -> ValueId {
        self.body
    }
}

/// C-style `for (init; cond; step) { body }` with every header part optional.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UForLoopStmt {
    pub(crate) init: Option<ValueId>,
    pub(crate) cond: Option<ValueId>,
    pub(crate) step: Option<ValueId>,
    pub(crate) body: ValueId,
}

impl UForLoopStmt {
    #[inline]
    pub fn init(&self) -> Option<ValueId> {
        self.init
    }

    #[inline]
    pub fn cond(&self) -> Option<ValueId> {
        self.cond
    }

    #[inline]
    pub fn step(&self) -> Option<ValueId> {
        self.step
    }

    #[inline]
    pub fn body(&self) -> ValueId {
        self.body
    }
}

/// Definition of a variable with an optional initializer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VarDefStmt {
    pub(crate) var: ValueId,
    pub(crate) init: Option<ValueId>,
}

impl VarDefStmt {
    #[inline]
    pub fn var(&self) -> ValueId {
        self.var
    }

    #[inline]
    pub fn initializer(&self) -> Option<ValueId> {
        self.init
    }

    #[inline]
    pub fn has_initializer(&self) -> bool {
        self.init.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WhileLoopStmt {
    pub(crate) cond: ValueId,
    pub(crate) body: ValueId,
}

impl WhileLoopStmt {
    #[inline]
    pub fn condition(&self) -> ValueId {
        self.cond
    }

    #[inline]
    pub fn body(&self) -> ValueId {
        self.body
    }
}
