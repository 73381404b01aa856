//! Observer registration, notification and edge setters.
//!
//! A node observes every value its edges point at. Setters rewrite an edge
//! and move the registration in the same step, so after any public
//! operation the observer lists mirror the edges exactly.

use tracing::{trace, warn};

use super::{contract, IdList, IrArena};
use crate::edge::Edge;
use crate::expr::{Expr, Variable};
use crate::node::Node;
use crate::stmt::{IfStmt, Stmt, StmtData, SwitchStmt};
use crate::{IrError, ValueId};

/// Remove the first occurrence of `id` from `list`.
pub(super) fn remove_one(list: &mut IdList, id: ValueId) -> bool {
    match list.iter().position(|&x| x == id) {
        Some(pos) => {
            list.remove(pos);
            true
        }
        None => false,
    }
}

// Registration

impl IrArena {
    /// Register `observer` as observing `subject`. Both lists are updated
    /// together; registering twice records two registrations.
    pub fn try_add_observer(&mut self, subject: ValueId, observer: ValueId) -> Result<(), IrError> {
        self.try_slot(observer)?;
        self.try_slot_mut(subject)?.observers.push(observer);
        self.try_slot_mut(observer)?.subjects.push(subject);
        trace!(?subject, ?observer, "observer added");
        Ok(())
    }

    /// # Panics
    /// Panics if either handle is null or released.
    #[track_caller]
    pub fn add_observer(&mut self, subject: ValueId, observer: ValueId) {
        contract(self.try_add_observer(subject, observer));
    }

    /// Remove one registration of `observer` on `subject`. No-op if there
    /// is none.
    pub fn remove_observer(&mut self, subject: ValueId, observer: ValueId) {
        let removed = self
            .slot_mut(subject)
            .is_some_and(|slot| remove_one(&mut slot.observers, observer));
        if let Some(slot) = self.slot_mut(observer) {
            remove_one(&mut slot.subjects, subject);
        }
        if removed {
            trace!(?subject, ?observer, "observer removed");
        }
    }

    /// Nodes observing `id`, one entry per registration.
    pub fn observers(&self, id: ValueId) -> &[ValueId] {
        self.slot(id)
            .map(|slot| slot.observers.as_slice())
            .unwrap_or_default()
    }

    /// Nodes `id` observes, one entry per registration.
    pub fn subjects(&self, id: ValueId) -> &[ValueId] {
        self.slot(id)
            .map(|slot| slot.subjects.as_slice())
            .unwrap_or_default()
    }

    pub fn has_observer(&self, subject: ValueId, observer: ValueId) -> bool {
        self.observers(subject).contains(&observer)
    }

    /// Tell every observer of `subject` that it is being replaced by
    /// `replacement` (or removed, for `None`).
    ///
    /// Observers are snapshotted first: updates unregister observers from
    /// `subject` while the notification is in flight.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn notify_observers(&mut self, subject: ValueId, replacement: Option<ValueId>) {
        let mut snapshot = IdList::new();
        for &observer in self.observers(subject) {
            if !snapshot.contains(&observer) {
                snapshot.push(observer);
            }
        }
        for observer in snapshot {
            self.update(observer, subject, replacement);
        }
    }

    /// Re-point every edge of `observer` that holds `subject` to
    /// `replacement`.
    ///
    /// Edges the replacement does not fit keep their value: a wrong family,
    /// `None` on a mandatory edge, or a statement that already has an owner
    /// or would end up containing itself. A null or unknown subject makes the
    /// whole call a no-op.
    pub fn update(&mut self, observer: ValueId, subject: ValueId, replacement: Option<ValueId>) {
        if !subject.is_valid() {
            warn!(?observer, "ignoring update with a null subject");
            return;
        }
        if !self.is_live(observer) {
            warn!(?observer, ?subject, "ignoring update of a released observer");
            return;
        }
        if replacement == Some(subject) {
            return;
        }
        if let Some(Err(err)) = replacement.map(|new| self.try_kind(new)) {
            warn!(?observer, ?subject, %err, "ignoring update with an unusable replacement");
            return;
        }

        // Checked per edge: once one body edge takes the replacement, it is
        // owned and no further body edge may take it.
        for (edge, value) in self.edges(observer) {
            if value != Some(subject) {
                continue;
            }
            match self.check_link(observer, edge, replacement) {
                Ok(()) => self.write_edge(observer, edge, replacement),
                Err(err) => {
                    trace!(?observer, ?edge, ?replacement, %err, "replacement does not fit; edge kept");
                }
            }
        }
    }

    /// Replace `old` by `new` everywhere it is observed.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn replace_value(&mut self, old: ValueId, new: ValueId) {
        self.notify_observers(old, Some(new));
    }
}

// Edge rewriting

impl IrArena {
    /// Store `value` in `edge` of `owner` and move the observer
    /// registration from the previous value. The caller has validated both.
    pub(crate) fn write_edge(&mut self, owner: ValueId, edge: Edge, value: Option<ValueId>) {
        let Some(old) = self.edge_value(owner, edge) else {
            return;
        };
        if old == value {
            return;
        }
        let written = self.node_mut(owner).is_ok_and(|node| node.put(edge, value));
        if !written {
            return;
        }
        if let Some(old) = old {
            self.remove_observer(old, owner);
        }
        if let Some(new) = value {
            self.add_observer(new, owner);
        }
        trace!(?owner, ?edge, ?old, ?value, "edge rewritten");
    }

    /// Set any edge of `owner`. This is the fallible form behind every named
    /// setter.
    pub fn try_set_edge(
        &mut self,
        owner: ValueId,
        edge: Edge,
        value: Option<ValueId>,
    ) -> Result<(), IrError> {
        let kind = self.try_kind(owner)?;
        match self.edge_value(owner, edge) {
            None => {
                return Err(IrError::NoSuchEdge {
                    role: edge.rule().role,
                    found: kind,
                })
            }
            Some(current) if current == value => return Ok(()),
            Some(_) => {}
        }
        self.check_link(owner, edge, value)?;
        self.write_edge(owner, edge, value);
        Ok(())
    }

    /// # Panics
    /// Panics if `owner` has no such edge or `value` does not fit it.
    #[track_caller]
    pub fn set_edge(&mut self, owner: ValueId, edge: Edge, value: Option<ValueId>) {
        contract(self.try_set_edge(owner, edge, value));
    }
}

/// Named setters for edges that always hold a value.
macro_rules! setters {
    ($($(#[$doc:meta])* $name:ident / $try_name:ident => $edge:ident;)*) => {
        impl IrArena {
            $(
                $(#[$doc])*
                pub fn $try_name(&mut self, owner: ValueId, value: ValueId) -> Result<(), IrError> {
                    self.try_set_edge(owner, Edge::$edge, Some(value))
                }

                $(#[$doc])*
                #[track_caller]
                pub fn $name(&mut self, owner: ValueId, value: ValueId) {
                    contract(self.$try_name(owner, value));
                }
            )*
        }
    };
}

/// Named setters for edges that may be empty.
macro_rules! optional_setters {
    ($($(#[$doc:meta])* $name:ident / $try_name:ident => $edge:ident;)*) => {
        impl IrArena {
            $(
                $(#[$doc])*
                pub fn $try_name(
                    &mut self,
                    owner: ValueId,
                    value: Option<ValueId>,
                ) -> Result<(), IrError> {
                    self.try_set_edge(owner, Edge::$edge, value)
                }

                $(#[$doc])*
                #[track_caller]
                pub fn $name(&mut self, owner: ValueId, value: Option<ValueId>) {
                    contract(self.$try_name(owner, value));
                }
            )*
        }
    };
}

/// Named setters for positional edges (arguments, clauses, parameters).
macro_rules! indexed_setters {
    ($($(#[$doc:meta])* $name:ident / $try_name:ident => $edge:ident;)*) => {
        impl IrArena {
            $(
                $(#[$doc])*
                pub fn $try_name(
                    &mut self,
                    owner: ValueId,
                    index: usize,
                    value: ValueId,
                ) -> Result<(), IrError> {
                    self.try_set_edge(owner, Edge::$edge(index), Some(value))
                }

                $(#[$doc])*
                #[track_caller]
                pub fn $name(&mut self, owner: ValueId, index: usize, value: ValueId) {
                    contract(self.$try_name(owner, index, value));
                }
            )*
        }
    };
}

setters! {
    /// First operand of a binary operator.
    set_first_operand / try_set_first_operand => FirstOperand;
    /// Second operand of a binary operator.
    set_second_operand / try_set_second_operand => SecondOperand;
    /// Operand of a unary operator or cast.
    set_operand / try_set_operand => Operand;
    set_callee / try_set_callee => Callee;
    /// Condition of a ternary operator or `while` loop.
    set_condition / try_set_condition => Cond;
    set_true_value / try_set_true_value => TrueValue;
    set_false_value / try_set_false_value => FalseValue;
    set_symbol_value / try_set_symbol_value => SymbolValue;
    set_lhs / try_set_lhs => Lhs;
    set_rhs / try_set_rhs => Rhs;
    /// Call expression of a call statement.
    set_call / try_set_call => Call;
    /// Target of a `goto`. The target is referred to, not owned.
    set_target / try_set_target => Target;
    set_control_expr / try_set_control_expr => ControlExpr;
    /// Induction variable of a counted `for` loop.
    set_ind_var / try_set_ind_var => IndVar;
    set_start / try_set_start => Start;
    set_end / try_set_end => End;
    set_step / try_set_step => Step;
    /// Body head of a loop.
    set_body / try_set_body => Body;
    /// Defined variable of a variable or global variable definition.
    set_var / try_set_var => Var;
}

optional_setters! {
    /// `None` removes the `else` clause.
    set_else_clause / try_set_else_clause => ElseBody;
    /// `None` turns the statement into a bare `return`.
    set_return_value / try_set_return_value => RetVal;
    /// Initializer of a variable definition, global variable definition or
    /// the init part of a C-style `for` loop.
    set_initializer / try_set_initializer => Init;
    set_loop_condition / try_set_loop_condition => LoopCond;
    set_loop_step / try_set_loop_step => LoopStep;
    /// `None` turns the function into a declaration.
    set_function_body / try_set_function_body => FuncBody;
}

indexed_setters! {
    set_arg / try_set_arg => Arg;
    set_element / try_set_element => Element;
    /// Condition of the `index`-th clause of an `if`.
    set_clause_condition / try_set_clause_condition => ClauseCond;
    /// Body of the `index`-th clause of an `if` or `switch`.
    set_clause_body / try_set_clause_body => ClauseBody;
    set_param / try_set_param => Param;
}

// Clause lists and renaming

impl IrArena {
    /// Drop the initializer of a variable definition. No-op if it has none.
    #[track_caller]
    pub fn remove_initializer(&mut self, owner: ValueId) {
        self.set_initializer(owner, None);
    }

    #[track_caller]
    pub fn remove_else_clause(&mut self, owner: ValueId) {
        self.set_else_clause(owner, None);
    }

    /// Append an `else if (cond) { body }` clause.
    pub fn try_add_if_clause(
        &mut self,
        owner: ValueId,
        cond: ValueId,
        body: ValueId,
    ) -> Result<(), IrError> {
        self.expect_cast::<IfStmt>(owner, "owner", "an if statement")?;
        self.check_edge(Edge::ClauseCond(0), Some(cond))?;
        self.check_link(owner, Edge::ClauseBody(0), Some(body))?;
        if let Ok(Node::Stmt(Stmt {
            data: StmtData::If(stmt),
            ..
        })) = self.node_mut(owner)
        {
            stmt.clauses.push((cond, body));
        }
        self.add_observer(cond, owner);
        self.add_observer(body, owner);
        Ok(())
    }

    #[track_caller]
    pub fn add_if_clause(&mut self, owner: ValueId, cond: ValueId, body: ValueId) {
        contract(self.try_add_if_clause(owner, cond, body));
    }

    /// Append a `case` clause; `None` adds the `default` clause.
    pub fn try_add_switch_clause(
        &mut self,
        owner: ValueId,
        case: Option<ValueId>,
        body: ValueId,
    ) -> Result<(), IrError> {
        self.expect_cast::<SwitchStmt>(owner, "owner", "a switch statement")?;
        self.check_edge(Edge::CaseExpr(0), case)?;
        self.check_link(owner, Edge::ClauseBody(0), Some(body))?;
        if let Ok(Node::Stmt(Stmt {
            data: StmtData::Switch(stmt),
            ..
        })) = self.node_mut(owner)
        {
            stmt.clauses.push((case, body));
        }
        if let Some(case) = case {
            self.add_observer(case, owner);
        }
        self.add_observer(body, owner);
        Ok(())
    }

    #[track_caller]
    pub fn add_switch_clause(&mut self, owner: ValueId, case: Option<ValueId>, body: ValueId) {
        contract(self.try_add_switch_clause(owner, case, body));
    }

    /// Rename a variable. The only mutation a shared variable allows.
    pub fn try_set_variable_name(
        &mut self,
        var: ValueId,
        name: impl Into<String>,
    ) -> Result<(), IrError> {
        self.expect_cast::<Variable>(var, "renamed value", "a variable")?;
        if let Ok(Node::Expr(Expr::Variable(v))) = self.node_mut(var) {
            v.name = name.into();
        }
        Ok(())
    }

    #[track_caller]
    pub fn set_variable_name(&mut self, var: ValueId, name: impl Into<String>) {
        contract(self.try_set_variable_name(var, name));
    }
}

#[cfg(test)]
mod tests;
