//! Statement successor chains.
//!
//! Each statement owns its successor and records its predecessor. A
//! statement can sit in at most one chain position, and a chain never loops
//! back on itself or into a body nested in one of its statements.

use tracing::trace;

use super::{contract, IrArena};
use crate::node::Node;
use crate::stmt::{Stmt, StmtData};
use crate::{BinaryOpKind, IrError, ValueId};

/// Iterator over a statement chain, head first.
pub struct Statements<'a> {
    arena: &'a IrArena,
    next: Option<ValueId>,
}

impl Iterator for Statements<'_> {
    type Item = ValueId;

    fn next(&mut self) -> Option<ValueId> {
        let current = self.next?;
        self.next = self.arena.successor(current);
        Some(current)
    }
}

impl IrArena {
    fn stmt_mut(&mut self, id: ValueId) -> Option<&mut Stmt> {
        match self.node_mut(id) {
            Ok(Node::Stmt(stmt)) => Some(stmt),
            _ => None,
        }
    }

    pub fn successor(&self, id: ValueId) -> Option<ValueId> {
        self.cast::<Stmt>(id).and_then(Stmt::successor)
    }

    pub fn predecessor(&self, id: ValueId) -> Option<ValueId> {
        self.cast::<Stmt>(id).and_then(Stmt::predecessor)
    }

    /// Iterate the chain starting at `head`. Empty if `head` is not a live
    /// statement.
    pub fn statements(&self, head: ValueId) -> Statements<'_> {
        Statements {
            arena: self,
            next: self.isa::<Stmt>(head).then_some(head),
        }
    }

    /// `true` for statements owning nested bodies: `if`, `switch` and loops.
    pub fn is_compound(&self, id: ValueId) -> bool {
        self.cast::<Stmt>(id).is_some_and(|s| s.kind().is_compound())
    }

    /// Link `stmt -> succ` without checks.
    pub(crate) fn link(&mut self, stmt: ValueId, succ: ValueId) {
        if let Some(s) = self.stmt_mut(stmt) {
            s.successor = Some(succ);
        }
        if let Some(s) = self.stmt_mut(succ) {
            s.predecessor = Some(stmt);
        }
    }

    /// Set or clear the successor of `stmt`. The previous successor, if any,
    /// is detached and left unowned.
    pub fn try_set_successor(
        &mut self,
        stmt: ValueId,
        succ: Option<ValueId>,
    ) -> Result<(), IrError> {
        self.expect_cast::<Stmt>(stmt, "statement", "a statement")?;
        let old = self.successor(stmt);
        if old == succ {
            return Ok(());
        }
        if let Some(succ) = succ {
            self.expect_cast::<Stmt>(succ, "successor", "a statement")?;
            if let Some(owner) = self.stmt_owner(succ) {
                return Err(IrError::AlreadyOwned { id: succ, owner });
            }
            if self.owns_transitively(succ, stmt) {
                return Err(IrError::ChainCycle { id: succ });
            }
        }
        if let Some(old) = old {
            if let Some(s) = self.stmt_mut(old) {
                s.predecessor = None;
            }
        }
        match succ {
            Some(succ) => self.link(stmt, succ),
            None => {
                if let Some(s) = self.stmt_mut(stmt) {
                    s.successor = None;
                }
            }
        }
        trace!(?stmt, ?old, ?succ, "successor changed");
        Ok(())
    }

    /// # Panics
    /// Panics if either handle is not a live statement, if `succ` already
    /// has an owner, or if linking would create a cycle.
    #[track_caller]
    pub fn set_successor(&mut self, stmt: ValueId, succ: Option<ValueId>) {
        contract(self.try_set_successor(stmt, succ));
    }

    /// Detach and return the successor of `stmt`. The caller now owns the
    /// detached chain.
    pub fn remove_successor(&mut self, stmt: ValueId) -> Option<ValueId> {
        let old = self.successor(stmt)?;
        if let Some(s) = self.stmt_mut(stmt) {
            s.successor = None;
        }
        if let Some(s) = self.stmt_mut(old) {
            s.predecessor = None;
        }
        trace!(?stmt, ?old, "successor removed");
        Some(old)
    }

    /// Link `stmt` after the last statement of the chain starting at `head`.
    pub fn try_append_statement(&mut self, head: ValueId, stmt: ValueId) -> Result<(), IrError> {
        let last = self.statements(head).last().unwrap_or(head);
        self.try_set_successor(last, Some(stmt))
    }

    #[track_caller]
    pub fn append_statement(&mut self, head: ValueId, stmt: ValueId) {
        contract(self.try_append_statement(head, stmt));
    }

    /// Machine-code address of a statement, if one was recorded.
    pub fn statement_address(&self, id: ValueId) -> Option<u64> {
        self.cast::<Stmt>(id).and_then(Stmt::address)
    }

    pub fn try_set_statement_address(
        &mut self,
        id: ValueId,
        address: Option<u64>,
    ) -> Result<(), IrError> {
        self.expect_cast::<Stmt>(id, "statement", "a statement")?;
        if let Some(s) = self.stmt_mut(id) {
            s.address = address;
        }
        Ok(())
    }

    /// # Panics
    /// Panics if `id` is not a live statement.
    #[track_caller]
    pub fn set_statement_address(&mut self, id: ValueId, address: Option<u64>) {
        contract(self.try_set_statement_address(id, address));
    }

    /// The statement's effect as a freshly allocated expression.
    ///
    /// An assignment yields `lhs = rhs`, a definition with an initializer
    /// yields `var = init` and a call statement yields a copy of its call.
    /// Every other statement has no expression form. The statement itself is
    /// left unchanged.
    pub fn try_as_expression(&mut self, id: ValueId) -> Result<Option<ValueId>, IrError> {
        let (lhs, rhs) = match &self.expect_cast::<Stmt>(id, "statement", "a statement")?.data {
            StmtData::Assign(s) => (s.lhs, s.rhs),
            StmtData::VarDef(s) => match s.init {
                Some(init) => (s.var, init),
                None => return Ok(None),
            },
            StmtData::Call(s) => {
                let call = s.call;
                return self.try_clone_value(call).map(Some);
            }
            _ => return Ok(None),
        };
        let lhs = self.try_clone_value(lhs)?;
        let rhs = self.try_clone_value(rhs)?;
        self.try_binary_op(BinaryOpKind::Assign, lhs, rhs).map(Some)
    }

    /// # Panics
    /// Panics if `id` is not a live statement.
    #[track_caller]
    pub fn as_expression(&mut self, id: ValueId) -> Option<ValueId> {
        contract(self.try_as_expression(id))
    }
}

#[cfg(test)]
mod tests;
