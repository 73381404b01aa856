//! Deep copy with sharing exceptions.
//!
//! A clone copies the node and every node it exclusively owns. Variables,
//! functions and types are shared: a clone of a holder refers to the same
//! entity. Back-references (goto targets, defined variables, parameters) are
//! copied as handles. Statement successors are never followed, which also
//! means a compound statement's clone owns copies of its body heads only.

use tracing::debug;

use super::{contract, IrArena};
use crate::node::Node;
use crate::stmt::Stmt;
use crate::{IrError, ValueId};

impl IrArena {
    /// Clone `id`. Shared entities return `id` itself.
    pub fn try_clone_value(&mut self, id: ValueId) -> Result<ValueId, IrError> {
        let kind = self.try_kind(id)?;
        if kind.is_shared_entity() || kind.is_type() {
            return Ok(id);
        }
        Ok(self.clone_owned(id))
    }

    /// # Panics
    /// Panics if `id` is null or released.
    #[track_caller]
    pub fn clone_value(&mut self, id: ValueId) -> ValueId {
        contract(self.try_clone_value(id))
    }

    /// Clone a whole statement chain starting at `head`, returning the head
    /// of the copy.
    pub fn try_clone_statements(&mut self, head: ValueId) -> Result<ValueId, IrError> {
        self.expect_cast::<Stmt>(head, "chain head", "a statement")?;
        let chain: Vec<ValueId> = self.statements(head).collect();
        let copies: Vec<ValueId> = chain.iter().map(|&stmt| self.clone_owned(stmt)).collect();
        for pair in copies.windows(2) {
            self.link(pair[0], pair[1]);
        }
        debug!(?head, len = chain.len(), "cloned statement chain");
        Ok(copies[0])
    }

    /// # Panics
    /// Panics if `head` is not a live statement.
    #[track_caller]
    pub fn clone_statements(&mut self, head: ValueId) -> ValueId {
        contract(self.try_clone_statements(head))
    }

    /// Copy a live node that is not shared.
    fn clone_owned(&mut self, id: ValueId) -> ValueId {
        let Some(slot) = self.slot(id) else {
            return id;
        };
        let mut node = slot.node.clone();
        let metadata = slot.metadata.clone();
        if let Node::Stmt(stmt) = &mut node {
            stmt.successor = None;
            stmt.predecessor = None;
        }
        for (edge, value) in node.edges() {
            let Some(value) = value else {
                continue;
            };
            if edge.rule().back_reference {
                continue;
            }
            let copy = match self.try_kind(value) {
                Ok(kind) if kind.is_shared_entity() || kind.is_type() => continue,
                Ok(_) => self.clone_owned(value),
                Err(_) => continue,
            };
            node.put(edge, Some(copy));
        }
        self.alloc(node, metadata)
    }
}

#[cfg(test)]
mod tests;
