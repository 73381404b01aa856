//! Freeing a node together with everything it exclusively owns.
//!
//! The released set is the node, its owned operands and bodies, and (for a
//! statement) its successor chain. Shared entities and back-references are
//! only deregistered. Release is all or nothing: it is refused while anything
//! outside the set still observes or owns a member.

use rustc_hash::FxHashSet;
use tracing::debug;

use super::observer::remove_one;
use super::{contract, IrArena};
use crate::{IrError, ValueId};

impl IrArena {
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn try_release(&mut self, id: ValueId) -> Result<(), IrError> {
        let kind = self.try_kind(id)?;
        if kind.is_type() {
            return Err(IrError::mismatch("released value", "a non-type value", kind));
        }
        if let Some(owner) = self.stmt_owner(id) {
            return Err(IrError::StillOwned { id, owner });
        }

        let members = self.owned_subtree(id);
        let set: FxHashSet<ValueId> = members.iter().copied().collect();
        for &member in &members {
            if let Some(&observer) = self.observers(member).iter().find(|&&o| !set.contains(&o)) {
                return Err(IrError::StillObserved {
                    id: member,
                    observer,
                });
            }
        }

        for &member in &members {
            let subjects = self.subjects(member).to_vec();
            for subject in subjects.into_iter().filter(|s| !set.contains(s)) {
                if let Some(slot) = self.slot_mut(subject) {
                    remove_one(&mut slot.observers, member);
                }
            }
        }
        for &member in &members {
            if let Some(slot) = self.slots.get_mut(member.index()) {
                if slot.take().is_some() {
                    self.live -= 1;
                }
            }
        }
        debug!(?id, released = members.len(), "released subtree");
        Ok(())
    }

    /// # Panics
    /// Panics if `id` is null, released, a type, or still observed or owned
    /// from outside its subtree.
    #[track_caller]
    pub fn release(&mut self, id: ValueId) {
        contract(self.try_release(id));
    }

    /// `id` and every node it owns, in discovery order.
    fn owned_subtree(&self, id: ValueId) -> Vec<ValueId> {
        let mut seen = FxHashSet::default();
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            order.push(current);
            if let Some(next) = self.successor(current) {
                stack.push(next);
            }
            for (edge, value) in self.edges(current) {
                let Some(value) = value else {
                    continue;
                };
                if edge.rule().back_reference {
                    continue;
                }
                match self.try_kind(value) {
                    Ok(kind) if !kind.is_shared_entity() && !kind.is_type() => stack.push(value),
                    _ => {}
                }
            }
        }
        order
    }
}
