//! Structural replacement of an expression inside a tree.

use tracing::trace;

use super::{contract, IrArena};
use crate::edge::Edge;
use crate::{IrError, ValueId};

impl IrArena {
    /// Replace every occurrence of `old` inside `root` by `new`.
    ///
    /// For each owned operand in declaration order: an operand that is `old`
    /// is re-pointed through its setter, anything else is searched
    /// recursively. Statements substitute within their own expressions
    /// (conditions, operands, initializers) and never descend into nested
    /// bodies, jump targets or the successor chain. Shared entities are
    /// leaves. A defined variable is only substituted by another variable.
    ///
    /// `new = None` is allowed only where the operand is optional.
    pub fn try_replace(
        &mut self,
        root: ValueId,
        old: ValueId,
        new: Option<ValueId>,
    ) -> Result<(), IrError> {
        self.try_kind(root)?;
        if let Some(new) = new {
            self.try_kind(new)?;
        }
        let mut sites = Vec::new();
        self.collect_sites(root, old, new, &mut sites)?;
        trace!(?root, ?old, ?new, sites = sites.len(), "replacing");
        for (node, edge) in sites {
            self.write_edge(node, edge, new);
        }
        Ok(())
    }

    /// # Panics
    /// Panics if `root` or `new` is released, or if `new` does not fit an
    /// operand position holding `old`.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn replace(&mut self, root: ValueId, old: ValueId, new: Option<ValueId>) {
        contract(self.try_replace(root, old, new));
    }

    /// Find every edge below `node` that takes `new`. Each one is validated
    /// here, so a failing edge leaves the tree untouched.
    fn collect_sites(
        &self,
        node: ValueId,
        old: ValueId,
        new: Option<ValueId>,
        sites: &mut Vec<(ValueId, Edge)>,
    ) -> Result<(), IrError> {
        for (edge, value) in self.edges(node) {
            let Some(value) = value else {
                continue;
            };
            if edge.is_statement_edge() {
                continue;
            }
            let rule = edge.rule();
            if value == old {
                let fits = match new {
                    Some(new) => self.try_kind(new).is_ok_and(|k| rule.accepts.matches(k)),
                    None => rule.optional,
                };
                if rule.back_reference && !fits {
                    trace!(?node, ?edge, "back-reference kept");
                    continue;
                }
                self.check_edge(edge, new)?;
                sites.push((node, edge));
            } else if !rule.back_reference
                && self.try_kind(value).is_ok_and(|k| k.is_expression() && !k.is_shared_entity())
            {
                self.collect_sites(value, old, new, sites)?;
            }
        }
        Ok(())
    }
}
