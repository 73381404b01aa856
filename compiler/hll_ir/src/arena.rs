//! Arena that owns every IR node.
//!
//! Nodes are addressed by [`ValueId`]. Each slot carries the node payload,
//! its metadata, and both sides of the observer relation: the nodes that
//! observe it (`observers`) and the nodes it observes (`subjects`). The two
//! lists are always edited together.
//!
//! Slots are never reused. Releasing a node leaves a tombstone, so a stale
//! handle is reported as [`IrError::DeadValue`] instead of silently aliasing
//! a newer node.
//!
//! Operations are split by concern:
//! - `types`: interning type factories
//! - `factory`: expression, constant, statement and item factories
//! - `observer`: registration, notification and edge setters
//! - `replace`, `clone`, `equality`, `infer`: structural algorithms
//! - `stmt`: successor chains
//! - `release`: freeing owned subtrees

mod clone;
mod equality;
mod factory;
mod infer;
mod observer;
mod release;
mod replace;
mod stmt;
mod types;

pub use stmt::Statements;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::trace;

use crate::edge::{Edge, EdgeList};
use crate::metadata::Metadata;
use crate::node::{Downcast, Node};
use crate::stmt::Stmt;
use crate::types::Type;
use crate::{IrError, ValueId, ValueKind};

/// Observer/subject lists. Most nodes have at most one owner and a handful
/// of operands.
pub(crate) type IdList = SmallVec<[ValueId; 4]>;

struct Slot {
    node: Node,
    metadata: Metadata,
    observers: IdList,
    subjects: IdList,
}

/// Owner of all IR nodes of one module.
pub struct IrArena {
    slots: Vec<Option<Slot>>,
    /// Interned types, keyed by structure.
    types: FxHashMap<Type, ValueId>,
    live: usize,
}

impl Default for IrArena {
    fn default() -> Self {
        Self::new()
    }
}

impl IrArena {
    pub fn new() -> Self {
        IrArena {
            slots: Vec::new(),
            types: FxHashMap::default(),
            live: 0,
        }
    }

    /// Create an arena with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        IrArena {
            slots: Vec::with_capacity(capacity),
            types: FxHashMap::default(),
            live: 0,
        }
    }

    /// Number of slots ever allocated, released ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of nodes that have not been released.
    #[inline]
    pub fn live_count(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_live(&self, id: ValueId) -> bool {
        self.slot(id).is_some()
    }

    // Slot access

    fn slot(&self, id: ValueId) -> Option<&Slot> {
        if !id.is_valid() {
            return None;
        }
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    fn slot_mut(&mut self, id: ValueId) -> Option<&mut Slot> {
        if !id.is_valid() {
            return None;
        }
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    fn try_slot(&self, id: ValueId) -> Result<&Slot, IrError> {
        if !id.is_valid() {
            return Err(IrError::NullValue { role: "value" });
        }
        self.slot(id).ok_or(IrError::DeadValue { id })
    }

    fn try_slot_mut(&mut self, id: ValueId) -> Result<&mut Slot, IrError> {
        if !id.is_valid() {
            return Err(IrError::NullValue { role: "value" });
        }
        self.slot_mut(id).ok_or(IrError::DeadValue { id })
    }

    // Payload access

    /// The payload of a live node.
    ///
    /// # Panics
    /// Panics if `id` is null or released.
    #[track_caller]
    pub fn node(&self, id: ValueId) -> &Node {
        contract(self.try_node(id))
    }

    pub fn try_node(&self, id: ValueId) -> Result<&Node, IrError> {
        self.try_slot(id).map(|slot| &slot.node)
    }

    pub(crate) fn node_mut(&mut self, id: ValueId) -> Result<&mut Node, IrError> {
        self.try_slot_mut(id).map(|slot| &mut slot.node)
    }

    /// Kind tag of a live node.
    ///
    /// # Panics
    /// Panics if `id` is null or released.
    #[track_caller]
    pub fn kind(&self, id: ValueId) -> ValueKind {
        self.node(id).kind()
    }

    pub fn try_kind(&self, id: ValueId) -> Result<ValueKind, IrError> {
        self.try_node(id).map(Node::kind)
    }

    /// `true` if `id` is live and has exactly this kind.
    pub fn is_kind(&self, id: ValueId, kind: ValueKind) -> bool {
        self.slot(id).is_some_and(|slot| slot.node.kind() == kind)
    }

    /// `true` if `id` is live and its payload narrows to `T`.
    pub fn isa<T: Downcast>(&self, id: ValueId) -> bool {
        self.cast::<T>(id).is_some()
    }

    /// Narrow a node to a family or concrete payload. Null, released and
    /// wrong-kind handles all yield `None`.
    pub fn cast<T: Downcast>(&self, id: ValueId) -> Option<&T> {
        self.slot(id).and_then(|slot| T::downcast(&slot.node))
    }

    /// Narrow to `T`, reporting a kind mismatch for `role` otherwise.
    pub(crate) fn expect_cast<T: Downcast>(
        &self,
        id: ValueId,
        role: &'static str,
        expected: &'static str,
    ) -> Result<&T, IrError> {
        let node = self.try_node(id)?;
        T::downcast(node).ok_or_else(|| IrError::mismatch(role, expected, node.kind()))
    }

    // Metadata

    /// Metadata of a live node.
    ///
    /// # Panics
    /// Panics if `id` is null or released.
    #[track_caller]
    pub fn metadata(&self, id: ValueId) -> &Metadata {
        &contract(self.try_slot(id)).metadata
    }

    /// Mutable metadata of a live node.
    ///
    /// # Panics
    /// Panics if `id` is null or released.
    #[track_caller]
    pub fn metadata_mut(&mut self, id: ValueId) -> &mut Metadata {
        &mut contract(self.try_slot_mut(id)).metadata
    }

    // Edges

    /// Snapshot of the node's edges. Empty for dead handles and types.
    pub(crate) fn edges(&self, id: ValueId) -> EdgeList {
        self.slot(id).map(|slot| slot.node.edges()).unwrap_or_default()
    }

    /// Current content of `edge`, or `None` if the node has no such edge.
    pub(crate) fn edge_value(&self, id: ValueId, edge: Edge) -> Option<Option<ValueId>> {
        self.edges(id)
            .into_iter()
            .find_map(|(e, value)| (e == edge).then_some(value))
    }

    /// Check that `value` may be stored in `edge`.
    pub(crate) fn check_edge(&self, edge: Edge, value: Option<ValueId>) -> Result<(), IrError> {
        let rule = edge.rule();
        let Some(value) = value else {
            return if rule.optional {
                Ok(())
            } else {
                Err(IrError::NullValue { role: rule.role })
            };
        };
        if !value.is_valid() {
            return Err(IrError::NullValue { role: rule.role });
        }
        let kind = self.try_kind(value)?;
        if !rule.accepts.matches(kind) {
            return Err(IrError::mismatch(rule.role, rule.accepts.describe(), kind));
        }
        if edge.is_statement_edge() && !rule.back_reference {
            if let Some(owner) = self.stmt_owner(value) {
                return Err(IrError::AlreadyOwned { id: value, owner });
            }
        }
        Ok(())
    }

    /// [`check_edge`](Self::check_edge) for an edge of the existing node
    /// `owner`. A statement additionally may not become a body of itself or
    /// of anything nested in it.
    pub(crate) fn check_link(
        &self,
        owner: ValueId,
        edge: Edge,
        value: Option<ValueId>,
    ) -> Result<(), IrError> {
        self.check_edge(edge, value)?;
        match value {
            Some(value)
                if edge.is_statement_edge()
                    && !edge.rule().back_reference
                    && self.owns_transitively(value, owner) =>
            {
                Err(IrError::ChainCycle { id: value })
            }
            _ => Ok(()),
        }
    }

    /// `true` if `ancestor` is `id` or owns it through predecessors and
    /// enclosing bodies.
    pub(crate) fn owns_transitively(&self, ancestor: ValueId, id: ValueId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.stmt_owner(node);
        }
        false
    }

    /// The node owning statement `id`: its predecessor, or the node holding
    /// it as a nested body.
    pub(crate) fn stmt_owner(&self, id: ValueId) -> Option<ValueId> {
        if let Some(predecessor) = self.cast::<Stmt>(id).and_then(Stmt::predecessor) {
            return Some(predecessor);
        }
        self.observers(id).iter().copied().find(|&observer| {
            self.edges(observer).iter().any(|&(edge, value)| {
                value == Some(id) && edge.is_statement_edge() && !edge.rule().back_reference
            })
        })
    }

    /// Check that `id` is a live type node.
    pub(crate) fn check_type(&self, role: &'static str, id: ValueId) -> Result<(), IrError> {
        if !id.is_valid() {
            return Err(IrError::NullValue { role });
        }
        let kind = self.try_kind(id)?;
        if kind.is_type() {
            Ok(())
        } else {
            Err(IrError::mismatch(role, "a type", kind))
        }
    }

    // Allocation

    /// Validate a fresh payload, allocate it and register it as an observer
    /// of everything its edges point at.
    pub(crate) fn try_alloc(&mut self, node: Node) -> Result<ValueId, IrError> {
        for (edge, value) in node.edges() {
            self.check_edge(edge, value)?;
        }
        for ty in node.type_refs() {
            self.check_type("type", ty)?;
        }
        Ok(self.alloc(node, Metadata::new()))
    }

    /// Allocate without validation. Edges are registered as observed.
    pub(crate) fn alloc(&mut self, node: Node, metadata: Metadata) -> ValueId {
        let index = u32::try_from(self.slots.len())
            .ok()
            .filter(|&index| index != u32::MAX)
            .unwrap_or_else(|| panic!("IR arena exceeded {} nodes", u32::MAX - 1));
        let id = ValueId::new(index);
        let edges = node.edges();
        trace!(?id, kind = node.kind().name(), "allocated");
        self.slots.push(Some(Slot {
            node,
            metadata,
            observers: IdList::new(),
            subjects: IdList::new(),
        }));
        self.live += 1;
        for value in edges.into_iter().filter_map(|(_, value)| value) {
            self.add_observer(value, id);
        }
        id
    }
}

/// Unwrap the result of a `try_*` operation, treating the error as a
/// contract violation.
#[track_caller]
pub(crate) fn contract<T>(result: Result<T, IrError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("IR contract violation: {err}"),
    }
}
