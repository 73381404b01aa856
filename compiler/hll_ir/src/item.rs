//! Top-level program entities: functions and global variable definitions.

use smallvec::SmallVec;

use crate::edge::{Edge, EdgeList};
use crate::ValueId;

/// A function. Functions are shared entities: every reference to one (a call,
/// a clone of a call) points at the same node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Function {
    pub(crate) name: String,
    pub(crate) ret_type: ValueId,
    pub(crate) params: Vec<ValueId>,
    pub(crate) body: Option<ValueId>,
    pub(crate) vararg: bool,
}

impl Function {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn ret_type(&self) -> ValueId {
        self.ret_type
    }

    /// Parameter variables, in order.
    #[inline]
    pub fn params(&self) -> &[ValueId] {
        &self.params
    }

    /// Head of the body statement chain; `None` for declarations.
    #[inline]
    pub fn body(&self) -> Option<ValueId> {
        self.body
    }

    #[inline]
    pub fn is_declaration(&self) -> bool {
        self.body.is_none()
    }

    #[inline]
    pub fn is_vararg(&self) -> bool {
        self.vararg
    }

    pub(crate) fn edges(&self, out: &mut EdgeList) {
        out.extend(self.params.iter().enumerate().map(|(i, p)| (Edge::Param(i), Some(*p))));
        out.push((Edge::FuncBody, self.body));
    }

    pub(crate) fn put(&mut self, edge: Edge, value: Option<ValueId>) -> bool {
        match (edge, value) {
            (Edge::Param(i), Some(v)) if i < self.params.len() => self.params[i] = v,
            (Edge::FuncBody, value) => self.body = value,
            _ => return false,
        }
        true
    }

    pub(crate) fn type_refs(&self) -> SmallVec<[ValueId; 4]> {
        smallvec::smallvec![self.ret_type]
    }
}

/// Definition of a global variable with an optional initializer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlobalVarDef {
    pub(crate) var: ValueId,
    pub(crate) init: Option<ValueId>,
}

impl GlobalVarDef {
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

    pub(crate) fn edges(&self, out: &mut EdgeList) {
        out.push((Edge::Var, Some(self.var)));
        out.push((Edge::Init, self.init));
    }

    pub(crate) fn put(&mut self, edge: Edge, value: Option<ValueId>) -> bool {
        match (edge, value) {
            (Edge::Var, Some(v)) => self.var = v,
            (Edge::Init, value) => self.init = value,
            _ => return false,
        }
        true
    }
}
