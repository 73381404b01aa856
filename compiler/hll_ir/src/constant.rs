//! Constant payloads.

use smallvec::SmallVec;

use crate::edge::{Edge, EdgeList};
use crate::{ConstKind, ValueId};

/// Constant expression payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Constant {
    Array(ConstArray),
    Bool(ConstBool),
    Float(ConstFloat),
    Int(ConstInt),
    NullPointer(ConstNullPointer),
    String(ConstString),
    Struct(ConstStruct),
    Symbol(ConstSymbol),
}

impl Constant {
    pub const fn kind(&self) -> ConstKind {
        match self {
            Constant::Array(_) => ConstKind::Array,
            Constant::Bool(_) => ConstKind::Bool,
            Constant::Float(_) => ConstKind::Float,
            Constant::Int(_) => ConstKind::Int,
            Constant::NullPointer(_) => ConstKind::NullPointer,
            Constant::String(_) => ConstKind::String,
            Constant::Struct(_) => ConstKind::Struct,
            Constant::Symbol(_) => ConstKind::Symbol,
        }
    }

    pub(crate) fn edges(&self, out: &mut EdgeList) {
        match self {
            Constant::Array(c) => {
                out.extend(c.elems.iter().enumerate().map(|(i, e)| (Edge::Element(i), Some(*e))));
            }
            Constant::Struct(c) => {
                out.extend(c.fields.iter().enumerate().map(|(i, e)| (Edge::Element(i), Some(*e))));
            }
            Constant::Symbol(c) => out.push((Edge::SymbolValue, Some(c.value))),
            Constant::Bool(_)
            | Constant::Float(_)
            | Constant::Int(_)
            | Constant::NullPointer(_)
            | Constant::String(_) => {}
        }
    }

    pub(crate) fn put(&mut self, edge: Edge, value: Option<ValueId>) -> bool {
        match (self, edge, value) {
            (Constant::Array(c), Edge::Element(i), Some(v)) if i < c.elems.len() => {
                c.elems[i] = v;
            }
            (Constant::Struct(c), Edge::Element(i), Some(v)) if i < c.fields.len() => {
                c.fields[i] = v;
            }
            (Constant::Symbol(c), Edge::SymbolValue, Some(v)) => c.value = v,
            _ => return false,
        }
        true
    }

    pub(crate) fn type_refs(&self) -> SmallVec<[ValueId; 4]> {
        match self {
            Constant::Array(c) => smallvec::smallvec![c.ty],
            Constant::Float(c) => smallvec::smallvec![c.ty],
            Constant::Int(c) => smallvec::smallvec![c.ty],
            Constant::NullPointer(c) => smallvec::smallvec![c.ty],
            Constant::String(c) => smallvec::smallvec![c.ty],
            Constant::Struct(c) => smallvec::smallvec![c.ty],
            Constant::Bool(_) | Constant::Symbol(_) => SmallVec::new(),
        }
    }

    /// Compare literal values and types; nested constants are compared by the
    /// caller through the edge list.
    pub(crate) fn same_shape(&self, other: &Constant) -> bool {
        match (self, other) {
            (Constant::Array(a), Constant::Array(b)) => {
                a.ty == b.ty && a.elems.len() == b.elems.len()
            }
            (Constant::Bool(a), Constant::Bool(b)) => a == b,
            (Constant::Float(a), Constant::Float(b)) => a == b,
            (Constant::Int(a), Constant::Int(b)) => a == b,
            (Constant::NullPointer(a), Constant::NullPointer(b)) => a == b,
            (Constant::String(a), Constant::String(b)) => a == b,
            (Constant::Struct(a), Constant::Struct(b)) => {
                a.ty == b.ty && a.fields.len() == b.fields.len()
            }
            (Constant::Symbol(a), Constant::Symbol(b)) => a.name == b.name,
            _ => false,
        }
    }
}

/// Integer constant of an integer type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstInt {
    pub(crate) value: i128,
    pub(crate) ty: ValueId,
}

impl ConstInt {
    #[inline]
    pub fn value(&self) -> i128 {
        self.value
    }

    #[inline]
    pub fn ty(&self) -> ValueId {
        self.ty
    }
}

/// Boolean constant; its type is the 1-bit unsigned integer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstBool {
    pub(crate) value: bool,
}

impl ConstBool {
    #[inline]
    pub fn value(&self) -> bool {
        self.value
    }

    #[inline]
    pub fn is_true(&self) -> bool {
        self.value
    }

    #[inline]
    pub fn is_false(&self) -> bool {
        !self.value
    }
}

/// Floating point constant, stored as IEEE bits so it can be hashed and
/// compared exactly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstFloat {
    pub(crate) bits: u64,
    pub(crate) ty: ValueId,
}

impl ConstFloat {
    #[inline]
    pub fn value(&self) -> f64 {
        f64::from_bits(self.bits)
    }

    #[inline]
    pub fn bits(&self) -> u64 {
        self.bits
    }

    #[inline]
    pub fn ty(&self) -> ValueId {
        self.ty
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstNullPointer {
    pub(crate) ty: ValueId,
}

impl ConstNullPointer {
    /// The pointer type of the null value.
    #[inline]
    pub fn ty(&self) -> ValueId {
        self.ty
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstString {
    pub(crate) value: String,
    pub(crate) ty: ValueId,
}

impl ConstString {
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[inline]
    pub fn ty(&self) -> ValueId {
        self.ty
    }
}

/// Array constant. An empty element list means zero-initialized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstArray {
    pub(crate) elems: Vec<ValueId>,
    pub(crate) ty: ValueId,
}

impl ConstArray {
    #[inline]
    pub fn elements(&self) -> &[ValueId] {
        &self.elems
    }

    #[inline]
    pub fn is_zero_initialized(&self) -> bool {
        self.elems.is_empty()
    }

    #[inline]
    pub fn ty(&self) -> ValueId {
        self.ty
    }
}

/// Structure constant with one constant per structure element, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstStruct {
    pub(crate) fields: Vec<ValueId>,
    pub(crate) ty: ValueId,
}

impl ConstStruct {
    #[inline]
    pub fn fields(&self) -> &[ValueId] {
        &self.fields
    }

    #[inline]
    pub fn ty(&self) -> ValueId {
        self.ty
    }
}

/// A named constant standing for another constant (e.g. `SIGINT` for `2`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstSymbol {
    pub(crate) name: String,
    pub(crate) value: ValueId,
}

impl ConstSymbol {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> ValueId {
        self.value
    }
}
