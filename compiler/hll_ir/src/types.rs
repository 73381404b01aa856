//! Type payloads.
//!
//! Types are interned by the arena: each structurally distinct `Type` is
//! allocated once, so two type handles are equal exactly when the types are.
//! Compound types refer to their components by handle.

use smallvec::SmallVec;

use crate::{TypeKind, ValueId};

/// Type descriptor stored in a type node.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Type {
    /// Array of `elem` with the given dimensions (outermost first).
    Array { elem: ValueId, dims: Vec<u64> },
    /// IEEE floating point of the given width.
    Float { bits: u32 },
    /// Function signature.
    Function {
        ret: ValueId,
        params: Vec<ValueId>,
        vararg: bool,
    },
    /// Integer of the given width and signedness.
    Int { bits: u32, signed: bool },
    /// Pointer to `pointee`.
    Pointer { pointee: ValueId },
    /// String literal storage with the given character width.
    String { char_bits: u32 },
    /// Structure with ordered element types; named structures are distinct
    /// from anonymous ones with the same layout.
    Struct {
        elems: Vec<ValueId>,
        name: Option<String>,
    },
    /// Type that could not be determined.
    Unknown,
    Void,
}

impl Type {
    pub const fn kind(&self) -> TypeKind {
        match self {
            Type::Array { .. } => TypeKind::Array,
            Type::Float { .. } => TypeKind::Float,
            Type::Function { .. } => TypeKind::Function,
            Type::Int { .. } => TypeKind::Int,
            Type::Pointer { .. } => TypeKind::Pointer,
            Type::String { .. } => TypeKind::String,
            Type::Struct { .. } => TypeKind::Struct,
            Type::Unknown => TypeKind::Unknown,
            Type::Void => TypeKind::Void,
        }
    }

    /// Component types this type refers to.
    pub(crate) fn type_refs(&self) -> SmallVec<[ValueId; 4]> {
        match self {
            Type::Array { elem, .. } => smallvec::smallvec![*elem],
            Type::Pointer { pointee } => smallvec::smallvec![*pointee],
            Type::Function { ret, params, .. } => {
                let mut refs = SmallVec::with_capacity(params.len() + 1);
                refs.push(*ret);
                refs.extend(params.iter().copied());
                refs
            }
            Type::Struct { elems, .. } => elems.iter().copied().collect(),
            Type::Float { .. }
            | Type::Int { .. }
            | Type::String { .. }
            | Type::Unknown
            | Type::Void => SmallVec::new(),
        }
    }

    /// Width and signedness for integer types.
    pub const fn as_int(&self) -> Option<(u32, bool)> {
        match *self {
            Type::Int { bits, signed } => Some((bits, signed)),
            _ => None,
        }
    }

    pub const fn is_int(&self) -> bool {
        matches!(self, Type::Int { .. })
    }

    pub const fn is_pointer(&self) -> bool {
        matches!(self, Type::Pointer { .. })
    }
}
