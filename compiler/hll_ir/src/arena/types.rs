//! Interning type factories.
//!
//! Each structurally distinct type is allocated once. Compound types refer
//! to interned components, so structural equality of two types reduces to
//! handle equality at every level.

use tracing::trace;

use super::{contract, IrArena};
use crate::metadata::Metadata;
use crate::node::Node;
use crate::types::Type;
use crate::{IrError, ValueId, ValueKind};

impl IrArena {
    /// Intern `ty`, returning the existing handle if an identical type was
    /// interned before. Component types must be live type handles.
    pub fn try_intern_type(&mut self, ty: Type) -> Result<ValueId, IrError> {
        if let Some(&id) = self.types.get(&ty) {
            return Ok(id);
        }
        for component in ty.type_refs() {
            self.check_type("component type", component)?;
        }
        let id = self.alloc(Node::Type(ty.clone()), Metadata::new());
        trace!(?id, ?ty, "interned type");
        self.types.insert(ty, id);
        Ok(id)
    }

    /// Intern `ty`.
    ///
    /// # Panics
    /// Panics if a component is not a live type.
    #[track_caller]
    pub fn intern_type(&mut self, ty: Type) -> ValueId {
        contract(self.try_intern_type(ty))
    }

    pub fn int_type(&mut self, bits: u32, signed: bool) -> ValueId {
        self.intern_type(Type::Int { bits, signed })
    }

    pub fn float_type(&mut self, bits: u32) -> ValueId {
        self.intern_type(Type::Float { bits })
    }

    pub fn string_type(&mut self, char_bits: u32) -> ValueId {
        self.intern_type(Type::String { char_bits })
    }

    pub fn void_type(&mut self) -> ValueId {
        self.intern_type(Type::Void)
    }

    pub fn unknown_type(&mut self) -> ValueId {
        self.intern_type(Type::Unknown)
    }

    /// The type of boolean values: a 1-bit unsigned integer.
    pub fn bool_type(&mut self) -> ValueId {
        self.int_type(1, false)
    }

    pub fn try_pointer_type(&mut self, pointee: ValueId) -> Result<ValueId, IrError> {
        self.try_intern_type(Type::Pointer { pointee })
    }

    #[track_caller]
    pub fn pointer_type(&mut self, pointee: ValueId) -> ValueId {
        contract(self.try_pointer_type(pointee))
    }

    pub fn try_array_type(&mut self, elem: ValueId, dims: Vec<u64>) -> Result<ValueId, IrError> {
        self.try_intern_type(Type::Array { elem, dims })
    }

    #[track_caller]
    pub fn array_type(&mut self, elem: ValueId, dims: Vec<u64>) -> ValueId {
        contract(self.try_array_type(elem, dims))
    }

    pub fn try_struct_type(
        &mut self,
        elems: Vec<ValueId>,
        name: Option<String>,
    ) -> Result<ValueId, IrError> {
        self.try_intern_type(Type::Struct { elems, name })
    }

    #[track_caller]
    pub fn struct_type(&mut self, elems: Vec<ValueId>, name: Option<String>) -> ValueId {
        contract(self.try_struct_type(elems, name))
    }

    pub fn try_function_type(
        &mut self,
        ret: ValueId,
        params: Vec<ValueId>,
        vararg: bool,
    ) -> Result<ValueId, IrError> {
        self.try_intern_type(Type::Function {
            ret,
            params,
            vararg,
        })
    }

    #[track_caller]
    pub fn function_type(&mut self, ret: ValueId, params: Vec<ValueId>, vararg: bool) -> ValueId {
        contract(self.try_function_type(ret, params, vararg))
    }

    // Queries

    /// The type descriptor behind a type handle.
    pub fn type_data(&self, id: ValueId) -> Option<&Type> {
        self.cast::<Type>(id)
    }

    /// Width and signedness of an integer type.
    pub fn int_type_info(&self, id: ValueId) -> Option<(u32, bool)> {
        self.type_data(id).and_then(Type::as_int)
    }

    /// Pointee of a pointer type.
    pub fn pointee(&self, id: ValueId) -> Option<ValueId> {
        match self.type_data(id)? {
            Type::Pointer { pointee } => Some(*pointee),
            _ => None,
        }
    }

    /// Check that `id` is a live type accepted by `pred`.
    pub(crate) fn check_type_with(
        &self,
        role: &'static str,
        id: ValueId,
        expected: &'static str,
        pred: fn(&Type) -> bool,
    ) -> Result<(), IrError> {
        self.check_type(role, id)?;
        match self.type_data(id) {
            Some(ty) if pred(ty) => Ok(()),
            Some(ty) => Err(IrError::mismatch(role, expected, ValueKind::Type(ty.kind()))),
            None => Err(IrError::DeadValue { id }),
        }
    }
}
