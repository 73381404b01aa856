//! Structural equality.

use super::IrArena;
use crate::edge::Edge;
use crate::node::Node;
use crate::ValueId;

impl IrArena {
    /// `true` if `a` and `b` have the same kind and structurally equal
    /// content.
    ///
    /// Metadata, observer registrations and statement successors are
    /// ignored; nested bodies are compared by their heads. Variables compare
    /// by name and type, functions by name, types by handle. Goto targets
    /// are compared by identity. A null or released handle equals nothing.
    pub fn is_equal_to(&self, a: ValueId, b: ValueId) -> bool {
        let (Some(na), Some(nb)) = (self.cast::<Node>(a), self.cast::<Node>(b)) else {
            return false;
        };
        if a == b {
            return true;
        }
        if na.kind() != nb.kind() || !na.same_shape(nb) {
            return false;
        }
        if let Node::Function(_) = na {
            return true;
        }

        let (ea, eb) = (na.edges(), nb.edges());
        ea.len() == eb.len()
            && ea.iter().zip(&eb).all(|(&(edge_a, va), &(edge_b, vb))| {
                edge_a == edge_b
                    && match (va, vb) {
                        (None, None) => true,
                        (Some(x), Some(y)) if edge_a == Edge::Target => x == y,
                        (Some(x), Some(y)) => self.is_equal_to(x, y),
                        _ => false,
                    }
            })
    }
}

#[cfg(test)]
mod tests;
