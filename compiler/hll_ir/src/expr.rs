//! Expression payloads.
//!
//! Operand fields are crate-private: passes read them through the getters
//! below and change them only through `IrArena` setters, which keep the
//! observer graph in step with the owning edges.

use smallvec::SmallVec;

use crate::constant::Constant;
use crate::edge::{Edge, EdgeList};
use crate::{BinaryOpKind, CastKind, ExprKind, UnaryOpKind, ValueId};

/// Expression node payload.
#[derive(Clone, Debug)]
pub enum Expr {
    BinaryOp(BinaryOpExpr),
    Call(CallExpr),
    Cast(CastExpr),
    Constant(Constant),
    UnaryOp(UnaryOpExpr),
    TernaryOp(TernaryOpExpr),
    Variable(Variable),
}

impl Expr {
    pub fn kind(&self) -> ExprKind {
        match self {
            Expr::BinaryOp(e) => ExprKind::BinaryOp(e.op),
            Expr::Call(_) => ExprKind::Call,
            Expr::Cast(e) => ExprKind::Cast(e.op.kind()),
            Expr::Constant(c) => ExprKind::Constant(c.kind()),
            Expr::UnaryOp(e) => ExprKind::UnaryOp(e.op),
            Expr::TernaryOp(_) => ExprKind::TernaryOp,
            Expr::Variable(_) => ExprKind::Variable,
        }
    }

    pub(crate) fn edges(&self, out: &mut EdgeList) {
        match self {
            Expr::BinaryOp(e) => {
                out.push((Edge::FirstOperand, Some(e.op1)));
                out.push((Edge::SecondOperand, Some(e.op2)));
            }
            Expr::Call(e) => {
                out.push((Edge::Callee, Some(e.callee)));
                out.extend(e.args.iter().enumerate().map(|(i, a)| (Edge::Arg(i), Some(*a))));
            }
            Expr::Cast(e) => out.push((Edge::Operand, Some(e.operand))),
            Expr::Constant(c) => c.edges(out),
            Expr::UnaryOp(e) => out.push((Edge::Operand, Some(e.operand))),
            Expr::TernaryOp(e) => {
                out.push((Edge::Cond, Some(e.cond)));
                out.push((Edge::TrueValue, Some(e.true_value)));
                out.push((Edge::FalseValue, Some(e.false_value)));
            }
            Expr::Variable(_) => {}
        }
    }

    /// Write `value` into `edge`. Returns `false` if this payload has no
    /// such edge or the edge cannot be empty.
    pub(crate) fn put(&mut self, edge: Edge, value: Option<ValueId>) -> bool {
        match (self, edge, value) {
            (Expr::BinaryOp(e), Edge::FirstOperand, Some(v)) => e.op1 = v,
            (Expr::BinaryOp(e), Edge::SecondOperand, Some(v)) => e.op2 = v,
            (Expr::Call(e), Edge::Callee, Some(v)) => e.callee = v,
            (Expr::Call(e), Edge::Arg(i), Some(v)) if i < e.args.len() => e.args[i] = v,
            (Expr::Cast(e), Edge::Operand, Some(v)) => e.operand = v,
            (Expr::Constant(c), edge, value) => return c.put(edge, value),
            (Expr::UnaryOp(e), Edge::Operand, Some(v)) => e.operand = v,
            (Expr::TernaryOp(e), Edge::Cond, Some(v)) => e.cond = v,
            (Expr::TernaryOp(e), Edge::TrueValue, Some(v)) => e.true_value = v,
            (Expr::TernaryOp(e), Edge::FalseValue, Some(v)) => e.false_value = v,
            _ => return false,
        }
        true
    }

    pub(crate) fn type_refs(&self) -> SmallVec<[ValueId; 4]> {
        match self {
            Expr::Cast(e) => smallvec::smallvec![e.dst_type],
            Expr::Constant(c) => c.type_refs(),
            Expr::Variable(v) => smallvec::smallvec![v.ty],
            Expr::BinaryOp(_) | Expr::Call(_) | Expr::UnaryOp(_) | Expr::TernaryOp(_) => {
                SmallVec::new()
            }
        }
    }

    /// Compare non-edge data (operator kinds, types, literal values).
    pub(crate) fn same_shape(&self, other: &Expr) -> bool {
        match (self, other) {
            (Expr::BinaryOp(a), Expr::BinaryOp(b)) => a.op == b.op,
            (Expr::Call(a), Expr::Call(b)) => a.args.len() == b.args.len(),
            (Expr::Cast(a), Expr::Cast(b)) => a.op == b.op && a.dst_type == b.dst_type,
            (Expr::Constant(a), Expr::Constant(b)) => a.same_shape(b),
            (Expr::UnaryOp(a), Expr::UnaryOp(b)) => a.op == b.op,
            (Expr::TernaryOp(_), Expr::TernaryOp(_)) => true,
            (Expr::Variable(a), Expr::Variable(b)) => a.name == b.name && a.ty == b.ty,
            _ => false,
        }
    }
}

/// Binary operator: two exclusively owned, never-null operands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryOpExpr {
    pub(crate) op: BinaryOpKind,
    pub(crate) op1: ValueId,
    pub(crate) op2: ValueId,
}

impl BinaryOpExpr {
    #[inline]
    pub fn op(&self) -> BinaryOpKind {
        self.op
    }

    #[inline]
    pub fn first_operand(&self) -> ValueId {
        self.op1
    }

    #[inline]
    pub fn second_operand(&self) -> ValueId {
        self.op2
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnaryOpExpr {
    pub(crate) op: UnaryOpKind,
    pub(crate) operand: ValueId,
}

impl UnaryOpExpr {
    #[inline]
    pub fn op(&self) -> UnaryOpKind {
        self.op
    }

    #[inline]
    pub fn operand(&self) -> ValueId {
        self.operand
    }
}

/// Extension flavour of an `Ext` cast.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ExtVariant {
    SExt,
    ZExt,
    FpExt,
}

/// Cast operator together with its construction-time parameters.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum CastOp {
    BitCast,
    Ext(ExtVariant),
    FpToInt,
    IntToFp,
    IntToPtr,
    PtrToInt,
    Trunc,
}

impl CastOp {
    pub const fn kind(self) -> CastKind {
        match self {
            CastOp::BitCast => CastKind::BitCast,
            CastOp::Ext(_) => CastKind::Ext,
            CastOp::FpToInt => CastKind::FpToInt,
            CastOp::IntToFp => CastKind::IntToFp,
            CastOp::IntToPtr => CastKind::IntToPtr,
            CastOp::PtrToInt => CastKind::PtrToInt,
            CastOp::Trunc => CastKind::Trunc,
        }
    }
}

/// Cast of one owned operand to a destination type. Both the operator and
/// the destination type are fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastExpr {
    pub(crate) op: CastOp,
    pub(crate) operand: ValueId,
    pub(crate) dst_type: ValueId,
}

impl CastExpr {
    #[inline]
    pub fn op(&self) -> CastOp {
        self.op
    }

    #[inline]
    pub fn operand(&self) -> ValueId {
        self.operand
    }

    #[inline]
    pub fn dst_type(&self) -> ValueId {
        self.dst_type
    }

    /// The extension variant, for `Ext` casts.
    pub fn variant(&self) -> Option<ExtVariant> {
        match self.op {
            CastOp::Ext(variant) => Some(variant),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallExpr {
    pub(crate) callee: ValueId,
    pub(crate) args: Vec<ValueId>,
}

impl CallExpr {
    /// The called expression or function.
    #[inline]
    pub fn callee(&self) -> ValueId {
        self.callee
    }

    #[inline]
    pub fn args(&self) -> &[ValueId] {
        &self.args
    }
}

/// `cond ? true_value : false_value`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TernaryOpExpr {
    pub(crate) cond: ValueId,
    pub(crate) true_value: ValueId,
    pub(crate) false_value: ValueId,
}

impl TernaryOpExpr {
    #[inline]
    pub fn condition(&self) -> ValueId {
        self.cond
    }

    #[inline]
    pub fn true_value(&self) -> ValueId {
        self.true_value
    }

    #[inline]
    pub fn false_value(&self) -> ValueId {
        self.false_value
    }
}

/// A named program variable. Shared by every node that mentions it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variable {
    pub(crate) name: String,
    pub(crate) ty: ValueId,
}

impl Variable {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn ty(&self) -> ValueId {
        self.ty
    }
}
