//! The closed set of node payloads and safe narrowing between them.
//!
//! [`Node`] is the payload stored in every arena slot. [`Downcast`] narrows a
//! node to a family (`Expr`, `Stmt`, `Type`) or a concrete payload
//! (`BinaryOpExpr`, `GotoStmt`, ...). Narrowing to the wrong family yields
//! `None`; it never panics.

use smallvec::SmallVec;

use crate::constant::{
    ConstArray, ConstBool, ConstFloat, ConstInt, ConstNullPointer, ConstString, ConstStruct,
    ConstSymbol, Constant,
};
use crate::edge::{Edge, EdgeList};
use crate::expr::{
    BinaryOpExpr, CallExpr, CastExpr, Expr, TernaryOpExpr, UnaryOpExpr, Variable,
};
use crate::item::{Function, GlobalVarDef};
use crate::stmt::{
    AssignStmt, CallStmt, ForLoopStmt, GotoStmt, IfStmt, ReturnStmt, Stmt, StmtData,
    SwitchStmt, UForLoopStmt, VarDefStmt, WhileLoopStmt,
};
use crate::types::Type;
use crate::{ValueId, ValueKind};

/// Payload of an arena slot.
#[derive(Clone, Debug)]
pub enum Node {
    Function(Function),
    GlobalVarDef(GlobalVarDef),
    Stmt(Stmt),
    Type(Type),
    Expr(Expr),
}

impl Node {
    pub fn kind(&self) -> ValueKind {
        match self {
            Node::Function(_) => ValueKind::Function,
            Node::GlobalVarDef(_) => ValueKind::GlobalVarDef,
            Node::Stmt(s) => ValueKind::Statement(s.kind()),
            Node::Type(t) => ValueKind::Type(t.kind()),
            Node::Expr(e) => ValueKind::Expression(e.kind()),
        }
    }

    pub(crate) fn edges(&self) -> EdgeList {
        let mut out = EdgeList::new();
        match self {
            Node::Function(f) => f.edges(&mut out),
            Node::GlobalVarDef(g) => g.edges(&mut out),
            Node::Stmt(s) => s.data.edges(&mut out),
            Node::Expr(e) => e.edges(&mut out),
            Node::Type(_) => {}
        }
        out
    }

    pub(crate) fn put(&mut self, edge: Edge, value: Option<ValueId>) -> bool {
        match self {
            Node::Function(f) => f.put(edge, value),
            Node::GlobalVarDef(g) => g.put(edge, value),
            Node::Stmt(s) => s.data.put(edge, value),
            Node::Expr(e) => e.put(edge, value),
            Node::Type(_) => false,
        }
    }

    pub(crate) fn type_refs(&self) -> SmallVec<[ValueId; 4]> {
        match self {
            Node::Function(f) => f.type_refs(),
            Node::Expr(e) => e.type_refs(),
            Node::Type(t) => t.type_refs(),
            Node::GlobalVarDef(_) | Node::Stmt(_) => SmallVec::new(),
        }
    }

    /// Compare everything except edges, successors and arena bookkeeping.
    pub(crate) fn same_shape(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Function(a), Node::Function(b)) => a.name == b.name,
            (Node::GlobalVarDef(_), Node::GlobalVarDef(_)) => true,
            (Node::Stmt(a), Node::Stmt(b)) => a.data.same_shape(&b.data),
            (Node::Type(a), Node::Type(b)) => a == b,
            (Node::Expr(a), Node::Expr(b)) => a.same_shape(b),
            _ => false,
        }
    }
}

/// Safe narrowing from a node payload to a family or concrete payload.
pub trait Downcast {
    fn downcast(node: &Node) -> Option<&Self>;
}

impl Downcast for Node {
    #[inline]
    fn downcast(node: &Node) -> Option<&Self> {
        Some(node)
    }
}

/// Implements `Downcast` by destructuring a path of enum variants.
macro_rules! downcast {
    ($ty:ty => $pat:pat => $bind:ident) => {
        impl Downcast for $ty {
            #[inline]
            fn downcast(node: &Node) -> Option<&Self> {
                match node {
                    $pat => Some($bind),
                    _ => None,
                }
            }
        }
    };
}

downcast!(Function => Node::Function(f) => f);
downcast!(GlobalVarDef => Node::GlobalVarDef(g) => g);
downcast!(Stmt => Node::Stmt(s) => s);
downcast!(Type => Node::Type(t) => t);
downcast!(Expr => Node::Expr(e) => e);

downcast!(BinaryOpExpr => Node::Expr(Expr::BinaryOp(e)) => e);
downcast!(CallExpr => Node::Expr(Expr::Call(e)) => e);
downcast!(CastExpr => Node::Expr(Expr::Cast(e)) => e);
downcast!(UnaryOpExpr => Node::Expr(Expr::UnaryOp(e)) => e);
downcast!(TernaryOpExpr => Node::Expr(Expr::TernaryOp(e)) => e);
downcast!(Variable => Node::Expr(Expr::Variable(v)) => v);
downcast!(Constant => Node::Expr(Expr::Constant(c)) => c);

downcast!(ConstArray => Node::Expr(Expr::Constant(Constant::Array(c))) => c);
downcast!(ConstBool => Node::Expr(Expr::Constant(Constant::Bool(c))) => c);
downcast!(ConstFloat => Node::Expr(Expr::Constant(Constant::Float(c))) => c);
downcast!(ConstInt => Node::Expr(Expr::Constant(Constant::Int(c))) => c);
downcast!(ConstNullPointer => Node::Expr(Expr::Constant(Constant::NullPointer(c))) => c);
downcast!(ConstString => Node::Expr(Expr::Constant(Constant::String(c))) => c);
downcast!(ConstStruct => Node::Expr(Expr::Constant(Constant::Struct(c))) => c);
downcast!(ConstSymbol => Node::Expr(Expr::Constant(Constant::Symbol(c))) => c);

downcast!(AssignStmt => Node::Stmt(Stmt { data: StmtData::Assign(s), .. }) => s);
downcast!(CallStmt => Node::Stmt(Stmt { data: StmtData::Call(s), .. }) => s);
downcast!(ForLoopStmt => Node::Stmt(Stmt { data: StmtData::ForLoop(s), .. }) => s);
downcast!(GotoStmt => Node::Stmt(Stmt { data: StmtData::Goto(s), .. }) => s);
downcast!(IfStmt => Node::Stmt(Stmt { data: StmtData::If(s), .. }) => s);
downcast!(ReturnStmt => Node::Stmt(Stmt { data: StmtData::Return(s), .. }) => s);
downcast!(SwitchStmt => Node::Stmt(Stmt { data: StmtData::Switch(s), .. }) => s);
downcast!(UForLoopStmt => Node::Stmt(Stmt { data: StmtData::UForLoop(s), .. }) => s);
downcast!(VarDefStmt => Node::Stmt(Stmt { data: StmtData::VarDef(s), .. }) => s);
downcast!(WhileLoopStmt => Node::Stmt(Stmt { data: StmtData::WhileLoop(s), .. }) => s);
