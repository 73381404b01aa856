//! HLL IR - object model of the decompiler's high-level intermediate representation
//!
//! This crate contains the data structures the backend passes work on:
//! - Handles (`ValueId`) into a single arena that owns every node
//! - Kind tags and safe downcasts for the node families
//! - Expressions, constants, statements, types, functions and global variables
//! - The observer protocol that keeps owning edges and back-links in step
//! - Structural algorithms: replace, clone, equality, type inference, release
//! - A visitor and a diagnostic printer
//!
//! # Design Philosophy
//!
//! - **Arena Everything**: nodes never point at each other directly; every
//!   reference is a `ValueId`, so cyclic relations (goto targets, observers)
//!   need no reference counting
//! - **Intern Types**: structurally equal types share one handle
//! - **Edges as Data**: one edge table drives validation, observers, replace,
//!   clone, equality and release
//!
//! Every mutating operation comes in two forms: `try_*` returns an
//! [`IrError`], the plain form treats the error as a contract violation and
//! panics.

mod arena;
mod constant;
mod edge;
mod error;
mod expr;
mod item;
mod kind;
mod metadata;
mod node;
mod printer;
mod stmt;
mod types;
mod value_id;
pub mod visitor;

pub use arena::{IrArena, Statements};
pub use constant::{
    ConstArray, ConstBool, ConstFloat, ConstInt, ConstNullPointer, ConstString, ConstStruct,
    ConstSymbol, Constant,
};
pub use edge::Edge;
pub use error::IrError;
pub use expr::{
    BinaryOpExpr, CallExpr, CastExpr, CastOp, Expr, ExtVariant, TernaryOpExpr, UnaryOpExpr,
    Variable,
};
pub use item::{Function, GlobalVarDef};
pub use kind::{
    BinaryOpKind, CastKind, ConstKind, ExprKind, StmtKind, TypeKind, UnaryOpKind, ValueKind,
};
pub use metadata::Metadata;
pub use node::{Downcast, Node};
pub use printer::{Printer, ValueDisplay};
pub use stmt::{
    AssignStmt, CallStmt, ForLoopStmt, GotoStmt, IfStmt, ReturnStmt, Stmt, StmtData, SwitchStmt,
    UForLoopStmt, VarDefStmt, WhileLoopStmt,
};
pub use types::Type;
pub use value_id::ValueId;
pub use visitor::Visitor;
