//! Kind tags for IR nodes.
//!
//! Every node reports a [`ValueKind`] fixed at construction. The hierarchy is
//! encoded as nested sum types rather than numeric ranges: a binary operator
//! is `ValueKind::Expression(ExprKind::BinaryOp(BinaryOpKind::BitAnd))`, so
//! "is this a binary operator?" is a pattern match and a new leaf cannot land
//! outside its family.
//!
//! All kind enums are `Copy` and cheap to compare.

use std::fmt;

/// Kind of any IR node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueKind {
    GlobalVarDef,
    Function,
    Statement(StmtKind),
    Type(TypeKind),
    Expression(ExprKind),
}

/// Statement kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum StmtKind {
    Assign,
    Break,
    Call,
    Continue,
    Empty,
    ForLoop,
    Goto,
    If,
    Return,
    Switch,
    UForLoop,
    Unreachable,
    VarDef,
    WhileLoop,
}

/// Type kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeKind {
    Array,
    Float,
    Function,
    Int,
    Pointer,
    String,
    Struct,
    Unknown,
    Void,
}

/// Expression kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ExprKind {
    BinaryOp(BinaryOpKind),
    Call,
    Cast(CastKind),
    Constant(ConstKind),
    UnaryOp(UnaryOpKind),
    TernaryOp,
    Variable,
}

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOpKind {
    Add,
    And,
    ArrayIndex,
    Assign,
    BitAnd,
    BitOr,
    BitShl,
    BitShr,
    BitXor,
    Comma,
    Div,
    Eq,
    GtEq,
    Gt,
    LtEq,
    Lt,
    Mod,
    Mul,
    Neq,
    Or,
    StructIndex,
    Sub,
}

/// Cast operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum CastKind {
    BitCast,
    Ext,
    FpToInt,
    IntToFp,
    IntToPtr,
    PtrToInt,
    Trunc,
}

/// Constant kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstKind {
    Array,
    Bool,
    Float,
    Int,
    NullPointer,
    String,
    Struct,
    Symbol,
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOpKind {
    Address,
    Deref,
    Neg,
    Not,
}

impl ValueKind {
    /// Canonical node name, e.g. `"BitAndOpExpr"` or `"VarDefStmt"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::GlobalVarDef => "GlobalVarDef",
            Self::Function => "Function",
            Self::Statement(kind) => kind.name(),
            Self::Type(kind) => kind.name(),
            Self::Expression(kind) => kind.name(),
        }
    }

    #[inline]
    pub const fn is_statement(self) -> bool {
        matches!(self, Self::Statement(_))
    }

    #[inline]
    pub const fn is_type(self) -> bool {
        matches!(self, Self::Type(_))
    }

    #[inline]
    pub const fn is_expression(self) -> bool {
        matches!(self, Self::Expression(_))
    }

    #[inline]
    pub const fn is_binary_op(self) -> bool {
        matches!(self, Self::Expression(ExprKind::BinaryOp(_)))
    }

    #[inline]
    pub const fn is_unary_op(self) -> bool {
        matches!(self, Self::Expression(ExprKind::UnaryOp(_)))
    }

    #[inline]
    pub const fn is_cast(self) -> bool {
        matches!(self, Self::Expression(ExprKind::Cast(_)))
    }

    #[inline]
    pub const fn is_constant(self) -> bool {
        matches!(self, Self::Expression(ExprKind::Constant(_)))
    }

    #[inline]
    pub const fn is_variable(self) -> bool {
        matches!(self, Self::Expression(ExprKind::Variable))
    }

    /// Variables and functions are program-wide entities: referenced from many
    /// places, never duplicated by cloning and never owned by a referrer.
    #[inline]
    pub const fn is_shared_entity(self) -> bool {
        matches!(self, Self::Function | Self::Expression(ExprKind::Variable))
    }
}

impl StmtKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Assign => "AssignStmt",
            Self::Break => "BreakStmt",
            Self::Call => "CallStmt",
            Self::Continue => "ContinueStmt",
            Self::Empty => "EmptyStmt",
            Self::ForLoop => "ForLoopStmt",
            Self::Goto => "GotoStmt",
            Self::If => "IfStmt",
            Self::Return => "ReturnStmt",
            Self::Switch => "SwitchStmt",
            Self::UForLoop => "UForLoopStmt",
            Self::Unreachable => "UnreachableStmt",
            Self::VarDef => "VarDefStmt",
            Self::WhileLoop => "WhileLoopStmt",
        }
    }

    /// Compound statements own nested statement bodies besides their successor.
    pub const fn is_compound(self) -> bool {
        matches!(
            self,
            Self::If | Self::Switch | Self::ForLoop | Self::UForLoop | Self::WhileLoop
        )
    }
}

impl TypeKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Array => "ArrayType",
            Self::Float => "FloatType",
            Self::Function => "FunctionType",
            Self::Int => "IntType",
            Self::Pointer => "PointerType",
            Self::String => "StringType",
            Self::Struct => "StructType",
            Self::Unknown => "UnknownType",
            Self::Void => "VoidType",
        }
    }
}

impl ExprKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::BinaryOp(op) => op.name(),
            Self::Call => "CallExpr",
            Self::Cast(kind) => kind.name(),
            Self::Constant(kind) => kind.name(),
            Self::UnaryOp(op) => op.name(),
            Self::TernaryOp => "TernaryOpExpr",
            Self::Variable => "Variable",
        }
    }
}

impl BinaryOpKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "AddOpExpr",
            Self::And => "AndOpExpr",
            Self::ArrayIndex => "ArrayIndexOpExpr",
            Self::Assign => "AssignOpExpr",
            Self::BitAnd => "BitAndOpExpr",
            Self::BitOr => "BitOrOpExpr",
            Self::BitShl => "BitShlOpExpr",
            Self::BitShr => "BitShrOpExpr",
            Self::BitXor => "BitXorOpExpr",
            Self::Comma => "CommaOpExpr",
            Self::Div => "DivOpExpr",
            Self::Eq => "EqOpExpr",
            Self::GtEq => "GtEqOpExpr",
            Self::Gt => "GtOpExpr",
            Self::LtEq => "LtEqOpExpr",
            Self::Lt => "LtOpExpr",
            Self::Mod => "ModOpExpr",
            Self::Mul => "MulOpExpr",
            Self::Neq => "NeqOpExpr",
            Self::Or => "OrOpExpr",
            Self::StructIndex => "StructIndexOpExpr",
            Self::Sub => "SubOpExpr",
        }
    }

    /// C-like spelling used by the diagnostic text form.
    ///
    /// Index operators have no infix spelling; the printer renders them as
    /// `a[i]` and `s.i`.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::And => "&&",
            Self::ArrayIndex => "[]",
            Self::Assign => "=",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitShl => "<<",
            Self::BitShr => ">>",
            Self::BitXor => "^",
            Self::Comma => ",",
            Self::Div => "/",
            Self::Eq => "==",
            Self::GtEq => ">=",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::Lt => "<",
            Self::Mod => "%",
            Self::Mul => "*",
            Self::Neq => "!=",
            Self::Or => "||",
            Self::StructIndex => ".",
            Self::Sub => "-",
        }
    }

    /// Operators whose result is a truth value rather than an operand type.
    pub const fn yields_bool(self) -> bool {
        matches!(
            self,
            Self::And
                | Self::Or
                | Self::Eq
                | Self::Neq
                | Self::Lt
                | Self::LtEq
                | Self::Gt
                | Self::GtEq
        )
    }
}

impl CastKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::BitCast => "BitCastExpr",
            Self::Ext => "ExtCastExpr",
            Self::FpToInt => "FPToIntCastExpr",
            Self::IntToFp => "IntToFPCastExpr",
            Self::IntToPtr => "IntToPtrCastExpr",
            Self::PtrToInt => "PtrToIntCastExpr",
            Self::Trunc => "TruncCastExpr",
        }
    }
}

impl ConstKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Array => "ConstArray",
            Self::Bool => "ConstBool",
            Self::Float => "ConstFloat",
            Self::Int => "ConstInt",
            Self::NullPointer => "ConstNullPointer",
            Self::String => "ConstString",
            Self::Struct => "ConstStruct",
            Self::Symbol => "ConstSymbol",
        }
    }
}

impl UnaryOpKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Address => "AddressOpExpr",
            Self::Deref => "DerefOpExpr",
            Self::Neg => "NegOpExpr",
            Self::Not => "NotOpExpr",
        }
    }

    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Address => "&",
            Self::Deref => "*",
            Self::Neg => "-",
            Self::Not => "!",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
