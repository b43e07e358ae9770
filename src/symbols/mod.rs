//! Symbol model for declarations
//!
//! This module provides the records the parser builds while walking
//! declarations:
//! - [`Procedure`]: a declared function (plus the synthetic root `main`)
//! - [`Variable`]: a local, a parameter, or a function's return-value slot
//! - [`table::SymbolTable`]: the arena that owns both, in declaration order
//!
//! # Identity
//!
//! Duplicate detection and lookup use only part of each record:
//! - procedure: `(name, level, parent)`
//! - variable: `(name, owner, kind, level)`
//!
//! Return types, variable types and table offsets never take part in identity,
//! so redeclaring a function with another return type is still a duplicate.
//!
//! # Scopes
//!
//! Procedures form a strict tree. Parents are stored as [`ProcId`] handles into
//! the arena, never as references.

pub mod table;

pub use table::{Declared, SymbolTable};

/// Handle to a procedure stored in a [`SymbolTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcId(pub(crate) usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Procedure {
    pub name: String,
    pub return_type: String,
    pub level: usize,
    /// Variable-table length before the parameter was declared
    pub first_param_index: usize,
    /// Variable-table length after the parameter was declared
    pub last_param_index: usize,
    pub parent: Option<ProcId>,
}

/// Role of a variable inside its owning procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarKind {
    Local,
    Parameter,
}

impl VarKind {
    /// Code written to the `.var` table.
    pub fn code(self) -> u8 {
        match self {
            VarKind::Local => 0,
            VarKind::Parameter => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub owner: ProcId,
    pub kind: VarKind,
    pub var_type: String,
    pub level: usize,
    /// Position in the variable table
    pub table_index: usize,
}
