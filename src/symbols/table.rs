//! Append-only procedure and variable tables
//!
//! Both tables are vectors in first-declared order (the export order) with an
//! `FxHashMap` index keyed by the identity tuple, so duplicate checks and
//! scope lookups are O(1) per scope step.

use super::{ProcId, Procedure, VarKind, Variable};
use crate::constants::{ROOT_PROCEDURE, ROOT_RETURN_TYPE};
use rustc_hash::FxHashMap;

type ProcKey = (String, usize, Option<ProcId>);
type VarKey = (String, ProcId, VarKind, usize);

/// Outcome of a declaration: the handle of the new entry, or of the entry
/// that already had the same identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declared<T> {
    New(T),
    Duplicate(T),
}

impl<T> Declared<T> {
    pub fn id(self) -> T {
        match self {
            Declared::New(id) | Declared::Duplicate(id) => id,
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Declared::Duplicate(_))
    }
}

#[derive(Debug, Clone)]
pub struct SymbolTable {
    procedures: Vec<Procedure>,
    procedure_index: FxHashMap<ProcKey, ProcId>,
    variables: Vec<Variable>,
    variable_index: FxHashMap<VarKey, usize>,
}

impl SymbolTable {
    /// Create a table holding only the synthetic root procedure.
    pub fn new() -> Self {
        let mut table = Self {
            procedures: Vec::new(),
            procedure_index: FxHashMap::default(),
            variables: Vec::new(),
            variable_index: FxHashMap::default(),
        };
        table.insert_procedure(Procedure {
            name: ROOT_PROCEDURE.to_string(),
            return_type: ROOT_RETURN_TYPE.to_string(),
            level: 0,
            first_param_index: 0,
            last_param_index: 0,
            parent: None,
        });
        table
    }

    pub fn root(&self) -> ProcId {
        ProcId(0)
    }

    /// Handles are only minted by this table, so lookups cannot miss.
    pub fn procedure(&self, id: ProcId) -> &Procedure {
        &self.procedures[id.0]
    }

    pub fn procedures(&self) -> &[Procedure] {
        &self.procedures
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Name of the procedure that declared `variable`.
    pub fn owner_name(&self, variable: &Variable) -> &str {
        &self.procedure(variable.owner).name
    }

    fn insert_procedure(&mut self, procedure: Procedure) -> ProcId {
        let id = ProcId(self.procedures.len());
        let key = (procedure.name.clone(), procedure.level, procedure.parent);
        self.procedure_index.insert(key, id);
        self.procedures.push(procedure);
        id
    }

    /// Register a function declared inside `parent` at nesting `level`.
    pub fn declare_procedure(
        &mut self,
        name: &str,
        return_type: &str,
        level: usize,
        parent: ProcId,
    ) -> Declared<ProcId> {
        let key = (name.to_string(), level, Some(parent));
        if let Some(&existing) = self.procedure_index.get(&key) {
            return Declared::Duplicate(existing);
        }
        Declared::New(self.insert_procedure(Procedure {
            name: name.to_string(),
            return_type: return_type.to_string(),
            level,
            first_param_index: 0,
            last_param_index: 0,
            parent: Some(parent),
        }))
    }

    /// Record where a procedure's parameter landed in the variable table.
    pub fn set_param_range(&mut self, id: ProcId, first: usize, last: usize) {
        let procedure = &mut self.procedures[id.0];
        procedure.first_param_index = first;
        procedure.last_param_index = last;
    }

    /// Register a variable; a duplicate identity keeps the first entry.
    pub fn declare_variable(
        &mut self,
        name: &str,
        owner: ProcId,
        kind: VarKind,
        var_type: &str,
        level: usize,
    ) -> Declared<usize> {
        let key = (name.to_string(), owner, kind, level);
        if let Some(&existing) = self.variable_index.get(&key) {
            return Declared::Duplicate(existing);
        }
        let table_index = self.variables.len();
        self.variable_index.insert(key, table_index);
        self.variables.push(Variable {
            name: name.to_string(),
            owner,
            kind,
            var_type: var_type.to_string(),
            level,
            table_index,
        });
        Declared::New(table_index)
    }

    pub fn find_variable(
        &self,
        name: &str,
        owner: ProcId,
        kind: VarKind,
        level: usize,
    ) -> Option<&Variable> {
        let key = (name.to_string(), owner, kind, level);
        self.variable_index
            .get(&key)
            .map(|&index| &self.variables[index])
    }

    /// Resolve a variable use from `(scope, level)` outward to the root.
    ///
    /// The procedure chain and the level counter move in lock-step; the
    /// innermost match wins.
    pub fn resolve_variable(&self, name: &str, scope: ProcId, level: usize) -> Option<&Variable> {
        let mut scope = Some(scope);
        let mut level = level;
        while let Some(owner) = scope {
            for kind in [VarKind::Local, VarKind::Parameter] {
                if let Some(variable) = self.find_variable(name, owner, kind, level) {
                    return Some(variable);
                }
            }
            if level == 0 {
                break;
            }
            level -= 1;
            scope = self.procedure(owner).parent;
        }
        None
    }

    /// Resolve a call target: a function declared directly inside `scope`
    /// or inside any enclosing procedure (which includes `scope` itself).
    pub fn resolve_procedure(&self, name: &str, scope: ProcId) -> Option<ProcId> {
        let mut scope = Some(scope);
        while let Some(enclosing) = scope {
            let procedure = self.procedure(enclosing);
            let key = (name.to_string(), procedure.level + 1, Some(enclosing));
            if let Some(&found) = self.procedure_index.get(&key) {
                return Some(found);
            }
            scope = procedure.parent;
        }
        None
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
