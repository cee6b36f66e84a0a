//! Bidirectional mapping between functions and small integer ids.
//!
//! Ids are handed out once, in sorted function order, so the same artifact
//! always produces the same ids. They appear in URLs (`/func/<id>`) and carry
//! no other meaning.

use super::function::Function;
use crate::utils::error::{RegistryError, ReportError};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Opaque registry id of a function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionId(usize);

impl FunctionId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FunctionId {
    type Err = ReportError;

    /// Parse a decimal id taken from a URL path (digits only, no sign)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ReportError::InvalidFunctionId(s.to_string()));
        }

        s.parse::<usize>()
            .map(FunctionId)
            .map_err(|_| ReportError::InvalidFunctionId(s.to_string()))
    }
}

/// Function <-> id lookup table, immutable once built
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    functions: Vec<Function>,
    ids: HashMap<Function, FunctionId>,
}

impl FunctionRegistry {
    /// Build the registry from the full function set
    ///
    /// **Public** - called once by `ProfileDataset::new`
    ///
    /// Functions are numbered in ascending `(file, line, name)` order.
    /// Duplicates collapse onto a single id.
    pub fn build(functions: impl IntoIterator<Item = Function>) -> Self {
        let mut functions: Vec<Function> = functions.into_iter().collect();
        functions.sort();
        functions.dedup();

        let ids = functions
            .iter()
            .enumerate()
            .map(|(index, func)| (func.clone(), FunctionId(index)))
            .collect();

        Self { functions, ids }
    }

    /// Look up the id of a registered function
    pub fn id_of(&self, func: &Function) -> Result<FunctionId, RegistryError> {
        self.ids
            .get(func)
            .copied()
            .ok_or_else(|| RegistryError::UnknownFunction(func.to_string()))
    }

    /// Look up the function behind an id
    pub fn function_of(&self, id: FunctionId) -> Result<&Function, RegistryError> {
        self.functions
            .get(id.0)
            .ok_or(RegistryError::UnknownId(id.0))
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// All registered ids, in id order
    pub fn ids(&self) -> impl Iterator<Item = FunctionId> + '_ {
        (0..self.functions.len()).map(FunctionId)
    }

    /// All `(id, function)` pairs, in id order
    pub fn iter(&self) -> impl Iterator<Item = (FunctionId, &Function)> + '_ {
        self.functions
            .iter()
            .enumerate()
            .map(|(index, func)| (FunctionId(index), func))
    }
}
