//! Name and id lookup over a snapshot of variables.

use indexmap::IndexMap;
use vprint_core::{Collection, CollectionId, ResolveError, SourceError, Variable, VariableId};

/// Supplies the variables and collections visible in the current document.
pub trait VariableSource {
    /// All local variables, as a flat list.
    fn variables(&self) -> Result<Vec<Variable>, SourceError>;

    /// All local collections. Used for default-mode fallback.
    fn collections(&self) -> Result<Vec<Collection>, SourceError> {
        Ok(Vec::new())
    }
}

/// An in-memory variable source.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub variables: Vec<Variable>,
    pub collections: Vec<Collection>,
}

impl VariableSource for StaticSource {
    fn variables(&self) -> Result<Vec<Variable>, SourceError> {
        Ok(self.variables.clone())
    }

    fn collections(&self) -> Result<Vec<Collection>, SourceError> {
        Ok(self.collections.clone())
    }
}

/// Read-only lookup table of variables by name and by id.
#[derive(Debug, Clone, Default)]
pub struct VariableDirectory {
    variables: Vec<Variable>,
    by_name: IndexMap<String, usize>,
    by_id: IndexMap<VariableId, usize>,
    collections: IndexMap<CollectionId, Collection>,
}

impl VariableDirectory {
    /// Build a directory. When two variables share a name, the later one wins.
    pub fn new<V, C>(variables: V, collections: C) -> Self
    where
        V: IntoIterator<Item = Variable>,
        C: IntoIterator<Item = Collection>,
    {
        let variables: Vec<Variable> = variables.into_iter().collect();
        let mut by_name = IndexMap::with_capacity(variables.len());
        let mut by_id = IndexMap::with_capacity(variables.len());

        for (index, var) in variables.iter().enumerate() {
            if let Some(previous) = by_name.insert(var.name.clone(), index) {
                tracing::warn!(
                    name = %var.name,
                    shadowed = %variables[previous].id,
                    winner = %var.id,
                    "duplicate variable name, last definition wins"
                );
            }
            by_id.insert(var.id.clone(), index);
        }

        let collections = collections
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();

        Self {
            variables,
            by_name,
            by_id,
            collections,
        }
    }

    /// Build a directory from a variable source.
    pub fn from_source(source: &dyn VariableSource) -> Result<Self, SourceError> {
        let variables = source.variables()?;
        let collections = source.collections()?;
        tracing::debug!(
            variables = variables.len(),
            collections = collections.len(),
            "loaded variable directory"
        );
        Ok(Self::new(variables, collections))
    }

    /// Look up a variable by its exact (case-sensitive) name.
    pub fn lookup(&self, name: &str) -> Result<&Variable, ResolveError> {
        self.by_name
            .get(name)
            .map(|&i| &self.variables[i])
            .ok_or_else(|| ResolveError::NotFound {
                name: name.to_string(),
            })
    }

    /// Get a variable by id.
    pub fn get(&self, id: &VariableId) -> Option<&Variable> {
        self.by_id.get(id).map(|&i| &self.variables[i])
    }

    /// Get a collection by id.
    pub fn collection(&self, id: &CollectionId) -> Option<&Collection> {
        self.collections.get(id)
    }

    /// Iterate over all variables in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
