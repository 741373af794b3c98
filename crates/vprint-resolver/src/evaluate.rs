//! Mode-scoped value evaluation.
//!
//! Aliases are followed in the same mode at every hop; no mode remapping is
//! done between collections.

use indexmap::IndexMap;
use vprint_core::{ModeId, ResolveError, TerminalValue, Variable, VariableId, VariableValue};

use crate::directory::VariableDirectory;

/// Resolve a variable's value at `mode` to a terminal value.
///
/// The alias chain is walked iteratively; revisiting a variable fails with
/// [`ResolveError::CyclicAlias`].
pub fn evaluate<'d>(
    directory: &'d VariableDirectory,
    variable: &'d Variable,
    mode: &ModeId,
) -> Result<&'d TerminalValue, ResolveError> {
    let mut chain: IndexMap<&VariableId, &str> = IndexMap::new();
    let mut current = variable;

    loop {
        if chain.insert(&current.id, &current.name).is_some() {
            let mut cycle: Vec<String> = chain.values().map(|n| n.to_string()).collect();
            cycle.push(current.name.clone());
            return Err(ResolveError::CyclicAlias { cycle });
        }

        let value = current
            .value_for(mode)
            .ok_or_else(|| ResolveError::MissingModeValue {
                variable: current.name.clone(),
                mode: mode.clone(),
            })?;

        match value {
            VariableValue::Terminal(terminal) => return Ok(terminal),
            VariableValue::Alias(alias) => {
                current = directory
                    .get(&alias.id)
                    .ok_or_else(|| ResolveError::DanglingAlias {
                        variable: current.name.clone(),
                        alias_id: alias.id.clone(),
                    })?;
            }
        }
    }
}

/// Name of the variable one alias hop away, or `None` when the value at
/// `mode` is not an alias.
pub fn bound_name<'d>(
    directory: &'d VariableDirectory,
    variable: &Variable,
    mode: &ModeId,
) -> Result<Option<&'d str>, ResolveError> {
    match variable.value_for(mode).and_then(VariableValue::as_alias) {
        Some(id) => directory
            .get(id)
            .map(|target| Some(target.name.as_str()))
            .ok_or_else(|| ResolveError::DanglingAlias {
                variable: variable.name.clone(),
                alias_id: id.clone(),
            }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vprint_core::Color;

    fn light() -> ModeId {
        ModeId::from("light")
    }

    fn chain_directory() -> VariableDirectory {
        VariableDirectory::new(
            vec![
                Variable::new("a", "Button/Fill", "c1").with_value("light", VariableValue::alias("b")),
                Variable::new("b", "Brand/Primary", "c1").with_value("light", VariableValue::alias("c")),
                Variable::new("c", "Palette/Red 500", "c1")
                    .with_value("light", Color::rgb(1.0, 0.0, 0.0)),
            ],
            vec![],
        )
    }

    #[test]
    fn test_terminal_value() {
        let dir = chain_directory();
        let var = dir.lookup("Palette/Red 500").unwrap();
        let value = evaluate(&dir, var, &light()).unwrap();
        assert_eq!(value, &TerminalValue::Color(Color::rgb(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_alias_chain_resolves_to_terminal() {
        let dir = chain_directory();
        let var = dir.lookup("Button/Fill").unwrap();
        let value = evaluate(&dir, var, &light()).unwrap();
        assert_eq!(value.as_color(), Some(Color::rgb(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_bound_name_is_one_hop() {
        let dir = chain_directory();
        let var = dir.lookup("Button/Fill").unwrap();
        assert_eq!(bound_name(&dir, var, &light()).unwrap(), Some("Brand/Primary"));

        let terminal = dir.lookup("Palette/Red 500").unwrap();
        assert_eq!(bound_name(&dir, terminal, &light()).unwrap(), None);
    }

    #[test]
    fn test_dangling_alias() {
        let dir = VariableDirectory::new(
            vec![Variable::new("a", "Fill", "c1").with_value("light", VariableValue::alias("gone"))],
            vec![],
        );
        let var = dir.lookup("Fill").unwrap();
        let expected = ResolveError::DanglingAlias {
            variable: "Fill".into(),
            alias_id: VariableId::from("gone"),
        };
        assert_eq!(evaluate(&dir, var, &light()), Err(expected.clone()));
        assert_eq!(bound_name(&dir, var, &light()), Err(expected));
    }

    #[test]
    fn test_cyclic_alias() {
        let dir = VariableDirectory::new(
            vec![
                Variable::new("a", "A", "c1").with_value("light", VariableValue::alias("b")),
                Variable::new("b", "B", "c1").with_value("light", VariableValue::alias("a")),
            ],
            vec![],
        );
        let var = dir.lookup("A").unwrap();
        assert_eq!(
            evaluate(&dir, var, &light()),
            Err(ResolveError::CyclicAlias {
                cycle: vec!["A".into(), "B".into(), "A".into()]
            })
        );
    }

    #[test]
    fn test_self_alias() {
        let dir = VariableDirectory::new(
            vec![Variable::new("a", "A", "c1").with_value("light", VariableValue::alias("a"))],
            vec![],
        );
        let var = dir.lookup("A").unwrap();
        assert!(matches!(
            evaluate(&dir, var, &light()),
            Err(ResolveError::CyclicAlias { .. })
        ));
    }

    #[test]
    fn test_missing_mode_value_along_chain() {
        let dir = VariableDirectory::new(
            vec![
                Variable::new("a", "A", "c1").with_value("dark", VariableValue::alias("b")),
                Variable::new("b", "B", "c2").with_value("light", Color::BLACK),
            ],
            vec![],
        );
        let var = dir.lookup("A").unwrap();
        let dark = ModeId::from("dark");
        assert_eq!(
            evaluate(&dir, var, &dark),
            Err(ResolveError::MissingModeValue {
                variable: "B".into(),
                mode: dark.clone(),
            })
        );
    }
}
