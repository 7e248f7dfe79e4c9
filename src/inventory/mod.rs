//! # Inventory
//!
//! Ordered, last-write-wins collection of definitions keyed by name.
//!
//! - A name's slot is created the first time the name is seen and is never
//!   removed, so listing order is the order of first appearance.
//! - A later definition of the same name replaces the live one in place; the
//!   displaced definition is appended to that name's shadow history.
//! - Kind does not matter for shadowing: `x() { ...; }` after `alias x=...`
//!   leaves the function live and the alias shadowed.
//!
//! Within one file and across files the same rule applies: whatever is
//! inserted last wins, matching what a shell would end up with after sourcing
//! the files in order.

use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

use crate::model::{Definition, DefinitionKind};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Slot {
    live: Definition,
    /// Earlier definitions of this name, oldest first
    shadowed: Vec<Definition>,
}

/// Accumulates definitions in merge order
#[derive(Debug, Default)]
pub struct InventoryBuilder {
    slots: Vec<Slot>,
    index: HashMap<String, usize>,
}

impl InventoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one definition, displacing any live definition with the same name.
    pub fn insert(&mut self, definition: Definition) {
        match self.index.get(&definition.name) {
            Some(&i) => {
                let slot = &mut self.slots[i];
                let displaced = std::mem::replace(&mut slot.live, definition);
                slot.shadowed.push(displaced);
            }
            None => {
                self.index.insert(definition.name.clone(), self.slots.len());
                self.slots.push(Slot {
                    live: definition,
                    shadowed: Vec::new(),
                });
            }
        }
    }

    /// Insert definitions in iteration order.
    pub fn extend(&mut self, definitions: impl IntoIterator<Item = Definition>) {
        for definition in definitions {
            self.insert(definition);
        }
    }

    pub fn finalize(self) -> Inventory {
        Inventory {
            slots: self.slots,
            index: self.index,
        }
    }
}

/// Read-only result of a scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    slots: Vec<Slot>,
    index: HashMap<String, usize>,
}

/// Flat view of one live definition, as listed or serialized
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record<'a> {
    pub name: &'a str,
    pub kind: DefinitionKind,
    pub body: &'a str,
    pub file: &'a Path,
    pub line: usize,
    /// Definitions this one replaced, oldest first
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub shadows: &'a [Definition],
}

impl Inventory {
    /// Live definitions in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Definition> {
        self.slots.iter().map(|slot| &slot.live)
    }

    /// The live definition of `name`, if it is of the given kind.
    pub fn get(&self, kind: DefinitionKind, name: &str) -> Option<&Definition> {
        self.slot(name)
            .map(|slot| &slot.live)
            .filter(|live| live.kind == kind)
    }

    /// Definitions of `name` that were replaced, oldest first, of any kind.
    pub fn shadowed(&self, name: &str) -> &[Definition] {
        self.slot(name)
            .map(|slot| slot.shadowed.as_slice())
            .unwrap_or(&[])
    }

    /// Every name that was defined more than once, in slot order.
    pub fn shadow_history(&self) -> impl Iterator<Item = (&Definition, &[Definition])> {
        self.slots
            .iter()
            .filter(|slot| !slot.shadowed.is_empty())
            .map(|slot| (&slot.live, slot.shadowed.as_slice()))
    }

    pub fn records(&self) -> Vec<Record<'_>> {
        self.slots
            .iter()
            .map(|slot| Record {
                name: &slot.live.name,
                kind: slot.live.kind,
                body: &slot.live.body,
                file: &slot.live.file,
                line: slot.live.line,
                shadows: &slot.shadowed,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn slot(&self, name: &str) -> Option<&Slot> {
        self.index.get(name).map(|&i| &self.slots[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn def(kind: DefinitionKind, name: &str, body: &str, file: &str, line: usize) -> Definition {
        Definition::new(kind, name.into(), body.into())
            .with_file(&PathBuf::from(file))
            .with_line(line)
    }

    #[test]
    fn test_insert_keeps_first_seen_order() {
        let mut builder = InventoryBuilder::new();
        builder.insert(def(DefinitionKind::Alias, "ll", "ls -la", "a", 1));
        builder.insert(def(DefinitionKind::Function, "greet", "echo hi", "a", 2));
        let inventory = builder.finalize();

        let names: Vec<_> = inventory.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["ll", "greet"]);
        assert_eq!(inventory.len(), 2);
    }

    #[test]
    fn test_last_write_wins_with_history() {
        let mut builder = InventoryBuilder::new();
        builder.extend(vec![
            def(DefinitionKind::Alias, "ll", "ls -l", "A", 1),
            def(DefinitionKind::Alias, "gs", "git status", "A", 2),
            def(DefinitionKind::Alias, "ll", "ls -la", "B", 1),
        ]);
        let inventory = builder.finalize();

        let live = inventory.get(DefinitionKind::Alias, "ll").unwrap();
        assert_eq!(live.body, "ls -la");
        assert_eq!(live.file, PathBuf::from("B"));

        let shadowed = inventory.shadowed("ll");
        assert_eq!(shadowed.len(), 1);
        assert_eq!(shadowed[0].file, PathBuf::from("A"));

        // Slot keeps its first position
        let names: Vec<_> = inventory.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["ll", "gs"]);
        assert_eq!(inventory.shadow_history().count(), 1);
    }

    #[test]
    fn test_function_shadows_alias_of_same_name() {
        let mut builder = InventoryBuilder::new();
        builder.insert(def(DefinitionKind::Alias, "x", "ls", "a", 1));
        builder.insert(def(DefinitionKind::Function, "x", "echo", "a", 2));
        let inventory = builder.finalize();

        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.get(DefinitionKind::Function, "x").unwrap().line, 2);
        assert!(inventory.get(DefinitionKind::Alias, "x").is_none());

        let shadowed = inventory.shadowed("x");
        assert_eq!(shadowed.len(), 1);
        assert_eq!(shadowed[0].kind, DefinitionKind::Alias);
        assert!(inventory.get(DefinitionKind::Function, "missing").is_none());
    }

    #[test]
    fn test_records_serialize() {
        let mut builder = InventoryBuilder::new();
        builder.insert(def(DefinitionKind::Alias, "ll", "ls -la", "/h/.bashrc", 3));
        let inventory = builder.finalize();

        let json = serde_json::to_value(inventory.records()).unwrap();
        assert_eq!(json[0]["name"], "ll");
        assert_eq!(json[0]["kind"], "alias");
        assert_eq!(json[0]["file"], "/h/.bashrc");
        assert_eq!(json[0]["line"], 3);
        assert!(json[0].get("shadows").is_none());
    }

    #[test]
    fn test_equality() {
        let build = || {
            let mut builder = InventoryBuilder::new();
            builder.insert(def(DefinitionKind::Alias, "a", "1", "f", 1));
            builder.insert(def(DefinitionKind::Alias, "a", "2", "f", 2));
            builder.finalize()
        };
        assert_eq!(build(), build());
        assert!(Inventory::default().is_empty());
    }
}
