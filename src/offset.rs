//! Lookup tables derived from a [`Configuration`].
//!
//! Both tables are rebuilt from the configuration whenever they are needed.

use crate::config::Configuration;
use crate::error::{PratacError, Result};
use std::collections::HashMap;

pub const ALL_KEY: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonEntry {
    /// Participant name as written in the configuration.
    pub name: String,
    /// Lowercased primary name first, then lowercased aliases.
    pub keys: Vec<String>,
    pub index: usize,
}

/// Result of resolving a lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonSlot {
    Single(usize),
    All,
}

#[derive(Debug, Clone)]
pub struct PersonOffset {
    entries: Vec<PersonEntry>,
    lookup: HashMap<String, usize>,
}

impl PersonOffset {
    pub fn build(config: &Configuration) -> Result<Self> {
        let mut sorted: Vec<&String> = config.participants.iter().collect();
        sorted.sort_by_cached_key(|name| name.to_lowercase());

        let mut entries = Vec::with_capacity(sorted.len());
        let mut lookup: HashMap<String, usize> = HashMap::new();
        for (index, name) in sorted.into_iter().enumerate() {
            let mut keys = vec![name.to_lowercase()];
            for alias in config.aliases_for(name) {
                let key = alias.to_lowercase();
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
            for key in &keys {
                if key == ALL_KEY {
                    return Err(PratacError::DuplicateKey {
                        key: key.clone(),
                        first: "the 'all' entry".to_string(),
                        second: name.clone(),
                    });
                }
                if let Some(&other) = lookup.get(key) {
                    let first: &PersonEntry = &entries[other];
                    return Err(PratacError::DuplicateKey {
                        key: key.clone(),
                        first: first.name.clone(),
                        second: name.clone(),
                    });
                }
                lookup.insert(key.clone(), index);
            }
            entries.push(PersonEntry {
                name: name.clone(),
                keys,
                index,
            });
        }
        tracing::debug!(participants = entries.len(), "built person offsets");
        Ok(Self { entries, lookup })
    }

    /// Number of real participants (N). The sentinel sits at this index.
    pub fn participant_count(&self) -> usize {
        self.entries.len()
    }

    /// Total number of entries including the `all` sentinel.
    pub fn len(&self) -> usize {
        self.entries.len() + 1
    }

    /// Always false: the `all` sentinel is present even with no participants.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn all_index(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[PersonEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&PersonEntry> {
        self.entries.get(index)
    }

    /// Index for a name or alias, case-insensitive. `all` maps to N.
    pub fn get(&self, key: &str) -> Option<usize> {
        match self.resolve(key)? {
            PersonSlot::Single(index) => Some(index),
            PersonSlot::All => Some(self.all_index()),
        }
    }

    pub fn resolve(&self, key: &str) -> Option<PersonSlot> {
        let key = key.trim().to_lowercase();
        if key == ALL_KEY {
            return Some(PersonSlot::All);
        }
        self.lookup.get(&key).copied().map(PersonSlot::Single)
    }

    /// Every `(keys, index)` pair, sentinel last with the single key `all`.
    pub fn key_sets(&self) -> Vec<(Vec<String>, usize)> {
        let mut out: Vec<(Vec<String>, usize)> = self
            .entries
            .iter()
            .map(|e| (e.keys.clone(), e.index))
            .collect();
        out.push((vec![ALL_KEY.to_string()], self.all_index()));
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomOffset {
    areas: Vec<String>,
}

impl RoomOffset {
    pub fn build(config: &Configuration) -> Self {
        Self {
            areas: config.cleaning_areas.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.areas.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.areas.iter().map(String::as_str).enumerate()
    }
}
