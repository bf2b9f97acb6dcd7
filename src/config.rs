use crate::error::{PratacError, Result};
use crate::offset::PersonOffset;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_START_DATE: &str = "2022-09-14";

/// Household rotation setup as stored in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub participants: Vec<String>,
    #[serde(default)]
    pub participant_aliases: BTreeMap<String, Vec<String>>,
    pub cleaning_areas: Vec<String>,
    pub start_date: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            participants: vec!["Martin".into(), "Peter".into(), "Samuel".into()],
            participant_aliases: BTreeMap::from([
                ("Martin".to_string(), vec!["Mato".to_string()]),
                ("Peter".to_string(), vec!["Peto".to_string()]),
                ("Samuel".to_string(), vec!["Samo".to_string()]),
            ]),
            cleaning_areas: vec![
                "shower".into(),
                "toilet".into(),
                "kitchen".into(),
                "hallway".into(),
            ],
            start_date: DEFAULT_START_DATE.to_string(),
        }
    }
}

/// Case-insensitive name comparison, Unicode-aware so `Šimon` matches `šimon`.
pub fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|source| {
        PratacError::InvalidDate {
            value: value.to_string(),
            source,
        }
    })
}

impl Configuration {
    pub fn new(
        participants: Vec<String>,
        participant_aliases: BTreeMap<String, Vec<String>>,
        cleaning_areas: Vec<String>,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            participants,
            participant_aliases,
            cleaning_areas,
            start_date: start_date.format(DATE_FORMAT).to_string(),
        }
    }

    pub fn start_date(&self) -> Result<NaiveDate> {
        parse_date(&self.start_date)
    }

    /// Aliases registered for `name`. Exact key match wins over a
    /// case-insensitive one.
    pub fn aliases_for(&self, name: &str) -> &[String] {
        if let Some(aliases) = self.participant_aliases.get(name) {
            return aliases;
        }
        self.participant_aliases
            .iter()
            .find(|(owner, _)| same_name(owner, name))
            .map(|(_, aliases)| aliases.as_slice())
            .unwrap_or(&[])
    }

    fn find_participant(&self, name: &str) -> Option<usize> {
        self.participants.iter().position(|p| same_name(p, name))
    }

    fn alias_owner_key(&self, name: &str) -> Option<String> {
        self.participant_aliases
            .keys()
            .find(|owner| same_name(owner, name))
            .cloned()
    }

    pub fn validate(&self) -> Result<()> {
        if self.participants.is_empty() {
            return Err(PratacError::InvalidConfig(
                "at least one participant is required".into(),
            ));
        }
        if self.cleaning_areas.is_empty() {
            return Err(PratacError::NoAreas);
        }
        if let Some(blank) = self.participants.iter().position(|p| p.trim().is_empty()) {
            return Err(PratacError::InvalidConfig(format!(
                "participant #{} has an empty name",
                blank + 1
            )));
        }
        if self.cleaning_areas.iter().any(|a| a.trim().is_empty()) {
            return Err(PratacError::InvalidConfig(
                "cleaning areas must not be empty".into(),
            ));
        }
        for (owner, aliases) in &self.participant_aliases {
            if self.find_participant(owner).is_none() {
                return Err(PratacError::InvalidConfig(format!(
                    "aliases defined for unknown participant '{owner}'"
                )));
            }
            if aliases.iter().any(|a| a.trim().is_empty()) {
                return Err(PratacError::InvalidConfig(format!(
                    "participant '{owner}' has an empty alias"
                )));
            }
        }
        self.start_date()?;
        PersonOffset::build(self)?;
        Ok(())
    }

    pub fn set_start_date(&mut self, date: NaiveDate) {
        self.start_date = date.format(DATE_FORMAT).to_string();
    }

    pub fn add_participant(&mut self, name: &str, aliases: &[String]) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PratacError::InvalidConfig(
                "participant name must not be empty".into(),
            ));
        }
        let mut candidate = self.clone();
        candidate.participants.push(name.to_string());
        if !aliases.is_empty() {
            candidate
                .participant_aliases
                .insert(name.to_string(), aliases.to_vec());
        }
        candidate.validate()?;
        *self = candidate;
        Ok(())
    }

    pub fn remove_participant(&mut self, name: &str) -> Result<()> {
        let idx = self
            .find_participant(name)
            .ok_or_else(|| PratacError::UnknownPerson(name.to_string()))?;
        let removed = self.participants.remove(idx);
        if let Some(key) = self.alias_owner_key(&removed) {
            self.participant_aliases.remove(&key);
        }
        Ok(())
    }

    pub fn add_alias(&mut self, name: &str, alias: &str) -> Result<()> {
        let alias = alias.trim();
        if alias.is_empty() {
            return Err(PratacError::InvalidConfig("alias must not be empty".into()));
        }
        let idx = self
            .find_participant(name)
            .ok_or_else(|| PratacError::UnknownPerson(name.to_string()))?;
        let owner = self
            .alias_owner_key(&self.participants[idx])
            .unwrap_or_else(|| self.participants[idx].clone());
        let mut candidate = self.clone();
        candidate
            .participant_aliases
            .entry(owner)
            .or_default()
            .push(alias.to_string());
        PersonOffset::build(&candidate)?;
        *self = candidate;
        Ok(())
    }

    pub fn remove_alias(&mut self, name: &str, alias: &str) -> Result<()> {
        let idx = self
            .find_participant(name)
            .ok_or_else(|| PratacError::UnknownPerson(name.to_string()))?;
        let owner = self.alias_owner_key(&self.participants[idx]).ok_or_else(|| {
            PratacError::InvalidConfig(format!("'{name}' has no alias '{alias}'"))
        })?;
        let Some(aliases) = self.participant_aliases.get_mut(&owner) else {
            return Ok(());
        };
        let before = aliases.len();
        aliases.retain(|a| !same_name(a, alias));
        if aliases.len() == before {
            return Err(PratacError::InvalidConfig(format!(
                "'{name}' has no alias '{alias}'"
            )));
        }
        if aliases.is_empty() {
            self.participant_aliases.remove(&owner);
        }
        Ok(())
    }

    pub fn add_area(&mut self, area: &str) -> Result<()> {
        let area = area.trim();
        if area.is_empty() {
            return Err(PratacError::InvalidConfig(
                "area name must not be empty".into(),
            ));
        }
        if self.cleaning_areas.iter().any(|a| a == area) {
            return Err(PratacError::InvalidConfig(format!(
                "area '{area}' already exists"
            )));
        }
        self.cleaning_areas.push(area.to_string());
        Ok(())
    }

    pub fn remove_area(&mut self, area: &str) -> Result<()> {
        let idx = self
            .cleaning_areas
            .iter()
            .position(|a| a == area.trim())
            .ok_or_else(|| PratacError::InvalidConfig(format!("no area named '{area}'")))?;
        self.cleaning_areas.remove(idx);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_is_valid() {
        let config = Configuration::default();
        config.validate().unwrap();
        assert_eq!(config.start_date, DEFAULT_START_DATE);
        assert_eq!(config.cleaning_areas[0], "shower");
        assert_eq!(config.aliases_for("Martin"), ["Mato".to_string()]);
    }

    #[test]
    fn aliases_lookup_falls_back_to_case_insensitive_owner() {
        let config = Configuration::default();
        assert_eq!(config.aliases_for("martin"), ["Mato".to_string()]);
        assert!(config.aliases_for("nobody").is_empty());
    }

    #[test]
    fn add_participant_rejects_alias_collision() {
        let mut config = Configuration::default();
        let err = config
            .add_participant("Matej", &["mato".to_string()])
            .unwrap_err();
        assert!(matches!(err, PratacError::DuplicateKey { .. }));
        assert_eq!(config.participants.len(), 3);
    }

    #[test]
    fn remove_participant_drops_aliases() {
        let mut config = Configuration::default();
        config.remove_participant("peter").unwrap();
        assert_eq!(config.participants, vec!["Martin", "Samuel"]);
        assert!(!config.participant_aliases.contains_key("Peter"));
    }

    #[test]
    fn add_and_remove_alias() {
        let mut config = Configuration::default();
        config.add_alias("samuel", "Samko").unwrap();
        assert_eq!(config.aliases_for("Samuel"), ["Samo", "Samko"]);
        config.remove_alias("Samuel", "samo").unwrap();
        assert_eq!(config.aliases_for("Samuel"), ["Samko"]);
        assert!(config.remove_alias("Samuel", "samo").is_err());
    }

    #[test]
    fn non_ascii_owner_keys_match_case_insensitively() {
        let mut config = Configuration::default();
        config.participants = vec!["Šimon".into(), "Peter".into()];
        config.participant_aliases =
            BTreeMap::from([("šimon".to_string(), vec!["Šimi".to_string()])]);
        config.validate().unwrap();
        assert_eq!(config.aliases_for("Šimon"), ["Šimi"]);

        let offsets = PersonOffset::build(&config).unwrap();
        assert_eq!(offsets.get("šimi"), Some(1));
        assert_eq!(offsets.get("ŠIMI"), Some(1));

        config.remove_alias("ŠIMON", "šIMI").unwrap();
        assert!(config.participant_aliases.is_empty());
    }

    #[test]
    fn invalid_start_date_fails_validation() {
        let mut config = Configuration::default();
        config.start_date = "14.09.2022".into();
        assert!(matches!(
            config.validate(),
            Err(PratacError::InvalidDate { .. })
        ));
    }

    #[test]
    fn area_edits() {
        let mut config = Configuration::default();
        config.add_area("balcony").unwrap();
        assert!(config.add_area("balcony").is_err());
        config.remove_area("toilet").unwrap();
        assert_eq!(
            config.cleaning_areas,
            vec!["shower", "kitchen", "hallway", "balcony"]
        );
        assert!(config.remove_area("garage").is_err());
    }
}
