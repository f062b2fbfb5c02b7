//! Unit template catalog loaded from TOML
//!
//! ```toml
//! [[units]]
//! name = "Swordsman"
//! unit_type = "Swordsman"
//! health = 50
//! base_attack = 20
//! cost = 10
//! attack_type = "melee"
//! attack_bonuses = { Archer = 1.5 }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::battle::units::UnitTemplate;
use crate::core::error::{Result, TacticsError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitCatalog {
    #[serde(default)]
    pub units: Vec<UnitTemplate>,
}

impl UnitCatalog {
    /// Parse and validate a catalog
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let catalog: UnitCatalog = toml::from_str(contents)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&contents)?;
        tracing::info!("Loaded {} unit templates from {:?}", catalog.units.len(), path);
        Ok(catalog)
    }

    /// Every template must cost something and have a type tag
    pub fn validate(&self) -> Result<()> {
        for template in &self.units {
            if template.unit_type.trim().is_empty() {
                return Err(TacticsError::InvalidTemplate(format!(
                    "template '{}' has an empty unit_type",
                    template.name
                )));
            }
            if template.cost == 0 {
                return Err(TacticsError::InvalidTemplate(format!(
                    "template '{}' has zero cost",
                    template.name
                )));
            }
        }
        Ok(())
    }

    pub fn templates(&self) -> &[UnitTemplate] {
        &self.units
    }

    pub fn get(&self, unit_type: &str) -> Option<&UnitTemplate> {
        self.units.iter().find(|t| t.unit_type == unit_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"
        [[units]]
        name = "Swordsman"
        unit_type = "Swordsman"
        health = 50
        base_attack = 20
        cost = 10
        attack_type = "melee"
        attack_bonuses = { Archer = 1.5 }

        [[units]]
        name = "Archer"
        unit_type = "Archer"
        health = 30
        base_attack = 25
        cost = 15
        attack_type = "ranged"
        defence_bonuses = { melee = 0.8 }
    "#;

    #[test]
    fn test_parse_catalog() {
        let catalog = UnitCatalog::from_toml_str(CATALOG).unwrap();
        assert_eq!(catalog.units.len(), 2);

        let swordsman = catalog.get("Swordsman").unwrap();
        assert_eq!(swordsman.attack_bonuses.get("Archer"), Some(&1.5));
        assert!(swordsman.defence_bonuses.is_empty());

        let archer = catalog.get("Archer").unwrap();
        assert_eq!(archer.defence_bonuses.get("melee"), Some(&0.8));
    }

    #[test]
    fn test_zero_cost_rejected() {
        let bad = r#"
            [[units]]
            name = "Ghost"
            unit_type = "Ghost"
            health = 1
            base_attack = 1
            cost = 0
            attack_type = "melee"
        "#;
        let err = UnitCatalog::from_toml_str(bad).unwrap_err();
        assert!(matches!(err, TacticsError::InvalidTemplate(_)));
    }

    #[test]
    fn test_missing_field_is_a_toml_error() {
        let err = UnitCatalog::from_toml_str("[[units]]\nname = \"X\"\n").unwrap_err();
        assert!(matches!(err, TacticsError::TomlError(_)));
    }

    #[test]
    fn test_shipped_catalog_parses() {
        let catalog = UnitCatalog::load(concat!(env!("CARGO_MANIFEST_DIR"), "/data/units.toml"))
            .expect("Should load shipped catalog");
        assert!(!catalog.units.is_empty());
    }
}
