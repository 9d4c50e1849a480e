//! Catalog file loader (flat line-oriented format)
//!
//! One card template per line: `archetype,name,attack,defense,health`
//! with integer attack, floating-point defense, and integer health.
//! Parse failures are fatal at startup - there is no usable game without
//! a catalog.

use crate::core::{Archetype, Card};
use crate::{GameError, Result};
use std::fs;
use std::path::Path;

/// A purchasable card template from the catalog
///
/// Templates are never mutated during play; players receive value copies
/// via [`CardTemplate::instantiate`].
#[derive(Debug, Clone, PartialEq)]
pub struct CardTemplate {
    pub archetype: Archetype,
    pub name: String,
    pub attack: i64,
    pub defense: f64,
    pub health: i64,
}

impl CardTemplate {
    /// Create a fresh level-1 card instance from this template
    pub fn instantiate(&self) -> Card {
        Card::new(
            self.archetype,
            self.name.clone(),
            self.attack as f64,
            self.defense,
            self.health as f64,
        )
    }
}

/// Catalog loader for the flat-file record format
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load a catalog from a file
    pub fn load_from_file(path: &Path) -> Result<CardCatalog> {
        let content = fs::read_to_string(path).map_err(GameError::IoError)?;
        Self::parse(&content)
    }

    /// Parse catalog content, one record per line
    ///
    /// Blank lines and `#` comments are allowed; anything else must be a
    /// well-formed record. Unknown archetype tags are rejected explicitly.
    pub fn parse(content: &str) -> Result<CardCatalog> {
        let mut templates = Vec::new();

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let template = Self::parse_record(line).map_err(|e| {
                GameError::MalformedRecord(format!("line {}: {e}", line_no + 1))
            })?;
            templates.push(template);
        }

        Ok(CardCatalog { templates })
    }

    fn parse_record(line: &str) -> Result<CardTemplate> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != 5 {
            return Err(GameError::MalformedRecord(format!(
                "expected 5 fields, got {}",
                fields.len()
            )));
        }

        let archetype: Archetype = fields[0].parse()?;
        let name = fields[1].to_string();
        if name.is_empty() {
            return Err(GameError::MalformedRecord("empty card name".to_string()));
        }

        let attack: i64 = fields[2].parse().map_err(|_| {
            GameError::MalformedRecord(format!("invalid attack '{}'", fields[2]))
        })?;
        let defense: f64 = fields[3].parse().map_err(|_| {
            GameError::MalformedRecord(format!("invalid defense '{}'", fields[3]))
        })?;
        let health: i64 = fields[4].parse().map_err(|_| {
            GameError::MalformedRecord(format!("invalid health '{}'", fields[4]))
        })?;

        Ok(CardTemplate {
            archetype,
            name,
            attack,
            defense,
            health,
        })
    }
}

/// The shared catalog of purchasable card templates
#[derive(Debug, Clone, Default)]
pub struct CardCatalog {
    templates: Vec<CardTemplate>,
}

impl CardCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        CardCatalog {
            templates: Vec::new(),
        }
    }

    /// Build a catalog from templates (used by tests and tools)
    pub fn from_templates(templates: Vec<CardTemplate>) -> Self {
        CardCatalog { templates }
    }

    /// Add a single template
    pub fn add_template(&mut self, template: CardTemplate) {
        self.templates.push(template);
    }

    /// All templates, in catalog order
    pub fn templates(&self) -> &[CardTemplate] {
        &self.templates
    }

    /// Look up a template by name
    pub fn get(&self, name: &str) -> Option<&CardTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// Number of templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the catalog has no templates
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_record() {
        let catalog = CatalogLoader::parse("Warrior,Iron Blade,20,0.1,90").unwrap();
        assert_eq!(catalog.len(), 1);

        let template = catalog.get("Iron Blade").unwrap();
        assert_eq!(template.archetype, Archetype::Warrior);
        assert_eq!(template.attack, 20);
        assert_eq!(template.defense, 0.1);
        assert_eq!(template.health, 90);
    }

    #[test]
    fn test_parse_skips_blanks_and_comments() {
        let content = "\n# starter set\nArcher,Longshot,15,0.05,60\n\nGuardian,Stone Sentinel,8,0.4,120\n";
        let catalog = CatalogLoader::parse(content).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_unknown_archetype_rejected() {
        let err = CatalogLoader::parse("Wizard,Sparky,10,0.1,50").unwrap_err();
        assert!(matches!(err, GameError::MalformedRecord(_)));
        assert!(err.to_string().contains("Wizard"));
    }

    #[test]
    fn test_malformed_fields_rejected() {
        assert!(CatalogLoader::parse("Warrior,Blade,20,0.1").is_err());
        assert!(CatalogLoader::parse("Warrior,Blade,twenty,0.1,90").is_err());
        assert!(CatalogLoader::parse("Warrior,Blade,20,high,90").is_err());
        assert!(CatalogLoader::parse("Warrior,,20,0.1,90").is_err());
    }

    #[test]
    fn test_instantiate_is_a_copy() {
        let catalog = CatalogLoader::parse("Assassin,Night Fang,18,0.02,40").unwrap();
        let template = catalog.get("Night Fang").unwrap();

        let mut card = template.instantiate();
        assert_eq!(card.level, 1);
        card.upgrade();
        card.take_damage(100.0);

        // The template is untouched by mutations to the instance
        assert_eq!(template.attack, 18);
        assert_eq!(template.health, 40);
    }
}
