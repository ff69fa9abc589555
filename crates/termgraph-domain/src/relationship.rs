//! Relationship catalog - the registry of edge kinds between terms

use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Name of the default hierarchical relationship
pub const IS_A: &str = "is_a";

/// Errors raised by catalog construction and lookup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Lookup of a relationship the catalog does not declare
    #[error("Unknown relationship: {0}")]
    UnknownRelationship(String),

    /// Catalog entries violate complement symmetry or direction pairing
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),
}

/// Hierarchy direction of a relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Parent to child (e.g. `can_be`)
    TopDown,

    /// Child to parent (e.g. `is_a`)
    BottomUp,

    /// Not part of the hierarchy
    None,
}

impl Direction {
    /// The direction a complement relationship must have
    pub fn opposite(&self) -> Self {
        match self {
            Direction::TopDown => Direction::BottomUp,
            Direction::BottomUp => Direction::TopDown,
            Direction::None => Direction::None,
        }
    }
}

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship name as it appears in term relations
    pub name: String,

    /// Hierarchy direction
    pub direction: Direction,

    /// Name of the inverse relationship, if any
    pub complement: Option<String>,
}

/// Immutable registry of relationships
///
/// Built once (usually through [`RelationshipCatalog::standard`] or the
/// builder) and shared behind an `Arc` by every component that needs it.
///
/// # Examples
///
/// ```
/// use termgraph_domain::{Direction, RelationshipCatalog};
///
/// let catalog = RelationshipCatalog::standard();
/// assert_eq!(catalog.direction_of("is_a").unwrap(), Direction::BottomUp);
/// assert_eq!(catalog.complement_of("is_a").unwrap(), Some("can_be"));
/// assert!(catalog.direction_of("eats").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipCatalog {
    entries: BTreeMap<String, Relationship>,
    default_relationship: String,
}

impl RelationshipCatalog {
    /// Start an empty catalog
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// The usual OBO hierarchy relationships
    pub fn standard() -> Self {
        let builder = Self::builder()
            .pair(IS_A, "can_be")
            .pair("part_of", "has_part")
            .pair("develops_from", "develops_into")
            .single("regulates", Direction::None)
            .default_relationship(IS_A);

        // Statically known to satisfy the symmetry checks
        match builder.build() {
            Ok(catalog) => catalog,
            Err(e) => unreachable!("standard catalog is well-formed: {}", e),
        }
    }

    /// Look up an entry
    pub fn get(&self, name: &str) -> Result<&Relationship, CatalogError> {
        self.entries
            .get(name)
            .ok_or_else(|| CatalogError::UnknownRelationship(name.to_string()))
    }

    /// Whether the catalog declares `name`
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Direction of a relationship
    pub fn direction_of(&self, name: &str) -> Result<Direction, CatalogError> {
        self.get(name).map(|r| r.direction)
    }

    /// Complement of a relationship
    pub fn complement_of(&self, name: &str) -> Result<Option<&str>, CatalogError> {
        self.get(name).map(|r| r.complement.as_deref())
    }

    /// Names of every child-to-parent relationship
    pub fn all_bottomup(&self) -> BTreeSet<&str> {
        self.with_direction(Direction::BottomUp)
    }

    /// Names of every parent-to-child relationship
    pub fn all_topdown(&self) -> BTreeSet<&str> {
        self.with_direction(Direction::TopDown)
    }

    /// The relationship written without a `relationship:` prefix in text export
    pub fn default_relationship(&self) -> &str {
        &self.default_relationship
    }

    /// Iterate entries in name order
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.entries.values()
    }

    fn with_direction(&self, direction: Direction) -> BTreeSet<&str> {
        self.entries
            .values()
            .filter(|r| r.direction == direction)
            .map(|r| r.name.as_str())
            .collect()
    }
}

impl Default for RelationshipCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Builder for custom catalogs
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    entries: Vec<Relationship>,
    default_relationship: Option<String>,
}

impl CatalogBuilder {
    /// Declare a complementary pair
    pub fn pair(mut self, bottomup: impl Into<String>, topdown: impl Into<String>) -> Self {
        let bottomup = bottomup.into();
        let topdown = topdown.into();
        self.entries.push(Relationship {
            name: bottomup.clone(),
            direction: Direction::BottomUp,
            complement: Some(topdown.clone()),
        });
        self.entries.push(Relationship {
            name: topdown,
            direction: Direction::TopDown,
            complement: Some(bottomup),
        });
        self
    }

    /// Declare a relationship without complement
    pub fn single(mut self, name: impl Into<String>, direction: Direction) -> Self {
        self.entries.push(Relationship {
            name: name.into(),
            direction,
            complement: None,
        });
        self
    }

    /// Declare a raw entry (checked in [`CatalogBuilder::build`])
    pub fn entry(mut self, relationship: Relationship) -> Self {
        self.entries.push(relationship);
        self
    }

    /// Set the default hierarchical relationship
    pub fn default_relationship(mut self, name: impl Into<String>) -> Self {
        self.default_relationship = Some(name.into());
        self
    }

    /// Validate and freeze the catalog
    ///
    /// # Errors
    /// Returns [`CatalogError::InvalidCatalog`] on duplicate names, dangling
    /// or asymmetric complements, or mismatched complement directions.
    pub fn build(self) -> Result<RelationshipCatalog, CatalogError> {
        let mut entries = BTreeMap::new();
        for relationship in self.entries {
            let name = relationship.name.clone();
            if entries.insert(name.clone(), relationship).is_some() {
                return Err(CatalogError::InvalidCatalog(format!(
                    "duplicate relationship '{}'",
                    name
                )));
            }
        }

        for relationship in entries.values() {
            let Some(complement) = &relationship.complement else {
                continue;
            };
            let other = entries.get(complement).ok_or_else(|| {
                CatalogError::InvalidCatalog(format!(
                    "'{}' names undeclared complement '{}'",
                    relationship.name, complement
                ))
            })?;
            if other.complement.as_deref() != Some(relationship.name.as_str()) {
                return Err(CatalogError::InvalidCatalog(format!(
                    "complement of '{}' does not point back",
                    relationship.name
                )));
            }
            if other.direction != relationship.direction.opposite() {
                return Err(CatalogError::InvalidCatalog(format!(
                    "'{}' and '{}' must have opposite directions",
                    relationship.name, complement
                )));
            }
        }

        let default_relationship = self
            .default_relationship
            .unwrap_or_else(|| IS_A.to_string());

        Ok(RelationshipCatalog {
            entries,
            default_relationship,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_lookup() {
        let catalog = RelationshipCatalog::standard();
        assert_eq!(catalog.direction_of("part_of").unwrap(), Direction::BottomUp);
        assert_eq!(catalog.direction_of("has_part").unwrap(), Direction::TopDown);
        assert_eq!(catalog.complement_of("has_part").unwrap(), Some("part_of"));
        assert_eq!(catalog.complement_of("regulates").unwrap(), None);
        assert_eq!(catalog.default_relationship(), "is_a");
    }

    #[test]
    fn test_unknown_relationship_is_error() {
        let catalog = RelationshipCatalog::standard();
        assert_eq!(
            catalog.complement_of("eats"),
            Err(CatalogError::UnknownRelationship("eats".to_string()))
        );
    }

    #[test]
    fn test_direction_sets() {
        let catalog = RelationshipCatalog::standard();
        let bottomup = catalog.all_bottomup();
        let topdown = catalog.all_topdown();

        assert!(bottomup.contains("is_a"));
        assert!(topdown.contains("can_be"));
        assert!(bottomup.is_disjoint(&topdown));
        assert!(!bottomup.contains("regulates"));
    }

    #[test]
    fn test_every_complement_is_symmetric() {
        let catalog = RelationshipCatalog::standard();
        for relationship in catalog.iter() {
            if let Some(complement) = &relationship.complement {
                let other = catalog.get(complement).unwrap();
                assert_eq!(other.complement.as_deref(), Some(relationship.name.as_str()));
                assert_eq!(other.direction, relationship.direction.opposite());
            }
        }
    }

    #[test]
    fn test_asymmetric_complement_rejected() {
        let result = RelationshipCatalog::builder()
            .entry(Relationship {
                name: "a".into(),
                direction: Direction::BottomUp,
                complement: Some("b".into()),
            })
            .single("b", Direction::TopDown)
            .build();
        assert!(matches!(result, Err(CatalogError::InvalidCatalog(_))));
    }

    #[test]
    fn test_same_direction_complement_rejected() {
        let result = RelationshipCatalog::builder()
            .entry(Relationship {
                name: "a".into(),
                direction: Direction::BottomUp,
                complement: Some("b".into()),
            })
            .entry(Relationship {
                name: "b".into(),
                direction: Direction::BottomUp,
                complement: Some("a".into()),
            })
            .build();
        assert!(matches!(result, Err(CatalogError::InvalidCatalog(_))));
    }

    #[test]
    fn test_duplicate_rejected() {
        let result = RelationshipCatalog::builder()
            .single("x", Direction::None)
            .single("x", Direction::None)
            .build();
        assert!(result.is_err());
    }
}
