//! Catalog records: universities, their canteens, and canteen menus.
//!
//! A [`Catalog`] is always validated on construction (including when it is
//! deserialized), so holders can rely on trimmed names, unique canteen IDs
//! and menu item names that are unique within their canteen.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::types::{CanteenId, Price};

/// Errors found while validating catalog data.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A required text field was blank.
    #[error("{field} cannot be empty")]
    EmptyField {
        /// Which field was blank.
        field: &'static str,
    },
    /// The same university appears twice (ignoring case).
    #[error("duplicate university: {0}")]
    DuplicateUniversity(String),
    /// Two canteens share an ID.
    #[error("duplicate canteen id: {0}")]
    DuplicateCanteenId(CanteenId),
    /// A canteen refers to a university that is not listed.
    #[error("canteen {canteen} refers to unknown university {university:?}")]
    UnknownUniversity {
        /// Offending canteen.
        canteen: CanteenId,
        /// University name as written.
        university: String,
    },
    /// A canteen lists the same item name twice.
    #[error("canteen {canteen} lists {item:?} more than once")]
    DuplicateMenuItem {
        /// Offending canteen.
        canteen: CanteenId,
        /// Duplicated item name.
        item: String,
    },
}

/// A dish a canteen sells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Display name, unique within the canteen.
    pub name: String,
    /// Unit price.
    pub price: Price,
}

impl MenuItem {
    /// Create a menu item; the name is trimmed.
    #[must_use]
    pub fn new(name: &str, price: Price) -> Self {
        Self {
            name: name.trim().to_owned(),
            price,
        }
    }
}

/// A food vendor located at one university.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canteen {
    pub id: CanteenId,
    #[serde(rename = "university")]
    pub university_name: String,
    pub name: String,
    pub address: String,
    /// Menu in display order.
    #[serde(default)]
    pub menu: Vec<MenuItem>,
}

impl Canteen {
    /// Look up a menu item by name (surrounding whitespace ignored).
    #[must_use]
    pub fn item(&self, name: &str) -> Option<&MenuItem> {
        let name = name.trim();
        self.menu.iter().find(|item| item.name == name)
    }

    /// Whether this canteen is at `university` (case-insensitive, trimmed).
    #[must_use]
    pub fn is_at(&self, university: &str) -> bool {
        same_university(&self.university_name, university)
    }
}

/// Case-insensitive comparison of university names.
#[must_use]
pub fn same_university(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// The complete read-only catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CatalogDocument")]
pub struct Catalog {
    universities: Vec<String>,
    canteens: Vec<Canteen>,
}

/// Unvalidated wire shape of a catalog (YAML seed files, JSON).
#[derive(Deserialize)]
struct CatalogDocument {
    universities: Vec<String>,
    #[serde(default)]
    canteens: Vec<Canteen>,
}

impl TryFrom<CatalogDocument> for Catalog {
    type Error = CatalogError;

    fn try_from(doc: CatalogDocument) -> Result<Self, Self::Error> {
        Self::new(doc.universities, doc.canteens)
    }
}

impl Catalog {
    /// Build a catalog, trimming text fields and checking every invariant.
    ///
    /// A canteen's university is rewritten to the spelling used in
    /// `universities`.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] encountered.
    pub fn new(universities: Vec<String>, canteens: Vec<Canteen>) -> Result<Self, CatalogError> {
        // Lowercased name to the spelling used in the university list.
        let mut seen_universities = HashMap::new();
        let universities = universities
            .into_iter()
            .map(|name| {
                let name = non_empty(&name, "university name")?;
                if seen_universities
                    .insert(name.to_lowercase(), name.clone())
                    .is_some()
                {
                    return Err(CatalogError::DuplicateUniversity(name));
                }
                Ok(name)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen_ids = HashSet::new();
        let canteens = canteens
            .into_iter()
            .map(|canteen| {
                if !seen_ids.insert(canteen.id) {
                    return Err(CatalogError::DuplicateCanteenId(canteen.id));
                }
                normalize_canteen(canteen, &seen_universities)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            universities,
            canteens,
        })
    }

    /// University names in display order.
    #[must_use]
    pub fn universities(&self) -> &[String] {
        &self.universities
    }

    /// All canteens in display order.
    #[must_use]
    pub fn canteens(&self) -> &[Canteen] {
        &self.canteens
    }

    /// Canteens located at `university`.
    pub fn canteens_at<'a>(&'a self, university: &'a str) -> impl Iterator<Item = &'a Canteen> {
        self.canteens.iter().filter(move |c| c.is_at(university))
    }

    /// Find a canteen by ID.
    #[must_use]
    pub fn canteen(&self, id: CanteenId) -> Option<&Canteen> {
        self.canteens.iter().find(|c| c.id == id)
    }
}

fn non_empty(value: &str, field: &'static str) -> Result<String, CatalogError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::EmptyField { field });
    }
    Ok(trimmed.to_owned())
}

fn normalize_canteen(
    canteen: Canteen,
    universities: &HashMap<String, String>,
) -> Result<Canteen, CatalogError> {
    let university_name = non_empty(&canteen.university_name, "canteen university")?;
    let Some(university_name) = universities.get(&university_name.to_lowercase()).cloned() else {
        return Err(CatalogError::UnknownUniversity {
            canteen: canteen.id,
            university: university_name,
        });
    };

    let mut seen_items = HashSet::new();
    let menu = canteen
        .menu
        .into_iter()
        .map(|item| {
            let name = non_empty(&item.name, "menu item name")?;
            if !seen_items.insert(name.clone()) {
                return Err(CatalogError::DuplicateMenuItem {
                    canteen: canteen.id,
                    item: name,
                });
            }
            Ok(MenuItem {
                name,
                price: item.price,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Canteen {
        id: canteen.id,
        university_name,
        name: non_empty(&canteen.name, "canteen name")?,
        address: non_empty(&canteen.address, "canteen address")?,
        menu,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn sjt() -> Canteen {
        Canteen {
            id: CanteenId::new(1),
            university_name: "Vellore Institute of Technology".to_owned(),
            name: " SJT Canteen ".to_owned(),
            address: "SJT Building".to_owned(),
            menu: vec![
                MenuItem::new("Veg Fried Rice", Price::from(120)),
                MenuItem::new("Gobi Manchurian ", Price::from(110)),
            ],
        }
    }

    #[test]
    fn test_new_trims_fields() {
        let catalog =
            Catalog::new(vec!["Vellore Institute of Technology".into()], vec![sjt()]).unwrap();
        let canteen = catalog.canteen(CanteenId::new(1)).unwrap();
        assert_eq!(canteen.name, "SJT Canteen");
        assert_eq!(canteen.menu[1].name, "Gobi Manchurian");
    }

    #[test]
    fn test_canteens_at_ignores_case() {
        let catalog = Catalog::new(
            vec!["Vellore Institute of Technology".into(), "IIT Madras".into()],
            vec![sjt()],
        )
        .unwrap();
        assert_eq!(
            catalog
                .canteens_at("vellore institute of TECHNOLOGY")
                .count(),
            1
        );
        assert_eq!(catalog.canteens_at("IIT Madras").count(), 0);
        assert_eq!(catalog.canteens_at("Vellore").count(), 0);
    }

    #[test]
    fn test_item_lookup() {
        let canteen = sjt();
        assert!(canteen.item(" Veg Fried Rice").is_some());
        assert!(canteen.item("veg fried rice").is_none());
    }

    #[test]
    fn test_rejects_duplicate_items() {
        let mut canteen = sjt();
        canteen
            .menu
            .push(MenuItem::new("Veg Fried Rice", Price::from(99)));
        let err =
            Catalog::new(vec!["Vellore Institute of Technology".into()], vec![canteen]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateMenuItem { .. }));
    }

    #[test]
    fn test_rejects_unknown_university_and_duplicate_ids() {
        let err = Catalog::new(vec!["SRM University".into()], vec![sjt()]).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownUniversity { .. }));

        let err = Catalog::new(
            vec!["Vellore Institute of Technology".into()],
            vec![sjt(), sjt()],
        )
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateCanteenId(CanteenId::new(1)));
    }

    #[test]
    fn test_rejects_blank_address() {
        let mut canteen = sjt();
        canteen.address = "  ".to_owned();
        let err =
            Catalog::new(vec!["Vellore Institute of Technology".into()], vec![canteen]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::EmptyField {
                field: "canteen address"
            }
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{
            "universities": ["IIT Madras"],
            "canteens": [{
                "id": 6, "university": "iit madras", "name": "Ram's Cafe",
                "address": "Hostel Zone",
                "menu": [{"name": "Idli Sambar", "price": 40}]
            }]
        }"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.canteens()[0].menu[0].price, Price::from(40));
        assert_eq!(catalog.canteens()[0].university_name, "IIT Madras");

        let bad = r#"{"universities": ["A", "a"]}"#;
        assert!(serde_json::from_str::<Catalog>(bad).is_err());
    }
}
