use std::collections::HashSet;

use crate::models::{Branch, Location};

/// Read-only source of locations and branches.
///
/// Pages and components receive a provider instead of reaching for a global
/// list, so tests can hand in fixtures.
pub trait CatalogProvider {
    fn locations(&self) -> &[Location];
    fn branches(&self) -> &[Branch];

    fn location(&self, id: &str) -> Option<&Location> {
        self.locations().iter().find(|l| l.id == id)
    }

    fn branch(&self, id: &str) -> Option<&Branch> {
        self.branches().iter().find(|b| b.id == id)
    }

    /// Branches owned by `location_id`, in catalog order.
    fn branches_for(&self, location_id: &str) -> Vec<&Branch> {
        self.branches()
            .iter()
            .filter(|b| b.location_id == location_id)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate location id: {0}")]
    DuplicateLocation(String),
    #[error("duplicate branch id: {0}")]
    DuplicateBranch(String),
    #[error("branch {branch} references unknown location {location}")]
    UnknownLocation { branch: String, location: String },
}

/// A validated set of locations and branches.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    locations: Vec<Location>,
    branches: Vec<Branch>,
}

impl Catalog {
    /// Build a catalog, checking id uniqueness and that every branch points
    /// at a known location.
    pub fn new(locations: Vec<Location>, branches: Vec<Branch>) -> Result<Self, CatalogError> {
        let mut location_ids = HashSet::new();
        for location in &locations {
            if !location_ids.insert(location.id.as_str()) {
                return Err(CatalogError::DuplicateLocation(location.id.clone()));
            }
        }

        let mut branch_ids = HashSet::new();
        for branch in &branches {
            if !branch_ids.insert(branch.id.as_str()) {
                return Err(CatalogError::DuplicateBranch(branch.id.clone()));
            }
            if !location_ids.contains(branch.location_id.as_str()) {
                return Err(CatalogError::UnknownLocation {
                    branch: branch.id.clone(),
                    location: branch.location_id.clone(),
                });
            }
        }

        Ok(Self {
            locations,
            branches,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl CatalogProvider for Catalog {
    fn locations(&self) -> &[Location] {
        &self.locations
    }

    fn branches(&self) -> &[Branch] {
        &self.branches
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::models::{Coordinates, LocalizedText, OpeningHours};

    pub fn location(id: &str, code: &str, en: &str, ar: &str) -> Location {
        Location {
            id: id.to_string(),
            code: code.to_string(),
            name: LocalizedText::new(en, ar),
            flag: None,
        }
    }

    pub fn branch(
        id: &str,
        location_id: &str,
        en: &str,
        ar: &str,
        coords: Option<(f64, f64)>,
    ) -> Branch {
        Branch {
            id: id.to_string(),
            location_id: location_id.to_string(),
            name: LocalizedText::new(en, ar),
            address: Some(LocalizedText::new(format!("{en} street"), format!("شارع {ar}"))),
            city: LocalizedText::new("City", "مدينة"),
            coordinates: coords.map(|(lat, lng)| Coordinates {
                lat: Some(lat),
                lng: Some(lng),
            }),
            phone: Some("+965 2222 3333".to_string()),
            hours: Some(OpeningHours {
                open: "08:00".to_string(),
                close: "23:00".to_string(),
            }),
        }
    }

    /// Two markets; Kuwait has one plottable and one unplottable branch.
    pub fn catalog() -> Catalog {
        Catalog::new(
            vec![
                location(
                    "saudi-arabia",
                    "SA",
                    "Saudi Arabia",
                    "المملكة العربية السعودية",
                ),
                location("kuwait", "KW", "Kuwait", "الكويت"),
            ],
            vec![
                branch(
                    "riyadh-olaya",
                    "saudi-arabia",
                    "Riyadh - Olaya",
                    "الرياض - العليا",
                    Some((24.7136, 46.6753)),
                ),
                branch(
                    "kuwait-city-salmiya",
                    "kuwait",
                    "Kuwait City - Salmiya",
                    "مدينة الكويت - السالمية",
                    Some((29.33, 48.07)),
                ),
                branch(
                    "kuwait-city-jahra",
                    "kuwait",
                    "Kuwait City - Jahra",
                    "مدينة الكويت - الجهراء",
                    None,
                ),
                branch(
                    "jeddah-tahlia",
                    "saudi-arabia",
                    "Jeddah - Tahlia",
                    "جدة - التحلية",
                    None,
                ),
            ],
        )
        .unwrap()
    }
}
