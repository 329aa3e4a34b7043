//! Hair profile catalog.
//!
//! The built-in catalog lives in `data/profiles.toml` and is embedded into the
//! binary. Catalogs are validated when loaded, so a profile whose cycle weeks
//! don't line up with its wash days is rejected before any calendar is built.

use crate::schedule::MAX_WASH_DAYS;
use crate::types::*;
use crate::{Error, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

const DEFAULT_CATALOG_TOML: &str = include_str!("../data/profiles.toml");

/// Cached default catalog - parsed and validated once per process
static DEFAULT_CATALOG: Lazy<std::result::Result<Catalog, String>> =
    Lazy::new(|| Catalog::from_toml_str(DEFAULT_CATALOG_TOML).map_err(|e| e.to_string()));

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> Result<&'static Catalog> {
    DEFAULT_CATALOG
        .as_ref()
        .map_err(|msg| Error::CatalogValidation(msg.clone()))
}

/// Parses and validates the embedded catalog without touching the cache
///
/// **Note**: For production use, prefer `get_default_catalog()`.
pub fn build_default_catalog() -> Result<Catalog> {
    Catalog::from_toml_str(DEFAULT_CATALOG_TOML)
}

/// On-disk catalog document
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    profiles: Vec<HairProfile>,
}

/// The immutable collection of hair profiles
#[derive(Clone, Debug)]
pub struct Catalog {
    pub profiles: Vec<HairProfile>,
}

impl Catalog {
    /// Parse a catalog document and reject it if validation finds problems
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(contents)?;
        let catalog = Catalog {
            profiles: file.profiles,
        };

        let errors = catalog.validate();
        if !errors.is_empty() {
            for error in &errors {
                tracing::error!("Catalog entry rejected: {}", error);
            }
            return Err(Error::CatalogValidation(errors.join("; ")));
        }

        tracing::debug!("Loaded catalog with {} profiles", catalog.profiles.len());
        Ok(catalog)
    }

    /// Load a catalog from a TOML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&contents)?;
        tracing::info!(
            "Loaded catalog from {:?} ({} profiles)",
            path,
            catalog.profiles.len()
        );
        Ok(catalog)
    }

    /// Look up a profile by id
    pub fn get(&self, id: &str) -> Option<&HairProfile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// Validate the catalog for consistency
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen_ids = HashSet::new();
        let mut seen_keys = HashSet::new();

        for profile in &self.profiles {
            let id = &profile.id;

            if id.is_empty() {
                errors.push("Profile has empty ID".to_string());
            } else if !seen_ids.insert(id.as_str()) {
                errors.push(format!("Duplicate profile ID '{}'", id));
            }

            let key = (
                profile.curvature,
                profile.oiliness,
                profile.porosity,
                profile.has_chemistry,
            );
            if !seen_keys.insert(key) {
                errors.push(format!(
                    "Profile '{}' repeats characteristics ({}, {}, {}, chemistry={})",
                    id, key.0, key.1, key.2, key.3
                ));
            }

            let wash_days = profile.wash_days_per_week;
            if !(1..=7).contains(&wash_days) {
                errors.push(format!(
                    "Profile '{}': wash_days_per_week {} outside 1-7",
                    id, wash_days
                ));
            } else if wash_days > MAX_WASH_DAYS as i32 {
                errors.push(format!(
                    "Profile '{}': wash_days_per_week {} exceeds the {} wash days a week can hold",
                    id, wash_days, MAX_WASH_DAYS
                ));
            }

            for week in CycleWeek::ALL {
                let len = profile.cycle.week(week).len();
                if len as i32 != wash_days {
                    errors.push(format!(
                        "Profile '{}': cycle week {} has {} treatments but {} wash days",
                        id, week, len, wash_days
                    ));
                }
            }

            if profile.products.shampoo.is_empty() {
                errors.push(format!("Profile '{}' has empty shampoo", id));
            }
        }

        errors
    }

    /// Exact lookup by characteristic tuple
    ///
    /// Returns `None` for tuples the catalog doesn't model. There is no
    /// nearest-neighbor fallback; callers decide what to do (e.g. re-intake).
    pub fn find_profile(
        &self,
        curvature: Curvature,
        oiliness: Oiliness,
        porosity: Porosity,
        has_chemistry: bool,
    ) -> Option<&HairProfile> {
        let found = self
            .profiles
            .iter()
            .find(|p| p.matches(curvature, oiliness, porosity, has_chemistry));

        match found {
            Some(profile) => tracing::debug!("Matched profile {}", profile.id),
            None => tracing::info!(
                "No profile for ({}, {}, {}, chemistry={})",
                curvature,
                oiliness,
                porosity,
                has_chemistry
            ),
        }

        found
    }

    /// Classify porosity when needed, then look up the profile
    pub fn match_profile(&self, characteristics: &HairCharacteristics) -> Option<&HairProfile> {
        self.find_profile(
            characteristics.curvature,
            characteristics.oiliness,
            characteristics.resolved_porosity(),
            characteristics.has_chemistry(),
        )
    }
}

/// Exact lookup against a catalog; see [`Catalog::find_profile`]
pub fn find_profile(
    catalog: &Catalog,
    curvature: Curvature,
    oiliness: Oiliness,
    porosity: Porosity,
    has_chemistry: bool,
) -> Option<&HairProfile> {
    catalog.find_profile(curvature, oiliness, porosity, has_chemistry)
}

/// Intake answers to profile; see [`Catalog::match_profile`]
pub fn match_profile<'a>(
    catalog: &'a Catalog,
    characteristics: &HairCharacteristics,
) -> Option<&'a HairProfile> {
    catalog.match_profile(characteristics)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> &'static Catalog {
        get_default_catalog().unwrap()
    }

    #[test]
    fn test_catalog_loads() {
        assert_eq!(catalog().profiles.len(), 72);
    }

    #[test]
    fn test_default_catalog_validates() {
        let errors = build_default_catalog().unwrap().validate();
        assert!(
            errors.is_empty(),
            "Default catalog has validation errors: {:?}",
            errors
        );
    }

    #[test]
    fn test_every_tuple_is_unique() {
        let keys: HashSet<_> = catalog()
            .profiles
            .iter()
            .map(|p| (p.curvature, p.oiliness, p.porosity, p.has_chemistry))
            .collect();
        assert_eq!(keys.len(), catalog().profiles.len());
    }

    #[test]
    fn test_reconstruction_cycles_have_a_mask() {
        for profile in &catalog().profiles {
            let uses_reconstruction = CycleWeek::ALL
                .iter()
                .any(|w| profile.cycle.week(*w).contains(&Treatment::Reconstruction));
            if uses_reconstruction {
                assert!(
                    profile.products.reconstruction_mask.is_some(),
                    "{} schedules reconstruction without a mask",
                    profile.id
                );
            }
        }
    }

    #[test]
    fn test_find_profile_exact_match() {
        let profile = catalog()
            .find_profile(Curvature::Wavy, Oiliness::Oily, Porosity::Medium, false)
            .unwrap();
        assert_eq!(profile.id, "wavy-oily-medium-natural");
        assert_eq!(profile.wash_days_per_week, 3);
        assert!(profile.needs_refresh);
    }

    #[test]
    fn test_unmodeled_tuple_is_not_found() {
        assert!(catalog()
            .find_profile(Curvature::Straight, Oiliness::Mixed, Porosity::Low, true)
            .is_none());
        assert!(catalog()
            .find_profile(Curvature::Coily, Oiliness::Dry, Porosity::High, false)
            .is_none());
    }

    #[test]
    fn test_exactly_24_tuples_unmodeled() {
        let mut missing = 0;
        for c in Curvature::ALL {
            for o in Oiliness::ALL {
                for p in Porosity::ALL {
                    for chem in [false, true] {
                        if catalog().find_profile(*c, *o, *p, chem).is_none() {
                            missing += 1;
                        }
                    }
                }
            }
        }
        assert_eq!(missing, 24);
    }

    #[test]
    fn test_match_profile_classifies_unknown_porosity() {
        let answers = HairCharacteristics {
            curvature: Curvature::Curly,
            oiliness: Oiliness::Dry,
            porosity: None,
            chemical_treatments: ChemicalTreatment::Bleaching,
            heat_tool_usage: HeatToolUsage::Never,
            hair_texture: HairTexture::Fine,
        };
        let profile = match_profile(catalog(), &answers).unwrap();
        assert_eq!(profile.id, "curly-dry-high-treated");
    }

    #[test]
    fn test_match_profile_prefers_stated_porosity() {
        let answers = HairCharacteristics {
            curvature: Curvature::Straight,
            oiliness: Oiliness::Normal,
            porosity: Some(Porosity::Medium),
            chemical_treatments: ChemicalTreatment::None,
            heat_tool_usage: HeatToolUsage::Never,
            hair_texture: HairTexture::Fine,
        };
        let profile = match_profile(catalog(), &answers).unwrap();
        assert_eq!(profile.porosity, Porosity::Medium);
    }

    #[test]
    fn test_get_by_id() {
        assert!(catalog().get("coily-dry-low-natural").is_some());
        assert!(catalog().get("nope").is_none());
    }

    const ONE_PROFILE: &str = r#"
[[profiles]]
id = "test"
curvature = "wavy"
oiliness = "normal"
porosity = "medium"
has_chemistry = false
wash_days_per_week = 2
needs_refresh = true

[profiles.cycle]
week1 = ["hydration", "nutrition"]
week2 = ["nutrition", "hydration"]
week3 = ["hydration"]

[profiles.products]
shampoo = "Gentle shampoo"
hydration_mask = "Hydration mask"
nutrition_mask = "Nutrition mask"
leave_in = "Leave-in"
finisher = "Gel"
"#;

    #[test]
    fn test_short_cycle_week_is_rejected() {
        let err = Catalog::from_toml_str(ONE_PROFILE).unwrap_err();
        match err {
            Error::CatalogValidation(msg) => {
                assert!(msg.contains("cycle week 3 has 1 treatments but 2 wash days"))
            }
            other => panic!("Expected CatalogValidation, got {:?}", other),
        }
    }

    #[test]
    fn test_unplaceable_wash_days_rejected() {
        let doc = ONE_PROFILE
            .replace("wash_days_per_week = 2", "wash_days_per_week = 6")
            .replace(r#"week3 = ["hydration"]"#, r#"week3 = ["hydration", "nutrition"]"#);
        let catalog = Catalog {
            profiles: toml::from_str::<CatalogFile>(&doc).unwrap().profiles,
        };
        let errors = catalog.validate();
        assert!(errors.iter().any(|e| e.contains("exceeds")));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let fixed = ONE_PROFILE.replace(
            r#"week3 = ["hydration"]"#,
            r#"week3 = ["hydration", "hydration"]"#,
        );
        let doc = format!("{}\n{}", fixed, fixed);
        let err = Catalog::from_toml_str(&doc).unwrap_err().to_string();
        assert!(err.contains("Duplicate profile ID 'test'"));
        assert!(err.contains("repeats characteristics"));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("catalog.toml");
        let fixed = ONE_PROFILE.replace(
            r#"week3 = ["hydration"]"#,
            r#"week3 = ["nutrition", "hydration"]"#,
        );
        std::fs::write(&path, fixed).unwrap();

        let catalog = Catalog::load_from(&path).unwrap();
        assert_eq!(catalog.profiles.len(), 1);
        assert_eq!(catalog.profiles[0].products.conditioner, None);
    }
}
