use std::path::{Path, PathBuf};

use meem_shared::models::{Branch, Location};
use meem_shared::{Catalog, CatalogError, CatalogProvider};

#[derive(Debug, thiserror::Error)]
pub enum AssetsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, AssetsError> {
    let data = std::fs::read_to_string(path).map_err(|source| AssetsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| AssetsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and validate `locations.json` + `branches.json` from `assets_dir`.
pub fn load_catalog(assets_dir: &Path) -> Result<Catalog, AssetsError> {
    let locations: Vec<Location> = read_json(&assets_dir.join("locations.json"))?;
    let branches: Vec<Branch> = read_json(&assets_dir.join("branches.json"))?;

    let catalog = Catalog::new(locations, branches)?;

    let plottable = catalog
        .branches()
        .iter()
        .filter(|b| b.position().is_some())
        .count();
    tracing::info!(
        locations = catalog.locations().len(),
        branches = catalog.branches().len(),
        plottable,
        "Loaded branch catalog"
    );

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOCATIONS: &str = r#"[
        {"id": "kuwait", "code": "KW", "name": {"en": "Kuwait", "ar": "الكويت"}}
    ]"#;

    const BRANCHES: &str = r#"[
        {
            "id": "kuwait-city-salmiya",
            "locationId": "kuwait",
            "name": {"en": "Kuwait City - Salmiya", "ar": "مدينة الكويت - السالمية"},
            "city": {"en": "Kuwait City", "ar": "مدينة الكويت"},
            "coordinates": {"lat": 29.33, "lng": 48.07}
        },
        {
            "id": "kuwait-city-jahra",
            "locationId": "kuwait",
            "name": {"en": "Kuwait City - Jahra", "ar": "مدينة الكويت - الجهراء"},
            "city": {"en": "Kuwait City", "ar": "مدينة الكويت"}
        }
    ]"#;

    fn write_assets(locations: &str, branches: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("locations.json"), locations).unwrap();
        std::fs::write(dir.path().join("branches.json"), branches).unwrap();
        dir
    }

    #[test]
    fn test_load_catalog() {
        let dir = write_assets(LOCATIONS, BRANCHES);
        let catalog = load_catalog(dir.path()).unwrap();
        assert_eq!(catalog.locations().len(), 1);
        assert_eq!(catalog.branches_for("kuwait").len(), 2);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_catalog(dir.path()).unwrap_err();
        assert!(matches!(err, AssetsError::Read { .. }));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let dir = write_assets("[{", BRANCHES);
        let err = load_catalog(dir.path()).unwrap_err();
        assert!(matches!(err, AssetsError::Parse { .. }));
    }

    #[test]
    fn test_orphan_branch_is_catalog_error() {
        let dir = write_assets("[]", BRANCHES);
        let err = load_catalog(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            AssetsError::Catalog(CatalogError::UnknownLocation { .. })
        ));
    }

    #[test]
    fn test_bundled_catalog_is_valid() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets");
        let catalog = load_catalog(&dir).unwrap();
        assert!(catalog.location("kuwait").is_some());
        assert!(catalog.location("saudi-arabia").is_some());
        assert!(catalog.branch("riyadh-olaya").is_some());
    }
}
