use std::sync::Arc;

use dioxus::logger::tracing;
use dioxus::prelude::*;
use meem_shared::{Catalog, CatalogProvider};

use crate::api::{self, ApiError};

/// Where the shared branch catalog is in its load.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogStatus {
    Loading,
    Ready(Arc<Catalog>),
    Failed(ApiError),
}

/// Handle to the catalog fetched once per page load and shared through context.
#[derive(Clone, Copy)]
pub struct CatalogHandle {
    resource: Resource<Result<Arc<Catalog>, ApiError>>,
}

impl CatalogHandle {
    pub fn status(&self) -> CatalogStatus {
        match &*self.resource.read() {
            None => CatalogStatus::Loading,
            Some(Ok(catalog)) => CatalogStatus::Ready(catalog.clone()),
            Some(Err(err)) => CatalogStatus::Failed(err.clone()),
        }
    }

    /// User-initiated retry after a failed load.
    pub fn retry(&mut self) {
        self.resource.restart();
    }
}

/// Start loading the catalog and make it available to descendants.
pub fn use_catalog_provider() -> CatalogHandle {
    let resource = use_resource(|| async {
        match api::fetch_catalog().await {
            Ok(catalog) => {
                tracing::info!(
                    locations = catalog.locations().len(),
                    branches = catalog.branches().len(),
                    "catalog loaded"
                );
                Ok(Arc::new(catalog))
            }
            Err(err) => {
                tracing::error!(%err, "catalog load failed");
                Err(err)
            }
        }
    });
    use_context_provider(|| CatalogHandle { resource })
}

pub fn use_catalog() -> CatalogHandle {
    use_context::<CatalogHandle>()
}
