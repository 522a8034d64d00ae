//! The authoritative (location, branch) choice behind the branch sidebar and
//! map, and its mirror in the page's query string.
//!
//! The query string carries catalog ids under `location` and `branch`. The
//! selection is the source of truth; the URL is derived from it after every
//! mutation.

use crate::catalog::CatalogProvider;
use crate::models::{Branch, Location};
use crate::query;

pub const LOCATION_PARAM: &str = "location";
pub const BRANCH_PARAM: &str = "branch";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("cannot select branch {0} before a location")]
    NoLocationSelected(String),
    #[error("branch {branch} belongs to {owner}, not the selected location {selected}")]
    BranchOutsideLocation {
        branch: String,
        owner: String,
        selected: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionState {
    location: Option<String>,
    branch: Option<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a selection from a query string. Ids that do not resolve in
    /// the catalog are dropped silently, and a branch is only kept when it
    /// belongs to the restored location.
    pub fn from_query<C: CatalogProvider + ?Sized>(query_str: &str, catalog: &C) -> Self {
        let pairs = query::parse_query(query_str);

        let location = query::get_param(&pairs, LOCATION_PARAM)
            .and_then(|id| catalog.location(id))
            .map(|l| l.id.clone());

        let branch = match &location {
            Some(location_id) => query::get_param(&pairs, BRANCH_PARAM)
                .and_then(|id| catalog.branch(id))
                .filter(|b| &b.location_id == location_id)
                .map(|b| b.id.clone()),
            None => None,
        };

        Self { location, branch }
    }

    pub fn location_id(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn branch_id(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    pub fn selected_location<'c, C: CatalogProvider + ?Sized>(
        &self,
        catalog: &'c C,
    ) -> Option<&'c Location> {
        self.location.as_deref().and_then(|id| catalog.location(id))
    }

    pub fn selected_branch<'c, C: CatalogProvider + ?Sized>(
        &self,
        catalog: &'c C,
    ) -> Option<&'c Branch> {
        self.branch.as_deref().and_then(|id| catalog.branch(id))
    }

    /// Select `location` and clear the branch. Re-selecting the current
    /// location also clears the branch.
    pub fn select_location(&mut self, location: &Location) {
        self.location = Some(location.id.clone());
        self.branch = None;
    }

    pub fn select_branch(&mut self, branch: &Branch) -> Result<(), SelectionError> {
        let Some(selected) = self.location.as_deref() else {
            return Err(SelectionError::NoLocationSelected(branch.id.clone()));
        };
        if branch.location_id != selected {
            return Err(SelectionError::BranchOutsideLocation {
                branch: branch.id.clone(),
                owner: branch.location_id.clone(),
                selected: selected.to_string(),
            });
        }
        self.branch = Some(branch.id.clone());
        Ok(())
    }

    /// Branches of the selected location in input order; empty when no
    /// location is selected.
    pub fn filtered_branches<'a>(&self, all: &'a [Branch]) -> Vec<&'a Branch> {
        match self.location.as_deref() {
            Some(id) => all.iter().filter(|b| b.location_id == id).collect(),
            None => Vec::new(),
        }
    }

    /// Rewrite `current_query` so its `location`/`branch` parameters match
    /// this selection. Other parameters are left untouched.
    pub fn apply_to_query(&self, current_query: &str) -> String {
        let mut pairs = query::parse_query(current_query);
        query::set_param(&mut pairs, LOCATION_PARAM, self.location.as_deref());
        query::set_param(&mut pairs, BRANCH_PARAM, self.branch.as_deref());
        query::encode_query(&pairs)
    }
}
