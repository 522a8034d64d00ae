use std::sync::Arc;

use dioxus::logger::tracing;
use dioxus::prelude::*;
use dioxus::router::Navigator;
use meem_shared::selection::SelectionState;
use meem_shared::{Branch, Catalog, CatalogProvider, Locale};

use crate::catalog_state::{use_catalog, CatalogStatus};
use crate::components::branch_filter_panel::BranchFilterPanel;
use crate::components::feedback::{ErrorNotice, LoadingIndicator};
use crate::components::map_view::MapView;
use crate::i18n::{t, Text};
use crate::layout::use_viewport_class;
use crate::route_query::RouteQuery;
use crate::Route;

#[component]
pub fn Branches(locale: Locale, query: RouteQuery) -> Element {
    let mut handle = use_catalog();

    rsx! {
        section { class: "branches-page",
            div { class: "page-heading",
                h1 { {t(locale, Text::BranchesTitle)} }
                p { {t(locale, Text::BranchesSubtitle)} }
            }
            match handle.status() {
                CatalogStatus::Loading => rsx! {
                    LoadingIndicator { message: t(locale, Text::LoadingBranches).to_string() }
                },
                CatalogStatus::Failed(_) => rsx! {
                    ErrorNotice {
                        message: t(locale, Text::DataUnavailable).to_string(),
                        retry_label: t(locale, Text::Retry).to_string(),
                        on_retry: move |_: ()| handle.retry(),
                    }
                },
                CatalogStatus::Ready(catalog) => rsx! {
                    BranchExplorer { locale, catalog, query }
                },
            }
        }
    }
}

/// Push `selection` into the address bar without adding a history entry.
/// Parameters other than `location` and `branch` survive.
fn sync_url(
    navigator: Navigator,
    locale: Locale,
    current_query: &RouteQuery,
    selection: &SelectionState,
) {
    let query = RouteQuery::parse(&selection.apply_to_query(&current_query.encoded()));
    tracing::debug!(query = %query.encoded(), "selection changed");
    if let Some(failure) = navigator.replace(Route::Branches { locale, query }) {
        tracing::warn!(?failure, "could not update the address bar");
    }
}

/// Filter panel and map over one shared selection. The selection is restored
/// from the query on load and whenever the query changes from outside (back
/// and forward, pasted links).
#[component]
fn BranchExplorer(locale: Locale, catalog: Arc<Catalog>, query: RouteQuery) -> Element {
    let navigator = use_navigator();
    let viewport = use_viewport_class();
    let panel_open = use_signal(|| true);
    let mut selection = use_signal(|| SelectionState::from_query(&query.encoded(), &*catalog));

    use_effect(use_reactive!(|query, catalog| {
        let restored = SelectionState::from_query(&query.encoded(), &*catalog);
        if *selection.peek() != restored {
            tracing::debug!(query = %query.encoded(), "selection restored from address bar");
            selection.set(restored);
        }
    }));

    let on_select_location = {
        let catalog = catalog.clone();
        let query = query.clone();
        move |id: String| {
            let Some(location) = catalog.location(&id) else {
                tracing::warn!(location = %id, "unknown location picked");
                return;
            };
            selection.write().select_location(location);
            sync_url(navigator, locale, &query, &selection.peek());
        }
    };

    let on_select_branch = {
        let catalog = catalog.clone();
        let query = query.clone();
        move |id: String| {
            let Some(branch) = catalog.branch(&id) else {
                tracing::warn!(branch = %id, "unknown branch picked");
                return;
            };
            let result = selection.write().select_branch(branch);
            match result {
                Ok(()) => sync_url(navigator, locale, &query, &selection.peek()),
                Err(err) => tracing::warn!(%err, "branch selection rejected"),
            }
        }
    };

    let current = selection();
    let filtered: Vec<Branch> = current
        .filtered_branches(catalog.branches())
        .into_iter()
        .cloned()
        .collect();
    let selected_location = current.selected_location(&*catalog).map(|l| l.id.clone());
    let selected_branch = current.selected_branch(&*catalog).map(|b| b.id.clone());

    rsx! {
        div { class: "branch-explorer {viewport().css_class()}",
            BranchFilterPanel {
                locale,
                viewport: viewport(),
                open: panel_open,
                locations: catalog.locations().to_vec(),
                branches: filtered.clone(),
                selected_location,
                selected_branch: selected_branch.clone(),
                on_select_location,
                on_select_branch: on_select_branch.clone(),
            }
            div { class: "branch-map",
                MapView {
                    locale,
                    branches: filtered,
                    selected: selected_branch,
                    on_select: on_select_branch,
                }
            }
        }
    }
}
