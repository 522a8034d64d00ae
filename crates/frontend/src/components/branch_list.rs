use dioxus::prelude::*;
use meem_shared::{Branch, Locale};

use crate::a11y::on_activate;
use crate::i18n::{t, Text};

/// Which of the three list states to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchListState {
    NoLocation,
    Empty,
    Populated,
}

impl BranchListState {
    pub fn of(has_location: bool, branch_count: usize) -> Self {
        match (has_location, branch_count) {
            (false, _) => BranchListState::NoLocation,
            (true, 0) => BranchListState::Empty,
            (true, _) => BranchListState::Populated,
        }
    }
}

#[component]
pub fn BranchList(
    locale: Locale,
    has_location: bool,
    branches: Vec<Branch>,
    selected: Option<String>,
    on_select: EventHandler<String>,
) -> Element {
    match BranchListState::of(has_location, branches.len()) {
        BranchListState::NoLocation => rsx! {
            div { class: "branch-list-placeholder", {t(locale, Text::NoLocationSelected)} }
        },
        BranchListState::Empty => rsx! {
            div { class: "branch-list-empty", {t(locale, Text::NoBranchesAvailable)} }
        },
        BranchListState::Populated => rsx! {
            div { class: "branch-list",
                h3 { class: "panel-heading", {t(locale, Text::SelectBranch)} }
                div { class: "branch-cards", role: "list",
                    for branch in branches {
                        BranchCard {
                            key: "{branch.id}",
                            locale,
                            is_selected: selected.as_deref() == Some(branch.id.as_str()),
                            branch: branch.clone(),
                            on_select,
                        }
                    }
                }
            }
        },
    }
}

#[component]
fn BranchCard(
    locale: Locale,
    is_selected: bool,
    branch: Branch,
    on_select: EventHandler<String>,
) -> Element {
    let class = if is_selected {
        "branch-card selected"
    } else {
        "branch-card"
    };
    let id = branch.id.clone();
    let key_id = branch.id.clone();

    rsx! {
        div {
            class: "{class}",
            role: "button",
            tabindex: "0",
            "aria-pressed": "{is_selected}",
            onclick: move |_| on_select.call(id.clone()),
            onkeydown: on_activate(move || on_select.call(key_id.clone())),
            div { class: "branch-card-name", {branch.name.get(locale)} }
            if let Some(address) = branch.address_in(locale) {
                div { class: "branch-card-address", "{address}" }
            }
        }
    }
}
