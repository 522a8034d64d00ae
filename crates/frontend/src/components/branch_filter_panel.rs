use dioxus::prelude::*;
use meem_shared::{Branch, Locale, Location};

use crate::components::branch_list::BranchList;
use crate::components::location_selector::LocationSelector;
use crate::i18n::{t, Text};
use crate::layout::ViewportClass;

/// Location choices plus the branches of the chosen location.
///
/// Docked on wide screens. On medium screens it slides in over a backdrop and
/// on narrow screens it is a bottom sheet; both close from the backdrop or the
/// close button and reopen from a floating toggle.
#[component]
pub fn BranchFilterPanel(
    locale: Locale,
    viewport: ViewportClass,
    open: Signal<bool>,
    locations: Vec<Location>,
    branches: Vec<Branch>,
    selected_location: Option<String>,
    selected_branch: Option<String>,
    on_select_location: EventHandler<String>,
    on_select_branch: EventHandler<String>,
) -> Element {
    let docked = viewport.is_docked();
    let is_open = docked || open();
    let state_class = if is_open { "open" } else { "closed" };
    let has_location = selected_location.is_some();

    rsx! {
        div { class: "branch-panel {viewport.css_class()} {state_class}",
            if !docked && is_open {
                div {
                    class: "panel-backdrop",
                    "aria-hidden": "true",
                    onclick: move |_| open.set(false),
                }
            }
            if !docked && !is_open {
                button {
                    class: "panel-toggle",
                    "aria-expanded": "false",
                    onclick: move |_| open.set(true),
                    {t(locale, Text::ShowBranches)}
                }
            }
            if is_open {
                aside {
                    class: "branch-panel-body",
                    "aria-label": t(locale, Text::BranchesTitle),
                    if !docked {
                        button {
                            class: "panel-close",
                            "aria-label": t(locale, Text::HideBranches),
                            "aria-expanded": "true",
                            onclick: move |_| open.set(false),
                            "×"
                        }
                    }
                    LocationSelector {
                        locale,
                        locations,
                        selected: selected_location,
                        on_select: on_select_location,
                    }
                    BranchList {
                        locale,
                        has_location,
                        branches,
                        selected: selected_branch,
                        on_select: on_select_branch,
                    }
                }
            }
        }
    }
}
