use std::sync::Arc;

use dioxus::logger::tracing;
use dioxus::prelude::*;
use meem_shared::wizard::{
    DetailView, EscapeOutcome, StepStatus, WizardAction, WizardOutcome, WizardState, WizardStep,
};
use meem_shared::{Branch, Catalog, CatalogProvider, Locale};

use crate::a11y::{on_activate, use_escape_key};
use crate::components::contact_view::ContactView;
use crate::components::map_view::{build_pins, LeafletBranchMap};
use crate::i18n::{t, Text};
use crate::route_query::RouteQuery;
use crate::scroll_lock::use_scroll_lock;
use crate::Route;

const TITLE_ID: &str = "location-modal-title";

fn action_text(action: WizardAction) -> (Text, Text, &'static str) {
    match action {
        WizardAction::Map => (Text::ActionMapTitle, Text::ActionMapDescription, "🗺️"),
        WizardAction::Contact => (
            Text::ActionContactTitle,
            Text::ActionContactDescription,
            "📞",
        ),
        WizardAction::Offers => (Text::ActionOffersTitle, Text::ActionOffersDescription, "🏷️"),
    }
}

fn step_label(step: WizardStep) -> Text {
    match step {
        WizardStep::ChooseBranch => Text::StepChooseBranch,
        WizardStep::ChooseAction => Text::StepChooseAction,
    }
}

/// Two-step wizard for one location: pick a branch, then see it on a map,
/// get its contact details or jump to its offers.
///
/// Escape steps back and only closes from the first step. The page behind
/// does not scroll while the modal is open. Closing drops the wizard state.
#[component]
pub fn LocationModal(
    locale: Locale,
    catalog: Arc<Catalog>,
    location_id: String,
    on_close: EventHandler<()>,
) -> Element {
    use_scroll_lock();
    let navigator = use_navigator();
    let mut wizard = use_signal(|| WizardState::open(location_id.clone()));

    let state = wizard.read().clone();
    let title = catalog
        .location(state.location_id())
        .map(|l| l.name.get(locale).to_string())
        .unwrap_or_default();
    let branches: Vec<Branch> = state.branches(&*catalog).into_iter().cloned().collect();
    let selected = state.selected_branch(&*catalog).cloned();
    let steps: Vec<(WizardStep, StepStatus)> = [WizardStep::ChooseBranch, WizardStep::ChooseAction]
        .into_iter()
        .map(|step| (step, state.step_status(step)))
        .collect();

    let on_branch = {
        let catalog = catalog.clone();
        move |id: String| {
            let Some(branch) = catalog.branch(&id) else {
                tracing::warn!(branch = %id, "branch vanished from catalog");
                return;
            };
            if let Err(err) = wizard.write().select_branch(branch) {
                tracing::warn!(%err, "branch choice rejected");
            }
        }
    };

    let on_action = {
        let catalog = catalog.clone();
        move |action: WizardAction| {
            let outcome = wizard.write().select_action(action, &*catalog, locale);
            match outcome {
                Ok(WizardOutcome::Stay) => {}
                Ok(WizardOutcome::HandOff(handoff)) => {
                    tracing::info!(
                        location = %handoff.location_name,
                        branch = %handoff.branch_name,
                        "handing off to offers"
                    );
                    on_close.call(());
                    navigator.push(Route::Offers {
                        locale,
                        query: RouteQuery::parse(&handoff.query()),
                    });
                }
                Err(err) => tracing::warn!(%err, "wizard action rejected"),
            }
        }
    };

    use_escape_key(move || {
        if wizard.write().escape() == EscapeOutcome::Close {
            on_close.call(());
        }
    });

    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| on_close.call(()),
            div {
                class: "location-modal",
                role: "dialog",
                "aria-modal": "true",
                "aria-labelledby": TITLE_ID,
                tabindex: "-1",
                dir: locale.dir(),
                onclick: move |evt: MouseEvent| evt.stop_propagation(),
                onmounted: move |evt: MountedEvent| async move {
                    let _ = evt.set_focus(true).await;
                },
                div { class: "modal-header",
                    if !state.is_initial() {
                        button {
                            class: "modal-back",
                            "aria-label": t(locale, Text::Back),
                            onclick: move |_| wizard.write().back(),
                            "‹"
                        }
                    }
                    h2 { id: TITLE_ID, "{title}" }
                    button {
                        class: "modal-close",
                        "aria-label": t(locale, Text::Close),
                        onclick: move |_| on_close.call(()),
                        "×"
                    }
                }
                if state.detail_view().is_none() {
                    StepIndicator { locale, steps }
                }
                div { class: "modal-body",
                    match (state.detail_view(), selected) {
                        (Some(DetailView::Map), Some(branch)) => rsx! {
                            BranchMapDetail { locale, branch }
                        },
                        (Some(DetailView::Contact), Some(branch)) => rsx! {
                            ContactView { locale, branch }
                        },
                        (_, Some(branch)) if state.step() == WizardStep::ChooseAction => rsx! {
                            ActionSelectionStep { locale, branch, on_choose: on_action }
                        },
                        _ => rsx! {
                            BranchSelectionStep { locale, branches, on_choose: on_branch }
                        },
                    }
                }
            }
        }
    }
}

#[component]
fn StepIndicator(locale: Locale, steps: Vec<(WizardStep, StepStatus)>) -> Element {
    let step_word = t(locale, Text::Step);

    rsx! {
        ol { class: "step-indicator",
            for (step, status) in steps {
                li {
                    key: "{step.number()}",
                    class: match status {
                        StepStatus::Done => "step done",
                        StepStatus::Current => "step current",
                        StepStatus::Upcoming => "step",
                    },
                    "aria-current": if status == StepStatus::Current { "step" } else { "false" },
                    span {
                        class: "step-number",
                        "aria-label": "{step_word} {step.number()}",
                        "{step.number()}"
                    }
                    span { class: "step-label", {t(locale, step_label(step))} }
                }
            }
        }
    }
}

#[component]
fn BranchSelectionStep(
    locale: Locale,
    branches: Vec<Branch>,
    on_choose: EventHandler<String>,
) -> Element {
    if branches.is_empty() {
        return rsx! {
            p { class: "modal-empty", {t(locale, Text::NoBranchesAvailable)} }
        };
    }

    rsx! {
        div { class: "wizard-branches",
            for branch in branches {
                div {
                    key: "{branch.id}",
                    class: "wizard-branch",
                    role: "button",
                    tabindex: "0",
                    onclick: {
                        let id = branch.id.clone();
                        move |_| on_choose.call(id.clone())
                    },
                    onkeydown: {
                        let id = branch.id.clone();
                        on_activate(move || on_choose.call(id.clone()))
                    },
                    div { class: "wizard-branch-name", {branch.name.get(locale)} }
                    div { class: "wizard-branch-city", {branch.city.get(locale)} }
                }
            }
        }
    }
}

#[component]
fn ActionSelectionStep(
    locale: Locale,
    branch: Branch,
    on_choose: EventHandler<WizardAction>,
) -> Element {
    let actions = WizardAction::ALL.map(|a| (a, action_text(a)));

    rsx! {
        div { class: "wizard-actions",
            p { class: "wizard-selected-branch", {branch.name.get(locale)} }
            for (action, (title, description, icon)) in actions {
                button {
                    key: "{title:?}",
                    class: "wizard-action",
                    onclick: move |_| on_choose.call(action),
                    span { class: "wizard-action-icon", "aria-hidden": "true", "{icon}" }
                    span { class: "wizard-action-title", {t(locale, title)} }
                    span { class: "wizard-action-description", {t(locale, description)} }
                }
            }
        }
    }
}

#[component]
fn BranchMapDetail(locale: Locale, branch: Branch) -> Element {
    let pins = build_pins(std::slice::from_ref(&branch), Some(&branch.id), locale);

    rsx! {
        div { class: "wizard-map",
            h3 { {t(locale, Text::BranchLocation)} }
            if pins.is_empty() {
                p { class: "modal-empty", {t(locale, Text::BranchNoCoordinates)} }
                if let Some(address) = branch.address_in(locale) {
                    p { class: "contact-address", "{address}" }
                }
            } else {
                LeafletBranchMap {
                    locale,
                    pins,
                    focus: None,
                    on_select: move |_: String| {},
                }
            }
        }
    }
}
