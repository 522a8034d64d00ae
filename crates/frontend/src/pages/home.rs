use dioxus::prelude::*;
use meem_shared::{CatalogProvider, Locale};

use crate::a11y::on_activate;
use crate::catalog_state::{use_catalog, CatalogStatus};
use crate::components::feedback::{ErrorNotice, LoadingIndicator};
use crate::components::location_modal::LocationModal;
use crate::i18n::{t, Text};
use crate::route_query::RouteQuery;
use crate::Route;

/// Landing page. Each location circle opens the guided branch wizard.
#[component]
pub fn Home(locale: Locale) -> Element {
    let mut handle = use_catalog();
    let mut open_location = use_signal(|| None::<String>);

    rsx! {
        section { class: "hero",
            h1 { {t(locale, Text::HeroTitle)} }
            p { {t(locale, Text::HeroSubtitle)} }
        }
        section { class: "location-picker",
            h2 { {t(locale, Text::ChooseLocation)} }
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
                    div { class: "location-circles",
                        for location in catalog.locations().iter().cloned() {
                            div {
                                key: "{location.id}",
                                class: "location-circle",
                                role: "button",
                                tabindex: "0",
                                "aria-haspopup": "dialog",
                                onclick: {
                                    let id = location.id.clone();
                                    move |_| open_location.set(Some(id.clone()))
                                },
                                onkeydown: {
                                    let id = location.id.clone();
                                    on_activate(move || open_location.set(Some(id.clone())))
                                },
                                if let Some(flag) = &location.flag {
                                    span { class: "location-flag", "aria-hidden": "true", "{flag}" }
                                }
                                span { class: "location-name", {location.name.get(locale)} }
                            }
                        }
                    }
                    if let Some(location_id) = open_location() {
                        LocationModal {
                            key: "{location_id}",
                            locale,
                            catalog: catalog.clone(),
                            location_id,
                            on_close: move |_: ()| open_location.set(None),
                        }
                    }
                },
            }
            Link {
                class: "find-branch-link",
                to: Route::Branches { locale, query: RouteQuery::default() },
                {t(locale, Text::FindBranch)}
            }
        }
    }
}
