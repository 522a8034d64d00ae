use dioxus::prelude::*;
use meem_shared::{Locale, Location};

use crate::i18n::{t, Text};

#[component]
pub fn LocationSelector(
    locale: Locale,
    locations: Vec<Location>,
    selected: Option<String>,
    on_select: EventHandler<String>,
) -> Element {
    rsx! {
        div { class: "location-selector",
            h3 { class: "panel-heading", {t(locale, Text::LocationsHeading)} }
            div { class: "location-options", role: "group",
                for location in locations {
                    LocationOption {
                        key: "{location.id}",
                        is_selected: selected.as_deref() == Some(location.id.as_str()),
                        name: location.name.get(locale).to_string(),
                        flag: location.flag.clone(),
                        on_activate: {
                            let id = location.id.clone();
                            move |_: ()| on_select.call(id.clone())
                        },
                    }
                }
            }
        }
    }
}

#[component]
fn LocationOption(
    is_selected: bool,
    name: String,
    flag: Option<String>,
    on_activate: EventHandler<()>,
) -> Element {
    let class = if is_selected {
        "location-option selected"
    } else {
        "location-option"
    };

    // A native button already activates on Enter and Space.
    rsx! {
        div { class: "location-option-wrap",
            button {
                class: "{class}",
                "aria-pressed": "{is_selected}",
                "aria-label": "{name}",
                onclick: move |_| on_activate.call(()),
                if let Some(flag) = flag {
                    span { class: "location-flag", "aria-hidden": "true", "{flag}" }
                }
            }
            span { class: "location-name", "{name}" }
        }
    }
}
