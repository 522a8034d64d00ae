use std::sync::atomic::{AtomicU32, Ordering};

use dioxus::logger::tracing;
use dioxus::prelude::*;
use futures::channel::mpsc;
use futures::StreamExt;
use meem_shared::viewport;
use meem_shared::{Branch, LatLng, Locale};

use crate::components::feedback::{ErrorNotice, LoadingIndicator};
use crate::i18n::{t, Text};
use crate::leaflet::{self, LeafletMap, MapPin, MapRenderError};

static NEXT_MAP_ID: AtomicU32 = AtomicU32::new(0);

#[derive(Debug, Clone, PartialEq)]
enum MapStatus {
    Loading,
    Ready,
    Failed(MapRenderError),
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Popup body for a branch marker. Catalog text is escaped before it reaches
/// Leaflet, which inserts popup content as HTML.
pub fn popup_html(branch: &Branch, locale: Locale) -> String {
    let mut html = format!(
        r#"<div class="branch-popup"><strong>{}</strong>"#,
        escape_html(branch.name.get(locale))
    );
    if let Some(address) = branch.address_in(locale) {
        html.push_str(&format!("<div>{}</div>", escape_html(address)));
    }
    html.push_str(&format!(
        r#"<div class="popup-city">{}</div>"#,
        escape_html(branch.city.get(locale))
    ));
    if let Some(phone) = &branch.phone {
        html.push_str(&format!(
            "<div>{}{}</div>",
            t(locale, Text::Phone),
            escape_html(phone)
        ));
    }
    if let Some(hours) = &branch.hours {
        html.push_str(&format!(
            "<div>{}{}</div>",
            t(locale, Text::Hours),
            escape_html(&hours.display())
        ));
    }
    html.push_str("</div>");
    html
}

/// One pin per plottable branch, in list order.
pub fn build_pins(branches: &[Branch], selected: Option<&str>, locale: Locale) -> Vec<MapPin> {
    viewport::marker_descriptors(branches, selected)
        .into_iter()
        .filter_map(|marker| {
            let branch = branches.iter().find(|b| b.id == marker.id)?;
            Some(MapPin {
                title: branch.name.get(locale).to_string(),
                popup_html: popup_html(branch, locale),
                marker,
            })
        })
        .collect()
}

/// Map of the given branches with the selected one emphasised. Branches
/// without a position are left off; with none left the map is not built.
#[component]
pub fn MapView(
    locale: Locale,
    branches: Vec<Branch>,
    selected: Option<String>,
    on_select: EventHandler<String>,
) -> Element {
    let pins = build_pins(&branches, selected.as_deref(), locale);
    if pins.is_empty() {
        return rsx! {
            div { class: "map-empty", role: "status",
                p { {t(locale, Text::NoCoordinates)} }
            }
        };
    }

    let selected_branch = selected
        .as_deref()
        .and_then(|id| branches.iter().find(|b| b.id == id));
    let focus = selected_branch
        .and_then(|b| viewport::focus_target(Some(b)).map(|p| (b.id.clone(), p)));

    rsx! {
        LeafletBranchMap { locale, pins, focus, on_select }
    }
}

/// The Leaflet widget itself. Loads the library on mount and keeps the live
/// map in step with `pins` and `focus`. A failed load or update leaves the
/// rest of the page alone and offers a retry.
#[component]
pub fn LeafletBranchMap(
    locale: Locale,
    pins: Vec<MapPin>,
    focus: Option<(String, LatLng)>,
    on_select: EventHandler<String>,
) -> Element {
    let container_id =
        use_hook(|| format!("branch-map-{}", NEXT_MAP_ID.fetch_add(1, Ordering::Relaxed)));
    let mut status = use_signal(|| MapStatus::Loading);
    let mut attempt = use_signal(|| 0u32);
    let mut handle: Signal<Option<LeafletMap>> = use_signal(|| None);

    // Marker clicks arrive from Leaflet outside the Dioxus runtime; forward
    // them to a task that runs inside it.
    let clicks = use_hook(|| {
        let (tx, mut rx) = mpsc::unbounded::<String>();
        spawn(async move {
            while let Some(branch_id) = rx.next().await {
                on_select.call(branch_id);
            }
        });
        tx
    });

    let mount_id = container_id.clone();
    use_effect(move || {
        let attempt = attempt();
        let id = mount_id.clone();
        let clicks = clicks.clone();
        spawn(async move {
            status.set(MapStatus::Loading);
            let created = match leaflet::load().await {
                Ok(()) => LeafletMap::create(&id, move |branch_id| {
                    let _ = clicks.unbounded_send(branch_id);
                }),
                Err(err) => Err(err),
            };
            match created {
                Ok(map) => {
                    tracing::debug!(container = %id, attempt, "map ready");
                    handle.set(Some(map));
                    status.set(MapStatus::Ready);
                }
                Err(err) => {
                    tracing::error!(%err, attempt, "map failed to initialise");
                    status.set(MapStatus::Failed(err));
                }
            }
        });
    });

    use_effect(use_reactive!(|(pins, focus, locale)| {
        let guard = handle.read();
        let Some(map) = guard.as_ref() else {
            return;
        };
        let focus = focus.as_ref().map(|(id, position)| (id.as_str(), *position));
        if let Err(err) = map.sync(&pins, focus, locale) {
            tracing::error!(%err, "map update failed");
            status.set(MapStatus::Failed(err));
        }
    }));

    let retry = move |_: ()| {
        handle.set(None);
        attempt += 1;
    };

    rsx! {
        div { class: "map-frame",
            div { id: "{container_id}", class: "map-container" }
            match status() {
                MapStatus::Loading => rsx! {
                    div { class: "map-overlay",
                        LoadingIndicator { message: t(locale, Text::LoadingMap).to_string() }
                    }
                },
                MapStatus::Failed(err) => rsx! {
                    div { class: "map-overlay", title: "{err}",
                        ErrorNotice {
                            message: t(locale, Text::MapUnavailable).to_string(),
                            retry_label: t(locale, Text::Retry).to_string(),
                            on_retry: retry,
                        }
                    }
                },
                MapStatus::Ready => rsx! {},
            }
        }
    }
}
