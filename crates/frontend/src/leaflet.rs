//! Thin bridge to Leaflet.
//!
//! The library is pulled from the CDN the first time a map mounts, so pages
//! without a map never pay for it. Every call goes through a `catch` binding:
//! a JS exception comes back as [`MapRenderError`] instead of tearing down the
//! page.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use js_sys::Function;
use meem_shared::viewport::{
    self, CameraMove, IconState, MarkerDescriptor, ViewFit, FIT_PADDING_PX, FOCUS_ZOOM,
};
use meem_shared::{LatLng, Locale};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::timeout::{with_timeout, MAP_LOAD_TIMEOUT_MS};

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapRenderError {
    #[error("map library failed to load: {0}")]
    Load(String),
    #[error("map library did not load within {0} seconds")]
    Timeout(u32),
    #[error("map widget error: {0}")]
    Widget(String),
}

#[wasm_bindgen(inline_js = "
let __meem_leaflet = null;

export function meem_leaflet_load(cssUrl, jsUrl) {
    if (window.L && typeof window.L.map === 'function') return Promise.resolve(true);
    if (__meem_leaflet) return __meem_leaflet;

    __meem_leaflet = new Promise((resolve, reject) => {
        const link = document.createElement('link');
        link.rel = 'stylesheet';
        link.href = cssUrl;
        document.head.appendChild(link);

        const script = document.createElement('script');
        script.src = jsUrl;
        script.async = true;
        script.onload = () => {
            if (window.L && typeof window.L.map === 'function') resolve(true);
            else reject(new Error('Leaflet loaded without a usable L.map'));
        };
        script.onerror = () => {
            __meem_leaflet = null;
            script.remove();
            reject(new Error('failed to fetch ' + jsUrl));
        };
        document.head.appendChild(script);
    });
    return __meem_leaflet;
}

export function meem_map_create(containerId, lat, lng, zoom, minZoom, maxZoom, tileUrl, attribution) {
    const map = L.map(containerId, { center: [lat, lng], zoom, minZoom, maxZoom });
    L.tileLayer(tileUrl, { attribution, maxZoom }).addTo(map);
    return map;
}

export function meem_map_fit_bounds(map, swLat, swLng, neLat, neLng, padding) {
    map.fitBounds([[swLat, swLng], [neLat, neLng]], { padding: [padding, padding] });
}

export function meem_map_set_view(map, lat, lng, zoom) {
    map.setView([lat, lng], zoom);
}

export function meem_map_fly_to(map, lat, lng, zoom) {
    map.flyTo([lat, lng], zoom, { animate: true, duration: 0.8 });
}

export function meem_map_remove(map) {
    map.remove();
}

function __meem_icon(className, w, h, ax, ay) {
    return L.divIcon({
        className,
        html: '<span class=\"branch-marker-pin\"></span>',
        iconSize: [w, h],
        iconAnchor: [ax, ay],
        popupAnchor: [0, -h],
    });
}

export function meem_marker_add(map, id, lat, lng, title, className, w, h, ax, ay, z, popupHtml, onClick) {
    const marker = L.marker([lat, lng], {
        icon: __meem_icon(className, w, h, ax, ay),
        zIndexOffset: z,
        title,
        keyboard: true,
    });
    marker.bindPopup(popupHtml);
    marker.on('click', () => onClick(id));
    marker.addTo(map);
    return marker;
}

export function meem_marker_restyle(marker, className, w, h, ax, ay, z) {
    marker.setIcon(__meem_icon(className, w, h, ax, ay));
    marker.setZIndexOffset(z);
}

export function meem_marker_relabel(marker, title, popupHtml) {
    marker.options.title = title;
    const el = marker.getElement();
    if (el) el.setAttribute('title', title);
    marker.setPopupContent(popupHtml);
}

export function meem_marker_remove(marker) {
    marker.remove();
}
")]
extern "C" {
    #[wasm_bindgen(catch)]
    fn meem_leaflet_load(css_url: &str, js_url: &str) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch)]
    #[allow(clippy::too_many_arguments)]
    fn meem_map_create(
        container_id: &str,
        lat: f64,
        lng: f64,
        zoom: u8,
        min_zoom: u8,
        max_zoom: u8,
        tile_url: &str,
        attribution: &str,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    fn meem_map_fit_bounds(
        map: &JsValue,
        sw_lat: f64,
        sw_lng: f64,
        ne_lat: f64,
        ne_lng: f64,
        padding: u32,
    ) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    fn meem_map_set_view(map: &JsValue, lat: f64, lng: f64, zoom: u8) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    fn meem_map_fly_to(map: &JsValue, lat: f64, lng: f64, zoom: u8) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    fn meem_map_remove(map: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    #[allow(clippy::too_many_arguments)]
    fn meem_marker_add(
        map: &JsValue,
        id: &str,
        lat: f64,
        lng: f64,
        title: &str,
        class_name: &str,
        width: u32,
        height: u32,
        anchor_x: u32,
        anchor_y: u32,
        z_index_offset: i32,
        popup_html: &str,
        on_click: &Function,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    #[allow(clippy::too_many_arguments)]
    fn meem_marker_restyle(
        marker: &JsValue,
        class_name: &str,
        width: u32,
        height: u32,
        anchor_x: u32,
        anchor_y: u32,
        z_index_offset: i32,
    ) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    fn meem_marker_relabel(
        marker: &JsValue,
        title: &str,
        popup_html: &str,
    ) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    fn meem_marker_remove(marker: &JsValue) -> Result<(), JsValue>;
}

fn js_message(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn widget(err: JsValue) -> MapRenderError {
    MapRenderError::Widget(js_message(&err))
}

/// Inject Leaflet's script and stylesheet once and wait for `L` to exist.
pub async fn load() -> Result<(), MapRenderError> {
    let promise = meem_leaflet_load(LEAFLET_CSS, LEAFLET_JS)
        .map_err(|e| MapRenderError::Load(js_message(&e)))?;
    with_timeout(MAP_LOAD_TIMEOUT_MS, JsFuture::from(promise))
        .await
        .map_err(|elapsed| MapRenderError::Timeout(elapsed.seconds()))?
        .map_err(|e| MapRenderError::Load(js_message(&e)))?;
    Ok(())
}

/// A marker as the map should show it, with its display strings.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPin {
    pub marker: MarkerDescriptor,
    pub title: String,
    pub popup_html: String,
}

#[derive(Default)]
struct MarkerLayer {
    handles: HashMap<String, JsValue>,
    shown: Vec<MarkerDescriptor>,
    fitted_ids: HashSet<String>,
    focused: Option<String>,
    locale: Option<Locale>,
}

/// A live Leaflet map. Dropping it removes the map from the page.
pub struct LeafletMap {
    map: JsValue,
    layer: RefCell<MarkerLayer>,
    on_click: Closure<dyn FnMut(String)>,
}

impl LeafletMap {
    /// Create a map in the element `container_id`. Marker clicks report the
    /// marker's id through `on_click`.
    pub fn create(
        container_id: &str,
        on_click: impl FnMut(String) + 'static,
    ) -> Result<Self, MapRenderError> {
        let map = meem_map_create(
            container_id,
            viewport::DEFAULT_CENTER.lat,
            viewport::DEFAULT_CENTER.lng,
            viewport::DEFAULT_ZOOM,
            viewport::MIN_ZOOM,
            viewport::MAX_ZOOM,
            viewport::TILE_URL,
            viewport::TILE_ATTRIBUTION,
        )
        .map_err(widget)?;

        Ok(LeafletMap {
            map,
            layer: RefCell::new(MarkerLayer::default()),
            on_click: Closure::new(on_click),
        })
    }

    fn apply_camera(&self, fit: &ViewFit) -> Result<(), MapRenderError> {
        match fit.camera() {
            CameraMove::FitBounds(bounds) => meem_map_fit_bounds(
                &self.map,
                bounds.south_west.lat,
                bounds.south_west.lng,
                bounds.north_east.lat,
                bounds.north_east.lng,
                FIT_PADDING_PX,
            ),
            CameraMove::Center(center, zoom) => {
                meem_map_set_view(&self.map, center.lat, center.lng, zoom)
            }
        }
        .map_err(widget)
    }

    /// Bring the map in line with `pins`.
    ///
    /// Only markers whose identity, position or emphasis changed are touched.
    /// The view is refitted when the set of markers changes and flies to
    /// `focus` when the selection moves to a branch with a position.
    pub fn sync(
        &self,
        pins: &[MapPin],
        focus: Option<(&str, LatLng)>,
        locale: Locale,
    ) -> Result<(), MapRenderError> {
        let mut layer = self.layer.borrow_mut();

        let next: Vec<MarkerDescriptor> = pins.iter().map(|p| p.marker.clone()).collect();
        let diff = viewport::diff_markers(&layer.shown, &next);
        let by_id: HashMap<&str, &MapPin> =
            pins.iter().map(|p| (p.marker.id.as_str(), p)).collect();

        for id in &diff.removed {
            if let Some(handle) = layer.handles.remove(id) {
                meem_marker_remove(&handle).map_err(widget)?;
            }
        }

        for marker in &diff.added {
            let Some(pin) = by_id.get(marker.id.as_str()) else {
                continue;
            };
            let (width, height) = marker.icon.size();
            let (anchor_x, anchor_y) = marker.icon.anchor();
            let handle = meem_marker_add(
                &self.map,
                &marker.id,
                marker.position.lat,
                marker.position.lng,
                &pin.title,
                marker.icon.css_class(),
                width,
                height,
                anchor_x,
                anchor_y,
                marker.icon.z_index_offset(),
                &pin.popup_html,
                self.on_click.as_ref().unchecked_ref(),
            )
            .map_err(widget)?;
            layer.handles.insert(marker.id.clone(), handle);
        }

        for marker in &diff.restyled {
            if let Some(handle) = layer.handles.get(&marker.id) {
                restyle(handle, marker.icon)?;
            }
        }

        for pin in relabel_targets(layer.locale, locale, pins) {
            if let Some(handle) = layer.handles.get(&pin.marker.id) {
                meem_marker_relabel(handle, &pin.title, &pin.popup_html).map_err(widget)?;
            }
        }
        layer.locale = Some(locale);

        let ids: HashSet<String> = next.iter().map(|m| m.id.clone()).collect();
        if ids != layer.fitted_ids {
            let points: Vec<LatLng> = next.iter().map(|m| m.position).collect();
            if let Some(fit) = viewport::fit_view(&points) {
                self.apply_camera(&fit)?;
            }
            layer.fitted_ids = ids;
        }

        let focus_id = focus.map(|(id, _)| id.to_string());
        if focus_id != layer.focused {
            if let Some((_, target)) = focus {
                meem_map_fly_to(&self.map, target.lat, target.lng, FOCUS_ZOOM).map_err(widget)?;
            }
            layer.focused = focus_id;
        }

        layer.shown = next;
        Ok(())
    }
}

/// Pins whose tooltip and popup must be rewritten because the language
/// changed since the last sync. Nothing on the first sync.
fn relabel_targets(previous: Option<Locale>, locale: Locale, pins: &[MapPin]) -> &[MapPin] {
    match previous {
        Some(previous) if previous != locale => pins,
        _ => &[],
    }
}

fn restyle(handle: &JsValue, icon: IconState) -> Result<(), MapRenderError> {
    let (width, height) = icon.size();
    let (anchor_x, anchor_y) = icon.anchor();
    meem_marker_restyle(
        handle,
        icon.css_class(),
        width,
        height,
        anchor_x,
        anchor_y,
        icon.z_index_offset(),
    )
    .map_err(widget)
}

impl Drop for LeafletMap {
    fn drop(&mut self) {
        if let Err(err) = meem_map_remove(&self.map) {
            dioxus::logger::tracing::warn!(error = %js_message(&err), "failed to remove map");
        }
    }
}
