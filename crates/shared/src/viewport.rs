//! Branch map geometry: which branches can be plotted, where the map should
//! look, and which markers need touching when the branch list or selection
//! changes.
//!
//! Nothing here talks to the map widget; the frontend feeds these results to
//! it.
use std::collections::HashMap;

use crate::models::{Branch, LatLng};

/// Used only until a branch list resolves (Kuwait City).
pub const DEFAULT_CENTER: LatLng = LatLng::new(29.3759, 47.9774);
pub const DEFAULT_ZOOM: u8 = 6;
/// Zoom used when flying to a single selected branch.
pub const FOCUS_ZOOM: u8 = 15;
pub const MIN_ZOOM: u8 = 3;
pub const MAX_ZOOM: u8 = 18;
/// Margin, in screen pixels, around the fitted marker rectangle.
pub const FIT_PADDING_PX: u32 = 50;

pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str =
    r#"&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors"#;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewFit {
    pub center: LatLng,
    pub bounds: Bounds,
}

/// Branches with a valid position, in input order.
pub fn plottable<'a, I>(branches: I) -> Vec<(&'a Branch, LatLng)>
where
    I: IntoIterator<Item = &'a Branch>,
{
    branches
        .into_iter()
        .filter_map(|b| b.position().map(|p| (b, p)))
        .collect()
}

/// Mean centre and bounding rectangle of `points`; `None` when empty.
pub fn fit_view(points: &[LatLng]) -> Option<ViewFit> {
    let first = points.first()?;
    let n = points.len() as f64;

    let mut sum_lat = 0.0;
    let mut sum_lng = 0.0;
    let mut min = *first;
    let mut max = *first;
    for p in points {
        sum_lat += p.lat;
        sum_lng += p.lng;
        min.lat = min.lat.min(p.lat);
        min.lng = min.lng.min(p.lng);
        max.lat = max.lat.max(p.lat);
        max.lng = max.lng.max(p.lng);
    }

    Some(ViewFit {
        center: LatLng::new(sum_lat / n, sum_lng / n),
        bounds: Bounds {
            south_west: min,
            north_east: max,
        },
    })
}

/// How the map should frame a freshly fitted set of markers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraMove {
    FitBounds(Bounds),
    /// A lone marker (or several at one spot) has no area to fit.
    Center(LatLng, u8),
}

impl ViewFit {
    pub fn camera(&self) -> CameraMove {
        if self.bounds.south_west == self.bounds.north_east {
            CameraMove::Center(self.center, FOCUS_ZOOM)
        } else {
            CameraMove::FitBounds(self.bounds)
        }
    }
}

/// Where to fly when `branch` becomes selected.
pub fn focus_target(branch: Option<&Branch>) -> Option<LatLng> {
    branch.and_then(Branch::position)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconState {
    Normal,
    Selected,
}

impl IconState {
    /// Icon size in pixels (width, height).
    pub fn size(self) -> (u32, u32) {
        match self {
            IconState::Normal => (25, 41),
            IconState::Selected => (32, 52),
        }
    }

    /// Anchor point at the bottom centre of the pin.
    pub fn anchor(self) -> (u32, u32) {
        let (w, h) = self.size();
        (w / 2, h)
    }

    /// Raises the selected marker above its neighbours.
    pub fn z_index_offset(self) -> i32 {
        match self {
            IconState::Normal => 0,
            IconState::Selected => 1000,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            IconState::Normal => "branch-marker",
            IconState::Selected => "branch-marker selected",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDescriptor {
    pub id: String,
    pub position: LatLng,
    pub icon: IconState,
}

pub fn marker_descriptors<'a, I>(branches: I, selected_id: Option<&str>) -> Vec<MarkerDescriptor>
where
    I: IntoIterator<Item = &'a Branch>,
{
    plottable(branches)
        .into_iter()
        .map(|(b, position)| MarkerDescriptor {
            id: b.id.clone(),
            position,
            icon: if selected_id == Some(b.id.as_str()) {
                IconState::Selected
            } else {
                IconState::Normal
            },
        })
        .collect()
}

/// Marker changes between two renders. Markers whose id, position and icon
/// are unchanged appear nowhere in the diff.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarkerDiff {
    pub added: Vec<MarkerDescriptor>,
    pub removed: Vec<String>,
    pub restyled: Vec<MarkerDescriptor>,
}

impl MarkerDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.restyled.is_empty()
    }
}

/// A moved marker is reported as removed then added.
pub fn diff_markers(prev: &[MarkerDescriptor], next: &[MarkerDescriptor]) -> MarkerDiff {
    let prev_by_id: HashMap<&str, &MarkerDescriptor> =
        prev.iter().map(|m| (m.id.as_str(), m)).collect();
    let next_by_id: HashMap<&str, &MarkerDescriptor> =
        next.iter().map(|m| (m.id.as_str(), m)).collect();

    let mut diff = MarkerDiff::default();

    for old in prev {
        match next_by_id.get(old.id.as_str()) {
            Some(new) if new.position == old.position => {}
            _ => diff.removed.push(old.id.clone()),
        }
    }

    for new in next {
        match prev_by_id.get(new.id.as_str()) {
            Some(old) if old.position == new.position => {
                if old.icon != new.icon {
                    diff.restyled.push(new.clone());
                }
            }
            _ => diff.added.push(new.clone()),
        }
    }

    diff
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{branch, catalog};
    use crate::catalog::CatalogProvider;

    fn marker(id: &str, lat: f64, lng: f64, icon: IconState) -> MarkerDescriptor {
        MarkerDescriptor {
            id: id.to_string(),
            position: LatLng::new(lat, lng),
            icon,
        }
    }

    #[test]
    fn test_plottable_skips_branches_without_coordinates() {
        let catalog = catalog();
        let kuwait = catalog.branches_for("kuwait");
        assert_eq!(kuwait.len(), 2);
        let plotted = plottable(kuwait);
        assert_eq!(plotted.len(), 1);
        assert_eq!(plotted[0].0.id, "kuwait-city-salmiya");
        assert_eq!(plotted[0].1, LatLng::new(29.33, 48.07));
    }

    #[test]
    fn test_fit_view_empty_is_none() {
        assert!(fit_view(&[]).is_none());
    }

    #[test]
    fn test_fit_view_single_point() {
        let fit = fit_view(&[LatLng::new(29.33, 48.07)]).unwrap();
        assert_eq!(fit.center, LatLng::new(29.33, 48.07));
        assert_eq!(fit.bounds.south_west, fit.bounds.north_east);
    }

    #[test]
    fn test_fit_view_mean_center_and_bounds() {
        let fit = fit_view(&[
            LatLng::new(24.0, 46.0),
            LatLng::new(30.0, 48.0),
            LatLng::new(21.0, 40.0),
        ])
        .unwrap();
        assert!((fit.center.lat - 25.0).abs() < 1e-9);
        assert!((fit.center.lng - 44.666_666_666).abs() < 1e-6);
        assert_eq!(fit.bounds.south_west, LatLng::new(21.0, 40.0));
        assert_eq!(fit.bounds.north_east, LatLng::new(30.0, 48.0));
    }

    #[test]
    fn test_camera_for_single_point_centers_at_focus_zoom() {
        let fit = fit_view(&[LatLng::new(24.7136, 46.6753)]).unwrap();
        assert_eq!(
            fit.camera(),
            CameraMove::Center(LatLng::new(24.7136, 46.6753), FOCUS_ZOOM)
        );
    }

    #[test]
    fn test_camera_for_spread_points_fits_bounds() {
        let fit = fit_view(&[LatLng::new(29.33, 48.07), LatLng::new(29.27, 47.95)]).unwrap();
        assert_eq!(fit.camera(), CameraMove::FitBounds(fit.bounds));
    }

    #[test]
    fn test_focus_target() {
        let with = branch("a", "kuwait", "A", "أ", Some((29.0, 48.0)));
        let without = branch("b", "kuwait", "B", "ب", None);
        assert_eq!(focus_target(Some(&with)), Some(LatLng::new(29.0, 48.0)));
        assert_eq!(focus_target(Some(&without)), None);
        assert_eq!(focus_target(None), None);
    }

    #[test]
    fn test_marker_descriptors_mark_selected() {
        let catalog = catalog();
        let markers = marker_descriptors(catalog.branches(), Some("riyadh-olaya"));
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].id, "riyadh-olaya");
        assert_eq!(markers[0].icon, IconState::Selected);
        assert_eq!(markers[1].icon, IconState::Normal);
    }

    #[test]
    fn test_selected_icon_is_emphasised() {
        let (nw, nh) = IconState::Normal.size();
        let (sw, sh) = IconState::Selected.size();
        assert!(sw > nw && sh > nh);
        assert!(IconState::Selected.z_index_offset() > IconState::Normal.z_index_offset());
        assert_eq!(IconState::Normal.anchor(), (12, 41));
    }

    #[test]
    fn test_diff_selection_change_touches_only_two_markers() {
        let prev = vec![
            marker("a", 1.0, 1.0, IconState::Selected),
            marker("b", 2.0, 2.0, IconState::Normal),
            marker("c", 3.0, 3.0, IconState::Normal),
            marker("d", 4.0, 4.0, IconState::Normal),
        ];
        let next = vec![
            marker("a", 1.0, 1.0, IconState::Normal),
            marker("b", 2.0, 2.0, IconState::Normal),
            marker("c", 3.0, 3.0, IconState::Selected),
            marker("d", 4.0, 4.0, IconState::Normal),
        ];
        let diff = diff_markers(&prev, &next);
        assert!(diff.added.is_empty());
        assert!(diff.removed.is_empty());
        let ids: Vec<&str> = diff.restyled.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_diff_identical_is_empty() {
        let markers = vec![marker("a", 1.0, 1.0, IconState::Normal)];
        assert!(diff_markers(&markers, &markers).is_empty());
    }

    #[test]
    fn test_diff_branch_list_swap() {
        let prev = vec![
            marker("a", 1.0, 1.0, IconState::Normal),
            marker("b", 2.0, 2.0, IconState::Normal),
        ];
        let next = vec![
            marker("b", 2.0, 2.0, IconState::Normal),
            marker("c", 3.0, 3.0, IconState::Normal),
        ];
        let diff = diff_markers(&prev, &next);
        assert_eq!(diff.removed, vec!["a".to_string()]);
        assert_eq!(diff.added.len(), 1);
        assert_eq!(diff.added[0].id, "c");
        assert!(diff.restyled.is_empty());
    }

    #[test]
    fn test_diff_moved_marker_is_replaced() {
        let prev = vec![marker("a", 1.0, 1.0, IconState::Normal)];
        let next = vec![marker("a", 1.5, 1.0, IconState::Normal)];
        let diff = diff_markers(&prev, &next);
        assert_eq!(diff.removed, vec!["a".to_string()]);
        assert_eq!(diff.added, next);
    }
}
