pub mod branch_filter_panel;
pub mod branch_list;
pub mod contact_view;
pub mod error_fallback;
pub mod feedback;
pub mod location_modal;
pub mod location_selector;
pub mod map_view;
pub mod site_header;
