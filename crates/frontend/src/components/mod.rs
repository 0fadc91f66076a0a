pub mod filter_panel;
pub mod map_view;
pub mod status_line;
