// The single-page HTML surface: one form, one status area.

pub mod handlers;
pub mod render;
