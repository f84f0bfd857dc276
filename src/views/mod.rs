pub mod common;
pub mod debug;
pub mod help_overlay;
pub mod portal;
pub mod spinner;
pub mod status_bar;
