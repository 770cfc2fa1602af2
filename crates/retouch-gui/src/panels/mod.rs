pub mod controls;
pub mod crop_overlay;
pub mod helpers;
pub mod menu_bar;
pub mod status;
pub mod viewport;
