pub mod camera;
pub mod plugin;
pub mod starfield;
pub mod ui;
pub mod visuals;
