pub mod input;
pub mod menu;

pub use menu::Menu;
