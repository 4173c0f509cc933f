pub mod api;
pub mod home;
pub mod ui;

pub use api::*;
pub use home::*;
pub use ui::*;
