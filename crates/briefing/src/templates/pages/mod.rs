pub mod briefing;
pub mod home;

pub use briefing::{briefing_content, briefing_page};
pub use home::{home_content, home_page};
