mod briefing;

pub use briefing::briefing_handler;
