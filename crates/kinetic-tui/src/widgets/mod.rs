mod nav_bar;
mod page;
mod progress_bar;
mod status_bar;

pub use nav_bar::NavBarWidget;
pub use page::{place_text, PageWidget};
pub use progress_bar::ProgressBarWidget;
pub use status_bar::StatusBarWidget;
