mod html;
mod skin;

pub use html::HtmlRenderer;
pub use skin::{Skin, Theme};

use crate::{
    prelude::*,
    views::{FilterPanel, GameForm, ListSnapshot, Notice, StatsPanel},
};

/// Everything the list page shows.
pub struct ListPage<'a> {
    pub list: &'a ListSnapshot,
    pub filters: &'a FilterPanel,
    pub stats: &'a StatsPanel,
    pub notice: Option<Notice>,
}

/// Turns view state into a page. Handlers only ever talk to this trait, so the
/// presentation can be swapped without touching the flows.
pub trait Renderer: Send + Sync {
    fn list_page(&self, page: &ListPage<'_>) -> Result<String>;

    fn form_page(&self, form: &GameForm) -> Result<String>;

    fn error_page(&self, message: &str, back_href: &str) -> Result<String>;
}
