//! UI controller
//!
//! Browser events become `Intent`s, a single `update` function applies them
//! to a `Session` and returns `Command`s, and the `Runtime` executes those
//! commands against the aggregator and the theme store.

mod runtime;
mod session;
mod theme;

pub use runtime::Runtime;
pub use session::{
    update, CloseReason, Command, DetailView, GridView, Intent, Session, SEARCH_DEBOUNCE,
};
pub use theme::{FileThemeStore, MemoryThemeStore, Theme, ThemeStore};
