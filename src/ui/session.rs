use std::time::Duration;

use super::theme::Theme;
use crate::{
    client::{ClientError, DetailBundle, Listing},
    models::{MediaItem, MediaType},
    render,
};

/// Quiet period after the last keystroke before a search is issued
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

const NO_RESULTS_MESSAGE: &str = "No titles found for this search.";

/// What the listing grid currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum GridView {
    Loading,
    Items(Vec<MediaItem>),
    Empty,
    Failed(String),
}

/// What the detail surface currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    Closed,
    Loading { media_type: MediaType, id: u64 },
    Ready(Box<DetailBundle>),
    Failed(String),
}

/// How the detail view was dismissed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    CloseButton,
    OutsideClick,
    EscapeKey,
}

/// Everything that can happen to a session: user events and load completions
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Reload the listing for the current type and search text right away
    LoadListing,
    SearchInput(String),
    DebounceElapsed {
        token: u64,
    },
    ToggleType,
    OpenDetails {
        media_type: MediaType,
        id: u64,
    },
    CloseDetails(CloseReason),
    ToggleTheme,
    ListingLoaded {
        generation: u64,
        result: Result<Listing, ClientError>,
    },
    DetailsLoaded {
        generation: u64,
        result: Result<DetailBundle, ClientError>,
    },
}

/// Side effects requested by `update`, executed by the runtime
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    StartDebounce {
        token: u64,
        delay: Duration,
    },
    LoadListing {
        generation: u64,
        media_type: MediaType,
        query: String,
    },
    LoadDetails {
        generation: u64,
        media_type: MediaType,
        id: u64,
    },
    PersistTheme(Theme),
}

/// UI session state.
///
/// Tokens and generations are monotonically increasing. A debounce expiry or
/// a load result is only applied if it carries the latest value, so the last
/// keystroke, the last type toggle and the last opened title always win.
#[derive(Debug, Clone)]
pub struct Session {
    media_type: MediaType,
    query: String,
    theme: Theme,
    grid: GridView,
    detail: DetailView,
    debounce_token: u64,
    listing_generation: u64,
    detail_generation: u64,
}

impl Session {
    pub fn new(theme: Theme) -> Self {
        Self {
            media_type: MediaType::Movie,
            query: String::new(),
            theme,
            grid: GridView::Loading,
            detail: DetailView::Closed,
            debounce_token: 0,
            listing_generation: 0,
            detail_generation: 0,
        }
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn grid(&self) -> &GridView {
        &self.grid
    }

    pub fn detail(&self) -> &DetailView {
        &self.detail
    }

    pub fn is_detail_open(&self) -> bool {
        !matches!(self.detail, DetailView::Closed)
    }

    pub fn listing_title(&self) -> String {
        render::listing_title(self.media_type, &self.query)
    }

    pub fn grid_html(&self) -> String {
        match &self.grid {
            GridView::Loading => render::skeletons(render::SKELETON_COUNT),
            GridView::Items(items) => render::grid(items, self.media_type),
            GridView::Empty => render::status_message(NO_RESULTS_MESSAGE),
            GridView::Failed(message) => {
                render::status_message(&format!("Failed to load titles. {}", message))
            }
        }
    }

    /// Markup for the detail surface, `None` while it is closed
    pub fn detail_html(&self) -> Option<String> {
        match &self.detail {
            DetailView::Closed => None,
            DetailView::Loading { .. } => Some(render::detail_loading()),
            DetailView::Ready(bundle) => Some(render::detail_modal(bundle)),
            DetailView::Failed(message) => Some(render::detail_error(message)),
        }
    }

    fn issue_listing(&mut self) -> Command {
        self.listing_generation += 1;
        self.grid = GridView::Loading;
        Command::LoadListing {
            generation: self.listing_generation,
            media_type: self.media_type,
            query: self.query.trim().to_string(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

/// Applies one intent to the session and returns the commands it triggers
pub fn update(session: &mut Session, intent: Intent) -> Vec<Command> {
    match intent {
        Intent::LoadListing => vec![session.issue_listing()],

        Intent::SearchInput(text) => {
            session.query = text;
            session.debounce_token += 1;
            vec![Command::StartDebounce {
                token: session.debounce_token,
                delay: SEARCH_DEBOUNCE,
            }]
        }

        Intent::DebounceElapsed { token } if token == session.debounce_token => {
            vec![session.issue_listing()]
        }
        Intent::DebounceElapsed { .. } => Vec::new(),

        Intent::ToggleType => {
            session.media_type = session.media_type.toggled();
            // The reload below already uses the current text
            session.debounce_token += 1;
            vec![session.issue_listing()]
        }

        Intent::OpenDetails { media_type, id } => {
            session.detail_generation += 1;
            session.detail = DetailView::Loading { media_type, id };
            vec![Command::LoadDetails {
                generation: session.detail_generation,
                media_type,
                id,
            }]
        }

        Intent::CloseDetails(reason) => {
            tracing::debug!(reason = ?reason, "Detail view closed");
            session.detail_generation += 1;
            session.detail = DetailView::Closed;
            Vec::new()
        }

        Intent::ToggleTheme => {
            session.theme = session.theme.toggled();
            vec![Command::PersistTheme(session.theme)]
        }

        Intent::ListingLoaded { generation, result } => {
            if generation != session.listing_generation {
                tracing::debug!(generation, "Discarding stale listing result");
                return Vec::new();
            }
            session.grid = match result {
                Ok(Listing::Results(items)) => GridView::Items(items),
                Ok(Listing::NoResults) => GridView::Empty,
                Err(e) => GridView::Failed(e.to_string()),
            };
            Vec::new()
        }

        Intent::DetailsLoaded { generation, result } => {
            if generation != session.detail_generation {
                tracing::debug!(generation, "Discarding stale detail result");
                return Vec::new();
            }
            session.detail = match result {
                Ok(bundle) => DetailView::Ready(Box::new(bundle)),
                Err(e) => DetailView::Failed(e.to_string()),
            };
            Vec::new()
        }
    }
}
