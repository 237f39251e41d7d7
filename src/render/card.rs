use super::{escape, format_rating, image_fallback, image_url, ImageKind};
use crate::models::{MediaItem, MediaType};

/// Skeleton cards shown while a listing loads
pub const SKELETON_COUNT: usize = 10;

const OVERVIEW_FALLBACK: &str = "Overview not available.";

/// A populated listing card, or a loading skeleton when `item` is `None`
pub fn card(item: Option<&MediaItem>, media_type: MediaType) -> String {
    let Some(item) = item else {
        return r#"<div class="movie-card skeleton-card"><div class="skeleton skeleton-poster"></div><div class="skeleton skeleton-title"></div><div class="skeleton skeleton-rating"></div></div>"#
            .to_string();
    };

    let title = escape(item.display_title());
    let overview = item
        .overview
        .as_deref()
        .filter(|o| !o.trim().is_empty())
        .map(escape)
        .unwrap_or_else(|| OVERVIEW_FALLBACK.to_string());

    format!(
        concat!(
            r#"<div class="movie-card" data-id="{id}" data-type="{media_type}">"#,
            r#"<img class="movie-poster" src="{poster}" alt="Poster: {title}" onerror="{fallback}">"#,
            r#"<div class="card-info"><h3 class="card-title">{title}</h3><span class="card-rating">⭐ {rating}</span></div>"#,
            r#"<div class="card-overlay"><h4 class="overlay-title">{title}</h4><p class="overlay-overview">{overview}</p></div>"#,
            "</div>"
        ),
        id = item.id,
        media_type = media_type,
        poster = escape(&image_url(item.poster_path.as_deref(), ImageKind::Poster)),
        fallback = image_fallback(ImageKind::Poster),
        title = title,
        rating = format_rating(item.vote_average),
        overview = overview,
    )
}

/// `count` skeleton cards
pub fn skeletons(count: usize) -> String {
    (0..count).map(|_| card(None, MediaType::Movie)).collect()
}

/// Cards for a loaded listing, in upstream order
pub fn grid(items: &[MediaItem], media_type: MediaType) -> String {
    items.iter().map(|item| card(Some(item), media_type)).collect()
}

/// Status line shown in place of the grid (no results, errors)
pub fn status_message(message: &str) -> String {
    format!(r#"<p class="status-message">{}</p>"#, escape(message))
}

/// Heading above the grid. Returns plain text, not markup: the query is
/// kept verbatim and the caller must set it as text content.
pub fn listing_title(media_type: MediaType, query: &str) -> String {
    let query = query.trim();
    if !query.is_empty() {
        return format!("Search results for: \"{}\"", query);
    }
    match media_type {
        MediaType::Movie => "Popular movies right now".to_string(),
        MediaType::Tv => "Popular TV shows right now".to_string(),
    }
}
