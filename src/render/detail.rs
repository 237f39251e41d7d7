use super::{
    escape, format_budget, format_date, format_rating, format_runtime, image_fallback, image_url,
    ImageKind, NOT_AVAILABLE,
};
use crate::{
    client::DetailBundle,
    models::{CastMember, MediaItem, MediaType, WatchProviders},
};

pub const CAST_LIMIT: usize = 10;
pub const RECOMMENDATION_LIMIT: usize = 10;

/// Region whose subscription offers are shown
pub const PROVIDER_REGION: &str = "BR";

const CAST_NOT_FOUND: &str = r#"<p class="cast-empty">Main cast not found.</p>"#;
const RECOMMENDATIONS_NOT_AVAILABLE: &str =
    r#"<p class="recommendations-empty">No recommendations available.</p>"#;
const PROVIDERS_NOT_AVAILABLE: &str =
    r#"<p class="providers-empty">Not available for streaming in this region.</p>"#;
const SYNOPSIS_FALLBACK: &str = "Synopsis not available.";

/// First ten cast members in credit order
pub fn cast_section(cast: &[CastMember]) -> String {
    if cast.is_empty() {
        return CAST_NOT_FOUND.to_string();
    }

    let members: String = cast
        .iter()
        .take(CAST_LIMIT)
        .map(|member| {
            let name = escape(&member.name);
            let character = member
                .character
                .as_deref()
                .filter(|c| !c.trim().is_empty())
                .map(|c| format!("<small>({})</small>", escape(c)))
                .unwrap_or_default();
            format!(
                r#"<div class="cast-member"><img class="cast-photo" src="{src}" alt="{name}" onerror="{fallback}"><p>{name}</p>{character}</div>"#,
                src = escape(&image_url(member.profile_path.as_deref(), ImageKind::Profile)),
                fallback = image_fallback(ImageKind::Profile),
                name = name,
                character = character,
            )
        })
        .collect();

    format!(
        r#"<div class="detail-section"><h3>Main cast</h3><div class="cast-list">{}</div></div>"#,
        members
    )
}

/// First ten recommendations in upstream order. Cards carry their id and
/// type so selecting one opens its own detail view.
pub fn recommendations_section(recommendations: &[MediaItem], media_type: MediaType) -> String {
    if recommendations.is_empty() {
        return RECOMMENDATIONS_NOT_AVAILABLE.to_string();
    }

    let cards: String = recommendations
        .iter()
        .take(RECOMMENDATION_LIMIT)
        .map(|item| {
            let title = escape(item.display_title());
            format!(
                r#"<div class="recommendation-card" data-id="{id}" data-type="{media_type}"><img class="recommendation-poster" src="{src}" alt="{title}" onerror="{fallback}"><p>{title}</p></div>"#,
                id = item.id,
                media_type = media_type,
                src = escape(&image_url(item.poster_path.as_deref(), ImageKind::Poster)),
                fallback = image_fallback(ImageKind::Poster),
                title = title,
            )
        })
        .collect();

    format!(
        r#"<div class="detail-section"><h3>Recommendations</h3><div class="recommendations-grid">{}</div></div>"#,
        cards
    )
}

/// Subscription logos for `PROVIDER_REGION` only; rent and buy offers are
/// never shown
pub fn providers_section(providers: &WatchProviders) -> String {
    let Some(offers) = providers.flatrate(PROVIDER_REGION) else {
        return PROVIDERS_NOT_AVAILABLE.to_string();
    };

    let logos: String = offers
        .iter()
        .map(|provider| {
            let name = escape(&provider.provider_name);
            format!(
                r#"<img class="provider-logo" src="{src}" alt="{name}" title="{name}" onerror="{fallback}">"#,
                src = escape(&image_url(provider.logo_path.as_deref(), ImageKind::Logo)),
                fallback = image_fallback(ImageKind::Logo),
                name = name,
            )
        })
        .collect();

    format!(
        r#"<div class="detail-section"><h3>Where to watch</h3><div class="providers-list">{}</div></div>"#,
        logos
    )
}

/// Full detail modal body
pub fn detail_modal(bundle: &DetailBundle) -> String {
    let item = &bundle.item;
    let title = escape(item.display_title());
    let synopsis = item
        .overview
        .as_deref()
        .filter(|o| !o.trim().is_empty())
        .map(escape)
        .unwrap_or_else(|| SYNOPSIS_FALLBACK.to_string());

    let genres = if item.genres.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        escape(
            &item
                .genres
                .iter()
                .map(|g| g.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        )
    };

    let budget = match bundle.media_type {
        MediaType::Movie => format!(
            "<p><strong>Budget:</strong> {}</p>",
            format_budget(item.budget)
        ),
        MediaType::Tv => String::new(),
    };

    format!(
        concat!(
            r#"<div class="modal-movie-header">"#,
            r#"<img class="modal-movie-banner" src="{banner}" alt="Banner: {title}" onerror="{fallback}">"#,
            r#"<h2 class="modal-movie-title">{title}</h2>"#,
            "</div>",
            r#"<div class="modal-details-grid">"#,
            r#"<div class="detail-section"><h3>Synopsis</h3><p>{synopsis}</p></div>"#,
            r#"<div class="detail-section details-meta"><h3>Details</h3>"#,
            r#"<p><strong>Rating:</strong> <span class="card-rating">⭐ {rating}</span></p>"#,
            "<p><strong>Genres:</strong> {genres}</p>",
            "<p><strong>Release:</strong> {release}</p>",
            "<p><strong>Runtime:</strong> {runtime}</p>",
            "{budget}",
            "</div>",
            "</div>",
            "{cast}{providers}{recommendations}"
        ),
        banner = escape(&image_url(item.backdrop_path.as_deref(), ImageKind::Backdrop)),
        fallback = image_fallback(ImageKind::Backdrop),
        title = title,
        synopsis = synopsis,
        rating = format_rating(item.vote_average),
        genres = genres,
        release = escape(&format_date(item.display_date())),
        runtime = format_runtime(item.runtime()),
        budget = budget,
        cast = cast_section(&bundle.cast),
        providers = providers_section(&bundle.providers),
        recommendations = recommendations_section(&bundle.recommendations, bundle.media_type),
    )
}

/// Placeholder shown while the four detail calls are in flight
pub fn detail_loading() -> String {
    r#"<div class="detail-section detail-loading"><div class="skeleton skeleton-banner"></div><div class="skeleton skeleton-title"></div></div>"#
        .to_string()
}

/// Single error block replacing the detail surface
pub fn detail_error(message: &str) -> String {
    format!(
        r#"<div class="detail-section detail-error"><h3>Could not load details</h3><p>Could not load the details for this title. {}</p></div>"#,
        escape(message)
    )
}
