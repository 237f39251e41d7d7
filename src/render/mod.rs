//! Pure HTML fragment renderers
//!
//! Every function here maps data to markup and nothing else: no I/O, no
//! shared state. Text interpolated into markup is HTML-escaped;
//! `listing_title` is the one plain-text helper.

mod card;
mod detail;

pub use card::{card, grid, listing_title, skeletons, status_message, SKELETON_COUNT};
pub use detail::{
    cast_section, detail_error, detail_loading, detail_modal, providers_section, recommendations_section,
    CAST_LIMIT, PROVIDER_REGION, RECOMMENDATION_LIMIT,
};

use chrono::NaiveDate;

use crate::models::Runtime;

pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";
pub const POSTER_SIZE: &str = "w500";
pub const BACKDROP_SIZE: &str = "w1280";
pub const PROFILE_SIZE: &str = "w185";
pub const LOGO_SIZE: &str = "w92";

pub const POSTER_PLACEHOLDER: &str = "placeholder.png";
pub const BACKDROP_PLACEHOLDER: &str = "placeholder_banner.png";
pub const PROFILE_PLACEHOLDER: &str = "placeholder_person.png";
pub const LOGO_PLACEHOLDER: &str = "placeholder_logo.png";

/// Marker for any value that is missing upstream
pub const NOT_AVAILABLE: &str = "N/A";

/// Image kinds, each with its own size and placeholder asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Poster,
    Backdrop,
    Profile,
    Logo,
}

impl ImageKind {
    fn size(&self) -> &'static str {
        match self {
            ImageKind::Poster => POSTER_SIZE,
            ImageKind::Backdrop => BACKDROP_SIZE,
            ImageKind::Profile => PROFILE_SIZE,
            ImageKind::Logo => LOGO_SIZE,
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            ImageKind::Poster => POSTER_PLACEHOLDER,
            ImageKind::Backdrop => BACKDROP_PLACEHOLDER,
            ImageKind::Profile => PROFILE_PLACEHOLDER,
            ImageKind::Logo => LOGO_PLACEHOLDER,
        }
    }
}

/// Full image URL, or the kind's placeholder when the path is missing
pub fn image_url(path: Option<&str>, kind: ImageKind) -> String {
    match path.map(str::trim).filter(|p| !p.is_empty()) {
        Some(path) => format!("{}{}{}", IMAGE_BASE_URL, kind.size(), path),
        None => kind.placeholder().to_string(),
    }
}

/// `onerror` handler swapping a broken image for the kind's placeholder
fn image_fallback(kind: ImageKind) -> String {
    format!("this.onerror=null;this.src='{}';", kind.placeholder())
}

/// One decimal place, or "N/A". A zero average means nobody has voted yet.
pub fn format_rating(vote_average: Option<f64>) -> String {
    match vote_average {
        Some(value) if value.is_finite() && value != 0.0 => format!("{:.1}", value),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// `YYYY-MM-DD` rendered as `DD/MM/YYYY`; unparseable dates are shown raw
pub fn format_date(date: Option<&str>) -> String {
    match date {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|_| raw.to_string()),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_runtime(runtime: Option<Runtime>) -> String {
    match runtime {
        Some(Runtime::Exact(minutes)) => format!("{} min", minutes),
        Some(Runtime::Approximate(minutes)) => format!("~{} min (per episode, approx.)", minutes),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Dollar amount with thousands separators, or "N/A" for missing/zero budgets
pub fn format_budget(budget: Option<u64>) -> String {
    match budget {
        Some(amount) if amount > 0 => {
            let digits = amount.to_string();
            let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
            for (i, digit) in digits.chars().enumerate() {
                if i > 0 && (digits.len() - i) % 3 == 0 {
                    grouped.push(',');
                }
                grouped.push(digit);
            }
            format!("${}", grouped)
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Escapes text for use in element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
