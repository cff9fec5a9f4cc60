//! Student voices marquee
//!
//! Turns an arbitrary list of story-shaped JSON values into the horizontally
//! scrolling testimonial strip. Input may be user influenced, so nothing here
//! trusts its shape:
//! - entries without a non-empty `id`, `quote` and `name`, or with a
//!   non-string `affiliation`, are dropped
//! - the valid list is emitted twice in a row so the scroll animation can
//!   loop without a visible seam
//! - an entry that fails to render is left out; the rest still render

use serde_json::Value;
use thiserror::Error;
use tracing::warn;
use url::Url;

use crate::html::escape;

pub const NO_STORIES_MESSAGE: &str = "No stories available at the moment.";
pub const NO_VALID_STORIES_MESSAGE: &str = "No valid stories available.";

/// A story entry that passed the display checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryCard {
    pub id: String,
    pub quote: String,
    pub name: String,
    pub affiliation: String,
    /// Optional headline shown above the quote
    pub title: Option<String>,
    pub submission_type: Option<String>,
    pub video_url: Option<String>,
}

impl StoryCard {
    /// Accept a JSON value only if it meets the display invariant
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let non_empty = |key: &str| {
            object
                .get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let optional = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);

        Some(Self {
            id: non_empty("id")?,
            quote: non_empty("quote")?,
            name: non_empty("name")?,
            affiliation: object.get("affiliation")?.as_str()?.to_string(),
            title: optional("title").filter(|t| !t.is_empty()),
            submission_type: optional("submissionType"),
            video_url: optional("videoUrl"),
        })
    }

    /// Video card when typed as video and carrying a URL
    pub fn is_video(&self) -> bool {
        self.submission_type.as_deref() == Some("video")
            && self.video_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}

/// Why a single card could not be rendered
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("story {id}: video URL is not a usable http(s) link: {reason}")]
    UnplayableVideo { id: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marquee {
    /// Nothing was supplied at all
    NoStories,
    /// Entries were supplied but none passed the display checks
    NoValidStories,
    Loop { valid: Vec<StoryCard> },
}

impl Marquee {
    pub fn build(entries: &[Value]) -> Self {
        if entries.is_empty() {
            return Marquee::NoStories;
        }

        let valid: Vec<StoryCard> = entries.iter().filter_map(StoryCard::from_value).collect();
        if valid.is_empty() {
            return Marquee::NoValidStories;
        }

        Marquee::Loop { valid }
    }

    /// Entries that passed the display checks
    pub fn valid(&self) -> &[StoryCard] {
        match self {
            Marquee::Loop { valid } => valid,
            Marquee::NoStories | Marquee::NoValidStories => &[],
        }
    }

    /// Presentation order: the valid list followed by itself once more
    pub fn sequence(&self) -> Vec<&StoryCard> {
        let valid = self.valid();
        valid.iter().chain(valid.iter()).collect()
    }

    pub fn render_html(&self) -> String {
        let placeholder = match self {
            Marquee::NoStories => Some(NO_STORIES_MESSAGE),
            Marquee::NoValidStories => Some(NO_VALID_STORIES_MESSAGE),
            Marquee::Loop { .. } => None,
        };
        if let Some(message) = placeholder {
            return format!(
                "<section class=\"marquee\">\n<div class=\"marquee-empty\">{}</div>\n</section>\n",
                message
            );
        }

        let mut cards = String::new();
        for (index, card) in self.sequence().into_iter().enumerate() {
            match render_card(card, index) {
                Ok(html) => cards.push_str(&html),
                Err(e) => warn!("Error rendering story: {}", e),
            }
        }

        format!(
            "<section class=\"marquee\">\n<div class=\"marquee-track\" style=\"width: 200%\">\n{}</div>\n</section>\n",
            cards
        )
    }
}

fn playable_video_url(card: &StoryCard) -> Result<Url, RenderError> {
    let raw = card.video_url.as_deref().unwrap_or_default();
    let unplayable = |reason: String| RenderError::UnplayableVideo {
        id: card.id.clone(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| unplayable(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(unplayable(format!("unsupported scheme '{}'", other))),
    }
}

/// Player pages (YouTube `/embed/`, Vimeo player) go in an iframe, not a video tag
fn is_embed_player(url: &Url) -> bool {
    url.path().starts_with("/embed/") || url.host_str() == Some("player.vimeo.com")
}

/// Render one card; `index` keeps keys unique across the duplicated halves
pub fn render_card(card: &StoryCard, index: usize) -> Result<String, RenderError> {
    let key = escape(&format!("{}-{}", card.id, index));

    let (class, media, badge) = if card.is_video() {
        let parsed = playable_video_url(card)?;
        let url = escape(parsed.as_str());
        let media = if is_embed_player(&parsed) {
            format!(
                "<iframe src=\"{url}\" title=\"Video story by {name}\" \
                 allow=\"accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture\" \
                 allowfullscreen></iframe>",
                url = url,
                name = escape(&card.name)
            )
        } else {
            format!(
                "<video controls preload=\"metadata\">\
                 <source src=\"{url}\" type=\"video/mp4\">\
                 <source src=\"{url}\" type=\"video/webm\">\
                 Your browser does not support the video tag.</video>",
                url = url
            )
        };
        (
            "story-card story-card-video",
            media,
            "<span class=\"badge\">Video Story</span>",
        )
    } else {
        (
            "story-card",
            "<span class=\"quote-mark\" aria-hidden=\"true\">&ldquo;</span>".to_string(),
            "",
        )
    };

    let title = card
        .title
        .as_deref()
        .map(|title| format!("<h3 class=\"title\">{}</h3>", escape(title)))
        .unwrap_or_default();

    Ok(format!(
        "<div class=\"{class}\" data-key=\"{key}\">{title}{media}\
         <p class=\"quote\">&ldquo;{quote}&rdquo;</p>\
         <p class=\"name\">{name}</p>\
         <p class=\"affiliation\">{affiliation}</p>{badge}</div>\n",
        class = class,
        key = key,
        title = title,
        media = media,
        quote = escape(&card.quote),
        name = escape(&card.name),
        affiliation = escape(&card.affiliation),
        badge = badge,
    ))
}
