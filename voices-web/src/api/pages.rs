//! Server-rendered HTML pages
//!
//! Every page without per-request input is rendered through the
//! [`PageCache`](crate::cache::PageCache), keyed by its path, so a story
//! submission can mark it stale. The submit page renders fresh whenever it
//! carries a mode or anonymity query, or a posted form.

use axum::{
    extract::{Query, State},
    response::Html,
    Form,
};
use serde::Deserialize;
use tracing::warn;
use voices_common::form::{FormValues, StoryFormController, SubmissionPhase};
use voices_common::validation::RawStoryForm;
use voices_common::{FormField, SubmissionType};

use crate::curated::{curated_stories, listing_stories, PETITION_URL};
use crate::html::{document, escape};
use crate::marquee::Marquee;
use crate::AppState;

/// GET /
pub async fn home_page(State(state): State<AppState>) -> Html<String> {
    Html(state.cache.get_or_render("/", render_home))
}

/// GET /student-stories
pub async fn student_stories_page(State(state): State<AppState>) -> Html<String> {
    Html(state.cache.get_or_render("/student-stories", render_student_stories))
}

#[derive(Debug, Default, Deserialize)]
pub struct SubmitPageQuery {
    /// `text` or `video`; anything else shows the text form
    pub mode: Option<String>,
    /// `on` shows the anonymous layout, same convention as the checkbox
    pub anonymous: Option<String>,
}

/// GET /submit-story
pub async fn submit_story_page(
    State(state): State<AppState>,
    Query(query): Query<SubmitPageQuery>,
) -> Html<String> {
    if query.mode.is_none() && query.anonymous.is_none() {
        return Html(state.cache.get_or_render("/submit-story", || {
            render_submit_page(&StoryFormController::new())
        }));
    }

    let mut form = StoryFormController::new();
    if let Some(mode) = query.mode {
        form.set_mode(mode.parse().unwrap_or_default());
    }
    form.set_anonymous(query.anonymous.as_deref() == Some("on"));
    Html(render_submit_page(&form))
}

/// POST /submit-story
///
/// Browser form post. The page comes back with either the thank-you panel
/// or the form refilled and annotated with field errors.
pub async fn submit_story_form(
    State(state): State<AppState>,
    Form(posted): Form<RawStoryForm>,
) -> Html<String> {
    let mut form = controller_for(&posted);

    // A controller rebuilt from a post always starts Idle
    let bag = match form.begin_submit() {
        Ok(bag) => bag,
        Err(e) => {
            warn!("Submit refused by form state: {}", e);
            return Html(render_submit_page(&form));
        }
    };

    let result = state.service.submit(&bag).await;
    if let Err(e) = form.complete(result) {
        warn!("Submission result not applied to form: {}", e);
    }

    Html(render_submit_page(&form))
}

/// Rebuild form state from a posted bag; unknown modes fall back to text
fn controller_for(posted: &RawStoryForm) -> StoryFormController {
    let mode = posted.requested_type().parse().unwrap_or_default();
    let text = |value: &Option<String>| value.clone().unwrap_or_default();

    let values = FormValues {
        story: text(&posted.story),
        name: text(&posted.name),
        affiliation: text(&posted.affiliation),
        email: text(&posted.email),
        video_url: text(&posted.video_url),
    };

    StoryFormController::with_values(mode, posted.anonymous(), values)
}

fn render_home() -> String {
    let marquee = Marquee::build(&curated_stories());
    let body = format!(
        r#"<section class="hero">
    <h1>Don't Let Them Lock the Doors to Medical School.</h1>
    <p>A new bill threatens to eliminate federal loans for medical students. This isn't just about education;
    it's about your future doctor, your family's access to care, and the health of your community.</p>
    <a class="button" href="{petition}" target="_blank" rel="noopener noreferrer">Sign the Petition Now</a>
</section>
<section class="voices">
    <h2>Hear Their Stories</h2>
    <p>The voices of those directly affected highlight the urgency of this issue.</p>
{marquee}    <a class="button" href="/submit-story">Share Your Story</a>
</section>
"#,
        marquee = marquee.render_html(),
        petition = PETITION_URL
    );
    document("Home", &body)
}

fn render_student_stories() -> String {
    let marquee = Marquee::build(&listing_stories());
    let body = format!(
        r#"<section class="voices">
    <h1>These Are the Voices That Would Be Silenced</h1>
    <p>Real stories and video messages from medical students whose dreams, and our healthcare system's
    future, hang in the balance.</p>
{marquee}    <a class="button" href="/submit-story">Share Your Story</a>
    <a class="button" href="/submit-story?mode=video">Submit a Video</a>
</section>
"#,
        marquee = marquee.render_html()
    );
    document("Student Stories", &body)
}

fn render_submit_page(form: &StoryFormController) -> String {
    let notification = form
        .notification()
        .map(|note| {
            format!(
                "<div class=\"notification{}\" role=\"status\"><strong>{}</strong> {}</div>\n",
                if note.is_error { " notification-error" } else { "" },
                escape(&note.title),
                escape(&note.description)
            )
        })
        .unwrap_or_default();

    let panel = match form.phase() {
        SubmissionPhase::Success { submitted } => render_thank_you(submitted),
        SubmissionPhase::Idle | SubmissionPhase::Pending | SubmissionPhase::Failure => {
            render_form(form)
        }
    };

    let body = format!(
        r#"<section class="submit">
    <h1>Your Story Can Make a Difference</h1>
    <p>Share your perspective on why accessible medical education matters. Whether you're a current student,
    aspiring doctor, healthcare professional, or concerned citizen, your voice helps demonstrate the real
    impact of this legislation.</p>
{notification}{panel}</section>
"#,
        notification = notification,
        panel = panel
    );
    document("Share Your Story", &body)
}

fn render_thank_you(submitted: SubmissionType) -> String {
    format!(
        r#"<div class="thank-you">
    <h2>Thank You!</h2>
    <p>Your {noun} has been received.</p>
    <p><strong>What happens next?</strong> Our team will review your submission to ensure it meets our community
    guidelines. Approved stories will appear in the "Student Voices" section to help amplify the impact of
    this campaign.</p>
    <a class="button" href="/submit-story">Submit Another Story</a>
    <a class="button-outline" href="/">Back to Campaign</a>
</div>
"#,
        noun = submitted.story_noun()
    )
}

fn render_form(form: &StoryFormController) -> String {
    let mode = form.mode();
    let mut html = String::new();

    html.push_str("<div class=\"mode-select\">");
    for (option, label) in [
        (SubmissionType::Text, "Written Story"),
        (SubmissionType::Video, "Video Story"),
    ] {
        html.push_str(&format!(
            "<a href=\"{}\"{}>{}</a>",
            submit_page_href(option, form.is_anonymous()),
            if option == mode { " class=\"active\"" } else { "" },
            label
        ));
    }
    html.push_str(&format!(
        "<a class=\"anonymity-toggle\" href=\"{}\">{}</a>",
        submit_page_href(mode, !form.is_anonymous()),
        if form.is_anonymous() {
            "Include my name"
        } else {
            "Submit anonymously"
        }
    ));
    html.push_str("</div>\n");

    if let Some(message) = form.field_error(FormField::Form) {
        html.push_str(&format!("<p class=\"form-error\">{}</p>\n", escape(message)));
    }

    html.push_str("<form method=\"post\" action=\"/submit-story\">\n");
    html.push_str(&format!(
        "<input type=\"hidden\" name=\"submissionType\" value=\"{}\">\n",
        mode.as_str()
    ));

    for field in form.visible_fields() {
        if field == FormField::Name {
            html.push_str(&render_anonymous_checkbox(form.is_anonymous()));
        }
        html.push_str(&render_field(form, field));
    }
    if form.is_anonymous() {
        // Name input is hidden while anonymous; keep the checkbox reachable
        html.push_str(&render_anonymous_checkbox(true));
    }

    html.push_str(&format!(
        "<button type=\"submit\"{}>Submit Your Story</button>\n</form>\n",
        if form.can_submit() { "" } else { " disabled" }
    ));
    html
}

/// Link to the submit page in a given layout
fn submit_page_href(mode: SubmissionType, anonymous: bool) -> String {
    let mut href = format!("/submit-story?mode={}", mode.as_str());
    if anonymous {
        href.push_str("&amp;anonymous=on");
    }
    href
}

fn render_anonymous_checkbox(checked: bool) -> String {
    format!(
        "<div class=\"field\"><input type=\"checkbox\" id=\"isAnonymous\" name=\"isAnonymous\" value=\"on\"{}>\
         <label for=\"isAnonymous\">Submit anonymously (your name won't be displayed)</label></div>\n",
        if checked { " checked" } else { "" }
    )
}

fn render_field(form: &StoryFormController, field: FormField) -> String {
    let values = form.values();
    let is_video = form.mode() == SubmissionType::Video;
    // The checkbox can waive the name without a re-render, so the browser
    // never enforces it; the submission rules still do
    let required = if form.is_required(field) && field != FormField::Name {
        " required"
    } else {
        ""
    };
    let name = field.as_str();

    let (label, input) = match field {
        FormField::Story => (
            if is_video {
                "Your Story (Brief description for video)"
            } else {
                "Your Story"
            },
            format!(
                "<textarea id=\"{name}\" name=\"{name}\" rows=\"{rows}\" placeholder=\"{placeholder}\"{required}>{value}</textarea>",
                name = name,
                rows = if is_video { 3 } else { 6 },
                placeholder = if is_video {
                    "Provide a brief description of what you discuss in your video..."
                } else {
                    "Share your perspective on why accessible medical education matters..."
                },
                required = required,
                value = escape(&values.story)
            ),
        ),
        FormField::VideoUrl => (
            "Video URL",
            text_input(name, "url", "https://youtube.com/watch?v=... or https://vimeo.com/...", &values.video_url, required),
        ),
        FormField::Name => (
            "Your Name",
            text_input(name, "text", "Your Full Name", &values.name, required),
        ),
        FormField::Affiliation => (
            "Affiliation (Optional)",
            text_input(
                name,
                "text",
                "e.g., Harvard Medical School, Pre-med at UCLA, Resident at Johns Hopkins",
                &values.affiliation,
                required,
            ),
        ),
        FormField::Email => (
            "Email (Optional, not displayed publicly)",
            text_input(name, "email", "you@example.com", &values.email, required),
        ),
        FormField::SubmissionType | FormField::Form => return String::new(),
    };

    let error = form
        .field_error(field)
        .map(|message| format!("<p class=\"field-error\">{}</p>", escape(message)))
        .unwrap_or_default();

    format!(
        "<div class=\"field\"><label for=\"{name}\">{label}</label>{input}{error}</div>\n",
        name = name,
        label = label,
        input = input,
        error = error
    )
}

fn text_input(name: &str, kind: &str, placeholder: &str, value: &str, required: &str) -> String {
    format!(
        "<input id=\"{name}\" name=\"{name}\" type=\"{kind}\" placeholder=\"{placeholder}\" value=\"{value}\"{required}>",
        name = name,
        kind = kind,
        placeholder = escape(placeholder),
        value = escape(value),
        required = required
    )
}
