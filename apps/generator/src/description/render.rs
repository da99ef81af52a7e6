//! Renderer — turns parsed sections into the presentation view and records the
//! canonical text in the session.
//!
//! Every piece of interpolated text goes through `escape_html` before it is
//! written into markup.

use serde::Serialize;
use tracing::info;
use url::Url;

use crate::description::sections::{canonicalize, Section, SectionMap};
use crate::models::job::{experience_label, GenerationMetadata, JobDetails};
use crate::session::SessionState;

const GMAIL_COMPOSE_URL: &str = "https://mail.google.com/mail/";

/// Where the rendered content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultOrigin {
    Generated,
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderBlock {
    pub initial: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: Option<String>,
    pub experience: Option<String>,
    pub salary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionBlock {
    pub section: Section,
    pub bullets: Vec<String>,
    pub paragraphs: Vec<String>,
}

/// Structured presentation of one result. Text is stored unescaped;
/// `to_html` escapes on output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub origin: ResultOrigin,
    pub header: HeaderBlock,
    pub sections: Vec<SectionBlock>,
    pub word_count: Option<u64>,
    pub apply_link: Option<String>,
}

/// Escapes text for insertion into HTML content or attribute values.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

// ────────────────────────────────────────────────────────────────────────────
// View construction
// ────────────────────────────────────────────────────────────────────────────

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn build_header(details: &JobDetails) -> HeaderBlock {
    let initial = details
        .company
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect::<String>())
        .unwrap_or_else(|| "U".to_string());

    HeaderBlock {
        initial,
        title: details.title.clone(),
        company: details.company.clone(),
        location: details.location.clone(),
        job_type: non_empty(&details.job_type),
        experience: non_empty(&details.experience_level).map(|level| experience_label(&level)),
        salary: non_empty(&details.salary),
    }
}

/// Splits a section's lines into `- ` bullets and blank-separated paragraphs.
fn build_section(section: Section, lines: &[String]) -> SectionBlock {
    let mut bullets = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in lines {
        if let Some(bullet) = line.strip_prefix("- ") {
            flush_paragraph(&mut current, &mut paragraphs);
            bullets.push(bullet.trim().to_string());
        } else if line.is_empty() {
            flush_paragraph(&mut current, &mut paragraphs);
        } else {
            current.push(line);
        }
    }
    flush_paragraph(&mut current, &mut paragraphs);

    SectionBlock {
        section,
        bullets,
        paragraphs,
    }
}

fn flush_paragraph(current: &mut Vec<&str>, paragraphs: &mut Vec<String>) {
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
        current.clear();
    }
}

/// Gmail compose link pre-filled for applying to this job.
fn build_apply_link(details: &JobDetails) -> Option<String> {
    let email = details.contact_email()?;
    let subject = format!("{} Application - {}", details.title, details.company);
    let body = format!(
        "Hello,\n\nI would like to apply for the {} position at {}.\n\nRegards,\n[Your Name]\n[Contact Info]",
        details.title, details.company
    );
    let url = Url::parse_with_params(
        GMAIL_COMPOSE_URL,
        &[
            ("view", "cm"),
            ("fs", "1"),
            ("to", email),
            ("su", subject.as_str()),
            ("body", body.as_str()),
        ],
    )
    .ok()?;
    Some(url.to_string())
}

/// Builds the view for already-parsed sections.
pub fn build_view(
    sections: &SectionMap,
    details: &JobDetails,
    metadata: Option<&GenerationMetadata>,
    origin: ResultOrigin,
) -> ResultView {
    ResultView {
        origin,
        header: build_header(details),
        sections: sections
            .non_empty()
            .map(|section| build_section(section, sections.lines(section)))
            .collect(),
        word_count: metadata.and_then(|m| m.word_count),
        apply_link: build_apply_link(details),
    }
}

/// Parses `raw`, stores the canonical text with `details` in the session and
/// returns the view. This is the only writer of session state.
pub fn present(
    raw: &str,
    details: JobDetails,
    metadata: Option<&GenerationMetadata>,
    origin: ResultOrigin,
    session: &mut SessionState,
) -> ResultView {
    let (sections, canonical) = canonicalize(raw, &details);
    let view = build_view(&sections, &details, metadata, origin);
    info!(
        "Rendered {:?} result '{}' with {} sections",
        origin,
        details.title,
        view.sections.len()
    );
    session.update(canonical, details);
    view
}

// ────────────────────────────────────────────────────────────────────────────
// HTML output
// ────────────────────────────────────────────────────────────────────────────

impl ResultView {
    pub fn to_html(&self) -> String {
        let mut html = String::with_capacity(4096);
        let placeholder = self.origin == ResultOrigin::Placeholder;

        html.push_str("<div class=\"space-y-6\" data-origin=\"");
        html.push_str(if placeholder { "placeholder" } else { "generated" });
        html.push_str("\">\n");

        if placeholder {
            html.push_str(
                "<div class=\"placeholder-banner\">Template generated offline. \
                 Replace the bracketed text before publishing.</div>\n",
            );
        }

        self.push_header(&mut html);

        html.push_str("<div class=\"prose max-w-none\">\n");
        for block in &self.sections {
            push_section(&mut html, block);
        }
        html.push_str("</div>\n");

        if let Some(link) = &self.apply_link {
            html.push_str("<p class=\"apply-link\"><a href=\"");
            html.push_str(&escape_html(link));
            html.push_str("\" target=\"_blank\" rel=\"noopener\">Apply via email</a></p>\n");
        }

        let words = self
            .word_count
            .map(|n| n.to_string())
            .unwrap_or_else(|| "—".to_string());
        html.push_str("<div class=\"text-right text-xs\">Generated with ");
        html.push_str(&words);
        html.push_str(" words</div>\n</div>\n");
        html
    }

    fn push_header(&self, html: &mut String) {
        let header = &self.header;
        html.push_str("<div class=\"header\">\n<div class=\"avatar\">");
        html.push_str(&escape_html(&header.initial));
        html.push_str("</div>\n<h2>");
        html.push_str(&escape_html(&header.title));
        html.push_str("</h2>\n<p class=\"subtitle\">");
        html.push_str(&escape_html(&header.company));
        html.push_str(" • ");
        html.push_str(&escape_html(&header.location));
        html.push_str("</p>\n");

        let badges = [
            ("badge job-type", header.job_type.as_deref()),
            ("badge experience", header.experience.as_deref()),
            ("badge salary", header.salary.as_deref()),
        ];
        for (class, value) in badges {
            if let Some(value) = value {
                html.push_str("<span class=\"");
                html.push_str(class);
                html.push_str("\">");
                html.push_str(&escape_html(value));
                html.push_str("</span>\n");
            }
        }
        html.push_str("</div>\n");
    }
}

fn push_section(html: &mut String, block: &SectionBlock) {
    html.push_str("<div class=\"mb-6\">\n<h3><i class=\"");
    html.push_str(block.section.icon());
    html.push_str("\"></i>");
    html.push_str(block.section.title());
    html.push_str("</h3>\n");

    if !block.bullets.is_empty() {
        html.push_str("<ul>\n");
        for bullet in &block.bullets {
            html.push_str("<li>");
            html.push_str(&escape_html(bullet));
            html.push_str("</li>\n");
        }
        html.push_str("</ul>\n");
    }
    for paragraph in &block.paragraphs {
        html.push_str("<p>");
        html.push_str(&escape_html(paragraph));
        html.push_str("</p>\n");
    }
    html.push_str("</div>\n");
}
