//! Section Parser — splits generated text into the six fixed sections and
//! rebuilds the canonical description used for export.
//!
//! Flow: split lines → recognize headings → route body lines → append contact
//! line to How to Apply → reconstruct in fixed order.
//!
//! The canonical text is a fixed point: parsing it again with the same details
//! reconstructs the identical string.

use serde::Serialize;
use tracing::debug;

use crate::models::job::JobDetails;

/// Used when neither `email` nor `companyEmail` is known.
pub const NO_CONTACT_LINE: &str = "Please apply through the company's careers page or contact the hiring team for application instructions.";

/// One of the six named parts of a job description, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Section {
    JobOverview,
    KeyResponsibilities,
    RequiredQualifications,
    PreferredQualifications,
    WhatWeOffer,
    HowToApply,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::JobOverview,
        Section::KeyResponsibilities,
        Section::RequiredQualifications,
        Section::PreferredQualifications,
        Section::WhatWeOffer,
        Section::HowToApply,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::JobOverview => "Job Overview",
            Section::KeyResponsibilities => "Key Responsibilities",
            Section::RequiredQualifications => "Required Qualifications",
            Section::PreferredQualifications => "Preferred Qualifications",
            Section::WhatWeOffer => "What We Offer",
            Section::HowToApply => "How to Apply",
        }
    }

    /// Lower-case heading texts that select this section.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Section::JobOverview => &["job overview", "overview"],
            Section::KeyResponsibilities => &["key responsibilities", "responsibilities"],
            Section::RequiredQualifications => &["required qualifications", "required"],
            Section::PreferredQualifications => &["preferred qualifications", "preferred"],
            Section::WhatWeOffer => &["what we offer"],
            Section::HowToApply => &["how to apply", "apply"],
        }
    }

    /// Resolves an already-normalized heading through the alias table.
    pub fn from_alias(normalized: &str) -> Option<Section> {
        Section::ALL
            .into_iter()
            .find(|section| section.aliases().contains(&normalized))
    }

    /// Icon identifier shown next to the section title.
    pub fn icon(self) -> &'static str {
        match self {
            Section::JobOverview => "fas fa-info-circle",
            Section::KeyResponsibilities => "fas fa-tasks",
            Section::RequiredQualifications => "fas fa-clipboard-list",
            Section::PreferredQualifications => "fas fa-star",
            Section::WhatWeOffer => "fas fa-gift",
            Section::HowToApply => "fas fa-paper-plane",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

// ────────────────────────────────────────────────────────────────────────────
// SectionMap
// ────────────────────────────────────────────────────────────────────────────

/// Ordered lines per section. Blank lines are kept as paragraph separators.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionMap {
    lines: [Vec<String>; 6],
}

impl SectionMap {
    pub fn lines(&self, section: Section) -> &[String] {
        &self.lines[section.index()]
    }

    pub fn push(&mut self, section: Section, line: impl Into<String>) {
        self.lines[section.index()].push(line.into());
    }

    /// True when the section holds at least one non-blank line.
    pub fn has_content(&self, section: Section) -> bool {
        self.lines(section).iter().any(|l| !l.is_empty())
    }

    /// Sections with content, in display order.
    pub fn non_empty(&self) -> impl Iterator<Item = Section> + '_ {
        Section::ALL
            .into_iter()
            .filter(move |s| self.has_content(*s))
    }

    /// Lines with leading/trailing blanks dropped and blank runs collapsed.
    pub fn normalized_lines(&self, section: Section) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for line in self.lines(section) {
            let line = line.as_str();
            if line.is_empty() && out.last().map_or(true, |prev| prev.is_empty()) {
                continue;
            }
            out.push(line);
        }
        while out.last().is_some_and(|l| l.is_empty()) {
            out.pop();
        }
        out
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Heading recognition
// ────────────────────────────────────────────────────────────────────────────

/// Strips a leading `12.` list marker.
fn strip_ordinal(line: &str) -> &str {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return line;
    }
    match line[digits..].strip_prefix('.') {
        Some(rest) => rest.trim_start(),
        None => line,
    }
}

/// Only this heading is also accepted with a trailing period.
const PERIOD_HEADING: &str = "what we offer";

/// Lower-cased heading text with list, bold and markdown markers removed.
fn normalize_heading(line: &str) -> String {
    let line = line.trim_start_matches('#').trim_start();
    let line = strip_ordinal(line).replace("**", "");
    let lowered = line.trim().to_lowercase();
    if let Some(heading) = lowered.strip_suffix(':') {
        return heading.trim_end().to_string();
    }
    match lowered.strip_suffix('.') {
        Some(heading) if heading.trim_end() == PERIOD_HEADING => PERIOD_HEADING.to_string(),
        _ => lowered,
    }
}

/// `Some Phrase:` with letters and spaces only, at least three characters.
fn colon_phrase(line: &str) -> Option<&str> {
    let phrase = line.strip_suffix(':')?;
    let valid = phrase.chars().count() >= 3
        && phrase.chars().all(|c| c.is_ascii_alphabetic() || c == ' ');
    valid.then_some(phrase)
}

/// Returns the section a line switches to, or `None` for body text.
pub fn recognize_heading(line: &str) -> Option<Section> {
    Section::from_alias(&normalize_heading(line)).or_else(|| {
        colon_phrase(line).and_then(|phrase| Section::from_alias(&phrase.trim().to_lowercase()))
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Parse + reconstruct
// ────────────────────────────────────────────────────────────────────────────

/// The sentence appended to How to Apply for the given details.
pub fn contact_line(details: &JobDetails) -> String {
    match details.contact_email() {
        Some(email) => format!("Please send your application to {email}"),
        None => NO_CONTACT_LINE.to_string(),
    }
}

/// Splits raw text into sections and appends the contact line.
pub fn parse_sections(raw: &str, details: &JobDetails) -> SectionMap {
    let mut sections = SectionMap::default();
    let mut current = Section::JobOverview;

    for line in raw.lines().map(str::trim) {
        if line.is_empty() {
            sections.push(current, "");
            continue;
        }
        if let Some(section) = recognize_heading(line) {
            current = section;
            continue;
        }
        sections.push(current, line);
    }

    // Re-parsing canonical text already carries this line; adding it again
    // would break the fixed point.
    let contact = contact_line(details);
    let already_present = sections
        .lines(Section::HowToApply)
        .iter()
        .any(|l| *l == contact);
    if !already_present {
        sections.push(Section::HowToApply, contact);
    }

    debug!(
        "Parsed description into {} non-empty sections",
        sections.non_empty().count()
    );
    sections
}

/// Rebuilds the canonical description in fixed section order.
pub fn reconstruct(sections: &SectionMap) -> String {
    let mut out = String::new();
    for section in sections.non_empty() {
        out.push_str(section.title());
        out.push_str(":\n");
        out.push_str(&sections.normalized_lines(section).join("\n"));
        out.push_str("\n\n");
    }
    out.trim().to_string()
}

/// Parse then reconstruct in one step.
pub fn canonicalize(raw: &str, details: &JobDetails) -> (SectionMap, String) {
    let sections = parse_sections(raw, details);
    let canonical = reconstruct(&sections);
    (sections, canonical)
}
