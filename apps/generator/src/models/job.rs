use serde::{Deserialize, Serialize};

/// Fields that must be non-empty (after trimming) before a form is submitted.
pub const REQUIRED_FIELDS: &[&str] = &[
    "jobTitle",
    "degree",
    "skillsKnown",
    "companyName",
    "companyEmail",
    "state",
    "city",
    "experienceLevel",
    "jobType",
];

// ────────────────────────────────────────────────────────────────────────────
// Form input
// ────────────────────────────────────────────────────────────────────────────

/// The generator form as submitted to `/generate`.
///
/// Serialized with the exact camelCase keys the backend reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobFormInput {
    pub job_title: String,
    pub degree: String,
    pub skills_known: String,
    pub company_name: String,
    pub company_email: String,
    pub state: String,
    pub city: String,
    pub experience_level: String,
    pub job_type: String,
    pub salary: String,
    pub additional_details: String,
}

impl JobFormInput {
    /// Returns a copy with every field trimmed of surrounding whitespace.
    pub fn trimmed(&self) -> Self {
        let t = |s: &str| s.trim().to_string();
        Self {
            job_title: t(&self.job_title),
            degree: t(&self.degree),
            skills_known: t(&self.skills_known),
            company_name: t(&self.company_name),
            company_email: t(&self.company_email),
            state: t(&self.state),
            city: t(&self.city),
            experience_level: t(&self.experience_level),
            job_type: t(&self.job_type),
            salary: t(&self.salary),
            additional_details: t(&self.additional_details),
        }
    }

    /// Looks up a field by its wire name.
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "jobTitle" => &self.job_title,
            "degree" => &self.degree,
            "skillsKnown" => &self.skills_known,
            "companyName" => &self.company_name,
            "companyEmail" => &self.company_email,
            "state" => &self.state,
            "city" => &self.city,
            "experienceLevel" => &self.experience_level,
            "jobType" => &self.job_type,
            "salary" => &self.salary,
            "additionalDetails" => &self.additional_details,
            _ => return None,
        };
        Some(value.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Backend response
// ────────────────────────────────────────────────────────────────────────────

/// Body returned by `POST /generate`.
///
/// Every field is optional on the wire; the generation client decides whether
/// the result counts as a success.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationResult {
    pub success: bool,
    pub job_description: Option<String>,
    pub job_details: Option<RawJobDetails>,
    pub metadata: Option<GenerationMetadata>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl GenerationResult {
    /// The generated text, if the backend produced any.
    pub fn description(&self) -> Option<&str> {
        self.job_description
            .as_deref()
            .filter(|text| !text.is_empty())
    }

    /// Server-supplied failure text (`message` first, then `error`).
    pub fn failure_message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .filter(|msg| !msg.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationMetadata {
    pub word_count: Option<u64>,
    pub fallback_used: Option<bool>,
    pub model_available: Option<bool>,
    pub api_attempted: Option<bool>,
    pub api_error: Option<String>,
}

/// Job details exactly as the backend sent them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawJobDetails {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    pub salary: Option<String>,
    pub email: Option<String>,
    pub company_email: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Normalized details
// ────────────────────────────────────────────────────────────────────────────

/// Job metadata with display defaults applied. Nothing here is ever missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetails {
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    pub experience_level: String,
    pub salary: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_email: Option<String>,
}

impl Default for JobDetails {
    fn default() -> Self {
        Self {
            title: "Job Description".to_string(),
            company: "Company".to_string(),
            location: "Location".to_string(),
            job_type: String::new(),
            experience_level: String::new(),
            salary: String::new(),
            email: String::new(),
            company_email: None,
        }
    }
}

impl JobDetails {
    /// Applies display defaults to whatever the backend returned.
    /// Blank strings count as missing.
    pub fn from_raw(raw: Option<RawJobDetails>) -> Self {
        let raw = raw.unwrap_or_default();
        let defaults = Self::default();
        let pick = |value: Option<String>, fallback: String| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback)
        };

        Self {
            title: pick(raw.title, defaults.title),
            company: pick(raw.company, defaults.company),
            location: pick(raw.location, defaults.location),
            job_type: pick(raw.job_type, defaults.job_type),
            experience_level: pick(raw.experience_level, defaults.experience_level),
            salary: pick(raw.salary, defaults.salary),
            email: pick(raw.email, defaults.email),
            company_email: raw
                .company_email
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        }
    }

    /// Details derived from the form alone, used when no backend result exists.
    pub fn from_form(form: &JobFormInput) -> Self {
        let location = match (form.city.is_empty(), form.state.is_empty()) {
            (false, false) => format!("{}, {}", form.city, form.state),
            (false, true) => form.city.clone(),
            (true, false) => form.state.clone(),
            (true, true) => String::new(),
        };
        let raw = RawJobDetails {
            title: Some(form.job_title.clone()),
            company: Some(form.company_name.clone()),
            location: Some(location),
            job_type: Some(format_job_type(&form.job_type)),
            experience_level: Some(experience_label(&form.experience_level)),
            salary: Some(form.salary.clone()),
            email: Some(form.company_email.clone()),
            company_email: None,
        };
        Self::from_raw(Some(raw))
    }

    /// Best available contact address: `email`, then `companyEmail`.
    /// Surrounding whitespace is trimmed. An address with whitespace or
    /// control characters inside it is skipped.
    pub fn contact_email(&self) -> Option<&str> {
        [Some(self.email.as_str()), self.company_email.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|address| is_single_token(address))
    }
}

fn is_single_token(address: &str) -> bool {
    !address.is_empty() && !address.chars().any(|c| c.is_whitespace() || c.is_control())
}

// ────────────────────────────────────────────────────────────────────────────
// Display helpers
// ────────────────────────────────────────────────────────────────────────────

/// Readable label for an experience level code. Unknown codes pass through.
pub fn experience_label(level: &str) -> String {
    match level {
        "entry" => "Entry Level (0-2 years)".to_string(),
        "mid" => "Mid Level (3-5 years)".to_string(),
        "senior" => "Senior Level (5-8 years)".to_string(),
        "lead" => "Lead/Principal (8+ years)".to_string(),
        other => other.to_string(),
    }
}

pub fn experience_requirement(level: &str) -> &'static str {
    match level {
        "entry" => "0-2 years of experience",
        "mid" => "3-5 years of experience",
        "senior" => "5-8 years of experience",
        "lead" => "8+ years of experience",
        _ => "Relevant experience",
    }
}

/// `full-time` → `Full Time`.
pub fn format_job_type(job_type: &str) -> String {
    job_type
        .replace('-', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_serializes_camel_case_keys() {
        let form = JobFormInput {
            job_title: "Engineer".to_string(),
            company_email: "jobs@acme.io".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["jobTitle"], "Engineer");
        assert_eq!(value["companyEmail"], "jobs@acme.io");
        assert!(value.get("additionalDetails").is_some());
    }

    #[test]
    fn test_trimmed_strips_every_field() {
        let form = JobFormInput {
            job_title: "  Engineer ".to_string(),
            city: "\tAustin\n".to_string(),
            ..Default::default()
        };
        let trimmed = form.trimmed();
        assert_eq!(trimmed.job_title, "Engineer");
        assert_eq!(trimmed.city, "Austin");
    }

    #[test]
    fn test_field_lookup_by_wire_name() {
        let form = JobFormInput {
            skills_known: "Rust".to_string(),
            ..Default::default()
        };
        assert_eq!(form.field("skillsKnown"), Some("Rust"));
        assert_eq!(form.field("unknown"), None);
        for name in REQUIRED_FIELDS {
            assert!(form.field(name).is_some(), "{name} must be addressable");
        }
    }

    #[test]
    fn test_details_defaults_fill_missing_and_blank() {
        let raw = RawJobDetails {
            title: Some("   ".to_string()),
            email: Some("a@b.com".to_string()),
            ..Default::default()
        };
        let details = JobDetails::from_raw(Some(raw));
        assert_eq!(details.title, "Job Description");
        assert_eq!(details.company, "Company");
        assert_eq!(details.location, "Location");
        assert_eq!(details.job_type, "");
        assert_eq!(details.email, "a@b.com");
    }

    #[test]
    fn test_details_from_none_is_default() {
        assert_eq!(JobDetails::from_raw(None), JobDetails::default());
    }

    #[test]
    fn test_contact_email_prefers_email_then_company_email() {
        let mut details = JobDetails {
            company_email: Some("hr@acme.io".to_string()),
            ..Default::default()
        };
        assert_eq!(details.contact_email(), Some("hr@acme.io"));
        details.email = "jobs@acme.io".to_string();
        assert_eq!(details.contact_email(), Some("jobs@acme.io"));
    }

    #[test]
    fn test_contact_email_trims_surrounding_whitespace() {
        let details = JobDetails {
            company_email: Some("a@b.com ".to_string()),
            ..Default::default()
        };
        assert_eq!(details.contact_email(), Some("a@b.com"));
    }

    #[test]
    fn test_contact_email_skips_multi_line_address() {
        let mut details = JobDetails {
            email: "a@b.com\nOverview:".to_string(),
            ..Default::default()
        };
        assert_eq!(details.contact_email(), None);
        details.company_email = Some("hr@acme.io".to_string());
        assert_eq!(details.contact_email(), Some("hr@acme.io"));
    }

    #[test]
    fn test_contact_email_none_when_absent() {
        assert_eq!(JobDetails::default().contact_email(), None);
    }

    #[test]
    fn test_generation_result_accepts_sparse_body() {
        let result: GenerationResult =
            serde_json::from_str(r#"{"success": false, "error": "Missing salary"}"#).unwrap();
        assert!(!result.success);
        assert_eq!(result.description(), None);
        assert_eq!(result.failure_message(), Some("Missing salary"));
    }

    #[test]
    fn test_generation_result_full_body() {
        let json = r#"{
            "success": true,
            "jobDescription": "Job Overview:\nBuild things.",
            "jobDetails": {"title": "Engineer", "company": "Acme", "email": "a@b.com", "extra": 1},
            "metadata": {"wordCount": 3, "fallbackUsed": false, "apiError": null}
        }"#;
        let result: GenerationResult = serde_json::from_str(json).unwrap();
        assert!(result.success);
        assert_eq!(result.description(), Some("Job Overview:\nBuild things."));
        assert_eq!(result.metadata.unwrap().word_count, Some(3));
        let details = JobDetails::from_raw(result.job_details);
        assert_eq!(details.company, "Acme");
    }

    #[test]
    fn test_message_preferred_over_error() {
        let result = GenerationResult {
            message: Some("quota exceeded".to_string()),
            error: Some("other".to_string()),
            ..Default::default()
        };
        assert_eq!(result.failure_message(), Some("quota exceeded"));
    }

    #[test]
    fn test_details_from_form() {
        let form = JobFormInput {
            job_title: "Engineer".to_string(),
            company_name: "Acme".to_string(),
            city: "Austin".to_string(),
            state: "TX".to_string(),
            job_type: "full-time".to_string(),
            experience_level: "mid".to_string(),
            company_email: "jobs@acme.io".to_string(),
            ..Default::default()
        };
        let details = JobDetails::from_form(&form);
        assert_eq!(details.location, "Austin, TX");
        assert_eq!(details.job_type, "Full Time");
        assert_eq!(details.experience_level, "Mid Level (3-5 years)");
        assert_eq!(details.contact_email(), Some("jobs@acme.io"));
    }

    #[test]
    fn test_experience_label_passthrough() {
        assert_eq!(experience_label("lead"), "Lead/Principal (8+ years)");
        assert_eq!(experience_label("Principal"), "Principal");
        assert_eq!(experience_requirement("unknown"), "Relevant experience");
    }

    #[test]
    fn test_format_job_type() {
        assert_eq!(format_job_type("part-time"), "Part Time");
        assert_eq!(format_job_type("contract"), "Contract");
        assert_eq!(format_job_type(""), "");
    }
}
