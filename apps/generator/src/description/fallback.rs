//! Fallback Template — a placeholder description built from the form alone,
//! shown when the backend cannot be reached.

use crate::models::job::{experience_requirement, JobFormInput};

/// Placeholder text in the same heading layout the parser understands.
/// Bracketed lines mark what the user still has to write.
pub fn placeholder_description(form: &JobFormInput) -> String {
    let mut lines: Vec<String> = vec![
        "Job Overview:".to_string(),
        "[Job description will be generated based on your requirements]".to_string(),
    ];
    if !form.additional_details.is_empty() {
        lines.push(String::new());
        lines.push(form.additional_details.clone());
    }

    lines.extend([
        String::new(),
        "Key Responsibilities:".to_string(),
        "- [Responsibility 1]".to_string(),
        "- [Responsibility 2]".to_string(),
        "- [Responsibility 3]".to_string(),
        String::new(),
        "Required Qualifications:".to_string(),
        format!("- {}", experience_requirement(&form.experience_level)),
        format!("- Skills: {}", form.skills_known),
        format!("- Education: {}", form.degree),
        "- [Additional qualification]".to_string(),
    ]);

    lines.join("\n")
}
