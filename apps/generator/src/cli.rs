//! Command-line surface for `jd-generator`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::models::job::JobFormInput;

#[derive(Parser, Debug)]
#[command(name = "jd-generator", version, about = "Job description generator client", long_about = None)]
pub struct Cli {
    /// Backend base URL, e.g. <http://localhost:5000>
    #[arg(long, env = "JDGEN_BASE_URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a description from the form, then optionally export it
    Generate(GenerateArgs),
    /// Normalize an existing description file into canonical sections (no backend call)
    Normalize(NormalizeArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub form: FormArgs,

    /// JSON file with camelCase form fields; flags override its values
    #[arg(long)]
    pub form_file: Option<PathBuf>,

    /// Write the rendered HTML view to this file
    #[arg(long)]
    pub html: Option<PathBuf>,

    /// Print the view as JSON instead of the canonical text
    #[arg(long)]
    pub json: bool,

    /// Generate a second time with the same form before exporting
    #[arg(long)]
    pub regenerate: bool,

    /// Save the PDF into this directory
    #[arg(long, value_name = "DIR")]
    pub download: Option<PathBuf>,

    /// Open the PDF in the configured viewer
    #[arg(long)]
    pub preview: bool,
}

#[derive(Args, Debug, Default)]
pub struct FormArgs {
    #[arg(long)]
    pub job_title: Option<String>,
    #[arg(long)]
    pub degree: Option<String>,
    /// Comma-separated skills
    #[arg(long = "skills")]
    pub skills_known: Option<String>,
    #[arg(long = "company")]
    pub company_name: Option<String>,
    #[arg(long = "email")]
    pub company_email: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    /// entry | mid | senior | lead
    #[arg(long = "experience")]
    pub experience_level: Option<String>,
    /// e.g. full-time, part-time, contract
    #[arg(long)]
    pub job_type: Option<String>,
    #[arg(long)]
    pub salary: Option<String>,
    #[arg(long = "details")]
    pub additional_details: Option<String>,
}

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Text file holding a generated description
    pub file: PathBuf,

    /// Contact address for the How to Apply section
    #[arg(long)]
    pub email: Option<String>,
}

impl FormArgs {
    /// Overlays the flags that were given onto `base`.
    pub fn apply(self, mut base: JobFormInput) -> JobFormInput {
        let set = |target: &mut String, value: Option<String>| {
            if let Some(value) = value {
                *target = value;
            }
        };
        set(&mut base.job_title, self.job_title);
        set(&mut base.degree, self.degree);
        set(&mut base.skills_known, self.skills_known);
        set(&mut base.company_name, self.company_name);
        set(&mut base.company_email, self.company_email);
        set(&mut base.state, self.state);
        set(&mut base.city, self.city);
        set(&mut base.experience_level, self.experience_level);
        set(&mut base.job_type, self.job_type);
        set(&mut base.salary, self.salary);
        set(&mut base.additional_details, self.additional_details);
        base
    }
}

/// Builds the form from `--form-file` (if any) overlaid with flags.
pub fn load_form(form_file: Option<&PathBuf>, flags: FormArgs) -> Result<JobFormInput> {
    let base = match form_file {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read form file {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Form file {} is not valid JSON", path.display()))?
        }
        None => JobFormInput::default(),
    };
    Ok(flags.apply(base))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_parse_generate_flags() {
        let cli = Cli::try_parse_from([
            "jd-generator",
            "--base-url",
            "http://jd.local",
            "generate",
            "--job-title",
            "Engineer",
            "--skills",
            "Rust",
            "--experience",
            "senior",
            "--download",
            "out",
            "--preview",
        ])
        .unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("http://jd.local"));
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert!(args.preview);
        assert_eq!(args.download, Some(PathBuf::from("out")));
        let form = args.form.apply(JobFormInput::default());
        assert_eq!(form.job_title, "Engineer");
        assert_eq!(form.skills_known, "Rust");
        assert_eq!(form.experience_level, "senior");
    }

    #[test]
    fn test_flags_override_form_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"jobTitle": "From File", "city": "Austin", "companyEmail": "a@b.com"}}"#
        )
        .unwrap();
        let flags = FormArgs {
            job_title: Some("From Flag".to_string()),
            ..Default::default()
        };
        let form = load_form(Some(&file.path().to_path_buf()), flags).unwrap();
        assert_eq!(form.job_title, "From Flag");
        assert_eq!(form.city, "Austin");
        assert_eq!(form.company_email, "a@b.com");
    }

    #[test]
    fn test_bad_form_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = load_form(Some(&file.path().to_path_buf()), FormArgs::default()).unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn test_parse_normalize() {
        let cli =
            Cli::try_parse_from(["jd-generator", "normalize", "jd.txt", "--email", "a@b.com"])
                .unwrap();
        let Commands::Normalize(args) = cli.command else {
            panic!("expected normalize");
        };
        assert_eq!(args.file, PathBuf::from("jd.txt"));
        assert_eq!(args.email.as_deref(), Some("a@b.com"));
    }
}
