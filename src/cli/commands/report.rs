//! Report command handler
//!
//! Renders a student's progress report to stdout or to a file.

use grade_report::config::Config;
use grade_report::core::{
    loader::parse_student_file,
    models::{SortOrder, Student},
    report::{ReportContext, ReportFormat},
};
use grade_report::{error, info, verbose};
use std::path::{Path, PathBuf};

/// Where the rendered report goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Print to stdout
    Stdout,
    /// Write to a file
    File(PathBuf),
}

/// Run the report command.
///
/// # Arguments
/// * `input_file` - Path to the student record
/// * `destination` - Stdout or an output file
/// * `format` - Report format
/// * `order` - Transcript ordering
pub fn run(input_file: &Path, destination: &Destination, format: ReportFormat, order: SortOrder) {
    if let Err(err) = generate_report(input_file, destination, format, order) {
        error!(
            "Report generation failed for {}: {err}",
            input_file.display()
        );
        eprintln!("{err}");
        std::process::exit(1);
    }
}

/// Load a student record, mapping failures to a CLI message
///
/// # Errors
/// Returns a printable message if the file cannot be loaded
pub fn load_student(input_file: &Path) -> Result<Student, String> {
    let student = parse_student_file(input_file).map_err(|e| {
        error!("Failed to load student record {}: {e}", input_file.display());
        format!("✗ Failed to load {}: {e}", input_file.display())
    })?;

    info!("Student record loaded: {}", input_file.display());
    Ok(student)
}

/// Build the default output path inside the reports directory
///
/// The file is named `{input stem}_report.{ext}`. The directory is created
/// if needed.
///
/// # Errors
/// Returns a printable message if the directory cannot be created
pub fn default_output_path(
    input_file: &Path,
    format: ReportFormat,
    config: &Config,
) -> Result<PathBuf, String> {
    let reports_dir = PathBuf::from(&config.paths.reports_dir);
    std::fs::create_dir_all(&reports_dir).map_err(|e| {
        format!(
            "✗ Failed to create reports directory {}: {e}",
            reports_dir.display()
        )
    })?;

    let filename = input_file
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("student");
    Ok(reports_dir.join(format!("{filename}_report.{}", format.extension())))
}

fn generate_report(
    input_file: &Path,
    destination: &Destination,
    format: ReportFormat,
    order: SortOrder,
) -> Result<(), String> {
    let student = load_student(input_file)?;
    let ctx = ReportContext::new(&student, order);

    match destination {
        Destination::Stdout => {
            println!("{}", format.render(&ctx));
        }
        Destination::File(path) => {
            format
                .reporter()
                .generate(&ctx, path)
                .map_err(|e| format!("✗ {e}"))?;
            println!("✓ Report generated: {}", path.display());
            info!("Report exported to: {}", path.display());
        }
    }

    verbose!(
        "{} course(s), overall GPA {:.2}%",
        ctx.course_count(),
        ctx.summary.gpa
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_output_path() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let reports_dir = temp_dir.path().join("reports");

        let mut config = Config::from_defaults();
        config.paths.reports_dir = reports_dir.to_string_lossy().to_string();

        let path = default_output_path(
            Path::new("samples/students/sample.toml"),
            ReportFormat::Markdown,
            &config,
        )
        .expect("path should resolve");

        assert_eq!(path, reports_dir.join("sample_report.md"));
        assert!(reports_dir.is_dir());
    }

    #[test]
    fn test_load_student_missing_file() {
        let err = load_student(Path::new("missing/student.toml")).unwrap_err();
        assert!(err.starts_with("✗ Failed to load"));
    }
}
