use crate::errors::{AppError, AppResult};

/// The single accepted report format.
pub const ALLOWED_EXTENSION: &str = ".csv";

/// Upload ceiling: exactly 10 MiB passes, one byte more is rejected.
pub const MAX_REPORT_SIZE: u64 = 10 * 1024 * 1024;

pub struct ReportValidator;

impl ReportValidator {
    /// Accepts a candidate report by name and size. Rejected candidates
    /// never become queue entries.
    pub fn validate_report_file(name: &str, size: u64) -> AppResult<()> {
        if !name.ends_with(ALLOWED_EXTENSION) {
            return Err(AppError::invalid_file_type(name));
        }
        if size > MAX_REPORT_SIZE {
            return Err(AppError::file_too_large(name, size));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_csv_extension() {
        let err = ReportValidator::validate_report_file("report.xlsx", 1024).unwrap_err();
        assert_eq!(err.to_string(), "Only CSV files are allowed.");
        assert!(ReportValidator::validate_report_file("report", 1024).is_err());
    }

    #[test]
    fn size_ceiling_is_inclusive() {
        assert!(ReportValidator::validate_report_file("a.csv", MAX_REPORT_SIZE).is_ok());
        let err =
            ReportValidator::validate_report_file("a.csv", MAX_REPORT_SIZE + 1).unwrap_err();
        assert_eq!(err.to_string(), "File size exceeds 10MB limit.");
    }

    #[test]
    fn extension_check_runs_before_size_check() {
        let err = ReportValidator::validate_report_file("huge.bin", MAX_REPORT_SIZE + 1)
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidFileType { .. }));
    }
}
