//! Client-side checks run before a sales file is sent to `/upload`

use thiserror::Error;

/// Columns the service expects in the uploaded CSV
pub const REQUIRED_COLUMNS: [&str; 3] = ["Date", "SKU", "Units_Sold"];

/// Upload rejected before any network call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Select a CSV file first")]
    NoFile,
    #[error("{0} is not a CSV file")]
    NotCsv(String),
    #[error("{0} is empty")]
    Empty(String),
}

/// Name and size of a file picked by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    pub name: String,
    pub size: u64,
}

impl FileMeta {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    fn has_csv_extension(&self) -> bool {
        self.name
            .rsplit_once('.')
            .is_some_and(|(stem, ext)| !stem.is_empty() && ext.eq_ignore_ascii_case("csv"))
    }
}

/// Accept only a non-empty `.csv` file
pub fn validate_upload(file: Option<&FileMeta>) -> Result<&FileMeta, UploadError> {
    let file = file.ok_or(UploadError::NoFile)?;

    if !file.has_csv_extension() {
        return Err(UploadError::NotCsv(file.name.clone()));
    }
    if file.size == 0 {
        return Err(UploadError::Empty(file.name.clone()));
    }

    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        assert_eq!(validate_upload(None), Err(UploadError::NoFile));
    }

    #[test]
    fn test_rejects_non_csv() {
        let file = FileMeta::new("sales.xlsx", 2048);
        assert_eq!(
            validate_upload(Some(&file)),
            Err(UploadError::NotCsv("sales.xlsx".into()))
        );

        let hidden = FileMeta::new(".csv", 10);
        assert!(validate_upload(Some(&hidden)).is_err());
    }

    #[test]
    fn test_rejects_empty() {
        let file = FileMeta::new("sales.csv", 0);
        let err = validate_upload(Some(&file)).unwrap_err();
        assert_eq!(err.to_string(), "sales.csv is empty");
    }

    #[test]
    fn test_accepts_csv_case_insensitive() {
        let file = FileMeta::new("Sales_2024.CSV", 512);
        assert!(validate_upload(Some(&file)).is_ok());
    }
}
