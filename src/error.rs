use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Invalid value {value:?} in column '{column}' at line {line}")]
    InvalidValue {
        column: String,
        line: usize,
        value: String,
    },

    #[error("Store error: {0}")]
    Store(#[from] mongodb::error::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_names_column_and_line() {
        let err = ReportError::InvalidValue {
            column: "シナリオテスト総計：OK".to_string(),
            line: 4,
            value: "x".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "Invalid value \"x\" in column 'シナリオテスト総計：OK' at line 4"
        );
    }
}
