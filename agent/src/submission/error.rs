use std::fmt;

#[derive(Debug, PartialEq)]
pub enum SubmissionError {
    CategoryRequest,
    CategoryNotOk,
    CategoryBadResponse,
    CategoryNoMatch,
}

impl std::error::Error for SubmissionError {}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionError::CategoryRequest => write!(f, "Failed to request category list"),
            SubmissionError::CategoryNotOk => write!(f, "Got non-Ok category response"),
            SubmissionError::CategoryBadResponse => {
                write!(f, "Failed to deserialize category response")
            }
            SubmissionError::CategoryNoMatch => write!(f, "No category matched configured name"),
        }
    }
}
