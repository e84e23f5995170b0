#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LogReadError {
    #[error("workout log is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("workout log could not be read")]
    Unreadable,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LogWriteError {
    #[error("workout log could not be written")]
    Unwritable,
}
