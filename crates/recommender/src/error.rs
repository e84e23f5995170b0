#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TrainingError {
    #[error("workout log is empty")]
    EmptyLog,
    #[error("workout log needs at least 2 distinct workout dates ({0} found)")]
    InsufficientHistory(usize),
    #[error("model fitting failed: {0}")]
    Fit(String),
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RecommendError {
    #[error("unknown recommendation strategy: {0}")]
    UnknownStrategy(String),
}
