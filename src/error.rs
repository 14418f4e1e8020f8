// Copyright (C) 2020-2026 Andy Kurnia.

pub struct InputError {
    s: String,
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.s)
    }
}

impl std::fmt::Debug for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        (self as &dyn std::fmt::Display).fmt(f)
    }
}

impl std::error::Error for InputError {}

pub fn new(s: String) -> InputError {
    InputError { s }
}

pub type BoxAnyError = Box<dyn std::error::Error>;
pub type Returns<T> = Result<T, BoxAnyError>;

#[macro_export]
macro_rules! return_error {
    ($error:expr) => {
        return Err($crate::error::new($error).into());
    };
}

// Failures a best-play search can report. Running out of time and finding
// no legal play are outcomes, not errors.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("dictionary unavailable: {0}")]
    DictionaryUnavailable(String),
    #[error("execution context failure: {0}")]
    ExecutionContextFailure(String),
    #[error("malformed input: {0}")]
    MalformedInput(String),
}

impl SearchError {
    pub fn dictionary_unavailable(e: impl std::fmt::Display) -> Self {
        SearchError::DictionaryUnavailable(e.to_string())
    }

    pub fn malformed(e: impl std::fmt::Display) -> Self {
        SearchError::MalformedInput(e.to_string())
    }
}
