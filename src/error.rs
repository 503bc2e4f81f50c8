use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TodoListError {
    /// No item lives at `index`.
    #[error("invalid index: {index} (list has {len} items)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no todo titled '{title}'")]
    NotFound { title: String },
}

pub type Result<T> = std::result::Result<T, TodoListError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_error_names_index_and_length() {
        let err = TodoListError::IndexOutOfRange { index: 5, len: 2 };
        assert_eq!(err.to_string(), "invalid index: 5 (list has 2 items)");
    }

    #[test]
    fn not_found_quotes_title() {
        let err = TodoListError::NotFound {
            title: "milk".to_string(),
        };
        assert_eq!(err.to_string(), "no todo titled 'milk'");
    }
}
