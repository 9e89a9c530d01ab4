/// Parse failure for the report types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypesError {
    EmptyAccount,
    UnknownCategory(String),
}

impl std::fmt::Display for TypesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyAccount => write!(f, "account id must not be empty"),
            Self::UnknownCategory(raw) => write!(f, "unknown category: {raw:?}"),
        }
    }
}

impl std::error::Error for TypesError {}
