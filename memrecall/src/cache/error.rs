use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum CacheError {
    CapacityOutOfRange,
}

impl CacheError {
    pub fn to_static_string(&self) -> &'static str {
        match self {
            CacheError::CapacityOutOfRange => "Capacity must be greater than or equal to one",
        }
    }
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_static_string())
    }
}

impl std::error::Error for CacheError {}

pub type Result<T> = std::result::Result<T, CacheError>;
