/// API fetch state enum
#[derive(Clone, PartialEq, Default)]
pub enum FetchState<T> {
    #[default]
    NotStarted,
    Loading,
    Success(T),
    Error(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn from_result(result: Result<T, String>) -> Self {
        match result {
            Ok(data) => Self::Success(data),
            Err(err) => Self::Error(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_result() {
        let ok: FetchState<i32> = FetchState::from_result(Ok(3));
        assert_eq!(ok.data(), Some(&3));

        let err: FetchState<i32> = FetchState::from_result(Err("boom".to_string()));
        assert!(err.data().is_none());
        assert!(!err.is_loading());
    }
}
