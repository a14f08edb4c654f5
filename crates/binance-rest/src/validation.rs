//! Required-argument checks run before any request is built

use crate::error::{RestError, RestResult};

/// Values that can be absent or empty
pub trait Required {
    /// Check whether the value counts as missing
    fn is_missing(&self) -> bool;
}

impl Required for str {
    fn is_missing(&self) -> bool {
        self.trim().is_empty()
    }
}

impl Required for String {
    fn is_missing(&self) -> bool {
        self.as_str().is_missing()
    }
}

impl<T> Required for [T] {
    fn is_missing(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Required for Vec<T> {
    fn is_missing(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Required> Required for Option<T> {
    fn is_missing(&self) -> bool {
        self.as_ref().map_or(true, Required::is_missing)
    }
}

impl<T: Required + ?Sized> Required for &T {
    fn is_missing(&self) -> bool {
        (**self).is_missing()
    }
}

/// Fail with [`RestError::MissingParameter`] if `value` is missing
pub fn require<T: Required + ?Sized>(name: &'static str, value: &T) -> RestResult<()> {
    if value.is_missing() {
        Err(RestError::MissingParameter(name))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_strings() {
        assert!(require("symbol", "BTCUSDT").is_ok());
        assert!(matches!(
            require("symbol", ""),
            Err(RestError::MissingParameter("symbol"))
        ));
        assert!(require("symbol", "  ").is_err());
        assert!(require("asset", &String::from("BNB")).is_ok());
    }

    #[test]
    fn test_require_collections_and_options() {
        let empty: Vec<u64> = Vec::new();
        assert!(require("orderIdList", &empty).is_err());
        assert!(require("orderIdList", &vec![1u64]).is_ok());
        assert!(require("symbols", &["BTCUSDT"][..]).is_ok());

        let none: Option<String> = None;
        assert!(require("listenKey", &none).is_err());
        assert!(require("listenKey", &Some("abc".to_string())).is_ok());
        assert!(require("listenKey", &Some(String::new())).is_err());
    }
}
