//! Endpoint wrappers grouped by product family
//!
//! Each group borrows a [`Dispatcher`](crate::Dispatcher) and exposes one
//! method per endpoint. Methods check their required arguments, put them into
//! [`Params`](crate::Params) first, merge the optional fields of an options
//! struct after them, and dispatch with a fixed verb and path.

/// Declare an options struct: every field optional, camelCase on the wire,
/// buildable with `Options::builder()` or `Options { .., ..Default::default() }`.
macro_rules! options {
    (
        $(#[$meta:meta])*
        $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, typed_builder::TypedBuilder)]
        #[serde(rename_all = "camelCase")]
        #[builder(field_defaults(default, setter(strip_option, into)))]
        pub struct $name {
            $(
                $(#[$field_meta])*
                pub $field: Option<$ty>,
            )*
        }
    };
}

pub mod broker;
pub mod coinm;
pub mod futures;
pub mod spot;
pub mod usdm;

options! {
    /// Only `recvWindow`
    RecvWindowOptions {
        /// Milliseconds the request stays valid after `timestamp` (max 60000)
        recv_window: u64,
    }
}

options! {
    /// Result size limit
    LimitOptions {
        limit: u32,
    }
}

options! {
    /// Time range and limit
    FilterOptions {
        start_time: u64,
        end_time: u64,
        limit: u32,
    }
}

options! {
    /// Time range, limit and `recvWindow`
    SignedFilterOptions {
        start_time: u64,
        end_time: u64,
        limit: u32,
        recv_window: u64,
    }
}

/// Join a list into the comma-separated form some endpoints expect
pub(crate) fn join_csv<S: AsRef<str>>(items: &[S]) -> String {
    items.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{build_query_string, sanitize, Params};

    #[test]
    fn test_options_skip_unset_fields() {
        let opts = FilterOptions::builder().limit(10u32).build();
        let params = Params::new().merge_options(&opts).unwrap();
        assert_eq!(build_query_string(&sanitize(&params)), "limit=10");
    }

    #[test]
    fn test_options_field_order_follows_declaration() {
        let opts = SignedFilterOptions {
            recv_window: Some(5000),
            start_time: Some(1),
            ..Default::default()
        };
        let params = Params::new().merge_options(&opts).unwrap();
        assert_eq!(
            build_query_string(&sanitize(&params)),
            "startTime=1&recvWindow=5000"
        );
    }

    #[test]
    fn test_join_csv() {
        assert_eq!(join_csv(&["BTC", "ETH"]), "BTC,ETH");
        assert_eq!(join_csv::<&str>(&[]), "");
    }
}
