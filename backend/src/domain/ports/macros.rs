//! Helper macro generating port error enums with snake_case constructors.
//!
//! Each variant carries named fields and a `thiserror` message. For a variant
//! `NotFound { id: String }` the macro also emits `fn not_found(id: impl
//! Into<String>) -> Self`, so adapters can write `Error::not_found(raw_id)`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field: $ty),* },
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = concat!("Construct [`", stringify!($name), "::", stringify!($variant), "`].")]
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                        Self::$variant { $($field: $field.into()),* }
                    }
                }
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum SamplePortError {
            Missing { id: String } => "record {id} not found",
            Rejected { status: u16, message: String } => "rejected with {status}: {message}",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = SamplePortError::missing("e-1");
        assert_eq!(err, SamplePortError::Missing { id: "e-1".to_owned() });
        assert_eq!(err.to_string(), "record e-1 not found");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = SamplePortError::rejected(503_u16, "maintenance");
        assert_eq!(err.to_string(), "rejected with 503: maintenance");
    }
}
