mod date_utils;

pub use date_utils::*;

/// Implements `From<T>` for a type which already implements `From<&T>`.
///
/// ```ignore
/// worklog_utils::derive_from_reference!(UserEntity, User);
/// ```
#[macro_export]
macro_rules! derive_from_reference {
    ($from_type:ty, $impl_type:ty) => {
        impl From<$from_type> for $impl_type {
            fn from(value: $from_type) -> Self {
                Self::from(&value)
            }
        }
    };
}
