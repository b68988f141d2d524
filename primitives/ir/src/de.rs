//! Lenient decoding helpers.

use serde::{Deserialize, Deserializer};

/// Decode a field that may be `null`, substituting the type's zero value.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
