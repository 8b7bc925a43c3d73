pub mod recovery_plan;
pub mod simplified;

use serde::{Deserialize, Deserializer};

/// Decode a field that the backend may send as `null` or omit entirely,
/// treating both as the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
