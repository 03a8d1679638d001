use serde::{Deserialize, Deserializer};

/// Reads JSON `null` as the type's default. The catalog API sends `null` for
/// unset lists and strings.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
