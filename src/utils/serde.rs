use serde::{Deserialize, Deserializer};

/// Read a field that the service may send as `null`, e.g. an empty list of
/// tipos or a Pokémon without an image.
pub fn null_as_default<'de, D, T>(data: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let maybe: Option<T> = Deserialize::deserialize(data)?;
    Ok(maybe.unwrap_or_default())
}
