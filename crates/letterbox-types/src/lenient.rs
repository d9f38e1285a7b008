use serde::{Deserialize, Deserializer};

/// Decode a field that may be `null`, substituting `T::default()`.
///
/// Combine with `#[serde(default)]` so that a missing key behaves the same
/// as an explicit `null`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "null_as_default")]
        year: i32,
        #[serde(default, deserialize_with = "null_as_default")]
        name: String,
    }

    #[test]
    fn test_null_becomes_default() {
        let s: Sample = serde_json::from_str(r#"{"year": null, "name": null}"#).unwrap();
        assert_eq!(s.year, 0);
        assert_eq!(s.name, "");
    }

    #[test]
    fn test_missing_becomes_default() {
        let s: Sample = serde_json::from_str("{}").unwrap();
        assert_eq!(s.year, 0);
        assert_eq!(s.name, "");
    }

    #[test]
    fn test_present_value_kept() {
        let s: Sample = serde_json::from_str(r#"{"year": 1979, "name": "Alien"}"#).unwrap();
        assert_eq!(s.year, 1979);
        assert_eq!(s.name, "Alien");
    }
}
