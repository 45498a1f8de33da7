use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// Ordered genre list, stored as a JSON array so it works on any backend.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Genres(pub Vec<String>);

impl Genres {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for Genres {
    fn from(genres: Vec<String>) -> Self {
        Self(genres)
    }
}

impl<'a> IntoIterator for &'a Genres {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genres_serialize_as_plain_array() {
        let genres = Genres::from(vec!["Jazz".to_string(), "Folk".to_string()]);
        assert_eq!(serde_json::to_string(&genres).unwrap(), r#"["Jazz","Folk"]"#);
    }
}
