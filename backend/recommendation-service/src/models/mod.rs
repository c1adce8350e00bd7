use serde::{Deserialize, Serialize};

/// Raw catalog row for one edition of a book.
///
/// Several records may share a title (reprints, editions); lookups resolve a
/// title to the first record in table order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    pub title: String,
    pub author: String,
    pub cover_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_of_publication: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
}

/// Precomputed popular-book row. The table arrives sorted by popularity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularRecord {
    pub title: String,
    pub author: String,
    pub cover_url: String,
    pub avg_rating: f64,
    pub num_ratings: u64,
}

/// One ranked recommendation returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub author: String,
    pub cover_url: String,
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_record_optional_fields_default() {
        let json = r#"{"title":"Dune","author":"Frank Herbert","cover_url":"http://img/dune.jpg"}"#;
        let record: BookRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.title, "Dune");
        assert!(record.isbn.is_none());
        assert!(record.publisher.is_none());
    }
}
