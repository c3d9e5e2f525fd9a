//! Queue item domain model

use serde::{Deserialize, Serialize};

/// A triggered job waiting in the Jenkins queue
///
/// Jenkins answers a trigger with the queue item URL in the `Location` header.
/// The item resolves to a build once an executor picks it up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueItem {
    /// Absolute URL of the queue item, always ending with `/`
    pub url: String,

    /// Numeric queue id, when it can be read from the URL
    pub id: Option<u64>,
}

impl QueueItem {
    /// Creates a queue item from the location returned by a trigger
    pub fn from_location(location: &str) -> Self {
        let url = if location.ends_with('/') {
            location.to_string()
        } else {
            format!("{}/", location)
        };

        let id = url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse::<u64>().ok());

        Self { url, id }
    }
}

impl std::fmt::Display for QueueItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "queue item #{}", id),
            None => write!(f, "queue item {}", self.url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_location_parses_id() {
        let item = QueueItem::from_location("https://ci.example.com/queue/item/42/");
        assert_eq!(item.id, Some(42));
        assert_eq!(item.url, "https://ci.example.com/queue/item/42/");
    }

    #[test]
    fn test_from_location_adds_trailing_slash() {
        let item = QueueItem::from_location("https://ci.example.com/queue/item/7");
        assert_eq!(item.url, "https://ci.example.com/queue/item/7/");
        assert_eq!(item.id, Some(7));
    }

    #[test]
    fn test_from_location_without_numeric_id() {
        let item = QueueItem::from_location("https://ci.example.com/queue/item/abc/");
        assert_eq!(item.id, None);
        assert_eq!(item.to_string(), "queue item https://ci.example.com/queue/item/abc/");
    }
}
