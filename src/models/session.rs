use serde::Serialize;

use super::{SearchResponse, Watchlist};

/// Everything that belongs to one interactive session
///
/// Dropped with the process; nothing here is persisted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Session {
    pub watchlist: Watchlist,
    /// Results of the latest successful search, replaced on every search
    pub last_results: Option<SearchResponse>,
}

impl Session {
    /// Creates a fresh session with an empty watchlist
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_results(&mut self, response: SearchResponse) {
        self.last_results = Some(response);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Strategy;
    use chrono::Utc;

    fn response(title: &str) -> SearchResponse {
        SearchResponse {
            strategy: Strategy::Title {
                matched_title: title.to_string(),
            },
            results: Vec::new(),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_new_results_replace_previous() {
        let mut session = Session::new();
        session.watchlist.add("Aliens".to_string(), 679);

        session.record_results(response("Avatar"));
        session.record_results(response("Titanic"));

        let last = session.last_results.unwrap();
        assert_eq!(
            last.strategy,
            Strategy::Title {
                matched_title: "Titanic".to_string()
            }
        );
        assert_eq!(session.watchlist.len(), 1);
    }
}
