use serde::{Deserialize, Serialize};

/// A system-suggested question derived from the ingested documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedQuestion {
    pub id: usize,
    pub text: String,
}

/// Candidate questions parsed from an ingestion response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSuggestionList {
    items: Vec<RecommendedQuestion>,
}

impl QuestionSuggestionList {
    /// Split the line-delimited ingestion message into questions.
    /// Blank lines are dropped; ids are assigned in surviving order from 0.
    pub fn from_message(message: &str) -> Self {
        let items = message
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(id, text)| RecommendedQuestion {
                id,
                text: text.to_string(),
            })
            .collect();
        Self { items }
    }

    pub fn get(&self, id: usize) -> Option<&RecommendedQuestion> {
        self.items.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecommendedQuestion> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[RecommendedQuestion] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_blank_lines_dropped_and_ids_assigned() {
        let list = QuestionSuggestionList::from_message("What is X?\n\nWhy Y?\n");
        assert_eq!(
            list.as_slice(),
            &[
                RecommendedQuestion { id: 0, text: "What is X?".to_string() },
                RecommendedQuestion { id: 1, text: "Why Y?".to_string() },
            ]
        );
    }

    #[test]
    fn test_lines_are_trimmed() {
        let list = QuestionSuggestionList::from_message("  1. First?  \r\n \t \r\n2. Second?\r\n");
        let texts: Vec<&str> = list.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, vec!["1. First?", "2. Second?"]);
        assert_eq!(list.get(1).map(|q| q.id), Some(1));
    }

    #[test]
    fn test_empty_message() {
        assert!(QuestionSuggestionList::from_message("").is_empty());
        assert!(QuestionSuggestionList::from_message("\n   \n").is_empty());
        assert_eq!(QuestionSuggestionList::from_message("\n   \n").get(0), None);
    }
}
