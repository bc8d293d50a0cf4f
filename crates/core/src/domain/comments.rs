/// A top-level comment as delivered by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    pub like_count: Option<u64>,
}

impl Comment {
    pub fn new(text: impl Into<String>, like_count: Option<u64>) -> Self {
        Self {
            text: text.into(),
            like_count,
        }
    }
}

/// Sorts by like count, most liked first. The sort is stable, and comments
/// without a count rank below every counted one, including zero.
pub fn sort_by_popularity(comments: &mut [Comment]) {
    comments.sort_by(|a, b| b.like_count.cmp(&a.like_count));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_places_missing_counts_last() {
        let mut comments = vec![
            Comment::new("five", Some(5)),
            Comment::new("missing", None),
            Comment::new("twenty", Some(20)),
            Comment::new("zero", Some(0)),
        ];
        sort_by_popularity(&mut comments);
        let counts: Vec<_> = comments.iter().map(|c| c.like_count).collect();
        assert_eq!(counts, vec![Some(20), Some(5), Some(0), None]);
    }

    #[test]
    fn sort_keeps_delivery_order_for_ties() {
        let mut comments = vec![
            Comment::new("first", Some(3)),
            Comment::new("second", Some(7)),
            Comment::new("third", Some(3)),
            Comment::new("fourth", None),
            Comment::new("fifth", None),
        ];
        sort_by_popularity(&mut comments);
        let texts: Vec<_> = comments.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["second", "first", "third", "fourth", "fifth"]);
    }
}
