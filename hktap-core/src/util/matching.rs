/// How well a candidate matches a search query.
///
/// Variants are ordered from the weakest to the strongest match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchQuality {
    // All query characters appear in order, with gaps
    Subsequence,
    Substring,
    Prefix,
    Exact,
}

/// Case-insensitive fuzzy match of `query` against `candidate`.
pub fn match_quality(candidate: &str, query: &str) -> Option<MatchQuality> {
    let candidate = candidate.trim().to_lowercase();
    let query = query.trim().to_lowercase();
    if candidate == query {
        return Some(MatchQuality::Exact);
    }
    if candidate.starts_with(&query) {
        return Some(MatchQuality::Prefix);
    }
    if candidate.contains(&query) {
        return Some(MatchQuality::Substring);
    }
    is_subsequence(&candidate, &query).then_some(MatchQuality::Subsequence)
}

fn is_subsequence(haystack: &str, needle: &str) -> bool {
    let mut haystack = haystack.chars();
    needle
        .chars()
        .all(|n| haystack.by_ref().any(|h| h == n))
}
