use regex::Regex;
use tracing::warn;

use crate::model::config::HintTrackerConfig;

// ---------------------------------------------------------------------------
// Fuzzy matching
// ---------------------------------------------------------------------------

/// Fuzzy score a query against a target string: every query character must
/// appear in order (case-insensitive). Higher is better. An empty query never
/// matches.
pub fn fuzzy_score(query: &str, target: &str) -> Option<i32> {
    if query.is_empty() {
        return None;
    }

    let query_lower: Vec<char> = query.chars().flat_map(|c| c.to_lowercase()).collect();
    // Positions, word starts and length all come from the lowered target so
    // they agree when lowering expands a character.
    let target: Vec<char> = target.chars().flat_map(|c| c.to_lowercase()).collect();

    let mut matched_indices = Vec::with_capacity(query_lower.len());
    let mut search_from = 0;

    for &qc in &query_lower {
        let pos = target
            .get(search_from..)?
            .iter()
            .position(|&tc| tc == qc)?;
        let idx = search_from + pos;
        matched_indices.push(idx);
        search_from = idx + 1;
    }

    let mut score: i32 = 0;
    let half = target.len() / 2;

    for (mi, &idx) in matched_indices.iter().enumerate() {
        let is_word_start = idx == 0
            || matches!(
                target.get(idx.wrapping_sub(1)),
                Some(' ' | '-' | '(' | ':' | '\'')
            );
        if is_word_start {
            score += 10;
        }

        if mi > 0 && idx == matched_indices[mi - 1] + 1 {
            score += 5;
        }

        if idx < half {
            score += 3;
        }

        if mi > 0 {
            let gap = idx.saturating_sub(matched_indices[mi - 1] + 1);
            score -= gap as i32;
        }
    }

    // Unmatched trailing characters count against long targets.
    score -= target.len().saturating_sub(matched_indices.len()) as i32 / 4;

    Some(score)
}

/// Rank candidates by score, best first. Equal scores keep candidate order.
pub fn rank<'a>(query: &str, candidates: &'a [String]) -> Vec<(usize, &'a str, i32)> {
    let mut ranked: Vec<(usize, &str, i32)> = candidates
        .iter()
        .enumerate()
        .filter_map(|(i, c)| fuzzy_score(query, c).map(|s| (i, c.as_str(), s)))
        .collect();
    ranked.sort_by(|a, b| b.2.cmp(&a.2));
    ranked
}

/// Index and text of the best candidate for `query`
pub fn best_match<'a>(query: &str, candidates: &'a [String]) -> Option<(usize, &'a str)> {
    rank(query, candidates).first().map(|&(i, c, _)| (i, c))
}

// ---------------------------------------------------------------------------
// Location matching
// ---------------------------------------------------------------------------

/// Matches hint text against the configured location lists
#[derive(Debug, Clone, Default)]
pub struct LocationMatcher {
    abbreviations: Vec<(Regex, String)>,
    locations: Vec<String>,
    always: Vec<String>,
}

impl LocationMatcher {
    pub fn new(config: &HintTrackerConfig) -> Self {
        let abbreviations = config
            .abbreviations
            .iter()
            .filter_map(|(short, long)| {
                let pattern = format!(r"(?i)\b{}\b", regex::escape(short));
                match Regex::new(&pattern) {
                    Ok(re) => Some((re, long.clone())),
                    Err(e) => {
                        warn!(abbreviation = %short, error = %e, "skipping abbreviation");
                        None
                    }
                }
            })
            .collect();

        LocationMatcher {
            abbreviations,
            locations: config.locations.clone(),
            always: config.always_locations.clone(),
        }
    }

    /// Replace whole-word abbreviations with their full names
    pub fn expand(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (re, long) in &self.abbreviations {
            out = re.replace_all(&out, regex::NoExpand(long)).into_owned();
        }
        out
    }

    /// Canonical location name for free text, if any location matches
    pub fn match_location(&self, text: &str) -> Option<&str> {
        let expanded = self.expand(text.trim());
        best_match(&expanded, &self.locations).map(|(_, name)| name)
    }

    /// Split "<target> <text>" on the first whitespace and match the target
    /// against the always list. Returns the slot and the remaining text.
    pub fn parse_always(&self, text: &str) -> Option<(usize, String)> {
        let (target, rest) = text.split_once(char::is_whitespace).unwrap_or((text, ""));
        let (slot, _) = best_match(target, &self.always)?;
        Some((slot, rest.to_string()))
    }

    pub fn always_locations(&self) -> &[String] {
        &self.always
    }
}
