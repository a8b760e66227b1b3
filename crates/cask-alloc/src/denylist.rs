/// Fixed set of substrings a minted identifier must never contain.
///
/// Screening is substring containment after normalization: both the candidate
/// and the denylist entries are lowercased and stripped of the separators
/// `-`, `_`, and space before comparison. The list mixes profanity and slurs
/// with reserved technical words that would be confusing in a share link.
#[derive(Clone, Debug)]
pub struct Denylist {
    words: Vec<String>,
}

/// Default denylist entries.
///
/// Reserved technical words first, then offensive terms. Entries shorter than
/// the current identifier length match as substrings, so a single entry here
/// blocks a whole family of identifiers.
pub const DEFAULT_WORDS: &[&str] = &[
    // Reserved technical words
    "admin", "api", "root", "sys", "www",
    // Profanity and slurs
    "anal", "anus", "arse", "ass", "bitch", "boob", "clit", "cock", "cum",
    "cunt", "dick", "dildo", "fag", "fuck", "homo", "jizz", "kike", "milf",
    "nazi", "negro", "nigga", "nigger", "penis", "piss", "porn", "pube",
    "pussy", "rape", "sex", "shit", "slut", "spic", "tit", "twat", "wank",
    "whore", "xxx",
];

impl Denylist {
    /// Build a denylist from raw entries. Entries are normalized once here.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| normalize(w.as_ref()))
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// An empty denylist (accepts everything).
    pub fn empty() -> Self {
        Self { words: Vec::new() }
    }

    /// Returns `true` if the candidate contains no denylisted substring.
    pub fn is_clean(&self, candidate: &str) -> bool {
        let normalized = normalize(candidate);
        !self.words.iter().any(|w| normalized.contains(w.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for Denylist {
    fn default() -> Self {
        Self::new(DEFAULT_WORDS)
    }
}

/// Lowercase and strip the separators `-`, `_`, and space.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}
