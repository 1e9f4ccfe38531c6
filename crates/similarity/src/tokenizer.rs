//! Tokenization for the TF-IDF vectorizers.
//!
//! Text is lowercased and split into runs of two or more word characters,
//! so single letters and punctuation never reach the vocabulary.
//! An optional English stop-word list is applied to the content features.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Runs of 2+ word characters (Unicode-aware)
static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is a valid regex"));

/// English stop words removed from the content vocabulary.
///
/// This is the common list used by text-mining toolkits. Note that "show"
/// is on it, so "TV Show" contributes only "tv" to the content features.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
    "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
    "amongst", "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone",
    "anything", "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became",
    "because", "become", "becomes", "becoming", "been", "before", "beforehand", "behind",
    "being", "below", "beside", "besides", "between", "beyond", "bill", "both", "bottom",
    "but", "by", "call", "can", "cannot", "cant", "co", "con", "could", "couldnt", "cry",
    "de", "describe", "detail", "do", "done", "down", "due", "during", "each", "eg",
    "eight", "either", "eleven", "else", "elsewhere", "empty", "enough", "etc", "even",
    "ever", "every", "everyone", "everything", "everywhere", "except", "few", "fifteen",
    "fifty", "fill", "find", "fire", "first", "five", "for", "former", "formerly", "forty",
    "found", "four", "from", "front", "full", "further", "get", "give", "go", "had", "has",
    "hasnt", "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein",
    "hereupon", "hers", "herself", "him", "himself", "his", "how", "however", "hundred",
    "i", "ie", "if", "in", "inc", "indeed", "interest", "into", "is", "it", "its", "itself",
    "keep", "last", "latter", "latterly", "least", "less", "ltd", "made", "many", "may",
    "me", "meanwhile", "might", "mill", "mine", "more", "moreover", "most", "mostly",
    "move", "much", "must", "my", "myself", "name", "namely", "neither", "never",
    "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
    "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem",
    "seemed", "seeming", "seems", "serious", "several", "she", "should", "show", "side",
    "since", "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something",
    "sometime", "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than",
    "that", "the", "their", "them", "themselves", "then", "thence", "there", "thereafter",
    "thereby", "therefore", "therein", "thereupon", "these", "they", "thick", "thin",
    "third", "this", "those", "though", "three", "through", "throughout", "thru", "thus",
    "to", "together", "too", "top", "toward", "towards", "twelve", "twenty", "two", "un",
    "under", "until", "up", "upon", "us", "very", "via", "was", "we", "well", "were",
    "what", "whatever", "when", "whence", "whenever", "where", "whereafter", "whereas",
    "whereby", "wherein", "whereupon", "wherever", "whether", "which", "while", "whither",
    "who", "whoever", "whole", "whom", "whose", "why", "will", "with", "within", "without",
    "would", "yet", "you", "your", "yours", "yourself", "yourselves",
];

static STOP_WORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ENGLISH_STOP_WORDS.iter().copied().collect());

/// Splits documents into vocabulary terms.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer {
    remove_stop_words: bool,
}

impl Tokenizer {
    /// Tokenizer that keeps every term
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenizer that drops English stop words
    pub fn with_stop_words() -> Self {
        Self {
            remove_stop_words: true,
        }
    }

    pub fn removes_stop_words(&self) -> bool {
        self.remove_stop_words
    }

    /// Tokenize one document
    ///
    /// Example: "Action & Adventure, Sci-Fi" -> ["action", "adventure", "sci", "fi"]
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        TOKEN_PATTERN
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|token| !(self.remove_stop_words && is_stop_word(token)))
            .map(str::to_string)
            .collect()
    }
}

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORD_SET.contains(token)
}
