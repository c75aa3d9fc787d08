//! Tweet normalization shared by the predict and explain paths.
mod lemmatizer;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use aho_corasick::{AhoCorasick, MatchKind};
use anyhow::{Context, Result};
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use rustc_hash::FxHashSet;

pub use lemmatizer::Lemmatizer;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?\S*|www\S+").expect("compile url regex"));
static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\w+").expect("compile mention regex"));

/// How tokens are reduced after stopword removal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NormalizeMode {
    #[default]
    Lemmatize,
    Stem,
}

impl FromStr for NormalizeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lem" | "lemma" | "lemmatize" => Ok(Self::Lemmatize),
            "stem" | "porter" => Ok(Self::Stem),
            other => Err(format!("unknown normalize mode: {other}")),
        }
    }
}

impl fmt::Display for NormalizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizeMode::Lemmatize => write!(f, "lem"),
            NormalizeMode::Stem => write!(f, "stem"),
        }
    }
}

enum Reducer {
    Lemma(Lemmatizer),
    Stem(Stemmer),
}

impl Reducer {
    fn reduce(&self, token: &str) -> String {
        match self {
            Reducer::Lemma(lemmatizer) => lemmatizer.lemmatize(token),
            Reducer::Stem(stemmer) => stemmer.stem(token).into_owned(),
        }
    }
}

/// Cleans raw tweet text into a space-joined token string.
///
/// The pipeline strips URLs, mentions and `#`, substitutes emoji descriptions,
/// drops non-ASCII characters and punctuation, lowercases, removes stopwords
/// and finally lemmatizes or stems every token. The output never contains
/// `@`, `#` or `http`.
pub struct TextNormalizer {
    emoji_matcher: Option<AhoCorasick>,
    emoji_replacements: Vec<String>,
    stopwords: FxHashSet<String>,
    reducer: Reducer,
    mode: NormalizeMode,
}

impl TextNormalizer {
    /// Builds a normalizer from the loaded lexicons.
    ///
    /// # Errors
    /// Fails when the emoji automaton cannot be built.
    pub fn new(
        emojis: &HashMap<String, String>,
        stopwords: FxHashSet<String>,
        lemma_exceptions: HashMap<String, String>,
        mode: NormalizeMode,
    ) -> Result<Self> {
        let (patterns, emoji_replacements): (Vec<&str>, Vec<String>) = emojis
            .iter()
            .filter(|(emoji, _)| !emoji.is_empty())
            .map(|(emoji, description)| (emoji.as_str(), format!(" {description} ")))
            .unzip();

        let emoji_matcher = if patterns.is_empty() {
            None
        } else {
            Some(
                AhoCorasick::builder()
                    .match_kind(MatchKind::LeftmostLongest)
                    .build(&patterns)
                    .context("failed to build emoji matcher")?,
            )
        };

        let reducer = match mode {
            NormalizeMode::Lemmatize => {
                Reducer::Lemma(Lemmatizer::with_exceptions(lemma_exceptions))
            }
            NormalizeMode::Stem => Reducer::Stem(Stemmer::create(Algorithm::English)),
        };

        Ok(Self {
            emoji_matcher,
            emoji_replacements,
            stopwords,
            reducer,
            mode,
        })
    }

    /// A normalizer without emoji map or stopwords.
    #[must_use]
    pub fn plain(mode: NormalizeMode) -> Self {
        let reducer = match mode {
            NormalizeMode::Lemmatize => Reducer::Lemma(Lemmatizer::default()),
            NormalizeMode::Stem => Reducer::Stem(Stemmer::create(Algorithm::English)),
        };
        Self {
            emoji_matcher: None,
            emoji_replacements: Vec::new(),
            stopwords: FxHashSet::default(),
            reducer,
            mode,
        }
    }

    #[must_use]
    pub fn mode(&self) -> NormalizeMode {
        self.mode
    }

    #[must_use]
    pub fn normalize(&self, text: &str) -> String {
        self.tokens(text).join(" ")
    }

    /// Same pipeline as [`normalize`](Self::normalize), returning the tokens.
    #[must_use]
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let text = URL_RE.replace_all(text, "");
        let text = MENTION_RE.replace_all(&text, "");
        let text = text.replace('#', "");

        let text = match &self.emoji_matcher {
            Some(matcher) => matcher.replace_all(&text, &self.emoji_replacements),
            None => text,
        };

        let cleaned: String = text
            .chars()
            .filter(|c| c.is_ascii() && !c.is_ascii_punctuation())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        cleaned
            .split_whitespace()
            .filter(|token| !self.stopwords.contains(*token))
            .map(|token| self.reducer.reduce(token))
            .filter(|token| !token.is_empty() && !token.contains("http"))
            .collect()
    }
}

impl fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextNormalizer")
            .field("emojis", &self.emoji_replacements.len())
            .field("stopwords", &self.stopwords.len())
            .field("mode", &self.mode)
            .finish()
    }
}
