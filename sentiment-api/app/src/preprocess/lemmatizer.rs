use std::collections::HashMap;

/// Irregular and ambiguous plurals the suffix rules would get wrong.
const BUILTIN_EXCEPTIONS: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("firemen", "fireman"),
    ("policemen", "policeman"),
    ("businessmen", "businessman"),
    ("gentlemen", "gentleman"),
    ("fishermen", "fisherman"),
    ("freshmen", "freshman"),
    ("people", "people"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("lives", "life"),
    ("leaves", "leaf"),
    ("wolves", "wolf"),
    ("halves", "half"),
    ("selves", "self"),
    ("movies", "movie"),
    ("cookies", "cookie"),
    ("selfies", "selfie"),
    ("zombies", "zombie"),
    ("hippies", "hippie"),
    ("goodies", "goodie"),
    ("brownies", "brownie"),
    ("rookies", "rookie"),
    ("aches", "ache"),
    ("headaches", "headache"),
    ("niches", "niche"),
    ("caches", "cache"),
    ("earaches", "earache"),
    ("toothaches", "toothache"),
    ("stomachaches", "stomachache"),
    ("avalanches", "avalanche"),
    ("cliches", "cliche"),
    ("moustaches", "moustache"),
    ("mustaches", "mustache"),
    ("quiches", "quiche"),
    ("psyches", "psyche"),
    ("news", "news"),
    ("series", "series"),
    ("species", "species"),
];

/// Words ending in these are left alone by the `-s` rule.
const PROTECTED_SUFFIXES: [&str; 4] = ["ss", "us", "is", "ous"];

/// Dictionary-less noun lemmatizer.
///
/// Looks the word up in an exception table first, then applies plural suffix
/// rules. Words of three letters or fewer are returned unchanged. Irregular
/// `-men` plurals and `-che` nouns only reduce through the exception table.
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    exceptions: HashMap<String, String>,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::with_exceptions(HashMap::new())
    }
}

impl Lemmatizer {
    /// Built-in exceptions, overridden by `extra` where both define a word.
    #[must_use]
    pub fn with_exceptions(extra: HashMap<String, String>) -> Self {
        let mut exceptions: HashMap<String, String> = BUILTIN_EXCEPTIONS
            .iter()
            .map(|(word, lemma)| ((*word).to_string(), (*lemma).to_string()))
            .collect();
        exceptions.extend(extra);
        Self { exceptions }
    }

    #[must_use]
    pub fn lemmatize(&self, word: &str) -> String {
        if let Some(lemma) = self.exceptions.get(word) {
            return lemma.clone();
        }
        if word.len() <= 3 || PROTECTED_SUFFIXES.iter().any(|s| word.ends_with(s)) {
            return word.to_string();
        }

        if word.len() > 4
            && let Some(stem) = word.strip_suffix("ies")
        {
            return format!("{stem}y");
        }
        for suffix in ["sses", "ches", "shes", "xes"] {
            if word.ends_with(suffix) {
                return word[..word.len() - 2].to_string();
            }
        }
        match word.strip_suffix('s') {
            Some(stem) => stem.to_string(),
            None => word.to_string(),
        }
    }
}
