//! Name inflection: casing transforms, pluralization, singularization.
//!
//! These are free functions over plain string slices. The rule tables are
//! process-wide and read-only after startup; later entries take priority,
//! so every table is scanned in reverse declaration order.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Suffix rules as (pattern, replacement template) pairs. The first
/// declared pluralization is the catch-all "append s"; singularization has
/// no catch-all and may leave its input unchanged.
static PLURALIZATIONS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    compile(&[
        (r"\z", "s"),
        (r"(?i)s\z", "s"),
        (r"(?i)(ax|test)is\z", "${1}es"),
        (r"(?i)(.*)us\z", "${1}uses"),
        (r"(?i)(octop|vir|cact)us\z", "${1}i"),
        (r"(?i)(octop|vir)i\z", "${1}i"),
        (r"(?i)(alias|status)\z", "${1}es"),
        (r"(?i)(buffal|domin|ech|embarg|her|mosquit|potat|tomat)o\z", "${1}oes"),
        (r"(?i)([^b])um\z", "${1}a"),
        (r"(?i)([ti])a\z", "${1}a"),
        (r"(?i)sis\z", "ses"),
        (r"(?i)(.*)([^f])fe*\z", "${1}${2}ves"),
        (r"(?i)(hive|proof)\z", "${1}s"),
        (r"(?i)([^aeiouy]|qu)y\z", "${1}ies"),
        (r"(?i)(x|ch|ss|sh)\z", "${1}es"),
        (r"(?i)(stoma|epo)ch\z", "${1}chs"),
        (r"(?i)(matr|vert|ind)(?:ix|ex)\z", "${1}ices"),
        (r"(?i)([ml])ouse\z", "${1}ice"),
        (r"(?i)([ml])ice\z", "${1}ice"),
        (r"(?i)^(ox)\z", "${1}en"),
        (r"(?i)^(oxen)\z", "${1}"),
        (r"(?i)(quiz)\z", "${1}zes"),
        (r"(?i)(.*)non\z", "${1}na"),
        (r"(?i)(.*)ma\z", "${1}mata"),
        (r"(.*)(eau|eaux)\z", "${1}eaux"),
    ])
});

static SINGULARIZATIONS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    compile(&[
        (r"(?i)s\z", ""),
        (r"(?i)(n)ews\z", "${1}ews"),
        (r"(?i)([ti])a\z", "${1}um"),
        (
            r"(?i)((a)naly|(b)a|(d)iagno|(p)arenthe|(p)rogno|(s)ynop|(t)he)(sis|ses)\z",
            "${1}${2}sis",
        ),
        (r"(?i)(^analy)(sis|ses)\z", "${1}sis"),
        (r"(?i)([^f])ves\z", "${1}fe"),
        (r"(?i)(hive)s\z", "${1}"),
        (r"(?i)(tive)s\z", "${1}"),
        (r"(?i)([lr])ves\z", "${1}f"),
        (r"(?i)([^aeiouy]|qu)ies\z", "${1}y"),
        (r"(?i)(s)eries\z", "${1}eries"),
        (r"(?i)(m)ovies\z", "${1}ovie"),
        (r"(?i)(ss)\z", "${1}"),
        (r"(?i)(x|ch|ss|sh)es\z", "${1}"),
        (r"(?i)([ml])ice\z", "${1}ouse"),
        (r"(?i)(us)(es)?\z", "${1}"),
        (r"(?i)(o)es\z", "${1}"),
        (r"(?i)(shoe)s\z", "${1}"),
        (r"(?i)(cris|ax|test)(is|es)\z", "${1}is"),
        (r"(?i)(octop|vir)(us|i)\z", "${1}us"),
        (r"(?i)(alias|status)(es)?\z", "${1}"),
        (r"(?i)^(ox)en", "${1}"),
        (r"(?i)(vert|ind)ices\z", "${1}ex"),
        (r"(?i)(matr)ices\z", "${1}ix"),
        (r"(?i)(quiz)zes\z", "${1}"),
        (r"(?i)(database)s\z", "${1}"),
    ])
});

/// Irregular (singular, plural) pairs. "human" precedes "man" in reverse
/// scan order so it wins on the shared suffix.
static IRREGULARS: [(&str, &str); 9] = [
    ("person", "people"),
    ("man", "men"),
    ("human", "humans"),
    ("child", "children"),
    ("sex", "sexes"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("goose", "geese"),
    ("forum", "forums"),
];

/// Words (matched as suffixes) that are identical in both numbers.
static UNCOUNTABLES: [&str; 16] = [
    "hovercraft",
    "moose",
    "deer",
    "milk",
    "rain",
    "Swiss",
    "grass",
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
];

static UPPER_RUN_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").unwrap());

static CASE_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z\d])([A-Z])").unwrap());

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s").unwrap());

static UNDERSCORE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"__+").unwrap());

static SEPARATED_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[_\s]+([a-z])").unwrap());

static LEADING_LOWER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z]").unwrap());

static LEADING_UPPER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]").unwrap());

fn compile(rules: &[(&'static str, &'static str)]) -> Vec<(Regex, &'static str)> {
    rules
        .iter()
        .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), *replacement))
        .collect()
}

/// Normalize any casing/hyphenation to lowercase words joined by single
/// underscores.
pub fn underscore(input: &str) -> String {
    let s = UPPER_RUN_BOUNDARY.replace_all(input, "${1}_${2}");
    let s = CASE_BOUNDARY.replace_all(&s, "${1}_${2}");
    let s = s.replace('-', "_");
    let s = WHITESPACE.replace_all(&s, "_");
    let s = UNDERSCORE_RUN.replace_all(&s, "_");
    s.to_lowercase()
}

/// Casing applied to the leading letter by [`camelcase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstLetter {
    Upper,
    Lower,
    Keep,
}

/// Join underscore/whitespace-separated words, upcasing the letter after
/// each separator run.
pub fn camelcase(input: &str, first: FirstLetter) -> String {
    let joined = SEPARATED_LETTER.replace_all(input, |caps: &Captures| caps[1].to_uppercase());
    match first {
        FirstLetter::Upper => LEADING_LOWER
            .replace(&joined, |caps: &Captures| caps[0].to_uppercase())
            .into_owned(),
        FirstLetter::Lower => LEADING_UPPER
            .replace(&joined, |caps: &Captures| caps[0].to_lowercase())
            .into_owned(),
        FirstLetter::Keep => joined.into_owned(),
    }
}

/// Upper-camelcase shorthand.
pub fn camelize(input: &str) -> String {
    camelcase(input, FirstLetter::Upper)
}

/// Lowercase words joined by dashes.
pub fn dasherize(input: &str) -> String {
    underscore(input).replace('_', "-")
}

/// Return the plural form of `word`. The catch-all rule guarantees a
/// match for countable regular nouns.
pub fn pluralize(word: &str) -> String {
    if is_uncountable(word) {
        return word.to_string();
    }
    for (singular, plural) in IRREGULARS.iter().rev() {
        if let Some(stem) = word.strip_suffix(singular) {
            return format!("{stem}{plural}");
        }
    }
    for (rule, replacement) in PLURALIZATIONS.iter().rev() {
        if rule.is_match(word) {
            return rule.replace(word, *replacement).into_owned();
        }
    }
    word.to_string()
}

/// Return the singular form of `word`, or `word` unchanged when no rule
/// matches.
pub fn singularize(word: &str) -> String {
    if is_uncountable(word) {
        return word.to_string();
    }
    for (singular, plural) in IRREGULARS.iter().rev() {
        if let Some(stem) = word.strip_suffix(plural) {
            return format!("{stem}{singular}");
        }
    }
    for (rule, replacement) in SINGULARIZATIONS.iter().rev() {
        if rule.is_match(word) {
            return rule.replace(word, *replacement).into_owned();
        }
    }
    word.to_string()
}

/// Derive a default type name from a field name: strip any namespace
/// prefix, singularize, and camelize.
pub fn classify(name: &str) -> String {
    let base = match name.rfind("::") {
        Some(idx) => &name[idx + 2..],
        None => name,
    };
    let base = match base.rfind('.') {
        Some(idx) => &base[idx + 1..],
        None => base,
    };
    camelize(&singularize(base))
}

fn is_uncountable(word: &str) -> bool {
    UNCOUNTABLES.iter().any(|suffix| word.ends_with(suffix))
}
