//! Language table: which comment marks each supported language uses.
//!
//! Pure data. The table is built once and never mutated; callers pick a
//! [`LanguageSelection`] and resolve it against a file path.

use std::{fmt, path::Path, sync::LazyLock};

use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::marks::{CommentMarks, LiteralMark};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
pub enum Language {
    #[value(name = "C")]
    #[serde(rename = "C")]
    C,
    #[value(name = "C++")]
    #[serde(rename = "C++")]
    Cpp,
    #[value(name = "C/C++")]
    #[serde(rename = "C/C++")]
    CCpp,
    #[value(name = "JavaScript")]
    JavaScript,
    #[value(name = "TypeScript")]
    TypeScript,
    #[value(name = "Java")]
    Java,
    #[value(name = "Kotlin")]
    Kotlin,
    #[value(name = "Rust")]
    Rust,
    #[value(name = "Go")]
    Go,
    #[value(name = "Python")]
    Python,
    #[value(name = "Bash")]
    Bash,
    #[value(name = "Shell")]
    Shell,
    #[value(name = "Batch")]
    Batch,
    #[value(name = "Any")]
    Any,
}

// Order matters: the first language listing an extension owns it.
const LANGUAGE_EXTENSIONS: &[(Language, &[&str])] = &[
    (Language::C, &["c", "h"]),
    (Language::Cpp, &["cpp", "cc", "cxx", "hpp", "hh"]),
    (Language::JavaScript, &["js", "mjs", "cjs", "jsx"]),
    (Language::TypeScript, &["ts", "mts", "cts", "tsx"]),
    (Language::Java, &["java"]),
    (Language::Kotlin, &["kt", "kts"]),
    (Language::Rust, &["rs"]),
    (Language::Go, &["go"]),
    (Language::Python, &["py"]),
    (Language::Bash, &["sh", "bash"]),
    (Language::Batch, &["bat", "cmd"]),
];

static C_STYLE_MARKS: LazyLock<CommentMarks> = LazyLock::new(CommentMarks::c_style);

static PYTHON_MARKS: LazyLock<CommentMarks> = LazyLock::new(|| {
    CommentMarks::line_and_block(
        LiteralMark::new("#"),
        Regex::new(r#"'''|""""#).unwrap(),
        Regex::new(r#"'''|""""#).unwrap(),
    )
});

static HASH_MARKS: LazyLock<CommentMarks> =
    LazyLock::new(|| CommentMarks::line_only(LiteralMark::new("#")));

static BATCH_MARKS: LazyLock<CommentMarks> =
    LazyLock::new(|| CommentMarks::line_only(Regex::new(r"(^::)|(&\s*::)|REM").unwrap()));

static ANY_MARKS: LazyLock<CommentMarks> = LazyLock::new(|| {
    CommentMarks::line_and_block(
        Regex::new(r"//|#|(^::)|(&\s*::)|REM").unwrap(),
        Regex::new(r#"/\*|'''|""""#).unwrap(),
        Regex::new(r#"\*/|'''|""""#).unwrap(),
    )
});

impl Language {
    pub fn all() -> &'static [Language] {
        Language::value_variants()
    }

    /// Display name, as accepted by `--lang`.
    pub fn name(&self) -> &'static str {
        match self {
            Language::C => "C",
            Language::Cpp => "C++",
            Language::CCpp => "C/C++",
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Java => "Java",
            Language::Kotlin => "Kotlin",
            Language::Rust => "Rust",
            Language::Go => "Go",
            Language::Python => "Python",
            Language::Bash => "Bash",
            Language::Shell => "Shell",
            Language::Batch => "Batch",
            Language::Any => "Any",
        }
    }

    pub fn comment_marks(&self) -> &'static CommentMarks {
        match self {
            Language::C
            | Language::Cpp
            | Language::CCpp
            | Language::JavaScript
            | Language::TypeScript
            | Language::Java
            | Language::Kotlin
            | Language::Rust
            | Language::Go => &*C_STYLE_MARKS,
            Language::Python => &*PYTHON_MARKS,
            Language::Bash | Language::Shell => &*HASH_MARKS,
            Language::Batch => &*BATCH_MARKS,
            Language::Any => &*ANY_MARKS,
        }
    }

    /// Language owning the extension of `path`, if any (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Language> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        LANGUAGE_EXTENSIONS
            .iter()
            .find(|(_, exts)| exts.contains(&ext.as_str()))
            .map(|(lang, _)| *lang)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How to pick the comment marks for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LanguageSelection {
    /// Derive the language from the file extension, falling back to [`Language::Any`].
    #[default]
    Auto,
    Explicit(Language),
}

impl LanguageSelection {
    pub fn resolve(&self, path: &Path) -> Language {
        match self {
            LanguageSelection::Auto => Language::from_path(path).unwrap_or(Language::Any),
            LanguageSelection::Explicit(lang) => *lang,
        }
    }

    /// Parse `auto` or a language name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("auto") {
            return Some(LanguageSelection::Auto);
        }
        Language::from_str(s, true)
            .ok()
            .map(LanguageSelection::Explicit)
    }
}

impl fmt::Display for LanguageSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageSelection::Auto => f.write_str("auto"),
            LanguageSelection::Explicit(lang) => f.write_str(lang.name()),
        }
    }
}
