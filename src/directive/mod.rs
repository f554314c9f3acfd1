//! Directive grammar: recognizes load directives embedded in prompt text
//!
//! Two surface forms are supported:
//!
//! ```text
//! [#PLACEHOLDER_LOAD_FROM_FILE (<filename>)]
//! [#PLACEHOLDER_LOAD_FILE_FROM_GIT (<git_url>, <file_location>, <branch>)]
//! ```
//!
//! The keyword is case-sensitive; whitespace around arguments is flexible and
//! trimmed. Because `)` delimits the argument list and `,` separates git-form
//! arguments, argument values cannot contain those characters literally. That
//! is a documented limitation of the grammar, not something scanning tries to
//! repair. Text that fails to match passes through as ordinary text.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static FILE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[#PLACEHOLDER_LOAD_FROM_FILE\s*\(\s*([^)]+?)\s*\)\]").expect("valid file pattern")
});

static GIT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[#PLACEHOLDER_LOAD_FILE_FROM_GIT\s*\(\s*([^,]+?)\s*,\s*([^,]+?)\s*,\s*([^)]+?)\s*\)\]")
        .expect("valid git pattern")
});

/// A parsed load directive.
///
/// Equality is structural and serves as the cycle-avoidance key: two
/// occurrences with identical arguments are the same directive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Directive {
    /// Load a file relative to the configured base directory.
    File { filename: String },

    /// Load one file at one ref from a git repository.
    Git { repo_url: String, file_path: String, reference: String },
}

impl std::fmt::Display for Directive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Directive::File { filename } => write!(f, "file '{filename}'"),
            Directive::Git { repo_url, file_path, reference } => {
                write!(f, "git ({repo_url}, {file_path}, {reference})")
            }
        }
    }
}

/// Which of the two directive grammars to scan for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    File,
    Git,
}

/// One directive occurrence: the byte span it covers in the scanned text
/// plus the typed value parsed out of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveMatch {
    pub span: Range<usize>,
    pub directive: Directive,
}

/// Scan `text` for all occurrences of one directive form, left to right.
///
/// Pure text in, matches out: no I/O, no recursion. Matches never overlap and
/// never merge across directive boundaries (the argument character classes
/// exclude the closing delimiter).
pub fn scan(text: &str, form: Form) -> Vec<DirectiveMatch> {
    match form {
        Form::File => FILE_PATTERN
            .captures_iter(text)
            .map(|caps| {
                let whole = caps.get(0).expect("match group 0");
                DirectiveMatch {
                    span: whole.range(),
                    directive: Directive::File { filename: caps[1].trim().to_string() },
                }
            })
            .collect(),
        Form::Git => GIT_PATTERN
            .captures_iter(text)
            .map(|caps| {
                let whole = caps.get(0).expect("match group 0");
                DirectiveMatch {
                    span: whole.range(),
                    directive: Directive::Git {
                        repo_url: caps[1].trim().to_string(),
                        file_path: caps[2].trim().to_string(),
                        reference: caps[3].trim().to_string(),
                    },
                }
            })
            .collect(),
    }
}
