//! Recursive directive expansion.
//!
//! The expander scans text for directives, resolves each one through the
//! file or git source, recursively expands the loaded content, and splices
//! the result back in at the directive's span. Expansion is best-effort:
//! a directive that fails to resolve becomes a bracketed error marker in the
//! output instead of aborting, so the top-level call always returns total
//! text.
//!
//! Each text goes through two passes, file-form first, then git-form over
//! the result. The passes keep the two grammars independent at the cost of
//! not interleaving resolution order when both forms appear in one snippet:
//! all file directives in a snippet resolve (and recursively expand) before
//! any git directive in that same snippet. That ordering is the documented
//! policy, not an accident.

use std::collections::HashSet;
use tracing::{debug, warn};

use crate::directive::{scan, Directive, Form};
use crate::load::{FileSource, GitSource, LoadError};

/// Directives already resolved during one top-level [`Expander::expand`]
/// call. A directive present here is never resolved a second time within the
/// same call tree; its second occurrence stays in the output as literal
/// directive text. That rule is what makes expansion of mutually-referencing
/// content terminate.
pub type VisitedSet = HashSet<Directive>;

/// Orchestrates scanning, resolution, recursion, and cycle avoidance.
///
/// Sources are borrowed capabilities so tests can substitute in-memory
/// doubles for the filesystem and git transports.
pub struct Expander<'a> {
    files: &'a dyn FileSource,
    git: &'a dyn GitSource,
}

impl<'a> Expander<'a> {
    pub fn new(files: &'a dyn FileSource, git: &'a dyn GitSource) -> Self {
        Self { files, git }
    }

    /// Expand every resolvable directive in `text`. Total: never an error
    /// return; failures surface as `[Error ...]` markers in the output.
    pub fn expand(&self, text: &str) -> String {
        let mut visited = VisitedSet::new();
        self.expand_with(text, &mut visited)
    }

    /// One recursion step: file pass, then git pass over its result. The
    /// same visited set threads through every sub-call spawned from content
    /// loaded here.
    fn expand_with(&self, text: &str, visited: &mut VisitedSet) -> String {
        let after_files = self.expand_pass(text, Form::File, visited);
        self.expand_pass(&after_files, Form::Git, visited)
    }

    fn expand_pass(&self, text: &str, form: Form, visited: &mut VisitedSet) -> String {
        let matches = scan(text, form);
        if matches.is_empty() {
            return text.to_string();
        }

        // Left-to-right splice. Each match is substituted independently at
        // its own span; substituted content is never rescanned at this level
        // (recursion happens on the loaded content before splicing).
        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        for m in matches {
            out.push_str(&text[cursor..m.span.start]);

            if visited.contains(&m.directive) {
                // Second occurrence within this call tree: leave the
                // directive text verbatim to break the cycle.
                debug!(directive = %m.directive, "already expanded, leaving literal");
                out.push_str(&text[m.span.clone()]);
            } else {
                visited.insert(m.directive.clone());
                match self.resolve(&m.directive) {
                    Ok(content) => out.push_str(&self.expand_with(&content, visited)),
                    Err(err) => {
                        warn!(directive = %m.directive, %err, "directive failed to resolve");
                        out.push_str(&error_marker(&m.directive, &err));
                    }
                }
            }
            cursor = m.span.end;
        }
        out.push_str(&text[cursor..]);
        out
    }

    fn resolve(&self, directive: &Directive) -> Result<String, LoadError> {
        match directive {
            Directive::File { filename } => self.files.read(filename),
            Directive::Git { repo_url, file_path, reference } => {
                self.git.read(repo_url, file_path, reference)
            }
        }
    }
}

/// Bracketed diagnostic spliced into the output in place of a directive that
/// failed to resolve.
fn error_marker(directive: &Directive, err: &LoadError) -> String {
    match directive {
        Directive::File { filename } => format!("[Error loading file '{filename}': {err}]"),
        Directive::Git { repo_url, file_path, reference } => {
            format!("[Error loading from git ({repo_url}, {file_path}, {reference}): {err}]")
        }
    }
}
