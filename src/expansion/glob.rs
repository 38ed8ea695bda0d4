use ::glob::{glob_with, MatchOptions};
use log::debug;

use super::expand_tilde;

const GLOB_META: [char; 3] = ['*', '?', '['];

// `*` and `?` stop at `/`. Leading dots are checked by `hidden_by_wildcard`.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

pub fn has_glob_meta(token: &str) -> bool {
    token.contains(GLOB_META)
}

/// Replace every token containing glob metacharacters with its sorted
/// matches. Tokens without metacharacters, the pipe separator included,
/// pass through untouched.
pub fn expand_globs(tokens: Vec<String>) -> Vec<String> {
    let mut expanded = Vec::with_capacity(tokens.len());
    for token in tokens {
        if has_glob_meta(&token) {
            expanded.extend(expand_token(&token));
        } else {
            expanded.push(token);
        }
    }
    expanded
}

/// Expand one pattern. Zero matches yields the token itself, never an empty list.
pub fn expand_token(token: &str) -> Vec<String> {
    let pattern = expand_tilde(token).unwrap_or_else(|| token.to_string());
    let paths = match glob_with(&pattern, MATCH_OPTIONS) {
        Ok(paths) => paths,
        Err(err) => {
            debug!("glob event=invalid pattern={:?} error={}", pattern, err);
            return vec![token.to_string()];
        }
    };

    let mut matches = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) => {
                let path = path.to_string_lossy().into_owned();
                if hidden_by_wildcard(&pattern, &path) {
                    continue;
                }
                matches.push(path);
            }
            Err(err) => debug!("glob event=skip error={}", err),
        }
    }

    if matches.is_empty() {
        debug!("glob event=nomatch pattern={:?}", pattern);
        return vec![token.to_string()];
    }
    matches.sort();
    debug!("glob event=match pattern={:?} count={}", pattern, matches.len());
    matches
}

/// A path component that starts with `.` only matches a pattern component
/// that starts with a literal `.`.
fn hidden_by_wildcard(pattern: &str, path: &str) -> bool {
    let pattern_parts = pattern.split('/').filter(|part| !part.is_empty());
    let path_parts = path.split('/').filter(|part| !part.is_empty());
    pattern_parts
        .zip(path_parts)
        .any(|(pat, name)| name.starts_with('.') && !pat.starts_with('.'))
}
