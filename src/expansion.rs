//! Token expansion. Globbing is the only expansion this shell performs;
//! tilde expansion rides along with it the way `GLOB_TILDE` does.
use std::env;

use log::debug;
use nix::unistd::User;

#[cfg(feature = "expansion")]
mod glob;

#[cfg(feature = "expansion")]
pub use self::glob::{expand_globs, expand_token, has_glob_meta};

/// Expand a leading `~` or `~user`. Returns `None` when the token does not
/// start with a tilde or the home directory cannot be resolved.
pub fn expand_tilde(token: &str) -> Option<String> {
    let rest = token.strip_prefix('~')?;
    let (user, tail) = match rest.find('/') {
        Some(idx) => rest.split_at(idx),
        None => (rest, ""),
    };
    let home = if user.is_empty() {
        env::var("HOME").ok().filter(|home| !home.is_empty())?
    } else {
        match User::from_name(user) {
            Ok(Some(entry)) => entry.dir.to_string_lossy().into_owned(),
            Ok(None) => return None,
            Err(err) => {
                debug!("expand event=tilde user={} error={}", user, err);
                return None;
            }
        }
    };
    Some(format!("{home}{tail}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn with_home<F: FnOnce()>(value: &str, f: F) {
        let prior = env::var("HOME").ok();
        env::set_var("HOME", value);
        f();
        match prior {
            Some(val) => env::set_var("HOME", val),
            None => env::remove_var("HOME"),
        }
    }

    #[test]
    #[serial]
    fn tilde_expands_home() {
        with_home("/home/sea", || {
            assert_eq!(expand_tilde("~").as_deref(), Some("/home/sea"));
            assert_eq!(expand_tilde("~/src/*.rs").as_deref(), Some("/home/sea/src/*.rs"));
        });
    }

    #[test]
    fn tilde_only_at_start() {
        assert_eq!(expand_tilde("a~b"), None);
        assert_eq!(expand_tilde("plain"), None);
    }

    #[test]
    fn tilde_user_resolves_root() {
        // Containers may lack a passwd entry for root.
        let Some(expanded) = expand_tilde("~root/x") else {
            return;
        };
        assert!(expanded.ends_with("/x"));
        assert!(!expanded.starts_with('~'));
    }

    #[test]
    fn unknown_user_is_left_alone() {
        assert_eq!(expand_tilde("~no-such-user-seash-test"), None);
    }
}
