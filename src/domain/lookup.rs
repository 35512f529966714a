//! Token to flag lookup
//!
//! Pure functions: a raw token either names a declared flag in long (`--name`) or
//! short (`-n`) form, or it does not. Callers decide what "not found" means.

use crate::domain::flag::Flag;

/// Position of the flag named by `token` in `flags`, trying the long form first.
pub fn find_flag_index<V>(token: &str, flags: &[Flag<V>]) -> Option<usize> {
    let Some(name) = token.strip_prefix("--") else {
        return find_short_flag_index(token, flags);
    };
    // bare `--`
    if name.is_empty() {
        return None;
    }
    flags.iter().position(|flag| flag.name() == name)
}

/// Position of the flag whose short name is given by a two character `-x` token.
pub fn find_short_flag_index<V>(token: &str, flags: &[Flag<V>]) -> Option<usize> {
    let rest = token.strip_prefix('-')?;
    let mut chars = rest.chars();
    let short = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    flags.iter().position(|flag| flag.short_name() == short)
}

pub fn find_flag<'a, V>(token: &str, flags: &'a [Flag<V>]) -> Option<&'a Flag<V>> {
    find_flag_index(token, flags).map(|idx| &flags[idx])
}

pub fn find_short_flag<'a, V>(token: &str, flags: &'a [Flag<V>]) -> Option<&'a Flag<V>> {
    find_short_flag_index(token, flags).map(|idx| &flags[idx])
}

/// Whether `token` ends a run of flag arguments.
///
/// Only a leading `-` counts, so an empty token is an ordinary argument and is
/// captured by the preceding flag rather than rejected as an invalid flag.
pub fn is_flag_shaped(token: &str) -> bool {
    token.starts_with('-')
}
