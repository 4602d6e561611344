// SPDX-FileCopyrightText: 2025 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Utility functions for the client crates.

/// Returns the trimmed input, or `None` if nothing but whitespace is left.
pub fn non_blank(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Asserts that an expression matches a pattern.
///
/// Prints the debug representation of the value on failure.
#[macro_export]
macro_rules! assert_matches {
    ($expression:expr, $pattern:pat $(if $guard:expr)? $(,)?) => {
        match $expression {
            $pattern $(if $guard)? => {}
            ref value => panic!(
                "assertion failed: `{:?}` does not match `{}`",
                value,
                stringify!($pattern $(if $guard)?)
            ),
        }
    };
}
