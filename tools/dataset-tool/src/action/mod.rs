//! Implementations of the [`Action`][action]s.
//!
//! [action]: crate::cli::Action

pub mod content_images;
pub mod ingest;
pub mod inspect;
pub mod reconcile;

use std::fmt::Display;

/// Joins `items` with `", "` for display.
pub fn join<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn joins_in_iteration_order() {
        assert_eq!(join(BTreeSet::from(['法', '書'])), "書, 法");
        assert_eq!(join(Vec::<char>::new()), "");
    }
}
