//! Scope token matching.

/// `true` iff `required` is one of the whitespace-delimited tokens of `held`.
///
/// Tokens match exactly (no prefix matching); order and duplicates in `held`
/// are irrelevant. A missing or blank `held` never satisfies anything.
pub fn has_scope(held: Option<&str>, required: &str) -> bool {
    held.is_some_and(|held| held.split_whitespace().any(|token| token == required))
}
