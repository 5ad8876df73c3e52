//! Requirement string normalization

/// Characters stripped from the left of a declared requirement
const LEADING_NOISE: &[char] = &['v', 'V', '=', '>', '<', '^', '~'];

/// Normalize a declared requirement to a bare version string
///
/// Leading operators, `v` prefixes and whitespace are stripped in any order
/// (`"= v1.2.1"` becomes `"1.2.1"`); the remainder is trimmed. Combined
/// constraints such as `"2.0,< 3.0"` are kept intact here.
pub fn normalize_requirement(requirement: &str) -> String {
    requirement
        .trim_start_matches(|c: char| c.is_whitespace() || LEADING_NOISE.contains(&c))
        .trim()
        .to_string()
}

/// First comma-separated token of a requirement, trimmed
pub fn first_token(requirement: &str) -> &str {
    requirement.split(',').next().unwrap_or(requirement).trim()
}
