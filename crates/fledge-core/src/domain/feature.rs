//! Feature names and their derived identifiers.

use std::fmt;

use crate::domain::error::DomainError;

/// A validated feature name.
///
/// Invariant: non-empty, lowercase ASCII, only `[a-z0-9_]`, starts with a
/// letter. This keeps every derived Dart file name and type name legal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeatureName(String);

impl FeatureName {
    /// Normalise and validate user input.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let name = input.trim().to_lowercase();

        let invalid = |reason: &str| DomainError::InvalidFeatureName {
            name: input.to_string(),
            reason: reason.to_string(),
        };

        let Some(first) = name.chars().next() else {
            return Err(invalid("name cannot be empty"));
        };
        if !first.is_ascii_lowercase() {
            return Err(invalid("name must start with a letter"));
        }
        if let Some(bad) = name
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_'))
        {
            return Err(invalid(&format!("character '{bad}' is not allowed")));
        }

        Ok(Self(name))
    }

    /// The snake_case form used for directories and file names.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// PascalCase prefix for generated type names: `user_profile` → `UserProfile`.
    ///
    /// Empty segments (`a__b`, trailing `_`) contribute nothing, so the result
    /// never contains an underscore.
    pub fn class_prefix(&self) -> String {
        self.0.split('_').map(capitalize).collect()
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_prefix_joins_capitalised_segments() {
        let name = FeatureName::parse("user_profile").unwrap();
        assert_eq!(name.class_prefix(), "UserProfile");
    }

    #[test]
    fn input_is_lowercased() {
        let name = FeatureName::parse("  Login ").unwrap();
        assert_eq!(name.as_str(), "login");
        assert_eq!(name.class_prefix(), "Login");
    }

    #[test]
    fn digits_are_kept_in_prefix() {
        let name = FeatureName::parse("order_history2").unwrap();
        assert_eq!(name.class_prefix(), "OrderHistory2");
    }

    #[test]
    fn prefix_never_contains_underscores() {
        for input in ["a", "a_b", "a__b", "trailing_", "x1_y2_z3", "settings_v2_beta"] {
            let name = FeatureName::parse(input).unwrap();
            let prefix = name.class_prefix();
            assert!(!prefix.contains('_'), "{input} -> {prefix}");
            let expected: String = input
                .split('_')
                .filter(|s| !s.is_empty())
                .map(|s| {
                    let mut c = s.chars();
                    let head = c.next().unwrap().to_ascii_uppercase();
                    std::iter::once(head).chain(c).collect::<String>()
                })
                .collect();
            assert_eq!(prefix, expected);
        }
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(
            FeatureName::parse("   "),
            Err(DomainError::InvalidFeatureName { .. })
        ));
    }

    #[test]
    fn rejects_hyphen_and_leading_digit() {
        assert!(FeatureName::parse("user-profile").is_err());
        assert!(FeatureName::parse("2fa").is_err());
        assert!(FeatureName::parse("_private").is_err());
    }
}
