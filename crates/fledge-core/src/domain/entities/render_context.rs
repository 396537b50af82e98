use std::collections::HashMap;

use crate::domain::feature::FeatureName;

/// Context for template rendering.
///
/// A **Value Object** containing all data needed to render a feature template.
/// Immutable after creation.
///
/// ## Built-in Variables
///
/// | Variable | Example | Source |
/// |----------|---------|--------|
/// | `PROJECT_NAME` | "shop_app" | `pubspec.yaml` `name:` |
/// | `FEATURE_NAME` | "user_profile" | User input, normalised |
/// | `CLASS_PREFIX` | "UserProfile" | Computed |
#[derive(Debug, Clone)]
pub struct RenderContext {
    variables: HashMap<String, String>,
}

impl RenderContext {
    /// Create a context for one feature of one project.
    pub fn for_feature(project_name: impl Into<String>, feature: &FeatureName) -> Self {
        let mut vars = HashMap::new();
        vars.insert("PROJECT_NAME".to_string(), project_name.into());
        vars.insert("FEATURE_NAME".to_string(), feature.as_str().to_string());
        vars.insert("CLASS_PREFIX".to_string(), feature.class_prefix());
        Self { variables: vars }
    }

    /// Render a template string by replacing `{{VARIABLE}}` placeholders.
    ///
    /// # Edge Cases
    ///
    /// - `{{UNKNOWN}}` → remains as literal `{{UNKNOWN}}` (no error)
    /// - `{{CLASS_PREFIX}}{{CLASS_PREFIX}}` → both replaced correctly
    /// - Dart's own braces (`class A {` … `}`) are untouched; only the
    ///   double-brace form is a placeholder.
    pub fn render(&self, template: &str) -> String {
        let mut result = template.to_string();

        // Variables are independent, so order doesn't matter.
        for (key, value) in &self.variables {
            let placeholder = format!("{{{{{key}}}}}");
            result = result.replace(&placeholder, value);
        }

        result
    }
}
