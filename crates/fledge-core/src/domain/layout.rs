//! The fixed layered layout of a generated feature.

use std::path::Path;

use crate::domain::{
    entities::{ProjectStructure, RenderContext},
    error::DomainError,
    feature::FeatureName,
    templates,
};

/// Directories created for every feature, relative to the feature root.
pub const FEATURE_DIRECTORIES: [&str; 11] = [
    "data/datasource",
    "data/models",
    "data/repositories",
    "domain/datasource",
    "domain/repositories",
    "domain/entities",
    "domain/usecase",
    "presentation/presenter",
    "presentation/ui",
    "presentation/widgets",
    "di",
];

/// Files rendered for every feature: (relative path pattern, template).
pub const FEATURE_FILES: [(&str, &str); 6] = [
    (
        "domain/repositories/{{FEATURE_NAME}}_repository.dart",
        templates::DOMAIN_REPOSITORY,
    ),
    (
        "data/repositories/{{FEATURE_NAME}}_repository_impl.dart",
        templates::DATA_REPOSITORY_IMPL,
    ),
    ("di/{{FEATURE_NAME}}_di.dart", templates::DI_MODULE),
    (
        "presentation/presenter/{{FEATURE_NAME}}_presenter.dart",
        templates::PRESENTER,
    ),
    (
        "presentation/presenter/{{FEATURE_NAME}}_ui_state.dart",
        templates::UI_STATE,
    ),
    ("presentation/ui/{{FEATURE_NAME}}_page.dart", templates::PAGE),
];

/// Renders [`FEATURE_DIRECTORIES`] and [`FEATURE_FILES`] for one feature.
pub struct FeatureLayout;

impl FeatureLayout {
    /// Build the structure rooted at `<features_root>/<feature>`.
    pub fn render(
        features_root: &Path,
        feature: &FeatureName,
        ctx: &RenderContext,
    ) -> Result<ProjectStructure, DomainError> {
        let mut structure = ProjectStructure::new(features_root.join(feature.as_str()));

        for dir in FEATURE_DIRECTORIES {
            structure.add_directory(dir);
        }
        for (path, template) in FEATURE_FILES {
            structure.add_file(ctx.render(path), ctx.render(template));
        }

        structure.validate()?;
        Ok(structure)
    }

    /// Package import of the feature's DI module.
    pub fn di_import(project_name: &str, feature: &FeatureName) -> String {
        format!(
            "import 'package:{project_name}/features/{name}/di/{name}_di.dart';",
            name = feature.as_str()
        )
    }

    /// Registration call placed in the service locator's setup method.
    pub fn di_setup_call(feature: &FeatureName) -> String {
        format!("    await {}Di.setup(_serviceLocator);", feature.class_prefix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn render(name: &str) -> ProjectStructure {
        let feature = FeatureName::parse(name).unwrap();
        let ctx = RenderContext::for_feature("shop", &feature);
        FeatureLayout::render(Path::new("lib/features"), &feature, &ctx).unwrap()
    }

    #[test]
    fn eleven_directories_six_files() {
        let s = render("user_profile");
        assert_eq!(s.directories().count(), 11);
        assert_eq!(s.files().count(), 6);
        assert_eq!(s.root(), Path::new("lib/features/user_profile"));
    }

    #[test]
    fn file_paths_use_feature_name() {
        let s = render("user_profile");
        let paths: Vec<PathBuf> = s.files().map(|f| f.path.clone()).collect();
        assert!(paths.contains(&PathBuf::from(
            "domain/repositories/user_profile_repository.dart"
        )));
        assert!(paths.contains(&PathBuf::from("presentation/ui/user_profile_page.dart")));
        assert!(paths.contains(&PathBuf::from("di/user_profile_di.dart")));
    }

    #[test]
    fn every_file_is_fully_substituted() {
        for file in render("user_profile").files() {
            assert!(file.content.contains("UserProfile"), "{}", file.path.display());
            assert!(!file.content.contains("{{"), "{}", file.path.display());
        }
    }

    #[test]
    fn di_helpers() {
        let feature = FeatureName::parse("cart").unwrap();
        assert_eq!(
            FeatureLayout::di_import("shop", &feature),
            "import 'package:shop/features/cart/di/cart_di.dart';"
        );
        assert_eq!(
            FeatureLayout::di_setup_call(&feature),
            "    await CartDi.setup(_serviceLocator);"
        );
    }
}
