//! Path-based file kind classification

use crate::types::FileKind;

const TYPE_DECLARATION_SUFFIXES: &[&str] = &[".d.ts", ".d.mts", ".d.cts"];

const CONFIG_SUFFIXES: &[&str] = &[
    ".config.ts",
    ".config.mts",
    ".config.js",
    ".config.mjs",
    ".config.cjs",
    ".config.tsx",
    ".config.jsx",
];

/// Classify a file by its `/`-separated relative path.
///
/// First match wins: `/api/` segment, `/components/` segment, `/types/`
/// directory or declaration-file suffix, config-file suffix, otherwise utility.
pub fn classify_path(relative_path: &str) -> FileKind {
    let normalized = format!("/{}", relative_path.replace('\\', "/").trim_start_matches('/'))
        .to_lowercase();
    let file_name = normalized.rsplit('/').next().unwrap_or_default();

    if normalized.contains("/api/") {
        FileKind::ApiRoute
    } else if normalized.contains("/components/") {
        FileKind::Component
    } else if normalized.contains("/types/")
        || TYPE_DECLARATION_SUFFIXES
            .iter()
            .any(|suffix| file_name.ends_with(suffix))
    {
        FileKind::Type
    } else if CONFIG_SUFFIXES
        .iter()
        .any(|suffix| file_name.ends_with(suffix))
    {
        FileKind::Config
    } else {
        FileKind::Utility
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_route() {
        assert_eq!(classify_path("app/api/users/route.ts"), FileKind::ApiRoute);
        assert_eq!(classify_path("pages/api/login.js"), FileKind::ApiRoute);
    }

    #[test]
    fn test_api_segment_at_root() {
        assert_eq!(classify_path("api/health.ts"), FileKind::ApiRoute);
    }

    #[test]
    fn test_component() {
        assert_eq!(classify_path("src/components/Button.tsx"), FileKind::Component);
        assert_eq!(classify_path("components/ui/Card.jsx"), FileKind::Component);
    }

    #[test]
    fn test_api_wins_over_components() {
        assert_eq!(
            classify_path("app/components/api/widget.tsx"),
            FileKind::ApiRoute
        );
        assert_eq!(
            classify_path("app/api/components/handler.ts"),
            FileKind::ApiRoute
        );
    }

    #[test]
    fn test_types() {
        assert_eq!(classify_path("src/types/user.ts"), FileKind::Type);
        assert_eq!(classify_path("global.d.ts"), FileKind::Type);
        assert_eq!(classify_path("lib/env.d.ts"), FileKind::Type);
    }

    #[test]
    fn test_config() {
        assert_eq!(classify_path("next.config.js"), FileKind::Config);
        assert_eq!(classify_path("tailwind.config.ts"), FileKind::Config);
        assert_eq!(classify_path("vite.config.mjs"), FileKind::Config);
    }

    #[test]
    fn test_utility_fallback() {
        assert_eq!(classify_path("lib/format.ts"), FileKind::Utility);
        assert_eq!(classify_path("app/page.tsx"), FileKind::Utility);
        assert_eq!(classify_path("apis/client.ts"), FileKind::Utility);
    }

    #[test]
    fn test_segment_match_is_not_substring_match() {
        assert_eq!(classify_path("src/mycomponents/x.ts"), FileKind::Utility);
        assert_eq!(classify_path("src/rapid/x.ts"), FileKind::Utility);
    }

    #[test]
    fn test_windows_separators() {
        assert_eq!(classify_path("app\\api\\users\\route.ts"), FileKind::ApiRoute);
    }
}
