//! Anchor configuration
//!
//! The shapes every strategy looks for. Defaults match a React router file
//! (`App.tsx`) and a home listing module with a typed `modules` array.

use serde::{Deserialize, Serialize};

/// Anchor settings shared by the four strategies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnchorConfig {
    /// Import source prefix that marks a module import (`@modules/`)
    pub module_import_prefix: String,
    /// Comment after which imports go when no module import exists yet
    pub imports_marker: String,
    /// Router library whose multi-line import is the last-resort import anchor
    pub router_library: String,
    /// Comment that precedes the catch-all route
    pub fallback_marker: String,
    /// Indentation for routes when the anchor line has none of its own
    pub route_indent: String,
    /// Icon library of the listing file
    pub icon_library: String,
    /// Name of the typed array in the listing file
    pub list_name: String,
    /// Element type of that array
    pub list_type: String,
    /// Indentation applied to each inserted list entry line
    pub list_indent: String,
}

impl AnchorConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With module import prefix
    #[inline]
    #[must_use]
    pub fn with_module_import_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.module_import_prefix = prefix.into();
        self
    }

    /// With icon library
    #[inline]
    #[must_use]
    pub fn with_icon_library(mut self, library: impl Into<String>) -> Self {
        self.icon_library = library.into();
        self
    }

    /// With typed array name and element type
    #[inline]
    #[must_use]
    pub fn with_list(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.list_name = name.into();
        self.list_type = ty.into();
        self
    }

    /// With fallback-route marker
    #[inline]
    #[must_use]
    pub fn with_fallback_marker(mut self, marker: impl Into<String>) -> Self {
        self.fallback_marker = marker.into();
        self
    }
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            module_import_prefix: "@modules/".to_string(),
            imports_marker: "// Import modules".to_string(),
            router_library: "react-router-dom".to_string(),
            fallback_marker: "{/* 404 Fallback */}".to_string(),
            route_indent: " ".repeat(8),
            icon_library: "lucide-react".to_string(),
            list_name: "modules".to_string(),
            list_type: "Module".to_string(),
            list_indent: " ".repeat(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AnchorConfig::new();
        assert_eq!(config.module_import_prefix, "@modules/");
        assert_eq!(config.route_indent.len(), 8);
        assert_eq!(config.list_indent.len(), 2);
    }

    #[test]
    fn builders() {
        let config = AnchorConfig::new()
            .with_icon_library("react-icons")
            .with_list("pages", "Page");
        assert_eq!(config.icon_library, "react-icons");
        assert_eq!(config.list_name, "pages");
        assert_eq!(config.list_type, "Page");
    }
}
