//! Named endpoint registry.
//!
//! Maps short endpoint names (e.g. `files-get`) to URL path templates
//! (e.g. `files/{fileId}`). The table is compiled in and cannot be edited
//! at runtime.

use thiserror::Error;
use tracing::trace;

/// Error types that can occur while looking up an endpoint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The requested endpoint name is not part of the registry
    #[error("Endpoint '{name}' not found. Available endpoints: {}", available.join(", "))]
    NotFound { name: String, available: Vec<String> },
}

/// Built-in endpoint table, kept sorted by name.
const ENDPOINTS: &[(&str, &str)] = &[
    ("delete", "delete"),
    ("docs-get", "documents/{docId}"),
    ("docs-list", "documents"),
    ("docs-update", "documents/{docId}"),
    ("files-download", "files/{fileId}/download/{version}"),
    ("files-full", "files/{fileId}/full"),
    ("files-get", "files/{fileId}"),
    ("files-list", "files"),
    ("get", "get"),
    ("get-params", "anything/{anythingId}"),
    ("post", "post"),
    ("put", "put"),
    ("users-create", "users"),
    ("users-files", "users/{userId}/files/{fileId}"),
    ("users-get", "users/{userId}"),
    ("users-list", "users"),
];

/// Read-only view over a table of endpoint definitions
#[derive(Debug, Clone, Copy)]
pub struct EndpointRegistry {
    endpoints: &'static [(&'static str, &'static str)],
}

impl Default for EndpointRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl EndpointRegistry {
    /// The registry compiled into the binary
    pub fn builtin() -> Self {
        Self {
            endpoints: ENDPOINTS,
        }
    }

    /// Resolve an endpoint name to its path template.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` (listing every known name) when the
    /// name is not registered.
    pub fn resolve(&self, name: &str) -> Result<&'static str, RegistryError> {
        trace!("Resolving endpoint \"{}\"...", name);
        self.endpoints
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, template)| *template)
            .ok_or_else(|| RegistryError::NotFound {
                name: name.to_string(),
                available: self.names(),
            })
    }

    pub fn is_valid(&self, name: &str) -> bool {
        self.endpoints.iter().any(|(candidate, _)| *candidate == name)
    }

    /// All endpoint definitions, sorted by name
    pub fn list(&self) -> Vec<(&'static str, &'static str)> {
        let mut endpoints = self.endpoints.to_vec();
        endpoints.sort_by(|a, b| a.0.cmp(b.0));
        endpoints
    }

    fn names(&self) -> Vec<String> {
        self.list()
            .into_iter()
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// Human readable listing printed by `--list`
    pub fn render(&self) -> String {
        let mut output = String::from("\nAvailable endpoints:\n====================\n\n");
        for (name, template) in self.list() {
            output.push_str(&format!("  {:<20} -> {}\n", name, template));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_endpoints() {
        let registry = EndpointRegistry::builtin();
        assert_eq!(registry.resolve("files-get").unwrap(), "files/{fileId}");
        assert_eq!(registry.resolve("files-full").unwrap(), "files/{fileId}/full");
        assert_eq!(
            registry.resolve("users-files").unwrap(),
            "users/{userId}/files/{fileId}"
        );
        assert_eq!(registry.resolve("get").unwrap(), "get");
    }

    #[test]
    fn test_every_listed_endpoint_resolves_to_its_template() {
        let registry = EndpointRegistry::builtin();
        for (name, template) in registry.list() {
            assert_eq!(registry.resolve(name).unwrap(), template);
            assert!(registry.is_valid(name));
        }
    }

    #[test]
    fn test_resolve_unknown_endpoint_lists_available_names() {
        let registry = EndpointRegistry::builtin();
        let error = registry.resolve("nope").unwrap_err();
        match &error {
            RegistryError::NotFound { name, available } => {
                assert_eq!(name, "nope");
                assert_eq!(available.len(), 16);
                assert!(available.contains(&"files-get".to_string()));
            }
        }
        let message = error.to_string();
        assert!(message.contains("Endpoint 'nope' not found"));
        assert!(message.contains("users-list"));
    }

    #[test]
    fn test_is_valid() {
        let registry = EndpointRegistry::builtin();
        assert!(registry.is_valid("docs-update"));
        assert!(!registry.is_valid("Docs-Update"));
        assert!(!registry.is_valid(""));
    }

    #[test]
    fn test_list_is_sorted_and_unique() {
        let list = EndpointRegistry::builtin().list();
        let names: Vec<&str> = list.iter().map(|(name, _)| *name).collect();
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_render_contains_every_endpoint() {
        let rendered = EndpointRegistry::builtin().render();
        assert!(rendered.contains("Available endpoints:"));
        assert!(rendered.contains("  files-get            -> files/{fileId}\n"));
        assert_eq!(rendered.matches(" -> ").count(), 16);
    }
}
