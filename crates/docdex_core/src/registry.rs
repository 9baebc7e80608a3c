//! Library registry
//!
//! Maps library identifiers to the documentation domain path used to scope
//! searches. The table is built once at startup and never mutated.

use std::collections::HashMap;

/// Libraries supported out of the box.
const BUILTIN_LIBRARIES: &[(&str, &str)] = &[
    ("langchain", "python.langchain.com/docs"),
    ("llama-index", "docs.llamaindex.ai/en/stable"),
    ("openai", "platform.openai.com/docs"),
];

/// Immutable mapping from library name to documentation domain path
#[derive(Debug, Clone)]
pub struct LibraryRegistry {
    entries: HashMap<String, String>,
}

impl LibraryRegistry {
    /// Registry containing only the built-in libraries
    pub fn builtin() -> Self {
        Self::with_extra(&HashMap::new())
    }

    /// Registry of built-ins merged with config-provided entries
    ///
    /// Extra entries win on name collision, so a config file can repoint a
    /// built-in library at a different domain.
    pub fn with_extra(extra: &HashMap<String, String>) -> Self {
        let mut entries: HashMap<String, String> = BUILTIN_LIBRARIES
            .iter()
            .map(|(name, domain)| (name.to_string(), domain.to_string()))
            .collect();
        for (name, domain) in extra {
            entries.insert(name.clone(), domain.clone());
        }
        Self { entries }
    }

    /// Documentation domain path for a library, if registered
    pub fn domain(&self, library: &str) -> Option<&str> {
        self.entries.get(library).map(String::as_str)
    }

    /// Whether a library is registered
    pub fn contains(&self, library: &str) -> bool {
        self.entries.contains_key(library)
    }

    /// All registry entries, sorted by library name for stable output
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .entries
            .iter()
            .map(|(name, domain)| (name.as_str(), domain.as_str()))
            .collect();
        entries.sort_by_key(|(name, _)| *name);
        entries
    }

    /// Sorted library names, used in tool descriptions
    pub fn names(&self) -> Vec<&str> {
        self.entries().into_iter().map(|(name, _)| name).collect()
    }
}

impl Default for LibraryRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_libraries_are_registered() {
        let registry = LibraryRegistry::builtin();
        assert_eq!(
            registry.domain("langchain"),
            Some("python.langchain.com/docs")
        );
        assert_eq!(
            registry.domain("llama-index"),
            Some("docs.llamaindex.ai/en/stable")
        );
        assert_eq!(registry.domain("openai"), Some("platform.openai.com/docs"));
    }

    #[test]
    fn unknown_library_is_absent() {
        let registry = LibraryRegistry::builtin();
        assert_eq!(registry.domain("cohere"), None);
        assert!(!registry.contains("cohere"));
    }

    #[test]
    fn extra_entries_merge_and_override() {
        let mut extra = HashMap::new();
        extra.insert("fastapi".to_string(), "fastapi.tiangolo.com".to_string());
        extra.insert("openai".to_string(), "beta.openai.com/docs".to_string());

        let registry = LibraryRegistry::with_extra(&extra);
        assert_eq!(registry.domain("fastapi"), Some("fastapi.tiangolo.com"));
        assert_eq!(registry.domain("openai"), Some("beta.openai.com/docs"));
        // Untouched built-ins remain
        assert_eq!(
            registry.domain("langchain"),
            Some("python.langchain.com/docs")
        );
    }

    #[test]
    fn entries_are_sorted_by_name() {
        let registry = LibraryRegistry::builtin();
        let names = registry.names();
        assert_eq!(names, vec!["langchain", "llama-index", "openai"]);
    }
}
