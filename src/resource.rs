//! The format-agnostic translation unit shared by readers, the driver and writers.

/// One translatable string and, once translated, its translation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resource {
    /// Path of the file the resource was read from; empty for inline text.
    pub source_file_name: String,
    /// Logical key. Empty for line-based text and inline text.
    pub resource_name: String,
    /// Text to translate. Blank text is never sent to the provider.
    pub source_text: String,
    /// Translated text; empty until the driver fills it in.
    pub destination_text: String,
}

impl Resource {
    /// Creates a resource read from `file` under the key `name`.
    pub fn new(
        file: impl Into<String>,
        name: impl Into<String>,
        source_text: impl Into<String>,
    ) -> Self {
        Self {
            source_file_name: file.into(),
            resource_name: name.into(),
            source_text: source_text.into(),
            destination_text: String::new(),
        }
    }

    /// Wraps text given on the command line.
    pub fn inline(source_text: impl Into<String>) -> Self {
        Self::new(String::new(), String::new(), source_text)
    }

    /// Returns `true` if there is something to translate.
    pub fn is_translatable(&self) -> bool {
        !self.source_text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_resource_has_no_name_or_file() {
        let resource = Resource::inline("Hello World!");
        assert!(resource.source_file_name.is_empty());
        assert!(resource.resource_name.is_empty());
        assert_eq!(resource.source_text, "Hello World!");
        assert!(resource.destination_text.is_empty());
    }

    #[test]
    fn test_is_translatable() {
        assert!(Resource::inline("text").is_translatable());
        assert!(!Resource::inline("").is_translatable());
        assert!(!Resource::inline("  \t ").is_translatable());
    }
}
