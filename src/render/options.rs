//! Rendering options and configuration.

/// Options for rendering a document structure to Markdown.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Include YAML frontmatter with title and counts
    pub include_frontmatter: bool,

    /// Include the entities table
    pub include_entities: bool,

    /// Maximum headings listed in the outline (0 = unlimited)
    pub heading_limit: usize,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Enable or disable the entities table.
    pub fn with_entities(mut self, include: bool) -> Self {
        self.include_entities = include;
        self
    }

    /// Cap the number of outline headings (0 = unlimited).
    pub fn with_heading_limit(mut self, limit: usize) -> Self {
        self.heading_limit = limit;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_frontmatter: false,
            include_entities: true,
            heading_limit: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_frontmatter(true)
            .with_entities(false)
            .with_heading_limit(10);

        assert!(options.include_frontmatter);
        assert!(!options.include_entities);
        assert_eq!(options.heading_limit, 10);
    }
}
