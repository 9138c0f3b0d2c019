//! Location of a node inside a schema tree.

use std::fmt;

/// JSON-pointer style path from the root of a schema to one of its nodes.
///
/// Rendered as `#` for the root and `#/properties/tags/items` below it, with
/// `~` and `/` inside segments escaped as `~0` and `~1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SchemaPath {
    segments: Vec<String>,
}

impl SchemaPath {
    /// The root of a schema tree.
    pub fn root() -> Self {
        Self::default()
    }

    /// Path extended by one segment.
    pub fn join(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Path extended by a keyword and an index (`oneOf/2`).
    pub fn join_index(&self, keyword: &str, index: usize) -> Self {
        self.join(keyword).join(index.to_string())
    }
}

impl fmt::Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("#")?;
        for segment in &self.segments {
            write!(f, "/{}", segment.replace('~', "~0").replace('/', "~1"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_display() {
        assert_eq!(SchemaPath::root().to_string(), "#");
        assert_eq!(SchemaPath::root(), SchemaPath::default());
    }

    #[test]
    fn test_nested_display() {
        let path = SchemaPath::root()
            .join("properties")
            .join("tags")
            .join("items");
        assert_eq!(path.to_string(), "#/properties/tags/items");
    }

    #[test]
    fn test_join_index() {
        let path = SchemaPath::root().join_index("oneOf", 1);
        assert_eq!(path.to_string(), "#/oneOf/1");
    }

    #[test]
    fn test_escaping() {
        let path = SchemaPath::root().join("properties").join("a/b~c");
        assert_eq!(path.to_string(), "#/properties/a~1b~0c");
    }
}
