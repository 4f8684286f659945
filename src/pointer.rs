//! JSON Pointer (RFC 6901) locations, used to say *where* a decode failed.
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct JsonPointer {
    segments: Vec<String>,
}

impl JsonPointer {
    pub fn root() -> Self {
        Self::default()
    }

    /// A new pointer one level below `self`.
    pub fn child(&self, segment: impl ToString) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment.to_string());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            f.write_str("/")?;
            // `~` must be escaped before `/`, otherwise `/` → `~1` → `~01`
            f.write_str(&segment.replace('~', "~0").replace('/', "~1"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_renders_empty() {
        assert_eq!(JsonPointer::root().to_string(), "");
        assert!(JsonPointer::root().is_root());
    }

    #[test]
    fn nested_segments_are_escaped() {
        let ptr = JsonPointer::root()
            .child("properties")
            .child("a/b~c")
            .child(0);
        assert_eq!(ptr.to_string(), "/properties/a~1b~0c/0");
        assert_eq!(ptr.segments().len(), 3);
    }
}
