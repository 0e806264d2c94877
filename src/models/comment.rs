//! Parsed documentation comments attached to reflections.

use smol_str::SmolStr;

/// A single block tag such as `@param name text` or `@hidden`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentTag {
    /// Tag name without the leading `@`.
    pub tag_name: SmolStr,
    /// Parameter name for `@param`/`@typeParam` style tags.
    pub param_name: Option<SmolStr>,
    pub text: String,
}

impl CommentTag {
    pub fn new(tag_name: impl Into<SmolStr>, text: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            param_name: None,
            text: text.into(),
        }
    }

    pub fn with_param(mut self, param_name: impl Into<SmolStr>) -> Self {
        self.param_name = Some(param_name.into());
        self
    }
}

/// A documentation comment: summary line, body and block tags.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Comment {
    pub short_text: String,
    pub text: String,
    pub tags: Vec<CommentTag>,
}

impl Comment {
    pub fn new(short_text: impl Into<String>) -> Self {
        Self {
            short_text: short_text.into(),
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_tag(mut self, tag: CommentTag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn has_tag(&self, tag_name: &str) -> bool {
        self.tags.iter().any(|t| t.tag_name == tag_name)
    }

    pub fn tag(&self, tag_name: &str, param_name: Option<&str>) -> Option<&CommentTag> {
        self.tags.iter().find(|t| {
            t.tag_name == tag_name
                && match param_name {
                    Some(param) => t.param_name.as_deref() == Some(param),
                    None => true,
                }
        })
    }

    pub fn remove_tags(&mut self, tag_name: &str) {
        self.tags.retain(|t| t.tag_name != tag_name);
    }

    /// Whether the comment carries any visible content.
    pub fn has_visible_component(&self) -> bool {
        !self.short_text.trim().is_empty() || !self.text.trim().is_empty() || !self.tags.is_empty()
    }

    /// Length used when comparing competing comment blocks.
    pub fn content_len(&self) -> usize {
        self.short_text.len()
            + self.text.len()
            + self.tags.iter().map(|t| t.text.len()).sum::<usize>()
    }
}
