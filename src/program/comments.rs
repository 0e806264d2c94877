//! Choosing among several comment blocks attached to one declaration.

use crate::models::Comment;

/// Tags that mark a block as the one describing the whole file or module.
const MARKER_TAGS: &[&str] = &["packageDocumentation", "module"];

/// Pick the block that documents a declaration.
///
/// A block carrying a marker tag wins outright. Otherwise the longest block
/// wins, and the earliest one among equally long blocks.
pub fn select_comment_block(blocks: &[Comment]) -> Option<&Comment> {
    if let Some(marked) = blocks
        .iter()
        .find(|block| MARKER_TAGS.iter().any(|tag| block.has_tag(tag)))
    {
        return Some(marked);
    }
    blocks.iter().fold(None, |best: Option<&Comment>, block| match best {
        Some(current) if current.content_len() >= block.content_len() => Some(current),
        _ => Some(block),
    })
}
