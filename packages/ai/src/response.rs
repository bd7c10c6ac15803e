//! Fenced JSON block extraction from free-form model responses.
//!
//! Models rarely answer with bare JSON even when asked: the payload
//! usually sits inside a ```` ```json ```` fence surrounded by prose.
//! [`json_blocks`] scans a response line by line and yields the content
//! of each well-formed fence in source order. Everything outside a fence
//! is discarded.

/// Returns an iterator over the contents of the fenced JSON blocks in
/// `text`, in order of appearance.
///
/// Single pass and lazy: blocks past the one the caller takes are never
/// assembled. An unterminated trailing fence is never yielded.
#[must_use]
pub fn json_blocks(text: &str) -> JsonBlocks<'_> {
    JsonBlocks {
        lines: text.lines(),
        buffer: None,
    }
}

/// Iterator state for [`json_blocks`].
pub struct JsonBlocks<'a> {
    lines: std::str::Lines<'a>,
    /// Lines of the block being assembled, or `None` while outside any
    /// block.
    buffer: Option<Vec<&'a str>>,
}

impl Iterator for JsonBlocks<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            let trimmed = line.trim();

            if trimmed.starts_with("```json") {
                // Opens a block. A repeated opener inside a block restarts
                // it, discarding whatever was buffered.
                self.buffer = Some(Vec::new());
            } else if trimmed.starts_with("```") {
                // A bare fence only means something inside a block; stray
                // closers in surrounding prose are ignored.
                if let Some(block) = self.buffer.take() {
                    return Some(block.join("\n"));
                }
            } else if let Some(block) = &mut self.buffer {
                block.push(line);
            }
        }

        // End of input. A still-open block has no closing fence, so its
        // content is dropped.
        None
    }
}
