use serde::Serialize;

use super::gap_filler::{MentionPriority, RankedMention};
use super::lines::split_lines;
use super::locator::TrueHeaderLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "priority")]
pub enum BoundaryOrigin {
    Header,
    Promoted(MentionPriority),
}

/// One reconstructed unit. The preamble has no article number and an empty
/// header line. `body` starts right after the header line's content, so it
/// opens with that line's terminator; `header_line + body` over all chunks
/// reproduces the source text exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleChunk {
    pub article_number: Option<u32>,
    pub line_index: Option<usize>,
    pub origin: Option<BoundaryOrigin>,
    pub header_line: String,
    pub body: String,
}

impl ArticleChunk {
    pub fn is_preamble(&self) -> bool {
        self.article_number.is_none()
    }

    /// Body text without the header line's own terminator.
    pub fn body_text(&self) -> &str {
        if self.is_preamble() {
            return &self.body;
        }
        self.body
            .strip_prefix("\r\n")
            .or_else(|| self.body.strip_prefix('\n'))
            .unwrap_or(&self.body)
    }
}

#[derive(Debug, Clone, Copy)]
struct Boundary {
    line_index: usize,
    char_offset: usize,
    article_number: u32,
    origin: BoundaryOrigin,
}

/// Partitions `text` at the given headers plus gap-filled mentions. Only
/// mentions found in this very text can be boundaries; numbers asserted by
/// bridging never reach this function.
pub fn reconstruct_chunks(
    text: &str,
    headers: &[TrueHeaderLocation],
    promoted: &[RankedMention],
) -> Vec<ArticleChunk> {
    let lines = split_lines(text);

    let mut boundaries = headers
        .iter()
        .map(|header| Boundary {
            line_index: header.mention.line_index,
            char_offset: header.mention.char_offset_in_line,
            article_number: header.article_number,
            origin: BoundaryOrigin::Header,
        })
        .chain(promoted.iter().map(|ranked| Boundary {
            line_index: ranked.mention.line_index,
            char_offset: ranked.mention.char_offset_in_line,
            article_number: ranked.article_number,
            origin: BoundaryOrigin::Promoted(ranked.priority),
        }))
        .filter(|boundary| boundary.line_index < lines.len())
        .collect::<Vec<Boundary>>();

    boundaries.sort_by_key(|boundary| (boundary.line_index, boundary.char_offset));
    boundaries.dedup_by_key(|boundary| boundary.line_index);

    let mut chunks = Vec::with_capacity(boundaries.len() + 1);

    let first_start = boundaries
        .first()
        .map(|boundary| lines[boundary.line_index].start)
        .unwrap_or(text.len());
    if first_start > 0 {
        chunks.push(ArticleChunk {
            article_number: None,
            line_index: None,
            origin: None,
            header_line: String::new(),
            body: text[..first_start].to_string(),
        });
    }

    for (position, boundary) in boundaries.iter().enumerate() {
        let line = lines[boundary.line_index];
        let chunk_end = boundaries
            .get(position + 1)
            .map(|next| lines[next.line_index].start)
            .unwrap_or(text.len());

        chunks.push(ArticleChunk {
            article_number: Some(boundary.article_number),
            line_index: Some(boundary.line_index),
            origin: Some(boundary.origin),
            header_line: line.content.to_string(),
            body: text[line.content_end()..chunk_end].to_string(),
        });
    }

    chunks
}

