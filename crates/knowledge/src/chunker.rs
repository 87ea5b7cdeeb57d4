//! Text chunking with configurable size and overlap.

/// Chunk text into overlapping segments.
///
/// `chunk_size` and `overlap` count characters, not bytes, so multi-byte
/// text chunks the same as ASCII. Adjacent chunks overlap by exactly
/// `overlap` characters; only the final chunk may be shorter than
/// `chunk_size`.
///
/// Callers must guarantee `overlap < chunk_size` (validated at config
/// load); a zero step would never advance.
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    if text.is_empty() || chunk_size == 0 {
        return vec![];
    }

    // Byte offset of every character plus the end of the text, so character
    // positions map onto slice boundaries.
    let mut offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    offsets.push(text.len());
    let char_count = offsets.len() - 1;

    let step = chunk_size.saturating_sub(overlap).max(1);
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < char_count {
        let end = (start + chunk_size).min(char_count);
        chunks.push(text[offsets[start]..offsets[end]].to_string());

        if end == char_count {
            break;
        }
        start += step;
    }

    tracing::debug!(
        "Chunked {} chars into {} chunks (size: {}, overlap: {})",
        char_count,
        chunks.len(),
        chunk_size,
        overlap
    );

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_text_empty() {
        assert!(chunk_text("", 100, 10).is_empty());
    }

    #[test]
    fn test_single_chunk_when_text_fits() {
        let text = "a".repeat(800);
        let chunks = chunk_text(&text, 1000, 200);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].len(), 800);
    }

    #[test]
    fn test_adjacent_chunks_overlap_exactly() {
        // 2000 chars with size 1000 / overlap 200: starts at 0, 800, 1600
        let text: String = (0..2000).map(|i| (b'a' + (i % 26) as u8) as char).collect();
        let chunks = chunk_text(&text, 1000, 200);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 1000);
        assert_eq!(chunks[1].len(), 1000);
        // Final chunk is the tail and may be shorter
        assert_eq!(chunks[2].len(), 400);

        // Every adjacent pair shares exactly 200 characters
        assert_eq!(&chunks[0][800..], &chunks[1][..200]);
        assert_eq!(&chunks[1][800..], &chunks[2][..200]);
    }

    #[test]
    fn test_no_overlap() {
        let text = "a".repeat(300);
        let chunks = chunk_text(&text, 100, 0);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.len() == 100));
    }

    #[test]
    fn test_multibyte_text_chunks_by_characters() {
        // 2 bytes per char; sizes must count characters, not bytes
        let text = "é".repeat(1000);
        let chunks = chunk_text(&text, 1000, 200);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].chars().count(), 1000);
    }

    #[test]
    fn test_multibyte_overlap_is_exact_in_characters() {
        let text = "é".repeat(1800);
        let chunks = chunk_text(&text, 1000, 200);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 1000);
        assert_eq!(chunks[1].chars().count(), 1000);

        let tail: String = chunks[0].chars().skip(800).collect();
        let head: String = chunks[1].chars().take(200).collect();
        assert_eq!(tail.chars().count(), 200);
        assert_eq!(tail, head);
    }

    #[test]
    fn test_mixed_width_text_keeps_character_counts() {
        // Alternate 1-byte and 3-byte characters
        let text: String = (0..600)
            .map(|i| if i % 2 == 0 { 'a' } else { '語' })
            .collect();
        let chunks = chunk_text(&text, 250, 50);

        for chunk in &chunks[..chunks.len() - 1] {
            assert_eq!(chunk.chars().count(), 250);
        }
        // Adjacent chunks share exactly 50 characters
        let tail: String = chunks[0].chars().skip(200).collect();
        let head: String = chunks[1].chars().take(50).collect();
        assert_eq!(tail, head);
    }

    #[test]
    fn test_exact_multiple_produces_no_empty_tail() {
        let text = "a".repeat(1000);
        let chunks = chunk_text(&text, 1000, 200);
        assert_eq!(chunks.len(), 1);
    }
}
