//! Punctuation-based text splitter
//!
//! Keeps individual synthesis requests short by cutting after each
//! ideographic full stop or comma.

/// Marks that end a chunk. The mark stays with the chunk it ends.
pub const SPLIT_MARKS: [char; 2] = ['。', '、'];

/// Split `text` after every split mark, trimming each piece and dropping
/// empty ones.
pub fn split_text(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        if SPLIT_MARKS.contains(&ch) {
            let end = idx + ch.len_utf8();
            push_trimmed(&mut chunks, &text[start..end]);
            start = end;
        }
    }
    push_trimmed(&mut chunks, &text[start..]);

    chunks
}

fn push_trimmed(chunks: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        chunks.push(piece.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_japanese_sentence() {
        assert_eq!(
            split_text("こんにちは。元気ですか、はい。"),
            vec!["こんにちは。", "元気ですか、", "はい。"]
        );
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(split_text("").is_empty());
        assert!(split_text("   \n\t ").is_empty());
        assert!(split_text("\u{3000}").is_empty());
    }

    #[test]
    fn test_trailing_text_without_mark() {
        assert_eq!(split_text("一つ目。二つ目"), vec!["一つ目。", "二つ目"]);
    }

    #[test]
    fn test_whitespace_around_marks_is_trimmed() {
        assert_eq!(
            split_text("  はい 。\n  いいえ、  \n"),
            vec!["はい 。", "いいえ、"]
        );
    }

    #[test]
    fn test_consecutive_marks() {
        assert_eq!(split_text("え。。、"), vec!["え。", "。", "、"]);
    }

    #[test]
    fn test_pipe_is_ordinary_text() {
        assert_eq!(split_text("a|b。c"), vec!["a|b。", "c"]);
    }

    #[test]
    fn test_text_without_marks_is_one_chunk() {
        assert_eq!(split_text(" Hello, world. "), vec!["Hello, world."]);
    }

    #[test]
    fn test_concatenation_reconstructs_input() {
        let inputs = [
            "こんにちは。元気ですか、はい。",
            "今日は、晴れ。明日は、雨。",
            "no marks at all",
            "終わり、",
        ];
        for input in inputs {
            let chunks = split_text(input);
            assert!(chunks.iter().all(|c| !c.is_empty()));
            assert_eq!(chunks.concat(), input);
        }
    }
}
