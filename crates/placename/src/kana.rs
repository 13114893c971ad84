//! Syllabary conversion.

/// Convert katakana to hiragana.
///
/// Shifts every codepoint in the katakana block U+30A1..=U+30F6 down to its
/// hiragana counterpart; anything outside the block (prolonged sound marks,
/// ASCII, kanji) passes through unchanged.
pub fn katakana_to_hiragana(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            '\u{30A1}'..='\u{30F6}' => {
                char::from_u32(c as u32 - 0x60).unwrap_or(c)
            }
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::katakana_to_hiragana;

    #[test]
    fn test_basic_conversion() {
        assert_eq!(katakana_to_hiragana("クシロシ"), "くしろし");
        assert_eq!(katakana_to_hiragana("センダイシ"), "せんだいし");
    }

    #[test]
    fn test_small_kana_and_voiced() {
        assert_eq!(katakana_to_hiragana("ッャュョ"), "っゃゅょ");
        assert_eq!(katakana_to_hiragana("ガギグゲゴ"), "がぎぐげご");
    }

    #[test]
    fn test_outside_block_passes_through() {
        // Prolonged sound mark (U+30FC) is outside the shifted range.
        assert_eq!(katakana_to_hiragana("オーサカ"), "おーさか");
        assert_eq!(katakana_to_hiragana("abc 釧路市"), "abc 釧路市");
        assert_eq!(katakana_to_hiragana(""), "");
    }

    #[test]
    fn test_block_edges() {
        // U+30A1 (ァ) is the first shifted codepoint, U+30F6 (ヶ) the last.
        assert_eq!(katakana_to_hiragana("ァ"), "ぁ");
        assert_eq!(katakana_to_hiragana("ヶ"), "ゖ");
        // U+30F7 (ヷ) is just past the block and must pass through.
        assert_eq!(katakana_to_hiragana("ヷ"), "ヷ");
    }
}
