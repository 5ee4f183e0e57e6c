//! Visual reordering with the Unicode Bidirectional Algorithm.

use unicode_bidi::BidiInfo;

/// Reorder a logical line into visual (left-to-right display) order.
///
/// Right-to-left runs are reversed and their mirrored characters swapped;
/// left-to-right and numeral runs keep their internal order. Text without
/// any right-to-left content is returned unchanged. Paragraph separators
/// stay where they are and each side is reordered on its own.
pub fn reorder_visual(line: &str) -> String {
    let mut visual = String::with_capacity(line.len());
    let mut rest = line;
    while let Some(pos) = rest.find(is_paragraph_separator) {
        visual.push_str(&reorder_paragraph(&rest[..pos]));
        let sep_len = rest[pos..].chars().next().map_or(1, char::len_utf8);
        visual.push_str(&rest[pos..pos + sep_len]);
        rest = &rest[pos + sep_len..];
    }
    visual.push_str(&reorder_paragraph(rest));
    visual
}

/// Bidi class B characters.
fn is_paragraph_separator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{1C}'..='\u{1E}' | '\u{85}' | '\u{2029}')
}

fn reorder_paragraph(line: &str) -> String {
    if line.is_empty() {
        return String::new();
    }

    let bidi_info = BidiInfo::new(line, None);
    if !bidi_info.levels.iter().any(|level| level.is_rtl()) {
        return line.to_string();
    }

    let mut visual = String::with_capacity(line.len());
    for para in &bidi_info.paragraphs {
        let (levels, runs) = bidi_info.visual_runs(para, para.range.clone());
        for run in runs {
            let segment = &line[run.clone()];
            if levels[run.start].is_rtl() {
                visual.extend(segment.chars().rev().map(mirror));
            } else {
                visual.push_str(segment);
            }
        }
    }
    visual
}

/// Swap a character with its bidi mirror, if it has one.
fn mirror(c: char) -> char {
    match c {
        '(' => ')',
        ')' => '(',
        '[' => ']',
        ']' => '[',
        '{' => '}',
        '}' => '{',
        '<' => '>',
        '>' => '<',
        '«' => '»',
        '»' => '«',
        '‹' => '›',
        '›' => '‹',
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ltr_unchanged() {
        assert_eq!(reorder_visual("Hello, world (2024)"), "Hello, world (2024)");
        assert_eq!(reorder_visual("12345"), "12345");
        assert_eq!(reorder_visual(""), "");
    }

    #[test]
    fn test_rtl_reversed() {
        assert_eq!(reorder_visual("\u{FE8D}\u{FE91}"), "\u{FE91}\u{FE8D}");
    }

    #[test]
    fn test_numbers_keep_order_in_rtl() {
        // alef, space, 1 2 3: the digits stay left-to-right
        let visual = reorder_visual("\u{0627} 123");
        assert_eq!(visual, "123 \u{0627}");
    }

    #[test]
    fn test_brackets_mirrored_in_rtl() {
        let visual = reorder_visual("\u{0627}(\u{0628})");
        assert_eq!(visual, "(\u{0628})\u{0627}");
    }

    #[test]
    fn test_paragraph_separator_stays_in_place() {
        assert_eq!(
            reorder_visual("\u{FE8F}\u{2029}\u{FE95}"),
            "\u{FE8F}\u{2029}\u{FE95}"
        );
        assert_eq!(
            reorder_visual("\u{FE8D}\u{FE91}\u{1E}\u{FE97}\u{FE95}"),
            "\u{FE91}\u{FE8D}\u{1E}\u{FE95}\u{FE97}"
        );
        assert_eq!(reorder_visual("ab\u{85}cd"), "ab\u{85}cd");
        assert_eq!(reorder_visual("\u{2029}"), "\u{2029}");
    }
}
