//! Property tests for chunk sequences

use kuaidu_core::{chunk_text, ChunkingOptions};
use proptest::prelude::*;

const LETTERS: &[char] = &[
    '春', '眠', '不', '觉', '晓', '处', '闻', '啼', '鸟', '夜', '来', '风', '雨', '声', '花',
    '我', '书', '今', '天', '三', '本', '在', '但', '是',
];
const MARKS: &[char] = &['，', '。', '！', '？', '、', '「', '」'];

fn line_strategy() -> impl Strategy<Value = String> {
    let letter = prop::sample::select(LETTERS.to_vec());
    let mark = prop::sample::select(MARKS.to_vec());
    prop::collection::vec(prop_oneof![4 => letter, 1 => mark], 0..60)
        .prop_map(|chars| chars.into_iter().collect::<String>())
}

/// A line where every mark follows a letter, so no mark is ever absorbed
fn spaced_marks_strategy() -> impl Strategy<Value = String> {
    let letter = prop::sample::select(LETTERS.to_vec()).prop_map(String::from);
    let marked = (
        prop::sample::select(LETTERS.to_vec()),
        prop::sample::select(MARKS.to_vec()),
    )
        .prop_map(|(letter, mark)| [letter, mark].iter().collect::<String>());
    prop::collection::vec(prop_oneof![3 => letter, 1 => marked], 0..40)
        .prop_map(|tokens| tokens.concat())
}

fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(line_strategy(), 1..5).prop_map(|lines| lines.join("\n"))
}

fn options_strategy() -> impl Strategy<Value = ChunkingOptions> {
    (1usize..=10, 0usize..=3, any::<bool>()).prop_map(|(target_size, flexible_range, sentence_break)| {
        ChunkingOptions {
            target_size,
            flexible_range,
            sentence_break,
            ..Default::default()
        }
    })
}

proptest! {
    #[test]
    fn test_chunks_reconstruct_text(text in text_strategy(), options in options_strategy()) {
        let chunks = chunk_text(&text, &options);
        let joined: String = chunks.iter().map(|c| c.text.as_str()).collect();
        prop_assert_eq!(joined, text.replace('\n', ""));
    }

    #[test]
    fn test_source_ranges_ordered(text in text_strategy(), options in options_strategy()) {
        let chunks = chunk_text(&text, &options);
        for chunk in &chunks {
            prop_assert!(chunk.source.start < chunk.source.end);
            prop_assert!(text.is_char_boundary(chunk.source.start));
            prop_assert!(text.is_char_boundary(chunk.source.end));
        }
        for pair in chunks.windows(2) {
            prop_assert!(pair[0].source.end <= pair[1].source.start);
        }
    }

    #[test]
    fn test_chunks_never_span_lines(text in text_strategy(), options in options_strategy()) {
        for chunk in chunk_text(&text, &options) {
            prop_assert!(!chunk.text.is_empty());
            prop_assert!(!chunk.text.contains('\n'));
            prop_assert!(!chunk.source_text(&text).contains('\n'));
        }
    }

    #[test]
    fn test_chunk_size_within_window(
        text in spaced_marks_strategy(),
        target_size in 1usize..=10,
        flexible_range in 0usize..=3,
    ) {
        let options = ChunkingOptions {
            target_size,
            flexible_range,
            sentence_break: false,
            ..Default::default()
        };
        let (min, max) = options.window();
        let chunks = chunk_text(&text, &options);
        if let Some((_, body)) = chunks.split_last() {
            for chunk in body {
                // The trailing mark is shown but is not part of the body.
                let len = chunk.source_text(&text).chars().count()
                    - usize::from(chunk.has_punctuation);
                prop_assert!(
                    (min..=max).contains(&len),
                    "chunk {:?} has a {}-char body, window {}..={}", chunk.text, len, min, max
                );
            }
        }
    }

    #[test]
    fn test_chunking_is_deterministic(text in text_strategy(), options in options_strategy()) {
        prop_assert_eq!(chunk_text(&text, &options), chunk_text(&text, &options));
    }

    #[test]
    fn test_stopwords_never_shown(text in text_strategy()) {
        let options = ChunkingOptions {
            skip_stopwords: true,
            stopwords: vec!["在".to_string(), "但是".to_string()],
            ..Default::default()
        };
        let chunks = chunk_text(&text, &options);
        for chunk in &chunks {
            prop_assert!(!chunk.text.contains('在'));
        }
        let shown: usize = chunks.iter().map(|c| c.char_len()).sum();
        let kept = text.replace('\n', "").replace("但是", "").replace('在', "");
        prop_assert!(shown <= kept.chars().count());
    }
}
