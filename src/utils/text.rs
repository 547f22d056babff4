//! Caption text inspection helpers

/// Every whitespace-delimited token starting with `#`, in order, duplicates kept
pub fn extract_hashtags(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter(|word| word.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Length of the run of hashtags that ends the text
pub fn trailing_hashtag_count(text: &str) -> usize {
    text.split_whitespace()
        .rev()
        .take_while(|word| word.starts_with('#'))
        .count()
}

/// Sentences in the prose part of a caption (hashtags ignored).
///
/// A sentence is a segment between `.`, `!`, `?` or `…` that contains at least
/// one alphanumeric character, so emoji-only tails do not count.
pub fn count_sentences(text: &str) -> usize {
    let prose = text
        .split_whitespace()
        .filter(|word| !word.starts_with('#'))
        .collect::<Vec<_>>()
        .join(" ");
    prose
        .split(['.', '!', '?', '…'])
        .filter(|segment| segment.chars().any(char::is_alphanumeric))
        .count()
}

/// Number of emoji in the text. A regional-indicator pair (flag) counts once.
pub fn count_emoji(text: &str) -> usize {
    let mut count = 0;
    let mut pending_indicator = false;
    for c in text.chars() {
        if is_regional_indicator(c) {
            if pending_indicator {
                pending_indicator = false;
            } else {
                pending_indicator = true;
                count += 1;
            }
            continue;
        }
        pending_indicator = false;
        if is_pictographic(c) {
            count += 1;
        }
    }
    count
}

fn is_regional_indicator(c: char) -> bool {
    ('\u{1F1E6}'..='\u{1F1FF}').contains(&c)
}

fn is_pictographic(c: char) -> bool {
    matches!(c as u32,
        0x1F300..=0x1F5FF
        | 0x1F600..=0x1F64F
        | 0x1F680..=0x1F6FF
        | 0x1F900..=0x1F9FF
        | 0x1FA70..=0x1FAFF
        | 0x2600..=0x26FF
        | 0x2700..=0x27BF
        | 0x2B50
        | 0x2B55)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str =
        "🎵 Amazing music session! The energy was incredible. 🎸✨\n\n#music #livemusic #musician";

    #[test]
    fn hashtags_in_order() {
        assert_eq!(
            extract_hashtags("a #b c #d #b"),
            vec!["#b".to_string(), "#d".to_string(), "#b".to_string()]
        );
        assert!(extract_hashtags("no tags here").is_empty());
    }

    #[test]
    fn measures_sample_caption() {
        assert_eq!(count_sentences(SAMPLE), 2);
        assert_eq!(count_emoji(SAMPLE), 3);
        assert_eq!(trailing_hashtag_count(SAMPLE), 3);
    }

    #[test]
    fn trailing_run_stops_at_prose() {
        assert_eq!(trailing_hashtag_count("#a words #b #c"), 2);
        assert_eq!(trailing_hashtag_count("#a #b words"), 0);
    }

    #[test]
    fn flags_count_once() {
        assert_eq!(count_emoji("🇫🇷🇬🇧"), 2);
        assert_eq!(count_emoji("plain"), 0);
    }
}
