//! Line preparation ahead of classification.

use crate::config::PipelineConfig;
use crate::emoji::EmojiTable;
use crate::patterns::USERNAME_PATTERN;

/// Lowercase, rewrite emoji (tweet mode) or drop non-ASCII (otherwise),
/// and remove usernames when asked to.
pub fn prepare_line(line: &str, config: &PipelineConfig, emojis: &EmojiTable) -> String {
    let mut text = line.trim_end().to_string();

    if config.lowercase {
        text = text.to_lowercase();
    }

    if config.tweet_mode {
        text = emojis.normalize(&text);
        text = text.replace("\"rt", "");
        text.retain(|c| c != '"');
    } else {
        text.retain(|c| matches!(c as u32, 1..=126));
    }

    if config.no_usernames {
        text = USERNAME_PATTERN.replace_all(&text, "").into_owned();
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PipelineConfig {
        PipelineConfig::default()
    }

    #[test]
    fn test_non_tweet_mode_keeps_ascii_only() {
        let out = prepare_line("caf\u{e9} na\u{ef}ve \u{1F600}ok\r\n", &config(), &EmojiTable::default());
        assert_eq!(out, "caf nave ok");
    }

    #[test]
    fn test_lowercase_applies_first() {
        let cfg = PipelineConfig {
            lowercase: true,
            ..config()
        };
        assert_eq!(prepare_line("Hello WORLD", &cfg, &EmojiTable::default()), "hello world");
    }

    #[test]
    fn test_tweet_mode_strips_retweet_markers_and_quotes() {
        let cfg = PipelineConfig {
            tweet_mode: true,
            lowercase: true,
            ..config()
        };
        let mut table = EmojiTable::default();
        table.insert("U+1F600", "*EmojiGrinningFace");

        let out = prepare_line("\"RT so \"good\" \u{1F600}", &cfg, &table);
        assert_eq!(out, " so good *EmojiGrinningFace ");
    }

    #[test]
    fn test_tweet_mode_keeps_quoted_words_ending_in_rt() {
        let cfg = PipelineConfig {
            tweet_mode: true,
            ..config()
        };
        let out = prepare_line("she said \"start\" with heart\" ok", &cfg, &EmojiTable::default());
        assert_eq!(out, "she said start with heart ok");
    }

    #[test]
    fn test_tweet_mode_keeps_unicode() {
        let cfg = PipelineConfig {
            tweet_mode: true,
            ..config()
        };
        assert_eq!(prepare_line("caf\u{e9}", &cfg, &EmojiTable::default()), "caf\u{e9}");
    }

    #[test]
    fn test_username_suppression() {
        let cfg = PipelineConfig {
            no_usernames: true,
            ..config()
        };
        assert_eq!(
            prepare_line("thanks @bob_99 and @@amy", &cfg, &EmojiTable::default()),
            "thanks  and "
        );
    }
}
