//! crates/script_studio_core/src/template.rs
//!
//! The fixed hook pool and the deterministic parts of script assembly.
//! Random hook selection is left to the generator so this module stays pure.

use crate::domain::Script;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Opening lines a generated script may start with.
pub const HOOKS: [&str; 5] = [
    "You won't believe what happened when...",
    "This changed everything for me...",
    "Wait until you see this trick...",
    "POV: You discover the secret to...",
    "Day 1 vs Day 30 of...",
];

/// Tags attached to every script, ahead of the topic tag.
pub const FIXED_HASHTAGS: [&str; 3] = ["#fyp", "#viral", "#trending"];

pub fn script_title(topic: &str) -> String {
    format!("{} Script", topic)
}

/// `#` followed by the topic with every whitespace character removed and
/// the remainder lower-cased.
pub fn topic_hashtag(topic: &str) -> String {
    let tag: String = topic
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    format!("#{}", tag)
}

pub fn script_hashtags(topic: &str) -> Vec<String> {
    FIXED_HASHTAGS
        .iter()
        .map(|tag| tag.to_string())
        .chain(std::iter::once(topic_hashtag(topic)))
        .collect()
}

/// Builds the three-section script body: hook line, main content, call to action.
pub fn script_content(topic: &str, hook: &str) -> String {
    format!(
        "[HOOK] {hook} {topic}!\n\
         \n\
         [MAIN CONTENT]\n\
         Let me break this down for you in the simplest way possible. First, you need to understand that {topic} is something everyone should know about. \n\
         \n\
         Here are the 3 key points:\n\
         1. Start with the basics and build your foundation\n\
         2. Practice consistently - even 5 minutes daily makes a difference  \n\
         3. Don't be afraid to experiment and find your unique approach\n\
         \n\
         The biggest mistake people make is overthinking it. Just start, learn as you go, and adjust based on what works.\n\
         \n\
         [CALL TO ACTION]\n\
         Try this today and let me know in the comments how it goes! Follow for more tips like this."
    )
}

/// Assembles a complete [`Script`].
///
/// `content_hook` is embedded in the body while `hook` is stored on its own;
/// callers sample the two independently, so they may differ.
pub fn compose_script<Tz>(
    topic: &str,
    content_hook: &str,
    hook: &str,
    created_at: &DateTime<Tz>,
) -> Script
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    Script {
        id: created_at.timestamp_millis().to_string(),
        title: script_title(topic),
        content: script_content(topic, content_hook),
        hook: hook.to_string(),
        hashtags: script_hashtags(topic),
        created_at: created_at.format("%-m/%-d/%Y").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn title_appends_script_suffix() {
        assert_eq!(script_title("yoga"), "yoga Script");
    }

    #[test]
    fn topic_hashtag_strips_whitespace_and_lowercases() {
        assert_eq!(topic_hashtag("Cooking Hacks"), "#cookinghacks");
        assert_eq!(topic_hashtag("  Morning\tRoutine  Tips "), "#morningroutinetips");
    }

    #[test]
    fn hashtags_keep_fixed_tags_first() {
        let tags = script_hashtags("Cooking Hacks");
        assert_eq!(tags, vec!["#fyp", "#viral", "#trending", "#cookinghacks"]);
    }

    #[test]
    fn content_has_all_three_sections() {
        let content = script_content("travel", HOOKS[2]);
        assert!(content.starts_with("[HOOK] Wait until you see this trick... travel!"));
        assert!(content.contains("[MAIN CONTENT]"));
        assert!(content.contains("understand that travel is something everyone should know about."));
        assert!(content.contains("Here are the 3 key points:"));
        assert!(content.contains("[CALL TO ACTION]"));
        assert!(content.ends_with("Follow for more tips like this."));
    }

    #[test]
    fn content_keeps_trailing_spaces_after_two_lines() {
        let content = script_content("travel", HOOKS[0]);
        assert!(content.contains("should know about. \n"));
        assert!(content.contains("makes a difference  \n3."));
    }

    #[test]
    fn compose_keeps_hooks_independent() {
        let created = Utc.with_ymd_and_hms(2024, 3, 7, 12, 0, 0).unwrap();
        let script = compose_script("yoga", HOOKS[0], HOOKS[4], &created);

        assert_eq!(script.id, created.timestamp_millis().to_string());
        assert_eq!(script.title, "yoga Script");
        assert_eq!(script.hook, HOOKS[4]);
        assert!(script.content.starts_with(&format!("[HOOK] {} yoga!", HOOKS[0])));
        assert_eq!(script.created_at, "3/7/2024");
        assert_eq!(script.hashtags.last().map(String::as_str), Some("#yoga"));
    }
}
