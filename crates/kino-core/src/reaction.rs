//! Emoji reaction selection
//!
//! The model is asked for one emoji from an allow-list. Its answer is then
//! repaired against that list, so the result is always a member of it.

use tracing::{debug, warn};

use crate::llm::TextGenerator;

/// Reaction used when nothing in the model's answer matches
pub const THINKING_REACTION: &str = "🤔";

/// Small set used for reactions on group messages
pub const SAFE_REACTIONS: &[&str] = &[
    "😂", "😢", "🤯", "🔥", "💀", "👏", "👎", "😡", "🥱", "💔", "🤔",
];

/// Telegram's standard reaction palette, used when a chat's palette is unavailable
pub const DEFAULT_REACTIONS: &[&str] = &[
    "👍", "👎", "❤", "🔥", "🥰", "👏", "😁", "🤔", "🤯", "😱", "🤬", "😢", "🎉", "🤩", "🤮",
    "💩", "🙏", "👌", "🕊", "🤡", "🥱", "🥴", "😍", "🐳", "❤‍🔥", "🌚", "🌭", "💯", "🤣", "⚡",
    "🍌", "🏆", "💔", "🤨", "😐", "🍓", "🍾", "💋", "🖕", "😈", "😴", "😭", "🤓", "👻", "👨‍💻",
    "👀", "🎃", "🙈", "😇", "😨", "🤝", "✍", "🤗", "🫡", "🎅", "🎄", "☃", "💅", "🤪", "🗿",
    "🆒", "💘", "🙉", "🦄", "😘", "💊", "🙊", "😎", "👾", "🤷‍♂", "🤷", "🤷‍♀", "😡",
];

/// Owned copy of a built-in reaction list
pub fn to_owned_list(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Prompt asking for exactly one emoji from `allowed`
pub fn reaction_prompt(text: &str, allowed: &[String]) -> String {
    format!(
        "Based on the tone and vibe of the following message, reply with the most suitable emoji from this list only: {}.\n\nMessage: \"{}\"\n\nOnly return the emoji.",
        allowed.join(", "),
        text
    )
}

/// Fallback when the answer is unusable: 🤔 if allowed, otherwise the first entry
pub fn fallback_reaction(allowed: &[String]) -> Option<&str> {
    allowed
        .iter()
        .find(|r| r.as_str() == THINKING_REACTION)
        .or_else(|| allowed.first())
        .map(String::as_str)
}

/// Map a raw model answer onto the allow-list.
///
/// Exact member first, then the first allowed symbol contained in the
/// answer, then [`fallback_reaction`]. `None` only for an empty list.
pub fn repair_reaction(raw: &str, allowed: &[String]) -> Option<String> {
    let raw = raw.trim();

    if let Some(exact) = allowed.iter().find(|r| r.as_str() == raw) {
        return Some(exact.clone());
    }

    if !raw.is_empty() {
        if let Some(found) = allowed.iter().find(|r| raw.contains(r.as_str())) {
            debug!("Recovered reaction {} from {:?}", found, raw);
            return Some(found.clone());
        }
    }

    fallback_reaction(allowed).map(str::to_string)
}

/// Ask the model for a reaction to `text` and repair the answer
pub async fn choose_reaction(
    generator: &dyn TextGenerator,
    text: &str,
    allowed: &[String],
) -> Option<String> {
    if allowed.is_empty() {
        return None;
    }

    match generator.generate(&reaction_prompt(text, allowed)).await {
        Ok(raw) => repair_reaction(&raw, allowed),
        Err(e) => {
            warn!("AI reaction error: {}", e);
            fallback_reaction(allowed).map(str::to_string)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Canned {
        reply: Option<String>,
        prompts: Mutex<Vec<String>>,
    }

    impl Canned {
        fn ok(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for Canned {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone().ok_or(Error::EmptyResponse)
        }
    }

    fn safe() -> Vec<String> {
        to_owned_list(SAFE_REACTIONS)
    }

    #[test]
    fn test_exact_member_unchanged() {
        for emoji in SAFE_REACTIONS {
            assert_eq!(repair_reaction(emoji, &safe()).as_deref(), Some(*emoji));
        }
        assert_eq!(repair_reaction("  🔥\n", &safe()).as_deref(), Some("🔥"));
    }

    #[test]
    fn test_substring_recovered() {
        assert_eq!(repair_reaction("🔥 great shot", &safe()).as_deref(), Some("🔥"));
        assert_eq!(
            repair_reaction("I'd go with 💀 honestly", &safe()).as_deref(),
            Some("💀")
        );
    }

    #[test]
    fn test_no_match_uses_fallback() {
        assert_eq!(repair_reaction("🦄", &safe()).as_deref(), Some("🤔"));
        assert_eq!(repair_reaction("", &safe()).as_deref(), Some("🤔"));

        let without_thinking = to_owned_list(&["👍", "👎"]);
        assert_eq!(
            repair_reaction("no idea", &without_thinking).as_deref(),
            Some("👍")
        );
    }

    #[test]
    fn test_result_always_allowed() {
        let lists = [
            safe(),
            to_owned_list(DEFAULT_REACTIONS),
            to_owned_list(&["🍌"]),
            to_owned_list(&["👍", "❤"]),
        ];
        let outputs = [
            "",
            "   ",
            "🔥",
            "🔥🔥🔥",
            "the answer is 😂!",
            "❤️",
            "🤷‍♂️",
            "Sure! Here's an emoji: 🎉",
            "plain words only",
            "🍌 and 👍",
        ];

        for allowed in &lists {
            for output in outputs {
                let chosen = repair_reaction(output, allowed).unwrap();
                assert!(allowed.contains(&chosen), "{chosen} not in list for {output:?}");
            }
        }
    }

    #[test]
    fn test_empty_allow_list() {
        assert_eq!(repair_reaction("🔥", &[]), None);
        assert_eq!(fallback_reaction(&[]), None);
    }

    #[test]
    fn test_reaction_prompt_lists_symbols() {
        let prompt = reaction_prompt("so sad", &to_owned_list(&["😢", "🔥"]));
        assert!(prompt.contains("😢, 🔥"));
        assert!(prompt.contains("Message: \"so sad\""));
        assert!(prompt.ends_with("Only return the emoji."));
    }

    #[test]
    fn test_default_palette_contains_safe_basics() {
        assert!(DEFAULT_REACTIONS.contains(&"🔥"));
        assert!(DEFAULT_REACTIONS.contains(&THINKING_REACTION));
        assert!(DEFAULT_REACTIONS.len() > 70);
    }

    #[tokio::test]
    async fn test_choose_reaction_repairs_answer() {
        let generator = Canned::ok("🔥 great shot");
        let chosen = choose_reaction(&generator, "photo", &safe()).await;
        assert_eq!(chosen.as_deref(), Some("🔥"));

        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Message: \"photo\""));
    }

    #[tokio::test]
    async fn test_choose_reaction_generator_failure() {
        let chosen = choose_reaction(&Canned::failing(), "hi", &safe()).await;
        assert_eq!(chosen.as_deref(), Some(THINKING_REACTION));
    }

    #[tokio::test]
    async fn test_choose_reaction_empty_list_skips_call() {
        let generator = Canned::ok("🔥");
        assert_eq!(choose_reaction(&generator, "hi", &[]).await, None);
        assert!(generator.prompts.lock().unwrap().is_empty());
    }
}
