//! Prompt templates
//!
//! Message text is interpolated verbatim. Nothing here escapes or filters
//! chat content, so whatever users write reaches the model as-is.

/// Prompt for an unprompted message that keeps the group talking
pub const AMBIENT_PROMPT: &str = r#"
Imagine you're in a chat group, you're just a real member of the chat and the group is a film discussion group, you know everything about films.
You just keep the group alive, like an extravert person, just ask something like regular people, it shouldn't be too long, just a few words!
No emojis unless it *really* fits. No Markdown. No formal tone.
Just be a real person, like a friend.
You can ask about the latest movies, or just say something like "hey guys, what are you watching these days?" or "any recommendations for a good movie?" or "what's your favorite film of all time?" or "have you seen any good movies lately?" or "what's your favorite genre of film?" or "who's your favorite actor/actress?" or "what's the most underrated movie you've seen?" or "what's the worst movie you've seen this year?"
"#;

/// Placeholder for replied-to content that has neither text nor caption
pub const MEDIA_PLACEHOLDER: &str = "[media]";

/// Build the prompt for a reply, or the ambient prompt when there is no message
pub fn build_prompt(message: Option<&str>) -> String {
    match message {
        Some(message) => personality_prompt(message),
        None => AMBIENT_PROMPT.to_string(),
    }
}

fn personality_prompt(message: &str) -> String {
    format!(
        r#"
You're a sarcastic, chill friend in a Telegram group full of movie nerds. And you know everything about movies.
Reply with casual, witty, Gen-Z energy, not too long, not too rude.
Use the same language the message was sent in (Uzbek, English, whatever).
Swearing is fine, just keep it natural and playful.
No emojis unless it *really* fits. No Markdown. No formal tone.
Message you're replying to:
"{message}"
"#
    )
}

/// Describe who replied to what, for use as the message of [`build_prompt`]
pub fn reply_context(
    commenter: &str,
    origin: Option<&str>,
    comment: &str,
    original: Option<&str>,
) -> String {
    format!(
        "{} commented to the \"{}\" post, he/she said:\n{}\nTo this post:\"{}\"",
        commenter,
        origin.unwrap_or("someone"),
        comment,
        original.unwrap_or(MEDIA_PLACEHOLDER)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambient_prompt_without_message() {
        assert_eq!(build_prompt(None), AMBIENT_PROMPT);
    }

    #[test]
    fn test_message_embedded_verbatim() {
        let prompt = build_prompt(Some("is Dune 2 worth it?"));
        assert!(prompt.contains("\"is Dune 2 worth it?\""));
        assert!(prompt.contains("same language"));
        assert_ne!(prompt, AMBIENT_PROMPT);
    }

    #[test]
    fn test_reply_context() {
        let context = reply_context("Bek", Some("ana"), "nice", Some("watched Interstellar"));
        assert_eq!(
            context,
            "Bek commented to the \"ana\" post, he/she said:\nnice\nTo this post:\"watched Interstellar\""
        );
    }

    #[test]
    fn test_reply_context_media_fallback() {
        let context = reply_context("Bek", None, "lol", None);
        assert!(context.contains("To this post:\"[media]\""));
        assert!(context.contains("\"someone\" post"));
    }
}
