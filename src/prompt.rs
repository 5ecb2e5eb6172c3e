//! Persona prompt and bounded context assembly
//!
//! Every request carries the same fixed persona instruction; what varies is
//! the rolling context window and the current message. The context is the
//! last few turns of the session rendered as `"role: content"` lines in
//! chronological order, never more than the configured window.

use crate::session::Session;

/// Fixed persona instruction prepended to every request
///
/// Biases the backend toward a supportive, conversational register. The
/// framing is constant for the lifetime of the process; sessions and
/// backends come and go around it.
pub const PERSONA: &str = "You are a warm, empathetic friend who listens and offers support. \
Keep responses natural and conversational, like talking to a close friend. \
Listen to the user and respond with empathy, and ask follow-up questions to show you care. \
Avoid clinical language - speak from the heart.";

/// Renders the bounded context window as `"role: content"` lines
///
/// Takes the most recent `window` turns of the session in chronological
/// order, one line per turn. Returns an empty string for an empty session.
///
/// # Examples
///
/// ```
/// use solace::prompt::render_context;
/// use solace::session::{Session, Turn};
///
/// let mut session = Session::new();
/// session.push(Turn::user("I had a rough day"));
/// session.push(Turn::assistant("Want to tell me about it?"));
///
/// let context = render_context(&session, 3);
/// assert_eq!(
///     context,
///     "user: I had a rough day\nassistant: Want to tell me about it?"
/// );
/// ```
pub fn render_context(session: &Session, window: usize) -> String {
    session
        .last(window)
        .iter()
        .map(|turn| format!("{}: {}", turn.role, turn.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the single instruction payload for one request
///
/// Wraps the persona instruction around the bounded context and the new
/// utterance. The context block is omitted entirely for an empty session.
pub fn build_prompt(session: &Session, utterance: &str, window: usize) -> String {
    let context = render_context(session, window);
    if context.is_empty() {
        format!("{}\n\nCurrent message: {}", PERSONA, utterance)
    } else {
        format!(
            "{}\n\nRecent conversation:\n{}\n\nCurrent message: {}",
            PERSONA, context, utterance
        )
    }
}
