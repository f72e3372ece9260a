//! Canned reply engine behind `POST /api/chat`.
//!
//! There is no model here. A reply is either a fixed sentence chosen by
//! [`rules::ReplyRules`] or a random filler line, optionally followed by a
//! note echoing the caller-supplied context.

pub mod random;
pub mod rules;

pub use random::{RandomSource, SeededRandom, ThreadRandom};
pub use rules::{Reply, ReplyKind, ReplyRule, ReplyRules};

use crate::utils::time::round_to;
use chrono::{DateTime, Local};

/// Confidence scores are drawn from this closed interval.
pub const CONFIDENCE_RANGE: (f64, f64) = (0.85, 0.99);

#[derive(Debug, Clone, Default)]
pub struct Assistant {
    rules: ReplyRules,
}

impl Assistant {
    /// Builds the reply text for `message`. When `context` is given, a note
    /// quoting its first `preview_chars` characters is appended.
    pub fn reply(
        &self,
        message: &str,
        context: Option<&str>,
        preview_chars: usize,
        now: &DateTime<Local>,
        random: &dyn RandomSource,
    ) -> Reply {
        let mut reply = self.rules.select(message, now, random);
        if let Some(context) = context {
            reply.text.push_str(&context_note(context, preview_chars));
        }
        reply
    }

    /// Random confidence score, two decimals.
    pub fn confidence(&self, random: &dyn RandomSource) -> f64 {
        let (low, high) = CONFIDENCE_RANGE;
        round_to(random.uniform(low, high), 2)
    }
}

fn context_note(context: &str, max_chars: usize) -> String {
    let preview: String = context.chars().take(max_chars).collect();
    format!(" (Building on our previous conversation about: {preview}...)")
}
