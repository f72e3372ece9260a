//! Keyword reply rules.
//!
//! Rules are checked in order against the lowercased message; the first rule
//! with any matching keyword wins. Matching is plain substring search, so
//! "this" triggers the greeting through "hi".

use super::random::RandomSource;
use crate::utils::time::format_clock;
use chrono::{DateTime, Local};

pub const GREETING_REPLY: &str =
    "Hello! I'm JoeyAi, your advanced AI assistant. How can I help you today?";

pub const WEATHER_REPLY: &str = "I'd be happy to help with weather information! However, I don't have access to real-time weather data yet. This feature is coming soon.";

pub const HELP_REPLY: &str = "I'm here to assist you! You can ask me questions, have conversations, or request information. My capabilities are constantly expanding.";

/// Replies used when no rule matches.
pub const FALLBACK_REPLIES: [&str; 5] = [
    "That's an interesting question! I'm processing your request and learning from our conversation.",
    "I understand what you're asking. Let me think about the best way to help you with that.",
    "Great question! I'm analyzing your input and preparing a thoughtful response.",
    "I'm JoeyAi, and I'm here to help! Your message is being processed through my neural networks.",
    "Fascinating! I'm considering multiple perspectives on your question to provide the best answer.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    Fixed(&'static str),
    /// "The current time is HH:MM AM."
    CurrentTime,
}

#[derive(Debug, Clone, Copy)]
pub struct ReplyRule {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub reply: ReplyKind,
}

impl ReplyRule {
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }

    fn render(&self, now: &DateTime<Local>) -> String {
        match self.reply {
            ReplyKind::Fixed(text) => text.to_string(),
            ReplyKind::CurrentTime => format!("The current time is {}.", format_clock(now)),
        }
    }
}

/// Which rule produced a reply; `None` means the fallback pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub rule: Option<&'static str>,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct ReplyRules {
    rules: Vec<ReplyRule>,
    fallback: Vec<&'static str>,
}

impl Default for ReplyRules {
    fn default() -> Self {
        Self {
            rules: vec![
                ReplyRule {
                    name: "greeting",
                    keywords: &["hello", "hi"],
                    reply: ReplyKind::Fixed(GREETING_REPLY),
                },
                ReplyRule {
                    name: "weather",
                    keywords: &["weather"],
                    reply: ReplyKind::Fixed(WEATHER_REPLY),
                },
                ReplyRule {
                    name: "time",
                    keywords: &["time"],
                    reply: ReplyKind::CurrentTime,
                },
                ReplyRule {
                    name: "help",
                    keywords: &["help"],
                    reply: ReplyKind::Fixed(HELP_REPLY),
                },
            ],
            fallback: FALLBACK_REPLIES.to_vec(),
        }
    }
}

impl ReplyRules {
    pub fn rules(&self) -> &[ReplyRule] {
        &self.rules
    }

    /// Picks the reply for `message`. The random source is consulted only
    /// when falling back.
    pub fn select(&self, message: &str, now: &DateTime<Local>, random: &dyn RandomSource) -> Reply {
        let lowered = message.to_lowercase();

        if let Some(rule) = self.rules.iter().find(|r| r.matches(&lowered)) {
            return Reply {
                rule: Some(rule.name),
                text: rule.render(now),
            };
        }

        let text = self.fallback[random.index(self.fallback.len())].to_string();
        Reply { rule: None, text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::random::{SeededRandom, ThreadRandom};
    use chrono::TimeZone;
    use rstest::rstest;

    fn afternoon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 1, 15, 7, 0).unwrap()
    }

    #[rstest]
    #[case("Hello there", Some("greeting"))]
    #[case("HI!", Some("greeting"))]
    #[case("what is this", Some("greeting"))]
    #[case("How's the WEATHER?", Some("weather"))]
    #[case("What time is it?", Some("time"))]
    #[case("Can you help me?", Some("help"))]
    #[case("Tell me a joke", None)]
    fn test_rule_dispatch(#[case] message: &str, #[case] expected: Option<&str>) {
        let reply = ReplyRules::default().select(message, &afternoon(), &ThreadRandom);
        assert_eq!(reply.rule, expected);
    }

    #[rstest]
    #[case("hello, what's the weather", "greeting")]
    #[case("weather at this time", "greeting")]
    #[case("weather or time", "weather")]
    #[case("time to get help", "time")]
    fn test_earlier_rules_win(#[case] message: &str, #[case] expected: &str) {
        let reply = ReplyRules::default().select(message, &afternoon(), &ThreadRandom);
        assert_eq!(reply.rule, Some(expected));
    }

    #[test]
    fn test_greeting_text() {
        let reply = ReplyRules::default().select("HELLO", &afternoon(), &ThreadRandom);
        assert_eq!(reply.text, GREETING_REPLY);
    }

    #[test]
    fn test_time_reply_uses_clock() {
        let reply = ReplyRules::default().select("time?", &afternoon(), &ThreadRandom);
        assert_eq!(reply.text, "The current time is 03:07 PM.");
    }

    #[test]
    fn test_fallback_comes_from_pool() {
        let rules = ReplyRules::default();
        for _ in 0..50 {
            let reply = rules.select("Tell me a joke", &afternoon(), &ThreadRandom);
            assert!(FALLBACK_REPLIES.contains(&reply.text.as_str()));
        }
    }

    #[test]
    fn test_seeded_fallback_is_reproducible() {
        let rules = ReplyRules::default();
        let a = SeededRandom::new(3);
        let b = SeededRandom::new(3);
        for _ in 0..10 {
            assert_eq!(
                rules.select("Tell me a joke", &afternoon(), &a),
                rules.select("Tell me a joke", &afternoon(), &b)
            );
        }
    }

    #[test]
    fn test_rule_order() {
        let names: Vec<_> = ReplyRules::default().rules().iter().map(|r| r.name).collect();
        assert_eq!(names, ["greeting", "weather", "time", "help"]);
    }
}
