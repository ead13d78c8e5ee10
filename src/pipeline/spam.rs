//! Rule-based spam scoring.
//!
//! Three additive components (keywords, capitalization, URLs), summed
//! and clamped to [0, 1]. A heuristic likelihood estimate, not a
//! calibrated probability.

use regex::Regex;
use tracing::debug;

use crate::message::Message;

/// Threshold used when the caller has no configured value. The pipeline
/// always passes its configured threshold instead.
pub const DEFAULT_SPAM_THRESHOLD: f64 = 0.7;

/// Words and tokens that commonly appear in spam.
const SPAM_KEYWORDS: &[&str] = &[
    "free",
    "discount",
    "limited time",
    "offer",
    "click here",
    "click now",
    "exclusive",
    "win",
    "winner",
    "prize",
    "claim",
    "urgent",
    "act now",
    "guaranteed",
    "congratulations",
    "selected",
    "cash",
    "money",
    "credit",
    "buy",
    "purchase",
    "order",
    "sale",
    "deal",
    "subscribe",
    "trial",
    "viagra",
    "pharmacy",
    "loan",
    "refinance",
    "mortgage",
    "unsubscribe",
    "$$$",
    "!!!",
    "earn extra cash",
    "work from home",
];

const KEYWORD_WEIGHT: f64 = 0.5;
const CAPS_WEIGHT: f64 = 0.3;
const URL_WEIGHT: f64 = 0.2;

/// Uppercase ratio above which the capitalization component kicks in.
const CAPS_RATIO_GATE: f64 = 0.3;

/// Computes a bounded spam likelihood score for a message.
pub struct SpamScorer {
    url_pattern: Regex,
}

impl SpamScorer {
    pub fn new() -> Self {
        Self {
            url_pattern: Regex::new(r"https?://").unwrap(),
        }
    }

    /// Score `message` in [0.0, 1.0]. Pure and deterministic.
    ///
    /// - Keywords: distinct spam keywords found in subject+body
    ///   contribute `min(count/5, 1) * 0.5`.
    /// - Capitalization: uppercase ratio above 0.3 contributes
    ///   `min((ratio - 0.3) * 2, 1) * 0.3`.
    /// - URLs: more than one `http(s)://` occurrence contributes
    ///   `min((count - 1)/4, 1) * 0.2`.
    pub fn score(&self, message: &Message) -> f64 {
        let mut score = 0.0;
        let text = format!(
            "{} {}",
            message.subject.to_lowercase(),
            message.body.to_lowercase()
        );

        let keyword_count = SPAM_KEYWORDS.iter().filter(|k| text.contains(*k)).count();
        if keyword_count > 0 {
            let component = (keyword_count as f64 / 5.0).min(1.0) * KEYWORD_WEIGHT;
            score += component;
            debug!(keyword_count, component, "Spam keywords found");
        }

        let caps_count = message
            .subject
            .chars()
            .chain(message.body.chars())
            .filter(char::is_ascii_uppercase)
            .count();
        let total_len =
            message.subject.chars().count().max(1) + message.body.chars().count().max(1);
        let caps_ratio = caps_count as f64 / total_len as f64;
        if caps_ratio > CAPS_RATIO_GATE {
            let component = ((caps_ratio - CAPS_RATIO_GATE) * 2.0).min(1.0) * CAPS_WEIGHT;
            score += component;
            debug!(caps_ratio, component, "High capitalization ratio");
        }

        let url_count = self.url_pattern.find_iter(&message.subject).count()
            + self.url_pattern.find_iter(&message.body).count();
        if url_count > 1 {
            let component = ((url_count - 1) as f64 / 4.0).min(1.0) * URL_WEIGHT;
            score += component;
            debug!(url_count, component, "Multiple URLs found");
        }

        let final_score = score.min(1.0);
        debug!(
            recipient = %message.recipient,
            score = final_score,
            "Calculated spam score"
        );
        final_score
    }

    /// True iff the score strictly exceeds `threshold`.
    pub fn is_spam(&self, message: &Message, threshold: f64) -> bool {
        self.score(message) > threshold
    }
}

impl Default for SpamScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Channel;
    use rand::Rng;
    use rand::seq::SliceRandom;

    fn message(subject: &str, body: &str) -> Message {
        Message::new("a@b.com", subject, body, Channel::Email).unwrap()
    }

    #[test]
    fn clean_message_scores_zero() {
        let scorer = SpamScorer::new();
        let msg = message("Lunch", "See you at noon.");
        assert_eq!(scorer.score(&msg), 0.0);
    }

    #[test]
    fn keyword_component_scales_with_distinct_matches() {
        let scorer = SpamScorer::new();
        // Two distinct keywords, nothing else.
        let msg = message("free offer", "");
        assert!((scorer.score(&msg) - 0.2).abs() < 1e-9);
    }

    #[test]
    fn repeated_keyword_counts_once() {
        let scorer = SpamScorer::new();
        let msg = message("free free free", "free");
        assert!((scorer.score(&msg) - 0.1).abs() < 1e-9);
    }

    #[test]
    fn keyword_component_caps_at_half() {
        let scorer = SpamScorer::new();
        // Ten distinct keywords ("win" matches inside "winner"), well
        // past the count cap of five.
        let msg = message(
            "winner prize claim",
            "guaranteed cash loan mortgage viagra pharmacy",
        );
        assert!((scorer.score(&msg) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn caps_component_requires_ratio_above_gate() {
        let scorer = SpamScorer::new();
        // 16 uppercase of 19 effective chars: ratio ~0.84, component capped at 0.3.
        let shouty = message("HELLO THERE FRIEND", "");
        assert!((scorer.score(&shouty) - 0.3).abs() < 1e-9);

        // Mild capitalization stays below the gate.
        let mild = message("Hello There", "just checking in about dinner plans");
        assert_eq!(scorer.score(&mild), 0.0);
    }

    #[test]
    fn single_url_is_free_but_multiple_are_not() {
        let scorer = SpamScorer::new();
        let one = message("Link", "see https://example.com for details");
        assert_eq!(scorer.score(&one), 0.0);

        let two = message("Links", "see https://a.example and http://b.example");
        assert!((scorer.score(&two) - 0.05).abs() < 1e-9);
    }

    #[test]
    fn component_math_for_a_known_spam_message() {
        let scorer = SpamScorer::new();
        // Five distinct keywords (free, "!!!", win, cash, "click here")
        // max out the keyword component at 0.5; three URLs contribute
        // (3-1)/4 * 0.2 = 0.1; caps ratio 14/57 stays below the gate.
        let msg = message(
            "FREE!!! WIN CASH NOW",
            "click here http://x http://y http://z",
        );
        assert!((scorer.score(&msg) - 0.6).abs() < 1e-9);
    }

    #[test]
    fn is_spam_is_strictly_greater_than() {
        let scorer = SpamScorer::new();
        // Exactly five distinct keywords, nothing else: score is exactly 0.5.
        let msg = message("free offer win cash prize", "");
        assert!((scorer.score(&msg) - 0.5).abs() < 1e-12);
        assert!(!scorer.is_spam(&msg, 0.5));
        assert!(scorer.is_spam(&msg, 0.49));
    }

    #[test]
    fn default_threshold_applies_to_standalone_use() {
        let scorer = SpamScorer::new();
        let msg = message("Lunch", "See you at noon.");
        assert!(!scorer.is_spam(&msg, DEFAULT_SPAM_THRESHOLD));
    }

    #[test]
    fn score_is_always_bounded() {
        let scorer = SpamScorer::new();
        let mut rng = rand::thread_rng();
        let fragments = [
            "free",
            "WIN BIG",
            "http://spam.example",
            "https://more.example",
            "!!!",
            "$$$",
            "hello",
            "quarterly report attached",
            "LOUD NOISES",
            "click here",
            "earn extra cash",
            "see you tomorrow",
        ];
        for _ in 0..200 {
            let subject: Vec<&str> = (0..rng.gen_range(0..4))
                .map(|_| *fragments.choose(&mut rng).unwrap())
                .collect();
            let body: Vec<&str> = (0..rng.gen_range(0..10))
                .map(|_| *fragments.choose(&mut rng).unwrap())
                .collect();
            let msg = message(&subject.join(" "), &body.join(" "));
            let score = scorer.score(&msg);
            assert!((0.0..=1.0).contains(&score), "score {score} out of bounds");
        }
    }
}
