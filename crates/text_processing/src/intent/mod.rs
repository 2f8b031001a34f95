//! Casual Utterance Detection
//!
//! Recognizes greetings, thanks, farewells and compliments (English and
//! Turkish) so they get a canned reply instead of being run through filter
//! extraction, where "thanks!" or "good job" could otherwise leak into a
//! status or year match.
//!
//! Patterns match the whole normalized utterance, allowing a short addressee
//! ("hi there", "thanks team") and trailing punctuation. Anything longer, such
//! as "hi, show overdue actions", is a report request.
//!
//! # Example
//!
//! ```
//! use report_filter_text_processing::intent::{classify_casual, CasualCategory};
//!
//! let result = classify_casual("Thanks!");
//! assert!(result.is_casual);
//! assert_eq!(result.category, Some(CasualCategory::Thanks));
//! ```

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use std::fmt;

use crate::normalize::normalize;

/// Optional addressee and trailing punctuation shared by every category
const UTTERANCE_END: &str =
    r"(?:[\s,]+(?:there|team|all|everyone|guys|bot|assistant|friend|ekip|arkadaslar))?[\s!.,?:)]*$";

fn anchored(body: &str) -> Regex {
    Regex::new(&format!(r"^(?:{}){}", body, UTTERANCE_END)).unwrap()
}

// Patterns run against normalized text: lower-case, no diacritics.
static GREETING: Lazy<Regex> = Lazy::new(|| {
    anchored(
        r"hi+|hello+|hey+|hiya|howdy|greetings|yo|good\s+(?:morning|afternoon|evening|day)|merhaba(?:lar)?|selam(?:lar)?|slm|gunaydin|iyi\s+gunler|iyi\s+aksamlar|hos\s*bulduk",
    )
});

static THANKS: Lazy<Regex> = Lazy::new(|| {
    anchored(
        r"(?:thanks?|thx|tnx|ty)(?:\s+(?:a\s+lot|so\s+much|very\s+much|a\s+bunch|again))?|thank\s+you(?:\s+(?:so|very)\s+much)?(?:\s+again)?|many\s+thanks|much\s+appreciated|appreciate\s+it|cheers|(?:cok\s+)?tesekkurler|tesekkur\s+ederim|sag\s*ol(?:un)?|eyvallah",
    )
});

static FAREWELL: Lazy<Regex> = Lazy::new(|| {
    anchored(
        r"(?:good)?\s*bye(?:\s*bye)?|bb|see\s+(?:you|ya)(?:\s+(?:later|soon|tomorrow))?|later|good\s+night|take\s+care|have\s+a\s+(?:nice|good|great)\s+day|gorusuruz|gorusmek\s+uzere|hosca\s*kal(?:in)?|iyi\s+geceler|bay\s*bay",
    )
});

static COMPLIMENT: Lazy<Regex> = Lazy::new(|| {
    anchored(
        r"(?:(?:very\s+)?(?:great|good|nice))\s+(?:job|work)|well\s+done|awesome|amazing|perfect|excellent|brilliant|nice|cool|great|you(?:'re|\s+are)\s+(?:great|awesome|amazing|the\s+best|a\s+star)|(?:cok\s+)?(?:harika|super|mukemmel|iyi)(?:sin|siniz)?|aferin|tebrikler|eline\s+saglik",
    )
});

/// Category of a casual utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CasualCategory {
    Greeting,
    Thanks,
    Farewell,
    Compliment,
}

impl CasualCategory {
    /// Checked in this order; the first match wins
    pub const ALL: [CasualCategory; 4] = [
        CasualCategory::Greeting,
        CasualCategory::Thanks,
        CasualCategory::Farewell,
        CasualCategory::Compliment,
    ];

    /// Fixed reply pool for the category
    pub fn replies(&self) -> &'static [&'static str] {
        match self {
            CasualCategory::Greeting => &[
                "Hello! Tell me which actions you need, for example \"overdue actions with Critical risk\".",
                "Hi there! I can build report filters for you. What would you like to export?",
                "Hey! Ask me for actions by status, risk level, audit, lead, owner or year.",
            ],
            CasualCategory::Thanks => &[
                "You're welcome! Let me know if you need another report.",
                "Happy to help! Anything else you want to export?",
                "Anytime! Just ask if you need more actions.",
            ],
            CasualCategory::Farewell => &[
                "Goodbye! Come back whenever you need a report.",
                "See you later! Your filters will be here when you return.",
                "Take care! Have a productive day.",
            ],
            CasualCategory::Compliment => &[
                "Thank you! Glad the report helps.",
                "Thanks, that's kind of you! What else can I pull up?",
                "Much appreciated! Ready for the next request.",
            ],
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            CasualCategory::Greeting => &GREETING,
            CasualCategory::Thanks => &THANKS,
            CasualCategory::Farewell => &FAREWELL,
            CasualCategory::Compliment => &COMPLIMENT,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CasualCategory::Greeting => "greeting",
            CasualCategory::Thanks => "thanks",
            CasualCategory::Farewell => "farewell",
            CasualCategory::Compliment => "compliment",
        }
    }
}

impl fmt::Display for CasualCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of casual detection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CasualClassification {
    pub is_casual: bool,
    pub category: Option<CasualCategory>,
    /// Reply picked from the category's pool
    pub response: Option<String>,
}

/// Category of a casual utterance, without picking a reply
pub fn detect_category(text: &str) -> Option<CasualCategory> {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return None;
    }
    CasualCategory::ALL
        .into_iter()
        .find(|category| category.pattern().is_match(&normalized))
}

/// Pick one reply from the category's pool
pub fn pick_reply<R: Rng + ?Sized>(category: CasualCategory, rng: &mut R) -> &'static str {
    category
        .replies()
        .choose(rng)
        .copied()
        .unwrap_or_default()
}

/// Classify with the thread-local RNG
pub fn classify_casual(text: &str) -> CasualClassification {
    classify_casual_with_rng(text, &mut rand::thread_rng())
}

/// Classify with a caller-supplied RNG (seed it for reproducible replies)
pub fn classify_casual_with_rng<R: Rng + ?Sized>(text: &str, rng: &mut R) -> CasualClassification {
    match detect_category(text) {
        Some(category) => {
            tracing::debug!(category = %category, "Casual utterance detected");
            CasualClassification {
                is_casual: true,
                category: Some(category),
                response: Some(pick_reply(category, rng).to_string()),
            }
        },
        None => CasualClassification::default(),
    }
}
