//! Canned replies for greetings and farewells
//!
//! Social pleasantries are answered locally so they never cost a model
//! round trip. Matching is exact on the normalized message (trimmed,
//! lower-cased, trailing punctuation stripped).

const GREETINGS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "kia ora",
    "good morning",
    "good afternoon",
    "good evening",
    "morena",
];

const FAREWELLS: &[&str] = &[
    "bye",
    "goodbye",
    "see you",
    "see ya",
    "thanks",
    "thank you",
    "cheers",
    "ka kite",
];

const GREETING_REPLY: &str =
    "Kia ora! I'm the careers assistant. Ask me anything about CVs, cover letters, \
     internships, job searching, workshops or booking an appointment.";

const FAREWELL_REPLY: &str =
    "All the best with your career journey! Come back any time you have more questions.";

fn normalize(message: &str) -> String {
    message
        .trim()
        .trim_end_matches(['!', '?', '.', ','])
        .trim()
        .to_lowercase()
}

/// Returns a canned reply if the message is a greeting or farewell
pub fn reply_to(message: &str) -> Option<&'static str> {
    let normalized = normalize(message);
    if GREETINGS.contains(&normalized.as_str()) {
        Some(GREETING_REPLY)
    } else if FAREWELLS.contains(&normalized.as_str()) {
        Some(FAREWELL_REPLY)
    } else {
        None
    }
}
