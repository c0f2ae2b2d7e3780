use serde::{Deserialize, Serialize};

/// Free text at or below this length is not analysed. Length is counted in
/// UTF-16 code units, as the browser form measures it.
pub const MIN_TEXT_UNITS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    #[serde(rename = "neutro")]
    Neutral,
    #[serde(rename = "crise")]
    Crisis,
    #[serde(rename = "depressivo")]
    Depressive,
    #[serde(rename = "ansioso")]
    Anxious,
    #[serde(rename = "esgotado")]
    Exhausted,
    #[serde(rename = "esperançoso")]
    Hopeful,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Neutral => "neutro",
            Sentiment::Crisis => "crise",
            Sentiment::Depressive => "depressivo",
            Sentiment::Anxious => "ansioso",
            Sentiment::Exhausted => "esgotado",
            Sentiment::Hopeful => "esperançoso",
        }
    }
}

const CRISIS_KEYWORDS: [&str; 5] = [
    "suicid",
    "morrer",
    "não aguento",
    "desistir",
    "não consigo mais",
];

const DEPRESSIVE_KEYWORDS: [&str; 7] = [
    "tristeza",
    "vazio",
    "sem energia",
    "inútil",
    "culpa",
    "desesperança",
    "sozinho",
];

const ANXIOUS_KEYWORDS: [&str; 6] = [
    "nervoso",
    "preocupado",
    "medo",
    "pânico",
    "inquiet",
    "tensão",
];

const BURNOUT_KEYWORDS: [&str; 4] = ["exausto", "esgotado", "sem motivação", "perdeu o sentido"];

const POSITIVE_KEYWORDS: [&str; 5] = ["melhor", "esperança", "conseguindo", "progresso", "grato"];

/// Keyword sets in priority order. Crisis language always wins.
const PRIORITY: [(Sentiment, &[&str]); 5] = [
    (Sentiment::Crisis, &CRISIS_KEYWORDS),
    (Sentiment::Depressive, &DEPRESSIVE_KEYWORDS),
    (Sentiment::Anxious, &ANXIOUS_KEYWORDS),
    (Sentiment::Exhausted, &BURNOUT_KEYWORDS),
    (Sentiment::Hopeful, &POSITIVE_KEYWORDS),
];

/// Classifies the respondent's free text by case-insensitive substring
/// search over the keyword sets, returning the first set that matches.
pub fn classify(text: &str) -> Sentiment {
    if text.encode_utf16().count() <= MIN_TEXT_UNITS {
        return Sentiment::Neutral;
    }

    let lowered = text.to_lowercase();
    PRIORITY
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(sentiment, _)| *sentiment)
        .unwrap_or(Sentiment::Neutral)
}
