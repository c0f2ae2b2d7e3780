use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const MAX_SCORE: f64 = 5.0;

/// Questionnaire payload as posted by the portal form.
///
/// Scores arrive as numbers or numeric strings. Anything that does not parse
/// has no reading and is later counted as `0`, so a skipped question is
/// indistinguishable from an answer of `0` once scored. `defaulted_fields`
/// exposes which answers were affected so callers can log them. Text fields
/// that are not strings are read as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssessmentSubmission {
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: String,
    #[serde(default, rename = "estresse1", deserialize_with = "lenient_score")]
    pub stress_1: RawScore,
    #[serde(default, rename = "estresse2", deserialize_with = "lenient_score")]
    pub stress_2: RawScore,
    #[serde(default, rename = "ansiedade1", deserialize_with = "lenient_score")]
    pub anxiety_1: RawScore,
    #[serde(default, rename = "ansiedade2", deserialize_with = "lenient_score")]
    pub anxiety_2: RawScore,
    #[serde(default, rename = "burnout1", deserialize_with = "lenient_score")]
    pub burnout_1: RawScore,
    #[serde(default, rename = "burnout2", deserialize_with = "lenient_score")]
    pub burnout_2: RawScore,
    #[serde(default, rename = "depressao1", deserialize_with = "lenient_score")]
    pub depression_1: RawScore,
    #[serde(default, rename = "depressao2", deserialize_with = "lenient_score")]
    pub depression_2: RawScore,
    #[serde(default, rename = "equilibrio", deserialize_with = "lenient_score")]
    pub balance: RawScore,
    #[serde(default, rename = "apoio", deserialize_with = "lenient_score")]
    pub support: RawScore,
    #[serde(default, rename = "desabafo", deserialize_with = "lenient_text")]
    pub free_text: String,
}

/// One score exactly as it was sent, plus its numeric reading if it had one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawScore {
    pub sent: Value,
    pub reading: Option<f64>,
}

/// Coerced answers, every value in `[0, MAX_SCORE]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Answers {
    pub stress: [f64; 2],
    pub anxiety: [f64; 2],
    pub burnout: [f64; 2],
    pub depression: [f64; 2],
    pub balance: f64,
    pub support: f64,
}

impl AssessmentSubmission {
    pub fn answers(&self) -> Answers {
        Answers {
            stress: [coerce(&self.stress_1), coerce(&self.stress_2)],
            anxiety: [coerce(&self.anxiety_1), coerce(&self.anxiety_2)],
            burnout: [coerce(&self.burnout_1), coerce(&self.burnout_2)],
            depression: [coerce(&self.depression_1), coerce(&self.depression_2)],
            balance: coerce(&self.balance),
            support: coerce(&self.support),
        }
    }

    /// Wire names of the scores that were missing or not numeric.
    pub fn defaulted_fields(&self) -> Vec<&'static str> {
        self.raw_scores()
            .into_iter()
            .filter(|(_, value)| value.map(|v| !v.is_finite()).unwrap_or(true))
            .map(|(name, _)| name)
            .collect()
    }

    fn raw_scores(&self) -> [(&'static str, Option<f64>); 10] {
        [
            ("estresse1", self.stress_1.reading),
            ("estresse2", self.stress_2.reading),
            ("ansiedade1", self.anxiety_1.reading),
            ("ansiedade2", self.anxiety_2.reading),
            ("burnout1", self.burnout_1.reading),
            ("burnout2", self.burnout_2.reading),
            ("depressao1", self.depression_1.reading),
            ("depressao2", self.depression_2.reading),
            ("equilibrio", self.balance.reading),
            ("apoio", self.support.reading),
        ]
    }

    /// Question texts paired with what the respondent sent, grouped the way
    /// the questionnaire presents them.
    pub fn detailed_answers(&self) -> Vec<AnswerGroup> {
        let score = |raw: &RawScore| raw.sent.clone();
        let group = |title: &str, questions: Vec<(&str, Value)>| AnswerGroup {
            group: title.to_string(),
            questions: questions
                .into_iter()
                .map(|(text, answer)| QuestionAnswer {
                    text: text.to_string(),
                    answer,
                })
                .collect(),
        };

        let free_text = if self.free_text.is_empty() {
            Value::from("Não informado")
        } else {
            Value::from(self.free_text.clone())
        };

        vec![
            group(
                "Estresse",
                vec![
                    ("Tenho me sentido sobrecarregado(a) pelas demandas de trabalho.", score(&self.stress_1)),
                    ("Tenho dificuldade para relaxar após o expediente.", score(&self.stress_2)),
                ],
            ),
            group(
                "Ansiedade",
                vec![
                    ("Tenho me sentido preocupado(a) excessivamente com meu desempenho.", score(&self.anxiety_1)),
                    ("Tenho dificuldade em me concentrar devido a pensamentos acelerados.", score(&self.anxiety_2)),
                ],
            ),
            group(
                "Burnout",
                vec![
                    ("Ao final do expediente, sinto-me esgotado(a).", score(&self.burnout_1)),
                    ("Tenho perdido o entusiasmo pelo meu trabalho.", score(&self.burnout_2)),
                ],
            ),
            group(
                "Depressão",
                vec![
                    ("Tenho perdido interesse em atividades que antes eram agradáveis.", score(&self.depression_1)),
                    ("Tenho sentido falta de energia ou motivação para iniciar o dia.", score(&self.depression_2)),
                ],
            ),
            group(
                "Equilíbrio / Apoio",
                vec![
                    ("Tenho conseguido manter equilíbrio entre vida pessoal e profissional.", score(&self.balance)),
                    ("Sinto que tenho apoio suficiente de colegas e gestores no trabalho.", score(&self.support)),
                ],
            ),
            group(
                "Desabafo (opcional)",
                vec![("Gostaria de compartilhar algo sobre como estou me sentindo:", free_text)],
            ),
        ]
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerGroup {
    #[serde(rename = "grupo")]
    pub group: String,
    #[serde(rename = "perguntas")]
    pub questions: Vec<QuestionAnswer>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionAnswer {
    #[serde(rename = "texto")]
    pub text: String,
    #[serde(rename = "resposta")]
    pub answer: Value,
}

fn coerce(raw: &RawScore) -> f64 {
    raw.reading
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, MAX_SCORE))
        .unwrap_or(0.0)
}

fn lenient_score<'de, D>(deserializer: D) -> Result<RawScore, D::Error>
where
    D: Deserializer<'de>,
{
    let sent = Value::deserialize(deserializer)?;
    let reading = match &sent {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float_prefix(s),
        _ => None,
    };
    Ok(RawScore { sent, reading })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// Parses the longest leading decimal number of `raw`, ignoring leading
/// whitespace: `"3"`, `" 4.5 "`, `"2abc"` and `"1e0x"` all parse, `"abc"`
/// and `""` do not.
pub fn parse_float_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}
