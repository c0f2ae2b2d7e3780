use crate::domain::scores::DimensionScores;
use crate::domain::submission::{Answers, MAX_SCORE};
use crate::services::triage::{self, Sentiment};
use serde::Serialize;

pub const CRITICAL: i32 = 85;
pub const ELEVATED: i32 = 70;
pub const MODERATE: i32 = 40;
pub const LOW_RESOURCE_CRITICAL: i32 = 30;
pub const LOW_RESOURCE_MODERATE: i32 = 50;

/// Symptom dimensions at or above `ELEVATED` needed for the combined alert.
pub const MULTIDIMENSIONAL_MIN: usize = 3;

pub const SEPARATOR: &str = "; ";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub averages: DimensionScores<f64>,
    pub percentages: DimensionScores<i32>,
    pub alerts: Vec<String>,
    pub tips: Vec<String>,
    pub rationale: Vec<String>,
    pub sentiment: Sentiment,
}

impl Assessment {
    pub fn alert_text(&self) -> String {
        self.alerts.join(SEPARATOR)
    }

    pub fn tip_text(&self) -> String {
        self.tips.join(SEPARATOR)
    }

    pub fn rationale_text(&self) -> String {
        self.rationale.join(SEPARATOR)
    }
}

#[derive(Default)]
struct Advice {
    alerts: Vec<String>,
    tips: Vec<String>,
    rationale: Vec<String>,
}

impl Advice {
    fn add(&mut self, alert: Option<&str>, tip: &str, why: &str) {
        if let Some(alert) = alert {
            self.alerts.push(alert.to_string());
        }
        self.tips.push(tip.to_string());
        self.rationale.push(why.to_string());
    }
}

/// Scores a questionnaire and builds the advisory text.
///
/// Pure and total: identical inputs always produce identical output.
/// Dimensions are evaluated in a fixed order (stress, anxiety, burnout,
/// depression, balance, support), each contributing at most one tier. Free
/// text is triaged afterwards; crisis language is moved to the front of the
/// alert and tip lists.
pub fn evaluate(answers: &Answers, free_text: &str) -> Assessment {
    let averages = averages(answers);
    let percentages = averages.map(to_percentage);
    let mut advice = Advice::default();

    add_stress_advice(&mut advice, percentages.stress);
    add_anxiety_advice(&mut advice, percentages.anxiety);
    add_burnout_advice(&mut advice, percentages.burnout);
    add_depression_advice(&mut advice, percentages.depression);
    add_balance_advice(&mut advice, percentages.balance);
    add_support_advice(&mut advice, percentages.support);

    let sentiment = triage::classify(free_text);
    add_free_text_advice(&mut advice, sentiment);

    let elevated = percentages
        .symptoms()
        .iter()
        .filter(|p| **p >= ELEVATED)
        .count();
    if sentiment != Sentiment::Crisis && elevated >= MULTIDIMENSIONAL_MIN {
        advice.add(
            Some("Múltiplos indicadores elevados - Síndrome de esgotamento multidimensional"),
            "Sua situação requer atenção integral. Considere uma abordagem terapêutica que combine cuidado psicológico, reorganização do trabalho e fortalecimento de recursos pessoais",
            "Combinação de estresse, ansiedade e outros fatores indica necessidade de intervenção psicológica multifocal",
        );
    }

    if advice.alerts.is_empty() {
        advice.add(
            Some("Indicadores de bem-estar dentro de parâmetros saudáveis"),
            "Continue cultivando seus recursos de enfrentamento: mantenha rotinas de autocuidado, conexões sociais saudáveis e práticas de regulação emocional. Monitore periodicamente seu bem-estar",
            "Perfil atual sugere boa capacidade de autorregulação e recursos adaptativos preservados",
        );
    } else {
        advice.tips.push(
            "LEMBRE-SE: Cuidar da saúde mental é tão importante quanto cuidar da saúde física. Recursos disponíveis: CVV 188, psicólogos, psiquiatras, grupos de apoio"
                .to_string(),
        );
    }

    Assessment {
        averages,
        percentages,
        alerts: advice.alerts,
        tips: advice.tips,
        rationale: advice.rationale,
        sentiment,
    }
}

pub fn averages(answers: &Answers) -> DimensionScores<f64> {
    let mean = |pair: [f64; 2]| (pair[0] + pair[1]) / 2.0;
    DimensionScores {
        stress: mean(answers.stress),
        anxiety: mean(answers.anxiety),
        burnout: mean(answers.burnout),
        depression: mean(answers.depression),
        balance: answers.balance,
        support: answers.support,
    }
}

/// `round(average / 5 * 100)`, halves rounding up.
pub fn to_percentage(average: f64) -> i32 {
    (average / MAX_SCORE * 100.0).round() as i32
}

// ─────────────────────────────────────────────────────────
// STRESS (the only dimension with a moderate band)
// ─────────────────────────────────────────────────────────
fn add_stress_advice(a: &mut Advice, p: i32) {
    if p >= CRITICAL {
        a.add(
            Some("Estresse em nível crítico - Risco de exaustão física e mental"),
            "URGENTE: Implemente pausas obrigatórias a cada hora, pratique respiração 4-7-8 (inspire 4s, segure 7s, expire 8s) 3x ao dia. Considere redução temporária da carga de trabalho",
            "Estresse acima de 85% indica sobrecarga do sistema nervoso simpático, podendo levar a sintomas físicos e comprometimento cognitivo",
        );
    } else if p >= ELEVATED {
        a.add(
            Some("Estresse elevado - Atenção para sinais de sobrecarga"),
            "Identifique os principais estressores e desenvolva estratégias de enfrentamento. Pratique atividades físicas regulares e técnicas de relaxamento muscular progressivo",
            "Níveis de estresse entre 70-84% indicam ativação excessiva do eixo hipotálamo-pituitária-adrenal, requerendo intervenções preventivas",
        );
    } else if p >= MODERATE {
        a.add(
            None,
            "Mantenha rotinas de autocuidado e monitore os níveis de estresse. Considere atividades como caminhadas ou meditação",
            "Estresse moderado é normal, mas requer monitoramento para evitar escalada",
        );
    }
}

// ─────────────────────────────────────────────────────────
// ANXIETY
// ─────────────────────────────────────────────────────────
fn add_anxiety_advice(a: &mut Advice, p: i32) {
    if p >= CRITICAL {
        a.add(
            Some("Ansiedade severa - Interferência significativa no funcionamento"),
            "RECOMENDADO: Busque avaliação psicológica. Pratique grounding 5-4-3-2-1 (5 coisas que vê, 4 que toca, 3 que ouve, 2 que cheira, 1 que prova). Evite cafeína e estabeleça rotina de sono regular",
            "Ansiedade acima de 85% pode indicar transtorno de ansiedade generalizada ou ansiedade situacional severa, comprometendo concentração e tomada de decisões",
        );
    } else if p >= ELEVATED {
        a.add(
            Some("Ansiedade moderada a alta - Monitoramento necessário"),
            "Pratique mindfulness diário (10-15min), identifique pensamentos catastróficos e questione sua veracidade. Use técnicas de respiração diafragmática",
            "Ansiedade persistente neste nível pode evoluir para sintomas mais severos se não tratada adequadamente",
        );
    }
}

// ─────────────────────────────────────────────────────────
// BURNOUT
// ─────────────────────────────────────────────────────────
fn add_burnout_advice(a: &mut Advice, p: i32) {
    if p >= CRITICAL {
        a.add(
            Some("Burnout severo - Esgotamento profissional crítico"),
            "ESSENCIAL: Reavalie imediatamente sua carga de trabalho. Converse com RH/gestoria sobre ajustes. Reconecte-se com o propósito do seu trabalho. Considere psicoterapia focada em burnout",
            "Burnout severo indica exaustão emocional, despersonalização e redução da realização pessoal, podendo levar a depressão e problemas de saúde física",
        );
    } else if p >= ELEVATED {
        a.add(
            Some("Sinais importantes de burnout - Intervenção preventiva necessária"),
            "Estabeleça limites claros de horário de trabalho, delegue tarefas quando possível, busque atividades que tragam prazer fora do trabalho. Pratique a técnica 'duas listas' para priorizar",
            "Burnout neste nível indica início do processo de esgotamento profissional, sendo crucial a intervenção antes da progressão",
        );
    }
}

// ─────────────────────────────────────────────────────────
// DEPRESSION
// ─────────────────────────────────────────────────────────
fn add_depression_advice(a: &mut Advice, p: i32) {
    if p >= CRITICAL {
        a.add(
            Some("Indicadores severos de depressão - Avaliação profissional urgente"),
            "IMPORTANTE: Procure ajuda psicológica/psiquiátrica imediatamente. Mantenha contato com pessoas queridas, estabeleça pequenas metas diárias, pratique ativação comportamental (pequenas atividades prazerosas)",
            "Sintomas depressivos severos podem indicar episódio depressivo maior, requerendo avaliação e possivelmente tratamento farmacológico além da psicoterapia",
        );
    } else if p >= ELEVATED {
        a.add(
            Some("Sintomas depressivos significativos - Acompanhamento recomendado"),
            "Busque apoio psicológico, mantenha rotina de exercícios leves, pratique gratidão diária (3 coisas boas do dia), evite isolamento social",
            "Sintomas depressivos persistentes podem evoluir para quadros mais graves e impactar significativamente a qualidade de vida",
        );
    }
}

// ─────────────────────────────────────────────────────────
// WORK-LIFE BALANCE (inverted: low is bad)
// ─────────────────────────────────────────────────────────
fn add_balance_advice(a: &mut Advice, p: i32) {
    if p <= LOW_RESOURCE_CRITICAL {
        a.add(
            Some("Desequilíbrio severo vida-trabalho - Risco de esgotamento total"),
            "CRÍTICO: Estabeleça horários fixos de trabalho, desligue notificações após o expediente, dedique tempo não-negociável para família/lazer. Use técnica Pomodoro no trabalho",
            "Desequilíbrio extremo predispõe ao desenvolvimento de múltiplos problemas de saúde mental e física, além de prejudicar relacionamentos",
        );
    } else if p <= LOW_RESOURCE_MODERATE {
        a.add(
            Some("Desequilíbrio vida-trabalho preocupante"),
            "Defina rituais de transição entre trabalho e vida pessoal, pratique o 'não' assertivo para demandas excessivas, agende atividades prazerosas como compromissos importantes",
            "Falta de equilíbrio contribui para o desenvolvimento de estresse crônico e burnout",
        );
    }
}

// ─────────────────────────────────────────────────────────
// SOCIAL SUPPORT AT WORK (inverted: low is bad)
// ─────────────────────────────────────────────────────────
fn add_support_advice(a: &mut Advice, p: i32) {
    if p <= LOW_RESOURCE_CRITICAL {
        a.add(
            Some("Isolamento severo no ambiente de trabalho - Fator de risco importante"),
            "Busque construir pelo menos uma relação de confiança no trabalho, participe de eventos da equipe quando possível, comunique suas necessidades de suporte ao gestor de forma assertiva",
            "Falta de suporte social no trabalho é preditor significativo de burnout, depressão e ansiedade ocupacional",
        );
    } else if p <= LOW_RESOURCE_MODERATE {
        a.add(
            None,
            "Fortaleça vínculos profissionais positivos, ofereça ajuda aos colegas (reciprocidade), busque mentores ou grupos de apoio profissional",
            "Suporte social adequado é fator protetor crucial para saúde mental no trabalho",
        );
    }
}

// ─────────────────────────────────────────────────────────
// FREE TEXT
// ─────────────────────────────────────────────────────────
fn add_free_text_advice(a: &mut Advice, sentiment: Sentiment) {
    match sentiment {
        Sentiment::Crisis => {
            a.alerts.insert(
                0,
                "⚠️ ATENÇÃO: Desabafo indica possível crise - Busque ajuda profissional imediatamente"
                    .to_string(),
            );
            a.tips.insert(
                0,
                "Se você está pensando em se machucar, procure ajuda imediatamente: CVV 188, Psicólogo ou vá ao hospital mais próximo"
                    .to_string(),
            );
            a.rationale.push(
                "Expressões de desesperança ou ideação suicida requerem intervenção imediata"
                    .to_string(),
            );
        }
        Sentiment::Depressive => a.add(
            Some("Desabafo revela sinais de sofrimento depressivo"),
            "Valide seus sentimentos - é normal passar por dificuldades. Busque apoio profissional e de pessoas próximas",
            "Linguagem emocional do desabafo sugere sintomas depressivos que merecem atenção clínica",
        ),
        Sentiment::Anxious => a.add(
            Some("Desabafo demonstra sinais de ansiedade significativa"),
            "Pratique técnicas de ancoragem no presente, questione pensamentos ansiosos: 'Isso é um fato ou um medo?'",
            "Vocabulário ansioso indica ativação do sistema de alerta, sugerindo necessidade de estratégias de regulação emocional",
        ),
        Sentiment::Exhausted => a.add(
            Some("Desabafo reflete características de burnout/esgotamento"),
            "Reconecte-se com seus valores pessoais e profissionais. Considere o que ainda faz sentido no seu trabalho",
            "Relato de esgotamento e perda de sentido são características centrais do burnout",
        ),
        Sentiment::Hopeful => a.add(
            None,
            "É positivo perceber sinais de melhora em seu relato. Continue investindo no que tem funcionado bem",
            "Desabafo contém elementos de esperança e progresso, indicando recursos internos preservados",
        ),
        Sentiment::Neutral => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(stress: f64, anxiety: f64, burnout: f64, depression: f64, balance: f64, support: f64) -> Answers {
        Answers {
            stress: [stress, stress],
            anxiety: [anxiety, anxiety],
            burnout: [burnout, burnout],
            depression: [depression, depression],
            balance,
            support,
        }
    }

    /// Low symptoms, good balance and support.
    fn healthy() -> Answers {
        answers(1.0, 1.0, 1.0, 1.0, 5.0, 5.0)
    }

    const STANDING_TIP_PREFIX: &str = "LEMBRE-SE";

    #[test]
    fn test_percentages_stay_in_range() {
        let steps: Vec<f64> = (0..=10).map(|i| i as f64 * 0.5).collect();
        for a in &steps {
            for b in &steps {
                let p = to_percentage((a + b) / 2.0);
                assert!((0..=100).contains(&p), "{a} {b} -> {p}");
                assert_eq!(p, (((a + b) / 2.0) / 5.0 * 100.0_f64).round() as i32);
            }
        }
    }

    #[test]
    fn test_percentage_bounds() {
        assert_eq!(to_percentage(0.0), 0);
        assert_eq!(to_percentage(2.5), 50);
        assert_eq!(to_percentage(4.5), 90);
        assert_eq!(to_percentage(5.0), 100);
        // non-paired scores such as 3.33 still land on whole numbers
        assert_eq!(to_percentage(3.33), 67);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let input = answers(4.5, 3.5, 4.0, 2.0, 1.0, 2.0);
        let text = "Estou muito nervoso com os prazos";
        assert_eq!(evaluate(&input, text), evaluate(&input, text));
    }

    #[test]
    fn test_stress_critical_tier() {
        let result = evaluate(&answers(5.0, 0.0, 0.0, 0.0, 5.0, 5.0), "");
        assert_eq!(result.percentages.stress, 100);
        assert_eq!(result.averages.stress, 5.0);
        assert_eq!(
            result.alerts[0],
            "Estresse em nível crítico - Risco de exaustão física e mental"
        );
        assert!(result.tips[0].starts_with("URGENTE"));
        assert_eq!(result.rationale.len(), 1);
    }

    #[test]
    fn test_critical_lower_bound_is_inclusive() {
        // 4.25 -> 85%
        let result = evaluate(&answers(4.25, 0.0, 0.0, 0.0, 5.0, 5.0), "");
        assert_eq!(result.percentages.stress, 85);
        assert!(result.alerts[0].starts_with("Estresse em nível crítico"));
        assert!(!result.alerts.iter().any(|a| a.starts_with("Estresse elevado")));
    }

    #[test]
    fn test_elevated_lower_bound_is_inclusive() {
        // 3.5 -> 70%
        let result = evaluate(&answers(3.5, 0.0, 0.0, 0.0, 5.0, 5.0), "");
        assert_eq!(result.percentages.stress, 70);
        assert_eq!(result.alerts[0], "Estresse elevado - Atenção para sinais de sobrecarga");
        assert!(!result.tips.iter().any(|t| t.starts_with("Mantenha rotinas")));
    }

    #[test]
    fn test_moderate_stress_is_tip_only() {
        let result = evaluate(&answers(2.0, 0.0, 0.0, 0.0, 5.0, 5.0), "");
        assert_eq!(result.percentages.stress, 40);
        assert!(!result.alerts.iter().any(|a| a.contains("Estresse")));
        assert!(result.tips[0].starts_with("Mantenha rotinas de autocuidado"));
        assert_eq!(
            result.rationale[0],
            "Estresse moderado é normal, mas requer monitoramento para evitar escalada"
        );
        // The moderate band adds no alert, so the healthy fallback follows.
        assert_eq!(
            result.alerts,
            vec!["Indicadores de bem-estar dentro de parâmetros saudáveis".to_string()]
        );
    }

    #[test]
    fn test_moderate_band_only_applies_to_stress() {
        let result = evaluate(&answers(0.0, 2.5, 2.5, 2.5, 5.0, 5.0), "");
        assert_eq!(result.percentages.anxiety, 50);
        assert_eq!(result.tips.len(), 1);
        assert_eq!(result.rationale.len(), 1);
        assert_eq!(
            result.alerts,
            vec!["Indicadores de bem-estar dentro de parâmetros saudáveis".to_string()]
        );
    }

    #[test]
    fn test_all_zero_triggers_resource_alerts_only() {
        let result = evaluate(&Answers::default(), "");
        assert_eq!(result.percentages, DimensionScores::default());
        assert_eq!(result.alerts.len(), 2);
        assert!(result.alerts[0].starts_with("Desequilíbrio severo vida-trabalho"));
        assert!(result.alerts[1].starts_with("Isolamento severo"));
        assert_eq!(result.tips.len(), 3);
        assert!(result.tips[2].starts_with(STANDING_TIP_PREFIX));
        assert_eq!(result.rationale.len(), 2);
        assert_eq!(result.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_resource_moderate_tiers() {
        // 2.5 -> 50%
        let result = evaluate(&answers(0.0, 0.0, 0.0, 0.0, 2.5, 2.5), "");
        assert_eq!(result.alerts[0], "Desequilíbrio vida-trabalho preocupante");
        assert_eq!(result.alerts.len(), 1);
        assert!(result.tips[1].starts_with("Fortaleça vínculos"));
        assert!(result.tips[2].starts_with(STANDING_TIP_PREFIX));
        assert_eq!(result.rationale.len(), 2);
    }

    #[test]
    fn test_balance_boundaries() {
        // 1.5 -> 30%
        let critical = evaluate(&answers(0.0, 0.0, 0.0, 0.0, 1.5, 5.0), "");
        assert_eq!(critical.percentages.balance, 30);
        assert!(critical.alerts[0].starts_with("Desequilíbrio severo vida-trabalho"));
        assert!(critical.tips[0].starts_with("CRÍTICO"));

        // 1.55 -> 31%
        let moderate = evaluate(&answers(0.0, 0.0, 0.0, 0.0, 1.55, 5.0), "");
        assert_eq!(moderate.percentages.balance, 31);
        assert_eq!(moderate.alerts, vec!["Desequilíbrio vida-trabalho preocupante".to_string()]);

        // 2.55 -> 51%
        let fine = evaluate(&answers(0.0, 0.0, 0.0, 0.0, 2.55, 5.0), "");
        assert_eq!(fine.percentages.balance, 51);
        assert_eq!(
            fine.alerts,
            vec!["Indicadores de bem-estar dentro de parâmetros saudáveis".to_string()]
        );
        assert_eq!(fine.tips.len(), 1);
        assert_eq!(fine.rationale.len(), 1);
    }

    #[test]
    fn test_support_boundaries() {
        let critical = evaluate(&answers(0.0, 0.0, 0.0, 0.0, 5.0, 1.5), "");
        assert_eq!(critical.percentages.support, 30);
        assert!(critical.alerts[0].starts_with("Isolamento severo no ambiente de trabalho"));

        let moderate = evaluate(&answers(0.0, 0.0, 0.0, 0.0, 5.0, 1.55), "");
        assert_eq!(moderate.percentages.support, 31);
        assert!(moderate.tips[0].starts_with("Fortaleça vínculos"));
        assert_eq!(
            moderate.alerts,
            vec!["Indicadores de bem-estar dentro de parâmetros saudáveis".to_string()]
        );
        assert_eq!(moderate.tips.len(), 2);

        let fine = evaluate(&answers(0.0, 0.0, 0.0, 0.0, 5.0, 2.55), "");
        assert_eq!(fine.percentages.support, 51);
        assert_eq!(fine.tips.len(), 1);
        assert!(fine.tips[0].starts_with("Continue cultivando"));
    }

    #[test]
    fn test_symptom_critical_tiers() {
        // 4.5 -> 90% in a single dimension each time
        let anxiety = evaluate(&answers(0.0, 4.5, 0.0, 0.0, 5.0, 5.0), "");
        assert_eq!(anxiety.percentages.anxiety, 90);
        assert_eq!(
            anxiety.alerts[0],
            "Ansiedade severa - Interferência significativa no funcionamento"
        );
        assert!(anxiety.tips[0].starts_with("RECOMENDADO"));

        let burnout = evaluate(&answers(0.0, 0.0, 4.5, 0.0, 5.0, 5.0), "");
        assert_eq!(burnout.alerts[0], "Burnout severo - Esgotamento profissional crítico");
        assert!(burnout.tips[0].starts_with("ESSENCIAL"));

        let depression = evaluate(&answers(0.0, 0.0, 0.0, 4.5, 5.0, 5.0), "");
        assert_eq!(
            depression.alerts[0],
            "Indicadores severos de depressão - Avaliação profissional urgente"
        );
        assert!(depression.tips[0].starts_with("IMPORTANTE"));

        for result in [&anxiety, &burnout, &depression] {
            assert_eq!(result.alerts.len(), 1);
            assert!(result.tips[1].starts_with(STANDING_TIP_PREFIX));
        }
    }

    #[test]
    fn test_depression_elevated_tier() {
        // 3.5 -> 70%, 4.2 -> 84%
        for score in [3.5, 4.2] {
            let result = evaluate(&answers(0.0, 0.0, 0.0, score, 5.0, 5.0), "");
            assert_eq!(
                result.alerts,
                vec!["Sintomas depressivos significativos - Acompanhamento recomendado".to_string()]
            );
            assert!(result.tips[0].starts_with("Busque apoio psicológico"));
        }
        let below = evaluate(&answers(0.0, 0.0, 0.0, 3.45, 5.0, 5.0), "");
        assert_eq!(below.percentages.depression, 69);
        assert!(below.alerts[0].starts_with("Indicadores de bem-estar"));
    }

    #[test]
    fn test_healthy_fallback() {
        let result = evaluate(&healthy(), "");
        assert_eq!(result.alerts.len(), 1);
        assert_eq!(result.tips.len(), 1);
        assert!(result.tips[0].starts_with("Continue cultivando"));
        assert!(!result.tips.iter().any(|t| t.starts_with(STANDING_TIP_PREFIX)));
    }

    #[test]
    fn test_crisis_text_goes_first() {
        let input = answers(5.0, 5.0, 0.0, 0.0, 0.0, 5.0);
        let result = evaluate(&input, "às vezes penso em desistir de tudo");
        assert_eq!(result.sentiment, Sentiment::Crisis);
        assert!(result.alerts[0].starts_with("⚠️ ATENÇÃO"));
        assert!(result.tips[0].contains("CVV 188"));
        assert_eq!(
            result.rationale.last().map(String::as_str),
            Some("Expressões de desesperança ou ideação suicida requerem intervenção imediata")
        );
        assert!(result.tips.last().unwrap().starts_with(STANDING_TIP_PREFIX));
    }

    #[test]
    fn test_crisis_suppresses_multidimensional_alert() {
        let input = answers(4.0, 4.0, 4.0, 0.0, 5.0, 5.0);
        let result = evaluate(&input, "não consigo mais continuar assim");
        assert_eq!(result.sentiment, Sentiment::Crisis);
        assert!(!result.alerts.iter().any(|a| a.starts_with("Múltiplos indicadores")));
    }

    #[test]
    fn test_multidimensional_without_free_text() {
        // 3.75 -> 75% in three of four symptom dimensions
        let input = answers(3.75, 3.75, 3.75, 0.0, 5.0, 5.0);
        let result = evaluate(&input, "");
        assert_eq!(result.percentages.stress, 75);
        assert_eq!(result.alerts.len(), 4);
        assert_eq!(result.alerts[0], "Estresse elevado - Atenção para sinais de sobrecarga");
        assert_eq!(result.alerts[1], "Ansiedade moderada a alta - Monitoramento necessário");
        assert_eq!(
            result.alerts[2],
            "Sinais importantes de burnout - Intervenção preventiva necessária"
        );
        assert_eq!(
            result.alerts[3],
            "Múltiplos indicadores elevados - Síndrome de esgotamento multidimensional"
        );
        assert!(result.tips.last().unwrap().starts_with(STANDING_TIP_PREFIX));
    }

    #[test]
    fn test_two_elevated_dimensions_are_not_multidimensional() {
        let input = answers(3.75, 3.75, 0.0, 0.0, 5.0, 5.0);
        let result = evaluate(&input, "");
        assert_eq!(result.alerts.len(), 2);
    }

    #[test]
    fn test_free_text_categories_append() {
        let depressive = evaluate(&healthy(), "sinto um vazio enorme ultimamente");
        assert_eq!(depressive.sentiment, Sentiment::Depressive);
        assert_eq!(depressive.alerts[0], "Desabafo revela sinais de sofrimento depressivo");
        assert!(depressive.tips.last().unwrap().starts_with(STANDING_TIP_PREFIX));

        let anxious = evaluate(&healthy(), "tenho medo de errar nas entregas");
        assert_eq!(anxious.alerts[0], "Desabafo demonstra sinais de ansiedade significativa");

        let exhausted = evaluate(&healthy(), "estou esgotado com tantas demandas");
        assert_eq!(exhausted.alerts[0], "Desabafo reflete características de burnout/esgotamento");
    }

    #[test]
    fn test_positive_text_adds_no_alert() {
        let result = evaluate(&healthy(), "estou conseguindo dormir melhor");
        assert_eq!(result.sentiment, Sentiment::Hopeful);
        assert_eq!(result.alerts.len(), 1);
        assert!(result.alerts[0].starts_with("Indicadores de bem-estar"));
        assert!(result.tips[0].starts_with("É positivo perceber"));
        assert!(result.tips[1].starts_with("Continue cultivando"));
    }

    #[test]
    fn test_joined_text() {
        let result = evaluate(&Answers::default(), "");
        assert_eq!(result.alert_text(), result.alerts.join("; "));
        assert!(result.alert_text().contains("; "));
        assert_eq!(result.tip_text().matches("; ").count(), 2);
        assert_eq!(result.rationale_text().matches("; ").count(), 1);
    }
}
