//! Evaluation model

use serde::{Deserialize, Serialize};

/// Labels for a 1..=5 star rating, index 0 unused
pub const STAR_LABELS: [&str; 6] = ["", "Ruim", "Regular", "Bom", "Muito Bom", "Excelente"];

/// Rated aspects of the event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RatingCategory {
    Overall,
    Content,
    Organization,
    Speakers,
}

impl RatingCategory {
    pub const ALL: [RatingCategory; 4] = [
        RatingCategory::Overall,
        RatingCategory::Content,
        RatingCategory::Organization,
        RatingCategory::Speakers,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RatingCategory::Overall => "Experiência Geral",
            RatingCategory::Content => "Conteúdo",
            RatingCategory::Organization => "Organização",
            RatingCategory::Speakers => "Palestrantes",
        }
    }
}

/// Star label for a rating, empty outside 1..=5
pub fn star_label(stars: u8) -> &'static str {
    STAR_LABELS.get(stars as usize).copied().unwrap_or("")
}

/// Body of `POST /avaliacoes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub cpf: String,
    #[serde(rename = "nota_geral")]
    pub overall: u8,
    #[serde(rename = "nota_conteudo")]
    pub content: u8,
    #[serde(rename = "nota_organizacao")]
    pub organization: u8,
    #[serde(rename = "nota_palestrantes")]
    pub speakers: u8,
    #[serde(rename = "comentario", skip_serializing_if = "Option::is_none", default)]
    pub comment: Option<String>,
    #[serde(rename = "sugestoes", skip_serializing_if = "Option::is_none", default)]
    pub suggestion: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_text_is_omitted() {
        let request = EvaluationRequest {
            cpf: "11144477735".to_string(),
            overall: 5,
            content: 4,
            organization: 3,
            speakers: 5,
            comment: None,
            suggestion: Some("Mais oficinas".to_string()),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["nota_geral"], 5);
        assert_eq!(value["sugestoes"], "Mais oficinas");
        assert!(value.get("comentario").is_none());
    }

    #[test]
    fn test_star_label() {
        assert_eq!(star_label(1), "Ruim");
        assert_eq!(star_label(5), "Excelente");
        assert_eq!(star_label(0), "");
        assert_eq!(star_label(9), "");
    }
}
