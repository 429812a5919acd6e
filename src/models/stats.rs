//! Statistics returned by the admin endpoints

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstitutionCount {
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentRegistration {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "instituicao")]
    pub institution: String,
    #[serde(rename = "cargo")]
    pub role: String,
    #[serde(rename = "data_inscricao")]
    pub registered_at: String,
}

/// Response of `GET /inscricoes/stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationStats {
    #[serde(rename = "totalInscritos")]
    pub total: u64,
    #[serde(rename = "presentes")]
    pub present: u64,
    #[serde(rename = "ausentes")]
    pub absent: u64,
    #[serde(rename = "certificadosEnviados")]
    pub certificates_sent: u64,
    #[serde(rename = "porInstituicao", default)]
    pub by_institution: Vec<InstitutionCount>,
    #[serde(rename = "recentes", default)]
    pub recent: Vec<RecentRegistration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingAverages {
    #[serde(rename = "geral")]
    pub overall: f64,
    #[serde(rename = "conteudo")]
    pub content: f64,
    #[serde(rename = "organizacao")]
    pub organization: f64,
    #[serde(rename = "palestrantes")]
    pub speakers: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingBucket {
    #[serde(rename = "nota")]
    pub stars: u8,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationComment {
    #[serde(rename = "comentario")]
    pub comment: String,
    #[serde(rename = "sugestoes", default)]
    pub suggestion: Option<String>,
    pub created_at: String,
    #[serde(rename = "nome")]
    pub name: String,
}

/// Response of `GET /avaliacoes/stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationStats {
    #[serde(rename = "totalAvaliacoes")]
    pub total_evaluations: u64,
    #[serde(rename = "totalInscritos")]
    pub total_registrations: u64,
    #[serde(rename = "taxaResposta")]
    pub response_rate: f64,
    #[serde(rename = "mediaGeral")]
    pub overall_average: f64,
    #[serde(rename = "medias")]
    pub averages: RatingAverages,
    #[serde(rename = "distribuicao", default)]
    pub distribution: Vec<RatingBucket>,
    #[serde(rename = "comentarios", default)]
    pub comments: Vec<EvaluationComment>,
}

impl EvaluationStats {
    /// Number of overall ratings with the given star value
    pub fn count_for(&self, stars: u8) -> u64 {
        self.distribution
            .iter()
            .find(|bucket| bucket.stars == stars)
            .map(|bucket| bucket.count)
            .unwrap_or(0)
    }

    /// Largest bucket, at least 1 so it can scale a bar chart
    pub fn max_bucket(&self) -> u64 {
        self.distribution.iter().map(|b| b.count).max().unwrap_or(1).max(1)
    }
}

/// Response of `GET /certificados/stats`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateStats {
    #[serde(rename = "totalPresentes")]
    pub total_present: u64,
    #[serde(rename = "certificadosGerados")]
    pub generated: u64,
    #[serde(rename = "certificadosEnviados")]
    pub sent: u64,
    #[serde(rename = "pendentes")]
    pub pending: u64,
}

/// Body of action endpoints that only report a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionMessage {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_evaluation_stats_distribution_lookup() {
        let stats: EvaluationStats = serde_json::from_value(json!({
            "totalAvaliacoes": 10,
            "totalInscritos": 40,
            "taxaResposta": 25.0,
            "mediaGeral": 4.2,
            "medias": { "geral": 4.2, "conteudo": 4.0, "organizacao": 3.9, "palestrantes": 4.8 },
            "distribuicao": [ { "nota": 5, "count": 6 }, { "nota": 4, "count": 4 } ],
            "comentarios": []
        }))
        .unwrap();

        assert_eq!(stats.count_for(5), 6);
        assert_eq!(stats.count_for(1), 0);
        assert_eq!(stats.max_bucket(), 6);
    }

    #[test]
    fn test_max_bucket_never_zero() {
        let stats = EvaluationStats {
            total_evaluations: 0,
            total_registrations: 0,
            response_rate: 0.0,
            overall_average: 0.0,
            averages: RatingAverages { overall: 0.0, content: 0.0, organization: 0.0, speakers: 0.0 },
            distribution: vec![],
            comments: vec![],
        };
        assert_eq!(stats.max_bucket(), 1);
    }
}
