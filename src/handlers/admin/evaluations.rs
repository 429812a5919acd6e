//! Evaluations panel: survey statistics and CSV export

use crate::models::EvaluationStats;
use crate::services::ApiClient;
use crate::services::api::{EXPORT_FALLBACK, LOAD_FALLBACK};
use crate::utils::errors::Result;
use super::PanelState;

/// Default file name for the evaluations export
pub const EXPORT_FILE_NAME: &str = "avaliacoes_evento.csv";

/// One row of the overall-rating distribution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionRow {
    pub stars: u8,
    pub count: u64,
    /// Share of the largest bucket, 0.0 to 1.0
    pub ratio: f64,
}

#[derive(Debug)]
pub struct EvaluationsPanel {
    stats: Option<EvaluationStats>,
    state: PanelState,
}

impl EvaluationsPanel {
    pub fn new() -> Self {
        Self { stats: None, state: PanelState::Loading }
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn stats(&self) -> Option<&EvaluationStats> {
        self.stats.as_ref()
    }

    pub fn apply_stats(&mut self, stats: EvaluationStats) {
        self.state = if stats.total_evaluations == 0 { PanelState::Empty } else { PanelState::Loaded };
        self.stats = Some(stats);
    }

    pub async fn load(&mut self, api: &ApiClient) {
        match api.fetch_evaluation_stats().await {
            Ok(stats) => self.apply_stats(stats),
            Err(e) => self.state = PanelState::failed(&e, LOAD_FALLBACK),
        }
    }

    /// Distribution from 5 stars down to 1, with missing values as zero
    pub fn distribution(&self) -> Vec<DistributionRow> {
        let Some(stats) = &self.stats else {
            return Vec::new();
        };
        let max = stats.max_bucket() as f64;

        (1..=5u8)
            .rev()
            .map(|stars| {
                let count = stats.count_for(stars);
                DistributionRow { stars, count, ratio: count as f64 / max }
            })
            .collect()
    }

    pub async fn export(&self, api: &ApiClient) -> Result<String> {
        api.export_evaluations_csv().await
    }
}

impl Default for EvaluationsPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// Message shown when the evaluations export fails
pub fn export_error_message(error: &crate::utils::errors::PortalError) -> String {
    error.user_message(EXPORT_FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stats(total: u64) -> EvaluationStats {
        serde_json::from_value(json!({
            "totalAvaliacoes": total,
            "totalInscritos": 50,
            "taxaResposta": 20.0,
            "mediaGeral": 4.5,
            "medias": { "geral": 4.5, "conteudo": 4.4, "organizacao": 4.1, "palestrantes": 4.9 },
            "distribuicao": [ { "nota": 5, "count": 8 }, { "nota": 3, "count": 2 } ],
            "comentarios": [
                { "comentario": "Muito bom", "sugestoes": null, "created_at": "2026-02-26 18:00:00", "nome": "Ana" }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_distribution_fills_missing_star_values() {
        let mut panel = EvaluationsPanel::new();
        panel.apply_stats(stats(10));

        let rows = panel.distribution();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], DistributionRow { stars: 5, count: 8, ratio: 1.0 });
        assert_eq!(rows[1].count, 0);
        assert_eq!(rows[2].stars, 3);
        assert!((rows[2].ratio - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_evaluations_is_empty_state() {
        let mut panel = EvaluationsPanel::new();
        assert!(panel.distribution().is_empty());

        panel.apply_stats(stats(0));
        assert_eq!(panel.state(), &PanelState::Empty);
    }
}
