//! Configuração do Axon carregada a partir de `axon.toml`.
//!
//! A struct [`AxonConfig`] contém todos os parâmetros configuráveis.
//! Valores não presentes no arquivo usam defaults sensíveis.
//! A variável de ambiente `AXON_SUBMIT_TIMEOUT_MS` tem precedência sobre o arquivo.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::error::AxonError;
use crate::wizard::{ManuscriptDraft, PriorityTier, ReviewerCount};

const DEFAULT_PATH: &str = "axon.toml";

/// Configuração de nível superior carregada de `axon.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct AxonConfig {
    /// Número de revisores pré-selecionado no passo de configurações.
    #[serde(default = "default_reviewer_count")]
    pub default_reviewer_count: ReviewerCount,

    /// Prioridade pré-selecionada no passo de configurações.
    #[serde(default)]
    pub default_priority: PriorityTier,

    /// Tempo máximo em milissegundos para uma submissão em andamento.
    #[serde(default = "default_submit_timeout_ms")]
    pub submit_timeout_ms: u64,

    /// Latência simulada do destino de submissão embutido.
    #[serde(default = "default_simulated_latency_ms")]
    pub simulated_latency_ms: u64,

    /// Arquivo JSON com os eventos da timeline. Usa a amostra fixa se ausente.
    #[serde(default)]
    pub events_path: Option<String>,

    /// Arquivo JSON com a fila de revisões. Usa a amostra fixa se ausente.
    #[serde(default)]
    pub reviews_path: Option<String>,
}

// Valor padrão para o número de revisores: 3.
fn default_reviewer_count() -> ReviewerCount {
    ReviewerCount::default()
}

// Valor padrão para o timeout de submissão: 30s.
fn default_submit_timeout_ms() -> u64 {
    30_000
}

// Valor padrão para a latência simulada: 3s.
fn default_simulated_latency_ms() -> u64 {
    3_000
}

impl Default for AxonConfig {
    fn default() -> Self {
        Self {
            default_reviewer_count: default_reviewer_count(),
            default_priority: PriorityTier::default(),
            submit_timeout_ms: default_submit_timeout_ms(),
            simulated_latency_ms: default_simulated_latency_ms(),
            events_path: None,
            reviews_path: None,
        }
    }
}

impl AxonConfig {
    /// Carrega a configuração de `axon.toml` (ou do caminho informado).
    /// Usa valores padrão se o arquivo não existir.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_PATH));
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            toml::from_str::<AxonConfig>(&contents).map_err(AxonError::from)?
        } else {
            Self::default()
        };

        // Variável de ambiente tem precedência sobre o arquivo de configuração para o timeout.
        if let Ok(raw) = std::env::var("AXON_SUBMIT_TIMEOUT_MS") {
            config.submit_timeout_ms = raw
                .parse()
                .map_err(|_| AxonError::Config(format!("AXON_SUBMIT_TIMEOUT_MS is not a number: {raw}")))?;
        }

        Ok(config)
    }

    pub fn submit_timeout(&self) -> Duration {
        Duration::from_millis(self.submit_timeout_ms)
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }

    /// Rascunho inicial de uma nova sessão do assistente.
    pub fn new_draft(&self) -> ManuscriptDraft {
        ManuscriptDraft::with_settings(self.default_reviewer_count, self.default_priority)
    }
}
