//! Interface de linha de comando do Axon baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (submit, cost,
//! timeline, queue) e flags globais (--config, --verbose).

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::timeline::{EventStatus, StatusFilter};
use crate::wizard::PriorityTier;

/// Axon — submissão de manuscritos e acompanhamento de revisão por pares.
#[derive(Debug, Parser)]
#[command(name = "axon", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Caminho para o arquivo de configuração (padrão: ./axon.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Habilita saída detalhada (verbose).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

/// Nível de prioridade aceito pela CLI, mapeado para [`PriorityTier`].
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PriorityArg {
    /// Revisão em 14-21 dias.
    Standard,
    /// Revisão em 7-10 dias, custo em tokens dobrado.
    Urgent,
}

impl From<PriorityArg> for PriorityTier {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::Standard => PriorityTier::Standard,
            PriorityArg::Urgent => PriorityTier::Urgent,
        }
    }
}

fn parse_status_filter(raw: &str) -> Result<StatusFilter, String> {
    raw.parse().map_err(|_| {
        let known: Vec<&str> = EventStatus::ALL.iter().map(|s| s.as_str()).collect();
        format!("expected `all` or one of: {}", known.join(", "))
    })
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submete um manuscrito percorrendo os quatro passos do assistente.
    Submit {
        /// Título do manuscrito.
        #[arg(long, default_value = "")]
        title: String,

        /// Resumo da pesquisa.
        #[arg(long = "abstract", default_value = "")]
        abstract_text: String,

        /// Palavras-chave separadas por vírgula.
        #[arg(long, default_value = "")]
        keywords: String,

        /// Categoria de pesquisa.
        #[arg(long, default_value = "")]
        category: String,

        /// Arquivo do manuscrito (PDF, DOC, DOCX ou TEX).
        #[arg(long)]
        file: Option<PathBuf>,

        /// Número de revisores (2 a 5).
        #[arg(long, value_parser = clap::value_parser!(u8).range(2..=5))]
        reviewers: Option<u8>,

        /// Nível de prioridade.
        #[arg(long)]
        priority: Option<PriorityArg>,

        /// Nome do autor registrado no evento da timeline.
        #[arg(long, default_value = "You")]
        author: String,
    },

    /// Mostra o custo de staking para as configurações de revisão.
    Cost {
        /// Número de revisores; sem ele, mostra a tabela completa.
        #[arg(long, value_parser = clap::value_parser!(u8).range(2..=5))]
        reviewers: Option<u8>,

        /// Nível de prioridade.
        #[arg(long, default_value = "standard")]
        priority: PriorityArg,
    },

    /// Lista a timeline de atividades com busca e filtro de status.
    Timeline {
        /// Texto buscado em títulos, autores e revisores.
        #[arg(long, short, default_value = "")]
        query: String,

        /// `all` ou um status exato (under_review, completed, accepted, in_progress, rejected).
        #[arg(long, short, default_value = "all", value_parser = parse_status_filter)]
        status: StatusFilter,
    },

    /// Mostra a fila de revisões atribuídas.
    Queue,
}
