// ── Command API ──
//
// Every write against the remote collection can be expressed as a
// `Command`. Reads bypass this and go straight to the DataStore.

pub mod requests;

use crate::model::{Culture, CultureId, Producer, ProducerId};

use self::requests::{CultureDraft, ProducerDraft, ProducerPatch};

/// All write operations against the producer registry.
#[derive(Debug, Clone)]
pub enum Command {
    // ── Producer CRUD ────────────────────────────────────────────────
    CreateProducer(ProducerDraft),
    UpdateProducer { id: ProducerId, patch: ProducerPatch },
    DeleteProducer { id: ProducerId },

    // ── Cultures ─────────────────────────────────────────────────────
    AddCulture {
        producer_id: ProducerId,
        draft: CultureDraft,
    },
    RemoveCulture {
        producer_id: ProducerId,
        culture_id: CultureId,
    },
}

impl Command {
    /// The operation this command performs, for error messages and logs.
    pub fn operation(&self) -> Operation {
        match self {
            Self::CreateProducer(_) => Operation::CreateProducer,
            Self::UpdateProducer { .. } => Operation::UpdateProducer,
            Self::DeleteProducer { .. } => Operation::DeleteProducer,
            Self::AddCulture { .. } => Operation::AddCulture,
            Self::RemoveCulture { .. } => Operation::RemoveCulture,
        }
    }
}

/// Result of a command execution.
#[derive(Debug)]
pub enum CommandResult {
    Ok,
    Producer(Producer),
    Culture(Culture),
}

/// Store operations that talk to the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    LoadProducers,
    CreateProducer,
    UpdateProducer,
    DeleteProducer,
    AddCulture,
    RemoveCulture,
    LoadDashboard,
}

impl Operation {
    /// Message shown to the end user when the server gave no detail.
    pub fn fallback_message(self) -> &'static str {
        match self {
            Self::LoadProducers => "Falha ao buscar produtores.",
            Self::CreateProducer => "Falha ao criar produtor.",
            Self::UpdateProducer => "Falha ao atualizar produtor.",
            Self::DeleteProducer => "Falha ao deletar produtor.",
            Self::AddCulture => "Falha ao adicionar cultura.",
            Self::RemoveCulture => "Falha ao remover cultura.",
            Self::LoadDashboard => "Falha ao carregar dados do dashboard.",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::LoadProducers => "load_producers",
            Self::CreateProducer => "create_producer",
            Self::UpdateProducer => "update_producer",
            Self::DeleteProducer => "delete_producer",
            Self::AddCulture => "add_culture",
            Self::RemoveCulture => "remove_culture",
            Self::LoadDashboard => "load_dashboard",
        }
    }
}
