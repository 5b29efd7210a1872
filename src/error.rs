use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuestsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Nome da quest não pode estar vazio.")]
    EmptyQuestName,

    #[error("Por favor, insira valores numéricos válidos.")]
    InvalidNumericInput,

    #[error("Selecione uma quest para completar.")]
    NoActiveQuestToComplete,

    #[error("Selecione uma quest para excluir.")]
    NoActiveQuestToDelete,
}

pub type Result<T> = std::result::Result<T, QuestsError>;
