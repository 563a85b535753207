//! Unified application error type.
//! Every layer (db, core, export, cli) returns AppError so the binary can
//! report failures in one place.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / storage
    // ---------------------------
    #[error("Erro de E/S: {0}")]
    Io(#[from] io::Error),

    #[error("Erro de banco de dados: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Erro de migração do banco: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Data inválida: {0}")]
    InvalidDate(String),

    #[error("Turno inválido '{0}': use 'manha' ou 'tarde'")]
    InvalidPeriod(String),

    #[error("Zona inválida '{0}'")]
    InvalidZone(String),

    #[error("Posição inválida na fila: {0}")]
    InvalidPosition(String),

    #[error("Intervalo inválido: {0}")]
    InvalidRange(String),

    // ---------------------------
    // Lookup errors
    // ---------------------------
    #[error("Motorista não encontrado: {0}")]
    DriverNotFound(String),

    #[error("A referência '{0}' corresponde a mais de um registro, seja mais específico")]
    AmbiguousReference(String),

    #[error("Entrada da fila não encontrada: {0}")]
    QueueEntryNotFound(String),

    #[error("Saída não encontrada: {0}")]
    LogNotFound(String),

    // ---------------------------
    // Queue / flow errors
    // ---------------------------
    #[error("O motorista '{0}' já está na fila do turno {1}")]
    AlreadyQueued(String, String),

    #[error("A fila {0} está vazia")]
    EmptyQueue(String),

    // ---------------------------
    // Session / tenant gate
    // ---------------------------
    #[error("Sessão não iniciada: use `rdispatch login --pin <PIN>` ou `rdispatch login --admin`")]
    NotAuthenticated,

    #[error("Operação reservada a administradores")]
    Forbidden,

    #[error("PIN não reconhecido")]
    InvalidPin,

    #[error("PIN já atribuído a outro inquilino")]
    DuplicatePin,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Erro de YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Erro de JSON: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Formato de exportação não suportado: {0}")]
    InvalidExportFormat(String),

    #[error("Erro de exportação: {0}")]
    Export(String),

    #[error("Erro de arquivo compactado: {0}")]
    Zip(#[from] zip::result::ZipError),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Erro interno: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
