use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ComposerError {
    #[error("Konfigurationsfehler: {0}")]
    Configuration(String),
    #[error("Fehler bei der Kommunikation mit der KI: {0}")]
    Request(String),
    #[error("Ein unbekannter Fehler ist bei der Kommunikation mit der KI aufgetreten.")]
    Unknown,
    #[error("Die KI hat eine leere Antwort geliefert.")]
    EmptyResponse,
    #[error("Die Aufgabenbeschreibung darf nicht leer sein.")]
    EmptyTask,
}
