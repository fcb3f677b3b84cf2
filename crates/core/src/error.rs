#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid rule catalogue: {0}")]
    InvalidCatalog(String),
    #[error("failed to parse rule catalogue YAML: {0}")]
    CatalogParse(serde_yaml::Error),
    #[error("evaluation failed: a checker panicked: {0}")]
    EvaluationPanicked(String),
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
