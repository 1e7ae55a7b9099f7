use crate::router::{RouterAction, View};

#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to fetch patients: {0}")]
    FetchFailed(String),
    #[error("failed to add patient: {0}")]
    SubmissionFailed(String),
    #[error("cannot {action} from the {from} view")]
    InvalidTransition { from: View, action: RouterAction },

    #[error("catalog error: {0}")]
    Catalog(#[from] rawat_catalog::CatalogError),
    #[error("identifier error: {0}")]
    Id(#[from] rawat_ids::IdError),
}

pub type PatientResult<T> = std::result::Result<T, PatientError>;
