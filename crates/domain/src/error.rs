use thiserror::Error;

use crate::academic_year::{display_as_academic_year, Year};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("group '{code}' does not exist in {}", display_as_academic_year(*year))]
    GroupNotFound { code: String, year: Year },
    #[error("training '{acronym}' does not exist in {}", display_as_academic_year(*year))]
    TrainingNotFound { acronym: String, year: Year },
    #[error("mini-training '{acronym}' does not exist in {}", display_as_academic_year(*year))]
    MiniTrainingNotFound { acronym: String, year: Year },

    #[error("acronym/short title is required")]
    AcronymRequired,
    #[error("credits must be greater or equal to 0")]
    CreditsBelowZero,
    #[error("a minimum or maximum constraint requires a constraint type")]
    ContentConstraintTypeMissing,
    #[error("a constraint type requires at least a minimum or maximum constraint")]
    ContentConstraintMinimumMaximumMissing,
    #[error("minimum constraint must be greater or equal to 1")]
    ContentConstraintMinimumInvalid,
    #[error("maximum constraint must be greater or equal to the minimum constraint")]
    ContentConstraintMaximumLowerThanMinimum,
    #[error("end year must be greater than or equal to the start year")]
    StartYearGreaterThanEndYear,
    #[error("code '{code}' already exists in {}", display_as_academic_year(*year))]
    CodeAlreadyExists { code: String, year: Year },
    #[error("acronym '{acronym}' already exists in {}", display_as_academic_year(*year))]
    AcronymAlreadyExists { acronym: String, year: Year },

    #[error(
        "cannot copy '{key}' from {} to {} because it ends in {}",
        display_as_academic_year(*from_year),
        display_as_academic_year(*from_year + 1),
        display_as_academic_year(*end_year)
    )]
    CannotCopyDueToEndDate {
        key: String,
        from_year: Year,
        end_year: Year,
    },

    #[error("storage failure: {0}")]
    Storage(String),
}
