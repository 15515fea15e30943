pub mod academic_year;
pub mod conflicts;
pub mod error;
pub mod group;
pub mod mini_training;
pub mod ports;
pub mod postponement;
pub mod training;
pub mod values;

#[cfg(test)]
pub(crate) mod testing;

pub type DomainResult<T> = Result<T, error::DomainError>;

/// Name of a business-content field, as reported in conflict maps.
pub type FieldName = &'static str;
