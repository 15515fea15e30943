use super::BoxFuture;
use crate::academic_year::Year;
use crate::DomainResult;

/// Process-wide notion of "today's" academic year.
pub trait AcademicYearSource: Send + Sync {
    fn starting_year(&self) -> BoxFuture<'_, DomainResult<Year>>;
}
