/// Academic years are addressed by their starting civil year.
pub type Year = i32;

/// Default horizon for forward propagation: edits reach at most
/// starting year + 6.
pub const DEFAULT_YEARS_TO_POSTPONE: Year = 6;

/// Renders 2020 as "2020-21", the way academic years are displayed.
pub fn display_as_academic_year(year: Year) -> String {
    format!("{}-{:02}", year, (year + 1).rem_euclid(100))
}
