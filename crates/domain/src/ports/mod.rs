use std::future::Future;
use std::pin::Pin;

use crate::academic_year::Year;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub mod academic_year;
pub mod group;
pub mod mini_training;
pub mod training;

/// Filter for snapshot searches. `key` matches the code or acronym the
/// aggregate is addressed by, case-insensitively.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SnapshotQuery {
    pub key: Option<String>,
    pub year: Option<Year>,
}

impl SnapshotQuery {
    pub fn by_key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            year: None,
        }
    }

    pub fn by_year(year: Year) -> Self {
        Self {
            key: None,
            year: Some(year),
        }
    }

    pub fn matches(&self, key: &str, year: Year) -> bool {
        self.key
            .as_ref()
            .is_none_or(|wanted| wanted.eq_ignore_ascii_case(key))
            && self.year.is_none_or(|wanted| wanted == year)
    }
}
