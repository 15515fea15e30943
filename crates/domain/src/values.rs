use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::DomainResult;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Titles {
    pub title_fr: String,
    pub title_en: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Remark {
    pub text_fr: String,
    pub text_en: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Campus {
    pub name: String,
    pub university_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintType {
    CreditUnits,
    NumberOfElements,
}

/// Bounds on the content a curriculum object may hold. A constraint only
/// makes sense with both a type and at least one bound.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentConstraint {
    pub constraint_type: Option<ConstraintType>,
    pub minimum: Option<u32>,
    pub maximum: Option<u32>,
}

impl ContentConstraint {
    pub fn check(&self) -> DomainResult<()> {
        match (&self.constraint_type, self.minimum, self.maximum) {
            (None, None, None) => Ok(()),
            (None, _, _) => Err(DomainError::ContentConstraintTypeMissing),
            (Some(_), None, None) => Err(DomainError::ContentConstraintMinimumMaximumMissing),
            (Some(_), minimum, maximum) => {
                if minimum.is_some_and(|min| min < 1) {
                    return Err(DomainError::ContentConstraintMinimumInvalid);
                }
                if let (Some(min), Some(max)) = (minimum, maximum) {
                    if max < min {
                        return Err(DomainError::ContentConstraintMaximumLowerThanMinimum);
                    }
                }
                Ok(())
            }
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActiveStatus {
    Active,
    Inactive,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleType {
    Daily,
    Shifted,
    Adapted,
}
