use std::collections::BTreeMap;
use std::sync::Arc;

use crate::academic_year::Year;
use crate::error::DomainError;
use crate::group::GroupIdentity;
use crate::mini_training::MiniTrainingIdentity;
use crate::ports::group::GroupRepository;
use crate::ports::mini_training::MiniTrainingRepository;
use crate::ports::training::TrainingRepository;
use crate::training::TrainingIdentity;
use crate::{DomainResult, FieldName};

/// Year-keyed map of diverging business fields. Ordered, so the earliest
/// conflict year is always the first entry.
pub type ConflictedFieldsByYear = BTreeMap<Year, Vec<FieldName>>;

/// Detects where a previously copied-forward snapshot chain has since been
/// edited by hand. Walks from the given year through consecutive next-year
/// snapshots until the chain ends; every pairwise divergence is recorded
/// under the later year.
#[derive(Clone)]
pub struct ConflictedFields {
    groups: Arc<dyn GroupRepository>,
    trainings: Arc<dyn TrainingRepository>,
    mini_trainings: Arc<dyn MiniTrainingRepository>,
}

impl ConflictedFields {
    pub fn new(
        groups: Arc<dyn GroupRepository>,
        trainings: Arc<dyn TrainingRepository>,
        mini_trainings: Arc<dyn MiniTrainingRepository>,
    ) -> Self {
        Self {
            groups,
            trainings,
            mini_trainings,
        }
    }

    pub async fn for_group(
        &self,
        identity: &GroupIdentity,
    ) -> DomainResult<ConflictedFieldsByYear> {
        let mut current = self.groups.get(identity).await?.ok_or_else(|| {
            DomainError::GroupNotFound {
                code: identity.code.clone(),
                year: identity.year,
            }
        })?;
        let mut conflicted = ConflictedFieldsByYear::new();
        loop {
            let next_identity = current.identity.next_year();
            // End of the chain is loop termination, not an error.
            let Some(next) = self.groups.get(&next_identity).await? else {
                break;
            };
            let fields = current.conflicted_fields(&next);
            if !fields.is_empty() {
                conflicted.insert(next_identity.year, fields);
            }
            current = next;
        }
        Ok(conflicted)
    }

    pub async fn for_training(
        &self,
        identity: &TrainingIdentity,
    ) -> DomainResult<ConflictedFieldsByYear> {
        let mut current = self.trainings.get(identity).await?.ok_or_else(|| {
            DomainError::TrainingNotFound {
                acronym: identity.acronym.clone(),
                year: identity.year,
            }
        })?;
        let mut conflicted = ConflictedFieldsByYear::new();
        loop {
            let next_identity = current.identity.next_year();
            let Some(next) = self.trainings.get(&next_identity).await? else {
                break;
            };
            let fields = current.conflicted_fields(&next);
            if !fields.is_empty() {
                conflicted.insert(next_identity.year, fields);
            }
            current = next;
        }
        Ok(conflicted)
    }

    pub async fn for_mini_training(
        &self,
        identity: &MiniTrainingIdentity,
    ) -> DomainResult<ConflictedFieldsByYear> {
        let mut current = self.mini_trainings.get(identity).await?.ok_or_else(|| {
            DomainError::MiniTrainingNotFound {
                acronym: identity.acronym.clone(),
                year: identity.year,
            }
        })?;
        let mut conflicted = ConflictedFieldsByYear::new();
        loop {
            let next_identity = current.identity.next_year();
            let Some(next) = self.mini_trainings.get(&next_identity).await? else {
                break;
            };
            let fields = current.conflicted_fields(&next);
            if !fields.is_empty() {
                conflicted.insert(next_identity.year, fields);
            }
            current = next;
        }
        Ok(conflicted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        group_factory, MemoryGroupRepository, MemoryMiniTrainingRepository,
        MemoryTrainingRepository,
    };

    fn detector(groups: Arc<MemoryGroupRepository>) -> ConflictedFields {
        ConflictedFields::new(
            groups,
            Arc::new(MemoryTrainingRepository::default()),
            Arc::new(MemoryMiniTrainingRepository::default()),
        )
    }

    #[tokio::test]
    async fn no_future_years_yields_empty_map() {
        let groups = Arc::new(MemoryGroupRepository::default());
        groups.seed(group_factory("LBIOL100C", 2024)).await;

        let conflicted = detector(groups)
            .for_group(&GroupIdentity::new("LBIOL100C", 2024))
            .await
            .expect("walk");
        assert!(conflicted.is_empty());
    }

    #[tokio::test]
    async fn identical_chain_yields_empty_map() {
        let groups = Arc::new(MemoryGroupRepository::default());
        for year in 2024..=2028 {
            groups.seed(group_factory("LBIOL100C", year)).await;
        }

        let conflicted = detector(groups)
            .for_group(&GroupIdentity::new("LBIOL100C", 2024))
            .await
            .expect("walk");
        assert!(conflicted.is_empty());
    }

    #[tokio::test]
    async fn only_the_diverging_field_is_listed() {
        let groups = Arc::new(MemoryGroupRepository::default());
        groups.seed(group_factory("LBIOL100C", 2024)).await;
        groups.seed(group_factory("LBIOL100C", 2025)).await;
        let mut edited = group_factory("LBIOL100C", 2026);
        edited.credits = 45;
        groups.seed(edited).await;

        let conflicted = detector(groups)
            .for_group(&GroupIdentity::new("LBIOL100C", 2024))
            .await
            .expect("walk");
        assert_eq!(
            conflicted,
            ConflictedFieldsByYear::from([(2026, vec!["credits"])])
        );
    }

    #[tokio::test]
    async fn comparison_is_pairwise_between_consecutive_years() {
        // 2025 diverges from 2024, and 2026 matches 2025 again: only one
        // conflict year is reported.
        let groups = Arc::new(MemoryGroupRepository::default());
        groups.seed(group_factory("LBIOL100C", 2024)).await;
        let mut edited = group_factory("LBIOL100C", 2025);
        edited.remark.text_fr = "nouvelle remarque".to_string();
        groups.seed(edited.clone()).await;
        let mut same_as_2025 = edited;
        same_as_2025.identity = GroupIdentity::new("LBIOL100C", 2026);
        groups.seed(same_as_2025).await;

        let conflicted = detector(groups)
            .for_group(&GroupIdentity::new("LBIOL100C", 2024))
            .await
            .expect("walk");
        assert_eq!(
            conflicted,
            ConflictedFieldsByYear::from([(2025, vec!["remark"])])
        );
    }

    #[tokio::test]
    async fn walk_stops_at_the_first_missing_year() {
        let groups = Arc::new(MemoryGroupRepository::default());
        groups.seed(group_factory("LBIOL100C", 2024)).await;
        groups.seed(group_factory("LBIOL100C", 2025)).await;
        // 2026 is missing; 2027 diverges but is unreachable.
        let mut edited = group_factory("LBIOL100C", 2027);
        edited.credits = 99;
        groups.seed(edited).await;

        let conflicted = detector(groups)
            .for_group(&GroupIdentity::new("LBIOL100C", 2024))
            .await
            .expect("walk");
        assert!(conflicted.is_empty());
    }

    #[tokio::test]
    async fn missing_starting_snapshot_is_a_genuine_error() {
        let groups = Arc::new(MemoryGroupRepository::default());
        let err = detector(groups)
            .for_group(&GroupIdentity::new("LBIOL100C", 2024))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::GroupNotFound {
                code: "LBIOL100C".to_string(),
                year: 2024
            }
        );
    }
}
