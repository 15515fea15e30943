use std::sync::Arc;

use crate::academic_year::{Year, DEFAULT_YEARS_TO_POSTPONE};
use crate::conflicts::{ConflictedFields, ConflictedFieldsByYear};
use crate::group::{GroupIdentity, GroupService, UpdateGroupCommand};
use crate::mini_training::{MiniTrainingIdentity, MiniTrainingService, UpdateMiniTrainingCommand};
use crate::ports::academic_year::AcademicYearSource;
use crate::ports::group::GroupRepository;
use crate::ports::mini_training::MiniTrainingRepository;
use crate::ports::training::TrainingRepository;
use crate::training::{TrainingIdentity, TrainingService, UpdateTrainingCommand};
use crate::{DomainResult, FieldName};

/// The earliest year whose snapshot was edited by hand, with the fields that
/// diverge there. Copies made before this year are kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostponementConflict {
    pub year: Year,
    pub fields: Vec<FieldName>,
}

/// Outcome of a best-effort forward propagation. `postponed` always starts
/// with the identity the update was applied to, followed by one identity per
/// copied year. A conflict is a warning, not a failure: nothing is rolled
/// back.
#[derive(Clone, Debug)]
pub struct PostponementReport<I> {
    pub postponed: Vec<I>,
    pub conflict: Option<PostponementConflict>,
}

impl<I> PostponementReport<I> {
    pub fn is_clean(&self) -> bool {
        self.conflict.is_none()
    }
}

fn first_conflict(conflicted: &ConflictedFieldsByYear) -> Option<PostponementConflict> {
    conflicted.iter().next().map(|(year, fields)| PostponementConflict {
        year: *year,
        fields: fields.clone(),
    })
}

fn end_postponement_year(entity_end_year: Option<Year>, horizon: Year) -> Year {
    entity_end_year.map_or(horizon, |end_year| end_year.min(horizon))
}

/// Applies an edit at year Y and copies it forward, one year at a time, until
/// the end-postponement year or the first manually diverged year.
#[derive(Clone)]
pub struct PostponementService {
    groups: GroupService,
    trainings: TrainingService,
    mini_trainings: MiniTrainingService,
    conflicts: ConflictedFields,
    academic_years: Arc<dyn AcademicYearSource>,
    years_to_postpone: Year,
}

impl PostponementService {
    pub fn new(
        groups: Arc<dyn GroupRepository>,
        trainings: Arc<dyn TrainingRepository>,
        mini_trainings: Arc<dyn MiniTrainingRepository>,
        academic_years: Arc<dyn AcademicYearSource>,
    ) -> Self {
        Self {
            groups: GroupService::new(groups.clone()),
            trainings: TrainingService::new(trainings.clone()),
            mini_trainings: MiniTrainingService::new(mini_trainings.clone()),
            conflicts: ConflictedFields::new(groups, trainings, mini_trainings),
            academic_years,
            years_to_postpone: DEFAULT_YEARS_TO_POSTPONE,
        }
    }

    pub fn with_years_to_postpone(mut self, years_to_postpone: Year) -> Self {
        self.years_to_postpone = years_to_postpone;
        self
    }

    async fn horizon(&self) -> DomainResult<Year> {
        Ok(self.academic_years.starting_year().await? + self.years_to_postpone)
    }

    pub async fn end_postponement_year_for_group(
        &self,
        identity: &GroupIdentity,
    ) -> DomainResult<Year> {
        let group = self.groups.get(identity).await?;
        Ok(end_postponement_year(group.end_year, self.horizon().await?))
    }

    pub async fn end_postponement_year_for_training(
        &self,
        identity: &TrainingIdentity,
    ) -> DomainResult<Year> {
        let training = self.trainings.get(identity).await?;
        Ok(end_postponement_year(training.end_year, self.horizon().await?))
    }

    pub async fn end_postponement_year_for_mini_training(
        &self,
        identity: &MiniTrainingIdentity,
    ) -> DomainResult<Year> {
        let mini_training = self.mini_trainings.get(identity).await?;
        Ok(end_postponement_year(
            mini_training.end_year,
            self.horizon().await?,
        ))
    }

    pub async fn postpone_group(
        &self,
        command: UpdateGroupCommand,
    ) -> DomainResult<PostponementReport<GroupIdentity>> {
        let identity = GroupIdentity::new(command.code.clone(), command.year);
        // Conflicts are detected against the state before the edit.
        let conflicted = self.conflicts.for_group(&identity).await?;
        let mut postponed = vec![self.groups.update(command).await?];
        let end_year = self.end_postponement_year_for_group(&identity).await?;
        for year in identity.year..end_year {
            if conflicted.contains_key(&(year + 1)) {
                // Never overwrite a year that has diverged; everything copied
                // so far is kept.
                break;
            }
            let from = GroupIdentity {
                code: identity.code.clone(),
                year,
            };
            postponed.push(self.groups.copy_to_next_year(&from).await?);
        }
        Ok(PostponementReport {
            postponed,
            conflict: first_conflict(&conflicted),
        })
    }

    pub async fn postpone_training(
        &self,
        command: UpdateTrainingCommand,
    ) -> DomainResult<PostponementReport<TrainingIdentity>> {
        let identity = TrainingIdentity::new(command.acronym.clone(), command.year);
        let conflicted = self.conflicts.for_training(&identity).await?;
        let mut postponed = vec![self.trainings.update(command).await?];
        let end_year = self.end_postponement_year_for_training(&identity).await?;
        for year in identity.year..end_year {
            if conflicted.contains_key(&(year + 1)) {
                break;
            }
            let from = TrainingIdentity {
                acronym: identity.acronym.clone(),
                year,
            };
            postponed.push(self.trainings.copy_to_next_year(&from).await?);
        }
        Ok(PostponementReport {
            postponed,
            conflict: first_conflict(&conflicted),
        })
    }

    pub async fn postpone_mini_training(
        &self,
        command: UpdateMiniTrainingCommand,
    ) -> DomainResult<PostponementReport<MiniTrainingIdentity>> {
        let identity = MiniTrainingIdentity::new(command.acronym.clone(), command.year);
        let conflicted = self.conflicts.for_mini_training(&identity).await?;
        let mut postponed = vec![self.mini_trainings.update(command).await?];
        let end_year = self
            .end_postponement_year_for_mini_training(&identity)
            .await?;
        for year in identity.year..end_year {
            if conflicted.contains_key(&(year + 1)) {
                break;
            }
            let from = MiniTrainingIdentity {
                acronym: identity.acronym.clone(),
                year,
            };
            postponed.push(self.mini_trainings.copy_to_next_year(&from).await?);
        }
        Ok(PostponementReport {
            postponed,
            conflict: first_conflict(&conflicted),
        })
    }
}
