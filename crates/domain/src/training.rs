use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::academic_year::Year;
use crate::error::DomainError;
use crate::ports::training::TrainingRepository;
use crate::ports::SnapshotQuery;
use crate::values::{ActiveStatus, Campus, Remark, ScheduleType, Titles};
use crate::{DomainResult, FieldName};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrainingKind {
    Bachelor,
    Master,
    Specialization,
    Certificate,
    Phd,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TrainingIdentity {
    pub acronym: String,
    pub year: Year,
}

impl TrainingIdentity {
    pub fn new(acronym: impl Into<String>, year: Year) -> Self {
        Self {
            acronym: acronym.into().to_uppercase(),
            year,
        }
    }

    pub fn next_year(&self) -> Self {
        Self {
            acronym: self.acronym.clone(),
            year: self.year + 1,
        }
    }
}

/// Yearly snapshot of a training offer, addressed by (acronym, year). The
/// code is business content here: it follows the snapshot when copied.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Training {
    pub identity: TrainingIdentity,
    pub code: String,
    pub kind: TrainingKind,
    pub status: ActiveStatus,
    pub schedule_type: ScheduleType,
    pub duration: u32,
    pub credits: i64,
    pub titles: Titles,
    pub keywords: String,
    pub management_entity: String,
    pub administration_entity: String,
    pub teaching_campus: Campus,
    pub enrollment_campus: Campus,
    pub remark: Remark,
    pub start_year: Year,
    pub end_year: Option<Year>,
}

impl Training {
    pub fn acronym(&self) -> &str {
        &self.identity.acronym
    }

    pub fn year(&self) -> Year {
        self.identity.year
    }

    pub fn conflicted_fields(&self, other: &Training) -> Vec<FieldName> {
        let mut fields = Vec::new();
        if self.code != other.code {
            fields.push("code");
        }
        if self.kind != other.kind {
            fields.push("kind");
        }
        if self.status != other.status {
            fields.push("status");
        }
        if self.schedule_type != other.schedule_type {
            fields.push("schedule_type");
        }
        if self.duration != other.duration {
            fields.push("duration");
        }
        if self.credits != other.credits {
            fields.push("credits");
        }
        if self.titles != other.titles {
            fields.push("titles");
        }
        if self.keywords != other.keywords {
            fields.push("keywords");
        }
        if self.management_entity != other.management_entity {
            fields.push("management_entity");
        }
        if self.administration_entity != other.administration_entity {
            fields.push("administration_entity");
        }
        if self.teaching_campus != other.teaching_campus {
            fields.push("teaching_campus");
        }
        if self.enrollment_campus != other.enrollment_campus {
            fields.push("enrollment_campus");
        }
        if self.remark != other.remark {
            fields.push("remark");
        }
        if self.start_year != other.start_year {
            fields.push("start_year");
        }
        if self.end_year != other.end_year {
            fields.push("end_year");
        }
        fields
    }

    pub fn has_same_content_as(&self, other: &Training) -> bool {
        self.conflicted_fields(other).is_empty()
    }

    pub fn to_next_year(&self) -> Training {
        let mut next = self.clone();
        next.identity = self.identity.next_year();
        next
    }

    pub fn assign_content_from(&mut self, other: &Training) {
        self.code = other.code.clone();
        self.kind = other.kind.clone();
        self.status = other.status.clone();
        self.schedule_type = other.schedule_type.clone();
        self.duration = other.duration;
        self.credits = other.credits;
        self.titles = other.titles.clone();
        self.keywords = other.keywords.clone();
        self.management_entity = other.management_entity.clone();
        self.administration_entity = other.administration_entity.clone();
        self.teaching_campus = other.teaching_campus.clone();
        self.enrollment_campus = other.enrollment_campus.clone();
        self.remark = other.remark.clone();
        self.start_year = other.start_year;
        self.end_year = other.end_year;
    }

    fn validate(&self) -> DomainResult<()> {
        if self.identity.acronym.trim().is_empty() {
            return Err(DomainError::AcronymRequired);
        }
        if self.credits < 0 {
            return Err(DomainError::CreditsBelowZero);
        }
        if let Some(end_year) = self.end_year {
            if end_year < self.start_year {
                return Err(DomainError::StartYearGreaterThanEndYear);
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct CreateTrainingCommand {
    pub acronym: String,
    pub year: Year,
    pub code: String,
    pub kind: TrainingKind,
    pub status: ActiveStatus,
    pub schedule_type: ScheduleType,
    pub duration: u32,
    pub credits: i64,
    pub titles: Titles,
    pub keywords: String,
    pub management_entity: String,
    pub administration_entity: String,
    pub teaching_campus: Campus,
    pub enrollment_campus: Campus,
    pub remark: Remark,
    pub start_year: Year,
    pub end_year: Option<Year>,
}

#[derive(Clone, Debug)]
pub struct UpdateTrainingCommand {
    pub acronym: String,
    pub year: Year,
    pub status: ActiveStatus,
    pub schedule_type: ScheduleType,
    pub duration: u32,
    pub credits: i64,
    pub titles: Titles,
    pub keywords: String,
    pub management_entity: String,
    pub administration_entity: String,
    pub teaching_campus: Campus,
    pub enrollment_campus: Campus,
    pub remark: Remark,
    pub end_year: Option<Year>,
}

#[derive(Clone)]
pub struct TrainingService {
    repository: Arc<dyn TrainingRepository>,
}

impl TrainingService {
    pub fn new(repository: Arc<dyn TrainingRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, command: CreateTrainingCommand) -> DomainResult<TrainingIdentity> {
        let training = Training {
            identity: TrainingIdentity::new(command.acronym, command.year),
            code: command.code.to_uppercase(),
            kind: command.kind,
            status: command.status,
            schedule_type: command.schedule_type,
            duration: command.duration,
            credits: command.credits,
            titles: command.titles,
            keywords: command.keywords,
            management_entity: command.management_entity,
            administration_entity: command.administration_entity,
            teaching_campus: command.teaching_campus,
            enrollment_campus: command.enrollment_campus,
            remark: command.remark,
            start_year: command.start_year,
            end_year: command.end_year,
        };
        training.validate()?;
        if self.repository.get(&training.identity).await?.is_some() {
            return Err(DomainError::AcronymAlreadyExists {
                acronym: training.identity.acronym.clone(),
                year: training.identity.year,
            });
        }
        self.repository.create(&training).await
    }

    pub async fn get(&self, identity: &TrainingIdentity) -> DomainResult<Training> {
        self.repository
            .get(identity)
            .await?
            .ok_or_else(|| DomainError::TrainingNotFound {
                acronym: identity.acronym.clone(),
                year: identity.year,
            })
    }

    pub async fn search(&self, query: &SnapshotQuery) -> DomainResult<Vec<Training>> {
        self.repository.search(query).await
    }

    pub async fn update(&self, command: UpdateTrainingCommand) -> DomainResult<TrainingIdentity> {
        let identity = TrainingIdentity::new(command.acronym, command.year);
        let mut training = self.get(&identity).await?;
        training.status = command.status;
        training.schedule_type = command.schedule_type;
        training.duration = command.duration;
        training.credits = command.credits;
        training.titles = command.titles;
        training.keywords = command.keywords;
        training.management_entity = command.management_entity;
        training.administration_entity = command.administration_entity;
        training.teaching_campus = command.teaching_campus;
        training.enrollment_campus = command.enrollment_campus;
        training.remark = command.remark;
        training.end_year = command.end_year;
        training.validate()?;
        self.repository.update(&training).await
    }

    pub async fn delete(&self, identity: &TrainingIdentity) -> DomainResult<()> {
        self.get(identity).await?;
        self.repository.delete(identity).await
    }

    pub async fn copy_to_next_year(
        &self,
        identity: &TrainingIdentity,
    ) -> DomainResult<TrainingIdentity> {
        let current = self.get(identity).await?;
        if current.end_year == Some(identity.year) {
            return Err(DomainError::CannotCopyDueToEndDate {
                key: identity.acronym.clone(),
                from_year: identity.year,
                end_year: identity.year,
            });
        }
        let next_identity = identity.next_year();
        match self.repository.get(&next_identity).await? {
            Some(mut next) => {
                next.assign_content_from(&current);
                self.repository.update(&next).await
            }
            None => self.repository.create(&current.to_next_year()).await,
        }
    }
}
