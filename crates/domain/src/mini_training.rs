use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::academic_year::Year;
use crate::error::DomainError;
use crate::ports::mini_training::MiniTrainingRepository;
use crate::ports::SnapshotQuery;
use crate::values::{ActiveStatus, Campus, Remark, ScheduleType, Titles};
use crate::{DomainResult, FieldName};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MiniTrainingKind {
    Deepening,
    SocietyMinor,
    AccessMinor,
    OpenMinor,
    Mobility,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MiniTrainingIdentity {
    pub acronym: String,
    pub year: Year,
}

impl MiniTrainingIdentity {
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

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MiniTraining {
    pub identity: MiniTrainingIdentity,
    pub code: String,
    pub kind: MiniTrainingKind,
    pub status: ActiveStatus,
    pub schedule_type: ScheduleType,
    pub credits: i64,
    pub titles: Titles,
    pub keywords: String,
    pub management_entity: String,
    pub teaching_campus: Campus,
    pub remark: Remark,
    pub start_year: Year,
    pub end_year: Option<Year>,
}

impl MiniTraining {
    pub fn acronym(&self) -> &str {
        &self.identity.acronym
    }

    pub fn year(&self) -> Year {
        self.identity.year
    }

    pub fn conflicted_fields(&self, other: &MiniTraining) -> Vec<FieldName> {
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
        if self.teaching_campus != other.teaching_campus {
            fields.push("teaching_campus");
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

    pub fn has_same_content_as(&self, other: &MiniTraining) -> bool {
        self.conflicted_fields(other).is_empty()
    }

    pub fn to_next_year(&self) -> MiniTraining {
        let mut next = self.clone();
        next.identity = self.identity.next_year();
        next
    }

    pub fn assign_content_from(&mut self, other: &MiniTraining) {
        self.code = other.code.clone();
        self.kind = other.kind.clone();
        self.status = other.status.clone();
        self.schedule_type = other.schedule_type.clone();
        self.credits = other.credits;
        self.titles = other.titles.clone();
        self.keywords = other.keywords.clone();
        self.management_entity = other.management_entity.clone();
        self.teaching_campus = other.teaching_campus.clone();
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
pub struct CreateMiniTrainingCommand {
    pub acronym: String,
    pub year: Year,
    pub code: String,
    pub kind: MiniTrainingKind,
    pub status: ActiveStatus,
    pub schedule_type: ScheduleType,
    pub credits: i64,
    pub titles: Titles,
    pub keywords: String,
    pub management_entity: String,
    pub teaching_campus: Campus,
    pub remark: Remark,
    pub start_year: Year,
    pub end_year: Option<Year>,
}

#[derive(Clone, Debug)]
pub struct UpdateMiniTrainingCommand {
    pub acronym: String,
    pub year: Year,
    pub status: ActiveStatus,
    pub schedule_type: ScheduleType,
    pub credits: i64,
    pub titles: Titles,
    pub keywords: String,
    pub management_entity: String,
    pub teaching_campus: Campus,
    pub remark: Remark,
    pub end_year: Option<Year>,
}

#[derive(Clone)]
pub struct MiniTrainingService {
    repository: Arc<dyn MiniTrainingRepository>,
}

impl MiniTrainingService {
    pub fn new(repository: Arc<dyn MiniTrainingRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(
        &self,
        command: CreateMiniTrainingCommand,
    ) -> DomainResult<MiniTrainingIdentity> {
        let mini_training = MiniTraining {
            identity: MiniTrainingIdentity::new(command.acronym, command.year),
            code: command.code.to_uppercase(),
            kind: command.kind,
            status: command.status,
            schedule_type: command.schedule_type,
            credits: command.credits,
            titles: command.titles,
            keywords: command.keywords,
            management_entity: command.management_entity,
            teaching_campus: command.teaching_campus,
            remark: command.remark,
            start_year: command.start_year,
            end_year: command.end_year,
        };
        mini_training.validate()?;
        if self.repository.get(&mini_training.identity).await?.is_some() {
            return Err(DomainError::AcronymAlreadyExists {
                acronym: mini_training.identity.acronym.clone(),
                year: mini_training.identity.year,
            });
        }
        self.repository.create(&mini_training).await
    }

    pub async fn get(&self, identity: &MiniTrainingIdentity) -> DomainResult<MiniTraining> {
        self.repository
            .get(identity)
            .await?
            .ok_or_else(|| DomainError::MiniTrainingNotFound {
                acronym: identity.acronym.clone(),
                year: identity.year,
            })
    }

    pub async fn search(&self, query: &SnapshotQuery) -> DomainResult<Vec<MiniTraining>> {
        self.repository.search(query).await
    }

    pub async fn update(
        &self,
        command: UpdateMiniTrainingCommand,
    ) -> DomainResult<MiniTrainingIdentity> {
        let identity = MiniTrainingIdentity::new(command.acronym, command.year);
        let mut mini_training = self.get(&identity).await?;
        mini_training.status = command.status;
        mini_training.schedule_type = command.schedule_type;
        mini_training.credits = command.credits;
        mini_training.titles = command.titles;
        mini_training.keywords = command.keywords;
        mini_training.management_entity = command.management_entity;
        mini_training.teaching_campus = command.teaching_campus;
        mini_training.remark = command.remark;
        mini_training.end_year = command.end_year;
        mini_training.validate()?;
        self.repository.update(&mini_training).await
    }

    pub async fn delete(&self, identity: &MiniTrainingIdentity) -> DomainResult<()> {
        self.get(identity).await?;
        self.repository.delete(identity).await
    }

    pub async fn copy_to_next_year(
        &self,
        identity: &MiniTrainingIdentity,
    ) -> DomainResult<MiniTrainingIdentity> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{mini_training_factory, MemoryMiniTrainingRepository};

    #[tokio::test]
    async fn create_and_get_round_trip() {
        let repository = Arc::new(MemoryMiniTrainingRepository::default());
        let service = MiniTrainingService::new(repository);

        let base = mini_training_factory("MINADROI", 2024);
        let identity = service
            .create(CreateMiniTrainingCommand {
                acronym: "minadroi".to_string(),
                year: 2024,
                code: base.code.clone(),
                kind: base.kind.clone(),
                status: base.status.clone(),
                schedule_type: base.schedule_type.clone(),
                credits: base.credits,
                titles: base.titles.clone(),
                keywords: base.keywords.clone(),
                management_entity: base.management_entity.clone(),
                teaching_campus: base.teaching_campus.clone(),
                remark: base.remark.clone(),
                start_year: base.start_year,
                end_year: base.end_year,
            })
            .await
            .expect("create");
        assert_eq!(identity.acronym, "MINADROI");

        let stored = service.get(&identity).await.expect("get");
        assert!(stored.has_same_content_as(&base));
    }

    #[tokio::test]
    async fn delete_missing_snapshot_reports_not_found() {
        let repository = Arc::new(MemoryMiniTrainingRepository::default());
        let service = MiniTrainingService::new(repository);
        assert_eq!(
            service
                .delete(&MiniTrainingIdentity::new("MINADROI", 2024))
                .await
                .unwrap_err(),
            DomainError::MiniTrainingNotFound {
                acronym: "MINADROI".to_string(),
                year: 2024
            }
        );
    }
}
