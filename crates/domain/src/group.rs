use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::academic_year::Year;
use crate::error::DomainError;
use crate::ports::group::GroupRepository;
use crate::ports::SnapshotQuery;
use crate::values::{Campus, ContentConstraint, Remark, Titles};
use crate::{DomainResult, FieldName};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    CommonCore,
    OptionListChoice,
    Complementary,
    SubGroup,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct GroupIdentity {
    pub code: String,
    pub year: Year,
}

impl GroupIdentity {
    pub fn new(code: impl Into<String>, year: Year) -> Self {
        Self {
            code: code.into().to_uppercase(),
            year,
        }
    }

    pub fn next_year(&self) -> Self {
        Self {
            code: self.code.clone(),
            year: self.year + 1,
        }
    }
}

/// One academic year's configuration of a group. Each year is a separate,
/// independently stored snapshot; identity is (code, year).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Group {
    pub identity: GroupIdentity,
    pub kind: GroupKind,
    pub abbreviated_title: String,
    pub titles: Titles,
    pub credits: i64,
    pub content_constraint: ContentConstraint,
    pub management_entity: String,
    pub teaching_campus: Campus,
    pub remark: Remark,
    pub start_year: Year,
    pub end_year: Option<Year>,
}

impl Group {
    pub fn code(&self) -> &str {
        &self.identity.code
    }

    pub fn year(&self) -> Year {
        self.identity.year
    }

    /// Business-content fields that differ from `other`. Identity fields
    /// (code, year) never participate.
    pub fn conflicted_fields(&self, other: &Group) -> Vec<FieldName> {
        let mut fields = Vec::new();
        if self.kind != other.kind {
            fields.push("kind");
        }
        if self.abbreviated_title != other.abbreviated_title {
            fields.push("abbreviated_title");
        }
        if self.titles != other.titles {
            fields.push("titles");
        }
        if self.credits != other.credits {
            fields.push("credits");
        }
        if self.content_constraint != other.content_constraint {
            fields.push("content_constraint");
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

    pub fn has_same_content_as(&self, other: &Group) -> bool {
        self.conflicted_fields(other).is_empty()
    }

    /// Sibling snapshot for year + 1 with identical business content.
    pub fn to_next_year(&self) -> Group {
        let mut next = self.clone();
        next.identity = self.identity.next_year();
        next
    }

    /// Overwrite every business-content field with `other`'s, leaving the
    /// identity untouched.
    pub fn assign_content_from(&mut self, other: &Group) {
        self.kind = other.kind.clone();
        self.abbreviated_title = other.abbreviated_title.clone();
        self.titles = other.titles.clone();
        self.credits = other.credits;
        self.content_constraint = other.content_constraint.clone();
        self.management_entity = other.management_entity.clone();
        self.teaching_campus = other.teaching_campus.clone();
        self.remark = other.remark.clone();
        self.start_year = other.start_year;
        self.end_year = other.end_year;
    }

    fn validate(&self) -> DomainResult<()> {
        if self.abbreviated_title.trim().is_empty() {
            return Err(DomainError::AcronymRequired);
        }
        if self.credits < 0 {
            return Err(DomainError::CreditsBelowZero);
        }
        self.content_constraint.check()?;
        if let Some(end_year) = self.end_year {
            if end_year < self.start_year {
                return Err(DomainError::StartYearGreaterThanEndYear);
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct CreateGroupCommand {
    pub code: String,
    pub year: Year,
    pub kind: GroupKind,
    pub abbreviated_title: String,
    pub titles: Titles,
    pub credits: i64,
    pub content_constraint: ContentConstraint,
    pub management_entity: String,
    pub teaching_campus: Campus,
    pub remark: Remark,
    pub start_year: Year,
    pub end_year: Option<Year>,
}

#[derive(Clone, Debug)]
pub struct UpdateGroupCommand {
    pub code: String,
    pub year: Year,
    pub abbreviated_title: String,
    pub titles: Titles,
    pub credits: i64,
    pub content_constraint: ContentConstraint,
    pub management_entity: String,
    pub teaching_campus: Campus,
    pub remark: Remark,
    pub end_year: Option<Year>,
}

#[derive(Clone)]
pub struct GroupService {
    repository: Arc<dyn GroupRepository>,
}

impl GroupService {
    pub fn new(repository: Arc<dyn GroupRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, command: CreateGroupCommand) -> DomainResult<GroupIdentity> {
        let group = Group {
            identity: GroupIdentity::new(command.code, command.year),
            kind: command.kind,
            abbreviated_title: command.abbreviated_title.to_uppercase(),
            titles: command.titles,
            credits: command.credits,
            content_constraint: command.content_constraint,
            management_entity: command.management_entity,
            teaching_campus: command.teaching_campus,
            remark: command.remark,
            start_year: command.start_year,
            end_year: command.end_year,
        };
        group.validate()?;
        if self.repository.get(&group.identity).await?.is_some() {
            return Err(DomainError::CodeAlreadyExists {
                code: group.identity.code.clone(),
                year: group.identity.year,
            });
        }
        self.repository.create(&group).await
    }

    pub async fn get(&self, identity: &GroupIdentity) -> DomainResult<Group> {
        self.repository
            .get(identity)
            .await?
            .ok_or_else(|| DomainError::GroupNotFound {
                code: identity.code.clone(),
                year: identity.year,
            })
    }

    pub async fn search(&self, query: &SnapshotQuery) -> DomainResult<Vec<Group>> {
        self.repository.search(query).await
    }

    pub async fn update(&self, command: UpdateGroupCommand) -> DomainResult<GroupIdentity> {
        let identity = GroupIdentity::new(command.code, command.year);
        let mut group = self.get(&identity).await?;
        group.abbreviated_title = command.abbreviated_title.to_uppercase();
        group.titles = command.titles;
        group.credits = command.credits;
        group.content_constraint = command.content_constraint;
        group.management_entity = command.management_entity;
        group.teaching_campus = command.teaching_campus;
        group.remark = command.remark;
        group.end_year = command.end_year;
        group.validate()?;
        self.repository.update(&group).await
    }

    pub async fn delete(&self, identity: &GroupIdentity) -> DomainResult<()> {
        self.get(identity).await?;
        self.repository.delete(identity).await
    }

    /// Copy the snapshot at `identity` into year + 1: overwrite the next
    /// year's content when that snapshot already exists, create it otherwise.
    pub async fn copy_to_next_year(&self, identity: &GroupIdentity) -> DomainResult<GroupIdentity> {
        let current = self.get(identity).await?;
        if current.end_year == Some(identity.year) {
            return Err(DomainError::CannotCopyDueToEndDate {
                key: identity.code.clone(),
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
