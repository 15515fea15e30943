//! In-memory repositories and factories for unit tests. Production
//! implementations live in the infra crate.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::academic_year::Year;
use crate::error::DomainError;
use crate::group::{Group, GroupIdentity, GroupKind, UpdateGroupCommand};
use crate::mini_training::{MiniTraining, MiniTrainingIdentity, MiniTrainingKind};
use crate::ports::academic_year::AcademicYearSource;
use crate::ports::group::GroupRepository;
use crate::ports::mini_training::MiniTrainingRepository;
use crate::ports::training::TrainingRepository;
use crate::ports::{BoxFuture, SnapshotQuery};
use crate::training::{Training, TrainingIdentity, TrainingKind};
use crate::values::{ActiveStatus, Campus, ContentConstraint, Remark, ScheduleType, Titles};
use crate::DomainResult;

pub(crate) struct FixedAcademicYearSource(pub(crate) Year);

impl AcademicYearSource for FixedAcademicYearSource {
    fn starting_year(&self) -> BoxFuture<'_, DomainResult<Year>> {
        let year = self.0;
        Box::pin(async move { Ok(year) })
    }
}

pub(crate) fn campus_factory() -> Campus {
    Campus {
        name: "Louvain-la-Neuve".to_string(),
        university_name: "UCLouvain".to_string(),
    }
}

pub(crate) fn group_factory(code: &str, year: Year) -> Group {
    Group {
        identity: GroupIdentity::new(code, year),
        kind: GroupKind::CommonCore,
        abbreviated_title: "TRONCCOMMUN".to_string(),
        titles: Titles {
            title_fr: "Tronc commun".to_string(),
            title_en: Some("Common core".to_string()),
        },
        credits: 30,
        content_constraint: ContentConstraint::default(),
        management_entity: "BIOL".to_string(),
        teaching_campus: campus_factory(),
        remark: Remark::default(),
        start_year: year.min(2000),
        end_year: None,
    }
}

pub(crate) fn group_update_command(code: &str, year: Year) -> UpdateGroupCommand {
    let base = group_factory(code, year);
    UpdateGroupCommand {
        code: code.to_string(),
        year,
        abbreviated_title: base.abbreviated_title,
        titles: base.titles,
        credits: base.credits,
        content_constraint: base.content_constraint,
        management_entity: base.management_entity,
        teaching_campus: base.teaching_campus,
        remark: Remark {
            text_fr: "remarque mise à jour".to_string(),
            text_en: None,
        },
        end_year: base.end_year,
    }
}

pub(crate) fn training_factory(acronym: &str, year: Year) -> Training {
    Training {
        identity: TrainingIdentity::new(acronym, year),
        code: "LDROI200M".to_string(),
        kind: TrainingKind::Master,
        status: ActiveStatus::Active,
        schedule_type: ScheduleType::Daily,
        duration: 2,
        credits: 120,
        titles: Titles {
            title_fr: "Master en droit".to_string(),
            title_en: Some("Master in law".to_string()),
        },
        keywords: "law".to_string(),
        management_entity: "DRT".to_string(),
        administration_entity: "DRT".to_string(),
        teaching_campus: campus_factory(),
        enrollment_campus: campus_factory(),
        remark: Remark::default(),
        start_year: year.min(2000),
        end_year: None,
    }
}

pub(crate) fn mini_training_factory(acronym: &str, year: Year) -> MiniTraining {
    MiniTraining {
        identity: MiniTrainingIdentity::new(acronym, year),
        code: "LMINADROI".to_string(),
        kind: MiniTrainingKind::AccessMinor,
        status: ActiveStatus::Active,
        schedule_type: ScheduleType::Daily,
        credits: 30,
        titles: Titles {
            title_fr: "Mineure d'accès en droit".to_string(),
            title_en: None,
        },
        keywords: String::new(),
        management_entity: "DRT".to_string(),
        teaching_campus: campus_factory(),
        remark: Remark::default(),
        start_year: year.min(2000),
        end_year: None,
    }
}

#[derive(Default)]
pub(crate) struct MemoryGroupRepository {
    items: Arc<RwLock<HashMap<GroupIdentity, Group>>>,
}

impl MemoryGroupRepository {
    pub(crate) async fn seed(&self, group: Group) {
        self.items.write().await.insert(group.identity.clone(), group);
    }
}

impl GroupRepository for MemoryGroupRepository {
    fn get(&self, identity: &GroupIdentity) -> BoxFuture<'_, DomainResult<Option<Group>>> {
        let identity = identity.clone();
        Box::pin(async move { Ok(self.items.read().await.get(&identity).cloned()) })
    }

    fn search(&self, query: &SnapshotQuery) -> BoxFuture<'_, DomainResult<Vec<Group>>> {
        let query = query.clone();
        Box::pin(async move {
            let mut groups: Vec<Group> = self
                .items
                .read()
                .await
                .values()
                .filter(|group| query.matches(group.code(), group.year()))
                .cloned()
                .collect();
            groups.sort_by(|left, right| {
                left.identity
                    .code
                    .cmp(&right.identity.code)
                    .then_with(|| left.identity.year.cmp(&right.identity.year))
            });
            Ok(groups)
        })
    }

    fn create(&self, group: &Group) -> BoxFuture<'_, DomainResult<GroupIdentity>> {
        let group = group.clone();
        Box::pin(async move {
            let mut items = self.items.write().await;
            if items.contains_key(&group.identity) {
                return Err(DomainError::CodeAlreadyExists {
                    code: group.identity.code.clone(),
                    year: group.identity.year,
                });
            }
            let identity = group.identity.clone();
            items.insert(identity.clone(), group);
            Ok(identity)
        })
    }

    fn update(&self, group: &Group) -> BoxFuture<'_, DomainResult<GroupIdentity>> {
        let group = group.clone();
        Box::pin(async move {
            let mut items = self.items.write().await;
            if !items.contains_key(&group.identity) {
                return Err(DomainError::GroupNotFound {
                    code: group.identity.code.clone(),
                    year: group.identity.year,
                });
            }
            let identity = group.identity.clone();
            items.insert(identity.clone(), group);
            Ok(identity)
        })
    }

    fn delete(&self, identity: &GroupIdentity) -> BoxFuture<'_, DomainResult<()>> {
        let identity = identity.clone();
        Box::pin(async move {
            self.items
                .write()
                .await
                .remove(&identity)
                .map(|_| ())
                .ok_or(DomainError::GroupNotFound {
                    code: identity.code.clone(),
                    year: identity.year,
                })
        })
    }
}

#[derive(Default)]
pub(crate) struct MemoryTrainingRepository {
    items: Arc<RwLock<HashMap<TrainingIdentity, Training>>>,
}

impl MemoryTrainingRepository {
    pub(crate) async fn seed(&self, training: Training) {
        self.items
            .write()
            .await
            .insert(training.identity.clone(), training);
    }
}

impl TrainingRepository for MemoryTrainingRepository {
    fn get(&self, identity: &TrainingIdentity) -> BoxFuture<'_, DomainResult<Option<Training>>> {
        let identity = identity.clone();
        Box::pin(async move { Ok(self.items.read().await.get(&identity).cloned()) })
    }

    fn search(&self, query: &SnapshotQuery) -> BoxFuture<'_, DomainResult<Vec<Training>>> {
        let query = query.clone();
        Box::pin(async move {
            let mut trainings: Vec<Training> = self
                .items
                .read()
                .await
                .values()
                .filter(|training| query.matches(training.acronym(), training.year()))
                .cloned()
                .collect();
            trainings.sort_by(|left, right| {
                left.identity
                    .acronym
                    .cmp(&right.identity.acronym)
                    .then_with(|| left.identity.year.cmp(&right.identity.year))
            });
            Ok(trainings)
        })
    }

    fn create(&self, training: &Training) -> BoxFuture<'_, DomainResult<TrainingIdentity>> {
        let training = training.clone();
        Box::pin(async move {
            let mut items = self.items.write().await;
            if items.contains_key(&training.identity) {
                return Err(DomainError::AcronymAlreadyExists {
                    acronym: training.identity.acronym.clone(),
                    year: training.identity.year,
                });
            }
            let identity = training.identity.clone();
            items.insert(identity.clone(), training);
            Ok(identity)
        })
    }

    fn update(&self, training: &Training) -> BoxFuture<'_, DomainResult<TrainingIdentity>> {
        let training = training.clone();
        Box::pin(async move {
            let mut items = self.items.write().await;
            if !items.contains_key(&training.identity) {
                return Err(DomainError::TrainingNotFound {
                    acronym: training.identity.acronym.clone(),
                    year: training.identity.year,
                });
            }
            let identity = training.identity.clone();
            items.insert(identity.clone(), training);
            Ok(identity)
        })
    }

    fn delete(&self, identity: &TrainingIdentity) -> BoxFuture<'_, DomainResult<()>> {
        let identity = identity.clone();
        Box::pin(async move {
            self.items
                .write()
                .await
                .remove(&identity)
                .map(|_| ())
                .ok_or(DomainError::TrainingNotFound {
                    acronym: identity.acronym.clone(),
                    year: identity.year,
                })
        })
    }
}

#[derive(Default)]
pub(crate) struct MemoryMiniTrainingRepository {
    items: Arc<RwLock<HashMap<MiniTrainingIdentity, MiniTraining>>>,
}

impl MemoryMiniTrainingRepository {
    #[allow(dead_code)]
    pub(crate) async fn seed(&self, mini_training: MiniTraining) {
        self.items
            .write()
            .await
            .insert(mini_training.identity.clone(), mini_training);
    }
}

impl MiniTrainingRepository for MemoryMiniTrainingRepository {
    fn get(
        &self,
        identity: &MiniTrainingIdentity,
    ) -> BoxFuture<'_, DomainResult<Option<MiniTraining>>> {
        let identity = identity.clone();
        Box::pin(async move { Ok(self.items.read().await.get(&identity).cloned()) })
    }

    fn search(&self, query: &SnapshotQuery) -> BoxFuture<'_, DomainResult<Vec<MiniTraining>>> {
        let query = query.clone();
        Box::pin(async move {
            let mut mini_trainings: Vec<MiniTraining> = self
                .items
                .read()
                .await
                .values()
                .filter(|mini| query.matches(mini.acronym(), mini.year()))
                .cloned()
                .collect();
            mini_trainings.sort_by(|left, right| {
                left.identity
                    .acronym
                    .cmp(&right.identity.acronym)
                    .then_with(|| left.identity.year.cmp(&right.identity.year))
            });
            Ok(mini_trainings)
        })
    }

    fn create(
        &self,
        mini_training: &MiniTraining,
    ) -> BoxFuture<'_, DomainResult<MiniTrainingIdentity>> {
        let mini_training = mini_training.clone();
        Box::pin(async move {
            let mut items = self.items.write().await;
            if items.contains_key(&mini_training.identity) {
                return Err(DomainError::AcronymAlreadyExists {
                    acronym: mini_training.identity.acronym.clone(),
                    year: mini_training.identity.year,
                });
            }
            let identity = mini_training.identity.clone();
            items.insert(identity.clone(), mini_training);
            Ok(identity)
        })
    }

    fn update(
        &self,
        mini_training: &MiniTraining,
    ) -> BoxFuture<'_, DomainResult<MiniTrainingIdentity>> {
        let mini_training = mini_training.clone();
        Box::pin(async move {
            let mut items = self.items.write().await;
            if !items.contains_key(&mini_training.identity) {
                return Err(DomainError::MiniTrainingNotFound {
                    acronym: mini_training.identity.acronym.clone(),
                    year: mini_training.identity.year,
                });
            }
            let identity = mini_training.identity.clone();
            items.insert(identity.clone(), mini_training);
            Ok(identity)
        })
    }

    fn delete(&self, identity: &MiniTrainingIdentity) -> BoxFuture<'_, DomainResult<()>> {
        let identity = identity.clone();
        Box::pin(async move {
            self.items
                .write()
                .await
                .remove(&identity)
                .map(|_| ())
                .ok_or(DomainError::MiniTrainingNotFound {
                    acronym: identity.acronym.clone(),
                    year: identity.year,
                })
        })
    }
}
