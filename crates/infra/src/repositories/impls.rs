use std::collections::HashMap;
use std::sync::Arc;

use cursus_domain::academic_year::Year;
use cursus_domain::error::DomainError;
use cursus_domain::group::{Group, GroupIdentity};
use cursus_domain::mini_training::{MiniTraining, MiniTrainingIdentity};
use cursus_domain::ports::academic_year::AcademicYearSource;
use cursus_domain::ports::group::GroupRepository;
use cursus_domain::ports::mini_training::MiniTrainingRepository;
use cursus_domain::ports::training::TrainingRepository;
use cursus_domain::ports::{BoxFuture, SnapshotQuery};
use cursus_domain::training::{Training, TrainingIdentity};
use cursus_domain::DomainResult;
use metrics::counter;
use tokio::sync::RwLock;

const SNAPSHOTS_CREATED_TOTAL: &str = "cursus_snapshots_created_total";
const SNAPSHOTS_UPDATED_TOTAL: &str = "cursus_snapshots_updated_total";

/// Fixed starting academic year, typically taken from configuration.
pub struct StaticAcademicYearSource {
    year: Year,
}

impl StaticAcademicYearSource {
    pub fn new(year: Year) -> Self {
        Self { year }
    }
}

impl AcademicYearSource for StaticAcademicYearSource {
    fn starting_year(&self) -> BoxFuture<'_, DomainResult<Year>> {
        let year = self.year;
        Box::pin(async move { Ok(year) })
    }
}

#[derive(Default)]
pub struct InMemoryGroupRepository {
    items: Arc<RwLock<HashMap<GroupIdentity, Group>>>,
}

impl InMemoryGroupRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GroupRepository for InMemoryGroupRepository {
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
            counter!(SNAPSHOTS_CREATED_TOTAL, "entity" => "group").increment(1);
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
            counter!(SNAPSHOTS_UPDATED_TOTAL, "entity" => "group").increment(1);
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
pub struct InMemoryTrainingRepository {
    items: Arc<RwLock<HashMap<TrainingIdentity, Training>>>,
}

impl InMemoryTrainingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TrainingRepository for InMemoryTrainingRepository {
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
            counter!(SNAPSHOTS_CREATED_TOTAL, "entity" => "training").increment(1);
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
            counter!(SNAPSHOTS_UPDATED_TOTAL, "entity" => "training").increment(1);
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
pub struct InMemoryMiniTrainingRepository {
    items: Arc<RwLock<HashMap<MiniTrainingIdentity, MiniTraining>>>,
}

impl InMemoryMiniTrainingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MiniTrainingRepository for InMemoryMiniTrainingRepository {
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
            counter!(SNAPSHOTS_CREATED_TOTAL, "entity" => "mini_training").increment(1);
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
            counter!(SNAPSHOTS_UPDATED_TOTAL, "entity" => "mini_training").increment(1);
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
