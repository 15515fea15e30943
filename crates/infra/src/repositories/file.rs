use std::path::{Path, PathBuf};
use std::sync::Arc;

use cursus_domain::error::DomainError;
use cursus_domain::group::{Group, GroupIdentity};
use cursus_domain::mini_training::{MiniTraining, MiniTrainingIdentity};
use cursus_domain::ports::group::GroupRepository;
use cursus_domain::ports::mini_training::MiniTrainingRepository;
use cursus_domain::ports::training::TrainingRepository;
use cursus_domain::ports::{BoxFuture, SnapshotQuery};
use cursus_domain::training::{Training, TrainingIdentity};
use cursus_domain::DomainResult;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

#[derive(Debug, Default, Serialize, Deserialize)]
struct SnapshotDocument {
    #[serde(default)]
    groups: Vec<Group>,
    #[serde(default)]
    trainings: Vec<Training>,
    #[serde(default)]
    mini_trainings: Vec<MiniTraining>,
}

/// Snapshot storage backed by a single JSON document on disk. The whole
/// document is rewritten on every mutation, which is fine at catalogue
/// scale and keeps the file hand-inspectable.
#[derive(Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
    document: Arc<RwLock<SnapshotDocument>>,
}

impl FileSnapshotStore {
    pub async fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let document = if tokio::fs::try_exists(&path).await? {
            let raw = tokio::fs::read(&path).await?;
            serde_json::from_slice(&raw)?
        } else {
            SnapshotDocument::default()
        };
        info!(path = %path.display(), "opened snapshot store");
        Ok(Self {
            path,
            document: Arc::new(RwLock::new(document)),
        })
    }

    pub fn groups(&self) -> FileGroupRepository {
        FileGroupRepository {
            store: self.clone(),
        }
    }

    pub fn trainings(&self) -> FileTrainingRepository {
        FileTrainingRepository {
            store: self.clone(),
        }
    }

    pub fn mini_trainings(&self) -> FileMiniTrainingRepository {
        FileMiniTrainingRepository {
            store: self.clone(),
        }
    }

    async fn persist(&self, document: &SnapshotDocument) -> DomainResult<()> {
        let raw = serde_json::to_vec_pretty(document)
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Storage(e.to_string()))?;
        }
        tokio::fs::write(&self.path, raw)
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))
    }
}

pub struct FileGroupRepository {
    store: FileSnapshotStore,
}

impl GroupRepository for FileGroupRepository {
    fn get(&self, identity: &GroupIdentity) -> BoxFuture<'_, DomainResult<Option<Group>>> {
        let identity = identity.clone();
        Box::pin(async move {
            let document = self.store.document.read().await;
            Ok(document
                .groups
                .iter()
                .find(|group| group.identity == identity)
                .cloned())
        })
    }

    fn search(&self, query: &SnapshotQuery) -> BoxFuture<'_, DomainResult<Vec<Group>>> {
        let query = query.clone();
        Box::pin(async move {
            let document = self.store.document.read().await;
            let mut groups: Vec<Group> = document
                .groups
                .iter()
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
            let mut document = self.store.document.write().await;
            if document.groups.iter().any(|g| g.identity == group.identity) {
                return Err(DomainError::CodeAlreadyExists {
                    code: group.identity.code.clone(),
                    year: group.identity.year,
                });
            }
            let identity = group.identity.clone();
            document.groups.push(group);
            self.store.persist(&document).await?;
            Ok(identity)
        })
    }

    fn update(&self, group: &Group) -> BoxFuture<'_, DomainResult<GroupIdentity>> {
        let group = group.clone();
        Box::pin(async move {
            let mut document = self.store.document.write().await;
            let Some(slot) = document
                .groups
                .iter_mut()
                .find(|g| g.identity == group.identity)
            else {
                return Err(DomainError::GroupNotFound {
                    code: group.identity.code.clone(),
                    year: group.identity.year,
                });
            };
            let identity = group.identity.clone();
            *slot = group;
            self.store.persist(&document).await?;
            Ok(identity)
        })
    }

    fn delete(&self, identity: &GroupIdentity) -> BoxFuture<'_, DomainResult<()>> {
        let identity = identity.clone();
        Box::pin(async move {
            let mut document = self.store.document.write().await;
            let before = document.groups.len();
            document.groups.retain(|g| g.identity != identity);
            if document.groups.len() == before {
                return Err(DomainError::GroupNotFound {
                    code: identity.code.clone(),
                    year: identity.year,
                });
            }
            self.store.persist(&document).await
        })
    }
}

pub struct FileTrainingRepository {
    store: FileSnapshotStore,
}

impl TrainingRepository for FileTrainingRepository {
    fn get(&self, identity: &TrainingIdentity) -> BoxFuture<'_, DomainResult<Option<Training>>> {
        let identity = identity.clone();
        Box::pin(async move {
            let document = self.store.document.read().await;
            Ok(document
                .trainings
                .iter()
                .find(|training| training.identity == identity)
                .cloned())
        })
    }

    fn search(&self, query: &SnapshotQuery) -> BoxFuture<'_, DomainResult<Vec<Training>>> {
        let query = query.clone();
        Box::pin(async move {
            let document = self.store.document.read().await;
            let mut trainings: Vec<Training> = document
                .trainings
                .iter()
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
            let mut document = self.store.document.write().await;
            if document
                .trainings
                .iter()
                .any(|t| t.identity == training.identity)
            {
                return Err(DomainError::AcronymAlreadyExists {
                    acronym: training.identity.acronym.clone(),
                    year: training.identity.year,
                });
            }
            let identity = training.identity.clone();
            document.trainings.push(training);
            self.store.persist(&document).await?;
            Ok(identity)
        })
    }

    fn update(&self, training: &Training) -> BoxFuture<'_, DomainResult<TrainingIdentity>> {
        let training = training.clone();
        Box::pin(async move {
            let mut document = self.store.document.write().await;
            let Some(slot) = document
                .trainings
                .iter_mut()
                .find(|t| t.identity == training.identity)
            else {
                return Err(DomainError::TrainingNotFound {
                    acronym: training.identity.acronym.clone(),
                    year: training.identity.year,
                });
            };
            let identity = training.identity.clone();
            *slot = training;
            self.store.persist(&document).await?;
            Ok(identity)
        })
    }

    fn delete(&self, identity: &TrainingIdentity) -> BoxFuture<'_, DomainResult<()>> {
        let identity = identity.clone();
        Box::pin(async move {
            let mut document = self.store.document.write().await;
            let before = document.trainings.len();
            document.trainings.retain(|t| t.identity != identity);
            if document.trainings.len() == before {
                return Err(DomainError::TrainingNotFound {
                    acronym: identity.acronym.clone(),
                    year: identity.year,
                });
            }
            self.store.persist(&document).await
        })
    }
}

pub struct FileMiniTrainingRepository {
    store: FileSnapshotStore,
}

impl MiniTrainingRepository for FileMiniTrainingRepository {
    fn get(
        &self,
        identity: &MiniTrainingIdentity,
    ) -> BoxFuture<'_, DomainResult<Option<MiniTraining>>> {
        let identity = identity.clone();
        Box::pin(async move {
            let document = self.store.document.read().await;
            Ok(document
                .mini_trainings
                .iter()
                .find(|mini| mini.identity == identity)
                .cloned())
        })
    }

    fn search(&self, query: &SnapshotQuery) -> BoxFuture<'_, DomainResult<Vec<MiniTraining>>> {
        let query = query.clone();
        Box::pin(async move {
            let document = self.store.document.read().await;
            let mut mini_trainings: Vec<MiniTraining> = document
                .mini_trainings
                .iter()
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
            let mut document = self.store.document.write().await;
            if document
                .mini_trainings
                .iter()
                .any(|m| m.identity == mini_training.identity)
            {
                return Err(DomainError::AcronymAlreadyExists {
                    acronym: mini_training.identity.acronym.clone(),
                    year: mini_training.identity.year,
                });
            }
            let identity = mini_training.identity.clone();
            document.mini_trainings.push(mini_training);
            self.store.persist(&document).await?;
            Ok(identity)
        })
    }

    fn update(
        &self,
        mini_training: &MiniTraining,
    ) -> BoxFuture<'_, DomainResult<MiniTrainingIdentity>> {
        let mini_training = mini_training.clone();
        Box::pin(async move {
            let mut document = self.store.document.write().await;
            let Some(slot) = document
                .mini_trainings
                .iter_mut()
                .find(|m| m.identity == mini_training.identity)
            else {
                return Err(DomainError::MiniTrainingNotFound {
                    acronym: mini_training.identity.acronym.clone(),
                    year: mini_training.identity.year,
                });
            };
            let identity = mini_training.identity.clone();
            *slot = mini_training;
            self.store.persist(&document).await?;
            Ok(identity)
        })
    }

    fn delete(&self, identity: &MiniTrainingIdentity) -> BoxFuture<'_, DomainResult<()>> {
        let identity = identity.clone();
        Box::pin(async move {
            let mut document = self.store.document.write().await;
            let before = document.mini_trainings.len();
            document.mini_trainings.retain(|m| m.identity != identity);
            if document.mini_trainings.len() == before {
                return Err(DomainError::MiniTrainingNotFound {
                    acronym: identity.acronym.clone(),
                    year: identity.year,
                });
            }
            self.store.persist(&document).await
        })
    }
}
