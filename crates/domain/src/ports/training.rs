use super::{BoxFuture, SnapshotQuery};
use crate::training::{Training, TrainingIdentity};
use crate::DomainResult;

pub trait TrainingRepository: Send + Sync {
    fn get(&self, identity: &TrainingIdentity) -> BoxFuture<'_, DomainResult<Option<Training>>>;
    fn search(&self, query: &SnapshotQuery) -> BoxFuture<'_, DomainResult<Vec<Training>>>;
    fn create(&self, training: &Training) -> BoxFuture<'_, DomainResult<TrainingIdentity>>;
    fn update(&self, training: &Training) -> BoxFuture<'_, DomainResult<TrainingIdentity>>;
    fn delete(&self, identity: &TrainingIdentity) -> BoxFuture<'_, DomainResult<()>>;
}
