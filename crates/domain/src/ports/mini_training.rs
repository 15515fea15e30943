use super::{BoxFuture, SnapshotQuery};
use crate::mini_training::{MiniTraining, MiniTrainingIdentity};
use crate::DomainResult;

pub trait MiniTrainingRepository: Send + Sync {
    fn get(
        &self,
        identity: &MiniTrainingIdentity,
    ) -> BoxFuture<'_, DomainResult<Option<MiniTraining>>>;
    fn search(&self, query: &SnapshotQuery) -> BoxFuture<'_, DomainResult<Vec<MiniTraining>>>;
    fn create(&self, mini_training: &MiniTraining)
        -> BoxFuture<'_, DomainResult<MiniTrainingIdentity>>;
    fn update(&self, mini_training: &MiniTraining)
        -> BoxFuture<'_, DomainResult<MiniTrainingIdentity>>;
    fn delete(&self, identity: &MiniTrainingIdentity) -> BoxFuture<'_, DomainResult<()>>;
}
