use super::{BoxFuture, SnapshotQuery};
use crate::group::{Group, GroupIdentity};
use crate::DomainResult;

pub trait GroupRepository: Send + Sync {
    /// Absence is an ordinary outcome here: the forward walk over yearly
    /// snapshots ends on the first `None`.
    fn get(&self, identity: &GroupIdentity) -> BoxFuture<'_, DomainResult<Option<Group>>>;
    fn search(&self, query: &SnapshotQuery) -> BoxFuture<'_, DomainResult<Vec<Group>>>;
    fn create(&self, group: &Group) -> BoxFuture<'_, DomainResult<GroupIdentity>>;
    fn update(&self, group: &Group) -> BoxFuture<'_, DomainResult<GroupIdentity>>;
    fn delete(&self, identity: &GroupIdentity) -> BoxFuture<'_, DomainResult<()>>;
}
