use std::sync::Arc;

use anyhow::bail;
use cursus_domain::ports::group::GroupRepository;
use cursus_domain::ports::mini_training::MiniTrainingRepository;
use cursus_domain::ports::training::TrainingRepository;
use cursus_domain::postponement::PostponementService;
use tracing::info;

use crate::config::AppConfig;
use crate::repositories::{
    FileSnapshotStore, InMemoryGroupRepository, InMemoryMiniTrainingRepository,
    InMemoryTrainingRepository, StaticAcademicYearSource,
};

/// Repositories and services assembled from configuration.
pub struct AppServices {
    pub groups: Arc<dyn GroupRepository>,
    pub trainings: Arc<dyn TrainingRepository>,
    pub mini_trainings: Arc<dyn MiniTrainingRepository>,
    pub postponement: PostponementService,
}

impl std::fmt::Debug for AppServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppServices").finish_non_exhaustive()
    }
}

pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let (groups, trainings, mini_trainings): (
        Arc<dyn GroupRepository>,
        Arc<dyn TrainingRepository>,
        Arc<dyn MiniTrainingRepository>,
    ) = match config.data_backend.as_str() {
        "memory" => (
            Arc::new(InMemoryGroupRepository::new()),
            Arc::new(InMemoryTrainingRepository::new()),
            Arc::new(InMemoryMiniTrainingRepository::new()),
        ),
        "file" => {
            let store = FileSnapshotStore::open(&config.snapshot_store_path).await?;
            (
                Arc::new(store.groups()),
                Arc::new(store.trainings()),
                Arc::new(store.mini_trainings()),
            )
        }
        other => bail!("unknown data backend '{other}'"),
    };
    info!(
        backend = %config.data_backend,
        starting_year = config.starting_academic_year,
        "assembled services"
    );

    let postponement = PostponementService::new(
        groups.clone(),
        trainings.clone(),
        mini_trainings.clone(),
        Arc::new(StaticAcademicYearSource::new(config.starting_academic_year)),
    )
    .with_years_to_postpone(config.years_to_postpone);

    Ok(AppServices {
        groups,
        trainings,
        mini_trainings,
        postponement,
    })
}
