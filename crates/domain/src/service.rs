use chrono::NaiveDate;
use log::{debug, error, info};

use crate::{
    Catalog, CatalogRepository, CatalogService, KeyValueRepository, ProfileService, ReadError,
    SubmissionReceipt, SubmitError, UserProfile, WorkoutRepository, WorkoutService,
    WorkoutSession, WorkoutSubmission,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: CatalogRepository> CatalogService for Service<R> {
    async fn get_catalog(&self) -> Result<Catalog, ReadError> {
        log_on_error!(
            self.repository.read_catalog(),
            ReadError,
            "get",
            "catalog"
        )
        .map(Catalog::from)
    }
}

impl<R: KeyValueRepository> ProfileService for Service<R> {
    fn get_profile(&self) -> UserProfile {
        UserProfile::load(&self.repository)
    }
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn save_workout(
        &self,
        session: &mut WorkoutSession,
        catalog: &Catalog,
        profile: &UserProfile,
        date: NaiveDate,
        live: bool,
    ) -> Result<SubmissionReceipt, SubmitError> {
        let submission = WorkoutSubmission::new(session, catalog, profile, date, live)?;
        let set_count = submission.set_count();
        let receipt = log_on_error!(
            async {
                self.repository
                    .submit_workout(submission)
                    .await?
                    .into_receipt()
            },
            SubmitError,
            "save",
            "workout"
        )?;
        info!("saved workout with {set_count} sets");
        session.reset();
        Ok(receipt)
    }
}
