//! Post-registration onboarding pipeline
//!
//! Runs the onboarding steps as an explicit ordered sequence: upload the
//! profile photo, save the selected interest tags, then mark onboarding
//! complete. The pipeline stops at the first failing step and reports which
//! step failed.

use std::sync::Arc;

use crate::errors::AuthError;
use crate::providers::onboarding::{OnboardingStore, ProfileAssetStore};

/// The steps of the onboarding sequence, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingStep {
    UploadPhoto,
    SaveInterests,
    MarkComplete,
}

/// A pipeline failure, naming the step that broke the sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingFailure {
    pub step: OnboardingStep,
    pub error: AuthError,
}

/// What the pipeline produced on success
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnboardingOutcome {
    /// Public URL of the uploaded photo, when one was provided
    pub photo_url: Option<String>,
}

/// Ordered onboarding pipeline over the asset and onboarding stores
pub struct OnboardingPipeline<A: ProfileAssetStore, S: OnboardingStore> {
    assets: Arc<A>,
    store: Arc<S>,
}

impl<A: ProfileAssetStore, S: OnboardingStore> OnboardingPipeline<A, S> {
    pub fn new(assets: Arc<A>, store: Arc<S>) -> Self {
        Self { assets, store }
    }

    /// Run the full sequence for a user
    ///
    /// The photo step is skipped when no photo was chosen; the remaining
    /// steps always run. The first failure aborts the pipeline.
    pub async fn run(
        &self,
        uid: &str,
        photo: Option<&[u8]>,
        interests: &[String],
    ) -> Result<OnboardingOutcome, OnboardingFailure> {
        let mut outcome = OnboardingOutcome::default();

        if let Some(image) = photo {
            match self.assets.upload_profile_image(uid, image).await {
                Ok(url) => outcome.photo_url = Some(url),
                Err(err) => {
                    return Err(OnboardingFailure {
                        step: OnboardingStep::UploadPhoto,
                        error: AuthError::from(err),
                    })
                }
            }
        }

        if let Err(err) = self.store.save_interests(uid, interests).await {
            return Err(OnboardingFailure {
                step: OnboardingStep::SaveInterests,
                error: AuthError::from(err),
            });
        }

        if let Err(err) = self.store.mark_complete(uid).await {
            return Err(OnboardingFailure {
                step: OnboardingStep::MarkComplete,
                error: AuthError::from(err),
            });
        }

        tracing::info!(uid, "onboarding complete");
        Ok(outcome)
    }
}
