//! Credit-gated entry point for image generation

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::domain::entities::account::{AccountId, UsageKind};
use crate::domain::value_objects::GenerationRequest;
use crate::errors::DomainResult;
use crate::repositories::AccountRepository;
use crate::services::credits::{ConsumeResult, CreditLedger};

use super::service::JobOrchestrator;
use super::traits::{ArtifactFetcher, ImageSynthesisProvider};
use super::types::{CompletedJob, SubmittedJob};

/// Finished generation together with the credit it cost
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayOutcome {
    pub credits: ConsumeResult,
    pub job: CompletedJob,
}

/// Submitted generation together with the credit it cost
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewaySubmission {
    pub credits: ConsumeResult,
    pub job: SubmittedJob,
}

/// Consumes one credit, then runs the job
///
/// A credit consumed for a job that later fails is not refunded.
pub struct GenerationGateway<R, P, F>
where
    R: AccountRepository,
    P: ImageSynthesisProvider,
    F: ArtifactFetcher,
{
    ledger: Arc<CreditLedger<R>>,
    orchestrator: Arc<JobOrchestrator<P, F>>,
}

impl<R, P, F> GenerationGateway<R, P, F>
where
    R: AccountRepository,
    P: ImageSynthesisProvider,
    F: ArtifactFetcher,
{
    pub fn new(ledger: Arc<CreditLedger<R>>, orchestrator: Arc<JobOrchestrator<P, F>>) -> Self {
        Self { ledger, orchestrator }
    }

    /// Charge the account and run the job to completion
    pub async fn generate_for(
        &self,
        account_id: AccountId,
        request: &GenerationRequest,
    ) -> DomainResult<GatewayOutcome> {
        let credits = self
            .ledger
            .check_and_consume(account_id, UsageKind::ImageGeneration)
            .await?;

        let job = self.orchestrator.generate(request).await.map_err(|e| {
            warn!(
                account_id = account_id,
                error = %e,
                event = "generation_failed_after_charge",
                "Generation failed after a credit was consumed"
            );
            e
        })?;

        Ok(GatewayOutcome { credits, job })
    }

    /// Charge the account and submit without waiting
    pub async fn submit_for(
        &self,
        account_id: AccountId,
        request: &GenerationRequest,
    ) -> DomainResult<GatewaySubmission> {
        let credits = self
            .ledger
            .check_and_consume(account_id, UsageKind::ImageGeneration)
            .await?;

        let job = self.orchestrator.submit(request).await.map_err(|e| {
            warn!(
                account_id = account_id,
                error = %e,
                event = "generation_failed_after_charge",
                "Submission failed after a credit was consumed"
            );
            e
        })?;

        Ok(GatewaySubmission { credits, job })
    }
}
