//! Business services containing domain logic and use cases.

pub mod credits;
pub mod generation;
pub mod verification;

// Re-export commonly used types
pub use credits::{ConsumeResult, CreditLedger, CreditStatus};
pub use generation::{
    ArtifactFetcher, CompletedJob, GenerationGateway, ImageSynthesisProvider, JobOrchestrator,
    JobOrchestratorConfig, JobStatus, SubmittedJob,
};
pub use verification::{
    IssueResult, NotificationSender, VerificationService, VerificationServiceConfig, VerifyResult,
};
