//! Main verification service implementation

use constant_time_eq::constant_time_eq;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use jf_shared::email::{is_valid_email, mask_email, normalize_email};

use crate::domain::entities::verification_entry::VerificationEntry;
use crate::errors::VerificationError;

use super::config::VerificationServiceConfig;
use super::traits::NotificationSender;
use super::types::{IssueResult, VerificationStatus, VerifyResult};

/// Live codes plus addresses whose send is still in progress
#[derive(Default)]
struct StoreState {
    entries: HashMap<String, VerificationEntry>,
    /// Address -> instant the pending dispatch started
    in_flight: HashMap<String, Instant>,
}

/// Volatile store of outstanding email verification codes
///
/// All state lives behind one async mutex. The mutex is released while a
/// code is being dispatched; the address is reserved as in flight instead,
/// so concurrent requests for it are throttled rather than double-sent.
pub struct VerificationService<N: NotificationSender + ?Sized> {
    /// Delivery channel for codes
    sender: Arc<N>,
    /// Service configuration
    config: VerificationServiceConfig,
    state: Mutex<StoreState>,
}

impl<N: NotificationSender + ?Sized> VerificationService<N> {
    /// Create a new verification service
    pub fn new(sender: Arc<N>, config: VerificationServiceConfig) -> Self {
        Self {
            sender,
            config,
            state: Mutex::new(StoreState::default()),
        }
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Generate a code, deliver it and remember it for later verification
    ///
    /// # Returns
    ///
    /// * `Ok(IssueResult)` - The code was delivered and stored
    /// * `Err(VerificationError::InvalidIdentity)` - The address is malformed
    /// * `Err(VerificationError::RateLimited)` - A code was sent too recently
    /// * `Err(VerificationError::SendFailed)` - Delivery failed; nothing stored
    pub async fn issue(&self, identity: &str) -> Result<IssueResult, VerificationError> {
        let identity = normalize_email(identity);
        if !is_valid_email(&identity) {
            return Err(VerificationError::InvalidIdentity { identity });
        }
        let masked = mask_email(&identity);

        {
            let mut state = self.state.lock().await;
            let now = Instant::now();
            if let Some(wait) = self.pending_wait(&state, &identity, now) {
                warn!(
                    email = %masked,
                    retry_after_seconds = wait,
                    event = "rate_limit_exceeded",
                    "Verification code request rate limit exceeded"
                );
                return Err(VerificationError::RateLimited {
                    retry_after_seconds: wait,
                });
            }
            state.in_flight.insert(identity.clone(), now);
        }

        let code = VerificationEntry::generate_code(self.config.code_length);
        let delivered = self.sender.dispatch(&identity, &code).await;

        let mut state = self.state.lock().await;
        state.in_flight.remove(&identity);

        if !delivered {
            error!(
                email = %masked,
                event = "code_dispatch_failed",
                "Failed to deliver verification code"
            );
            return Err(VerificationError::SendFailed);
        }

        let entry = VerificationEntry::new(code, Instant::now(), self.config.code_expiration);
        state.entries.insert(identity.clone(), entry);
        drop(state);

        info!(
            email = %masked,
            event = "code_issued",
            "Issued new verification code"
        );

        Ok(IssueResult {
            sent: true,
            identity,
            expires_in_minutes: self.config.expiration_minutes(),
            resend_after_seconds: self.config.resend_interval.as_secs(),
        })
    }

    /// Check a candidate code against the live entry for `identity`
    ///
    /// Expiry and the attempt limit are checked before the candidate is
    /// compared, and a wrong guess is counted after the comparison.
    pub async fn verify(&self, identity: &str, candidate: &str) -> Result<VerifyResult, VerificationError> {
        let identity = normalize_email(identity);
        let masked = mask_email(&identity);
        let now = Instant::now();

        let mut state = self.state.lock().await;
        let Some(entry) = state.entries.get_mut(&identity) else {
            return Err(VerificationError::NotFound);
        };

        if entry.is_expired_at(now) {
            state.entries.remove(&identity);
            info!(email = %masked, event = "code_expired", "Verification code expired");
            return Err(VerificationError::Expired);
        }

        if entry.attempts_exhausted(self.config.max_attempts) {
            state.entries.remove(&identity);
            warn!(
                email = %masked,
                event = "max_attempts_exceeded",
                "Verification attempts exhausted"
            );
            return Err(VerificationError::TooManyAttempts);
        }

        if constant_time_eq(entry.code.as_bytes(), candidate.as_bytes()) {
            state.entries.remove(&identity);
            info!(email = %masked, event = "code_verified", "Verification code accepted");
            return Ok(VerifyResult { success: true });
        }

        let remaining_attempts = entry.record_failed_attempt(self.config.max_attempts);
        warn!(
            email = %masked,
            remaining_attempts = remaining_attempts,
            event = "invalid_code",
            "Invalid verification code submitted"
        );
        Err(VerificationError::Invalid { remaining_attempts })
    }

    /// Remaining lifetime and attempt usage of the live entry, if any
    pub async fn status(&self, identity: &str) -> Option<VerificationStatus> {
        let identity = normalize_email(identity);
        let now = Instant::now();

        let mut state = self.state.lock().await;
        let entry = state.entries.get(&identity)?;
        if entry.is_expired_at(now) {
            state.entries.remove(&identity);
            return None;
        }

        Some(VerificationStatus {
            expires_in_seconds: entry.seconds_until_expiry(now),
            attempts_used: entry.attempts,
            max_attempts: self.config.max_attempts,
        })
    }

    /// Remove every expired entry and return how many were removed
    pub async fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let resend_interval = self.config.resend_interval;

        let mut state = self.state.lock().await;
        let before = state.entries.len();
        state.entries.retain(|_, entry| !entry.is_expired_at(now));
        // A reservation outlives its window only if the issuing task was dropped
        state
            .in_flight
            .retain(|_, started| now.saturating_duration_since(*started) < resend_interval);
        let removed = before - state.entries.len();

        if removed > 0 {
            info!(removed = removed, event = "codes_swept", "Removed expired verification codes");
        }
        removed
    }

    /// Number of live entries, expired or not
    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn pending_wait(&self, state: &StoreState, identity: &str, now: Instant) -> Option<u64> {
        let interval = self.config.resend_interval;
        if let Some(started) = state.in_flight.get(identity) {
            let elapsed = now.saturating_duration_since(*started);
            if elapsed < interval {
                return Some(interval.as_secs().saturating_sub(elapsed.as_secs()).max(1));
            }
        }
        state
            .entries
            .get(identity)
            .and_then(|entry| entry.resend_wait(now, interval))
    }
}

impl<N: NotificationSender + ?Sized + 'static> VerificationService<N> {
    /// Run [`sweep_expired`](Self::sweep_expired) every `period` in a background task
    ///
    /// The task runs until the returned handle is aborted.
    pub fn spawn_sweeper(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let service = Arc::clone(self);
        tokio::spawn(async move {
            debug!(interval_seconds = period.as_secs(), "Starting verification code sweeper");
            let mut interval_timer = tokio::time::interval(period);
            loop {
                interval_timer.tick().await;
                service.sweep_expired().await;
            }
        })
    }

    /// Spawn the sweeper at the configured `sweep_interval`
    pub fn spawn_configured_sweeper(self: &Arc<Self>) -> JoinHandle<()> {
        self.spawn_sweeper(self.config.sweep_interval)
    }
}
