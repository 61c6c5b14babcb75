//! Volatile verification code entry for email-based registration.

use rand::rngs::OsRng;
use rand::Rng;
use std::time::Duration;
use tokio::time::Instant;

/// Maximum number of wrong guesses tolerated per code
pub const MAX_ATTEMPTS: u32 = 3;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default lifetime of a code in minutes
pub const DEFAULT_EXPIRATION_MINUTES: u64 = 10;

/// A live verification code keyed by a normalized email address.
///
/// Times are monotonic so that entries are unaffected by wall-clock changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationEntry {
    /// The numeric code as sent
    pub code: String,

    /// When the code was dispatched
    pub sent_at: Instant,

    /// When the code stops being accepted
    pub expires_at: Instant,

    /// Number of failed guesses so far
    pub attempts: u32,
}

impl VerificationEntry {
    /// Creates an entry for `code` sent at `now` and valid for `ttl`
    pub fn new(code: String, now: Instant, ttl: Duration) -> Self {
        Self {
            code,
            sent_at: now,
            expires_at: now + ttl,
            attempts: 0,
        }
    }

    /// Generates a random numeric code of `length` digits using the OS RNG
    pub fn generate_code(length: usize) -> String {
        let mut rng = OsRng;
        (0..length)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect()
    }

    /// Expired once `now` is past the expiry instant
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now > self.expires_at
    }

    /// Whether `max_attempts` wrong guesses have already been used
    pub fn attempts_exhausted(&self, max_attempts: u32) -> bool {
        self.attempts >= max_attempts
    }

    /// Records one wrong guess and returns the guesses left
    pub fn record_failed_attempt(&mut self, max_attempts: u32) -> u32 {
        self.attempts += 1;
        max_attempts.saturating_sub(self.attempts)
    }

    /// Whole seconds until expiry, zero once expired
    pub fn seconds_until_expiry(&self, now: Instant) -> u64 {
        self.expires_at.saturating_duration_since(now).as_secs()
    }

    /// Seconds the caller must still wait before another send is allowed.
    ///
    /// Returns `None` once `interval` has elapsed since the last send.
    pub fn resend_wait(&self, now: Instant, interval: Duration) -> Option<u64> {
        let elapsed = now.saturating_duration_since(self.sent_at);
        if elapsed >= interval {
            return None;
        }
        Some(interval.as_secs().saturating_sub(elapsed.as_secs()).max(1))
    }
}
