//! Allocator — collision-checked hostname allocation.
//!
//! Each attempt runs the whole pipeline: resolve the prefix, estimate the
//! next sequence from the full record listing, assemble the candidate, and
//! probe the backend for it. A collision discards the candidate and starts
//! a fresh attempt, up to `max_attempts`.
//!
//! Two concurrent `allocate` calls for the same group can return the same
//! name: the probe and the caller's later save are separate operations.
//! `allocate_and_register` closes that gap by reserving through
//! [`HostnameRegistry::insert_if_absent`].

use hostgen_core::config::DEFAULT_MAX_ATTEMPTS;
use hostgen_core::{AllocationRequest, HostgenConfig, SegmentParsing};
use hostgen_state::{HostnameRecord, NewHostname};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::backend::{HostnameBackend, HostnameRegistry};
use crate::error::{AllocationError, AllocationResult};
use crate::prefix::{OsPrefix, resolve_prefix};
use crate::sequence::{self, Estimate};

/// Chance that an unanswerable existence probe is treated as a collision.
pub const OFFLINE_COLLISION_PROBABILITY: f64 = 0.1;

/// Allocator tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocatorConfig {
    /// Substitute random values for failed backend reads instead of failing.
    pub offline_fallback_enabled: bool,
    /// Attempts before giving up with [`AllocationError::Exhausted`].
    pub max_attempts: u32,
    pub segment_parsing: SegmentParsing,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            offline_fallback_enabled: true,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            segment_parsing: SegmentParsing::default(),
        }
    }
}

impl From<&HostgenConfig> for AllocatorConfig {
    fn from(config: &HostgenConfig) -> Self {
        Self {
            offline_fallback_enabled: config.offline_fallback_enabled(),
            max_attempts: config.max_attempts(),
            segment_parsing: config.segment_parsing(),
        }
    }
}

/// Hands out hostnames that are free according to a [`HostnameBackend`].
pub struct Allocator<B> {
    backend: B,
    config: AllocatorConfig,
}

impl<B: HostnameBackend> Allocator<B> {
    pub fn new(backend: B, config: AllocatorConfig) -> Self {
        Self { backend, config }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Allocate a hostname that the backend does not know yet.
    ///
    /// Only reads from the backend. Writing the record afterwards is the
    /// caller's job.
    pub async fn allocate(&self, request: &AllocationRequest) -> AllocationResult<String> {
        let attempts = self.config.max_attempts.max(1);
        for attempt in 1..=attempts {
            let candidate = self.candidate(request).await?;
            if self.probe(&candidate).await? {
                debug!(%candidate, attempt, "hostname already exists, retrying");
                continue;
            }
            info!(hostname = %candidate, attempt, "hostname allocated");
            return Ok(candidate);
        }
        warn!(attempts, os = %request.os, "hostname allocation exhausted");
        Err(AllocationError::Exhausted { attempts })
    }

    /// Next sequence number for a (prefix, environment, function) group.
    pub async fn next_sequence(
        &self,
        prefix: OsPrefix,
        environment: &str,
        server_function: &str,
    ) -> AllocationResult<u64> {
        let records = match self.backend.list_hostnames().await {
            Ok(records) => records,
            Err(e) if self.config.offline_fallback_enabled => {
                let seed = sequence::random_seed();
                warn!(error = %e, seed, "hostname listing failed, using random sequence");
                return Ok(seed);
            }
            Err(e) => return Err(e.into()),
        };

        let estimate = sequence::estimate(
            &records,
            prefix,
            environment,
            server_function,
            self.config.segment_parsing,
        );
        match estimate {
            Estimate::Next(next) => {
                debug!(%prefix, environment, server_function, next, "sequence estimated");
                Ok(next)
            }
            Estimate::NoMatches => {
                let seed = sequence::random_seed();
                debug!(%prefix, environment, server_function, seed, "no previous hostnames, seeding");
                Ok(seed)
            }
            Estimate::Malformed { hostname } if self.config.offline_fallback_enabled => {
                let seed = sequence::random_seed();
                warn!(%hostname, seed, "unreadable sequence in stored hostname, using random sequence");
                Ok(seed)
            }
            Estimate::Malformed { hostname } => Err(AllocationError::MalformedSequence { hostname }),
        }
    }

    async fn candidate(&self, request: &AllocationRequest) -> AllocationResult<String> {
        let prefix = resolve_prefix(&request.os);
        let seq = self
            .next_sequence(prefix, &request.environment, &request.server_function)
            .await?;
        Ok(format!(
            "{prefix}{seq}{}{}{}",
            request.environment, request.server_function, request.node
        ))
    }

    /// Returns true when `candidate` is taken.
    async fn probe(&self, candidate: &str) -> AllocationResult<bool> {
        match self.backend.hostname_exists(candidate).await {
            Ok(exists) => Ok(exists),
            Err(e) if self.config.offline_fallback_enabled => {
                let guess = rand::thread_rng().gen_bool(OFFLINE_COLLISION_PROBABILITY);
                warn!(error = %e, %candidate, guess, "existence check failed, guessing");
                Ok(guess)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl<B: HostnameRegistry> Allocator<B> {
    /// Allocate a hostname and store `details` under it in one step.
    ///
    /// The hostname, OS, environment, function, and node of `details` are
    /// overwritten from `request`. A lost race on the insert counts as a
    /// collision and consumes an attempt.
    pub async fn allocate_and_register(
        &self,
        request: &AllocationRequest,
        details: NewHostname,
    ) -> AllocationResult<HostnameRecord> {
        let attempts = self.config.max_attempts.max(1);
        for attempt in 1..=attempts {
            let candidate = self.candidate(request).await?;
            if self.probe(&candidate).await? {
                debug!(%candidate, attempt, "hostname already exists, retrying");
                continue;
            }

            let new = NewHostname {
                hostname: candidate.clone(),
                os: request.os.clone(),
                environment: request.environment.clone(),
                server_function: request.server_function.clone(),
                node: request.node.clone(),
                ..details.clone()
            };
            match self.backend.insert_if_absent(new).await? {
                Some(record) => {
                    info!(hostname = %record.hostname, id = record.id, attempt, "hostname registered");
                    return Ok(record);
                }
                None => {
                    warn!(%candidate, attempt, "hostname taken by a concurrent writer, retrying");
                }
            }
        }
        warn!(attempts, os = %request.os, "hostname registration exhausted");
        Err(AllocationError::Exhausted { attempts })
    }
}
