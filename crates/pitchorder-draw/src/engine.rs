use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use pitchorder_core::{
    Clock, FeasibilityResult, IdGenerator, LotteryResult, Partner, SystemClock, Team,
    UuidIdGenerator,
};

use crate::assemble::assemble_result;
use crate::errors::DrawError;
use crate::feasibility::validate_feasibility;
use crate::model::{DrawOptions, DrawReport};
use crate::sequence::generate_sequence_with_stats;

/// Result of a draw run.
#[derive(Debug, Clone)]
pub struct DrawOutcome {
    pub result: LotteryResult,
    pub report: DrawReport,
}

/// Entry point for drawing a presentation order: feasibility gate, sequence
/// generation, audit and result assembly.
#[derive(Debug, Clone)]
pub struct DrawEngine<I = UuidIdGenerator, C = SystemClock> {
    options: DrawOptions,
    ids: I,
    clock: C,
}

impl DrawEngine {
    pub fn new(options: DrawOptions) -> Self {
        Self::with_capabilities(options, UuidIdGenerator, SystemClock)
    }
}

impl<I: IdGenerator, C: Clock> DrawEngine<I, C> {
    pub fn with_capabilities(options: DrawOptions, ids: I, clock: C) -> Self {
        Self {
            options,
            ids,
            clock,
        }
    }

    pub fn check(&self, teams: &[Team], partners: &[Partner]) -> FeasibilityResult {
        validate_feasibility(teams, partners)
    }

    /// Draw an order for an event, seeding from `options.seed` when set.
    pub fn draw(
        &self,
        event_id: &str,
        teams: &[Team],
        partners: &[Partner],
    ) -> Result<DrawOutcome, DrawError> {
        let mut rng = match self.options.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(hash_seed(seed, event_id)),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        self.draw_with_rng(event_id, teams, partners, &mut rng)
    }

    /// Draw an order using a caller-provided random source.
    pub fn draw_with_rng<R: Rng + ?Sized>(
        &self,
        event_id: &str,
        teams: &[Team],
        partners: &[Partner],
        rng: &mut R,
    ) -> Result<DrawOutcome, DrawError> {
        let start = Instant::now();
        info!(
            event_id = %event_id,
            teams = teams.len(),
            partners = partners.len(),
            max_attempts = self.options.max_attempts,
            seed = self.options.seed,
            "draw started"
        );

        let outcome = match generate_sequence_with_stats(teams, partners, rng, &self.options) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(event_id = %event_id, error = %err, "draw refused");
                return Err(err);
            }
        };

        let total_teams = outcome.sequence.len();
        let result = assemble_result(event_id, outcome.sequence, &self.ids, &self.clock);
        let violations = result.violations().len();
        if !result.is_valid {
            warn!(
                event_id = %event_id,
                result_id = %result.id,
                violations,
                "draw produced adjacent same-partner teams"
            );
        }

        let report = DrawReport {
            result_id: result.id.clone(),
            event_id: event_id.to_string(),
            total_teams,
            attempts: outcome.attempts,
            used_fallback: outcome.used_fallback,
            violations,
            seed: self.options.seed,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            event_id = %event_id,
            result_id = %report.result_id,
            attempts = report.attempts,
            used_fallback = report.used_fallback,
            is_valid = result.is_valid,
            duration_ms = report.duration_ms,
            "draw completed"
        );

        Ok(DrawOutcome { result, report })
    }
}

fn hash_seed(seed: u64, key: &str) -> u64 {
    let mut hash = seed ^ 0xcbf29ce484222325;
    for byte in key.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}
