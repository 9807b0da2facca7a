use pitchorder_core::{Clock, IdGenerator, LotteryResult, Team};

use crate::violations::detect_violations;

/// Package a sequence into an immutable result record.
///
/// The sequence is audited once; `violations` is `None` when it is clean.
pub fn assemble_result(
    event_id: &str,
    sequence: Vec<Team>,
    ids: &impl IdGenerator,
    clock: &impl Clock,
) -> LotteryResult {
    let violations = detect_violations(&sequence);
    let is_valid = violations.is_empty();

    LotteryResult {
        id: ids.next_id(),
        event_id: event_id.to_string(),
        sequence,
        created_at: clock.now(),
        is_valid,
        violations: (!is_valid).then_some(violations),
    }
}
