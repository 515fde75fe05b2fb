use chrono::NaiveDateTime;
use tracing::warn;

use crate::models::Session;

/// The session whose start is nearest to `now`, before or after.
///
/// Stable minimum: on equal distance the earlier entry in `sessions` wins.
/// Sessions with an unreadable start time are skipped.
pub fn closest_session(sessions: &[Session], now: NaiveDateTime) -> Option<&Session> {
    let mut best: Option<(&Session, i64)> = None;

    for session in sessions {
        let start = match session.starts_at() {
            Ok(start) => start,
            Err(e) => {
                warn!("Skipping session {}: {}", session.id, e);
                continue;
            }
        };
        let distance = (start - now).num_milliseconds().abs();

        match best {
            Some((_, closest)) if closest <= distance => {}
            _ => best = Some((session, distance)),
        }
    }

    best.map(|(session, _)| session)
}
