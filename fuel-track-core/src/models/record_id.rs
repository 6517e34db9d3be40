use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

static LAST_ISSUED: AtomicI64 = AtomicI64::new(0);

/// Client-side record id generator.
///
/// Ids are epoch milliseconds rendered as decimal strings. Two ids requested
/// within the same millisecond are bumped so the sequence stays strictly
/// increasing for the life of the process.
pub struct RecordId;

impl RecordId {
    pub fn next() -> String {
        let now = Utc::now().timestamp_millis();
        let mut prev = LAST_ISSUED.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(prev + 1);
            match LAST_ISSUED.compare_exchange_weak(
                prev,
                candidate,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate.to_string(),
                Err(actual) => prev = actual,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_strictly_increase() {
        let ids: Vec<i64> = (0..50)
            .map(|_| RecordId::next().parse().unwrap())
            .collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_id_is_time_derived() {
        let before = Utc::now().timestamp_millis();
        let id: i64 = RecordId::next().parse().unwrap();
        assert!(id >= before);
    }
}
