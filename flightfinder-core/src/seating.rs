use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::booking::CabinClass;

/// Produce the next contiguous block of seat labels for a cabin.
///
/// Occupancy is derived, never stored: `already_booked` is the summed
/// passenger count across every existing booking for the same
/// (flight, journey date, class), cancelled ones included. Labels continue
/// from there: 2 already booked in economy plus 3 passengers yields
/// E-3, E-4, E-5.
pub fn seat_labels(class: CabinClass, already_booked: i64, passenger_count: usize) -> Vec<String> {
    let code = class.coach_code();
    (1..=passenger_count as i64)
        .map(|n| format!("{}-{}", code, already_booked + n))
        .collect()
}

/// Identifies one seat pool: labels are sequential within this triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeatPoolKey {
    pub flight: Uuid,
    pub journey_date: NaiveDate,
    pub seat_class: CabinClass,
}

/// Per-pool async locks serializing the count-then-insert window of booking
/// creation. Without this, two concurrent requests for the same pool read the
/// same occupancy and assign overlapping labels.
///
/// Scoped to the booking-creation path only; reads never take a lock.
#[derive(Debug, Default)]
pub struct SeatLocks {
    pools: Mutex<HashMap<SeatPoolKey, Arc<AsyncMutex<()>>>>,
}

impl SeatLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for one seat pool, creating it on first use.
    /// The guard is owned so it can be held across await points.
    pub async fn acquire(&self, key: SeatPoolKey) -> OwnedMutexGuard<()> {
        let pool = {
            let mut pools = self.pools.lock().unwrap_or_else(|e| e.into_inner());
            Arc::clone(pools.entry(key).or_default())
        };
        pool.lock_owned().await
    }
}
