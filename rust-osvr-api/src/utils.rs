use crate::native::OSVR_TimeValue;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering::SeqCst;

static INTERFACE_ID_COUNTER: AtomicU32 = AtomicU32::new(0);

// Generates a unique identifier for any opened interface
pub fn new_id() -> u32 {
    INTERFACE_ID_COUNTER.fetch_add(1, SeqCst)
}

// Report timestamp in seconds
pub fn timestamp(time: &OSVR_TimeValue) -> f64 {
    time.seconds as f64 + time.microseconds as f64 * 1e-6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_increase() {
        let a = new_id();
        let b = new_id();
        assert!(b > a);
    }

    #[test]
    fn timestamps_combine_both_fields() {
        let t = OSVR_TimeValue { seconds: 12, microseconds: 500_000 };
        assert!((timestamp(&t) - 12.5).abs() < 1e-9);
    }
}
