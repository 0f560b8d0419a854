//! Snapshot cadence policy
//!
//! For `n` in `[10^k, 10^(k+1))` a snapshot is due when `n` is a multiple of
//! `10^k`: every sample below 10, every 10th below 100, every 100th below
//! 1000, and so on without an upper bound. Integer arithmetic only.

/// Largest power of ten not exceeding `n` (1 for `n < 10`, including 0)
pub fn cadence_step(n: u64) -> u64 {
    let mut step = 1u64;
    // `step <= n / 10` keeps `step * 10 <= n`, so this never overflows
    while step <= n / 10 {
        step *= 10;
    }
    step
}

/// Whether a snapshot should be produced after the `n`-th sample
pub fn should_snapshot(n: u64) -> bool {
    n > 0 && n % cadence_step(n) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_cadence_step() {
        assert_eq!(cadence_step(0), 1);
        assert_eq!(cadence_step(1), 1);
        assert_eq!(cadence_step(9), 1);
        assert_eq!(cadence_step(10), 10);
        assert_eq!(cadence_step(99), 10);
        assert_eq!(cadence_step(100), 100);
        assert_eq!(cadence_step(10_000_000), 10_000_000);
        assert_eq!(cadence_step(u64::MAX), 10_000_000_000_000_000_000);
    }

    #[test]
    fn test_should_snapshot_examples() {
        assert!(!should_snapshot(0));
        assert!(should_snapshot(1));
        assert!(should_snapshot(9));
        assert!(should_snapshot(10));
        assert!(!should_snapshot(15));
        assert!(should_snapshot(20));
        assert!(should_snapshot(100));
        assert!(!should_snapshot(110));
        assert!(!should_snapshot(999));
        assert!(should_snapshot(1000));
    }

    #[test]
    fn test_decade_boundaries_past_ten_million() {
        assert!(should_snapshot(10_000_000));
        assert!(!should_snapshot(15_000_000));
        assert!(should_snapshot(20_000_000));
        assert!(should_snapshot(100_000_000));
        assert!(!should_snapshot(110_000_000));
        assert!(should_snapshot(10_000_000_000_000_000_000));
        assert!(!should_snapshot(u64::MAX));
    }

    #[test]
    fn test_hit_count_up_to_ten_thousand() {
        let hits = (1..=10_000u64).filter(|&n| should_snapshot(n)).count();
        assert_eq!(hits, 37);
    }

    proptest! {
        #[test]
        fn prop_nine_hits_per_decade(k in 0u32..18) {
            let lo = 10u64.pow(k);
            let hits: Vec<u64> = (1..10).map(|d| d * lo).collect();
            for n in hits {
                prop_assert!(should_snapshot(n));
                prop_assert_eq!(cadence_step(n), lo);
            }
        }

        #[test]
        fn prop_should_snapshot_is_deterministic(n in any::<u64>()) {
            prop_assert_eq!(should_snapshot(n), should_snapshot(n));
            if should_snapshot(n) {
                prop_assert_eq!(n % cadence_step(n), 0);
            }
        }

        #[test]
        fn prop_step_brackets_n(n in 1u64..u64::MAX) {
            let step = cadence_step(n);
            prop_assert!(step <= n);
            prop_assert!(n / step < 10);
        }
    }
}
