/// Default platform cut of each sale, in percent.
pub const DEFAULT_PLATFORM_FEE_PERCENT: u32 = 10;

/// A sale amount divided between the creator and the platform.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RevenueSplit {
    pub creator_cents: i64,
    pub platform_cents: i64,
}

/// Split a sale between creator and platform.
///
/// The creator share is the creator percentage of the amount rounded half-up
/// to the cent; the platform takes the remainder, so
/// `creator_cents + platform_cents == amount_cents` holds exactly and any
/// rounding remainder lands on the platform side.
///
/// Total over well-formed input: negative amounts are treated as zero.
pub fn split(amount_cents: i64, platform_fee_percent: u32) -> RevenueSplit {
    let amount = amount_cents.max(0);
    let fee = platform_fee_percent.min(100) as i64;
    let creator_percent = 100 - fee;

    let creator_cents = (amount * creator_percent + 50) / 100;
    let platform_cents = amount - creator_cents;

    RevenueSplit {
        creator_cents,
        platform_cents,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_default(amount_cents: i64) -> RevenueSplit {
        split(amount_cents, DEFAULT_PLATFORM_FEE_PERCENT)
    }

    #[test]
    fn ten_dollars_splits_nine_one() {
        let s = split_default(1000);
        assert_eq!(s.creator_cents, 900);
        assert_eq!(s.platform_cents, 100);
    }

    #[test]
    fn rounding_remainder_goes_to_platform() {
        // $9.99 -> creator $8.99, platform $1.00
        let s = split_default(999);
        assert_eq!(s.creator_cents, 899);
        assert_eq!(s.platform_cents, 100);
    }

    #[test]
    fn zero_amount_splits_to_zero() {
        let s = split_default(0);
        assert_eq!(s.creator_cents, 0);
        assert_eq!(s.platform_cents, 0);
    }

    #[test]
    fn identity_holds_for_every_amount() {
        for amount in 0..=10_000 {
            let s = split_default(amount);
            assert_eq!(s.creator_cents + s.platform_cents, amount);
            // creator share is round(amount * 0.9) on the cent
            let expected = (amount as f64 * 0.9).round() as i64;
            assert_eq!(s.creator_cents, expected, "amount {}", amount);
            assert!(s.platform_cents >= 0);
        }
    }

    #[test]
    fn negative_amounts_are_clamped() {
        let s = split_default(-500);
        assert_eq!(s.creator_cents, 0);
        assert_eq!(s.platform_cents, 0);
    }
}
