//! Tests for the per-attempt draw budget

#[cfg(test)]
mod tests {
    use iconcloud::algorithm::patience::{Patience, PatienceExhausted};

    // Tests the budget allows exactly `budget` draws
    // Verified by comparing with >= instead of >
    #[test]
    fn test_budget_allows_exact_count() {
        let mut patience = Patience::new(3);
        assert!(patience.record_draw().is_ok());
        assert!(patience.record_draw().is_ok());
        assert!(patience.record_draw().is_ok());
        assert_eq!(patience.remaining(), 0);
        assert_eq!(
            patience.record_draw(),
            Err(PatienceExhausted { draws: 4 })
        );
    }

    // Tests reset starts a fresh attempt
    // Verified by leaving draws untouched on reset
    #[test]
    fn test_reset() {
        let mut patience = Patience::new(2);
        let _ = patience.record_draw();
        let _ = patience.record_draw();
        let _ = patience.record_draw();
        assert_eq!(patience.draws(), 3);

        patience.reset();
        assert_eq!(patience.draws(), 0);
        assert_eq!(patience.remaining(), 2);
        assert_eq!(patience.budget(), 2);
        assert!(patience.record_draw().is_ok());
    }

    // Tests a zero budget rejects the very first draw
    // Verified by checking the budget before incrementing
    #[test]
    fn test_zero_budget() {
        let mut patience = Patience::new(0);
        assert_eq!(
            patience.record_draw(),
            Err(PatienceExhausted { draws: 1 })
        );
    }
}
