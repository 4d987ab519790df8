//! # Subscription Integration Flows
//!
//! Subscribe → lapse → renew lifecycles driven by a manual clock, plus the
//! operator's pooled-balance sweep.

#[cfg(test)]
mod tests {
    use primitive_types::U256;
    use shared_types::Identity;

    use pm_subscriptions::errors::{SubscriptionError, TransferError};
    use pm_subscriptions::service::create_test_service;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const OPERATOR: Identity = Identity([0xEE; 20]);
    const ALICE: Identity = Identity([0xA1; 20]);
    const BOB: Identity = Identity([0xB2; 20]);

    const PRICE: u64 = 100;

    // =============================================================================
    // VALIDITY WINDOW
    // =============================================================================

    #[tokio::test]
    async fn test_subscription_lapses_after_31_days_without_renewal() {
        let svc = create_test_service(OPERATOR);
        svc.subscribe(ALICE, U256::from(PRICE), U256::from(PRICE))
            .await
            .unwrap();
        assert!(svc.is_valid(ALICE).await);

        svc.clock().advance_days(31);

        // Derived validity is gone but the stored flag survives until cancel
        assert!(!svc.is_valid(ALICE).await);
        assert!(svc.subscription_of(ALICE).await.unwrap().active);

        svc.cancel(ALICE).await.unwrap();
        assert!(!svc.subscription_of(ALICE).await.unwrap().active);
    }

    #[tokio::test]
    async fn test_validity_holds_through_day_30() {
        let svc = create_test_service(OPERATOR);
        svc.subscribe(ALICE, U256::from(PRICE), U256::from(PRICE))
            .await
            .unwrap();

        svc.clock().advance_days(30);
        assert!(svc.is_valid(ALICE).await);

        svc.clock().advance_secs(1);
        assert!(!svc.is_valid(ALICE).await);
    }

    #[tokio::test]
    async fn test_renewal_keeps_subscription_rolling() {
        let svc = create_test_service(OPERATOR);
        svc.subscribe(ALICE, U256::from(PRICE), U256::from(PRICE))
            .await
            .unwrap();

        for _ in 0..3 {
            svc.clock().advance_days(25);
            assert!(svc.is_valid(ALICE).await);
            svc.renew(ALICE, U256::from(PRICE)).await.unwrap();
        }
        assert!(svc.is_valid(ALICE).await);
        assert_eq!(svc.pool_balance().await, U256::from(PRICE * 4));
    }

    #[tokio::test]
    async fn test_unknown_identity_is_never_valid() {
        let svc = create_test_service(OPERATOR);
        assert!(!svc.is_valid(BOB).await);
    }

    // =============================================================================
    // STATE MACHINE
    // =============================================================================

    #[tokio::test]
    async fn test_renew_and_cancel_need_an_active_subscription() {
        let svc = create_test_service(OPERATOR);

        assert_eq!(
            svc.renew(ALICE, U256::from(PRICE)).await,
            Err(SubscriptionError::NoActiveSubscription(ALICE))
        );
        assert_eq!(
            svc.cancel(ALICE).await,
            Err(SubscriptionError::NoActiveSubscription(ALICE))
        );
    }

    #[tokio::test]
    async fn test_cancelled_subscriber_can_reopen_at_new_price() {
        let svc = create_test_service(OPERATOR);
        svc.subscribe(ALICE, U256::from(PRICE), U256::from(PRICE))
            .await
            .unwrap();
        svc.cancel(ALICE).await.unwrap();

        svc.subscribe(ALICE, U256::from(250), U256::from(250))
            .await
            .unwrap();
        assert!(svc.is_valid(ALICE).await);

        // Renewal now has to match the new price
        assert!(matches!(
            svc.renew(ALICE, U256::from(PRICE)).await,
            Err(SubscriptionError::IncorrectPayment { .. })
        ));
        svc.renew(ALICE, U256::from(250)).await.unwrap();
    }

    #[tokio::test]
    async fn test_subscribers_are_independent() {
        let svc = create_test_service(OPERATOR);
        svc.subscribe(ALICE, U256::from(PRICE), U256::from(PRICE))
            .await
            .unwrap();

        svc.clock().advance_days(20);
        svc.subscribe(BOB, U256::from(PRICE), U256::from(PRICE))
            .await
            .unwrap();

        svc.clock().advance_days(15); // Alice at day 35, Bob at day 15
        assert!(!svc.is_valid(ALICE).await);
        assert!(svc.is_valid(BOB).await);
    }

    // =============================================================================
    // POOLED BALANCE
    // =============================================================================

    #[tokio::test]
    async fn test_pool_accumulates_across_subscribers_and_survives_cancel() {
        let svc = create_test_service(OPERATOR);
        svc.subscribe(ALICE, U256::from(PRICE), U256::from(PRICE))
            .await
            .unwrap();
        svc.subscribe(BOB, U256::from(300), U256::from(300))
            .await
            .unwrap();
        svc.cancel(ALICE).await.unwrap(); // no refund

        assert_eq!(svc.pool_balance().await, U256::from(400));

        let swept = svc.withdraw(OPERATOR).await.unwrap();
        assert_eq!(swept, U256::from(400));
        assert_eq!(svc.pool_balance().await, U256::zero());
        assert_eq!(
            svc.transfer_backend().received_by(OPERATOR),
            U256::from(400)
        );
    }

    #[tokio::test]
    async fn test_withdraw_rejects_non_operator_and_failed_transfer() {
        let svc = create_test_service(OPERATOR);
        svc.subscribe(ALICE, U256::from(PRICE), U256::from(PRICE))
            .await
            .unwrap();

        assert_eq!(
            svc.withdraw(BOB).await,
            Err(SubscriptionError::NotOperator { caller: BOB })
        );

        let vault = svc.transfer_backend();
        vault.refuse(OPERATOR);
        assert_eq!(
            svc.withdraw(OPERATOR).await,
            Err(SubscriptionError::TransferFailed(
                TransferError::RecipientUnavailable(OPERATOR)
            ))
        );
        // Pool retained for a later retry
        assert_eq!(svc.pool_balance().await, U256::from(PRICE));
    }
}
