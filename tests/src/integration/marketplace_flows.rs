//! # Marketplace Integration Flows
//!
//! Full mint → list → purchase lifecycles through the public API, including
//! the three-way settlement split, the atomic rollback on payout failure,
//! and the fee-policy guard rails.

#[cfg(test)]
mod tests {
    use primitive_types::U256;
    use shared_types::Identity;

    use pm_marketplace::adapters::{InMemoryOwnership, InMemoryTreasury, RecordingEventSink};
    use pm_marketplace::domain::value_objects::AssetId;
    use pm_marketplace::errors::{ErrorKind, MarketError, PayoutError};
    use pm_marketplace::events::MarketEvent;
    use pm_marketplace::service::{create_test_service, MarketplaceService};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const OPERATOR: Identity = Identity([0xEE; 20]);
    const ALICE: Identity = Identity([0xA1; 20]);
    const BOB: Identity = Identity([0xB2; 20]);
    const CAROL: Identity = Identity([0xC3; 20]);

    type TestService =
        MarketplaceService<InMemoryOwnership, InMemoryTreasury, RecordingEventSink>;

    fn marketplace() -> TestService {
        create_test_service(OPERATOR)
    }

    /// Mint and list in one step, returning the asset id.
    async fn mint_and_list(
        svc: &TestService,
        seller: Identity,
        royalty_bps: u16,
        price: u64,
    ) -> AssetId {
        let id = svc
            .mint(seller, format!("ipfs://asset-{royalty_bps}"), royalty_bps)
            .await
            .unwrap();
        svc.list(seller, id, U256::from(price)).await.unwrap();
        id
    }

    // =============================================================================
    // LIFECYCLE FLOWS
    // =============================================================================

    #[tokio::test]
    async fn test_mint_ids_strictly_increase_and_survive_failures() {
        let svc = marketplace();

        let first = svc.mint(ALICE, "a".into(), 0).await.unwrap();
        // A rejected mint consumes nothing
        svc.mint(ALICE, "bad".into(), 1500).await.unwrap_err();
        let second = svc.mint(BOB, "b".into(), 1000).await.unwrap();
        let third = svc.mint(ALICE, "c".into(), 500).await.unwrap();

        assert_eq!(first, AssetId::from(1u64));
        assert_eq!(second, AssetId::from(2u64));
        assert_eq!(third, AssetId::from(3u64));
        assert_eq!(svc.balance_of(ALICE).await, 2);
        assert_eq!(svc.balance_of(BOB).await, 1);
    }

    #[tokio::test]
    async fn test_reference_purchase_splits_value_exactly() {
        // royalty 500 bps, marketplace fee 250 bps, price 1000
        let svc = marketplace();
        let id = mint_and_list(&svc, ALICE, 500, 1000).await;

        let receipt = svc.purchase(BOB, id, U256::from(1000)).await.unwrap();

        assert_eq!(receipt.split.market_fee, U256::from(25));
        assert_eq!(receipt.split.royalty_fee, U256::from(50));
        assert_eq!(receipt.split.seller_amount, U256::from(925));
        assert_eq!(receipt.split.total(), receipt.price);

        // Ownership and counts moved, listing went inactive
        assert_eq!(svc.owner_of(id).await, Some(BOB));
        assert_eq!(svc.balance_of(ALICE).await, 0);
        assert_eq!(svc.balance_of(BOB).await, 1);
        assert!(!svc.listing_of(id).await.unwrap().active);

        // Payouts landed: Alice is both seller and creator here
        let treasury = svc.payout_sink();
        assert_eq!(treasury.balance_of(ALICE), U256::from(975));
        assert_eq!(treasury.balance_of(OPERATOR), U256::from(25));
    }

    #[tokio::test]
    async fn test_royalty_flows_to_creator_on_resale() {
        let svc = marketplace();
        let id = mint_and_list(&svc, ALICE, 1000, 1000).await;
        svc.purchase(BOB, id, U256::from(1000)).await.unwrap();

        // Bob resells to Carol; Alice keeps earning her 10% royalty
        svc.list(BOB, id, U256::from(2000)).await.unwrap();
        let receipt = svc.purchase(CAROL, id, U256::from(2000)).await.unwrap();

        assert_eq!(receipt.seller, BOB);
        assert_eq!(receipt.split.royalty_fee, U256::from(200));
        assert_eq!(svc.owner_of(id).await, Some(CAROL));
        let treasury = svc.payout_sink();
        // First sale: 875 as seller + 100 royalty to self; resale adds 200 royalty
        assert_eq!(treasury.balance_of(ALICE), U256::from(875 + 100 + 200));
    }

    #[tokio::test]
    async fn test_unlist_then_purchase_is_not_for_sale() {
        let svc = marketplace();
        let id = mint_and_list(&svc, ALICE, 0, 100).await;
        svc.unlist(ALICE, id).await.unwrap();

        assert_eq!(
            svc.purchase(BOB, id, U256::from(100)).await,
            Err(MarketError::NotForSale(id))
        );
        assert_eq!(svc.owner_of(id).await, Some(ALICE));
    }

    #[tokio::test]
    async fn test_double_unlist_is_idempotent() {
        let svc = marketplace();
        let id = mint_and_list(&svc, ALICE, 0, 100).await;

        svc.unlist(ALICE, id).await.unwrap();
        svc.unlist(ALICE, id).await.unwrap();
        assert!(!svc.listing_of(id).await.unwrap().active);
    }

    #[tokio::test]
    async fn test_wrong_payment_leaves_everything_unchanged() {
        let svc = marketplace();
        let id = mint_and_list(&svc, ALICE, 500, 1000).await;

        for paid in [0u64, 999, 1001] {
            let err = svc.purchase(BOB, id, U256::from(paid)).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
        }

        assert_eq!(svc.owner_of(id).await, Some(ALICE));
        assert!(svc.listing_of(id).await.unwrap().active);
        assert_eq!(svc.payout_sink().balance_of(ALICE), U256::zero());
    }

    #[tokio::test]
    async fn test_purchase_of_unminted_asset_fails() {
        let svc = marketplace();
        let ghost = AssetId::from(42u64);
        assert_eq!(
            svc.purchase(BOB, ghost, U256::from(1)).await,
            Err(MarketError::NotForSale(ghost))
        );
    }

    // =============================================================================
    // SETTLEMENT ATOMICITY
    // =============================================================================

    #[tokio::test]
    async fn test_payout_failure_restores_pre_purchase_state() {
        let svc = marketplace();
        let id = mint_and_list(&svc, ALICE, 500, 1000).await;

        let treasury = svc.payout_sink();
        treasury.refuse(OPERATOR); // operator fee is the LAST payout in the batch

        let err = svc.purchase(BOB, id, U256::from(1000)).await.unwrap_err();
        assert_eq!(
            err,
            MarketError::PayoutFailed(PayoutError::RecipientUnavailable(OPERATOR))
        );

        // Full rollback: ownership, counts, listing, and zero credits anywhere
        assert_eq!(svc.owner_of(id).await, Some(ALICE));
        assert_eq!(svc.balance_of(ALICE).await, 1);
        assert_eq!(svc.balance_of(BOB).await, 0);
        assert!(svc.listing_of(id).await.unwrap().active);
        assert_eq!(treasury.balance_of(ALICE), U256::zero());

        // No sold event either
        let sold = svc
            .event_sink()
            .recorded()
            .into_iter()
            .filter(|e| matches!(e, MarketEvent::AssetSold(_)))
            .count();
        assert_eq!(sold, 0);

        let stats = svc.stats().await;
        assert_eq!(stats.sales_settled, 0);
        assert_eq!(stats.failed_settlements, 1);
    }

    #[tokio::test]
    async fn test_purchase_retry_succeeds_after_recipient_recovers() {
        let svc = marketplace();
        let id = mint_and_list(&svc, ALICE, 0, 500).await;

        let treasury = svc.payout_sink();
        treasury.refuse(ALICE);
        svc.purchase(BOB, id, U256::from(500)).await.unwrap_err();

        treasury.accept(ALICE);
        let receipt = svc.purchase(BOB, id, U256::from(500)).await.unwrap();
        assert_eq!(receipt.buyer, BOB);
        assert_eq!(svc.owner_of(id).await, Some(BOB));
    }

    // =============================================================================
    // FEE POLICY
    // =============================================================================

    #[tokio::test]
    async fn test_fee_cap_and_boundary() {
        let svc = marketplace();

        assert_eq!(
            svc.set_marketplace_fee(OPERATOR, 1001).await,
            Err(MarketError::FeeTooHigh { bps: 1001 })
        );
        assert_eq!(svc.marketplace_fee_bps().await, 250);

        svc.set_marketplace_fee(OPERATOR, 1000).await.unwrap();
        assert_eq!(svc.marketplace_fee_bps().await, 1000);

        // At the cap with a 10% royalty, the seller still gets 80%
        let id = mint_and_list(&svc, ALICE, 1000, 1000).await;
        let receipt = svc.purchase(BOB, id, U256::from(1000)).await.unwrap();
        assert_eq!(receipt.split.market_fee, U256::from(100));
        assert_eq!(receipt.split.royalty_fee, U256::from(100));
        assert_eq!(receipt.split.seller_amount, U256::from(800));
    }

    #[tokio::test]
    async fn test_fee_update_is_operator_only() {
        let svc = marketplace();
        assert_eq!(
            svc.set_marketplace_fee(ALICE, 100).await,
            Err(MarketError::NotOperator { caller: ALICE })
        );
        assert_eq!(svc.marketplace_fee_bps().await, 250);
    }

    #[tokio::test]
    async fn test_fee_change_applies_to_later_sales_only() {
        let svc = marketplace();
        let first = mint_and_list(&svc, ALICE, 0, 1000).await;
        let receipt = svc.purchase(BOB, first, U256::from(1000)).await.unwrap();
        assert_eq!(receipt.split.market_fee, U256::from(25)); // 250 bps

        svc.set_marketplace_fee(OPERATOR, 500).await.unwrap();
        let second = mint_and_list(&svc, ALICE, 0, 1000).await;
        let receipt = svc.purchase(BOB, second, U256::from(1000)).await.unwrap();
        assert_eq!(receipt.split.market_fee, U256::from(50)); // 500 bps
    }

    // =============================================================================
    // AUTHORIZATION
    // =============================================================================

    #[tokio::test]
    async fn test_only_owner_lists_and_only_seller_unlists() {
        let svc = marketplace();
        let id = svc.mint(ALICE, "a".into(), 0).await.unwrap();

        assert_eq!(
            svc.list(BOB, id, U256::from(10)).await,
            Err(MarketError::NotOwner {
                caller: BOB,
                asset_id: id
            })
        );

        svc.list(ALICE, id, U256::from(10)).await.unwrap();
        assert_eq!(
            svc.unlist(CAROL, id).await,
            Err(MarketError::NotSeller {
                caller: CAROL,
                asset_id: id
            })
        );
    }
}
