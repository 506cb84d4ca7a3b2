//! # Commit Races
//!
//! Invocations that execute against the same committed state and then race
//! to commit. The ledger validates each transaction's read set, so exactly
//! one of two conflicting invocations takes effect.

#[cfg(test)]
mod tests {
    use super::super::fixtures::{alice, bamboo, bob, carol, org, Network, ORG2};
    use asset_transfer::{
        AssetTransferApi, AssetTransferService, ErrorKind, IdentityContext, InMemoryLedger,
        LedgerError, StaticIdentity, TransactionalLedger, TransferConfig, TransferContext,
        TransferError,
    };
    use std::sync::{Arc, Barrier};
    use std::thread;

    /// Execute `op` on its own thread, wait until every racer has executed,
    /// then commit.
    fn race<F>(
        ledger: &Arc<InMemoryLedger>,
        barrier: &Arc<Barrier>,
        identity: StaticIdentity,
        op: F,
    ) -> thread::JoinHandle<Result<usize, TransferError>>
    where
        F: FnOnce(&AssetTransferService<'_>) -> Result<(), TransferError> + Send + 'static,
    {
        let ledger = Arc::clone(ledger);
        let barrier = Arc::clone(barrier);
        thread::spawn(move || {
            let config = TransferConfig::default();
            let tx = ledger.begin(&identity.local_organization());
            let executed = {
                let service =
                    AssetTransferService::new(TransferContext::new(&tx, &identity, &config));
                op(&service)
            };
            barrier.wait();
            executed?;
            Ok(ledger.commit(tx)?)
        })
    }

    fn is_conflict(result: &Result<usize, TransferError>) -> bool {
        matches!(
            result,
            Err(TransferError::Substrate(LedgerError::Conflict { .. }))
        )
    }

    fn agreed_shelf(net: &Network) {
        net.run(&alice(), |svc| svc.create_asset("Bookshelf", "shelf-1", bamboo()))
            .unwrap();
        net.run(&alice(), |svc| svc.set_valuation("shelf-1", 500))
            .unwrap();
        net.run(&bob(), |svc| svc.agree_to_transfer("shelf-1", 500))
            .unwrap();
    }

    #[test]
    fn test_double_transfer_commits_once() {
        let net = Network::new();
        agreed_shelf(&net);

        let barrier = Arc::new(Barrier::new(2));
        let handles: Vec<_> = (0..2)
            .map(|_| {
                race(&net.ledger, &barrier, alice(), |svc| {
                    svc.transfer_asset("shelf-1", &org(ORG2)).map(|_| ())
                })
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(results.iter().filter(|r| is_conflict(r)).count(), 1);
        let conflict = results.into_iter().find(|r| r.is_err()).unwrap();
        assert!(conflict.unwrap_err().is_retryable());

        // Resubmitting the loser now fails on protocol grounds
        let err = net
            .run(&alice(), |svc| svc.transfer_asset("shelf-1", &org(ORG2)))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        let asset = net
            .run(&carol(), |svc| svc.read_asset("shelf-1"))
            .unwrap()
            .unwrap();
        assert_eq!(asset.owner, bob().caller_identity());
    }

    #[test]
    fn test_concurrent_proposals_one_wins() {
        let net = Network::new();
        net.run(&alice(), |svc| svc.create_asset("Bookshelf", "shelf-1", bamboo()))
            .unwrap();

        let barrier = Arc::new(Barrier::new(2));
        let handles = vec![
            race(&net.ledger, &barrier, bob(), |svc| {
                svc.agree_to_transfer("shelf-1", 500)
            }),
            race(&net.ledger, &barrier, carol(), |svc| {
                svc.agree_to_transfer("shelf-1", 500)
            }),
        ];
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(results.iter().filter(|r| is_conflict(r)).count(), 1);

        // The agreement and the winner's bid were written together
        let winner = if results[0].is_ok() { bob() } else { carol() };
        let loser = if results[0].is_ok() { carol() } else { bob() };
        let agreement = net
            .run(&alice(), |svc| svc.read_agreement("shelf-1"))
            .unwrap()
            .unwrap();
        assert_eq!(agreement.buyer(), Some(winner.caller_identity()));
        assert!(net
            .run(&loser, |svc| svc.read_valuation("shelf-1"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_disjoint_invocations_both_commit() {
        let net = Network::new();
        agreed_shelf(&net);
        net.run(&bob(), |svc| svc.create_asset("Lamp", "lamp-1", bamboo()))
            .unwrap();

        let barrier = Arc::new(Barrier::new(2));
        let handles = vec![
            race(&net.ledger, &barrier, alice(), |svc| {
                svc.set_valuation("shelf-1", 500)
            }),
            race(&net.ledger, &barrier, bob(), |svc| {
                svc.update_asset_attributes("lamp-1", bamboo()).map(|_| ())
            }),
        ];
        for handle in handles {
            assert!(handle.join().unwrap().is_ok());
        }
    }
}
