//! # Registry Enumeration
//!
//! Range and owner queries over many assets, with agreement records stored
//! alongside in the shared partition.

#[cfg(test)]
mod tests {
    use super::super::fixtures::{alice, bamboo, bob, Network};
    use asset_transfer::{AssetTransferApi, IdentityContext};
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn seed(net: &Network, ids: &BTreeSet<String>) {
        net.run(&alice(), |svc| {
            for id in ids {
                svc.create_asset("Bookshelf", id, bamboo())?;
            }
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_range_excludes_agreement_records() {
        let net = Network::new();
        let ids: BTreeSet<String> = (0..20).map(|i| format!("shelf-{i:02}")).collect();
        seed(&net, &ids);
        for id in ["shelf-03", "shelf-11"] {
            net.run(&bob(), |svc| svc.agree_to_transfer(id, 10)).unwrap();
        }

        let listed: Vec<String> = net
            .run(&bob(), |svc| svc.list_assets_by_range("", ""))
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(listed, ids.iter().cloned().collect::<Vec<_>>());
    }

    #[test]
    fn test_half_open_bounds() {
        let net = Network::new();
        let ids: BTreeSet<String> = (0..10).map(|i| format!("lamp-{i}")).collect();
        seed(&net, &ids);

        let listed = net
            .run(&alice(), |svc| svc.list_assets_by_range("lamp-2", "lamp-5"))
            .unwrap();
        let listed: Vec<&str> = listed.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(listed, vec!["lamp-2", "lamp-3", "lamp-4"]);

        let empty = net
            .run(&alice(), |svc| svc.list_assets_by_range("lamp-5", "lamp-2"))
            .unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_owner_query_follows_transfers() {
        let net = Network::new();
        let ids: BTreeSet<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        seed(&net, &ids);

        net.run(&alice(), |svc| svc.set_valuation("b", 42)).unwrap();
        net.run(&bob(), |svc| svc.agree_to_transfer("b", 42)).unwrap();
        net.run(&alice(), |svc| {
            svc.transfer_asset("b", &bob().local_organization())
        })
        .unwrap();

        let owned_by_bob = net
            .run(&bob(), |svc| svc.query_assets_by_owner(&bob().caller_identity()))
            .unwrap();
        assert_eq!(owned_by_bob.len(), 1);
        assert_eq!(owned_by_bob[0].id, "b");

        let owned_by_alice = net
            .run(&bob(), |svc| svc.query_assets_by_owner(&alice().caller_identity()))
            .unwrap();
        assert_eq!(owned_by_alice.len(), 2);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_full_range_lists_each_asset_once(
            ids in prop::collection::btree_set("[a-z]{1,6}-[0-9]{1,3}", 1..40)
        ) {
            let net = Network::new();
            seed(&net, &ids);

            let listed: Vec<String> = net
                .run(&alice(), |svc| svc.list_assets_by_range("", ""))
                .unwrap()
                .into_iter()
                .map(|a| a.id)
                .collect();
            prop_assert_eq!(listed, ids.into_iter().collect::<Vec<_>>());
        }
    }
}
