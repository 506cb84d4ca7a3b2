//! # Request Boundary
//!
//! The full protocol driven through `RequestHandler` with raw JSON, as a
//! peer host would submit it.

#[cfg(test)]
mod tests {
    use super::super::fixtures::{alice, bob, init_logging, ORG1, ORG2};
    use asset_transfer::ipc::ResponseBody;
    use asset_transfer::{
        content_hash, ErrorKind, HandlerStats, InMemoryLedger, RequestHandler, StaticIdentity,
        TransferResponse,
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use uuid::Uuid;

    fn submit(
        handler: &RequestHandler<InMemoryLedger>,
        identity: &StaticIdentity,
        operation: &str,
        args: Value,
    ) -> TransferResponse {
        let bytes = json!({
            "correlationId": Uuid::new_v4(),
            "request": {"operation": operation, "args": args}
        })
        .to_string();
        handler.handle(identity, bytes.as_bytes())
    }

    #[test]
    fn test_protocol_over_json() {
        init_logging();
        let handler = RequestHandler::new(Arc::new(InMemoryLedger::new()));

        let created = submit(
            &handler,
            &alice(),
            "CreateAsset",
            json!({"assetId": "shelf-1", "kind": "Bookshelf", "attributes": {"material": "Bamboo", "shelves": 4}}),
        );
        assert!(created.is_ok());
        assert!(created.correlation_id.is_some());

        assert!(submit(&handler, &alice(), "SetValuation", json!({"assetId": "shelf-1", "value": 500})).is_ok());
        assert!(submit(&handler, &bob(), "AgreeToTransfer", json!({"assetId": "shelf-1", "value": 500})).is_ok());

        let state = submit(
            &handler,
            &alice(),
            "ReadLifecycle",
            json!({"assetId": "shelf-1", "ownerOrg": ORG1, "buyerOrg": ORG2}),
        );
        let state = serde_json::to_value(&state).unwrap();
        assert_eq!(state["result"]["Ok"], json!({"type": "Lifecycle", "value": "Agreed"}));

        let transferred = submit(
            &handler,
            &alice(),
            "TransferAsset",
            json!({"assetId": "shelf-1", "buyerOrg": ORG2}),
        );
        let value = serde_json::to_value(&transferred).unwrap();
        assert_eq!(value["result"]["Ok"]["type"], "Asset");
        assert_eq!(
            value["result"]["Ok"]["value"]["owner"],
            "x509::CN=bob,OU=client::CN=ca.org2"
        );
        assert_eq!(value["result"]["Ok"]["value"]["attributes"]["shelves"], 4);

        let agreement = submit(&handler, &bob(), "ReadAgreement", json!({"assetId": "shelf-1"}));
        assert_eq!(agreement.result, Ok(ResponseBody::Agreement(None)));

        assert_eq!(
            handler.stats(),
            HandlerStats {
                requests: 6,
                committed: 6,
                rejected: 0,
                conflicts: 0,
            }
        );
    }

    #[test]
    fn test_rejections_carry_kind() {
        init_logging();
        let handler = RequestHandler::new(Arc::new(InMemoryLedger::new()));
        submit(
            &handler,
            &alice(),
            "CreateAsset",
            json!({"assetId": "shelf-1", "kind": "Bookshelf"}),
        );

        let duplicate = submit(
            &handler,
            &bob(),
            "CreateAsset",
            json!({"assetId": "shelf-1", "kind": "Bookshelf"}),
        );
        assert_eq!(duplicate.error_kind(), Some(ErrorKind::AlreadyExists));

        let zero = submit(&handler, &alice(), "SetValuation", json!({"assetId": "shelf-1", "value": 0}));
        assert_eq!(zero.error_kind(), Some(ErrorKind::InvalidInput));

        let typo = submit(&handler, &alice(), "SetValuation", json!({"assetID": "shelf-1", "value": 5}));
        assert_eq!(typo.error_kind(), Some(ErrorKind::InvalidInput));
        // An undecodable request has no correlation id to echo
        assert!(typo.correlation_id.is_none());

        let early = submit(&handler, &alice(), "TransferAsset", json!({"assetId": "shelf-1", "buyerOrg": ORG2}));
        assert_eq!(early.error_kind(), Some(ErrorKind::MissingCommitment));

        let stats = handler.stats();
        assert_eq!(stats.committed, 1);
        assert_eq!(stats.rejected, 4);
    }

    #[test]
    fn test_hash_is_visible_across_orgs() {
        init_logging();
        let handler = RequestHandler::new(Arc::new(InMemoryLedger::new()));
        submit(&handler, &alice(), "CreateAsset", json!({"assetId": "shelf-1", "kind": "Bookshelf"}));
        submit(&handler, &alice(), "SetValuation", json!({"assetId": "shelf-1", "value": 500}));

        let hash = submit(
            &handler,
            &bob(),
            "GetValuationHash",
            json!({"org": ORG1, "assetId": "shelf-1"}),
        );
        let expected = hex::encode(content_hash(br#"{"assetId":"shelf-1","value":500}"#));
        assert_eq!(hash.result, Ok(ResponseBody::Hash(Some(expected))));

        let plaintext = submit(&handler, &bob(), "ReadValuation", json!({"assetId": "shelf-1"}));
        assert_eq!(plaintext.result, Ok(ResponseBody::Valuation(None)));
    }
}
