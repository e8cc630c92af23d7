use crate::integration::mocks::hearted_schema;
use alloy::primitives::{Address, B256, U256};
use log_investigator::{
	models::{BlockRange, EventArg},
	services::blockchain::{
		BlockChainError, EvmClient, EvmClientTrait, HttpTransportClient, LogQuery,
	},
};
use mockito::{Matcher, Server};
use serde_json::json;
use std::time::Duration;

fn client(url: &str) -> EvmClient<HttpTransportClient> {
	EvmClient::new(url, Duration::from_secs(2), Duration::from_secs(2)).unwrap()
}

fn query(contract: Address) -> LogQuery {
	LogQuery {
		contract,
		schema: hearted_schema(),
		range: BlockRange::new(100, 599).unwrap(),
	}
}

fn raw_hearted_log(
	contract: Address,
	topic0: B256,
	hearter: Address,
	amount: u64,
) -> serde_json::Value {
	json!({
		"address": format!("{:#x}", contract),
		"topics": [
			format!("{:#x}", topic0),
			format!("{:#x}", hearter.into_word()),
			format!("{:#x}", B256::from(U256::from(7u64))),
		],
		"data": format!("0x{:064x}", amount),
		"blockNumber": "0x1f4",
		"transactionHash": format!("{:#x}", B256::repeat_byte(0xaa)),
		"transactionIndex": "0x0",
		"blockHash": format!("{:#x}", B256::repeat_byte(0xbb)),
		"logIndex": "0x3",
		"removed": false
	})
}

#[tokio::test]
async fn test_get_latest_block_number() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("POST", "/")
		.match_body(Matcher::PartialJson(json!({"method": "eth_blockNumber"})))
		.with_status(200)
		.with_body(r#"{"jsonrpc":"2.0","id":1,"result":"0x1a2b"}"#)
		.create_async()
		.await;

	let head = client(&server.url()).get_latest_block_number().await.unwrap();

	assert_eq!(head, 0x1a2b);
	mock.assert_async().await;
}

#[tokio::test]
async fn test_get_logs_sends_filter_and_decodes() {
	let mut server = Server::new_async().await;
	let contract = Address::repeat_byte(0x82);
	let hearter = Address::repeat_byte(0x11);
	let query = query(contract);
	let topic0 = query.schema.topic0();

	let mock = server
		.mock("POST", "/")
		.match_body(Matcher::PartialJson(json!({
			"method": "eth_getLogs",
			"params": [{
				"address": format!("{:#x}", contract),
				"topics": [format!("{:#x}", topic0)],
				"fromBlock": "0x64",
				"toBlock": "0x257"
			}]
		})))
		.with_status(200)
		.with_body(
			json!({
				"jsonrpc": "2.0",
				"id": 1,
				"result": [raw_hearted_log(contract, topic0, hearter, 250)]
			})
			.to_string(),
		)
		.create_async()
		.await;

	let logs = client(&server.url()).get_logs(&query).await.unwrap();

	assert_eq!(logs.len(), 1);
	let log = &logs[0];
	assert_eq!(log.event, "Hearted");
	assert_eq!(log.block_number, Some(500));
	assert_eq!(log.log_index, Some(3));
	assert_eq!(log.address_arg("hearter"), Some(hearter));
	assert_eq!(log.uint_arg("amount"), Some(U256::from(250u64)));
	assert_eq!(log.args.get("memeNonce"), Some(&EventArg::Uint(U256::from(7u64))));
	mock.assert_async().await;
}

#[tokio::test]
async fn test_get_logs_empty_result() {
	let mut server = Server::new_async().await;
	let _mock = server
		.mock("POST", "/")
		.with_status(200)
		.with_body(r#"{"jsonrpc":"2.0","id":1,"result":[]}"#)
		.create_async()
		.await;

	let logs = client(&server.url())
		.get_logs(&query(Address::repeat_byte(0x82)))
		.await
		.unwrap();
	assert!(logs.is_empty());
}

#[tokio::test]
async fn test_get_logs_http_429_is_rate_limited() {
	let mut server = Server::new_async().await;
	let _mock = server
		.mock("POST", "/")
		.with_status(429)
		.with_body("Too Many Requests")
		.create_async()
		.await;

	let err = client(&server.url())
		.get_logs(&query(Address::repeat_byte(0x82)))
		.await
		.unwrap_err();
	assert!(err.is_rate_limited());
}

#[tokio::test]
async fn test_get_logs_rpc_rate_limit_error() {
	let mut server = Server::new_async().await;
	let _mock = server
		.mock("POST", "/")
		.with_status(200)
		.with_body(
			r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32005,"message":"limit exceeded"}}"#,
		)
		.create_async()
		.await;

	let err = client(&server.url())
		.get_logs(&query(Address::repeat_byte(0x82)))
		.await
		.unwrap_err();
	assert!(err.is_rate_limited());
}

#[tokio::test]
async fn test_get_logs_rpc_error_is_request_error() {
	let mut server = Server::new_async().await;
	let _mock = server
		.mock("POST", "/")
		.with_status(200)
		.with_body(r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32602,"message":"invalid params"}}"#)
		.create_async()
		.await;

	let err = client(&server.url())
		.get_logs(&query(Address::repeat_byte(0x82)))
		.await
		.unwrap_err();
	assert!(matches!(err, BlockChainError::RequestError(_)));
}

#[tokio::test]
async fn test_get_logs_foreign_topic_is_malformed() {
	let mut server = Server::new_async().await;
	let contract = Address::repeat_byte(0x82);
	let foreign = raw_hearted_log(contract, B256::repeat_byte(0x01), Address::ZERO, 1);
	let _mock = server
		.mock("POST", "/")
		.with_status(200)
		.with_body(json!({"jsonrpc": "2.0", "id": 1, "result": [foreign]}).to_string())
		.create_async()
		.await;

	let err = client(&server.url()).get_logs(&query(contract)).await.unwrap_err();
	assert!(matches!(err, BlockChainError::MalformedResponse(_)));
}

#[test]
fn test_new_rejects_invalid_url() {
	let result = EvmClient::new(
		"ftp://rpc.example.com",
		Duration::from_secs(1),
		Duration::from_secs(1),
	);
	assert!(matches!(result, Err(BlockChainError::InternalError(_))));
}
