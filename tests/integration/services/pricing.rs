use log_investigator::{
	models::PricingConfig,
	services::pricing::PriceService,
	utils::HttpRetryConfig,
};
use mockito::Server;
use std::time::Duration;

fn service(primary_url: String, fallback_url: String) -> PriceService {
	PriceService::with_retry_config(
		PricingConfig {
			primary_url,
			fallback_url,
			..PricingConfig::default()
		},
		Duration::from_secs(2),
		&HttpRetryConfig::no_retries(),
	)
	.unwrap()
}

#[tokio::test]
async fn test_primary_rate() {
	let mut server = Server::new_async().await;
	let primary = server
		.mock("GET", "/primary/eth.json")
		.with_status(200)
		.with_body(r#"{"date":"2026-10-19","eth":{"usd":2500.25}}"#)
		.create_async()
		.await;
	let fallback = server
		.mock("GET", "/fallback/eth.json")
		.expect(0)
		.create_async()
		.await;

	let rate = service(
		format!("{}/primary/eth.json", server.url()),
		format!("{}/fallback/eth.json", server.url()),
	)
	.fetch_rate()
	.await;

	assert_eq!(rate, Some(2500.25));
	primary.assert_async().await;
	fallback.assert_async().await;
}

#[tokio::test]
async fn test_falls_back_when_primary_fails() {
	let mut server = Server::new_async().await;
	let _primary = server
		.mock("GET", "/primary/eth.json")
		.with_status(503)
		.create_async()
		.await;
	let fallback = server
		.mock("GET", "/fallback/eth.json")
		.with_status(200)
		.with_body(r#"{"eth":{"usd":2400}}"#)
		.create_async()
		.await;

	let rate = service(
		format!("{}/primary/eth.json", server.url()),
		format!("{}/fallback/eth.json", server.url()),
	)
	.fetch_rate()
	.await;

	assert_eq!(rate, Some(2400.0));
	fallback.assert_async().await;
}

#[tokio::test]
async fn test_falls_back_when_primary_lacks_rate() {
	let mut server = Server::new_async().await;
	let _primary = server
		.mock("GET", "/primary/eth.json")
		.with_status(200)
		.with_body(r#"{"eth":{"eur":2200}}"#)
		.create_async()
		.await;
	let _fallback = server
		.mock("GET", "/fallback/eth.json")
		.with_status(200)
		.with_body(r#"{"eth":{"usd":2300.5}}"#)
		.create_async()
		.await;

	let rate = service(
		format!("{}/primary/eth.json", server.url()),
		format!("{}/fallback/eth.json", server.url()),
	)
	.fetch_rate()
	.await;

	assert_eq!(rate, Some(2300.5));
}

#[tokio::test]
async fn test_rate_unavailable_when_both_fail() {
	let mut server = Server::new_async().await;
	let _primary = server
		.mock("GET", "/primary/eth.json")
		.with_status(500)
		.create_async()
		.await;
	let _fallback = server
		.mock("GET", "/fallback/eth.json")
		.with_status(200)
		.with_body("not json")
		.create_async()
		.await;

	let rate = service(
		format!("{}/primary/eth.json", server.url()),
		format!("{}/fallback/eth.json", server.url()),
	)
	.fetch_rate()
	.await;

	assert_eq!(rate, None);
}
