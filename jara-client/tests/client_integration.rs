// jara-client/tests/client_integration.rs
// Contract tests against a mock backend

use jara_client::{
    ClientConfig, ClientError, DeliveryZoneApi, FeeApi, LocationApi, NetworkErrorKind,
    NetworkHttpClient, OrderApi, PaymentApi, RecentAddressApi, SearchApi,
};
use rust_decimal_macros::dec;
use serde_json::json;
use shared::models::{
    AddressType, BusinessSearchQuery, Coordinates, FeeCalculationRequest, OrderPayload,
    RecentAddress, SaveForLaterRequest, ZoneVerificationRequest,
};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> NetworkHttpClient {
    ClientConfig::new(server.uri())
        .with_timeout(5)
        .with_search_timeout(1)
        .build_http_client()
        .unwrap()
}

fn fee_request() -> FeeCalculationRequest {
    FeeCalculationRequest {
        business_id: "biz-1".into(),
        business_address: "Victoria Island".into(),
        business_coordinates: Coordinates::new(6.4281, 3.4219),
        delivery_address: "12 Marina, Lagos".into(),
        delivery_coordinates: Coordinates::new(6.4500, 3.3900),
        num_packs: 1,
        order_value: dec!(2200),
        local_government_id: "lg-1".into(),
    }
}

#[tokio::test]
async fn test_calculate_fees_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/fees/calculate"))
        .and(body_partial_json(json!({"numPacks": 1, "localGovernmentId": "lg-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {"deliveryFee": 300, "serviceFee": 100}
        })))
        .mount(&server)
        .await;

    let quote = client_for(&server).calculate_fees(&fee_request()).await.unwrap();
    assert_eq!(quote.delivery_fee, dec!(300));
    assert_eq!(quote.service_fee, dec!(100));
}

#[tokio::test]
async fn test_calculate_fees_rejected_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/fees/calculate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "message": "Business does not deliver to this area"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).calculate_fees(&fee_request()).await.unwrap_err();
    assert!(matches!(err, ClientError::Rejected(_)));
    assert_eq!(err.user_message(), "Business does not deliver to this area");
}

#[tokio::test]
async fn test_server_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/save-for-later"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"message": "Vendor is closed"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .save_for_later(
            &SaveForLaterRequest {
                source: "cart".into(),
                vendor_id: "v".into(),
                cart: Default::default(),
            },
            "token",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Http { status: 422, .. }));
    assert_eq!(err.user_message(), "Vendor is closed");
}

#[tokio::test]
async fn test_unmocked_route_reports_status() {
    let server = MockServer::start().await;
    let err = client_for(&server).local_governments().await.unwrap_err();
    assert!(matches!(err, ClientError::Http { status: 404, .. }));
    assert_eq!(err.user_message(), "Server error (404). Please try again later");
}

#[tokio::test]
async fn test_rate_limit_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/delivery-locations/states"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = client_for(&server).states().await.unwrap_err();
    assert_eq!(err.kind(), NetworkErrorKind::RateLimit);
}

#[tokio::test]
async fn test_search_timeout_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/businesses/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"businesses": [], "total": 0}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .search_businesses(&BusinessSearchQuery::text("suya"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), NetworkErrorKind::Timeout);
}

#[tokio::test]
async fn test_connection_refused_is_connectivity() {
    let client = ClientConfig::new("http://127.0.0.1:9")
        .with_timeout(2)
        .build_http_client()
        .unwrap();
    let err = client.states().await.unwrap_err();
    assert_eq!(err.kind(), NetworkErrorKind::Connectivity);
}

#[tokio::test]
async fn test_search_sends_voice_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/businesses/search"))
        .and(query_param("q", "jollof rice"))
        .and(query_param("voiceSearch", "true"))
        .and(query_param("keywords", "jollof,rice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "businesses": [{"id": "b1", "name": "Mama Put"}],
            "total": 1,
            "suggestions": ["jollof"],
            "voiceSearch": {"keywords": ["jollof", "rice", "party"]}
        })))
        .mount(&server)
        .await;

    let query = BusinessSearchQuery {
        q: "jollof rice".into(),
        voice_search: true,
        keywords: vec!["jollof".into(), "rice".into()],
        ..Default::default()
    };
    let resp = client_for(&server).search_businesses(&query).await.unwrap();
    assert_eq!(resp.total, 1);
    assert_eq!(resp.voice_search.unwrap().keywords.len(), 3);
}

#[tokio::test]
async fn test_verify_zone_and_lookup_local_government() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/delivery-zone"))
        .and(body_partial_json(json!({"state": "Lagos", "city": "Lagos Island"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"isDeliverable": false})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/delivery-zone/local-government"))
        .and(query_param("state", "Lagos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "localGovernmentId": "lg-9",
            "localGovernmentName": "Lagos Island",
            "isDeliverable": true
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let verification = client
        .verify_zone(&ZoneVerificationRequest {
            state: "Lagos".into(),
            city: "Lagos Island".into(),
        })
        .await
        .unwrap();
    assert!(!verification.is_deliverable);

    let lookup = client
        .lookup_local_government("12 Marina", "Lagos Island", "Lagos")
        .await
        .unwrap();
    assert_eq!(lookup.local_government_id.as_deref(), Some("lg-9"));
}

#[tokio::test]
async fn test_wallet_balance_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/wallet/balance"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"balance": 500}})))
        .mount(&server)
        .await;

    let balance = client_for(&server).wallet_balance("u1", "secret").await.unwrap();
    assert_eq!(balance, dec!(500));
}

#[tokio::test]
async fn test_recent_addresses_round_trip_the_account() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/recent-addresses"))
        .and(query_param("userId", "u1"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{
            "id": "r1",
            "address": "12 Admiralty Way, Lekki",
            "type": "dropoff",
            "createdAt": 1700000000000i64,
            "coordinates": {"latitude": 6.4433, "longitude": 3.4712}
        }]})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/recent-addresses"))
        .and(body_partial_json(json!({"address": "12 Marina, Lagos", "type": "pickup"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let remote = client.recent_addresses("u1", "secret").await.unwrap();
    assert_eq!(remote.len(), 1);
    assert_eq!(remote[0].address_type, AddressType::Dropoff);
    assert_eq!(remote[0].coordinates, Some(Coordinates::new(6.4433, 3.4712)));

    let entry = RecentAddress {
        id: "r2".into(),
        address: "12 Marina, Lagos".into(),
        address_type: AddressType::Pickup,
        created_at: 1700000000001,
        state: Some("Lagos".into()),
        local_government: None,
        locality: None,
        coordinates: None,
    };
    client.save_recent_address(&entry, "secret").await.unwrap();
}

#[tokio::test]
async fn test_unauthorized_maps_to_variant() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/wallet/balance"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client_for(&server).wallet_balance("u1", "expired").await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
}

#[tokio::test]
async fn test_order_details_wrapped_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders/ord-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"order": {"id": "ord-7", "total": 2380, "transactionRef": "order_1_2"}}
        })))
        .mount(&server)
        .await;

    let order = client_for(&server).order_details("ord-7", "t").await.unwrap();
    assert_eq!(order.total, dec!(2380));
    assert_eq!(order.transaction_ref.as_deref(), Some("order_1_2"));
}

#[tokio::test]
async fn test_create_order_without_id_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Out of stock", "data": null})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_order(&sample_payload(), "t")
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Out of stock");
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/wallet/balance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"balance": 500})))
        .mount(&server)
        .await;

    let err = client_for(&server).wallet_balance("u1", "t").await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}

fn sample_payload() -> OrderPayload {
    use shared::models::{
        Customer, OrderAddress, OrderBusiness, OrderFees, OrderPayment, PaymentMethod,
        PaymentStatus,
    };
    OrderPayload {
        user: Customer {
            id: "u1".into(),
            email: "ada@example.com".into(),
            name: None,
            phone: None,
        },
        business: OrderBusiness {
            id: "b1".into(),
            name: "Mama Put".into(),
        },
        items: vec![],
        delivery_address: OrderAddress {
            address: "12 Marina".into(),
            state: "Lagos".into(),
            local_government: "Lagos Island".into(),
            locality: String::new(),
            local_government_id: "lg-1".into(),
            coordinates: None,
        },
        fees: OrderFees {
            subtotal: dec!(0),
            discount: dec!(0),
            delivery_fee: dec!(0),
            service_fee: dec!(0),
            brown_bag_quantity: 0,
            total: dec!(0),
        },
        payment: OrderPayment {
            method: PaymentMethod::CashOnDelivery,
            status: PaymentStatus::Pending,
            transaction_ref: None,
            amount: dec!(0),
        },
        delivery_instructions: None,
        vendor_instructions: None,
        promo_codes: vec![],
    }
}
