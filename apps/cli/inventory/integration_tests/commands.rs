//! End-to-end command runs against a mocked backend and a temporary token file.

use inventory::cli::{Cli, Command, CustomersCommand, OrderFilterArgs, OrdersCommand};
use inventory::commands::execute;
use inventory::error::{EXIT_LOGIN_REQUIRED, InventoryError};
use inventory::state::AppState;

use client_core::ClientConfig;

use clap::Parser;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn state_for(server: &MockServer, dir: &TempDir) -> AppState {
    let mut config = ClientConfig::default();
    config.api.base_url = server.uri();
    config.storage.token_file = Some(dir.path().join("tokens.json"));
    AppState::from_config(config).expect("state")
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access": "a1", "refresh": "r1"})),
        )
        .expect(1)
        .mount(server)
        .await;
}

/// **VALUE**: Verifies a login in one invocation authenticates the next one.
///
/// **WHY THIS MATTERS**: Every CLI command is a separate process; the token file
/// is the only link between them.
///
/// **BUG THIS CATCHES**: Would catch AppState building a client over a store that
/// is not the configured token file.
#[tokio::test]
async fn given_login_when_next_invocation_lists_orders_then_bearer_sent() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("tempdir");
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/orders/"))
        .and(header("authorization", "Bearer a1"))
        .and(query_param("status", "PENDING"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "id": 1,
                "order_number": "ORD-0001",
                "customer": 3,
                "order_date": "2024-03-01",
                "status": "PENDING",
                "total_amount": 19.98
            }],
            "next": "/api/v1/orders/?cursor=bmV4dA%3D%3D&status=PENDING",
            "previous": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let login = execute(
        &state_for(&server, &dir),
        Command::Login {
            email: "admin@example.com".to_string(),
            password: "secret".to_string(),
        },
    )
    .await
    .expect("login");
    assert_eq!(login["authenticated"], true);

    let output = execute(
        &state_for(&server, &dir),
        Command::Orders {
            command: OrdersCommand::List {
                cursor: None,
                filters: OrderFilterArgs {
                    status: Some(inventory::cli::OrderStatusArg::Pending),
                    ..Default::default()
                },
            },
        },
    )
    .await
    .expect("orders");

    assert_eq!(output["results"][0]["order_number"], "ORD-0001");
    assert_eq!(output["results"][0]["total_amount"], "19.98");
    assert_eq!(output["next_cursor"], "bmV4dA==");
}

/// **VALUE**: Verifies commands refuse to run without stored credentials.
#[tokio::test]
async fn given_no_credentials_when_listing_customers_then_login_required_without_request() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("tempdir");
    Mock::given(method("GET"))
        .and(path("/api/v1/customers/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let error = execute(
        &state_for(&server, &dir),
        Command::Customers {
            command: CustomersCommand::List { cursor: None },
        },
    )
    .await
    .expect_err("not logged in");

    assert_eq!(error.exit_code(), EXIT_LOGIN_REQUIRED);
}

/// **VALUE**: Verifies a revoked session clears the token file and exits with
/// the login-required status.
///
/// **BUG THIS CATCHES**: Would catch stale tokens left on disk after the refresh
/// token was rejected, which would make every later command fail the same way.
#[tokio::test]
async fn given_revoked_session_when_command_runs_then_tokens_removed_and_login_required() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("tempdir");
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/customers/5/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Token is invalid"})))
        .expect(1)
        .mount(&server)
        .await;
    let state = state_for(&server, &dir);
    execute(
        &state,
        Command::Login {
            email: "admin@example.com".to_string(),
            password: "secret".to_string(),
        },
    )
    .await
    .expect("login");

    let error = execute(
        &state,
        Command::Customers {
            command: CustomersCommand::Show { id: 5 },
        },
    )
    .await
    .expect_err("session revoked");

    assert!(matches!(error, InventoryError::LoginRequired { .. }));
    assert!(!dir.path().join("tokens.json").exists());
}

/// **VALUE**: Verifies logout output and that the token file is removed even
/// when the server rejects the revocation.
#[tokio::test]
async fn given_failing_logout_endpoint_when_logout_then_local_session_removed() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("tempdir");
    mount_login(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/logout/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    let state = state_for(&server, &dir);
    execute(
        &state,
        Command::Login {
            email: "admin@example.com".to_string(),
            password: "secret".to_string(),
        },
    )
    .await
    .expect("login");

    let output = execute(&state, Command::Logout).await.expect("logout");

    assert_eq!(output["logged_out"], true);
    assert_eq!(output["server_acknowledged"], false);
    let status = execute(&state, Command::Status).await.expect("status");
    assert_eq!(status["authenticated"], false);
}

/// **VALUE**: Verifies an order without items is refused before contacting the server.
#[tokio::test]
async fn given_order_without_items_when_create_then_validation_message() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("tempdir");
    mount_login(&server).await;
    let state = state_for(&server, &dir);
    execute(
        &state,
        Command::Login {
            email: "admin@example.com".to_string(),
            password: "secret".to_string(),
        },
    )
    .await
    .expect("login");

    let error = execute(
        &state,
        Command::Orders {
            command: OrdersCommand::Create {
                customer: 3,
                items: Vec::new(),
            },
        },
    )
    .await
    .expect_err("no items");

    assert_eq!(error.user_message(), "Please add at least one item");
}

/// **VALUE**: Verifies `products update` flags become the PUT body without the SKU.
///
/// **BUG THIS CATCHES**: Would catch the SKU leaking into updates, which the backend
/// rejects because it is only settable on creation.
#[tokio::test]
async fn given_product_update_flags_when_executed_then_put_body_sent() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("tempdir");
    mount_login(&server).await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/products/4/"))
        .and(header("authorization", "Bearer a1"))
        .and(body_json(json!({
            "name": "Claw Hammer",
            "category": "Tools",
            "cost_price": "5.00",
            "selling_price": "9.99",
            "stock_qty": 8
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 4,
            "sku": "SKU-4",
            "name": "Claw Hammer",
            "category": "Tools",
            "cost_price": "5.00",
            "selling_price": "9.99",
            "stock_qty": 8,
            "stock_status": "IN_STOCK"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let state = state_for(&server, &dir);
    execute(
        &state,
        Command::Login {
            email: "admin@example.com".to_string(),
            password: "secret".to_string(),
        },
    )
    .await
    .expect("login");
    let cli = Cli::try_parse_from([
        "inventory",
        "products",
        "update",
        "4",
        "--name",
        "Claw Hammer",
        "--category",
        "Tools",
        "--cost-price",
        "5.00",
        "--selling-price",
        "9.99",
        "--stock-qty",
        "8",
    ])
    .expect("parse");

    let output = execute(&state, cli.command).await.expect("update");

    assert_eq!(output["name"], "Claw Hammer");
}

/// **VALUE**: Verifies a rejected customer create reports the server's field message.
#[tokio::test]
async fn given_duplicate_email_when_customer_create_then_field_message() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("tempdir");
    mount_login(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/customers/"))
        .and(body_json(json!({
            "email": "jane@example.com",
            "customer_code": null,
            "first_name": "Jane",
            "last_name": "Doe",
            "phone": "555-0100",
            "address": null,
            "opening_balance": null
        })))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"email": ["customer with this email already exists."]})),
        )
        .expect(1)
        .mount(&server)
        .await;
    let state = state_for(&server, &dir);
    execute(
        &state,
        Command::Login {
            email: "admin@example.com".to_string(),
            password: "secret".to_string(),
        },
    )
    .await
    .expect("login");
    let cli = Cli::try_parse_from([
        "inventory",
        "customers",
        "create",
        "--email",
        "jane@example.com",
        "--first-name",
        "Jane",
        "--last-name",
        "Doe",
        "--phone",
        "555-0100",
    ])
    .expect("parse");

    let error = execute(&state, cli.command).await.expect_err("duplicate");

    assert_eq!(
        error.user_message(),
        "Email: customer with this email already exists."
    );
}
