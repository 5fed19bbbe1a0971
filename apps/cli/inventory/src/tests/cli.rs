// Unit tests for argument parsing

use crate::cli::{
    Cli, Command, CustomersCommand, OrderStatusArg, OrdersCommand, ProductsCommand,
    StockStatusArg, parse_order_item,
};

use models::{CustomerPayload, NewProduct, OrderFilters, ProductFilters, StockStatus};

use clap::Parser;

/// **VALUE**: Verifies filter flags reach the model filters.
#[test]
fn given_product_filter_flags_when_parsed_then_filters_populated() {
    let cli = Cli::try_parse_from([
        "inventory",
        "products",
        "list",
        "--cursor",
        "abc",
        "--category",
        "Tools",
        "--stock-status",
        "low-stock",
    ])
    .expect("parse");

    match cli.command {
        Command::Products {
            command: ProductsCommand::List { cursor, filters },
        } => {
            assert_eq!(cursor.as_deref(), Some("abc"));
            assert_eq!(filters.stock_status, Some(StockStatusArg::LowStock));
            let filters = ProductFilters::from(filters);
            assert_eq!(filters.category.as_deref(), Some("Tools"));
            assert_eq!(filters.stock_status, Some(StockStatus::LowStock));
        }
        other => panic!("unexpected command {:?}", other),
    }
}

/// **VALUE**: Verifies order date flags map onto the query parameter fields.
#[test]
fn given_order_date_flags_when_parsed_then_mapped_to_filters() {
    let cli = Cli::try_parse_from([
        "inventory",
        "orders",
        "list",
        "--status",
        "confirmed",
        "--from",
        "2024-01-01",
        "--to",
        "2024-01-31",
    ])
    .expect("parse");

    let Command::Orders {
        command: OrdersCommand::List { filters, .. },
    } = cli.command
    else {
        panic!("expected orders list");
    };
    let filters = OrderFilters::from(filters);

    assert_eq!(
        filters.query_pairs(),
        vec![
            ("status", "CONFIRMED".to_string()),
            ("order_date_from", "2024-01-01".to_string()),
            ("order_date_to", "2024-01-31".to_string()),
        ]
    );
}

/// **VALUE**: Verifies global flags work after the subcommand.
#[test]
fn given_global_flags_after_subcommand_when_parsed_then_applied() {
    let cli = Cli::try_parse_from(["inventory", "status", "--verbose", "--config-dir", "/tmp/x"])
        .expect("parse");

    assert!(cli.verbose);
    assert_eq!(
        cli.config_dir.as_deref(),
        Some(std::path::Path::new("/tmp/x"))
    );
}

/// **VALUE**: Verifies repeated `--item` values are parsed into order lines.
#[test]
fn given_item_flags_when_orders_create_parsed_then_items_collected() {
    let cli = Cli::try_parse_from([
        "inventory",
        "orders",
        "create",
        "--customer",
        "3",
        "--item",
        "4:2:9.99",
        "--item",
        "5:1:12.00",
    ])
    .expect("parse");

    let Command::Orders {
        command: OrdersCommand::Create { customer, items },
    } = cli.command
    else {
        panic!("expected orders create");
    };

    assert_eq!(customer, 3);
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].price, "9.99");
}

/// **VALUE**: Verifies malformed items are rejected with a readable message.
#[test]
fn given_malformed_item_when_parsed_then_error() {
    assert!(parse_order_item("4:2").is_err());
    assert!(parse_order_item("x:2:1.00").is_err());
    assert!(parse_order_item("4:-1:1.00").is_err());
    assert!(parse_order_item("4:2:").is_err());
}

/// **VALUE**: Verifies status values use kebab-case names.
#[test]
fn given_status_argument_when_set_status_parsed_then_enum_value() {
    let cli = Cli::try_parse_from(["inventory", "orders", "set-status", "7", "cancelled"])
        .expect("parse");

    assert!(matches!(
        cli.command,
        Command::Orders {
            command: OrdersCommand::SetStatus {
                id: 7,
                status: OrderStatusArg::Cancelled
            }
        }
    ));
}

/// **VALUE**: Verifies `products create` keeps the SKU next to the shared product fields.
#[test]
fn given_product_create_flags_when_parsed_then_new_product_built() {
    let cli = Cli::try_parse_from([
        "inventory",
        "products",
        "create",
        "--sku",
        "SKU-9",
        "--name",
        "Bolt",
        "--category",
        "Hardware",
        "--cost-price",
        "0.10",
        "--selling-price",
        "0.25",
        "--stock-qty",
        "-2",
    ])
    .expect("parse");

    let Command::Products {
        command: ProductsCommand::Create { sku, fields },
    } = cli.command
    else {
        panic!("expected products create");
    };
    let product: NewProduct = fields.into_new_product(sku);

    assert_eq!(product.sku, "SKU-9");
    assert_eq!(product.stock_qty, -2);
}

/// **VALUE**: Verifies omitted optional customer flags stay empty.
///
/// **WHY THIS MATTERS**: Updates replace the whole record; an omitted phone must be
/// sent as null, not as an empty string the backend would validate.
#[test]
fn given_customer_update_without_optionals_when_parsed_then_payload_has_none() {
    let cli = Cli::try_parse_from([
        "inventory",
        "customers",
        "update",
        "3",
        "--email",
        "jane@example.com",
        "--first-name",
        "Jane",
        "--last-name",
        "Doe",
    ])
    .expect("parse");

    let Command::Customers {
        command: CustomersCommand::Update { id, fields },
    } = cli.command
    else {
        panic!("expected customers update");
    };
    let payload = CustomerPayload::from(fields);

    assert_eq!(id, 3);
    assert_eq!(payload.email, "jane@example.com");
    assert!(payload.phone.is_none());
    assert!(payload.customer_code.is_none());
}
