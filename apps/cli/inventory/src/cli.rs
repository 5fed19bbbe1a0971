//! Command-line surface.

use models::{
    CustomerPayload, NewOrderItem, NewProduct, OrderFilters, OrderStatus, ProductFilters,
    ProductUpdate, StockStatus,
};

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "inventory")]
#[command(about = "Command-line client for the inventory backend")]
#[command(version)]
pub struct Cli {
    /// Directory holding client.toml
    #[arg(short = 'c', long, global = true, env = "INVENTORY_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Directory for inventory.log
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store credentials
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "INVENTORY_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Revoke the session and forget stored credentials
    Logout,

    /// Show whether credentials are stored
    Status,

    Customers {
        #[command(subcommand)]
        command: CustomersCommand,
    },

    Products {
        #[command(subcommand)]
        command: ProductsCommand,
    },

    Orders {
        #[command(subcommand)]
        command: OrdersCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum CustomersCommand {
    List {
        /// Cursor from a previous page's next_cursor
        #[arg(long)]
        cursor: Option<String>,
    },
    Show {
        id: u64,
    },
    Create {
        #[command(flatten)]
        fields: CustomerArgs,
    },
    /// Replace a customer; omitted optional fields are cleared
    Update {
        id: u64,

        #[command(flatten)]
        fields: CustomerArgs,
    },
    Delete {
        id: u64,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    List {
        #[arg(long)]
        cursor: Option<String>,

        #[command(flatten)]
        filters: ProductFilterArgs,
    },
    Show {
        id: u64,
    },
    Create {
        /// Stock keeping unit; cannot be changed later
        #[arg(long)]
        sku: String,

        #[command(flatten)]
        fields: ProductArgs,
    },
    Update {
        id: u64,

        #[command(flatten)]
        fields: ProductArgs,
    },
    Delete {
        id: u64,
    },
}

#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
    List {
        #[arg(long)]
        cursor: Option<String>,

        #[command(flatten)]
        filters: OrderFilterArgs,
    },
    Show {
        id: u64,
    },
    /// Create an order from `product_id:quantity:price` items
    Create {
        #[arg(long)]
        customer: u64,

        #[arg(long = "item", value_parser = parse_order_item)]
        items: Vec<NewOrderItem>,
    },
    SetStatus {
        id: u64,

        #[arg(value_enum)]
        status: OrderStatusArg,
    },
    Delete {
        id: u64,
    },
    /// Customers and products available for a new order
    FormData,
}

#[derive(Debug, Clone, Args)]
pub struct CustomerArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    #[arg(long)]
    pub code: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub opening_balance: Option<String>,
}

impl From<CustomerArgs> for CustomerPayload {
    fn from(args: CustomerArgs) -> Self {
        CustomerPayload {
            email: args.email,
            customer_code: args.code,
            first_name: args.first_name,
            last_name: args.last_name,
            phone: args.phone,
            address: args.address,
            opening_balance: args.opening_balance,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ProductArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub category: String,

    #[arg(long)]
    pub cost_price: String,

    #[arg(long)]
    pub selling_price: String,

    #[arg(long, allow_negative_numbers = true)]
    pub stock_qty: i64,
}

impl ProductArgs {
    pub fn into_new_product(self, sku: String) -> NewProduct {
        NewProduct {
            sku,
            name: self.name,
            category: self.category,
            cost_price: self.cost_price,
            selling_price: self.selling_price,
            stock_qty: self.stock_qty,
        }
    }
}

impl From<ProductArgs> for ProductUpdate {
    fn from(args: ProductArgs) -> Self {
        ProductUpdate {
            name: args.name,
            category: args.category,
            cost_price: args.cost_price,
            selling_price: args.selling_price,
            stock_qty: args.stock_qty,
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct ProductFilterArgs {
    #[arg(long)]
    pub search: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long, value_enum)]
    pub stock_status: Option<StockStatusArg>,

    #[arg(long)]
    pub min_price: Option<String>,

    #[arg(long)]
    pub max_price: Option<String>,
}

impl From<ProductFilterArgs> for ProductFilters {
    fn from(args: ProductFilterArgs) -> Self {
        ProductFilters {
            search: args.search,
            category: args.category,
            stock_status: args.stock_status.map(StockStatus::from),
            min_price: args.min_price,
            max_price: args.max_price,
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct OrderFilterArgs {
    #[arg(long)]
    pub search: Option<String>,

    #[arg(long, value_enum)]
    pub status: Option<OrderStatusArg>,

    #[arg(long)]
    pub customer_id: Option<u64>,

    /// Earliest order date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Latest order date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    #[arg(long)]
    pub min_amount: Option<String>,

    #[arg(long)]
    pub max_amount: Option<String>,
}

impl From<OrderFilterArgs> for OrderFilters {
    fn from(args: OrderFilterArgs) -> Self {
        OrderFilters {
            search: args.search,
            status: args.status.map(OrderStatus::from),
            customer_id: args.customer_id,
            order_date_from: args.from,
            order_date_to: args.to,
            min_amount: args.min_amount,
            max_amount: args.max_amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StockStatusArg {
    InStock,
    LowStock,
    OutOfStock,
}

impl From<StockStatusArg> for StockStatus {
    fn from(arg: StockStatusArg) -> Self {
        match arg {
            StockStatusArg::InStock => StockStatus::InStock,
            StockStatusArg::LowStock => StockStatus::LowStock,
            StockStatusArg::OutOfStock => StockStatus::OutOfStock,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderStatusArg {
    Pending,
    Confirmed,
    Cancelled,
}

impl From<OrderStatusArg> for OrderStatus {
    fn from(arg: OrderStatusArg) -> Self {
        match arg {
            OrderStatusArg::Pending => OrderStatus::Pending,
            OrderStatusArg::Confirmed => OrderStatus::Confirmed,
            OrderStatusArg::Cancelled => OrderStatus::Cancelled,
        }
    }
}

/// `product_id:quantity:price`, e.g. `4:2:9.99`.
pub fn parse_order_item(value: &str) -> Result<NewOrderItem, String> {
    let mut parts = value.splitn(3, ':');
    let (Some(product), Some(quantity), Some(price)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(format!(
            "expected product_id:quantity:price, got '{}'",
            value
        ));
    };

    let product_id = product
        .parse::<u64>()
        .map_err(|e| format!("invalid product id '{}': {}", product, e))?;
    let quantity = quantity
        .parse::<u32>()
        .map_err(|e| format!("invalid quantity '{}': {}", quantity, e))?;

    if price.is_empty() {
        return Err("price cannot be empty".to_string());
    }

    Ok(NewOrderItem {
        product_id,
        quantity,
        price: price.to_string(),
    })
}
