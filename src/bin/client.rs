use std::env;
use clap::{Args, Parser, Subcommand};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::Value;

/// Staff CLI for the order desk
#[derive(Parser, Debug)]
#[command(name = "order-desk")]
#[command(about = "client cli used by restaurant staffs to take orders and manage tables", version, long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser, Debug)]
enum Commands {
    /// table related ops
    #[command(arg_required_else_help = true)]
    Table(TableArgs),
    /// order related ops
    #[command(arg_required_else_help = true)]
    Order(OrderArgs),
    /// show the menu
    Menu,
    /// open orders per status and revenue
    Report,
}

#[derive(Debug, Args)]
struct TableArgs {
    #[command(subcommand)]
    command: TableCmds,
}

#[derive(Debug, Subcommand)]
enum TableCmds {
    List,
    /// add a table, 4 seats in the center unless told otherwise
    Add {
        #[arg(long, default_value_t = 4)]
        capacity: u8,
        #[arg(long, default_value = "center", value_parser = ["window", "center", "corner", "outdoor"])]
        location: String,
    },
    /// seat guests at a free table
    #[command(arg_required_else_help = true)]
    Seat {
        id: u16,
        #[arg(short = 'g', long, value_parser = clap::value_parser!(u8).range(1..))]
        guests: u8,
    },
    #[command(arg_required_else_help = true)]
    Clear { id: u16 },
}

#[derive(Debug, Args)]
struct OrderArgs {
    #[command(subcommand)]
    command: OrderCmds,
}

#[derive(Debug, Subcommand)]
enum OrderCmds {
    #[command(arg_required_else_help = true)]
    Create {
        #[arg(short = 't', long, help = "Table to order for.")]
        table: u16,
        #[arg(long, help = "Items as MENU_ITEM_ID:QUANTITY.", value_name = "ITEM", num_args = 1.., value_parser = parse_line)]
        items: Vec<(String, u32)>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        server: Option<String>,
    },
    #[command(arg_required_else_help = true)]
    Show { id: u64 },
    List {
        #[arg(long, value_parser = ["pending", "preparing", "ready", "delivered"])]
        status: Option<String>,
        #[arg(short = 't', long)]
        table: Option<u16>,
    },
    /// move an order to its next status
    #[command(arg_required_else_help = true)]
    Advance { id: u64 },
    #[command(arg_required_else_help = true)]
    AddItem {
        id: u64,
        #[arg(value_parser = parse_line, value_name = "MENU_ITEM_ID:QUANTITY")]
        item: (String, u32),
        #[arg(long, help = "Special instructions for the kitchen.")]
        note: Option<String>,
    },
    #[command(arg_required_else_help = true)]
    Settle { id: u64 },
}

const DEFAULT_HOST: &str = "http://localhost:8080";

#[derive(Debug, Deserialize)]
struct OrderResponse {
    order: OrderView,
}

#[derive(Debug, Deserialize)]
struct OrderView {
    id: u64,
    table_id: u16,
    status: String,
    total: u64,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

fn parse_line(s: &str) -> Result<(String, u32), String> {
    let (id, quantity) = s.split_once(':').unwrap_or((s, "1"));
    let quantity = quantity
        .parse()
        .map_err(|_| format!("invalid quantity in {s}"))?;
    Ok((id.to_string(), quantity))
}

fn lines(items: Vec<(String, u32)>) -> Vec<Value> {
    items
        .into_iter()
        .map(|(id, quantity)| serde_json::json!({"menu_item_id": id, "quantity": quantity}))
        .collect()
}

/// Sends the request and prints the order it returns, or the server's complaint.
async fn order_call(req: RequestBuilder, action: &str) -> Result<(), anyhow::Error> {
    let res = req.send().await?;
    match res.status() {
        StatusCode::OK | StatusCode::CREATED => {
            let OrderResponse { order } = res.json().await?;
            println!("order #{} {} | table {} | {} | total {}", order.id, action, order.table_id, order.status, order.total);
        }
        StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND | StatusCode::CONFLICT => {
            let err = res.json::<ErrorResponse>().await?;
            println!("{}", err.message);
        }
        unexpected => {
            println!("got unexpected status code, {}", unexpected);
        }
    }
    Ok(())
}

async fn print_json(req: RequestBuilder) -> Result<(), anyhow::Error> {
    let res = req.send().await?;
    match res.status() {
        StatusCode::OK | StatusCode::CREATED => {
            let body = res.json::<Value>().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND | StatusCode::CONFLICT => {
            let err = res.json::<ErrorResponse>().await?;
            println!("{}", err.message);
        }
        unexpected => {
            println!("got unexpected status code, {}", unexpected);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Cli::parse();
    let host = env::var("ORDER_DESK_HOST").unwrap_or(DEFAULT_HOST.to_string());
    let client = Client::new();

    match args.command {
        Commands::Table(table) => match table.command {
            TableCmds::List => print_json(client.get(format!("{}/v1/tables", host))).await?,
            TableCmds::Add { capacity, location } => {
                print_json(
                    client
                        .post(format!("{}/v1/tables", host))
                        .json(&serde_json::json!({"capacity": capacity, "location": location})),
                )
                .await?
            }
            TableCmds::Seat { id, guests } => {
                let res = client
                    .patch(format!("{}/v1/table/{}", host, id))
                    .json(&serde_json::json!({"customer_count": guests}))
                    .send()
                    .await?;
                match res.status() {
                    StatusCode::OK => println!("table {} seated with {} guests", id, guests),
                    StatusCode::BAD_REQUEST => {
                        println!("table {} is already taken, please guide the customers to other tables", id)
                    }
                    StatusCode::NOT_FOUND => println!("table {} does not exist", id),
                    unexpected => println!("got unexpected status code, {}", unexpected),
                }
            }
            TableCmds::Clear { id } => {
                let res = client.post(format!("{}/v1/table/{}/clear", host, id)).send().await?;
                match res.status() {
                    StatusCode::OK => println!("table {} has been cleared", id),
                    StatusCode::NOT_FOUND => println!("table {} does not exist", id),
                    unexpected => println!("got unexpected status code, {}", unexpected),
                }
            }
        },
        Commands::Order(order) => match order.command {
            OrderCmds::Create { table, items, notes, server } => {
                let body = serde_json::json!({
                    "table_id": table,
                    "items": lines(items),
                    "notes": notes,
                    "server_name": server,
                });
                order_call(client.post(format!("{}/v1/orders", host)).json(&body), "created").await?
            }
            OrderCmds::Show { id } => order_call(client.get(format!("{}/v1/order/{}", host, id)), "found").await?,
            OrderCmds::List { status, table } => {
                let mut query = Vec::new();
                if let Some(status) = status {
                    query.push(("status", status));
                }
                if let Some(table) = table {
                    query.push(("table_id", table.to_string()));
                }
                print_json(client.get(format!("{}/v1/orders", host)).query(&query)).await?
            }
            OrderCmds::Advance { id } => {
                order_call(client.post(format!("{}/v1/order/{}/advance", host, id)), "advanced").await?
            }
            OrderCmds::AddItem { id, item: (menu_item_id, quantity), note } => {
                let body = serde_json::json!({
                    "menu_item_id": menu_item_id,
                    "quantity": quantity,
                    "special_instructions": note,
                });
                order_call(client.post(format!("{}/v1/order/{}/items", host, id)).json(&body), "updated").await?
            }
            OrderCmds::Settle { id } => {
                order_call(client.post(format!("{}/v1/order/{}/settle", host, id)), "settled").await?
            }
        },
        Commands::Menu => print_json(client.get(format!("{}/v1/menu", host))).await?,
        Commands::Report => print_json(client.get(format!("{}/v1/reports/summary", host))).await?,
    };
    Ok(())
}
