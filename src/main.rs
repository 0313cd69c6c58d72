use std::{path::PathBuf, process::ExitCode};

use clap::{Args, Parser, Subcommand};
use fractic_invoice::{
    config::{InvoicingConfig, DEFAULT_CONFIG_PATH},
    entities::{
        ClientDraft, ClientId, FooterMessageId, Invoice, InvoiceDraft, InvoiceId,
        InvoiceItemDraft, SenderDraft, SenderId,
    },
    errors::WriteError,
    ext::sample_data::seed_sample_invoice,
    util::InvoicingUtil,
};
use fractic_server_error::{CriticalError, ServerError};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Keep track of senders, clients and invoices, and render invoices as PDF.
#[derive(Parser, Debug)]
#[command(name = "fractic-invoice")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the RON configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Path to the SQLite database (overrides the config file)
    #[arg(long)]
    database: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage invoice-issuing parties
    #[command(subcommand)]
    Sender(SenderCommands),

    /// Manage invoice recipients
    #[command(subcommand)]
    Client(ClientCommands),

    /// Manage reusable footer notes
    #[command(subcommand)]
    Footer(FooterCommands),

    /// Manage invoices and their items
    #[command(subcommand)]
    Invoice(InvoiceCommands),

    /// Seed sample records and render the sample invoice
    Demo {
        /// Output PDF path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct SenderFields {
    name: String,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
}

#[derive(Args, Debug)]
struct ClientFields {
    name: String,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    email: Option<String>,
}

#[derive(Args, Debug)]
struct InvoiceFields {
    #[arg(long)]
    sender: i64,
    #[arg(long)]
    client: i64,
    #[arg(long)]
    footer: Option<i64>,
    #[arg(long)]
    paid: bool,
}

/// Fields left out keep their stored value.
#[derive(Args, Debug)]
struct InvoiceUpdateFields {
    #[arg(long)]
    sender: Option<i64>,
    #[arg(long)]
    client: Option<i64>,
    #[arg(long, conflicts_with = "no_footer")]
    footer: Option<i64>,
    /// Detach the footer message
    #[arg(long)]
    no_footer: bool,
    /// Paid status (true or false)
    #[arg(long)]
    paid: Option<bool>,
}

#[derive(Subcommand, Debug)]
enum SenderCommands {
    /// Create a sender
    Add(SenderFields),
    /// List senders
    #[command(alias = "ls")]
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show one sender
    Show { id: i64 },
    /// Replace a sender's fields
    Update {
        id: i64,
        #[command(flatten)]
        fields: SenderFields,
    },
}

#[derive(Subcommand, Debug)]
enum ClientCommands {
    /// Create a client
    Add(ClientFields),
    /// List clients
    #[command(alias = "ls")]
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show one client
    Show { id: i64 },
    /// Replace a client's fields
    Update {
        id: i64,
        #[command(flatten)]
        fields: ClientFields,
    },
}

#[derive(Subcommand, Debug)]
enum FooterCommands {
    /// Create a footer message
    Add { message: String },
    /// List footer messages
    #[command(alias = "ls")]
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show one footer message
    Show { id: i64 },
    /// Replace a footer message
    Update { id: i64, message: String },
}

#[derive(Subcommand, Debug)]
enum InvoiceCommands {
    /// Create an invoice
    Create(InvoiceFields),
    /// List invoices, newest first
    #[command(alias = "ls")]
    List {
        #[arg(long)]
        json: bool,
    },
    /// Print an invoice to the terminal
    Show { id: i64 },
    /// Re-point an invoice at other records or change its paid status
    Update {
        id: i64,
        #[command(flatten)]
        fields: InvoiceUpdateFields,
    },
    /// Mark an invoice as paid (or unpaid with --unpaid)
    Paid {
        id: i64,
        #[arg(long)]
        unpaid: bool,
    },
    /// Add a line item to an invoice
    AddItem {
        id: i64,
        name: String,
        quantity: f64,
        unit_cost: f64,
    },
    /// Render an invoice as PDF
    Pdf {
        id: i64,
        /// Output PDF path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write every invoice with its total to a CSV file
    Export { file: PathBuf },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), ServerError> {
    let mut config = InvoicingConfig::load_or_default(&cli.config)?;
    if let Some(database) = cli.database {
        config.database_path = database;
    }
    let util = InvoicingUtil::open(&config)?;

    match cli.command {
        Commands::Sender(command) => sender(&util, command).await,
        Commands::Client(command) => client(&util, command).await,
        Commands::Footer(command) => footer(&util, command).await,
        Commands::Invoice(command) => invoice(&util, command).await,
        Commands::Demo { output } => {
            let id = seed_sample_invoice(&util).await?;
            let path = util.generate_invoice_pdf(id, output).await?;
            println!("Created invoice #{id}, written to {}", path.display());
            Ok(())
        }
    }
}

async fn sender(util: &InvoicingUtil, command: SenderCommands) -> Result<(), ServerError> {
    match command {
        SenderCommands::Add(fields) => {
            let id = util.create_sender(fields.into()).await?;
            println!("Created sender #{id}");
        }
        SenderCommands::List { json } => {
            let senders = util.list_senders().await?;
            if json {
                print_json(&senders)?;
            } else {
                for s in senders {
                    println!("{:>4}  {}", s.id.0, s.name);
                }
            }
        }
        SenderCommands::Show { id } => {
            let s = util.get_sender(SenderId(id)).await?;
            println!("Sender #{}", s.id);
            println!("Name:    {}", s.name);
            print_optional("Address", s.address.as_deref());
            print_optional("Email", s.email.as_deref());
            print_optional("Phone", s.phone.as_deref());
        }
        SenderCommands::Update { id, fields } => {
            util.update_sender(SenderId(id), fields.into()).await?;
            println!("Updated sender #{id}");
        }
    }
    Ok(())
}

async fn client(util: &InvoicingUtil, command: ClientCommands) -> Result<(), ServerError> {
    match command {
        ClientCommands::Add(fields) => {
            let id = util.create_client(fields.into()).await?;
            println!("Created client #{id}");
        }
        ClientCommands::List { json } => {
            let clients = util.list_clients().await?;
            if json {
                print_json(&clients)?;
            } else {
                for c in clients {
                    println!("{:>4}  {}", c.id.0, c.name);
                }
            }
        }
        ClientCommands::Show { id } => {
            let c = util.get_client(ClientId(id)).await?;
            println!("Client #{}", c.id);
            println!("Name:    {}", c.name);
            print_optional("Address", c.address.as_deref());
            print_optional("Email", c.email.as_deref());
        }
        ClientCommands::Update { id, fields } => {
            util.update_client(ClientId(id), fields.into()).await?;
            println!("Updated client #{id}");
        }
    }
    Ok(())
}

async fn footer(util: &InvoicingUtil, command: FooterCommands) -> Result<(), ServerError> {
    match command {
        FooterCommands::Add { message } => {
            let id = util.create_footer_message(&message).await?;
            println!("Created footer message #{id}");
        }
        FooterCommands::List { json } => {
            let messages = util.list_footer_messages().await?;
            if json {
                print_json(&messages)?;
            } else {
                for m in messages {
                    let first_line = m.message.lines().next().unwrap_or_default();
                    println!("{:>4}  {}", m.id.0, first_line);
                }
            }
        }
        FooterCommands::Show { id } => {
            let m = util.get_footer_message(FooterMessageId(id)).await?;
            println!("Footer message #{}", m.id);
            println!("{}", m.message);
        }
        FooterCommands::Update { id, message } => {
            util.update_footer_message(FooterMessageId(id), &message).await?;
            println!("Updated footer message #{id}");
        }
    }
    Ok(())
}

async fn invoice(util: &InvoicingUtil, command: InvoiceCommands) -> Result<(), ServerError> {
    match command {
        InvoiceCommands::Create(fields) => {
            let id = util.create_invoice(fields.into()).await?;
            println!("Created invoice #{id}");
        }
        InvoiceCommands::List { json } => {
            let invoices = util.list_invoices().await?;
            if json {
                print_json(&invoices)?;
            } else {
                for summary in &invoices {
                    println!("{}", util.print_invoice_summary(summary));
                }
            }
        }
        InvoiceCommands::Show { id } => {
            print!("{}", util.print_invoice_text(InvoiceId(id)).await?);
        }
        InvoiceCommands::Update { id, fields } => {
            let current = util.get_invoice(InvoiceId(id)).await?;
            util.update_invoice(InvoiceId(id), fields.apply_to(&current)).await?;
            println!("Updated invoice #{id}");
        }
        InvoiceCommands::Paid { id, unpaid } => {
            util.set_invoice_paid(InvoiceId(id), !unpaid).await?;
            let label = if unpaid { "unpaid" } else { "paid" };
            println!("Marked invoice #{id} as {label}");
        }
        InvoiceCommands::AddItem {
            id,
            name,
            quantity,
            unit_cost,
        } => {
            let item_id = util
                .add_invoice_item(InvoiceId(id), InvoiceItemDraft::new(name, quantity, unit_cost))
                .await?;
            println!("Added item #{item_id} to invoice #{id}");
        }
        InvoiceCommands::Pdf { id, output } => {
            let path = util.generate_invoice_pdf(InvoiceId(id), output).await?;
            println!("Invoice PDF written to {}", path.display());
        }
        InvoiceCommands::Export { file } => {
            let csv = util.export_invoices_csv().await?;
            tokio::fs::write(&file, csv)
                .await
                .map_err(|e| WriteError::with_debug(&file.display().to_string(), &e))?;
            println!("Invoices exported to {}", file.display());
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), ServerError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CriticalError::with_debug("failed to serialize records as JSON", &e))?;
    println!("{json}");
    Ok(())
}

fn print_optional(label: &str, value: Option<&str>) {
    if let Some(value) = value {
        let mut lines = value.lines();
        println!("{:<8} {}", format!("{label}:"), lines.next().unwrap_or_default());
        for line in lines {
            println!("{:<8} {line}", "");
        }
    }
}

// --

impl From<SenderFields> for SenderDraft {
    fn from(fields: SenderFields) -> Self {
        SenderDraft {
            name: fields.name,
            address: fields.address,
            email: fields.email,
            phone: fields.phone,
        }
    }
}

impl From<ClientFields> for ClientDraft {
    fn from(fields: ClientFields) -> Self {
        ClientDraft {
            name: fields.name,
            address: fields.address,
            email: fields.email,
        }
    }
}

impl From<InvoiceFields> for InvoiceDraft {
    fn from(fields: InvoiceFields) -> Self {
        InvoiceDraft {
            sender_id: SenderId(fields.sender),
            client_id: ClientId(fields.client),
            footer_message_id: fields.footer.map(FooterMessageId),
            paid: fields.paid,
        }
    }
}

impl InvoiceUpdateFields {
    fn apply_to(self, current: &Invoice) -> InvoiceDraft {
        let footer_message_id = if self.no_footer {
            None
        } else {
            self.footer
                .map(FooterMessageId)
                .or(current.footer_message_id)
        };
        InvoiceDraft {
            sender_id: self.sender.map(SenderId).unwrap_or(current.sender_id),
            client_id: self.client.map(ClientId).unwrap_or(current.client_id),
            footer_message_id,
            paid: self.paid.unwrap_or(current.paid),
        }
    }
}
