//! `scan` - terminal front end for barcode price lookup
//!
//! ```bash
//! scan interactive                 # product service, one barcode per line
//! scan interactive --catalog       # CSV export loaded once at start
//! scan lookup 5701234567890
//! scan print 5701234567890
//! scan add --barcode 42 --brand Arla --name Mælk --weight 1l --price 12,95
//! ```

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use scan_client::{
    CatalogResolver, ClientConfig, HttpClient, NetworkResolver, PrintForwarder, ProductCreate,
    ProductRegistrar, ProductResolver, ScanApp, SessionState, Tab, UiCommand, View,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "scan", version, about = "Barcode price lookup and label printing")]
struct Cli {
    /// Product service base URL (overrides LOOKUP_BASE_URL)
    #[arg(long, global = true)]
    lookup_base_url: Option<String>,

    /// CSV export URL (overrides CATALOG_URL)
    #[arg(long, global = true)]
    catalog_url: Option<String>,

    /// Print bridge URL (overrides BRIDGE_URL)
    #[arg(long, global = true)]
    bridge_url: Option<String>,

    /// Debounce window in milliseconds (overrides DEBOUNCE_MS)
    #[arg(long, global = true)]
    debounce_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read scanner input from stdin until EOF or `:quit`
    Interactive(Source),
    /// Resolve one barcode and print the product
    Lookup {
        barcode: String,
        #[command(flatten)]
        source: Source,
    },
    /// Resolve one barcode and send its label to the bridge
    Print {
        barcode: String,
        #[command(flatten)]
        source: Source,
    },
    /// Register a new product with the product service
    Add(AddArgs),
}

#[derive(Args)]
struct Source {
    /// Look up in the CSV catalog instead of the product service
    #[arg(long)]
    catalog: bool,
}

#[derive(Args)]
struct AddArgs {
    #[arg(long)]
    barcode: String,
    #[arg(long, default_value = "")]
    brand: String,
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "")]
    weight: String,
    #[arg(long)]
    price: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scan_client=info,scan=info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli);
    let http = config.build_http_client()?;

    match cli.command {
        Command::Interactive(source) => interactive(&config, http, source.catalog).await,
        Command::Lookup { barcode, source } => {
            let resolver = build_resolver(&config, http, source.catalog)?;
            resolver.load().await?;
            let product = resolver.resolve(&barcode).await?;
            println!("{}", serde_json::to_string_pretty(&product)?);
            println!("Price: {}", product.display_price());
            Ok(())
        }
        Command::Print { barcode, source } => {
            let resolver = build_resolver(&config, http.clone(), source.catalog)?;
            resolver.load().await?;
            let product = resolver.resolve(&barcode).await?;
            let forwarder = PrintForwarder::new(http, &config.bridge_url);
            if let Some(ack) = forwarder.send(Some(&product)).await? {
                println!("{}", ack.message);
            }
            Ok(())
        }
        Command::Add(args) => {
            let registrar = ProductRegistrar::new(http, &config.lookup_base_url);
            let created = registrar
                .add_product(&ProductCreate {
                    barcode: args.barcode,
                    product_brand: args.brand,
                    product_name: args.name,
                    product_weight: args.weight,
                    retail_price: args.price,
                })
                .await?;
            println!("{}", scan_client::registration::registration_success_message(&created));
            Ok(())
        }
    }
}

fn load_config(cli: &Cli) -> ClientConfig {
    let mut config = ClientConfig::from_env();
    if let Some(url) = &cli.lookup_base_url {
        config.lookup_base_url = url.clone();
    }
    if let Some(url) = &cli.catalog_url {
        config = config.with_catalog_url(url);
    }
    if let Some(url) = &cli.bridge_url {
        config = config.with_bridge_url(url);
    }
    if let Some(ms) = cli.debounce_ms {
        config = config.with_debounce_ms(ms);
    }
    config
}

fn build_resolver(
    config: &ClientConfig,
    http: HttpClient,
    catalog: bool,
) -> anyhow::Result<Arc<dyn ProductResolver>> {
    if catalog {
        let url = config
            .catalog_url
            .as_deref()
            .context("catalog mode needs CATALOG_URL or --catalog-url")?;
        Ok(Arc::new(CatalogResolver::new(http, url)))
    } else {
        Ok(Arc::new(NetworkResolver::new(http, &config.lookup_base_url)))
    }
}

async fn interactive(config: &ClientConfig, http: HttpClient, catalog: bool) -> anyhow::Result<()> {
    let resolver = build_resolver(config, http.clone(), catalog)?;
    let app = ScanApp::new(
        resolver,
        PrintForwarder::new(http.clone(), &config.bridge_url),
        ProductRegistrar::new(http, &config.lookup_base_url),
        config.debounce_window(),
    );

    let (tx, rx) = mpsc::channel(32);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match UiCommand::parse_line(&line) {
                Ok(command) => {
                    if tx.send(command).await.is_err() {
                        break;
                    }
                }
                Err(e) => eprintln!("{}", e),
            }
        }
    });

    let mut view = TerminalView;
    app.run(rx, &mut view).await;
    Ok(())
}

/// Plain stdout rendering
struct TerminalView;

impl View for TerminalView {
    fn render(&mut self, state: &SessionState) {
        println!("----------------------------------------");
        if let Some(success) = &state.success {
            println!("{}", success);
        }
        match state.tab {
            Tab::Search => {
                if !state.input.is_empty() {
                    println!("Scanned barcode: {}", state.input);
                }
                if let Some(product) = &state.product {
                    println!("{}", product.label_name());
                    println!("Price: {}", product.display_price());
                    if let Some(image) = &product.image_url {
                        println!("Image: {}", image);
                    }
                    println!("(:print to print the price label)");
                } else if let Some(error) = &state.error {
                    println!("{}", error);
                }
            }
            Tab::Register => {
                let form = &state.form;
                println!("Register product (:set <field> <value>, :submit)");
                println!("  barcode: {}", form.barcode);
                println!("  brand:   {}", form.brand);
                println!("  name:    {}", form.name);
                println!("  weight:  {}", form.weight);
                println!("  price:   {}", form.price);
                if let Some(error) = &state.error {
                    println!("{}", error);
                }
            }
        }
    }

    fn alert(&mut self, message: &str) {
        println!("[!] {}", message);
    }
}
