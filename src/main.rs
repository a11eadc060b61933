//! Binary entry point for dialbook
//!
//! Parses the CLI, loads configuration from the environment, and runs the
//! selected slice of the pipeline: compile only, compile + deploy, or the
//! full demonstration with interactive calls. Errors propagate out of
//! main and terminate the process with a non-zero status.

use anyhow::Result;
use clap::Parser;
use dialbook::{
	cli::{output::Display, prompt, Cli, Commands},
	core::{
		artifact::{self, ContractArtifact},
		chain::ChainClient,
		compiler::{self, Compiler},
		config::Settings,
		directory,
	},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
	// Load environment variables from .env if present
	let _ = dotenvy::dotenv();

	let cli = Cli::parse();
	init_logging(cli.debug);

	let settings = Settings::from_env(
		cli.target,
		cli.source.clone(),
		cli.artifact.clone(),
		&cli.solc,
	)?;

	match cli.command {
		Commands::Compile => {
			handle_compile(&settings).await?;
		},
		Commands::Deploy => {
			handle_deploy(&settings).await?;
		},
		Commands::Run => handle_run(&settings).await?,
	}

	Ok(())
}

/// Initialize structured logging with configurable verbosity
///
/// Controlled via RUST_LOG, with defaults tuned for CLI use.
fn init_logging(debug: bool) {
	use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

	let default = if debug {
		"dialbook=debug,info"
	} else {
		"dialbook=info,warn"
	};
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

	tracing_subscriber::registry()
		.with(
			fmt::layer()
				.with_target(true)
				.with_file(false)
				.with_line_number(false)
				.compact(),
		)
		.with(env_filter)
		.init();
}

/// Stages 1-3: load the source, compile it, persist the full output, and
/// extract the deployable pieces
async fn handle_compile(settings: &Settings) -> Result<ContractArtifact> {
	Display::header("Compiling");

	let source = Compiler::load_source(&settings.source)?;
	let source_name = settings
		.source
		.file_name()
		.and_then(|n| n.to_str())
		.unwrap_or(dialbook::constants::CONTRACT_FILE);

	Display::info(&format!(
		"Compiling {} with solc {}",
		source_name, settings.solc_version
	));

	let input = Compiler::build_input(source_name, &source);
	let output = Compiler::new(settings.solc_version.clone())
		.compile(&input)
		.await?;

	compiler::write_artifact(&settings.artifact, &output)?;
	Display::success(&format!(
		"Compiler output written to {}",
		settings.artifact.display()
	));

	let contract = artifact::extract(&output, source_name, dialbook::constants::CONTRACT_NAME)?;
	Display::kv("Bytecode", &format!("{} bytes", contract.bytecode.len()));
	Display::kv(
		"Functions",
		&contract
			.abi
			.functions()
			.map(|f| f.name.as_str())
			.collect::<Vec<_>>()
			.join(", "),
	);

	Ok(contract)
}

/// Everything `run` needs after the contract is on chain
struct Deployment {
	client: ChainClient,
	contract: ContractArtifact,
	address: alloy_primitives::Address,
	next_nonce: u64,
}

/// Stages 1-5: compile, connect, and deploy
async fn handle_deploy(settings: &Settings) -> Result<Deployment> {
	let contract = handle_compile(settings).await?;

	Display::header("Deploying");
	let client = ChainClient::connect(&settings.endpoint).await?;
	Display::info(&format!(
		"Connected to {} (chain id {})",
		settings.endpoint.rpc_url,
		client.chain_id()
	));

	let signer = settings.signer()?;
	let sender = signer.address();
	info!(sender = %sender, chain_target = %settings.target, "Deploying contract");

	// Fetched once; the pipeline increments it between its two sends
	let nonce = client.nonce(sender).await?;

	let (address, receipt) =
		directory::deploy(&client, signer, contract.bytecode.clone(), nonce).await?;

	Display::success(&format!("Contract deployed to {}", address));
	Display::kv("Transaction", &receipt.transaction_hash.to_string());

	Ok(Deployment {
		client,
		contract,
		address,
		next_nonce: nonce + 1,
	})
}

/// Stages 1-6: deploy, then the interactive demonstration calls
async fn handle_run(settings: &Settings) -> Result<()> {
	let deployment = handle_deploy(settings).await?;

	Display::header("Interacting with the contract");
	let contract = directory::DirectoryContract::new(
		deployment.client,
		settings.signer()?.clone(),
		deployment.contract.abi.clone(),
		deployment.address,
	);

	let total = contract.total_people().await?;
	Display::kv("Initial amount of people", &total.to_string());

	Display::section("Add a person");
	let name = prompt::text("Enter name")?;
	let number = prompt::number("Enter number")?;

	Display::info("Building, signing, and sending the transaction...");
	let receipt = contract
		.add_people(&name, number, deployment.next_nonce)
		.await?;
	Display::success(&format!(
		"Transaction done! Tx hash: {}",
		receipt.transaction_hash
	));

	let total = contract.total_people().await?;
	Display::kv("Updated amount of people", &total.to_string());

	let (last_name, last_number) = contract.info().await?;
	Display::kv("Newest entry", &format!("{} => {}", last_name, last_number));

	Ok(())
}
