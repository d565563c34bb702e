use clap::Parser;
use llm_probe::{
    build_adapters, load_prompts, CsvSink, MarkerTerm, ProviderKind, ProvidersConfig,
    ResultRecord, RunConfig, Runner,
};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "llm-probe")]
#[command(about = "Ask several LLM providers the same prompts and save the answers to CSV", long_about = None)]
struct Cli {
    /// JSON file holding an array of prompts
    #[arg(long)]
    prompts: Option<PathBuf>,

    /// How many times each prompt is sent to each provider
    #[arg(long)]
    iterations: Option<u32>,

    /// CSV file to write
    #[arg(long)]
    output: Option<PathBuf>,

    /// Pause after every provider call, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Term to look for in every answer (case-insensitive)
    #[arg(long)]
    marker: Option<String>,

    /// Comma separated providers in call order (openai,gemini,mistral,perplexity)
    #[arg(long)]
    providers: Option<String>,
}

impl Cli {
    /// Command-line values win over environment values
    fn apply(self, mut config: RunConfig) -> llm_probe::ProbeResult<RunConfig> {
        if let Some(prompts) = self.prompts {
            config.prompts_path = prompts;
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(output) = self.output {
            config.output_path = output;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.call_delay = Duration::from_millis(delay_ms);
        }
        if let Some(marker) = self.marker {
            config.marker_term = marker;
        }
        if let Some(providers) = self.providers {
            config.providers = ProviderKind::parse_list(&providers)?;
        }
        config.validate()?;
        Ok(config)
    }
}

fn print_summary(records: &[ResultRecord], marker: &MarkerTerm) {
    for record in records {
        match (record.answer(), record.error_message()) {
            (Some(answer), _) => {
                println!(
                    "\n{} | run {}: {} mentioned = {}",
                    record.provider,
                    record.run_number,
                    marker.as_str(),
                    record.marker_mentioned().unwrap_or(false)
                );
                let preview: String = answer.chars().take(100).collect();
                println!("Response: {}...", preview);
            }
            (None, error) => {
                println!(
                    "\n{} | run {}: ERROR - {}",
                    record.provider,
                    record.run_number,
                    error.unwrap_or("Unknown error")
                );
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.apply(RunConfig::from_env()?)?;
    let prompts = load_prompts(&config.prompts_path)?;

    println!("Running full test on {} prompts...", prompts.len());

    let adapters = build_adapters(
        &ProvidersConfig::from_env(),
        &config.providers,
        config.request_timeout,
    )?;
    let marker = MarkerTerm::new(config.marker_term.clone());
    let runner = Runner::new(adapters, marker.clone(), config.call_delay);

    let records = runner.run_all(&prompts, config.iterations).await;

    print_summary(&records, &marker);

    CsvSink::write(&records, &config.output_path)?;
    if !records.is_empty() {
        println!("\nResults saved to {}", config.output_path.display());
    }

    Ok(())
}
