use clap::Parser;
use serde::Deserialize;
use venue_alloc::config::seed::VenueSeed;
use venue_alloc::utils::{logger, validation::Validate};
use venue_alloc::{CliConfig, MemoryStore, Outcome, SellerDraft, SellerId, SellerService};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Request {
    Create(SellerDraft),
    Update { id: SellerId, seller: SellerDraft },
    Delete { id: SellerId },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting venue-alloc CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let store = MemoryStore::new();
    let service = SellerService::new(store.clone());

    if let Some(path) = &config.seed {
        let seed = VenueSeed::from_file(path)?;
        seed.validate()?;
        apply_seed(&store, &service, &seed).await?;
        tracing::info!(
            categories = seed.categories.len(),
            sellers = seed.sellers.len(),
            "venue seeded"
        );
    }

    let raw = std::fs::read_to_string(&config.request)?;
    let request: Request = serde_json::from_str(&raw)?;

    let exit_code = match request {
        Request::Create(draft) => report(service.create(&draft).await?)?,
        Request::Update { id, seller } => report(service.update(id, &seller).await?)?,
        Request::Delete { id } => {
            if service.delete(id).await? {
                println!("✅ seller {} deleted", id);
                0
            } else {
                eprintln!("❌ seller {} not found", id);
                1
            }
        }
    };

    if exit_code > 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

async fn apply_seed(
    store: &MemoryStore,
    service: &SellerService<MemoryStore>,
    seed: &VenueSeed,
) -> anyhow::Result<()> {
    for name in &seed.categories {
        store.add_category(name).await;
    }
    for draft in &seed.sellers {
        match service.create(draft).await? {
            Outcome::Rejected(report) => anyhow::bail!(
                "seed seller '{}' rejected: {}",
                draft.name,
                serde_json::to_string(&report)?
            ),
            outcome => {
                tracing::debug!(name = %draft.name, status = outcome.status(), "seeded seller")
            }
        }
    }
    Ok(())
}

fn report(outcome: Outcome) -> anyhow::Result<i32> {
    match outcome {
        Outcome::Created(seller) => {
            println!("✅ created seller {}", seller.id);
            println!("{}", serde_json::to_string_pretty(&seller)?);
            Ok(0)
        }
        Outcome::Updated(seller) => {
            println!("✅ updated seller {}", seller.id);
            println!("{}", serde_json::to_string_pretty(&seller)?);
            Ok(0)
        }
        Outcome::Rejected(report) => {
            eprintln!("❌ request rejected with status {}", report.status);
            eprintln!("{}", serde_json::to_string_pretty(&report)?);
            Ok(1)
        }
    }
}
