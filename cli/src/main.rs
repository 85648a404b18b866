use std::io::Write;
use std::path::{Path, PathBuf};
use std::{env, fs, fs::OpenOptions};

use ghost_client::{GhostClient, MockSubmitter};
use ghost_config::GhostConfig;
use ghost_keys::KeyBundle;
use rand::RngCore;
use rand::rngs::OsRng;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let cmd = &args[1];

    match cmd.as_str() {
        "genkey" => {
            let filename = args.get(2).cloned();
            if let Err(e) = genkey(filename) {
                eprintln!("❌ Error generating key: {}", e);
                std::process::exit(1);
            }
        }
        "address" => {
            let filename = args.get(2).cloned();
            if let Err(e) = address(filename) {
                eprintln!("❌ Error reading key: {}", e);
                std::process::exit(1);
            }
        }
        "demo" => {
            if let Err(e) = demo().await {
                eprintln!("❌ Error running demo: {}", e);
                std::process::exit(1);
            }
        }
        "sample-config" => {
            print!("{}", GhostConfig::generate_sample());
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        _ => {
            println!("❌ Unknown command: {}", cmd);
            println!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Ghost CLI - Private Transaction Development Tool");
    println!();
    println!("USAGE:");
    println!("  ghost <command> [args]");
    println!();
    println!("ACCOUNT COMMANDS:");
    println!("  genkey [filename]          Generate a new Ghost key bundle");
    println!("  address [filename]         Show the address for a key file");
    println!();
    println!("DEVELOPMENT COMMANDS:");
    println!("  demo                       Run a deposit/transfer lifecycle against a mock chain");
    println!("  sample-config              Print a sample config.toml");
    println!();
    println!("OTHER COMMANDS:");
    println!("  help                       Show this help message");
    println!();
    println!("EXAMPLES:");
    println!("  ghost genkey                         # Generate key bundle");
    println!("  ghost address                        # Show primary address");
    println!("  ghost demo                           # Exercise the privacy pool locally");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("  GHOST_CONFIG         Path to config.toml");
    println!("  GHOST_SUBMIT_ADDR    Transaction submission endpoint");
    println!("  RUST_LOG             Log level (debug/info/warn/error)");
}

fn key_path(filename: Option<String>) -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Could not determine home directory"))?;

    let config_dir = Path::new(&home).join(".config").join("ghost");
    let key_filename = filename.unwrap_or_else(|| "id.json".to_string());
    Ok(config_dir.join(key_filename))
}

fn genkey(filename: Option<String>) -> anyhow::Result<()> {
    let key_path = key_path(filename)?;
    let config_dir = key_path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Key path has no parent directory"))?;

    if !config_dir.exists() {
        fs::create_dir_all(config_dir)?;
        println!("📁 Created directory: {}", config_dir.display());

        #[cfg(unix)]
        {
            // Directory permissions 700 (rwx------)
            let mut perms = fs::metadata(config_dir)?.permissions();
            perms.set_mode(0o700);
            fs::set_permissions(config_dir, perms)?;
        }
    }

    if key_path.exists() {
        return Err(anyhow::anyhow!(
            "File {} already exists. Remove it first or use a different filename.",
            key_path.display()
        ));
    }

    println!("🔐 Generating new key bundle...");
    let mut seed = [0u8; 32];
    OsRng.fill_bytes(&mut seed);
    let keys = KeyBundle::from_seed(&seed);

    // JSON array of the 32 seed bytes; the spend and view keys derive from it
    let json = serde_json::to_string(&seed.to_vec())?;

    let mut f = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&key_path)?;

    #[cfg(unix)]
    {
        // chmod 600 (rw-------)
        let mut perms = f.metadata()?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&key_path, perms)?;
    }

    f.write_all(json.as_bytes())?;

    println!("✅ Wrote new key bundle to {}", key_path.display());
    println!("🔑 Address: {}", keys.primary_address().encode());

    Ok(())
}

fn load_keys(filename: Option<String>) -> anyhow::Result<KeyBundle> {
    let key_path = key_path(filename)?;
    let json = fs::read_to_string(&key_path)
        .map_err(|e| anyhow::anyhow!("Could not read {}: {}", key_path.display(), e))?;

    let bytes: Vec<u8> = serde_json::from_str(&json)?;
    let seed: [u8; 32] = bytes
        .try_into()
        .map_err(|_| anyhow::anyhow!("Key file must contain exactly 32 seed bytes"))?;

    Ok(KeyBundle::from_seed(&seed))
}

fn address(filename: Option<String>) -> anyhow::Result<()> {
    let keys = load_keys(filename)?;

    println!("🔑 Address:    {}", keys.primary_address().encode());
    println!("🆔 Identifier: {}", keys.identifier());

    Ok(())
}

async fn demo() -> anyhow::Result<()> {
    let config = GhostConfig::load()?;
    log::info!("program id: {}", config.program.id);

    println!("👻 Ghost demo (mock chain, prover mode: {:?})", config.prover.mode);
    println!();

    let mut ghost = GhostClient::new(KeyBundle::random(), MockSubmitter::new());
    println!("🔑 Identifier: {}", ghost.identifier());

    let outcome = ghost.deposit(1_000_000_000).await?;
    println!("💰 Deposited 1000000000 -> tx {}", outcome.signature);
    let outcome = ghost.deposit(500_000_000).await?;
    println!("💰 Deposited 500000000 -> tx {}", outcome.signature);
    println!("📊 Private balance: {}", ghost.private_balance());
    println!();

    let recipient = KeyBundle::random().identifier();
    let outcome = ghost
        .private_transfer(&recipient, 500_000_000, Some("Coffee"))
        .await?;
    println!(
        "👻 Transferred 500000000 (consumed commitment of {}) -> tx {}",
        outcome.receipt.commitment.amount, outcome.signature
    );
    println!("📊 Private balance: {}", ghost.private_balance());
    println!();

    let proof = ghost.prove_minimum_balance(100_000_000)?;
    println!(
        "🔒 Proved balance >= 100000000 ({} proof bytes)",
        proof.proof.len()
    );

    println!();
    println!("✅ Demo complete");

    Ok(())
}
