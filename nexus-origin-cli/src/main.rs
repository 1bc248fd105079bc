use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use nexus_origin_lib::{ChannelOriginAction, NexusDeviceId, SymmetricKey};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Encode Nexus Channel origin command tokens.
///
/// Prints the clear digit string for one command; obscuring and keycode
/// framing belong to the transport layer. Command counts are anti-replay
/// nonces: never reuse one for the same key and role.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print a JSON record instead of the bare digit string.
    #[arg(long, global = true)]
    json: bool,
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Delete all accessory links from the controller.
    UnlinkAll {
        /// Controller symmetric key, 32 hex characters.
        #[arg(long)]
        controller_key: String,
        /// Controller command count.
        #[arg(long)]
        controller_count: u32,
    },
    /// Unlock all linked accessories (receivers may not support this yet).
    UnlockAll {
        #[arg(long)]
        controller_key: String,
        #[arg(long)]
        controller_count: u32,
    },
    /// Unlock one linked accessory (receivers may not support this yet).
    UnlockAccessory {
        /// Full 48-bit accessory Nexus ID.
        #[arg(long)]
        nexus_id: u64,
        #[arg(long)]
        controller_key: String,
        #[arg(long)]
        controller_count: u32,
    },
    /// Delete the link to one accessory (receivers may not support this yet).
    UnlinkAccessory {
        #[arg(long)]
        nexus_id: u64,
        #[arg(long)]
        controller_key: String,
        #[arg(long)]
        controller_count: u32,
    },
    /// Establish a mode-3 secured link between controller and accessory.
    Link {
        #[arg(long)]
        controller_key: String,
        #[arg(long)]
        controller_count: u32,
        /// Accessory symmetric key, 32 hex characters.
        #[arg(long)]
        accessory_key: String,
        /// Accessory command count.
        #[arg(long)]
        accessory_count: u32,
    },
}

fn parse_key(hex_key: &str, role: &str) -> Result<SymmetricKey> {
    SymmetricKey::from_hex(hex_key).with_context(|| format!("invalid {role} key"))
}

fn action_from_command(command: &Command) -> Result<ChannelOriginAction> {
    let action = match command {
        Command::UnlinkAll {
            controller_key,
            controller_count,
        } => ChannelOriginAction::UnlinkAllAccessories {
            controller_command_count: *controller_count,
            controller_key: parse_key(controller_key, "controller")?,
        },
        Command::UnlockAll {
            controller_key,
            controller_count,
        } => ChannelOriginAction::UnlockAllAccessories {
            controller_command_count: *controller_count,
            controller_key: parse_key(controller_key, "controller")?,
        },
        Command::UnlockAccessory {
            nexus_id,
            controller_key,
            controller_count,
        } => ChannelOriginAction::UnlockAccessory {
            accessory_nexus_id: NexusDeviceId::new(*nexus_id)?,
            controller_command_count: *controller_count,
            controller_key: parse_key(controller_key, "controller")?,
        },
        Command::UnlinkAccessory {
            nexus_id,
            controller_key,
            controller_count,
        } => ChannelOriginAction::UnlinkAccessory {
            accessory_nexus_id: NexusDeviceId::new(*nexus_id)?,
            controller_command_count: *controller_count,
            controller_key: parse_key(controller_key, "controller")?,
        },
        Command::Link {
            controller_key,
            controller_count,
            accessory_key,
            accessory_count,
        } => ChannelOriginAction::LinkAccessoryMode3 {
            controller_command_count: *controller_count,
            accessory_command_count: *accessory_count,
            accessory_key: parse_key(accessory_key, "accessory")?,
            controller_key: parse_key(controller_key, "controller")?,
        },
    };
    Ok(action)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::builder()
        .with_default_directive(cli.verbose.tracing_level_filter().into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let action = action_from_command(&cli.command)?;
    debug!(action = %action, "encoding origin command");
    let token = action.build()?;

    if cli.json {
        let mut record = serde_json::to_value(&token)?;
        record["digits"] = serde_json::Value::String(token.to_digits());
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("{}", token.to_digits());
    }

    Ok(())
}
