use std::process::ExitCode;

use clap::{Parser, Subcommand};
use crclink_rs::Result;
use crclink_rs::channel::{ChannelTransport, TcpTransport};
use crclink_rs::transmission::{
    Receiver, ReceiverConfig, Sender, SenderConfig, encode_for_transmission,
};
use crclink_rs::ui::{
    print_banner, print_transmission, print_verdict, resolve_data,
    resolve_fault,
};
use crclink_rs::utils::consts::{DEFAULT_RECEIVER_BIND, DEFAULT_SENDER_ADDR};
use crclink_rs::utils::logging::init_logging;
use tracing::{error, info};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct FrameArgs {
    /// Data bits, e.g. 1011001100110101 (prompted when omitted)
    #[arg(short, long)]
    data: Option<String>,
    /// Fault choice 0..=6 (menu when omitted)
    #[arg(short, long)]
    fault: Option<u8>,
    /// Odd number of random bits to flip for choice 3
    #[arg(short = 'k', long)]
    count: Option<usize>,
    /// Seed for random fault positions
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Frame, corrupt, encode and send one payload over TCP
    Send {
        #[command(flatten)]
        frame: FrameArgs,
        #[arg(short, long, default_value = DEFAULT_SENDER_ADDR)]
        addr: String,
    },
    /// Accept one TCP connection and report the verdict
    Recv {
        #[arg(short, long, default_value = DEFAULT_RECEIVER_BIND)]
        bind: String,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run sender and receiver in-process over an in-memory channel
    Loopback {
        #[command(flatten)]
        frame: FrameArgs,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Send { frame, addr } => {
            let config = SenderConfig {
                addr,
                seed: frame.seed,
            };
            run_send(frame, config)
        }
        Commands::Recv { bind, json } => {
            run_recv(ReceiverConfig { bind }, json)
        }
        Commands::Loopback { frame, json } => run_loopback(frame, json),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_send(args: FrameArgs, config: SenderConfig) -> Result<()> {
    print_banner();

    let data = resolve_data(args.data)?;
    let scenario = resolve_fault(args.fault, args.count)?;
    let transmission =
        encode_for_transmission(&data, scenario, &mut config.rng())?;

    let transport = TcpTransport::connect(config.addr.as_str())?;
    let sent = Sender::new(transport).transmit(&transmission)?;
    print_transmission(&transmission, sent);
    Ok(())
}

fn run_recv(config: ReceiverConfig, json: bool) -> Result<()> {
    let listener = TcpTransport::listen(config.bind.as_str())?;
    info!("Receiver: Waiting for sender...");
    let transport = TcpTransport::accept_one(&listener)?;

    let reception = Receiver::new(transport).receive()?;
    print_verdict(&reception, json)
}

fn run_loopback(args: FrameArgs, json: bool) -> Result<()> {
    let config = SenderConfig {
        seed: args.seed,
        ..Default::default()
    };

    let data = resolve_data(args.data)?;
    let scenario = resolve_fault(args.fault, args.count)?;
    let transmission =
        encode_for_transmission(&data, scenario, &mut config.rng())?;

    let (tx_end, rx_end) = ChannelTransport::pair();
    let sent = Sender::new(tx_end).transmit(&transmission)?;
    if !json {
        print_transmission(&transmission, sent);
    }

    let reception = Receiver::new(rx_end).receive()?;
    print_verdict(&reception, json)
}
