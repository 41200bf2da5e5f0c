use battleship_agent::{
    init_logging,
    transport::{InMemoryTransport, TcpTransport},
    Agent, AgentNode, AgentState, ConsoleScreen, NodeConfig,
};

use clap::{Parser, Subcommand};
use log::LevelFilter;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::net::TcpListener;
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Let two agents play each other over an in-memory link.
    Local {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 0, help = "Pause before each guess, in milliseconds")]
        guess_delay_ms: u64,
    },
    /// Host a game and wait for a peer agent to connect.
    TcpServer {
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: String,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 250, help = "Pause before each guess, in milliseconds")]
        guess_delay_ms: u64,
    },
    /// Connect to a game hosted by a peer agent.
    TcpClient {
        #[arg(long, default_value = "127.0.0.1:8080")]
        connect: String,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 250, help = "Pause before each guess, in milliseconds")]
        guess_delay_ms: u64,
    },
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

fn node_config(guess_delay_ms: u64) -> NodeConfig {
    NodeConfig {
        guess_delay: Duration::from_millis(guess_delay_ms),
    }
}

fn report(result: anyhow::Result<AgentState>) {
    match result {
        Ok(AgentState::Won) => println!("Victory! All enemy boats sunk."),
        Ok(AgentState::Lost) => println!("Defeat. All our boats have been sunk."),
        Ok(other) => println!("Game stopped in state {:?}", other),
        Err(e) => eprintln!("Game ended with an error: {}", e),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging(LevelFilter::Info);
    let cli = Cli::parse();

    match cli.command {
        Commands::Local {
            seed,
            guess_delay_ms,
        } => {
            println!("Starting local agent vs agent game...");
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let rng1 = make_rng(seed);
            let rng2 = make_rng(seed.map(|s| s.wrapping_add(1)));
            let (t1, t2) = InMemoryTransport::pair();
            let config = node_config(guess_delay_ms);

            let agent1 = Agent::new(rng1, ConsoleScreen::new("agent1"));
            let agent2 = Agent::new(rng2, ConsoleScreen::new("agent2"));
            let f1 = async move { AgentNode::new(agent1, Box::new(t1), config).run().await };
            let f2 = async move { AgentNode::new(agent2, Box::new(t2), config).run().await };
            let (r1, r2) = tokio::join!(f1, f2);
            print!("agent1: ");
            report(r1);
            print!("agent2: ");
            report(r2);
        }
        Commands::TcpServer {
            bind,
            seed,
            guess_delay_ms,
        } => {
            println!("Starting TCP server at {}...", bind);
            let listener = TcpListener::bind(&bind).await?;
            println!("Waiting for a peer to connect...");
            let (stream, addr) = listener.accept().await?;
            println!("Peer connected from {}", addr);

            let agent = Agent::new(make_rng(seed), ConsoleScreen::new("server"));
            let transport = Box::new(TcpTransport::new(stream));
            let mut node = AgentNode::new(agent, transport, node_config(guess_delay_ms));
            report(node.run().await);
        }
        Commands::TcpClient {
            connect,
            seed,
            guess_delay_ms,
        } => {
            println!("Connecting to TCP server at {}...", connect);
            let transport = Box::new(TcpTransport::connect(&connect).await?);
            println!("Connected successfully!");

            let agent = Agent::new(make_rng(seed), ConsoleScreen::new("client"));
            let mut node = AgentNode::new(agent, transport, node_config(guess_delay_ms));
            report(node.run().await);
        }
    }
    Ok(())
}
