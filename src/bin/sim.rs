use battleship_agent::{
    transport::InMemoryTransport, Agent, AgentNode, AgentState, NodeConfig, NullScreen,
};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let a1 = Agent::new(SmallRng::seed_from_u64(seed1), NullScreen);
    let a2 = Agent::new(SmallRng::seed_from_u64(seed2), NullScreen);
    let (t1, t2) = InMemoryTransport::pair();

    let f1 = async move {
        let mut node = AgentNode::new(a1, Box::new(t1), NodeConfig::default());
        let state = node.run().await?;
        Ok::<_, anyhow::Error>((state, node.guess_count(), node.agent().my_field().clone()))
    };
    let f2 = async move {
        let mut node = AgentNode::new(a2, Box::new(t2), NodeConfig::default());
        let state = node.run().await?;
        Ok::<_, anyhow::Error>((state, node.guess_count(), node.agent().my_field().clone()))
    };

    let (res1, res2) = tokio::try_join!(f1, f2)?;

    let winner = match (res1.0, res2.0) {
        (AgentState::Won, AgentState::Lost) => Some("agent1"),
        (AgentState::Lost, AgentState::Won) => Some("agent2"),
        _ => None,
    };

    let result = json!({
        "agent1": {"state": res1.0, "guesses": res1.1, "field": res1.2},
        "agent2": {"state": res2.0, "guesses": res2.1, "field": res2.2},
        "winner": winner,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
