use battleship_agent::transport::{InMemoryTransport, TcpTransport, Transport};
use battleship_agent::{Agent, AgentNode, AgentState, NodeConfig, NullScreen};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::net::TcpListener;

enum TransportKind {
    InMemory,
    Tcp,
}

async fn run_game(kind: TransportKind, seed1: u64, seed2: u64) -> anyhow::Result<()> {
    let (t1, t2): (Box<dyn Transport>, Box<dyn Transport>) = match kind {
        TransportKind::InMemory => {
            let (t1, t2) = InMemoryTransport::pair();
            (Box::new(t1), Box::new(t2))
        }
        TransportKind::Tcp => {
            let listener = TcpListener::bind("127.0.0.1:0").await?;
            let addr = listener.local_addr()?;
            let accept = tokio::spawn(async move {
                let (socket, _) = listener.accept().await?;
                Ok::<TcpTransport, anyhow::Error>(TcpTransport::new(socket))
            });
            let client = TcpTransport::connect(addr).await?;
            let server = accept.await??;
            (Box::new(server), Box::new(client))
        }
    };

    let a1 = Agent::new(SmallRng::seed_from_u64(seed1), NullScreen);
    let a2 = Agent::new(SmallRng::seed_from_u64(seed2), NullScreen);
    let mut node1 = AgentNode::new(a1, t1, NodeConfig::default());
    let mut node2 = AgentNode::new(a2, t2, NodeConfig::default());

    let (r1, r2) = tokio::join!(node1.run(), node2.run());
    let (s1, s2) = (r1?, r2?);

    assert!(matches!(
        (s1, s2),
        (AgentState::Won, AgentState::Lost) | (AgentState::Lost, AgentState::Won)
    ));
    assert_eq!(node1.state(), s1);
    assert_eq!(node2.state(), s2);
    let winner = if s1 == AgentState::Won { &node1 } else { &node2 };
    assert_eq!(winner.agent().enemy_status(), 0);
    assert!(winner.guess_count() >= 18);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_agent_game_in_memory() -> anyhow::Result<()> {
    run_game(TransportKind::InMemory, 1, 2).await
}

#[tokio::test(flavor = "multi_thread")]
async fn test_agent_game_in_memory_other_seeds() -> anyhow::Result<()> {
    run_game(TransportKind::InMemory, 31, 47).await
}

#[tokio::test(flavor = "multi_thread")]
async fn test_agent_game_tcp() -> anyhow::Result<()> {
    run_game(TransportKind::Tcp, 5, 6).await
}

#[tokio::test(flavor = "multi_thread")]
async fn test_node_reports_dropped_peer() {
    let (t1, t2) = InMemoryTransport::pair();
    drop(t2);
    let agent = Agent::new(SmallRng::seed_from_u64(3), NullScreen);
    let mut node = AgentNode::new(agent, Box::new(t1), NodeConfig::default());
    let err = node.run().await.unwrap_err();
    assert!(err.to_string().contains("Channel closed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_node_reports_invalid_peer() -> anyhow::Result<()> {
    let (t1, mut t2) = InMemoryTransport::pair();
    let agent = Agent::new(SmallRng::seed_from_u64(4), NullScreen);
    let mut node = AgentNode::new(agent, Box::new(t1), NodeConfig::default());

    let peer = async move {
        let challenge = t2.recv().await?;
        assert!(challenge.starts_with(b"$CHA,"));
        // Good framing, wrong checksum.
        t2.send(b"$CHA,1,1*00\n").await?;
        Ok::<_, anyhow::Error>(t2)
    };
    let (result, peer) = tokio::join!(node.run(), peer);
    let _t2 = peer?;
    let err = result.unwrap_err();
    assert!(err.to_string().contains("Checksum mismatch"));
    assert_eq!(node.state(), AgentState::Invalid);
    Ok(())
}
