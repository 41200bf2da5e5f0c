#![cfg(feature = "std")]

//! Async driver connecting an [`Agent`] to a byte [`Transport`].

use rand::Rng;
use tokio::time::{sleep, Duration};

use crate::{
    agent::{Agent, AgentState, Screen},
    core::PROTOCOL_MAX_MESSAGE_LEN,
    transport::Transport,
};

/// Runtime knobs for an [`AgentNode`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeConfig {
    /// Pause before each coordinate sentence is emitted.
    pub guess_delay: Duration,
}

pub struct AgentNode<R, S> {
    agent: Agent<R, S>,
    transport: Box<dyn Transport>,
    config: NodeConfig,
    out: [u8; PROTOCOL_MAX_MESSAGE_LEN],
}

impl<R, S> AgentNode<R, S>
where
    R: Rng + Send,
    S: Screen + Send,
{
    pub fn new(agent: Agent<R, S>, transport: Box<dyn Transport>, config: NodeConfig) -> Self {
        Self {
            agent,
            transport,
            config,
            out: [0; PROTOCOL_MAX_MESSAGE_LEN],
        }
    }

    /// Play until the agent reaches Won, Lost or Invalid.
    ///
    /// Every received byte is handed to the agent on its own; states that
    /// act without input are run with the "nothing new" sentinel first.
    pub async fn run(&mut self) -> anyhow::Result<AgentState> {
        loop {
            self.settle().await?;
            if self.agent.state().is_terminal() {
                break;
            }
            let bytes = self.transport.recv().await?;
            for b in bytes {
                self.settle().await?;
                if self.agent.state().is_terminal() {
                    log::debug!("dropping byte 0x{:02X} after game end", b);
                    continue;
                }
                self.tick(Some(b)).await?;
            }
        }

        let state = self.agent.state();
        if state == AgentState::Invalid {
            let reason = self
                .agent
                .last_error()
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(anyhow::anyhow!("Agent became invalid: {}", reason));
        }
        log::info!(
            "game over: {:?} after {} guesses",
            state,
            self.agent.guesses()
        );
        Ok(state)
    }

    async fn settle(&mut self) -> anyhow::Result<()> {
        while self.agent.state().acts_without_input() {
            if self.agent.state() == AgentState::SendingGuess && !self.config.guess_delay.is_zero()
            {
                sleep(self.config.guess_delay).await;
            }
            self.tick(None).await?;
        }
        Ok(())
    }

    async fn tick(&mut self, input: Option<u8>) -> anyhow::Result<()> {
        let len = self.agent.run(input, &mut self.out);
        if len > 0 {
            let sentence = &self.out[..len];
            log::trace!("tx {}", String::from_utf8_lossy(sentence).trim_end());
            self.transport.send(sentence).await?;
        }
        Ok(())
    }

    /// Current state of the underlying agent.
    pub fn state(&self) -> AgentState {
        self.agent.state()
    }

    /// Total number of guesses this agent has made.
    pub fn guess_count(&self) -> usize {
        self.agent.guesses()
    }

    pub fn agent(&self) -> &Agent<R, S> {
        &self.agent
    }
}
