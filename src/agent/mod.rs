//! The agent: top-level state machine playing one game over the link.
//!
//! The agent is invoked once per received character (or with `None` when
//! nothing arrived) and reacts at most once per call, producing zero or one
//! outgoing sentence.

use core::fmt;
use rand::Rng;

use crate::core::{
    FieldError, Field, FieldPosition, GuessData, BOATS, PROTOCOL_MAX_MESSAGE_LEN,
};
use crate::protocol::{
    negotiation::turn_order, EncodeError, Message, NegotiationData, ParseError, Parser,
    ParserStatus, TurnOrder,
};

mod screen;

pub use screen::{NullScreen, Screen, Turn};

/// Agent states, in the order a game normally visits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentState {
    GenerateNegData,
    SentChallenge,
    DeterminingTurnOrder,
    SendingGuess,
    WaitingForHit,
    WaitingForGuess,
    Won,
    Lost,
    Invalid,
}

impl AgentState {
    /// Won, Lost and Invalid never transmit again; only a parse failure
    /// moves them (to Invalid).
    pub fn is_terminal(self) -> bool {
        matches!(self, AgentState::Won | AgentState::Lost | AgentState::Invalid)
    }

    /// States that act on every call, whether or not a character arrived.
    pub fn acts_without_input(self) -> bool {
        matches!(self, AgentState::GenerateNegData | AgentState::SendingGuess)
    }
}

/// Fatal problems that move the agent to [`AgentState::Invalid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentError {
    /// The peer sent a sentence that failed to parse.
    Parsing(ParseError),
    /// The peer's reveal does not match its commitment.
    NegotiationData,
    /// Turn order could not be decided.
    Ordering,
    /// The peer referenced a cell outside the field.
    OutOfRange(FieldError),
    /// No unresolved opponent cell is left to fire at.
    NoTargets,
    /// An outgoing sentence did not fit the output buffer.
    Encode(EncodeError),
}

impl fmt::Display for AgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentError::Parsing(e) => write!(f, "Parsing error: {}", e),
            AgentError::NegotiationData => write!(f, "Invalid negotiation data from peer"),
            AgentError::Ordering => write!(f, "Turn ordering tie"),
            AgentError::OutOfRange(e) => write!(f, "Peer coordinate rejected: {}", e),
            AgentError::NoTargets => write!(f, "No unknown cells left to guess"),
            AgentError::Encode(e) => write!(f, "Encoding failed: {}", e),
        }
    }
}

/// What one call asks of the outside world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Reaction {
    next: AgentState,
    message: Option<Message>,
    turn: Option<Turn>,
    error: Option<AgentError>,
}

impl Reaction {
    fn stay(state: AgentState) -> Self {
        Self {
            next: state,
            message: None,
            turn: None,
            error: None,
        }
    }

    fn to(next: AgentState) -> Self {
        Self::stay(next)
    }

    fn fail(error: AgentError) -> Self {
        Self {
            error: Some(error),
            ..Self::stay(AgentState::Invalid)
        }
    }

    fn send(mut self, message: Message) -> Self {
        self.message = Some(message);
        self
    }

    fn draw(mut self, turn: Turn) -> Self {
        self.turn = Some(turn);
        self
    }
}

/// An autonomous player: its own fleet, what it knows of the opponent's,
/// the turn order negotiation and the sentence parser.
pub struct Agent<R, S = NullScreen> {
    state: AgentState,
    parser: Parser,
    my_field: Field,
    enemy_field: Field,
    my_data: NegotiationData,
    their_data: NegotiationData,
    last_error: Option<AgentError>,
    guesses: usize,
    rng: R,
    screen: S,
}

impl<R: Rng, S: Screen> Agent<R, S> {
    /// Set up a new game with every boat placed at random.
    pub fn new(mut rng: R, screen: S) -> Self {
        let mut my_field = Field::new(FieldPosition::Empty);
        for boat in BOATS {
            my_field.place_boat_randomly(&mut rng, boat);
        }
        Self::with_field(rng, screen, my_field)
    }

    /// Set up a new game around an already populated fleet.
    pub fn with_field(rng: R, screen: S, my_field: Field) -> Self {
        Self {
            state: AgentState::GenerateNegData,
            parser: Parser::new(),
            my_field,
            enemy_field: Field::new(FieldPosition::Unknown),
            my_data: NegotiationData::default(),
            their_data: NegotiationData::default(),
            last_error: None,
            guesses: 0,
            rng,
            screen,
        }
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    /// Boat status bits of our own fleet.
    pub fn status(&self) -> u8 {
        self.my_field.boat_states()
    }

    /// Boat status bits of the opponent's fleet, as far as we know.
    pub fn enemy_status(&self) -> u8 {
        self.enemy_field.boat_states()
    }

    pub fn my_field(&self) -> &Field {
        &self.my_field
    }

    pub fn enemy_field(&self) -> &Field {
        &self.enemy_field
    }

    /// Our own negotiation record (zeroed until generated).
    pub fn negotiation(&self) -> &NegotiationData {
        &self.my_data
    }

    /// Why the agent became invalid, if it did.
    pub fn last_error(&self) -> Option<AgentError> {
        self.last_error
    }

    /// Number of coordinate sentences sent so far.
    pub fn guesses(&self) -> usize {
        self.guesses
    }

    /// Feed one character (or `None` for "nothing new") and encode the
    /// resulting sentence, if any, into `out`. Returns its length.
    pub fn run(&mut self, input: Option<u8>, out: &mut [u8; PROTOCOL_MAX_MESSAGE_LEN]) -> usize {
        let Some(message) = self.step(input) else {
            return 0;
        };
        match message.encode(out) {
            Ok(len) => len,
            Err(e) => {
                self.apply(Reaction::fail(AgentError::Encode(e)));
                0
            }
        }
    }

    /// Feed one character (or `None`) and return the message to transmit.
    pub fn step(&mut self, input: Option<u8>) -> Option<Message> {
        let status = input.map(|b| self.parser.decode(b));
        let reaction = self.react(status);
        self.apply(reaction)
    }

    fn apply(&mut self, reaction: Reaction) -> Option<Message> {
        if let Some(error) = reaction.error {
            log::warn!("agent invalid in {:?}: {}", self.state, error);
            self.last_error = Some(error);
            self.screen.show_error(&error);
        }
        if reaction.next != self.state {
            log::debug!("agent {:?} -> {:?}", self.state, reaction.next);
        }
        self.state = reaction.next;
        if let Some(turn) = reaction.turn {
            self.screen.draw(&self.my_field, &self.enemy_field, turn);
        }
        reaction.message
    }

    fn react(&mut self, status: Option<Result<ParserStatus, ParseError>>) -> Reaction {
        let state = self.state;
        // A parse failure overrides every state, terminal ones included.
        let parsed = match status {
            Some(Err(e)) => return Reaction::fail(AgentError::Parsing(e)),
            Some(Ok(ParserStatus::Parsed(message))) => Some(message),
            _ => None,
        };
        if state.is_terminal() {
            return Reaction::stay(state);
        }

        match (state, parsed) {
            (AgentState::GenerateNegData, _) => {
                self.my_data = NegotiationData::generate(&mut self.rng);
                Reaction::to(AgentState::SentChallenge).send(Message::Cha {
                    encrypted_guess: self.my_data.encrypted_guess,
                    hash: self.my_data.hash,
                })
            }
            (
                AgentState::SentChallenge,
                Some(Message::Cha {
                    encrypted_guess,
                    hash,
                }),
            ) => {
                self.their_data.encrypted_guess = encrypted_guess;
                self.their_data.hash = hash;
                Reaction::to(AgentState::DeterminingTurnOrder).send(Message::Det {
                    guess: self.my_data.guess,
                    encryption_key: self.my_data.encryption_key,
                })
            }
            (
                AgentState::DeterminingTurnOrder,
                Some(Message::Det {
                    guess,
                    encryption_key,
                }),
            ) => {
                self.their_data.guess = guess;
                self.their_data.encryption_key = encryption_key;
                if !self.their_data.is_valid() {
                    return Reaction::fail(AgentError::NegotiationData);
                }
                match turn_order(&self.my_data, &self.their_data) {
                    TurnOrder::Tie => Reaction::fail(AgentError::Ordering),
                    TurnOrder::Start => Reaction::to(AgentState::SendingGuess).draw(Turn::Mine),
                    TurnOrder::Defer => {
                        Reaction::to(AgentState::WaitingForGuess).draw(Turn::Theirs)
                    }
                }
            }
            (AgentState::SendingGuess, _) => match self.pick_target() {
                Some(guess) => {
                    self.guesses += 1;
                    Reaction::to(AgentState::WaitingForHit).send(Message::Coo(guess))
                }
                None => Reaction::fail(AgentError::NoTargets),
            },
            (AgentState::WaitingForHit, Some(Message::Hit(guess))) => {
                if let Err(e) = self.enemy_field.update_knowledge(&guess) {
                    return Reaction::fail(AgentError::OutOfRange(e));
                }
                if self.enemy_field.boat_states() == 0 {
                    Reaction::to(AgentState::Won).draw(Turn::None)
                } else {
                    Reaction::to(AgentState::WaitingForGuess).draw(Turn::Theirs)
                }
            }
            (AgentState::WaitingForGuess, Some(Message::Coo(mut guess))) => {
                if let Err(e) = self.my_field.register_enemy_attack(&mut guess) {
                    return Reaction::fail(AgentError::OutOfRange(e));
                }
                let reaction = if self.my_field.boat_states() == 0 {
                    Reaction::to(AgentState::Lost).draw(Turn::None)
                } else {
                    Reaction::to(AgentState::SendingGuess).draw(Turn::Mine)
                };
                reaction.send(Message::Hit(guess))
            }
            _ => Reaction::stay(state),
        }
    }

    /// Uniformly random opponent cell that is still unknown.
    fn pick_target(&mut self) -> Option<GuessData> {
        let unknown = self.enemy_field.cells_matching(FieldPosition::Unknown);
        let count = unknown.count_ones();
        if count == 0 {
            return None;
        }
        let (row, col) = unknown.nth_set_bit(self.rng.random_range(0..count))?;
        Some(GuessData::new(row as u8, col as u8))
    }
}

impl<R, S> fmt::Debug for Agent<R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("state", &self.state)
            .field("my_field", &self.my_field)
            .field("enemy_field", &self.enemy_field)
            .field("guesses", &self.guesses)
            .finish()
    }
}
