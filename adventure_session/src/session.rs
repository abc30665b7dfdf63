//! The turn loop: parse, perform, digest, narrate.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use adventure_rules::{load_path, Command, CommandError, GameState, Score, World};

use crate::collaborators::{CommandParser, Narrator};
use crate::config::SessionConfig;
use crate::error::SessionError;

/// Unique identifier for a play session, attached to its log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What happened in response to one line of input.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    /// Narration to show the player.
    pub text: String,
    /// `None` when the input was not understood.
    pub command: Option<Command>,
    pub refusal: Option<CommandError>,
    pub state: GameState,
}

/// A running game wired to its parser and narrator.
pub struct Session<P, N> {
    id: SessionId,
    world: World,
    parser: P,
    narrator: N,
    state: GameState,
}

impl<P: CommandParser, N: Narrator> Session<P, N> {
    /// Start a session on an already loaded world.
    ///
    /// The world is digested once so the starting location counts as seen.
    pub fn new(mut world: World, parser: P, narrator: N) -> Self {
        let id = SessionId::new();
        let state = world.digest();
        tracing::info!(session = %id, title = %world.meta().title, "session started");
        Self {
            id,
            world,
            parser,
            narrator,
            state,
        }
    }

    /// Load the configured world and start a session on it.
    pub fn from_config(
        config: &SessionConfig,
        parser: P,
        narrator: N,
    ) -> Result<Self, SessionError> {
        let mut world = load_path(&config.world)?;
        world.set_turn_policy(config.turn_policy);
        Ok(Self::new(world, parser, narrator))
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Read access for collaborators. All changes go through [`Session::submit`].
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Scoring snapshot for the summary screen.
    pub fn summary(&self) -> Score {
        self.world.score()
    }

    /// Narrate the ending once the game is over.
    ///
    /// A world can already be finished when the session starts, in which
    /// case no turn will ever announce it.
    pub fn ending_text(&mut self) -> Option<String> {
        if self.state.is_over() {
            Some(self.narrator.ending(&self.world, self.state))
        } else {
            None
        }
    }

    /// Handle one line of player input.
    pub fn submit(&mut self, input: &str) -> Result<TurnReport, SessionError> {
        if self.state.is_over() {
            return Err(SessionError::GameOver);
        }

        let span = tracing::info_span!("turn", session = %self.id, turn = self.world.turns());
        let _guard = span.enter();

        let Some(command) = self.parser.parse(&self.world, input) else {
            tracing::debug!(input, "input not understood");
            return Ok(TurnReport {
                text: self.narrator.not_understood(&self.world, input),
                command: None,
                refusal: None,
                state: self.state,
            });
        };

        let result = self.world.perform(command);
        self.state = self.world.digest();

        let (mut text, refusal) = match result {
            Ok(change) => (self.narrator.narrate(&self.world, command, change), None),
            Err(error) => (self.narrator.refuse(&self.world, command, error), Some(error)),
        };
        if let Some(ending) = self.ending_text() {
            if !ending.is_empty() {
                text.push_str("\n\n");
                text.push_str(&ending);
            }
        }

        Ok(TurnReport {
            text,
            command: Some(command),
            refusal,
            state: self.state,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{PlainNarrator, VerbNounParser};
    use adventure_rules::{load_json, TransitionFailure, TurnPolicy};

    const VAULT: &str = r#"{
        "meta": { "title": "The Vault" },
        "items": [
            { "name": "key", "descriptions": ["A small key."], "collectible": true },
            { "name": "lever", "descriptions": ["The lever is up.", "The lever is down."],
              "transitions": [ { "actions": ["use"], "from": 0, "to": 1, "target": "lever.0" } ] },
            { "name": "box", "descriptions": ["A closed box.", "An open box."],
              "transitions": [ { "actions": ["use"], "from": 0, "to": 1, "target": "box.0",
                                 "requirements": { "items": ["lever.1"] } } ] }
        ],
        "locations": [
            { "name": "hall", "descriptions": ["A hall."], "items": ["key", "lever", "box"], "exits": ["vault"] },
            { "name": "vault", "descriptions": ["A vault."], "exits": ["hall"] }
        ],
        "endings": [
            { "state": "win", "reason": "The vault is yours.",
              "requirements": { "inventory": ["key"], "current_location": "vault" } }
        ]
    }"#;

    fn session() -> Session<VerbNounParser, PlainNarrator> {
        Session::new(load_json(VAULT).unwrap(), VerbNounParser::new(), PlainNarrator::new())
    }

    #[test]
    fn test_new_session_discovers_start() {
        let session = session();

        assert_eq!(session.state(), GameState::Continue);
        assert_eq!(session.summary().locations_discovered, 1);
        assert_eq!(session.summary().items_discovered, 3);
    }

    #[test]
    fn test_session_can_start_finished() {
        let world = load_json(
            r#"{
                "locations": [ { "name": "throne room", "descriptions": ["A throne room."] } ],
                "endings": [ { "state": "win", "reason": "You were king all along.",
                               "requirements": { "current_location": "throne room" } } ]
            }"#,
        )
        .unwrap();
        let mut session = Session::new(world, VerbNounParser::new(), PlainNarrator::new());

        assert_eq!(session.state(), GameState::Victory);
        let text = session.ending_text().unwrap();
        assert!(text.contains("You were king all along."));
        assert!(matches!(session.submit("look"), Err(SessionError::GameOver)));
    }

    #[test]
    fn test_win_by_key() {
        let mut session = session();

        let report = session.submit("take key").unwrap();
        assert_eq!(report.text, "Taken: key.");
        assert_eq!(report.state, GameState::Continue);

        let report = session.submit("go vault").unwrap();
        assert_eq!(report.state, GameState::Victory);
        assert!(report.text.starts_with("A vault."));
        assert!(report.text.contains("The vault is yours."));

        assert!(matches!(session.submit("look"), Err(SessionError::GameOver)));
        assert!(session.ending_text().is_some());
    }

    #[test]
    fn test_refused_command_is_reported() {
        let mut session = session();

        let report = session.submit("use box").unwrap();
        assert_eq!(
            report.refusal,
            Some(CommandError::Blocked(TransitionFailure::InvalidTarget))
        );
        assert_eq!(report.text, "Something required is not in the right state.");
        assert_eq!(session.world().turns(), 1);

        session.submit("pull lever").unwrap();
        let report = session.submit("open box").unwrap();
        assert!(report.refusal.is_none());
        assert_eq!(report.text, "An open box.");
    }

    #[test]
    fn test_not_understood_costs_nothing() {
        let mut session = session();

        let report = session.submit("dance wildly").unwrap();
        assert!(report.command.is_none());
        assert_eq!(report.text, "I don't understand that.");
        assert_eq!(session.world().turns(), 0);
    }

    #[test]
    fn test_from_config_applies_turn_policy() {
        let dir = tempfile::tempdir().unwrap();
        let world = dir.path().join("vault.json");
        std::fs::write(&world, VAULT).unwrap();

        let mut config = SessionConfig::new(&world);
        config.turn_policy = TurnPolicy::AcceptedOnly;
        let mut session =
            Session::from_config(&config, VerbNounParser::new(), PlainNarrator::new()).unwrap();

        session.submit("take vault").unwrap();
        assert_eq!(session.world().turns(), 0);
        assert_eq!(session.world().meta().title, "The Vault");
    }

    #[test]
    fn test_from_config_reports_load_failure() {
        let config = SessionConfig::new("does/not/exist.json");
        let result = Session::from_config(&config, VerbNounParser::new(), PlainNarrator::new());

        assert!(matches!(result, Err(SessionError::Load(_))));
    }
}
