//! Client side of the line protocol.

use log::{debug, info, warn};

use super::instance::{GameInstance, SharedGame};
use crate::error::{Error, Result};
use crate::protocol::{GameMessage, Message};
use crate::rules::RulesEngine;
use crate::strategy::{Strategy, StrategyFactory};

/// Plays games for one seat against a remote server.
///
/// Feed it every line the server sends; it answers with the lines to send
/// back. The strategy moves into each game at `START` and comes back at
/// `RESULT`. A `FORFEIT` discards it and builds a fresh one from the factory.
pub struct ClientSession<E: RulesEngine> {
    rules: E,
    factory: StrategyFactory<E>,
    strategy: Option<Box<dyn Strategy<E>>>,
    game: Option<SharedGame<E>>,
    opponent: Option<String>,
}

impl<E: RulesEngine> ClientSession<E> {
    pub fn new(rules: E, mut factory: StrategyFactory<E>) -> Result<Self> {
        let strategy = factory()?;
        Ok(Self {
            rules,
            factory,
            strategy: Some(strategy),
            game: None,
            opponent: None,
        })
    }

    /// The game in progress, if any.
    #[must_use]
    pub fn game(&self) -> Option<&SharedGame<E>> {
        self.game.as_ref()
    }

    #[must_use]
    pub fn opponent(&self) -> Option<&str> {
        self.opponent.as_deref()
    }

    /// Parse and handle one line.
    pub fn handle_line(&mut self, line: &str) -> Result<Vec<Message>> {
        let message = line.parse::<Message>()?;
        self.handle(message)
    }

    /// Handle one message, returning the replies.
    pub fn handle(&mut self, message: Message) -> Result<Vec<Message>> {
        match message {
            Message::Ping => Ok(vec![Message::Pong]),
            Message::Pong => Ok(Vec::new()),
            Message::Error(text) => {
                warn!("server error: {}", text);
                Ok(Vec::new())
            }
            Message::Text(text) => {
                info!("server: {}", text);
                Ok(Vec::new())
            }
            Message::Game(game) => self.handle_game(game),
        }
    }

    fn handle_game(&mut self, message: GameMessage) -> Result<Vec<Message>> {
        match message {
            GameMessage::Start { side, opponent } => {
                if let Some(previous) = self.game.take() {
                    warn!("new game started before the last one finished");
                    self.strategy = previous.lock().take_strategy();
                }
                let strategy = self.take_strategy()?;
                info!("{}: playing {} against {}", self.rules.name(), side, opponent);
                self.game = Some(GameInstance::client(self.rules.clone(), side, strategy).shared());
                self.opponent = Some(opponent);
                Ok(Vec::new())
            }
            GameMessage::State(state) => {
                let game = self
                    .game
                    .as_ref()
                    .ok_or_else(|| Error::Protocol(format!("state '{state}' outside a game")))?;
                let mut game = game.lock();
                if game.apply_remote_state(&state).is_err() {
                    return Ok(Vec::new());
                }
                Ok(game.request_move().map(Message::game_move).into_iter().collect())
            }
            GameMessage::Move(notation) => {
                debug!("ignoring move '{}' sent to a client", notation);
                Ok(Vec::new())
            }
            GameMessage::Error(text) => {
                warn!("game error: {}", text);
                Ok(Vec::new())
            }
            GameMessage::Message(text) => {
                info!("game: {}", text);
                Ok(Vec::new())
            }
            GameMessage::Result(result) => {
                if let Some(game) = self.game.take() {
                    let mut game = game.lock();
                    game.notify_result(result);
                    self.strategy = game.take_strategy();
                }
                info!("{}: result {}", self.rules.name(), result.as_char());
                Ok(Vec::new())
            }
            GameMessage::Forfeit(result) => {
                warn!("{}: forfeit ({}), replacing strategy", self.rules.name(), result.as_char());
                self.game = None;
                self.strategy = Some((self.factory)()?);
                Ok(Vec::new())
            }
        }
    }

    /// Shut the strategy down once no more games will come.
    pub fn shutdown(&mut self) -> Result<()> {
        if let Some(game) = self.game.take() {
            self.strategy = game.lock().take_strategy();
        }
        match self.strategy.as_mut() {
            Some(strategy) => strategy.on_shutdown(),
            None => Ok(()),
        }
    }

    fn take_strategy(&mut self) -> Result<Box<dyn Strategy<E>>> {
        match self.strategy.take() {
            Some(strategy) => Ok(strategy),
            None => (self.factory)(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameRng, Side};
    use crate::experience::InMemoryStorage;
    use crate::games::nim::NimRules;
    use crate::games::tictactoe::TicTacToeRules;
    use crate::search::GreedyConfig;
    use crate::strategy::{LearnedGreedy, NimClosedForm};

    fn nim_session() -> ClientSession<NimRules> {
        let factory: StrategyFactory<NimRules> =
            Box::new(|| Ok(Box::new(NimClosedForm::new(GameRng::new(1))) as Box<dyn Strategy<NimRules>>));
        ClientSession::new(NimRules::default(), factory).unwrap()
    }

    #[test]
    fn test_ping_pong() {
        let mut session = nim_session();
        assert_eq!(session.handle_line("@PING").unwrap(), vec![Message::Pong]);
        assert!(session.handle_line("@PONG").unwrap().is_empty());
    }

    #[test]
    fn test_moves_only_on_our_turn() {
        let mut session = nim_session();
        session.handle_line("@GAME:START:A:rival").unwrap();
        assert_eq!(session.opponent(), Some("rival"));
        assert_eq!(session.game().unwrap().lock().seat(), Some(Side::Away));

        assert!(session.handle_line("@GAME:STATE:0,3,5,7").unwrap().is_empty());
        assert_eq!(
            session.handle_line("@GAME:STATE:1,1,5,7").unwrap(),
            vec![Message::game_move("2,3")]
        );
    }

    #[test]
    fn test_state_outside_game_is_error() {
        let mut session = nim_session();
        assert!(matches!(
            session.handle_line("@GAME:STATE:0,1"),
            Err(Error::Protocol(_))
        ));
        assert!(session.handle_line("@BOGUS").is_err());
    }

    #[test]
    fn test_result_returns_strategy_and_learns() {
        let storage = InMemoryStorage::new();
        let shared = storage.clone();
        let factory: StrategyFactory<TicTacToeRules> = Box::new(move || {
            let greedy = LearnedGreedy::with_storage(GreedyConfig::default(), GameRng::new(2), Box::new(shared.clone()))?;
            Ok(Box::new(greedy) as Box<dyn Strategy<TicTacToeRules>>)
        });
        let mut session = ClientSession::new(TicTacToeRules::new(), factory).unwrap();

        session.handle_line("@GAME:START:H:rival").unwrap();
        let replies = session.handle_line("@GAME:STATE:0, , , , , , , , , ").unwrap();
        assert_eq!(replies.len(), 1);
        session.handle_line("@GAME:RESULT:H").unwrap();
        assert!(session.game().is_none());

        session.shutdown().unwrap();
        assert!(storage.contents().contains("#1-0-0#"));
    }

    #[test]
    fn test_forfeit_replaces_strategy() {
        let mut session = nim_session();
        session.handle_line("@GAME:START:H:rival").unwrap();
        session.handle_line("@GAME:FORFEIT:A").unwrap();
        assert!(session.game().is_none());

        session.handle_line("@GAME:START:H:rival").unwrap();
        let replies = session.handle_line("@GAME:STATE:0,3,5,7").unwrap();
        assert_eq!(replies, vec![Message::game_move("0,1")]);
    }
}
