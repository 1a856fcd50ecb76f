//! Session-level scenarios through the controller.

mod common;

use common::{reply, ScriptedEngine};
use remote_tictactoe::{
    EvalError, EvalVerdict, GameStatus, OPENING_PROMPT, Player, SessionController,
};
use std::time::Duration;

#[tokio::test]
async fn new_session_shows_the_opening_prompt() {
    let engine = ScriptedEngine::new(vec![]);
    let (session, _outcomes) = SessionController::with_pacing(engine, Duration::ZERO);

    let view = session.view();
    assert_eq!(view.status_line, OPENING_PROMPT);
    assert!(!view.restart_enabled);
    assert!(view.cells.iter().all(|c| c.mark.is_none() && !c.highlighted));
    assert!(!session.is_waiting());
}

#[tokio::test]
async fn a_move_starts_an_exchange_and_the_reply_lands() {
    let engine = ScriptedEngine::new(vec![reply("----X---O", EvalVerdict::Continue, &[])]);
    let (mut session, mut outcomes) =
        SessionController::with_pacing(engine.clone(), Duration::ZERO);

    session.handle_cell_activation(4);
    assert!(session.is_waiting());
    assert_eq!(session.state().turn(), Player::Opponent);
    assert_eq!(session.message(), "");
    assert!(session.view().restart_enabled);

    let outcome = outcomes.recv().await.expect("outcome should arrive");
    session.finish_exchange(outcome);

    assert!(!session.is_waiting());
    assert_eq!(session.message(), "Your turn.");
    let view = session.view();
    assert_eq!(view.cells[4].mark, Some(Player::Human));
    assert_eq!(view.cells[8].mark, Some(Player::Opponent));
    assert_eq!(engine.seen(), vec!["----X----".to_string()]);
}

#[tokio::test]
async fn moves_while_waiting_are_refused() {
    let engine = ScriptedEngine::new(vec![reply("----X---O", EvalVerdict::Continue, &[])]);
    let (mut session, mut outcomes) =
        SessionController::with_pacing(engine.clone(), Duration::ZERO);

    session.handle_cell_activation(4);
    session.handle_cell_activation(0);

    assert_eq!(session.message(), "Sorry, it's not your turn yet");
    assert_eq!(session.view().cells[0].mark, None);

    let outcome = outcomes.recv().await.expect("outcome should arrive");
    session.finish_exchange(outcome);
    assert_eq!(engine.seen().len(), 1, "refused move must not dispatch");
}

#[tokio::test]
async fn occupied_cell_is_refused_after_the_exchange() {
    let engine = ScriptedEngine::new(vec![reply("----X---O", EvalVerdict::Continue, &[])]);
    let (mut session, mut outcomes) = SessionController::with_pacing(engine, Duration::ZERO);

    session.handle_cell_activation(4);
    let outcome = outcomes.recv().await.expect("outcome should arrive");
    session.finish_exchange(outcome);

    session.handle_cell_activation(8);
    assert_eq!(session.message(), "Sorry, you can't move there...");
    assert_eq!(session.view().cells[8].mark, Some(Player::Opponent));
}

#[tokio::test]
async fn opponent_win_highlights_the_line_and_restart_recovers() {
    let engine = ScriptedEngine::new(vec![reply("OX-XO---O", EvalVerdict::OpponentWin, &[0, 4, 8])]);
    let (mut session, mut outcomes) = SessionController::with_pacing(engine, Duration::ZERO);

    session.handle_cell_activation(3);
    let outcome = outcomes.recv().await.expect("outcome should arrive");
    session.finish_exchange(outcome);

    assert_eq!(session.message(), "I won!");
    assert_eq!(session.state().status(), GameStatus::Won(Player::Opponent));
    let view = session.view();
    assert!(view.cells[0].highlighted);
    assert!(view.cells[4].highlighted);
    assert!(view.cells[8].highlighted);
    assert!(!view.cells[1].highlighted);
    assert!(view.restart_enabled);

    session.handle_cell_activation(5);
    assert_eq!(session.message(), "Sorry, game over!");

    session.handle_restart_request();
    let view = session.view();
    assert_eq!(view.status_line, OPENING_PROMPT);
    assert!(view.cells.iter().all(|c| c.mark.is_none() && !c.highlighted));
    assert!(!view.restart_enabled);
    assert_eq!(session.state().status(), GameStatus::InProgress);
    assert_eq!(session.state().turn(), Player::Human);
}

#[tokio::test]
async fn human_win_reports_you_won() {
    let engine = ScriptedEngine::new(vec![reply("XXXOO----", EvalVerdict::HumanWin, &[0, 1, 2])]);
    let (mut session, mut outcomes) = SessionController::with_pacing(engine, Duration::ZERO);

    session.handle_cell_activation(2);
    let outcome = outcomes.recv().await.expect("outcome should arrive");
    session.finish_exchange(outcome);

    assert_eq!(session.message(), "You won!");
    assert_eq!(session.state().status(), GameStatus::Won(Player::Human));
    let view = session.view();
    assert!(view.cells[0].highlighted);
    assert!(view.cells[1].highlighted);
    assert!(view.cells[2].highlighted);
}

#[tokio::test]
async fn reset_while_waiting_discards_the_late_reply() {
    let engine = ScriptedEngine::new(vec![reply("----X---O", EvalVerdict::Continue, &[])]);
    let (mut session, mut outcomes) = SessionController::with_pacing(engine, Duration::ZERO);

    session.handle_cell_activation(4);
    // The reply is already queued when the player restarts.
    let late = outcomes.recv().await.expect("outcome should arrive");
    session.handle_restart_request();

    session.finish_exchange(late);

    let view = session.view();
    assert_eq!(view.status_line, OPENING_PROMPT);
    assert!(view.cells.iter().all(|c| c.mark.is_none()));
    assert!(!view.restart_enabled, "stale reply must not arm restart");
    assert_eq!(session.state().turn(), Player::Human);
    assert!(!session.is_waiting());
}

#[tokio::test]
async fn engine_opens_the_game_on_status_activation() {
    let engine = ScriptedEngine::new(vec![reply("O--------", EvalVerdict::Continue, &[])]);
    let (mut session, mut outcomes) =
        SessionController::with_pacing(engine.clone(), Duration::ZERO);

    session.handle_status_activation();
    assert!(session.is_waiting());
    assert_eq!(session.state().turn(), Player::Opponent);

    let outcome = outcomes.recv().await.expect("outcome should arrive");
    session.finish_exchange(outcome);

    assert_eq!(engine.seen(), vec!["---------".to_string()]);
    assert_eq!(session.view().cells[0].mark, Some(Player::Opponent));
    assert_eq!(session.message(), "Your turn.");
}

#[tokio::test]
async fn status_activation_is_ignored_once_the_board_is_touched() {
    let engine = ScriptedEngine::new(vec![reply("----X---O", EvalVerdict::Continue, &[])]);
    let (mut session, mut outcomes) =
        SessionController::with_pacing(engine.clone(), Duration::ZERO);

    session.handle_cell_activation(4);
    let outcome = outcomes.recv().await.expect("outcome should arrive");
    session.finish_exchange(outcome);

    session.handle_status_activation();
    assert!(!session.is_waiting());
    assert_eq!(engine.seen().len(), 1);
}

#[tokio::test]
async fn status_activation_is_ignored_while_waiting() {
    let engine = ScriptedEngine::new(vec![reply("O--------", EvalVerdict::Continue, &[])]);
    let (mut session, mut outcomes) =
        SessionController::with_pacing(engine.clone(), Duration::ZERO);

    session.handle_status_activation();
    session.handle_status_activation();

    let outcome = outcomes.recv().await.expect("outcome should arrive");
    session.finish_exchange(outcome);
    assert_eq!(engine.seen().len(), 1, "second activation must not dispatch");
}

#[tokio::test]
async fn transport_failure_surfaces_and_play_continues() {
    let engine = ScriptedEngine::new(vec![
        Err(EvalError::Transport {
            reason: "connection refused".into(),
        }),
        reply("X---X---O", EvalVerdict::Continue, &[]),
    ]);
    let (mut session, mut outcomes) = SessionController::with_pacing(engine, Duration::ZERO);

    session.handle_cell_activation(0);
    let outcome = outcomes.recv().await.expect("outcome should arrive");
    session.finish_exchange(outcome);

    assert_eq!(
        session.message(),
        "Error! evaluation request failed: connection refused"
    );
    // The committed mark stays; the turn comes back to the human.
    assert_eq!(session.view().cells[0].mark, Some(Player::Human));
    assert_eq!(session.state().turn(), Player::Human);
    assert!(!session.is_waiting());

    session.handle_cell_activation(4);
    let outcome = outcomes.recv().await.expect("second outcome");
    session.finish_exchange(outcome);
    assert_eq!(session.message(), "Your turn.");
    assert_eq!(session.view().cells[8].mark, Some(Player::Opponent));
}

#[tokio::test]
async fn draw_reply_reports_the_tie() {
    let engine = ScriptedEngine::new(vec![reply("XOXXOXOXO", EvalVerdict::Draw, &[])]);
    let (mut session, mut outcomes) = SessionController::with_pacing(engine, Duration::ZERO);

    session.handle_cell_activation(0);
    let outcome = outcomes.recv().await.expect("outcome should arrive");
    session.finish_exchange(outcome);

    assert_eq!(session.message(), "We tied.");
    assert_eq!(session.state().status(), GameStatus::Draw);
    assert!(session.view().cells.iter().all(|c| !c.highlighted));
}
