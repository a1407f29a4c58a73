//! Plain-text rendering of a [`GameView`] for the terminal client.

use std::fmt;

use client_core::{DialScene, GameView, NeedleKind};
use shared::domain::{Phase, ZoneTier, MAX_PLAYERS, MIN_PLAYERS_TO_START};
use tokio::sync::watch;

/// One cell per two dial units, both ends included.
pub const GAUGE_CELLS: usize = 51;

pub fn render_view(view: &GameView) -> String {
    ViewText(view).to_string()
}

/// Renders every published view until the session drops its sender. A view
/// published right before the drop is still rendered.
pub async fn print_views(mut views: watch::Receiver<GameView>, mut emit: impl FnMut(String)) {
    while views.changed().await.is_ok() {
        let text = render_view(&views.borrow_and_update());
        emit(text);
    }
}

struct ViewText<'a>(&'a GameView);

impl fmt::Display for ViewText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;
        writeln!(f, "== {} ({}) ==", view.phase, view.role)?;

        if let Some(room) = &view.room {
            writeln!(
                f,
                "room {} ({}/{})",
                room.room_id,
                room.players.len(),
                MAX_PLAYERS
            )?;
            for player in &room.players {
                write!(f, "  {} {}", player.username, player.score)?;
                if view.is_local(player) {
                    f.write_str(" (you)")?;
                }
                if view.is_briefer(player) {
                    f.write_str(" [briefer]")?;
                }
                writeln!(f)?;
            }
        }

        if view.phase == Phase::Waiting {
            if view.can_start_game {
                writeln!(f, "type 'start' to begin")?;
            } else if view.players().len() < MIN_PLAYERS_TO_START {
                writeln!(f, "waiting for more players")?;
            } else {
                writeln!(f, "waiting for the host to start")?;
            }
        }

        if view.phase.is_in_round() {
            if let Some(card) = &view.card {
                writeln!(f, "card: {} <-> {}", card.left, card.right)?;
            }
            writeln!(f, "dial: |{}|", gauge(&DialScene::from_view(view)))?;
            if let Some(target) = view.target {
                writeln!(f, "target: {target}")?;
            }
            if !view.shown_clue.is_empty() {
                writeln!(f, "clue: {}", view.shown_clue)?;
            }
            if matches!(view.phase, Phase::Guessing | Phase::Revealing) {
                writeln!(f, "guess: {}", view.guess)?;
            }
            if let Some(result) = &view.result {
                writeln!(
                    f,
                    "answer: {}  {}",
                    result.target_value,
                    result.score_badge()
                )?;
            }
            if view.can_submit_clue {
                writeln!(f, "your turn: clue <text>")?;
            } else if view.can_submit_guess {
                writeln!(f, "your turn: guess <0-100>, then lock")?;
            } else if view.can_reveal {
                writeln!(f, "your turn: reveal")?;
            }
        }

        if let Some(err) = &view.last_error {
            writeln!(f, "error: {err}")?;
        }
        Ok(())
    }
}

/// Draws the scene as a strip of cells: zone tiers as digits, needles as
/// `T` (target), `G` (guess) and `*` (revealed target).
pub fn gauge(scene: &DialScene) -> String {
    let mut cells = vec!['-'; GAUGE_CELLS];
    for (index, cell) in cells.iter_mut().enumerate() {
        let value = (index * 2) as f64;
        if let Some((tier, _)) = scene
            .zone_arcs
            .iter()
            .find(|(_, arc)| arc.padded_start <= value && value <= arc.padded_end)
        {
            *cell = tier_digit(*tier);
        }
    }
    for needle in &scene.needles {
        let index = usize::from(needle.value.get()) / 2;
        cells[index.min(GAUGE_CELLS - 1)] = match needle.kind {
            NeedleKind::Target => 'T',
            NeedleKind::Guess => 'G',
            NeedleKind::RevealedTarget => '*',
        };
    }
    cells.into_iter().collect()
}

fn tier_digit(tier: ZoneTier) -> char {
    match tier {
        ZoneTier::Zone1 => '1',
        ZoneTier::Zone2 => '2',
        ZoneTier::Zone3 => '3',
        ZoneTier::Zone4 => '4',
    }
}

#[cfg(test)]
mod tests {
    use shared::domain::{
        Card, ConnectionId, Player, Role, Room, RoomId, RoundResult, ScaleValue, ScoreZones,
    };

    use super::*;

    fn value(raw: i64) -> ScaleValue {
        ScaleValue::new(raw).expect("scale value")
    }

    fn room(names: &[&str]) -> Room {
        Room {
            room_id: RoomId("AB12".into()),
            players: names
                .iter()
                .enumerate()
                .map(|(i, name)| Player {
                    id: ConnectionId(format!("conn-{i}")),
                    username: name.to_string(),
                    score: 0,
                })
                .collect(),
        }
    }

    #[test]
    fn waiting_room_lists_roster_and_start_hint() {
        let view = GameView {
            local_id: Some(ConnectionId("conn-0".into())),
            phase: Phase::Waiting,
            room: Some(room(&["alice", "bob"])),
            can_start_game: true,
            ..GameView::default()
        };
        let text = render_view(&view);
        assert!(text.contains("room AB12 (2/5)"));
        assert!(text.contains("  alice 0 (you)"));
        assert!(text.contains("  bob 0\n"));
        assert!(text.contains("type 'start' to begin"));
        assert!(!text.contains("dial:"));
    }

    #[test]
    fn lone_player_is_told_to_wait() {
        let view = GameView {
            local_id: Some(ConnectionId("conn-0".into())),
            phase: Phase::Waiting,
            room: Some(room(&["alice"])),
            ..GameView::default()
        };
        assert!(render_view(&view).contains("waiting for more players"));
    }

    #[test]
    fn briefer_gauge_shows_zones_and_target() {
        let view = GameView {
            phase: Phase::ChoosingClue,
            role: Role::Briefer,
            card: Some(Card {
                left: "cold".into(),
                right: "hot".into(),
            }),
            target: Some(value(72)),
            score_zones: Some(ScoreZones {
                zone1: (70..=74).map(value).collect(),
                zone2: (66..=69).map(value).collect(),
                ..ScoreZones::default()
            }),
            can_submit_clue: true,
            ..GameView::default()
        };
        let strip = gauge(&DialScene::from_view(&view));
        assert_eq!(strip.chars().count(), GAUGE_CELLS);
        assert_eq!(&strip[33..38], "221T1");

        let text = render_view(&view);
        assert!(text.contains("card: cold <-> hot"));
        assert!(text.contains("target: 72"));
        assert!(text.contains("your turn: clue <text>"));
    }

    #[test]
    fn reveal_shows_both_needles_and_badge() {
        let view = GameView {
            phase: Phase::Revealing,
            guess: value(0),
            result: Some(RoundResult {
                target_value: value(100),
                score_this_round: 2,
                total_scores: Vec::new(),
            }),
            last_error: Some("Room not found".into()),
            ..GameView::default()
        };
        let strip = gauge(&DialScene::from_view(&view));
        assert!(strip.starts_with('G'));
        assert!(strip.ends_with('*'));

        let text = render_view(&view);
        assert!(text.contains("answer: 100  +2"));
        assert!(text.contains("error: Room not found"));
    }

    #[tokio::test]
    async fn last_view_before_shutdown_is_printed() {
        let (views, view_rx) = watch::channel(GameView::default());
        views.send_replace(GameView {
            phase: Phase::Revealing,
            result: Some(RoundResult {
                target_value: value(40),
                score_this_round: 4,
                total_scores: Vec::new(),
            }),
            ..GameView::default()
        });
        drop(views);

        let mut printed = Vec::new();
        print_views(view_rx, |text| printed.push(text)).await;
        assert_eq!(printed.len(), 1);
        assert!(printed[0].contains("answer: 40  +4"));
    }
}
