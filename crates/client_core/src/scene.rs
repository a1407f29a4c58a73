//! Draw list for the dial, derived fresh from a [`GameView`] on every change.

use dial::{build_arc, merge_ranges, project, ArcDescriptor, ArcStyle, Point};
use shared::domain::{Phase, ScaleValue, ZoneTier};

use crate::controller::GameView;

pub const ZONE_RADIUS: f64 = 85.0;
pub const GUESS_RADIUS: f64 = 90.0;
pub const TARGET_RADIUS: f64 = 95.0;
pub const ZONE_OPACITY: f32 = 0.7;

pub fn zone_color(tier: ZoneTier) -> &'static str {
    match tier {
        ZoneTier::Zone1 => "#f97316",
        ZoneTier::Zone2 => "#facc15",
        ZoneTier::Zone3 => "#a3e635",
        ZoneTier::Zone4 => "#22c55e",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeedleKind {
    /// The hidden target as the briefer sees it while choosing a clue.
    Target,
    Guess,
    /// The target once the round result is in.
    RevealedTarget,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Needle {
    pub kind: NeedleKind,
    pub value: ScaleValue,
    pub tip: Point,
}

impl Needle {
    fn new(kind: NeedleKind, value: ScaleValue, radius: f64) -> Self {
        Self {
            kind,
            value,
            tip: project(value.as_f64(), radius),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DialScene {
    /// Score zone arcs, tier by tier. Empty unless the local briefer is choosing a clue.
    pub zone_arcs: Vec<(ZoneTier, ArcDescriptor)>,
    pub needles: Vec<Needle>,
}

impl DialScene {
    pub fn from_view(view: &GameView) -> Self {
        let mut scene = Self::default();
        if !view.phase.is_in_round() {
            return scene;
        }

        // The view only carries zones and target for the briefer choosing a clue.
        if let Some(zones) = &view.score_zones {
            for (tier, points) in zones.tiers() {
                let style = ArcStyle::new(zone_color(tier), ZONE_OPACITY);
                for range in merge_ranges(points.iter().map(|point| point.get())) {
                    scene
                        .zone_arcs
                        .push((tier, build_arc(range, ZONE_RADIUS, style.clone())));
                }
            }
        }
        if let Some(target) = view.target {
            scene
                .needles
                .push(Needle::new(NeedleKind::Target, target, TARGET_RADIUS));
        }

        if matches!(view.phase, Phase::Guessing | Phase::Revealing) {
            scene
                .needles
                .push(Needle::new(NeedleKind::Guess, view.guess, GUESS_RADIUS));
        }
        if let (Phase::Revealing, Some(result)) = (view.phase, &view.result) {
            scene.needles.push(Needle::new(
                NeedleKind::RevealedTarget,
                result.target_value,
                TARGET_RADIUS,
            ));
        }

        scene
    }

    pub fn shows_zones(&self) -> bool {
        !self.zone_arcs.is_empty()
    }

    pub fn needle(&self, kind: NeedleKind) -> Option<&Needle> {
        self.needles.iter().find(|needle| needle.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use shared::domain::{Card, RoundResult, ScoreZones};

    use super::*;

    fn value(raw: i64) -> ScaleValue {
        ScaleValue::new(raw).expect("scale value")
    }

    fn briefer_view() -> GameView {
        GameView {
            phase: Phase::ChoosingClue,
            card: Some(Card {
                left: "cold".into(),
                right: "hot".into(),
            }),
            target: Some(value(73)),
            score_zones: Some(ScoreZones {
                zone1: [60, 61, 62, 63, 64, 65, 80].into_iter().map(value).collect(),
                zone2: (66..=70).map(value).collect(),
                ..ScoreZones::default()
            }),
            ..GameView::default()
        }
    }

    #[test]
    fn lobby_has_nothing_to_draw() {
        assert_eq!(DialScene::from_view(&GameView::default()), DialScene::default());
    }

    #[test]
    fn briefer_sees_merged_zone_arcs_and_target() {
        let scene = DialScene::from_view(&briefer_view());
        let zone1: Vec<_> = scene
            .zone_arcs
            .iter()
            .filter(|(tier, _)| *tier == ZoneTier::Zone1)
            .map(|(_, arc)| (arc.padded_start, arc.padded_end))
            .collect();
        assert_eq!(zone1.len(), 2);
        assert!((zone1[0].0 - 59.9).abs() < 1e-9);
        assert!((zone1[0].1 - 65.1).abs() < 1e-9);
        assert_eq!(
            scene
                .zone_arcs
                .iter()
                .filter(|(tier, _)| *tier == ZoneTier::Zone2)
                .count(),
            1
        );
        assert!(scene
            .zone_arcs
            .iter()
            .all(|(tier, arc)| arc.style.color == zone_color(*tier) && arc.radius == ZONE_RADIUS));

        let target = scene.needle(NeedleKind::Target).expect("target needle");
        assert_eq!(target.value, value(73));
        assert_eq!(scene.needle(NeedleKind::Guess), None);
    }

    #[test]
    fn guessing_shows_only_the_guess_pointer() {
        let view = GameView {
            phase: Phase::Guessing,
            ..GameView::default()
        };
        let scene = DialScene::from_view(&view);
        assert!(!scene.shows_zones());
        let guess = scene.needle(NeedleKind::Guess).expect("guess needle");
        assert_eq!(guess.tip, Point::new(0.0, -GUESS_RADIUS));
    }

    #[test]
    fn revealing_with_result_adds_the_real_target() {
        let view = GameView {
            phase: Phase::Revealing,
            guess: value(70),
            result: Some(RoundResult {
                target_value: value(73),
                score_this_round: 3,
                total_scores: Vec::new(),
            }),
            ..GameView::default()
        };
        let scene = DialScene::from_view(&view);
        assert_eq!(scene.needles.len(), 2);
        assert_eq!(
            scene.needle(NeedleKind::RevealedTarget).map(|n| n.value),
            Some(value(73))
        );
    }
}
