//! Score counter and its label

use glam::Vec2;

use super::action::Action;
use super::scene::{NodeId, NodeKind, Scene};
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBoard {
    pub value: u32,
    pub label: NodeId,
    /// Play the scale pulse on every refresh
    pub pulse: bool,
}

impl ScoreBoard {
    /// Label centered near the top of the screen, in front of everything
    pub fn spawn(scene: &mut Scene, viewport: Vec2) -> Self {
        let label = scene.add(
            scene.root(),
            NodeKind::Label {
                text: String::new(),
            },
            Vec2::new(viewport.x / 2.0, viewport.y * 0.9),
        );
        if let Some(node) = scene.get_mut(label) {
            node.z = SCORE_Z;
        }
        Self {
            value: 0,
            label,
            pulse: true,
        }
    }

    pub fn increment(&mut self, scene: &mut Scene, by: u32) {
        self.value = self.value.saturating_add(by);
        self.refresh(scene);
    }

    pub fn reset(&mut self, scene: &mut Scene) {
        self.value = 0;
        self.refresh(scene);
    }

    pub fn pulse_action() -> Action {
        Action::sequence([
            Action::ScaleTo {
                scale: SCORE_PULSE_SCALE,
                duration: SCORE_PULSE_TIME,
            },
            Action::ScaleTo {
                scale: 1.0,
                duration: SCORE_PULSE_TIME,
            },
        ])
    }

    fn refresh(&self, scene: &mut Scene) {
        if let Some(node) = scene.get_mut(self.label) {
            node.kind = NodeKind::Label {
                text: self.value.to_string(),
            };
        }
        if self.pulse {
            scene.run(self.label, Self::pulse_action());
        }
    }

    pub fn text<'a>(&self, scene: &'a Scene) -> Option<&'a str> {
        match &scene.get(self.label)?.kind {
            NodeKind::Label { text } => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_updates_label_and_pulses() {
        let mut scene = Scene::new();
        let mut score = ScoreBoard::spawn(&mut scene, Vec2::new(1024.0, 768.0));
        score.increment(&mut scene, 1);
        score.increment(&mut scene, 1);
        assert_eq!(score.value, 2);
        assert_eq!(score.text(&scene), Some("2"));

        scene.advance(0.1);
        let scale = scene.get(score.label).map(|n| n.transform.scale).unwrap_or_default();
        assert!((scale - 1.5).abs() < 1e-4);
        scene.advance(0.1);
        let scale = scene.get(score.label).map(|n| n.transform.scale).unwrap_or_default();
        assert!((scale - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_reset() {
        let mut scene = Scene::new();
        let mut score = ScoreBoard::spawn(&mut scene, Vec2::new(1024.0, 768.0));
        score.increment(&mut scene, 5);
        score.reset(&mut scene);
        assert_eq!(score.value, 0);
        assert_eq!(score.text(&scene), Some("0"));
    }

    #[test]
    fn test_pulse_disabled() {
        let mut scene = Scene::new();
        let mut score = ScoreBoard::spawn(&mut scene, Vec2::new(1024.0, 768.0));
        score.pulse = false;
        score.increment(&mut scene, 1);
        assert!(scene.get(score.label).is_some_and(|n| n.actions().is_empty()));
    }
}
