//! Declarative node actions
//!
//! An `Action` is an immutable description (move, scale, rotate, wait, ...).
//! A `RunningAction` pairs it with a cursor and is advanced by the scene each
//! tick with a dt already scaled by the owning subtree's speed. Leftover time
//! from a finished step flows into the next step of a sequence in the same
//! tick, so instant steps (snap-back moves, cues) never cost a frame.

use glam::Vec2;

/// Game-level signal emitted by `Action::Run`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Time to build the next coral pair
    SpawnObstacle,
    /// The game-over roll has finished
    RollFinished,
}

/// Declarative action description
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Translate by `delta` over `duration` seconds
    MoveBy { delta: Vec2, duration: f32 },
    /// Scale to an absolute value over `duration` seconds
    ScaleTo { scale: f32, duration: f32 },
    /// Rotate by `angle` radians over `duration` seconds
    RotateBy { angle: f32, duration: f32 },
    /// Do nothing for a while
    Wait(f32),
    /// Cycle through `frames` texture frames, `time_per_frame` each
    Animate { frames: usize, time_per_frame: f32 },
    /// Emit a cue to the game
    Run(Cue),
    /// Detach the node (and its subtree) from the scene
    RemoveFromParent,
    Sequence(Vec<Action>),
    RepeatForever(Box<Action>),
}

impl Action {
    pub fn move_by(delta: Vec2, duration: f32) -> Self {
        Action::MoveBy { delta, duration }
    }

    pub fn sequence(steps: impl Into<Vec<Action>>) -> Self {
        Action::Sequence(steps.into())
    }

    pub fn forever(self) -> Self {
        Action::RepeatForever(Box::new(self))
    }
}

/// Node properties an action may touch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub scale: f32,
    pub rotation: f32,
    /// Current texture frame index
    pub frame: usize,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: 1.0,
            rotation: 0.0,
            frame: 0,
        }
    }
}

/// Side effects that reach outside the node's own transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    RemoveSelf,
    Cue(Cue),
}

#[derive(Debug, Clone, Default)]
struct Cursor {
    elapsed: f32,
    /// Start value captured for absolute actions (ScaleTo)
    from: Option<f32>,
    index: usize,
    child: Option<Box<Cursor>>,
}

enum Step {
    Running,
    /// Finished with this much unused time
    Done(f32),
}

/// An action in flight on a node
#[derive(Debug, Clone)]
pub struct RunningAction {
    action: Action,
    cursor: Cursor,
}

impl RunningAction {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            cursor: Cursor::default(),
        }
    }

    /// Advance by `dt`; returns true once the action has completed
    pub fn advance(&mut self, transform: &mut Transform, dt: f32, effects: &mut Vec<Effect>) -> bool {
        matches!(
            step(&self.action, &mut self.cursor, transform, dt, effects),
            Step::Done(_)
        )
    }
}

/// Clock for a timed leaf. Returns (progress before, progress after, step).
fn advance_clock(cursor: &mut Cursor, duration: f32, dt: f32) -> (f32, f32, Step) {
    let before = if duration <= 0.0 {
        0.0
    } else {
        (cursor.elapsed / duration).clamp(0.0, 1.0)
    };
    let available = (duration - cursor.elapsed).max(0.0);
    if dt >= available {
        cursor.elapsed = duration;
        (before, 1.0, Step::Done(dt - available))
    } else {
        cursor.elapsed += dt;
        (before, cursor.elapsed / duration, Step::Running)
    }
}

fn step(
    action: &Action,
    cursor: &mut Cursor,
    t: &mut Transform,
    dt: f32,
    effects: &mut Vec<Effect>,
) -> Step {
    match action {
        Action::MoveBy { delta, duration } => {
            let (before, after, step) = advance_clock(cursor, *duration, dt);
            t.position += *delta * (after - before);
            step
        }
        Action::RotateBy { angle, duration } => {
            let (before, after, step) = advance_clock(cursor, *duration, dt);
            t.rotation += angle * (after - before);
            step
        }
        Action::ScaleTo { scale, duration } => {
            let from = *cursor.from.get_or_insert(t.scale);
            let (_, after, step) = advance_clock(cursor, *duration, dt);
            t.scale = from + (scale - from) * after;
            step
        }
        Action::Wait(duration) => advance_clock(cursor, *duration, dt).2,
        Action::Animate {
            frames,
            time_per_frame,
        } => {
            let duration = *frames as f32 * time_per_frame;
            let (_, _, step) = advance_clock(cursor, duration, dt);
            if *frames > 0 && *time_per_frame > 0.0 {
                let index = (cursor.elapsed / time_per_frame) as usize;
                t.frame = index.min(frames - 1);
            }
            step
        }
        Action::Run(cue) => {
            effects.push(Effect::Cue(*cue));
            Step::Done(dt)
        }
        Action::RemoveFromParent => {
            effects.push(Effect::RemoveSelf);
            Step::Done(dt)
        }
        Action::Sequence(steps) => {
            let mut remaining = dt;
            loop {
                let Some(current) = steps.get(cursor.index) else {
                    return Step::Done(remaining);
                };
                let child = cursor.child.get_or_insert_with(Box::default);
                match step(current, child, t, remaining, effects) {
                    Step::Running => return Step::Running,
                    Step::Done(left) => {
                        cursor.index += 1;
                        cursor.child = None;
                        remaining = left;
                    }
                }
            }
        }
        Action::RepeatForever(inner) => {
            let mut remaining = dt;
            loop {
                let child = cursor.child.get_or_insert_with(Box::default);
                match step(inner, child, t, remaining, effects) {
                    Step::Running => return Step::Running,
                    Step::Done(left) => {
                        cursor.child = None;
                        // An iteration that consumed no time would spin forever
                        if left >= remaining {
                            return Step::Running;
                        }
                        remaining = left;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(action: &mut RunningAction, t: &mut Transform, dt: f32) -> (bool, Vec<Effect>) {
        let mut effects = Vec::new();
        let done = action.advance(t, dt, &mut effects);
        (done, effects)
    }

    #[test]
    fn test_move_by_interpolates() {
        let mut t = Transform::default();
        let mut a = RunningAction::new(Action::move_by(Vec2::new(-100.0, 0.0), 1.0));
        let (done, _) = run(&mut a, &mut t, 0.25);
        assert!(!done);
        assert!((t.position.x + 25.0).abs() < 1e-4);
        let (done, _) = run(&mut a, &mut t, 1.0);
        assert!(done);
        assert!((t.position.x + 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_duration_move_applies_fully() {
        let mut t = Transform::default();
        let mut a = RunningAction::new(Action::move_by(Vec2::new(50.0, 0.0), 0.0));
        let (done, _) = run(&mut a, &mut t, 0.0);
        assert!(done);
        assert_eq!(t.position.x, 50.0);
    }

    #[test]
    fn test_scale_pulse_returns_to_one() {
        let mut t = Transform::default();
        let mut a = RunningAction::new(Action::sequence([
            Action::ScaleTo { scale: 1.5, duration: 0.1 },
            Action::ScaleTo { scale: 1.0, duration: 0.1 },
        ]));
        run(&mut a, &mut t, 0.1);
        assert!((t.scale - 1.5).abs() < 1e-4);
        run(&mut a, &mut t, 0.05);
        assert!((t.scale - 1.25).abs() < 1e-3);
        let (done, _) = run(&mut a, &mut t, 0.05);
        assert!(done);
        assert!((t.scale - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_sequence_carries_leftover_into_instant_steps() {
        let mut t = Transform::default();
        let mut a = RunningAction::new(Action::sequence([
            Action::move_by(Vec2::new(10.0, 0.0), 0.5),
            Action::Run(Cue::RollFinished),
            Action::RemoveFromParent,
        ]));
        let (done, effects) = run(&mut a, &mut t, 0.6);
        assert!(done);
        assert_eq!(effects, vec![Effect::Cue(Cue::RollFinished), Effect::RemoveSelf]);
    }

    #[test]
    fn test_scroll_loop_snaps_back() {
        // Move left one tile over 2s, snap back instantly, forever
        let width = 20.0;
        let mut t = Transform::default();
        let mut a = RunningAction::new(
            Action::sequence([
                Action::move_by(Vec2::new(-width, 0.0), 2.0),
                Action::move_by(Vec2::new(width, 0.0), 0.0),
            ])
            .forever(),
        );
        run(&mut a, &mut t, 1.5);
        assert!((t.position.x + 15.0).abs() < 1e-4);
        // Crossing the seam: 0.5s finishes the move, snaps back, 0.5s into the next lap
        run(&mut a, &mut t, 1.0);
        assert!((t.position.x + 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_spawn_schedule_cues_once_per_interval() {
        let mut t = Transform::default();
        let mut a = RunningAction::new(
            Action::sequence([Action::Run(Cue::SpawnObstacle), Action::Wait(2.5)]).forever(),
        );
        let mut cues = 0;
        // 9.5 seconds in 0.5s steps: cues at 0, 2.5, 5.0, 7.5
        for _ in 0..19 {
            let (done, effects) = run(&mut a, &mut t, 0.5);
            assert!(!done);
            cues += effects.len();
        }
        assert_eq!(cues, 4);
    }

    #[test]
    fn test_repeat_of_instant_action_yields() {
        let mut t = Transform::default();
        let mut a = RunningAction::new(Action::Run(Cue::SpawnObstacle).forever());
        let (done, effects) = run(&mut a, &mut t, 1.0);
        assert!(!done);
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn test_animate_frames() {
        let mut t = Transform::default();
        let mut a = RunningAction::new(
            Action::Animate {
                frames: 4,
                time_per_frame: 0.2,
            }
            .forever(),
        );
        run(&mut a, &mut t, 0.45);
        assert_eq!(t.frame, 2);
        run(&mut a, &mut t, 0.4);
        // 0.85s into a 0.8s loop wraps to frame 0
        assert_eq!(t.frame, 0);
    }
}
