//! Contact interpretation
//!
//! Precedence matters: a coral pair hands the player a score-trigger contact
//! just before any solid contact, and a consumed trigger must never be read
//! as a solid hit.

use super::category::{Category, CategorySet};
use super::physics::Contact;
use super::scene::NodeId;
use super::state::GameState;

/// How a contact between two categories is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// Body A is a live score trigger
    ScoreA,
    /// Body B is a live score trigger (A is not)
    ScoreB,
    /// A trigger that already paid out
    Consumed,
    /// Anything else: the player hit coral or the world
    Fatal,
}

/// What resolving a contact did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Game already over
    Ignored,
    Scored { trigger: NodeId },
    AlreadyConsumed,
    GameOver,
}

/// Classify a pair by category, in precedence order
pub fn classify(a: Category, b: Category) -> ContactKind {
    let score = CategorySet::only(Category::ScoreTrigger);
    let consumed = CategorySet::only(Category::Consumed);
    if score.contains(a) {
        ContactKind::ScoreA
    } else if score.contains(b) {
        ContactKind::ScoreB
    } else if consumed.contains(a) || consumed.contains(b) {
        ContactKind::Consumed
    } else {
        ContactKind::Fatal
    }
}

/// Apply one contact to the game
pub fn resolve_contact(state: &mut GameState, contact: Contact) -> ContactOutcome {
    if !state.is_running() {
        return ContactOutcome::Ignored;
    }

    let category = |id: NodeId| state.scene.body(id).map(|b| b.category);
    let (Some(a), Some(b)) = (category(contact.body_a), category(contact.body_b)) else {
        // One side was freed earlier this tick
        return ContactOutcome::Ignored;
    };

    match classify(a, b) {
        ContactKind::ScoreA => score(state, contact.body_a),
        ContactKind::ScoreB => score(state, contact.body_b),
        ContactKind::Consumed => ContactOutcome::AlreadyConsumed,
        ContactKind::Fatal => {
            log::info!("hit {:?} / {:?}", a, b);
            state.game_over();
            ContactOutcome::GameOver
        }
    }
}

fn score(state: &mut GameState, trigger: NodeId) -> ContactOutcome {
    state.increment_score(1);
    if let Some(body) = state.scene.body_mut(trigger) {
        body.category = Category::Consumed;
        body.contact_test_mask = CategorySet::only(Category::Consumed);
    }
    ContactOutcome::Scored { trigger }
}
