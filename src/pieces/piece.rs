//! Piece state: ownership, occupation and the movement queue.
//!
//! ## Movement
//!
//! A piece works through its queue one step at a time. Each tick the head
//! step is checked first: if the piece is within the arrival distance the
//! step is popped and returned to the caller, which applies its occupy and
//! notify flags. Otherwise the piece moves toward the step's target.
//!
//! Steps are only appended. The one exception is `cancel_movement`, used by
//! captures, which drops the queue and the in-flight step together.
//!
//! Occupation is recorded here but maintained by `GameState`, which keeps
//! the piece and the tile occupier lists in agreement.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::motion::smooth_damp;
use super::movement::MovementStep;
use crate::core::{PieceId, PieceTemplate, PlayerId, Tint, TintTransition, Vec3};
use crate::grid::GridAddress;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Piece {
    id: PieceId,
    name: String,
    owner: PlayerId,
    obstacle: bool,
    occupied: Option<GridAddress>,
    position: Vec3,
    velocity: Vec3,
    queue: VecDeque<MovementStep>,
    tint: Tint,
    tint_transition: Option<TintTransition>,
    moves_completed: u32,
}

impl Piece {
    #[must_use]
    pub fn new(id: PieceId, owner: PlayerId, template: &PieceTemplate, position: Vec3) -> Self {
        Self {
            id,
            name: template.name.clone(),
            owner,
            obstacle: template.obstacle,
            occupied: None,
            position,
            velocity: Vec3::ZERO,
            queue: VecDeque::new(),
            tint: Tint::WHITE,
            tint_transition: None,
            moves_completed: 0,
        }
    }

    #[must_use]
    pub fn id(&self) -> PieceId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    /// Hand the piece to another player.
    ///
    /// Captures never call this; a host uses it for conversion rules where a
    /// piece changes sides. It does not move the piece between the players'
    /// pool and in-play lists.
    pub fn set_owner(&mut self, owner: PlayerId) {
        self.owner = owner;
    }

    #[must_use]
    pub fn is_obstacle(&self) -> bool {
        self.obstacle
    }

    /// The tile this piece stands on.
    #[must_use]
    pub fn occupied_tile(&self) -> Option<GridAddress> {
        self.occupied
    }

    pub(crate) fn set_occupied(&mut self, tile: Option<GridAddress>) {
        self.occupied = tile;
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[must_use]
    pub fn is_moving(&self) -> bool {
        !self.queue.is_empty()
    }

    #[must_use]
    pub fn pending_steps(&self) -> usize {
        self.queue.len()
    }

    pub fn steps(&self) -> impl Iterator<Item = &MovementStep> {
        self.queue.iter()
    }

    #[must_use]
    pub fn moves_completed(&self) -> u32 {
        self.moves_completed
    }

    pub(crate) fn record_move(&mut self) {
        self.moves_completed += 1;
    }

    pub fn enqueue(&mut self, step: MovementStep) {
        self.queue.push_back(step);
    }

    /// Drop every queued step, including the one in flight.
    ///
    /// Returns how many steps were dropped.
    pub fn cancel_movement(&mut self) -> usize {
        let dropped = self.queue.len();
        self.queue.clear();
        self.velocity = Vec3::ZERO;
        dropped
    }

    /// Move toward the head step, or pop it if the piece has arrived.
    ///
    /// Returns the popped step. Callers loop until this returns `None` so
    /// that a step arriving mid-tick hands over to the next one.
    pub fn advance_motion(&mut self, dt: f32, epsilon: f32) -> Option<MovementStep> {
        let step = *self.queue.front()?;
        if self.position.distance(step.target) <= epsilon {
            self.queue.pop_front();
            self.position = step.target;
            self.velocity = Vec3::ZERO;
            return Some(step);
        }
        self.position = smooth_damp(
            self.position,
            step.target,
            &mut self.velocity,
            step.smooth_time,
            step.max_speed,
            dt,
        );
        None
    }

    // === Tint ===

    #[must_use]
    pub fn tint(&self) -> Tint {
        self.tint
    }

    /// Set the tint now, cancelling any running transition.
    pub fn change_colour(&mut self, tint: Tint) {
        self.tint = tint;
        self.tint_transition = None;
    }

    /// Fade to `tint` over `seconds`, replacing any running transition.
    pub fn change_colour_over(&mut self, tint: Tint, seconds: f32) {
        if seconds <= 0.0 {
            self.change_colour(tint);
            return;
        }
        self.tint_transition = Some(TintTransition::new(self.tint, tint, seconds));
    }

    #[must_use]
    pub fn is_fading(&self) -> bool {
        self.tint_transition.is_some()
    }

    pub fn advance_tint(&mut self, dt: f32) {
        if let Some(transition) = &mut self.tint_transition {
            self.tint = transition.advance(dt);
            if transition.is_finished() {
                self.tint_transition = None;
            }
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} of {}", self.name, self.id, self.owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pawn() -> Piece {
        Piece::new(PieceId(0), PlayerId(0), &PieceTemplate::default(), Vec3::ZERO)
    }

    fn run(piece: &mut Piece, ticks: usize) -> Vec<MovementStep> {
        let mut arrived = Vec::new();
        for _ in 0..ticks {
            while let Some(step) = piece.advance_motion(0.02, 0.01) {
                arrived.push(step);
            }
        }
        arrived
    }

    #[test]
    fn test_new_from_template() {
        let rock = Piece::new(PieceId(3), PlayerId(1), &PieceTemplate::new("Rock").obstacle(), Vec3::ZERO);
        assert_eq!(rock.name(), "Rock");
        assert!(rock.is_obstacle());
        assert_eq!(rock.owner(), PlayerId(1));
        assert!(rock.occupied_tile().is_none());
        assert_eq!(rock.to_string(), "Rock Piece(3) of Player 1");
    }

    #[test]
    fn test_set_owner() {
        let mut piece = pawn();
        piece.enqueue(MovementStep::new(Vec3::new(1.0, 0.0, 0.0), 0.1, 10.0));
        piece.set_owner(PlayerId(2));

        assert_eq!(piece.owner(), PlayerId(2));
        assert_eq!(piece.pending_steps(), 1);
    }

    #[test]
    fn test_steps_run_in_order() {
        let mut piece = pawn();
        let first = MovementStep::new(Vec3::new(1.0, 0.0, 0.0), 0.1, 10.0);
        let second = MovementStep::new(Vec3::new(1.0, 1.0, 0.0), 0.1, 10.0).notifying();
        piece.enqueue(first);
        piece.enqueue(second);

        let arrived = run(&mut piece, 200);
        assert_eq!(arrived, vec![first, second]);
        assert!(!piece.is_moving());
        assert_eq!(piece.position(), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_already_there_arrives_immediately() {
        let mut piece = pawn();
        piece.enqueue(MovementStep::new(Vec3::ZERO, 0.2, 5.0).notifying());

        let step = piece.advance_motion(0.02, 0.01);
        assert!(step.is_some_and(|s| s.notify_on_arrival));
        assert!(piece.advance_motion(0.02, 0.01).is_none());
    }

    #[test]
    fn test_cancel_movement() {
        let mut piece = pawn();
        piece.enqueue(MovementStep::new(Vec3::new(5.0, 0.0, 0.0), 0.2, 5.0));
        piece.enqueue(MovementStep::new(Vec3::new(5.0, 5.0, 0.0), 0.2, 5.0));
        run(&mut piece, 3);

        assert_eq!(piece.cancel_movement(), 2);
        assert!(!piece.is_moving());
        assert!(run(&mut piece, 10).is_empty());
    }

    #[test]
    fn test_colour_transition_replaces_previous() {
        let mut piece = pawn();
        piece.change_colour(Tint::BLACK);

        piece.change_colour_over(Tint::WHITE, 1.0);
        piece.advance_tint(0.5);
        assert_eq!(piece.tint(), Tint::rgb(0.5, 0.5, 0.5));

        let red = Tint::rgb(1.0, 0.0, 0.0);
        piece.change_colour_over(red, 0.1);
        for _ in 0..10 {
            piece.advance_tint(0.02);
        }
        assert_eq!(piece.tint(), red);
        assert!(!piece.is_fading());
    }

    #[test]
    fn test_instant_colour_cancels_fade() {
        let mut piece = pawn();
        piece.change_colour_over(Tint::BLACK, 2.0);
        piece.change_colour(Tint::WHITE);
        piece.advance_tint(1.0);
        assert_eq!(piece.tint(), Tint::WHITE);
    }
}
