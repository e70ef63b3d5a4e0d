//! Fixed timestep simulation tick
//!
//! Core game loop that advances a session deterministically. All physics
//! constants are per tick; wall-clock time only decides how many ticks run.

use super::state::{GameEvent, GamePhase, Session};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (space/click/tap)
    pub jump: bool,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - the core jumps over obstacles by itself
    pub idle_mode: bool,
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Session was not running; nothing advanced
    Skipped,
    Continue,
    Dead,
    Completed,
}

/// Gap between the avatar and the next deadly obstacle at which idle mode jumps
const IDLE_JUMP_LEAD: f32 = 4.0 * SCROLL_SPEED;

/// Advance the session by one fixed timestep
pub fn tick(session: &mut Session, input: &TickInput) -> TickOutcome {
    // Requests made while not running are dropped, not carried into resume
    let was_running = session.phase == GamePhase::Running;
    let jump_requested = (session.take_jump_request() || input.jump) && was_running;

    if input.pause {
        match session.phase {
            GamePhase::Running => session.pause(),
            GamePhase::Paused => session.resume(),
            _ => {}
        }
    }

    if session.phase != GamePhase::Running {
        return TickOutcome::Skipped;
    }

    session.time_ticks += 1;

    let wants_jump = jump_requested || (input.idle_mode && idle_wants_jump(session));
    if wants_jump && session.avatar.jump() {
        let at = session.avatar.rect().bottom_center();
        session.emit(GameEvent::Jump { at });
    }

    // Physics first so collision sees this tick's position
    session.avatar.tick();
    session.world.tick(SCROLL_SPEED);

    let avatar_rect = session.avatar.rect();
    if session.world.check_collision(&avatar_rect) {
        let killer = session
            .world
            .colliding_obstacle(&avatar_rect)
            .map(|o| (o.id, o.shape()));
        session.phase = GamePhase::Dead;
        session.avatar.kill();
        session.world.halt();

        log::info!(
            "Died on obstacle {:?} at {:.0}% (attempt {}, tick {})",
            killer,
            session.world.progress_percent,
            session.attempts,
            session.time_ticks
        );
        session.emit(GameEvent::Death {
            at: avatar_rect.center(),
        });
        let report = session.progress_report();
        session.emit(GameEvent::AttemptEnded(report));
        return TickOutcome::Dead;
    }

    if session.world.is_complete() {
        session.phase = GamePhase::Completed;
        session.world.halt();

        log::info!(
            "Level '{}' complete (attempt {}, tick {})",
            session.world.name,
            session.attempts,
            session.time_ticks
        );
        session.emit(GameEvent::LevelComplete {
            at: avatar_rect.center(),
        });
        let report = session.progress_report();
        session.emit(GameEvent::AttemptEnded(report));
        return TickOutcome::Completed;
    }

    TickOutcome::Continue
}

/// Demo pilot: jump when the next deadly obstacle is about to arrive
fn idle_wants_jump(session: &Session) -> bool {
    let avatar = &session.avatar;
    if !avatar.on_ground {
        return false;
    }
    let right = avatar.x + avatar.width;
    session
        .world
        .next_deadly_ahead(right)
        .is_some_and(|o| o.rect.x - right <= IDLE_JUMP_LEAD)
}

/// Feed one frame of wall-clock time through the fixed-step accumulator.
///
/// Runs zero or more ticks and returns how many ran. One-shot inputs
/// (jump, pause) are applied to the first tick only.
pub fn advance(session: &mut Session, input: &TickInput, frame_dt: f32) -> u32 {
    let dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
    session.accumulator += dt;

    let mut input = input.clone();
    let mut substeps = 0;
    while session.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
        tick(session, &input);
        session.accumulator -= SIM_DT;
        substeps += 1;

        // Clear one-shot inputs after processing
        input.jump = false;
        input.pause = false;
    }

    if substeps == MAX_SUBSTEPS {
        log::debug!(
            "Substep cap hit, {:.4}s of simulation carried over",
            session.accumulator
        );
    }

    substeps
}
