//! Driving a session once per display frame.
//!
//! The host supplies a [`TickScheduler`] backed by whatever it uses for
//! frame callbacks (`requestAnimationFrame`, a timer, a test harness) and
//! calls [`RenderLoop::on_tick`] whenever a scheduled tick fires.

use tracing::debug;

use crate::media::MediaSource;
use crate::session::{MosaicSession, TickOutcome};

/// Requests a callback on the next display frame.
pub trait TickScheduler {
    fn schedule_next_tick(&mut self);
}

/// Re-arms the scheduler after every tick until stopped.
#[derive(Debug)]
pub struct RenderLoop<S> {
    scheduler: S,
    running: bool,
}

impl<S: TickScheduler> RenderLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            running: false,
        }
    }

    /// Schedule the first tick. Does nothing if already running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        debug!("render loop started");
        self.running = true;
        self.scheduler.schedule_next_tick();
    }

    /// Stop re-scheduling. A tick already scheduled becomes a no-op.
    pub fn stop(&mut self) {
        if self.running {
            debug!("render loop stopped");
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Handle a fired tick: advance the session and schedule the next one.
    ///
    /// Returns `None` when the loop is stopped.
    pub fn on_tick<M: MediaSource>(&mut self, session: &mut MosaicSession<M>) -> Option<TickOutcome> {
        if !self.running {
            return None;
        }
        let outcome = session.tick();
        self.scheduler.schedule_next_tick();
        Some(outcome)
    }
}

/// Scheduler that only counts requests, for driving a loop by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualScheduler {
    pending: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ticks requested and not yet fired.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Consume one pending tick. Returns `false` if none was requested.
    pub fn fire(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        self.pending -= 1;
        true
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule_next_tick(&mut self) {
        self.pending += 1;
    }
}

/// Fire pending ticks of a manually scheduled loop, at most `limit` times.
///
/// Returns the outcome of every tick that ran.
pub fn run_manual<M: MediaSource>(
    render_loop: &mut RenderLoop<ManualScheduler>,
    session: &mut MosaicSession<M>,
    limit: usize,
) -> Vec<TickOutcome> {
    let mut outcomes = Vec::new();
    while outcomes.len() < limit && render_loop.scheduler_mut().fire() {
        match render_loop.on_tick(session) {
            Some(outcome) => outcomes.push(outcome),
            None => break,
        }
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MosaicConfig;
    use crate::frame::Frame;
    use crate::media::{FrameSequence, LiveSource, StillSource};

    #[test]
    fn test_start_schedules_once() {
        let mut render_loop = RenderLoop::new(ManualScheduler::new());
        render_loop.start();
        render_loop.start();
        assert!(render_loop.is_running());
        assert_eq!(render_loop.scheduler().pending(), 1);
    }

    #[test]
    fn test_each_tick_reschedules() {
        let mut session = MosaicSession::new(MosaicConfig::default());
        session.load(StillSource::new(Frame::solid(8, 8, [1, 2, 3])));
        let mut render_loop = RenderLoop::new(ManualScheduler::new());
        render_loop.start();

        let outcomes = run_manual(&mut render_loop, &mut session, 3);
        assert_eq!(outcomes, vec![TickOutcome::Rendered; 3]);
        assert_eq!(render_loop.scheduler().pending(), 1);
    }

    #[test]
    fn test_stopped_loop_ignores_ticks() {
        let mut session: MosaicSession<StillSource> = MosaicSession::default();
        let mut render_loop = RenderLoop::new(ManualScheduler::new());
        render_loop.start();
        render_loop.stop();
        assert_eq!(render_loop.on_tick(&mut session), None);
        assert!(run_manual(&mut render_loop, &mut session, 5).is_empty());
    }

    #[test]
    fn test_loop_keeps_running_while_not_ready() {
        let mut session = MosaicSession::new(MosaicConfig::default());
        session.load(LiveSource::new());
        let mut render_loop = RenderLoop::new(ManualScheduler::new());
        render_loop.start();

        let outcomes = run_manual(&mut render_loop, &mut session, 2);
        assert_eq!(outcomes, vec![TickOutcome::NotReady; 2]);

        session
            .media_mut()
            .unwrap()
            .push_frame(Frame::solid(4, 4, [0, 0, 0]));
        assert_eq!(run_manual(&mut render_loop, &mut session, 1), vec![TickOutcome::Rendered]);
    }

    #[test]
    fn test_frozen_playback_until_paused() {
        let mut seq = FrameSequence::new(vec![
            Frame::solid(4, 4, [0, 0, 0]),
            Frame::solid(4, 4, [9, 9, 9]),
        ])
        .unwrap();
        seq.play_pause().unwrap();

        let mut session = MosaicSession::new(MosaicConfig {
            freeze_frame: true,
            ..MosaicConfig::default()
        });
        session.load(seq);
        let mut render_loop = RenderLoop::new(ManualScheduler::new());
        render_loop.start();

        assert_eq!(run_manual(&mut render_loop, &mut session, 2), vec![TickOutcome::Frozen; 2]);
        session.play_pause().unwrap();
        assert_eq!(run_manual(&mut render_loop, &mut session, 1), vec![TickOutcome::Rendered]);
    }
}
