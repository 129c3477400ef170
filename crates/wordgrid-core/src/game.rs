//! The normal game plus an optional speed round running beside it.

use std::sync::Arc;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::chunk::{CellCoord, ChunkCoord};
use crate::error::WordGridError;
use crate::feedback::{Color, Feedback};
use crate::lexicon::Lexicon;
use crate::score::SpeedTotals;
use crate::selection::WordCheck;
use crate::session::{SelectionResult, Session};
use crate::snapshot::Snapshot;
use crate::speed::{speed_mode_points, SpeedTimer};

/// Result of submitting a selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub check: WordCheck,
    pub feedback: Option<Feedback>,
    pub expanded: Option<ChunkCoord>,
    /// Points earned, in a speed round.
    pub points: Option<u32>,
    /// The caller should save a fresh snapshot.
    pub persist: bool,
}

/// A finished speed round. The totals changed, so the caller should save.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummary {
    pub score: u32,
    pub feedback: Feedback,
    pub totals: SpeedTotals,
}

/// Live state of a speed round, for the HUD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedStatus {
    pub score: u32,
    pub remaining_ms: f64,
    pub progress: f64,
    pub border_color: Color,
}

/// What a frame tick changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// Another frame is needed for the camera or the round timer.
    pub needs_frame: bool,
    pub round_ended: Option<RoundSummary>,
}

#[derive(Debug, Clone)]
struct SpeedRound {
    session: Session,
    timer: SpeedTimer,
    score: u32,
}

#[derive(Debug, Clone)]
pub struct Game {
    normal: Session,
    speed: Option<SpeedRound>,
    totals: SpeedTotals,
    /// Seeds for sessions created after start-up.
    seeds: ChaCha8Rng,
}

impl Game {
    pub fn new(lexicon: Arc<Lexicon>, seed: u64) -> Self {
        let mut seeds = ChaCha8Rng::seed_from_u64(seed);
        let normal = Session::new(lexicon, seeds.next_u64());
        Self {
            normal,
            speed: None,
            totals: SpeedTotals::default(),
            seeds,
        }
    }

    pub fn from_snapshot(
        lexicon: Arc<Lexicon>,
        snapshot: &Snapshot,
        seed: u64,
    ) -> Result<Self, WordGridError> {
        let mut seeds = ChaCha8Rng::seed_from_u64(seed);
        let normal = Session::restore(lexicon, snapshot, seeds.next_u64())?;
        Ok(Self {
            normal,
            speed: None,
            totals: snapshot.speed_totals(),
            seeds,
        })
    }

    /// Restore from saved JSON, or start fresh when there is none or it is unusable.
    ///
    /// The flag reports whether the saved game was restored.
    pub fn restore_or_new(lexicon: Arc<Lexicon>, saved: Option<&str>, seed: u64) -> (Self, bool) {
        let Some(json) = saved else {
            return (Self::new(lexicon, seed), false);
        };
        let restored = Snapshot::from_json(json)
            .and_then(|snapshot| Self::from_snapshot(lexicon.clone(), &snapshot, seed));
        match restored {
            Ok(game) => {
                tracing::info!(chunks = game.normal.world().len(), "Restored saved game");
                (game, true)
            }
            Err(err) => {
                tracing::warn!(error = %err, code = err.code(), "Discarding saved game");
                (Self::new(lexicon, seed), false)
            }
        }
    }

    /// The session input currently goes to.
    pub fn session(&self) -> &Session {
        match &self.speed {
            Some(round) => &round.session,
            None => &self.normal,
        }
    }

    pub fn session_mut(&mut self) -> &mut Session {
        match &mut self.speed {
            Some(round) => &mut round.session,
            None => &mut self.normal,
        }
    }

    pub fn normal_session(&self) -> &Session {
        &self.normal
    }

    pub fn lexicon(&self) -> &Arc<Lexicon> {
        self.normal.lexicon()
    }

    pub fn is_speed_mode(&self) -> bool {
        self.speed.is_some()
    }

    pub fn speed_totals(&self) -> SpeedTotals {
        self.totals
    }

    /// Start a speed round in a fresh sandbox world. Returns `false` if one is running.
    pub fn enter_speed_mode(&mut self, now_ms: f64) -> bool {
        if self.speed.is_some() {
            return false;
        }
        let mut session = Session::new(self.normal.lexicon().clone(), self.seeds.next_u64());
        session.set_auto_pan(false);
        self.speed = Some(SpeedRound {
            session,
            timer: SpeedTimer::start(now_ms),
            score: 0,
        });
        tracing::info!("Speed round started");
        true
    }

    /// End the running speed round and fold its score into the totals.
    ///
    /// The normal session resumes exactly as it was left.
    pub fn exit_speed_mode(&mut self) -> Option<RoundSummary> {
        let round = self.speed.take()?;
        self.totals.record_round(round.score);
        tracing::info!(score = round.score, total = self.totals.total, "Speed round finished");
        Some(RoundSummary {
            score: round.score,
            feedback: Feedback::speed_round_complete(round.score),
            totals: self.totals,
        })
    }

    pub fn toggle_speed_mode(&mut self, now_ms: f64) -> Option<RoundSummary> {
        if self.is_speed_mode() {
            self.exit_speed_mode()
        } else {
            self.enter_speed_mode(now_ms);
            None
        }
    }

    pub fn speed_status(&self, now_ms: f64) -> Option<SpeedStatus> {
        self.speed.as_ref().map(|round| SpeedStatus {
            score: round.score,
            remaining_ms: round.timer.remaining_ms(now_ms),
            progress: round.timer.progress(now_ms),
            border_color: round.timer.border_color(now_ms),
        })
    }

    /// Submit a selection to the active session.
    pub fn submit(&mut self, start: CellCoord, end: CellCoord) -> SubmitOutcome {
        match &mut self.speed {
            Some(round) => {
                let result = round.session.submit(start, end);
                Self::speed_outcome(round, result)
            }
            None => {
                let result = self.normal.submit(start, end);
                let feedback = Feedback::for_check(&result.check, self.normal.lexicon());
                let persist = result.check.is_accepted();
                SubmitOutcome {
                    check: result.check,
                    feedback,
                    expanded: result.expanded,
                    points: None,
                    persist,
                }
            }
        }
    }

    /// Submit the active session's drag, if one is in progress.
    pub fn finish_drag(&mut self) -> Option<SubmitOutcome> {
        let (start, end) = self.session_mut().drag_mut().finish()?;
        Some(self.submit(start, end))
    }

    fn speed_outcome(round: &mut SpeedRound, result: SelectionResult) -> SubmitOutcome {
        let points = match &result.check {
            WordCheck::Accepted { word, .. } => {
                let points = speed_mode_points(word.chars().count());
                round.score += points;
                round.timer.add_bonus();
                Some(points)
            }
            _ => None,
        };
        SubmitOutcome {
            feedback: Feedback::for_speed_check(&result.check, points.unwrap_or(0)),
            check: result.check,
            expanded: result.expanded,
            points,
            persist: false,
        }
    }

    /// Advance the camera animation and the round timer to `now_ms`.
    pub fn tick(&mut self, now_ms: f64) -> TickOutcome {
        let animating = self.session_mut().camera_mut().tick(now_ms);

        let expired = self
            .speed
            .as_ref()
            .is_some_and(|round| round.timer.is_expired(now_ms));
        if expired {
            return TickOutcome {
                needs_frame: self.normal.camera().is_animating(),
                round_ended: self.exit_speed_mode(),
            };
        }

        TickOutcome {
            needs_frame: animating || self.speed.is_some(),
            round_ended: None,
        }
    }

    /// Snapshot of the normal game. A running speed round is never saved.
    pub fn snapshot(&self, saved_at: u64) -> Snapshot {
        self.normal
            .capture(saved_at)
            .with_speed_totals(self.totals)
    }

    pub fn to_json(&self, saved_at: u64) -> Result<String, WordGridError> {
        self.snapshot(saved_at).to_json()
    }
}
