//! Rotation controller.
//!
//! The controller is a pure function over an explicit state value:
//! [`advance`] takes the previous [`SpinState`], one tick of pointer input and
//! the tick length, and returns the next state plus the angular velocity to
//! apply for that tick. Exactly one [`SpinMode`] is active at any time.
//!
//! Angular velocities are rotation vectors in degrees per second.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use voxglobe_common::SpinConfig;
use voxglobe_input::PointerInput;

/// Active rotation mode and its per-mode data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinMode {
    /// Pointer is held; velocity chases the pointer motion.
    Dragging { smoothed: Vec3 },
    /// Released; `initial` decays over the remaining inertia window.
    Decaying { initial: Vec3, time_left: f32 },
    /// Constant spin.
    PassiveSpin,
}

/// Data-free tag of a [`SpinMode`], for logs and inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpinPhase {
    Dragging,
    Decaying,
    PassiveSpin,
}

impl std::fmt::Display for SpinPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Dragging => "dragging",
            Self::Decaying => "decaying",
            Self::PassiveSpin => "passive",
        };
        f.write_str(s)
    }
}

impl SpinMode {
    pub fn phase(&self) -> SpinPhase {
        match self {
            Self::Dragging { .. } => SpinPhase::Dragging,
            Self::Decaying { .. } => SpinPhase::Decaying,
            Self::PassiveSpin => SpinPhase::PassiveSpin,
        }
    }
}

/// Full controller state carried between ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinState {
    pub mode: SpinMode,
    /// Direction frozen when the last decay settled, scaled to length √3.
    /// Takes over from the configured default spin once set.
    pub last_spin_direction: Option<Vec3>,
}

impl Default for SpinState {
    fn default() -> Self {
        Self {
            mode: SpinMode::PassiveSpin,
            last_spin_direction: None,
        }
    }
}

impl SpinState {
    pub fn phase(&self) -> SpinPhase {
        self.mode.phase()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.mode, SpinMode::Dragging { .. })
    }

    /// Velocity applied while in [`SpinMode::PassiveSpin`].
    ///
    /// A non-finite configured default falls back to `(1, 1, 1)`.
    pub fn passive_velocity(&self, config: &SpinConfig) -> Vec3 {
        self.last_spin_direction.unwrap_or(if config.default_spin.is_finite() {
            config.default_spin
        } else {
            Vec3::ONE
        })
    }
}

/// Result of one controller tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinStep {
    pub state: SpinState,
    /// Angular velocity applied this tick, degrees per second.
    pub angular_velocity: Vec3,
}

impl SpinStep {
    /// World-space rotation produced by this step over `dt` seconds.
    pub fn rotation(&self, dt: f32) -> Quat {
        rotation_delta(self.angular_velocity, dt)
    }
}

/// Incremental rotation for `angular_velocity` (degrees per second) held for `dt` seconds.
pub fn rotation_delta(angular_velocity: Vec3, dt: f32) -> Quat {
    Quat::from_scaled_axis(angular_velocity * (sanitize_dt(dt) * std::f32::consts::PI / 180.0))
}

/// Negative, NaN or infinite tick lengths count as no time.
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}

/// Inertia window in seconds, or `None` when release should settle at once.
fn inertia_window(config: &SpinConfig) -> Option<f32> {
    let duration = config.inertia_duration;
    (duration.is_finite() && duration > 0.0).then_some(duration)
}

/// Remaining time below which a decay settles, kept inside `[0, window]`.
fn settle_epsilon(config: &SpinConfig, window: f32) -> f32 {
    let epsilon = config.settle_epsilon;
    if epsilon.is_finite() {
        epsilon.clamp(0.0, window)
    } else {
        0.0
    }
}

/// Decay exponent; non-finite values fall back to a linear decay.
fn damping_exponent(config: &SpinConfig) -> f32 {
    let damping = config.inertia_damping;
    if damping.is_finite() { damping.max(0.0) } else { 1.0 }
}

/// Drag sensitivity; a non-finite speed disables drag steering.
fn rotation_speed(config: &SpinConfig) -> f32 {
    let speed = config.rotation_speed;
    if speed.is_finite() { speed } else { 0.0 }
}

fn lag_factor(config: &SpinConfig) -> f32 {
    let lag = config.lag_factor;
    if lag.is_finite() && lag > 0.0 {
        lag.min(1.0)
    } else {
        1.0
    }
}

/// Freeze the passive direction from a settled decay. A zero snapshot keeps
/// whatever direction was frozen before.
fn settle(state: &mut SpinState, initial: Vec3) {
    if let Some(dir) = initial.try_normalize() {
        state.last_spin_direction = Some(dir * 3.0_f32.sqrt());
    }
    state.mode = SpinMode::PassiveSpin;
}

/// Advance the controller by one tick.
pub fn advance(state: SpinState, input: &PointerInput, dt: f32, config: &SpinConfig) -> SpinStep {
    let dt = sanitize_dt(dt);
    let mut state = state;

    if input.just_pressed || (input.pressed && !state.is_dragging()) {
        state.mode = SpinMode::Dragging {
            smoothed: Vec3::ZERO,
        };
    }

    if let SpinMode::Dragging { smoothed } = state.mode {
        if input.pressed {
            let target = Vec3::new(-input.delta.y, input.delta.x, 0.0) * rotation_speed(config);
            let smoothed = if target.is_finite() {
                smoothed.lerp(target, lag_factor(config))
            } else {
                smoothed
            };
            state.mode = SpinMode::Dragging { smoothed };
            return SpinStep {
                state,
                angular_velocity: smoothed,
            };
        }
        state.mode = SpinMode::Decaying {
            initial: smoothed,
            time_left: config.inertia_duration,
        };
    }

    if let SpinMode::Decaying { initial, time_left } = state.mode {
        if let Some(window) = inertia_window(config) {
            let time_left = if time_left.is_nan() {
                0.0
            } else {
                time_left.min(window)
            };
            let t = (time_left / window).clamp(0.0, 1.0);
            let damping = t.powf(damping_exponent(config));
            let time_left = time_left - dt;
            if time_left <= settle_epsilon(config, window) {
                settle(&mut state, initial);
            } else {
                state.mode = SpinMode::Decaying { initial, time_left };
            }
            return SpinStep {
                state,
                angular_velocity: initial * damping,
            };
        }
        settle(&mut state, initial);
    }

    SpinStep {
        state,
        angular_velocity: state.passive_velocity(config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn config() -> SpinConfig {
        SpinConfig::default()
    }

    fn drag(state: SpinState, delta: Vec2, ticks: usize, config: &SpinConfig) -> SpinState {
        let mut state = advance(state, &PointerInput::press(), DT, config).state;
        for _ in 0..ticks {
            state = advance(state, &PointerInput::held(delta), DT, config).state;
        }
        state
    }

    #[test]
    fn starts_passive_with_default_spin() {
        let c = config();
        let step = advance(SpinState::default(), &PointerInput::IDLE, DT, &c);
        assert_eq!(step.state.phase(), SpinPhase::PassiveSpin);
        assert_eq!(step.angular_velocity, c.default_spin);
    }

    #[test]
    fn press_enters_dragging_with_zero_velocity() {
        let c = config();
        let step = advance(SpinState::default(), &PointerInput::press(), DT, &c);
        assert_eq!(
            step.state.mode,
            SpinMode::Dragging {
                smoothed: Vec3::ZERO
            }
        );
        assert_eq!(step.angular_velocity, Vec3::ZERO);
    }

    #[test]
    fn press_resets_smoothing_even_mid_drag() {
        let c = config();
        let state = drag(SpinState::default(), Vec2::new(4.0, 0.0), 10, &c);
        let step = advance(state, &PointerInput::press(), DT, &c);
        assert_eq!(step.angular_velocity, Vec3::ZERO);
    }

    #[test]
    fn held_button_without_press_event_still_drags() {
        let c = config();
        let step = advance(SpinState::default(), &PointerInput::held(Vec2::ONE), DT, &c);
        assert_eq!(step.state.phase(), SpinPhase::Dragging);
    }

    #[test]
    fn drag_target_maps_pointer_axes() {
        let c = SpinConfig {
            lag_factor: 1.0,
            ..config()
        };
        let state = drag(SpinState::default(), Vec2::new(3.0, 2.0), 1, &c);
        let SpinMode::Dragging { smoothed } = state.mode else {
            panic!("expected dragging");
        };
        assert_eq!(smoothed, Vec3::new(-2.0, 3.0, 0.0) * c.rotation_speed);
    }

    #[test]
    fn drag_converges_without_overshoot() {
        let c = config();
        let delta = Vec2::new(5.0, -2.0);
        let target = Vec3::new(-delta.y, delta.x, 0.0) * c.rotation_speed;

        let mut state = advance(SpinState::default(), &PointerInput::press(), DT, &c).state;
        let mut last_gap = target.length();
        for _ in 0..200 {
            let step = advance(state, &PointerInput::held(delta), DT, &c);
            let gap = (target - step.angular_velocity).length();
            assert!(gap <= last_gap + 1e-3, "moved away from target");
            assert!(step.angular_velocity.length() <= target.length() + 1e-3);
            last_gap = gap;
            state = step.state;
        }
        assert!(last_gap < target.length() * 1e-3);
    }

    #[test]
    fn release_snapshots_velocity_and_decays() {
        let c = config();
        let state = drag(SpinState::default(), Vec2::new(2.0, 0.0), 30, &c);
        let SpinMode::Dragging { smoothed } = state.mode else {
            panic!("expected dragging");
        };

        let step = advance(state, &PointerInput::IDLE, DT, &c);
        // The release tick applies the undamped snapshot.
        assert_eq!(step.angular_velocity, smoothed);
        assert_eq!(
            step.state.mode,
            SpinMode::Decaying {
                initial: smoothed,
                time_left: c.inertia_duration - DT
            }
        );
    }

    #[test]
    fn decay_is_monotone_and_settles() {
        let c = config();
        let mut state = drag(SpinState::default(), Vec2::new(0.0, 3.0), 30, &c);
        let mut last = f32::INFINITY;
        let mut elapsed = 0.0;
        while state.phase() != SpinPhase::PassiveSpin {
            let step = advance(state, &PointerInput::IDLE, DT, &c);
            if step.state.phase() == SpinPhase::Decaying {
                let speed = step.angular_velocity.length();
                assert!(speed <= last);
                last = speed;
            }
            state = step.state;
            elapsed += DT;
            assert!(elapsed <= c.inertia_duration + DT, "decay never settled");
        }
    }

    #[test]
    fn decay_reaches_passive_after_duration() {
        let c = SpinConfig {
            settle_epsilon: 0.0,
            ..config()
        };
        let state = SpinState {
            mode: SpinMode::Decaying {
                initial: Vec3::new(0.0, 90.0, 0.0),
                time_left: c.inertia_duration,
            },
            last_spin_direction: None,
        };

        let mut state = state;
        let ticks = (c.inertia_duration / DT).ceil() as usize + 1;
        for _ in 0..ticks {
            state = advance(state, &PointerInput::IDLE, DT, &c).state;
        }
        assert_eq!(state.phase(), SpinPhase::PassiveSpin);

        let step = advance(state, &PointerInput::IDLE, DT, &c);
        let frozen = Vec3::new(0.0, 3.0_f32.sqrt(), 0.0);
        assert!((step.angular_velocity - frozen).length() < 1e-5);
        assert_eq!(step.state.last_spin_direction, Some(step.angular_velocity));
    }

    #[test]
    fn power_law_multiplier() {
        let c = SpinConfig {
            inertia_duration: 2.0,
            inertia_damping: 2.0,
            ..config()
        };
        let state = SpinState {
            mode: SpinMode::Decaying {
                initial: Vec3::X * 100.0,
                time_left: 1.0,
            },
            last_spin_direction: None,
        };
        let step = advance(state, &PointerInput::IDLE, 0.1, &c);
        // t = 0.5, 0.5^2 = 0.25
        assert!((step.angular_velocity.x - 25.0).abs() < 1e-4);
    }

    #[test]
    fn zero_release_keeps_previous_direction() {
        let c = config();
        let prior = Vec3::new(0.0, 0.0, 3.0_f32.sqrt());
        let state = SpinState {
            mode: SpinMode::Decaying {
                initial: Vec3::ZERO,
                time_left: 0.01,
            },
            last_spin_direction: Some(prior),
        };
        let step = advance(state, &PointerInput::IDLE, DT, &c);
        assert_eq!(step.state.phase(), SpinPhase::PassiveSpin);
        assert_eq!(step.state.last_spin_direction, Some(prior));
    }

    #[test]
    fn non_positive_inertia_releases_into_passive() {
        let c = SpinConfig {
            inertia_duration: 0.0,
            ..config()
        };
        let state = drag(SpinState::default(), Vec2::new(1.0, 1.0), 5, &c);
        let step = advance(state, &PointerInput::IDLE, DT, &c);
        assert_eq!(step.state.phase(), SpinPhase::PassiveSpin);
        assert!(step.angular_velocity.is_finite());
    }

    /// Run a drag, release, then idle ticks; returns every state seen after release.
    fn release_and_idle(c: &SpinConfig, ticks: usize) -> Vec<SpinStep> {
        let mut state = drag(SpinState::default(), Vec2::new(3.0, -2.0), 10, c);
        (0..ticks)
            .map(|_| {
                let step = advance(state, &PointerInput::IDLE, DT, c);
                state = step.state;
                step
            })
            .collect()
    }

    #[test]
    fn infinite_inertia_releases_into_passive() {
        let c: SpinConfig = serde_json::from_str(r#"{"inertia_duration": 1e39}"#).unwrap();
        assert!(c.inertia_duration.is_infinite());
        let steps = release_and_idle(&c, 600);
        assert_eq!(steps[0].state.phase(), SpinPhase::PassiveSpin);
        assert!(steps.iter().all(|s| s.angular_velocity.is_finite()));
        assert!(steps.iter().all(|s| s.rotation(DT).is_finite()));
    }

    #[test]
    fn nan_inertia_releases_into_passive() {
        let c = SpinConfig {
            inertia_duration: f32::NAN,
            ..config()
        };
        let steps = release_and_idle(&c, 2);
        assert_eq!(steps[0].state.phase(), SpinPhase::PassiveSpin);
        assert!(steps[1].angular_velocity.is_finite());
    }

    #[test]
    fn non_finite_settle_epsilon_still_settles() {
        for epsilon in [f32::NEG_INFINITY, f32::INFINITY, f32::NAN, -5.0] {
            let c = SpinConfig {
                settle_epsilon: epsilon,
                ..config()
            };
            // 600 ticks at 60 Hz is well past the 1.5 s window.
            let steps = release_and_idle(&c, 600);
            let last = steps[steps.len() - 1];
            assert_eq!(last.state.phase(), SpinPhase::PassiveSpin, "epsilon {epsilon}");
            assert!(last.angular_velocity.length() > 1.0);
        }
    }

    #[test]
    fn non_finite_tuning_never_produces_nan() {
        let c = SpinConfig {
            rotation_speed: f32::INFINITY,
            inertia_damping: f32::NAN,
            default_spin: Vec3::splat(f32::NAN),
            ..config()
        };
        let passive = advance(SpinState::default(), &PointerInput::IDLE, DT, &c);
        assert_eq!(passive.angular_velocity, Vec3::ONE);
        let steps = release_and_idle(&c, 200);
        assert!(steps.iter().all(|s| s.angular_velocity.is_finite()));
        assert_eq!(steps[steps.len() - 1].state.phase(), SpinPhase::PassiveSpin);
    }

    #[test]
    fn bad_dt_applies_no_rotation() {
        assert_eq!(rotation_delta(Vec3::ONE * 90.0, -1.0), Quat::IDENTITY);
        assert_eq!(rotation_delta(Vec3::ONE * 90.0, f32::NAN), Quat::IDENTITY);
    }

    #[test]
    fn rotation_delta_uses_degrees() {
        let q = rotation_delta(Vec3::Y * 90.0, 1.0);
        let expected = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        assert!(q.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn invalid_lag_falls_back_to_immediate() {
        let c = SpinConfig {
            lag_factor: 0.0,
            ..config()
        };
        let state = drag(SpinState::default(), Vec2::new(1.0, 0.0), 1, &c);
        let SpinMode::Dragging { smoothed } = state.mode else {
            panic!("expected dragging");
        };
        assert_eq!(smoothed, Vec3::new(0.0, c.rotation_speed, 0.0));
    }
}
