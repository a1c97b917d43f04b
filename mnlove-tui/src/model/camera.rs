//! Simulated map camera
//!
//! Animates between positions on the shell's tick clock and reports the
//! final position once a move ends, like a map renderer's move-end event.
//! A flight starts counting at the first tick after it is requested.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use mnlove_core::types::{CameraPosition, LngLat};
use mnlove_core::MapCamera;

#[derive(Debug, Clone, Copy)]
struct Flight {
    from: CameraPosition,
    to: CameraPosition,
    started: Option<Instant>,
    duration: Duration,
}

#[derive(Debug)]
struct CameraState {
    position: CameraPosition,
    flight: Option<Flight>,
}

#[derive(Debug)]
pub struct TerminalCamera {
    state: Mutex<CameraState>,
    loaded: AtomicBool,
}

impl TerminalCamera {
    pub fn new(position: CameraPosition) -> Self {
        Self {
            state: Mutex::new(CameraState {
                position,
                flight: None,
            }),
            loaded: AtomicBool::new(false),
        }
    }

    pub fn set_loaded(&self, loaded: bool) {
        self.loaded.store(loaded, Ordering::SeqCst);
    }

    /// Advance the animation. Returns the final position when a move ends.
    pub fn tick(&self, now: Instant) -> Option<CameraPosition> {
        let mut state = self.lock();
        let flight = state.flight.as_mut()?;
        let started = *flight.started.get_or_insert(now);
        let flight = *flight;
        let elapsed = now.saturating_duration_since(started);
        if elapsed >= flight.duration {
            state.position = flight.to;
            state.flight = None;
            return Some(flight.to);
        }
        let t = elapsed.as_secs_f64() / flight.duration.as_secs_f64();
        state.position = CameraPosition {
            center: LngLat::new(
                lerp(flight.from.center.lat, flight.to.center.lat, t),
                lerp(flight.from.center.lng, flight.to.center.lng, t),
            ),
            zoom: lerp(flight.from.zoom, flight.to.zoom, t),
        };
        None
    }

    fn start(&self, to: CameraPosition, duration: Duration) {
        let mut state = self.lock();
        let from = state.position;
        state.flight = Some(Flight {
            from,
            to,
            started: None,
            duration,
        });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CameraState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

impl MapCamera for TerminalCamera {
    fn fly_to(&self, target: CameraPosition, duration: Duration) {
        log::debug!(
            "fly to {:.5},{:.5} z{:.1} over {}ms",
            target.center.lat,
            target.center.lng,
            target.zoom,
            duration.as_millis()
        );
        self.start(target, duration);
    }

    fn ease_to(&self, target: CameraPosition, duration: Duration) {
        self.start(target, duration);
    }

    fn center(&self) -> LngLat {
        self.lock().position.center
    }

    fn zoom(&self) -> f64 {
        self.lock().position.zoom
    }

    fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_end_reported_once_at_target() {
        let camera = TerminalCamera::new(CameraPosition::new(45.0, -93.0, 10.0));
        let target = CameraPosition::new(46.0, -94.0, 12.0);
        camera.fly_to(target, Duration::from_millis(0));
        let later = Instant::now();
        assert_eq!(camera.tick(later), Some(target));
        assert_eq!(camera.tick(later), None);
        assert_eq!(camera.position(), target);
    }

    #[test]
    fn midway_position_is_interpolated() {
        let t0 = Instant::now();
        let camera = TerminalCamera::new(CameraPosition::new(40.0, -90.0, 10.0));
        camera.fly_to(CameraPosition::new(50.0, -100.0, 12.0), Duration::from_secs(10));
        assert_eq!(camera.tick(t0), None);
        assert!((camera.zoom() - 10.0).abs() < f64::EPSILON);
        assert_eq!(camera.tick(t0 + Duration::from_secs(5)), None);
        assert!((camera.zoom() - 11.0).abs() < 1e-9);
        assert!((camera.center().lat - 45.0).abs() < 1e-9);
    }

    #[test]
    fn flight_clock_starts_at_first_tick() {
        let t0 = Instant::now() + Duration::from_secs(60);
        let camera = TerminalCamera::new(CameraPosition::new(45.0, -93.0, 10.0));
        let target = CameraPosition::new(46.0, -94.0, 12.0);
        camera.fly_to(target, Duration::from_millis(500));
        assert_eq!(camera.tick(t0), None);
        assert_eq!(camera.tick(t0 + Duration::from_millis(499)), None);
        assert_eq!(camera.tick(t0 + Duration::from_millis(500)), Some(target));
    }
}
