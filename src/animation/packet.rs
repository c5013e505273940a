//! Packet engine: spawning, per-frame advancement and drawing of packets.
//!
//! Packets carry their own copy of the path they travel, so they are not
//! affected when the layout they were spawned from is regenerated.
//!
//! Movement is expressed in pixels per reference frame of 16 ms and scaled by
//! the real elapsed time, which keeps the on-screen speed independent of the
//! frame rate. When a packet overshoots the end of a segment it snaps to the
//! start of the next one; the overshoot is not carried forward.

use egui::Color32;
use rand::Rng;

use crate::render::Surface;
use crate::topology::{Path, Point};

/// Frame duration the packet speed is expressed against.
pub const REFERENCE_FRAME_MS: f32 = 16.0;

/// A marker travelling along a path.
#[derive(Debug, Clone, PartialEq)]
pub struct Packet {
    position: Point,
    path: Path,
    segment_index: usize,
    distance_into_segment: f32,
}

impl Packet {
    pub fn position(&self) -> Point {
        self.position
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(test)]
    pub fn segment_index(&self) -> usize {
        self.segment_index
    }

    #[cfg(test)]
    pub fn distance_into_segment(&self) -> f32 {
        self.distance_into_segment
    }

    fn last_index(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Move the packet forward. Returns `false` once it has reached the end of its path.
    fn advance(&mut self, elapsed_ms: f32, speed: f32) -> bool {
        if self.segment_index >= self.last_index() {
            return false;
        }

        let points = self.path.points();
        let start = points[self.segment_index];
        let end = points[self.segment_index + 1];
        let segment_length = start.distance(&end);

        self.distance_into_segment += speed * (elapsed_ms / REFERENCE_FRAME_MS);

        if self.distance_into_segment >= segment_length {
            self.segment_index += 1;
            self.distance_into_segment = 0.0;
            if self.segment_index >= self.last_index() {
                return false;
            }
            self.position = points[self.segment_index];
        } else {
            self.position = start.lerp(&end, self.distance_into_segment / segment_length);
        }
        true
    }
}

/// Create a packet at the start of `path`. Paths with fewer than two points yield `None`.
pub fn spawn(path: &Path) -> Option<Packet> {
    if path.len() < 2 {
        return None;
    }
    let position = *path.first()?;
    Some(Packet {
        position,
        path: path.clone(),
        segment_index: 0,
        distance_into_segment: 0.0,
    })
}

/// Advance every packet by `elapsed_ms` and drop the ones that completed their path.
///
/// Returns the number of packets removed.
pub fn advance(packets: &mut Vec<Packet>, elapsed_ms: f32, speed: f32) -> usize {
    let before = packets.len();
    packets.retain_mut(|packet| packet.advance(elapsed_ms, speed));
    before - packets.len()
}

/// Draw each live packet as a small filled circle.
pub fn render(packets: &[Packet], surface: &mut dyn Surface, radius: f32, color: Color32) {
    for packet in packets {
        surface.circle_filled(packet.position(), radius, color);
    }
}

/// Fixed-interval spawn timer.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnPolicy {
    interval_ms: f64,
    last_spawn_ms: f64,
}

impl SpawnPolicy {
    pub fn new(interval_ms: f64, now_ms: f64) -> Self {
        Self {
            interval_ms,
            last_spawn_ms: now_ms,
        }
    }

    /// Restart the interval from `now_ms`.
    pub fn reset(&mut self, now_ms: f64) {
        self.last_spawn_ms = now_ms;
    }

    /// Spawn a packet on a uniformly chosen path when the interval has elapsed.
    ///
    /// Does nothing (and keeps the timer running) while `paths` is empty.
    pub fn poll<R: Rng + ?Sized>(&mut self, now_ms: f64, paths: &[Path], rng: &mut R) -> Option<Packet> {
        if paths.is_empty() || now_ms - self.last_spawn_ms < self.interval_ms {
            return None;
        }
        self.last_spawn_ms = now_ms;
        let path = &paths[rng.gen_range(0..paths.len())];
        spawn(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::recording::RecordingSurface;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn straight(length: f32) -> Path {
        Path::link(Point::new(0.0, 0.0), Point::new(length, 0.0))
    }

    #[test]
    fn short_paths_are_rejected() {
        assert!(spawn(&Path::default()).is_none());
        assert!(spawn(&Path::new(vec![Point::new(1.0, 1.0)])).is_none());

        let packet = spawn(&straight(10.0)).unwrap();
        assert_eq!(packet.position(), Point::new(0.0, 0.0));
        assert_eq!(packet.segment_index(), 0);
        assert_eq!(packet.distance_into_segment(), 0.0);
    }

    #[test]
    fn interpolates_along_segment() {
        let mut packets = vec![spawn(&straight(100.0)).unwrap()];
        // 2 px per reference frame, 5 frames
        let removed = advance(&mut packets, 80.0, 2.0);
        assert_eq!(removed, 0);
        assert_eq!(packets[0].position(), Point::new(10.0, 0.0));
        assert_eq!(packets[0].distance_into_segment(), 10.0);
    }

    #[test]
    fn speed_scales_with_elapsed_time() {
        let mut fast_frames = vec![spawn(&straight(1000.0)).unwrap()];
        let mut slow_frames = fast_frames.clone();
        for _ in 0..4 {
            advance(&mut fast_frames, 8.0, 3.0);
        }
        advance(&mut slow_frames, 32.0, 3.0);
        assert_eq!(fast_frames[0].position(), slow_frames[0].position());
    }

    #[test]
    fn packet_is_removed_after_traversal() {
        let length = 50.0;
        let speed = 2.0;
        let elapsed = 16.0;
        let frames_needed = (length / (speed * elapsed / REFERENCE_FRAME_MS)).ceil() as usize;

        let mut packets = vec![spawn(&straight(length)).unwrap()];
        for _ in 0..frames_needed - 1 {
            assert_eq!(advance(&mut packets, elapsed, speed), 0);
        }
        assert_eq!(packets.len(), 1);
        assert_eq!(advance(&mut packets, elapsed, speed), 1);
        assert!(packets.is_empty());
    }

    #[test]
    fn overshoot_snaps_to_next_segment_start() {
        let path = Path::new(vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)]);
        let mut packets = vec![spawn(&path).unwrap()];
        advance(&mut packets, 16.0, 25.0);
        assert_eq!(packets[0].segment_index(), 1);
        assert_eq!(packets[0].position(), Point::new(10.0, 0.0));
        assert_eq!(packets[0].distance_into_segment(), 0.0);

        advance(&mut packets, 16.0, 5.0);
        assert_eq!(packets[0].position(), Point::new(10.0, 5.0));

        assert_eq!(advance(&mut packets, 16.0, 5.0), 1);
    }

    #[test]
    fn distance_stays_below_segment_length() {
        let path = Path::new(vec![Point::new(0.0, 0.0), Point::new(30.0, 0.0), Point::new(30.0, 40.0), Point::new(0.0, 40.0)]);
        let mut packets = vec![spawn(&path).unwrap()];
        while !packets.is_empty() {
            advance(&mut packets, 16.0, 7.0);
            if let Some(p) = packets.first() {
                let pts = p.path().points();
                let len = pts[p.segment_index()].distance(&pts[p.segment_index() + 1]);
                assert!(p.distance_into_segment() >= 0.0 && p.distance_into_segment() < len);
            }
        }
    }

    #[test]
    fn spawn_policy_waits_for_interval_and_paths() {
        let mut rng = StdRng::seed_from_u64(5);
        let paths = vec![straight(10.0), straight(20.0)];
        let mut policy = SpawnPolicy::new(1000.0, 0.0);

        assert!(policy.poll(999.0, &paths, &mut rng).is_none());
        assert!(policy.poll(1500.0, &[], &mut rng).is_none());
        assert!(policy.poll(1500.0, &paths, &mut rng).is_some());
        assert!(policy.poll(2000.0, &paths, &mut rng).is_none());
        assert!(policy.poll(2500.0, &paths, &mut rng).is_some());
    }

    #[test]
    fn spawn_count_tracks_duration() {
        let mut rng = StdRng::seed_from_u64(9);
        let paths = vec![straight(10.0)];
        for (duration, frame) in [(10_000.0, 16.0), (7_300.0, 33.0), (60_000.0, 16.7)] {
            let mut policy = SpawnPolicy::new(1000.0, 0.0);
            let mut spawned = 0i64;
            let mut now = 0.0;
            while now + frame <= duration {
                now += frame;
                if policy.poll(now, &paths, &mut rng).is_some() {
                    spawned += 1;
                }
            }
            let expected = (duration / 1000.0_f64).floor() as i64;
            assert!((spawned - expected).abs() <= 1, "{} spawns over {} ms", spawned, duration);
        }
    }

    #[test]
    fn renders_one_circle_per_packet() {
        let packets: Vec<Packet> = (0..3).filter_map(|_| spawn(&straight(10.0))).collect();
        let mut surface = RecordingSurface::default();
        render(&packets, &mut surface, 4.0, Color32::YELLOW);
        assert_eq!(surface.filled_circles(), 3);
    }
}
