//! Frame cycling for animated actors (pickups, hazards, enemies).

/// Loops a sprite through a run of consecutive frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animated {
    pub first_frame: u32,
    pub frame_count: u32,
    /// Seconds per frame.
    pub frame_duration: f32,
    frame_index: u32,
    frame_timer: f32,
}

impl Animated {
    pub fn looping(first_frame: u32, frame_count: u32, fps: f32) -> Self {
        Self {
            first_frame,
            frame_count: frame_count.max(1),
            frame_duration: 1.0 / fps,
            frame_index: 0,
            frame_timer: 0.0,
        }
    }

    /// Advance by `dt`. Returns true if the frame changed.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.frame_duration <= 0.0 {
            return false;
        }
        let before = self.frame_index;
        self.frame_timer += dt;
        while self.frame_timer >= self.frame_duration {
            self.frame_timer -= self.frame_duration;
            self.frame_index = (self.frame_index + 1) % self.frame_count;
        }
        before != self.frame_index
    }

    /// Sprite frame to show right now.
    pub fn current_frame(&self) -> u32 {
        self.first_frame + self.frame_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_one_frame_per_duration() {
        let mut anim = Animated::looping(10, 4, 10.0);
        assert_eq!(anim.current_frame(), 10);
        assert!(!anim.tick(0.05));
        assert!(anim.tick(0.06));
        assert_eq!(anim.current_frame(), 11);
    }

    #[test]
    fn looping_wraps_around() {
        let mut anim = Animated::looping(0, 2, 10.0);
        anim.tick(0.25);
        assert_eq!(anim.current_frame(), 0);
    }
}
