//! Playback schedule

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use super::{Frame, LoopCount, PoseFrame};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A compiled sequence of frames, always terminated by a loop directive, and
/// its playback position.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    frames: Vec<Frame>,

    /// Index of the next frame to play. Equal to the number of frames once
    /// playback has halted.
    cursor: usize,

    /// Number of times playback has looped back to the start.
    cycle: u64,

    num_poses: usize,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Schedule {
    /// Build a schedule from one cycle of frames followed by a loop directive.
    pub fn new(cycle_frames: Vec<Frame>, loop_count: LoopCount) -> Self {
        let mut frames = cycle_frames;
        frames.push(Frame::Loop(loop_count));

        let num_poses = frames.iter().filter(|f| f.as_pose().is_some()).count();

        Self {
            frames,
            cursor: 0,
            cycle: 0,
            num_poses,
        }
    }

    /// Move to the next pose frame, following loop directives.
    ///
    /// Returns `None` once playback has halted, either because a finite loop
    /// ran out or because there are no poses to play.
    pub fn next_pose(&mut self) -> Option<&PoseFrame> {
        loop {
            let idx = self.cursor;

            let loops_back = match self.frames.get_mut(idx)? {
                Frame::Pose(_) => None,
                Frame::Loop(count) => Some(count.consume()),
            };

            match loops_back {
                None => {
                    self.cursor += 1;
                    return self.frames[idx].as_pose();
                }
                Some(true) if self.num_poses > 0 => {
                    self.cursor = 0;
                    self.cycle += 1;
                }
                Some(_) => {
                    self.cursor = self.frames.len();
                    return None;
                }
            }
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn is_halted(&self) -> bool {
        self.cursor >= self.frames.len()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::frame_sched::FrameContext;
    use crate::test_support::tagged_frames;

    fn row_of(pose: &PoseFrame) -> usize {
        match pose.context {
            FrameContext::Stance { row } => row,
            _ => panic!("Untagged frame"),
        }
    }

    #[test]
    fn test_finite_loop() {
        for &repeats in [0u32, 1, 3].iter() {
            let mut schedule = Schedule::new(tagged_frames(3), LoopCount::Times(repeats));

            let mut played = Vec::new();
            while let Some(pose) = schedule.next_pose() {
                played.push(row_of(pose));
                assert!(played.len() < 100, "Finite loop never halted");
            }

            // The initial pass plus one pass per repeat
            let expected: Vec<usize> = (0..repeats as usize + 1).flat_map(|_| 0..3).collect();
            assert_eq!(played, expected);
            assert_eq!(schedule.cycle(), repeats as u64);
            assert!(schedule.is_halted());
            assert_eq!(schedule.cursor(), schedule.frames().len());

            // Stays halted
            assert!(schedule.next_pose().is_none());
        }
    }

    #[test]
    fn test_infinite_loop() {
        let mut schedule = Schedule::new(tagged_frames(4), LoopCount::Infinite);

        for i in 0..1000 {
            let pose = schedule.next_pose().expect("Infinite loop halted");
            assert_eq!(row_of(pose), i % 4);
        }
        assert_eq!(schedule.cycle(), 249);
        assert!(!schedule.is_halted());
    }

    #[test]
    fn test_no_poses_halts() {
        let mut schedule = Schedule::new(Vec::new(), LoopCount::Infinite);

        assert!(schedule.next_pose().is_none());
        assert!(schedule.is_halted());
        assert_eq!(schedule.cycle(), 0);
    }

    #[test]
    fn test_ends_with_loop() {
        let schedule = Schedule::new(tagged_frames(2), LoopCount::Infinite);

        assert_eq!(schedule.frames().len(), 3);
        assert_eq!(
            schedule.frames().last(),
            Some(&Frame::Loop(LoopCount::Infinite))
        );
    }
}
