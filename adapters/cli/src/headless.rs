use std::{collections::VecDeque, time::Duration};

use anyhow::Result;
use wave_defence_rendering::{FrameControl, FrameInput, Presentation, RenderingBackend, Scene};

/// Rendering backend that presents nothing and replays scripted input.
#[derive(Clone, Debug)]
pub(crate) struct HeadlessBackend {
    frame_interval: Duration,
    max_frames: u64,
    script: VecDeque<(u64, FrameInput)>,
}

impl HeadlessBackend {
    /// Creates a backend stepping `frame_interval` per frame for at most `max_frames` frames.
    pub(crate) fn new(frame_interval: Duration, max_frames: u64) -> Self {
        Self {
            frame_interval,
            max_frames,
            script: VecDeque::new(),
        }
    }

    /// Queues inputs keyed by the earliest frame they may be delivered on.
    ///
    /// At most one input is delivered per frame. Inputs due on the same frame
    /// spill over to the following frames in the order they were queued.
    pub(crate) fn with_script(mut self, inputs: impl IntoIterator<Item = (u64, FrameInput)>) -> Self {
        let mut inputs: Vec<(u64, FrameInput)> = inputs.into_iter().collect();
        inputs.sort_by_key(|(frame, _)| *frame);
        self.script = inputs.into();
        self
    }

    fn next_input(&mut self, frame: u64) -> FrameInput {
        match self.script.front() {
            Some((due, _)) if *due <= frame => self
                .script
                .pop_front()
                .map(|(_, input)| input)
                .unwrap_or_default(),
            _ => FrameInput::default(),
        }
    }
}

impl RenderingBackend for HeadlessBackend {
    fn run<F>(mut self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl,
    {
        let Presentation {
            window_title,
            mut scene,
        } = presentation;
        tracing::info!(title = %window_title, max_frames = self.max_frames, "headless session started");

        for frame in 0..self.max_frames {
            let input = self.next_input(frame);
            if update_scene(self.frame_interval, input, &mut scene) == FrameControl::Exit {
                tracing::info!(
                    frame,
                    drawables = scene.drawable_count(),
                    "headless session finished"
                );
                return Ok(());
            }
        }

        tracing::info!(frames = self.max_frames, "headless session ran out of frames");
        Ok(())
    }
}
