use super::*;

use crate::pixel::blend::BlendMode;
use crate::pixel::pipeline::PixelSink;

struct CountingEffect {
    draws: u32,
    scratch_was_clean: bool,
}

impl Effect for CountingEffect {
    fn draw_frame(&mut self, frame: &mut FrameCtx<'_>) {
        self.scratch_was_clean &= frame.scratch.vectors.in_use() == 0;
        self.draws += 1;
        // Leave scratch allocated to prove the stage resets it next tick.
        let h = frame.scratch.vectors.acquire();
        *frame.scratch.vectors.get_mut(h) = Vec3::X;
        frame.pipeline.plot(0, 1, LinearRgb::WHITE, 0.0, 1.0, BlendMode::Replace);
    }
}

#[test]
fn run_tick_resets_scratch_and_advances_the_counter() {
    let mut stage = Stage::new(DisplayConfig::new(16, 4).unwrap(), 0.1).unwrap();
    let mut fx = CountingEffect { draws: 0, scratch_was_clean: true };
    stage.run_tick(&mut [&mut fx]);
    stage.run_tick(&mut [&mut fx]);
    stage.run_tick(&mut [&mut fx]);
    assert_eq!(fx.draws, 3);
    assert!(fx.scratch_was_clean, "scratch must be reset before each tick");
    assert_eq!(stage.tick(), 3);
    assert_eq!(stage.buffer().get(0, 1), LinearRgb::WHITE);
}

#[test]
fn advance_runs_clock_owed_ticks() {
    let mut stage = Stage::new(DisplayConfig::new(16, 4).unwrap(), 0.1).unwrap();
    let mut fx = CountingEffect { draws: 0, scratch_was_clean: true };
    assert_eq!(stage.advance(0.25, &mut [&mut fx]), 2);
    assert_eq!(fx.draws, 2);
    assert_eq!(stage.advance(0.01, &mut [&mut fx]), 0);
    assert_eq!(fx.draws, 2);
}

#[test]
fn effects_run_in_order_each_tick() {
    struct Tagger(u8);
    impl Effect for Tagger {
        fn draw_frame(&mut self, frame: &mut FrameCtx<'_>) {
            frame.pipeline.plot(
                0,
                0,
                LinearRgb::splat(f32::from(self.0)),
                0.0,
                1.0,
                BlendMode::Replace,
            );
        }
    }
    let mut stage = Stage::new(DisplayConfig::new(16, 4).unwrap(), 0.1).unwrap();
    let (mut a, mut b) = (Tagger(1), Tagger(2));
    stage.run_tick(&mut [&mut a, &mut b]);
    // The later effect wins the pixel under Replace.
    assert_eq!(stage.buffer().get(0, 0), LinearRgb::splat(2.0));
}
