//! Series: lays scenes end to end on one global timeline.
//!
//! Each scene only ever sees its own local frame. Adjacent scenes overlap
//! by the duration of the transition between them, and during that overlap
//! the transition's presentation decides how the two are combined.

use log::warn;

use crate::types::{Frame, Layer, VisualNode};

use super::scenes::{Scene, SceneContext};
use super::transitions::Transition;

struct Slot {
    scene: Box<dyn Scene>,
    start: Frame,
    duration: Frame,
    /// Transition from the previous slot into this one, already clamped.
    transition_in: Option<Transition>,
    /// Settle time of `transition_in`'s timing at the series frame rate.
    settle: Frame,
}

impl Slot {
    fn end(&self) -> Frame {
        self.start + self.duration
    }

    fn is_active(&self, global: Frame) -> bool {
        global >= self.start && global < self.end()
    }

    fn local(&self, global: Frame) -> Frame {
        (global - self.start).clamp(0, (self.duration - 1).max(0))
    }

    fn transition_in_len(&self) -> Frame {
        self.transition_in.map_or(0, |t| t.duration())
    }
}

/// Ordered scenes joined by transitions.
///
/// ```text
/// Series::new(30)
///     .scene(Hook { .. })
///     .transition(Transition::fade(linear(15)))
///     .scene(Pain)
/// ```
pub struct Series {
    fps: u32,
    slots: Vec<Slot>,
    pending: Option<Transition>,
}

impl Series {
    pub fn new(fps: u32) -> Self {
        Series {
            fps,
            slots: Vec::new(),
            pending: None,
        }
    }

    pub fn scene(mut self, scene: impl Scene + 'static) -> Self {
        let duration = scene.duration().max(0);
        let transition_in = self.pending.take().and_then(|t| {
            let prev = self.slots.last()?;
            // The previous scene's entry overlap is not available for its exit.
            let room = (prev.duration - prev.transition_in_len()).min(duration);
            if t.duration() > room {
                warn!(
                    "transition into '{}' lasts {} frames but only {} fit; shortening it",
                    scene.name(),
                    t.duration(),
                    room
                );
            }
            Some(t.clamped(room))
        });
        let start = match self.slots.last() {
            Some(prev) => prev.end() - transition_in.map_or(0, |t| t.duration()),
            None => 0,
        };
        let settle = transition_in.map_or(1, |t| t.timing.settle_frames(self.fps));
        self.slots.push(Slot {
            scene: Box::new(scene),
            start,
            duration,
            transition_in,
            settle,
        });
        self
    }

    /// Join the previous scene to the next one with `transition`.
    pub fn transition(mut self, transition: Transition) -> Self {
        if self.slots.is_empty() {
            warn!("transition before the first scene ignored");
            return self;
        }
        if self.pending.replace(transition).is_some() {
            warn!("two transitions in a row; keeping the later one");
        }
        self
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn total_duration(&self) -> Frame {
        self.slots.last().map_or(0, Slot::end)
    }

    /// Start frame of every scene on the global timeline.
    pub fn starts(&self) -> Vec<(&'static str, Frame)> {
        self.slots.iter().map(|s| (s.scene.name(), s.start)).collect()
    }

    fn clamp_global(&self, global: Frame) -> Frame {
        global.clamp(0, (self.total_duration() - 1).max(0))
    }

    /// Scenes mounted at `global`, in paint order, with their local frames.
    pub fn locate(&self, global: Frame) -> Vec<(&'static str, Frame)> {
        let global = self.clamp_global(global);
        self.slots
            .iter()
            .filter(|slot| slot.is_active(global))
            .map(|slot| (slot.scene.name(), slot.local(global)))
            .collect()
    }

    /// Everything visible at `global`. Each mounted scene is wrapped in a
    /// stack named `series.<scene>` carrying its transition layer.
    pub fn evaluate(&self, global: Frame, ctx: &SceneContext) -> VisualNode {
        let global = self.clamp_global(global);
        let mut layers: Vec<Option<Layer>> = vec![None; self.slots.len()];

        for (i, slot) in self.slots.iter().enumerate() {
            let Some(transition) = slot.transition_in else {
                continue;
            };
            let elapsed = global - slot.start;
            if elapsed < 0 || elapsed >= transition.duration() {
                continue;
            }
            let p = transition
                .timing
                .progress_settling_in(elapsed, self.fps, slot.settle);
            let handover = transition.presentation.handover(p, ctx.canvas);
            layers[i] = Some(handover.entering);
            if i > 0 && layers[i - 1].is_none() {
                layers[i - 1] = Some(handover.exiting);
            }
        }

        let mounted = self
            .slots
            .iter()
            .zip(layers)
            .filter(|(slot, _)| slot.is_active(global))
            .map(|(slot, layer)| {
                let name = slot.scene.name();
                VisualNode::stack(vec![slot.scene.render(slot.local(global), ctx)])
                    .named(format!("series.{name}"))
                    .with_layer(layer.unwrap_or_default())
            })
            .collect();

        VisualNode::stack(mounted).named("series")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scenes::testing::{landscape, opacity_of};
    use crate::engine::scenes::{Hook, Pain, Promise};
    use crate::engine::source::SpringConfig;
    use crate::engine::transitions::{linear, spring, Direction};
    use crate::types::Clip;

    /// Renders its own local frame as text.
    struct Counter {
        name: &'static str,
        duration: Frame,
    }

    impl Scene for Counter {
        fn name(&self) -> &'static str {
            self.name
        }

        fn duration(&self) -> Frame {
            self.duration
        }

        fn render(&self, frame: Frame, ctx: &SceneContext) -> VisualNode {
            VisualNode::text(ctx.theme.body(frame.to_string(), 10.0, ctx.theme.text))
        }
    }

    fn counter(name: &'static str, duration: Frame) -> Counter {
        Counter { name, duration }
    }

    fn hook() -> Hook {
        Hook {
            tagline: "Inmobiliaria boutique".into(),
        }
    }

    #[test]
    fn transitions_overlap_adjacent_scenes() {
        let series = Series::new(30)
            .scene(counter("a", 90))
            .transition(Transition::fade(linear(15)))
            .scene(counter("b", 120));
        assert_eq!(series.total_duration(), 195);
        assert_eq!(series.starts(), vec![("a", 0), ("b", 75)]);
        assert_eq!(series.locate(74), vec![("a", 74)]);
        assert_eq!(series.locate(80), vec![("a", 80), ("b", 5)]);
        assert_eq!(series.locate(90), vec![("b", 15)]);
    }

    #[test]
    fn spring_fade_follows_its_timing() {
        let ctx = landscape();
        let timing = spring(SpringConfig::damped(200.0), 20);
        let series = Series::new(30)
            .scene(counter("a", 40))
            .transition(Transition::fade(timing))
            .scene(counter("b", 40));
        for elapsed in 1..20 {
            let node = series.evaluate(20 + elapsed, &ctx);
            let expected = timing.progress(elapsed, 30).clamp(0.0, 1.0);
            assert_eq!(opacity_of(&node, "series.b"), expected, "elapsed {elapsed}");
        }
    }

    #[test]
    fn fade_blends_both_scenes() {
        let ctx = landscape();
        let series = Series::new(30)
            .scene(counter("a", 40))
            .transition(Transition::fade(linear(20)))
            .scene(counter("b", 40));
        let node = series.evaluate(25, &ctx);
        assert_eq!(opacity_of(&node, "series.a"), 0.75);
        assert_eq!(opacity_of(&node, "series.b"), 0.25);
        assert_eq!(node.find("series.b").unwrap().text_content(), "5");
    }

    #[test]
    fn wipe_and_slide_layers_reach_identity_after_the_overlap() {
        let ctx = landscape();
        let series = Series::new(30)
            .scene(counter("a", 40))
            .transition(Transition::wipe(Direction::FromLeft, spring(SpringConfig::damped(200.0), 20)))
            .scene(counter("b", 40))
            .transition(Transition::slide(Direction::FromRight, linear(10)))
            .scene(counter("c", 40));

        let during = series.evaluate(30, &ctx);
        assert!(matches!(
            during.find("series.b").unwrap().layer.clip,
            Some(Clip::Inset { right, .. }) if right > 0.0 && right < 100.0
        ));

        let after = series.evaluate(45, &ctx);
        assert!(after.find("series.b").unwrap().layer.is_identity());
        assert!(after.find("series.a").is_none());

        let sliding = series.evaluate(55, &ctx);
        assert!(sliding.find("series.b").unwrap().layer.translate_x < 0.0);
        assert!(sliding.find("series.c").unwrap().layer.translate_x > 0.0);
    }

    #[test]
    fn scene_sees_the_same_frame_inside_and_outside_the_series() {
        let ctx = landscape();
        let series = Series::new(30)
            .scene(hook())
            .transition(Transition::fade(linear(15)))
            .scene(Pain)
            .transition(Transition::wipe(Direction::FromLeft, linear(20)))
            .scene(Promise);

        for (global, local) in [(75, 0), (90, 15), (100, 25), (180, 105)] {
            let node = series.evaluate(global, &ctx);
            let wrapped = node.find("series.pain").unwrap();
            assert_eq!(wrapped.children()[0], Pain.render(local, &ctx), "global {global}");
        }
        let hook_node = series.evaluate(40, &ctx);
        assert_eq!(
            hook_node.find("series.hook").unwrap().children()[0],
            hook().render(40, &ctx)
        );
    }

    #[test]
    fn oversized_transition_is_clamped_to_its_neighbours() {
        let series = Series::new(30)
            .scene(counter("a", 10))
            .transition(Transition::fade(linear(50)))
            .scene(counter("b", 30));
        assert_eq!(series.starts(), vec![("a", 0), ("b", 0)]);
        for g in 0..series.total_duration() {
            for (_, local) in series.locate(g) {
                assert!((0..30).contains(&local));
            }
        }
    }

    #[test]
    fn entry_overlap_is_not_reused_for_exit() {
        let series = Series::new(30)
            .scene(counter("a", 20))
            .transition(Transition::fade(linear(15)))
            .scene(counter("b", 20))
            .transition(Transition::fade(linear(15)))
            .scene(counter("c", 20));
        // b spends 15 frames entering, leaving 5 for its exit.
        assert_eq!(series.starts(), vec![("a", 0), ("b", 5), ("c", 20)]);
        for g in 0..series.total_duration() {
            assert!(series.locate(g).len() <= 2, "frame {g}");
        }
    }

    #[test]
    fn zero_length_transition_is_a_hard_cut() {
        let ctx = landscape();
        let series = Series::new(30)
            .scene(counter("a", 10))
            .transition(Transition::fade(linear(0)))
            .scene(counter("b", 10));
        assert_eq!(series.locate(9), vec![("a", 9)]);
        assert_eq!(series.locate(10), vec![("b", 0)]);
        assert!(series.evaluate(10, &ctx).find("series.b").unwrap().layer.is_identity());
    }

    #[test]
    fn out_of_range_frames_clamp_to_the_timeline() {
        let series = Series::new(30).scene(counter("a", 10));
        assert_eq!(series.locate(-5), vec![("a", 0)]);
        assert_eq!(series.locate(500), vec![("a", 9)]);
        assert!(Series::new(30).locate(0).is_empty());
    }

    #[test]
    fn stray_transitions_are_ignored() {
        let series = Series::new(30)
            .transition(Transition::fade(linear(10)))
            .scene(counter("a", 10))
            .scene(counter("b", 10));
        assert_eq!(series.total_duration(), 20);
    }
}
