#![warn(missing_docs)]
//! Frame schedule helpers wrapping `bevy_ecs`.
//!
//! Every frame runs one [`FrameSchedule`] whose systems are grouped into
//! [`FrameSet`]s executed strictly in declaration order.

use bevy_ecs::schedule::{
    IntoSystemSetConfigs, Schedule, ScheduleLabel, Schedules, SystemSet,
};
use bevy_ecs::world::World;
use pickplace_core::FrameTick;

/// Label of the per-frame schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ScheduleLabel)]
pub struct FrameSchedule;

/// Ordered stages of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet)]
pub enum FrameSet {
    /// Mirror scene state into acceleration structures.
    Sync,
    /// Turn raw input into action events.
    Input,
    /// Cast the gaze ray and track what is stared at.
    Gaze,
    /// Route interact events.
    Interact,
    /// Visual feedback and state transitions on objects.
    Feedback,
    /// Held-object movement and placement.
    Hold,
}

/// Build the frame schedule with its sets chained.
pub fn build_frame_schedule() -> Schedules {
    let mut schedules = Schedules::default();
    let mut schedule = Schedule::new(FrameSchedule);
    schedule.set_apply_final_deferred(true);
    schedule.configure_sets(
        (
            FrameSet::Sync,
            FrameSet::Input,
            FrameSet::Gaze,
            FrameSet::Interact,
            FrameSet::Feedback,
            FrameSet::Hold,
        )
            .chain(),
    );
    schedules.insert(schedule);
    schedules
}

/// Run the frame schedule once.
pub fn run_frame(world: &mut World, schedules: &mut Schedules, tick: FrameTick) {
    tracing::trace!(tick = tick.0, "running frame schedule");
    if let Some(schedule) = schedules.get_mut(FrameSchedule) {
        schedule.run(world);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::schedule::IntoSystemConfigs;
    use bevy_ecs::system::{ResMut, Resource};

    #[derive(Resource, Default)]
    struct Trace(Vec<&'static str>);

    #[test]
    fn sets_run_in_frame_order() {
        let mut world = World::default();
        world.insert_resource(Trace::default());
        let mut schedules = build_frame_schedule();

        if let Some(schedule) = schedules.get_mut(FrameSchedule) {
            schedule.add_systems((
                (|mut t: ResMut<Trace>| t.0.push("hold")).in_set(FrameSet::Hold),
                (|mut t: ResMut<Trace>| t.0.push("gaze")).in_set(FrameSet::Gaze),
                (|mut t: ResMut<Trace>| t.0.push("sync")).in_set(FrameSet::Sync),
                (|mut t: ResMut<Trace>| t.0.push("interact")).in_set(FrameSet::Interact),
            ));
        }

        run_frame(&mut world, &mut schedules, FrameTick::ZERO);
        assert_eq!(
            world.resource::<Trace>().0,
            vec!["sync", "gaze", "interact", "hold"]
        );
    }
}
