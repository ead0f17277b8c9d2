use bevy_ecs::system::Resource;
use bevy_ecs::world::World;
use tracing::warn;

/// Insert `resource` unless one is already installed; the existing one wins.
pub(crate) fn install_singleton<R: Resource>(world: &mut World, resource: R, label: &str) -> bool {
    if world.contains_resource::<R>() {
        warn!(singleton = label, "multiple instances detected; keeping the existing one");
        return false;
    }
    world.insert_resource(resource);
    true
}
