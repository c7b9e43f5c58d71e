//! When steps for broadcast BDD scenarios.

use std::sync::Arc;

use observer_set::observer_set::domain::DispatchMode;
use rstest_bdd_macros::when;

use super::world::{BroadcastWorld, ScenarioObserver};

#[when(r#""{message}" is broadcast"#)]
fn message_is_broadcast(world: &mut BroadcastWorld, message: String) -> Result<(), eyre::Report> {
    let registry = world.registry()?;
    let proxy = registry.proxy();
    let result = match registry.descriptor().mode_of(&message) {
        Some(DispatchMode::Required) => proxy.send(&message, |observer| observer.changed()),
        Some(DispatchMode::Optional) | None => proxy.send(&message, |observer| observer.tick()),
    };
    world.last_result = Some(result);
    Ok(())
}

#[when(r#"observer "{name}" is removed and registered again"#)]
fn removed_and_registered_again(
    world: &mut BroadcastWorld,
    name: String,
) -> Result<(), eyre::Report> {
    let registry = world.registry()?;
    let observer: Arc<dyn ScenarioObserver> = world.observer(&name)?;
    registry.remove(&*observer);
    registry.add(&observer);
    Ok(())
}
