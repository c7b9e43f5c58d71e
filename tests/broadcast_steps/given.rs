//! Given steps for broadcast BDD scenarios.

use std::sync::Arc;

use eyre::WrapErr;
use observer_set::observer_set::{domain::CapabilityDescriptor, services::ObserverRegistry};
use rstest_bdd_macros::given;

use super::world::{BroadcastWorld, ScenarioObserver, split_list};

#[given(r#"a registry with required message "{required}" and optional message "{optional}""#)]
fn a_registry_with(
    world: &mut BroadcastWorld,
    required: String,
    optional: String,
) -> Result<(), eyre::Report> {
    let descriptor = CapabilityDescriptor::builder()
        .required(required.as_str())
        .optional(optional.as_str())
        .build()
        .wrap_err("build scenario descriptor")?;
    world.registry = Some(Arc::new(ObserverRegistry::new(descriptor)));
    world.required = Some(required);
    Ok(())
}

#[given(r#"the registered observers are "{names}""#)]
fn registered_observers(world: &mut BroadcastWorld, names: String) -> Result<(), eyre::Report> {
    for name in split_list(&names) {
        world.spawn(name, true, &[])?;
        world.register(name)?;
    }
    Ok(())
}

#[given(r#"an unregistered observer "{name}""#)]
fn unregistered_observer(world: &mut BroadcastWorld, name: String) -> Result<(), eyre::Report> {
    world.spawn(&name, true, &[])?;
    Ok(())
}

#[given(r#"observer "{actor}" removes "{target}" when it handles a change"#)]
fn removes_on_change(
    world: &mut BroadcastWorld,
    actor: String,
    target: String,
) -> Result<(), eyre::Report> {
    let registry = world.registry()?;
    let victim = world.observer(&target)?;
    world
        .observer(&actor)?
        .react(Box::new(move || registry.remove(&*victim)));
    Ok(())
}

#[given(r#"observer "{actor}" adds "{target}" when it handles a change"#)]
fn adds_on_change(
    world: &mut BroadcastWorld,
    actor: String,
    target: String,
) -> Result<(), eyre::Report> {
    let registry = world.registry()?;
    let newcomer: Arc<dyn ScenarioObserver> = world.observer(&target)?;
    world
        .observer(&actor)?
        .react(Box::new(move || registry.add(&newcomer)));
    Ok(())
}

#[given(r#"observers "{names}" are registered with "{message}" implemented by "{implementer}""#)]
fn registered_with_implementer(
    world: &mut BroadcastWorld,
    names: String,
    message: String,
    implementer: String,
) -> Result<(), eyre::Report> {
    for name in split_list(&names) {
        let optional = if name == implementer {
            vec![message.as_str()]
        } else {
            Vec::new()
        };
        world.spawn(name, true, &optional)?;
        world.register(name)?;
    }
    Ok(())
}

#[given(r#"a registered observer "{name}" that does not implement "{message}""#)]
fn non_conforming_observer(
    world: &mut BroadcastWorld,
    name: String,
    message: String,
) -> Result<(), eyre::Report> {
    if world.required.as_deref() != Some(message.as_str()) {
        return Err(eyre::eyre!(
            "'{message}' is not the required message of this scenario"
        ));
    }
    world.spawn(&name, false, &[])?;
    world.register(&name)
}
