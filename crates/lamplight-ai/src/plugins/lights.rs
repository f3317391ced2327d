//! Simulated smart lights.
//!
//! The record set is created once and owned by the plugin; the tool
//! handlers share it through an `Arc<Mutex<_>>`, so every session wired to
//! the same plugin sees the same lights and writes are serialized.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::tools::{
    require_bool, require_i64, ParamKind, ParamSpec, ToolArguments, ToolDescriptor, ToolError,
    ToolRegistry,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Light {
    pub id: i64,
    pub name: String,
    pub is_on: bool,
}

impl Light {
    fn new(id: i64, name: &str, is_on: bool) -> Self {
        Self {
            id,
            name: name.to_string(),
            is_on,
        }
    }
}

/// The three lights every run starts with.
pub fn default_lights() -> Vec<Light> {
    vec![
        Light::new(1, "Table Lamp", false),
        Light::new(2, "Porch light", false),
        Light::new(3, "Chandelier", true),
    ]
}

#[derive(Debug, Clone)]
pub struct LightsPlugin {
    lights: Arc<Mutex<Vec<Light>>>,
}

impl LightsPlugin {
    pub fn new(lights: Vec<Light>) -> Self {
        Self {
            lights: Arc::new(Mutex::new(lights)),
        }
    }

    /// Snapshot of every light.
    pub fn get_state(&self) -> Result<Vec<Light>, ToolError> {
        Ok(self.lock()?.clone())
    }

    /// Switch light `id` on or off and return its new state.
    pub fn change_state(&self, id: i64, is_on: bool) -> Result<Light, ToolError> {
        let mut lights = self.lock()?;
        let light = lights
            .iter_mut()
            .find(|light| light.id == id)
            .ok_or_else(|| ToolError::NotFound(format!("light {id}")))?;
        light.is_on = is_on;
        info!(id, name = %light.name, is_on, "Light changed");
        Ok(light.clone())
    }

    /// Install `get_state` and `change_state` into `registry`.
    pub fn register(&self, registry: &mut ToolRegistry) -> Result<(), ToolError> {
        let plugin = self.clone();
        registry.register(
            ToolDescriptor::new("get_state", "Gets a list of lights and their current state"),
            Box::new(move |_: &ToolArguments| to_json(&plugin.get_state()?)),
        )?;

        let plugin = self.clone();
        registry.register(
            ToolDescriptor::new("change_state", "Changes the state of the light")
                .with_param(ParamSpec::required("id", ParamKind::Integer, "Id of the light to change"))
                .with_param(ParamSpec::required(
                    "is_on",
                    ParamKind::Boolean,
                    "true to switch the light on, false to switch it off",
                )),
            Box::new(move |args: &ToolArguments| {
                let id = require_i64(args, "id")?;
                let is_on = require_bool(args, "is_on")?;
                to_json(&plugin.change_state(id, is_on)?)
            }),
        )
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Light>>, ToolError> {
        self.lights
            .lock()
            .map_err(|_| ToolError::HandlerError("lights state is poisoned".into()))
    }
}

impl Default for LightsPlugin {
    fn default() -> Self {
        Self::new(default_lights())
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, ToolError> {
    serde_json::to_value(value).map_err(|e| ToolError::HandlerError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry_with_lights() -> (ToolRegistry, LightsPlugin) {
        let plugin = LightsPlugin::default();
        let mut registry = ToolRegistry::new();
        plugin.register(&mut registry).unwrap();
        (registry, plugin)
    }

    #[test]
    fn change_state_returns_updated_record() {
        let (registry, _) = registry_with_lights();

        let result = registry
            .invoke("change_state", &json!({"id": 2, "is_on": true}))
            .unwrap();
        assert_eq!(result, json!({"id": 2, "name": "Porch light", "is_on": true}));
    }

    #[test]
    fn get_state_reflects_changes_and_leaves_others_alone() {
        let (registry, _) = registry_with_lights();
        registry
            .invoke("change_state", &json!({"id": 2, "is_on": true}))
            .unwrap();

        let state: Vec<Light> =
            serde_json::from_value(registry.invoke("get_state", &json!({})).unwrap()).unwrap();
        let mut expected = default_lights();
        expected[1].is_on = true;
        assert_eq!(state, expected);
        assert!(!state[0].is_on);
        assert!(state[2].is_on);
    }

    #[test]
    fn change_state_unknown_id_is_not_found() {
        let (registry, plugin) = registry_with_lights();

        let err = registry
            .invoke("change_state", &json!({"id": 99, "is_on": true}))
            .unwrap_err();
        assert_eq!(err, ToolError::NotFound("light 99".into()));
        assert_eq!(plugin.get_state().unwrap(), default_lights());
    }

    #[test]
    fn oversized_float_id_does_not_reach_the_last_light() {
        let plugin = LightsPlugin::new(vec![Light::new(i64::MAX, "Attic", false)]);
        let mut registry = ToolRegistry::new();
        plugin.register(&mut registry).unwrap();

        let err = registry
            .invoke("change_state", &json!({"id": 1e30, "is_on": true}))
            .unwrap_err();
        assert!(matches!(err, ToolError::ArgumentMismatch { .. }));
        assert!(!plugin.get_state().unwrap()[0].is_on);
    }

    #[test]
    fn change_state_requires_both_arguments() {
        let (registry, _) = registry_with_lights();
        let err = registry.invoke("change_state", &json!({"id": 1})).unwrap_err();
        assert!(matches!(err, ToolError::ArgumentMismatch { .. }));
    }

    #[test]
    fn registering_twice_fails() {
        let (mut registry, plugin) = registry_with_lights();
        let err = plugin.register(&mut registry).unwrap_err();
        assert_eq!(err, ToolError::DuplicateToolName("get_state".into()));
    }

    #[test]
    fn descriptors_match_advertised_schema() {
        let (registry, _) = registry_with_lights();
        let defs = registry.definitions();
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].name, "get_state");
        assert_eq!(defs[1].name, "change_state");
        assert_eq!(defs[1].parameters["properties"]["is_on"]["type"], "boolean");
        assert_eq!(defs[1].parameters["required"], json!(["id", "is_on"]));
    }

    #[test]
    fn separate_plugins_do_not_share_state() {
        let a = LightsPlugin::default();
        let b = LightsPlugin::default();
        a.change_state(1, true).unwrap();
        assert!(a.get_state().unwrap()[0].is_on);
        assert!(!b.get_state().unwrap()[0].is_on);
    }

    #[test]
    fn concurrent_writers_are_serialized() {
        let plugin = LightsPlugin::default();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let plugin = plugin.clone();
                std::thread::spawn(move || plugin.change_state(1 + (i % 3), i % 2 == 0).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(plugin.get_state().unwrap().len(), 3);
    }
}
