//! Level definitions and loading.
//!
//! A level is a serialized [`LevelDefinition`]: world settings, the objects
//! event nodes refer to, goal counters, and one [`EventRecord`] per node.
//! Loading constructs every node first and resolves links by uid afterwards,
//! so records may link to nodes defined later in the file.

use level_world::{
    Corpse, Entity, LevelGoal, LevelSettings, LevelWorld, ObjectHandle, PersistentGoal, Room,
    Trigger, Uid,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::error::LevelError;
use crate::graph::{GraphConfig, LevelLogic};
use crate::node::EventType;

/// A node kind as written in a level file: numeric id or name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KindRef {
    Id(i32),
    Name(String),
}

impl KindRef {
    pub fn resolve(&self) -> Option<EventType> {
        match self {
            KindRef::Id(id) => EventType::from_id(*id),
            KindRef::Name(name) => EventType::from_name(name),
        }
    }
}

impl fmt::Display for KindRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KindRef::Id(id) => write!(f, "{id}"),
            KindRef::Name(name) => f.write_str(name),
        }
    }
}

/// A property value. Level files may write numbers and booleans bare; the
/// node's handler parses the text form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Bool(b) => write!(f, "{b}"),
            PropValue::Int(i) => write!(f, "{i}"),
            PropValue::Float(x) => write!(f, "{x}"),
            PropValue::Str(s) => f.write_str(s),
        }
    }
}

/// Serialized form of one event node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub uid: Uid,
    #[serde(default)]
    pub name: String,
    pub kind: KindRef,
    /// Delay in seconds before the node acts on an activation.
    #[serde(default)]
    pub delay: Option<f32>,
    /// Outgoing links, by uid of any object kind.
    #[serde(default)]
    pub links: Vec<Uid>,
    #[serde(default)]
    pub props: BTreeMap<String, PropValue>,
}

impl EventRecord {
    pub fn new(uid: i32, kind: EventType) -> Self {
        Self {
            uid: Uid(uid),
            name: String::new(),
            kind: KindRef::Id(kind.id()),
            delay: None,
            links: Vec::new(),
            props: BTreeMap::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_delay(mut self, seconds: f32) -> Self {
        self.delay = Some(seconds);
        self
    }

    pub fn with_links(mut self, links: impl IntoIterator<Item = i32>) -> Self {
        self.links = links.into_iter().map(Uid).collect();
        self
    }

    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.insert(name.into(), PropValue::Str(value.into()));
        self
    }
}

/// A goal counter as written in a level file. `count` starts at the initial
/// value unless given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalRecord {
    pub name: String,
    #[serde(default)]
    pub initial: i32,
    #[serde(default)]
    pub count: Option<i32>,
}

/// A complete level.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelDefinition {
    pub settings: LevelSettings,
    pub graph: GraphConfig,
    /// Uid of the entity controlled by the local player.
    pub player: Option<Uid>,
    pub entities: Vec<Entity>,
    pub corpses: Vec<Corpse>,
    pub triggers: Vec<Trigger>,
    pub rooms: Vec<Room>,
    pub goals: Vec<GoalRecord>,
    pub persistent_goals: Vec<GoalRecord>,
    pub events: Vec<EventRecord>,
}

impl LevelDefinition {
    pub fn from_toml(text: &str) -> Result<Self, LevelError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_json(text: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a level file, choosing the format by extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match extension.as_str() {
            "toml" => Self::from_toml(&std::fs::read_to_string(path)?),
            "json" => Self::from_json(&std::fs::read_to_string(path)?),
            _ => Err(LevelError::UnsupportedFormat(extension)),
        }
    }

    /// Build the level world: settings, objects, player and goals.
    pub fn build_world(&self) -> LevelWorld {
        let mut world = LevelWorld::new();
        world.settings = self.settings;
        world.settings.set_rock_hardness(self.settings.default_rock_hardness);

        for entity in &self.entities {
            world.objects.insert_entity(entity.clone());
        }
        for corpse in &self.corpses {
            world.objects.insert_corpse(corpse.clone());
        }
        for trigger in &self.triggers {
            world.objects.insert_trigger(trigger.clone());
        }
        for room in &self.rooms {
            world.objects.insert_room(room.clone());
        }

        if let Some(uid) = self.player {
            match world.objects.handle_from_uid(uid) {
                Some(handle) if world.objects.entity(handle).is_some() => {
                    world.player.entity = Some(handle);
                }
                _ => tracing::warn!(uid = uid.0, "player uid is not an entity"),
            }
        }

        for goal in &self.goals {
            let mut level_goal = LevelGoal::new(goal.name.as_str(), goal.initial);
            level_goal.count = goal.count.unwrap_or(goal.initial);
            world.goals.add_level_goal(level_goal);
        }
        for goal in &self.persistent_goals {
            let mut persistent = PersistentGoal::new(goal.name.as_str(), goal.initial);
            persistent.count = goal.count.unwrap_or(goal.initial);
            world.goals.add_persistent_goal(persistent);
        }

        world
    }
}

impl LevelLogic {
    /// Load a level: build its world, then construct and link every event.
    ///
    /// Records with an unknown kind or a reused uid are logged and skipped.
    /// Links to uids that do not exist are logged and dropped.
    pub fn from_definition(definition: &LevelDefinition) -> Self {
        let mut logic = LevelLogic::new(definition.build_world(), definition.graph.clone());

        let mut constructed = Vec::with_capacity(definition.events.len());
        for record in &definition.events {
            match logic.construct(record) {
                Ok(handle) => constructed.push((handle, record)),
                Err(err) => tracing::error!(uid = record.uid.0, "skipping event: {err}"),
            }
        }

        for (handle, record) in constructed {
            logic.link_record(handle, record);
        }

        tracing::info!(
            events = logic.graph.len(),
            entities = logic.world.objects.entity_count(),
            "level loaded"
        );
        logic
    }

    pub fn load_toml(text: &str) -> Result<Self, LevelError> {
        Ok(Self::from_definition(&LevelDefinition::from_toml(text)?))
    }

    pub fn load_json(text: &str) -> Result<Self, LevelError> {
        Ok(Self::from_definition(&LevelDefinition::from_json(text)?))
    }

    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        Ok(Self::from_definition(&LevelDefinition::from_file(path)?))
    }

    /// Construct one node from its record and apply its delay and
    /// properties. Links are not resolved here.
    pub fn construct(&mut self, record: &EventRecord) -> Result<ObjectHandle, LevelError> {
        let event_type = record.kind.resolve().ok_or_else(|| LevelError::UnknownKind {
            uid: record.uid,
            kind: record.kind.to_string(),
        })?;
        let handle = self.spawn_node(record.uid, event_type, record.name.as_str())?;

        // Property failures are logged by the node and leave the field at its default.
        if let Some(delay) = record.delay {
            let _ = self.apply_var(handle, "delay", &delay.to_string());
        }
        for (name, value) in &record.props {
            let _ = self.apply_var(handle, name, &value.to_string());
        }
        Ok(handle)
    }

    /// Resolve a record's links by uid and append them to the node.
    pub fn link_record(&mut self, handle: ObjectHandle, record: &EventRecord) {
        for &link in &record.links {
            match self.world.objects.handle_from_uid(link) {
                Some(target) => {
                    self.graph.add_link(handle, target);
                }
                None => tracing::warn!(
                    uid = record.uid.0,
                    link = link.0,
                    "dropping link to unknown uid"
                ),
            }
        }
    }
}
