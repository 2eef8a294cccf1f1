//! Umbraco block list structures.
//!
//! A block list is serialized as
//!
//! ```json
//! {
//!   "layout": { "Umbraco.BlockList": [ { "contentUdi": "umb://element/..." } ] },
//!   "contentData": [ { "contentTypeKey": "...", "udi": "umb://element/...", ... } ],
//!   "settingsData": []
//! }
//! ```
//!
//! Every udi referenced from `layout` has exactly one `contentData` entry and
//! vice versa. Lists built here keep that closure by construction; lists read
//! from the CMS can be checked with [`BlockList::is_closed`].

use serde::de::Error as _;
use serde::ser::{Error as _, SerializeMap};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::models::null_as_default;
use crate::udi::Udi;

/// Property editor alias used as the layout key.
pub const LAYOUT_KEY: &str = "Umbraco.BlockList";

/// Element type keys of the block kinds the mapper knows about.
pub mod keys {
    pub const HERO_IMAGE: &str = "6a1b7e3c-2f4d-4c8a-9e51-0d3b2a7f8c14";
    pub const EVENT_DESCRIPTION: &str = "c2e94d6f-58b1-4a7e-b3d0-7f61a9e2c5b8";
    pub const SOCIAL_NETWORK: &str = "f0d83a52-9c6e-4b17-8a2d-e4b5c71f3096";
    pub const IMAGE_GALLERY: &str = "8e4f2b9a-1d7c-4f35-a6e0-b92c5d14e7a3";
}

/// Icon shown next to outbound links.
pub const LINK_ICON: &str = "icon-link";

/// Target for outbound links.
pub const LINK_TARGET: &str = "_blank";

/// A multi-url-picker entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    #[serde(deserialize_with = "null_as_default")]
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub target: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

impl Link {
    /// An outbound link opening in a new tab.
    pub fn external(url: impl Into<String>) -> Self {
        Self {
            icon: LINK_ICON.to_string(),
            name: None,
            target: LINK_TARGET.to_string(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroImageBlock {
    pub udi: Udi,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageGalleryBlock {
    pub udi: Udi,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The block carrying CRM-sourced description, organiser and social links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDescriptionBlock {
    pub udi: Udi,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub organiser_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organiser_website: Option<Vec<Link>>,
    #[serde(default)]
    pub social_networks: BlockList,
    /// Fields editors added on the CMS side; carried through merges.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialNetworkBlock {
    pub udi: Udi,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub link: Vec<Link>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A block whose content the mapper does not interpret.
///
/// The complete `contentData` entry is kept and written back verbatim, key
/// order included.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticBlock {
    content_type_key: String,
    udi: Udi,
    entry: Map<String, Value>,
}

impl StaticBlock {
    /// A new entry: `contentTypeKey`, `udi`, then `fields` in order.
    pub fn new(content_type_key: impl Into<String>, udi: Udi, fields: Map<String, Value>) -> Self {
        let content_type_key = content_type_key.into();
        let mut entry = Map::new();
        entry.insert(
            "contentTypeKey".to_string(),
            Value::String(content_type_key.clone()),
        );
        entry.insert("udi".to_string(), Value::String(udi.to_uri()));
        for (k, v) in fields {
            if k != "contentTypeKey" && k != "udi" {
                entry.insert(k, v);
            }
        }
        Self {
            content_type_key,
            udi,
            entry,
        }
    }

    pub fn content_type_key(&self) -> &str {
        &self.content_type_key
    }

    pub fn udi(&self) -> Udi {
        self.udi
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.entry.get(field)
    }

    /// The entry exactly as it is serialized.
    pub fn entry(&self) -> &Map<String, Value> {
        &self.entry
    }
}

/// One entry of a block list's `contentData`.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    HeroImage(HeroImageBlock),
    EventDescription(EventDescriptionBlock),
    SocialNetwork(SocialNetworkBlock),
    ImageGallery(ImageGalleryBlock),
    Static(StaticBlock),
}

impl Block {
    pub fn udi(&self) -> Udi {
        match self {
            Block::HeroImage(b) => b.udi,
            Block::EventDescription(b) => b.udi,
            Block::SocialNetwork(b) => b.udi,
            Block::ImageGallery(b) => b.udi,
            Block::Static(b) => b.udi,
        }
    }

    pub fn content_type_key(&self) -> &str {
        match self {
            Block::HeroImage(_) => keys::HERO_IMAGE,
            Block::EventDescription(_) => keys::EVENT_DESCRIPTION,
            Block::SocialNetwork(_) => keys::SOCIAL_NETWORK,
            Block::ImageGallery(_) => keys::IMAGE_GALLERY,
            Block::Static(b) => b.content_type_key(),
        }
    }

    /// Decodes a complete `contentData` entry.
    ///
    /// Known kinds are typed only when they serialize back to the same JSON
    /// text; anything else is kept verbatim as [`Block::Static`]. The
    /// event-description block is exempt from that check because its
    /// CRM-sourced fields are rewritten on every update anyway.
    fn decode(key: String, udi: Udi, entry: Map<String, Value>) -> Block {
        fn typed<T>(entry: &Map<String, Value>, wrap: fn(T) -> Block, exact: bool) -> Option<Block>
        where
            T: for<'de> Deserialize<'de>,
        {
            let body: Map<String, Value> = entry
                .iter()
                .filter(|(k, _)| k.as_str() != "contentTypeKey")
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            let block = wrap(serde_json::from_value::<T>(Value::Object(body)).ok()?);
            if exact {
                let written = serde_json::to_string(&block).ok()?;
                let read = serde_json::to_string(entry).ok()?;
                if written != read {
                    return None;
                }
            }
            Some(block)
        }

        let decoded = match key.as_str() {
            keys::HERO_IMAGE => typed(&entry, Block::HeroImage, true),
            keys::EVENT_DESCRIPTION => typed(&entry, Block::EventDescription, false),
            keys::SOCIAL_NETWORK => typed(&entry, Block::SocialNetwork, true),
            keys::IMAGE_GALLERY => typed(&entry, Block::ImageGallery, true),
            _ => None,
        };

        decoded.unwrap_or_else(|| {
            Block::Static(StaticBlock {
                content_type_key: key,
                udi,
                entry,
            })
        })
    }
}

impl Serialize for Block {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let value = match self {
            Block::Static(b) => return b.entry.serialize(serializer),
            Block::HeroImage(b) => serde_json::to_value(b),
            Block::EventDescription(b) => serde_json::to_value(b),
            Block::SocialNetwork(b) => serde_json::to_value(b),
            Block::ImageGallery(b) => serde_json::to_value(b),
        }
        .map_err(S::Error::custom)?;
        let body = match value {
            Value::Object(map) => map,
            other => {
                return Err(S::Error::custom(format!(
                    "block serialized to non-object: {}",
                    other
                )))
            }
        };
        let mut map = serializer.serialize_map(Some(body.len() + 1))?;
        map.serialize_entry("contentTypeKey", self.content_type_key())?;
        for (k, v) in &body {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entry = Map::<String, Value>::deserialize(deserializer)?;
        let key = match entry.get("contentTypeKey") {
            Some(Value::String(key)) => key.clone(),
            Some(other) => {
                return Err(D::Error::custom(format!(
                    "contentTypeKey must be a string, got {}",
                    other
                )))
            }
            None => return Err(D::Error::missing_field("contentTypeKey")),
        };
        let udi = match entry.get("udi") {
            Some(Value::String(s)) => Udi::parse(s).map_err(D::Error::custom)?,
            _ => return Err(D::Error::missing_field("udi")),
        };
        Ok(Block::decode(key, udi, entry))
    }
}

/// A layout reference to a content entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutItem {
    pub content_udi: Udi,
    /// e.g. `settingsUdi`, when editors attached settings
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LayoutItem {
    pub fn new(content_udi: Udi) -> Self {
        Self {
            content_udi,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Layout {
    #[serde(rename = "Umbraco.BlockList", default)]
    items: Vec<LayoutItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireBlockList {
    #[serde(default)]
    layout: Layout,
    #[serde(default)]
    content_data: Vec<Block>,
    #[serde(default)]
    settings_data: Vec<Value>,
}

/// An ordered list of blocks with its layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireBlockList", into = "WireBlockList")]
pub struct BlockList {
    layout: Vec<LayoutItem>,
    content: Vec<Block>,
    settings: Vec<Value>,
}

impl From<WireBlockList> for BlockList {
    fn from(wire: WireBlockList) -> Self {
        Self {
            layout: wire.layout.items,
            content: wire.content_data,
            settings: wire.settings_data,
        }
    }
}

impl From<BlockList> for WireBlockList {
    fn from(list: BlockList) -> Self {
        Self {
            layout: Layout { items: list.layout },
            content_data: list.content,
            settings_data: list.settings,
        }
    }
}

impl BlockList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a block, referencing it from the layout.
    pub fn push(&mut self, block: Block) {
        self.layout.push(LayoutItem::new(block.udi()));
        self.content.push(block);
    }

    pub fn len(&self) -> usize {
        self.layout.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }

    pub fn layout(&self) -> &[LayoutItem] {
        &self.layout
    }

    pub fn content(&self) -> &[Block] {
        &self.content
    }

    pub fn settings(&self) -> &[Value] {
        &self.settings
    }

    pub fn find(&self, udi: Udi) -> Option<&Block> {
        self.content.iter().find(|b| b.udi() == udi)
    }

    /// The block at the given layout position.
    pub fn block_at(&self, index: usize) -> Option<&Block> {
        self.layout
            .get(index)
            .and_then(|item| self.find(item.content_udi))
    }

    /// Blocks in layout order. Dangling layout references are skipped.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.layout
            .iter()
            .filter_map(|item| self.find(item.content_udi))
    }

    /// Returns a copy of this list with the block at layout position `index`
    /// replaced. The replacement keeps the original udi so the layout entry
    /// (and any settings reference) stays valid.
    ///
    /// Returns `None` if `index` is out of range or dangling.
    pub fn with_replaced(&self, index: usize, replacement: Block) -> Option<BlockList> {
        let udi = self.layout.get(index)?.content_udi;
        if replacement.udi() != udi {
            return None;
        }
        let slot = self.content.iter().position(|b| b.udi() == udi)?;

        let content = self
            .content
            .iter()
            .enumerate()
            .map(|(i, b)| if i == slot { replacement.clone() } else { b.clone() })
            .collect();

        Some(BlockList {
            layout: self.layout.clone(),
            content,
            settings: self.settings.clone(),
        })
    }

    /// True when layout and content reference exactly the same udis, each once.
    pub fn is_closed(&self) -> bool {
        let layout: HashSet<Udi> = self.layout.iter().map(|i| i.content_udi).collect();
        let content: HashSet<Udi> = self.content.iter().map(Block::udi).collect();
        layout.len() == self.layout.len() && content.len() == self.content.len() && layout == content
    }
}
