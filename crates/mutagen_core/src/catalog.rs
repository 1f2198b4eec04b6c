//! # Item Catalog
//!
//! **Append-only registry of base items and fusion products**
//!
//! Base items are declared once (usually from a TOML file) and never change.
//! Fusion products (composites) are appended at merge time and only ever
//! reference items that were already in the catalog when they were created.
//! An item's handle is its insertion index, so every composite source has a
//! strictly smaller handle than the composite itself: the source graph is
//! acyclic and finite by construction.
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut catalog = ItemCatalog::new();
//! let wing = catalog.add_base("Honey Wing", ClassTag::Winged, 80.0)?;
//! let fang = catalog.add_base("Mantis Fang", ClassTag::Predator, 60.0)?;
//!
//! let fused = catalog.add_composite(vec![
//!     SourceStack::new(wing, 2),
//!     SourceStack::new(fang, 1),
//! ])?;
//! assert_eq!(catalog.name(fused), Some("Merged: Honey Wing + Mantis Fang"));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::{CatalogError, CatalogResult};

/// Handle of an item in an [`ItemCatalog`].
///
/// Two stacks hold "the same item" exactly when their handles are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(u32);

impl ItemId {
    /// Creates a handle from its raw index.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw index.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Class tag of a base item, used for compatibility lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ClassTag {
    /// Flying insects.
    Winged = 0,
    /// Hunters.
    Predator = 1,
    /// Shape-shifters.
    Metamorph = 2,
    /// Colony insects.
    Swarm = 3,
    /// Display insects.
    Dancer = 4,
}

impl ClassTag {
    /// Every class tag, in table order.
    pub const ALL: [Self; 5] = [
        Self::Winged,
        Self::Predator,
        Self::Metamorph,
        Self::Swarm,
        Self::Dancer,
    ];

    /// Row/column of this tag in the compatibility table.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase name, as written in config files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Winged => "winged",
            Self::Predator => "predator",
            Self::Metamorph => "metamorph",
            Self::Swarm => "swarm",
            Self::Dancer => "dancer",
        }
    }
}

/// A set of class tags (duplicates collapse).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ClassSet(u8);

impl ClassSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Creates a set holding a single tag.
    #[inline]
    #[must_use]
    pub const fn single(tag: ClassTag) -> Self {
        Self(1 << tag as u8)
    }

    /// Checks if a tag is in the set.
    #[inline]
    #[must_use]
    pub const fn contains(self, tag: ClassTag) -> bool {
        (self.0 & (1 << tag as u8)) != 0
    }

    /// Returns the union of two sets.
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Adds a tag to the set.
    #[inline]
    pub fn insert(&mut self, tag: ClassTag) {
        self.0 |= 1 << tag as u8;
    }

    /// Number of distinct tags.
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns true if no tag is set.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates the tags in table order.
    pub fn iter(self) -> impl Iterator<Item = ClassTag> {
        ClassTag::ALL.into_iter().filter(move |&tag| self.contains(tag))
    }
}

impl FromIterator<ClassTag> for ClassSet {
    fn from_iter<T: IntoIterator<Item = ClassTag>>(iter: T) -> Self {
        let mut set = Self::EMPTY;
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

/// One `(source item, count)` pair of a composite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceStack {
    /// The source item.
    pub item: ItemId,
    /// How many units of it went into the fusion.
    pub count: u32,
}

impl SourceStack {
    /// Creates a new source stack.
    #[inline]
    #[must_use]
    pub const fn new(item: ItemId, count: u32) -> Self {
        Self { item, count }
    }
}

/// What an item is made of.
#[derive(Clone, Debug, PartialEq)]
pub enum ItemKind {
    /// A base item with intrinsic data.
    Base {
        /// Class tag.
        class: ClassTag,
        /// Intrinsic stability in `[0, 100]`.
        stability: f32,
    },
    /// A fusion product.
    Composite {
        /// Non-empty list of earlier items and their counts.
        sources: Vec<SourceStack>,
    },
}

/// An immutable catalog entry.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemEntry {
    /// Handle of this entry.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Display description.
    pub description: String,
    /// Base data or composite sources.
    pub kind: ItemKind,
}

impl ItemEntry {
    /// Returns true for fusion products.
    #[inline]
    #[must_use]
    pub const fn is_composite(&self) -> bool {
        matches!(self.kind, ItemKind::Composite { .. })
    }

    /// Returns the composite sources, or an empty slice for base items.
    #[must_use]
    pub fn sources(&self) -> &[SourceStack] {
        match &self.kind {
            ItemKind::Composite { sources } => sources,
            ItemKind::Base { .. } => &[],
        }
    }
}

/// A base item as declared in a catalog file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BaseItemConfig {
    /// Display name (unique among base items).
    pub name: String,
    /// Class tag.
    pub class: ClassTag,
    /// Intrinsic stability in `[0, 100]`.
    pub stability: f32,
    /// Optional description.
    #[serde(default)]
    pub description: String,
}

/// The `[[items]]` list of a catalog file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base items, in handle order.
    #[serde(default)]
    pub items: Vec<BaseItemConfig>,
}

/// Append-only registry of every item a fusion station can see.
#[derive(Clone, Debug, Default)]
pub struct ItemCatalog {
    /// All entries indexed by handle.
    entries: Vec<ItemEntry>,
    /// Names of base items (base names must be unique).
    base_names: HashSet<String>,
}

impl ItemCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from a parsed config.
    ///
    /// # Errors
    ///
    /// Returns error if any item has an out-of-range stability or a
    /// duplicate name.
    pub fn from_config(config: &CatalogConfig) -> CatalogResult<Self> {
        let mut catalog = Self::new();
        for item in &config.items {
            catalog.add_base_item(item.clone())?;
        }
        Ok(catalog)
    }

    /// Parses a catalog from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` on malformed TOML, or any error of
    /// [`ItemCatalog::from_config`].
    pub fn from_toml_str(text: &str) -> CatalogResult<Self> {
        let config: CatalogConfig =
            toml::from_str(text).map_err(|e| CatalogError::InvalidConfig(e.to_string()))?;
        Self::from_config(&config)
    }

    /// Adds a base item.
    ///
    /// # Errors
    ///
    /// Returns error if the stability is outside `[0, 100]` or the name is
    /// already taken by another base item.
    pub fn add_base(
        &mut self,
        name: impl Into<String>,
        class: ClassTag,
        stability: f32,
    ) -> CatalogResult<ItemId> {
        self.add_base_item(BaseItemConfig {
            name: name.into(),
            class,
            stability,
            description: String::new(),
        })
    }

    /// Adds a base item from its config record.
    ///
    /// # Errors
    ///
    /// See [`ItemCatalog::add_base`].
    pub fn add_base_item(&mut self, item: BaseItemConfig) -> CatalogResult<ItemId> {
        if !(0.0..=100.0).contains(&item.stability) {
            return Err(CatalogError::StabilityOutOfRange {
                name: item.name,
                stability: item.stability,
            });
        }
        if self.base_names.contains(&item.name) {
            return Err(CatalogError::DuplicateName(item.name));
        }

        let id = self.next_id();
        self.base_names.insert(item.name.clone());
        self.entries.push(ItemEntry {
            id,
            name: item.name,
            description: item.description,
            kind: ItemKind::Base {
                class: item.class,
                stability: item.stability,
            },
        });
        Ok(id)
    }

    /// Appends a fusion product built from existing items.
    ///
    /// The name and description are derived from the source names and
    /// counts at creation time.
    ///
    /// # Errors
    ///
    /// - `EmptySources` if `sources` is empty
    /// - `ZeroSourceCount` if any count is zero
    /// - `UnknownItem` if any source is not in the catalog
    pub fn add_composite(&mut self, sources: Vec<SourceStack>) -> CatalogResult<ItemId> {
        if sources.is_empty() {
            return Err(CatalogError::EmptySources);
        }
        for source in &sources {
            if source.count == 0 {
                return Err(CatalogError::ZeroSourceCount(source.item));
            }
            if self.get(source.item).is_none() {
                return Err(CatalogError::UnknownItem(source.item));
            }
        }

        let names: Vec<&str> = sources
            .iter()
            .map(|s| self.entries[s.item.index()].name.as_str())
            .collect();
        let name = format!("Merged: {}", names.join(" + "));
        let parts: Vec<String> = names
            .iter()
            .zip(&sources)
            .map(|(name, s)| format!("{name} (x{})", s.count))
            .collect();
        let description = format!("Contains combined effects of {}.", join_with_and(&parts));

        let id = self.next_id();
        self.entries.push(ItemEntry {
            id,
            name,
            description,
            kind: ItemKind::Composite { sources },
        });
        Ok(id)
    }

    /// Gets an entry by handle.
    #[inline]
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&ItemEntry> {
        self.entries.get(id.index())
    }

    /// Gets the display name of an item.
    #[must_use]
    pub fn name(&self, id: ItemId) -> Option<&str> {
        self.get(id).map(|e| e.name.as_str())
    }

    /// Finds the first item with the given name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<ItemId> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.id)
    }

    /// Returns all entries in handle order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemEntry> {
        self.entries.iter()
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the catalog holds no items.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // Catalogs never grow past u32::MAX entries.
    #[allow(clippy::cast_possible_truncation)]
    fn next_id(&self) -> ItemId {
        ItemId(self.entries.len() as u32)
    }
}

/// "a", "a and b", "a, b and c".
fn join_with_and(parts: &[String]) -> String {
    match parts {
        [] => String::new(),
        [only] => only.clone(),
        [head @ .., last] => format!("{} and {last}", head.join(", ")),
    }
}
