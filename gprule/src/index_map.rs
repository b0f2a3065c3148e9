//! Correspondence between rule syntax items and graph indices.
//!
//! While a rule declaration is lowered, one table of index maps is kept
//! for nodes and one for edges.
//! A map records the indices of an item in the left- and right-hand graph,
//! and for edges the identifiers of their incident nodes.
//! The tables only live during the construction of a single rule.

use alloc::{string::String, vec::Vec};
use fnv::FnvHashMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexMap {
    pub id: String,
    pub left: Option<usize>,
    pub right: Option<usize>,
    pub source: Option<String>,
    pub target: Option<String>,
}

impl IndexMap {
    /// Map for a node.
    pub fn node(id: String, left: Option<usize>, right: Option<usize>) -> Self {
        Self {
            id,
            left,
            right,
            source: None,
            target: None,
        }
    }

    /// Map for an edge between two nodes, given by their identifiers.
    pub fn edge(id: String, left: Option<usize>, right: Option<usize>, src: String, tgt: String) -> Self {
        Self {
            id,
            left,
            right,
            source: Some(src),
            target: Some(tgt),
        }
    }

    /// Return true if the map is an edge map with the given endpoints.
    pub fn connects(&self, source: &str, target: &str) -> bool {
        self.source.as_deref() == Some(source) && self.target.as_deref() == Some(target)
    }
}

/// Handle to a map in a table.
///
/// A handle stays valid until its map is removed,
/// regardless of insertions and removals of other maps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapId(usize);

/// Table of index maps.
#[derive(Debug, Default)]
pub struct IndexMaps {
    maps: Vec<Option<IndexMap>>,
    /// slot of the oldest live map for every identifier
    ids: FnvHashMap<String, usize>,
    /// slots of live edge maps by source and target, in insertion order
    endpoints: FnvHashMap<String, FnvHashMap<String, Vec<usize>>>,
    live: usize,
}

impl IndexMaps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a map to the table.
    ///
    /// If a live map with the same identifier exists,
    /// lookups by identifier keep returning the older map.
    pub fn insert(&mut self, map: IndexMap) -> MapId {
        let slot = self.maps.len();
        self.ids.entry(map.id.clone()).or_insert(slot);
        if let (Some(src), Some(tgt)) = (&map.source, &map.target) {
            let targets = self.endpoints.entry(src.clone()).or_default();
            targets.entry(tgt.clone()).or_default().push(slot);
        }
        self.maps.push(Some(map));
        self.live += 1;
        MapId(slot)
    }

    pub fn get(&self, id: MapId) -> Option<&IndexMap> {
        self.maps.get(id.0)?.as_ref()
    }

    pub fn get_mut(&mut self, id: MapId) -> Option<&mut IndexMap> {
        self.maps.get_mut(id.0)?.as_mut()
    }

    pub fn find_by_id(&self, id: &str) -> Option<MapId> {
        self.ids.get(id).copied().map(MapId)
    }

    /// Find the first live edge map with the given endpoints.
    pub fn find_by_endpoints(&self, source: &str, target: &str) -> Option<MapId> {
        let slots = self.endpoints.get(source)?.get(target)?;
        slots.first().copied().map(MapId)
    }

    /// Detach a map from the table, leaving all other handles valid.
    pub fn remove(&mut self, id: MapId) -> Option<IndexMap> {
        let map = self.maps.get_mut(id.0)?.take()?;
        self.live -= 1;
        if self.ids.get(&map.id) == Some(&id.0) {
            // the next live map with the same identifier takes over
            let mut later = self.maps.iter().enumerate().skip(id.0 + 1);
            let next = later.find(|(_, m)| m.as_ref().map_or(false, |m| m.id == map.id));
            match next {
                Some((slot, _)) => self.ids.insert(map.id.clone(), slot),
                None => self.ids.remove(&map.id),
            };
        }
        if let (Some(src), Some(tgt)) = (&map.source, &map.target) {
            if let Some(targets) = self.endpoints.get_mut(src) {
                if let Some(slots) = targets.get_mut(tgt) {
                    slots.retain(|slot| *slot != id.0);
                    if slots.is_empty() {
                        targets.remove(tgt);
                    }
                }
            }
        }
        Some(map)
    }

    /// Iterate over all live maps in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (MapId, &IndexMap)> {
        let maps = self.maps.iter().enumerate();
        maps.filter_map(|(i, map)| Some((MapId(i), map.as_ref()?)))
    }

    /// Handles of all live maps in insertion order.
    pub fn handles(&self) -> Vec<MapId> {
        self.iter().map(|(id, _)| id).collect()
    }

    /// Number of live maps.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all maps, making the table ready for the next rule.
    pub fn clear(&mut self) {
        self.maps.clear();
        self.ids.clear();
        self.endpoints.clear();
        self.live = 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn node(id: &str, left: Option<usize>, right: Option<usize>) -> IndexMap {
        IndexMap::node(id.to_string(), left, right)
    }

    fn edge(id: &str, left: Option<usize>, src: &str, tgt: &str) -> IndexMap {
        IndexMap::edge(id.to_string(), left, None, src.to_string(), tgt.to_string())
    }

    #[test]
    fn find() {
        let mut maps = IndexMaps::new();
        let n1 = maps.insert(node("n1", Some(0), None));
        let n2 = maps.insert(node("n2", None, Some(0)));
        assert_eq!(maps.find_by_id("n1"), Some(n1));
        assert_eq!(maps.find_by_id("n2"), Some(n2));
        assert_eq!(maps.find_by_id("n3"), None);
        assert_eq!(maps.find_by_endpoints("n1", "n2"), None);

        maps.get_mut(n1).unwrap().right = Some(1);
        assert_eq!(maps.get(n1).unwrap().right, Some(1));
    }

    #[test]
    fn endpoints() {
        let mut maps = IndexMaps::new();
        let e1 = maps.insert(edge("e1", Some(0), "n1", "n2"));
        let e2 = maps.insert(edge("e2", Some(1), "n1", "n2"));
        let e3 = maps.insert(edge("e3", Some(2), "n2", "n1"));
        assert_eq!(maps.find_by_endpoints("n1", "n2"), Some(e1));
        assert_eq!(maps.find_by_endpoints("n2", "n1"), Some(e3));

        // parallel edges are found in insertion order
        maps.remove(e1);
        assert_eq!(maps.find_by_endpoints("n1", "n2"), Some(e2));
    }

    #[test]
    fn remove() {
        let mut maps = IndexMaps::new();
        let a = maps.insert(node("a", Some(0), None));
        let b = maps.insert(node("b", Some(1), None));
        let c = maps.insert(node("c", Some(2), None));
        assert_eq!(maps.len(), 3);

        let removed = maps.remove(b).unwrap();
        assert_eq!(removed.id, "b");
        assert_eq!(maps.remove(b), None);
        assert_eq!(maps.len(), 2);
        assert_eq!(maps.find_by_id("b"), None);

        // other handles survive
        assert_eq!(maps.get(a).unwrap().left, Some(0));
        assert_eq!(maps.get(c).unwrap().left, Some(2));
        assert_eq!(maps.handles(), [a, c]);

        maps.clear();
        assert!(maps.is_empty());
        assert_eq!(maps.find_by_id("a"), None);
    }

    #[test]
    fn shadowed_id() {
        let mut maps = IndexMaps::new();
        let old = maps.insert(edge("e", Some(0), "n1", "n2"));
        let new = maps.insert(IndexMap::edge("e".to_string(), None, Some(0), "n2".to_string(), "n1".to_string()));
        assert_eq!(maps.find_by_id("e"), Some(old));
        assert_eq!(maps.find_by_endpoints("n2", "n1"), Some(new));
        maps.remove(new);
        assert_eq!(maps.find_by_id("e"), Some(old));
    }

    #[test]
    fn shadowed_id_survives_removal() {
        let mut maps = IndexMaps::new();
        let old = maps.insert(edge("e", Some(0), "n1", "n2"));
        let other = maps.insert(edge("f", Some(1), "n1", "n2"));
        let new = maps.insert(IndexMap::edge("e".to_string(), None, Some(0), "n2".to_string(), "n1".to_string()));
        maps.remove(old);
        assert_eq!(maps.find_by_id("e"), Some(new));
        assert_eq!(maps.get(new).unwrap().right, Some(0));
        assert_eq!(maps.find_by_id("f"), Some(other));
        assert_eq!(maps.find_by_endpoints("n1", "n2"), Some(other));
        assert_eq!(maps.len(), 2);

        maps.remove(new);
        assert_eq!(maps.find_by_id("e"), None);
        assert_eq!(maps.find_by_endpoints("n2", "n1"), None);
        assert_eq!(maps.len(), 1);
    }
}
