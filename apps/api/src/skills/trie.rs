//! Skill dictionary — a prefix tree of known skill terms.
//!
//! Nodes live in a flat arena and refer to their children by index, so the
//! tree never needs recursive ownership and every traversal is iterative.
//! Terms are lowercased on the way in and on every lookup.

use serde::{Deserialize, Serialize};

use crate::skills::DictionaryError;

/// Index of a node inside the dictionary arena.
pub type NodeId = usize;

const ROOT: NodeId = 0;

/// Optional data attached to a stored term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillMetadata {
    pub category: String,
}

impl SkillMetadata {
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
        }
    }
}

/// A single trie node. Children are kept in the order their edge was first created.
#[derive(Debug, Clone, Default)]
pub struct TrieNode {
    pub(crate) children: Vec<(char, NodeId)>,
    pub(crate) terminal: bool,
    pub(crate) metadata: Option<SkillMetadata>,
}

impl TrieNode {
    fn child(&self, c: char) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(edge, _)| *edge == c)
            .map(|(_, id)| *id)
    }
}

/// A stored term as reported by [`SkillDictionary::entries`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub term: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Trie of known skills. `len()` always equals the number of terminal nodes.
#[derive(Debug, Clone)]
pub struct SkillDictionary {
    nodes: Vec<TrieNode>,
    count: usize,
}

impl Default for SkillDictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillDictionary {
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            count: 0,
        }
    }

    /// Inserts `term` (lowercased). Returns `true` when the term was not stored before.
    ///
    /// Re-inserting an existing term keeps the count and overwrites its metadata.
    /// Empty terms are rejected: a terminal root would make every empty lookup succeed.
    pub fn insert(
        &mut self,
        term: &str,
        metadata: Option<SkillMetadata>,
    ) -> Result<bool, DictionaryError> {
        if term.is_empty() {
            return Err(DictionaryError::EmptyTerm);
        }

        let mut node = ROOT;
        for c in term.chars().flat_map(char::to_lowercase) {
            node = match self.nodes[node].child(c) {
                Some(next) => next,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[node].children.push((c, next));
                    next
                }
            };
        }

        let target = &mut self.nodes[node];
        let is_new = !target.terminal;
        target.terminal = true;
        target.metadata = metadata;
        if is_new {
            self.count += 1;
        }
        Ok(is_new)
    }

    /// True iff the whole lowercased term is stored.
    pub fn exact_match(&self, term: &str) -> bool {
        self.find(term)
            .map(|id| self.nodes[id].terminal)
            .unwrap_or(false)
    }

    /// Metadata stored with `term`, if the term exists and carries any.
    pub fn metadata(&self, term: &str) -> Option<&SkillMetadata> {
        self.find(term)
            .map(|id| &self.nodes[id])
            .filter(|node| node.terminal)
            .and_then(|node| node.metadata.as_ref())
    }

    /// Number of distinct stored terms.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Lazily walks every stored term depth-first, in child insertion order.
    /// Each call starts a fresh walk.
    pub fn entries(&self) -> Entries<'_> {
        Entries {
            dictionary: self,
            stack: vec![(ROOT, String::new())],
        }
    }

    pub(crate) fn node(&self, id: NodeId) -> &TrieNode {
        &self.nodes[id]
    }

    pub(crate) fn root(&self) -> NodeId {
        ROOT
    }

    fn find(&self, term: &str) -> Option<NodeId> {
        let mut node = ROOT;
        for c in term.chars().flat_map(char::to_lowercase) {
            node = self.nodes[node].child(c)?;
        }
        Some(node)
    }
}

/// Iterator returned by [`SkillDictionary::entries`].
pub struct Entries<'a> {
    dictionary: &'a SkillDictionary,
    stack: Vec<(NodeId, String)>,
}

impl Iterator for Entries<'_> {
    type Item = SkillEntry;

    fn next(&mut self) -> Option<SkillEntry> {
        while let Some((id, prefix)) = self.stack.pop() {
            let node = self.dictionary.node(id);
            // Reversed so the first-inserted child is popped first.
            for (c, child) in node.children.iter().rev() {
                let mut term = prefix.clone();
                term.push(*c);
                self.stack.push((*child, term));
            }
            if node.terminal {
                return Some(SkillEntry {
                    term: prefix,
                    category: node.metadata.as_ref().map(|m| m.category.clone()),
                });
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary(terms: &[&str]) -> SkillDictionary {
        let mut dict = SkillDictionary::new();
        for term in terms {
            dict.insert(term, None).unwrap();
        }
        dict
    }

    #[test]
    fn test_insert_and_exact_match_case_insensitive() {
        let dict = dictionary(&["Python", "PyTorch"]);
        assert!(dict.exact_match("python"));
        assert!(dict.exact_match("PYTORCH"));
        assert!(!dict.exact_match("py"));
        assert!(!dict.exact_match("pythons"));
        assert_eq!(dict.len(), 2);
    }

    #[test]
    fn test_reinsert_keeps_count_and_overwrites_metadata() {
        let mut dict = SkillDictionary::new();
        assert!(dict
            .insert("rust", Some(SkillMetadata::category("general")))
            .unwrap());
        assert!(!dict
            .insert("RUST", Some(SkillMetadata::category("programming")))
            .unwrap());
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.metadata("rust").unwrap().category, "programming");
    }

    #[test]
    fn test_empty_term_is_rejected() {
        let mut dict = SkillDictionary::new();
        assert!(matches!(
            dict.insert("", None),
            Err(DictionaryError::EmptyTerm)
        ));
        assert!(dict.is_empty());
        assert!(!dict.exact_match(""));
    }

    #[test]
    fn test_prefix_of_stored_term_becomes_its_own_entry() {
        let mut dict = dictionary(&["javascript"]);
        assert!(!dict.exact_match("java"));
        dict.insert("java", None).unwrap();
        assert!(dict.exact_match("java"));
        assert!(dict.exact_match("javascript"));
        assert_eq!(dict.len(), 2);
    }

    #[test]
    fn test_entries_are_complete_and_match() {
        let terms = ["go", "golang", "git", "rust", "ruby", "c++"];
        let dict = dictionary(&terms);
        let entries: Vec<SkillEntry> = dict.entries().collect();
        assert_eq!(entries.len(), terms.len());
        for entry in &entries {
            assert!(dict.exact_match(&entry.term), "{} not found", entry.term);
        }
    }

    #[test]
    fn test_entries_follow_insertion_order_depth_first() {
        let dict = dictionary(&["go", "git", "golang", "rust"]);
        let terms: Vec<String> = dict.entries().map(|e| e.term).collect();
        assert_eq!(terms, vec!["go", "golang", "git", "rust"]);
    }

    #[test]
    fn test_entries_is_restartable() {
        let dict = dictionary(&["sql", "spark"]);
        let first: Vec<SkillEntry> = dict.entries().collect();
        let second: Vec<SkillEntry> = dict.entries().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_entries_carry_category() {
        let mut dict = SkillDictionary::new();
        dict.insert("docker", Some(SkillMetadata::category("devops")))
            .unwrap();
        dict.insert("agile", None).unwrap();
        let entries: Vec<SkillEntry> = dict.entries().collect();
        assert_eq!(entries[0].category.as_deref(), Some("devops"));
        assert_eq!(entries[1].category, None);
    }

    #[test]
    fn test_metadata_missing_for_non_terminal_prefix() {
        let mut dict = SkillDictionary::new();
        dict.insert("kubernetes", Some(SkillMetadata::category("devops")))
            .unwrap();
        assert!(dict.metadata("kube").is_none());
    }
}
