//! Typo-tolerant lookup over the skill trie.
//!
//! Bounded Levenshtein search: walk the trie while consuming the query,
//! branching on match / substitution / insertion / deletion and pruning any
//! branch whose accumulated distance exceeds the limit.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::skills::trie::{NodeId, SkillDictionary};

/// Maximum number of candidates returned by a single search.
pub const MAX_RESULTS: usize = 5;

/// A dictionary term within the requested edit distance of the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuzzyMatch {
    pub term: String,
    pub distance: usize,
}

struct Frame {
    node: NodeId,
    output: String,
    pos: usize,
    distance: usize,
}

/// Borrowing view over a dictionary that answers approximate queries.
pub struct FuzzyMatcher<'a> {
    dictionary: &'a SkillDictionary,
}

impl<'a> FuzzyMatcher<'a> {
    pub fn new(dictionary: &'a SkillDictionary) -> Self {
        Self { dictionary }
    }

    /// Up to [`MAX_RESULTS`] terms within `max_distance` edits of `term`, closest first.
    ///
    /// Equal-distance candidates come out in discovery order, which depends on the
    /// order terms were inserted. Callers should not treat that order as meaningful.
    pub fn search(&self, term: &str, max_distance: usize) -> Vec<FuzzyMatch> {
        let query: Vec<char> = term.chars().flat_map(char::to_lowercase).collect();

        let mut found: Vec<FuzzyMatch> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        // The trie path fixes the output, so (node, pos, distance) fully
        // determines everything reachable from a frame.
        let mut visited: HashSet<(NodeId, usize, usize)> = HashSet::new();

        let mut stack = vec![Frame {
            node: self.dictionary.root(),
            output: String::new(),
            pos: 0,
            distance: 0,
        }];

        while let Some(frame) = stack.pop() {
            if frame.distance > max_distance
                || !visited.insert((frame.node, frame.pos, frame.distance))
            {
                continue;
            }

            let node = self.dictionary.node(frame.node);
            let remaining = query.len() - frame.pos;

            // Unread query characters are charged as deletions.
            let total = frame.distance + remaining;
            if node.terminal && total <= max_distance {
                match positions.get(&frame.output) {
                    Some(&i) => found[i].distance = found[i].distance.min(total),
                    None => {
                        positions.insert(frame.output.clone(), found.len());
                        found.push(FuzzyMatch {
                            term: frame.output.clone(),
                            distance: total,
                        });
                    }
                }
            }

            // Frames are pushed in reverse so they pop as: match, substitutions,
            // insertions, deletion.
            let mut next = Vec::new();
            if remaining == 0 {
                for (c, child) in &node.children {
                    next.push(extend(&frame, *child, *c, 0, 1));
                }
            } else {
                let current = query[frame.pos];
                if let Some((c, child)) = node.children.iter().find(|(c, _)| *c == current) {
                    next.push(extend(&frame, *child, *c, 1, 0));
                }
                for (c, child) in node.children.iter().filter(|(c, _)| *c != current) {
                    next.push(extend(&frame, *child, *c, 1, 1));
                }
                for (c, child) in &node.children {
                    next.push(extend(&frame, *child, *c, 0, 1));
                }
                next.push(Frame {
                    node: frame.node,
                    output: frame.output.clone(),
                    pos: frame.pos + 1,
                    distance: frame.distance + 1,
                });
            }
            stack.extend(
                next.into_iter()
                    .rev()
                    .filter(|f| f.distance <= max_distance),
            );
        }

        found.sort_by_key(|m| m.distance);
        found.truncate(MAX_RESULTS);
        found
    }
}

fn extend(frame: &Frame, child: NodeId, c: char, consumed: usize, cost: usize) -> Frame {
    let mut output = frame.output.clone();
    output.push(c);
    Frame {
        node: child,
        output,
        pos: frame.pos + consumed,
        distance: frame.distance + cost,
    }
}

impl SkillDictionary {
    /// Shorthand for `FuzzyMatcher::new(self).search(term, max_distance)`.
    pub fn fuzzy_search(&self, term: &str, max_distance: usize) -> Vec<FuzzyMatch> {
        FuzzyMatcher::new(self).search(term, max_distance)
    }
}
