//! Multi-pattern Aho-Corasick automaton (C2).
//!
//! Built around the same failure-link construction and output-merging by
//! BFS over the trie as a classic offset-based Aho-Corasick automaton, but
//! kept as a plain in-memory graph rather than a serialized buffer — this
//! crate never persists the automaton itself, only the suffix-list text it
//! is built from, so a zero-copy on-disk format for shipping whole
//! databases has no counterpart here.

use rustc_hash::FxHashMap;

/// Whether matching is case-sensitive or case-folds ASCII letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Compare bytes exactly as given.
    CaseSensitive,
    /// Fold ASCII letters to lowercase before comparing.
    CaseInsensitive,
}

/// Outcome of a single callback invocation during [`Automaton::scan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanControl {
    /// Keep scanning.
    Continue,
    /// Stop the scan immediately.
    Stop,
}

const ROOT: u32 = 0;

struct Node {
    children: FxHashMap<u8, u32>,
    fail: u32,
    /// Pattern indices whose match ends at this node, including those
    /// inherited through the failure chain (merged at build time).
    outputs: Vec<u32>,
}

impl Node {
    fn new() -> Self {
        Node {
            children: FxHashMap::default(),
            fail: ROOT,
            outputs: Vec::new(),
        }
    }
}

/// A compiled Aho-Corasick automaton over a fixed set of patterns.
///
/// Patterns are referenced by their position in the slice passed to
/// [`Automaton::build`].
pub struct Automaton {
    nodes: Vec<Node>,
    pattern_lens: Vec<usize>,
    mode: MatchMode,
}

fn normalize(mode: MatchMode, b: u8) -> u8 {
    match mode {
        MatchMode::CaseSensitive => b,
        MatchMode::CaseInsensitive => b.to_ascii_lowercase(),
    }
}

impl Automaton {
    /// Build an automaton matching every pattern in `patterns`. Patterns
    /// must be non-empty; an empty pattern is simply never matched.
    pub fn build(patterns: &[&[u8]], mode: MatchMode) -> Automaton {
        let mut nodes = vec![Node::new()];
        let mut pattern_lens = Vec::with_capacity(patterns.len());

        for (idx, pattern) in patterns.iter().enumerate() {
            pattern_lens.push(pattern.len());
            if pattern.is_empty() {
                continue;
            }
            let mut state = ROOT;
            for &raw in pattern.iter() {
                let b = normalize(mode, raw);
                state = *nodes[state as usize]
                    .children
                    .entry(b)
                    .or_insert_with(|| {
                        nodes.push(Node::new());
                        (nodes.len() - 1) as u32
                    });
            }
            nodes[state as usize].outputs.push(idx as u32);
        }

        let mut automaton = Automaton {
            nodes,
            pattern_lens,
            mode,
        };
        automaton.build_failure_links();
        automaton
    }

    fn build_failure_links(&mut self) {
        let mut queue = std::collections::VecDeque::new();

        // Depth-1 nodes fail back to root.
        let root_children: Vec<(u8, u32)> = self.nodes[ROOT as usize]
            .children
            .iter()
            .map(|(&b, &s)| (b, s))
            .collect();
        for (_, state) in root_children {
            self.nodes[state as usize].fail = ROOT;
            queue.push_back(state);
        }

        while let Some(state) = queue.pop_front() {
            let children: Vec<(u8, u32)> = self.nodes[state as usize]
                .children
                .iter()
                .map(|(&b, &s)| (b, s))
                .collect();
            for (byte, child) in children {
                let mut fail = self.nodes[state as usize].fail;
                let next_fail = loop {
                    if let Some(&candidate) = self.nodes[fail as usize].children.get(&byte) {
                        if candidate != child {
                            break candidate;
                        }
                    }
                    if fail == ROOT {
                        break ROOT;
                    }
                    fail = self.nodes[fail as usize].fail;
                };
                self.nodes[child as usize].fail = next_fail;
                let inherited = self.nodes[next_fail as usize].outputs.clone();
                self.nodes[child as usize].outputs.extend(inherited);
                queue.push_back(child);
            }
        }
    }

    /// Follow one byte of input from `state`, returning the resulting state.
    /// External callers keep `state` across calls to resume a scan without
    /// rescanning consumed text.
    pub fn step(&self, state: u32, byte: u8) -> u32 {
        let byte = normalize(self.mode, byte);
        let mut state = state;
        loop {
            if let Some(&next) = self.nodes[state as usize].children.get(&byte) {
                return next;
            }
            if state == ROOT {
                return ROOT;
            }
            state = self.nodes[state as usize].fail;
        }
    }

    /// Pattern indices whose match ends at `state`.
    pub fn outputs_at(&self, state: u32) -> &[u32] {
        &self.nodes[state as usize].outputs
    }

    /// Length in bytes of pattern `idx`.
    pub fn pattern_len(&self, idx: u32) -> usize {
        self.pattern_lens[idx as usize]
    }

    /// The automaton's start state.
    pub fn start_state(&self) -> u32 {
        ROOT
    }

    /// Scan `text`, advancing from `start_state`. For every position where
    /// one or more patterns end, invokes `callback(pattern_index,
    /// end_offset)` once per pattern, in the order they were registered.
    /// `callback` returns [`ScanControl::Stop`] to end the scan early.
    /// Returns the automaton state at the point the scan stopped, so the
    /// caller can resume with a later `start_state`.
    pub fn scan<F>(&self, text: &[u8], start_state: u32, mut callback: F) -> u32
    where
        F: FnMut(u32, usize) -> ScanControl,
    {
        let mut state = start_state;
        for (offset, &byte) in text.iter().enumerate() {
            state = self.step(state, byte);
            for &pattern_idx in self.outputs_at(state) {
                if callback(pattern_idx, offset + 1) == ScanControl::Stop {
                    return state;
                }
            }
        }
        state
    }
}
