//! Rule sets and the rule-set table.
//!
//! A rule set is a named grammar: a sorted delimiter table with a
//! first-character index, a whitespace set, fallback rule sets and an
//! optional simplify reducer. `None` tables inherit from the default rule
//! set of the lex run; `Some(empty)` overrides with nothing.

use std::sync::OnceLock;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use weft_ir::{ContextClass, DelimId, RuleSetId};

use crate::delimiter::DelimiterSpec;

/// How a context's resolved term list is reduced to one value.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Simplify {
    /// No terms become null, one term becomes itself, more stay a list.
    SingleTerm,
    /// Terms are joined as text.
    Concatenate,
    /// The context resolves to null.
    Discard,
}

/// Errors raised while declaring grammars. Never raised while lexing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RuleSetError {
    #[error("fallback recursion: {path}")]
    FallbackCycle { path: String },
    #[error("rule set '{0}' is already defined")]
    Duplicate(String),
    #[error("no rule set named '{0}'")]
    Unknown(String),
}

#[derive(Clone, Debug)]
pub struct RuleSet {
    name: String,
    delimiters: Option<Vec<DelimId>>,
    /// First slot in `delimiters` for each leading character.
    index: FxHashMap<char, usize>,
    whitespace: Option<Vec<char>>,
    fallbacks: SmallVec<[RuleSetId; 2]>,
    simplify: Option<Simplify>,
    class: ContextClass,
}

impl RuleSet {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn delimiters(&self) -> Option<&[DelimId]> {
        self.delimiters.as_deref()
    }

    pub fn whitespace(&self) -> Option<&[char]> {
        self.whitespace.as_deref()
    }

    pub fn fallbacks(&self) -> &[RuleSetId] {
        &self.fallbacks
    }

    pub fn simplify(&self) -> Option<Simplify> {
        self.simplify
    }

    pub fn class(&self) -> ContextClass {
        self.class
    }
}

/// Declaration of a rule set, consumed by [`RuleSetTable::define`].
#[derive(Clone, Debug)]
pub struct RuleSetDef {
    name: String,
    delimiters: Option<Vec<DelimId>>,
    whitespace: Option<Vec<char>>,
    class: ContextClass,
    simplify: Option<Simplify>,
}

impl RuleSetDef {
    pub fn new(name: impl Into<String>) -> Self {
        RuleSetDef {
            name: name.into(),
            delimiters: None,
            whitespace: None,
            class: ContextClass::empty(),
            simplify: None,
        }
    }

    #[must_use]
    pub fn delimiters(mut self, ids: impl IntoIterator<Item = DelimId>) -> Self {
        self.delimiters = Some(ids.into_iter().collect());
        self
    }

    #[must_use]
    pub fn whitespace(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.whitespace = Some(chars.into_iter().collect());
        self
    }

    #[must_use]
    pub fn class(mut self, class: ContextClass) -> Self {
        self.class = class;
        self
    }

    #[must_use]
    pub fn simplify(mut self, simplify: Simplify) -> Self {
        self.simplify = Some(simplify);
        self
    }
}

/// Owns every delimiter and rule set of a grammar family.
#[derive(Clone, Debug, Default)]
pub struct RuleSetTable {
    delimiters: Vec<DelimiterSpec>,
    rule_sets: Vec<RuleSet>,
    by_name: FxHashMap<String, RuleSetId>,
}

impl RuleSetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh table holding the built-in grammars.
    pub fn with_builtins() -> Result<Self, RuleSetError> {
        let mut table = Self::new();
        crate::grammar::install(&mut table)?;
        Ok(table)
    }

    /// Process-wide built-in table, initialised on first use.
    pub fn builtin() -> &'static RuleSetTable {
        static BUILTIN: OnceLock<RuleSetTable> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            Self::with_builtins().unwrap_or_else(|e| panic!("built-in grammar is malformed: {e}"))
        })
    }

    // === Declaration ===

    pub fn add_delimiter(&mut self, spec: DelimiterSpec) -> DelimId {
        let id = DelimId::new(self.delimiters.len());
        self.delimiters.push(spec);
        id
    }

    pub fn add_delimiters(&mut self, specs: impl IntoIterator<Item = DelimiterSpec>) -> Vec<DelimId> {
        specs.into_iter().map(|s| self.add_delimiter(s)).collect()
    }

    /// Register a rule set, sorting its delimiter table and building the
    /// first-character index.
    pub fn define(&mut self, def: RuleSetDef) -> Result<RuleSetId, RuleSetError> {
        if self.by_name.contains_key(&def.name) {
            return Err(RuleSetError::Duplicate(def.name));
        }
        let mut index = FxHashMap::default();
        let delimiters = def.delimiters.map(|mut ids| {
            ids.sort_by(|a, b| self.delimiter(*a).table_order(self.delimiter(*b)));
            ids.dedup();
            for (slot, id) in ids.iter().enumerate() {
                if let Some(c) = self.delimiter(*id).first_char() {
                    index.entry(c).or_insert(slot);
                }
            }
            ids
        });
        let id = RuleSetId::new(self.rule_sets.len());
        tracing::trace!(name = %def.name, ?id, "rule set defined");
        self.by_name.insert(def.name.clone(), id);
        self.rule_sets.push(RuleSet {
            name: def.name,
            delimiters,
            index,
            whitespace: def.whitespace,
            fallbacks: SmallVec::new(),
            simplify: def.simplify,
            class: def.class,
        });
        Ok(id)
    }

    /// Append `fallback` to `target`'s fallback list.
    ///
    /// Rejected, leaving the table unchanged, if `target` is reachable from
    /// `fallback` through existing fallback links.
    pub fn add_fallback(&mut self, target: RuleSetId, fallback: RuleSetId) -> Result<(), RuleSetError> {
        if let Some(path) = self.fallback_path(fallback, target) {
            let mut names: Vec<&str> = vec![self.rule_set(target).name()];
            names.extend(path.iter().map(|id| self.rule_set(*id).name()));
            let path = names.join(" -> ");
            tracing::debug!(%path, "fallback rejected");
            return Err(RuleSetError::FallbackCycle { path });
        }
        self.rule_sets[target.index()].fallbacks.push(fallback);
        Ok(())
    }

    /// Depth-first search along fallback links from `from` to `to`.
    fn fallback_path(&self, from: RuleSetId, to: RuleSetId) -> Option<Vec<RuleSetId>> {
        let mut stack: Vec<Vec<RuleSetId>> = vec![vec![from]];
        let mut visited = vec![false; self.rule_sets.len()];
        while let Some(path) = stack.pop() {
            let Some(&current) = path.last() else {
                continue;
            };
            if current == to {
                return Some(path);
            }
            if std::mem::replace(&mut visited[current.index()], true) {
                continue;
            }
            for &next in self.rule_set(current).fallbacks.iter().rev() {
                let mut longer = path.clone();
                longer.push(next);
                stack.push(longer);
            }
        }
        None
    }

    // === Lookup ===

    pub fn delimiter(&self, id: DelimId) -> &DelimiterSpec {
        &self.delimiters[id.index()]
    }

    pub fn rule_set(&self, id: RuleSetId) -> &RuleSet {
        &self.rule_sets[id.index()]
    }

    pub fn id_of(&self, name: &str) -> Option<RuleSetId> {
        self.by_name.get(name).copied()
    }

    pub fn require(&self, name: &str) -> Result<RuleSetId, RuleSetError> {
        self.id_of(name)
            .ok_or_else(|| RuleSetError::Unknown(name.to_owned()))
    }

    /// The built-in default grammar, or the first rule set of a custom table.
    pub fn default_rules(&self) -> RuleSetId {
        self.id_of(crate::grammar::DEFAULT)
            .unwrap_or(RuleSetId::new(0))
    }

    pub fn len(&self) -> usize {
        self.rule_sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rule_sets.is_empty()
    }

    /// Whitespace test for `rules`, inheriting from `default` when unset.
    pub fn is_whitespace(&self, rules: RuleSetId, default: RuleSetId, c: char) -> bool {
        self.rule_set(rules)
            .whitespace
            .as_deref()
            .or(self.rule_set(default).whitespace.as_deref())
            .is_some_and(|ws| ws.contains(&c))
    }

    /// Delimiter starting at `index` under `rules`.
    ///
    /// `token_started` says a plain-text token is in progress, which hides
    /// non-breaking delimiters. A non-breaking match is also discarded when
    /// the next character is neither whitespace nor the start of a breaking
    /// delimiter.
    pub fn find_delimiter(
        &self,
        rules: RuleSetId,
        default: RuleSetId,
        text: &str,
        index: usize,
        token_started: bool,
    ) -> Option<DelimId> {
        let source = if self.rule_set(rules).delimiters.is_some() {
            rules
        } else {
            default
        };
        self.lookup(source, text, index, &|id| {
            self.accepts(id, rules, default, text, index, token_started)
        })
    }

    fn lookup(
        &self,
        rules: RuleSetId,
        text: &str,
        index: usize,
        accept: &dyn Fn(DelimId) -> bool,
    ) -> Option<DelimId> {
        let set = self.rule_set(rules);
        let c = text.get(index..)?.chars().next()?;
        if let (Some(ids), Some(&first)) = (&set.delimiters, set.index.get(&c)) {
            let found = ids[first..]
                .iter()
                .take_while(|id| self.delimiter(**id).first_char() == Some(c))
                .find(|id| self.delimiter(**id).is_at(text, index) && accept(**id));
            if let Some(&id) = found {
                return Some(id);
            }
        }
        set.fallbacks
            .iter()
            .find_map(|&fallback| self.lookup(fallback, text, index, accept))
    }

    fn accepts(
        &self,
        id: DelimId,
        rules: RuleSetId,
        default: RuleSetId,
        text: &str,
        index: usize,
        token_started: bool,
    ) -> bool {
        let spec = self.delimiter(id);
        if spec.is_breaking() {
            return true;
        }
        if token_started {
            return false;
        }
        let next = index + spec.text.len();
        match text.get(next..).and_then(|rest| rest.chars().next()) {
            None => true,
            Some(c) if self.is_whitespace(rules, default, c) => true,
            Some(_) => self
                .find_delimiter(rules, default, text, next, true)
                .is_some(),
        }
    }
}
