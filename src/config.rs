//! The configuration facade.
//!
//! A [`Config`] owns the root group of a document together with the active
//! duplicate policy and the parse hooks. It is the usual entry point: feed it
//! source text, inspect or mutate the tree through paths and indices, then
//! emit canonical text.
//!
//! ## Examples
//!
//! ```rust
//! use tycon::Config;
//!
//! let mut config = Config::new();
//! config.parse_from("server = {\n\thost = \"localhost\"\n\tport = 8080\n}\n").unwrap();
//!
//! assert_eq!(config.lookup("server/port").unwrap().as_integer(), Some(8080));
//! assert!(config.exists("server/host"));
//! assert_eq!(config.emit(), "server = {\n\thost = \"localhost\"\n\tport = 8080\n}\n");
//! ```
//!
//! ## Hooks
//!
//! Hooks run synchronously around [`Config::parse_from`]: every before-hook
//! in registration order, then the parse, then — depending on the outcome —
//! either the after-hooks or the failure hook. The failure hook sees the
//! partially built tree and decides whether the parse error propagates
//! (`true`) or is swallowed (`false`).

use crate::container::Container;
use crate::error::Result;
use crate::options::OnDuplicate;
use crate::parser::Parser;
use crate::ser::Serializer;
use crate::value::Node;
use serde::{Serialize, Serializer as SerdeSerializer};
use std::fmt;

/// A procedure invoked on the root before or after parsing. Hooks may mutate
/// the tree but must not retain references past their call.
pub type ParseHook = Box<dyn Fn(&mut Container)>;

/// A predicate on the partial root invoked when parsing fails; returning
/// `true` propagates the parse error, `false` swallows it.
pub type FailureHook = Box<dyn Fn(&Container) -> bool>;

/// An owned configuration document: root group, duplicate policy, hooks.
pub struct Config {
    root: Container,
    policy: OnDuplicate,
    before_hooks: Vec<ParseHook>,
    after_hooks: Vec<ParseHook>,
    failure_hook: Option<FailureHook>,
}

impl Config {
    /// Creates an empty configuration with the default ([`OnDuplicate::Reject`])
    /// policy.
    #[must_use]
    pub fn new() -> Self {
        Config::with_policy(OnDuplicate::default())
    }

    /// Creates an empty configuration with the given duplicate policy.
    #[must_use]
    pub fn with_policy(policy: OnDuplicate) -> Self {
        Config {
            root: Container::group(),
            policy,
            before_hooks: Vec::new(),
            after_hooks: Vec::new(),
            failure_hook: None,
        }
    }

    #[must_use]
    pub fn policy(&self) -> OnDuplicate {
        self.policy
    }

    /// Changes the duplicate policy for subsequent insertions and parses.
    pub fn set_policy(&mut self, policy: OnDuplicate) {
        self.policy = policy;
    }

    /// Registers a hook executed before every parse, in registration order.
    pub fn on_before_parse(&mut self, hook: impl Fn(&mut Container) + 'static) {
        self.before_hooks.push(Box::new(hook));
    }

    /// Registers a hook executed after every successful parse, in
    /// registration order.
    pub fn on_after_parse(&mut self, hook: impl Fn(&mut Container) + 'static) {
        self.after_hooks.push(Box::new(hook));
    }

    /// Installs the failure hook. It receives the partially parsed root;
    /// returning `true` lets the parse error propagate, `false` swallows it.
    /// Without a hook, errors always propagate.
    pub fn on_parse_failure(&mut self, hook: impl Fn(&Container) -> bool + 'static) {
        self.failure_hook = Some(Box::new(hook));
    }

    /// Parses `source` into the root, appending to existing content.
    ///
    /// Runs the full pipeline: before-hooks, parse, then after-hooks on
    /// success or the failure hook on error.
    ///
    /// # Errors
    ///
    /// [`crate::Error::Parse`] unless the failure hook swallows it.
    pub fn parse_from(&mut self, source: &str) -> Result<()> {
        for hook in &self.before_hooks {
            hook(&mut self.root);
        }
        match Parser::new(source, self.policy).parse_into(&mut self.root) {
            Ok(()) => {
                for hook in &self.after_hooks {
                    hook(&mut self.root);
                }
                Ok(())
            }
            Err(err) => match &self.failure_hook {
                Some(hook) if !hook(&self.root) => Ok(()),
                _ => Err(err),
            },
        }
    }

    /// Serializes every top-level child, each followed by a newline.
    #[must_use]
    pub fn emit(&self) -> String {
        let mut ser = Serializer::new();
        ser.write_children(&self.root, 0);
        ser.into_inner()
    }

    /// The root group.
    #[must_use]
    pub fn root(&self) -> &Container {
        &self.root
    }

    /// Mutable access to the root group.
    #[must_use]
    pub fn root_mut(&mut self) -> &mut Container {
        &mut self.root
    }

    /// Inserts a top-level node under the active policy.
    ///
    /// # Errors
    ///
    /// See [`Container::add`].
    pub fn insert(&mut self, node: Node) -> Result<&mut Node> {
        self.root.add(node, self.policy)
    }

    /// Deep-clones every top-level child of `other` into this configuration,
    /// resolving collisions with the active policy. `other` is untouched.
    ///
    /// # Errors
    ///
    /// Fails on the first collision when the policy is
    /// [`OnDuplicate::Reject`]; children merged before the failure remain.
    pub fn merge(&mut self, other: &Config) -> Result<()> {
        for node in other.root.children() {
            self.root.add(node.clone(), self.policy)?;
        }
        Ok(())
    }

    /// See [`Container::lookup`].
    pub fn lookup(&self, path: &str) -> Result<&Node> {
        self.root.lookup(path)
    }

    /// See [`Container::lookup_mut`].
    pub fn lookup_mut(&mut self, path: &str) -> Result<&mut Node> {
        self.root.lookup_mut(path)
    }

    /// See [`Container::exists`].
    #[must_use]
    pub fn exists(&self, path: &str) -> bool {
        self.root.exists(path)
    }

    /// See [`Container::get`].
    pub fn get(&self, index: usize) -> Result<&Node> {
        self.root.get(index)
    }

    /// See [`Container::get_mut`].
    pub fn get_mut(&mut self, index: usize) -> Result<&mut Node> {
        self.root.get_mut(index)
    }

    /// See [`Container::remove`].
    pub fn remove(&mut self, path: &str) -> Result<Node> {
        self.root.remove(path)
    }

    /// See [`Container::remove_at`].
    pub fn remove_at(&mut self, index: usize) -> Result<Node> {
        self.root.remove_at(index)
    }

    /// Drops every top-level child.
    pub fn clear(&mut self) {
        self.root.clear();
    }

    /// Number of top-level children, comments included.
    #[must_use]
    pub fn size(&self) -> usize {
        self.root.size()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Recursive node total over the whole tree.
    #[must_use]
    pub fn count(&self) -> usize {
        self.root.count()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.emit())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("root", &self.root)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Config {
    /// Tree equality; policy and hooks do not take part.
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

impl Serialize for Config {
    /// The root group serializes like any other group value: a map of its
    /// non-comment children.
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: SerdeSerializer,
    {
        use serde::ser::SerializeMap;

        let entries: Vec<_> = self.root.children().filter(|n| !n.is_comment()).collect();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for node in entries {
            map.serialize_entry(node.name().unwrap_or_default(), node.value())?;
        }
        map.end()
    }
}
