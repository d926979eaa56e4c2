//! Canvas node identifiers.
//!
//! This module provides the [`NodeId`] type used to name diagram nodes and
//! the architecture resources derived from them.
//!
//! Identifiers are request-scoped user data: every compilation brings its
//! own set, and nothing outlives the compilation that produced it. They are
//! therefore plain owned strings rather than entries in a process-global
//! interner, and they order lexicographically so that schedules and reports
//! derived from them are deterministic.

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

/// Identifier of a canvas node.
///
/// A `NodeId` is the stable handle a node keeps through every compiler
/// stage. The resource mapped from a node reuses the node's id unchanged.
///
/// # Examples
///
/// ```
/// use stratus_core::id::NodeId;
///
/// let vpc = NodeId::new("vpc-1");
/// let subnet: NodeId = "subnet-1".into();
///
/// assert_eq!(vpc, "vpc-1");
/// assert!(subnet < vpc);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Creates a `NodeId` from a string.
    ///
    /// # Examples
    ///
    /// ```
    /// use stratus_core::id::NodeId;
    ///
    /// let id = NodeId::new("lambda-1");
    /// assert_eq!(id.as_str(), "lambda-1");
    /// ```
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for NodeId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for NodeId {
    /// Creates a `NodeId` from a string slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use stratus_core::id::NodeId;
    ///
    /// let id: NodeId = "igw-1".into();
    /// assert_eq!(id, "igw-1");
    /// ```
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for NodeId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for NodeId {
    /// Allows direct comparison with string slices: `id == "string"`
    ///
    /// # Examples
    ///
    /// ```
    /// use stratus_core::id::NodeId;
    ///
    /// let id = NodeId::new("vpc-1");
    /// assert!(id == "vpc-1");
    /// ```
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
