//! External tree type and node identifiers.
//!
//! [`TreeNode`] is the caller-owned input shape, `{ value, left, right }`,
//! decoded from JavaScript (or built directly from Rust). [`NodeKey`] is the
//! structural identity the engine uses internally: the node's position in
//! pre-order, so two nodes carrying the same value never collide.
//!
//! Decoding is lenient. A node's `value` may be any JS value and is labelled
//! the way `String(value)` would label it; a child slot holding anything but
//! an object is treated as empty.

use std::fmt;

use serde::de::value::MapAccessDeserializer;
use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// A node's display value, as provided by the caller.
///
/// Numbers and strings are kept as they are; any other value is stored as
/// its `String(value)` text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Identifier {
    Number(f64),
    Text(String),
}

impl Identifier {
    /// Label for a node whose `value` field is missing.
    pub(crate) fn undefined() -> Self {
        Identifier::Text("undefined".to_owned())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Text(text) => f.write_str(text),
            Identifier::Number(n) => write_js_number(f, *n),
        }
    }
}

/// Format `n` the way JavaScript's `Number.prototype.toString` does:
/// shortest round-trip digits, plain notation for decimal exponents in
/// `[-7, 21)`, exponent notation (`1e+21`, `1.5e-7`) outside it.
fn write_js_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        return f.write_str("NaN");
    }
    if n.is_infinite() {
        return f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" });
    }
    // Also covers -0
    if n == 0.0 {
        return f.write_str("0");
    }
    if n < 0.0 {
        f.write_str("-")?;
    }

    // `{:e}` yields the shortest digits, e.g. "1.5e-7"
    let sci = format!("{:e}", n.abs());
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let k = digits.len() as i32;
    // Position of the decimal point relative to the digits
    let point = exp + 1;

    if k <= point && point <= 21 {
        f.write_str(&digits)?;
        for _ in 0..(point - k) {
            f.write_str("0")?;
        }
        Ok(())
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        write!(f, "{int}.{frac}")
    } else if -6 < point && point <= 0 {
        f.write_str("0.")?;
        for _ in 0..(-point) {
            f.write_str("0")?;
        }
        f.write_str(&digits)
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            write!(f, "{first}e{sign}{}", exp.abs())
        } else {
            write!(f, "{first}.{rest}e{sign}{}", exp.abs())
        }
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(IdentifierVisitor)
    }
}

struct IdentifierVisitor;

impl<'de> Visitor<'de> for IdentifierVisitor {
    type Value = Identifier;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Identifier, E> {
        Ok(Identifier::Text(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Identifier, E> {
        Ok(Identifier::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Identifier, E> {
        Ok(Identifier::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Identifier, E> {
        Ok(Identifier::Number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Identifier, E> {
        Ok(Identifier::Text(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Identifier, E> {
        Ok(Identifier::Text(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Identifier, E> {
        Ok(Identifier::Text("null".to_owned()))
    }

    fn visit_none<E: de::Error>(self) -> Result<Identifier, E> {
        self.visit_unit()
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Identifier, D::Error> {
        Identifier::deserialize(deserializer)
    }

    /// Arrays join their items with commas; null items print as nothing.
    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Identifier, A::Error> {
        let mut parts = Vec::new();
        while let Some(item) = seq.next_element::<Option<Identifier>>()? {
            parts.push(item.map(|v| v.to_string()).unwrap_or_default());
        }
        Ok(Identifier::Text(parts.join(",")))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Identifier, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Identifier::Text("[object Object]".to_owned()))
    }
}

impl From<i64> for Identifier {
    fn from(n: i64) -> Self {
        Identifier::Number(n as f64)
    }
}

impl From<f64> for Identifier {
    fn from(n: f64) -> Self {
        Identifier::Number(n)
    }
}

impl From<&str> for Identifier {
    fn from(text: &str) -> Self {
        Identifier::Text(text.to_owned())
    }
}

impl From<String> for Identifier {
    fn from(text: String) -> Self {
        Identifier::Text(text)
    }
}

/// A binary tree node as supplied by the caller.
///
/// Missing, `null` or non-object children decode to `None`; unknown fields
/// are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    #[serde(default = "Identifier::undefined")]
    pub value: Identifier,
    #[serde(default, deserialize_with = "child_slot")]
    pub left: Option<Box<TreeNode>>,
    #[serde(default, deserialize_with = "child_slot")]
    pub right: Option<Box<TreeNode>>,
}

impl TreeNode {
    /// A node with no children.
    pub fn leaf(value: impl Into<Identifier>) -> Self {
        Self {
            value: value.into(),
            left: None,
            right: None,
        }
    }

    /// Attach a left child.
    pub fn with_left(mut self, child: TreeNode) -> Self {
        self.left = Some(Box::new(child));
        self
    }

    /// Attach a right child.
    pub fn with_right(mut self, child: TreeNode) -> Self {
        self.right = Some(Box::new(child));
        self
    }

    /// Values in in-order sequence (left, node, right).
    #[cfg(test)]
    pub fn in_order_values(&self) -> Vec<Identifier> {
        let mut out = Vec::new();
        let mut stack: Vec<&TreeNode> = Vec::new();
        let mut current = Some(self);
        while current.is_some() || !stack.is_empty() {
            while let Some(node) = current {
                stack.push(node);
                current = node.left.as_deref();
            }
            if let Some(node) = stack.pop() {
                out.push(node.value.clone());
                current = node.right.as_deref();
            }
        }
        out
    }
}

// Unlink children iteratively so dropping a long chain does not recurse
impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut pending: Vec<Box<TreeNode>> = Vec::new();
        pending.extend(self.left.take());
        pending.extend(self.right.take());
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

/// Which child slot a node occupies under its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

fn child_slot<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Box<TreeNode>>, D::Error> {
    deserializer.deserialize_any(ChildVisitor)
}

/// Accepts an object as a child node and anything else as an empty slot.
struct ChildVisitor;

impl<'de> Visitor<'de> for ChildVisitor {
    type Value = Option<Box<TreeNode>>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a tree node or an empty slot")
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        let node = TreeNode::deserialize(MapAccessDeserializer::new(map))?;
        Ok(Some(Box::new(node)))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(None)
    }
}

/// Structural node identity: the node's index in pre-order.
///
/// The root is always `0`. Keys stay unique even when values repeat, which
/// value-keyed lookups cannot guarantee, and depend only on the tree's shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeKey(u32);

impl NodeKey {
    /// Key of the tree root.
    #[inline]
    pub const fn root() -> Self {
        Self(0)
    }

    /// Key of the node at pre-order position `index`.
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Pre-order position.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Whether this is the root key.
    #[inline]
    pub const fn is_root(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("root")
        } else {
            write!(f, "n{}", self.0)
        }
    }
}
