//! Layout algorithms for the tree view.
//!
//! This module computes logical node positions from tree shape alone. The
//! positions are then measured by the host and fitted to the stage (see
//! [`crate::stage`]).

pub mod inorder;

pub use inorder::{InOrderLayout, LogicalLayout, LogicalPosition};
