//! Organizational hierarchy utilities.
//!
//! Converts between a flat, parent-linked **linear store** of node records
//! and an arena-backed **tree**, and answers depth questions over either
//! representation:
//!
//! - [`LinearStore`] / [`NodeRecord`]: the wire-side flat form, with JSON
//!   ingestion (`parentId`/`pid` or a caller-chosen parent field) and
//!   opaque payload passthrough.
//! - [`TreeBuilder`] / [`build_tree`]: validated conversion to an
//!   [`OrgTree`] (single root, resolvable parents, unique ids, no cycles).
//! - [`OrgTree::depth`] / [`linear_depth`]: maximum edge-depth, consistent
//!   across both representations.
//! - [`extract_to_depth`] / [`extract_to_depth_linear`]: depth-bounded
//!   pruned copies.
//!
//! All operations are synchronous pure functions; inputs are never mutated.
//! Rendering the hierarchy (beyond the termtree debug display in
//! [`tree_traits`]) is the consumer's concern.
//!
//! ```
//! use orgtree::{build_tree, linear_depth, LinearStore};
//!
//! let store = LinearStore::from_json_str(
//!     r#"[{"id": 1, "parentId": null},
//!         {"id": 2, "parentId": 1},
//!         {"id": 3, "parentId": 1},
//!         {"id": 4, "parentId": 2}]"#,
//! )?;
//!
//! let tree = build_tree(&store)?;
//! assert_eq!(tree.depth(), 2);
//! assert_eq!(linear_depth(&store, None)?, 2);
//! # Ok::<(), orgtree::TreeError>(())
//! ```

pub mod arena;
pub mod builder;
pub mod depth;
pub mod errors;
pub mod extract;
pub mod record;
pub mod tree_traits;
pub mod util;

pub use arena::{OrgNode, OrgTree};
pub use builder::{build_tree, TreeBuilder};
pub use depth::linear_depth;
pub use errors::{InvalidArgumentError, MalformedTreeError, TreeError, TreeResult};
pub use extract::{extract_to_depth, extract_to_depth_linear};
pub use record::{LinearStore, NodeId, NodeRecord};
pub use tree_traits::TreeNodeConvert;
