use derive_more::{Deref, From};
use svganim_geometry::Matrix;

/// Identifies a scene node for as long as the node lives.
///
/// Ids are assigned by the scene graph. The animator keys animations by id only, it never owns
/// or keeps nodes alive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deref, From)]
pub struct NodeId(u32);

/// What the animator needs to know about a node while painting it.
pub trait AnimatedNode {
    fn node_id(&self) -> NodeId;

    /// The node's own, authored transform. `None` is the identity.
    fn transform(&self) -> Option<Matrix> {
        None
    }
}

impl AnimatedNode for NodeId {
    fn node_id(&self) -> NodeId {
        *self
    }
}
