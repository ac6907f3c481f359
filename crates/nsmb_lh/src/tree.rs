//! Walking a [`CodeTree`] one bit at a time.
//!
//! Every internal node is a single slot whose low bits hold the distance to the pair of slots
//! holding its children, and whose two highest bits tell, for the `0` and `1` branch
//! respectively, whether that child slot is a leaf value or another internal node.

use crate::bits::BitReader;
use crate::error::{CorruptInputError, Result};
use crate::table::CodeTree;

/// Slot of the root node
const ROOT: usize = 1;

/// Where taking one branch of a node leads
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Branch {
    /// The branch ends in a decoded symbol
    Leaf(u16),

    /// The branch continues at another node
    Node(usize),
}

impl CodeTree {
    /// Follow the `bit` branch of the node at `index`.
    pub fn branch(&self, index: usize, bit: u8) -> Result<Branch> {
        let node = usize::from(self.entry(index)?);

        let leaf_flag = 1usize << (self.width() - 1 - u32::from(bit));
        let offset = node & ((1usize << (self.width() - 2)) - 1);

        let child = (index & !1) + 2 * (offset + 1) + usize::from(bit);
        if child >= self.capacity() {
            return Err(CorruptInputError::NodeOutOfRange {
                index: child,
                capacity: self.capacity(),
            }
            .into());
        }

        if node & leaf_flag != 0 {
            Ok(Branch::Leaf(self.entry(child)?))
        } else {
            Ok(Branch::Node(child))
        }
    }
}

/// Decode one symbol by walking `tree` from its root.
///
/// Every step moves to a strictly higher slot, so the walk always ends, either in a leaf or in
/// an error once it leaves the described part of the table.
pub fn decode(tree: &CodeTree, bits: &mut BitReader<'_>) -> Result<u16> {
    let mut index = ROOT;
    loop {
        match tree.branch(index, bits.next_bit()?)? {
            Branch::Leaf(symbol) => return Ok(symbol),
            Branch::Node(next) => index = next,
        }
    }
}
