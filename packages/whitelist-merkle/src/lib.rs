//! Merkle set-membership checks for the mint allowlist.
//!
//! Parent nodes hash the lexicographically smaller child first, so a proof is
//! valid regardless of which side each sibling sat on and off-chain tooling
//! does not need to track left/right positions.

use sha2::{Digest, Sha256};

pub const HASH_SIZE: usize = 32;

pub type Hash = [u8; HASH_SIZE];

/// Hash an address into its allowlist leaf.
pub fn leaf_hash(address: &str) -> Hash {
    Sha256::digest(address.as_bytes()).into()
}

fn node_hash(a: &Hash, b: &Hash) -> Hash {
    let mut hasher = Sha256::new();
    if a <= b {
        hasher.update(a);
        hasher.update(b);
    } else {
        hasher.update(b);
        hasher.update(a);
    }
    hasher.finalize().into()
}

/// Recompute the root from `leaf` and the ordered sibling path and compare it
/// to the committed `root`.
///
/// A malformed, truncated, or empty proof simply fails verification; this
/// never errors.
pub fn verify(root: &Hash, leaf: &Hash, proof: &[Hash]) -> bool {
    let computed = proof.iter().fold(*leaf, |acc, sibling| node_hash(&acc, sibling));
    computed == *root
}

/// Allowlist commitment builder for deployment tooling and tests.
///
/// Unpaired nodes are promoted to the next level rather than duplicated, so a
/// single-leaf tree's root is the leaf itself and an empty tree commits to the
/// all-zero root.
pub struct MerkleTree {
    levels: Vec<Vec<Hash>>,
}

impl MerkleTree {
    pub fn new<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let leaves: Vec<Hash> = addresses
            .into_iter()
            .map(|addr| leaf_hash(addr.as_ref()))
            .collect();

        let mut levels = vec![leaves];
        while levels.last().unwrap().len() > 1 {
            let prev = levels.last().unwrap();
            let mut next = Vec::with_capacity((prev.len() + 1) / 2);
            for pair in prev.chunks(2) {
                match pair {
                    [left, right] => next.push(node_hash(left, right)),
                    [single] => next.push(*single),
                    _ => unreachable!(),
                }
            }
            levels.push(next);
        }
        Self { levels }
    }

    pub fn root(&self) -> Hash {
        self.levels
            .last()
            .and_then(|level| level.first())
            .copied()
            .unwrap_or([0u8; HASH_SIZE])
    }

    /// Sibling path for `address`, leaf to root. `None` if the address was
    /// not committed.
    pub fn proof_for(&self, address: &str) -> Option<Vec<Hash>> {
        let target = leaf_hash(address);
        let mut index = self.levels[0].iter().position(|leaf| *leaf == target)?;

        let mut proof = Vec::new();
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling = if index % 2 == 0 { index + 1 } else { index - 1 };
            if let Some(hash) = level.get(sibling) {
                proof.push(*hash);
            }
            index /= 2;
        }
        Some(proof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addresses(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("addr{:04}", i)).collect()
    }

    #[test]
    fn every_member_verifies() {
        for width in 1..=9 {
            let addrs = addresses(width);
            let tree = MerkleTree::new(&addrs);
            let root = tree.root();
            for addr in &addrs {
                let proof = tree.proof_for(addr).unwrap();
                assert!(
                    verify(&root, &leaf_hash(addr), &proof),
                    "member {} of width-{} tree failed",
                    addr,
                    width
                );
            }
        }
    }

    #[test]
    fn non_member_has_no_proof_and_fails_verification() {
        let tree = MerkleTree::new(addresses(8));
        assert_eq!(tree.proof_for("outsider"), None);

        // a valid member's proof does not validate an outsider's leaf
        let proof = tree.proof_for("addr0003").unwrap();
        assert!(!verify(&tree.root(), &leaf_hash("outsider"), &proof));
    }

    #[test]
    fn truncated_proof_fails() {
        let tree = MerkleTree::new(addresses(8));
        let mut proof = tree.proof_for("addr0005").unwrap();
        proof.pop();
        assert!(!verify(&tree.root(), &leaf_hash("addr0005"), &proof));
    }

    #[test]
    fn wrong_root_fails() {
        let tree = MerkleTree::new(addresses(4));
        let proof = tree.proof_for("addr0001").unwrap();
        assert!(!verify(&[0u8; HASH_SIZE], &leaf_hash("addr0001"), &proof));
    }

    #[test]
    fn empty_proof_passes_only_when_root_is_the_leaf() {
        let tree = MerkleTree::new(["solo"]);
        assert_eq!(tree.root(), leaf_hash("solo"));
        assert!(verify(&tree.root(), &leaf_hash("solo"), &[]));
        assert!(!verify(&tree.root(), &leaf_hash("someone-else"), &[]));
    }

    #[test]
    fn empty_tree_commits_to_zero_root() {
        let tree = MerkleTree::new(Vec::<String>::new());
        assert_eq!(tree.root(), [0u8; HASH_SIZE]);
    }

    #[test]
    fn odd_width_promotes_unpaired_leaf() {
        let addrs = addresses(5);
        let tree = MerkleTree::new(&addrs);
        // the unpaired fifth leaf still proves with a shorter path
        let proof = tree.proof_for("addr0004").unwrap();
        assert!(proof.len() < 3);
        assert!(verify(&tree.root(), &leaf_hash("addr0004"), &proof));
    }
}
