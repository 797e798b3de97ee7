//! Cross-module test suites for Claw Cash pools
//!
//! # Test Categories
//!
//! 1. **Known Vector**: depth-2 tree pinned against hand-computed hashes
//! 2. **Merkle Properties**: incremental root = rebuilt root, path stability
//! 3. **Withdrawal Rules**: spend once, tamper sensitivity, rejections
//!    leave no trace
//! 4. **Accounting**: vault balance tracks deposits minus withdrawals
//! 5. **Concurrency**: racing withdrawals and parallel deposits

#[cfg(test)]
mod harness {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use anchor_lang::prelude::Pubkey;
    use rand::rngs::StdRng;

    use crate::constants::DEFAULT_FEE;
    use crate::crypto::{NoteFactory, SpendableNote};
    use crate::error::PoolError;
    use crate::external::ValueVault;
    use crate::ledger::{
        ManagerConfig, MemoryFeeToken, MemoryLeafHistory, MemoryVault, PoolId, PoolManager,
        WithdrawRequest,
    };
    use crate::merkle::ProofBuilder;

    pub const DEPTH: usize = 4;

    pub type Manager<V = MemoryVault> = PoolManager<MemoryFeeToken, V, DEPTH>;

    /// Vault whose credit/debit can be switched off. Clones share the
    /// switches, so a test keeps one clone and hands the other to the engine.
    #[derive(Clone, Default)]
    pub struct FlakyVault {
        pub inner: MemoryVault,
        fail_credit: Arc<AtomicBool>,
        fail_debit: Arc<AtomicBool>,
    }

    impl FlakyVault {
        pub fn fail_credit(&self, fail: bool) {
            self.fail_credit.store(fail, Ordering::SeqCst);
        }

        pub fn fail_debit(&self, fail: bool) {
            self.fail_debit.store(fail, Ordering::SeqCst);
        }
    }

    impl ValueVault for FlakyVault {
        fn credit(&mut self, pool_id: PoolId, amount: u64) -> Result<(), PoolError> {
            if self.fail_credit.load(Ordering::SeqCst) {
                return Err(PoolError::ArithmeticOverflow);
            }
            self.inner.credit(pool_id, amount)
        }

        fn debit(&mut self, pool_id: PoolId, amount: u64, recipient: &Pubkey) -> Result<(), PoolError> {
            if self.fail_debit.load(Ordering::SeqCst) {
                return Err(PoolError::InsufficientVaultBalance);
            }
            self.inner.debit(pool_id, amount, recipient)
        }
    }

    pub struct Harness<V: ValueVault = MemoryVault> {
        pub manager: Manager<V>,
        pub history: MemoryLeafHistory,
        pub depositor: Pubkey,
    }

    impl<V: ValueVault> Harness<V> {
        pub fn with_vault(vault: V) -> Self {
            let depositor = Pubkey::new_unique();
            let mut fees = MemoryFeeToken::new();
            fees.mint(depositor, 1_000 * DEFAULT_FEE);

            let manager =
                Manager::<V>::with_standard_pools(ManagerConfig::default(), fees, vault).unwrap();
            Self {
                manager,
                history: MemoryLeafHistory::new(),
                depositor,
            }
        }

        pub fn deposit_note(&mut self, pool_id: PoolId, rng: &mut StdRng) -> SpendableNote {
            let note = NoteFactory::generate_with(rng);
            let leaf_index = self
                .manager
                .deposit(pool_id, note.commitment(), &self.depositor)
                .unwrap();
            self.history
                .record(pool_id, leaf_index, note.commitment())
                .unwrap();
            SpendableNote::new(note, pool_id, leaf_index)
        }

        pub fn deposit_filler(&mut self, pool_id: PoolId, commitment: [u8; 32]) -> u32 {
            let leaf_index = self
                .manager
                .deposit(pool_id, commitment, &self.depositor)
                .unwrap();
            self.history.record(pool_id, leaf_index, commitment).unwrap();
            leaf_index
        }

        /// Request carrying a path rebuilt from the current history.
        pub fn request(&self, note: &SpendableNote, recipient: Pubkey) -> WithdrawRequest<DEPTH> {
            let proof = ProofBuilder::<DEPTH>::from_history(&self.history, note.pool_id)
                .unwrap()
                .prove(note.leaf_index)
                .unwrap();
            WithdrawRequest::from_note(note, proof, recipient)
        }
    }

    impl Harness {
        pub fn new() -> Self {
            Self::with_vault(MemoryVault::new())
        }
    }
}

#[cfg(test)]
mod known_vector_tests {
    use crate::constants::ZERO_LEAF;
    use crate::crypto::hash_pair;
    use crate::merkle::{verify_proof, MerkleAccumulator, ProofBuilder};

    const L0: [u8; 32] = [1u8; 32];
    const L1: [u8; 32] = [2u8; 32];
    const L2: [u8; 32] = [3u8; 32];

    /// SHA256(SHA256(L0 || L1) || SHA256(L2 || 0^32)), computed externally.
    const ROOT_L0_L1_L2: [u8; 32] = [
        0xd6, 0xcf, 0xa0, 0xd1, 0x04, 0x6a, 0x0f, 0x4c, 0x1f, 0x9a, 0x6d, 0xc5, 0x7a, 0xfb, 0x0f,
        0x45, 0x77, 0x68, 0x0c, 0x10, 0x6a, 0x48, 0xcf, 0x04, 0x12, 0x5e, 0x7b, 0xa8, 0x60, 0x6d,
        0xa2, 0x19,
    ];

    /// Root of an empty depth-2 tree.
    const EMPTY_ROOT: [u8; 32] = [
        0xdb, 0x56, 0x11, 0x4e, 0x00, 0xfd, 0xd4, 0xc1, 0xf8, 0x5c, 0x89, 0x2b, 0xf3, 0x5a, 0xc9,
        0xa8, 0x92, 0x89, 0xaa, 0xec, 0xb1, 0xeb, 0xd0, 0xa9, 0x6c, 0xde, 0x60, 0x6a, 0x74, 0x8b,
        0x5d, 0x71,
    ];

    fn expected_root() -> [u8; 32] {
        let left = hash_pair(&L0, &L1);
        let right = hash_pair(&L2, &ZERO_LEAF);
        hash_pair(&left, &right)
    }

    #[test]
    fn test_depth_two_root() {
        let mut tree = MerkleAccumulator::<2>::new();
        tree.insert(L0).unwrap();
        tree.insert(L1).unwrap();
        let root = tree.insert(L2).unwrap();

        assert_eq!(root, ROOT_L0_L1_L2);
        assert_eq!(ProofBuilder::<2>::root_of(&[L0, L1, L2]).unwrap(), ROOT_L0_L1_L2);
    }

    #[test]
    fn test_pinned_root_matches_hash_pair() {
        assert_eq!(expected_root(), ROOT_L0_L1_L2);
    }

    #[test]
    fn test_depth_two_empty_root() {
        let zero_pair = hash_pair(&ZERO_LEAF, &ZERO_LEAF);
        assert_eq!(hash_pair(&zero_pair, &zero_pair), EMPTY_ROOT);
        assert_eq!(MerkleAccumulator::<2>::new().root(), EMPTY_ROOT);
    }

    #[test]
    fn test_depth_two_proof_for_second_leaf() {
        let builder = ProofBuilder::<2>::new(vec![L0, L1, L2]).unwrap();
        let proof = builder.prove(1).unwrap();

        assert_eq!(proof.siblings(), &[L0, hash_pair(&L2, &ZERO_LEAF)]);
        assert!(verify_proof(&L1, 1, &proof, &expected_root()));

        let mut corrupted = proof;
        corrupted.siblings_mut()[1][0] ^= 0x01;
        assert!(!verify_proof(&L1, 1, &corrupted, &expected_root()));
    }
}

#[cfg(test)]
mod merkle_property_tests {
    use proptest::prelude::*;

    use crate::crypto::compute_nullifier;
    use crate::merkle::{verify_proof, MerkleAccumulator, ProofBuilder};

    const DEPTH: usize = 5;

    fn leaves_strategy(max: usize) -> impl Strategy<Value = Vec<[u8; 32]>> {
        prop::collection::vec(prop::array::uniform32(any::<u8>()), 0..=max)
    }

    #[test]
    fn test_incremental_root_matches_rebuild_at_scale() {
        let leaves: Vec<[u8; 32]> = (0..2_000u32)
            .map(|i| {
                let mut seed = [0u8; 32];
                seed[..4].copy_from_slice(&i.to_le_bytes());
                compute_nullifier(&seed)
            })
            .collect();

        let mut tree = MerkleAccumulator::<11>::new();
        for (count, leaf) in leaves.iter().enumerate() {
            tree.insert(*leaf).unwrap();
            if count % 97 == 0 || count + 1 == leaves.len() {
                let rebuilt = ProofBuilder::<11>::root_of(&leaves[..=count]).unwrap();
                assert_eq!(tree.root(), rebuilt, "diverged after {} leaves", count + 1);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_incremental_root_matches_rebuild(leaves in leaves_strategy(32)) {
            let mut tree = MerkleAccumulator::<DEPTH>::new();
            prop_assert_eq!(tree.root(), ProofBuilder::<DEPTH>::root_of(&[]).unwrap());

            for (count, leaf) in leaves.iter().enumerate() {
                tree.insert(*leaf).unwrap();
                let rebuilt = ProofBuilder::<DEPTH>::root_of(&leaves[..=count]).unwrap();
                prop_assert_eq!(tree.root(), rebuilt);
            }
            prop_assert_eq!(tree.next_index() as usize, leaves.len());
        }

        #[test]
        fn prop_path_stable_under_growth(
            leaves in prop::collection::vec(prop::array::uniform32(any::<u8>()), 1..=32),
            seed in any::<u64>(),
        ) {
            let total = leaves.len();
            let n = 1 + (seed as usize % total);
            let leaf_index = (seed >> 32) as usize % n;

            let old = ProofBuilder::<DEPTH>::new(leaves[..n].to_vec()).unwrap();
            let old_proof = old.prove(leaf_index as u32).unwrap();
            prop_assert!(verify_proof(&leaves[leaf_index], leaf_index as u32, &old_proof, &old.root()));

            for m in n..=total {
                let grown = ProofBuilder::<DEPTH>::new(leaves[..m].to_vec()).unwrap();
                let proof = grown.prove(leaf_index as u32).unwrap();
                prop_assert!(verify_proof(&leaves[leaf_index], leaf_index as u32, &proof, &grown.root()));

                // Left-hand siblings were final when the leaf was inserted
                for level in 0..DEPTH {
                    if (leaf_index >> level) & 1 == 1 {
                        prop_assert_eq!(proof.siblings()[level], old_proof.siblings()[level]);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod withdrawal_tests {
    use anchor_lang::prelude::Pubkey;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::harness::{FlakyVault, Harness, DEPTH};
    use crate::constants::{DEFAULT_FEE, POOL_DENOMINATIONS};
    use crate::crypto::Note;
    use crate::error::PoolError;
    use crate::external::LeafHistoryReader;
    use crate::ledger::WithdrawRequest;
    use crate::merkle::ProofBuilder;

    #[test]
    fn test_spend_once() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut h = Harness::new();
        let note = h.deposit_note(0, &mut rng);
        let recipient = Pubkey::new_unique();
        let request = h.request(&note, recipient);

        assert_eq!(h.manager.withdraw(&request), Ok(()));
        assert_eq!(h.manager.withdraw(&request), Err(PoolError::NullifierSpent));
        assert_eq!(h.manager.vault_snapshot().received(&recipient), POOL_DENOMINATIONS[0]);
        assert_eq!(h.manager.spent_count(0), Ok(1));
    }

    #[test]
    fn test_leaf_indices_are_dense_per_pool() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut h = Harness::new();

        for round in 0..5u32 {
            for pool_id in 0..3u8 {
                let note = h.deposit_note(pool_id, &mut rng);
                assert_eq!(note.leaf_index, round);
            }
        }
        for pool_id in 0..3u8 {
            assert_eq!(h.manager.pool(pool_id).unwrap().next_index(), 5);
            assert_eq!(h.history.leaves(pool_id).unwrap().len(), 5);
        }
    }

    #[test]
    fn test_rebuilt_history_matches_pool_root() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut h = Harness::new();
        for _ in 0..7 {
            h.deposit_note(1, &mut rng);
        }
        let builder = ProofBuilder::<DEPTH>::from_history(&h.history, 1).unwrap();
        assert_eq!(builder.root(), h.manager.root(1).unwrap());
    }

    #[test]
    fn test_old_note_withdraws_after_growth() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut h = Harness::new();
        let first = h.deposit_note(2, &mut rng);
        for _ in 0..9 {
            h.deposit_note(2, &mut rng);
        }
        let request = h.request(&first, Pubkey::new_unique());
        assert_eq!(h.manager.withdraw(&request), Ok(()));
    }

    #[test]
    fn test_stale_path_is_rejected_without_side_effects() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut h = Harness::new();
        let note = h.deposit_note(0, &mut rng);
        let stale = h.request(&note, Pubkey::new_unique());

        // Fills leaf 1, the right-hand sibling of leaf 0
        h.deposit_note(0, &mut rng);

        let root = h.manager.root(0).unwrap();
        let balance = h.manager.vault_snapshot().balance(0);
        assert_eq!(h.manager.withdraw(&stale), Err(PoolError::InvalidProof));
        assert_eq!(h.manager.root(0).unwrap(), root);
        assert_eq!(h.manager.vault_snapshot().balance(0), balance);
        assert_eq!(h.manager.is_spent(0, &note.note.nullifier_hash()), Ok(false));

        let fresh = h.request(&note, stale.recipient);
        assert_eq!(h.manager.withdraw(&fresh), Ok(()));
    }

    #[test]
    fn test_unassigned_leaf_index() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut h = Harness::new();
        let note = h.deposit_note(0, &mut rng);

        let mut request = h.request(&note, Pubkey::new_unique());
        request.leaf_index = 1;
        assert_eq!(h.manager.withdraw(&request), Err(PoolError::LeafOutOfRange));
        assert_eq!(h.manager.is_spent(0, &request.nullifier_hash), Ok(false));
    }

    #[test]
    fn test_wrong_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut h = Harness::new();
        let note = h.deposit_note(0, &mut rng);

        let mut request = h.request(&note, Pubkey::new_unique());
        request.pool_id = 9;
        assert_eq!(h.manager.withdraw(&request), Err(PoolError::PoolUnknown));

        // Pool 1 is empty, so index 0 is unassigned there
        request.pool_id = 1;
        assert_eq!(h.manager.withdraw(&request), Err(PoolError::LeafOutOfRange));
    }

    #[test]
    fn test_nullifier_hash_must_match_preimage() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut h = Harness::new();
        let note = h.deposit_note(0, &mut rng);
        let other = h.deposit_note(0, &mut rng);

        let mut request = h.request(&note, Pubkey::new_unique());
        request.nullifier_hash = other.note.nullifier_hash();
        assert_eq!(h.manager.withdraw(&request), Err(PoolError::InvalidProof));
        assert_eq!(h.manager.is_spent(0, &request.nullifier_hash), Ok(false));
    }

    #[test]
    fn test_zero_commitment_deposit_rejected() {
        let h = Harness::new();
        assert_eq!(
            h.manager.deposit(0, [0u8; 32], &h.depositor),
            Err(PoolError::InvalidCommitment)
        );
        assert_eq!(h.manager.fee_token_snapshot().balance(&h.depositor), 1_000 * DEFAULT_FEE);
    }

    #[test]
    fn test_full_pool_rejects_without_charging() {
        let mut h = Harness::new();
        for i in 0..16u8 {
            h.deposit_filler(0, [i + 1; 32]);
        }
        let root = h.manager.root(0).unwrap();
        let fees = h.manager.fee_token_snapshot().balance(&h.depositor);

        assert_eq!(
            h.manager.deposit(0, [0xFFu8; 32], &h.depositor),
            Err(PoolError::PoolFull)
        );
        assert_eq!(h.manager.root(0).unwrap(), root);
        assert_eq!(h.manager.fee_token_snapshot().balance(&h.depositor), fees);
        assert_eq!(h.manager.vault_snapshot().balance(0), 16 * POOL_DENOMINATIONS[0]);
    }

    #[test]
    fn test_failed_vault_credit_rolls_back_deposit() {
        let vault = FlakyVault::default();
        let h = Harness::with_vault(vault.clone());
        vault.fail_credit(true);

        let root = h.manager.root(0).unwrap();
        assert_eq!(
            h.manager.deposit(0, [9u8; 32], &h.depositor),
            Err(PoolError::ArithmeticOverflow)
        );
        assert_eq!(h.manager.root(0).unwrap(), root);
        assert_eq!(h.manager.pool(0).unwrap().next_index(), 0);
        assert_eq!(h.manager.fee_token_snapshot().balance(&h.depositor), 1_000 * DEFAULT_FEE);
        assert_eq!(h.manager.fee_token_snapshot().collected(), 0);

        vault.fail_credit(false);
        assert_eq!(h.manager.deposit(0, [9u8; 32], &h.depositor), Ok(0));
    }

    #[test]
    fn test_failed_payout_unmarks_nullifier() {
        let mut rng = StdRng::seed_from_u64(9);
        let vault = FlakyVault::default();
        let mut h = Harness::with_vault(vault.clone());
        let note = h.deposit_note(1, &mut rng);
        let request = h.request(&note, Pubkey::new_unique());

        vault.fail_debit(true);
        assert_eq!(
            h.manager.withdraw(&request),
            Err(PoolError::InsufficientVaultBalance)
        );
        assert_eq!(h.manager.is_spent(1, &request.nullifier_hash), Ok(false));

        vault.fail_debit(false);
        assert_eq!(h.manager.withdraw(&request), Ok(()));
        assert_eq!(
            h.manager.vault_snapshot().inner.received(&request.recipient),
            POOL_DENOMINATIONS[1]
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_single_bit_flip_rejected(
            seed in any::<u64>(),
            fillers in 0usize..6,
            target in 0usize..3,
            level in 0usize..DEPTH,
            bit in 0usize..256,
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut h = Harness::new();
            for i in 0..fillers {
                h.deposit_filler(0, [i as u8 + 1; 32]);
            }
            let note = h.deposit_note(0, &mut rng);
            let request = h.request(&note, Pubkey::new_unique());

            let mut tampered: WithdrawRequest<DEPTH> = request.clone();
            let (byte, mask) = (bit / 8, 1u8 << (bit % 8));
            match target {
                0 => tampered.secret[byte] ^= mask,
                1 => tampered.nullifier_preimage[byte] ^= mask,
                _ => tampered.proof.siblings_mut()[level][byte] ^= mask,
            }

            prop_assert_eq!(h.manager.withdraw(&tampered), Err(PoolError::InvalidProof));
            prop_assert_eq!(h.manager.is_spent(0, &request.nullifier_hash), Ok(false));
            prop_assert_eq!(h.manager.withdraw(&request), Ok(()));
        }

        #[test]
        fn prop_note_from_parts_roundtrip(
            secret in prop::array::uniform32(any::<u8>()),
            preimage in prop::array::uniform32(any::<u8>()),
        ) {
            let note = Note::from_parts(secret, preimage);
            let again = Note::from_parts(*note.secret(), *note.nullifier_preimage());
            prop_assert_eq!(note, again);
        }
    }
}

#[cfg(test)]
mod accounting_tests {
    use anchor_lang::prelude::Pubkey;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::harness::Harness;
    use crate::constants::{DEFAULT_FEE, POOL_DENOMINATIONS};
    use crate::crypto::SpendableNote;
    use crate::error::PoolError;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_vault_tracks_live_notes(
            seed in any::<u64>(),
            ops in prop::collection::vec((0u8..3, any::<bool>()), 0..40),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut h = Harness::new();
            let mut unspent: Vec<Vec<SpendableNote>> = vec![Vec::new(); 3];
            let mut deposits = 0u64;

            for (pool_id, withdraw) in ops {
                let live = &mut unspent[pool_id as usize];
                if withdraw && !live.is_empty() {
                    let note = live.remove(0);
                    let request = h.request(&note, Pubkey::new_unique());
                    prop_assert_eq!(h.manager.withdraw(&request), Ok(()));
                } else if h.manager.pool(pool_id).unwrap().tree().is_full() {
                    prop_assert_eq!(
                        h.manager.deposit(pool_id, [7u8; 32], &h.depositor),
                        Err(PoolError::PoolFull)
                    );
                } else {
                    let note = h.deposit_note(pool_id, &mut rng);
                    unspent[pool_id as usize].push(note);
                    deposits += 1;
                }
            }

            for pool_id in 0..3u8 {
                let live = unspent[pool_id as usize].len() as u64;
                let expected = POOL_DENOMINATIONS[pool_id as usize] * live;
                prop_assert_eq!(h.manager.vault_snapshot().balance(pool_id), expected);
                prop_assert_eq!(h.manager.expected_vault_balance(pool_id), Ok(expected));
            }
            prop_assert_eq!(h.manager.fee_token_snapshot().collected(), deposits * DEFAULT_FEE);
        }
    }
}

#[cfg(test)]
mod concurrency_tests {
    use std::thread;

    use anchor_lang::prelude::Pubkey;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::harness::{Harness, DEPTH};
    use crate::constants::POOL_DENOMINATIONS;
    use crate::error::PoolError;
    use crate::merkle::ProofBuilder;

    #[test]
    fn test_racing_withdrawals_pay_once() {
        let mut rng = StdRng::seed_from_u64(10);
        let mut h = Harness::new();
        let note = h.deposit_note(1, &mut rng);
        h.deposit_note(1, &mut rng);
        let request = h.request(&note, Pubkey::new_unique());

        let results: Vec<_> = thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| h.manager.withdraw(&request)))
                .collect();
            handles.into_iter().map(|t| t.join().unwrap()).collect()
        });

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .filter(|r| r.is_err())
            .all(|r| *r == Err(PoolError::NullifierSpent)));
        assert_eq!(h.manager.vault_snapshot().received(&request.recipient), POOL_DENOMINATIONS[1]);
        assert_eq!(h.manager.vault_snapshot().balance(1), POOL_DENOMINATIONS[1]);
    }

    #[test]
    fn test_parallel_deposits_get_distinct_dense_indices() {
        let h = Harness::new();
        let depositor = h.depositor;

        let mut assigned: Vec<(u32, [u8; 32])> = thread::scope(|s| {
            let handles: Vec<_> = (0..4u8)
                .map(|worker| {
                    let manager = &h.manager;
                    s.spawn(move || {
                        (0..4u8)
                            .map(|k| {
                                let commitment = [worker * 4 + k + 1; 32];
                                let index = manager.deposit(2, commitment, &depositor).unwrap();
                                (index, commitment)
                            })
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|t| t.join().unwrap())
                .collect()
        });

        assigned.sort_by_key(|(index, _)| *index);
        let indices: Vec<u32> = assigned.iter().map(|(index, _)| *index).collect();
        assert_eq!(indices, (0..16).collect::<Vec<u32>>());

        let history: Vec<[u8; 32]> = assigned.iter().map(|(_, leaf)| *leaf).collect();
        assert_eq!(
            ProofBuilder::<DEPTH>::root_of(&history).unwrap(),
            h.manager.root(2).unwrap()
        );
        assert!(h.manager.pool(2).unwrap().tree().is_full());
    }

    #[test]
    fn test_withdrawals_proceed_alongside_deposits() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut h = Harness::new();
        let notes: Vec<_> = (0..4).map(|_| h.deposit_note(0, &mut rng)).collect();
        let requests: Vec<_> = notes
            .iter()
            .map(|note| h.request(note, Pubkey::new_unique()))
            .collect();
        let depositor = h.depositor;
        let manager = &h.manager;

        // Deposits into another pool cannot change pool 0's root
        thread::scope(|s| {
            s.spawn(move || {
                for i in 0..8u8 {
                    manager.deposit(1, [i + 1; 32], &depositor).unwrap();
                }
            });
            for request in &requests {
                s.spawn(move || assert_eq!(manager.withdraw(request), Ok(())));
            }
        });

        assert_eq!(h.manager.spent_count(0), Ok(4));
        assert_eq!(h.manager.vault_snapshot().balance(0), 0);
        assert_eq!(h.manager.pool(1).unwrap().next_index(), 8);
    }
}
