//! Multi-pool engine
//!
//! Lock layout:
//! * `pools` (RwLock): registry; write-locked only by `init_pool`
//! * per-pool `ledger` (Mutex): serializes deposits into that pool
//! * per-pool `nullifiers` (Mutex): serializes the spent check and record
//! * `fee_token`, `vault` (Mutex): external value movement
//!
//! Acquisition order is always registry, ledger, nullifiers, fee token,
//! vault, and no operation holds more than one pool's locks. Withdrawals
//! never take the ledger lock across proof verification, so they do not
//! block deposits.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use anchor_lang::prelude::Pubkey;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info};

use super::nullifier_set::NullifierSet;
use super::pool_ledger::PoolLedger;
use super::PoolId;
use crate::constants::{DEFAULT_FEE, MERKLE_TREE_DEPTH, POOL_DENOMINATIONS};
use crate::crypto::{compute_commitment, compute_nullifier, SpendableNote};
use crate::error::PoolError;
use crate::external::{FeeToken, ValueVault};
use crate::merkle::{verify_proof, MerkleProof};

/// Engine-wide settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ManagerConfig {
    /// Fee-token units debited from the depositor on every deposit
    pub deposit_fee: u64,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            deposit_fee: DEFAULT_FEE,
        }
    }
}

/// Everything a withdrawal carries.
#[derive(Clone, Debug)]
pub struct WithdrawRequest<const DEPTH: usize = MERKLE_TREE_DEPTH> {
    pub pool_id: PoolId,
    pub secret: [u8; 32],
    pub nullifier_preimage: [u8; 32],
    pub nullifier_hash: [u8; 32],
    pub leaf_index: u32,
    pub proof: MerkleProof<DEPTH>,
    pub recipient: Pubkey,
}

impl<const DEPTH: usize> WithdrawRequest<DEPTH> {
    pub fn from_note(note: &SpendableNote, proof: MerkleProof<DEPTH>, recipient: Pubkey) -> Self {
        Self {
            pool_id: note.pool_id,
            secret: *note.note.secret(),
            nullifier_preimage: *note.note.nullifier_preimage(),
            nullifier_hash: note.note.nullifier_hash(),
            leaf_index: note.leaf_index,
            proof,
            recipient,
        }
    }
}

struct PoolSlot<const DEPTH: usize> {
    ledger: Mutex<PoolLedger<DEPTH>>,
    nullifiers: Mutex<NullifierSet>,
}

pub struct PoolManager<F, V, const DEPTH: usize = MERKLE_TREE_DEPTH> {
    config: ManagerConfig,
    pools: RwLock<HashMap<PoolId, Arc<PoolSlot<DEPTH>>>>,
    fee_token: Mutex<F>,
    vault: Mutex<V>,
}

impl<F, V, const DEPTH: usize> PoolManager<F, V, DEPTH>
where
    F: FeeToken,
    V: ValueVault,
{
    /// Engine with no pools.
    pub fn new(config: ManagerConfig, fee_token: F, vault: V) -> Self {
        Self {
            config,
            pools: RwLock::new(HashMap::new()),
            fee_token: Mutex::new(fee_token),
            vault: Mutex::new(vault),
        }
    }

    /// Engine with pools `0..3` at the standard denominations.
    pub fn with_standard_pools(
        config: ManagerConfig,
        fee_token: F,
        vault: V,
    ) -> std::result::Result<Self, PoolError> {
        let manager = Self::new(config, fee_token, vault);
        for (pool_id, denomination) in (0..).zip(POOL_DENOMINATIONS) {
            manager.init_pool(pool_id, denomination)?;
        }
        Ok(manager)
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Register an empty pool and return its initial state.
    ///
    /// # Errors
    /// * `InvalidDenomination` for a zero denomination
    /// * `PoolAlreadyInitialized` if `pool_id` is taken
    pub fn init_pool(
        &self,
        pool_id: PoolId,
        denomination: u64,
    ) -> std::result::Result<PoolLedger<DEPTH>, PoolError> {
        let ledger = PoolLedger::new(pool_id, denomination)?;

        match self.pools.write().entry(pool_id) {
            Entry::Occupied(_) => return Err(PoolError::PoolAlreadyInitialized),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(PoolSlot {
                    ledger: Mutex::new(ledger.clone()),
                    nullifiers: Mutex::new(NullifierSet::new()),
                }));
            }
        }

        info!(pool_id, denomination, "pool initialized");
        Ok(ledger)
    }

    /// Append `commitment` to the pool's tree, debiting the deposit fee from
    /// `depositor` and crediting the vault by the denomination.
    ///
    /// All or nothing: on any error the tree, fee balance and vault are as
    /// they were.
    ///
    /// # Errors
    /// * `PoolUnknown`, `InvalidCommitment`, `PoolFull`
    /// * whatever the fee token or vault reports
    pub fn deposit(
        &self,
        pool_id: PoolId,
        commitment: [u8; 32],
        depositor: &Pubkey,
    ) -> std::result::Result<u32, PoolError> {
        let slot = self.slot(pool_id)?;
        let mut ledger = slot.ledger.lock();

        let mut staged = ledger.clone();
        let leaf_index = staged.deposit(commitment)?;
        self.settle_deposit(pool_id, staged.denomination(), depositor)?;
        *ledger = staged;

        debug!(pool_id, leaf_index, "deposit committed");
        Ok(leaf_index)
    }

    fn settle_deposit(
        &self,
        pool_id: PoolId,
        denomination: u64,
        depositor: &Pubkey,
    ) -> std::result::Result<(), PoolError> {
        let fee = self.config.deposit_fee;
        let mut fee_token = self.fee_token.lock();
        if fee > 0 {
            fee_token.debit(depositor, fee)?;
        }

        if let Err(err) = self.vault.lock().credit(pool_id, denomination) {
            if fee > 0 {
                fee_token.refund(depositor, fee);
            }
            return Err(err);
        }
        Ok(())
    }

    /// Spend a note: verify it against the pool's current root, mark its
    /// nullifier and pay the denomination to the recipient.
    ///
    /// # Errors
    /// * `PoolUnknown`
    /// * `InvalidProof` if the nullifier hash does not match the preimage
    ///   or the path does not reach the current root
    /// * `LeafOutOfRange` for an index no deposit has been assigned
    /// * `NullifierSpent` if the note was already withdrawn
    /// * whatever the vault reports
    pub fn withdraw(&self, request: &WithdrawRequest<DEPTH>) -> std::result::Result<(), PoolError> {
        let slot = self.slot(request.pool_id)?;

        if compute_nullifier(&request.nullifier_preimage) != request.nullifier_hash {
            return Err(PoolError::InvalidProof);
        }

        let (root, next_index, denomination) = {
            let ledger = slot.ledger.lock();
            (ledger.root(), ledger.next_index(), ledger.denomination())
        };
        if request.leaf_index >= next_index {
            return Err(PoolError::LeafOutOfRange);
        }

        let commitment = compute_commitment(&request.secret, &request.nullifier_preimage);
        if !verify_proof(&commitment, request.leaf_index, &request.proof, &root) {
            return Err(PoolError::InvalidProof);
        }

        let mut nullifiers = slot.nullifiers.lock();
        if !nullifiers.insert(request.nullifier_hash) {
            return Err(PoolError::NullifierSpent);
        }

        if let Err(err) =
            self.vault
                .lock()
                .debit(request.pool_id, denomination, &request.recipient)
        {
            nullifiers.remove(&request.nullifier_hash);
            return Err(err);
        }

        info!(
            pool_id = request.pool_id,
            denomination,
            recipient = %request.recipient,
            "withdrawal paid"
        );
        Ok(())
    }

    /// Current root of the pool's tree.
    pub fn root(&self, pool_id: PoolId) -> std::result::Result<[u8; 32], PoolError> {
        Ok(self.slot(pool_id)?.ledger.lock().root())
    }

    pub fn is_spent(
        &self,
        pool_id: PoolId,
        nullifier_hash: &[u8; 32],
    ) -> std::result::Result<bool, PoolError> {
        Ok(self.slot(pool_id)?.nullifiers.lock().contains(nullifier_hash))
    }

    /// Snapshot of the pool's ledger.
    pub fn pool(&self, pool_id: PoolId) -> std::result::Result<PoolLedger<DEPTH>, PoolError> {
        Ok(self.slot(pool_id)?.ledger.lock().clone())
    }

    /// Number of notes withdrawn from the pool.
    pub fn spent_count(&self, pool_id: PoolId) -> std::result::Result<u64, PoolError> {
        Ok(self.slot(pool_id)?.nullifiers.lock().len() as u64)
    }

    /// What the vault should hold for this pool:
    /// `denomination × (deposits − withdrawals)`.
    pub fn expected_vault_balance(&self, pool_id: PoolId) -> std::result::Result<u64, PoolError> {
        let slot = self.slot(pool_id)?;
        let ledger = slot.ledger.lock();
        let withdrawals = slot.nullifiers.lock().len() as u64;
        ledger.expected_balance(withdrawals)
    }

    /// Registered pool ids, ascending.
    pub fn pool_ids(&self) -> Vec<PoolId> {
        let mut ids: Vec<PoolId> = self.pools.read().keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Copy of the fee-token state. No lock is held once this returns.
    pub fn fee_token_snapshot(&self) -> F
    where
        F: Clone,
    {
        self.fee_token.lock().clone()
    }

    /// Copy of the vault state. No lock is held once this returns.
    pub fn vault_snapshot(&self) -> V
    where
        V: Clone,
    {
        self.vault.lock().clone()
    }

    fn slot(&self, pool_id: PoolId) -> std::result::Result<Arc<PoolSlot<DEPTH>>, PoolError> {
        self.pools
            .read()
            .get(&pool_id)
            .cloned()
            .ok_or(PoolError::PoolUnknown)
    }
}
