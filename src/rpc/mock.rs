use super::types::{RpcFilterType, SignatureStatus};
use super::LedgerRpc;
use crate::errors::{SwapError, SwapResult};
use solana_sdk::{
    account::Account, hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction,
};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory ledger with per-method call counters.
///
/// Program-account searches apply memcmp filters against the stored data,
/// so discovery behaves like a real node for fixture accounts.
#[derive(Default)]
pub struct MockRpc {
    pub accounts: Mutex<HashMap<Pubkey, Account>>,
    pub program_accounts: Mutex<Vec<(Pubkey, Account)>>,
    /// Popped per status poll; an empty queue reports "not seen"
    pub statuses: Mutex<VecDeque<Result<Option<SignatureStatus>, String>>>,
    pub sent: Mutex<Vec<Transaction>>,
    pub fail_program_accounts: Mutex<bool>,
    /// Delay applied to every status poll, for a node that stalls
    pub status_delay: Mutex<Option<std::time::Duration>>,
    pub rent: u64,

    pub multiple_accounts_calls: AtomicUsize,
    pub account_calls: AtomicUsize,
    pub program_accounts_calls: AtomicUsize,
    pub status_calls: AtomicUsize,
}

impl MockRpc {
    pub fn new() -> Self {
        Self {
            rent: 2_039_280,
            ..Default::default()
        }
    }

    pub fn add_account(&self, pubkey: Pubkey, owner: Pubkey, lamports: u64, data: Vec<u8>) {
        self.accounts.lock().unwrap().insert(
            pubkey,
            Account {
                lamports,
                data,
                owner,
                executable: false,
                rent_epoch: 0,
            },
        );
    }

    pub fn add_program_account(&self, pubkey: Pubkey, owner: Pubkey, data: Vec<u8>) {
        let account = Account {
            lamports: 6_124_800,
            data,
            owner,
            executable: false,
            rent_epoch: 0,
        };
        self.accounts.lock().unwrap().insert(pubkey, account.clone());
        self.program_accounts.lock().unwrap().push((pubkey, account));
    }

    pub fn push_status(&self, status: Result<Option<SignatureStatus>, String>) {
        self.statuses.lock().unwrap().push_back(status);
    }

    pub fn network_calls(&self) -> usize {
        self.multiple_accounts_calls.load(Ordering::SeqCst)
            + self.account_calls.load(Ordering::SeqCst)
            + self.program_accounts_calls.load(Ordering::SeqCst)
    }

    fn matches(data: &[u8], filters: &[RpcFilterType]) -> bool {
        filters.iter().all(|filter| match filter {
            RpcFilterType::Memcmp { offset, bytes } => {
                let Ok(raw) = bs58::decode(bytes).into_vec() else {
                    return false;
                };
                data.get(*offset..offset + raw.len()) == Some(raw.as_slice())
            }
        })
    }
}

impl LedgerRpc for MockRpc {
    async fn get_multiple_accounts(&self, pubkeys: &[Pubkey]) -> SwapResult<Vec<Option<Account>>> {
        self.multiple_accounts_calls.fetch_add(1, Ordering::SeqCst);
        let accounts = self.accounts.lock().unwrap();
        Ok(pubkeys.iter().map(|p| accounts.get(p).cloned()).collect())
    }

    async fn get_account(&self, pubkey: &Pubkey) -> SwapResult<Option<Account>> {
        self.account_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.accounts.lock().unwrap().get(pubkey).cloned())
    }

    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        filters: Vec<RpcFilterType>,
    ) -> SwapResult<Vec<(Pubkey, Account)>> {
        self.program_accounts_calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_program_accounts.lock().unwrap() {
            return Err(SwapError::Transport("getProgramAccounts disabled".to_string()));
        }
        Ok(self
            .program_accounts
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, a)| a.owner == *program_id && Self::matches(&a.data, &filters))
            .cloned()
            .collect())
    }

    async fn get_latest_blockhash(&self) -> SwapResult<Hash> {
        Ok(Hash::new_from_array([7u8; 32]))
    }

    async fn get_minimum_balance_for_rent_exemption(&self, _data_len: usize) -> SwapResult<u64> {
        Ok(self.rent)
    }

    async fn send_transaction(&self, transaction: &Transaction) -> SwapResult<Signature> {
        self.sent.lock().unwrap().push(transaction.clone());
        Ok(transaction.signatures[0])
    }

    async fn get_signature_status(
        &self,
        _signature: &Signature,
    ) -> SwapResult<Option<SignatureStatus>> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.status_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match self.statuses.lock().unwrap().pop_front() {
            Some(Ok(status)) => Ok(status),
            Some(Err(msg)) => Err(SwapError::Transport(msg)),
            None => Ok(None),
        }
    }
}
