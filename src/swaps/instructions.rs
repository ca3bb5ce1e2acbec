/// Instruction variants emitted by the swap builder.
///
/// Each variant lowers to exactly one `solana_sdk` instruction; list order is
/// execution order.
use crate::constants::{
    RAYDIUM_AMM_AUTHORITY, RAYDIUM_AMM_V4_PROGRAM_ID, RAYDIUM_SWAP_OPCODE,
};
use crate::errors::{SwapError, SwapResult};
use crate::pools::PoolRecord;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

#[allow(deprecated)]
use solana_sdk::system_instruction;

/// Length of the swap instruction payload: opcode + two u64
pub const SWAP_DATA_LEN: usize = 17;

#[derive(Debug, Clone, PartialEq)]
pub enum SwapInstruction {
    /// Fund and allocate a fresh account owned by `program`
    CreateAccount {
        payer: Pubkey,
        account: Pubkey,
        lamports: u64,
        space: u64,
        program: Pubkey,
    },
    /// SPL token `InitializeAccount`
    InitializeAccount {
        account: Pubkey,
        mint: Pubkey,
        owner: Pubkey,
    },
    /// Create the wallet's associated token account for `mint`
    CreateAssociatedAccount {
        payer: Pubkey,
        wallet: Pubkey,
        mint: Pubkey,
    },
    /// Raydium AMM v4 `swap_base_in`
    RaydiumSwap {
        pool: Box<PoolRecord>,
        amount_in: u64,
        min_out: u64,
        source: Pubkey,
        destination: Pubkey,
        owner: Pubkey,
    },
    /// SPL token `CloseAccount`, lamports go to `destination`
    CloseAccount {
        account: Pubkey,
        destination: Pubkey,
        owner: Pubkey,
    },
}

impl SwapInstruction {
    pub fn to_instruction(&self) -> SwapResult<Instruction> {
        match self {
            SwapInstruction::CreateAccount {
                payer,
                account,
                lamports,
                space,
                program,
            } => {
                #[allow(deprecated)]
                let ix = system_instruction::create_account(payer, account, *lamports, *space, program);
                Ok(ix)
            }
            SwapInstruction::InitializeAccount {
                account,
                mint,
                owner,
            } => spl_token::instruction::initialize_account(&spl_token::id(), account, mint, owner)
                .map_err(|e| SwapError::Signing(format!("Failed to build InitializeAccount: {}", e))),
            SwapInstruction::CreateAssociatedAccount {
                payer,
                wallet,
                mint,
            } => Ok(
                spl_associated_token_account::instruction::create_associated_token_account(
                    payer,
                    wallet,
                    mint,
                    &spl_token::id(),
                ),
            ),
            SwapInstruction::RaydiumSwap {
                pool,
                amount_in,
                min_out,
                source,
                destination,
                owner,
            } => Ok(Instruction {
                program_id: RAYDIUM_AMM_V4_PROGRAM_ID,
                accounts: raydium_swap_accounts(pool, source, destination, owner),
                data: encode_swap_data(*amount_in, *min_out).to_vec(),
            }),
            SwapInstruction::CloseAccount {
                account,
                destination,
                owner,
            } => spl_token::instruction::close_account(
                &spl_token::id(),
                account,
                destination,
                owner,
                &[],
            )
            .map_err(|e| SwapError::Signing(format!("Failed to build CloseAccount: {}", e))),
        }
    }

    /// One-line description for logs
    pub fn summary(&self) -> String {
        match self {
            SwapInstruction::CreateAccount { account, lamports, .. } => {
                format!("create account {} ({} lamports)", account, lamports)
            }
            SwapInstruction::InitializeAccount { account, mint, .. } => {
                format!("initialize {} for mint {}", account, mint)
            }
            SwapInstruction::CreateAssociatedAccount { wallet, mint, .. } => {
                format!("create associated account of {} for mint {}", wallet, mint)
            }
            SwapInstruction::RaydiumSwap {
                pool,
                amount_in,
                min_out,
                ..
            } => format!("swap {} in, at least {} out via pool {}", amount_in, min_out, pool.id),
            SwapInstruction::CloseAccount { account, .. } => format!("close account {}", account),
        }
    }
}

/// `[9][amount_in LE][min_out LE]`
pub fn encode_swap_data(amount_in: u64, min_out: u64) -> [u8; SWAP_DATA_LEN] {
    let mut data = [0u8; SWAP_DATA_LEN];
    data[0] = RAYDIUM_SWAP_OPCODE;
    data[1..9].copy_from_slice(&amount_in.to_le_bytes());
    data[9..17].copy_from_slice(&min_out.to_le_bytes());
    data
}

fn raydium_swap_accounts(
    pool: &PoolRecord,
    source: &Pubkey,
    destination: &Pubkey,
    owner: &Pubkey,
) -> Vec<AccountMeta> {
    vec![
        AccountMeta::new_readonly(spl_token::id(), false),
        AccountMeta::new(pool.id, false),
        AccountMeta::new_readonly(RAYDIUM_AMM_AUTHORITY, false),
        AccountMeta::new(pool.open_orders, false),
        AccountMeta::new(pool.target_orders, false),
        AccountMeta::new(pool.base_vault, false),
        AccountMeta::new(pool.quote_vault, false),
        AccountMeta::new_readonly(pool.market_program_id, false),
        AccountMeta::new(pool.market_id, false),
        AccountMeta::new(pool.market_bids, false),
        AccountMeta::new(pool.market_asks, false),
        AccountMeta::new(pool.market_event_queue, false),
        AccountMeta::new(pool.market_base_vault, false),
        AccountMeta::new(pool.market_quote_vault, false),
        AccountMeta::new_readonly(pool.market_authority, false),
        AccountMeta::new(*source, false),
        AccountMeta::new(*destination, false),
        AccountMeta::new_readonly(*owner, true),
    ]
}
